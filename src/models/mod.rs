//! Data models for the screen catalog.
//!
//! `raw` mirrors the CMS entries export and is only ever read by the normalizer.
//! Everything else is the canonical shape served to the gallery front end.

mod app;
mod catalog;
mod platform;
pub mod raw;
mod screen;
mod view;

pub use app::*;
pub use catalog::*;
pub use platform::*;
pub use screen::*;
pub use view::*;
