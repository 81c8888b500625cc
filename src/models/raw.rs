//! Raw CMS payload types.
//!
//! These mirror the headless CMS entries export. Almost every field is optional
//! because the CMS does not enforce them; the normalizer decides what survives.

use serde::Deserialize;
use serde_json::Value;

/// The full export: one list per content type.
///
/// Entries stay untyped here so one malformed record cannot sink the whole
/// payload. The normalizer decodes them one at a time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayload {
    #[serde(default)]
    pub apps: Vec<Value>,
    #[serde(default)]
    pub screens: Vec<Value>,
    #[serde(default)]
    pub videos: Vec<Value>,
}

/// System metadata attached to every entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A generic CMS entry: system metadata plus content-type specific fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry<F> {
    pub sys: Sys,
    #[serde(default)]
    pub fields: F,
}

pub type RawAppEntry = Entry<RawAppFields>;
pub type RawScreenEntry = Entry<RawScreenFields>;
pub type RawVideoEntry = Entry<RawVideoFields>;

/// Link to another entry by id.
#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkSys {
    pub id: String,
}

/// An uploaded asset (image or video file).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub fields: Option<AssetFields>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetFields {
    #[serde(default)]
    pub file: Option<AssetFile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetFile {
    #[serde(default)]
    pub url: Option<String>,
}

impl Asset {
    /// The file URL as stored in the CMS, if any.
    pub fn file_url(&self) -> Option<&str> {
        self.fields
            .as_ref()
            .and_then(|f| f.file.as_ref())
            .and_then(|f| f.url.as_deref())
    }
}

/// A resolved reference to a name-bearing entry (platform, flow type, category...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub fields: Option<NamedFields>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub order: Option<Value>,
}

impl NamedRef {
    /// The referenced name, ignoring blanks.
    pub fn name(&self) -> Option<&str> {
        self.fields
            .as_ref()
            .and_then(|f| f.name.as_deref())
            .filter(|n| !n.trim().is_empty())
    }

    pub fn order(&self) -> Option<i64> {
        self.fields
            .as_ref()
            .and_then(|f| f.order.as_ref())
            .and_then(order_value)
    }
}

/// Accept integers and integral floats; anything else counts as "no order".
pub fn order_value(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAppFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<NamedRef>,
    #[serde(default, rename = "app_logo")]
    pub app_logo: Option<Asset>,
    #[serde(default)]
    pub date_updated: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScreenFields {
    #[serde(default)]
    pub app: Option<Link>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<Asset>,
    #[serde(default)]
    pub platform: Option<Vec<NamedRef>>,
    #[serde(default)]
    pub flow_type: Option<NamedRef>,
    #[serde(default)]
    pub screen_type: Option<Vec<NamedRef>>,
    #[serde(default)]
    pub is_desktop: Option<bool>,
    #[serde(default)]
    pub duplicated_screen: Option<bool>,
    #[serde(default)]
    pub thumbnail: Option<bool>,
    #[serde(default)]
    pub order: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVideoFields {
    #[serde(default)]
    pub app: Option<Link>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub video: Option<Asset>,
    #[serde(default)]
    pub is_desktop: Option<bool>,
}
