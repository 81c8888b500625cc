//! Builders shared by pipeline unit tests.

use crate::models::{App, FlowType, Screen, ScreenType, Video};

pub fn screen(id: &str) -> Screen {
    Screen {
        id: id.to_string(),
        title: format!("Screen {}", id),
        image_url: format!("https://images.example.com/{}.png", id),
        platforms: vec!["iOS".to_string()],
        flow_type: None,
        screen_types: Vec::new(),
        is_desktop: false,
        desktop_flag_explicit: true,
        duplicated_screen: false,
        thumbnail: false,
        order: None,
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

pub fn desktop_screen(id: &str) -> Screen {
    Screen {
        platforms: vec!["Web".to_string()],
        is_desktop: true,
        ..screen(id)
    }
}

pub fn flow(name: &str, order: Option<i64>) -> FlowType {
    FlowType {
        name: name.to_string(),
        order,
    }
}

pub fn in_flow(mut screen: Screen, name: &str) -> Screen {
    screen.flow_type = Some(flow(name, None));
    screen
}

pub fn screen_type(name: &str) -> ScreenType {
    ScreenType {
        name: name.to_string(),
    }
}

pub fn video(id: &str, is_desktop: bool) -> Video {
    Video {
        id: id.to_string(),
        title: format!("Video {}", id),
        video_url: format!("https://videos.example.com/{}.mp4", id),
        is_desktop,
    }
}

pub fn app(id: &str, screens: Vec<Screen>, flow_types: Vec<FlowType>) -> App {
    App {
        id: id.to_string(),
        name: format!("App {}", id),
        category: "Finance".to_string(),
        description: None,
        logo_url: None,
        screens,
        videos: Vec::new(),
        flow_types,
        screen_types: Vec::new(),
        updated_at: None,
    }
}

pub fn ids(screens: &[Screen]) -> Vec<&str> {
    screens.iter().map(|s| s.id.as_str()).collect()
}
