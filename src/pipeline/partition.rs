//! Platform partitioner.
//!
//! Every screen classifies into exactly one platform under a given rule, so
//! the mobile and desktop partitions never overlap and together cover every
//! non-duplicated screen.

use std::collections::HashSet;

use crate::models::{Platform, PlatformRule, Screen, Video};

/// Tag-based membership: does any platform tag name this platform?
pub fn matches_tags(screen: &Screen, platform: Platform) -> bool {
    let wanted = platform.tag_names();
    screen
        .platforms
        .iter()
        .any(|tag| wanted.contains(&tag.to_ascii_lowercase().as_str()))
}

/// The platform a screen belongs to under `rule`.
pub fn classify(screen: &Screen, rule: PlatformRule) -> Platform {
    let use_tags = rule == PlatformRule::FlagWithTagFallback && !screen.desktop_flag_explicit;
    let desktop = if use_tags {
        matches_tags(screen, Platform::Desktop)
    } else {
        screen.is_desktop
    };
    if desktop {
        Platform::Desktop
    } else {
        Platform::Mobile
    }
}

/// Whether a screen is visible on `platform`. Duplicates are never visible.
pub fn is_visible(screen: &Screen, platform: Platform, rule: PlatformRule) -> bool {
    !screen.duplicated_screen && classify(screen, rule) == platform
}

/// Screens belonging to `platform`, input order preserved.
pub fn partition(screens: &[Screen], platform: Platform, rule: PlatformRule) -> Vec<Screen> {
    screens
        .iter()
        .filter(|s| is_visible(s, platform, rule))
        .cloned()
        .collect()
}

/// Whether the app has anything to show on `platform`.
pub fn has_platform(screens: &[Screen], platform: Platform, rule: PlatformRule) -> bool {
    screens.iter().any(|s| is_visible(s, platform, rule))
}

/// Videos for `platform`. Videos only carry the desktop flag.
pub fn videos_for(videos: &[Video], platform: Platform) -> Vec<Video> {
    videos
        .iter()
        .filter(|v| (platform == Platform::Desktop) == v.is_desktop)
        .cloned()
        .collect()
}

/// Distinct platform tag names among `screens` that name `platform`, case preserved.
pub fn platform_names(screens: &[Screen], platform: Platform) -> Vec<String> {
    let wanted = platform.tag_names();
    let mut seen = HashSet::new();
    screens
        .iter()
        .flat_map(|s| s.platforms.iter())
        .filter(|tag| wanted.contains(&tag.to_ascii_lowercase().as_str()))
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::{desktop_screen, ids, screen, video};

    /// `(mobile, desktop)` partitions of `screens`.
    fn split(screens: &[Screen], rule: PlatformRule) -> (Vec<Screen>, Vec<Screen>) {
        (
            partition(screens, Platform::Mobile, rule),
            partition(screens, Platform::Desktop, rule),
        )
    }

    fn legacy(id: &str, tags: &[&str]) -> Screen {
        Screen {
            platforms: tags.iter().map(|t| t.to_string()).collect(),
            desktop_flag_explicit: false,
            ..screen(id)
        }
    }

    #[test]
    fn test_flag_rule_partitions() {
        let screens = vec![
            screen("m1"),
            desktop_screen("d1"),
            screen("m2"),
            desktop_screen("d2"),
        ];
        let mobile = partition(&screens, Platform::Mobile, PlatformRule::Flag);
        let desktop = partition(&screens, Platform::Desktop, PlatformRule::Flag);
        assert_eq!(ids(&mobile), vec!["m1", "m2"]);
        assert_eq!(ids(&desktop), vec!["d1", "d2"]);
    }

    #[test]
    fn test_missing_flag_is_mobile_under_flag_rule() {
        let web_tagged = legacy("w", &["Web"]);
        assert_eq!(classify(&web_tagged, PlatformRule::Flag), Platform::Mobile);
    }

    #[test]
    fn test_tag_fallback_only_applies_without_flag() {
        let web_tagged = legacy("w", &["Web"]);
        let ios_tagged = legacy("i", &["iOS"]);
        let explicit_mobile = Screen {
            platforms: vec!["Web".to_string()],
            ..screen("e")
        };

        let rule = PlatformRule::FlagWithTagFallback;
        assert_eq!(classify(&web_tagged, rule), Platform::Desktop);
        assert_eq!(classify(&ios_tagged, rule), Platform::Mobile);
        assert_eq!(classify(&explicit_mobile, rule), Platform::Mobile);
    }

    #[test]
    fn test_matches_tags_case_insensitive() {
        let s = legacy("s", &["IOS", "web"]);
        assert!(matches_tags(&s, Platform::Mobile));
        assert!(matches_tags(&s, Platform::Desktop));
        assert!(!matches_tags(&legacy("n", &[]), Platform::Mobile));
        assert!(matches_tags(&legacy("d", &["Desktop"]), Platform::Desktop));
    }

    #[test]
    fn test_partitions_are_disjoint_and_cover_non_duplicates() {
        for rule in [PlatformRule::Flag, PlatformRule::FlagWithTagFallback] {
            let screens = vec![
                screen("a"),
                desktop_screen("b"),
                legacy("c", &["Web"]),
                legacy("d", &["Android"]),
                Screen {
                    duplicated_screen: true,
                    ..screen("dup")
                },
                legacy("e", &[]),
            ];

            let (mobile, desktop) = split(&screens, rule);
            let mut all: Vec<&str> = ids(&mobile);
            all.extend(ids(&desktop));
            all.sort();
            assert_eq!(all, vec!["a", "b", "c", "d", "e"]);
            assert!(mobile.iter().all(|m| desktop.iter().all(|d| d.id != m.id)));

            assert_eq!(partition(&screens, Platform::Mobile, rule), mobile);
            assert_eq!(partition(&screens, Platform::Desktop, rule), desktop);
        }
    }

    #[test]
    fn test_duplicates_never_visible() {
        let dup = Screen {
            duplicated_screen: true,
            ..desktop_screen("dup")
        };
        assert!(!is_visible(&dup, Platform::Desktop, PlatformRule::Flag));
        assert!(!has_platform(&[dup], Platform::Desktop, PlatformRule::Flag));
    }

    #[test]
    fn test_videos_for_platform() {
        let videos = vec![video("m", false), video("d", true)];
        let desktop = videos_for(&videos, Platform::Desktop);
        let mobile = videos_for(&videos, Platform::Mobile);
        assert_eq!(desktop.len(), 1);
        assert_eq!(desktop[0].id, "d");
        assert_eq!(mobile[0].id, "m");
    }

    #[test]
    fn test_platform_names_distinct_and_scoped() {
        let screens = vec![
            legacy("a", &["iOS", "Web"]),
            legacy("b", &["Android", "iOS"]),
        ];
        assert_eq!(platform_names(&screens, Platform::Mobile), vec!["iOS", "Android"]);
        assert_eq!(platform_names(&screens, Platform::Desktop), vec!["Web"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(partition(&[], Platform::Mobile, PlatformRule::Flag).is_empty());
        let (m, d) = split(&[], PlatformRule::Flag);
        assert!(m.is_empty() && d.is_empty());
    }
}
