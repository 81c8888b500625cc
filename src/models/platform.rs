//! Platform classification.

use serde::{Deserialize, Serialize};

/// The two browsing platforms a screen can belong to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mobile,
    Desktop,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Mobile => "mobile",
            Platform::Desktop => "desktop",
        }
    }

    /// Case-insensitive parse of a URL segment.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Some(Platform::Mobile),
            "desktop" => Some(Platform::Desktop),
            _ => None,
        }
    }

    /// Lowercase platform tag names that mark a screen as belonging here.
    pub fn tag_names(&self) -> &'static [&'static str] {
        match self {
            Platform::Mobile => &["ios", "android"],
            Platform::Desktop => &["web", "desktop"],
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a screen is assigned to a platform.
///
/// `Flag` looks only at `isDesktop`. `FlagWithTagFallback` still lets an explicit
/// flag win, but classifies records that never carried the flag by their
/// platform tags.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformRule {
    #[default]
    Flag,
    FlagWithTagFallback,
}

impl PlatformRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformRule::Flag => "flag",
            PlatformRule::FlagWithTagFallback => "flag-with-tag-fallback",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "flag" => Some(PlatformRule::Flag),
            "flag-with-tag-fallback" => Some(PlatformRule::FlagWithTagFallback),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parse() {
        assert_eq!(Platform::parse("mobile"), Some(Platform::Mobile));
        assert_eq!(Platform::parse("Desktop"), Some(Platform::Desktop));
        assert_eq!(Platform::parse("tablet"), None);
    }

    #[test]
    fn test_platform_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Platform::Desktop).unwrap(),
            "\"desktop\""
        );
    }

    #[test]
    fn test_platform_rule_round_trip() {
        for rule in [PlatformRule::Flag, PlatformRule::FlagWithTagFallback] {
            assert_eq!(PlatformRule::parse(rule.as_str()), Some(rule));
        }
        assert_eq!(PlatformRule::parse("tags"), None);
        assert_eq!(PlatformRule::default(), PlatformRule::Flag);
    }
}
