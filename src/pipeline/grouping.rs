//! Flow grouper and selector filters.

use crate::models::{FlowGroup, FlowType, Screen, ScreenType};

use super::ordering::{sort_flow_types, sort_screens};

/// Sentinel selection meaning "no filter".
pub const ALL: &str = "all";

/// A single-value filter over flow types or screen types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Resolve a requested name against the names that actually exist.
    ///
    /// Missing, blank, the `all` sentinel, or a name not in `known` all fall
    /// back to `All`.
    pub fn resolve<'a>(
        requested: Option<&str>,
        mut known: impl Iterator<Item = &'a str>,
    ) -> Self {
        match requested.map(str::trim) {
            Some(name) if !name.is_empty() && name != ALL && known.any(|k| k == name) => {
                Selection::Only(name.to_string())
            }
            _ => Selection::All,
        }
    }

    pub fn for_flow(requested: Option<&str>, flow_types: &[FlowType]) -> Self {
        Self::resolve(requested, flow_types.iter().map(|ft| ft.name.as_str()))
    }

    pub fn for_screen_type(requested: Option<&str>, screen_types: &[ScreenType]) -> Self {
        Self::resolve(requested, screen_types.iter().map(|st| st.name.as_str()))
    }

    pub fn selected(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Only(name) => Some(name.as_str()),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => selected == name,
        }
    }
}

/// Screens of one flow, in display order.
pub fn flow_screens(screens: &[Screen], flow_name: &str) -> Vec<Screen> {
    let mut matched: Vec<Screen> = screens
        .iter()
        .filter(|s| s.flow_name() == Some(flow_name))
        .cloned()
        .collect();
    sort_screens(&mut matched);
    matched
}

/// Group platform-scoped screens by flow type.
///
/// Groups follow the order-sorted `flow_types`; empty groups are dropped and
/// screens without a flow type appear in no group.
pub fn group_by_flow(
    screens: &[Screen],
    flow_types: &[FlowType],
    filter: &Selection,
) -> Vec<FlowGroup> {
    let mut flow_types = flow_types.to_vec();
    sort_flow_types(&mut flow_types);

    flow_types
        .iter()
        .filter(|ft| filter.matches(&ft.name))
        .map(|ft| FlowGroup {
            flow_type_name: ft.name.clone(),
            screens: flow_screens(screens, &ft.name),
        })
        .filter(|group| !group.screens.is_empty())
        .collect()
}

/// The flow selector list for one platform: flow types with at least one screen.
pub fn available_flow_types(screens: &[Screen], flow_types: &[FlowType]) -> Vec<FlowType> {
    let mut available: Vec<FlowType> = flow_types
        .iter()
        .filter(|ft| screens.iter().any(|s| s.flow_name() == Some(ft.name.as_str())))
        .cloned()
        .collect();
    sort_flow_types(&mut available);
    available
}

/// The screen-type selector list for one platform.
pub fn available_screen_types(screens: &[Screen], screen_types: &[ScreenType]) -> Vec<ScreenType> {
    screen_types
        .iter()
        .filter(|st| screens.iter().any(|s| s.has_screen_type(&st.name)))
        .cloned()
        .collect()
}

/// Screens carrying the selected screen type.
pub fn filter_by_screen_type(screens: &[Screen], filter: &Selection) -> Vec<Screen> {
    screens
        .iter()
        .filter(|s| match filter.selected() {
            None => true,
            Some(name) => s.has_screen_type(name),
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Platform, PlatformRule};
    use crate::pipeline::partition::partition;
    use crate::pipeline::test_support::{desktop_screen, flow, ids, in_flow, screen, screen_type};

    fn names(groups: &[FlowGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.flow_type_name.as_str()).collect()
    }

    #[test]
    fn test_grouping_scenario() {
        let screens = vec![
            in_flow(screen("s1"), "B"),
            in_flow(screen("s2"), "A"),
            in_flow(screen("s3"), "B"),
            screen("s4"),
            in_flow(screen("s5"), "A"),
        ];
        let flow_types = vec![flow("A", Some(2)), flow("B", Some(1))];

        let mobile = partition(&screens, Platform::Mobile, PlatformRule::Flag);
        assert_eq!(ids(&mobile), vec!["s1", "s2", "s3", "s4", "s5"]);

        let groups = group_by_flow(&mobile, &flow_types, &Selection::All);
        assert_eq!(names(&groups), vec!["B", "A"]);
        assert_eq!(ids(&groups[0].screens), vec!["s1", "s3"]);
        assert_eq!(ids(&groups[1].screens), vec!["s2", "s5"]);
        assert!(groups.iter().all(|g| g.screens.iter().all(|s| s.id != "s4")));
    }

    #[test]
    fn test_groups_cover_all_flow_screens_and_are_non_empty() {
        let screens = vec![
            in_flow(screen("a1"), "A"),
            in_flow(desktop_screen("d1"), "C"),
            in_flow(screen("b1"), "B"),
            screen("loose"),
        ];
        let flow_types = vec![flow("A", None), flow("B", None), flow("C", None)];
        let mobile = partition(&screens, Platform::Mobile, PlatformRule::Flag);

        let groups = group_by_flow(&mobile, &flow_types, &Selection::All);
        assert!(groups.iter().all(|g| !g.screens.is_empty()));
        assert_eq!(names(&groups), vec!["A", "B"]);

        let mut grouped: Vec<&str> = groups.iter().flat_map(|g| ids(&g.screens)).collect();
        grouped.sort();
        let mut expected: Vec<&str> = mobile
            .iter()
            .filter(|s| s.flow_type.is_some())
            .map(|s| s.id.as_str())
            .collect();
        expected.sort();
        assert_eq!(grouped, expected);
    }

    #[test]
    fn test_group_screens_are_ordered() {
        let screens = vec![
            Screen {
                order: None,
                ..in_flow(screen("unordered"), "A")
            },
            Screen {
                order: Some(2),
                ..in_flow(screen("second"), "A")
            },
            Screen {
                order: Some(1),
                ..in_flow(screen("first"), "A")
            },
        ];
        let groups = group_by_flow(&screens, &[flow("A", None)], &Selection::All);
        assert_eq!(ids(&groups[0].screens), vec!["first", "second", "unordered"]);
    }

    #[test]
    fn test_single_flow_filter() {
        let screens = vec![in_flow(screen("a"), "A"), in_flow(screen("b"), "B")];
        let flow_types = vec![flow("A", None), flow("B", None)];

        let filter = Selection::for_flow(Some("B"), &flow_types);
        assert_eq!(filter, Selection::Only("B".to_string()));
        let groups = group_by_flow(&screens, &flow_types, &filter);
        assert_eq!(names(&groups), vec!["B"]);
    }

    #[test]
    fn test_unknown_or_sentinel_filter_falls_back_to_all() {
        let flow_types = vec![flow("A", None)];
        assert_eq!(Selection::for_flow(Some("Missing"), &flow_types), Selection::All);
        assert_eq!(Selection::for_flow(Some(ALL), &flow_types), Selection::All);
        assert_eq!(Selection::for_flow(Some(" "), &flow_types), Selection::All);
        assert_eq!(Selection::for_flow(None, &flow_types), Selection::All);
        assert_eq!(Selection::All.selected(), None);
    }

    #[test]
    fn test_available_flow_types_per_platform() {
        let screens = vec![
            in_flow(screen("m"), "Mobile only"),
            in_flow(desktop_screen("d"), "Desktop only"),
        ];
        let flow_types = vec![flow("Desktop only", Some(1)), flow("Mobile only", Some(2))];

        let mobile = partition(&screens, Platform::Mobile, PlatformRule::Flag);
        let desktop = partition(&screens, Platform::Desktop, PlatformRule::Flag);
        assert_eq!(
            available_flow_types(&mobile, &flow_types),
            vec![flow("Mobile only", Some(2))]
        );
        assert_eq!(
            available_flow_types(&desktop, &flow_types),
            vec![flow("Desktop only", Some(1))]
        );
    }

    #[test]
    fn test_screen_type_filter() {
        let screens = vec![
            Screen {
                screen_types: vec![screen_type("Empty state")],
                ..screen("e")
            },
            screen("plain"),
        ];
        let types = vec![screen_type("Empty state"), screen_type("Paywall")];

        assert_eq!(
            available_screen_types(&screens, &types),
            vec![screen_type("Empty state")]
        );

        let filter = Selection::for_screen_type(Some("Empty state"), &types);
        assert_eq!(ids(&filter_by_screen_type(&screens, &filter)), vec!["e"]);
        assert_eq!(filter_by_screen_type(&screens, &Selection::All).len(), 2);
    }

    #[test]
    fn test_empty_inputs_produce_no_groups() {
        assert!(group_by_flow(&[], &[flow("A", None)], &Selection::All).is_empty());
        assert!(group_by_flow(&[screen("x")], &[], &Selection::All).is_empty());
    }
}
