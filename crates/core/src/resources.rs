//! Resource selection.
//!
//! An asset's resources are stored as an unordered set; each record carries
//! an integer priority where a lower value means higher precedence. This
//! module implements the renderer-side selection rule so server and clients
//! agree on tie-breaking.

use crate::types::DbId;

/// The fields of a resource record that selection looks at.
#[derive(Debug, Clone)]
pub struct ResourceView<'a> {
    pub id: DbId,
    pub priority: i32,
    pub context_tags: &'a [String],
}

/// Pick the resource to render for an optional context tag.
///
/// With a context, only resources carrying that tag are eligible; without
/// one, every resource is. Among eligible resources the lowest `priority`
/// value wins, ties broken by insertion order (ascending id, since ids are
/// allocated sequentially).
pub fn select_resource(resources: &[ResourceView<'_>], context: Option<&str>) -> Option<DbId> {
    resources
        .iter()
        .filter(|r| match context {
            Some(tag) => r.context_tags.iter().any(|t| t == tag),
            None => true,
        })
        .min_by_key(|r| (r.priority, r.id))
        .map(|r| r.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(id: DbId, priority: i32, tags: &'a [String]) -> ResourceView<'a> {
        ResourceView {
            id,
            priority,
            context_tags: tags,
        }
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn picks_lowest_priority_value() {
        let t = tags(&[]);
        let resources = vec![view(1, 10, &t), view(2, 1, &t), view(3, 5, &t)];
        assert_eq!(select_resource(&resources, None), Some(2));
    }

    #[test]
    fn ties_broken_by_insertion_order() {
        let t = tags(&[]);
        let resources = vec![view(7, 1, &t), view(3, 1, &t)];
        // Same priority: the lower id was inserted first and wins.
        assert_eq!(select_resource(&resources, None), Some(3));
    }

    #[test]
    fn context_filters_eligible_resources() {
        let portrait = tags(&["portrait"]);
        let landscape = tags(&["landscape"]);
        let resources = vec![view(1, 0, &landscape), view(2, 5, &portrait)];
        assert_eq!(select_resource(&resources, Some("portrait")), Some(2));
    }

    #[test]
    fn no_match_for_unknown_context() {
        let portrait = tags(&["portrait"]);
        let resources = vec![view(1, 0, &portrait)];
        assert_eq!(select_resource(&resources, Some("audio")), None);
    }

    #[test]
    fn empty_set_selects_nothing() {
        assert_eq!(select_resource(&[], None), None);
    }

    #[test]
    fn duplicate_uri_records_are_independent() {
        // Same logical resource registered twice at different priorities:
        // both exist, selection just prefers the stronger one.
        let portrait = tags(&["portrait"]);
        let any = tags(&[]);
        let resources = vec![view(1, 5, &any), view(2, 1, &portrait)];
        assert_eq!(select_resource(&resources, None), Some(2));
        assert_eq!(select_resource(&resources, Some("portrait")), Some(2));
    }
}
