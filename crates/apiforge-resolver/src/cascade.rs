// crates/apiforge-resolver/src/cascade.rs
// ============================================================================
// Module: Cascade Primitives
// Description: Parent → child inheritance rules shared by every resolver.
// Purpose: Encode unset-vs-explicit semantics once instead of per concern.
// Dependencies: apiforge-config
// ============================================================================

//! ## Overview
//! Three inheritance rules cover every concern:
//! - scalars inherit only when the child is `None`;
//! - lists inherit when the child is empty and the parent is not
//!   ([`ListMerge::Replace`]), or become parent ∪ child ([`ListMerge::Append`]);
//! - descriptive text inherits when the child is unset or blank.

use apiforge_config::ListMerge;

/// Copies the parent value into an unset child.
pub fn inherit<T: Clone>(child: &mut Option<T>, parent: Option<&T>) {
    if child.is_none() {
        *child = parent.cloned();
    }
}

/// Copies parent text into a child that is unset or blank.
pub fn inherit_text(child: &mut Option<String>, parent: Option<&String>) {
    let blank = child.as_deref().is_none_or(|text| text.trim().is_empty());
    if blank && let Some(parent) = parent {
        *child = Some(parent.clone());
    }
}

/// Combines a child list with its parent list.
pub fn merge_list(child: &mut Vec<String>, parent: &[String], strategy: ListMerge) {
    match strategy {
        ListMerge::Replace => {
            if child.is_empty() && !parent.is_empty() {
                *child = parent.to_vec();
            }
        }
        ListMerge::Append => {
            let mut merged = parent.to_vec();
            for entry in child.drain(..) {
                if !merged.contains(&entry) {
                    merged.push(entry);
                }
            }
            *child = merged;
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn scalars_keep_explicit_falsy_values() {
        let mut zero = Some(0_i64);
        inherit(&mut zero, Some(&10));
        assert_eq!(zero, Some(0));
        let mut off = Some(false);
        inherit(&mut off, Some(&true));
        assert_eq!(off, Some(false));
        let mut unset: Option<bool> = None;
        inherit(&mut unset, Some(&true));
        assert_eq!(unset, Some(true));
    }

    #[test]
    fn blank_text_inherits() {
        let mut blank = Some("  ".to_string());
        inherit_text(&mut blank, Some(&"parent".to_string()));
        assert_eq!(blank.as_deref(), Some("parent"));
        let mut own = Some("child".to_string());
        inherit_text(&mut own, Some(&"parent".to_string()));
        assert_eq!(own.as_deref(), Some("child"));
    }

    #[test]
    fn replace_only_fills_empty_children() {
        let mut child = Vec::new();
        merge_list(&mut child, &list(&["ROLE_ADMIN"]), ListMerge::Replace);
        assert_eq!(child, list(&["ROLE_ADMIN"]));
        let mut own = list(&["ROLE_USER"]);
        merge_list(&mut own, &list(&["ROLE_ADMIN"]), ListMerge::Replace);
        assert_eq!(own, list(&["ROLE_USER"]));
        let mut empty = Vec::new();
        merge_list(&mut empty, &[], ListMerge::Replace);
        assert!(empty.is_empty());
    }

    #[test]
    fn append_is_stable_when_repeated() {
        let parent = list(&["a", "b"]);
        let mut child = list(&["c", "a", "c"]);
        merge_list(&mut child, &parent, ListMerge::Append);
        assert_eq!(child, list(&["a", "b", "c"]));
        merge_list(&mut child, &parent, ListMerge::Append);
        assert_eq!(child, list(&["a", "b", "c"]));
    }
}
