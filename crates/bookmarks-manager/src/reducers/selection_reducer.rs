use std::collections::HashSet;

use crate::actions::Action;
use crate::state::{NodeId, SelectionState};

/// Reducer for the item selection
pub fn reduce(state: SelectionState, action: &Action) -> SelectionState {
    match action {
        Action::ClearSearch
        | Action::FinishSearch(_)
        | Action::SelectFolder(_)
        | Action::DeselectItems => SelectionState::default(),
        Action::SelectItems {
            items,
            clear,
            toggle,
            anchor,
        } => select_items(state, items, *clear, *toggle, anchor.clone()),
        Action::RemoveBookmark { descendants, .. } => deselect(state, descendants),
        // Items moved to another folder are no longer on screen
        Action::MoveBookmark {
            id,
            parent_id,
            old_parent_id,
            ..
        } if parent_id != old_parent_id && state.contains(id) => {
            deselect(state, &HashSet::from([id.clone()]))
        }
        Action::UpdateAnchor(id) => SelectionState {
            anchor: Some(id.clone()),
            ..state
        },
        _ => state,
    }
}

fn select_items(
    state: SelectionState,
    items: &[NodeId],
    clear: bool,
    toggle: bool,
    anchor: Option<NodeId>,
) -> SelectionState {
    let mut selected = if clear { HashSet::new() } else { state.items };

    for id in items {
        let add = !toggle || !selected.contains(id);
        if add {
            selected.insert(id.clone());
        } else {
            selected.remove(id);
        }
    }

    SelectionState {
        items: selected,
        anchor,
    }
}

fn deselect(mut state: SelectionState, ids: &HashSet<NodeId>) -> SelectionState {
    state.items.retain(|id| !ids.contains(id));
    if state.anchor.as_ref().is_some_and(|anchor| ids.contains(anchor)) {
        state.anchor = None;
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{move_bookmark, remove_bookmark};
    use crate::state::fixtures::sample_nodes;
    use pretty_assertions::assert_eq;

    fn selection(items: &[&str], anchor: Option<&str>) -> SelectionState {
        SelectionState {
            items: items.iter().map(|id| id.to_string()).collect(),
            anchor: anchor.map(str::to_string),
        }
    }

    fn select(items: &[&str], clear: bool, toggle: bool) -> Action {
        Action::SelectItems {
            items: items.iter().map(|id| id.to_string()).collect(),
            clear,
            toggle,
            anchor: items.first().map(|id| id.to_string()),
        }
    }

    #[test]
    fn test_select_items_clear_replaces() {
        let state = reduce(selection(&["3"], Some("3")), &select(&["4"], true, false));
        assert_eq!(state, selection(&["4"], Some("4")));
    }

    #[test]
    fn test_select_items_adds_without_clear() {
        let state = reduce(selection(&["3"], Some("3")), &select(&["4"], false, false));
        assert_eq!(state, selection(&["3", "4"], Some("4")));
    }

    #[test]
    fn test_select_items_toggle() {
        let state = reduce(selection(&["3", "4"], Some("3")), &select(&["4"], false, true));
        assert_eq!(state, selection(&["3"], Some("4")));

        let state = reduce(state, &select(&["4"], false, true));
        assert_eq!(state, selection(&["3", "4"], Some("4")));
    }

    #[test]
    fn test_navigation_clears_selection() {
        for action in [
            Action::ClearSearch,
            Action::FinishSearch(vec![]),
            Action::SelectFolder("2".into()),
            Action::DeselectItems,
        ] {
            assert_eq!(reduce(selection(&["3"], Some("3")), &action), SelectionState::default());
        }
    }

    #[test]
    fn test_remove_deselects_subtree() {
        let nodes = sample_nodes();
        let state = reduce(
            selection(&["4", "5"], Some("5")),
            &remove_bookmark("3", &nodes).unwrap(),
        );
        assert_eq!(state, selection(&["4"], None));
    }

    #[test]
    fn test_move_to_other_folder_deselects() {
        let state = reduce(
            selection(&["3", "4"], Some("3")),
            &move_bookmark("4", "2", 0, "1", 1),
        );
        assert_eq!(state, selection(&["3"], Some("3")));

        let state = reduce(
            selection(&["3", "4"], Some("3")),
            &move_bookmark("4", "1", 0, "1", 1),
        );
        assert_eq!(state, selection(&["3", "4"], Some("3")));
    }

    #[test]
    fn test_update_anchor() {
        let state = reduce(selection(&["3"], Some("3")), &Action::UpdateAnchor("4".into()));
        assert_eq!(state, selection(&["3"], Some("4")));
    }
}
