use crate::actions::Action;
use crate::state::SearchState;

/// Reducer for search state
pub fn reduce(mut state: SearchState, action: &Action) -> SearchState {
    match action {
        Action::StartSearch(term) => {
            // Previous results stay visible until the new ones arrive
            state.term = term.clone();
            state.in_progress = true;
        }
        Action::FinishSearch(results) => {
            state.in_progress = false;
            state.results = Some(results.clone());
        }
        Action::ClearSearch | Action::SelectFolder(_) => {
            state = SearchState::default();
        }
        Action::RemoveBookmark { descendants, .. } => {
            if let Some(results) = state.results.as_mut() {
                results.retain(|id| !descendants.contains(id));
            }
        }
        _ => {}
    }

    state
}
