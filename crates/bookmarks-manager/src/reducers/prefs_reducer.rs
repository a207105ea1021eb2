use crate::actions::Action;
use crate::state::PreferencesState;

/// Reducer for preferences
pub fn reduce(mut state: PreferencesState, action: &Action) -> PreferencesState {
    match action {
        Action::SetIncognitoAvailability(availability) => {
            state.incognito_availability = *availability;
        }
        Action::SetCanEdit(can_edit) => {
            state.can_edit = *can_edit;
        }
        _ => {}
    }

    state
}
