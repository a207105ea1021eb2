//! Preferences State

pub use bookmarks_config::IncognitoAvailability;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesState {
    pub can_edit: bool,
    pub incognito_availability: IncognitoAvailability,
}

impl Default for PreferencesState {
    fn default() -> Self {
        Self {
            can_edit: true,
            incognito_availability: IncognitoAvailability::Enabled,
        }
    }
}
