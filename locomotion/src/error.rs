use std::fmt;

/// Errors raised while loading or validating [`crate::LocomotionSettings`].
///
/// These are construction-time only; the per-frame update never fails.
#[derive(Debug)]
pub enum SettingsError {
    /// The TOML source could not be parsed into settings.
    Parse(toml::de::Error),
    /// A tunable has a value the controller cannot work with.
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(err) => write!(f, "failed to parse locomotion settings: {err}"),
            SettingsError::Invalid { field, reason } => {
                write!(f, "invalid locomotion setting `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(err) => Some(err),
            SettingsError::Invalid { .. } => None,
        }
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(err: toml::de::Error) -> Self {
        SettingsError::Parse(err)
    }
}
