use thiserror::Error;

pub const INVALID_CUSTOM_LABEL_MSG: &str = "invalid custom label: keys and values must be 63 characters or less, consist of alphanumeric characters, '-', '_' or '.', and start and end with an alphanumeric character";
pub const MISSING_LABEL_KEY_MSG: &str = "invalid custom label: label key is missing";
pub const INVALID_KEY_VALUE_STR_MSG: &str =
    "invalid custom label: keys and values must not contain whitespace";

/// Custom label parameter rejections, in check precedence order
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelError {
    #[error("{msg}", msg = INVALID_KEY_VALUE_STR_MSG)]
    InvalidKeyValueStr,

    #[error("{msg}", msg = MISSING_LABEL_KEY_MSG)]
    MissingLabelKey,

    #[error("{msg}", msg = INVALID_CUSTOM_LABEL_MSG)]
    InvalidCustomLabel,
}

impl LabelError {
    pub fn message(&self) -> &'static str {
        match self {
            LabelError::InvalidKeyValueStr => INVALID_KEY_VALUE_STR_MSG,
            LabelError::MissingLabelKey => MISSING_LABEL_KEY_MSG,
            LabelError::InvalidCustomLabel => INVALID_CUSTOM_LABEL_MSG,
        }
    }
}
