use thiserror::Error;

/// A metric value string that could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueParseError {
    #[error("{field} is empty")]
    Empty { field: &'static str },

    #[error("{field} is not a number: {raw:?}")]
    NotNumeric { field: &'static str, raw: String },

    #[error("{field} is not a finite number: {raw:?}")]
    NotFinite { field: &'static str, raw: String },
}

impl ValueParseError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::NotNumeric { field, .. } | Self::NotFinite { field, .. } => {
                field
            }
        }
    }
}
