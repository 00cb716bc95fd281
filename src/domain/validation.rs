use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    MissingEnv { var: &'static str },
    InvalidPhoneNumber { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MissingEnv { var } => write!(f, "{var} environment variable is not set"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}
