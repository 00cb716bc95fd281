use std::fmt;

use phonenumber::country;
use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// Textfully API key, sent as a bearer token.
///
/// Invariant: non-empty after trimming. `Debug` output never contains the key.
pub struct ApiKey(String);

impl ApiKey {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "api_key";

    /// Environment variable read by [`ApiKey::from_env`].
    pub const ENV_VAR: &'static str = "TEXTFULLY_API_KEY";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Read the key from `TEXTFULLY_API_KEY`.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(std::env::var(Self::ENV_VAR).ok())
    }

    fn from_lookup(value: Option<String>) -> Result<Self, ValidationError> {
        match value {
            Some(value) => Self::new(value),
            None => Err(ValidationError::MissingEnv { var: Self::ENV_VAR }),
        }
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// The client never validates recipients itself; this type is an opt-in helper
/// for callers who want normalization before building a
/// [`SendMessage`](crate::SendMessage). Equality is based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
}

impl PhoneNumber {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "to";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164 })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.e164
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Error-kind tag (`name`) of an [`ErrorInfo`](crate::ErrorInfo).
///
/// The tag is preserved exactly as received, even when it is not one of the
/// documented [`KnownErrorName`] values.
pub struct ErrorName(String);

impl ErrorName {
    /// Wrap a tag string as-is.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Map this tag to a documented variant, if it is one.
    pub fn known(&self) -> Option<KnownErrorName> {
        KnownErrorName::from_tag(&self.0)
    }
}

impl From<&str> for ErrorName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ErrorName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<KnownErrorName> for ErrorName {
    fn from(value: KnownErrorName) -> Self {
        Self(value.as_str().to_owned())
    }
}

impl fmt::Display for ErrorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Error-kind tags documented by the Textfully API.
///
/// Only [`KnownErrorName::ApplicationError`] is ever produced by this crate; the
/// others come from the service's error bodies.
pub enum KnownErrorName {
    MissingRequiredField,
    InvalidAccess,
    InvalidParameter,
    InvalidRegion,
    RateLimitExceeded,
    MissingApiKey,
    InvalidApiKey,
    InvalidFromAddress,
    ValidationError,
    NotFound,
    MethodNotAllowed,
    ApplicationError,
    InternalServerError,
}

impl KnownErrorName {
    /// Convert a wire tag into a known variant.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "missing_required_field" => Self::MissingRequiredField,
            "invalid_access" => Self::InvalidAccess,
            "invalid_parameter" => Self::InvalidParameter,
            "invalid_region" => Self::InvalidRegion,
            "rate_limit_exceeded" => Self::RateLimitExceeded,
            "missing_api_key" => Self::MissingApiKey,
            "invalid_api_key" => Self::InvalidApiKey,
            "invalid_from_address" => Self::InvalidFromAddress,
            "validation_error" => Self::ValidationError,
            "not_found" => Self::NotFound,
            "method_not_allowed" => Self::MethodNotAllowed,
            "application_error" => Self::ApplicationError,
            "internal_server_error" => Self::InternalServerError,
            _ => return None,
        })
    }

    /// Wire tag for this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::InvalidAccess => "invalid_access",
            Self::InvalidParameter => "invalid_parameter",
            Self::InvalidRegion => "invalid_region",
            Self::RateLimitExceeded => "rate_limit_exceeded",
            Self::MissingApiKey => "missing_api_key",
            Self::InvalidApiKey => "invalid_api_key",
            Self::InvalidFromAddress => "invalid_from_address",
            Self::ValidationError => "validation_error",
            Self::NotFound => "not_found",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::ApplicationError => "application_error",
            Self::InternalServerError => "internal_server_error",
        }
    }

    /// HTTP status the service conventionally pairs with this tag.
    ///
    /// Informational only: the client never compares it to the actual status.
    pub fn http_status(self) -> u16 {
        match self {
            Self::MissingRequiredField
            | Self::InvalidAccess
            | Self::InvalidParameter
            | Self::InvalidRegion => 422,
            Self::RateLimitExceeded => 429,
            Self::MissingApiKey => 401,
            Self::InvalidApiKey | Self::InvalidFromAddress | Self::ValidationError => 403,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::ApplicationError | Self::InternalServerError => 500,
        }
    }
}
