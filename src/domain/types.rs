//! Validated value objects. Anything holding one of these has already passed
//! its constraint check.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

use crate::domain::owner::UNASSIGNED_TOKEN;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    #[error("id must be greater than zero")]
    NonPositiveId,
    #[error("invalid email address")]
    InvalidEmail,
    /// Blank after trimming.
    #[error("value cannot be empty")]
    EmptyString,
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Positive integer keys. Zero and negatives never reach the domain.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                (value > 0)
                    .then_some(Self(value))
                    .ok_or(TypeConstraintError::NonPositiveId)
            }

            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                Display::fmt(&self.0, f)
            }
        }
    };
}

id_newtype!(HubId, "Tenant the lead list is scoped to.");
id_newtype!(LeadId, "Primary key of a lead.");
id_newtype!(OwnerId, "Primary key of a lead owner.");

/// Trims `value`, failing when nothing is left.
fn non_empty(value: impl Into<String>) -> Result<String, TypeConstraintError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Trimmed text that is never empty.
macro_rules! text_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, TypeConstraintError> {
                non_empty(value).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_newtype!(LeadName, "Display name of a lead.");
text_newtype!(OwnerName, "Display name of a lead owner.");
text_newtype!(LeadSource, "Acquisition channel or campaign label, e.g. `web`.");

/// Lower-cased and validated email address of a lead.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LeadEmail(String);

impl LeadEmail {
    pub fn new(email: impl Into<String>) -> Result<Self, TypeConstraintError> {
        let email = email.into().trim().to_lowercase();
        if email.validate_email() {
            Ok(Self(email))
        } else {
            Err(TypeConstraintError::InvalidEmail)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for LeadEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owner identifier used in URLs, e.g. `user-1`.
///
/// Handles travel inside comma-joined query values, so commas are rejected.
/// The `unassigned` token is reserved for leads without an owner.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerHandle(String);

impl OwnerHandle {
    pub fn new(value: impl Into<String>) -> Result<Self, TypeConstraintError> {
        let inner = non_empty(value)?;
        if inner.contains(',') {
            return Err(TypeConstraintError::InvalidValue(format!(
                "owner handle `{inner}` contains a comma"
            )));
        }
        if inner.eq_ignore_ascii_case(UNASSIGNED_TOKEN) {
            return Err(TypeConstraintError::InvalidValue(format!(
                "owner handle `{inner}` is reserved"
            )));
        }
        Ok(Self(inner))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OwnerHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
