//! User record bound to the form

use serde::{Deserialize, Serialize};

use crate::form::{FieldErrors, UserField};

/// Partial user payload as supplied by a caller or the backend.
///
/// Any subset of fields may be present; [`UserDto`] fills in the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PartialUser {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub code: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Fully populated user record.
///
/// Required text fields default to `""`, optional contact fields to `None`.
/// Deserialization goes through [`PartialUser`], so missing or `null` keys
/// in a JSON payload are normalized the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PartialUser")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Foreign key into the `/codes` list, matched by [`crate::CodeDto::id`]
    pub code: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl UserDto {
    pub fn from_partial(partial: Option<PartialUser>) -> Self {
        partial.map(Self::from).unwrap_or_default()
    }

    /// Text shown in the input bound to `field`
    pub fn field_value(&self, field: UserField) -> &str {
        match field {
            UserField::Name => &self.name,
            UserField::Email => &self.email,
            UserField::Code => &self.code,
            UserField::Phone => self.phone.as_deref().unwrap_or_default(),
            UserField::Address => self.address.as_deref().unwrap_or_default(),
        }
    }

    /// Client-side checks run before submitting
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if self.name.trim().is_empty() {
            errors.insert(UserField::Name, "Name is required");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert(UserField::Email, "Email is required");
        } else if !looks_like_email(email) {
            errors.insert(UserField::Email, "Email is invalid");
        }

        errors
    }
}

impl From<PartialUser> for UserDto {
    fn from(partial: PartialUser) -> Self {
        Self {
            id: partial.id.unwrap_or_default(),
            name: partial.name.unwrap_or_default(),
            email: partial.email.unwrap_or_default(),
            code: partial.code.unwrap_or_default(),
            address: partial.address,
            phone: partial.phone,
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
