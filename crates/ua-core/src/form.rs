//! User form view-model
//!
//! Display mode, per-field errors, change events and the state of the
//! reference code list. The dashboard component renders from these types;
//! keeping them here lets the behavior be tested off the browser.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::dto::{CodeDto, UserDto};

/// Whether the form is read-only or editable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FormMode {
    #[default]
    View,
    Edit,
}

impl FormMode {
    pub fn is_read_only(self) -> bool {
        self == FormMode::View
    }

    pub fn toggled(self) -> Self {
        match self {
            FormMode::View => FormMode::Edit,
            FormMode::Edit => FormMode::View,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormMode::View => "view",
            FormMode::Edit => "edit",
        }
    }
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" => Ok(FormMode::View),
            "edit" => Ok(FormMode::Edit),
            other => Err(format!("Unknown form mode: {}", other)),
        }
    }
}

/// Editable fields of a [`UserDto`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    Name,
    Email,
    Phone,
    Address,
    Code,
}

impl UserField {
    /// Free-text inputs in display order; `Code` is rendered as a select
    pub const TEXT_INPUTS: [UserField; 4] = [
        UserField::Name,
        UserField::Email,
        UserField::Phone,
        UserField::Address,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UserField::Name => "name",
            UserField::Email => "email",
            UserField::Phone => "phone",
            UserField::Address => "address",
            UserField::Code => "code",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserField::Name => "Name",
            UserField::Email => "Email",
            UserField::Phone => "Phone",
            UserField::Address => "Address",
            UserField::Code => "Position",
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            UserField::Email => "email",
            UserField::Phone => "tel",
            _ => "text",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Externally supplied validation messages keyed by field.
///
/// A missing key means no error is shown for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<UserField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: UserField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: UserField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(UserField, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (UserField, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single edit raised by the form for its owner to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: UserField,
    pub value: String,
}

impl FieldChange {
    pub fn new(field: UserField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// Builds the change event for an edit, or `None` when the form is
    /// read-only.
    pub fn in_mode(mode: FormMode, field: UserField, value: impl Into<String>) -> Option<Self> {
        if mode.is_read_only() {
            None
        } else {
            Some(Self::new(field, value))
        }
    }

    /// Returns a copy of `user` with this change merged in
    pub fn apply(&self, user: &UserDto) -> UserDto {
        let mut updated = user.clone();
        match self.field {
            UserField::Name => updated.name = self.value.clone(),
            UserField::Email => updated.email = self.value.clone(),
            UserField::Code => updated.code = self.value.clone(),
            UserField::Phone => updated.phone = non_empty(&self.value),
            UserField::Address => updated.address = non_empty(&self.value),
        }
        updated
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Option rendered by the position select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl From<&CodeDto> for SelectOption {
    fn from(code: &CodeDto) -> Self {
        Self {
            value: code.id.clone(),
            label: code.name.clone(),
        }
    }
}

/// Lifecycle of the `/codes` fetch for one form mount
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CodesState {
    #[default]
    NotLoaded,
    Loading,
    Ready(Vec<CodeDto>),
    Failed(String),
}

impl CodesState {
    pub fn is_settled(&self) -> bool {
        matches!(self, CodesState::Ready(_) | CodesState::Failed(_))
    }

    pub fn codes(&self) -> &[CodeDto] {
        match self {
            CodesState::Ready(codes) => codes,
            _ => &[],
        }
    }

    /// Select options; empty unless the fetch succeeded
    pub fn options(&self) -> Vec<SelectOption> {
        self.codes().iter().map(SelectOption::from).collect()
    }

    /// Display name of the code with `id`, if loaded
    pub fn label_for(&self, id: &str) -> Option<&str> {
        self.codes()
            .iter()
            .find(|code| code.id == id)
            .map(|code| code.name.as_str())
    }
}

/// Everything one text input renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: UserField,
    pub value: String,
    pub read_only: bool,
    pub error: Option<String>,
}

impl FieldView {
    pub fn new(field: UserField, user: &UserDto, mode: FormMode, errors: &FieldErrors) -> Self {
        Self {
            field,
            value: user.field_value(field).to_string(),
            read_only: mode.is_read_only(),
            error: errors.get(field).map(str::to_string),
        }
    }
}

/// Everything the position select renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionView {
    pub value: String,
    pub disabled: bool,
    pub options: Vec<SelectOption>,
    /// Name of the selected code, shown next to the disabled select
    pub selected_label: Option<String>,
    pub error: Option<String>,
}

impl PositionView {
    pub fn new(user: &UserDto, mode: FormMode, errors: &FieldErrors, codes: &CodesState) -> Self {
        Self {
            value: user.code.clone(),
            disabled: mode.is_read_only(),
            options: codes.options(),
            selected_label: codes.label_for(&user.code).map(str::to_string),
            error: errors.get(UserField::Code).map(str::to_string),
        }
    }

    pub fn is_selected(&self, option: &SelectOption) -> bool {
        option.value == self.value
    }
}

/// Tags asynchronous loads so only the most recently started one may
/// write its result.
///
/// Starting a load (or navigating somewhere that needs none) bumps the
/// generation; a response carrying an older ticket is stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadGeneration(u64);

impl LoadGeneration {
    /// Invalidates everything in flight and returns the new ticket
    pub fn begin(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn current(&self) -> u64 {
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}
