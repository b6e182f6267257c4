//! User Admin Core
//!
//! Value types, the user form view-model and the ports (HTTP API and
//! notifications) shared by the user admin dashboard. Everything here is
//! target-independent so it runs in the browser and under native tests.

pub mod api;
pub mod config;
pub mod dto;
pub mod form;
pub mod notify;

use thiserror::Error;

pub use api::{fetch_codes, fetch_user, load_codes, submit_user, ApiResponse, ApiService, HttpApiService};
pub use config::ApiConfig;
pub use dto::{CodeDto, PartialUser, UserDto};
pub use form::{
    CodesState, FieldChange, FieldErrors, FieldView, FormMode, LoadGeneration, PositionView,
    SelectOption, UserField,
};
pub use notify::{Notifier, Toast, ToastLevel, ToastQueue};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status code {status}")]
    Status { status: u16 },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
