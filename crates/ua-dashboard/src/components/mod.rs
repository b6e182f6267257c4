//! Reusable components

mod nav;
mod toast;
mod user_form;

pub use nav::Nav;
pub use toast::{ToastHost, ToastStore};
pub use user_form::UserForm;
