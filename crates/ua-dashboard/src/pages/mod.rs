//! Dashboard pages

mod user;

pub use user::UserPage;
