//! Data transfer objects exchanged with the backend

mod code;
mod user;

pub use code::CodeDto;
pub use user::{PartialUser, UserDto};
