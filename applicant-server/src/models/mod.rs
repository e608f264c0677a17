//! Domain models
//!
//! Record fields are passed through untouched. The only parsed input is
//! the path identifier, which is checked when a [`UserId`] is built.

pub mod id;
pub mod user;
pub mod validation;

pub use id::UserId;
pub use user::{User, UserPayload};
pub use validation::ValidationError;
