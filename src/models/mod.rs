//! Data models for the resume backend.
//!
//! Field names serialize as camelCase to match the builder frontend.

mod entries;
mod resume;
mod user;
pub mod validation;

pub use entries::*;
pub use resume::*;
pub use user::*;
