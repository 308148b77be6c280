//! Domain layer - Core entities and value objects of the support app.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Persistence mapping for these types lives in the service crates.

pub mod constants;
pub mod entity;
pub mod gender;
pub mod user;

pub use constants::*;
pub use entity::{AuditFields, BaseEntity};
pub use gender::{gender_options, GenderOption};
pub use user::User;
