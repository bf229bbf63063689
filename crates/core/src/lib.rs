//! `stockpilot-core` — shared domain building blocks.
//!
//! Pure primitives only: error model, tenant identity and the marker traits the
//! inventory and insight crates build on. No IO, no storage.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::TenantId;
pub use value_object::ValueObject;
