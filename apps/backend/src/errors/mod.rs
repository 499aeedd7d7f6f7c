//! Error handling for the bridge backend.

pub mod domain;

pub use domain::{DomainError, ValidationKind};
