//! Shared types and domain logic for the Expirapp marketplace client
//!
//! This crate contains everything that is pure computation: catalog and
//! cart models, pricing, order payload construction and validation. It is
//! shared between the native client crate and the browser (via WASM).

pub mod models;
pub mod pricing;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
