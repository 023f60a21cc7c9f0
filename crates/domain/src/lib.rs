//! Domain layer for the Batcomputer API.
//!
//! This crate provides:
//! - Gadget and Contact records with input validation
//! - `InventoryService` and `ContactRegistry`, the lookup-or-404 and
//!   create-or-conflict services over a `RecordStore`
//! - Value objects (`TrustLevel`, `Email`) and access rules for API keys and
//!   operator profiles

pub mod access;
pub mod contact;
pub mod error;
pub mod gadget;
pub mod report;
pub mod value_objects;

pub use access::{AccessError, ApiKeyVerifier, Operator, VerifiedUser};
pub use contact::{Contact, ContactRegistry, NewContact};
pub use error::{DomainError, Result, ValidationError};
pub use gadget::{Gadget, GadgetSpec, InventoryService, StockSummary, default_inventory};
pub use report::IntelReportRequest;
pub use value_objects::{Email, TrustLevel};
