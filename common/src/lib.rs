//! Shared plumbing for the SeeLink workspace.
//!
//! This crate contains infrastructure shared by every layer of the link:
//! currently the error-location machinery used by all error enums. It has
//! no business logic.
//!
//! ## Architecture
//!
//! - **common** (this crate): error plumbing shared across crates
//! - **link-core**: transport, dispatch, and handler logic
//! - **pathview**: reference host wiring everything together
//!
//! This layered architecture keeps concerns separated and makes testing easier.

pub mod error;

pub use error::error_location::ErrorLocation;

#[cfg(test)]
mod tests;
