//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → address.rs (resolve caller from x-forwarded-for or socket)
//!     → access_control.rs (compare against the allow-list)
//!     → Pass to payload ingestion, or answer 404
//! ```
//!
//! # Design Decisions
//! - Rejections look exactly like a missing route
//! - Unresolvable callers are an error, not a rejection

pub mod access_control;
pub mod address;

pub use access_control::{Decision, Gate, IpAllowList};
pub use address::{resolve_caller_address, AddressError, CallerInfo, X_FORWARDED_FOR};
