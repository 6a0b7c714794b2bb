//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers, single POST route)
//!     → request.rs (x-request-id)
//!     → ingest::PayloadHandler
//!     → response.rs / error.rs (status mapping)
//!     → Send to client
//! ```

pub mod error;
pub mod request;
pub mod response;
pub mod server;

pub use error::IngressError;
pub use request::X_REQUEST_ID;
pub use server::HttpServer;
