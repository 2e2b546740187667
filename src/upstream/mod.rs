//! Upstream client subsystem.
//!
//! # Data Flow
//! ```text
//! Forwarder
//!     → client.rs (one reqwest client, relaxed TLS scoped to it)
//!     → HTTPS POST to <base_url><path>
//!     → response.rs (read full body, JSON or raw-text envelope)
//!     → UpstreamResponse back to the forwarder
//! ```
//!
//! # Design Decisions
//! - The weakened trust boundary lives only in this client
//! - Redirects are not followed; every status is reported as-is
//! - Connect and total timeouts bound every call

pub mod client;
pub mod response;

pub use client::{UpstreamClient, UpstreamError};
pub use response::{UpstreamBody, UpstreamResponse, RAW_PREVIEW_CHARS};
