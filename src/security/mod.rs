//! Security-related middleware.
//!
//! # Design Decisions
//! - CORS policy is fixed at startup from config and applied to every route
//! - Bearer tokens are not inspected here; they are passed through opaquely

pub mod cors;
