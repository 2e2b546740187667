//! Buho API Proxy Library
//!
//! Forwards message-send requests to the Buho WhatsApp API over a client that
//! tolerates the upstream's invalid TLS certificate, and relays the result.

pub mod config;
pub mod forwarder;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use forwarder::Forwarder;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
