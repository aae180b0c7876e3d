//! # TenantShift Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The HTTP client wrapper (timeouts, bounded retries)
//! - The Microsoft Graph management API client
//! - The OAuth session provider (silent token refresh)
//! - The broadcast progress sink
//!
//! ## Architecture
//! - Implements traits defined in `tenantshift-core`
//! - Depends on `tenantshift-domain` and `tenantshift-core`
//! - Contains all "impure" code (network I/O)

pub mod errors;
pub mod graph;
pub mod http;
pub mod notify;

// Re-export commonly used items
pub use graph::{GraphClient, GraphSessionProvider, SessionTokens};
pub use http::{HttpClient, HttpClientBuilder};
pub use notify::{BroadcastProgressSink, ProgressLine};
