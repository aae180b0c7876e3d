//! Microsoft Graph integration: management API client and session provider.

pub mod client;
pub mod session;

pub use client::GraphClient;
pub use session::{GraphSessionProvider, SessionTokens};
