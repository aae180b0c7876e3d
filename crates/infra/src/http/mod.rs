//! HTTP client wrapper shared by the Graph integrations.

mod client;

pub use client::{HttpClient, HttpClientBuilder};
