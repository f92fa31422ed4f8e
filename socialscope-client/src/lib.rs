// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `SocialScope` Client
//!
//! Async HTTP client for the `SocialScope` search and extraction API.
//!
//! ## Layers
//!
//! - [`config`] - Validated, immutable client settings
//! - [`transport`] - The [`Transport`] seam and its `reqwest` implementation
//! - [`executor`] - Auth headers, per-call timeout, linear retry, rate-limit tracking
//! - [`classify`] - Non-2xx responses mapped onto [`ClientError`]
//! - [`client`] - [`SocialScopeClient`], the endpoint operations
//!
//! ## Example
//!
//! ```ignore
//! use socialscope_client::SocialScopeClient;
//! use socialscope_core::{Platform, SearchRequest};
//!
//! let client = SocialScopeClient::new("sk_live_...")?;
//! let results = client
//!     .search(&SearchRequest::new(vec![Platform::Reddit], "rust async").with_count(5))
//!     .await?;
//! println!("{} results, {:?} requests left", results.len(), client.rate_limit_info().remaining);
//! ```

pub mod classify;
pub mod client;
pub mod config;
pub mod executor;
pub mod rate_limit;
pub mod retry;
pub mod transport;
mod wire;

pub use client::SocialScopeClient;
pub use config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES,
    DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_MS,
};
pub use executor::{Executor, USER_AGENT_VALUE};
pub use rate_limit::RateLimitTracker;
pub use retry::RetryPolicy;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};

pub use socialscope_core::{ClientError, ErrorKind};
