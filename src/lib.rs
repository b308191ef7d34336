//! # ServiceNow Table API Client
//!
//! An authenticated client for the Table API of a ServiceNow instance.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`InstanceConfig`] and [`InstanceConfigBuilder`]
//! - Validated newtypes for the instance URL and credentials
//! - Basic authentication, or the OAuth 2.0 password grant when client
//!   credentials are configured, resolved once per client
//! - A [`Client`] with `get`, `post`, `put` and `delete` methods that enforce
//!   the status codes each operation accepts
//! - A [`Response`] type with lazy, cached JSON decoding
//!
//! Payloads are opaque [`serde_json::Value`]s. The crate does not retry,
//! paginate, rate limit or cache records; those are left to callers.
//!
//! ## Quick Start
//!
//! ```rust
//! use servicenow_client::{Client, HostUrl, InstanceConfig, Password, Username};
//!
//! let config = InstanceConfig::builder()
//!     .host(HostUrl::new("https://dev12345.service-now.com").unwrap())
//!     .username(Username::new("admin").unwrap())
//!     .password(Password::new("secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = Client::new(config).unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use serde_json::json;
//!
//! let response = client.get("table/incident/46d44a5fa9fe198101bd2a4b5e4e8c4b").await?;
//! if response.status == 404 {
//!     println!("Not found");
//! } else {
//!     println!("{}", response.json()?["result"]["short_description"]);
//! }
//!
//! client
//!     .put("table/incident/46d44a5fa9fe198101bd2a4b5e4e8c4b", &json!({"state": "2"}))
//!     .await?;
//! ```
//!
//! ## OAuth
//!
//! ```rust,ignore
//! use servicenow_client::Client;
//!
//! let client = Client::with_credentials(
//!     "https://dev12345.service-now.com",
//!     "admin",
//!     "secret",
//!     Some("oauth-client-id"),
//!     Some("oauth-client-secret"),
//! )?;
//!
//! // The first call exchanges the credentials for a bearer token.
//! let response = client.get("table/sys_user/6816f79cc0a8016401c5a33be04be441").await?;
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber. Credentials
//! and tokens are never logged.

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

pub use auth::{AuthHeader, AuthStrategy};
pub use config::{
    ClientId, ClientSecret, HostUrl, InstanceConfig, InstanceConfigBuilder, Password, Username,
};
pub use error::ConfigError;

pub use clients::{
    AuthError, Client, ClientError, HttpMethod, Response, ServiceNowError, UnexpectedApiResponse,
};
