//! HTTP client types for ServiceNow Table API communication.
//!
//! # Overview
//!
//! - [`Client`]: Authenticated Table API client with `get`/`post`/`put`/`delete`
//! - [`Response`]: Raw status, body and headers with lazy JSON decoding
//! - [`HttpMethod`]: Methods accepted by [`Client::request`]
//! - [`ClientError`]: Unified error type for all client operations
//!
//! # Status Handling
//!
//! The transport never fails on an HTTP status except 401, which is always
//! an [`AuthError`]. Every other status comes back as a [`Response`], and the
//! verb methods decide what is acceptable:
//!
//! | Method | Accepted statuses |
//! |---|---|
//! | [`Client::get`] | 200, 404 |
//! | [`Client::post`] | 201 |
//! | [`Client::put`] | 200 |
//! | [`Client::delete`] | 204 |
//!
//! [`Client::request`] performs no status check at all.

mod client;
mod errors;
mod http_client;
mod http_request;
mod response;

pub use client::{Client, TABLE_API_PREFIX};
pub use errors::{AuthError, ClientError, ServiceNowError, UnexpectedApiResponse};
pub use http_client::SDK_VERSION;
pub use http_request::HttpMethod;
pub use response::Response;
