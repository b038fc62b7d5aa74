//! HTTP client for the storyboard server.
//!
//! [`ApiClient`] maps each named domain operation (projects, script tree,
//! events, asset items, media uploads) to one request against a fixed
//! base URL. [`ClientConfig`] loads that URL from the environment.

pub mod api;
pub mod config;
pub mod error;
pub mod upload;

pub use api::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use upload::FileUpload;
