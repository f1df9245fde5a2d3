//! Restprobe Application - Clients and ports
//!
//! This crate defines the application layer with:
//! - The transport port (`HttpClient`)
//! - A generic verb client bound to a base URL (`ApiClient`)
//! - The resource client for users (`UserClient`)
//! - Application-level error handling

pub mod api_client;
pub mod error;
pub mod ports;
pub mod user_client;

#[cfg(test)]
mod test_support;

pub use api_client::ApiClient;
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{HttpClient, HttpClientError};
pub use user_client::{UserClient, user_path, user_resource_path};
