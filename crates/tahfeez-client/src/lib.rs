#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

//! Client core for the tahfeez app: session storage, authentication with
//! transparent token refresh, and the data-source router that serves every
//! screen from either the live API or the built-in demo data.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod jwt;
pub mod router;
pub mod services;
pub mod sources;
pub mod storage;
pub mod token_store;

pub use auth::{AuthClient, SessionState};
pub use config::{ClientConfig, Preferences, StorageBackend};
pub use error::{ClientError, StorageError};
pub use http::{try_merge_language, ApiBase, AuthenticatedRequest};
pub use router::{Backend, DataSourceRouter};
pub use services::Services;
pub use sources::{DataSource, MockDataSource, RemoteDataSource, SourceResult};
pub use storage::{open_store, FileStore, KeyValueStore, KeyringStore, MemoryStore};
pub use token_store::TokenStore;

#[cfg(test)]
mod tests;
