//! Card set cache library
//!
//! Retrieves card set metadata from a remote catalog and keeps it in a
//! disk-backed cache until the catalog's expiration time passes.

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;

pub use catalog::{CardSet, SetData, SetId, SetLocation};
pub use client::CardSetClient;
pub use config::ClientConfig;
pub use error::{CardSetError, FetchError, LookupError, TransportError};
