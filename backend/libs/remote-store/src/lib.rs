//! Client for the hosted data endpoint
//!
//! The endpoint exposes Postgres tables over HTTP using the PostgREST query
//! convention (`/rest/v1/{table}?column=eq.value&order=...`) plus an object
//! storage API (`/storage/v1/object/{bucket}/{path}`).
//!
//! [`RemoteStore`] is the shared handle. It is cheap to clone and carries no
//! per-call state; every operation is an independent request. Data operations
//! are never retried here; only handle construction is retried, by the
//! readiness coordinator through [`RemoteStoreFactory`].

pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod query;
pub mod storage;

pub use client::RemoteStore;
pub use config::RemoteStoreConfig;
pub use error::{Result, StoreError, UNIQUE_VIOLATION};
pub use factory::RemoteStoreFactory;
pub use query::{Order, TableQuery};
pub use storage::Storage;
