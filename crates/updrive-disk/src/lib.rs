//! updrive Disk - Cloud Disk REST API client
//!
//! Provides the remote storage adapter used by the sync engine:
//! - Authenticated listing of the remote directory (name → content hash)
//! - Two-phase file upload (request a write location, then stream the bytes)
//! - Entry deletion by name
//!
//! Every transport failure is classified into the closed
//! [`StorageError`](updrive_core::domain::errors::StorageError) taxonomy
//! before it leaves this crate.
//!
//! ## Modules
//!
//! - [`client`] - HTTP client for the Disk resources API
//! - [`upload`] - Two-phase upload protocol
//! - [`provider`] - [`IRemoteStorage`] implementation backed by the client
//!
//! [`IRemoteStorage`]: updrive_core::ports::remote_storage::IRemoteStorage

pub mod client;
mod classify;
pub mod provider;
pub mod upload;
