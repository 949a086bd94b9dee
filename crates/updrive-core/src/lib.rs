//! updrive Core - Domain logic and boundary contracts
//!
//! This crate contains the dependency-light core of updrive:
//! - **Domain types** - snapshots, local entries, the closed error taxonomy
//! - **Port definitions** - the [`ports::remote_storage::IRemoteStorage`]
//!   trait that storage adapters implement
//! - **Configuration** - typed startup configuration read from the environment
//!
//! # Architecture
//!
//! The crate follows the hexagonal (ports & adapters) pattern: the domain
//! module is pure data and error definitions with no I/O, ports define trait
//! interfaces, and adapter crates (`updrive-disk`, `updrive-sync`) implement
//! or consume them.

pub mod config;
pub mod domain;
pub mod ports;
