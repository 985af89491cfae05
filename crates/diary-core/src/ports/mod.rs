//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are interfaces that the domain core depends on, but whose
//! implementations live in adapter crates.
//!
//! - [`IDataSource`] - Paged reads from a remote data source

pub mod data_source;

pub use data_source::{IDataSource, Page};
