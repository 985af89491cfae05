//! Use cases (interactors) for notion-diary
//!
//! Use cases are thin coordinators that delegate business rules to domain
//! methods and I/O to ports.
//!
//! - [`RetrieveSnapshotUseCase`] - Paginated retrieval of a full data source snapshot

pub mod retrieve_snapshot;

pub use retrieve_snapshot::RetrieveSnapshotUseCase;
