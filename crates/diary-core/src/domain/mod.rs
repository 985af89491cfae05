//! Domain entities and business logic
//!
//! This module contains the core domain types for notion-diary:
//! - Newtypes for Notion identifiers and pagination cursors
//! - Retrieved entries and their property values
//! - Snapshots and stale-entry detection
//! - The diary projection of an entry
//! - Domain-specific error types

pub mod diary_page;
pub mod entry;
pub mod errors;
pub mod newtypes;
pub mod snapshot;

// Re-export commonly used types
pub use diary_page::DiaryPage;
pub use entry::{DateRange, Entry, ExternalFile, FileObject, HostedFile, Icon, Parent, PropertyValue};
pub use errors::DomainError;
pub use newtypes::*;
pub use snapshot::{find_stale, Snapshot};
