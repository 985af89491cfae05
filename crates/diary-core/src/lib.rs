//! notion-diary core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Entry`, `Snapshot`, `DiaryPage`, identifier newtypes
//! - **Use cases** - `RetrieveSnapshotUseCase`
//! - **Port definitions** - `IDataSource`, implemented by the Notion adapter
//! - **Configuration** - YAML config with defaults and validation
//!
//! # Architecture
//!
//! The domain module contains pure business logic with no I/O.
//! Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate domain entities through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
