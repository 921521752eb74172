//! Core data model for inventory exports.
//!
//! This module contains:
//! - The seven inventory categories and their fixed ordering
//! - Typed item structs, one field set per category
//! - The uniform card view the layout engine consumes
//! - The immutable snapshot aggregate handed to every exporter

mod category;
mod item;
mod snapshot;

// Re-export category types
pub use category::Category;

// Re-export item types
pub use item::{
    BackupJob, CardSource, Endpoint, NetworkDevice, Peripheral, Server, SoftwareItem, VoipService,
};

// Re-export the snapshot aggregate
pub use snapshot::Snapshot;
