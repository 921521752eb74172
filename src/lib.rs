//! # topograph
//!
//! A library for rendering an organization's IT inventory as
//! infrastructure diagrams, exported to SVG, PDF, PNG, and JSON.
//!
//! ## Features
//!
//! - One deterministic layout shared by every visual format
//! - SVG, PDF, and PNG artifacts that agree on geometry and card text
//! - Paginated PDF documents with per-page headers and footers
//! - JSON data dumps that round-trip the full inventory
//! - Export orchestration with derived filenames, an in-flight guard,
//!   and cooperative cancellation
//!
//! ## Quick Start
//!
//! ```no_run
//! use topograph::{DirectorySink, ExportEngine, ExportFormat, Server, Snapshot};
//!
//! let mut snapshot = Snapshot::new("Acme Corp");
//! snapshot
//!     .servers
//!     .push(Server::new("db-01", "Database").with_os("Ubuntu 24.04"));
//!
//! let engine = ExportEngine::new(DirectorySink::new("exports"));
//! engine.export(ExportFormat::Vector, &snapshot).unwrap();
//! engine.export(ExportFormat::Document, &snapshot).unwrap();
//! ```
//!
//! ## Working with Snapshots
//!
//! The [`Snapshot`] struct is the central data type: an immutable
//! inventory of seven equipment categories, built with the item
//! constructors' `with_*` methods:
//!
//! ```
//! use topograph::{NetworkDevice, Snapshot, render_svg};
//!
//! let mut snapshot = Snapshot::new("Acme Corp");
//! snapshot.network_devices.push(
//!     NetworkDevice::new("fw-01", "Firewall")
//!         .with_manufacturer("Fortinet")
//!         .with_ip("203.0.113.1"),
//! );
//!
//! let svg = render_svg(&snapshot);
//! assert!(svg.contains("fw-01"));
//! ```

pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod text;

pub use error::{Error, Result};
pub use export::{
    ArtifactSink, CancelToken, DirectorySink, ExportArtifact, ExportEngine, ExportFormat,
    ExportOutcome, Exporter, PdfExporter, RasterExporter, SvgExporter, render_data, render_pdf,
    render_png, render_svg,
};
pub use layout::{Layout, LayoutConfig, compute_layout};
pub use model::{
    BackupJob, Category, Endpoint, NetworkDevice, Peripheral, Server, Snapshot, SoftwareItem,
    VoipService,
};
