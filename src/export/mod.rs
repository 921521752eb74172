//! Export module for turning a snapshot into diagram artifacts.
//!
//! Provides the `Exporter` trait and format-specific implementations.
//!
//! # Architecture
//!
//! The `Exporter` trait uses a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_config()` allows customization
//! - `export()` writes to any `Write + Seek` destination
//!
//! Every visual backend consumes the same computed layout, so the SVG,
//! PDF, and PNG artifacts for one snapshot always agree on geometry.
//!
//! # Example
//!
//! ```no_run
//! use topograph::export::{Exporter, SvgExporter};
//! use topograph::model::Snapshot;
//! use std::fs::File;
//!
//! let snapshot = Snapshot::new("Acme Corp");
//! let mut file = File::create("acme_corp_diagram.svg")?;
//!
//! SvgExporter::new().export(&snapshot, &mut file)?;
//! # Ok::<(), topograph::Error>(())
//! ```

use std::io::{Seek, Write};

use crate::Result;
use crate::model::Snapshot;

mod data;
mod engine;
mod filename;
mod pdf;
mod raster;
mod shape;
mod svg;

pub use data::{DataConfig, DataExporter};
pub use engine::{
    ArtifactSink, CancelToken, DirectorySink, ExportArtifact, ExportEngine, ExportFormat,
    ExportOutcome,
};
pub use filename::sanitize;
pub use pdf::{PdfConfig, PdfExporter};
pub use raster::{RasterConfig, RasterExporter};
pub use shape::arc_to_polyline;
pub use svg::{SvgConfig, SvgExporter, escape_xml};

/// Trait for exporting a snapshot to a specific artifact format.
///
/// Exporters use a builder pattern where configuration is held in the
/// struct, and the `export` method writes to any `Write + Seek`
/// destination.
pub trait Exporter {
    /// Export the snapshot to the provided writer.
    ///
    /// The writer can be:
    /// - `std::fs::File` for disk output
    /// - `std::io::Cursor<Vec<u8>>` for seekable in-memory output
    /// - Any other type implementing `Write + Seek`
    fn export<W: Write + Seek>(&self, snapshot: &Snapshot, writer: &mut W) -> Result<()>;

    /// IANA media type of the produced artifact.
    fn media_type(&self) -> &'static str;

    /// Filename suffix appended to the sanitized organization name.
    fn suffix(&self) -> &'static str;
}

/// Renders a snapshot's diagram as a standalone SVG document.
pub fn render_svg(snapshot: &Snapshot) -> String {
    SvgExporter::new().render(snapshot)
}

/// Builds the paginated PDF document for a snapshot.
pub fn render_pdf(snapshot: &Snapshot) -> Result<Vec<u8>> {
    PdfExporter::new().render(snapshot)
}

/// Rasterizes a snapshot's diagram to PNG bytes at the default scale.
pub fn render_png(snapshot: &Snapshot) -> Result<Vec<u8>> {
    RasterExporter::new().render(snapshot)
}

/// Serializes a snapshot's categories to the JSON data artifact.
pub fn render_data(snapshot: &Snapshot) -> Result<String> {
    DataExporter::new().render(snapshot)
}
