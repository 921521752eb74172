//! Export orchestration.
//!
//! The engine owns the policy around a single export request: which
//! backend runs for a format, how the artifact is named, the in-flight
//! guard that keeps concurrent requests from interleaving on the sink,
//! and cooperative cancellation for the paginated build.
//!
//! Artifacts are rendered fully in memory and handed to an
//! [`ArtifactSink`], so the same engine drives disk output, an HTTP
//! response, or a test buffer. Print is the one outlier: it delegates
//! straight to the sink without rendering anything.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};

use crate::Result;
use crate::error::Error;
use crate::layout::LayoutConfig;
use crate::model::Snapshot;

use super::Exporter;
use super::data::{DataConfig, DataExporter};
use super::filename::artifact_filename;
use super::pdf::{PdfConfig, PdfExporter};
use super::raster::{RasterConfig, RasterExporter};
use super::svg::{SvgConfig, SvgExporter};

/// The artifact formats an export request can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// PNG capture of the rendered diagram.
    Raster,
    /// Standalone SVG document.
    Vector,
    /// Paginated PDF document.
    Document,
    /// JSON dump of the snapshot's categories.
    Data,
    /// Hand the diagram to the host's print mechanism; no artifact.
    Print,
}

/// Cooperative cancellation flag, cheap to clone across threads.
///
/// Cancelling is a request, not an interrupt: the paginated build
/// observes the flag between pages and aborts with
/// [`Error::Cancelled`], discarding everything rendered so far.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; observers abort at their next check.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// A finished artifact ready for whatever save mechanism the caller
/// wires in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Derived from the organization name plus the format suffix.
    pub filename: String,
    /// IANA media type of `bytes`.
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

/// What a completed export call produced.
#[derive(Debug)]
pub enum ExportOutcome {
    /// The artifact that was rendered and handed to the sink.
    Saved(ExportArtifact),
    /// Print was delegated to the host environment; nothing was saved.
    PrintDelegated,
}

impl ExportOutcome {
    /// The saved artifact, if this outcome carries one.
    pub fn artifact(&self) -> Option<&ExportArtifact> {
        match self {
            ExportOutcome::Saved(artifact) => Some(artifact),
            ExportOutcome::PrintDelegated => None,
        }
    }
}

/// Destination for finished artifacts.
///
/// `save` receives the complete artifact; the engine guarantees it is
/// never called reentrantly. `print` is a hook for hosts that can hand
/// a diagram to a print dialog; the default does nothing.
pub trait ArtifactSink {
    fn save(&self, artifact: &ExportArtifact) -> Result<()>;

    fn print(&self, _organization: &str) -> Result<()> {
        Ok(())
    }
}

/// Sink that writes each artifact into a directory under its derived
/// filename.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactSink for DirectorySink {
    fn save(&self, artifact: &ExportArtifact) -> Result<()> {
        fs::write(self.dir.join(&artifact.filename), &artifact.bytes)?;
        Ok(())
    }
}

/// Orchestrates exports end to end: render, name, deliver.
///
/// The engine is shared by reference; one export runs at a time. A
/// request arriving while another is in flight fails immediately with
/// [`Error::ExportInFlight`] instead of queueing.
pub struct ExportEngine<S> {
    sink: S,
    layout: LayoutConfig,
    timestamp: Option<DateTime<Utc>>,
    scale: f32,
    capture_target: Option<String>,
    cancel: Option<CancelToken>,
    in_flight: AtomicBool,
}

impl<S: ArtifactSink> ExportEngine<S> {
    /// Create an engine that delivers artifacts to `sink`.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            layout: LayoutConfig::default(),
            timestamp: None,
            scale: 2.0,
            capture_target: None,
            cancel: None,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Override the page geometry used by the visual backends.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Fix the generation timestamp; useful for reproducible artifacts.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Device-pixel scale for raster captures.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Restrict raster captures to one element of the rendered scene.
    pub fn with_capture_target(mut self, id: impl Into<String>) -> Self {
        self.capture_target = Some(id.into());
        self
    }

    /// Attach a cancellation token observed by the paginated build.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs one export request end to end.
    ///
    /// Artifact formats render fully in memory, then the result is
    /// handed to the sink under its derived filename. Print never
    /// renders and never takes the in-flight guard: the host dialog
    /// gives no completion signal, and a stuck flag would block every
    /// later export.
    pub fn export(&self, format: ExportFormat, snapshot: &Snapshot) -> Result<ExportOutcome> {
        if format == ExportFormat::Print {
            log::debug!("delegating print for {:?}", snapshot.organization);
            self.sink.print(&snapshot.organization)?;
            return Ok(ExportOutcome::PrintDelegated);
        }

        let _guard = self.acquire()?;
        let artifact = match format {
            ExportFormat::Vector => self.artifact(snapshot, &self.svg_exporter()),
            ExportFormat::Document => self.artifact(snapshot, &self.pdf_exporter()),
            ExportFormat::Raster => self.artifact(snapshot, &self.raster_exporter()),
            ExportFormat::Data => self.artifact(snapshot, &self.data_exporter()),
            ExportFormat::Print => unreachable!("print is delegated before the guard"),
        }?;
        self.sink.save(&artifact)?;
        log::debug!("saved {} ({} bytes)", artifact.filename, artifact.bytes.len());
        Ok(ExportOutcome::Saved(artifact))
    }

    fn artifact<E: Exporter>(&self, snapshot: &Snapshot, exporter: &E) -> Result<ExportArtifact> {
        let mut cursor = Cursor::new(Vec::new());
        exporter.export(snapshot, &mut cursor)?;
        Ok(ExportArtifact {
            filename: artifact_filename(&snapshot.organization, exporter.suffix()),
            media_type: exporter.media_type(),
            bytes: cursor.into_inner(),
        })
    }

    fn svg_exporter(&self) -> SvgExporter {
        SvgExporter::with_config(SvgConfig {
            layout: self.layout.clone(),
            timestamp: self.timestamp,
        })
    }

    fn pdf_exporter(&self) -> PdfExporter {
        PdfExporter::with_config(PdfConfig {
            layout: self.layout.clone(),
            timestamp: self.timestamp,
            cancel: self.cancel.clone(),
        })
    }

    fn raster_exporter(&self) -> RasterExporter {
        RasterExporter::with_config(RasterConfig {
            layout: self.layout.clone(),
            scale: self.scale,
            target: self.capture_target.clone(),
            ..RasterConfig::default()
        })
    }

    fn data_exporter(&self) -> DataExporter {
        DataExporter::with_config(DataConfig {
            timestamp: self.timestamp,
        })
    }

    fn acquire(&self) -> Result<FlightGuard<'_>> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(Error::ExportInFlight);
        }
        Ok(FlightGuard {
            flag: &self.in_flight,
        })
    }
}

/// Clears the in-flight flag on every exit path, including panics in
/// the sink.
struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
