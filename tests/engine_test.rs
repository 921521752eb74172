//! Export engine tests.
//!
//! Drives `ExportEngine` end to end against a real directory sink:
//! every artifact format lands on disk under its derived filename with
//! the right magic bytes, print touches nothing, and engine options
//! (layout, scale, capture target, timestamp, cancellation) flow
//! through to the backends.

use chrono::{TimeZone, Utc};
use tempfile::TempDir;
use topograph::{
    CancelToken, DirectorySink, Error, ExportEngine, ExportFormat, ExportOutcome, LayoutConfig,
    NetworkDevice, Server, Snapshot, compute_layout,
};

fn inventory() -> Snapshot {
    let mut snap = Snapshot::new("Acme Corp");
    snap.network_devices
        .push(NetworkDevice::new("fw-01", "Firewall").with_ip("203.0.113.1"));
    snap.servers.push(
        Server::new("db-01", "Database")
            .with_os("Ubuntu 24.04")
            .with_status("Online"),
    );
    snap
}

fn engine_in(dir: &TempDir) -> ExportEngine<DirectorySink> {
    ExportEngine::new(DirectorySink::new(dir.path()))
        .with_timestamp(Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 0).unwrap())
}

fn read(dir: &TempDir, name: &str) -> Vec<u8> {
    std::fs::read(dir.path().join(name)).unwrap()
}

// ============================================================================
// Artifact delivery
// ============================================================================

#[test]
fn test_every_format_lands_on_disk_with_magic_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_in(&dir);
    let snap = inventory();

    for format in [
        ExportFormat::Vector,
        ExportFormat::Document,
        ExportFormat::Raster,
        ExportFormat::Data,
    ] {
        let outcome = engine.export(format, &snap).unwrap();
        assert!(matches!(outcome, ExportOutcome::Saved(_)));
    }

    let svg = read(&dir, "acme_corp_diagram.svg");
    assert!(svg.starts_with(b"<?xml"));

    let pdf = read(&dir, "acme_corp_infrastructure_diagram.pdf");
    assert!(pdf.starts_with(b"%PDF-"));

    let png = read(&dir, "acme_corp_diagram.png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']));

    let json: serde_json::Value =
        serde_json::from_slice(&read(&dir, "acme_corp_diagram_data.json")).unwrap();
    assert_eq!(json["organization"], "Acme Corp");
    assert_eq!(json["export_date"], "2024-05-14T09:30:00Z");
}

#[test]
fn test_outcome_exposes_saved_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = engine_in(&dir)
        .export(ExportFormat::Vector, &inventory())
        .unwrap();

    let artifact = outcome.artifact().unwrap();
    assert_eq!(artifact.filename, "acme_corp_diagram.svg");
    assert_eq!(artifact.media_type, "image/svg+xml");
    assert!(!artifact.bytes.is_empty());
}

#[test]
fn test_print_delegates_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = engine_in(&dir)
        .export(ExportFormat::Print, &inventory())
        .unwrap();

    assert!(matches!(outcome, ExportOutcome::PrintDelegated));
    assert!(outcome.artifact().is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

// ============================================================================
// Option plumbing
// ============================================================================

#[test]
fn test_custom_layout_flows_to_vector_and_raster() {
    let dir = tempfile::tempdir().unwrap();
    let snap = inventory();
    let custom = LayoutConfig {
        page_width: 1000.0,
        page_height: 700.0,
        ..LayoutConfig::default()
    };
    let pages = compute_layout(&snap, &custom).page_count;
    let engine = engine_in(&dir).with_layout(custom);

    engine.export(ExportFormat::Vector, &snap).unwrap();
    let svg = String::from_utf8(read(&dir, "acme_corp_diagram.svg")).unwrap();
    let height = pages as f32 * 700.0;
    assert!(svg.contains(&format!("viewBox=\"0 0 1000 {height}\"")));

    engine.export(ExportFormat::Raster, &snap).unwrap();
    let png = image::load_from_memory(&read(&dir, "acme_corp_diagram.png")).unwrap();
    assert_eq!((png.width(), png.height()), (2000, 1400 * pages as u32));
}

#[test]
fn test_capture_target_crops_to_one_section() {
    let dir = tempfile::tempdir().unwrap();
    let snap = inventory();
    let pages = compute_layout(&snap, &LayoutConfig::default()).page_count as u32;

    engine_in(&dir)
        .export(ExportFormat::Raster, &snap)
        .unwrap();
    let full = image::load_from_memory(&read(&dir, "acme_corp_diagram.png")).unwrap();
    assert_eq!((full.width(), full.height()), (1684, 1190 * pages));

    engine_in(&dir)
        .with_capture_target("servers")
        .export(ExportFormat::Raster, &snap)
        .unwrap();
    let cropped = image::load_from_memory(&read(&dir, "acme_corp_diagram.png")).unwrap();
    assert!(cropped.width() < full.width());
    assert!(cropped.height() < full.height());
    assert!(cropped.width() > 1200, "crop keeps the full section band");
}

#[test]
fn test_missing_capture_target_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let err = engine_in(&dir)
        .with_capture_target("wormhole")
        .export(ExportFormat::Raster, &inventory())
        .unwrap_err();

    assert!(matches!(err, Error::MissingCaptureTarget(id) if id == "wormhole"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_cancelled_document_export_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let token = CancelToken::new();
    token.cancel();

    let engine = engine_in(&dir).with_cancel_token(token);
    let err = engine
        .export(ExportFormat::Document, &inventory())
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

    // The guard is released, so the next request goes through.
    engine.export(ExportFormat::Vector, &inventory()).unwrap();
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
