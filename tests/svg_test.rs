//! Vector artifact tests.
//!
//! End-to-end checks of the standalone SVG document: skeleton, page
//! stacking, section capture ids, and that every string drawn on a card
//! is the layout's fitted text rather than the raw item name.

use chrono::{TimeZone, Utc};
use topograph::export::{SvgConfig, SvgExporter};
use topograph::{
    Category, LayoutConfig, NetworkDevice, Server, Snapshot, compute_layout, render_svg,
};

fn exporter() -> SvgExporter {
    SvgExporter::with_config(SvgConfig {
        timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 0).unwrap()),
        ..SvgConfig::default()
    })
}

// ============================================================================
// Document skeleton
// ============================================================================

#[test]
fn test_document_skeleton() {
    let svg = exporter().render(&Snapshot::new("Acme Corp"));

    assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(svg.contains("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.contains("<title>Acme Corp infrastructure diagram</title>"));
    assert!(svg.ends_with("</svg>\n"));
}

#[test]
fn test_all_sections_have_capture_ids() {
    let svg = render_svg(&Snapshot::new("Acme"));
    for category in Category::ORDER {
        assert!(svg.contains(&format!("<g id=\"{}\"", category.key())));
    }
}

// ============================================================================
// Page stacking
// ============================================================================

#[test]
fn test_page_edges_match_computed_page_count() {
    let mut snap = Snapshot::new("Big");
    for i in 0..70 {
        snap.servers.push(Server::new(format!("srv-{i}"), "Virtual"));
    }
    let layout = compute_layout(&snap, &LayoutConfig::default());
    assert!(layout.page_count >= 2);

    let svg = exporter().render(&snap);
    assert_eq!(
        svg.matches("class=\"page-edge\"").count(),
        layout.page_count - 1
    );
    let expected_height = layout.page_count as f32 * 595.0;
    assert!(svg.contains(&format!("viewBox=\"0 0 842 {expected_height}\"")));
}

// ============================================================================
// Card text comes from the fitted layout
// ============================================================================

#[test]
fn test_cards_draw_fitted_lines_not_raw_names() {
    let long = "Primary-Production-Database-Cluster-Failover-Replica-Node-03";
    let mut snap = Snapshot::new("x");
    snap.servers.push(Server::new(long, "Database"));

    let layout = compute_layout(&snap, &LayoutConfig::default());
    let svg = exporter().render(&snap);

    assert!(!svg.contains(long), "raw name should never be drawn whole");
    for card in layout.cards() {
        for line in card.title_lines.iter().chain(&card.detail_lines) {
            assert!(
                svg.contains(&format!(">{line}</text>")),
                "missing fitted line {line:?}"
            );
        }
    }
}

#[test]
fn test_mixed_snapshot_keeps_placeholders_for_empty_categories() {
    let mut snap = Snapshot::new("Partial");
    snap.network_devices
        .push(NetworkDevice::new("fw-01", "Firewall"));
    snap.servers.push(Server::new("db-01", "Database"));

    let svg = exporter().render(&snap);
    assert!(svg.contains(">Network (1)</text>"));
    assert!(svg.contains(">VoIP Services (0)</text>"));
    assert!(svg.contains("No VoIP services configured"));
    assert!(svg.contains("No backups configured"));
    assert!(svg.contains(">Internet</text>"));
}

// ============================================================================
// Same-page connector rule
// ============================================================================

#[test]
fn test_connectors_dropped_when_tier_crosses_pages() {
    // Five full rows of firewalls push the switch tier onto page two.
    let mut snap = Snapshot::new("Tall");
    for i in 0..25 {
        snap.network_devices
            .push(NetworkDevice::new(format!("fw-{i}"), "Firewall"));
    }
    snap.network_devices
        .push(NetworkDevice::new("sw-01", "Switch"));

    let svg = exporter().render(&snap);
    // Only the anchor fan-out into the first firewall row survives.
    assert_eq!(svg.matches("class=\"connector\"").count(), 5);
}
