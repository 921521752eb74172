//! Vector diagram backend.
//!
//! Emits a self-contained SVG document: fixed page width, height grown
//! to the stacked page extent, one group per card, one header band per
//! section, escaped text throughout. Output is deterministic for a
//! given snapshot; the generation timestamp is the only varying region
//! and is confined to a single `<metadata>` element.

use std::fmt::Write as _;
use std::io::{Seek, Write};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::Result;
use crate::layout::{Card, Layout, LayoutConfig, SectionLayout, compute_layout};
use crate::model::Snapshot;

use super::Exporter;

/// Escapes XML reserved characters for use in text nodes and attributes.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn rgb(color: (u8, u8, u8)) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

/// Configuration for SVG export.
#[derive(Debug, Clone, Default)]
pub struct SvgConfig {
    /// Page geometry; defaults to A4 landscape.
    pub layout: LayoutConfig,
    /// Fixed generation timestamp; `None` stamps the current time.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Exporter for standalone SVG diagrams.
#[derive(Debug, Clone, Default)]
pub struct SvgExporter {
    config: SvgConfig,
}

impl SvgExporter {
    /// Create a new SvgExporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an SvgExporter with the specified configuration.
    pub fn with_config(config: SvgConfig) -> Self {
        Self { config }
    }

    /// Renders the snapshot to an SVG document string.
    pub fn render(&self, snapshot: &Snapshot) -> String {
        let layout = compute_layout(snapshot, &self.config.layout);
        self.render_layout(&layout)
    }

    /// Renders an already-computed layout.
    pub fn render_layout(&self, layout: &Layout) -> String {
        let config = &layout.config;
        let width = config.page_width;
        let height = layout.page_count as f32 * config.page_height;
        let timestamp = self
            .config
            .timestamp
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut out = String::with_capacity(16 * 1024);
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
             viewBox=\"0 0 {width} {height}\" font-family=\"Helvetica, Arial, sans-serif\">"
        );
        let _ = writeln!(
            out,
            "<title>{} infrastructure diagram</title>",
            escape_xml(&layout.organization)
        );
        let _ = writeln!(out, "<metadata id=\"generated-at\">{timestamp}</metadata>");
        self.push_style(&mut out, config);
        let _ = writeln!(
            out,
            "<rect width=\"{width}\" height=\"{height}\" fill=\"#ffffff\"/>"
        );

        for page in 1..layout.page_count {
            let y = page as f32 * config.page_height;
            let _ = writeln!(
                out,
                "<line class=\"page-edge\" x1=\"0\" y1=\"{y}\" x2=\"{width}\" y2=\"{y}\"/>"
            );
        }

        for section in &layout.sections {
            self.push_section(&mut out, section, config);
        }

        out.push_str("</svg>\n");
        out
    }

    fn push_style(&self, out: &mut String, config: &LayoutConfig) {
        let _ = writeln!(
            out,
            "<style>\n\
             .section-band {{ fill: #eceff1; }}\n\
             .section-title {{ font-size: 11px; font-weight: bold; fill: #263238; }}\n\
             .card-box {{ fill: #ffffff; stroke: #cfd8dc; stroke-width: 1; }}\n\
             .card-title {{ font-size: {}px; font-weight: bold; fill: #263238; }}\n\
             .card-detail {{ font-size: {}px; fill: #546e7a; }}\n\
             .connector {{ stroke: #90a4ae; stroke-width: 1.2; fill: none; }}\n\
             .placeholder {{ font-size: 9px; font-style: italic; fill: #90a4ae; }}\n\
             .anchor-box {{ fill: #263238; }}\n\
             .anchor-label {{ font-size: 10px; font-weight: bold; fill: #ffffff; text-anchor: middle; }}\n\
             .page-edge {{ stroke: #eceff1; stroke-width: 1; stroke-dasharray: 6 4; }}\n\
             </style>",
            config.title_size, config.detail_size
        );
    }

    fn push_section(&self, out: &mut String, section: &SectionLayout, config: &LayoutConfig) {
        let accent = rgb(section.category.accent_rgb());

        // The id makes each section addressable as a raster capture target.
        let _ = writeln!(
            out,
            "<g id=\"{}\" class=\"section\">",
            section.category.key()
        );

        if section.header.height > 0.0 {
            let y = page_y(section.header_page, section.header.y, config);
            let _ = writeln!(
                out,
                "<rect class=\"section-band\" x=\"{}\" y=\"{y}\" width=\"{}\" height=\"{}\"/>",
                section.header.x, section.header.width, section.header.height
            );
            let _ = writeln!(
                out,
                "<rect x=\"{}\" y=\"{y}\" width=\"4\" height=\"{}\" fill=\"{accent}\"/>",
                section.header.x, section.header.height
            );
            let _ = writeln!(
                out,
                "<text class=\"section-title\" x=\"{}\" y=\"{}\">{}</text>",
                section.header.x + 12.0,
                y + section.header.height - 7.5,
                escape_xml(&section.title)
            );
        }

        for connector in &section.connectors {
            let y1 = page_y(connector.page, connector.y1, config);
            let y2 = page_y(connector.page, connector.y2, config);
            let _ = writeln!(
                out,
                "<line class=\"connector\" x1=\"{}\" y1=\"{y1}\" x2=\"{}\" y2=\"{y2}\"/>",
                connector.x1, connector.x2
            );
        }

        if let Some(anchor) = &section.anchor {
            let y = page_y(anchor.page, anchor.rect.y, config);
            let _ = writeln!(out, "<g class=\"anchor\">");
            let _ = writeln!(
                out,
                "<rect class=\"anchor-box\" x=\"{}\" y=\"{y}\" width=\"{}\" height=\"{}\" rx=\"{}\"/>",
                anchor.rect.x,
                anchor.rect.width,
                anchor.rect.height,
                anchor.rect.height / 2.0
            );
            if let Some(label) = anchor.title_lines.first() {
                let _ = writeln!(
                    out,
                    "<text class=\"anchor-label\" x=\"{}\" y=\"{}\">{}</text>",
                    anchor.rect.center_x(),
                    y + anchor.rect.height / 2.0 + 3.5,
                    escape_xml(label)
                );
            }
            out.push_str("</g>\n");
        }

        for card in &section.cards {
            self.push_card(out, card, &accent, config);
        }

        if let Some(placeholder) = &section.placeholder {
            let y = page_y(placeholder.page, placeholder.rect.y, config);
            let _ = writeln!(
                out,
                "<text class=\"placeholder\" x=\"{}\" y=\"{}\">{}</text>",
                placeholder.rect.x + 12.0,
                y + placeholder.rect.height / 2.0 + 3.0,
                escape_xml(&placeholder.text)
            );
        }
        out.push_str("</g>\n");
    }

    fn push_card(&self, out: &mut String, card: &Card, accent: &str, config: &LayoutConfig) {
        let rect = &card.rect;
        let y = page_y(card.page, rect.y, config);
        let pad = config.card_padding;

        let _ = writeln!(out, "<g class=\"card\">");
        let _ = writeln!(
            out,
            "<rect class=\"card-box\" x=\"{}\" y=\"{y}\" width=\"{}\" height=\"{}\" rx=\"4\"/>",
            rect.x, rect.width, rect.height
        );
        let _ = writeln!(
            out,
            "<circle cx=\"{}\" cy=\"{}\" r=\"3.5\" fill=\"{accent}\"/>",
            rect.x + pad + 4.0,
            y + pad + 5.0
        );

        for (i, line) in card.title_lines.iter().enumerate() {
            let baseline = y + pad + (i as f32 + 1.0) * config.title_line_height - 3.0;
            let _ = writeln!(
                out,
                "<text class=\"card-title\" x=\"{}\" y=\"{baseline}\">{}</text>",
                rect.x + pad + config.glyph_inset,
                escape_xml(line)
            );
        }

        let details_top = y + pad + 2.0 * config.title_line_height + config.title_detail_gap;
        for (i, line) in card.detail_lines.iter().enumerate() {
            let baseline = details_top + (i as f32 + 1.0) * config.detail_line_height - 2.5;
            let _ = writeln!(
                out,
                "<text class=\"card-detail\" x=\"{}\" y=\"{baseline}\">{}</text>",
                rect.x + pad,
                escape_xml(line)
            );
        }
        out.push_str("</g>\n");
    }
}

/// Global y of a page-local y, with pages stacked vertically.
fn page_y(page: usize, y: f32, config: &LayoutConfig) -> f32 {
    page as f32 * config.page_height + y
}

impl Exporter for SvgExporter {
    fn export<W: Write + Seek>(&self, snapshot: &Snapshot, writer: &mut W) -> Result<()> {
        writer.write_all(self.render(snapshot).as_bytes())?;
        Ok(())
    }

    fn media_type(&self) -> &'static str {
        "image/svg+xml"
    }

    fn suffix(&self) -> &'static str {
        "_diagram.svg"
    }
}
