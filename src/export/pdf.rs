//! Paginated document backend.
//!
//! Emits a landscape multi-page PDF through `pdf-writer`: base-14
//! Helvetica faces with WinAnsi encoding, an identity bar and footer on
//! every page, colored section bands, and cards as rounded rectangles.
//! All geometry and card text come from the shared layout, so the
//! document paginates exactly like the vector rendering.
//!
//! Bodies are built page by page in a first pass; footers are filled in
//! a deferred second pass once the page total is final. Both passes
//! check for cancellation between pages and drop everything built so
//! far on abort.

use std::f32::consts::{FRAC_PI_2, PI};
use std::io::{Seek, Write};

use chrono::{DateTime, Datelike, Timelike, Utc};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect as PdfRect, Ref, Str, TextStr};

use crate::Result;
use crate::error::Error;
use crate::layout::{
    Card, Connector, Layout, LayoutConfig, Placeholder, SectionLayout, compute_layout,
};
use crate::model::Snapshot;
use crate::text::{self, Font};

use super::Exporter;
use super::engine::CancelToken;
use super::shape::{arc_to_polyline, circle_polyline};

/// Product label shown on the right of the page identity bar.
const PRODUCT_NAME: &str = "Topograph";

/// Height of the identity bar across the top edge of every page.
const HEADER_BAND_HEIGHT: f32 = 26.0;

/// Footer baseline, in points above the page bottom.
const FOOTER_BASELINE: f32 = 20.0;

const SECTION_TITLE_SIZE: f32 = 11.0;
const HEADER_TITLE_SIZE: f32 = 11.0;
const PRODUCT_SIZE: f32 = 8.5;
const FOOTER_SIZE: f32 = 7.5;
const ANCHOR_LABEL_SIZE: f32 = 10.0;
const PLACEHOLDER_SIZE: f32 = 9.0;

/// Chords per quarter-circle when approximating arcs; content streams
/// expose no arc operator.
const ARC_SEGMENTS: usize = 4;

const FONT_REGULAR: Name<'static> = Name(b"F0");
const FONT_BOLD: Name<'static> = Name(b"F1");
const FONT_OBLIQUE: Name<'static> = Name(b"F2");

type Rgb = (f32, f32, f32);

// Palette mirroring the vector stylesheet.
const INK: Rgb = (0.149, 0.196, 0.220); // #263238
const BAND: Rgb = (0.925, 0.937, 0.945); // #eceff1
const BORDER: Rgb = (0.812, 0.847, 0.863); // #cfd8dc
const DETAIL: Rgb = (0.329, 0.431, 0.478); // #546e7a
const MUTED: Rgb = (0.565, 0.643, 0.682); // #90a4ae
const WHITE: Rgb = (1.0, 1.0, 1.0);

/// Configuration for PDF export.
#[derive(Debug, Clone, Default)]
pub struct PdfConfig {
    /// Page geometry; defaults to A4 landscape.
    pub layout: LayoutConfig,
    /// Fixed generation timestamp; `None` stamps the current time.
    pub timestamp: Option<DateTime<Utc>>,
    /// Cooperative cancellation, observed between pages.
    pub cancel: Option<CancelToken>,
}

/// Exporter for the paginated PDF document.
#[derive(Debug, Clone, Default)]
pub struct PdfExporter {
    config: PdfConfig,
}

impl PdfExporter {
    /// Create a new PdfExporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a PdfExporter with the specified configuration.
    pub fn with_config(config: PdfConfig) -> Self {
        Self { config }
    }

    /// Builds the complete document for a snapshot.
    pub fn render(&self, snapshot: &Snapshot) -> Result<Vec<u8>> {
        let layout = compute_layout(snapshot, &self.config.layout);
        self.render_layout(&layout)
    }

    /// Builds the document for an already-computed layout.
    pub fn render_layout(&self, layout: &Layout) -> Result<Vec<u8>> {
        if layout.page_count == 0 {
            return Err(Error::Pdf("layout has no pages".to_string()));
        }
        let stamp = self.config.timestamp.unwrap_or_else(Utc::now);

        // First pass: page bodies.
        let mut pages = Vec::with_capacity(layout.page_count);
        for page in 0..layout.page_count {
            self.ensure_live()?;
            pages.push(self.page_body(layout, page));
        }

        // Deferred footer pass; the page total is final here.
        let generated = format!("Generated {}", stamp.format("%Y-%m-%d %H:%M UTC"));
        let mut streams = Vec::with_capacity(pages.len());
        for (page, mut content) in pages.into_iter().enumerate() {
            self.ensure_live()?;
            self.push_footer(&mut content, layout, page, &generated);
            streams.push(content.finish().into_vec());
        }

        Ok(assemble(layout, &streams, stamp))
    }

    /// Errors out as soon as the caller has requested cancellation,
    /// dropping every page built so far.
    fn ensure_live(&self) -> Result<()> {
        if let Some(token) = &self.config.cancel {
            if token.is_cancelled() {
                log::debug!("pdf build cancelled, discarding partial document");
                return Err(Error::Cancelled);
            }
        }
        Ok(())
    }

    fn page_body(&self, layout: &Layout, page: usize) -> Content {
        let config = &layout.config;
        let mut content = Content::new();

        self.push_page_header(&mut content, layout);

        for section in &layout.sections {
            let accent = to_unit(section.category.accent_rgb());

            if section.header_page == page && section.header.height > 0.0 {
                push_section_band(&mut content, section, accent, config);
            }
            for connector in section.connectors.iter().filter(|c| c.page == page) {
                push_connector(&mut content, connector, config);
            }
            if let Some(anchor) = section.anchor.as_ref().filter(|a| a.page == page) {
                push_anchor(&mut content, anchor, config);
            }
            for card in section.cards.iter().filter(|c| c.page == page) {
                push_card(&mut content, card, accent, config);
            }
            if let Some(placeholder) = section.placeholder.as_ref().filter(|p| p.page == page) {
                push_placeholder(&mut content, placeholder, config);
            }
        }

        content
    }

    /// Dark identity bar across the page top: organization left,
    /// product right, organization truncated with the shared metrics.
    fn push_page_header(&self, content: &mut Content, layout: &Layout) {
        let config = &layout.config;
        let top = config.page_height;

        set_fill(content, INK);
        content.rect(
            0.0,
            top - HEADER_BAND_HEIGHT,
            config.page_width,
            HEADER_BAND_HEIGHT,
        );
        content.fill_nonzero();

        let baseline = top - HEADER_BAND_HEIGHT + 8.5;
        let product_width = text::metrics(Font::Helvetica).text_width(PRODUCT_NAME, PRODUCT_SIZE);
        let available = config.content_width() - product_width - 16.0;
        let organization = text::truncate(
            &layout.organization,
            available,
            text::measure_at(Font::HelveticaBold, HEADER_TITLE_SIZE),
        );

        show_text(
            content,
            FONT_BOLD,
            HEADER_TITLE_SIZE,
            WHITE,
            config.margin,
            baseline,
            &organization,
        );
        show_text(
            content,
            FONT_REGULAR,
            PRODUCT_SIZE,
            WHITE,
            config.page_width - config.margin - product_width,
            baseline,
            PRODUCT_NAME,
        );
    }

    /// Footer line: generation stamp left, "Page X of Y" right.
    fn push_footer(&self, content: &mut Content, layout: &Layout, page: usize, generated: &str) {
        let config = &layout.config;
        let label = format!("Page {} of {}", page + 1, layout.page_count);
        let label_width = text::metrics(Font::Helvetica).text_width(&label, FOOTER_SIZE);

        show_text(
            content,
            FONT_REGULAR,
            FOOTER_SIZE,
            DETAIL,
            config.margin,
            FOOTER_BASELINE,
            generated,
        );
        show_text(
            content,
            FONT_REGULAR,
            FOOTER_SIZE,
            DETAIL,
            config.page_width - config.margin - label_width,
            FOOTER_BASELINE,
            &label,
        );
    }
}

/// Assembles the object tree around the finished content streams.
fn assemble(layout: &Layout, streams: &[Vec<u8>], stamp: DateTime<Utc>) -> Vec<u8> {
    let config = &layout.config;
    let mut pdf = Pdf::new();

    let catalog_id = Ref::new(1);
    let tree_id = Ref::new(2);
    let info_id = Ref::new(3);
    let regular_id = Ref::new(4);
    let bold_id = Ref::new(5);
    let oblique_id = Ref::new(6);
    // Pages and their content streams follow the fixed objects in pairs.
    let page_id = |i: usize| Ref::new(7 + 2 * i as i32);
    let content_id = |i: usize| Ref::new(8 + 2 * i as i32);

    pdf.catalog(catalog_id).pages(tree_id);

    let title = format!("{} infrastructure diagram", layout.organization);
    pdf.document_info(info_id)
        .title(TextStr(&title))
        .producer(TextStr("topograph"))
        .creation_date(pdf_date(stamp));

    pdf.pages(tree_id)
        .kids((0..streams.len()).map(page_id))
        .count(streams.len() as i32);

    for (i, data) in streams.iter().enumerate() {
        let mut page = pdf.page(page_id(i));
        page.media_box(PdfRect::new(
            0.0,
            0.0,
            config.page_width,
            config.page_height,
        ));
        page.parent(tree_id);
        page.contents(content_id(i));
        page.resources()
            .fonts()
            .pair(FONT_REGULAR, regular_id)
            .pair(FONT_BOLD, bold_id)
            .pair(FONT_OBLIQUE, oblique_id);
        page.finish();
        pdf.stream(content_id(i), data);
    }

    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(oblique_id)
        .base_font(Name(b"Helvetica-Oblique"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    pdf.finish()
}

fn push_section_band(
    content: &mut Content,
    section: &SectionLayout,
    accent: Rgb,
    config: &LayoutConfig,
) {
    let rect = &section.header;
    let bottom = flip(config, rect.y, rect.height);

    set_fill(content, BAND);
    content.rect(rect.x, bottom, rect.width, rect.height);
    content.fill_nonzero();

    set_fill(content, accent);
    content.rect(rect.x, bottom, 4.0, rect.height);
    content.fill_nonzero();

    show_text(
        content,
        FONT_BOLD,
        SECTION_TITLE_SIZE,
        INK,
        rect.x + 12.0,
        baseline(config, rect.y + rect.height - 7.5),
        &section.title,
    );
}

fn push_connector(content: &mut Content, connector: &Connector, config: &LayoutConfig) {
    set_stroke(content, MUTED);
    content.set_line_width(1.2);
    content.move_to(connector.x1, baseline(config, connector.y1));
    content.line_to(connector.x2, baseline(config, connector.y2));
    content.stroke();
}

fn push_anchor(content: &mut Content, anchor: &Card, config: &LayoutConfig) {
    let rect = &anchor.rect;

    set_fill(content, INK);
    rounded_rect_path(
        content,
        rect.x,
        flip(config, rect.y, rect.height),
        rect.width,
        rect.height,
        rect.height / 2.0,
    );
    content.fill_nonzero();

    if let Some(label) = anchor.title_lines.first() {
        let width = text::metrics(Font::HelveticaBold).text_width(label, ANCHOR_LABEL_SIZE);
        show_text(
            content,
            FONT_BOLD,
            ANCHOR_LABEL_SIZE,
            WHITE,
            rect.center_x() - width / 2.0,
            baseline(config, rect.y + rect.height / 2.0 + 3.5),
            label,
        );
    }
}

fn push_card(content: &mut Content, card: &Card, accent: Rgb, config: &LayoutConfig) {
    let rect = &card.rect;
    let pad = config.card_padding;

    set_fill(content, WHITE);
    set_stroke(content, BORDER);
    content.set_line_width(1.0);
    rounded_rect_path(
        content,
        rect.x,
        flip(config, rect.y, rect.height),
        rect.width,
        rect.height,
        4.0,
    );
    content.fill_nonzero_and_stroke();

    // Category glyph in the same spot the vector backend draws its circle.
    set_fill(content, accent);
    circle_path(
        content,
        rect.x + pad + 4.0,
        baseline(config, rect.y + pad + 5.0),
        3.5,
    );
    content.fill_nonzero();

    for (i, line) in card.title_lines.iter().enumerate() {
        let y = rect.y + pad + (i as f32 + 1.0) * config.title_line_height - 3.0;
        show_text(
            content,
            FONT_BOLD,
            config.title_size,
            INK,
            rect.x + pad + config.glyph_inset,
            baseline(config, y),
            line,
        );
    }

    let details_top = rect.y + pad + 2.0 * config.title_line_height + config.title_detail_gap;
    for (i, line) in card.detail_lines.iter().enumerate() {
        let y = details_top + (i as f32 + 1.0) * config.detail_line_height - 2.5;
        show_text(
            content,
            FONT_REGULAR,
            config.detail_size,
            DETAIL,
            rect.x + pad,
            baseline(config, y),
            line,
        );
    }
}

fn push_placeholder(content: &mut Content, placeholder: &Placeholder, config: &LayoutConfig) {
    let rect = &placeholder.rect;
    show_text(
        content,
        FONT_OBLIQUE,
        PLACEHOLDER_SIZE,
        MUTED,
        rect.x + 12.0,
        baseline(config, rect.y + rect.height / 2.0 + 3.0),
        &placeholder.text,
    );
}

/// One positioned text run. The string is mapped to WinAnsi bytes with
/// `?` standing in for anything the encoding cannot express.
fn show_text(content: &mut Content, font: Name, size: f32, fill: Rgb, x: f32, y: f32, text: &str) {
    let bytes = encode_win_ansi(text);
    set_fill(content, fill);
    content.begin_text();
    content.set_font(font, size);
    content.next_line(x, y);
    content.show(Str(&bytes));
    content.end_text();
}

/// Appends a rounded-rectangle path; `(x, y)` is the bottom-left corner
/// in page space. Each corner arc's first point doubles as the end of
/// the preceding edge.
fn rounded_rect_path(content: &mut Content, x: f32, y: f32, width: f32, height: f32, radius: f32) {
    let r = radius.min(width / 2.0).min(height / 2.0);
    let corners = [
        (x + width - r, y + r, -FRAC_PI_2),
        (x + width - r, y + height - r, 0.0),
        (x + r, y + height - r, FRAC_PI_2),
        (x + r, y + r, PI),
    ];
    content.move_to(x + r, y);
    for (cx, cy, start) in corners {
        for (px, py) in arc_to_polyline(cx, cy, r, start, FRAC_PI_2, ARC_SEGMENTS) {
            content.line_to(px, py);
        }
    }
    content.close_path();
}

fn circle_path(content: &mut Content, cx: f32, cy: f32, radius: f32) {
    let mut points = circle_polyline(cx, cy, radius, 16).into_iter();
    if let Some((x, y)) = points.next() {
        content.move_to(x, y);
    }
    for (x, y) in points {
        content.line_to(x, y);
    }
    content.close_path();
}

fn set_fill(content: &mut Content, (r, g, b): Rgb) {
    content.set_fill_rgb(r, g, b);
}

fn set_stroke(content: &mut Content, (r, g, b): Rgb) {
    content.set_stroke_rgb(r, g, b);
}

fn to_unit(rgb: (u8, u8, u8)) -> Rgb {
    (
        f32::from(rgb.0) / 255.0,
        f32::from(rgb.1) / 255.0,
        f32::from(rgb.2) / 255.0,
    )
}

/// PDF-space bottom edge of a page-local rectangle.
fn flip(config: &LayoutConfig, y: f32, height: f32) -> f32 {
    config.page_height - y - height
}

/// PDF-space y of a page-local baseline.
fn baseline(config: &LayoutConfig, y: f32) -> f32 {
    config.page_height - y
}

fn pdf_date(stamp: DateTime<Utc>) -> Date {
    Date::new(stamp.year().clamp(0, 9999) as u16)
        .month(stamp.month() as u8)
        .day(stamp.day() as u8)
        .hour(stamp.hour() as u8)
        .minute(stamp.minute() as u8)
        .second(stamp.second() as u8)
        .utc_offset_hour(0)
        .utc_offset_minute(0)
}

/// Maps a char to its WinAnsi (CP-1252) byte, or `b'?'` when the
/// encoding has no slot for it.
fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\u{20}'..='\u{7e}' => c as u8,
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8a,
        '\u{2039}' => 0x8b,
        '\u{0152}' => 0x8c,
        '\u{017d}' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9a,
        '\u{203a}' => 0x9b,
        '\u{0153}' => 0x9c,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        '\u{a0}'..='\u{ff}' => c as u8,
        _ => b'?',
    }
}

fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

impl Exporter for PdfExporter {
    fn export<W: Write + Seek>(&self, snapshot: &Snapshot, writer: &mut W) -> Result<()> {
        writer.write_all(&self.render(snapshot)?)?;
        Ok(())
    }

    fn media_type(&self) -> &'static str {
        "application/pdf"
    }

    fn suffix(&self) -> &'static str {
        "_infrastructure_diagram.pdf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NetworkDevice, Server};
    use chrono::TimeZone;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn fixed_exporter() -> PdfExporter {
        PdfExporter::with_config(PdfConfig {
            timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 0).unwrap()),
            ..PdfConfig::default()
        })
    }

    fn sample() -> Snapshot {
        let mut snap = Snapshot::new("Acme Corp");
        snap.network_devices
            .push(NetworkDevice::new("fw-01", "Firewall").with_ip("10.0.0.1"));
        snap.servers
            .push(Server::new("db-01", "Database").with_os("Ubuntu 24.04"));
        snap
    }

    #[test]
    fn test_magic_and_trailer() {
        let bytes = fixed_exporter().render(&sample()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let tail = &bytes[bytes.len().saturating_sub(16)..];
        assert!(contains(tail, b"%%EOF"));
    }

    #[test]
    fn test_fixed_timestamp_is_deterministic() {
        let snap = sample();
        let exporter = fixed_exporter();
        assert_eq!(
            exporter.render(&snap).unwrap(),
            exporter.render(&snap).unwrap()
        );
    }

    #[test]
    fn test_page_tree_count_matches_layout() {
        let mut snap = Snapshot::new("Big");
        for i in 0..60 {
            snap.servers.push(Server::new(format!("srv-{i}"), "Virtual"));
        }
        let layout = compute_layout(&snap, &LayoutConfig::default());
        assert!(layout.page_count >= 2, "fixture should spill pages");

        let bytes = fixed_exporter().render(&snap).unwrap();
        let marker = format!("/Count {}", layout.page_count);
        assert!(contains(&bytes, marker.as_bytes()));
    }

    #[test]
    fn test_header_carries_organization() {
        // Streams are uncompressed, so shown strings are greppable.
        let bytes = fixed_exporter().render(&sample()).unwrap();
        assert!(contains(&bytes, b"(Acme Corp)"));
        assert!(contains(&bytes, b"(Topograph)"));
    }

    #[test]
    fn test_footer_page_labels() {
        let bytes = fixed_exporter().render(&Snapshot::new("Tiny")).unwrap();
        assert!(contains(&bytes, b"(Page 1 of 1)"));
        assert!(contains(&bytes, b"(Generated 2024-05-14 09:30 UTC)"));
    }

    #[test]
    fn test_card_strings_match_layout_text() {
        let snap = sample();
        let layout = compute_layout(&snap, &LayoutConfig::default());
        let bytes = fixed_exporter().render_layout(&layout).unwrap();

        for card in layout.cards() {
            for line in card.title_lines.iter().chain(&card.detail_lines) {
                let run = format!("({line})");
                assert!(contains(&bytes, run.as_bytes()), "missing text run {line:?}");
            }
        }
    }

    #[test]
    fn test_cancelled_token_aborts_build() {
        let token = CancelToken::new();
        token.cancel();
        let exporter = PdfExporter::with_config(PdfConfig {
            cancel: Some(token),
            ..PdfConfig::default()
        });
        assert!(matches!(exporter.render(&sample()), Err(Error::Cancelled)));
    }

    #[test]
    fn test_empty_layout_is_rejected() {
        let layout = Layout {
            config: LayoutConfig::default(),
            organization: "x".to_string(),
            page_count: 0,
            sections: Vec::new(),
        };
        assert!(matches!(
            fixed_exporter().render_layout(&layout),
            Err(Error::Pdf(_))
        ));
    }

    #[test]
    fn test_win_ansi_mapping() {
        assert_eq!(win_ansi_byte('A'), 0x41);
        assert_eq!(win_ansi_byte('\u{20ac}'), 0x80);
        assert_eq!(win_ansi_byte('\u{e9}'), 0xe9);
        assert_eq!(win_ansi_byte('\u{4e2d}'), b'?');
        assert_eq!(encode_win_ansi("IP: 10.0.0.1"), b"IP: 10.0.0.1".to_vec());
    }

    #[test]
    fn test_rounded_rect_stays_inside_bounds() {
        let mut content = Content::new();
        rounded_rect_path(&mut content, 10.0, 10.0, 100.0, 50.0, 8.0);
        // Oversized radius is clamped to the half-extent (pill shape).
        let mut pill = Content::new();
        rounded_rect_path(&mut pill, 0.0, 0.0, 40.0, 20.0, 50.0);
        assert!(!pill.finish().is_empty());
        assert!(!content.finish().is_empty());
    }
}
