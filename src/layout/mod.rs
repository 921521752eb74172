//! The shared layout engine.
//!
//! One [`Layout`] is computed per export and consumed unchanged by the
//! vector and document backends, so every artifact agrees on section
//! ordering, row grouping, and page breaks. Geometry is in PDF points
//! (1/72 in) with the origin at the top-left of each page; cards carry
//! their page index plus page-local coordinates.
//!
//! Layout construction is pure: an explicit [`Cursor`] value is passed
//! into each section step and the advanced cursor is returned, so the
//! whole computation is a fold over the category order.

mod grid;
mod network;

pub use grid::{GridSpec, grid_for};

use crate::model::{Category, Snapshot};

/// An axis-aligned rectangle in page-local points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Vertical layout position: a page index and a page-local y.
///
/// Section steps take a cursor and return the advanced one; nothing is
/// mutated behind the caller's back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f32,
}

impl Cursor {
    /// Cursor at the top of the first page's content area.
    pub fn top(config: &LayoutConfig) -> Self {
        Self {
            page: 0,
            y: config.margin,
        }
    }

    /// Moves down the current page.
    pub fn advance(self, dy: f32) -> Self {
        Self {
            page: self.page,
            y: self.y + dy,
        }
    }

    /// Starts the next page at the top of its content area.
    pub fn next_page(self, config: &LayoutConfig) -> Self {
        Self {
            page: self.page + 1,
            y: config.margin,
        }
    }

    /// Breaks to the next page when `height` does not fit above the
    /// bottom margin. Blocks are placed whole; this is the only rule
    /// that ever inserts a page break.
    pub fn ensure_room(self, height: f32, config: &LayoutConfig) -> Self {
        if self.y + height > config.content_bottom() {
            self.next_page(config)
        } else {
            self
        }
    }
}

/// Page geometry and spacing constants shared by the layout engine and
/// every renderer that draws from it.
///
/// Defaults describe an A4 landscape page. All values are points.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub section_header_height: f32,
    /// Space between a section header and its first row.
    pub header_gap: f32,
    /// Horizontal and vertical space between cards in a grid.
    pub card_gap: f32,
    /// Extra space after a section's last row.
    pub section_gap: f32,
    /// Vertical space between network tiers, sized for connector lines.
    pub tier_gap: f32,
    pub placeholder_height: f32,
    pub card_padding: f32,
    /// Horizontal room reserved left of the title block for the
    /// category glyph.
    pub glyph_inset: f32,
    pub title_size: f32,
    pub title_line_height: f32,
    pub detail_size: f32,
    pub detail_line_height: f32,
    /// Space between the title block and the first detail line.
    pub title_detail_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 842.0,
            page_height: 595.0,
            margin: 40.0,
            section_header_height: 24.0,
            header_gap: 8.0,
            card_gap: 12.0,
            section_gap: 12.0,
            tier_gap: 28.0,
            placeholder_height: 26.0,
            card_padding: 8.0,
            glyph_inset: 12.0,
            title_size: 9.0,
            title_line_height: 12.0,
            detail_size: 7.5,
            detail_line_height: 10.0,
            title_detail_gap: 4.0,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Usable width between the side margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Lowest y content may reach before a page break.
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin
    }

    pub fn center_x(&self) -> f32 {
        self.page_width / 2.0
    }
}

/// One placed inventory item: a rectangle plus its pre-fitted text.
///
/// Text is fitted here, once, with the shared Helvetica metrics, so all
/// backends draw exactly the same strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub category: Category,
    pub page: usize,
    pub rect: Rect,
    /// Fitted title, at most two lines, last line ellipsized on overflow.
    pub title_lines: Vec<String>,
    /// Fitted "Label: value" lines, clipped to the card's capacity.
    pub detail_lines: Vec<String>,
}

/// A straight connector between two network tiers, drawn only when both
/// endpoints land on the same page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub page: usize,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Placeholder block for a category with no items.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub page: usize,
    pub rect: Rect,
    pub text: String,
}

/// Layout for one category section: header band, cards, and (for the
/// network section) the internet anchor and tier connectors.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub category: Category,
    /// Header text, e.g. `"Servers (3)"`.
    pub title: String,
    pub header_page: usize,
    pub header: Rect,
    pub cards: Vec<Card>,
    /// Centered "Internet" node above the network tiers.
    pub anchor: Option<Card>,
    pub connectors: Vec<Connector>,
    pub placeholder: Option<Placeholder>,
}

/// Derived geometry for one snapshot: computed fresh per export, never
/// persisted, identical for every backend that consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub config: LayoutConfig,
    pub organization: String,
    pub page_count: usize,
    pub sections: Vec<SectionLayout>,
}

impl Layout {
    /// All cards across all sections, anchors excluded.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.sections.iter().flat_map(|s| s.cards.iter())
    }
}

/// Computes the full layout for a snapshot.
///
/// Sections are emitted in [`Category::ORDER`]. Page breaks only happen
/// at row boundaries, and a section header always has its first row (or
/// placeholder) beneath it on the same page.
pub fn compute_layout(snapshot: &Snapshot, config: &LayoutConfig) -> Layout {
    let mut cursor = Cursor::top(config);
    let mut sections = Vec::with_capacity(Category::ORDER.len());

    for &category in &Category::ORDER {
        let (section, next) = match category {
            Category::Network => network::layout_network(&snapshot.network_devices, cursor, config),
            Category::Endpoints => {
                grid::layout_grid(category, &snapshot.endpoints, cursor, config)
            }
            Category::Servers => grid::layout_grid(category, &snapshot.servers, cursor, config),
            Category::Peripherals => {
                grid::layout_grid(category, &snapshot.peripherals, cursor, config)
            }
            Category::Backups => grid::layout_grid(category, &snapshot.backups, cursor, config),
            Category::Software => grid::layout_grid(category, &snapshot.software, cursor, config),
            Category::Voip => grid::layout_grid(category, &snapshot.voip_services, cursor, config),
        };
        sections.push(section);
        cursor = next;
    }

    log::debug!(
        "layout for {:?}: {} items over {} page(s)",
        snapshot.organization,
        snapshot.total(),
        cursor.page + 1
    );

    Layout {
        config: config.clone(),
        organization: snapshot.organization.clone(),
        page_count: cursor.page + 1,
        sections,
    }
}
