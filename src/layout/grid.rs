//! Per-category grid placement.
//!
//! Each category has a fixed card size and row width; the dense
//! categories (network, peripherals) pack more cards per row than
//! servers, whose cards carry the most detail lines. Placement walks
//! the items row by row, breaking pages only between rows.

use crate::layout::{Card, Cursor, LayoutConfig, Placeholder, Rect, SectionLayout};
use crate::model::{CardSource, Category};
use crate::text::{self, Font};

/// Fixed grid shape for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub cards_per_row: usize,
    pub card_width: f32,
    pub card_height: f32,
}

/// Grid shape for a category. Row widths are tuned so a full row plus
/// gaps fits the default A4-landscape content width.
pub fn grid_for(category: Category) -> GridSpec {
    match category {
        Category::Network => GridSpec {
            cards_per_row: 5,
            card_width: 140.0,
            card_height: 64.0,
        },
        Category::Servers => GridSpec {
            cards_per_row: 3,
            card_width: 244.0,
            card_height: 120.0,
        },
        Category::Endpoints => GridSpec {
            cards_per_row: 4,
            card_width: 180.0,
            card_height: 88.0,
        },
        Category::Peripherals | Category::Backups | Category::Software | Category::Voip => {
            GridSpec {
                cards_per_row: 4,
                card_width: 180.0,
                card_height: 84.0,
            }
        }
    }
}

/// Detail lines that fit under a two-line title block.
fn detail_capacity(card_height: f32, config: &LayoutConfig) -> usize {
    let title_block = 2.0 * config.title_line_height;
    let available =
        card_height - 2.0 * config.card_padding - title_block - config.title_detail_gap;
    (available / config.detail_line_height).max(0.0) as usize
}

/// Builds a placed card, fitting all of its text against the card's
/// inner width so every backend draws identical strings.
pub(crate) fn make_card<T: CardSource>(
    item: &T,
    category: Category,
    page: usize,
    rect: Rect,
    config: &LayoutConfig,
) -> Card {
    let inner = rect.width - 2.0 * config.card_padding;
    let title_measure = text::measure_at(Font::HelveticaBold, config.title_size);
    let detail_measure = text::measure_at(Font::Helvetica, config.detail_size);

    // The glyph sits left of the title, so titles get less room than details.
    let title_lines = text::wrap_lines(item.name(), inner - config.glyph_inset, 2, title_measure);
    let detail_lines = item
        .details()
        .into_iter()
        .take(detail_capacity(rect.height, config))
        .map(|(label, value)| text::truncate(&format!("{label}: {value}"), inner, &detail_measure))
        .collect();

    Card {
        category,
        page,
        rect,
        title_lines,
        detail_lines,
    }
}

/// Emits the section header, breaking first when the header plus its
/// first content block would not fit. Returns the advanced cursor.
pub(crate) fn place_header(
    section: &mut SectionLayout,
    first_block_height: f32,
    cursor: Cursor,
    config: &LayoutConfig,
) -> Cursor {
    let needed = config.section_header_height + config.header_gap + first_block_height;
    let cursor = cursor.ensure_room(needed, config);
    section.header = Rect::new(
        config.margin,
        cursor.y,
        config.content_width(),
        config.section_header_height,
    );
    section.header_page = cursor.page;
    cursor.advance(config.section_header_height + config.header_gap)
}

/// Emits the "no items configured" block for an empty category.
pub(crate) fn place_placeholder(
    section: &mut SectionLayout,
    cursor: Cursor,
    config: &LayoutConfig,
) -> Cursor {
    let rect = Rect::new(
        config.margin,
        cursor.y,
        config.content_width(),
        config.placeholder_height,
    );
    section.placeholder = Some(Placeholder {
        page: cursor.page,
        rect,
        text: format!("No {} configured", section.category.noun()),
    });
    cursor.advance(config.placeholder_height + config.section_gap)
}

pub(crate) fn blank_section(category: Category, count: usize) -> SectionLayout {
    SectionLayout {
        category,
        title: format!("{} ({count})", category.title()),
        header_page: 0,
        header: Rect::new(0.0, 0.0, 0.0, 0.0),
        cards: Vec::new(),
        anchor: None,
        connectors: Vec::new(),
        placeholder: None,
    }
}

/// Lays out one plain grid section.
///
/// Cards fill left to right, top to bottom; the last row is left ragged
/// rather than padded. A page break may only fall between rows.
pub(crate) fn layout_grid<T: CardSource>(
    category: Category,
    items: &[T],
    cursor: Cursor,
    config: &LayoutConfig,
) -> (SectionLayout, Cursor) {
    let spec = grid_for(category);
    let mut section = blank_section(category, items.len());

    if items.is_empty() {
        let cursor = place_header(&mut section, config.placeholder_height, cursor, config);
        let cursor = place_placeholder(&mut section, cursor, config);
        return (section, cursor);
    }

    let mut cursor = place_header(&mut section, spec.card_height, cursor, config);
    for row in items.chunks(spec.cards_per_row) {
        cursor = cursor.ensure_room(spec.card_height, config);
        for (col, item) in row.iter().enumerate() {
            let x = config.margin + col as f32 * (spec.card_width + config.card_gap);
            let rect = Rect::new(x, cursor.y, spec.card_width, spec.card_height);
            section
                .cards
                .push(make_card(item, category, cursor.page, rect, config));
        }
        cursor = cursor.advance(spec.card_height + config.card_gap);
    }

    (section, cursor.advance(config.section_gap))
}
