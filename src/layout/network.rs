//! Tiered placement for the network section.
//!
//! Instead of a plain grid, network devices model the physical uplink
//! chain: a centered "Internet" anchor, then a centered row of
//! firewalls/routers, then switches, then wireless gear. Devices whose
//! type matches none of the tiers trail in a plain left-aligned grid.
//! Connector lines fan out between adjacent tiers, but only when both
//! ends land on the same page.

use crate::layout::grid::{self, GridSpec};
use crate::layout::{Card, Connector, Cursor, LayoutConfig, Rect, SectionLayout};
use crate::model::{Category, NetworkDevice};

const ANCHOR_WIDTH: f32 = 96.0;
const ANCHOR_HEIGHT: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Edge,
    Switching,
    Wireless,
    Other,
}

/// Classifies a device into its tier by type keywords.
fn tier_of(device_type: &str) -> Tier {
    let t = device_type.to_lowercase();
    if t.contains("firewall") || t.contains("router") || t.contains("gateway") {
        Tier::Edge
    } else if t.contains("switch") {
        Tier::Switching
    } else if t.contains("access") || t.contains("wifi") || t.contains("wireless") {
        Tier::Wireless
    } else {
        Tier::Other
    }
}

/// Lays out the network section. Empty input falls back to the plain
/// grid path so the placeholder block matches every other category.
pub(crate) fn layout_network(
    devices: &[NetworkDevice],
    cursor: Cursor,
    config: &LayoutConfig,
) -> (SectionLayout, Cursor) {
    let category = Category::Network;
    if devices.is_empty() {
        return grid::layout_grid(category, devices, cursor, config);
    }

    let spec = grid::grid_for(category);
    let mut section = grid::blank_section(category, devices.len());

    let mut edge = Vec::new();
    let mut switching = Vec::new();
    let mut wireless = Vec::new();
    let mut other = Vec::new();
    for device in devices {
        match tier_of(&device.device_type) {
            Tier::Edge => edge.push(device),
            Tier::Switching => switching.push(device),
            Tier::Wireless => wireless.push(device),
            Tier::Other => other.push(device),
        }
    }

    // Header stays with the anchor and the first tier row.
    let first_block = ANCHOR_HEIGHT + config.tier_gap + spec.card_height;
    let mut cursor = grid::place_header(&mut section, first_block, cursor, config);

    let anchor_rect = Rect::new(
        config.center_x() - ANCHOR_WIDTH / 2.0,
        cursor.y,
        ANCHOR_WIDTH,
        ANCHOR_HEIGHT,
    );
    section.anchor = Some(Card {
        category,
        page: cursor.page,
        rect: anchor_rect,
        title_lines: vec!["Internet".to_string()],
        detail_lines: Vec::new(),
    });
    // Fan-out origin for the next tier down.
    let mut source = (anchor_rect.center_x(), anchor_rect.bottom(), cursor.page);
    cursor = cursor.advance(ANCHOR_HEIGHT);

    for tier in [&edge, &switching, &wireless] {
        if tier.is_empty() {
            continue;
        }
        cursor = cursor.advance(config.tier_gap);
        let (first_row, next) = place_tier(&mut section, tier, spec, cursor, config);

        let (sx, sy, source_page) = source;
        for card in &section.cards[first_row] {
            if card.page == source_page {
                section.connectors.push(Connector {
                    page: source_page,
                    x1: sx,
                    y1: sy,
                    x2: card.rect.center_x(),
                    y2: card.rect.y,
                });
            }
        }

        cursor = next;
        source = (config.center_x(), cursor.y, cursor.page);
    }

    // Unclassified devices trail in a plain grid, no connectors.
    if !other.is_empty() {
        cursor = cursor.advance(config.tier_gap);
        for (r, row) in other.chunks(spec.cards_per_row).enumerate() {
            if r > 0 {
                cursor = cursor.advance(config.card_gap);
            }
            cursor = cursor.ensure_room(spec.card_height, config);
            for (col, device) in row.iter().enumerate() {
                let x = config.margin + col as f32 * (spec.card_width + config.card_gap);
                let rect = Rect::new(x, cursor.y, spec.card_width, spec.card_height);
                section
                    .cards
                    .push(grid::make_card(*device, category, cursor.page, rect, config));
            }
            cursor = cursor.advance(spec.card_height);
        }
    }

    (
        section,
        cursor.advance(config.card_gap + config.section_gap),
    )
}

/// Places one tier as centered rows and returns the index range of its
/// first row plus the cursor at the bottom of its last row.
fn place_tier(
    section: &mut SectionLayout,
    devices: &[&NetworkDevice],
    spec: GridSpec,
    cursor: Cursor,
    config: &LayoutConfig,
) -> (std::ops::Range<usize>, Cursor) {
    let mut cursor = cursor;
    let start = section.cards.len();
    let mut first_row_len = 0;

    for (r, row) in devices.chunks(spec.cards_per_row).enumerate() {
        if r > 0 {
            cursor = cursor.advance(config.card_gap);
        }
        cursor = cursor.ensure_room(spec.card_height, config);

        let row_width =
            row.len() as f32 * spec.card_width + (row.len() - 1) as f32 * config.card_gap;
        let start_x = config.center_x() - row_width / 2.0;
        for (col, device) in row.iter().enumerate() {
            let x = start_x + col as f32 * (spec.card_width + config.card_gap);
            let rect = Rect::new(x, cursor.y, spec.card_width, spec.card_height);
            section
                .cards
                .push(grid::make_card(*device, Category::Network, cursor.page, rect, config));
        }
        if r == 0 {
            first_row_len = row.len();
        }
        cursor = cursor.advance(spec.card_height);
    }

    (start..start + first_row_len, cursor)
}
