//! Polyline approximations for drawing APIs without native arcs.
//!
//! The document backend's content streams only know straight segments
//! and cubic curves, so circular glyphs are emitted as short polylines.

use std::f32::consts::TAU;

/// Approximates a circular arc as a polyline.
///
/// `start` and `sweep` are radians; the result holds `segments + 1`
/// points including both endpoints. `segments` is clamped to at least 1.
pub fn arc_to_polyline(
    cx: f32,
    cy: f32,
    radius: f32,
    start: f32,
    sweep: f32,
    segments: usize,
) -> Vec<(f32, f32)> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let angle = start + sweep * (i as f32 / segments as f32);
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

/// Full circle as a closed polyline; the last point repeats the first.
pub fn circle_polyline(cx: f32, cy: f32, radius: f32, segments: usize) -> Vec<(f32, f32)> {
    arc_to_polyline(cx, cy, radius, 0.0, TAU, segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_endpoint_count() {
        let points = arc_to_polyline(0.0, 0.0, 1.0, 0.0, TAU / 4.0, 8);
        assert_eq!(points.len(), 9);
    }

    #[test]
    fn test_arc_points_stay_on_radius() {
        let (cx, cy, r) = (10.0, -3.0, 4.5);
        for (x, y) in arc_to_polyline(cx, cy, r, 0.7, 2.1, 12) {
            let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            assert!((dist - r).abs() < 1e-4);
        }
    }

    #[test]
    fn test_quarter_arc_endpoints() {
        let points = arc_to_polyline(0.0, 0.0, 2.0, 0.0, TAU / 4.0, 4);
        let (x0, y0) = points[0];
        let (x1, y1) = points[points.len() - 1];
        assert!((x0 - 2.0).abs() < 1e-5 && y0.abs() < 1e-5);
        assert!(x1.abs() < 1e-4 && (y1 - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_circle_closes() {
        let points = circle_polyline(5.0, 5.0, 2.0, 16);
        let first = points[0];
        let last = points[points.len() - 1];
        assert!((first.0 - last.0).abs() < 1e-4);
        assert!((first.1 - last.1).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_segment_count_clamped() {
        assert_eq!(arc_to_polyline(0.0, 0.0, 1.0, 0.0, 1.0, 0).len(), 2);
    }
}
