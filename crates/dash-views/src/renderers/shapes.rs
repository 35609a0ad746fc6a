//! Geometry for the painter-drawn charts

use std::f32::consts::{PI, TAU};

use egui::{Pos2, Vec2};

/// Start of the first slice: twelve o'clock
pub const TOP: f32 = -PI / 2.0;

/// Angular extent of each value as (start, end), clockwise from `start`
///
/// Slices cover `sweep` radians in total; all-zero input yields no slices.
pub fn slice_angles(values: &[f64], start: f32, sweep: f32) -> Vec<(f32, f32)> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut angle = start;
    values
        .iter()
        .map(|v| {
            let span = (v.max(0.0) / total) as f32 * sweep;
            let slice = (angle, angle + span);
            angle += span;
            slice
        })
        .collect()
}

fn point(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + Vec2::new(radius * angle.cos(), radius * angle.sin())
}

/// Convex pieces of an annular sector, small enough to fill individually
///
/// With `inner == 0` each piece is a triangle fanning out from the center.
pub fn arc_pieces(center: Pos2, inner: f32, outer: f32, start: f32, end: f32) -> Vec<Vec<Pos2>> {
    let span = end - start;
    if span <= 0.0 {
        return Vec::new();
    }
    let segments = ((span / TAU) * 64.0).ceil().max(1.0) as usize;
    let step = span / segments as f32;
    (0..segments)
        .map(|i| {
            let a0 = start + step * i as f32;
            let a1 = a0 + step;
            if inner <= 0.0 {
                vec![center, point(center, outer, a0), point(center, outer, a1)]
            } else {
                vec![
                    point(center, inner, a0),
                    point(center, outer, a0),
                    point(center, outer, a1),
                    point(center, inner, a1),
                ]
            }
        })
        .collect()
}

/// Midpoint of a sector at the given radius, for labels
pub fn label_anchor(center: Pos2, radius: f32, start: f32, end: f32) -> Pos2 {
    point(center, radius, (start + end) / 2.0)
}

/// Index of the slice under `pos`, if it lies within the ring
pub fn slice_at(center: Pos2, inner: f32, outer: f32, slices: &[(f32, f32)], pos: Pos2) -> Option<usize> {
    let offset = pos - center;
    let radius = offset.length();
    if radius < inner || radius > outer {
        return None;
    }
    let first = slices.first()?.0;
    let mut angle = offset.y.atan2(offset.x);
    while angle < first {
        angle += TAU;
    }
    slices.iter().position(|(start, end)| angle >= *start && angle < *end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slices_cover_sweep() {
        let slices = slice_angles(&[35.0, 25.0, 20.0, 15.0, 5.0], TOP, TAU);
        assert_eq!(slices.len(), 5);
        assert_eq!(slices[0].0, TOP);
        assert!((slices[4].1 - (TOP + TAU)).abs() < 1e-4);
        assert!((slices[0].1 - slices[0].0 - 0.35 * TAU).abs() < 1e-4);
        for pair in slices.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn test_zero_values() {
        assert!(slice_angles(&[0.0, 0.0], TOP, TAU).is_empty());
        assert!(slice_angles(&[], TOP, TAU).is_empty());
        let slices = slice_angles(&[1.0, 0.0, 1.0], 0.0, PI);
        assert_eq!(slices[1].0, slices[1].1);
    }

    #[test]
    fn test_arc_pieces_shapes() {
        let center = Pos2::new(0.0, 0.0);
        let pie = arc_pieces(center, 0.0, 10.0, 0.0, PI);
        assert!(pie.iter().all(|p| p.len() == 3 && p[0] == center));
        let ring = arc_pieces(center, 5.0, 10.0, 0.0, PI);
        assert_eq!(ring.len(), pie.len());
        assert!(ring.iter().all(|p| p.len() == 4));
        assert!(arc_pieces(center, 5.0, 10.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_slice_at() {
        let center = Pos2::new(100.0, 100.0);
        let slices = slice_angles(&[50.0, 50.0], TOP, TAU);
        // Clockwise from twelve o'clock: right half first
        assert_eq!(slice_at(center, 0.0, 50.0, &slices, Pos2::new(120.0, 100.0)), Some(0));
        assert_eq!(slice_at(center, 0.0, 50.0, &slices, Pos2::new(80.0, 100.0)), Some(1));
        assert_eq!(slice_at(center, 0.0, 50.0, &slices, Pos2::new(200.0, 100.0)), None);
        assert_eq!(slice_at(center, 30.0, 50.0, &slices, Pos2::new(110.0, 100.0)), None);
        assert_eq!(slice_at(center, 0.0, 50.0, &[], Pos2::new(110.0, 100.0)), None);
    }
}
