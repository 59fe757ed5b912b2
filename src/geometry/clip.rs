use geo::BooleanOps;
use geo_types::{Coord, LineString, MultiLineString, Polygon, Rect};
use tracing::debug;

use super::types::GeomType;

/// Intersect geometry parts with the square `[-buffer, extent + buffer]²`.
///
/// Coordinates must still be in unscaled tile-local units; clipping sits
/// between command decoding and scaling. When the clip cannot run (no
/// structurally usable part remains), the input is returned unchanged:
/// failure to clip degrades to "no clipping happened", it is never fatal.
pub fn clip_parts(
    parts: Vec<Vec<Coord<i64>>>,
    geom_type: GeomType,
    extent: i64,
    buffer: i64,
) -> Vec<Vec<Coord<i64>>> {
    let min = -buffer;
    let max = extent + buffer;

    // Points need no clipping algorithm: drop out-of-bounds vertices and
    // any part that ends up empty.
    if geom_type == GeomType::Point {
        return parts
            .into_iter()
            .filter_map(|part| {
                let kept: Vec<Coord<i64>> = part
                    .into_iter()
                    .filter(|c| c.x >= min && c.y >= min && c.x <= max && c.y <= max)
                    .collect();
                (!kept.is_empty()).then_some(kept)
            })
            .collect();
    }

    let clip_rect = Rect::new(
        Coord {
            x: min as f64,
            y: min as f64,
        },
        Coord {
            x: max as f64,
            y: max as f64,
        },
    )
    .to_polygon();

    let clipped = match geom_type {
        GeomType::LineString => clip_lines(&parts, &clip_rect),
        _ => clip_rings(&parts, &clip_rect, geom_type == GeomType::Polygon),
    };

    match clipped {
        Some(out) => out,
        None => {
            debug!(?geom_type, "clip not executable, returning unclipped parts");
            parts
        }
    }
}

fn clip_lines(
    parts: &[Vec<Coord<i64>>],
    clip_rect: &Polygon<f64>,
) -> Option<Vec<Vec<Coord<i64>>>> {
    let lines: Vec<LineString<f64>> = parts
        .iter()
        .filter(|part| part.len() >= 2)
        .map(|part| to_f64_line(part))
        .collect();
    if lines.is_empty() {
        return None;
    }
    let solution = clip_rect.clip(&MultiLineString(lines), false);
    Some(
        solution
            .into_iter()
            .map(|line| line.0.into_iter().map(round_coord).collect::<Vec<_>>())
            .filter(|part: &Vec<Coord<i64>>| !part.is_empty())
            .collect(),
    )
}

fn clip_rings(
    parts: &[Vec<Coord<i64>>],
    clip_rect: &Polygon<f64>,
    close_rings: bool,
) -> Option<Vec<Vec<Coord<i64>>>> {
    let mut out = Vec::new();
    let mut usable = false;
    for part in parts {
        if part.len() < 3 {
            continue;
        }
        usable = true;
        let subject = Polygon::new(to_f64_line(part), Vec::new());
        for polygon in clip_rect.intersection(&subject) {
            push_ring(&mut out, polygon.exterior(), close_rings);
            // parts are a flat ring list; interior rings become parts too
            for interior in polygon.interiors() {
                push_ring(&mut out, interior, close_rings);
            }
        }
    }
    usable.then_some(out)
}

fn push_ring(out: &mut Vec<Vec<Coord<i64>>>, ring: &LineString<f64>, close: bool) {
    let mut part: Vec<Coord<i64>> = ring.0.iter().copied().map(round_coord).collect();
    if part.is_empty() {
        return;
    }
    // the clipping backend may hand back a ring whose endpoints differ;
    // restore closure by prepending a copy of the last vertex
    if close && part.first() != part.last() {
        let last = part[part.len() - 1];
        part.insert(0, last);
    }
    out.push(part);
}

fn to_f64_line(part: &[Coord<i64>]) -> LineString<f64> {
    LineString(
        part.iter()
            .map(|c| Coord {
                x: c.x as f64,
                y: c.y as f64,
            })
            .collect(),
    )
}

fn round_coord(c: Coord<f64>) -> Coord<i64> {
    Coord {
        x: c.x.round() as i64,
        y: c.y.round() as i64,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn pt(x: i64, y: i64) -> Coord<i64> {
        Coord { x, y }
    }

    fn vertex_set(parts: &[Vec<Coord<i64>>]) -> HashSet<(i64, i64)> {
        parts
            .iter()
            .flat_map(|part| part.iter().map(|c| (c.x, c.y)))
            .collect()
    }

    fn assert_contained(parts: &[Vec<Coord<i64>>], min: i64, max: i64) {
        for part in parts {
            for c in part {
                assert!(
                    c.x >= min && c.x <= max && c.y >= min && c.y <= max,
                    "vertex {c:?} escaped [{min}, {max}]"
                );
            }
        }
    }

    #[test]
    fn points_outside_the_boundary_are_dropped() {
        let parts = vec![vec![pt(0, 0), pt(-1, 5), pt(5000, 5000), pt(4096, 4096)]];
        let clipped = clip_parts(parts, GeomType::Point, 4096, 0);
        assert_eq!(clipped, vec![vec![pt(0, 0), pt(4096, 4096)]]);
    }

    #[test]
    fn point_buffer_extends_the_boundary() {
        let parts = vec![vec![pt(-1, 5), pt(-11, 0)]];
        let clipped = clip_parts(parts, GeomType::Point, 4096, 10);
        assert_eq!(clipped, vec![vec![pt(-1, 5)]]);
    }

    #[test]
    fn emptied_point_parts_disappear() {
        let parts = vec![vec![pt(-5, -5)], vec![pt(7, 7)]];
        let clipped = clip_parts(parts, GeomType::Point, 4096, 0);
        assert_eq!(clipped, vec![vec![pt(7, 7)]]);
    }

    #[test]
    fn interior_polygon_survives_clipping_unchanged() {
        let ring = vec![pt(10, 10), pt(100, 10), pt(100, 100), pt(10, 100), pt(10, 10)];
        let parts = vec![ring.clone()];
        let clipped = clip_parts(parts, GeomType::Polygon, 4096, 0);
        assert_eq!(vertex_set(&clipped), vertex_set(&[ring]));
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped[0].first(), clipped[0].last());
    }

    #[test]
    fn clipped_polygon_stays_inside_the_boundary() {
        let ring = vec![
            pt(-500, -500),
            pt(500, -500),
            pt(500, 500),
            pt(-500, 500),
            pt(-500, -500),
        ];
        let clipped = clip_parts(vec![ring], GeomType::Polygon, 4096, 0);
        assert!(!clipped.is_empty());
        assert_contained(&clipped, 0, 4096);
        for part in &clipped {
            assert_eq!(part.first(), part.last());
        }
    }

    #[test]
    fn clipped_line_stays_inside_the_boundary() {
        let line = vec![pt(-50, 10), pt(50, 10)];
        let clipped = clip_parts(vec![line], GeomType::LineString, 4096, 0);
        assert!(!clipped.is_empty());
        assert_contained(&clipped, 0, 4096);
        let vertices = vertex_set(&clipped);
        assert!(vertices.contains(&(0, 10)));
        assert!(vertices.contains(&(50, 10)));
    }

    #[test]
    fn line_fully_outside_clips_to_nothing() {
        let line = vec![pt(-50, -10), pt(-10, -10)];
        let clipped = clip_parts(vec![line], GeomType::LineString, 4096, 0);
        assert!(clipped.is_empty());
    }

    #[test]
    fn degenerate_input_degrades_to_unclipped() {
        // a two-vertex "ring" cannot be clipped; the input comes back as-is
        let parts = vec![vec![pt(-100, -100), pt(5000, 5000)]];
        let clipped = clip_parts(parts.clone(), GeomType::Polygon, 4096, 0);
        assert_eq!(clipped, parts);
    }
}
