use geo_types::{Coord, CoordNum};
use num_traits::NumCast;

use crate::error::DecodeError;

use super::types::GeomType;

// Geometry command words: low 3 bits are the command, the rest the repeat
// count. ClosePath carries no coordinate parameters.
const MOVE_TO: u32 = 1;
const LINE_TO: u32 = 2;
const CLOSE_PATH: u32 = 7;

/// Decode a zigzag-encoded unsigned value into a signed delta.
#[inline]
pub(crate) fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Reconstruct geometry parts from a packed command stream.
///
/// Returns a list of parts, each an ordered list of tile-local points. A
/// single-part feature has one child list; a multi-part feature has one per
/// part: every `MoveTo` after the first point starts a new part. For
/// polygons, `ClosePath` appends a copy of the part's first vertex.
///
/// This is a pure function: an empty command stream yields an empty part
/// list, a zero repeat count is a no-op, and a truncated coordinate pair
/// ends the decode instead of reading past the stream. The geometry type is
/// not validated here.
pub fn decode_commands(geom_type: GeomType, commands: &[u32]) -> Vec<Vec<Coord<i64>>> {
    let mut parts: Vec<Vec<Coord<i64>>> = Vec::new();
    let mut part: Vec<Coord<i64>> = Vec::new();
    let mut cursor_x = 0i64;
    let mut cursor_y = 0i64;

    let mut i = 0;
    while i < commands.len() {
        let word = commands[i];
        let cmd = word & 0x7;
        let count = word >> 3;
        match cmd {
            MOVE_TO | LINE_TO => {
                for _ in 0..count {
                    let (Some(&dx), Some(&dy)) = (commands.get(i + 1), commands.get(i + 2))
                    else {
                        i = commands.len();
                        break;
                    };
                    cursor_x += zigzag_decode(<u64 as From<u32>>::from(dx));
                    cursor_y += zigzag_decode(<u64 as From<u32>>::from(dy));
                    i += 2;
                    if cmd == MOVE_TO && !part.is_empty() {
                        parts.push(std::mem::take(&mut part));
                    }
                    part.push(Coord {
                        x: cursor_x,
                        y: cursor_y,
                    });
                }
            }
            CLOSE_PATH => {
                if geom_type == GeomType::Polygon && !part.is_empty() {
                    let first = part[0];
                    part.push(first);
                }
            }
            _ => {}
        }
        i += 1;
    }
    if !part.is_empty() {
        parts.push(part);
    }
    parts
}

/// Scale every coordinate by `factor` and convert into `T`.
///
/// The multiply happens in f64; integer targets truncate toward zero like an
/// `as` cast. This is the only place numeric type conversion happens.
pub fn scale_parts<T: CoordNum>(
    parts: &[Vec<Coord<i64>>],
    factor: f32,
) -> Result<Vec<Vec<Coord<T>>>, DecodeError> {
    let factor = <f64 as From<f32>>::from(factor);
    let cast = |value: f64| NumCast::from(value).ok_or(DecodeError::CoordinateOverflow(value));
    parts
        .iter()
        .map(|part| {
            part.iter()
                .map(|c| {
                    Ok(Coord {
                        x: cast(c.x as f64 * factor)?,
                        y: cast(c.y as f64 * factor)?,
                    })
                })
                .collect::<Result<Vec<_>, DecodeError>>()
        })
        .collect()
}
