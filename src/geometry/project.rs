use std::f64::consts::PI;

use geo_types::Coord;

use crate::error::DecodeError;

use super::types::LatLng;

/// Project a tile-local point to WGS84 via the spherical-Mercator tile
/// inverse. `zoom`, `column` and `row` address the tile; `extent` is the
/// layer's coordinate span. Points outside `0..extent` project to positions
/// outside the tile, possibly outside the valid WGS84 range.
pub fn tile_to_lnglat(point: Coord<i64>, zoom: u64, column: u64, row: u64, extent: u64) -> LatLng {
    let size = extent as f64 * 2f64.powi(zoom as i32);
    let x0 = extent as f64 * column as f64;
    let y0 = extent as f64 * row as f64;

    let y2 = 180.0 - (point.y as f64 + y0) * 360.0 / size;
    let lng = (point.x as f64 + x0) * 360.0 / size - 180.0;
    let lat = 360.0 / PI * (y2 * PI / 180.0).exp().atan() - 90.0;

    LatLng { lat, lng }
}

/// As [`tile_to_lnglat`], but errors when the projected position leaves the
/// valid WGS84 range.
pub fn tile_to_lnglat_checked(
    point: Coord<i64>,
    zoom: u64,
    column: u64,
    row: u64,
    extent: u64,
) -> Result<LatLng, DecodeError> {
    let ll = tile_to_lnglat(point, zoom, column, row, extent);
    if ll.lng <= -180.0 || ll.lng >= 180.0 {
        return Err(DecodeError::ProjectionOutOfRange {
            axis: "longitude",
            value: ll.lng,
        });
    }
    if ll.lat <= -90.0 || ll.lat >= 90.0 {
        return Err(DecodeError::ProjectionOutOfRange {
            axis: "latitude",
            value: ll.lat,
        });
    }
    Ok(ll)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn south_east_corner_of_the_world_tile() {
        let ll = tile_to_lnglat(Coord { x: 4096, y: 4096 }, 0, 0, 0, 4096);
        assert_eq!(ll.lng, 180.0);
        assert!((ll.lat - -85.051128779806589).abs() < 1e-12);
    }

    #[test]
    fn origin_of_the_world_tile() {
        let ll = tile_to_lnglat(Coord { x: 0, y: 0 }, 0, 0, 0, 4096);
        assert_eq!(ll.lng, -180.0);
        assert!((ll.lat - 85.051128779806589).abs() < 1e-12);
    }

    #[test]
    fn checked_projection_rejects_out_of_range() {
        let out_east = tile_to_lnglat(Coord { x: 4210, y: 4096 }, 0, 0, 0, 4096);
        assert!((out_east.lng - 190.0).abs() < 0.02);
        assert!(matches!(
            tile_to_lnglat_checked(Coord { x: 4210, y: 4096 }, 0, 0, 0, 4096),
            Err(DecodeError::ProjectionOutOfRange {
                axis: "longitude",
                ..
            })
        ));
        // latitude saturates towards +/-90 and stays in range even for
        // points well below the tile
        let out_south = tile_to_lnglat_checked(Coord { x: 100, y: 4210 }, 0, 0, 0, 4096).unwrap();
        assert!((out_south.lat - -85.844).abs() < 0.02);
    }

    #[test]
    fn interior_point_projects_inside_the_tile_bounds() {
        let ll = tile_to_lnglat_checked(Coord { x: 2048, y: 2048 }, 0, 0, 0, 4096).unwrap();
        assert!(ll.lng.abs() < 1e-9);
        assert!(ll.lat.abs() < 1e-9);
    }
}
