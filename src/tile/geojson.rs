//! GeoJSON rendering of a decoded tile.

use serde_json::{Map, Value as JsonValue, json};

use crate::error::DecodeError;
use crate::geometry::{GeomType, LatLng};

use super::reader::VectorTile;

impl VectorTile<'_> {
    /// Render the whole tile as a GeoJSON FeatureCollection string.
    ///
    /// `(zoom, column, row)` address the tile so coordinates can be
    /// projected to WGS84. Multi-part geometries promote to their `Multi*`
    /// GeoJSON types; polygon parts become the rings of a single polygon
    /// (rings and holes are not distinguished in the tile). Each feature's
    /// properties carry its resolved attributes plus `id` and `lyr` (the
    /// owning layer's name). Features with an unknown geometry type are
    /// skipped.
    pub fn to_geojson(
        &self,
        zoom: u64,
        column: u64,
        row: u64,
        clip_buffer: Option<u64>,
    ) -> Result<String, DecodeError> {
        let mut features = Vec::new();
        for name in self.layer_names() {
            let Some(layer) = self.layer(name)? else {
                continue;
            };
            for index in 0..layer.feature_count() {
                let feature = layer.feature(index)?;
                if feature.geom_type() == GeomType::Unknown {
                    continue;
                }
                let parts = feature.geometry_wgs84(zoom, column, row, clip_buffer);

                let mut properties = Map::new();
                properties.insert("id".to_owned(), json!(feature.id()));
                properties.insert("lyr".to_owned(), json!(layer.name()));
                for (key, value) in feature.properties() {
                    properties.insert(key.to_owned(), json!(value));
                }

                features.push(json!({
                    "type": "Feature",
                    "geometry": geometry_json(feature.geom_type(), &parts),
                    "properties": properties,
                }));
            }
        }
        let collection = json!({
            "type": "FeatureCollection",
            "features": features,
        });
        Ok(collection.to_string())
    }
}

fn geometry_json(geom_type: GeomType, parts: &[Vec<LatLng>]) -> JsonValue {
    let multi = parts.len() > 1;
    match geom_type {
        GeomType::Point if multi => json!({
            "type": "MultiPoint",
            "coordinates": parts
                .iter()
                .flat_map(|part| part.iter().map(position))
                .collect::<Vec<_>>(),
        }),
        GeomType::Point => json!({
            "type": "Point",
            "coordinates": parts
                .first()
                .and_then(|part| part.first())
                .map(position)
                .unwrap_or_else(|| json!([])),
        }),
        GeomType::LineString if multi => json!({
            "type": "MultiLineString",
            "coordinates": parts.iter().map(|part| line(part)).collect::<Vec<_>>(),
        }),
        GeomType::LineString => json!({
            "type": "LineString",
            "coordinates": parts.first().map(|part| line(part)).unwrap_or_else(|| json!([])),
        }),
        GeomType::Polygon if multi => json!({
            "type": "MultiPolygon",
            // all parts form the rings of one polygon, as the tile stores them
            "coordinates": [parts.iter().map(|part| line(part)).collect::<Vec<_>>()],
        }),
        GeomType::Polygon => json!({
            "type": "Polygon",
            "coordinates": [parts.first().map(|part| line(part)).unwrap_or_else(|| json!([]))],
        }),
        GeomType::Unknown => JsonValue::Null,
    }
}

fn position(ll: &LatLng) -> JsonValue {
    json!([ll.lng, ll.lat])
}

fn line(part: &[LatLng]) -> JsonValue {
    json!(part.iter().map(position).collect::<Vec<_>>())
}
