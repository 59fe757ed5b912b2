use ahash::AHashMap;
use geo_types::{Coord, CoordNum};

use crate::error::DecodeError;
use crate::geometry::{GeomType, LatLng, clip_parts, decode_commands, scale_parts, tile_to_lnglat};
use crate::pbf::PbfReader;
use crate::pbf::constants::feature_field;

use super::layer::Layer;
use super::value::Value;

/// A single decoded feature.
///
/// Field decoding (id, tags, type, raw geometry commands) happens when the
/// feature is requested from its layer; geometry materialization is deferred
/// further, to the accessors below. Those are pure `&self` computations with
/// no result cache: repeated requests recompute.
#[derive(Debug)]
pub struct Feature<'l> {
    layer: &'l Layer<'l>,
    id: u64,
    geom_type: GeomType,
    tags: Vec<u32>,
    commands: Vec<u32>,
}

impl<'l> Feature<'l> {
    pub(crate) fn decode(
        data: &[u8],
        layer: &'l Layer<'l>,
        validate: bool,
    ) -> Result<Self, DecodeError> {
        let mut reader = PbfReader::new(data);
        let mut id = 0u64;
        let mut geom_type = None;
        let mut tags = Vec::new();
        let mut commands: Option<Vec<u32>> = None;
        while reader.next()? {
            match reader.tag() {
                feature_field::ID => id = reader.varint()?,
                feature_field::TAGS => tags = reader.packed_u32()?,
                feature_field::TYPE => {
                    let raw = reader.varint()?;
                    match GeomType::from_raw(raw) {
                        Some(ty) => geom_type = Some(ty),
                        None if validate => {
                            return Err(DecodeError::UnknownGeomType {
                                layer: layer.name().to_owned(),
                                value: raw,
                            });
                        }
                        None => {}
                    }
                }
                feature_field::GEOMETRY => {
                    if commands.is_some() {
                        return Err(DecodeError::DuplicateGeometry(layer.name().to_owned()));
                    }
                    commands = Some(reader.packed_u32()?);
                }
                feature_field::RASTER => reader.skip()?,
                tag if validate => {
                    return Err(DecodeError::UnknownFeatureField {
                        layer: layer.name().to_owned(),
                        tag,
                    });
                }
                _ => reader.skip()?,
            }
        }

        if validate {
            if geom_type.is_none() {
                return Err(DecodeError::MissingGeomType(layer.name().to_owned()));
            }
            if commands.is_none() {
                return Err(DecodeError::MissingGeometry(layer.name().to_owned()));
            }
            if tags.len() % 2 != 0 {
                return Err(DecodeError::UnevenTags(layer.name().to_owned()));
            }
            for pair in tags.chunks_exact(2) {
                if pair[0] as usize >= layer.keys().len() {
                    return Err(DecodeError::TagIndexOutOfRange {
                        layer: layer.name().to_owned(),
                        kind: "key",
                        index: pair[0],
                        len: layer.keys().len(),
                    });
                }
                if pair[1] as usize >= layer.values().len() {
                    return Err(DecodeError::TagIndexOutOfRange {
                        layer: layer.name().to_owned(),
                        kind: "value",
                        index: pair[1],
                        len: layer.values().len(),
                    });
                }
            }
        }

        Ok(Feature {
            layer,
            id,
            geom_type: geom_type.unwrap_or(GeomType::Unknown),
            tags,
            commands: commands.unwrap_or_default(),
        })
    }

    /// Feature id; 0 means the tile carried none.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn geom_type(&self) -> GeomType {
        self.geom_type
    }

    /// Raw alternating key-index/value-index pairs into the layer
    /// dictionaries.
    #[inline]
    pub fn tags(&self) -> &[u32] {
        &self.tags
    }

    /// Geometry parts in raw tile-local coordinates.
    pub fn geometry_tile(&self) -> Vec<Vec<Coord<i64>>> {
        decode_commands(self.geom_type, &self.commands)
    }

    /// Geometry parts, optionally clipped against the tile boundary plus
    /// `clip_buffer` extent units, then scaled by `scale` and converted to
    /// the requested coordinate type. Clipping happens before scaling, in
    /// tile-local units.
    pub fn geometry<T: CoordNum>(
        &self,
        clip_buffer: Option<u64>,
        scale: f32,
    ) -> Result<Vec<Vec<Coord<T>>>, DecodeError> {
        let mut parts = self.geometry_tile();
        if let Some(buffer) = clip_buffer {
            parts = clip_parts(
                parts,
                self.geom_type,
                self.layer.extent() as i64,
                buffer as i64,
            );
        }
        scale_parts(&parts, scale)
    }

    /// Geometry parts projected to WGS84 for the tile at
    /// `(zoom, column, row)`.
    pub fn geometry_wgs84(
        &self,
        zoom: u64,
        column: u64,
        row: u64,
        clip_buffer: Option<u64>,
    ) -> Vec<Vec<LatLng>> {
        let mut parts = self.geometry_tile();
        if let Some(buffer) = clip_buffer {
            parts = clip_parts(
                parts,
                self.geom_type,
                self.layer.extent() as i64,
                buffer as i64,
            );
        }
        let extent = self.layer.extent();
        parts
            .iter()
            .map(|part| {
                part.iter()
                    .map(|&c| tile_to_lnglat(c, zoom, column, row, extent))
                    .collect()
            })
            .collect()
    }

    /// Resolve the tag pairs against the layer dictionaries. Out-of-range
    /// indices are skipped; they can only occur with validation off.
    pub fn properties(&self) -> AHashMap<&str, &Value> {
        let mut props = AHashMap::with_capacity(self.tags.len() / 2);
        for pair in self.tags.chunks_exact(2) {
            if let (Some(key), Some(value)) = (
                self.layer.keys().get(pair[0] as usize),
                self.layer.values().get(pair[1] as usize),
            ) {
                props.insert(key.as_str(), value);
            }
        }
        props
    }

    /// Look up a single property by key.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.tags.chunks_exact(2).find_map(|pair| {
            let found = self.layer.keys().get(pair[0] as usize)?;
            (found == key)
                .then(|| self.layer.values().get(pair[1] as usize))
                .flatten()
        })
    }
}
