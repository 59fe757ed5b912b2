#![doc = "Lazy decoding of Mapbox Vector Tiles"]
mod error;
mod geometry;
mod pbf;
mod tile;

#[doc(inline)]
pub use error::DecodeError;

#[doc(inline)]
pub use tile::{Feature, Layer, Value, VectorTile};

#[doc(inline)]
pub use geometry::{
    GeomType, LatLng, clip_parts, decode_commands, scale_parts, tile_to_lnglat,
    tile_to_lnglat_checked,
};

#[doc(inline)]
pub use pbf::{PbfReader, WireType};
