mod clip;
mod decode;
mod project;
mod types;

pub use clip::clip_parts;
pub use decode::{decode_commands, scale_parts};
pub use project::{tile_to_lnglat, tile_to_lnglat_checked};
pub use types::{GeomType, LatLng};

pub(crate) use decode::zigzag_decode;
