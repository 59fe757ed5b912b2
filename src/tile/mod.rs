mod feature;
mod geojson;
mod layer;
mod reader;
mod value;

pub use feature::Feature;
pub use layer::Layer;
pub use reader::VectorTile;
pub use value::Value;
