pub(crate) mod constants;
mod reader;

pub use constants::WireType;
pub use reader::PbfReader;
