use thiserror::Error;

use crate::pbf::WireType;

/// Error type for tile decoding.
///
/// Cursor-level errors (varint, buffer bounds, wire types, tag ranges) are
/// always raised; structural errors are only raised when the tile was opened
/// with validation enabled, except where noted.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Input starts with the gzip magic bytes. The caller must inflate the
    /// buffer before decoding; this library never decompresses.
    #[error("tile data is gzip compressed; inflate it before decoding")]
    ZippedInput,

    #[error("varint does not terminate within 10 bytes")]
    MalformedVarint,

    #[error("unexpected end of buffer at offset {offset} (needed {needed} more bytes)")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("field {tag} has wire type {actual:?}, expected {expected:?}")]
    WrongWireType {
        tag: u32,
        expected: WireType,
        actual: WireType,
    },

    /// `skip` was called before any field key was read.
    #[error("no field key has been read yet")]
    UndefinedWireType,

    #[error("unknown wire type {0}")]
    UnknownWireType(u8),

    #[error("field tag {0} outside the valid protobuf range")]
    TagOutOfRange(u64),

    #[error("string field is not valid UTF-8")]
    InvalidString(#[from] std::str::Utf8Error),

    /// Raised regardless of the validation flag: an attribute value kind
    /// outside the seven defined by the tile specification is never skipped.
    #[error("attribute value has unsupported field tag {0}")]
    UnimplementedValueType(u32),

    #[error("unknown tile field {0}")]
    UnknownTileField(u32),

    #[error("layer `{layer}`: unknown field {tag}")]
    UnknownLayerField { layer: String, tag: u32 },

    #[error("layer `{layer}`: unknown feature field {tag}")]
    UnknownFeatureField { layer: String, tag: u32 },

    #[error("layer is missing a name")]
    MissingLayerName,

    #[error("duplicate layer name `{0}`")]
    DuplicateLayerName(String),

    #[error("layer `{layer}` has version {version}; only version 2 is supported")]
    UnsupportedVersion { layer: String, version: u64 },

    #[error("layer `{0}` has no extent")]
    MissingExtent(String),

    #[error("layer `{0}` has no features")]
    NoFeatures(String),

    #[error("layer `{0}` contains duplicate attribute values")]
    DuplicateValues(String),

    #[error("layer `{layer}`: unknown geometry type {value}")]
    UnknownGeomType { layer: String, value: u64 },

    /// Raised regardless of the validation flag: a feature may carry at most
    /// one geometry field.
    #[error("layer `{0}`: feature already has a geometry")]
    DuplicateGeometry(String),

    #[error("layer `{0}`: feature is missing a geometry type")]
    MissingGeomType(String),

    #[error("layer `{0}`: feature has no geometry")]
    MissingGeometry(String),

    #[error("layer `{0}`: odd number of feature tag indices")]
    UnevenTags(String),

    #[error("layer `{layer}`: {kind} index {index} exceeds table of length {len}")]
    TagIndexOutOfRange {
        layer: String,
        kind: &'static str,
        index: u32,
        len: usize,
    },

    #[error("feature index {index} out of range ({count} features)")]
    FeatureIndexOutOfRange { index: usize, count: usize },

    #[error("scaled coordinate {0} cannot be represented in the requested numeric type")]
    CoordinateOverflow(f64),

    #[error("projected {axis} {value} is outside the valid range")]
    ProjectionOutOfRange { axis: &'static str, value: f64 },
}
