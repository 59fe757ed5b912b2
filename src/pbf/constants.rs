/// Protobuf wire types.
///
/// Wire values 3 and 4 (groups) and 6/7 (reserved) parse to `Unknown` and
/// only fail when a read or skip acts on them. `Undefined` is the cursor
/// state before the first field key has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    /// int32, int64, uint32, uint64, sint32, sint64, bool, enum
    Varint,
    /// double, fixed64, sfixed64
    Fixed64,
    /// string, bytes, embedded messages, packed repeated fields
    Bytes,
    /// float, fixed32, sfixed32
    Fixed32,
    Undefined,
    Unknown(u8),
}

impl WireType {
    pub(crate) fn from_raw(value: u8) -> Self {
        match value {
            0 => WireType::Varint,
            1 => WireType::Fixed64,
            2 => WireType::Bytes,
            5 => WireType::Fixed32,
            other => WireType::Unknown(other),
        }
    }
}

/// Field tags of the top-level Tile message.
pub(crate) mod tile_field {
    pub const LAYER: u32 = 3;
}

/// Field tags of the Layer message.
pub(crate) mod layer_field {
    pub const NAME: u32 = 1;
    pub const FEATURE: u32 = 2;
    pub const KEY: u32 = 3;
    pub const VALUE: u32 = 4;
    pub const EXTENT: u32 = 5;
    pub const VERSION: u32 = 15;
}

/// Field tags of the Feature message.
pub(crate) mod feature_field {
    pub const ID: u32 = 1;
    pub const TAGS: u32 = 2;
    pub const TYPE: u32 = 3;
    pub const GEOMETRY: u32 = 4;
    pub const RASTER: u32 = 5;
}

/// Field tags of the Value message.
pub(crate) mod value_field {
    pub const STRING: u32 = 1;
    pub const FLOAT: u32 = 2;
    pub const DOUBLE: u32 = 3;
    pub const INT: u32 = 4;
    pub const UINT: u32 = 5;
    pub const SINT: u32 = 6;
    pub const BOOL: u32 = 7;
}
