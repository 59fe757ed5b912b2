use ahash::AHashMap;
use tracing::debug;

use crate::error::DecodeError;
use crate::pbf::PbfReader;
use crate::pbf::constants::{layer_field, tile_field};

use super::layer::Layer;

/// Gzip magic; compressed tiles must be inflated by the caller first.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decoded handle over one raw tile buffer.
///
/// Construction runs the cheap first pass only: each layer's name and raw
/// byte range. Layer metadata, attribute dictionaries, features and
/// geometry are all decoded lazily when asked for.
#[derive(Debug)]
pub struct VectorTile<'a> {
    names: Vec<&'a str>,
    layers: AHashMap<&'a str, &'a [u8]>,
    validate: bool,
}

impl<'a> VectorTile<'a> {
    /// Index the layers of a raw (un-gzipped) tile buffer.
    ///
    /// With `validate` set, structural problems (unknown fields, missing or
    /// duplicate layer names, bad versions, ...) are errors; without it the
    /// decoder is best-effort and only wire-level problems fail. When two
    /// layers share a name and validation is off, the later payload wins
    /// and the name keeps its first position in the ordering.
    pub fn new(data: &'a [u8], validate: bool) -> Result<Self, DecodeError> {
        if data.len() >= 2 && data[..2] == GZIP_MAGIC {
            return Err(DecodeError::ZippedInput);
        }
        let mut tile = VectorTile {
            names: Vec::new(),
            layers: AHashMap::new(),
            validate,
        };
        let mut reader = PbfReader::new(data);
        while reader.next()? {
            if reader.tag() != tile_field::LAYER {
                if validate {
                    return Err(DecodeError::UnknownTileField(reader.tag()));
                }
                reader.skip()?;
                continue;
            }
            let bytes = reader.view()?;
            let name = layer_name(bytes)?;
            if validate {
                match name {
                    None | Some("") => return Err(DecodeError::MissingLayerName),
                    Some(name) if tile.layers.contains_key(name) => {
                        return Err(DecodeError::DuplicateLayerName(name.to_owned()));
                    }
                    Some(_) => {}
                }
            }
            // a nameless layer can never be requested; drop it outright
            let Some(name) = name else { continue };
            if tile.layers.insert(name, bytes).is_none() {
                tile.names.push(name);
            }
        }
        debug!(layers = tile.names.len(), "indexed tile");
        Ok(tile)
    }

    /// Layer names in encounter order.
    #[inline]
    pub fn layer_names(&self) -> &[&'a str] {
        &self.names
    }

    /// Decode a layer by name. `Ok(None)` when the tile has no such layer.
    pub fn layer(&self, name: &str) -> Result<Option<Layer<'a>>, DecodeError> {
        self.layers
            .get(name)
            .map(|&data| Layer::decode(data, self.validate))
            .transpose()
    }
}

/// Minimal nested scan of a layer message: extract the name, skip everything
/// else without decoding it.
fn layer_name(data: &[u8]) -> Result<Option<&str>, DecodeError> {
    let mut reader = PbfReader::new(data);
    let mut name = None;
    while reader.next()? {
        if reader.tag() == layer_field::NAME {
            name = Some(reader.string()?);
        } else {
            reader.skip()?;
        }
    }
    Ok(name)
}
