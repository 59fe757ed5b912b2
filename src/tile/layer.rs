use ahash::AHashSet;
use tracing::trace;

use crate::error::DecodeError;
use crate::geometry::zigzag_decode;
use crate::pbf::PbfReader;
use crate::pbf::constants::{layer_field, value_field};

use super::feature::Feature;
use super::value::Value;

/// A single named layer of a tile.
///
/// Metadata (name, version, extent, attribute dictionaries) is decoded in
/// one pass over the layer's byte range; features stay as raw byte ranges
/// until requested individually through [`feature`](Self::feature).
#[derive(Debug)]
pub struct Layer<'a> {
    name: String,
    version: u64,
    extent: u64,
    keys: Vec<String>,
    values: Vec<Value>,
    features: Vec<&'a [u8]>,
    validate: bool,
}

impl<'a> Layer<'a> {
    pub(crate) fn decode(data: &'a [u8], validate: bool) -> Result<Self, DecodeError> {
        let mut layer = Layer {
            name: String::new(),
            version: 0,
            extent: 0,
            keys: Vec::new(),
            values: Vec::new(),
            features: Vec::new(),
            validate,
        };
        let mut reader = PbfReader::new(data);
        while reader.next()? {
            match reader.tag() {
                layer_field::VERSION => layer.version = reader.varint()?,
                layer_field::NAME => layer.name = reader.string()?.to_owned(),
                layer_field::EXTENT => layer.extent = reader.varint()?,
                layer_field::KEY => layer.keys.push(reader.string()?.to_owned()),
                layer_field::VALUE => {
                    if let Some(value) = decode_value(reader.view()?)? {
                        layer.values.push(value);
                    }
                }
                layer_field::FEATURE => layer.features.push(reader.view()?),
                tag if validate => {
                    return Err(DecodeError::UnknownLayerField {
                        layer: layer.name,
                        tag,
                    });
                }
                _ => reader.skip()?,
            }
        }
        if validate {
            layer.check()?;
        }
        trace!(
            layer = %layer.name,
            features = layer.features.len(),
            "decoded layer metadata"
        );
        Ok(layer)
    }

    fn check(&self) -> Result<(), DecodeError> {
        if self.name.is_empty() {
            return Err(DecodeError::MissingLayerName);
        }
        if self.version != 2 {
            return Err(DecodeError::UnsupportedVersion {
                layer: self.name.clone(),
                version: self.version,
            });
        }
        if self.extent == 0 {
            return Err(DecodeError::MissingExtent(self.name.clone()));
        }
        if self.features.is_empty() {
            return Err(DecodeError::NoFeatures(self.name.clone()));
        }
        let mut seen = AHashSet::with_capacity(self.values.len());
        for value in &self.values {
            if !seen.insert(value.key()) {
                return Err(DecodeError::DuplicateValues(self.name.clone()));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Tile-local coordinate span, e.g. 4096.
    #[inline]
    pub fn extent(&self) -> u64 {
        self.extent
    }

    /// Ordered attribute keys; features reference these by index.
    #[inline]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Ordered attribute values; features reference these by index.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[inline]
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Decode one feature of this layer.
    pub fn feature(&self, index: usize) -> Result<Feature<'_>, DecodeError> {
        let data = *self
            .features
            .get(index)
            .ok_or(DecodeError::FeatureIndexOutOfRange {
                index,
                count: self.features.len(),
            })?;
        Feature::decode(data, self, self.validate)
    }
}

/// Decode one Value message: a single field among the seven defined kinds.
/// An empty message decodes to nothing (and is not appended); an undefined
/// field tag is a hard error even without validation.
fn decode_value(data: &[u8]) -> Result<Option<Value>, DecodeError> {
    let mut reader = PbfReader::new(data);
    let mut value = None;
    while reader.next()? {
        value = Some(match reader.tag() {
            value_field::STRING => Value::Str(reader.string()?.to_owned()),
            value_field::FLOAT => Value::F32(reader.fixed32()?),
            value_field::DOUBLE => Value::F64(reader.fixed64()?),
            value_field::INT => Value::I64(reader.varint()? as i64),
            value_field::UINT => Value::U64(reader.varint()?),
            value_field::SINT => Value::S64(zigzag_decode(reader.varint()?)),
            value_field::BOOL => Value::Bool(reader.varint()? == 1),
            tag => return Err(DecodeError::UnimplementedValueType(tag)),
        });
    }
    Ok(value)
}
