//! Minimal protobuf encoding helpers for building tile fixtures. The
//! library itself never encodes; this is test scaffolding only.
#![allow(dead_code)]

pub fn varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
}

pub fn key(out: &mut Vec<u8>, tag: u32, wire: u8) {
    varint(out, (u64::from(tag) << 3) | u64::from(wire));
}

pub fn varint_field(out: &mut Vec<u8>, tag: u32, value: u64) {
    key(out, tag, 0);
    varint(out, value);
}

pub fn bytes_field(out: &mut Vec<u8>, tag: u32, data: &[u8]) {
    key(out, tag, 2);
    varint(out, data.len() as u64);
    out.extend_from_slice(data);
}

pub fn string_field(out: &mut Vec<u8>, tag: u32, value: &str) {
    bytes_field(out, tag, value.as_bytes());
}

pub fn packed_field(out: &mut Vec<u8>, tag: u32, values: &[u32]) {
    let mut packed = Vec::new();
    for &value in values {
        varint(&mut packed, u64::from(value));
    }
    bytes_field(out, tag, &packed);
}

pub fn zigzag64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

pub fn zz(value: i64) -> u32 {
    zigzag64(value) as u32
}

pub const fn cmd(command: u32, count: u32) -> u32 {
    (count << 3) | command
}

// Value messages

pub fn string_value(value: &str) -> Vec<u8> {
    let mut out = Vec::new();
    string_field(&mut out, 1, value);
    out
}

pub fn float_value(value: f32) -> Vec<u8> {
    let mut out = Vec::new();
    key(&mut out, 2, 5);
    out.extend_from_slice(&value.to_le_bytes());
    out
}

pub fn double_value(value: f64) -> Vec<u8> {
    let mut out = Vec::new();
    key(&mut out, 3, 1);
    out.extend_from_slice(&value.to_le_bytes());
    out
}

pub fn int_value(value: i64) -> Vec<u8> {
    let mut out = Vec::new();
    varint_field(&mut out, 4, value as u64);
    out
}

pub fn uint_value(value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    varint_field(&mut out, 5, value);
    out
}

pub fn sint_value(value: i64) -> Vec<u8> {
    let mut out = Vec::new();
    varint_field(&mut out, 6, zigzag64(value));
    out
}

pub fn bool_value(value: bool) -> Vec<u8> {
    let mut out = Vec::new();
    varint_field(&mut out, 7, u64::from(value));
    out
}

// Feature messages

pub fn feature(id: u64, tags: &[u32], geom_type: u64, geometry: &[u32]) -> Vec<u8> {
    let mut out = Vec::new();
    varint_field(&mut out, 1, id);
    packed_field(&mut out, 2, tags);
    varint_field(&mut out, 3, geom_type);
    packed_field(&mut out, 4, geometry);
    out
}

pub fn point_feature(id: u64, tags: &[u32], x: i64, y: i64) -> Vec<u8> {
    feature(id, tags, 1, &[cmd(1, 1), zz(x), zz(y)])
}

// Layer and tile messages

pub fn layer(name: &str, keys: &[&str], values: &[Vec<u8>], features: &[Vec<u8>]) -> Vec<u8> {
    layer_v(name, 2, 4096, keys, values, features)
}

pub fn layer_v(
    name: &str,
    version: u64,
    extent: u64,
    keys: &[&str],
    values: &[Vec<u8>],
    features: &[Vec<u8>],
) -> Vec<u8> {
    let mut out = Vec::new();
    varint_field(&mut out, 15, version);
    string_field(&mut out, 1, name);
    varint_field(&mut out, 5, extent);
    for k in keys {
        string_field(&mut out, 3, k);
    }
    for v in values {
        bytes_field(&mut out, 4, v);
    }
    for f in features {
        bytes_field(&mut out, 2, f);
    }
    out
}

pub fn tile(layers: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    for l in layers {
        bytes_field(&mut out, 3, l);
    }
    out
}
