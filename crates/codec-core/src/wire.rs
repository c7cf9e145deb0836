//! The wire codec specification's hand-written native reader/writer.
//!
//! Not part of the emitted code — this is the oracle the emitter's output
//! must agree with byte-for-byte. It exists so the generator's test suite
//! can assert exact framing, field encoding, and bitmask behavior without
//! compiling the generated Rust text itself.

use std::collections::BTreeMap;

use crate::errors::WireError;
use crate::model::{FieldKind, MessageFormat, Schema};
use crate::typesys;

/// `[ msg_size: u32 BE ][ msg_type: u8 ][ bitmask: u32 BE ]`
pub const HEADER_LEN: usize = 9;

/// A decoded or to-be-encoded field value, independent of its declared width.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Str(String),
    /// Raw declared integer value of an enum variant.
    Enum(u8),
}

/// A message instance: field name to value, present only for fields that
/// are on the wire (required fields, plus whichever optional fields are set).
pub type Instance = BTreeMap<String, Value>;

/// Computes the presence bitmask for `instance` against `message`'s
/// declared optional-field order (bit 0 = first optional field).
pub fn bitmask_for(message: &MessageFormat, instance: &Instance) -> u32 {
    let mut mask = 0u32;
    for (bit, field) in message.optional_fields().enumerate() {
        if instance.contains_key(&field.name) {
            mask |= 1 << bit;
        }
    }
    mask
}

/// Serializes `instance` as `message` into a fully framed buffer.
///
/// Panics if a required field is missing from `instance` — that is a
/// caller contract violation, not a wire-format error (spec §9: "required
/// field absence ... cannot be represented" applies to decoding malformed
/// bytes, not to constructing a value in the first place).
pub fn serialize_message(
    schema: &Schema,
    message: &MessageFormat,
    instance: &Instance,
) -> Vec<u8> {
    let mut payload = Vec::with_capacity(typesys::max_payload_width(message));

    for field in &message.fields {
        match instance.get(&field.name) {
            Some(value) => encode_value(&field.kind, value, &mut payload),
            None if field.required => {
                panic!("required field {:?} missing from instance", field.name)
            }
            None => {}
        }
    }

    let bitmask = bitmask_for(message, instance);
    let tag = schema
        .wire_type_tag(&message.name)
        .expect("message format must belong to schema");
    let msg_size = HEADER_LEN + payload.len();

    let mut buf = Vec::with_capacity(msg_size);
    buf.extend_from_slice(&(msg_size as u32).to_be_bytes());
    buf.push(tag);
    buf.extend_from_slice(&bitmask.to_be_bytes());
    buf.extend_from_slice(&payload);
    buf
}

/// Reads a framed message from `buf`, dispatching on the header's
/// `msg_type` tag. Returns the message format's name plus its decoded
/// instance. Bounds-checks every field read explicitly; never panics on
/// malformed input.
pub fn deserialize_message(schema: &Schema, buf: &[u8]) -> Result<(String, Instance), WireError> {
    if buf.len() < HEADER_LEN {
        return Err(WireError::BufferTooShort {
            expected: HEADER_LEN,
            actual: buf.len(),
        });
    }

    let msg_size = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
    let tag = buf[4];
    let bitmask = u32::from_be_bytes([buf[5], buf[6], buf[7], buf[8]]);

    if buf.len() < msg_size {
        return Err(WireError::BufferTooShort {
            expected: msg_size,
            actual: buf.len(),
        });
    }

    let message = schema
        .message_format_by_tag(tag)
        .ok_or(WireError::UnknownMessageType { tag })?;

    let mut offset = HEADER_LEN;
    let mut optional_index = 0u32;
    let mut instance = Instance::new();

    for field in &message.fields {
        let present = if field.required {
            true
        } else {
            let bit_set = bitmask & (1 << optional_index) != 0;
            optional_index += 1;
            bit_set
        };

        if present {
            let (value, new_offset) = decode_value(&field.kind, schema, buf, offset)?;
            instance.insert(field.name.clone(), value);
            offset = new_offset;
        }
    }

    Ok((message.name.clone(), instance))
}

fn encode_value(kind: &FieldKind, value: &Value, buf: &mut Vec<u8>) {
    match (kind, value) {
        (FieldKind::Int(n), Value::Int(v)) => encode_be_truncated(*v as u64, *n, buf),
        (FieldKind::UInt(n), Value::UInt(v)) => encode_be_truncated(*v, *n, buf),
        (FieldKind::Float(4), Value::Float(v)) => buf.extend_from_slice(&(*v as f32).to_be_bytes()),
        (FieldKind::Float(_), Value::Float(v)) => buf.extend_from_slice(&v.to_be_bytes()),
        (FieldKind::Bool, Value::Bool(v)) => buf.push(if *v { 0x01 } else { 0x00 }),
        (FieldKind::Str(n), Value::Str(s)) => encode_str(s, *n, buf),
        (FieldKind::Enum(_), Value::Enum(raw)) => buf.push(*raw),
        (kind, value) => panic!("value {value:?} does not match field kind {kind:?}"),
    }
}

fn encode_be_truncated(value: u64, width: u8, buf: &mut Vec<u8>) {
    let full = value.to_be_bytes();
    buf.extend_from_slice(&full[8 - width as usize..]);
}

fn encode_str(s: &str, width: usize, buf: &mut Vec<u8>) {
    let mut bytes = vec![b' '; width];
    for (i, c) in s.chars().take(width).enumerate() {
        bytes[i] = c as u32 as u8;
    }
    buf.extend_from_slice(&bytes);
}

fn decode_value(
    kind: &FieldKind,
    schema: &Schema,
    buf: &[u8],
    offset: usize,
) -> Result<(Value, usize), WireError> {
    let width = typesys::kind_width(kind);
    if offset + width > buf.len() {
        return Err(WireError::BufferTooShort {
            expected: offset + width,
            actual: buf.len(),
        });
    }
    let bytes = &buf[offset..offset + width];

    let value = match kind {
        FieldKind::Int(n) => Value::Int(sign_extend(be_bytes_to_u64(bytes), *n as u32 * 8)),
        FieldKind::UInt(_) => Value::UInt(be_bytes_to_u64(bytes)),
        FieldKind::Float(4) => {
            Value::Float(f32::from_be_bytes(bytes.try_into().unwrap()) as f64)
        }
        FieldKind::Float(_) => Value::Float(f64::from_be_bytes(bytes.try_into().unwrap())),
        FieldKind::Bool => Value::Bool(bytes[0] != 0),
        FieldKind::Str(_) => Value::Str(bytes.iter().map(|&b| b as char).collect()),
        FieldKind::Enum(name) => {
            let byte = bytes[0];
            let enum_ty = schema
                .enum_by_name(name)
                .expect("enum field must reference a declared enum");
            if enum_ty.name_of(byte).is_none() {
                return Err(WireError::InvalidEnumValue {
                    enum_name: name.clone(),
                    value: byte,
                });
            }
            Value::Enum(byte)
        }
    };

    Ok((value, offset + width))
}

fn be_bytes_to_u64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
}

fn sign_extend(value: u64, bits: u32) -> i64 {
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumType, Field, FieldKind};

    fn ping_schema() -> Schema {
        Schema {
            enums: vec![],
            message_formats: vec![MessageFormat {
                id: None,
                name: "Ping".to_string(),
                fields: vec![Field {
                    name: "seq".to_string(),
                    kind: FieldKind::UInt(4),
                    required: true,
                }],
            }],
            source_path: None,
        }
    }

    fn order_schema() -> Schema {
        Schema {
            enums: vec![],
            message_formats: vec![MessageFormat {
                id: None,
                name: "Order".to_string(),
                fields: vec![
                    Field { name: "side".to_string(), kind: FieldKind::Int(1), required: true },
                    Field { name: "qty".to_string(), kind: FieldKind::UInt(4), required: true },
                    Field { name: "tag".to_string(), kind: FieldKind::Str(8), required: false },
                ],
            }],
            source_path: None,
        }
    }

    fn paint_schema() -> Schema {
        Schema {
            enums: vec![EnumType {
                name: "Color".to_string(),
                variants: vec![
                    ("Red".to_string(), 1),
                    ("Green".to_string(), 2),
                    ("Blue".to_string(), 3),
                ],
            }],
            message_formats: vec![MessageFormat {
                id: None,
                name: "Paint".to_string(),
                fields: vec![Field {
                    name: "c".to_string(),
                    kind: FieldKind::Enum("Color".to_string()),
                    required: true,
                }],
            }],
            source_path: None,
        }
    }

    // Scenario A, spec §8.
    #[test]
    fn scenario_a_ping() {
        let schema = ping_schema();
        let message = &schema.message_formats[0];
        let mut instance = Instance::new();
        instance.insert("seq".to_string(), Value::UInt(0x0A0B0C0D));

        let bytes = serialize_message(&schema, message, &instance);
        assert_eq!(
            bytes,
            vec![0x00, 0x00, 0x00, 0x0D, 0x01, 0x00, 0x00, 0x00, 0x00, 0x0A, 0x0B, 0x0C, 0x0D]
        );

        let (name, decoded) = deserialize_message(&schema, &bytes).unwrap();
        assert_eq!(name, "Ping");
        assert_eq!(decoded, instance);
    }

    // Scenario B, present optional field.
    #[test]
    fn scenario_b_order_present_tag() {
        let schema = order_schema();
        let message = &schema.message_formats[0];
        let mut instance = Instance::new();
        instance.insert("side".to_string(), Value::Int(-1));
        instance.insert("qty".to_string(), Value::UInt(100));
        instance.insert("tag".to_string(), Value::Str("ABC".to_string()));

        let bytes = serialize_message(&schema, message, &instance);
        let mut expected = vec![0x00, 0x00, 0x00, 0x16, 0x01, 0x00, 0x00, 0x00, 0x01];
        expected.extend_from_slice(&[0xFF, 0x00, 0x00, 0x00, 0x64]);
        expected.extend_from_slice(b"ABC     ");
        assert_eq!(bytes, expected);
        assert_eq!(bytes.len(), 22);

        let (_, decoded) = deserialize_message(&schema, &bytes).unwrap();
        assert_eq!(decoded, instance);
    }

    // Scenario B, absent optional field.
    #[test]
    fn scenario_b_order_absent_tag() {
        let schema = order_schema();
        let message = &schema.message_formats[0];
        let mut instance = Instance::new();
        instance.insert("side".to_string(), Value::Int(1));
        instance.insert("qty".to_string(), Value::UInt(1));

        let bytes = serialize_message(&schema, message, &instance);
        assert_eq!(
            bytes,
            vec![0x00, 0x00, 0x00, 0x0E, 0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01]
        );
        assert_eq!(bytes.len(), 14);

        let (_, decoded) = deserialize_message(&schema, &bytes).unwrap();
        assert_eq!(decoded, instance);
        assert!(!decoded.contains_key("tag"));
    }

    // Scenario C: enum encode/decode and rejection of unknown variant byte.
    #[test]
    fn scenario_c_paint_enum() {
        let schema = paint_schema();
        let message = &schema.message_formats[0];
        let mut instance = Instance::new();
        instance.insert("c".to_string(), Value::Enum(3));

        let bytes = serialize_message(&schema, message, &instance);
        assert_eq!(
            bytes,
            vec![0x00, 0x00, 0x00, 0x0A, 0x01, 0x00, 0x00, 0x00, 0x00, 0x03]
        );

        let mut bad = bytes.clone();
        *bad.last_mut().unwrap() = 7;
        assert_eq!(
            deserialize_message(&schema, &bad),
            Err(WireError::InvalidEnumValue { enum_name: "Color".to_string(), value: 7 })
        );
    }

    #[test]
    fn unknown_message_type_is_rejected() {
        let schema = ping_schema();
        let mut buf = vec![0u8; 9];
        buf[4] = 0xFF;
        assert_eq!(
            deserialize_message(&schema, &buf),
            Err(WireError::UnknownMessageType { tag: 0xFF })
        );

        buf[4] = 0x00;
        assert_eq!(
            deserialize_message(&schema, &buf),
            Err(WireError::UnknownMessageType { tag: 0x00 })
        );
    }

    #[test]
    fn short_header_buffer_is_rejected() {
        let schema = ping_schema();
        let buf = vec![0u8; 8];
        assert_eq!(
            deserialize_message(&schema, &buf),
            Err(WireError::BufferTooShort { expected: 9, actual: 8 })
        );
    }

    #[test]
    fn short_payload_buffer_is_rejected_mid_field() {
        let schema = ping_schema();
        // Header claims a 13-byte frame but only 11 bytes are supplied.
        let buf = vec![0x00, 0x00, 0x00, 0x0D, 0x01, 0x00, 0x00, 0x00, 0x00, 0x0A, 0x0B];
        assert!(matches!(
            deserialize_message(&schema, &buf),
            Err(WireError::BufferTooShort { .. })
        ));
    }

    #[test]
    fn frame_size_and_tag_properties_hold_for_every_message() {
        for (schema, instance_fn) in [
            (ping_schema(), {
                fn f() -> Instance {
                    let mut i = Instance::new();
                    i.insert("seq".to_string(), Value::UInt(42));
                    i
                }
                f as fn() -> Instance
            }),
            (order_schema(), {
                fn f() -> Instance {
                    let mut i = Instance::new();
                    i.insert("side".to_string(), Value::Int(-2));
                    i.insert("qty".to_string(), Value::UInt(7));
                    i
                }
                f as fn() -> Instance
            }),
        ] {
            let message = &schema.message_formats[0];
            let instance = instance_fn();
            let bytes = serialize_message(&schema, message, &instance);

            let frame_size = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
            assert_eq!(frame_size, bytes.len());
            assert_eq!(bytes[4], schema.wire_type_tag(&message.name).unwrap());
        }
    }
}
