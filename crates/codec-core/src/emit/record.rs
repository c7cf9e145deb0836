//! Emits the per-message record type and its four operations (spec §4.4):
//! `MAX_PAYLOAD_SIZE`, `bitmask`, `serialize_payload`, `deserialize`.

use std::fmt::Write as _;

use crate::emit::naming;
use crate::model::{Field, FieldKind, MessageFormat};
use crate::typesys;

pub fn emit_record(message: &MessageFormat) -> String {
    let type_name = naming::message_type_name(&message.name);
    let mut out = String::new();

    let _ = writeln!(out, "#[derive(Debug, Clone, PartialEq)]");
    let _ = writeln!(out, "pub struct {type_name} {{");
    for field in &message.fields {
        let field_type = naming::record_field_type(&field.kind);
        let ty = if field.required { field_type } else { format!("Option<{field_type}>") };
        let _ = writeln!(out, "    pub {}: {ty},", naming::field_ident(&field.name));
    }
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);

    let _ = writeln!(out, "impl {type_name} {{");
    let _ = writeln!(
        out,
        "    pub const MAX_PAYLOAD_SIZE: usize = {};",
        typesys::max_payload_width(message)
    );
    let _ = writeln!(out);

    emit_bitmask(&mut out, message);
    let _ = writeln!(out);
    emit_serialize_payload(&mut out, message);
    let _ = writeln!(out);
    emit_deserialize(&mut out, message, &type_name);

    let _ = writeln!(out, "}}");
    out
}

fn emit_bitmask(out: &mut String, message: &MessageFormat) {
    let _ = writeln!(out, "    pub fn bitmask(&self) -> u32 {{");
    let _ = writeln!(out, "        let mut mask: u32 = 0;");
    for (bit, field) in message.optional_fields().enumerate() {
        let _ = writeln!(
            out,
            "        if self.{}.is_some() {{ mask |= 1 << {bit}; }}",
            naming::field_ident(&field.name)
        );
    }
    let _ = writeln!(out, "        mask");
    let _ = writeln!(out, "    }}");
}

fn emit_serialize_payload(out: &mut String, message: &MessageFormat) {
    let _ = writeln!(out, "    pub fn serialize_payload(&self, buf: &mut Vec<u8>) {{");
    for field in &message.fields {
        let accessor = format!("self.{}", naming::field_ident(&field.name));
        if field.required {
            let _ = writeln!(out, "        {}", write_expr(&accessor, &field.kind, true));
        } else {
            let _ = writeln!(out, "        if let Some(value) = &{accessor} {{");
            let _ = writeln!(out, "            {}", write_expr("value", &field.kind, false));
            let _ = writeln!(out, "        }}");
        }
    }
    let _ = writeln!(out, "    }}");
}

/// `is_required` distinguishes an owned accessor (`self.field`, for a
/// required field) from a borrowed one (`value: &T`, bound by the `Some`
/// arm for an optional field) — `Bool` and `Str` need different deref/ref
/// handling in each case.
fn write_expr(accessor: &str, kind: &FieldKind, is_required: bool) -> String {
    match kind {
        FieldKind::Int(_) | FieldKind::UInt(_) | FieldKind::Float(_) => {
            format!("buf.extend_from_slice(&{accessor}.to_be_bytes());")
        }
        FieldKind::Bool => {
            let cond = if is_required { accessor.to_string() } else { format!("*{accessor}") };
            format!("buf.push(if {cond} {{ 0x01 }} else {{ 0x00 }});")
        }
        FieldKind::Str(_) => {
            let slice = if is_required { format!("&{accessor}") } else { accessor.to_string() };
            format!("buf.extend_from_slice({slice});")
        }
        FieldKind::Enum(_) => format!("buf.push({accessor}.to_u8());"),
    }
}

fn emit_deserialize(out: &mut String, message: &MessageFormat, type_name: &str) {
    let _ = writeln!(out, "    pub fn deserialize(buf: &[u8]) -> Result<Self, DecodeError> {{");
    let _ = writeln!(out, "        if buf.len() < 9 {{");
    let _ = writeln!(
        out,
        "            return Err(DecodeError::BufferTooShort {{ expected: 9, actual: buf.len() }});"
    );
    let _ = writeln!(out, "        }}");
    let _ = writeln!(
        out,
        "        let msg_size = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;"
    );
    let _ = writeln!(out, "        if buf.len() < msg_size {{");
    let _ = writeln!(
        out,
        "            return Err(DecodeError::BufferTooShort {{ expected: msg_size, actual: buf.len() }});"
    );
    let _ = writeln!(out, "        }}");
    let _ = writeln!(
        out,
        "        let bitmask = u32::from_be_bytes([buf[5], buf[6], buf[7], buf[8]]);"
    );
    let _ = writeln!(out, "        let mut offset: usize = 9;");
    let _ = writeln!(out);

    let mut optional_bit = 0usize;
    for field in &message.fields {
        let name = naming::field_ident(&field.name);
        if field.required {
            let _ = writeln!(out, "        let {name} = {};", decode_block(&field.kind));
        } else {
            let _ = writeln!(out, "        let {name} = if bitmask & (1 << {optional_bit}) != 0 {{");
            let _ = writeln!(out, "            Some({})", decode_block(&field.kind));
            let _ = writeln!(out, "        }} else {{");
            let _ = writeln!(out, "            None");
            let _ = writeln!(out, "        }};");
            optional_bit += 1;
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "        Ok({type_name} {{");
    for field in &message.fields {
        let name = naming::field_ident(&field.name);
        let _ = writeln!(out, "            {name},");
    }
    let _ = writeln!(out, "        }})");
    let _ = writeln!(out, "    }}");
}

/// A self-bounds-checked block expression decoding one field starting at
/// the running `offset`, and advancing `offset` past it.
fn decode_block(kind: &FieldKind) -> String {
    let width = crate::typesys::kind_width(kind);
    let decode_expr = match kind {
        FieldKind::Int(_) | FieldKind::UInt(_) | FieldKind::Float(_) => format!(
            "{}::from_be_bytes(buf[offset..offset + {width}].try_into().unwrap())",
            naming::record_field_type(kind)
        ),
        FieldKind::Bool => "buf[offset] != 0".to_string(),
        FieldKind::Str(_) => {
            format!("buf[offset..offset + {width}].try_into().unwrap()")
        }
        FieldKind::Enum(name) => {
            format!("{}::from_u8(buf[offset])?", naming::enum_type_name(name))
        }
    };

    format!(
        "{{\n            if offset + {width} > buf.len() {{\n                return Err(DecodeError::BufferTooShort {{ expected: offset + {width}, actual: buf.len() }});\n            }}\n            let value = {decode_expr};\n            offset += {width};\n            value\n        }}"
    )
}
