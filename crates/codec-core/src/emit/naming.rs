//! Maps [`FieldKind`]s to the Rust tokens the emitter writes into generated
//! source: the record's own field type, and the wider type a foreign-host
//! constructor accepts at that field's position.

use crate::ident;
use crate::model::FieldKind;

/// The type the generated record struct stores this field as.
pub fn record_field_type(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Int(1) => "i8".to_string(),
        FieldKind::Int(2) => "i16".to_string(),
        FieldKind::Int(4) => "i32".to_string(),
        FieldKind::Int(8) => "i64".to_string(),
        FieldKind::UInt(1) => "u8".to_string(),
        FieldKind::UInt(2) => "u16".to_string(),
        FieldKind::UInt(4) => "u32".to_string(),
        FieldKind::UInt(8) => "u64".to_string(),
        FieldKind::Float(4) => "f32".to_string(),
        FieldKind::Float(8) => "f64".to_string(),
        FieldKind::Bool => "bool".to_string(),
        FieldKind::Str(n) => format!("[u8; {n}]"),
        FieldKind::Enum(name) => ident::type_name(name),
        other => unreachable!("loader rejects unsupported width combinations: {other:?}"),
    }
}

/// The type a foreign-host constructor accepts for this field: native
/// strings in place of fixed char arrays, raw integers in place of enum
/// variants, otherwise identical to [`record_field_type`].
pub fn host_arg_type(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Str(_) => "&str".to_string(),
        FieldKind::Enum(_) => "u8".to_string(),
        other => record_field_type(other),
    }
}

pub fn enum_type_name(enum_name: &str) -> String {
    ident::type_name(enum_name)
}

pub fn message_type_name(message_name: &str) -> String {
    ident::type_name(message_name)
}

pub fn field_ident(field_name: &str) -> String {
    ident::field_name(field_name)
}

pub fn host_constructor_name(message_name: &str) -> String {
    format!("new_{}", ident::field_name(message_name))
}
