//! The code emitter (spec §4.6): turns a loaded [`crate::model::Schema`]
//! into one self-contained Rust source file — record structs, the `Message`
//! dispatcher, foreign-host constructors, and an embedded round-trip test
//! suite. The emitted file never depends on `codec-core` at runtime: every
//! type it references (`DecodeError`, `HostConstructError`) is defined in
//! its own preamble below.

mod dispatcher;
mod enums;
mod host;
mod naming;
mod record;
mod tests_gen;

use crate::errors::EmitError;
use crate::model::Schema;

const PREAMBLE: &str = r#"// Generated by the codec compiler. Do not edit by hand.
#![allow(dead_code)]

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    BufferTooShort { expected: usize, actual: usize },
    UnknownMessageType { tag: u8 },
    InvalidEnumValue { enum_name: &'static str, value: u8 },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::BufferTooShort { expected, actual } => {
                write!(f, "buffer too short: expected {expected} bytes, got {actual}")
            }
            DecodeError::UnknownMessageType { tag } => write!(f, "unknown message type tag {tag}"),
            DecodeError::InvalidEnumValue { enum_name, value } => {
                write!(f, "invalid value {value} for enum {enum_name}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostConstructError {
    StringTooLong { field: &'static str, max: usize, actual: usize },
    InvalidEnumValue { field: &'static str, value: u8 },
}

impl std::fmt::Display for HostConstructError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostConstructError::StringTooLong { field, max, actual } => {
                write!(f, "field {field} is {actual} bytes, exceeds max {max}")
            }
            HostConstructError::InvalidEnumValue { field, value } => {
                write!(f, "field {field} got invalid enum value {value}")
            }
        }
    }
}

impl std::error::Error for HostConstructError {}
"#;

/// Generates the full contents of the schema's emitted `.rs` file.
///
/// `schema_name` is the base name used for the `.xb` example files the
/// embedded test suite expects to sit alongside the emitted file (see
/// [`crate::examples`] and the `codegen-cli` writer that produces them).
///
/// Returns [`EmitError::EmitFailure`] only when the schema declares no
/// message formats — there would be nothing for a `Message` dispatcher to
/// dispatch over.
pub fn emit_schema(schema: &Schema, schema_name: &str) -> Result<String, EmitError> {
    if schema.message_formats.is_empty() {
        return Err(EmitError::EmitFailure {
            reason: "schema declares no message formats".to_string(),
        });
    }

    let mut out = String::new();
    out.push_str(PREAMBLE);
    out.push('\n');

    for enum_ty in &schema.enums {
        out.push_str(&enums::emit_enum(enum_ty));
        out.push('\n');
    }

    for message in &schema.message_formats {
        out.push_str(&record::emit_record(message));
        out.push('\n');
    }

    out.push_str(&dispatcher::emit_dispatcher(schema));
    out.push('\n');

    out.push_str(host::HOST_STR_HELPER);
    out.push('\n');
    for message in &schema.message_formats {
        out.push_str(&host::emit_host_constructor(message));
        out.push('\n');
    }

    out.push_str(&tests_gen::emit_test_module(schema, schema_name));

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumType, Field, FieldKind, MessageFormat};

    fn schema() -> Schema {
        Schema {
            enums: vec![EnumType {
                name: "Side".to_string(),
                variants: vec![("Buy".to_string(), 1), ("Sell".to_string(), 2)],
            }],
            message_formats: vec![MessageFormat {
                id: None,
                name: "Order".to_string(),
                fields: vec![
                    Field {
                        name: "side".to_string(),
                        kind: FieldKind::Enum("Side".to_string()),
                        required: true,
                    },
                    Field { name: "qty".to_string(), kind: FieldKind::UInt(4), required: true },
                    Field { name: "tag".to_string(), kind: FieldKind::Str(6), required: false },
                ],
            }],
            source_path: None,
        }
    }

    #[test]
    fn rejects_schema_with_no_message_formats() {
        let empty = Schema { enums: vec![], message_formats: vec![], source_path: None };
        let err = emit_schema(&empty, "empty").unwrap_err();
        assert!(matches!(err, EmitError::EmitFailure { .. }));
    }

    #[test]
    fn emits_every_section_for_a_populated_schema() {
        let src = emit_schema(&schema(), "orders").unwrap();
        assert!(src.contains("pub enum DecodeError"));
        assert!(src.contains("pub enum HostConstructError"));
        assert!(src.contains("pub enum Side {"));
        assert!(src.contains("pub struct Order {"));
        assert!(src.contains("pub enum Message {"));
        assert!(src.contains("fn host_str_to_array"));
        assert!(src.contains("pub fn new_order("));
        assert!(src.contains("mod generated_tests"));
    }
}
