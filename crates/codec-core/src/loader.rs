//! Schema Model Loader: turns an [`xml_ast::Document`] into a validated
//! [`Schema`], enforcing every invariant from the data model up front so
//! nothing downstream has to re-check them.

use std::collections::HashSet;

use crate::errors::SchemaError;
use crate::ident::is_valid_identifier;
use crate::model::{EnumType, Field, FieldKind, MessageFormat, Schema};
use crate::xml_ast::{AttributeNode, Document};

const MAX_OPTIONAL_FIELDS: usize = 32;
const MAX_MESSAGE_FORMATS: usize = 255;

/// Loads and validates a [`Schema`] from a parsed XML AST.
pub fn load(doc: &Document, source_path: Option<String>) -> Result<Schema, SchemaError> {
    let enums = load_enums(doc)?;
    check_message_format_count(doc)?;
    check_namespace_collisions(doc, &enums)?;

    let message_formats = doc
        .message_formats
        .iter()
        .map(|m| load_message_format(m, &enums))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Schema {
        enums,
        message_formats,
        source_path,
    })
}

fn load_enums(doc: &Document) -> Result<Vec<EnumType>, SchemaError> {
    let mut seen_names = HashSet::new();
    let mut enums = Vec::with_capacity(doc.enum_types.len());

    for enum_node in &doc.enum_types {
        let location = format!("enumType {}", enum_node.name);

        if !is_valid_identifier(&enum_node.name) {
            return Err(SchemaError::SchemaInvalid {
                reason: format!("enum name {:?} is not a valid identifier", enum_node.name),
                location,
            });
        }
        if !seen_names.insert(enum_node.name.to_ascii_lowercase()) {
            return Err(SchemaError::SchemaInvalid {
                reason: format!("duplicate enum name {:?}", enum_node.name),
                location,
            });
        }
        if enum_node.values.is_empty() {
            return Err(SchemaError::SchemaInvalid {
                reason: "enum must declare at least one variant".to_string(),
                location,
            });
        }

        let mut variants = Vec::with_capacity(enum_node.values.len());
        let mut seen_variant_names = HashSet::new();
        let mut seen_values = HashSet::new();

        for variant in &enum_node.values {
            if !is_valid_identifier(&variant.name) {
                return Err(SchemaError::SchemaInvalid {
                    reason: format!("variant name {:?} is not a valid identifier", variant.name),
                    location,
                });
            }
            if !seen_variant_names.insert(variant.name.clone()) {
                return Err(SchemaError::SchemaInvalid {
                    reason: format!("duplicate variant name {:?}", variant.name),
                    location,
                });
            }
            if variant.value < 0 || variant.value > 255 {
                return Err(SchemaError::SchemaInvalid {
                    reason: format!(
                        "variant {:?} value {} out of range 0..=255",
                        variant.name, variant.value
                    ),
                    location,
                });
            }
            let value = variant.value as u8;
            if !seen_values.insert(value) {
                return Err(SchemaError::SchemaInvalid {
                    reason: format!("duplicate variant value {value}"),
                    location,
                });
            }
            variants.push((variant.name.clone(), value));
        }

        enums.push(EnumType {
            name: enum_node.name.clone(),
            variants,
        });
    }

    Ok(enums)
}

fn check_message_format_count(doc: &Document) -> Result<(), SchemaError> {
    if doc.message_formats.len() > MAX_MESSAGE_FORMATS {
        return Err(SchemaError::SchemaInvalid {
            reason: format!(
                "schema declares {} message formats, exceeding the 255-tag limit",
                doc.message_formats.len()
            ),
            location: "messageFormats".to_string(),
        });
    }
    Ok(())
}

/// Enum names and message format names share one case-insensitive
/// namespace (spec §9 "Case handling"): collisions across either set,
/// or within message format names, are rejected.
fn check_namespace_collisions(doc: &Document, enums: &[EnumType]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for e in enums {
        seen.insert(e.name.to_ascii_lowercase());
    }
    for m in &doc.message_formats {
        if !is_valid_identifier(&m.name) {
            return Err(SchemaError::SchemaInvalid {
                reason: format!("message format name {:?} is not a valid identifier", m.name),
                location: format!("messageFormat {}", m.name),
            });
        }
        if !seen.insert(m.name.to_ascii_lowercase()) {
            return Err(SchemaError::SchemaInvalid {
                reason: format!(
                    "message format name {:?} collides with an existing enum or message format name",
                    m.name
                ),
                location: format!("messageFormat {}", m.name),
            });
        }
    }
    Ok(())
}

fn load_message_format(
    node: &crate::xml_ast::MessageFormatNode,
    enums: &[EnumType],
) -> Result<MessageFormat, SchemaError> {
    let mut seen_field_names = HashSet::new();
    let mut optional_count = 0usize;
    let mut fields = Vec::with_capacity(node.attributes.len());

    for attr in &node.attributes {
        let location = format!("messageFormat {}/attribute {}", node.name, attr.name);

        if !is_valid_identifier(&attr.name) {
            return Err(SchemaError::SchemaInvalid {
                reason: format!("field name {:?} is not a valid identifier", attr.name),
                location,
            });
        }
        if !seen_field_names.insert(attr.name.clone()) {
            return Err(SchemaError::SchemaInvalid {
                reason: format!("duplicate field name {:?}", attr.name),
                location,
            });
        }

        let kind = resolve_field_kind(attr, enums, &location)?;

        if !attr.required {
            optional_count += 1;
        }

        fields.push(Field {
            name: attr.name.clone(),
            kind,
            required: attr.required,
        });
    }

    if optional_count > MAX_OPTIONAL_FIELDS {
        return Err(SchemaError::SchemaInvalid {
            reason: format!(
                "message format declares {optional_count} optional fields, exceeding the 32-bit bitmask limit"
            ),
            location: format!("messageFormat {}", node.name),
        });
    }

    Ok(MessageFormat {
        id: node.id.clone(),
        name: node.name.clone(),
        fields,
    })
}

/// Resolves a field's raw type token to a [`FieldKind`] per the table in
/// spec §4.1: case-insensitive on the base token, `length` absent defaults
/// to 1, anything not matching a primitive must match a declared enum.
fn resolve_field_kind(
    attr: &AttributeNode,
    enums: &[EnumType],
    location: &str,
) -> Result<FieldKind, SchemaError> {
    let token = attr.type_token.to_ascii_lowercase();
    let length = attr.length.unwrap_or(1);

    match token.as_str() {
        "int" => {
            check_integer_width(length, location)?;
            Ok(FieldKind::Int(length as u8))
        }
        "uint" => {
            check_integer_width(length, location)?;
            Ok(FieldKind::UInt(length as u8))
        }
        "float" => {
            if length != 4 && length != 8 {
                return Err(SchemaError::SchemaInvalid {
                    reason: format!("float width must be 4 or 8 bytes, got {length}"),
                    location: location.to_string(),
                });
            }
            Ok(FieldKind::Float(length as u8))
        }
        "bool" => Ok(FieldKind::Bool),
        "str" => {
            if length < 1 {
                return Err(SchemaError::SchemaInvalid {
                    reason: "str length must be at least 1 character".to_string(),
                    location: location.to_string(),
                });
            }
            Ok(FieldKind::Str(length))
        }
        _ => {
            if enums.iter().any(|e| e.name == attr.type_token) {
                Ok(FieldKind::Enum(attr.type_token.clone()))
            } else {
                Err(SchemaError::UnsupportedType {
                    token: attr.type_token.clone(),
                    location: location.to_string(),
                })
            }
        }
    }
}

fn check_integer_width(length: usize, location: &str) -> Result<(), SchemaError> {
    if matches!(length, 1 | 2 | 4 | 8) {
        Ok(())
    } else {
        Err(SchemaError::SchemaInvalid {
            reason: format!("integer width must be one of 1, 2, 4, 8 bytes, got {length}"),
            location: location.to_string(),
        })
    }
}
