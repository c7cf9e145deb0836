//! Emits the round-trip test suite embedded in the generated codec: one
//! `#[test]` per message format, each constructing the same deterministic
//! example instance [`crate::examples`] would hand to the `.xb` writer, and
//! asserting it survives `Message::serialize` -> `Message::deserialize`.

use std::fmt::Write as _;

use crate::emit::naming;
use crate::examples;
use crate::model::{FieldKind, MessageFormat, Schema};
use crate::wire::Value;

pub fn emit_test_module(schema: &Schema, schema_name: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "#[cfg(test)]");
    let _ = writeln!(out, "mod generated_tests {{");
    let _ = writeln!(out, "    use super::*;");
    let _ = writeln!(out);

    for message in &schema.message_formats {
        emit_message_test(&mut out, schema, message, schema_name);
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "}}");
    out
}

fn emit_message_test(out: &mut String, schema: &Schema, message: &MessageFormat, schema_name: &str) {
    let type_name = naming::message_type_name(&message.name);
    let test_name = crate::ident::field_name(&message.name);
    let instance = examples::example_instance(schema, message);

    let _ = writeln!(out, "    #[test]");
    let _ = writeln!(out, "    fn {test_name}_round_trips_through_the_wire() {{");
    let _ = writeln!(out, "        let original = {type_name} {{");
    for field in &message.fields {
        let ident = naming::field_ident(&field.name);
        let value = instance.get(&field.name).expect("example covers every field");
        let literal = literal_for(schema, &field.kind, value);
        if field.required {
            let _ = writeln!(out, "            {ident}: {literal},");
        } else {
            let _ = writeln!(out, "            {ident}: Some({literal}),");
        }
    }
    let _ = writeln!(out, "        }};");
    let _ = writeln!(out);
    let _ = writeln!(out, "        let wrapped = Message::{type_name}(original.clone());");
    let _ = writeln!(out, "        let bytes = wrapped.serialize();");
    let _ = writeln!(out, "        let decoded = Message::deserialize(&bytes).unwrap();");
    let _ = writeln!(out, "        assert_eq!(decoded, wrapped);");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out);

    let xb_name = format!("{schema_name}_{}.xb", message.name);
    let _ = writeln!(out, "    #[test]");
    let _ = writeln!(out, "    fn {test_name}_example_file_round_trips_through_the_wire() {{");
    let _ = writeln!(out, "        let bytes: &[u8] = include_bytes!(\"{xb_name}\");");
    let _ = writeln!(out, "        let decoded = Message::deserialize(bytes).unwrap();");
    let _ = writeln!(out, "        assert_eq!(decoded, {test_name}_wrapped_example());");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out);

    let _ = writeln!(out, "    fn {test_name}_wrapped_example() -> Message {{");
    let _ = writeln!(out, "        Message::{type_name}({type_name} {{");
    for field in &message.fields {
        let ident = naming::field_ident(&field.name);
        let value = instance.get(&field.name).expect("example covers every field");
        let literal = literal_for(schema, &field.kind, value);
        if field.required {
            let _ = writeln!(out, "            {ident}: {literal},");
        } else {
            let _ = writeln!(out, "            {ident}: Some({literal}),");
        }
    }
    let _ = writeln!(out, "        }})");
    let _ = writeln!(out, "    }}");
}

fn literal_for(schema: &Schema, kind: &FieldKind, value: &Value) -> String {
    match (kind, value) {
        (FieldKind::Int(_), Value::Int(n)) => n.to_string(),
        (FieldKind::UInt(_), Value::UInt(n)) => n.to_string(),
        (FieldKind::Float(4), Value::Float(f)) => format!("{f}_f32"),
        (FieldKind::Float(_), Value::Float(f)) => format!("{f}_f64"),
        (FieldKind::Bool, Value::Bool(b)) => b.to_string(),
        (FieldKind::Str(n), Value::Str(s)) => {
            debug_assert_eq!(s.len(), *n, "example string must already be padded to field width");
            format!("*b{s:?}")
        }
        (FieldKind::Enum(name), Value::Enum(v)) => {
            let enum_ty = schema.enum_by_name(name).expect("enum field references declared enum");
            let variant = enum_ty.name_of(*v).expect("example value is a declared variant");
            format!("{}::{}", naming::enum_type_name(name), naming::enum_type_name(variant))
        }
        _ => unreachable!("example value kind must match field kind"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumType, Field};

    fn schema() -> Schema {
        Schema {
            enums: vec![EnumType {
                name: "Color".to_string(),
                variants: vec![("Red".to_string(), 1), ("Blue".to_string(), 3)],
            }],
            message_formats: vec![MessageFormat {
                id: None,
                name: "Paint".to_string(),
                fields: vec![
                    Field {
                        name: "shade".to_string(),
                        kind: FieldKind::Enum("Color".to_string()),
                        required: true,
                    },
                    Field {
                        name: "label".to_string(),
                        kind: FieldKind::Str(4),
                        required: false,
                    },
                ],
            }],
            source_path: None,
        }
    }

    #[test]
    fn emits_one_test_per_message_with_example_values() {
        let src = emit_test_module(&schema(), "orders");
        assert!(src.contains("fn paint_round_trips_through_the_wire()"));
        assert!(src.contains("shade: Color::Red,"));
        assert!(src.contains("label: Some(*b\"exam\"),"));
        assert!(src.contains("Message::deserialize(&bytes).unwrap()"));
    }

    #[test]
    fn emits_an_example_file_round_trip_test_per_message() {
        let src = emit_test_module(&schema(), "orders");
        assert!(src.contains("include_bytes!(\"orders_Paint.xb\")"));
        assert!(src.contains("fn paint_example_file_round_trips_through_the_wire()"));
        assert!(src.contains("fn paint_wrapped_example() -> Message {"));
    }
}
