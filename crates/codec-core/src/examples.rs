//! Deterministic "example" value construction, per spec §4.6: a small
//! negative integer for signed ints, small positive for unsigned, `3.14`
//! for floats, a fixed short string, the first declared enum variant, and
//! every field — including optional ones — present.
//!
//! Shared by `codegen-cli` (to write the `.xb` example files) and
//! [`crate::emit::tests_gen`] (to emit matching literal construction code
//! in the generated round-trip test suite), so both stay in lockstep.

use crate::model::{FieldKind, MessageFormat, Schema};
use crate::wire::{Instance, Value};

/// Builds a deterministic, fully-populated example instance for `message`.
pub fn example_instance(schema: &Schema, message: &MessageFormat) -> Instance {
    let mut instance = Instance::new();
    for field in &message.fields {
        instance.insert(field.name.clone(), example_value(schema, &field.kind));
    }
    instance
}

fn example_value(schema: &Schema, kind: &FieldKind) -> Value {
    match kind {
        FieldKind::Int(_) => Value::Int(-1),
        FieldKind::UInt(_) => Value::UInt(1),
        // Stored pre-rounded to the nearest f32 so that a width-4 field's
        // encode (f64 -> f32) -> decode (f32 -> f64) round trip is exact.
        FieldKind::Float(4) => Value::Float(3.14f32 as f64),
        FieldKind::Float(_) => Value::Float(3.14_f64),
        FieldKind::Bool => Value::Bool(true),
        FieldKind::Str(n) => Value::Str(padded_example_str(*n)),
        FieldKind::Enum(name) => {
            let enum_ty = schema
                .enum_by_name(name)
                .expect("enum field must reference a declared enum");
            Value::Enum(enum_ty.first_variant().1)
        }
    }
}

/// Pads/truncates the canonical example string to exactly `width`
/// characters, the same way [`crate::wire`] encodes a `Str` field — so the
/// constructed example already equals what decoding it back would produce.
pub fn padded_example_str(width: usize) -> String {
    const BASE: &str = "example";
    let mut chars: Vec<char> = BASE.chars().take(width).collect();
    while chars.len() < width {
        chars.push(' ');
    }
    chars.into_iter().collect()
}
