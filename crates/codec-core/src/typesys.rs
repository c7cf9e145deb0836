//! The type system: the single source of truth mapping a [`crate::model::Field`]
//! to its wire-level byte width. Every downstream decision — buffer sizing,
//! payload offsets, emitted literal widths — routes through here.

use crate::model::{Field, FieldKind, MessageFormat};

/// Byte width of `field` on the wire. For optional fields this is the width
/// of the value *when present* — optionality never changes the width.
pub fn wire_width(field: &Field) -> usize {
    kind_width(&field.kind)
}

pub fn kind_width(kind: &FieldKind) -> usize {
    match kind {
        FieldKind::Int(n) | FieldKind::UInt(n) | FieldKind::Float(n) => *n as usize,
        FieldKind::Bool => 1,
        FieldKind::Str(n) => *n,
        FieldKind::Enum(_) => 1,
    }
}

/// Sum of [`wire_width`] over every field of `message`, as if all optional
/// fields were present. Used to preallocate serialization buffers.
pub fn max_payload_width(message: &MessageFormat) -> usize {
    message.fields.iter().map(wire_width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_widths_match_declared_byte_count() {
        assert_eq!(kind_width(&FieldKind::Int(4)), 4);
        assert_eq!(kind_width(&FieldKind::UInt(8)), 8);
        assert_eq!(kind_width(&FieldKind::Float(4)), 4);
        assert_eq!(kind_width(&FieldKind::Bool), 1);
        assert_eq!(kind_width(&FieldKind::Str(12)), 12);
        assert_eq!(kind_width(&FieldKind::Enum("Color".into())), 1);
    }

    #[test]
    fn max_payload_width_sums_all_fields_present_or_not() {
        let message = MessageFormat {
            id: None,
            name: "Order".to_string(),
            fields: vec![
                Field {
                    name: "side".to_string(),
                    kind: FieldKind::Int(1),
                    required: true,
                },
                Field {
                    name: "qty".to_string(),
                    kind: FieldKind::UInt(4),
                    required: true,
                },
                Field {
                    name: "tag".to_string(),
                    kind: FieldKind::Str(8),
                    required: false,
                },
            ],
        };
        assert_eq!(max_payload_width(&message), 1 + 4 + 8);
    }
}
