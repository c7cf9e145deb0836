//! In-memory schema model: enums, message formats, and typed fields.
//!
//! Everything here is immutable once built by [`crate::loader`]; the emitter
//! and the native wire oracle only ever borrow it.

/// One declared enumeration: an ordered, non-empty set of name/value pairs.
///
/// Variant values are unique within the enum and fit in a byte (spec-level
/// invariant enforced by the loader, not here).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    /// Declaration-order (name, value) pairs.
    pub variants: Vec<(String, u8)>,
}

impl EnumType {
    pub fn value_of(&self, variant_name: &str) -> Option<u8> {
        self.variants
            .iter()
            .find(|(name, _)| name == variant_name)
            .map(|(_, v)| *v)
    }

    pub fn name_of(&self, value: u8) -> Option<&str> {
        self.variants
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(name, _)| name.as_str())
    }

    /// First declared variant, used as the deterministic example value.
    pub fn first_variant(&self) -> &(String, u8) {
        &self.variants[0]
    }
}

/// Wire-level category of a field's value, with the type system's
/// canonical byte width baked into integer/float/string kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Int(u8),
    UInt(u8),
    Float(u8),
    Bool,
    /// Fixed-length, space-padded single-byte character array.
    Str(usize),
    /// 1 byte, values drawn from the named enum's variants.
    Enum(String),
}

/// A single named field within a [`MessageFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

/// A named, ordered tuple of typed fields.
///
/// Field order defines both wire payload order and, for optional fields,
/// bitmask bit assignment (bit 0 = first optional field encountered).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFormat {
    /// Informational external identifier; never appears on the wire.
    pub id: Option<String>,
    pub name: String,
    pub fields: Vec<Field>,
}

impl MessageFormat {
    /// Fields that consume a bitmask bit, in declared order.
    pub fn optional_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.required)
    }

    pub fn optional_count(&self) -> usize {
        self.optional_fields().count()
    }

    /// Bit index assigned to `field_name` if it is an optional field, or
    /// `None` if the field is required or does not exist.
    pub fn optional_bit_index(&self, field_name: &str) -> Option<u32> {
        self.optional_fields()
            .position(|f| f.name == field_name)
            .map(|i| i as u32)
    }
}

/// The full schema: declared enums plus declared message formats, both in
/// deterministic declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub enums: Vec<EnumType>,
    pub message_formats: Vec<MessageFormat>,
    /// Informational; not part of the wire contract.
    pub source_path: Option<String>,
}

impl Schema {
    pub fn enum_by_name(&self, name: &str) -> Option<&EnumType> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn message_format_by_name(&self, name: &str) -> Option<&MessageFormat> {
        self.message_formats.iter().find(|m| m.name == name)
    }

    /// 1-based wire type tag: the message format's position in declared
    /// order. Index 0 is reserved/invalid and never returned here.
    pub fn wire_type_tag(&self, message_name: &str) -> Option<u8> {
        self.message_formats
            .iter()
            .position(|m| m.name == message_name)
            .map(|i| (i + 1) as u8)
    }

    pub fn message_format_by_tag(&self, tag: u8) -> Option<&MessageFormat> {
        if tag == 0 {
            return None;
        }
        self.message_formats.get(tag as usize - 1)
    }
}
