//! Error kinds for the schema loader, emitter, and the native wire oracle.
//!
//! Mirrors the kind/raiser/user-sees table in the wire codec's design: each
//! enum below corresponds to exactly one row. Generated codec source defines
//! its own, textually equivalent enums — it does not depend on these at
//! runtime (see [`crate::emit`]).

use std::fmt;

/// Raised while building a [`crate::model::Schema`] from an [`crate::xml_ast::Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A schema-level invariant was violated.
    SchemaInvalid { reason: String, location: String },
    /// A field's type token did not resolve to a primitive or declared enum.
    UnsupportedType { token: String, location: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::SchemaInvalid { reason, location } => {
                write!(f, "schema invalid at {location}: {reason}")
            }
            SchemaError::UnsupportedType { token, location } => {
                write!(f, "unsupported type token {token:?} at {location}")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Raised by the code emitter when it cannot produce source for a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    EmitFailure { reason: String },
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::EmitFailure { reason } => write!(f, "emit failed: {reason}"),
        }
    }
}

impl std::error::Error for EmitError {}

/// Raised by [`crate::wire`], the hand-written native reader/writer that
/// the wire codec specification obligates to agree byte-for-byte with
/// whatever the emitter generates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The buffer is too short for the bytes the frame or field demands.
    BufferTooShort { expected: usize, actual: usize },
    /// The header's `msg_type` byte is 0 or exceeds the declared format count.
    UnknownMessageType { tag: u8 },
    /// A decoded enum byte has no matching declared variant.
    InvalidEnumValue { enum_name: String, value: u8 },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::BufferTooShort { expected, actual } => {
                write!(f, "buffer too short: expected {expected} bytes, got {actual}")
            }
            WireError::UnknownMessageType { tag } => {
                write!(f, "unknown message type tag {tag}")
            }
            WireError::InvalidEnumValue { enum_name, value } => {
                write!(f, "invalid value {value} for enum {enum_name}")
            }
        }
    }
}

impl std::error::Error for WireError {}

/// Raised by a generated foreign-host constructor: a string argument
/// overruns the field's declared width, or an integer argument is not a
/// declared enum value. Generated code names this `HostConstructError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    StringTooLong { field: String, max: usize, actual: usize },
    InvalidEnumValue { field: String, value: u8 },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::StringTooLong { field, max, actual } => {
                write!(f, "field {field} is {actual} bytes, exceeds max {max}")
            }
            HostError::InvalidEnumValue { field, value } => {
                write!(f, "field {field} got invalid enum value {value}")
            }
        }
    }
}

impl std::error::Error for HostError {}
