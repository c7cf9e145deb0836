//! # codec-core
//!
//! A library for turning a declarative message schema into a self-contained
//! binary wire codec: fixed-width big-endian fields, a presence bitmask for
//! optional fields, and a 9-byte frame header in front of every message.
//!
//! [`loader`] turns a parsed [`xml_ast::Document`] into a [`model::Schema`];
//! [`emit`] turns that schema into Rust source for a generated codec; [`wire`]
//! is a native reference implementation of the same wire contract, used to
//! test the emitter's output for byte-exactness without compiling it.
//!
//! ## Example
//!
//! ```
//! use codec_core::model::{EnumType, Field, FieldKind, MessageFormat, Schema};
//! use codec_core::wire::{self, Instance, Value};
//!
//! let schema = Schema {
//!     enums: vec![],
//!     message_formats: vec![MessageFormat {
//!         id: None,
//!         name: "Ping".to_string(),
//!         fields: vec![Field {
//!             name: "seq".to_string(),
//!             kind: FieldKind::UInt(4),
//!             required: true,
//!         }],
//!     }],
//!     source_path: None,
//! };
//! let message = &schema.message_formats[0];
//!
//! let mut instance = Instance::new();
//! instance.insert("seq".to_string(), Value::UInt(7));
//!
//! let bytes = wire::serialize_message(&schema, message, &instance);
//! let (name, decoded) = wire::deserialize_message(&schema, &bytes).unwrap();
//! assert_eq!(name, "Ping");
//! assert_eq!(decoded, instance);
//! ```

pub mod emit;
pub mod errors;
pub mod examples;
pub mod ident;
pub mod loader;
pub mod model;
pub mod typesys;
pub mod wire;
pub mod xml_ast;
