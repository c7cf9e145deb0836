//! Emits one target-language enum per declared [`EnumType`], with a
//! `to_u8`/`from_u8` round trip (spec §4.6).

use std::fmt::Write as _;

use crate::emit::naming;
use crate::model::EnumType;

pub fn emit_enum(enum_ty: &EnumType) -> String {
    let type_name = naming::enum_type_name(&enum_ty.name);
    let mut out = String::new();

    let _ = writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq)]");
    let _ = writeln!(out, "pub enum {type_name} {{");
    for (variant_name, _) in &enum_ty.variants {
        let _ = writeln!(out, "    {},", naming::enum_type_name(variant_name));
    }
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);

    let _ = writeln!(out, "impl {type_name} {{");
    let _ = writeln!(out, "    pub fn to_u8(self) -> u8 {{");
    let _ = writeln!(out, "        match self {{");
    for (variant_name, value) in &enum_ty.variants {
        let _ = writeln!(
            out,
            "            {type_name}::{} => {value},",
            naming::enum_type_name(variant_name)
        );
    }
    let _ = writeln!(out, "        }}");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out);

    let _ = writeln!(out, "    pub fn from_u8(value: u8) -> Result<Self, DecodeError> {{");
    let _ = writeln!(out, "        match value {{");
    for (variant_name, value) in &enum_ty.variants {
        let _ = writeln!(
            out,
            "            {value} => Ok({type_name}::{}),",
            naming::enum_type_name(variant_name)
        );
    }
    let _ = writeln!(
        out,
        "            other => Err(DecodeError::InvalidEnumValue {{ enum_name: \"{}\", value: other }}),",
        enum_ty.name
    );
    let _ = writeln!(out, "        }}");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");

    out
}
