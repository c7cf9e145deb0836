//! Emits a foreign-host constructor function per message: a plain function
//! taking native Rust types (`&str` in place of fixed char arrays, `u8` in
//! place of enum variants) and validating them into the generated record
//! type, per spec §4.6.

use std::fmt::Write as _;

use crate::emit::naming;
use crate::model::{Field, FieldKind, MessageFormat};

pub fn emit_host_constructor(message: &MessageFormat) -> String {
    let type_name = naming::message_type_name(&message.name);
    let fn_name = naming::host_constructor_name(&message.name);
    let mut out = String::new();

    let ordered_fields = required_first(message);

    let _ = write!(out, "pub fn {fn_name}(");
    let params: Vec<String> = ordered_fields
        .iter()
        .map(|field| {
            let ident = naming::field_ident(&field.name);
            let arg_type = naming::host_arg_type(&field.kind);
            if field.required {
                format!("{ident}: {arg_type}")
            } else {
                format!("{ident}: Option<{arg_type}>")
            }
        })
        .collect();
    let _ = write!(out, "{}", params.join(", "));
    let _ = writeln!(out, ") -> Result<{type_name}, HostConstructError> {{");

    for field in &ordered_fields {
        emit_field_conversion(&mut out, field);
    }

    let _ = writeln!(out, "    Ok({type_name} {{");
    for field in &ordered_fields {
        let ident = naming::field_ident(&field.name);
        let _ = writeln!(out, "        {ident},");
    }
    let _ = writeln!(out, "    }})");
    let _ = writeln!(out, "}}");

    out
}

/// Required fields first, then optional, each group keeping declared order —
/// spec §4.6's "required arguments appear before optional arguments."
fn required_first(message: &MessageFormat) -> Vec<&Field> {
    let mut fields: Vec<&Field> = message.fields.iter().filter(|f| f.required).collect();
    fields.extend(message.fields.iter().filter(|f| !f.required));
    fields
}

fn emit_field_conversion(out: &mut String, field: &Field) {
    let ident = naming::field_ident(&field.name);
    match &field.kind {
        FieldKind::Str(n) => {
            if field.required {
                let _ = writeln!(out, "    let {ident} = host_str_to_array::<{n}>({ident}, \"{}\")?;", field.name);
            } else {
                let _ = writeln!(
                    out,
                    "    let {ident} = {ident}.map(|v| host_str_to_array::<{n}>(v, \"{}\")).transpose()?;",
                    field.name
                );
            }
        }
        FieldKind::Enum(enum_name) => {
            let enum_type = naming::enum_type_name(enum_name);
            if field.required {
                let _ = writeln!(
                    out,
                    "    let {ident} = {enum_type}::from_u8({ident}).map_err(|_| HostConstructError::InvalidEnumValue {{ field: \"{}\", value: {ident} }})?;",
                    field.name
                );
            } else {
                let _ = writeln!(
                    out,
                    "    let {ident} = {ident}.map(|v| {enum_type}::from_u8(v).map_err(|_| HostConstructError::InvalidEnumValue {{ field: \"{}\", value: v }})).transpose()?;",
                    field.name
                );
            }
        }
        _ => {}
    }
}

/// Copies `s` into a fixed-width, space-padded byte array, the same layout
/// [`crate::wire`] writes for a `Str` field. Rejects strings longer than the
/// field's declared width rather than silently truncating them.
pub const HOST_STR_HELPER: &str = r#"fn host_str_to_array<const N: usize>(s: &str, field: &'static str) -> Result<[u8; N], HostConstructError> {
    if s.len() > N {
        return Err(HostConstructError::StringTooLong { field, max: N, actual: s.len() });
    }
    let mut bytes = [b' '; N];
    bytes[..s.len()].copy_from_slice(s.as_bytes());
    Ok(bytes)
}"#;
