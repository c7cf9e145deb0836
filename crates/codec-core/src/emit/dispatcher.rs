//! Emits the `Message` enum that wraps every record type plus the
//! whole-frame `serialize`/`deserialize` pair implementing the 9-byte
//! header contract (spec §3, §4.5): size prefix, type tag, bitmask.

use std::fmt::Write as _;

use crate::emit::naming;
use crate::model::Schema;

pub fn emit_dispatcher(schema: &Schema) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "#[derive(Debug, Clone, PartialEq)]");
    let _ = writeln!(out, "pub enum Message {{");
    for message in &schema.message_formats {
        let type_name = naming::message_type_name(&message.name);
        let _ = writeln!(out, "    {type_name}({type_name}),");
    }
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);

    let _ = writeln!(out, "impl Message {{");
    emit_serialize(&mut out, schema);
    let _ = writeln!(out);
    emit_deserialize(&mut out, schema);
    let _ = writeln!(out, "}}");

    out
}

fn emit_serialize(out: &mut String, schema: &Schema) {
    let _ = writeln!(out, "    pub fn serialize(&self) -> Vec<u8> {{");
    let _ = writeln!(out, "        let (tag, bitmask, mut payload) = match self {{");
    for message in &schema.message_formats {
        let type_name = naming::message_type_name(&message.name);
        let tag = schema
            .wire_type_tag(&message.name)
            .expect("message belongs to this schema");
        let _ = writeln!(out, "            Message::{type_name}(record) => {{");
        let _ = writeln!(
            out,
            "                let mut payload = Vec::with_capacity({type_name}::MAX_PAYLOAD_SIZE);"
        );
        let _ = writeln!(out, "                record.serialize_payload(&mut payload);");
        let _ = writeln!(out, "                ({tag}u8, record.bitmask(), payload)");
        let _ = writeln!(out, "            }}");
    }
    let _ = writeln!(out, "        }};");
    let _ = writeln!(out);
    let _ = writeln!(out, "        let mut buf = Vec::with_capacity(9 + payload.len());");
    let _ = writeln!(
        out,
        "        let msg_size = (9 + payload.len()) as u32;"
    );
    let _ = writeln!(out, "        buf.extend_from_slice(&msg_size.to_be_bytes());");
    let _ = writeln!(out, "        buf.push(tag);");
    let _ = writeln!(out, "        buf.extend_from_slice(&bitmask.to_be_bytes());");
    let _ = writeln!(out, "        buf.append(&mut payload);");
    let _ = writeln!(out, "        buf");
    let _ = writeln!(out, "    }}");
}

fn emit_deserialize(out: &mut String, schema: &Schema) {
    let _ = writeln!(out, "    pub fn deserialize(buf: &[u8]) -> Result<Self, DecodeError> {{");
    let _ = writeln!(out, "        if buf.len() < 9 {{");
    let _ = writeln!(
        out,
        "            return Err(DecodeError::BufferTooShort {{ expected: 9, actual: buf.len() }});"
    );
    let _ = writeln!(out, "        }}");
    let _ = writeln!(out, "        let tag = buf[4];");
    let _ = writeln!(out, "        match tag {{");
    for message in &schema.message_formats {
        let type_name = naming::message_type_name(&message.name);
        let tag = schema
            .wire_type_tag(&message.name)
            .expect("message belongs to this schema");
        let _ = writeln!(
            out,
            "            {tag} => Ok(Message::{type_name}({type_name}::deserialize(buf)?)),"
        );
    }
    let _ = writeln!(
        out,
        "            other => Err(DecodeError::UnknownMessageType {{ tag: other }}),"
    );
    let _ = writeln!(out, "        }}");
    let _ = writeln!(out, "    }}");
}
