//! Parses the schema XML shape into [`codec_core::xml_ast::Document`].
//!
//! `quick-xml`'s serde integration deserializes straight into a tree of
//! plain structs tagged with `@attr` renames for XML attributes; a small
//! `From` conversion then flattens that tree into the AST the loader
//! expects, leaving `codec-core` itself free of any XML dependency.

use anyhow::{Context, Result};
use serde::Deserialize;

use codec_core::xml_ast::{AttributeNode, Document, EnumTypeNode, EnumValueNode, MessageFormatNode};

#[derive(Debug, Deserialize)]
#[serde(rename = "root")]
struct RootXml {
    #[serde(rename = "enumTypes", default)]
    enum_types: EnumTypesXml,
    #[serde(rename = "messageFormats", default)]
    message_formats: MessageFormatsXml,
}

#[derive(Debug, Default, Deserialize)]
struct EnumTypesXml {
    #[serde(rename = "enumType", default)]
    enum_type: Vec<EnumTypeXml>,
}

#[derive(Debug, Deserialize)]
struct EnumTypeXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "enumValue", default)]
    enum_value: Vec<EnumValueXml>,
}

#[derive(Debug, Deserialize)]
struct EnumValueXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@value")]
    value: i64,
}

#[derive(Debug, Default, Deserialize)]
struct MessageFormatsXml {
    #[serde(rename = "messageFormat", default)]
    message_format: Vec<MessageFormatXml>,
}

#[derive(Debug, Deserialize)]
struct MessageFormatXml {
    #[serde(rename = "@id", default)]
    id: Option<String>,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "attribute", default)]
    attribute: Vec<AttributeXml>,
}

#[derive(Debug, Deserialize)]
struct AttributeXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@type")]
    type_token: String,
    #[serde(rename = "@length", default)]
    length: Option<usize>,
    #[serde(rename = "@required", default = "default_required")]
    required: bool,
}

fn default_required() -> bool {
    true
}

impl From<RootXml> for Document {
    fn from(root: RootXml) -> Self {
        Document {
            enum_types: root.enum_types.enum_type.into_iter().map(Into::into).collect(),
            message_formats: root
                .message_formats
                .message_format
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<EnumTypeXml> for EnumTypeNode {
    fn from(node: EnumTypeXml) -> Self {
        EnumTypeNode {
            name: node.name,
            values: node.enum_value.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<EnumValueXml> for EnumValueNode {
    fn from(node: EnumValueXml) -> Self {
        EnumValueNode { name: node.name, value: node.value }
    }
}

impl From<MessageFormatXml> for MessageFormatNode {
    fn from(node: MessageFormatXml) -> Self {
        MessageFormatNode {
            id: node.id,
            name: node.name,
            attributes: node.attribute.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<AttributeXml> for AttributeNode {
    fn from(node: AttributeXml) -> Self {
        AttributeNode {
            name: node.name,
            type_token: node.type_token,
            length: node.length,
            required: node.required,
        }
    }
}

/// Parses raw schema XML text into the loader's AST contract.
pub fn parse_document(xml: &str) -> Result<Document> {
    let root: RootXml = quick_xml::de::from_str(xml).context("failed to parse schema XML")?;
    Ok(root.into())
}
