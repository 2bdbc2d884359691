//! Comment AST as emitted by a dox-style parser
//!
//! Only the fields used for extraction are modelled; anything else in the
//! input is ignored. Every field is optional in the input.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentBlock {
    pub tags: Vec<Tag>,
    pub description: Description,
    pub is_private: bool,
    pub ignore: bool,
    /// The code the comment documents; absent for free-standing comments
    pub ctx: Option<CodeContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    /// Tag kind without the `@`, e.g. `param`, `return`, `example`
    #[serde(rename = "type")]
    pub kind: String,
    /// Raw tag text after the tag name
    pub string: String,
    pub name: String,
    pub description: String,
    pub types: Vec<String>,
    pub optional: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Description {
    pub full: String,
    pub summary: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeContext {
    /// `function`, `method`, `property`, `declaration`, ...
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// Display form of the documented code, e.g. `module.exports.parser()`
    pub string: String,
}
