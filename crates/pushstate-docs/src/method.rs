//! Method records extracted from comment blocks

use serde::{Deserialize, Serialize};

use crate::ast::{CommentBlock, Tag};
use crate::format::{format_name, format_param, format_uid, join_params};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub uid: String,
    pub is_private: bool,
    /// Code context kind (`function`, `method`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub empty: bool,
    /// Display signature, e.g. `url[, title, state]`
    pub params: String,
    pub tags: MethodTags,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodTags {
    pub example: Vec<String>,
    pub param: Vec<ParamTag>,
    pub property: Vec<PropertyTag>,
    #[serde(rename = "return")]
    pub returns: Vec<ReturnTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamTag {
    pub name: String,
    pub is_optional: bool,
    pub types: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyTag {
    pub name: String,
    pub types: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnTag {
    pub types: Vec<String>,
    pub description: String,
}

/// Extract documented methods from parsed comment blocks.
///
/// `filename` prefixes every uid so methods from different files stay
/// distinct.
pub fn parse_comments(blocks: &[CommentBlock], filename: &str) -> Vec<Method> {
    let methods: Vec<Method> = blocks
        .iter()
        .filter(|block| !block.ignore)
        .filter_map(|block| Method::from_block(block, filename))
        .filter(|method| !method.empty)
        .collect();

    tracing::debug!(
        filename = %filename,
        blocks = blocks.len(),
        methods = methods.len(),
        "Extracted documented methods"
    );

    methods
}

/// Deserialize a JSON comment AST and extract its methods.
pub fn parse_json(content: &str, filename: &str) -> Result<Vec<Method>> {
    let blocks: Vec<CommentBlock> = serde_json::from_str(content)?;
    Ok(parse_comments(&blocks, filename))
}

impl Method {
    /// Build a method record; `None` when the block documents no code.
    fn from_block(block: &CommentBlock, filename: &str) -> Option<Self> {
        let ctx = block.ctx.as_ref()?;
        let description = block.description.full.clone();

        let params = join_params(
            block
                .tags
                .iter()
                .filter(|tag| tag.kind == "param" && !tag.name.contains('.'))
                .map(|tag| (tag.name.as_str(), tag.optional)),
        );

        Some(Self {
            uid: format_uid(&format!("{}-{}", filename, ctx.string)),
            is_private: block.is_private,
            kind: ctx.kind.clone(),
            name: format_name(&ctx.string),
            empty: description.is_empty() && block.tags.is_empty(),
            description,
            params,
            tags: MethodTags::from_tags(&block.tags),
        })
    }
}

impl MethodTags {
    fn from_tags(tags: &[Tag]) -> Self {
        Self {
            example: of_kind(tags, &["example"]).map(|tag| tag.string.clone()).collect(),
            param: of_kind(tags, &["param"])
                .map(|tag| ParamTag {
                    name: format_param(&tag.name),
                    is_optional: tag.optional,
                    types: tag.types.clone(),
                    description: tag.description.clone(),
                })
                .collect(),
            property: of_kind(tags, &["property"])
                .map(|tag| PropertyTag {
                    name: tag.name.clone(),
                    types: tag.types.clone(),
                    description: tag.description.clone(),
                })
                .collect(),
            returns: of_kind(tags, &["return", "returns"])
                .map(|tag| ReturnTag {
                    types: tag.types.clone(),
                    description: tag.description.clone(),
                })
                .collect(),
        }
    }
}

fn of_kind<'t>(tags: &'t [Tag], kinds: &'t [&'t str]) -> impl Iterator<Item = &'t Tag> + 't {
    tags.iter()
        .filter(move |tag| kinds.contains(&tag.kind.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CodeContext, Description};
    use serde_json::json;

    fn param(name: &str, optional: bool) -> Tag {
        Tag {
            kind: "param".to_string(),
            name: name.to_string(),
            optional,
            types: vec!["string".to_string()],
            description: format!("The {}", name),
            ..Tag::default()
        }
    }

    fn block(ctx_string: &str, description: &str, tags: Vec<Tag>) -> CommentBlock {
        CommentBlock {
            tags,
            description: Description {
                full: description.to_string(),
                ..Description::default()
            },
            is_private: false,
            ignore: false,
            ctx: Some(CodeContext {
                kind: "method".to_string(),
                name: "push".to_string(),
                string: ctx_string.to_string(),
            }),
        }
    }

    #[test]
    fn test_method_from_block() {
        let blocks = vec![block(
            "History.push()",
            "Construct and push a URL state",
            vec![
                param("URL", false),
                param("[title]", true),
                param("[stateObj]", true),
                param("stateObj.key", false),
                Tag {
                    kind: "returns".to_string(),
                    types: vec!["boolean".to_string()],
                    description: "Whether the push succeeded".to_string(),
                    ..Tag::default()
                },
                Tag {
                    kind: "example".to_string(),
                    string: "History.push('/home')".to_string(),
                    ..Tag::default()
                },
            ],
        )];

        let methods = parse_comments(&blocks, "wtc-history.js");
        assert_eq!(methods.len(), 1);

        let method = &methods[0];
        assert_eq!(method.uid, "wtc-history.js-history.push");
        assert_eq!(method.name, "History.push");
        assert_eq!(method.kind, "method");
        assert_eq!(method.params, "URL[, title, stateObj]");
        assert!(!method.empty);
        assert_eq!(method.tags.example, vec!["History.push('/home')"]);
        assert_eq!(method.tags.param.len(), 4);
        assert_eq!(method.tags.param[1].name, "title");
        assert!(method.tags.param[1].is_optional);
        assert_eq!(method.tags.returns.len(), 1);
        assert_eq!(method.tags.returns[0].types, vec!["boolean"]);
    }

    #[test]
    fn test_skips_ignored_contextless_and_empty_blocks() {
        let mut ignored = block("a()", "Ignored", vec![]);
        ignored.ignore = true;

        let mut free_standing = block("b()", "No code", vec![]);
        free_standing.ctx = None;

        let empty = block("c()", "", vec![]);
        let kept = block("d()", "", vec![param("x", false)]);

        let methods = parse_comments(&[ignored, free_standing, empty, kept], "index.js");
        let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["d"]);
    }

    #[test]
    fn test_parse_json() {
        let content = json!([
            {
                "tags": [
                    {"type": "param", "string": "{String} content", "name": "content",
                     "description": "Contents of file.", "types": ["String"], "optional": false},
                    {"type": "property", "name": "length", "types": ["integer"],
                     "description": "Stack length"},
                    {"type": "return", "types": ["Promise"], "description": "Methods."}
                ],
                "description": {"full": "<p>Dox parser.</p>", "summary": "", "body": ""},
                "isPrivate": true,
                "ignore": false,
                "line": 12,
                "ctx": {"type": "declaration", "name": "parser", "string": "module.exports.parser"}
            }
        ])
        .to_string();

        let methods = parse_json(&content, "index.js").unwrap();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "parser");
        assert_eq!(methods[0].uid, "index.js-module.exports.parser");
        assert!(methods[0].is_private);
        assert_eq!(methods[0].tags.property[0].name, "length");

        let output = serde_json::to_value(&methods[0]).unwrap();
        assert_eq!(output["type"], json!("declaration"));
        assert_eq!(output["isPrivate"], json!(true));
        assert_eq!(output["tags"]["return"][0]["types"], json!(["Promise"]));
        assert_eq!(output["tags"]["param"][0]["isOptional"], json!(false));
    }

    #[test]
    fn test_parse_json_rejects_malformed_input() {
        assert!(parse_json("{not json", "index.js").is_err());
    }
}
