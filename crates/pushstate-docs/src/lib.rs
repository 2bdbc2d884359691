//! pushstate Doc Extraction
//!
//! Turns the comment AST produced by a dox-style JavaScript comment parser
//! into flat method records for API documentation pages:
//! - Ignored blocks and blocks without a code context are dropped
//! - Names, uids and parameter signatures are formatted for display
//! - Blocks with neither a description nor tags are dropped

mod ast;
mod error;
mod format;
mod method;

pub use ast::{CodeContext, CommentBlock, Description, Tag};
pub use error::DocsError;
pub use method::{parse_comments, parse_json, Method, MethodTags, ParamTag, PropertyTag, ReturnTag};

pub type Result<T> = std::result::Result<T, DocsError>;
