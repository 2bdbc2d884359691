//! Doc extraction error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsError {
    #[error("Failed to parse comment AST: {0}")]
    Parse(#[from] serde_json::Error),
}
