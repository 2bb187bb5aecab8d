use crate::diagnostics::{ErrorKind, Reportable};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character: `{0}`")]
    UnexpectedChar(String),
}

impl Reportable for LexError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Syntax
    }
}
