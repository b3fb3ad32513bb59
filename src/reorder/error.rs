use crate::prelude::*;

#[derive(Debug, thiserror::Error, From)]
pub enum ParseError {
    #[error("{0}")]
    MissingCount(MissingCount),
    #[error("{0}")]
    InvalidCount(InvalidCount),
    #[error("{0}")]
    TruncatedBlock(TruncatedBlock),
    #[error("{0}")]
    UnterminatedBlock(UnterminatedBlock),
    #[error("{0}")]
    CountMismatch(CountMismatch),
    #[error("{0}")]
    MalformedElement(MalformedElement),
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "file ended before the record count of the `{section}` block (line {line_number})")]
pub struct MissingCount {
    section: String,
    line_number: usize,
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "invalid record count for the `{section}` block on line {line_number}: `{line}`")]
pub struct InvalidCount {
    section: String,
    line_number: usize,
    line: String,
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "`{section}` block declares {expected} records but the file ends after {found}")]
pub struct TruncatedBlock {
    section: String,
    expected: usize,
    found: usize,
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "`{section}` block is never closed")]
pub struct UnterminatedBlock {
    section: String,
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "`{section}` block declares {declared} records but contains {found}")]
pub struct CountMismatch {
    pub(crate) section: String,
    pub(crate) declared: usize,
    pub(crate) found: usize,
}

/// an element record that could not be split into id, type code, tags and nodes
#[derive(Display, Debug, Constructor)]
#[display(fmt = "malformed element record on line {line_number} ({reason}): `{line}`")]
pub struct MalformedElement {
    line_number: usize,
    line: String,
    reason: ElementDefect,
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementDefect {
    #[display(fmt = "expected an id, a type code and a tag count")]
    TooFewFields,
    #[display(fmt = "fewer tags than the declared tag count")]
    MissingTags,
    #[display(fmt = "non-integer header field")]
    InvalidHeader,
    #[display(fmt = "non-integer node index")]
    InvalidNode,
}

impl MalformedElement {
    pub fn defect(&self) -> ElementDefect {
        self.reason
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }
}
