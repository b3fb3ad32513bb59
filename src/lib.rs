#![doc = include_str!("../README.md")]

pub mod element;
pub mod grid;
pub mod pipeline;
pub mod prelude;
pub mod reorder;
pub mod summary;
mod write_msh;

pub use element::{type_code_for_tag, ElementKind};
pub use grid::{parse_grid, read_grid, GridData, Node, SourceElement};
pub use pipeline::{convert, ConversionReport, ConvertOptions, PipelineError, Stage};
pub use reorder::{reorder_file, reorder_node_order, ParseError, ReorderStats};
pub use summary::MeshSummary;
pub use write_msh::{encode_msh, write_msh, write_msh_file};

use std::path::{Path, PathBuf};

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("could not read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed mesh file: {0}")]
    Parse(#[from] ParseError),
    #[error("An io error occured: `{0}`")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}
