//! Common types and traits that are useful for working with `f3grid2msh`
#![allow(unused_imports)]

pub use crate::element::ElementKind;
pub use crate::grid::{GridData, Node, SourceElement};
pub use crate::pipeline::{ConversionReport, ConvertOptions, PipelineError, Stage};
pub use crate::reorder::ReorderStats;
pub use crate::summary::MeshSummary;

pub(crate) use crate::reorder::ParseError;
pub(crate) use crate::Error;

pub(crate) use derive_more::{Constructor, Display, From};
pub(crate) use tracing::{debug, info, warn};
