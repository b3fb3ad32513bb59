//! The full FLAC3D to Gmsh conversion: read the grid, write an intermediate mesh in
//! FLAC3D corner order, then rewrite it into Gmsh corner order.
//!
//! The two writing stages only communicate through the intermediate file, so the
//! reorder stage can equally be run on its own with [`reorder_file`](crate::reorder_file).

use crate::prelude::*;
use crate::reorder::{is_same_file, CountMismatch};
use crate::{read_grid, reorder_file, write_msh_file};

use std::path::{Path, PathBuf};

/// The step of the conversion that was running when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    #[display(fmt = "reading the grid file")]
    ReadGrid,
    #[display(fmt = "writing the intermediate mesh")]
    WriteMesh,
    #[display(fmt = "correcting the node order")]
    CorrectNodeOrder,
    #[display(fmt = "verifying the corrected mesh")]
    Verify,
}

#[derive(Debug, thiserror::Error, Constructor)]
#[error("conversion failed while {stage}: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: Error,
}

impl Stage {
    fn fail(self) -> impl FnOnce(Error) -> PipelineError {
        move |source| PipelineError::new(self, source)
    }
}

/// Paths and switches for one conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// FLAC3D grid file to read
    pub input: PathBuf,
    /// final mesh in Gmsh corner order
    pub output: PathBuf,
    /// mesh in FLAC3D corner order, handed from the writer to the reorder stage
    pub intermediate: PathBuf,
    /// leave the intermediate mesh on disk after a successful run
    pub keep_intermediate: bool,
}

impl ConvertOptions {
    /// Convert `input` into `output`. The intermediate mesh is written next to the
    /// output with the extension `convert.msh` and kept.
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input: I, output: O) -> Self {
        let output = output.into();
        let intermediate = default_intermediate(&output);

        Self {
            input: input.into(),
            output,
            intermediate,
            keep_intermediate: true,
        }
    }

    pub fn with_intermediate<P: Into<PathBuf>>(mut self, intermediate: P) -> Self {
        self.intermediate = intermediate.into();
        self
    }

    pub fn keep_intermediate(mut self, keep: bool) -> Self {
        self.keep_intermediate = keep;
        self
    }
}

fn default_intermediate(output: &Path) -> PathBuf {
    output.with_extension("convert.msh")
}

/// What a successful conversion produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub nodes: usize,
    pub elements: usize,
    /// element count per FLAC3D kind tag, in order of first appearance
    pub kind_counts: Vec<(String, usize)>,
    pub reorder: ReorderStats,
    /// record counts read back from the final mesh
    pub summary: MeshSummary,
    /// the intermediate mesh, if it was kept
    pub intermediate: Option<PathBuf>,
}

/// Run every stage of the conversion in order, stopping at the first failure.
///
/// The reorder stage never runs unless the intermediate mesh was written and
/// flushed successfully.
pub fn convert(options: &ConvertOptions) -> Result<ConversionReport, PipelineError> {
    info!(input = %options.input.display(), "reading grid file");
    let grid = read_grid(&options.input).map_err(Stage::ReadGrid.fail())?;

    check_intermediate(options).map_err(Stage::WriteMesh.fail())?;
    write_msh_file(&options.intermediate, &grid).map_err(Stage::WriteMesh.fail())?;

    let reorder = reorder_file(&options.intermediate, &options.output)
        .map_err(Stage::CorrectNodeOrder.fail())?;

    let summary = verify(&options.output, &grid).map_err(Stage::Verify.fail())?;

    let intermediate = if options.keep_intermediate {
        Some(options.intermediate.clone())
    } else {
        if let Err(e) = std::fs::remove_file(&options.intermediate) {
            warn!(
                path = %options.intermediate.display(),
                error = %e,
                "could not remove the intermediate mesh"
            );
        }
        None
    };

    info!(output = %options.output.display(), "conversion finished");

    Ok(ConversionReport {
        nodes: grid.nodes.len(),
        elements: grid.elements.len(),
        kind_counts: grid.kind_counts(),
        reorder,
        summary,
        intermediate,
    })
}

/// the intermediate mesh must not replace the grid or the final mesh
fn check_intermediate(options: &ConvertOptions) -> Result<(), Error> {
    let intermediate = &options.intermediate;

    if is_same_file(intermediate, &options.input) || is_same_file(intermediate, &options.output)
    {
        let source = std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "the intermediate mesh must be a separate file",
        );
        return Err(Error::write(intermediate, source));
    }

    Ok(())
}

/// read the final mesh back and make sure nothing was lost on the way
fn verify(path: &Path, grid: &GridData) -> Result<MeshSummary, Error> {
    let summary = MeshSummary::read(path)?;

    if summary.nodes != grid.nodes.len() {
        let mismatch = CountMismatch::new("$Nodes".into(), grid.nodes.len(), summary.nodes);
        return Err(ParseError::from(mismatch).into());
    }

    if summary.elements != grid.elements.len() {
        let mismatch =
            CountMismatch::new("$Elements".into(), grid.elements.len(), summary.elements);
        return Err(ParseError::from(mismatch).into());
    }

    debug!(nodes = summary.nodes, elements = summary.elements, "verified mesh");

    Ok(summary)
}
