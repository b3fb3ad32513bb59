//! Counting the records of a Gmsh 2.2 ascii mesh.
//!
//! A downstream importer rejects a mesh whose `$Nodes` / `$Elements` header counts
//! disagree with the records that follow them. [`MeshSummary::parse`] performs the
//! same check so a converted mesh can be verified without loading it into a solver.

use crate::prelude::*;
use crate::reorder::{
    CountMismatch, ElementRecord, InvalidCount, MalformedElement, MissingCount,
    UnterminatedBlock, ELEMENTS_MARKER,
};

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

const NODES_MARKER: &str = "$Nodes";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshSummary {
    pub nodes: usize,
    pub elements: usize,
    /// number of elements for each type code
    pub type_counts: BTreeMap<i64, usize>,
}

impl MeshSummary {
    /// read and summarize the mesh file at `path`
    pub fn read(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::read(path, source))?;
        Ok(Self::parse(&text)?)
    }

    /// Summarize the text of a mesh, checking every block's declared count against
    /// the records it contains.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut summary = MeshSummary::default();
        let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line));

        while let Some((line_number, line)) = lines.next() {
            let section = match line.trim() {
                NODES_MARKER => NODES_MARKER,
                ELEMENTS_MARKER => ELEMENTS_MARKER,
                _ => continue,
            };

            let (count_line_number, count_line) = lines
                .next()
                .ok_or_else(|| MissingCount::new(section.into(), line_number + 1))?;

            let declared: usize = count_line.trim().parse().map_err(|_| {
                InvalidCount::new(section.into(), count_line_number, count_line.trim().into())
            })?;

            let end_marker = format!("$End{}", &section[1..]);
            let mut found = 0;
            let mut closed = false;

            for (record_line_number, record) in lines.by_ref() {
                let record = record.trim();

                if record == end_marker {
                    closed = true;
                    break;
                }

                if record.is_empty() {
                    continue;
                }

                if section == ELEMENTS_MARKER {
                    let element = ElementRecord::parse(record).map_err(|defect| {
                        MalformedElement::new(record_line_number, record.into(), defect)
                    })?;
                    *summary.type_counts.entry(element.type_code).or_insert(0) += 1;
                }

                found += 1;
            }

            if !closed {
                return Err(UnterminatedBlock::new(section.into()).into());
            }

            if declared != found {
                return Err(CountMismatch::new(section.into(), declared, found).into());
            }

            if section == NODES_MARKER {
                summary.nodes += found;
            } else {
                summary.elements += found;
            }
        }

        Ok(summary)
    }

    /// number of elements with the given type code
    pub fn count_of(&self, type_code: i64) -> usize {
        self.type_counts.get(&type_code).copied().unwrap_or(0)
    }
}

impl fmt::Display for MeshSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes:    {}", self.nodes)?;
        write!(f, "elements: {}", self.elements)?;

        for (type_code, count) in &self.type_counts {
            let name = u32::try_from(*type_code)
                .ok()
                .and_then(ElementKind::from_type_code)
                .map(|kind| format!("{:?}", kind))
                .unwrap_or_else(|| "unsupported".into());

            write!(f, "\n  type {type_code} ({name}): {count}")?;
        }

        Ok(())
    }
}
