//! rewriting the corner order of elements in a Gmsh 2.2 ascii mesh
//!
//! FLAC3D numbers the corners of its zones differently from Gmsh. A mesh written
//! with the FLAC3D order has the right element count and type codes but inverted
//! or degenerate volumes. This pass reads any conforming Gmsh 2.2 file and applies
//! the per-shape permutation from [`ElementKind::permutation`] to every element
//! whose node count matches its type code. Everything else is copied byte for byte.

mod error;

pub use error::{
    CountMismatch, ElementDefect, InvalidCount, MalformedElement, MissingCount, ParseError,
    TruncatedBlock, UnterminatedBlock,
};

use crate::prelude::*;

use std::path::Path;

pub(crate) const ELEMENTS_MARKER: &str = "$Elements";

/// What the reorder pass did to the element records it visited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReorderStats {
    /// records whose node list was permuted
    pub corrected: usize,
    /// records copied unchanged: unsupported type code or mismatched node count
    pub passed_through: usize,
}

impl ReorderStats {
    pub fn total(&self) -> usize {
        self.corrected + self.passed_through
    }
}

/// An element line split into its fields. Header fields keep their original text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ElementRecord<'a> {
    id: &'a str,
    pub(crate) type_code: i64,
    type_field: &'a str,
    tag_count: &'a str,
    tags: Vec<&'a str>,
    pub(crate) nodes: Vec<i64>,
}

impl<'a> ElementRecord<'a> {
    /// `<id> <type> <ntags> <tag>{ntags} <node>*`
    pub(crate) fn parse(line: &'a str) -> Result<Self, ElementDefect> {
        let fields: Vec<&str> = line.split_whitespace().collect();

        if fields.len() < 3 {
            return Err(ElementDefect::TooFewFields);
        }

        let (id, type_field, tag_count) = (fields[0], fields[1], fields[2]);

        id.parse::<i64>().map_err(|_| ElementDefect::InvalidHeader)?;
        let type_code = type_field
            .parse::<i64>()
            .map_err(|_| ElementDefect::InvalidHeader)?;
        let n_tags = tag_count
            .parse::<usize>()
            .map_err(|_| ElementDefect::InvalidHeader)?;

        let tags_end = 3usize
            .checked_add(n_tags)
            .filter(|&end| end <= fields.len())
            .ok_or(ElementDefect::MissingTags)?;
        let tags = fields[3..tags_end].to_vec();

        let nodes = fields[tags_end..]
            .iter()
            .map(|node| node.parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ElementDefect::InvalidNode)?;

        Ok(Self {
            id,
            type_code,
            type_field,
            tag_count,
            tags,
            nodes,
        })
    }

    fn kind(&self) -> Option<ElementKind> {
        u32::try_from(self.type_code)
            .ok()
            .and_then(ElementKind::from_type_code)
    }

    /// the rewritten line (without terminator), or `None` if this record is left alone
    fn reordered(&self) -> Option<String> {
        let nodes = self.kind()?.reorder(&self.nodes)?;

        let mut fields = vec![self.id, self.type_field, self.tag_count];
        fields.extend(self.tags.iter().copied());

        let mut line = fields.join(" ");
        for node in nodes {
            line.push(' ');
            line.push_str(&node.to_string());
        }

        Some(line)
    }
}

/// split a line into its content and its `\n` / `\r\n` terminator (possibly empty)
fn split_terminator(line: &str) -> (&str, &str) {
    let content = line.trim_end_matches(&['\n', '\r'][..]);
    line.split_at(content.len())
}

/// Rewrite the node order of every supported element in the text of a Gmsh mesh.
///
/// Lines outside of `$Elements` blocks are copied unchanged, as are element records
/// with an unsupported type code or a node count that does not match their type.
/// Element records that cannot be split into fields are an error.
pub fn reorder_node_order(text: &str) -> Result<(String, ReorderStats), ParseError> {
    let mut output = String::with_capacity(text.len());
    let mut stats = ReorderStats::default();

    let mut lines = text
        .split_inclusive('\n')
        .enumerate()
        .map(|(index, line)| (index + 1, line));

    while let Some((line_number, line)) = lines.next() {
        output.push_str(line);

        if line.trim() != ELEMENTS_MARKER {
            continue;
        }

        let (count_line_number, count_line) = lines
            .next()
            .ok_or_else(|| MissingCount::new(ELEMENTS_MARKER.into(), line_number + 1))?;
        output.push_str(count_line);

        let count: usize = count_line.trim().parse().map_err(|_| {
            InvalidCount::new(
                ELEMENTS_MARKER.into(),
                count_line_number,
                count_line.trim().into(),
            )
        })?;

        for found in 0..count {
            let (record_line_number, record) = lines
                .next()
                .ok_or_else(|| TruncatedBlock::new(ELEMENTS_MARKER.into(), count, found))?;

            let (content, terminator) = split_terminator(record);

            let element = ElementRecord::parse(content).map_err(|defect| {
                MalformedElement::new(record_line_number, content.trim().into(), defect)
            })?;

            match element.reordered() {
                Some(rewritten) => {
                    output.push_str(&rewritten);
                    output.push_str(terminator);
                    stats.corrected += 1;
                }
                None => {
                    debug!(
                        line_number = record_line_number,
                        type_code = element.type_code,
                        nodes = element.nodes.len(),
                        "element left in original order"
                    );
                    output.push_str(record);
                    stats.passed_through += 1;
                }
            }
        }
    }

    Ok((output, stats))
}

/// Read the Gmsh mesh at `input`, reorder its elements, and write the result to
/// `output`.
///
/// The output is only created once the whole input has been reordered, so a parse
/// failure never leaves a partial file behind. `output` must not name the same file
/// as `input`.
pub fn reorder_file(input: &Path, output: &Path) -> Result<ReorderStats, Error> {
    if is_same_file(input, output) {
        let source = std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "refusing to overwrite the input mesh",
        );
        return Err(Error::write(output, source));
    }

    let text = std::fs::read_to_string(input).map_err(|source| Error::read(input, source))?;

    let (reordered, stats) = reorder_node_order(&text)?;

    std::fs::write(output, reordered).map_err(|source| Error::write(output, source))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        corrected = stats.corrected,
        passed_through = stats.passed_through,
        "reordered element nodes"
    );

    if stats.passed_through > 0 {
        warn!(
            count = stats.passed_through,
            "some elements were left in their original node order"
        );
    }

    Ok(stats)
}

/// `true` when both paths are spelled the same or resolve to the same existing file
pub(crate) fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }

    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
