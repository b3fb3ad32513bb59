//! reading FLAC3D ascii grid files
//!
//! Only two record kinds are used: gridpoints (`G <id> <x> <y> <z>`) and zones
//! (`Z <kind> <id> <node>*`), told apart by the first letter of the line. Every other line, and every gridpoint or zone line
//! that cannot be understood, is skipped so that noisy generator output still
//! converts.

use crate::prelude::*;

use std::io::BufRead;
use std::path::Path;

/// A gridpoint. Its index is its position in [`GridData::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Constructor)]
pub struct Node {
    pub position: [f64; 3],
}

/// A zone as it appears in the grid file
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct SourceElement {
    /// shape code such as `B8` or `T4`
    pub kind: String,
    /// every integer following the kind tag, decremented by one. The first entry
    /// is the zone id, the rest are 0-based gridpoint indices.
    pub raw_nodes: Vec<i64>,
}

impl SourceElement {
    /// the 0-based corner node indices, with the leading zone id dropped
    pub fn corner_nodes(&self) -> &[i64] {
        self.raw_nodes.get(1..).unwrap_or(&[])
    }
}

/// Everything read out of a grid file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridData {
    pub nodes: Vec<Node>,
    pub elements: Vec<SourceElement>,
}

impl GridData {
    /// number of elements for each kind tag, in order of first appearance
    pub fn kind_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();

        for element in &self.elements {
            match counts.iter_mut().find(|(kind, _)| *kind == element.kind) {
                Some((_, count)) => *count += 1,
                None => counts.push((element.kind.clone(), 1)),
            }
        }

        counts
    }
}

/// a single classified line of the grid file
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GridRecord {
    Node(Node),
    Element(SourceElement),
    Unknown,
}

/// Read and parse the grid file at `path`
pub fn read_grid(path: &Path) -> Result<GridData, Error> {
    let file = std::fs::File::open(path).map_err(|source| Error::read(path, source))?;
    let reader = std::io::BufReader::new(file);

    let grid = parse_grid(reader).map_err(|source| Error::read(path, source))?;

    info!(
        path = %path.display(),
        nodes = grid.nodes.len(),
        elements = grid.elements.len(),
        "read grid file"
    );

    for (kind, count) in grid.kind_counts() {
        info!(kind = %kind, count, "element kind");
    }

    Ok(grid)
}

/// Parse grid records from any buffered reader.
///
/// The input is decoded as latin-1 so that arbitrary bytes never fail to decode;
/// only errors from the reader itself are returned.
pub fn parse_grid<R: BufRead>(mut reader: R) -> Result<GridData, std::io::Error> {
    let mut grid = GridData::default();
    let mut buffer = Vec::new();

    loop {
        buffer.clear();

        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }

        let line = decode_latin1(&buffer);

        match classify_line(&line) {
            GridRecord::Node(node) => grid.nodes.push(node),
            GridRecord::Element(element) => grid.elements.push(element),
            GridRecord::Unknown => (),
        }
    }

    Ok(grid)
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| byte as char).collect()
}

/// Sort a line into a record by the first letter of its leading token and parse it.
///
/// Any token starting with `G` or `Z` counts as a marker, so FLAC3D group headers
/// such as `ZGROUP "Default" SLOT 1` are read as zones with kind tag `"Default"`.
/// Lines with an unrecognized marker, and recognized lines that fail to parse,
/// both come back as [`GridRecord::Unknown`].
pub(crate) fn classify_line(line: &str) -> GridRecord {
    let mut fields = line.split_whitespace();

    let record = match fields.next() {
        Some(marker) if marker.starts_with('G') => {
            parse_node_record(fields).map(GridRecord::Node)
        }
        Some(marker) if marker.starts_with('Z') => {
            parse_element_record(fields).map(GridRecord::Element)
        }
        _ => return GridRecord::Unknown,
    };

    record.unwrap_or_else(|| {
        debug!(line = line.trim(), "skipping malformed grid record");
        GridRecord::Unknown
    })
}

/// `<id> <x> <y> <z> ...` with the marker already consumed
fn parse_node_record<'a>(mut fields: impl Iterator<Item = &'a str>) -> Option<Node> {
    let _id = fields.next()?;

    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    let z = fields.next()?.parse().ok()?;

    Some(Node::new([x, y, z]))
}

/// `<kind> <token>+` with the marker already consumed
fn parse_element_record<'a>(mut fields: impl Iterator<Item = &'a str>) -> Option<SourceElement> {
    let kind = fields.next()?;

    let raw_nodes: Vec<i64> = fields
        .filter_map(|token| token.parse::<i64>().ok()?.checked_sub(1))
        .collect();

    if raw_nodes.is_empty() {
        return None;
    }

    Some(SourceElement::new(kind.to_string(), raw_nodes))
}
