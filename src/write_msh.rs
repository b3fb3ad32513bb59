use crate::element::type_code_for_tag;
use crate::prelude::*;

use std::fmt;
use std::io::Write;
use std::path::Path;

/// number of tags written for every element; both are always zero
const ELEMENT_TAGS: &str = "2 0 0";

/// Write grid data as a Gmsh 2.2 ascii mesh to a `Writer`
///
/// Node ids are the 1-based position of each node. Each element is written with the
/// type code of its kind tag, two zero tags, and its corner nodes (the raw node list
/// without its leading zone id) as 1-based indices.
pub fn write_msh<W: Write>(mut writer: W, grid: &GridData) -> Result<(), std::io::Error> {
    write!(writer, "{}", MeshText(grid))
}

/// Encode grid data into the text of a Gmsh 2.2 ascii mesh
pub fn encode_msh(grid: &GridData) -> String {
    MeshText(grid).to_string()
}

/// the mesh layout, shared by the streaming and in-memory writers
struct MeshText<'a>(&'a GridData);

impl fmt::Display for MeshText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.0;

        f.write_str("$MeshFormat\n2.2 0 8\n$EndMeshFormat\n\n")?;
        f.write_str("$PhysicalNames\n0\n$EndPhysicalNames\n\n")?;

        writeln!(f, "$Nodes")?;
        writeln!(f, "{}", grid.nodes.len())?;

        let mut buffer = ryu::Buffer::new();

        for (index, node) in grid.nodes.iter().enumerate() {
            write!(f, "{}", index + 1)?;

            for coordinate in node.position {
                write!(f, " {}", format_coordinate(&mut buffer, coordinate))?;
            }

            writeln!(f)?;
        }

        writeln!(f, "$EndNodes\n")?;

        writeln!(f, "$Elements")?;
        writeln!(f, "{}", grid.elements.len())?;

        for (index, element) in grid.elements.iter().enumerate() {
            let type_code = type_code_for_tag(&element.kind);

            write!(f, "{} {} {}", index + 1, type_code, ELEMENT_TAGS)?;

            for node in element.corner_nodes() {
                write!(f, " {}", node + 1)?;
            }

            writeln!(f)?;
        }

        writeln!(f, "$EndElements")
    }
}

/// shortest representation that parses back to the same value
fn format_coordinate(buffer: &mut ryu::Buffer, value: f64) -> &str {
    buffer.format(value)
}

/// Write grid data as a Gmsh mesh file at `path`, replacing any existing file
pub fn write_msh_file(path: &Path, grid: &GridData) -> Result<(), Error> {
    let file = std::fs::File::create(path).map_err(|source| Error::write(path, source))?;
    let mut writer = std::io::BufWriter::new(file);

    write_msh(&mut writer, grid).map_err(|source| Error::write(path, source))?;
    writer.flush().map_err(|source| Error::write(path, source))?;

    info!(
        path = %path.display(),
        nodes = grid.nodes.len(),
        elements = grid.elements.len(),
        "wrote mesh file"
    );

    Ok(())
}
