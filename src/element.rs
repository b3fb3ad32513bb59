//! Element shape taxonomy shared by the mesh writer and the node order corrector.
//!
//! FLAC3D names its zone shapes with short kind tags (`B8`, `W6`, `P5`, `T4`)
//! while Gmsh identifies them with numeric type codes. Each shape also carries the
//! fixed permutation that takes the FLAC3D corner numbering to Gmsh's canonical
//! corner numbering.

/// Type code written for any kind tag that is not in the table.
pub const FALLBACK_TYPE_CODE: u32 = 4;

/// The closed set of volume shapes understood by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Tetrahedron,
    Hexahedron,
    Wedge,
    Pyramid,
}

impl ElementKind {
    /// every supported shape, in ascending type code order
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Tetrahedron,
        ElementKind::Hexahedron,
        ElementKind::Wedge,
        ElementKind::Pyramid,
    ];

    /// look up a shape from its FLAC3D kind tag (`T4`, `B8`, `W6`, `P5`)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "T4" => Some(Self::Tetrahedron),
            "B8" => Some(Self::Hexahedron),
            "W6" => Some(Self::Wedge),
            "P5" => Some(Self::Pyramid),
            _ => None,
        }
    }

    /// look up a shape from its Gmsh element type code
    pub fn from_type_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_code() == code)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Tetrahedron => "T4",
            Self::Hexahedron => "B8",
            Self::Wedge => "W6",
            Self::Pyramid => "P5",
        }
    }

    /// Gmsh element type code
    pub fn type_code(&self) -> u32 {
        match self {
            Self::Tetrahedron => 4,
            Self::Hexahedron => 5,
            Self::Wedge => 6,
            Self::Pyramid => 7,
        }
    }

    /// number of corner nodes an element of this shape carries
    pub fn corner_count(&self) -> usize {
        self.permutation().len()
    }

    /// Source position for every destination position: output node `i` is taken
    /// from input node `permutation()[i]`.
    pub fn permutation(&self) -> &'static [usize] {
        match self {
            Self::Tetrahedron => &[0, 2, 3, 1],
            Self::Hexahedron => &[2, 4, 7, 5, 0, 1, 6, 3],
            Self::Wedge => &[5, 2, 4, 3, 0, 1],
            Self::Pyramid => &[2, 0, 1, 4, 3],
        }
    }

    /// Reorder `nodes` into Gmsh corner order.
    ///
    /// Returns `None` when the number of nodes does not match the shape, in which
    /// case the caller should leave the record untouched.
    pub fn reorder<T: Copy>(&self, nodes: &[T]) -> Option<Vec<T>> {
        let permutation = self.permutation();

        if nodes.len() != permutation.len() {
            return None;
        }

        Some(permutation.iter().map(|&source| nodes[source]).collect())
    }
}

/// Map a FLAC3D kind tag to a Gmsh type code.
///
/// Unknown tags are written as tetrahedra (type code 4) rather than rejected.
pub fn type_code_for_tag(tag: &str) -> u32 {
    ElementKind::from_tag(tag)
        .map(|kind| kind.type_code())
        .unwrap_or(FALLBACK_TYPE_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_map_to_type_codes() {
        assert_eq!(type_code_for_tag("T4"), 4);
        assert_eq!(type_code_for_tag("B8"), 5);
        assert_eq!(type_code_for_tag("W6"), 6);
        assert_eq!(type_code_for_tag("P5"), 7);
    }

    #[test]
    fn unknown_tag_falls_back_to_tetrahedron() {
        assert_eq!(type_code_for_tag("QX9Z2"), FALLBACK_TYPE_CODE);
        assert_eq!(type_code_for_tag(""), FALLBACK_TYPE_CODE);
        // tags are case sensitive
        assert_eq!(type_code_for_tag("b8"), FALLBACK_TYPE_CODE);
    }

    #[test]
    fn type_code_round_trips_through_kind() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementKind::from_type_code(kind.type_code()), Some(kind));
            assert_eq!(ElementKind::from_tag(kind.tag()), Some(kind));
        }

        assert_eq!(ElementKind::from_type_code(1), None);
        assert_eq!(ElementKind::from_type_code(8), None);
    }

    #[test]
    fn corner_counts() {
        assert_eq!(ElementKind::Tetrahedron.corner_count(), 4);
        assert_eq!(ElementKind::Hexahedron.corner_count(), 8);
        assert_eq!(ElementKind::Wedge.corner_count(), 6);
        assert_eq!(ElementKind::Pyramid.corner_count(), 5);
    }

    #[test]
    fn permutations_are_bijections() {
        for kind in ElementKind::ALL {
            let mut seen = kind.permutation().to_vec();
            seen.sort_unstable();
            let expected: Vec<usize> = (0..kind.corner_count()).collect();
            assert_eq!(seen, expected, "{:?} permutation is not a bijection", kind);
        }
    }

    #[test]
    fn hexahedron_reorder() {
        let nodes = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
        let reordered = ElementKind::Hexahedron.reorder(&nodes).unwrap();
        assert_eq!(reordered, vec!['c', 'e', 'h', 'f', 'a', 'b', 'g', 'd']);
    }

    #[test]
    fn reorder_is_not_an_involution() {
        for kind in ElementKind::ALL {
            let nodes: Vec<usize> = (1..=kind.corner_count()).collect();
            let once = kind.reorder(&nodes).unwrap();
            let twice = kind.reorder(&once).unwrap();

            assert_ne!(once, nodes, "{:?}", kind);
            assert_ne!(twice, nodes, "{:?} permutation is self inverse", kind);
            assert_ne!(twice, once, "{:?}", kind);
        }
    }

    #[test]
    fn reorder_rejects_wrong_length() {
        let seven: Vec<u64> = (1..=7).collect();
        assert_eq!(ElementKind::Hexahedron.reorder(&seven), None);
        assert_eq!(ElementKind::Tetrahedron.reorder(&seven[..3]), None);
    }
}
