use f3grid2msh::{convert, ConvertOptions, ElementKind, Stage};

use std::path::Path;

const UNIT_TETRAHEDRON: &str = "\
* FLAC3D grid
* GRIDPOINTS
G 1 0.0 0.0 0.0
G 2 1.0 0.0 0.0
G 3 0.0 1.0 0.0
G 4 0.0 0.0 1.0
* ZONES
Z T4 1 1 2 3 4
* GROUPS
ZGROUP \"Default\" SLOT 1
1
";

/// a unit cube split into one hexahedron plus a wedge and a pyramid stacked on top
const MIXED: &str = "\
G 1 0 0 0
G 2 1 0 0
G 3 0 1 0
G 4 1 1 0
G 5 0 0 1
G 6 1 0 1
G 7 0 1 1
G 8 1 1 1
G 9 0 0 2
G 10 1 0 2
G 11 0.5 0.5 3
Z B8 1 1 2 3 5 4 7 6 8
Z W6 2 5 6 9 7 8 10
Z P5 3 5 6 7 8 11
Z QX9Z2 4 1 2 3 4
";

fn write_input(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn block<'a>(text: &'a str, marker: &str) -> (usize, Vec<&'a str>) {
    let end = format!("$End{}", &marker[1..]);
    let mut lines = text.lines().skip_while(|line| *line != marker).skip(1);
    let count = lines.next().unwrap().parse().unwrap();
    let records = lines.take_while(|line| *line != end).collect();
    (count, records)
}

#[test]
fn unit_tetrahedron_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "input.f3grid", UNIT_TETRAHEDRON);
    let options = ConvertOptions::new(&input, dir.path().join("output.msh"));

    let report = convert(&options).unwrap();

    assert_eq!(report.nodes, 4);
    // the group header is read as a zone without corners
    assert_eq!(report.elements, 2);
    assert_eq!(report.reorder.corrected, 1);
    assert_eq!(report.reorder.passed_through, 1);

    let output = std::fs::read_to_string(&options.output).unwrap();

    let (node_count, nodes) = block(&output, "$Nodes");
    assert_eq!(node_count, 4);
    assert_eq!(
        nodes,
        vec!["1 0.0 0.0 0.0", "2 1.0 0.0 0.0", "3 0.0 1.0 0.0", "4 0.0 0.0 1.0"]
    );

    let (element_count, elements) = block(&output, "$Elements");
    assert_eq!(element_count, 2);
    assert_eq!(elements[1], "2 4 2 0 0");

    let fields: Vec<u32> = elements[0]
        .split_whitespace()
        .map(|field| field.parse().unwrap())
        .collect();
    assert_eq!(fields[1], ElementKind::Tetrahedron.type_code());

    let expected = ElementKind::Tetrahedron.reorder(&[1u32, 2, 3, 4]).unwrap();
    assert_eq!(&fields[5..], expected.as_slice());
    assert_eq!(elements[0], "1 4 2 0 0 1 3 4 2");
}

#[test]
fn intermediate_keeps_source_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "input.f3grid", UNIT_TETRAHEDRON);
    let options = ConvertOptions::new(&input, dir.path().join("output.msh"))
        .with_intermediate(dir.path().join("convert.msh"));

    let report = convert(&options).unwrap();
    assert_eq!(report.intermediate.as_deref(), Some(options.intermediate.as_path()));

    let intermediate = std::fs::read_to_string(&options.intermediate).unwrap();
    let (_, elements) = block(&intermediate, "$Elements");
    assert_eq!(elements, vec!["1 4 2 0 0 1 2 3 4", "2 4 2 0 0"]);
}

#[test]
fn discarded_intermediate_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "input.f3grid", UNIT_TETRAHEDRON);
    let options =
        ConvertOptions::new(&input, dir.path().join("output.msh")).keep_intermediate(false);

    let report = convert(&options).unwrap();

    assert_eq!(report.intermediate, None);
    assert!(!options.intermediate.exists());
    assert!(options.output.exists());
}

#[test]
fn mixed_shapes() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "mixed.f3grid", MIXED);
    let options = ConvertOptions::new(&input, dir.path().join("mixed.msh"));

    let report = convert(&options).unwrap();

    assert_eq!(report.nodes, 11);
    assert_eq!(report.elements, 4);
    assert_eq!(
        report.kind_counts,
        vec![
            ("B8".to_string(), 1),
            ("W6".to_string(), 1),
            ("P5".to_string(), 1),
            ("QX9Z2".to_string(), 1),
        ]
    );
    assert_eq!(report.summary.count_of(4), 1);
    assert_eq!(report.summary.count_of(5), 1);
    assert_eq!(report.summary.count_of(6), 1);
    assert_eq!(report.summary.count_of(7), 1);

    let output = std::fs::read_to_string(&options.output).unwrap();
    let (count, elements) = block(&output, "$Elements");

    assert_eq!(count, elements.len());
    assert_eq!(
        elements,
        vec![
            "1 5 2 0 0 3 4 8 7 1 2 6 5",
            "2 6 2 0 0 10 9 8 7 5 6",
            "3 7 2 0 0 7 5 6 11 8",
            // unknown kinds are written as tetrahedra and reordered as such
            "4 4 2 0 0 1 3 4 2",
        ]
    );
}

#[test]
fn header_counts_match_records() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "mixed.f3grid", MIXED);
    let options = ConvertOptions::new(&input, dir.path().join("mixed.msh"));
    convert(&options).unwrap();

    for path in [&options.intermediate, &options.output] {
        let text = std::fs::read_to_string(path).unwrap();

        let (node_count, nodes) = block(&text, "$Nodes");
        assert_eq!(node_count, nodes.len());

        let (element_count, elements) = block(&text, "$Elements");
        assert_eq!(element_count, elements.len());
    }
}

#[test]
fn coordinates_round_trip() {
    let grid = "G 1 0.1 -2.5e-3 123456.789\nG 2 3.14159265358979 1e300 -0\n";

    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "coords.f3grid", grid);
    let options = ConvertOptions::new(&input, dir.path().join("coords.msh"));
    convert(&options).unwrap();

    let output = std::fs::read_to_string(&options.output).unwrap();
    let (_, nodes) = block(&output, "$Nodes");

    let parsed: Vec<Vec<f64>> = nodes
        .iter()
        .map(|line| {
            line.split_whitespace()
                .skip(1)
                .map(|value| value.parse().unwrap())
                .collect()
        })
        .collect();

    assert_eq!(parsed[0], vec![0.1, -2.5e-3, 123456.789]);
    assert_eq!(parsed[1], vec![3.14159265358979, 1e300, -0.0]);
}

#[test]
fn missing_grid_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let options = ConvertOptions::new(dir.path().join("absent.f3grid"), dir.path().join("out.msh"));

    let err = convert(&options).unwrap_err();

    assert_eq!(err.stage, Stage::ReadGrid);
    assert!(!options.output.exists());
}
