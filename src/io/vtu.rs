//! VTK XML unstructured grid (`.vtu`) reader.
//!
//! Reads the single `Piece` of an `UnstructuredGrid` document whose data
//! arrays are stored inline with `format="ascii"`; binary and appended data
//! are rejected. Point data arrays become point field arrays in document
//! order, keeping `ComponentName<i>` labels when every component has one.
//! Cell data is discarded.

use std::io::Read;
use std::str::FromStr;

use itertools::Itertools;
use roxmltree::{Document, Node};

use crate::field::DataArray;
use crate::grid::{GridProvider, UnstructuredGrid};
use crate::io::{Grid, GridReader};
use crate::mesh_error::MeshNormalizeError;
use crate::topology::CellType;

#[derive(Debug, Default, Clone)]
pub struct VtuReader;

fn parse_err(msg: impl Into<String>) -> MeshNormalizeError {
    MeshNormalizeError::MeshIoParse(msg.into())
}

fn child<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> Result<Node<'a, 'input>, MeshNormalizeError> {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .ok_or_else(|| parse_err(format!("missing <{tag}>")))
}

fn data_arrays<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.has_tag_name("DataArray"))
}

fn named_array<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Result<Node<'a, 'input>, MeshNormalizeError> {
    data_arrays(node)
        .find(|n| n.attribute("Name") == Some(name))
        .ok_or_else(|| parse_err(format!("missing `{name}` DataArray")))
}

fn count_attribute(node: Node<'_, '_>, name: &str) -> Result<usize, MeshNormalizeError> {
    let raw = node
        .attribute(name)
        .ok_or_else(|| parse_err(format!("missing {name}")))?;
    raw.trim()
        .parse()
        .map_err(|_| parse_err(format!("invalid {name} `{raw}`")))
}

/// Inline ASCII contents of a `<DataArray>`.
fn array_values<T: FromStr>(node: Node<'_, '_>) -> Result<Vec<T>, MeshNormalizeError> {
    let name = node.attribute("Name").unwrap_or("unnamed");
    let format = node.attribute("format").unwrap_or("ascii");
    if !format.eq_ignore_ascii_case("ascii") {
        return Err(parse_err(format!(
            "DataArray `{name}` is stored as {format}; only ascii is supported"
        )));
    }
    node.text()
        .unwrap_or("")
        .split_whitespace()
        .map(|token| {
            token
                .parse()
                .map_err(|_| parse_err(format!("invalid value `{token}` in DataArray `{name}`")))
        })
        .collect()
}

fn parse_points(piece: Node<'_, '_>, count: usize) -> Result<Vec<[f64; 3]>, MeshNormalizeError> {
    let array = data_arrays(child(piece, "Points")?)
        .next()
        .ok_or_else(|| parse_err("missing Points DataArray"))?;
    let coords: Vec<f64> = array_values(array)?;
    if coords.len() / 3 != count || coords.len() % 3 != 0 {
        return Err(parse_err(format!(
            "NumberOfPoints is {count} but Points holds {} values",
            coords.len()
        )));
    }
    Ok(coords.into_iter().tuples().map(|(x, y, z)| [x, y, z]).collect())
}

/// `connectivity`, end `offsets` and `types` arrays of `<Cells>`.
fn parse_cells(
    piece: Node<'_, '_>,
    count: usize,
) -> Result<Vec<(CellType, Vec<usize>)>, MeshNormalizeError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let cells = child(piece, "Cells")?;
    let connectivity: Vec<usize> = array_values(named_array(cells, "connectivity")?)?;
    let offsets: Vec<usize> = array_values(named_array(cells, "offsets")?)?;
    let types: Vec<u8> = array_values(named_array(cells, "types")?)?;
    if offsets.len() != count || types.len() != count {
        return Err(parse_err(format!(
            "NumberOfCells is {count} but Cells holds {} offsets and {} types",
            offsets.len(),
            types.len()
        )));
    }
    std::iter::once(0)
        .chain(offsets)
        .tuple_windows()
        .zip(types)
        .map(|((start, end), code)| {
            connectivity
                .get(start..end)
                .map(|ids| (CellType::from_vtk_code(code), ids.to_vec()))
                .ok_or_else(|| parse_err(format!("cell offsets {start}..{end} out of range")))
        })
        .collect()
}

fn parse_point_array(node: Node<'_, '_>) -> Result<DataArray, MeshNormalizeError> {
    let name = node
        .attribute("Name")
        .ok_or_else(|| parse_err("PointData DataArray without a Name"))?;
    let components = match node.attribute("NumberOfComponents") {
        Some(_) => count_attribute(node, "NumberOfComponents")?,
        None => 1,
    };
    let array = DataArray::try_new(name, components, array_values(node)?)?;
    let labels: Option<Vec<&str>> = (0..components)
        .map(|c| node.attribute(format!("ComponentName{c}").as_str()))
        .collect();
    match labels {
        Some(labels) => array.try_with_component_names(labels),
        None => Ok(array),
    }
}

impl GridReader for VtuReader {
    fn read<R: Read>(&self, mut reader: R) -> Result<Grid, MeshNormalizeError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let doc = Document::parse(&input)
            .map_err(|err| parse_err(format!("XML parse error: {err}")))?;

        let root = doc.root_element();
        if !root.has_tag_name("VTKFile") {
            return Err(parse_err("not a VTK XML file"));
        }
        match root.attribute("type") {
            Some("UnstructuredGrid") => {}
            Some(other) => return Err(parse_err(format!("unsupported VTK XML type {other}"))),
            None => return Err(parse_err("VTKFile without a type")),
        }
        let grid_node = child(root, "UnstructuredGrid")?;
        let mut pieces = grid_node.children().filter(|n| n.has_tag_name("Piece"));
        let piece = pieces
            .next()
            .ok_or_else(|| parse_err("missing <Piece>"))?;
        if pieces.next().is_some() {
            return Err(parse_err("multi-piece files are not supported"));
        }

        let point_count = count_attribute(piece, "NumberOfPoints")?;
        let cell_count = count_attribute(piece, "NumberOfCells")?;
        let mut grid = UnstructuredGrid::new(parse_points(piece, point_count)?);
        for (kind, ids) in parse_cells(piece, cell_count)? {
            grid.try_add_cell(kind, ids)?;
        }
        if let Some(point_data) = piece.children().find(|n| n.has_tag_name("PointData")) {
            for node in data_arrays(point_data) {
                grid.try_add_point_array(parse_point_array(node)?)?;
            }
        }
        if piece.children().any(|n| n.has_tag_name("CellData")) {
            log::debug!("ignoring cell data in VTK XML unstructured grid");
        }

        let grid = Grid::Unstructured(grid);
        log::debug!(
            "read VTK XML UnstructuredGrid: {} points, {} cells, {} point arrays",
            grid.point_count(),
            grid.cell_count(),
            grid.point_arrays().map_or(0, |a| a.len())
        );
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(src: &str) -> Result<Grid, MeshNormalizeError> {
        VtuReader.read(src.as_bytes())
    }

    #[test]
    fn binary_arrays_are_rejected() {
        let src = r#"<VTKFile type="UnstructuredGrid"><UnstructuredGrid>
            <Piece NumberOfPoints="1" NumberOfCells="0">
              <Points><DataArray NumberOfComponents="3" format="binary">AAAA</DataArray></Points>
            </Piece></UnstructuredGrid></VTKFile>"#;
        assert!(matches!(read(src), Err(MeshNormalizeError::MeshIoParse(msg)) if msg.contains("binary")));
    }

    #[test]
    fn other_xml_datasets_are_rejected() {
        let src = r#"<VTKFile type="PolyData"><PolyData/></VTKFile>"#;
        assert!(matches!(read(src), Err(MeshNormalizeError::MeshIoParse(_))));
        assert!(matches!(read("<html/>"), Err(MeshNormalizeError::MeshIoParse(_))));
        assert!(matches!(read("<VTKFile"), Err(MeshNormalizeError::MeshIoParse(_))));
    }

    #[test]
    fn offsets_must_stay_inside_connectivity() {
        let src = r#"<VTKFile type="UnstructuredGrid"><UnstructuredGrid>
            <Piece NumberOfPoints="3" NumberOfCells="1">
              <Points><DataArray NumberOfComponents="3" format="ascii">0 0 0 1 0 0 0 1 0</DataArray></Points>
              <Cells>
                <DataArray Name="connectivity" format="ascii">0 1 2</DataArray>
                <DataArray Name="offsets" format="ascii">4</DataArray>
                <DataArray Name="types" format="ascii">5</DataArray>
              </Cells>
            </Piece></UnstructuredGrid></VTKFile>"#;
        assert!(matches!(read(src), Err(MeshNormalizeError::MeshIoParse(_))));
    }
}
