//! Legacy VTK (`.vtk`) reader.
//!
//! Targets ASCII legacy files. Supported datasets are `UNSTRUCTURED_GRID`
//! (classic `CELLS` lists and the `OFFSETS`/`CONNECTIVITY` layout of file
//! version 5), `POLYDATA`, `STRUCTURED_GRID`, `STRUCTURED_POINTS` and
//! `RECTILINEAR_GRID`. Point attributes (`SCALARS`, `COLOR_SCALARS`,
//! `VECTORS`, `NORMALS`, `TEXTURE_COORDINATES`, `TENSORS` and `FIELD`
//! arrays) become point field arrays in file order; cell attributes are
//! parsed for validation and discarded.

use std::io::Read;
use std::str::{FromStr, SplitWhitespace};

use itertools::Itertools;

use crate::field::DataArray;
use crate::grid::{GridProvider, ImplicitGrid, StructuredGrid, UnstructuredGrid};
use crate::io::{Grid, GridReader};
use crate::mesh_error::MeshNormalizeError;
use crate::topology::CellType;

#[derive(Debug, Default, Clone)]
pub struct LegacyVtkReader;

fn parse_err(msg: impl Into<String>) -> MeshNormalizeError {
    MeshNormalizeError::MeshIoParse(msg.into())
}

/// `a * b` for counts read from the file.
fn count_product(a: usize, b: usize, what: &str) -> Result<usize, MeshNormalizeError> {
    a.checked_mul(b)
        .ok_or_else(|| parse_err(format!("{what} count {a} x {b} overflows")))
}

/// Whitespace tokenizer over the body of a legacy file.
///
/// Tracks how many tokens are left so declared counts can be checked
/// before anything is allocated for them.
struct Tokens<'a> {
    inner: std::iter::Peekable<SplitWhitespace<'a>>,
    remaining: usize,
}

impl<'a> Tokens<'a> {
    fn new(body: &'a str) -> Self {
        Self {
            inner: body.split_whitespace().peekable(),
            remaining: body.split_whitespace().count(),
        }
    }

    fn peek(&mut self) -> Option<&'a str> {
        self.inner.peek().copied()
    }

    fn next_token(&mut self, what: &str) -> Result<&'a str, MeshNormalizeError> {
        let token = self
            .inner
            .next()
            .ok_or_else(|| parse_err(format!("missing {what}")))?;
        self.remaining -= 1;
        Ok(token)
    }

    fn parse<T: FromStr>(&mut self, what: &str) -> Result<T, MeshNormalizeError> {
        let token = self.next_token(what)?;
        token
            .parse()
            .map_err(|_| parse_err(format!("invalid {what} `{token}`")))
    }

    fn expect(&mut self, keyword: &str) -> Result<(), MeshNormalizeError> {
        let token = self.next_token(keyword)?;
        if token.eq_ignore_ascii_case(keyword) {
            Ok(())
        } else {
            Err(parse_err(format!("expected {keyword}, found `{token}`")))
        }
    }

    fn values<T: FromStr>(&mut self, count: usize, what: &str) -> Result<Vec<T>, MeshNormalizeError> {
        if count > self.remaining {
            return Err(parse_err(format!(
                "expected {count} {what}s, only {} tokens left",
                self.remaining
            )));
        }
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.parse(what)?);
        }
        Ok(values)
    }
}

fn is_keyword(token: &str, keyword: &str) -> bool {
    token.eq_ignore_ascii_case(keyword)
}

/// `POINTS n type` followed by `3n` coordinates.
fn parse_points(tokens: &mut Tokens<'_>) -> Result<Vec<[f64; 3]>, MeshNormalizeError> {
    tokens.expect("POINTS")?;
    let count: usize = tokens.parse("point count")?;
    tokens.next_token("point type")?;
    let coords: Vec<f64> = tokens.values(count_product(count, 3, "point")?, "point value")?;
    Ok(coords.into_iter().tuples().map(|(x, y, z)| [x, y, z]).collect())
}

/// `DIMENSIONS nx ny nz`. The lattice point count must be addressable by a
/// `u32` index.
fn parse_dimensions(tokens: &mut Tokens<'_>) -> Result<[usize; 3], MeshNormalizeError> {
    tokens.expect("DIMENSIONS")?;
    let dimensions = [
        tokens.parse("x dimension")?,
        tokens.parse("y dimension")?,
        tokens.parse("z dimension")?,
    ];
    let points = count_product(dimensions[0], dimensions[1], "lattice point")
        .and_then(|n| count_product(n, dimensions[2], "lattice point"))?;
    if u32::try_from(points).is_err() {
        return Err(parse_err(format!(
            "DIMENSIONS {dimensions:?} exceed the addressable point range"
        )));
    }
    Ok(dimensions)
}

fn parse_triple(tokens: &mut Tokens<'_>, what: &str) -> Result<[f64; 3], MeshNormalizeError> {
    Ok([tokens.parse(what)?, tokens.parse(what)?, tokens.parse(what)?])
}

/// `n size` followed by `n` lists of `count id...`.
fn parse_cell_lists(tokens: &mut Tokens<'_>, what: &str) -> Result<Vec<Vec<usize>>, MeshNormalizeError> {
    let count: usize = tokens.parse(&format!("{what} count"))?;
    let size: usize = tokens.parse(&format!("{what} size"))?;
    if is_keyword(tokens.peek().unwrap_or(""), "OFFSETS") {
        return parse_offset_lists(tokens, count, size, what);
    }
    let mut lists = Vec::new();
    let mut consumed = 0usize;
    for _ in 0..count {
        let len: usize = tokens.parse(&format!("{what} length"))?;
        lists.push(tokens.values(len, &format!("{what} point id"))?);
        consumed = consumed.saturating_add(len).saturating_add(1);
    }
    if consumed != size {
        return Err(parse_err(format!(
            "{what} size is {size} but the lists hold {consumed} values"
        )));
    }
    Ok(lists)
}

/// File-version-5 layout: `OFFSETS type` with `offsets` values and
/// `CONNECTIVITY type` with `ids` values.
fn parse_offset_lists(
    tokens: &mut Tokens<'_>,
    offsets: usize,
    ids: usize,
    what: &str,
) -> Result<Vec<Vec<usize>>, MeshNormalizeError> {
    tokens.expect("OFFSETS")?;
    tokens.next_token("offset type")?;
    let offsets: Vec<usize> = tokens.values(offsets, &format!("{what} offset"))?;
    tokens.expect("CONNECTIVITY")?;
    tokens.next_token("connectivity type")?;
    let connectivity: Vec<usize> = tokens.values(ids, &format!("{what} point id"))?;
    offsets
        .iter()
        .tuple_windows()
        .map(|(&start, &end)| {
            connectivity
                .get(start..end)
                .map(<[usize]>::to_vec)
                .ok_or_else(|| parse_err(format!("{what} offsets {start}..{end} out of range")))
        })
        .collect()
}

fn parse_unstructured(tokens: &mut Tokens<'_>) -> Result<UnstructuredGrid, MeshNormalizeError> {
    let points = parse_points(tokens)?;
    let mut grid = UnstructuredGrid::new(points);
    if !tokens.peek().is_some_and(|t| is_keyword(t, "CELLS")) {
        return Ok(grid);
    }
    tokens.expect("CELLS")?;
    let lists = parse_cell_lists(tokens, "cell")?;
    tokens.expect("CELL_TYPES")?;
    let count: usize = tokens.parse("cell type count")?;
    if count != lists.len() {
        return Err(parse_err(format!(
            "{count} cell types for {} cells",
            lists.len()
        )));
    }
    for ids in lists {
        let code: u8 = tokens.parse("cell type")?;
        grid.try_add_cell(CellType::from_vtk_code(code), ids)?;
    }
    Ok(grid)
}

fn parse_polydata(tokens: &mut Tokens<'_>) -> Result<UnstructuredGrid, MeshNormalizeError> {
    let points = parse_points(tokens)?;
    let mut verts = Vec::new();
    let mut lines = Vec::new();
    let mut polys = Vec::new();
    let mut strips = Vec::new();
    while let Some(token) = tokens.peek() {
        let section = match token.to_ascii_uppercase().as_str() {
            "VERTICES" => &mut verts,
            "LINES" => &mut lines,
            "POLYGONS" => &mut polys,
            "TRIANGLE_STRIPS" => &mut strips,
            _ => break,
        };
        tokens.next_token(token)?;
        section.extend(parse_cell_lists(tokens, &token.to_ascii_lowercase())?);
    }

    // Cell order is vertices, lines, polygons, strips regardless of file order.
    let mut grid = UnstructuredGrid::polydata(points);
    for ids in verts {
        let kind = if ids.len() == 1 { CellType::Vertex } else { CellType::PolyVertex };
        grid.try_add_cell(kind, ids)?;
    }
    for ids in lines {
        let kind = if ids.len() == 2 { CellType::Segment } else { CellType::PolyLine };
        grid.try_add_cell(kind, ids)?;
    }
    for ids in polys {
        let kind = match ids.len() {
            3 => CellType::Triangle,
            4 => CellType::Quadrilateral,
            _ => CellType::Polygon,
        };
        grid.try_add_cell(kind, ids)?;
    }
    for ids in strips {
        grid.try_add_cell(CellType::TriangleStrip, ids)?;
    }
    Ok(grid)
}

fn parse_structured(tokens: &mut Tokens<'_>) -> Result<StructuredGrid, MeshNormalizeError> {
    let dimensions = parse_dimensions(tokens)?;
    let points = parse_points(tokens)?;
    StructuredGrid::try_new(dimensions, points)
}

fn parse_structured_points(tokens: &mut Tokens<'_>) -> Result<ImplicitGrid, MeshNormalizeError> {
    let mut dimensions = None;
    let mut origin = [0.0; 3];
    let mut spacing = [1.0; 3];
    while let Some(token) = tokens.peek() {
        match token.to_ascii_uppercase().as_str() {
            "DIMENSIONS" => dimensions = Some(parse_dimensions(tokens)?),
            "ORIGIN" => {
                tokens.next_token(token)?;
                origin = parse_triple(tokens, "origin")?;
            }
            "SPACING" | "ASPECT_RATIO" => {
                tokens.next_token(token)?;
                spacing = parse_triple(tokens, "spacing")?;
            }
            _ => break,
        }
    }
    let dimensions = dimensions.ok_or_else(|| parse_err("missing DIMENSIONS"))?;
    Ok(ImplicitGrid::image(dimensions, origin, spacing))
}

fn parse_rectilinear(tokens: &mut Tokens<'_>) -> Result<ImplicitGrid, MeshNormalizeError> {
    let dimensions = parse_dimensions(tokens)?;
    let mut axis = |keyword: &str, expected: usize| -> Result<Vec<f64>, MeshNormalizeError> {
        tokens.expect(keyword)?;
        let count: usize = tokens.parse("coordinate count")?;
        tokens.next_token("coordinate type")?;
        if count != expected {
            return Err(parse_err(format!(
                "{keyword} has {count} values, DIMENSIONS says {expected}"
            )));
        }
        tokens.values(count, "coordinate")
    };
    let x = axis("X_COORDINATES", dimensions[0])?;
    let y = axis("Y_COORDINATES", dimensions[1])?;
    let z = axis("Z_COORDINATES", dimensions[2])?;
    Ok(ImplicitGrid::rectilinear(x, y, z))
}

/// One attribute array read from a `POINT_DATA`/`CELL_DATA` block.
fn parse_attribute(
    tokens: &mut Tokens<'_>,
    keyword: &str,
    tuples: usize,
) -> Result<Vec<DataArray>, MeshNormalizeError> {
    let array = |name: &str,
                 components: usize,
                 tokens: &mut Tokens<'_>|
     -> Result<DataArray, MeshNormalizeError> {
        let total = count_product(tuples, components, &format!("`{name}`"))?;
        let values = tokens.values(total, &format!("`{name}` value"))?;
        DataArray::try_new(name, components, values)
    };
    match keyword {
        "SCALARS" => {
            let name = tokens.next_token("scalars name")?;
            tokens.next_token("scalars type")?;
            let components = match tokens.peek() {
                Some(t) if t.bytes().all(|b| b.is_ascii_digit()) => tokens.parse("scalars components")?,
                _ => 1,
            };
            if tokens.peek().is_some_and(|t| is_keyword(t, "LOOKUP_TABLE")) {
                tokens.next_token("LOOKUP_TABLE")?;
                tokens.next_token("lookup table name")?;
            }
            Ok(vec![array(name, components, tokens)?])
        }
        "COLOR_SCALARS" => {
            let name = tokens.next_token("color scalars name")?;
            let components: usize = tokens.parse("color scalars components")?;
            Ok(vec![array(name, components, tokens)?])
        }
        "VECTORS" | "NORMALS" => {
            let name = tokens.next_token("vector name")?;
            tokens.next_token("vector type")?;
            Ok(vec![array(name, 3, tokens)?])
        }
        "TEXTURE_COORDINATES" => {
            let name = tokens.next_token("texture coordinates name")?;
            let components: usize = tokens.parse("texture coordinates dimension")?;
            tokens.next_token("texture coordinates type")?;
            Ok(vec![array(name, components, tokens)?])
        }
        "TENSORS" => {
            let name = tokens.next_token("tensor name")?;
            tokens.next_token("tensor type")?;
            Ok(vec![array(name, 9, tokens)?])
        }
        "FIELD" => {
            tokens.next_token("field data name")?;
            let count: usize = tokens.parse("field array count")?;
            let mut arrays = Vec::new();
            for _ in 0..count {
                let name = tokens.next_token("field array name")?;
                let components: usize = tokens.parse("field array components")?;
                let found: usize = tokens.parse("field array tuples")?;
                tokens.next_token("field array type")?;
                let total = count_product(found, components, &format!("`{name}`"))?;
                let values = tokens.values(total, &format!("`{name}` value"))?;
                if found != tuples {
                    return Err(MeshNormalizeError::FieldLengthMismatch {
                        field: name.to_string(),
                        expected: tuples,
                        found,
                    });
                }
                arrays.push(DataArray::try_new(name, components, values)?);
            }
            Ok(arrays)
        }
        "LOOKUP_TABLE" => {
            tokens.next_token("lookup table name")?;
            let size: usize = tokens.parse("lookup table size")?;
            let total = count_product(size, 4, "lookup table")?;
            tokens.values::<f64>(total, "lookup table value")?;
            Ok(Vec::new())
        }
        other => Err(parse_err(format!("unexpected token `{other}`"))),
    }
}

/// Attribute blocks following the geometry. Point arrays are returned in
/// file order; cell arrays are dropped.
fn parse_attributes(
    tokens: &mut Tokens<'_>,
    point_count: usize,
    cell_count: usize,
) -> Result<Vec<DataArray>, MeshNormalizeError> {
    let mut point_arrays = Vec::new();
    let mut block: Option<(bool, usize)> = None;
    while let Some(token) = tokens.peek() {
        tokens.next_token(token)?;
        let keyword = token.to_ascii_uppercase();
        match keyword.as_str() {
            "POINT_DATA" | "CELL_DATA" => {
                let on_points = keyword == "POINT_DATA";
                let count: usize = tokens.parse("attribute tuple count")?;
                let expected = if on_points { point_count } else { cell_count };
                if count != expected {
                    return Err(parse_err(format!(
                        "{keyword} {count} does not match {expected} {}",
                        if on_points { "points" } else { "cells" }
                    )));
                }
                block = Some((on_points, count));
            }
            _ => {
                let Some((on_points, tuples)) = block else {
                    return Err(parse_err(format!("unexpected token `{token}`")));
                };
                let arrays = parse_attribute(tokens, &keyword, tuples)?;
                if on_points {
                    point_arrays.extend(arrays);
                } else if !arrays.is_empty() {
                    log::debug!("ignoring {} cell data array(s)", arrays.len());
                }
            }
        }
    }
    Ok(point_arrays)
}

impl GridReader for LegacyVtkReader {
    fn read<R: Read>(&self, mut reader: R) -> Result<Grid, MeshNormalizeError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let mut lines = input.lines();
        let version = lines
            .next()
            .ok_or_else(|| parse_err("missing version line"))?;
        if !version.trim_start().starts_with("# vtk DataFile") {
            return Err(parse_err("not a legacy VTK file"));
        }
        let _title = lines.next();
        let format = lines
            .next()
            .ok_or_else(|| parse_err("missing ASCII line"))?;
        if !format.trim().eq_ignore_ascii_case("ASCII") {
            return Err(parse_err(format!(
                "VTK ASCII format required, found `{}`",
                format.trim()
            )));
        }

        let body = lines.collect::<Vec<_>>().join("\n");
        let mut tokens = Tokens::new(&body);
        tokens.expect("DATASET")?;
        let dataset = tokens.next_token("dataset type")?.to_ascii_uppercase();
        let mut grid = match dataset.as_str() {
            "UNSTRUCTURED_GRID" => Grid::Unstructured(parse_unstructured(&mut tokens)?),
            "POLYDATA" => Grid::Unstructured(parse_polydata(&mut tokens)?),
            "STRUCTURED_GRID" => Grid::Structured(parse_structured(&mut tokens)?),
            "STRUCTURED_POINTS" => Grid::Implicit(parse_structured_points(&mut tokens)?),
            "RECTILINEAR_GRID" => Grid::Implicit(parse_rectilinear(&mut tokens)?),
            other => return Err(parse_err(format!("unsupported dataset {other}"))),
        };

        let arrays = parse_attributes(&mut tokens, grid.point_count(), grid.cell_count())?;
        for array in arrays {
            grid.try_add_point_array(array)?;
        }
        log::debug!(
            "read legacy VTK {}: {} points, {} cells, {} point arrays",
            grid.kind().name(),
            grid.point_count(),
            grid.cell_count(),
            grid.point_arrays().map_or(0, |a| a.len())
        );
        Ok(grid)
    }
}
