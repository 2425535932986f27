//! VTK XML unstructured grid (`.vtu`) reader/writer, ASCII mode.
//!
//! The writer emits one `Piece` with `PointData`, `Points` and `Cells`
//! (`connectivity`, `offsets`, `types`). Offsets follow the XML convention:
//! entry `i` is the end of cell `i` in `connectivity`. Component names are
//! written as `ComponentName{i}` attributes, which ParaView shows in place
//! of `_0`, `_1`, ...

use crate::algs::connectivity::CellArrays;
use crate::mesh_error::MeshError;
use itertools::Itertools;
use roxmltree::{Document, Node};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// A named per-point array with a fixed number of components.
#[derive(Clone, Debug, PartialEq)]
pub struct PointDataArray {
    pub name: String,
    pub components: usize,
    /// Optional names, one per component.
    pub component_names: Vec<String>,
    /// Interleaved values, `components` per point.
    pub values: Vec<f64>,
}

impl PointDataArray {
    pub fn tuples(&self) -> usize {
        self.values.len() / self.components.max(1)
    }
}

/// Output grid: points, one homogeneous cell block, point data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnstructuredGrid {
    pub points: Vec<[f64; 3]>,
    pub cells: CellArrays,
    pub point_data: Vec<PointDataArray>,
}

impl UnstructuredGrid {
    pub fn new(points: Vec<[f64; 3]>, cells: CellArrays) -> Self {
        Self {
            points,
            cells,
            point_data: Vec::new(),
        }
    }

    pub fn number_of_points(&self) -> usize {
        self.points.len()
    }

    pub fn number_of_cells(&self) -> usize {
        self.cells.types.len()
    }

    /// Attach a point array; it must hold one tuple per point.
    pub fn add_point_data(&mut self, array: PointDataArray) -> Result<(), MeshError> {
        let expected = self.points.len() * array.components;
        if array.values.len() != expected {
            return Err(MeshError::SolutionLayout {
                expected,
                found: array.values.len(),
            });
        }
        self.point_data.push(array);
        Ok(())
    }

    pub fn point_array(&self, name: &str) -> Option<&PointDataArray> {
        self.point_data.iter().find(|a| a.name == name)
    }
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// ASCII `.vtu` writer.
#[derive(Debug, Clone)]
pub struct VtuWriter {
    values_per_line: usize,
}

impl Default for VtuWriter {
    fn default() -> Self {
        Self { values_per_line: 6 }
    }
}

impl VtuWriter {
    /// Adjust how many values go on one line inside a `DataArray`.
    pub fn with_values_per_line(mut self, n: usize) -> Self {
        self.values_per_line = n.max(1);
        self
    }

    fn write_values<W: Write, T: std::fmt::Display>(
        &self,
        writer: &mut W,
        indent: &str,
        values: &[T],
    ) -> Result<(), MeshError> {
        for chunk in values.chunks(self.values_per_line) {
            writeln!(writer, "{indent}{}", chunk.iter().join(" "))?;
        }
        Ok(())
    }

    /// Create `path` and write `grid` into it.
    pub fn write_file<P: AsRef<Path>>(
        &self,
        path: P,
        grid: &UnstructuredGrid,
    ) -> Result<(), MeshError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.write(&mut out, grid)?;
        out.flush()?;
        log::info!(
            "wrote {} ({} points, {} cells)",
            path.display(),
            grid.number_of_points(),
            grid.number_of_cells()
        );
        Ok(())
    }

    pub fn write<W: Write>(&self, mut writer: W, grid: &UnstructuredGrid) -> Result<(), MeshError> {
        let values = "          ";
        writeln!(writer, "<?xml version=\"1.0\"?>")?;
        writeln!(
            writer,
            "<VTKFile type=\"UnstructuredGrid\" version=\"1.0\" byte_order=\"LittleEndian\" header_type=\"UInt64\">"
        )?;
        writeln!(writer, "  <UnstructuredGrid>")?;
        writeln!(
            writer,
            "    <Piece NumberOfPoints=\"{}\" NumberOfCells=\"{}\">",
            grid.number_of_points(),
            grid.number_of_cells()
        )?;

        writeln!(writer, "      <PointData>")?;
        for array in &grid.point_data {
            write!(
                writer,
                "        <DataArray type=\"Float64\" Name=\"{}\" NumberOfComponents=\"{}\"",
                escape_attr(&array.name),
                array.components
            )?;
            for (idx, name) in array.component_names.iter().enumerate() {
                write!(writer, " ComponentName{idx}=\"{}\"", escape_attr(name))?;
            }
            writeln!(writer, " format=\"ascii\">")?;
            self.write_values(&mut writer, values, &array.values)?;
            writeln!(writer, "        </DataArray>")?;
        }
        writeln!(writer, "      </PointData>")?;
        writeln!(writer, "      <CellData>")?;
        writeln!(writer, "      </CellData>")?;

        writeln!(writer, "      <Points>")?;
        writeln!(
            writer,
            "        <DataArray type=\"Float64\" Name=\"Points\" NumberOfComponents=\"3\" format=\"ascii\">"
        )?;
        let flat: Vec<f64> = grid.points.iter().flatten().copied().collect();
        self.write_values(&mut writer, values, &flat)?;
        writeln!(writer, "        </DataArray>")?;
        writeln!(writer, "      </Points>")?;

        writeln!(writer, "      <Cells>")?;
        writeln!(
            writer,
            "        <DataArray type=\"Int64\" Name=\"connectivity\" format=\"ascii\">"
        )?;
        self.write_values(&mut writer, values, &grid.cells.connectivity)?;
        writeln!(writer, "        </DataArray>")?;
        writeln!(
            writer,
            "        <DataArray type=\"Int64\" Name=\"offsets\" format=\"ascii\">"
        )?;
        self.write_values(&mut writer, values, &grid.cells.offsets)?;
        writeln!(writer, "        </DataArray>")?;
        writeln!(
            writer,
            "        <DataArray type=\"UInt8\" Name=\"types\" format=\"ascii\">"
        )?;
        self.write_values(&mut writer, values, &grid.cells.types)?;
        writeln!(writer, "        </DataArray>")?;
        writeln!(writer, "      </Cells>")?;

        writeln!(writer, "    </Piece>")?;
        writeln!(writer, "  </UnstructuredGrid>")?;
        writeln!(writer, "</VTKFile>")?;
        Ok(())
    }
}

/// ASCII `.vtu` reader for files with a single `Piece`.
#[derive(Debug, Default, Clone)]
pub struct VtuReader;

impl VtuReader {
    fn attr<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str, MeshError> {
        node.attribute(name).ok_or_else(|| {
            MeshError::VtuParse(format!(
                "<{}> missing attribute {name}",
                node.tag_name().name()
            ))
        })
    }

    fn usize_attr(node: Node<'_, '_>, name: &str) -> Result<usize, MeshError> {
        let raw = Self::attr(node, name)?;
        raw.parse()
            .map_err(|_| MeshError::VtuParse(format!("invalid {name}: {raw}")))
    }

    fn parse_values<T: std::str::FromStr>(node: Node<'_, '_>) -> Result<Vec<T>, MeshError> {
        if let Some(format) = node.attribute("format") {
            if format != "ascii" {
                return Err(MeshError::VtuParse(format!(
                    "only ascii DataArrays are supported, found {format}"
                )));
            }
        }
        node.text()
            .unwrap_or("")
            .split_whitespace()
            .map(|tok| {
                tok.parse::<T>()
                    .map_err(|_| MeshError::VtuParse(format!("invalid value {tok}")))
            })
            .collect()
    }

    fn child<'a, 'i>(node: Node<'a, 'i>, tag: &str) -> Result<Node<'a, 'i>, MeshError> {
        node.children()
            .find(|n| n.has_tag_name(tag))
            .ok_or_else(|| MeshError::VtuParse(format!("missing <{tag}>")))
    }

    fn data_arrays<'a, 'i>(node: Node<'a, 'i>) -> impl Iterator<Item = Node<'a, 'i>> {
        node.children().filter(|n| n.has_tag_name("DataArray"))
    }

    fn named_array<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Result<Node<'a, 'i>, MeshError> {
        Self::data_arrays(node)
            .find(|n| n.attribute("Name") == Some(name))
            .ok_or_else(|| MeshError::VtuParse(format!("missing DataArray {name}")))
    }

    fn parse_point_data(node: Node<'_, '_>) -> Result<PointDataArray, MeshError> {
        let name = Self::attr(node, "Name")?.to_string();
        let components = match node.attribute("NumberOfComponents") {
            Some(_) => Self::usize_attr(node, "NumberOfComponents")?,
            None => 1,
        };
        let component_names = (0..components)
            .map_while(|i| node.attribute(format!("ComponentName{i}").as_str()))
            .map(str::to_string)
            .collect();
        Ok(PointDataArray {
            name,
            components,
            component_names,
            values: Self::parse_values(node)?,
        })
    }

    /// Offsets must rise to exactly the connectivity length, and every
    /// connectivity entry must name an existing point.
    fn check_cells(cells: &CellArrays, n_points: usize) -> Result<(), MeshError> {
        let mut previous = 0;
        for &offset in &cells.offsets {
            if offset < previous {
                return Err(MeshError::VtuParse(format!(
                    "offsets decrease from {previous} to {offset}"
                )));
            }
            previous = offset;
        }
        let end = cells.offsets.last().copied().unwrap_or(0);
        if end != cells.connectivity.len() as i64 {
            return Err(MeshError::VtuParse(format!(
                "last offset {end} does not match {} connectivity entries",
                cells.connectivity.len()
            )));
        }
        if let Some(bad) = cells
            .connectivity
            .iter()
            .find(|&&p| p < 0 || p as usize >= n_points)
        {
            return Err(MeshError::VtuParse(format!(
                "connectivity entry {bad} outside {n_points} points"
            )));
        }
        Ok(())
    }

    pub fn read<R: Read>(&self, mut reader: R) -> Result<UnstructuredGrid, MeshError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let doc = Document::parse(&input)?;

        let root = doc.root_element();
        if root.attribute("type") != Some("UnstructuredGrid") {
            return Err(MeshError::VtuParse("VTKFile type must be UnstructuredGrid".into()));
        }
        let piece = Self::child(Self::child(root, "UnstructuredGrid")?, "Piece")?;
        let n_points = Self::usize_attr(piece, "NumberOfPoints")?;
        let n_cells = Self::usize_attr(piece, "NumberOfCells")?;

        let points_node = Self::data_arrays(Self::child(piece, "Points")?)
            .next()
            .ok_or_else(|| MeshError::VtuParse("missing point coordinates".into()))?;
        let flat: Vec<f64> = Self::parse_values(points_node)?;
        if flat.len() != n_points * 3 {
            return Err(MeshError::VtuParse(format!(
                "expected {} point values, found {}",
                n_points * 3,
                flat.len()
            )));
        }
        let points = flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        let cells_node = Self::child(piece, "Cells")?;
        let cells = CellArrays {
            connectivity: Self::parse_values(Self::named_array(cells_node, "connectivity")?)?,
            offsets: Self::parse_values(Self::named_array(cells_node, "offsets")?)?,
            types: Self::parse_values(Self::named_array(cells_node, "types")?)?,
        };
        if cells.offsets.len() != n_cells || cells.types.len() != n_cells {
            return Err(MeshError::VtuParse(format!(
                "expected {n_cells} offsets and types, found {} and {}",
                cells.offsets.len(),
                cells.types.len()
            )));
        }

        Self::check_cells(&cells, n_points)?;

        let mut grid = UnstructuredGrid::new(points, cells);
        if let Some(point_data) = piece.children().find(|n| n.has_tag_name("PointData")) {
            for node in Self::data_arrays(point_data) {
                let array = Self::parse_point_data(node)?;
                grid.add_point_data(array)?;
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_point_grid() -> UnstructuredGrid {
        let cells = CellArrays {
            connectivity: vec![0, 1],
            offsets: vec![2],
            types: vec![3],
        };
        let mut grid = UnstructuredGrid::new(vec![[0.0, 0.0, 0.0], [1.5, 0.0, -2.0]], cells);
        grid.add_point_data(PointDataArray {
            name: "temperature".into(),
            components: 1,
            component_names: vec![],
            values: vec![300.0, 310.25],
        })
        .unwrap();
        grid
    }

    #[test]
    fn writer_emits_xml_offsets_and_types() {
        let mut out = Vec::new();
        VtuWriter::default().write(&mut out, &two_point_grid()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("<Piece NumberOfPoints=\"2\" NumberOfCells=\"1\">"));
        assert!(text.contains("Name=\"offsets\""));
        assert!(text.contains("format=\"ascii\""));
    }

    #[test]
    fn reader_recovers_written_grid() {
        let grid = two_point_grid();
        let mut out = Vec::new();
        VtuWriter::default()
            .with_values_per_line(1)
            .write(&mut out, &grid)
            .unwrap();
        let back = VtuReader.read(out.as_slice()).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn point_data_must_cover_points() {
        let mut grid = two_point_grid();
        let err = grid
            .add_point_data(PointDataArray {
                name: "short".into(),
                components: 2,
                component_names: vec![],
                values: vec![1.0; 3],
            })
            .unwrap_err();
        assert_eq!(
            err,
            MeshError::SolutionLayout {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn component_names_are_escaped() {
        assert_eq!(escape_attr("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    fn write_to_string(grid: &UnstructuredGrid) -> String {
        let mut out = Vec::new();
        VtuWriter::default().write(&mut out, grid).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn last_offset_must_match_connectivity() {
        let mut grid = two_point_grid();
        grid.cells.offsets = vec![3];
        let err = VtuReader.read(write_to_string(&grid).as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::VtuParse(_)));
    }

    #[test]
    fn connectivity_must_name_existing_points() {
        let mut grid = two_point_grid();
        grid.cells.connectivity = vec![0, 2];
        let err = VtuReader.read(write_to_string(&grid).as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::VtuParse(_)));
    }

    #[test]
    fn binary_arrays_are_rejected() {
        let doc = r#"<?xml version="1.0"?>
<VTKFile type="UnstructuredGrid" version="1.0">
  <UnstructuredGrid>
    <Piece NumberOfPoints="1" NumberOfCells="0">
      <Points>
        <DataArray type="Float64" NumberOfComponents="3" format="binary">AAAA</DataArray>
      </Points>
      <Cells>
        <DataArray type="Int64" Name="connectivity" format="ascii"></DataArray>
        <DataArray type="Int64" Name="offsets" format="ascii"></DataArray>
        <DataArray type="UInt8" Name="types" format="ascii"></DataArray>
      </Cells>
    </Piece>
  </UnstructuredGrid>
</VTKFile>
"#;
        let err = VtuReader.read(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::VtuParse(_)));
    }
}
