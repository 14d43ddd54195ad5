//! Table Rendering Pipeline
//!
//! Turns a structured document into one or more aligned tables:
//!
//! 1. Canonical empty documents become a single empty scalar
//! 2. Documents shaped as `[{metadata: [...], rows: [[...]]}]` are remapped
//!    into mappings keyed by column name
//! 3. Anything else decodes as a plain sequence of top-level nodes
//! 4. Nodes are classified and batched (see `batch`)
//! 5. Each batch becomes a header + rows grid
//! 6. The grid is optionally transposed
//! 7. Cells are wrapped at `column_width_max` characters
//! 8. The grid is emitted in the selected dialect
//! 9. Batch outputs are joined in order
//!
//! ## Dialects
//!
//! | Dialect              | Output                                        |
//! |----------------------|-----------------------------------------------|
//! | default, graphics    | ASCII boxed grid                              |
//! | default, no graphics | whitespace-aligned grid                       |
//! | markdown             | empty row + separator, then pipe rows         |
//! | jira                 | pipe rows followed by a blank line            |

use crate::error::FormatError;
use crate::output::batch::{into_batches, Batch};
use crate::output::node::{self, Node, Scalar, Shape};
use crate::output::{Dialect, Opts};
use comfy_table::{presets, Table};
use serde::Deserialize;
use serde_yaml::Value;

const CONTINUATION_MARKER: &str = "+";

/// Header row plus data rows, all as rendered cell text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(header: Vec<String>, body: Vec<Vec<String>>) -> Self {
        let mut rows = Vec::with_capacity(body.len() + 1);
        rows.push(header);
        rows.extend(body);
        Self { rows }
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RowSet {
    #[serde(default)]
    metadata: Vec<ColumnMeta>,
    rows: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ColumnMeta {
    name: String,
}

/// Render a document as tables.
pub fn render_document(document: &str, transpose: bool, opts: &Opts) -> Result<String, FormatError> {
    let emit = emitter_for(opts.dialect, opts.graphics);
    let outputs: Vec<String> = document_grids(document, transpose, opts.column_width_max)?
        .iter()
        .map(|grid| emit(grid, !transpose))
        .collect();

    let separator = if opts.graphics { "" } else { "\n" };
    Ok(outputs.join(separator))
}

/// Build the final grids of a document, one per batch.
pub fn document_grids(
    document: &str,
    transpose: bool,
    column_width_max: usize,
) -> Result<Vec<Grid>, FormatError> {
    let nodes = decode_nodes(document)?;
    into_batches(nodes)
        .iter()
        .map(|batch| {
            let mut grid = batch_grid(batch)?;
            if transpose {
                grid = transpose_grid(&grid);
            }
            if column_width_max > 0 {
                grid = cap_width(&grid, column_width_max);
            }
            Ok(grid)
        })
        .collect()
}

fn decode_nodes(document: &str) -> Result<Vec<Node>, FormatError> {
    if node::is_empty_document(document) {
        return Ok(vec![Node::string("")]);
    }

    let values = node::parse_documents(document)?;
    let nodes = match decode_row_sets(&values) {
        Some(nodes) => nodes,
        None => node::top_level_nodes(values),
    };
    if nodes.is_empty() {
        return Ok(vec![Node::string("")]);
    }
    Ok(nodes)
}

/// Remap `{metadata, rows}` records into mappings keyed by column name.
///
/// Cells beyond the metadata (or without any) are keyed by 1-based position.
fn decode_row_sets(values: &[Value]) -> Option<Vec<Node>> {
    if values.is_empty() {
        return None;
    }

    let mut nodes = Vec::new();
    for value in values {
        let sets: Vec<RowSet> = serde_yaml::from_value(value.clone()).ok()?;
        if sets.is_empty() {
            return None;
        }
        for set in sets {
            for row in set.rows {
                let pairs = row
                    .into_iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        let key = match set.metadata.get(i) {
                            Some(column) => Scalar::Str(column.name.clone()),
                            None => Scalar::Int(i as i64 + 1),
                        };
                        (key, Node::from(cell))
                    })
                    .collect();
                nodes.push(Node::Mapping(pairs));
            }
        }
    }

    Some(nodes)
}

fn cell_text(node: Option<&Node>) -> Result<String, FormatError> {
    match node {
        None => Ok(String::new()),
        Some(Node::Scalar(scalar)) => Ok(scalar.to_text()),
        Some(collection) => collection.to_compact_json(),
    }
}

fn header_label(key: &Scalar) -> String {
    let text = key.to_text();
    match text.trim().parse::<i64>() {
        Ok(n) => format!("col{}", n),
        Err(_) => text,
    }
}

fn positional_header(width: usize) -> Vec<String> {
    (1..=width).map(|i| format!("col{}", i)).collect()
}

fn batch_grid(batch: &Batch) -> Result<Grid, FormatError> {
    match batch.shape {
        Shape::Scalar => {
            let body = batch
                .nodes
                .iter()
                .map(|node| Ok(vec![cell_text(Some(node))?]))
                .collect::<Result<Vec<_>, FormatError>>()?;
            Ok(Grid::new(positional_header(1), body))
        }
        Shape::Sequence => sequence_grid(&batch.nodes),
        Shape::Mapping => mapping_grid(&batch.nodes),
    }
}

fn sequence_grid(nodes: &[Node]) -> Result<Grid, FormatError> {
    // A lone sequence of sequences is unwrapped one level.
    let rows: Vec<&Node> = match nodes {
        [Node::Sequence(inner)]
            if !inner.is_empty() && inner.iter().all(|n| n.shape() == Shape::Sequence) =>
        {
            inner.iter().collect()
        }
        _ => nodes.iter().collect(),
    };

    let cells: Vec<&[Node]> = rows
        .into_iter()
        .map(|row| match row {
            Node::Sequence(items) => items.as_slice(),
            other => std::slice::from_ref(other),
        })
        .collect();

    let width = cells.iter().map(|c| c.len()).max().unwrap_or(0).max(1);
    let body = cells
        .iter()
        .map(|row| (0..width).map(|i| cell_text(row.get(i))).collect())
        .collect::<Result<Vec<Vec<String>>, FormatError>>()?;

    Ok(Grid::new(positional_header(width), body))
}

fn mapping_grid(nodes: &[Node]) -> Result<Grid, FormatError> {
    let keys = nodes.first().map(Node::sorted_keys).unwrap_or_default();
    let header = keys.iter().map(header_label).collect();
    let body = nodes
        .iter()
        .map(|node| keys.iter().map(|key| cell_text(node.get(key))).collect())
        .collect::<Result<Vec<Vec<String>>, FormatError>>()?;

    Ok(Grid::new(header, body))
}

/// Swap rows and columns; short rows are padded with empty cells.
pub fn transpose_grid(grid: &Grid) -> Grid {
    let width = grid.column_count();
    let rows = (0..width)
        .map(|col| {
            grid.rows
                .iter()
                .map(|row| row.get(col).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    Grid { rows }
}

/// Wrap every cell so no segment exceeds `max` characters.
pub fn cap_width(grid: &Grid, max: usize) -> Grid {
    let rows = grid
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| wrap_cell(cell, max)).collect())
        .collect();
    Grid { rows }
}

fn wrap_cell(cell: &str, max: usize) -> String {
    cell.split('\n')
        .map(|line| wrap_line(line, max))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, max: usize) -> String {
    let chars: Vec<char> = line.chars().collect();
    if max == 0 || chars.len() <= max {
        return line.to_string();
    }
    chars
        .chunks(max)
        .enumerate()
        .map(|(i, chunk)| {
            let segment: String = chunk.iter().collect();
            if i == 0 {
                segment
            } else {
                format!("{}{}", CONTINUATION_MARKER, segment)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

type Emitter = fn(&Grid, bool) -> String;

fn emitter_for(dialect: Dialect, graphics: bool) -> Emitter {
    match (dialect, graphics) {
        (Dialect::Default, true) => emit_boxed,
        (Dialect::Default, false) => emit_aligned,
        (Dialect::Markdown, _) => emit_markdown,
        (Dialect::Jira, _) => emit_jira,
    }
}

fn comfy_table(grid: &Grid, with_header: bool, preset: &str) -> String {
    let mut table = Table::new();
    table.load_preset(preset);

    let mut rows = grid.rows.iter();
    if with_header {
        if let Some(header) = rows.next() {
            table.set_header(header.clone());
        }
    }
    for row in rows {
        table.add_row(row.clone());
    }

    format!("{}\n", table)
}

fn emit_boxed(grid: &Grid, with_header: bool) -> String {
    comfy_table(grid, with_header, presets::ASCII_FULL_CONDENSED)
}

fn emit_aligned(grid: &Grid, with_header: bool) -> String {
    comfy_table(grid, with_header, presets::NOTHING)
}

/// Line breaks inside a cell become `<br>` so each grid row stays on one line.
fn pipe_row<S: AsRef<str>>(cells: &[S]) -> String {
    let escaped: Vec<String> = cells
        .iter()
        .map(|c| {
            c.as_ref()
                .replace('|', "\\|")
                .replace("\r\n", "<br>")
                .replace(['\n', '\r'], "<br>")
        })
        .collect();
    format!("| {} |", escaped.join(" | "))
}

fn emit_markdown(grid: &Grid, _with_header: bool) -> String {
    let width = grid.column_count();
    let mut out = String::new();
    out.push_str(&pipe_row(vec![""; width].as_slice()));
    out.push('\n');
    out.push_str(&pipe_row(vec!["---"; width].as_slice()));
    out.push('\n');
    for row in &grid.rows {
        out.push_str(&pipe_row(row.as_slice()));
        out.push('\n');
    }
    out
}

fn emit_jira(grid: &Grid, _with_header: bool) -> String {
    let mut out = String::new();
    for row in &grid.rows {
        out.push_str(&pipe_row(row.as_slice()));
        out.push('\n');
    }
    out.push('\n');
    out
}
