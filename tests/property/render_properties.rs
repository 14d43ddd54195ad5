//! Property-based tests for the table and script-literal renderers

use proptest::prelude::*;
use stanza::output::node::{self, Node, Scalar};
use stanza::output::table::{document_grids, transpose_grid, Grid};
use stanza::output::{literal, render, Mode, Opts};
use std::collections::BTreeSet;

/// Identifier keys; the `k` prefix keeps them clear of Lua keywords.
fn key_strategy() -> impl Strategy<Value = String> {
    "k[a-z0-9_]{0,7}"
}

fn cell_strategy() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i32>().prop_map(serde_json::Value::from),
        (-1_000_000i32..1_000_000).prop_map(|n| serde_json::Value::from(f64::from(n) / 4.0)),
        "[a-zA-Z0-9 ]{0,12}".prop_map(serde_json::Value::from),
    ]
}

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1usize..6, 1usize..6).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec("[a-z]{0,4}", cols), rows)
            .prop_map(|rows| Grid { rows })
    })
}

proptest! {
    #[test]
    fn test_transpose_swaps_dimensions(grid in grid_strategy()) {
        let transposed = transpose_grid(&grid);
        prop_assert_eq!(transposed.row_count(), grid.column_count());
        prop_assert_eq!(transposed.column_count(), grid.row_count());
        prop_assert_eq!(transpose_grid(&transposed), grid);
    }

    #[test]
    fn test_single_scalar_is_one_cell(value in cell_strategy()) {
        let document = serde_json::to_string(&value).unwrap();
        let grids = document_grids(&document, false, 0).unwrap();
        prop_assert_eq!(grids.len(), 1);
        prop_assert_eq!(grids[0].column_count(), 1);
        // Header row plus the value row.
        prop_assert_eq!(grids[0].row_count(), 2);
    }

    #[test]
    fn test_shared_key_set_becomes_header(
        keys in prop::collection::btree_set(key_strategy(), 1..6),
        rows in 1usize..5,
        seed in any::<i32>(),
    ) {
        let records: Vec<serde_json::Value> = (0..rows)
            .map(|i| {
                let map: serde_json::Map<String, serde_json::Value> = keys
                    .iter()
                    .map(|k| (k.clone(), serde_json::Value::from(seed.wrapping_add(i as i32))))
                    .collect();
                serde_json::Value::Object(map)
            })
            .collect();
        let document = serde_json::to_string(&records).unwrap();

        let grids = document_grids(&document, false, 0).unwrap();
        prop_assert_eq!(grids.len(), 1);
        let header: BTreeSet<String> = grids[0].header().unwrap().iter().cloned().collect();
        prop_assert_eq!(header, keys.clone());
        prop_assert_eq!(grids[0].column_count(), keys.len());
        prop_assert_eq!(grids[0].row_count(), rows + 1);
    }

    #[test]
    fn test_table_render_ends_with_newline(
        values in prop::collection::vec(cell_strategy(), 0..6),
        graphics in any::<bool>(),
    ) {
        let document = serde_json::to_string(&values).unwrap();
        let opts = Opts { graphics, ..Opts::default() };
        let out = render(Mode::Table, &document, &opts).unwrap();
        prop_assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_script_literal_reparses(
        values in prop::collection::vec(cell_strategy(), 1..6),
        keys in prop::collection::vec(key_strategy(), 1..4),
    ) {
        let record: serde_json::Map<String, serde_json::Value> = keys
            .iter()
            .cloned()
            .zip(values.iter().cloned())
            .collect();
        let document = serde_json::to_string(&vec![
            serde_json::Value::Array(values.clone()),
            serde_json::Value::Object(record),
        ])
        .unwrap();

        let nodes = node::decode(&document).unwrap();
        for node in &nodes {
            let encoded = literal::encode(node);
            prop_assert_eq!(reparse(&encoded), node.clone());
        }
    }
}

/// Minimal reader for the literal subset the encoder emits for
/// scalars, sequences and string-keyed mappings.
fn reparse(text: &str) -> Node {
    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;
    let node = parse_value(&chars, &mut pos);
    assert_eq!(pos, chars.len(), "trailing input in {:?}", text);
    node
}

fn skip_ws(chars: &[char], pos: &mut usize) {
    while *pos < chars.len() && chars[*pos] == ' ' {
        *pos += 1;
    }
}

fn parse_value(chars: &[char], pos: &mut usize) -> Node {
    skip_ws(chars, pos);
    match chars[*pos] {
        '{' => parse_table(chars, pos),
        '"' => Node::Scalar(Scalar::Str(parse_string(chars, pos))),
        _ => {
            let start = *pos;
            while *pos < chars.len() && !matches!(chars[*pos], ',' | '}' | ' ') {
                *pos += 1;
            }
            let token: String = chars[start..*pos].iter().collect();
            Node::Scalar(match token.as_str() {
                "nil" => Scalar::Null,
                "true" => Scalar::Bool(true),
                "false" => Scalar::Bool(false),
                number if number.contains(['.', 'e', 'E']) => {
                    Scalar::Float(number.parse().unwrap())
                }
                number => Scalar::Int(number.parse().unwrap()),
            })
        }
    }
}

fn parse_string(chars: &[char], pos: &mut usize) -> String {
    *pos += 1;
    let mut out = String::new();
    while chars[*pos] != '"' {
        if chars[*pos] == '\\' {
            *pos += 1;
        }
        out.push(chars[*pos]);
        *pos += 1;
    }
    *pos += 1;
    out
}

fn parse_table(chars: &[char], pos: &mut usize) -> Node {
    *pos += 1;
    let mut items = Vec::new();
    let mut pairs = Vec::new();
    loop {
        skip_ws(chars, pos);
        if chars[*pos] == '}' {
            *pos += 1;
            break;
        }
        let start = *pos;
        while chars[*pos].is_ascii_alphanumeric() || chars[*pos] == '_' {
            *pos += 1;
        }
        let is_key = *pos > start && chars[*pos..].starts_with(&[' ', '=']);
        if is_key {
            let key: String = chars[start..*pos].iter().collect();
            *pos += 2;
            pairs.push((Scalar::Str(key), parse_value(chars, pos)));
        } else {
            *pos = start;
            items.push(parse_value(chars, pos));
        }
        skip_ws(chars, pos);
        if chars[*pos] == ',' {
            *pos += 1;
        }
    }
    if pairs.is_empty() {
        Node::Sequence(items)
    } else {
        Node::Mapping(pairs)
    }
}
