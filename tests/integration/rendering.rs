//! Integration tests for the output façade

use stanza::dispatch::{sprint, Reply};
use stanza::error::FormatError;
use stanza::output::table::document_grids;
use stanza::output::{render, Dialect, Format, Mode, Opts};

const EXAMPLE: &str =
    r#"[{"field1":"value11","field2":"value12"},{"field1":"value21","field2":"value22"}]"#;

fn opts(graphics: bool, dialect: Dialect, column_width_max: usize) -> Opts {
    Opts {
        graphics,
        column_width_max,
        dialect,
    }
}

#[test]
fn test_passthrough_appends_newline() {
    let out = render(Mode::Yaml, "---\n- 1\n...\n", &Opts::default()).unwrap();
    assert_eq!(out, "---\n- 1\n...\n\n");
}

#[test]
fn test_empty_document_in_lua_and_table() {
    assert_eq!(render(Mode::Lua, "---\n...\n", &Opts::default()).unwrap(), ";\n");

    let grids = document_grids("---\n...\n", false, 0).unwrap();
    assert_eq!(grids.len(), 1);
    assert_eq!(grids[0].column_count(), 1);
    assert_eq!(grids[0].row_count(), 2);
    assert_eq!(grids[0].rows[1], vec![String::new()]);
}

#[test]
fn test_example_boxed_table() {
    let out = render(Mode::Table, EXAMPLE, &Opts::default()).unwrap();
    let rows: Vec<&str> = out.lines().filter(|l| l.starts_with('|')).collect();
    assert_eq!(rows.len(), 3);
    let header: Vec<&str> = rows[0]
        .split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    assert_eq!(header, vec!["field1", "field2"]);
    assert!(rows[1].contains("value11") && rows[1].contains("value12"));
}

#[test]
fn test_no_graphics_table_has_no_borders() {
    let out = render(Mode::Table, EXAMPLE, &opts(false, Dialect::Default, 0)).unwrap();
    assert!(!out.contains('|'));
    assert!(!out.contains('+'));
    let lines: Vec<&str> = out.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("field1"));
}

#[test]
fn test_jira_table() {
    let out = render(Mode::Table, EXAMPLE, &opts(true, Dialect::Jira, 0)).unwrap();
    assert_eq!(
        out,
        "| field1 | field2 |\n| value11 | value12 |\n| value21 | value22 |\n\n"
    );
}

#[test]
fn test_column_width_cap_in_markdown() {
    let doc = r#"[{"k": "abcdefgh"}]"#;
    let grids = document_grids(doc, false, 3).unwrap();
    assert_eq!(grids[0].rows[1], vec!["abc\n+def\n+gh".to_string()]);
}

#[test]
fn test_heterogeneous_batches_render_in_order() {
    let doc = "[1, 2, {a: 1}, {a: 2}, {b: 3}, [x, y]]";
    let grids = document_grids(doc, false, 0).unwrap();
    assert_eq!(grids.len(), 4);
    assert_eq!(grids[0].row_count(), 3);
    assert_eq!(grids[1].header().unwrap(), &["a"]);
    assert_eq!(grids[1].row_count(), 3);
    assert_eq!(grids[2].header().unwrap(), &["b"]);
    assert_eq!(grids[3].header().unwrap(), &["col1", "col2"]);
}

#[test]
fn test_metadata_row_sets() {
    let doc = r#"[{"metadata": [{"name": "id"}, {"name": "name"}], "rows": [[1, "a"], [2, "b"]]}]"#;
    let out = render(Mode::Table, doc, &opts(true, Dialect::Jira, 0)).unwrap();
    assert_eq!(out, "| id | name |\n| 1 | a |\n| 2 | b |\n\n");
}

#[test]
fn test_lua_literals() {
    let doc = "[null, true, 1.5, .inf, \"q\\\"x\", {1: a, key: [1, 2], end: 0}]";
    let out = render(Mode::Lua, doc, &Opts::default()).unwrap();
    assert_eq!(
        out,
        "nil, true, 1.5, 1/0, \"q\\\"x\", {[1] = \"a\", key = {1, 2}, [\"end\"] = 0};\n"
    );
}

#[test]
fn test_decode_error_is_hard() {
    match render(Mode::Table, "{unclosed", &Opts::default()) {
        Err(FormatError::Decode(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_sprint_routes_documents_through_format() {
    let reply = Reply::document("---\n- 1\n- 2\n...\n");
    let format = Format::new(Mode::Lua, Opts::default());
    assert_eq!(sprint(&reply, &format).unwrap(), "1, 2;\n");
}
