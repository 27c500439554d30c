// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic tables.

use crate::util::{layout, markup, Recorder};
use richprint::{Rect, TableColumn, TextAlign};

fn positions(out: &Recorder, letters: &str) -> Vec<(i32, i32)> {
    letters
        .chars()
        .map(|c| {
            let g = out.find(c);
            (g.x, g.line_top)
        })
        .collect()
}

#[test]
fn table_fixed_columns() {
    let mut text = markup("");
    text.begin_table(&[TableColumn::fixed(40), TableColumn::fixed(60)], 0, 0, false)
        .push_str("a")
        .next_cell()
        .push_str("b")
        .next_row()
        .push_str("c")
        .next_cell()
        .push_str("d")
        .end_table();
    let out = layout(&text, 200);

    assert_eq!(
        positions(&out, "abcd"),
        [(0, 0), (40, 0), (0, 20), (40, 20)]
    );
}

#[test]
fn table_column_alignment() {
    let right = TableColumn {
        align: TextAlign::Right,
        ..TableColumn::fixed(60)
    };
    let mut text = markup("");
    text.begin_table(&[TableColumn::fixed(40), right], 0, 0, false)
        .push_str("a")
        .next_cell()
        .push_str("b")
        .end_table();
    let out = layout(&text, 200);

    assert_eq!(out.find('b').x, 90);
}

#[test]
fn table_automatic_columns_share_width() {
    let mut text = markup("");
    text.begin_table(
        &[TableColumn::fixed(20), TableColumn::AUTO, TableColumn::AUTO],
        0,
        0,
        false,
    )
    .push_str("a")
    .next_cell()
    .push_str("b")
    .next_cell()
    .push_str("c")
    .end_table();
    let out = layout(&text, 100);

    assert_eq!(positions(&out, "abc"), [(0, 0), (20, 0), (60, 0)]);
}

#[test]
fn table_rows_do_not_wrap() {
    let mut text = markup("");
    text.begin_table(&[TableColumn::fixed(20)], 0, 0, false)
        .push_str("aaaaaa")
        .end_table();
    let out = layout(&text, 30);

    assert_eq!(out.text_lines()[0], "aaaaaa");
}

#[test]
fn table_newline_ends_row() {
    let mut text = markup("");
    text.begin_table(&[TableColumn::fixed(40), TableColumn::fixed(40)], 0, 0, false)
        .push_str("a")
        .next_cell()
        .push_str("b\nc")
        .end_table();
    let out = layout(&text, 200);

    assert_eq!(positions(&out, "abc"), [(0, 0), (40, 0), (0, 20)]);
}

#[test]
fn table_text_after_table() {
    let mut text = markup("x");
    text.begin_table(&[TableColumn::fixed(40)], 0, 0, false)
        .push_str("a")
        .end_table()
        .push_str("y");
    let out = layout(&text, 200);

    assert_eq!(out.text_lines(), ["x", "a", "y"]);
}

#[test]
fn table_outer_border() {
    let mut text = markup("");
    text.begin_table(&[TableColumn::fixed(40), TableColumn::fixed(60)], 0, 0, true)
        .push_str("a")
        .next_cell()
        .push_str("b")
        .end_table();
    let out = layout(&text, 200);

    let bounds: Vec<Rect> = out.boxes.iter().map(|b| b.bounds).collect();
    assert_eq!(bounds, [Rect::new(0, 0, 40, 20), Rect::new(40, 0, 100, 20)]);
    assert!(out.boxes.iter().all(|b| b.border == 1));
}

#[test]
fn table_column_span() {
    let mut text = markup("");
    text.begin_table(
        &[
            TableColumn::fixed(40),
            TableColumn::fixed(40),
            TableColumn::fixed(40),
        ],
        0,
        0,
        false,
    )
    .column_span(2, TextAlign::Right)
    .push_str("a")
    .next_cell()
    .push_str("b")
    .end_table();
    let out = layout(&text, 200);

    assert_eq!(positions(&out, "ab"), [(70, 0), (80, 0)]);
}
