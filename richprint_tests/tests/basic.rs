// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic (and assorted) layout tests.

use crate::util::{layout, markup};
use richprint::{ErrorKind, Printer, Size};
use richprint_dev::{test_printer, TestRenderer, TextSamples};

#[test]
fn basic_single_line() {
    let out = layout("Hello World", 0);

    assert_eq!(out.text_lines(), ["Hello World"]);
    let xs: Vec<i32> = out.glyphs.iter().map(|g| g.x).collect();
    assert_eq!(xs, [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110]);
    assert!(out.glyphs.iter().all(|g| g.line_top == 0 && g.line_bottom == 20));
    assert_eq!(out.find('W').y, 0);
}

#[test]
fn basic_end_marker_counts_code_points() {
    let out = layout("héllo", 0);

    let end = out.glyphs.last().unwrap();
    assert!(end.line_end);
    assert_eq!(end.glyph, None);
    assert_eq!(end.index, 5, "indices count code points, not bytes");
}

#[test]
fn basic_empty_text() {
    let out = layout("", 0);

    assert_eq!(out.glyphs.len(), 1, "only the end marker");
    assert_eq!(out.glyphs[0].index, 0);
    assert_eq!(test_printer().measure("").unwrap(), Size::new(0, 20));
}

#[test]
fn basic_missing_default_font() {
    let printer = Printer::<TestRenderer>::new();

    let err = printer.measure("text").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingDefaultFont);
    assert_eq!(err.font(), 0);
}

#[test]
fn basic_measure() {
    let printer = test_printer();

    assert_eq!(printer.measure("Hello World").unwrap(), Size::new(110, 20));
    assert_eq!(printer.measure("ab\ncdef").unwrap(), Size::new(40, 40));
}

#[test]
fn basic_measure_is_idempotent() {
    let printer = test_printer();
    let text = TextSamples::new().latin.text;

    let first = printer.measure_wrapped(text, 100).unwrap();
    let second = printer.measure_wrapped(text, 100).unwrap();
    assert_eq!(first, second);
}

#[test]
fn basic_newlines_end_lines() {
    let out = layout("a\nb", 0);

    assert_eq!(out.text_lines(), ["a", "b"]);
    let newline = &out.glyphs[1];
    assert!(newline.line_end);
    assert_eq!(newline.index, 1);
    assert_eq!(out.find('b').line_top, 20);
}

#[test]
fn basic_unicode_separators_break_lines() {
    let out = layout("A\u{2028}B\u{2029}C", 0);

    assert_eq!(out.text_lines(), ["A", "B", "C"]);
}

#[test]
fn basic_crlf_is_one_newline() {
    let out = layout("a\r\nb", 0);

    assert_eq!(out.text_lines(), ["a", "b"]);
    assert_eq!(out.find('b').index, 3);
}

#[test]
fn basic_noncharacter_is_skipped() {
    let out = layout("a\u{FFFF}b", 0);

    let b = out.find('b');
    assert_eq!(b.x, 10);
    assert_eq!(b.index, 2);
}

#[test]
fn basic_paragraph_spacing_after_newline_only() {
    let mut text = markup("");
    text.paragraph_spacing(5, 0)
        .push_str("a\nb")
        .line_break()
        .push_str("c");
    let out = layout(&text, 0);

    assert_eq!(out.find('b').line_top, 25);
    assert_eq!(out.find('c').line_top, 45, "line breaks start no paragraph");
}

#[test]
fn basic_line_spacing_relative_to_height() {
    let mut text = markup("");
    text.line_spacing(0, 150).push_str("a\nb");
    let out = layout(&text, 0);

    assert_eq!(out.find('a').line_bottom, 30);
    assert_eq!(out.find('b').line_top, 30);
}

#[test]
fn basic_vertical_space() {
    let mut text = markup("a\n");
    text.vertical_space(10, 0).push_str("b");
    let out = layout(&text, 0);

    assert_eq!(out.find('b').line_top, 30);
}

#[test]
fn basic_vertical_space_mid_line_applies_after_it() {
    let mut text = markup("a");
    text.vertical_space(10, 0).push_str("b\nc");
    let out = layout(&text, 0);

    assert_eq!(out.find('b').line_top, 0);
    assert_eq!(out.find('c').line_top, 30);
}
