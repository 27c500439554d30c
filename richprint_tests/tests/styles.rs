// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colors, alignment and boxes.

use crate::util::{layout, layout_with, markup};
use richprint::{
    Color, ColorPair, ColorSource, Margin, NamedColor, NamedFont, Point, Rect, StyledFont,
};
use richprint_dev::{test_printer, TestRenderer};

fn red() -> Color {
    Color::from_rgba8(255, 0, 0, 255)
}

#[test]
fn styles_color_and_default() {
    let mut text = markup("");
    text.color(red()).push_str("a").default_color().push_str("b");
    let out = layout(&text, 0);

    assert_eq!(out.find('a').color.to_rgba8(), red().to_rgba8());
    assert_eq!(out.find('b').color.to_rgba8(), Color::BLACK.to_rgba8());
}

#[test]
fn styles_color_from_table() {
    let green = Color::from_rgba8(0, 128, 0, 255);
    let mut printer = test_printer();
    printer.set_color(NamedColor::Emphasis, ColorPair::new(green, Color::WHITE));
    let mut text = markup("");
    text.color(NamedColor::Emphasis).push_str("a");
    let out = layout_with(&printer, &text, 0);

    assert_eq!(out.find('a').color.to_rgba8(), green.to_rgba8());
}

#[test]
fn styles_table_color_alpha_override() {
    let mut printer = test_printer();
    printer.set_color(2_u8, ColorPair::new(red(), Color::WHITE));
    let mut text = markup("");
    text.color(ColorSource::Index {
        index: 2,
        alpha: Some(0),
    })
    .push_str("a");
    let out = layout_with(&printer, &text, 0);

    assert_eq!(out.find('a').color.to_rgba8().a, 0);
}

#[test]
fn styles_missing_table_color_uses_font_color() {
    let mut text = markup("");
    text.color(NamedColor::Title).push_str("a");
    let out = layout(&text, 0);

    assert_eq!(out.find('a').color.to_rgba8(), Color::BLACK.to_rgba8());
}

#[test]
fn styles_font_color() {
    let mut printer = test_printer();
    printer.set_font(
        NamedFont::Normal,
        StyledFont::new(TestRenderer::new()).with_color(red()),
    );
    let out = layout_with(&printer, "a", 0);

    assert_eq!(out.find('a').color.to_rgba8(), red().to_rgba8());
}

#[test]
fn styles_reset_formatting() {
    let mut text = markup("");
    text.color(red())
        .indent(20, 0)
        .push_str("a\n")
        .reset_formatting()
        .push_str("b");
    let out = layout(&text, 0);

    let b = out.find('b');
    assert_eq!(b.color.to_rgba8(), Color::BLACK.to_rgba8());
    assert_eq!(b.x, 0);
}

#[test]
fn styles_align_center_and_right() {
    let mut text = markup("");
    text.align_center().push_str("abcd");
    assert_eq!(layout(&text, 100).find('a').x, 30);

    let mut text = markup("");
    text.align_right().push_str("abcd");
    assert_eq!(layout(&text, 100).find('a').x, 60);
}

#[test]
fn styles_align_needs_wrap_width() {
    let mut text = markup("");
    text.align_right().push_str("abcd");

    assert_eq!(layout(&text, 0).find('a').x, 0);
}

#[test]
fn styles_align_each_line() {
    let mut text = markup("");
    text.align_right().push_str("aaa bb");
    let out = layout(&text, 50);

    assert_eq!(out.text_lines(), ["aaa", "bb"]);
    assert_eq!(out.find('a').x, 20);
    assert_eq!(out.find('b').x, 30);
}

#[test]
fn styles_background_box() {
    let mut text = markup("");
    text.background(red()).show_background().push_str("ab");
    let out = layout(&text, 0);

    assert_eq!(out.boxes.len(), 1);
    assert_eq!(out.boxes[0].bounds, Rect::new(0, 0, 20, 20));
    assert_eq!(out.boxes[0].background.to_rgba8(), red().to_rgba8());
    assert_eq!(out.boxes[0].border, 0);
}

#[test]
fn styles_border_and_padding() {
    let mut text = markup("");
    text.show_border()
        .padding(Margin::all(2), Margin::ZERO)
        .push_str("ab");
    let out = layout(&text, 0);

    assert_eq!(out.boxes.len(), 1);
    assert_eq!(out.boxes[0].border, 1);
    assert_eq!(out.boxes[0].bounds, Rect::new(-2, -2, 22, 22));
}

#[test]
fn styles_border_thickness() {
    let mut text = markup("");
    text.show_border().border_thickness(3, 0).push_str("ab");
    let out = layout(&text, 0);

    assert_eq!(out.boxes[0].border, 3);
}

#[test]
fn styles_no_boxes_by_default() {
    let out = layout("ab", 0);

    assert!(out.boxes.is_empty());
}

#[test]
fn styles_letter_offset() {
    let mut text = markup("a");
    text.letter_offset(Point::new(3, -2), Point::ZERO).push_str("b");
    let out = layout(&text, 0);

    let b = out.find('b');
    assert_eq!((b.x, b.y), (13, -2));
}
