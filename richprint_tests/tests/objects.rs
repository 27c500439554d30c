// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Images, placeholders, tabs and explicit spaces.

use crate::util::{layout, layout_with, markup};
use richprint::{Color, Image, ImageFit, ImageSpec, Margin, Printer, Rect, Size};
use richprint_dev::{test_printer, TestRenderer};

const PHOTO: Image = Image::new(7, Size::new(30, 20));

fn printer_with_photo() -> Printer<TestRenderer> {
    let mut printer = test_printer();
    printer.set_image(1, PHOTO);
    printer
}

#[test]
fn image_inline() {
    let mut text = markup("a");
    text.inline_image(1).push_str("b");
    let out = layout_with(&printer_with_photo(), &text, 0);

    assert_eq!(
        out.images,
        [(1, PHOTO, Rect::new(10, 0, 40, 20), Color::WHITE, ImageFit::Stretch)]
    );
    assert_eq!(out.find('b').x, 40);
    // The image sits on the baseline and pushes the text down.
    assert_eq!(out.find('a').y, 4);
}

#[test]
fn image_missing_is_skipped() {
    let mut text = markup("a");
    text.inline_image(9).push_str("b");
    let out = layout_with(&printer_with_photo(), &text, 0);

    assert!(out.images.is_empty());
    assert_eq!(out.find('b').x, 10);
}

#[test]
fn image_scaled_to_requested_width() {
    let mut text = markup("a");
    text.image(ImageSpec {
        size: Some((Size::new(60, 0), Size::ZERO)),
        ..ImageSpec::inline(1)
    })
    .push_str("b");
    let out = layout_with(&printer_with_photo(), &text, 0);

    assert_eq!(out.images[0].2, Rect::new(10, 0, 70, 40));
    assert_eq!(out.find('b').x, 70);
}

#[test]
fn image_shrinks_to_wrap_width() {
    let mut text = markup("");
    text.inline_image(1);
    let out = layout_with(&printer_with_photo(), &text, 20);

    assert_eq!(out.images[0].2, Rect::new(0, 3, 20, 16));
}

#[test]
fn image_margin() {
    let mut text = markup("a");
    text.image(ImageSpec {
        margin: Some(Margin::all(5)),
        ..ImageSpec::inline(1)
    })
    .push_str("b");
    let out = layout_with(&printer_with_photo(), &text, 0);

    assert_eq!(out.images[0].2, Rect::new(15, 5, 45, 25));
    assert_eq!(out.find('b').x, 50);
}

#[test]
fn image_tint() {
    let red = Color::from_rgba8(255, 0, 0, 255);
    let mut text = markup("");
    text.tint(red).inline_image(1);
    let out = layout_with(&printer_with_photo(), &text, 0);

    assert_eq!(out.images[0].3.to_rgba8(), red.to_rgba8());
}

#[test]
fn placeholder_reserves_width() {
    let mut text = markup("a");
    text.placeholder(Size::new(25, 0), Size::ZERO).push_str("b");
    let out = layout(&text, 0);

    assert_eq!(out.find('b').x, 35);
    assert_eq!(out.text_lines(), ["ab"], "placeholders are not drawn");
}

#[test]
fn placeholder_repeat_and_relative_width() {
    let mut text = markup("a");
    text.placeholder(Size::ZERO, Size::new(20, 0))
        .push_str("b")
        .repeat_placeholder()
        .push_str("c");
    let out = layout(&text, 100);

    assert_eq!(out.find('b').x, 30);
    assert_eq!(out.find('c').x, 60);
}

#[test]
fn tab_to_default_stops() {
    let out = layout("a\tb\tc", 0);

    // Eight digit widths.
    assert_eq!(out.find('b').x, 64);
    assert_eq!(out.find('c').x, 128);
}

#[test]
fn tab_width_from_markup() {
    let mut text = markup("");
    text.tab_width(40, 0, 0).push_str("a\tb");
    let out = layout(&text, 0);

    assert_eq!(out.find('b').x, 40);
}

#[test]
fn tab_stops() {
    let mut text = markup("");
    text.add_tab_stop(0, 100, 0, 0).push_str("a\tb");
    let out = layout(&text, 0);
    assert_eq!(out.find('b').x, 100);

    let mut text = markup("");
    text.add_tab_stop(0, 100, 0, 0)
        .remove_tab_stop(0)
        .push_str("a\tb");
    let out = layout(&text, 0);
    assert_eq!(out.find('b').x, 64);
}

#[test]
fn space_horizontal() {
    let mut text = markup("a");
    text.horizontal_space(15, 0, 0).push_str("b");
    let out = layout(&text, 0);
    assert_eq!(out.find('b').x, 25);

    let mut text = markup("a");
    text.horizontal_space(0, 100, 0).push_str("b");
    let out = layout(&text, 0);
    assert_eq!(out.find('b').x, 26, "one em");
}

#[test]
fn space_missing_glyph_uses_em_fraction() {
    let out = layout("a\u{2003}b", 0);

    assert_eq!(out.find('b').x, 26);
    assert_eq!(out.text_lines(), ["ab"]);
}

#[test]
fn space_combining_mark_overlaps() {
    let out = layout("e\u{301}x", 0);

    assert_eq!(out.find('\u{301}').x, 0);
    assert_eq!(out.find('x').x, 10);
}

#[test]
fn space_letter_spacing() {
    let mut text = markup("");
    text.letter_spacing(2, 0).push_str("abc");
    let out = layout(&text, 0);

    let xs: Vec<i32> = out
        .glyphs
        .iter()
        .filter(|g| g.glyph.is_some())
        .map(|g| g.x)
        .collect();
    assert_eq!(xs, [0, 12, 24]);
}

#[test]
fn space_indent() {
    let mut text = markup("");
    text.indent(20, 0).push_str("a\nb");
    let out = layout(&text, 0);

    assert_eq!(out.find('a').x, 20);
    assert_eq!(out.find('b').x, 20);
}
