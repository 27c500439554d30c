// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed font fallback graph.
//!
//! An unregistered font id is resolved by trying a list of sibling roles and
//! then following one fallback edge to another role. Every path ends at the
//! default font.

use crate::markup::NamedFont::{self, *};

const HEADINGS: &[NamedFont] = &[H1, H2, H3, H4];

#[derive(Copy, Clone, Debug)]
struct Fallback {
    /// Tried in order, without following their own fallbacks.
    siblings: &'static [NamedFont],
    /// Resolved like a fresh lookup when no sibling is registered.
    next: Option<NamedFont>,
}

impl Fallback {
    const DEFAULT: Self = Self {
        siblings: &[],
        next: None,
    };
}

fn fallback(font: NamedFont) -> Fallback {
    let (siblings, next): (&'static [NamedFont], _) = match font {
        Normal | Bold | Italic | Larger | FixedWidth => return Fallback::DEFAULT,
        Small => (&[Info], None),
        Info => (&[Small], None),
        H1 | H2 => (HEADINGS, Some(Larger)),
        H3 | H4 => (HEADINGS, Some(Bold)),
        BoldItalic => (&[Bold], Some(Italic)),
        BoldScript | SmallScript => (&[], Some(Script)),
        Script => (&[], Some(Small)),
        FixedWidthBold => (&[FixedWidth], Some(Bold)),
        FixedWidthItalic => (&[FixedWidth], Some(Italic)),
    };
    Fallback { siblings, next }
}

/// Resolves `id` to a registered font id, ending at `default`.
pub(crate) fn resolve(id: u8, default: u8, is_registered: impl Fn(u8) -> bool) -> u8 {
    let mut current = id;
    // Each step moves to a different role; the bound only guards the graph.
    for _ in 0..NamedFont::ALL.len() {
        if is_registered(current) {
            return current;
        }
        let Some(role) = NamedFont::from_id(current) else {
            break;
        };
        let fallback = fallback(role);
        if let Some(sibling) = fallback
            .siblings
            .iter()
            .map(|f| f.id())
            .find(|&f| is_registered(f))
        {
            return sibling;
        }
        match fallback.next {
            Some(next) => current = next.id(),
            None => break,
        }
    }
    default
}

/// The font used for `id` while sub or superscript is active.
///
/// The result is a role that still goes through [`resolve`].
pub(crate) fn script_variant(id: u8) -> u8 {
    let role = match NamedFont::from_id(id) {
        Some(Info | Small | Script | BoldScript | SmallScript) => SmallScript,
        Some(Bold | BoldItalic | H3 | H4) => BoldScript,
        Some(Larger) => Normal,
        Some(H1 | H2) => Bold,
        _ => Script,
    };
    role.id()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_with(id: NamedFont, registered: &[NamedFont]) -> u8 {
        resolve(id.id(), 0, |f| registered.iter().any(|r| r.id() == f))
    }

    #[test]
    fn registered_font_resolves_to_itself() {
        assert_eq!(resolve_with(Italic, &[Normal, Italic]), Italic.id());
    }

    #[test]
    fn small_and_info_fall_back_to_each_other() {
        assert_eq!(resolve_with(Small, &[Normal, Info]), Info.id());
        assert_eq!(resolve_with(Info, &[Normal, Small]), Small.id());
        assert_eq!(resolve_with(Info, &[Normal]), Normal.id());
    }

    #[test]
    fn headings_prefer_other_headings() {
        assert_eq!(resolve_with(H4, &[Normal, H2]), H2.id());
        assert_eq!(resolve_with(H1, &[Normal, H3, H4]), H3.id());
    }

    #[test]
    fn headings_without_siblings_follow_their_edge() {
        assert_eq!(resolve_with(H1, &[Normal, Larger, Bold]), Larger.id());
        assert_eq!(resolve_with(H3, &[Normal, Larger, Bold]), Bold.id());
        assert_eq!(resolve_with(H2, &[Normal, Bold]), Normal.id());
    }

    #[test]
    fn script_chain_reaches_small() {
        assert_eq!(resolve_with(BoldScript, &[Normal, Small]), Small.id());
        assert_eq!(resolve_with(SmallScript, &[Normal, Info]), Info.id());
    }

    #[test]
    fn bold_italic_tries_bold_then_italic() {
        assert_eq!(resolve_with(BoldItalic, &[Normal, Bold, Italic]), Bold.id());
        assert_eq!(resolve_with(BoldItalic, &[Normal, Italic]), Italic.id());
    }

    #[test]
    fn unknown_ids_use_default() {
        assert_eq!(resolve(99, 0, |f| f == 0), 0);
        assert_eq!(resolve(99, 5, |f| f == 5), 5);
    }

    #[test]
    fn every_role_terminates() {
        for font in NamedFont::ALL {
            assert_eq!(resolve_with(font, &[Normal]), Normal.id(), "{font:?}");
        }
    }

    #[test]
    fn script_variants() {
        assert_eq!(script_variant(Bold.id()), BoldScript.id());
        assert_eq!(script_variant(Info.id()), SmallScript.id());
        assert_eq!(script_variant(Larger.id()), Normal.id());
        assert_eq!(script_variant(Normal.id()), Script.id());
    }
}
