// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error returned by the [`Printer`](crate::Printer) queries.
///
/// Malformed markup never produces an error: decoding is lenient and always
/// yields some layout. Errors only report configuration problems that make a
/// layout pass impossible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The font id that was looked up when the error occurred.
    font: u8,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The font id involved in the failure.
    pub fn font(&self) -> u8 {
        self.font
    }

    pub(crate) fn missing_default_font(font: u8) -> Self {
        Self {
            kind: ErrorKind::MissingDefaultFont,
            font,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::MissingDefaultFont => write!(
                f,
                "default font {} is not registered with the printer",
                self.font
            ),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The default font, which terminates every fallback chain, has not been
    /// registered.
    MissingDefaultFont,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_font() {
        let err = Error::missing_default_font(3);
        assert_eq!(err.kind(), ErrorKind::MissingDefaultFont);
        assert_eq!(err.font(), 3);
        assert_eq!(
            err.to_string(),
            "default font 3 is not registered with the printer"
        );
    }
}
