/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Formatter};

use stratum_core::bytestream::CursorError;

/// The two failure classes a decode can end in.
///
/// Every [`PsdDecodeErrors`] variant collapses to one of these via
/// [`PsdDecodeErrors::kind`]; callers that only want a status can match on
/// the kind and ignore the detail.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DecodeErrorKind {
    /// The file is structurally plausible but uses a feature this decoder
    /// deliberately does not implement.
    NotSupported,
    /// The stream is truncated, out of bounds or otherwise unreadable.
    InvalidFile
}

/// Errors that can occur while decoding a layered document.
pub enum PsdDecodeErrors {
    /// Only 8-bit channels are decoded.
    UnsupportedBitDepth(u16),
    /// Only RGB documents (color mode 3) are decoded.
    UnsupportedColorMode(u16),
    /// Channel compression was not raw (0) or RLE (1).
    UnsupportedCompression(u16),
    /// Canvas or layer dimensions above the configured limits.
    ///
    /// # Arguments
    /// - 1st argument is the configured limit
    /// - 2nd argument is the dimension found
    LargeDimensions(usize, usize),
    /// Layer count above the configured limit.
    ///
    /// # Arguments
    /// - 1st argument is the configured limit
    /// - 2nd argument is the count found
    TooManyLayers(usize, usize),
    /// Generic message
    Generic(&'static str),
    /// A cursor read ran out of bytes or out of bounds.
    IoErrors(CursorError),
    /// The input file could not be read at all.
    #[cfg(feature = "std")]
    FileIo(std::io::Error)
}

impl PsdDecodeErrors {
    /// Collapse this error to the coarse failure class.
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            PsdDecodeErrors::UnsupportedBitDepth(_)
            | PsdDecodeErrors::UnsupportedColorMode(_)
            | PsdDecodeErrors::UnsupportedCompression(_) => DecodeErrorKind::NotSupported,
            _ => DecodeErrorKind::InvalidFile
        }
    }
}

impl Debug for PsdDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PsdDecodeErrors::UnsupportedBitDepth(depth) => {
                writeln!(f, "Unsupported bit depth {depth}, only 8 is decoded")
            }
            PsdDecodeErrors::UnsupportedColorMode(mode) => {
                writeln!(f, "Unsupported color mode {mode}, only RGB (3) is decoded")
            }
            PsdDecodeErrors::UnsupportedCompression(method) => {
                writeln!(
                    f,
                    "Unsupported channel compression {method}, only raw (0) and RLE (1) are decoded"
                )
            }
            PsdDecodeErrors::LargeDimensions(supported, found) => {
                writeln!(
                    f,
                    "Too large dimensions, configured limit is {supported} but found {found}"
                )
            }
            PsdDecodeErrors::TooManyLayers(supported, found) => {
                writeln!(
                    f,
                    "Too many layers, configured limit is {supported} but found {found}"
                )
            }
            PsdDecodeErrors::Generic(reason) => {
                writeln!(f, "{reason}")
            }
            PsdDecodeErrors::IoErrors(err) => {
                writeln!(f, "I/O error: {err:?}")
            }
            #[cfg(feature = "std")]
            PsdDecodeErrors::FileIo(err) => {
                writeln!(f, "Cannot read input: {err}")
            }
        }
    }
}

impl From<CursorError> for PsdDecodeErrors {
    fn from(err: CursorError) -> Self {
        Self::IoErrors(err)
    }
}

impl From<&'static str> for PsdDecodeErrors {
    fn from(reason: &'static str) -> Self {
        Self::Generic(reason)
    }
}
