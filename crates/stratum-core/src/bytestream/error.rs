/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Formatter};

/// Errors raised by [`ByteCursor`](crate::bytestream::ByteCursor) operations.
///
/// Any of these indicates a truncated or structurally broken stream; the
/// decoders treat them all as fatal for the current decode.
pub enum CursorError {
    /// A read or skip wanted more bytes than the buffer still holds.
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes requested
    /// - 2nd argument is the number of bytes actually remaining
    NotEnoughBytes(usize, usize),
    /// A seek or padding operation targeted a position past the buffer end.
    ///
    /// # Arguments
    /// - 1st argument is the target position
    /// - 2nd argument is the buffer length
    OutOfBounds(usize, usize),
    /// Generic message
    Generic(&'static str)
}

impl Debug for CursorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            CursorError::NotEnoughBytes(requested, remaining) => {
                writeln!(
                    f,
                    "Not enough bytes, requested {requested} but only {remaining} remain"
                )
            }
            CursorError::OutOfBounds(position, length) => {
                writeln!(
                    f,
                    "Position {position} is beyond the end of the buffer ({length} bytes)"
                )
            }
            CursorError::Generic(reason) => {
                writeln!(f, "{reason}")
            }
        }
    }
}

impl From<&'static str> for CursorError {
    fn from(reason: &'static str) -> Self {
        Self::Generic(reason)
    }
}
