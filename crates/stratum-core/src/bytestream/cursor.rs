/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;

use crate::bytestream::error::CursorError;

/// A big-endian byte cursor over an in-memory buffer.
///
/// The cursor owns its source (anything viewable as `&[u8]`, typically a
/// `Vec<u8>` holding a whole file) and tracks a read position with the
/// invariant `0 <= position <= len`.
///
/// Every read is atomic: a read of `N` bytes either returns a value and
/// advances the position by `N`, or fails with
/// [`CursorError::NotEnoughBytes`] and leaves the position untouched.
/// There is no silent truncation.
pub struct ByteCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
    /// Create a new cursor positioned at the start of `stream`.
    pub fn new(stream: T) -> ByteCursor<T> {
        ByteCursor { stream, position: 0 }
    }

    /// Length of the underlying buffer in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.stream.as_ref().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stream.as_ref().is_empty()
    }

    /// Current read position.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes between the current position and the end.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position)
    }

    /// Move the read position to an absolute offset.
    ///
    /// Seeking exactly to `len` is allowed (the cursor is then exhausted),
    /// seeking past it is not.
    pub fn set_position(&mut self, position: usize) -> Result<(), CursorError> {
        if position > self.len() {
            return Err(CursorError::OutOfBounds(position, self.len()));
        }
        self.position = position;
        Ok(())
    }

    /// Advance the read position by `num` bytes without looking at them.
    pub fn skip(&mut self, num: usize) -> Result<(), CursorError> {
        match self.position.checked_add(num) {
            Some(new_position) if new_position <= self.len() => {
                self.position = new_position;
                Ok(())
            }
            _ => Err(CursorError::NotEnoughBytes(num, self.remaining()))
        }
    }

    /// Round the read position up to the next 2-byte boundary.
    ///
    /// Sections of the format are 2-byte aligned; the single pad byte, when
    /// present, still has to exist in the buffer.
    pub fn pad_to_even(&mut self) -> Result<(), CursorError> {
        let padded = (self.position + 1) & !1;
        if padded > self.len() {
            return Err(CursorError::OutOfBounds(padded, self.len()));
        }
        self.position = padded;
        Ok(())
    }

    /// Read a single byte.
    #[inline]
    pub fn get_u8(&mut self) -> Result<u8, CursorError> {
        match self.stream.as_ref().get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(CursorError::NotEnoughBytes(1, 0))
        }
    }

    /// Read a single byte as a signed value.
    #[inline]
    pub fn get_i8(&mut self) -> Result<i8, CursorError> {
        self.get_u8().map(|byte| byte as i8)
    }

    /// Borrow `num` bytes at the current position and advance past them.
    pub fn get_slice(&mut self, num: usize) -> Result<&[u8], CursorError> {
        let end = match self.position.checked_add(num) {
            Some(end) if end <= self.len() => end,
            _ => return Err(CursorError::NotEnoughBytes(num, self.remaining()))
        };
        let bytes = &self.stream.as_ref()[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Read a Pascal string: a 1-byte length prefix followed by that many
    /// bytes of (nominally MacRoman, here lossy UTF-8) characters, with the
    /// cursor left on the next 2-byte boundary.
    ///
    /// Returns the decoded string and the unpadded byte count consumed by
    /// the string itself (`length + 1` for the prefix byte); callers doing
    /// their own block bookkeeping need that count, not the padded one.
    pub fn read_pascal_string(&mut self) -> Result<(String, usize), CursorError> {
        let length = usize::from(self.get_u8()?);
        let name = String::from_utf8_lossy(self.get_slice(length)?).into_owned();
        self.pad_to_even()?;

        Ok((name, length + 1))
    }

    /// Skip over a Pascal string, including its even-padding.
    pub fn skip_pascal_string(&mut self) -> Result<(), CursorError> {
        let length = usize::from(self.get_u8()?);
        self.skip(length)?;
        self.pad_to_even()
    }

    /// Skip over a Unicode string: a 4-byte character count followed by
    /// that many UTF-16 code units. The contents are never decoded.
    pub fn skip_unicode_string(&mut self) -> Result<(), CursorError> {
        let count = self.get_u32_be()? as usize;
        self.skip(count * 2)
    }

    /// Read a length-or-key field.
    ///
    /// The descriptor format stores keys as a 4-byte length followed by
    /// that many bytes, with zero as a sentinel meaning "a literal 4-byte
    /// tag follows instead". In the zero case the tag is read and returned;
    /// otherwise the keyed block is skipped and the length itself is
    /// returned (it can never collide with a printable 4-cc tag a caller
    /// would match on).
    pub fn read_keyed_length(&mut self) -> Result<u32, CursorError> {
        let length = self.get_u32_be()?;
        if length == 0 {
            return self.get_u32_be();
        }
        self.skip(length as usize)?;
        Ok(length)
    }
}

macro_rules! get_int_be {
    ($name:tt,$name2:tt,$int_type:tt,$signed_type:tt) => {
        impl<T: AsRef<[u8]>> ByteCursor<T> {
            #[doc = concat!("Read a big-endian `", stringify!($int_type), "`.")]
            #[doc = ""]
            #[doc = "Fails without advancing if not enough bytes remain."]
            #[inline]
            pub fn $name(&mut self) -> Result<$int_type, CursorError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let end = self.position + SIZE_OF_VAL;

                match self.stream.as_ref().get(self.position..end) {
                    Some(bytes) => {
                        let mut space = [0; SIZE_OF_VAL];
                        space.copy_from_slice(bytes);
                        self.position = end;

                        Ok($int_type::from_be_bytes(space))
                    }
                    None => Err(CursorError::NotEnoughBytes(
                        SIZE_OF_VAL,
                        self.remaining()
                    ))
                }
            }

            #[doc = concat!("Read a big-endian `", stringify!($signed_type), "`.")]
            #[inline]
            pub fn $name2(&mut self) -> Result<$signed_type, CursorError> {
                self.$name().map(|value| value as $signed_type)
            }
        }
    };
}

get_int_be!(get_u16_be, get_i16_be, u16, i16);
get_int_be!(get_u32_be, get_i32_be, u32, i32);
