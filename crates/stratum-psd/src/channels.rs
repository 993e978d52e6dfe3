/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Per-channel pixel decoding.
//!
//! Each stored channel is prefixed by its own 2-byte compression code and
//! decoded independently into one slot of the layer's ARGB pixels.

use alloc::vec::Vec;

use stratum_core::bytestream::ByteCursor;

use crate::constants::CompressionMethod;
use crate::errors::PsdDecodeErrors;
use crate::model::Bitmap;

/// Decode every stored channel of a layer, in file order.
///
/// A 3-channel layer stores RGB only; its channels map to slots 1..=3 so
/// the alpha slot keeps the opaque-ish default. A 4-channel layer maps
/// straight onto ARGB.
pub(crate) fn decode_layer_channels<T: AsRef<[u8]>>(
    stream: &mut ByteCursor<T>, bitmap: &mut Bitmap
) -> Result<(), PsdDecodeErrors> {
    let channel_count = bitmap.channel_count();

    for channel in 0..channel_count {
        let slot = if channel_count == 3 { channel + 1 } else { channel };

        let compression = stream.get_u16_be()?;

        match CompressionMethod::from_int(compression) {
            Some(CompressionMethod::NoCompression) => decode_raw(stream, bitmap, slot)?,
            Some(CompressionMethod::RLE) => decode_rle(stream, bitmap, slot)?,
            None => return Err(PsdDecodeErrors::UnsupportedCompression(compression))
        }
    }
    Ok(())
}

/// Raw storage: one byte per pixel, row major.
fn decode_raw<T: AsRef<[u8]>>(
    stream: &mut ByteCursor<T>, bitmap: &mut Bitmap, slot: usize
) -> Result<(), PsdDecodeErrors> {
    let (width, height) = bitmap.dimensions();

    for y in 0..height {
        for x in 0..width {
            let value = stream.get_u8()?;
            bitmap.set_channel(x, y, slot, value);
        }
    }
    Ok(())
}

/// PackBits storage: per-scanline byte counts, then control-byte runs.
///
/// A scanline ends when its x position reaches the width or its byte
/// budget runs dry, whichever happens first. Replicated runs may push x
/// past the width (the writes are dropped), but never consume more than
/// the scanline's budget; getting this wrong would desynchronize every
/// following scanline.
fn decode_rle<T: AsRef<[u8]>>(
    stream: &mut ByteCursor<T>, bitmap: &mut Bitmap, slot: usize
) -> Result<(), PsdDecodeErrors> {
    let (width, height) = bitmap.dimensions();

    let mut scanline_byte_counts = Vec::with_capacity(height);
    for _ in 0..height {
        scanline_byte_counts.push(stream.get_u16_be()?);
    }

    for (y, byte_count) in scanline_byte_counts.iter().enumerate() {
        let mut budget = usize::from(*byte_count);
        let mut x = 0_usize;

        while budget > 0 && x < width {
            let control = stream.get_i8()?;
            budget -= 1;

            if control < 0 {
                // replicate the next byte 1 - control times
                let run = (1 - i32::from(control)) as usize;

                if budget > 0 {
                    let value = stream.get_u8()?;
                    budget -= 1;

                    for _ in 0..run {
                        bitmap.set_channel(x, y, slot, value);
                        x += 1;
                    }
                }
            } else {
                // copy the next 1 + control bytes, clipped to the budget
                let mut run = usize::from(control as u8) + 1;

                while run > 0 && budget > 0 {
                    let value = stream.get_u8()?;
                    budget -= 1;
                    run -= 1;

                    bitmap.set_channel(x, y, slot, value);
                    x += 1;
                }
            }
        }
    }
    Ok(())
}
