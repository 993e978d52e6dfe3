/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The document loader: one linear pass over the whole file.
//!
//! The loader drives a single [`ByteCursor`] through header, image
//! resources, the layer directory and the per-layer pixel data, handing
//! sub-structures to the descriptor and channel decoders. Sections are
//! length-prefixed; after parsing whatever a section is understood to
//! contain, the cursor is repositioned to the section's declared end, so
//! producers that pad their blocks with trailing bytes decode cleanly.

use alloc::string::String;

use stratum_core::bytestream::ByteCursor;
use stratum_core::log::trace;
use stratum_core::options::DecoderOptions;

use crate::channels::decode_layer_channels;
use crate::constants::{
    ColorMode, RESOURCE_ANIMATION_FRAMES, RESOURCE_ANIMATION_STATE, TAG_MULTI_LAYER_STATE,
    TAG_SHEET_METADATA
};
use crate::descriptor::{parse_descriptor, AnimationState};
use crate::errors::PsdDecodeErrors;
use crate::model::{Bitmap, Layer, LayeredImage};

/// A layered-document decoder.
///
/// Consumes an in-memory buffer holding the whole file and produces a
/// [`LayeredImage`]: canvas size, per-layer rasters and names, and the
/// animation metadata embedded in image resources and layer metadata
/// blocks. Decoding is a single forward pass; the trailing merged
/// composite is never read.
///
/// Only 8-bit RGB documents are decoded; everything else fails with an
/// error whose [`kind`](PsdDecodeErrors::kind) is `NotSupported`.
pub struct PsdDecoder<T>
where
    T: AsRef<[u8]>
{
    stream:  ByteCursor<T>,
    options: DecoderOptions,
    state:   AnimationState
}

impl<T> PsdDecoder<T>
where
    T: AsRef<[u8]>
{
    /// Create a new decoder reading a layered document from `data`.
    pub fn new(data: T) -> PsdDecoder<T> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    /// Creates a new decoder with options that influence decoding routines
    ///
    /// # Arguments
    /// - data: Data source
    /// - options: Custom options for the decoder
    pub fn new_with_options(data: T, options: DecoderOptions) -> PsdDecoder<T> {
        PsdDecoder {
            stream: ByteCursor::new(data),
            options,
            state: AnimationState::new()
        }
    }

    /// Decode the document into `dest`.
    ///
    /// `dest` is cleared before parsing starts and cleared again if
    /// parsing fails; the caller never observes a partially decoded
    /// document.
    pub fn decode_into(&mut self, dest: &mut LayeredImage) -> Result<(), PsdDecodeErrors> {
        dest.clear();
        self.state = AnimationState::new();

        let result = self.parse_document(dest);
        if result.is_err() {
            dest.clear();
        }
        result
    }

    /// Decode the document into a fresh model.
    pub fn decode(&mut self) -> Result<LayeredImage, PsdDecodeErrors> {
        let mut dest = LayeredImage::new();
        self.decode_into(&mut dest)?;
        Ok(dest)
    }

    fn parse_document(&mut self, dest: &mut LayeredImage) -> Result<(), PsdDecodeErrors> {
        self.parse_header(dest)?;
        self.skip_block()?; // color mode data
        self.parse_image_resources(dest)?;
        self.parse_layer_and_mask(dest)?;
        // the merged composite follows; it is never read
        Ok(())
    }

    fn parse_header(&mut self, dest: &mut LayeredImage) -> Result<(), PsdDecodeErrors> {
        self.stream.skip(4)?; // signature
        self.stream.skip(2)?; // version
        self.stream.skip(6)?; // reserved
        self.stream.skip(2)?; // composite channel count

        let rows = self.stream.get_u32_be()? as usize;
        let columns = self.stream.get_u32_be()? as usize;

        if columns > self.options.max_width {
            return Err(PsdDecodeErrors::LargeDimensions(
                self.options.max_width,
                columns
            ));
        }
        if rows > self.options.max_height {
            return Err(PsdDecodeErrors::LargeDimensions(
                self.options.max_height,
                rows
            ));
        }

        dest.width = columns;
        dest.height = rows;

        let depth = self.stream.get_u16_be()?;
        if depth != 8 {
            return Err(PsdDecodeErrors::UnsupportedBitDepth(depth));
        }

        let mode = self.stream.get_u16_be()?;
        if ColorMode::from_int(mode) != Some(ColorMode::RGB) {
            return Err(PsdDecodeErrors::UnsupportedColorMode(mode));
        }

        trace!("Canvas width: {}", dest.width);
        trace!("Canvas height: {}", dest.height);

        Ok(())
    }

    /// Skip a `u32`-length-prefixed block wholesale.
    fn skip_block(&mut self) -> Result<(), PsdDecodeErrors> {
        let size = self.stream.get_u32_be()? as usize;
        self.stream.skip(size)?;
        Ok(())
    }

    fn parse_image_resources(&mut self, dest: &mut LayeredImage) -> Result<(), PsdDecodeErrors> {
        let size = self.stream.get_u32_be()? as usize;
        let end = self.stream.position() + size;

        while self.stream.position() < end {
            self.parse_resource_block(dest)?;
        }
        Ok(())
    }

    fn parse_resource_block(&mut self, dest: &mut LayeredImage) -> Result<(), PsdDecodeErrors> {
        let _signature = self.stream.get_u32_be()?;
        let id = self.stream.get_u16_be()?;
        self.stream.skip_pascal_string()?; // resource name
        let size = self.stream.get_u32_be()? as usize;

        match id {
            RESOURCE_ANIMATION_STATE | RESOURCE_ANIMATION_FRAMES => {
                trace!("Animation resource block, id {}, {} bytes", id, size);
                self.parse_animation_resource(dest, size)?;
            }
            _ => self.stream.skip(size)?
        }

        self.stream.pad_to_even()?;
        Ok(())
    }

    /// An animation resource wraps a tagged inner block which in turn
    /// wraps a versioned descriptor. Both carry their own sizes; the
    /// cursor is clamped to each declared end on the way out.
    fn parse_animation_resource(
        &mut self, dest: &mut LayeredImage, size: usize
    ) -> Result<(), PsdDecodeErrors> {
        let end = self.stream.position() + size;

        let _id = self.stream.get_u32_be()?;
        let _kind = self.stream.get_u32_be()?;
        let _inner_size = self.stream.get_u32_be()?;

        self.parse_animation_resource_data(dest)?;

        self.stream.set_position(end)?;
        Ok(())
    }

    fn parse_animation_resource_data(
        &mut self, dest: &mut LayeredImage
    ) -> Result<(), PsdDecodeErrors> {
        let _signature = self.stream.get_u32_be()?;
        let _kind = self.stream.get_u32_be()?;
        let size = self.stream.get_u32_be()? as usize;

        let end = self.stream.position() + size;

        if size > 0 {
            let _descriptor_version = self.stream.get_u32_be()?;
            parse_descriptor(&mut self.stream, &mut self.state, &mut dest.animation, 0, 0)?;
        }

        self.stream.set_position(end)?;
        Ok(())
    }

    fn parse_layer_and_mask(&mut self, dest: &mut LayeredImage) -> Result<(), PsdDecodeErrors> {
        let size = self.stream.get_u32_be()? as usize;
        let end = self.stream.position() + size;

        self.parse_layer_info(dest)?;
        self.skip_block()?; // global layer mask info

        self.stream.set_position(end)?;
        Ok(())
    }

    fn parse_layer_info(&mut self, dest: &mut LayeredImage) -> Result<(), PsdDecodeErrors> {
        let size = self.stream.get_u32_be()? as usize;
        let end = self.stream.position() + size;

        self.parse_layer_structure(dest)?;
        self.parse_layer_pixel_data(dest)?;

        self.stream.set_position(end)?;
        Ok(())
    }

    fn parse_layer_structure(&mut self, dest: &mut LayeredImage) -> Result<(), PsdDecodeErrors> {
        // a negative count means the composite excludes the merged result;
        // the magnitude is the layer count either way
        let declared = self.stream.get_i16_be()?;
        let layer_count = usize::from(declared.unsigned_abs());

        if layer_count > self.options.max_layers {
            return Err(PsdDecodeErrors::TooManyLayers(
                self.options.max_layers,
                layer_count
            ));
        }

        trace!("Layer count: {}", layer_count);

        for _ in 0..layer_count {
            self.parse_layer_record(dest)?;
        }

        self.stream.pad_to_even()?;
        Ok(())
    }

    fn parse_layer_record(&mut self, dest: &mut LayeredImage) -> Result<(), PsdDecodeErrors> {
        let top = self.stream.get_i32_be()?;
        let left = self.stream.get_i32_be()?;
        let bottom = self.stream.get_i32_be()?;
        let right = self.stream.get_i32_be()?;

        let width = i64::from(right) - i64::from(left);
        let height = i64::from(bottom) - i64::from(top);

        if width < 0 || height < 0 {
            return Err(PsdDecodeErrors::Generic("negative layer dimensions"));
        }
        if width as usize > self.options.max_width {
            return Err(PsdDecodeErrors::LargeDimensions(
                self.options.max_width,
                width as usize
            ));
        }
        if height as usize > self.options.max_height {
            return Err(PsdDecodeErrors::LargeDimensions(
                self.options.max_height,
                height as usize
            ));
        }

        let channel_count = self.stream.get_u16_be()?;
        self.stream.skip(6 * usize::from(channel_count))?; // channel length table

        let _blend_signature = self.stream.get_u32_be()?;
        let _blend_key = self.stream.get_u32_be()?;
        let _opacity = self.stream.get_u8()?;
        let _clipping = self.stream.get_u8()?;
        let flags = self.stream.get_u8()?;
        let _filler = self.stream.get_u8()?;

        let extra_size = self.stream.get_u32_be()? as usize;
        let end = self.stream.position() + extra_size;

        self.skip_block()?; // layer mask data
        self.skip_block()?; // layer blending ranges

        let name = self.parse_layer_name()?;

        while self.stream.position() < end {
            self.parse_layer_extra(dest)?;
        }
        self.stream.set_position(end)?;

        trace!(
            "Layer '{}' at ({}, {}), {}x{}, {} channels",
            name,
            left,
            top,
            width,
            height,
            channel_count
        );

        let mut bitmap = Bitmap::new(width as usize, height as usize);
        bitmap.set_channel_count(usize::from(channel_count));

        dest.layers.push(Layer {
            name,
            x: left,
            y: top,
            flags,
            bitmap
        });
        Ok(())
    }

    /// The layer name is a Pascal string padded to a 4-byte boundary, not
    /// the 2-byte alignment used everywhere else in the format.
    fn parse_layer_name(&mut self) -> Result<String, PsdDecodeErrors> {
        let start = self.stream.position();
        let (name, consumed) = self.stream.read_pascal_string()?;

        let padded = (consumed + 3) & !3;
        self.stream.set_position(start + padded)?;

        Ok(name)
    }

    /// One additional-info block: signature, key, keyed payload.
    fn parse_layer_extra(&mut self, dest: &mut LayeredImage) -> Result<(), PsdDecodeErrors> {
        let _signature = self.stream.get_u32_be()?;
        let key = self.stream.get_u32_be()?;

        if key == TAG_SHEET_METADATA {
            self.parse_metadata_items(dest)
        } else {
            self.skip_block()
        }
    }

    fn parse_metadata_items(&mut self, dest: &mut LayeredImage) -> Result<(), PsdDecodeErrors> {
        let _size = self.stream.get_u32_be()?;
        let items = self.stream.get_u32_be()?;

        for _ in 0..items {
            let _signature = self.stream.get_u32_be()?;
            let key = self.stream.get_u32_be()?;
            let _copy_on_duplicate = self.stream.get_u32_be()?;

            if key == TAG_MULTI_LAYER_STATE {
                self.parse_animation_metadata(dest)?;
            } else {
                self.skip_block()?;
            }
        }
        Ok(())
    }

    fn parse_animation_metadata(&mut self, dest: &mut LayeredImage) -> Result<(), PsdDecodeErrors> {
        let size = self.stream.get_u32_be()? as usize;
        let end = self.stream.position() + size;

        let _descriptor_version = self.stream.get_u32_be()?;
        parse_descriptor(&mut self.stream, &mut self.state, &mut dest.animation, 0, 0)?;

        self.stream.set_position(end)?;
        Ok(())
    }

    fn parse_layer_pixel_data(&mut self, dest: &mut LayeredImage) -> Result<(), PsdDecodeErrors> {
        for layer in dest.layers.iter_mut() {
            decode_layer_channels(&mut self.stream, &mut layer.bitmap)?;
        }
        Ok(())
    }
}

/// Load a layered document from a file into `dest`.
///
/// An unreadable file and a malformed one end the same way: `dest` is
/// left cleared and the error's kind is `InvalidFile`. Callers wanting to
/// tell the cases apart should check the path before calling.
#[cfg(feature = "std")]
pub fn load_layered_image<P: AsRef<std::path::Path>>(
    dest: &mut LayeredImage, path: P
) -> Result<(), PsdDecodeErrors> {
    dest.clear();

    let contents = std::fs::read(path).map_err(PsdDecodeErrors::FileIo)?;

    PsdDecoder::new(contents).decode_into(dest)
}
