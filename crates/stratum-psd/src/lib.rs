/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A layered Photoshop PSD decoder
//!
//! Most PSD readers flatten: they hand back the merged composite and call
//! it a day. This crate goes the other way and decodes the *layer*
//! structure of 8-bit RGB documents: per-layer rasters (raw and RLE
//! channel storage), layer names, offsets and visibility flags, plus the
//! animation metadata some producers embed (per-frame delays, per-frame
//! layer visibility and offsets), which is how a layered file becomes an
//! animation.
//!
//! It is deliberately not a full Photoshop implementation. Blend modes,
//! masks, adjustment layers and every other compositing feature are
//! structurally skipped; depths other than 8 bits, color modes other than
//! RGB and ZIP-compressed channels are rejected as unsupported.
//!
//! # Example
//! - Decode a document from bytes
//! ```no_run
//! use stratum_psd::PsdDecoder;
//!
//! let data = [0_u8; 100]; // a whole .psd file
//! let mut decoder = PsdDecoder::new(&data[..]);
//!
//! match decoder.decode() {
//!     Ok(image) => {
//!         for layer in &image.layers {
//!             println!("{}: {}x{}", layer.name, layer.bitmap.width(), layer.bitmap.height());
//!         }
//!     }
//!     Err(e) => println!("decode failed: {:?}", e)
//! }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub extern crate stratum_core;

pub use decoder::PsdDecoder;
#[cfg(feature = "std")]
pub use decoder::load_layered_image;
pub use model::{Bitmap, Layer, LayeredImage, Pixel, LAYER_FLAG_HIDDEN};

pub mod animation;
mod channels;
pub mod constants;
pub mod decoder;
mod descriptor;
pub mod errors;
pub mod model;
pub mod serde;
