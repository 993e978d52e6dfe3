/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(clippy::upper_case_acronyms)]

/// Four-character tag as the big-endian integer the file stores it as.
pub(crate) const fn fourcc(tag: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*tag)
}

// Descriptor type tags.
pub(crate) const TAG_LIST: u32 = fourcc(b"VlLs");
pub(crate) const TAG_OBJECT: u32 = fourcc(b"Objc");
pub(crate) const TAG_GLOBAL_OBJECT: u32 = fourcc(b"GLbO");
pub(crate) const TAG_BOOLEAN: u32 = fourcc(b"bool");
pub(crate) const TAG_INTEGER: u32 = fourcc(b"long");
pub(crate) const TAG_DOUBLE: u32 = fourcc(b"doub");
pub(crate) const TAG_UNIT_FLOAT: u32 = fourcc(b"UntF");
pub(crate) const TAG_TEXT: u32 = fourcc(b"TEXT");

// Descriptor keys the animation walk reacts to.
pub(crate) const TAG_LAYER_ID: u32 = fourcc(b"LaID");
pub(crate) const TAG_FRAME_DELAY: u32 = fourcc(b"FrDl");
pub(crate) const TAG_ENABLED: u32 = fourcc(b"enab");
pub(crate) const TAG_OFFSET: u32 = fourcc(b"Ofst");
pub(crate) const TAG_HORIZONTAL: u32 = fourcc(b"Hrzn");
pub(crate) const TAG_VERTICAL: u32 = fourcc(b"Vrtc");

// Layer additional-info keys.
pub(crate) const TAG_SHEET_METADATA: u32 = fourcc(b"shmd");
pub(crate) const TAG_MULTI_LAYER_STATE: u32 = fourcc(b"mlst");

// Image resource IDs carrying animation descriptors.
pub(crate) const RESOURCE_ANIMATION_STATE: u16 = 4000;
pub(crate) const RESOURCE_ANIMATION_FRAMES: u16 = 4004;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ColorMode {
    Bitmap = 0,
    Grayscale = 1,
    IndexedColor = 2,
    RGB = 3,
    CMYK = 4,
    MultiChannel = 7,
    DuoTone = 8,
    LabColor = 9
}

impl ColorMode {
    pub fn from_int(int: u16) -> Option<ColorMode> {
        use crate::constants::ColorMode::{
            Bitmap, DuoTone, Grayscale, IndexedColor, LabColor, MultiChannel, CMYK, RGB
        };

        match int {
            0 => Some(Bitmap),
            1 => Some(Grayscale),
            2 => Some(IndexedColor),
            3 => Some(RGB),
            4 => Some(CMYK),
            7 => Some(MultiChannel),
            8 => Some(DuoTone),
            9 => Some(LabColor),
            _ => None
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CompressionMethod {
    NoCompression = 0,
    RLE = 1
}

impl CompressionMethod {
    pub fn from_int(int: u16) -> Option<CompressionMethod> {
        match int {
            0 => Some(Self::NoCompression),
            1 => Some(Self::RLE),
            _ => None
        }
    }
}
