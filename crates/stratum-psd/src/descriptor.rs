/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The self-describing key/typed-value tree ("descriptor") parser.
//!
//! Descriptors carry structured metadata as a recursive tree of keyed,
//! type-tagged items. This decoder never materializes the tree; it walks
//! it in file order, decoding scalars as it goes, and emits the animation
//! facts it recognizes straight into an [`AnimationSink`].
//!
//! Two counters ride along with the walk: the current layer index, which
//! advances on every `LaID` key, and the current frame index, which
//! advances on every list element at nesting level 1 and resets when the
//! layer does. The traversal order mirrors file order, which mirrors
//! document layer order, so these counters are all the linkage between a
//! fact and the layer/frame it describes.

use stratum_core::bytestream::ByteCursor;

use crate::animation::{AnimationProperty, AnimationSink};
use crate::constants::{
    TAG_BOOLEAN, TAG_DOUBLE, TAG_ENABLED, TAG_FRAME_DELAY, TAG_GLOBAL_OBJECT, TAG_HORIZONTAL,
    TAG_INTEGER, TAG_LAYER_ID, TAG_LIST, TAG_OBJECT, TAG_OFFSET, TAG_TEXT, TAG_UNIT_FLOAT,
    TAG_VERTICAL
};
use crate::errors::PsdDecodeErrors;

/// Nesting ceiling for object/list recursion.
///
/// Well-formed files nest a handful of levels; the cap only exists so a
/// crafted file cannot turn the recursive walk into a stack overflow.
const MAX_NESTING: u32 = 512;

/// What a 4-byte type tag says about the value that follows it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum DescriptorKind {
    List,
    Object,
    Boolean,
    Integer,
    Double,
    UnitFloat,
    Text,
    Other
}

/// Pure tag-to-kind dispatch; unknown tags fall through to [`DescriptorKind::Other`],
/// which is stored as a single 4-byte value.
pub(crate) const fn kind_for_tag(tag: u32) -> DescriptorKind {
    match tag {
        TAG_LIST => DescriptorKind::List,
        TAG_OBJECT | TAG_GLOBAL_OBJECT => DescriptorKind::Object,
        TAG_BOOLEAN => DescriptorKind::Boolean,
        TAG_INTEGER => DescriptorKind::Integer,
        TAG_DOUBLE => DescriptorKind::Double,
        TAG_UNIT_FLOAT => DescriptorKind::UnitFloat,
        TAG_TEXT => DescriptorKind::Text,
        _ => DescriptorKind::Other
    }
}

/// A scalar decoded for one item, or `None` for container/skipped types.
///
/// Fact emission reads these through [`integer`](DescriptorValue::integer)
/// and [`boolean`](DescriptorValue::boolean), which default to zero/false
/// when a key arrived with an unexpected type; a file that stores `FrDl`
/// as anything but an integer yields a delay of 0, not an error.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum DescriptorValue {
    None,
    Boolean(bool),
    Integer(i32),
    Double(f64)
}

impl DescriptorValue {
    const fn integer(&self) -> i32 {
        match self {
            DescriptorValue::Integer(value) => *value,
            _ => 0
        }
    }

    const fn boolean(&self) -> bool {
        match self {
            DescriptorValue::Boolean(value) => *value,
            _ => false
        }
    }
}

/// The animation counters threaded through the walk.
///
/// Both start at `-1` ("nothing seen yet") and only ever advance; they are
/// parse state, reset for every decode, and never escape into the model.
#[derive(Debug, Copy, Clone)]
pub(crate) struct AnimationState {
    pub layer: i32,
    pub frame: i32
}

impl AnimationState {
    pub(crate) fn new() -> AnimationState {
        AnimationState { layer: -1, frame: -1 }
    }

    fn next_layer(&mut self) {
        self.layer += 1;
        self.frame = -1;
    }

    fn next_frame(&mut self) {
        self.frame += 1;
    }
}

/// Parse one descriptor: a skipped UTF-16 class name, a class ID, then a
/// counted list of keyed items.
///
/// `level` is the nesting depth (0 for a top-level descriptor), `node` the
/// key of the enclosing item (0 at top level); offset facts only count
/// inside an `Ofst`-keyed node.
pub(crate) fn parse_descriptor<T, S>(
    stream: &mut ByteCursor<T>, state: &mut AnimationState, sink: &mut S, level: u32, node: u32
) -> Result<(), PsdDecodeErrors>
where
    T: AsRef<[u8]>,
    S: AnimationSink
{
    if level > MAX_NESTING {
        return Err(PsdDecodeErrors::Generic("descriptor nesting too deep"));
    }

    stream.skip_unicode_string()?;
    let _class_id_length = stream.get_u32_be()?;
    let _class_id = stream.get_u32_be()?;
    let items = stream.get_u32_be()?;

    for _ in 0..items {
        let key = stream.read_keyed_length()?;
        let tag = stream.get_u32_be()?;
        parse_item(stream, state, sink, level, node, key, tag)?;
    }
    Ok(())
}

/// Parse a counted list of type-tagged values. Elements have no keys of
/// their own; they are dispatched with the synthetic list key, which is
/// also what the frame counter triggers on.
fn parse_list<T, S>(
    stream: &mut ByteCursor<T>, state: &mut AnimationState, sink: &mut S, level: u32, node: u32
) -> Result<(), PsdDecodeErrors>
where
    T: AsRef<[u8]>,
    S: AnimationSink
{
    if level > MAX_NESTING {
        return Err(PsdDecodeErrors::Generic("descriptor nesting too deep"));
    }

    let items = stream.get_u32_be()?;

    for _ in 0..items {
        let tag = stream.get_u32_be()?;
        parse_item(stream, state, sink, level, node, TAG_LIST, tag)?;
    }
    Ok(())
}

/// Decode one keyed item and emit whatever facts it carries.
fn parse_item<T, S>(
    stream: &mut ByteCursor<T>, state: &mut AnimationState, sink: &mut S, level: u32, node: u32,
    key: u32, tag: u32
) -> Result<(), PsdDecodeErrors>
where
    T: AsRef<[u8]>,
    S: AnimationSink
{
    if key == TAG_LAYER_ID {
        state.next_layer();
    }
    // a list element at depth 1 is a frame boundary
    if key == TAG_LIST && level == 1 {
        state.next_frame();
    }

    let value = match kind_for_tag(tag) {
        DescriptorKind::List => {
            parse_list(stream, state, sink, level + 1, key)?;
            DescriptorValue::None
        }
        DescriptorKind::Object => {
            parse_descriptor(stream, state, sink, level + 1, key)?;
            DescriptorValue::None
        }
        DescriptorKind::Boolean => DescriptorValue::Boolean(stream.get_u8()? != 0),
        DescriptorKind::Integer => DescriptorValue::Integer(stream.get_i32_be()?),
        DescriptorKind::Double => {
            // Legacy truncating decode, kept bit-for-bit: the first word is
            // taken as the integer part, the second is dropped.
            let high = stream.get_i32_be()?;
            let _low = stream.get_i32_be()?;
            DescriptorValue::Double(high as f64)
        }
        DescriptorKind::UnitFloat => {
            stream.get_i32_be()?;
            stream.get_i32_be()?;
            stream.get_i32_be()?;
            DescriptorValue::None
        }
        DescriptorKind::Text => {
            stream.skip_unicode_string()?;
            DescriptorValue::None
        }
        DescriptorKind::Other => {
            stream.get_i32_be()?;
            DescriptorValue::None
        }
    };

    if key == TAG_FRAME_DELAY {
        sink.record(state.layer, state.frame, AnimationProperty::Delay(value.integer()));
    }
    if key == TAG_ENABLED {
        sink.record(
            state.layer,
            state.frame,
            AnimationProperty::Visible(value.boolean())
        );
    }
    if node == TAG_OFFSET {
        if key == TAG_HORIZONTAL {
            sink.record(
                state.layer,
                state.frame,
                AnimationProperty::OffsetX(value.integer())
            );
        }
        if key == TAG_VERTICAL {
            sink.record(
                state.layer,
                state.frame,
                AnimationProperty::OffsetY(value.integer())
            );
        }
    }
    Ok(())
}
