/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Animation metadata emitted by the descriptor walk.
//!
//! Animation data is scattered through the file as descriptor key/value
//! items; the walk in [`crate::descriptor`] turns the relevant ones into
//! `(layer, frame, property)` facts and hands them to a sink the moment
//! they are decoded. [`AnimationTimeline`] is the production sink and ends
//! up on the decoded [`LayeredImage`](crate::model::LayeredImage); tests
//! substitute their own recording sinks.

use alloc::vec::Vec;

/// A single animation fact decoded from the metadata.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AnimationProperty {
    /// Display duration of a frame, in the file's delay units.
    Delay(i32),
    /// Whether a layer is visible in a frame.
    Visible(bool),
    /// Horizontal position delta of a layer in a frame.
    OffsetX(i32),
    /// Vertical position delta of a layer in a frame.
    OffsetY(i32)
}

/// Receives animation facts as the descriptor walk emits them.
///
/// `layer` and `frame` are the walk's running counters and start at `-1`;
/// a fact can legitimately arrive before the counter it does not care
/// about has ever advanced (frame delays carry `layer == -1`, they are a
/// document-wide property).
pub trait AnimationSink {
    fn record(&mut self, layer: i32, frame: i32, property: AnimationProperty);
}

/// Per-layer, per-frame animation state.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FrameState {
    /// Layer visibility in this frame, if the file said anything about it.
    pub visible: Option<bool>,
    /// Horizontal offset delta in this frame.
    pub dx:      Option<i32>,
    /// Vertical offset delta in this frame.
    pub dy:      Option<i32>
}

/// Animation state of one layer across frames.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct LayerAnimation {
    /// Frame states in frame order; indices match the document frame list.
    pub frames: Vec<FrameState>
}

/// All animation metadata found in a document.
///
/// Indices line up with the document: `layers[i]` describes the i-th
/// decoded layer (the metadata is emitted in layer file order), `delays[f]`
/// is the f-th frame's delay.
#[derive(Debug, Clone, Default)]
pub struct AnimationTimeline {
    /// Per-frame display delays, indexed by frame.
    pub delays: Vec<Option<i32>>,
    /// Per-layer frame states, indexed by layer.
    pub layers: Vec<LayerAnimation>
}

impl AnimationTimeline {
    /// True when the document carried no animation metadata at all.
    pub fn is_empty(&self) -> bool {
        self.delays.is_empty() && self.layers.is_empty()
    }

    /// Number of frames any part of the metadata mentioned.
    pub fn frame_count(&self) -> usize {
        let per_layer = self
            .layers
            .iter()
            .map(|layer| layer.frames.len())
            .max()
            .unwrap_or(0);
        self.delays.len().max(per_layer)
    }

    /// Delay of frame `frame`, if the file specified one.
    pub fn delay(&self, frame: usize) -> Option<i32> {
        self.delays.get(frame).copied().flatten()
    }

    /// Frame state of `layer` at `frame`, if the file specified one.
    pub fn frame_state(&self, layer: usize, frame: usize) -> Option<&FrameState> {
        self.layers.get(layer)?.frames.get(frame)
    }

    pub(crate) fn clear(&mut self) {
        self.delays.clear();
        self.layers.clear();
    }

    fn frame_slot(&mut self, layer: i32, frame: i32) -> Option<&mut FrameState> {
        if layer < 0 || frame < 0 {
            return None;
        }
        let (layer, frame) = (layer as usize, frame as usize);

        if self.layers.len() <= layer {
            self.layers.resize(layer + 1, LayerAnimation::default());
        }
        let frames = &mut self.layers[layer].frames;
        if frames.len() <= frame {
            frames.resize(frame + 1, FrameState::default());
        }
        Some(&mut frames[frame])
    }
}

impl AnimationSink for AnimationTimeline {
    fn record(&mut self, layer: i32, frame: i32, property: AnimationProperty) {
        match property {
            // delays are a document-wide frame property, the layer counter
            // may not have advanced yet when one arrives
            AnimationProperty::Delay(delay) => {
                if frame < 0 {
                    return;
                }
                let frame = frame as usize;
                if self.delays.len() <= frame {
                    self.delays.resize(frame + 1, None);
                }
                self.delays[frame] = Some(delay);
            }
            AnimationProperty::Visible(visible) => {
                if let Some(state) = self.frame_slot(layer, frame) {
                    state.visible = Some(visible);
                }
            }
            AnimationProperty::OffsetX(dx) => {
                if let Some(state) = self.frame_slot(layer, frame) {
                    state.dx = Some(dx);
                }
            }
            AnimationProperty::OffsetY(dy) => {
                if let Some(state) = self.frame_slot(layer, frame) {
                    state.dy = Some(dy);
                }
            }
        }
    }
}
