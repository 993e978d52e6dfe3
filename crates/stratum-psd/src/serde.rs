/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "serde")]

use serde::ser::*;

use crate::animation::{AnimationTimeline, FrameState, LayerAnimation};

impl Serialize for FrameState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("FrameState", 3)?;
        state.serialize_field("visible", &self.visible)?;
        state.serialize_field("dx", &self.dx)?;
        state.serialize_field("dy", &self.dy)?;
        state.end()
    }
}

impl Serialize for LayerAnimation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("LayerAnimation", 1)?;
        state.serialize_field("frames", &self.frames)?;
        state.end()
    }
}

impl Serialize for AnimationTimeline {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("AnimationTimeline", 2)?;
        state.serialize_field("delays", &self.delays)?;
        state.serialize_field("layers", &self.layers)?;
        state.end()
    }
}
