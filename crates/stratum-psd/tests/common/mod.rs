//! Shared builder for synthetic layered documents.
//!
//! Tests assemble documents byte by byte instead of shipping binary
//! fixtures; every helper mirrors one piece of the file layout the
//! decoder consumes.
#![allow(dead_code)]

pub fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub fn put_i16(out: &mut Vec<u8>, value: i16) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub fn put_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// A Pascal string (length prefix + bytes) padded with zeros to `align`.
pub fn pascal_string(name: &str, align: usize) -> Vec<u8> {
    let mut out = vec![name.len() as u8];
    out.extend_from_slice(name.as_bytes());
    while out.len() % align != 0 {
        out.push(0);
    }
    out
}

// ---- descriptor building ----

/// Empty UTF-16 class name, literal class id, item count.
pub fn put_descriptor_head(out: &mut Vec<u8>, items: u32) {
    put_u32(out, 0); // class name, zero UTF-16 units
    put_u32(out, 0); // class id length: zero, a literal tag follows
    out.extend_from_slice(b"null");
    put_u32(out, items);
}

/// A keyed item header: zero-sentinel key followed by the type tag.
pub fn put_key(out: &mut Vec<u8>, key: &[u8; 4], tag: &[u8; 4]) {
    put_u32(out, 0);
    out.extend_from_slice(key);
    out.extend_from_slice(tag);
}

pub fn put_integer_item(out: &mut Vec<u8>, key: &[u8; 4], value: i32) {
    put_key(out, key, b"long");
    put_i32(out, value);
}

pub fn put_boolean_item(out: &mut Vec<u8>, key: &[u8; 4], value: bool) {
    put_key(out, key, b"bool");
    out.push(u8::from(value));
}

/// A `key: VlLs [ Objc, Objc, ... ]` item from prebuilt descriptor bodies.
pub fn put_object_list(out: &mut Vec<u8>, key: &[u8; 4], objects: &[Vec<u8>]) {
    put_key(out, key, b"VlLs");
    put_u32(out, objects.len() as u32);
    for object in objects {
        out.extend_from_slice(b"Objc");
        out.extend_from_slice(object);
    }
}

// ---- animation payloads ----

/// Payload of an image resource 4000/4004: the tagged wrapper around a
/// versioned descriptor.
pub fn animation_resource_payload(descriptor: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"8BIM");
    data.extend_from_slice(b"AnDs");
    put_u32(&mut data, (descriptor.len() + 4) as u32);
    put_u32(&mut data, 16); // descriptor version
    data.extend_from_slice(descriptor);

    let mut payload = Vec::new();
    payload.extend_from_slice(b"mani");
    payload.extend_from_slice(b"IRFR");
    put_u32(&mut payload, data.len() as u32);
    payload.extend(data);
    payload
}

/// A layer additional-info block: `shmd` metadata holding one `mlst`
/// item that wraps a versioned descriptor.
pub fn sheet_metadata_extra(descriptor: &[u8]) -> Vec<u8> {
    let mut mlst = Vec::new();
    put_u32(&mut mlst, (descriptor.len() + 4) as u32);
    put_u32(&mut mlst, 16); // descriptor version
    mlst.extend_from_slice(descriptor);

    let mut items = Vec::new();
    items.extend_from_slice(b"8BIM");
    items.extend_from_slice(b"mlst");
    put_u32(&mut items, 0); // copy-on-duplicate word
    items.extend(mlst);

    let mut out = Vec::new();
    out.extend_from_slice(b"8BIM");
    out.extend_from_slice(b"shmd");
    put_u32(&mut out, (items.len() + 4) as u32);
    put_u32(&mut out, 1); // item count
    out.extend(items);
    out
}

/// An additional-info block the decoder knows nothing about.
pub fn opaque_extra(key: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"8BIM");
    out.extend_from_slice(key);
    put_u32(&mut out, payload.len() as u32);
    out.extend_from_slice(payload);
    out
}

// ---- documents ----

pub struct LayerSpec {
    name:          &'static str,
    top:           i32,
    left:          i32,
    bottom:        i32,
    right:         i32,
    channel_count: u16,
    flags:         u8,
    extra:         Vec<u8>,
    pixel_data:    Vec<u8>
}

impl LayerSpec {
    pub fn new(name: &'static str) -> LayerSpec {
        LayerSpec {
            name,
            top: 0,
            left: 0,
            bottom: 0,
            right: 0,
            channel_count: 4,
            flags: 0,
            extra: Vec::new(),
            pixel_data: Vec::new()
        }
    }

    pub fn bounds(mut self, top: i32, left: i32, bottom: i32, right: i32) -> LayerSpec {
        self.top = top;
        self.left = left;
        self.bottom = bottom;
        self.right = right;
        self
    }

    pub fn channels(mut self, count: u16) -> LayerSpec {
        self.channel_count = count;
        self
    }

    pub fn flags(mut self, flags: u8) -> LayerSpec {
        self.flags = flags;
        self
    }

    pub fn extra(mut self, block: Vec<u8>) -> LayerSpec {
        self.extra.extend(block);
        self
    }

    /// Raw-compressed channel data, one slice per stored channel.
    pub fn raw_pixels(mut self, channels: &[&[u8]]) -> LayerSpec {
        for channel in channels {
            put_u16(&mut self.pixel_data, 0);
            self.pixel_data.extend_from_slice(channel);
        }
        self
    }

    /// RLE-compressed channel data: per channel, scanline byte counts and
    /// the encoded stream.
    pub fn rle_pixels(mut self, channels: &[(&[u16], &[u8])]) -> LayerSpec {
        for (counts, encoded) in channels {
            put_u16(&mut self.pixel_data, 1);
            for count in *counts {
                put_u16(&mut self.pixel_data, *count);
            }
            self.pixel_data.extend_from_slice(encoded);
        }
        self
    }

    /// Preassembled channel data, compression codes included.
    pub fn pixel_bytes(mut self, data: Vec<u8>) -> LayerSpec {
        self.pixel_data = data;
        self
    }

    fn record(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_i32(&mut out, self.top);
        put_i32(&mut out, self.left);
        put_i32(&mut out, self.bottom);
        put_i32(&mut out, self.right);

        put_u16(&mut out, self.channel_count);
        out.extend(std::iter::repeat(0).take(6 * usize::from(self.channel_count)));

        out.extend_from_slice(b"8BIM");
        out.extend_from_slice(b"norm");
        out.push(255); // opacity
        out.push(0); // clipping
        out.push(self.flags);
        out.push(0); // filler

        let mut inner = Vec::new();
        put_u32(&mut inner, 0); // layer mask data
        put_u32(&mut inner, 0); // blending ranges
        inner.extend(pascal_string(self.name, 4));
        inner.extend_from_slice(&self.extra);

        put_u32(&mut out, inner.len() as u32);
        out.extend(inner);
        out
    }
}

pub struct DocumentBuilder {
    width:                u32,
    height:               u32,
    depth:                u16,
    mode:                 u16,
    resources:            Vec<u8>,
    layers:               Vec<LayerSpec>,
    layer_count_override: Option<i16>
}

impl DocumentBuilder {
    pub fn new(width: u32, height: u32) -> DocumentBuilder {
        DocumentBuilder {
            width,
            height,
            depth: 8,
            mode: 3,
            resources: Vec::new(),
            layers: Vec::new(),
            layer_count_override: None
        }
    }

    pub fn depth(mut self, depth: u16) -> DocumentBuilder {
        self.depth = depth;
        self
    }

    pub fn mode(mut self, mode: u16) -> DocumentBuilder {
        self.mode = mode;
        self
    }

    /// Append an image resource block, even-padded like the format wants.
    pub fn resource(mut self, id: u16, payload: &[u8]) -> DocumentBuilder {
        self.resources.extend_from_slice(b"8BIM");
        put_u16(&mut self.resources, id);
        self.resources.extend(pascal_string("", 2));
        put_u32(&mut self.resources, payload.len() as u32);
        self.resources.extend_from_slice(payload);
        if self.resources.len() % 2 != 0 {
            self.resources.push(0);
        }
        self
    }

    pub fn layer(mut self, layer: LayerSpec) -> DocumentBuilder {
        self.layers.push(layer);
        self
    }

    /// Override the declared layer count (the file stores it signed).
    pub fn layer_count(mut self, count: i16) -> DocumentBuilder {
        self.layer_count_override = Some(count);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::new();

        // header
        out.extend_from_slice(b"8BPS");
        put_u16(&mut out, 1); // version
        out.extend_from_slice(&[0; 6]);
        put_u16(&mut out, 3); // composite channel count
        put_u32(&mut out, self.height); // rows
        put_u32(&mut out, self.width); // columns
        put_u16(&mut out, self.depth);
        put_u16(&mut out, self.mode);

        // color mode data
        put_u32(&mut out, 0);

        // image resources
        put_u32(&mut out, self.resources.len() as u32);
        out.extend_from_slice(&self.resources);

        // layer info: count, records, padding, pixel data
        let mut info = Vec::new();
        let count = self
            .layer_count_override
            .unwrap_or(self.layers.len() as i16);
        put_i16(&mut info, count);
        for layer in &self.layers {
            info.extend(layer.record());
        }
        if info.len() % 2 != 0 {
            info.push(0);
        }
        for layer in &self.layers {
            info.extend_from_slice(&layer.pixel_data);
        }

        // layer and mask section: layer info + empty global mask info
        let mut section = Vec::new();
        put_u32(&mut section, info.len() as u32);
        section.extend(info);
        put_u32(&mut section, 0);

        put_u32(&mut out, section.len() as u32);
        out.extend(section);

        out
    }
}
