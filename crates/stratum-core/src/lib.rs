/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the stratum decoder crates
//!
//! This crate provides the plumbing the format crates are built on
//!
//! - A bounds-checked, big-endian byte cursor over an in-memory buffer
//! - Decoder options shared by the decoders
//! - A logging facade that compiles to nothing unless the `log` feature
//!   is enabled
//!
//! The library is `#[no_std]` with `alloc`; the `std` feature only
//! toggles conveniences for callers that live in std land.
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub mod bytestream;
pub mod log;
pub mod options;
