/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Logging facade for the stratum crates.
//!
//! With the `log` feature enabled this simply re-exports the macros from
//! the `log` crate; without it, call sites compile to nothing. Decoders
//! use `stratum_core::log::trace!` etc. unconditionally and stay `no_std`.

#[cfg(feature = "log")]
pub use log::{debug, error, info, trace, warn};

// #[macro_export] is required to make macros work across crates
// but it always puts the macro in the crate root.
// #[doc(hidden)] + "pub use" is a workaround to namespace a macro.
#[cfg(not(feature = "log"))]
pub use crate::{__debug as debug, __error as error, __info as info, __trace as trace, __warn as warn};

#[doc(hidden)]
#[macro_export]
macro_rules! __error {
    ($($arg:tt)+) => {};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __warn {
    ($($arg:tt)+) => {};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __info {
    ($($arg:tt)+) => {};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __debug {
    ($($arg:tt)+) => {};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __trace {
    ($($arg:tt)+) => {};
}
