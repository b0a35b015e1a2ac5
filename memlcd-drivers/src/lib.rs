//! Panel drivers for memory-in-pixel LCDs
//!
//! Concrete implementations of the display operations defined in
//! `memlcd-core`, written against the capability traits in `memlcd-hal`:
//!
//! - [`Ls013b7dh03`] - Sharp 128x128 memory LCD with a row-addressed
//!   serial write protocol
//! - [`SpiInterface`] - display bus adapter over a blocking `embedded-hal`
//!   SPI bus and a chip-select pin

#![no_std]
#![deny(unsafe_code)]

pub mod lcd;
pub mod spi;

pub use lcd::Ls013b7dh03;
pub use spi::SpiInterface;
