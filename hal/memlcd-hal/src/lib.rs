//! Memory LCD Hardware Abstraction Layer
//!
//! This crate defines the hardware capability traits that board support code
//! implements for a memory-in-pixel LCD. The panel driver in `memlcd-drivers`
//! is written purely against these traits, so the same driver runs on any
//! board that can toggle a chip-select line and shift bytes out.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (firmware UI code)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  memlcd-drivers (panel protocol)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  memlcd-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Board HAL (SPI peripheral, GPIO)       │
//! └─────────────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod bus;

// Re-export key traits at crate root for convenience
pub use bus::{BitOrder, BusConfig, DisplayBus};
