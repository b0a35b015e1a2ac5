//! Display bus abstraction
//!
//! A memory LCD is written through a one-way serial link plus a dedicated
//! chip-select line. The select state is held across a whole multi-transfer
//! update sequence, so selection and transfer are separate operations rather
//! than a single transactional write.

/// Serial link to the display.
///
/// Implementations are blocking: `transmit` returns once the bytes have been
/// shifted out, or with an error after a fixed timeout budget. There is no
/// retry at this level; a failed transfer is reported to the caller as-is.
///
/// The chip-select state is plain shared hardware state. Callers must not
/// interleave transfers from two logical owners between `select(true)` and
/// `select(false)`.
pub trait DisplayBus {
    /// Error type for bus transfers
    type Error;

    /// Assert or deassert exclusive access to the display.
    ///
    /// The select line on this panel family is active high.
    fn select(&mut self, selected: bool);

    /// Shift a byte sequence out to the display.
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// Serial bus parameters the board HAL must apply before any transfer.
///
/// These are fixed for a given panel wiring and never renegotiated at
/// runtime. In particular the panel latches data LSB first, so the packed
/// pixel convention (bit 0 = lowest column of a byte) goes onto the wire
/// unchanged.
#[derive(Debug, Clone, Copy)]
pub struct BusConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Bit order on the wire
    pub bit_order: BitOrder,
    /// Timeout budget for a single blocking transfer, in milliseconds
    pub transfer_timeout_ms: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            frequency: 1_000_000, // 1 MHz
            bit_order: BitOrder::LsbFirst,
            transfer_timeout_ms: 1000,
        }
    }
}

/// Bit order of a byte on the serial wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    /// Least significant bit shifted out first
    LsbFirst,
    /// Most significant bit shifted out first
    MsbFirst,
}
