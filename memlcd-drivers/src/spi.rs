//! SPI transport for the display bus
//!
//! Adapts a blocking `embedded-hal` SPI bus plus a chip-select pin to the
//! [`DisplayBus`] capability. The panel's select line is active high and
//! must be held across a whole update sequence, so it is driven as a plain
//! GPIO rather than managed by the SPI peripheral.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use memlcd_hal::bus::DisplayBus;

/// [`DisplayBus`] over an SPI peripheral and a select pin.
///
/// The peripheral must already be configured with the parameters in
/// [`BusConfig`](memlcd_hal::bus::BusConfig): mode 0, LSB first, and a
/// bounded transfer time.
pub struct SpiInterface<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> SpiInterface<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Wrap a configured SPI bus and select pin.
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Release the SPI bus and select pin.
    pub fn free(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> DisplayBus for SpiInterface<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Error = SPI::Error;

    fn select(&mut self, selected: bool) {
        // Active high select line
        let result = if selected {
            self.cs.set_high()
        } else {
            self.cs.set_low()
        };
        result.ok();
    }

    fn transmit(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes)?;
        self.spi.flush()
    }
}
