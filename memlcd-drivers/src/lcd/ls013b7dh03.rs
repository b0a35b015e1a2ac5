//! LS013B7DH03 memory LCD driver
//!
//! Sharp's memory-in-pixel panels keep the frame in per-pixel memory, so the
//! host only writes the lines that changed and never reads anything back.
//! The DISP pin gates whether that memory is shown; a separate board timer
//! toggles the AC bias pin (EXTCOMIN) and is of no concern to this driver.
//!
//! # Wire format
//!
//! Lines are addressed 1..=128, 16 data bytes each. An update holds the
//! select line for the whole sequence:
//!
//! - Clear all: `[0x04, 0x00]`
//! - Line update, per line: `[0x01, line]` then the line's 16 bytes;
//!   after the last line one trailer `[0x00, 0x00]` of dummy clock bits
//!
//! Bytes are shifted out LSB first (`BusConfig` in `memlcd-hal`), which
//! matches the bit 0 = lowest column packing of [`LineBuffer`].

use embedded_hal::digital::OutputPin;

use memlcd_core::font::MonoFont;
use memlcd_core::text::compose_text;
use memlcd_core::{DisplayError, LineBuffer, MemoryDisplay, LINE_BYTES, PANEL_HEIGHT};
use memlcd_hal::bus::DisplayBus;

/// Panel commands
mod cmd {
    /// Write one or more lines of pixel data
    pub const WRITE_LINES: u8 = 0x01;
    /// Clear the panel's internal memory
    pub const CLEAR_ALL: u8 = 0x04;
}

/// Dummy clock bits closing an update sequence, sent once per update
const TRAILER: [u8; 2] = [0x00, 0x00];

/// LS013B7DH03 driver
///
/// Owns the display bus and the DISP enable pin. All state is transient per
/// call; the panel's own memory is the only frame store. The driver holds
/// no lock: concurrent callers must serialize around the whole operation,
/// which `&mut self` already enforces for safe Rust callers.
pub struct Ls013b7dh03<B, D> {
    bus: B,
    disp: D,
    font: &'static MonoFont,
}

impl<B, D> Ls013b7dh03<B, D>
where
    B: DisplayBus,
    D: OutputPin,
{
    /// Create a driver over an already configured bus.
    pub fn new(bus: B, disp: D, font: &'static MonoFont) -> Self {
        Self { bus, disp, font }
    }

    /// Release the bus and the DISP pin.
    pub fn free(self) -> (B, D) {
        (self.bus, self.disp)
    }

    /// The font used by [`MemoryDisplay::print_text_line`].
    pub fn font(&self) -> &'static MonoFont {
        self.font
    }

    /// Number of text lines the panel fits with the current font.
    pub fn text_lines(&self) -> u8 {
        (PANEL_HEIGHT / self.font.height as usize) as u8
    }

    /// Drive the DISP pin: when high the panel shows its memory, when low
    /// it blanks without losing the stored frame.
    pub fn set_display_enabled(&mut self, enabled: bool) -> Result<(), DisplayError> {
        let result = if enabled {
            self.disp.set_high()
        } else {
            self.disp.set_low()
        };
        result.map_err(|_| DisplayError::Transfer)
    }

    /// Write whole panel lines starting at the 1-based `start_line`.
    ///
    /// `pixels` holds the lines back to back in [`LineBuffer`] byte order.
    /// The request is validated before the bus is touched: a rejected call
    /// performs no transfers at all. Once transmission starts, a failed
    /// transfer does not abort the rest of the frame; every remaining
    /// transfer is still attempted so the panel sees a complete sequence,
    /// and the first failure is reported as [`DisplayError::Transfer`].
    /// On failure the caller cannot know which lines took; retry the whole
    /// update.
    pub fn update_lines(&mut self, start_line: u8, pixels: &[u8]) -> Result<(), DisplayError> {
        if start_line < 1 {
            return Err(DisplayError::LineRange);
        }
        if pixels.len() % LINE_BYTES != 0 {
            return Err(DisplayError::Misaligned);
        }
        let lines = pixels.len() / LINE_BYTES;
        if start_line as usize + lines > PANEL_HEIGHT + 1 {
            return Err(DisplayError::LineRange);
        }

        self.bus.select(true);
        let mut ok = true;
        for (i, line) in pixels.chunks_exact(LINE_BYTES).enumerate() {
            let header = [cmd::WRITE_LINES, start_line + i as u8];
            ok &= self.bus.transmit(&header).is_ok();
            ok &= self.bus.transmit(line).is_ok();
        }
        ok &= self.bus.transmit(&TRAILER).is_ok();
        self.bus.select(false);

        if ok {
            Ok(())
        } else {
            Err(DisplayError::Transfer)
        }
    }
}

impl<B, D> MemoryDisplay for Ls013b7dh03<B, D>
where
    B: DisplayBus,
    D: OutputPin,
{
    fn init(&mut self) -> Result<(), DisplayError> {
        // Attempt every step even after a failure, then report the aggregate
        let mut result = self.clear_screen();
        if self.set_display_enabled(true).is_err() {
            result = Err(DisplayError::Transfer);
        }
        result
    }

    fn clear_screen(&mut self) -> Result<(), DisplayError> {
        self.bus.select(true);
        let ok = self.bus.transmit(&[cmd::CLEAR_ALL, 0x00]).is_ok();
        self.bus.select(false);

        if ok {
            Ok(())
        } else {
            Err(DisplayError::Transfer)
        }
    }

    fn print_text_line(&mut self, line: u8, text: &str, max_chars: u8) -> Result<(), DisplayError> {
        let glyph_lines = self.font.height as usize;
        if line as usize >= PANEL_HEIGHT / glyph_lines {
            return Err(DisplayError::TextRow);
        }

        // One glyph-height band at full panel width, fresh and zeroed per
        // call regardless of how much text there is
        let mut band = LineBuffer::new(glyph_lines);
        compose_text(self.font, &mut band, text, max_chars as usize);

        self.update_lines(line * self.font.height + 1, band.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use heapless::Vec;
    use memlcd_core::font::FONT_8X8;

    #[derive(Debug, PartialEq)]
    enum Event {
        Select(bool),
        Transmit(Vec<u8, LINE_BYTES>),
    }

    /// Bus double that records every call and can fail one scripted transmit.
    struct ScriptedBus {
        events: Vec<Event, 64>,
        fail_on: Option<usize>,
        transmits: usize,
    }

    impl ScriptedBus {
        fn new() -> Self {
            Self {
                events: Vec::new(),
                fail_on: None,
                transmits: 0,
            }
        }

        fn failing_on(transmit_index: usize) -> Self {
            let mut bus = Self::new();
            bus.fail_on = Some(transmit_index);
            bus
        }

        fn transmit_count(&self) -> usize {
            self.events
                .iter()
                .filter(|e| matches!(e, Event::Transmit(_)))
                .count()
        }

        fn transmitted(&self, n: usize) -> &[u8] {
            match self
                .events
                .iter()
                .filter_map(|e| match e {
                    Event::Transmit(bytes) => Some(bytes),
                    Event::Select(_) => None,
                })
                .nth(n)
            {
                Some(bytes) => bytes,
                None => panic!("fewer than {} transmits", n + 1),
            }
        }
    }

    impl DisplayBus for ScriptedBus {
        type Error = ();

        fn select(&mut self, selected: bool) {
            self.events.push(Event::Select(selected)).unwrap();
        }

        fn transmit(&mut self, bytes: &[u8]) -> Result<(), ()> {
            let mut copy = Vec::new();
            copy.extend_from_slice(bytes).unwrap();
            self.events.push(Event::Transmit(copy)).unwrap();
            let index = self.transmits;
            self.transmits += 1;
            if self.fail_on == Some(index) {
                Err(())
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct DispPin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for DispPin {
        type Error = Infallible;
    }

    impl OutputPin for DispPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    fn driver() -> Ls013b7dh03<ScriptedBus, DispPin> {
        Ls013b7dh03::new(ScriptedBus::new(), DispPin::default(), &FONT_8X8)
    }

    #[test]
    fn test_misaligned_update_rejected_without_bus_activity() {
        let mut lcd = driver();
        let pixels = [0u8; LINE_BYTES + 1];
        assert_eq!(
            lcd.update_lines(1, &pixels),
            Err(DisplayError::Misaligned)
        );
        let (bus, _) = lcd.free();
        assert!(bus.events.is_empty());
    }

    #[test]
    fn test_line_range_rejected_without_bus_activity() {
        let mut lcd = driver();
        let two_lines = [0u8; 2 * LINE_BYTES];
        assert_eq!(lcd.update_lines(0, &two_lines), Err(DisplayError::LineRange));
        assert_eq!(
            lcd.update_lines(128, &two_lines),
            Err(DisplayError::LineRange)
        );
        // The last line is still addressable on its own
        assert_eq!(lcd.update_lines(128, &two_lines[..LINE_BYTES]), Ok(()));
        let (bus, _) = lcd.free();
        assert_eq!(bus.events[0], Event::Select(true));
    }

    #[test]
    fn test_single_line_sequence() {
        let mut lcd = driver();
        let pixels = [0xAAu8; LINE_BYTES];
        assert_eq!(lcd.update_lines(42, &pixels), Ok(()));

        let (bus, _) = lcd.free();
        assert_eq!(bus.events.len(), 5);
        assert_eq!(bus.events[0], Event::Select(true));
        assert_eq!(bus.transmitted(0), &[0x01, 42]);
        assert_eq!(bus.transmitted(1), &pixels[..]);
        assert_eq!(bus.transmitted(2), &[0x00, 0x00]);
        assert_eq!(bus.events[4], Event::Select(false));
    }

    #[test]
    fn test_multi_line_headers_and_single_trailer() {
        let mut lcd = driver();
        let mut pixels = [0x55u8; 3 * LINE_BYTES];
        pixels[0] = 0x01;
        assert_eq!(lcd.update_lines(5, &pixels), Ok(()));

        let (bus, _) = lcd.free();
        // 3 header+data pairs plus exactly one trailer
        assert_eq!(bus.transmit_count(), 7);
        assert_eq!(bus.transmitted(0), &[0x01, 5]);
        assert_eq!(bus.transmitted(2), &[0x01, 6]);
        assert_eq!(bus.transmitted(4), &[0x01, 7]);
        assert_eq!(bus.transmitted(6), &[0x00, 0x00]);
    }

    #[test]
    fn test_zero_length_update_sends_only_trailer() {
        let mut lcd = driver();
        assert_eq!(lcd.update_lines(1, &[]), Ok(()));
        let (bus, _) = lcd.free();
        assert_eq!(bus.transmit_count(), 1);
        assert_eq!(bus.transmitted(0), &[0x00, 0x00]);
    }

    #[test]
    fn test_clear_screen_sequences_are_identical() {
        let mut lcd = driver();
        assert_eq!(lcd.clear_screen(), Ok(()));
        assert_eq!(lcd.clear_screen(), Ok(()));

        let (bus, _) = lcd.free();
        assert_eq!(bus.events.len(), 6);
        assert_eq!(bus.events[..3], bus.events[3..]);
        assert_eq!(bus.events[0], Event::Select(true));
        assert_eq!(bus.transmitted(0), &[0x04, 0x00]);
        assert_eq!(bus.transmitted(1), &[0x04, 0x00]);
        assert_eq!(bus.events[2], Event::Select(false));
    }

    #[test]
    fn test_mid_frame_failure_finishes_the_frame() {
        // Header succeeds, line data fails, trailer is still attempted
        let mut lcd = Ls013b7dh03::new(ScriptedBus::failing_on(1), DispPin::default(), &FONT_8X8);
        let pixels = [0xFFu8; LINE_BYTES];
        assert_eq!(lcd.update_lines(1, &pixels), Err(DisplayError::Transfer));

        let (bus, _) = lcd.free();
        assert_eq!(bus.transmit_count(), 3);
        assert_eq!(bus.events.first(), Some(&Event::Select(true)));
        assert_eq!(bus.events.last(), Some(&Event::Select(false)));
    }

    #[test]
    fn test_print_text_line_bounds() {
        let mut lcd = driver();
        assert_eq!(lcd.text_lines(), 16);
        assert_eq!(
            lcd.print_text_line(16, "out", 8),
            Err(DisplayError::TextRow)
        );
        let (bus, _) = lcd.free();
        assert!(bus.events.is_empty());

        let mut lcd = driver();
        assert_eq!(lcd.print_text_line(15, "last", 8), Ok(()));
        let (bus, _) = lcd.free();
        // Band of text line 15 starts at panel line 121
        assert_eq!(bus.transmitted(0), &[0x01, 121]);
    }

    #[test]
    fn test_print_text_line_transmits_full_band() {
        let mut lcd = driver();
        assert_eq!(lcd.print_text_line(0, "A", 16), Ok(()));

        let (bus, _) = lcd.free();
        // 8 panel lines, each header + data, one trailer
        assert_eq!(bus.transmit_count(), 2 * 8 + 1);
        for line in 0..8u8 {
            let header = bus.transmitted(2 * line as usize);
            assert_eq!(header, &[0x01, line + 1]);
            let data = bus.transmitted(2 * line as usize + 1);
            assert_eq!(data.len(), LINE_BYTES);
            // 'A' sits in the first byte column, rest of the band is blank
            assert_eq!(data[0], FONT_8X8.table[8 * (b'A' - b' ') as usize + line as usize]);
            assert!(data[1..].iter().all(|&b| b == 0));
        }
        assert_eq!(bus.transmitted(16), &[0x00, 0x00]);
    }

    #[test]
    fn test_print_text_line_empty_text_blanks_the_band() {
        let mut lcd = driver();
        assert_eq!(lcd.print_text_line(3, "", 16), Ok(()));
        let (bus, _) = lcd.free();
        assert_eq!(bus.transmitted(0), &[0x01, 25]);
        for line in 0..8 {
            assert!(bus.transmitted(2 * line + 1).iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_init_clears_then_enables() {
        let mut lcd = driver();
        assert_eq!(lcd.init(), Ok(()));
        let (bus, disp) = lcd.free();
        assert!(disp.high);
        assert_eq!(bus.transmitted(0), &[0x04, 0x00]);
    }

    #[test]
    fn test_init_attempts_every_step_and_reports_failure() {
        let mut lcd = Ls013b7dh03::new(ScriptedBus::failing_on(0), DispPin::default(), &FONT_8X8);
        assert_eq!(lcd.init(), Err(DisplayError::Transfer));
        let (_, disp) = lcd.free();
        // The display was still switched on after the failed clear
        assert!(disp.high);
    }

    #[test]
    fn test_set_display_enabled_drives_pin() {
        let mut lcd = driver();
        assert_eq!(lcd.set_display_enabled(true), Ok(()));
        assert_eq!(lcd.set_display_enabled(false), Ok(()));
        let (_, disp) = lcd.free();
        assert!(!disp.high);
    }
}
