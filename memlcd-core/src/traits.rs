//! Display device trait and errors
//!
//! Panel drivers implement [`MemoryDisplay`] over whatever bus capability
//! the board provides. Application code holds the driver by `&mut` and calls
//! these operations directly; there is no internal locking, so one logical
//! owner drives the display at a time.

/// Errors that can occur when driving the display
///
/// Validation errors are raised before any bus activity, so a rejected call
/// has no side effects on the panel. A `Transfer` error means at least one
/// bus transfer in the sequence failed; the rest of the frame was still
/// attempted, and the caller decides whether to retry the whole operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Update start line is outside the panel, or the data runs past its end
    LineRange,
    /// Pixel data is not a whole number of panel lines
    Misaligned,
    /// Text line index is beyond the last text row
    TextRow,
    /// A bus transfer failed or timed out
    Transfer,
}

/// Operations of a memory-in-pixel LCD
pub trait MemoryDisplay {
    /// Prepare the panel: blank its internal memory, then switch the
    /// display output on.
    ///
    /// Every step is attempted even if an earlier one failed; the result is
    /// an error if any step failed.
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Clear the panel's internal memory.
    fn clear_screen(&mut self) -> Result<(), DisplayError>;

    /// Render one line of text.
    ///
    /// `line` selects a horizontal band one glyph height tall, counted from
    /// the top of the panel. At most `max_chars` characters are
    /// drawn; composition also stops at the first byte outside the printable
    /// ASCII range and at the panel's character capacity.
    fn print_text_line(&mut self, line: u8, text: &str, max_chars: u8) -> Result<(), DisplayError>;
}
