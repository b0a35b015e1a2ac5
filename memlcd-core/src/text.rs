//! Text compositing into packed line buffers
//!
//! Pure pixel work, no hardware: glyphs are OR'ed into a [`LineBuffer`]
//! column by column. Transmission is the driver's job.

use crate::font::{is_printable, MonoFont};
use crate::framebuffer::LineBuffer;
use crate::PANEL_WIDTH;

/// Composite `text` into `buffer`, left to right from column 0.
///
/// Stops at the first of: `max_chars` characters drawn, a byte outside the
/// printable ASCII range (so a NUL or any control byte terminates the text),
/// or the panel's character capacity reached. Characters past the stop point
/// are never looked up in the font table. Returns the number of characters
/// drawn.
///
/// The screen column advances once per glyph column, so glyphs pack
/// contiguously; any spacing must be part of the glyphs themselves. Pixels
/// are only ever OR'ed in. Composing into a buffer that already holds pixels
/// accumulates; use [`LineBuffer::clear`] first to replace.
pub fn compose_text(
    font: &MonoFont,
    buffer: &mut LineBuffer,
    text: &str,
    max_chars: usize,
) -> usize {
    let capacity = PANEL_WIDTH / font.width as usize;
    let mut drawn = 0;
    let mut screen_col = 0;

    for &ch in text.as_bytes() {
        if drawn == max_chars || drawn == capacity || !is_printable(ch) {
            break;
        }
        for x in 0..font.width as usize {
            for y in 0..font.height as usize {
                if font.pixel(ch, x, y) {
                    buffer.set_pixel(y, screen_col);
                }
            }
            screen_col += 1;
        }
        drawn += 1;
    }

    drawn
}
