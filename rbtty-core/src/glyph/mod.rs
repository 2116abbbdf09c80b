//! The glyph atlas loader: walks the fixed [`crate::charset::CHARSET`]
//! through a [`FontResource`], builds one [`GlyphDesc`] per character, and
//! hands the whole atlas to a [`LinePrinter`] in a single call
//! (`spec.md` §4.4).

use crate::backend::{Bitmap, FontResource, GlyphDesc, LinePrinter};
use crate::charset::CHARSET;
use crate::error::{font_to_tty_error, line_printer_to_tty_error, TtyError};

/// Loads `path` through `font`, rasterizes the fixed charset, and uploads
/// the resulting atlas to `printer`.
///
/// Every per-glyph bitmap is owned by a local `Vec<GlyphDesc>` for the
/// duration of the call and dropped when the function returns (on every
/// path, success or error) — the "release all acquired buffers" guarantee
/// `spec.md` §4.4 step 5 and §5's scoped-acquisition contract ask for
/// falls out of ordinary Rust ownership rather than an explicit cleanup
/// step.
///
/// If `allow_partial` is `false` (`spec.md` §4.4/§7's default), any single
/// charset entry failing to resolve fails the whole call and `set_font` is
/// never invoked. If `true`, a failed entry is recorded as an empty-bitmap
/// placeholder at its charset slot instead, and the upload proceeds.
///
/// # Errors
/// Returns whatever [`TtyError`] the font resource or line printer report,
/// mapped through [`font_to_tty_error`] / [`line_printer_to_tty_error`].
pub fn load(
    font: &mut dyn FontResource,
    printer: &mut dyn LinePrinter,
    path: &str,
    allow_partial: bool,
) -> Result<(), TtyError> {
    font.load(path).map_err(font_to_tty_error)?;

    let mut descriptors = Vec::with_capacity(CHARSET.len());
    for &c in CHARSET {
        match load_one(font, c) {
            Ok(desc) => descriptors.push(desc),
            Err(err) if allow_partial => {
                tracing::warn!(character = ?c, error = %err, "glyph failed, uploading empty placeholder");
                descriptors.push(GlyphDesc {
                    character: c,
                    advance_width: 0,
                    bbox_left: 0,
                    bbox_top: 0,
                    bitmap: Bitmap::empty(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    let line_space = font.line_space().map_err(font_to_tty_error)?;
    printer
        .set_font(line_space, &descriptors)
        .map_err(line_printer_to_tty_error)
}

fn load_one(font: &mut dyn FontResource, c: char) -> Result<GlyphDesc, TtyError> {
    let glyph = font.get_glyph(c).map_err(font_to_tty_error)?;
    let metrics = font.glyph_desc(glyph).map_err(font_to_tty_error)?;
    let bitmap = load_bitmap(font, glyph)?;
    Ok(GlyphDesc {
        character: metrics.character,
        advance_width: metrics.advance_width,
        bbox_left: metrics.bbox_left,
        bbox_top: metrics.bbox_top,
        bitmap,
    })
}

fn load_bitmap(font: &mut dyn FontResource, glyph: crate::backend::GlyphHandle) -> Result<Bitmap, TtyError> {
    let probe = font.glyph_bitmap(glyph, false).map_err(font_to_tty_error)?;
    if probe.width > 0 && probe.height > 0 {
        font.glyph_bitmap(glyph, true).map_err(font_to_tty_error)
    } else {
        Ok(Bitmap::empty())
    }
}

/// Forwards a viewport rectangle to `printer`.
///
/// # Errors
/// `TtyError::InvalidArgument` if `width` or `height` is negative.
pub fn set_viewport(
    printer: &mut dyn LinePrinter,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> Result<(), TtyError> {
    if width < 0 || height < 0 {
        return Err(TtyError::invalid_argument(format!(
            "viewport dimensions must be non-negative, got {width}x{height}"
        )));
    }
    printer
        .set_viewport(x, y, width, height)
        .map_err(line_printer_to_tty_error)
}
