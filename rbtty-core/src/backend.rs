//! The three external collaborators this crate consumes only through a
//! fixed contract, never implements: the render backend, the font
//! resource, and the line printer (`spec.md` §1, §6).

use crate::color::Color;

/// Errors the font resource contract can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FontError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Memory(String),
    #[error("{0}")]
    Unknown(String),
}

/// Errors the line printer contract can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinePrinterError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Memory(String),
    #[error("{0}")]
    Unknown(String),
}

/// Placeholder signature for a render-backend operation handle. The raster
/// backend itself (triangle submission, textures, framebuffers) is out of
/// scope (`spec.md` §1); this crate never calls through these handles —
/// it only checks whether a caller supplied every one of them before it
/// hands the backend record down to the line printer it constructs.
pub type BackendOp = fn();

/// A record of the render backend operation handles `rbtty-core` requires
/// before it will construct a [`crate::tty::Tty`]. Modeled as an explicit
/// table of `Option<BackendOp>` fields, matching `spec.md` §6's "a record
/// of function handles" framing, rather than a trait — a trait's required
/// methods can't be individually absent, but that's exactly the failure
/// mode `Tty::create` must detect and reject with `InvalidArgument`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderBackend {
    pub create_buffer: Option<BackendOp>,
    pub create_program: Option<BackendOp>,
    pub create_texture: Option<BackendOp>,
    pub draw: Option<BackendOp>,
    pub set_viewport: Option<BackendOp>,
    pub set_scissor: Option<BackendOp>,
}

impl RenderBackend {
    /// `true` if every required operation handle is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.create_buffer.is_some()
            && self.create_program.is_some()
            && self.create_texture.is_some()
            && self.draw.is_some()
            && self.set_viewport.is_some()
            && self.set_scissor.is_some()
    }
}

/// Bounding-box-derived glyph metrics plus rasterized bitmap, normalized
/// into the shape the line printer contract expects (`spec.md` §4.4).
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphDesc {
    pub character: char,
    pub advance_width: i32,
    pub bbox_left: i32,
    pub bbox_top: i32,
    pub bitmap: Bitmap,
}

/// An 8-bit-per-channel glyph bitmap. Empty (`width == 0 || height == 0`)
/// when the font resource reports no visible pixels for a glyph (e.g. the
/// space character).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bitmap {
    pub width: i32,
    pub height: i32,
    pub bytes_per_pixel: i32,
    pub buffer: Vec<u8>,
}

impl Bitmap {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A glyph handle returned by [`FontResource::get_glyph`], opaque to this
/// crate beyond what [`FontResource::glyph_desc`] and
/// [`FontResource::glyph_bitmap`] report about it.
pub type GlyphHandle = u32;

/// The font rasterizer contract: given a loaded font and a character,
/// yields metrics and an 8-bit bitmap. The rasterizer itself is out of
/// scope (`spec.md` §1) — this crate only calls through this trait.
pub trait FontResource {
    /// Loads font data from `path`. Must be called before any other method.
    ///
    /// # Errors
    /// `FontError::InvalidArgument` if `path` cannot be parsed as font
    /// data; `FontError::Memory` on allocation failure.
    fn load(&mut self, path: &str) -> Result<(), FontError>;

    /// Looks up the glyph for `c`.
    ///
    /// # Errors
    /// `FontError::Unknown` if the rasterizer cannot produce a glyph for `c`.
    fn get_glyph(&mut self, c: char) -> Result<GlyphHandle, FontError>;

    /// Reports a glyph's non-bitmap metrics.
    ///
    /// # Errors
    /// `FontError::InvalidArgument` if `glyph` is not a handle this
    /// resource issued.
    fn glyph_desc(&self, glyph: GlyphHandle) -> Result<GlyphDescMetrics, FontError>;

    /// Reports (and optionally renders into) the glyph's bitmap.
    ///
    /// # Errors
    /// `FontError::Memory` if `render` is requested and rasterizing fails.
    fn glyph_bitmap(&self, glyph: GlyphHandle, render: bool) -> Result<Bitmap, FontError>;

    /// The font's line-space metric (vertical advance between baselines).
    ///
    /// # Errors
    /// `FontError::Unknown` if no font has been loaded yet.
    fn line_space(&self) -> Result<i32, FontError>;
}

/// The non-bitmap portion of a glyph descriptor, as reported by
/// [`FontResource::glyph_desc`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDescMetrics {
    pub advance_width: i32,
    pub character: char,
    pub bbox_left: i32,
    pub bbox_top: i32,
}

/// The line printer contract: accepts a font's glyph atlas, a viewport,
/// and draws colored strings. The printer itself is out of scope
/// (`spec.md` §1) — this crate only calls through this trait.
pub trait LinePrinter {
    /// Uploads the full glyph atlas in one call.
    ///
    /// # Errors
    /// `LinePrinterError::InvalidArgument` if `descriptors` is empty;
    /// `LinePrinterError::Memory` if the upload cannot be allocated.
    fn set_font(&mut self, line_space: i32, descriptors: &[GlyphDesc]) -> Result<(), LinePrinterError>;

    /// Sets the on-screen target rectangle.
    ///
    /// # Errors
    /// `LinePrinterError::InvalidArgument` if `width` or `height` is negative.
    fn set_viewport(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<(), LinePrinterError>;

    /// Draws `text` at `position`, one [`Color`] per character.
    ///
    /// # Errors
    /// `LinePrinterError::InvalidArgument` if `colors.len() != text.chars().count()`.
    fn draw(&mut self, text: &str, position: (i32, i32), colors: &[Color]) -> Result<(), LinePrinterError>;
}
