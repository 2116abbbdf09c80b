//! The ownership root: one shared, reference-counted handle over a
//! [`Screen`], a line printer, and a font resource (`spec.md` §4.5, §6).
//!
//! `spec.md` §9 floats an atomic refcount "for safety," but §5 is explicit
//! that a `Tty` instance is driven by a single cooperative caller with no
//! internal locking — an atomic count would buy nothing no thread here
//! could observe. [`Rc`] is the idiomatic single-threaded equivalent, and
//! [`RefCell`] gives every acquired handle shared mutable access to the
//! same underlying state, matching the C original's "any holder of the
//! opaque handle may call any operation" model.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::instrument;

use crate::backend::{FontResource, LinePrinter, RenderBackend};
use crate::color::Color;
use crate::config::TtyConfig;
use crate::error::TtyError;
use crate::glyph;
use crate::screen::{OutputTarget, Screen};

/// Owns the line printer and font resource in teardown order: Rust drops
/// a struct's fields in declaration order, so `line_printer` (dropped
/// first) precedes `font_resource` (dropped second), matching `spec.md`
/// §4.5's "line printer → font → font resource → font system" sequence.
/// This crate's `FontResource` contract already covers what the source
/// splits into a separate font and font-system object, so there is no
/// third field to order here.
struct Inner {
    line_printer: Box<dyn LinePrinter>,
    font_resource: Box<dyn FontResource>,
    backend: RenderBackend,
    screen: Screen,
}

/// A shared handle to a virtual terminal instance.
///
/// Cloning via [`Tty::ref_acquire`] yields another handle over the *same*
/// underlying state (an [`Rc`] clone), not an independent copy. The last
/// handle to be dropped tears down the line printer, then the font
/// resource.
#[derive(Clone)]
pub struct Tty {
    inner: Rc<RefCell<Inner>>,
}

impl Tty {
    /// Constructs a `Tty` bound to `backend`, `font_resource`, and
    /// `line_printer`, with default [`TtyConfig`].
    ///
    /// # Errors
    /// `TtyError::InvalidArgument` if `backend` is missing any required
    /// operation handle.
    pub fn create(
        backend: RenderBackend,
        font_resource: Box<dyn FontResource>,
        line_printer: Box<dyn LinePrinter>,
    ) -> Result<Self, TtyError> {
        Self::create_with_config(backend, font_resource, line_printer, TtyConfig::default())
    }

    /// As [`Tty::create`], but with an explicit [`TtyConfig`] rather than
    /// the default.
    ///
    /// # Errors
    /// Same as [`Tty::create`].
    pub fn create_with_config(
        backend: RenderBackend,
        font_resource: Box<dyn FontResource>,
        line_printer: Box<dyn LinePrinter>,
        config: TtyConfig,
    ) -> Result<Self, TtyError> {
        if !backend.is_complete() {
            return Err(TtyError::invalid_argument(
                "render backend is missing one or more required operation handles",
            ));
        }
        Ok(Self {
            inner: Rc::new(RefCell::new(Inner {
                line_printer,
                font_resource,
                backend,
                screen: Screen::new(config),
            })),
        })
    }

    /// Acquires an additional handle to the same underlying instance.
    #[must_use]
    pub fn ref_acquire(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Releases this handle. Equivalent to dropping it; provided so
    /// callers mirroring the C `ref_acquire`/`ref_release` pairing have an
    /// explicit symmetric call.
    pub fn ref_release(self) {
        drop(self);
    }

    /// The number of outstanding handles to this instance.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Loads the font at `path` and uploads the fixed-charset glyph atlas
    /// to the line printer (`spec.md` §4.4).
    ///
    /// # Errors
    /// Propagates any [`TtyError`] from the font resource or line printer.
    #[instrument(skip(self))]
    pub fn set_font(&self, path: &str) -> Result<(), TtyError> {
        let mut inner = self.inner.borrow_mut();
        let allow_partial = inner.screen.config().allow_partial_glyph_atlas;
        let Inner {
            font_resource,
            line_printer,
            ..
        } = &mut *inner;
        glyph::load(font_resource.as_mut(), line_printer.as_mut(), path, allow_partial)
    }

    /// Sets the on-screen target rectangle.
    ///
    /// # Errors
    /// `TtyError::InvalidArgument` if `width` or `height` is negative.
    pub fn set_viewport(&self, x: i32, y: i32, width: i32, height: i32) -> Result<(), TtyError> {
        let mut inner = self.inner.borrow_mut();
        glyph::set_viewport(inner.line_printer.as_mut(), x, y, width, height)
    }

    /// Sizes the scrollback ring to `4 * lines_per_screen` lines.
    ///
    /// # Errors
    /// `TtyError::InvalidArgument` if `lines_per_screen == 0`.
    pub fn set_storage(&self, lines_per_screen: usize) -> Result<(), TtyError> {
        self.inner.borrow_mut().screen.set_storage(lines_per_screen)
    }

    /// Moves the command-line cursor by `delta`, clamped to the cmdbuf.
    pub fn translate_cursor(&self, delta: isize) {
        self.inner.borrow_mut().screen.translate_cursor(delta);
    }

    /// Appends or inserts `text` into `output`, per `spec.md` §4.3.
    ///
    /// # Errors
    /// Propagates any [`TtyError`] from the underlying screen mutation.
    pub fn print(&self, output: OutputTarget, text: &str, color: Color) -> Result<(), TtyError> {
        self.inner.borrow_mut().screen.print(output, text, color)
    }

    /// Runs `f` with read-only access to the underlying [`Screen`], for
    /// hosts that need to inspect state (e.g. to drive a render pass)
    /// without a dedicated accessor for every field.
    pub fn with_screen<R>(&self, f: impl FnOnce(&Screen) -> R) -> R {
        f(&self.inner.borrow().screen)
    }

    /// The render backend this instance was constructed with.
    #[must_use]
    pub fn backend(&self) -> RenderBackend {
        self.inner.borrow().backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Bitmap, FontError, GlyphDescMetrics, GlyphHandle, LinePrinterError};

    struct NullFont;
    impl FontResource for NullFont {
        fn load(&mut self, _path: &str) -> Result<(), FontError> {
            Ok(())
        }
        fn get_glyph(&mut self, c: char) -> Result<GlyphHandle, FontError> {
            Ok(c as GlyphHandle)
        }
        fn glyph_desc(&self, glyph: GlyphHandle) -> Result<GlyphDescMetrics, FontError> {
            Ok(GlyphDescMetrics {
                advance_width: 8,
                character: char::from_u32(glyph).unwrap_or_default(),
                bbox_left: 0,
                bbox_top: 0,
            })
        }
        fn glyph_bitmap(&self, _glyph: GlyphHandle, _render: bool) -> Result<Bitmap, FontError> {
            Ok(Bitmap::empty())
        }
        fn line_space(&self) -> Result<i32, FontError> {
            Ok(10)
        }
    }

    struct NullPrinter;
    impl LinePrinter for NullPrinter {
        fn set_font(&mut self, _line_space: i32, _descriptors: &[crate::backend::GlyphDesc]) -> Result<(), LinePrinterError> {
            Ok(())
        }
        fn set_viewport(&mut self, _x: i32, _y: i32, _width: i32, _height: i32) -> Result<(), LinePrinterError> {
            Ok(())
        }
        fn draw(&mut self, _text: &str, _position: (i32, i32), _colors: &[Color]) -> Result<(), LinePrinterError> {
            Ok(())
        }
    }

    fn complete_backend() -> RenderBackend {
        RenderBackend {
            create_buffer: Some(|| {}),
            create_program: Some(|| {}),
            create_texture: Some(|| {}),
            draw: Some(|| {}),
            set_viewport: Some(|| {}),
            set_scissor: Some(|| {}),
        }
    }

    #[test]
    fn create_rejects_incomplete_backend() {
        let mut backend = complete_backend();
        backend.draw = None;
        let err = match Tty::create(backend, Box::new(NullFont), Box::new(NullPrinter)) {
            Err(e) => e,
            Ok(_) => panic!("expected Tty::create to reject an incomplete backend"),
        };
        assert!(matches!(err, TtyError::InvalidArgument(_)));
    }

    #[test]
    fn empty_screen_stdout_write_is_a_noop() {
        let tty = Tty::create(complete_backend(), Box::new(NullFont), Box::new(NullPrinter)).unwrap();
        tty.print(OutputTarget::Stdout, "hello", Color::WHITE).unwrap();
        tty.with_screen(|s| assert_eq!(s.stdout_len(), 0));
    }

    #[test]
    fn ref_acquire_shares_state_across_handles() {
        let a = Tty::create(complete_backend(), Box::new(NullFont), Box::new(NullPrinter)).unwrap();
        let b = a.ref_acquire();
        assert_eq!(a.ref_count(), 2);
        b.set_storage(5).unwrap();
        a.with_screen(|s| assert_eq!(s.lines_count(), 20));
        drop(b);
        assert_eq!(a.ref_count(), 1);
    }

    #[test]
    fn set_font_uploads_the_full_charset() {
        let tty = Tty::create(complete_backend(), Box::new(NullFont), Box::new(NullPrinter)).unwrap();
        tty.set_font("/fonts/mono.ttf").unwrap();
    }
}
