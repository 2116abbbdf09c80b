//! `rbtty-core` is the underlying library for [`rbtty-cli`](https://crates.io/crates/rbtty-cli).
//!
//! It implements a render-backend-agnostic virtual terminal: a scrollable
//! text screen with a command-line region, driven entirely through an
//! in-process API (`create`, `set_font`, `set_viewport`, `set_storage`,
//! `translate_cursor`, `print`). The crate never touches a window system,
//! a GPU, or a font rasterizer directly — those are supplied by the host
//! through the [`backend`] contracts ([`backend::RenderBackend`],
//! [`backend::FontResource`], [`backend::LinePrinter`]).
//!
//! As it sits right now, this library is meant to be driven by a single
//! host loop per [`tty::Tty`] instance; see [`config`] for the knobs a
//! host can tune at construction time.

pub mod backend;
pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod glyph;
pub mod line_ring;
pub mod screen;
pub mod text_buffer;
pub mod tty;

pub use backend::{FontResource, LinePrinter, RenderBackend};
pub use color::Color;
pub use config::TtyConfig;
pub use error::TtyError;
pub use screen::OutputTarget;
pub use tty::Tty;
