//! `rbtty-demo` is a CLI tool for exercising `rbtty-core` without a real
//! window, GPU, or font rasterizer.
//!
//! It wires an in-memory render backend, font resource, and line printer
//! to a [`Tty`] and replays a script of print/cursor/storage commands read
//! from a file (or, with no arguments, a small built-in demo script),
//! printing the resulting screen state to stdout. This is a development
//! and documentation aid, not a terminal emulator in its own right.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{Context, IntoDiagnostic};
use rbtty_core::backend::{
    Bitmap, FontError, GlyphDesc, GlyphDescMetrics, GlyphHandle, LinePrinterError,
};
use rbtty_core::{Color, FontResource, LinePrinter, OutputTarget, RenderBackend, Tty, TtyConfig};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "rbtty-demo", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML script of screen commands to replay.
    ///
    /// If omitted, runs a small built-in demo script.
    script: Option<PathBuf>,
    /// Lines-per-screen passed to `set_storage` before replaying the script.
    #[arg(short, long, default_value_t = 4)]
    lines_per_screen: usize,
    /// Emit structured trace output while replaying.
    #[arg(short, long)]
    debug: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints the fixed glyph charset this crate rasterizes.
    Charset,
}

/// One step of a replay script (`spec.md` §6's `print`/`translate_cursor`
/// operations, plus the config step, as plain data).
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    Prompt { text: String },
    Cmdout { text: String },
    Stdout { text: String },
    TranslateCursor { delta: isize },
}

#[derive(Debug, Deserialize, Default)]
struct Script {
    #[serde(default)]
    steps: Vec<Step>,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        init_tracing()?;
    }

    if let Some(Commands::Charset) = cli.command {
        for c in rbtty_core::charset::CHARSET {
            print!("{c}");
        }
        println!();
        return Ok(());
    }

    let script = match &cli.script {
        Some(path) => load_script(path)?,
        None => builtin_demo_script(),
    };

    let backend = RenderBackend {
        create_buffer: Some(|| {}),
        create_program: Some(|| {}),
        create_texture: Some(|| {}),
        draw: Some(|| {}),
        set_viewport: Some(|| {}),
        set_scissor: Some(|| {}),
    };
    let tty = Tty::create_with_config(
        backend,
        Box::new(InMemoryFont::default()),
        Box::new(InMemoryPrinter),
        TtyConfig::default(),
    )
    .into_diagnostic()
    .wrap_err("failed to construct Tty")?;

    tty.set_storage(cli.lines_per_screen)
        .into_diagnostic()
        .wrap_err("set_storage failed")?;

    for step in script.steps {
        replay(&tty, step).into_diagnostic()?;
    }

    tty.with_screen(|s| {
        for line in s.stdout_lines() {
            println!("{}", line.text());
        }
        if let Some(outbuf) = s.outbuf_text() {
            println!("{}", outbuf.text());
        }
        if let Some(cmdbuf) = s.cmdbuf_text() {
            println!("{}", cmdbuf.text());
        }
    });

    Ok(())
}

fn replay(tty: &Tty, step: Step) -> Result<(), rbtty_core::TtyError> {
    match step {
        Step::Prompt { text } => tty.print(OutputTarget::Prompt, &text, Color::WHITE),
        Step::Cmdout { text } => tty.print(OutputTarget::Cmdout, &text, Color::WHITE),
        Step::Stdout { text } => tty.print(OutputTarget::Stdout, &text, Color::WHITE),
        Step::TranslateCursor { delta } => {
            tty.translate_cursor(delta);
            Ok(())
        }
    }
}

fn load_script(path: &PathBuf) -> miette::Result<Script> {
    let contents = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read script at '{}'", path.display()))?;
    toml::from_str(&contents)
        .into_diagnostic()
        .wrap_err("failed to parse script as TOML")
}

fn builtin_demo_script() -> Script {
    Script {
        steps: vec![
            Step::Prompt { text: "$ ".into() },
            Step::Cmdout { text: "ls".into() },
            Step::Stdout {
                text: "Cargo.toml\nsrc\n".into(),
            },
        ],
    }
}

fn init_tracing() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .try_init()
        .map_err(|e| miette::miette!("{e}"))
}

/// A font resource that fabricates flat, zero-size glyphs for every
/// charset entry, so `set_font` can be exercised without a real font file
/// on disk.
#[derive(Default)]
struct InMemoryFont {
    loaded: bool,
}

impl FontResource for InMemoryFont {
    fn load(&mut self, path: &str) -> Result<(), FontError> {
        if path.is_empty() {
            return Err(FontError::InvalidArgument("empty font path".into()));
        }
        self.loaded = true;
        Ok(())
    }

    fn get_glyph(&mut self, c: char) -> Result<GlyphHandle, FontError> {
        if !self.loaded {
            return Err(FontError::Unknown("font not loaded".into()));
        }
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
        Ok(12)
    }
}

/// A line printer that discards every draw call; this demo only cares
/// about the screen model's text state, printed at the end of `main`.
struct InMemoryPrinter;

impl LinePrinter for InMemoryPrinter {
    fn set_font(&mut self, _line_space: i32, _descriptors: &[GlyphDesc]) -> Result<(), LinePrinterError> {
        Ok(())
    }

    fn set_viewport(&mut self, _x: i32, _y: i32, _width: i32, _height: i32) -> Result<(), LinePrinterError> {
        Ok(())
    }

    fn draw(&mut self, _text: &str, _position: (i32, i32), _colors: &[Color]) -> Result<(), LinePrinterError> {
        Ok(())
    }
}
