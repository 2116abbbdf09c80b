//! Deployment-level defaults a host passes to [`crate::tty::Tty::create`].
//!
//! These are distinct from the public API's explicit call arguments
//! (`lines_per_screen`, viewport rect, font path — always passed directly
//! per `spec.md` §6); `TtyConfig` only covers the handful of knobs the
//! spec leaves unspecified (§9 Open Questions) that a host embedding this
//! crate may reasonably want to override once at construction time.
//!
//! Unlike the teacher's `configs::Config`, this is not a process-global
//! `OnceLock` value — a single host process may run more than one `Tty`
//! (e.g. a game console and a separate chat console), each with its own
//! tuning, so global mutable state would be the wrong shape here.

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TtyConfig {
    /// Capacity, in bytes, of the scratch buffer `Screen::print` uses to
    /// split a `STDOUT` write on `'\n'`. `spec.md` §9's last open question
    /// resolves an over-length write as `MEMORY_ERROR`; this is the
    /// threshold.
    pub stdout_scratch_capacity: usize,
    /// If `true`, `Tty::set_font` keeps a glyph atlas upload that
    /// succeeded for every charset entry except ones whose bitmap render
    /// failed, uploading empty bitmaps for those. If `false` (the
    /// default, matching `spec.md` §4.4/§7's all-or-nothing policy), any
    /// single glyph failure fails the whole call.
    pub allow_partial_glyph_atlas: bool,
}

impl Default for TtyConfig {
    fn default() -> Self {
        Self {
            stdout_scratch_capacity: 4096,
            allow_partial_glyph_atlas: false,
        }
    }
}
