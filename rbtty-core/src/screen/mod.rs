//! The top-level screen state: a [`LineRing`] of scrollback, the prompt,
//! the live stdout/cmd accumulators, and the cursor.

mod cursor;

use tracing::{instrument, trace, warn};

use crate::color::Color;
use crate::config::TtyConfig;
use crate::error::TtyError;
use crate::line_ring::LineRing;
use crate::text_buffer::TextBuffer;

/// The three print destinations. A closed set, dispatched by `match`
/// inside [`Screen::print`] rather than three separate entry points
/// (`spec.md` §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    Prompt,
    Cmdout,
    Stdout,
}

/// The screen model: prompt, scrollback ring, live accumulators, cursor,
/// and scroll position.
#[derive(Debug)]
pub struct Screen {
    prompt: TextBuffer,
    lines: Option<LineRing>,
    outbuf: Option<usize>,
    cmdbuf: Option<usize>,
    cursor: usize,
    scroll_id: usize,
    config: TtyConfig,
}

impl Screen {
    #[must_use]
    pub fn new(config: TtyConfig) -> Self {
        Self {
            prompt: TextBuffer::new(),
            lines: None,
            outbuf: None,
            cmdbuf: None,
            cursor: 0,
            scroll_id: 0,
            config,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &TextBuffer {
        &self.prompt
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn scroll_id(&self) -> usize {
        self.scroll_id
    }

    #[must_use]
    pub fn config(&self) -> TtyConfig {
        self.config
    }

    /// Total capacity of the scrollback ring, or `0` if storage has not
    /// been configured yet.
    #[must_use]
    pub fn lines_count(&self) -> usize {
        self.lines.as_ref().map_or(0, LineRing::capacity)
    }

    #[must_use]
    pub fn free_len(&self) -> usize {
        self.lines.as_ref().map_or(0, LineRing::free_len)
    }

    #[must_use]
    pub fn stdout_len(&self) -> usize {
        self.lines.as_ref().map_or(0, LineRing::stdout_len)
    }

    #[must_use]
    pub fn has_outbuf(&self) -> bool {
        self.outbuf.is_some()
    }

    #[must_use]
    pub fn has_cmdbuf(&self) -> bool {
        self.cmdbuf.is_some()
    }

    /// The live cmdbuf text, if a command line has been activated.
    #[must_use]
    pub fn cmdbuf_text(&self) -> Option<&TextBuffer> {
        let idx = self.cmdbuf?;
        Some(self.lines.as_ref().unwrap().get(idx).text())
    }

    /// The live outbuf text, if any stdout has been written since the
    /// last newline.
    #[must_use]
    pub fn outbuf_text(&self) -> Option<&TextBuffer> {
        let idx = self.outbuf?;
        Some(self.lines.as_ref().unwrap().get(idx).text())
    }

    /// Committed stdout lines, oldest first.
    pub fn stdout_lines(&self) -> impl Iterator<Item = &TextBuffer> + '_ {
        let lines = self.lines.as_ref();
        lines
            .into_iter()
            .flat_map(|ring| ring.stdout_indices().map(move |idx| ring.get(idx).text()))
    }

    /// Sizes the scrollback ring to `4 * lines_per_screen` lines, dropping
    /// any prior slab, outbuf, cmdbuf, cursor, and scroll position.
    ///
    /// # Errors
    /// `TtyError::InvalidArgument` if `lines_per_screen == 0` or would
    /// overflow the capacity computation.
    #[instrument(skip(self))]
    pub fn set_storage(&mut self, lines_per_screen: usize) -> Result<(), TtyError> {
        if lines_per_screen == 0 {
            return Err(TtyError::invalid_argument(
                "lines_per_screen must be positive",
            ));
        }
        let capacity = lines_per_screen
            .checked_mul(4)
            .ok_or_else(|| TtyError::invalid_argument("lines_per_screen too large"))?;
        trace!(lines_per_screen, capacity, "sizing scrollback ring");
        self.lines = Some(LineRing::new(capacity));
        self.outbuf = None;
        self.cmdbuf = None;
        self.cursor = 0;
        self.scroll_id = 0;
        Ok(())
    }

    /// Routes `text` to the prompt, the command line, or stdout, per
    /// `spec.md` §4.3.
    ///
    /// # Errors
    /// Propagates any [`TtyError`] from the underlying [`TextBuffer`]
    /// mutation, and `TtyError::Memory` if a `Stdout` write exceeds the
    /// configured scratch capacity.
    #[instrument(skip(self, color))]
    pub fn print(&mut self, output: OutputTarget, text: &str, color: Color) -> Result<(), TtyError> {
        match output {
            OutputTarget::Prompt => self.print_prompt(text, color),
            OutputTarget::Cmdout => self.print_cmdout(text, color),
            OutputTarget::Stdout => self.print_stdout(text, color),
        }
    }

    /// Appends `text` to the prompt, mirroring the same insert into the
    /// live cmdbuf (if any) so the cmdbuf's leading prompt slice always
    /// matches `self.prompt` exactly.
    ///
    /// Capacity for both buffers is reserved up front, before either is
    /// mutated: if the mirror insert's reserve were allowed to fail after
    /// the prompt had already grown, a caller could observe the prompt
    /// grown with the cmdbuf mirror stale — the non-atomic state `spec.md`
    /// §7 requires this method never produce.
    fn print_prompt(&mut self, text: &str, color: Color) -> Result<(), TtyError> {
        let prompt_len_before = self.prompt.len();
        let n = text.chars().count();

        self.prompt.reserve(n)?;
        if let Some(cmd_idx) = self.cmdbuf {
            self.lines
                .as_mut()
                .unwrap()
                .get_mut(cmd_idx)
                .text_mut()
                .reserve(n)?;
        }

        self.prompt.append(text, color)?;
        if let Some(cmd_idx) = self.cmdbuf {
            self.lines
                .as_mut()
                .unwrap()
                .get_mut(cmd_idx)
                .text_mut()
                .insert(prompt_len_before, text, color)?;
            self.cursor += n;
        }
        Ok(())
    }

    fn print_cmdout(&mut self, text: &str, color: Color) -> Result<(), TtyError> {
        if self.lines.is_none() {
            warn!("print(CMDOUT) dropped: no storage configured");
            return Ok(());
        }
        if self.cmdbuf.is_none() {
            self.activate_cmdbuf()?;
        }
        let cmd_idx = self.cmdbuf.expect("just activated above");
        let at = self.cursor;
        self.lines
            .as_mut()
            .unwrap()
            .get_mut(cmd_idx)
            .text_mut()
            .insert(at, text, color)?;
        self.cursor += text.chars().count();
        Ok(())
    }

    fn print_stdout(&mut self, text: &str, color: Color) -> Result<(), TtyError> {
        if self.lines.is_none() {
            warn!("print(STDOUT) dropped: no storage configured");
            return Ok(());
        }
        if text.len() > self.config.stdout_scratch_capacity {
            return Err(TtyError::memory(format!(
                "stdout write of {} bytes exceeds scratch capacity {}",
                text.len(),
                self.config.stdout_scratch_capacity
            )));
        }

        let mut segments = text.split('\n').peekable();
        while let Some(segment) = segments.next() {
            let is_last = segments.peek().is_none();
            if !segment.is_empty() {
                self.append_to_outbuf(segment, color)?;
            }
            if !is_last {
                self.flush_stdout();
            }
        }
        Ok(())
    }

    fn append_to_outbuf(&mut self, segment: &str, color: Color) -> Result<(), TtyError> {
        if self.outbuf.is_none() {
            let idx = self.lines.as_mut().unwrap().acquire_free();
            self.lines.as_mut().unwrap().get_mut(idx).clear();
            self.outbuf = Some(idx);
        }
        let idx = self.outbuf.expect("just activated above");
        self.lines
            .as_mut()
            .unwrap()
            .get_mut(idx)
            .text_mut()
            .append(segment, color)
    }

    /// Commits the live outbuf (if any) to the stdout list and detaches it.
    /// Unlike [`Screen::activate_cmdbuf`], this does **not** eagerly acquire
    /// a replacement line: the next `STDOUT` write lazily acquires one via
    /// [`Screen::append_to_outbuf`], exactly as the very first write does.
    ///
    /// This asymmetry matters for the ring's capacity arithmetic: a
    /// trailing newline (no content after it) must not leave behind a live
    /// empty line occupying a ring slot, or a `k`-line ring could never
    /// actually hold `4k` committed lines simultaneously (`spec.md` §8).
    fn flush_stdout(&mut self) {
        if let Some(old_idx) = self.outbuf.take() {
            self.lines
                .as_mut()
                .expect("flush_stdout only called when storage is configured")
                .commit(old_idx);
        }
    }

    /// Acquires a fresh line, seeds it with the prompt's current contents,
    /// and only once that succeeds commits the old cmdbuf (if any) to
    /// stdout and rebinds `self.cmdbuf`/`self.cursor` to the new line.
    ///
    /// Unlike stdout's accumulator, the cmdbuf is reacquired eagerly: the
    /// caller that triggers activation ([`Screen::print_cmdout`]) inserts
    /// into it in the same call, so there is no later "next write" to defer
    /// acquisition to.
    ///
    /// The seed step (`copy_from`) runs before the old cmdbuf is committed
    /// and before `self.cmdbuf`/`self.cursor` are rebound, and the new
    /// line is handed back to the free list on failure — a `copy_from`
    /// error must never leave the old cmdbuf irreversibly committed with
    /// the new one live but unseeded (`spec.md` §7).
    fn activate_cmdbuf(&mut self) -> Result<(), TtyError> {
        let ring = self
            .lines
            .as_mut()
            .expect("activate_cmdbuf only called when storage is configured");
        let new_idx = ring.acquire_free();
        ring.get_mut(new_idx).clear();

        if !self.prompt.is_empty() {
            let prompt_clone = self.prompt.clone();
            if let Err(err) = ring.get_mut(new_idx).text_mut().copy_from(&prompt_clone) {
                ring.release(new_idx);
                return Err(err);
            }
        }

        if let Some(old_idx) = self.cmdbuf.take() {
            ring.commit(old_idx);
        }
        self.cmdbuf = Some(new_idx);
        self.cursor = self.prompt.len();
        Ok(())
    }

    /// Moves the cursor within the cmdbuf by `delta`, clamped so it never
    /// crosses into the prompt or past the end of the command text. A
    /// no-op if no cmdbuf is active.
    pub fn translate_cursor(&mut self, delta: isize) {
        cursor::translate(self, delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Screen {
        Screen::new(TtyConfig::default())
    }

    #[test]
    fn print_stdout_without_storage_is_a_noop() {
        let mut s = screen();
        s.print(OutputTarget::Stdout, "hello", Color::WHITE).unwrap();
        assert_eq!(s.stdout_len(), 0);
        assert!(s.outbuf_text().is_none());
    }

    #[test]
    fn prompt_then_command_activates_cmdbuf() {
        let mut s = screen();
        s.set_storage(10).unwrap();
        s.print(OutputTarget::Prompt, "$ ", Color::WHITE).unwrap();
        s.print(OutputTarget::Cmdout, "ls", Color::WHITE).unwrap();
        assert_eq!(s.cmdbuf_text().unwrap().text(), "$ ls");
        assert_eq!(s.cursor(), 4);
        assert_eq!(s.prompt().len(), 2);
    }

    #[test]
    fn newline_splitting_commits_each_segment() {
        let mut s = screen();
        s.set_storage(2).unwrap(); // capacity 8
        s.print(OutputTarget::Stdout, "a\nb\nc", Color::RED).unwrap();
        let committed: Vec<String> = s.stdout_lines().map(super::TextBuffer::text).collect();
        assert_eq!(committed, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(s.outbuf_text().unwrap().text(), "c");
        assert!(s
            .outbuf_text()
            .unwrap()
            .colors()
            .iter()
            .all(|&c| c == Color::RED));
    }

    #[test]
    fn eviction_drops_oldest_retrievable_line_by_capacity() {
        let mut s = screen();
        s.set_storage(1).unwrap(); // capacity 4
        s.print(OutputTarget::Stdout, "1\n2\n3\n4\n5\n", Color::WHITE)
            .unwrap();
        let committed: Vec<String> = s.stdout_lines().map(super::TextBuffer::text).collect();
        assert_eq!(
            committed,
            vec!["2".to_string(), "3".to_string(), "4".to_string(), "5".to_string()]
        );
    }

    #[test]
    fn prompt_extension_resynchronizes_cmdbuf_and_cursor() {
        let mut s = screen();
        s.set_storage(10).unwrap();
        s.print(OutputTarget::Prompt, "> ", Color::WHITE).unwrap();
        s.print(OutputTarget::Cmdout, "hi", Color::WHITE).unwrap();
        assert_eq!(s.cursor(), 4);

        s.print(OutputTarget::Prompt, "! ", Color::RED).unwrap();
        assert_eq!(s.prompt().text(), "> ! ");
        assert_eq!(s.cmdbuf_text().unwrap().text(), "> ! hi");
        assert_eq!(s.cursor(), 6);
        assert!(s.prompt().colors()[2..4].iter().all(|&c| c == Color::RED));
        assert!(s.cmdbuf_text().unwrap().colors()[2..4]
            .iter()
            .all(|&c| c == Color::RED));
    }

    #[test]
    fn total_slot_invariant_holds_after_heavy_use() {
        let mut s = screen();
        s.set_storage(1).unwrap();
        s.print(OutputTarget::Stdout, "1\n2\n3\n4\n5\n6\n7\n", Color::WHITE)
            .unwrap();
        let live = usize::from(s.has_outbuf()) + usize::from(s.has_cmdbuf());
        assert_eq!(s.free_len() + s.stdout_len() + live, s.lines_count());
    }
}
