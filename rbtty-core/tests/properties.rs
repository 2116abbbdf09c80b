//! Property-based checks for the invariants `spec.md` §8 lists: the
//! TextBuffer length lockstep, the screen's slot-count conservation, the
//! cmdbuf cursor bounds, and `lines_count == 4k`.

use proptest::prelude::*;
use rbtty_core::screen::{OutputTarget, Screen};
use rbtty_core::{Color, TtyConfig};

fn arb_color() -> impl Strategy<Value = Color> {
    (0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0).prop_map(|(r, g, b)| Color { r, g, b })
}

fn arb_segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \n]{0,12}"
}

proptest! {
    #[test]
    fn lines_count_is_always_four_times_lines_per_screen(k in 1usize..50) {
        let mut s = Screen::new(TtyConfig::default());
        s.set_storage(k).unwrap();
        prop_assert_eq!(s.lines_count(), 4 * k);
    }

    #[test]
    fn slot_count_is_conserved_after_arbitrary_stdout_writes(
        k in 1usize..8,
        segments in prop::collection::vec(arb_segment(), 0..20),
        color in arb_color(),
    ) {
        let mut s = Screen::new(TtyConfig::default());
        s.set_storage(k).unwrap();
        for seg in &segments {
            // Each write stays within the scratch capacity by construction
            // (segments are capped at 12 bytes well under the default 4096).
            let _ = s.print(OutputTarget::Stdout, seg, color);
        }
        let live = usize::from(s.has_outbuf()) + usize::from(s.has_cmdbuf());
        prop_assert_eq!(s.free_len() + s.stdout_len() + live, s.lines_count());
    }

    #[test]
    fn cursor_stays_within_prompt_and_cmdbuf_bounds(
        prompt in "[a-zA-Z$> ]{0,6}",
        command in "[a-zA-Z0-9]{1,10}",
        deltas in prop::collection::vec(-20isize..20, 0..20),
        color in arb_color(),
    ) {
        let mut s = Screen::new(TtyConfig::default());
        s.set_storage(10).unwrap();
        s.print(OutputTarget::Prompt, &prompt, color).unwrap();
        s.print(OutputTarget::Cmdout, &command, color).unwrap();

        for delta in deltas {
            s.translate_cursor(delta);
            let cmd_len = s.cmdbuf_text().unwrap().len();
            prop_assert!(s.prompt().len() <= s.cursor());
            prop_assert!(s.cursor() <= cmd_len);
        }
    }

    #[test]
    fn translate_cursor_round_trips_within_bounds(
        command in "[a-zA-Z0-9]{4,10}",
        d in 1isize..4,
        color in arb_color(),
    ) {
        let mut s = Screen::new(TtyConfig::default());
        s.set_storage(10).unwrap();
        s.print(OutputTarget::Prompt, "$ ", color).unwrap();
        s.print(OutputTarget::Cmdout, &command, color).unwrap();

        // Move left first so the round trip below has room to move right
        // again without hitting the end-of-text clamp.
        s.translate_cursor(-d);
        let before = s.cursor();
        s.translate_cursor(d);
        s.translate_cursor(-d);
        prop_assert_eq!(s.cursor(), before);
    }
}
