//! Text fitting: width measurement, truncation, and word wrapping.
//!
//! Every string that lands on a card goes through here exactly once, in
//! the layout engine, so the vector, document, and raster artifacts all
//! show identical text. The fitting operations are pure: they take a
//! measurement closure for the active font and size and never touch
//! renderer state.

pub mod metrics;

pub use metrics::{Font, FontMetrics, metrics};

/// Truncation marker appended to text that had to be cut.
///
/// Three ASCII dots rather than U+2026 so the marker has an exact width
/// in every context that measures it.
pub const ELLIPSIS: &str = "...";

/// Measurement closure for `font` at `size` pt.
pub fn measure_at(font: Font, size: f32) -> impl Fn(&str) -> f32 {
    let table = metrics(font);
    move |s| table.text_width(s, size)
}

/// Fits `text` into `max_width`, appending [`ELLIPSIS`] when it has to cut.
///
/// Returns the text unchanged when it already fits. Otherwise trailing
/// characters are removed until the remainder plus the marker fits. When
/// not even one character plus the marker fits, the marker alone is
/// returned. Idempotent: refitting an already-fitted string is a no-op.
pub fn truncate<F>(text: &str, max_width: f32, measure: F) -> String
where
    F: Fn(&str) -> f32,
{
    if measure(text) <= max_width {
        return text.to_string();
    }
    let mut prefix = text.to_string();
    while !prefix.is_empty() {
        prefix.pop();
        let candidate = format!("{}{ELLIPSIS}", prefix.trim_end());
        if measure(&candidate) <= max_width {
            return candidate;
        }
    }
    ELLIPSIS.to_string()
}

/// Wraps `text` into at most `max_lines` lines of at most `max_width`.
///
/// Greedy word wrap; a single word wider than the line is broken at
/// character level. When content remains past the last allowed line, the
/// overflow is folded into that line and resolved through [`truncate`],
/// so a clipped wrap always ends in the marker. Whitespace-only input
/// yields no lines.
pub fn wrap_lines<F>(text: &str, max_width: f32, max_lines: usize, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    if max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word;
        loop {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&candidate) <= max_width {
                current = candidate;
                break;
            }
            if current.is_empty() {
                // The word alone overflows: emit the longest fitting
                // prefix as its own line and wrap the rest.
                let split = longest_fitting_prefix(word, max_width, &measure);
                let (head, tail) = word.split_at(split);
                lines.push(head.to_string());
                word = tail;
                if word.is_empty() {
                    break;
                }
            } else {
                lines.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        let overflow = lines.split_off(max_lines - 1).join(" ");
        lines.push(truncate(&overflow, max_width, &measure));
    }
    lines
}

/// Byte length of the longest char-boundary prefix of `word` that fits,
/// but always at least one character so callers make progress.
fn longest_fitting_prefix<F>(word: &str, max_width: f32, measure: &F) -> usize
where
    F: Fn(&str) -> f32,
{
    let mut end = 0;
    for (idx, c) in word.char_indices() {
        let next = idx + c.len_utf8();
        if end > 0 && measure(&word[..next]) > max_width {
            break;
        }
        end = next;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// One unit per character, so widths are easy to reason about.
    fn per_char(s: &str) -> f32 {
        s.chars().count() as f32
    }

    #[test]
    fn test_truncate_fitting_text_unchanged() {
        assert_eq!(truncate("Router", 10.0, per_char), "Router");
        assert_eq!(truncate("", 0.0, per_char), "");
    }

    #[test]
    fn test_truncate_appends_marker() {
        // 8 chars into width 5: room for 2 chars plus the 3-dot marker
        assert_eq!(truncate("abcdefgh", 5.0, per_char), "ab...");
    }

    #[test]
    fn test_truncate_strips_trailing_space_before_marker() {
        assert_eq!(truncate("core switch rack", 10.0, per_char), "core sw...");
    }

    #[test]
    fn test_truncate_marker_alone_when_nothing_fits() {
        assert_eq!(truncate("abcdef", 2.0, per_char), "...");
        // And refitting the bare marker does not grow it
        assert_eq!(truncate("...", 2.0, per_char), "...");
    }

    #[test]
    fn test_truncate_with_font_measure() {
        let measure = measure_at(Font::HelveticaBold, 9.0);
        let fitted = truncate("A very long device name indeed", 60.0, &measure);
        assert!(measure(&fitted) <= 60.0);
        assert!(fitted.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_wrap_empty_input_yields_no_lines() {
        assert!(wrap_lines("", 10.0, 2, per_char).is_empty());
        assert!(wrap_lines("   ", 10.0, 2, per_char).is_empty());
        assert!(wrap_lines("word", 10.0, 0, per_char).is_empty());
    }

    #[test]
    fn test_wrap_breaks_on_word_boundaries() {
        let lines = wrap_lines("alpha beta gamma", 11.0, 5, per_char);
        assert_eq!(lines, vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn test_wrap_clips_overflow_into_last_line() {
        let lines = wrap_lines("one two three four five", 9.0, 2, per_char);
        assert_eq!(lines, vec!["one two", "three..."]);
    }

    #[test]
    fn test_wrap_splits_unbreakable_word() {
        let lines = wrap_lines("abcdefghij", 4.0, 5, per_char);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_long_name_into_two_title_lines() {
        // A 60-char name into a ~20-char line, title style: two lines,
        // the second clipped, strictly fewer visible characters than 60.
        let name = "EdgeRouter-Infinity-Rackmount-Chassis-Replacement-Unit-No421";
        assert_eq!(name.chars().count(), 60);

        let lines = wrap_lines(name, 20.0, 2, per_char);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with(ELLIPSIS));
        let visible: usize = lines.iter().map(|l| l.chars().count()).sum();
        assert!(visible < 60, "expected clipped total, got {visible}");
    }

    proptest! {
        #[test]
        fn prop_truncate_never_exceeds_width(
            chars in prop::collection::vec(prop::char::range(' ', '~'), 0..40),
            max_width in 4.0f32..60.0,
        ) {
            let text: String = chars.into_iter().collect();
            let fitted = truncate(&text, max_width, per_char);
            prop_assert!(per_char(&fitted) <= max_width);
        }

        #[test]
        fn prop_truncate_is_idempotent(
            chars in prop::collection::vec(prop::char::range(' ', '~'), 0..40),
            max_width in 4.0f32..60.0,
        ) {
            let text: String = chars.into_iter().collect();
            let once = truncate(&text, max_width, per_char);
            let twice = truncate(&once, max_width, per_char);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_truncate_keeps_fitting_text(
            chars in prop::collection::vec(prop::char::range(' ', '~'), 0..40),
        ) {
            let text: String = chars.into_iter().collect();
            let max_width = per_char(&text) + 1.0;
            prop_assert_eq!(truncate(&text, max_width, per_char), text);
        }

        #[test]
        fn prop_wrap_lines_respect_bounds(
            chars in prop::collection::vec(prop::char::range(' ', '~'), 0..80),
            max_width in 4.0f32..30.0,
            max_lines in 1usize..5,
        ) {
            let text: String = chars.into_iter().collect();
            let lines = wrap_lines(&text, max_width, max_lines, per_char);
            prop_assert!(lines.len() <= max_lines);
            for line in &lines {
                prop_assert!(per_char(line) <= max_width);
            }
        }
    }
}
