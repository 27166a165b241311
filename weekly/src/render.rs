//! Console formatting for workflow progress.
//!
//! Progress text is product output on stdout, distinct from the diagnostic
//! tracing layer. Box widths are computed on visible characters, so styled
//! text does not distort the frame.

use std::sync::LazyLock;

use colored::Colorize;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

/// Remove ANSI escape sequences for width measurement.
fn strip_ansi(text: &str) -> String {
    static ANSI: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());
    ANSI.replace_all(text, "").into_owned()
}

/// Display columns occupied by `text`, ignoring styling.
fn visible_width(text: &str) -> usize {
    strip_ansi(text).width()
}

/// Surround `text` with a rounded box, one space of horizontal padding.
pub fn boxed(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let width = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("╭{}╮\n", "─".repeat(width + 2)));
    for line in &lines {
        let pad = width - visible_width(line);
        out.push_str(&format!("│ {line}{} │\n", " ".repeat(pad)));
    }
    out.push_str(&format!("╰{}╯", "─".repeat(width + 2)));
    out
}

/// Header for workflow step `number` of `total`.
pub fn step_header(number: usize, total: usize, name: &str) -> String {
    format!(
        "{} {}",
        format!("[{number}/{total}]").dimmed(),
        name.bold().underline()
    )
}

/// Header for project `index` of `total` within a step.
pub fn project_header(index: usize, total: usize, project: &str) -> String {
    format!(
        "{} Project: {}",
        format!("({index}/{total})").dimmed(),
        project.bold()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_frames_every_line_to_the_widest() {
        let rendered = boxed("short\na longer line");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with('╭') && lines[0].ends_with('╮'));
        assert_eq!(lines[1], "│ short         │");
        assert_eq!(lines[2], "│ a longer line │");
        assert!(lines[3].starts_with('╰') && lines[3].ends_with('╯'));
    }

    #[test]
    fn box_width_ignores_ansi_escapes() {
        let styled = "\x1b[1mbold\x1b[0m";
        let rendered = boxed(styled);
        let top = rendered.lines().next().expect("top border");
        // "bold" is 4 visible chars: corners + 6 horizontal segments.
        assert_eq!(top.chars().count(), 8);
    }

    #[test]
    fn strip_ansi_removes_style_sequences() {
        assert_eq!(strip_ansi("\x1b[38;5;8mgray\x1b[0m text"), "gray text");
    }

    #[test]
    fn box_width_counts_wide_characters_as_two_columns() {
        // Each CJK character occupies two display columns; the narrow line
        // below must be padded to match.
        let rendered = boxed("日本語\nabc");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "│ 日本語 │");
        assert_eq!(lines[2], "│ abc    │");
    }
}
