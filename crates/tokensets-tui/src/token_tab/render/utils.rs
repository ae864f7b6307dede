//! Utility functions for rendering

use {
    super::super::columns::Tone,
    ratatui::style::Color,
    unicode_width::{UnicodeWidthChar, UnicodeWidthStr},
};

pub const SUCCESS_COLOR: Color = Color::Rgb(0x1B, 0xC5, 0xBD);
pub const DANGER_COLOR: Color = Color::Rgb(0xF6, 0x4E, 0x60);
pub const ZEBRA_COLOR: Color = Color::Rgb(30, 30, 40);
pub const SELECTED_COLOR: Color = Color::Rgb(45, 50, 70);

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => SUCCESS_COLOR,
        Tone::Danger => DANGER_COLOR,
    }
}

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Truncate a string to fit within a maximum display width (not byte length)
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    // Leave one column for the ellipsis
    let target_width = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > target_width {
            break;
        }
        result.push(c);
        width += char_width;
    }

    result.push('…');
    result
}
