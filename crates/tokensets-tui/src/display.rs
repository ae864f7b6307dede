//! Plain-text table for the `list` subcommand

use {
    crate::{
        i18n::Locale,
        token_tab::{
            TabKey,
            columns::{COLUMNS, CellContent, Column, Tone, cell},
            fetch::TabData,
        },
    },
    colored::*,
    unicode_width::UnicodeWidthStr,
};

const NAME_WIDTH: usize = 36;
const VALUE_WIDTH: usize = 16;
const CHANGE_WIDTH: usize = 10;

fn column_width(column: Column) -> usize {
    match column {
        Column::Name => NAME_WIDTH,
        Column::MarketCap => VALUE_WIDTH + 2,
        Column::Price => VALUE_WIDTH - 4,
        Column::Change(_) => CHANGE_WIDTH,
    }
}

/// Pad or cut `text` to exactly `width` display columns
fn fit(text: &str, width: usize, right_align: bool) -> String {
    let text_width = text.width();
    if text_width > width {
        let mut out = String::new();
        let mut used = 0;
        for c in text.chars() {
            let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if used + w + 1 > width {
                break;
            }
            out.push(c);
            used += w;
        }
        out.push('…');
        return format!("{}{}", out, " ".repeat(width.saturating_sub(used + 1)));
    }
    let padding = " ".repeat(width - text_width);
    if right_align {
        format!("{}{}", padding, text)
    } else {
        format!("{}{}", text, padding)
    }
}

fn styled_cell(content: &CellContent, width: usize) -> String {
    match content {
        CellContent::Name(text) => fit(text, width, false).bold().to_string(),
        CellContent::Plain(text) => fit(text, width, true),
        CellContent::Bold(text) => fit(text, width, true).bold().to_string(),
        CellContent::Change(change) => {
            let text = fit(&format!("{} {}", change.arrow(), change.text), width, true);
            match change.tone {
                Tone::Success => text.green().to_string(),
                Tone::Danger => text.red().to_string(),
            }
        },
    }
}

pub struct TokenSetListFormatter;

impl TokenSetListFormatter {
    /// Render one tab's rows in API order. An empty `data` prints just the header.
    pub fn format_table(key: TabKey, data: &TabData, locale: Locale) -> String {
        let header: Vec<String> = COLUMNS
            .iter()
            .map(|column| {
                let right = !matches!(column, Column::Name);
                fit(column.header(locale), column_width(*column), right)
            })
            .collect();
        let header = header.join(" ");
        let rule = "─".repeat(header.width());

        let mut output = format!(
            "{} {}\n{}\n{}\n",
            locale.t(key.label_key()).cyan().bold(),
            format!("({} rows)", data.sets.len()).dimmed(),
            header.bold(),
            rule.dimmed()
        );

        // Entry `i` belongs to row `i`
        for (i, set) in data.sets.iter().enumerate() {
            let entry = data.historical.get(i);
            let cells: Vec<String> = COLUMNS
                .iter()
                .map(|column| styled_cell(&cell(*column, set, entry), column_width(*column)))
                .collect();
            output.push_str(&cells.join(" "));
            output.push('\n');
        }

        output
    }
}
