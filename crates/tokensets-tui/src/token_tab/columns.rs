//! Column and cell-formatter definitions shared by both table layouts

use {
    crate::i18n::Locale,
    std::cmp::Ordering,
    tokensets_api::{ChangeWindow, HistoricalEntry, TokenSet},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    MarketCap,
    Price,
    Change(ChangeWindow),
}

pub const COLUMNS: [Column; 8] = [
    Column::Name,
    Column::MarketCap,
    Column::Price,
    Column::Change(ChangeWindow::Day),
    Column::Change(ChangeWindow::Week),
    Column::Change(ChangeWindow::Month),
    Column::Change(ChangeWindow::SixMonths),
    Column::Change(ChangeWindow::Year),
];

impl Column {
    pub fn label_key(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::MarketCap => "table.marketCap",
            Column::Price => "table.price",
            Column::Change(window) => change_label_key(*window),
        }
    }

    pub fn header(&self, locale: Locale) -> &'static str {
        locale.t(self.label_key())
    }

    fn numeric_value(&self, set: &TokenSet, historical: Option<&HistoricalEntry>) -> Option<f64> {
        let value = match self {
            Column::Name => None,
            Column::MarketCap => set.market_cap,
            Column::Price => set.price_usd,
            Column::Change(window) => historical.and_then(|h| h.change(*window)),
        };
        value.filter(|v| v.is_finite())
    }
}

fn change_label_key(window: ChangeWindow) -> &'static str {
    match window {
        ChangeWindow::Day => "tokensets.oneDay",
        ChangeWindow::Week => "tokensets.week",
        ChangeWindow::Month => "tokensets.month",
        ChangeWindow::SixMonths => "tokensets.sixMonth",
        ChangeWindow::Year => "tokensets.year",
    }
}

/// Colour family of a change cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeCell {
    pub text: String,
    pub tone: Tone,
}

impl ChangeCell {
    pub fn arrow(&self) -> &'static str {
        match self.tone {
            Tone::Success => "▲",
            Tone::Danger => "▼",
        }
    }
}

/// Format one percentage-change value.
///
/// Absent or non-finite values render as `-` in the success tone; negative
/// values take the danger tone.
pub fn format_change(value: Option<f64>) -> ChangeCell {
    match value.filter(|v| v.is_finite()) {
        Some(v) => ChangeCell {
            text: format!("{:.2}%", v),
            tone: if v >= 0.0 {
                Tone::Success
            } else {
                Tone::Danger
            },
        },
        None => ChangeCell {
            text: "-".to_string(),
            tone: Tone::Success,
        },
    }
}

pub fn change_cell(historical: Option<&HistoricalEntry>, window: ChangeWindow) -> ChangeCell {
    format_change(historical.and_then(|h| h.change(window)))
}

/// Format a number with thousands separators (e.g., 1234567.891 -> "1,234,567.89")
pub fn format_with_thousands(n: f64, decimals: usize) -> String {
    let formatted = format!("{:.prec$}", n.abs(), prec = decimals);
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (formatted.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut result = String::new();
    if n < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        result.push('-');
    }
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    match frac_part {
        Some(frac) => format!("{}.{}", result, frac),
        None => result,
    }
}

/// US-dollar amount like `$1,234.56`, or `-` when absent
pub fn format_currency(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => {
            let formatted = format_with_thousands(v, 2);
            match formatted.strip_prefix('-') {
                Some(abs) => format!("-${}", abs),
                None => format!("${}", formatted),
            }
        },
        None => "-".to_string(),
    }
}

pub fn name_text(set: &TokenSet) -> String {
    match set.symbol.as_deref().filter(|s| !s.is_empty()) {
        Some(symbol) => format!("{} ({})", set.name, symbol.to_uppercase()),
        None => set.name.clone(),
    }
}

/// Rendered content of one cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Name(String),
    Plain(String),
    Bold(String),
    Change(ChangeCell),
}

impl CellContent {
    pub fn text(&self) -> &str {
        match self {
            CellContent::Name(s) | CellContent::Plain(s) | CellContent::Bold(s) => s,
            CellContent::Change(change) => &change.text,
        }
    }
}

/// Build the cell for `column`, given the row and its historical entry
pub fn cell(column: Column, set: &TokenSet, historical: Option<&HistoricalEntry>) -> CellContent {
    match column {
        Column::Name => CellContent::Name(name_text(set)),
        Column::MarketCap => CellContent::Plain(format_currency(set.market_cap)),
        Column::Price => CellContent::Bold(format_currency(set.price_usd)),
        Column::Change(window) => CellContent::Change(change_cell(historical, window)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    /// `None` keeps the order the API returned
    pub column: Option<Column>,
    pub descending: bool,
}

impl SortState {
    /// API order, then each column in turn, then back to API order.
    /// Names start ascending, numbers descending.
    pub fn next_column(&self) -> Self {
        let next = match self.column {
            None => Some(COLUMNS[0]),
            Some(current) => COLUMNS
                .iter()
                .position(|c| *c == current)
                .and_then(|i| COLUMNS.get(i + 1).copied()),
        };
        Self {
            column: next,
            descending: !matches!(next, Some(Column::Name) | None),
        }
    }

    /// Indices into `sets` in display order. `historical[i]` belongs to
    /// `sets[i]`. Absent values always sort last.
    pub fn order(&self, sets: &[TokenSet], historical: &[HistoricalEntry]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..sets.len()).collect();
        let Some(column) = self.column else {
            return indices;
        };

        let directed = |ordering: Ordering| {
            if self.descending {
                ordering.reverse()
            } else {
                ordering
            }
        };

        if column == Column::Name {
            indices.sort_by(|&a, &b| {
                directed(
                    sets[a]
                        .name
                        .to_lowercase()
                        .cmp(&sets[b].name.to_lowercase()),
                )
            });
            return indices;
        }

        let value = |i: usize| column.numeric_value(&sets[i], historical.get(i));
        indices.sort_by(|&a, &b| match (value(a), value(b)) {
            (Some(x), Some(y)) => directed(x.total_cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        indices
    }

    /// Short description for the footer, e.g. `24h ↓`
    pub fn describe(&self, locale: Locale) -> Option<String> {
        self.column.map(|column| {
            let arrow = if self.descending {
                "↓"
            } else {
                "↑"
            };
            format!("{} {}", column.header(locale), arrow)
        })
    }
}
