//! Rendering for the token-set tabs

mod cards;
mod table;
pub mod utils;

use {
    super::{
        columns::{CellContent, ChangeCell},
        layout::{AppLayout, app_layout, is_wide, tab_title},
        state::{AppState, LoadState, TabKey},
    },
    crate::i18n::Locale,
    ratatui::{
        Frame,
        layout::{Alignment, Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, BorderType, Borders, Cell, Paragraph, Tabs, Wrap},
    },
    utils::{spinner_frame, tone_color},
};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let AppLayout {
        header,
        content,
        logs,
        footer,
    } = app_layout(f.area(), app.show_logs);

    render_header(f, app, header);
    render_tab_content(f, app, content);
    if let Some(logs_area) = logs {
        render_logs(f, app, logs_area);
    }
    render_footer(f, app, footer);
}

/// Arrow plus percentage, both in the tone colour
pub(super) fn change_spans(change: &ChangeCell) -> Vec<Span<'static>> {
    let style = Style::default().fg(tone_color(change.tone));
    vec![
        Span::styled(change.arrow(), style),
        Span::raw(" "),
        Span::styled(change.text.clone(), style),
    ]
}

pub(super) fn cell_widget(content: &CellContent) -> Cell<'static> {
    match content {
        CellContent::Name(text) => Cell::from(Span::styled(
            text.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        CellContent::Plain(text) => Cell::from(text.clone()),
        CellContent::Bold(text) => Cell::from(Span::styled(
            text.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        CellContent::Change(change) => Cell::from(Line::from(change_spans(change))),
    }
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    f.render_widget(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
        area,
    );

    let titles: Vec<String> = TabKey::ALL
        .iter()
        .map(|key| tab_title(*key, app.locale))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.active_tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let tabs_area = Rect {
        height: 1.min(area.height),
        ..area
    };
    f.render_widget(tabs, tabs_area);
}

fn render_tab_content(f: &mut Frame, app: &mut AppState, area: Rect) {
    let locale = app.locale;
    let breakpoint = app.breakpoint;
    let tick = app.tick;
    let tab = app.active_mut();
    let title = format!(" {} ", locale.t(tab.key.label_key()));

    let load_state = tab.load_state;
    match load_state {
        LoadState::Loading => render_loading(f, tab.key, tick, locale, area, title),
        LoadState::Idle => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(title);
            f.render_widget(block, area);
        },
        LoadState::Ready if tab.is_empty() => {
            let empty = Paragraph::new(locale.t("tokensets.empty"))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .title(title),
                )
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            f.render_widget(empty, area);
        },
        LoadState::Ready => {
            if is_wide(area.width, breakpoint) {
                table::render_table(f, tab, locale, area, title);
            } else {
                cards::render_cards(f, tab, locale, area, title);
            }
        },
    }
}

fn render_loading(f: &mut Frame, key: TabKey, tick: usize, locale: Locale, area: Rect, title: String) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .split(inner);

    let loading = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} {}…", spinner_frame(tick), locale.t("tokensets.loading")),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            format!("token-sets-{}", key.as_str()),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(loading, rows[1]);
}

fn render_logs(f: &mut Frame, app: &AppState, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .recent_logs(visible)
        .into_iter()
        .map(|log| {
            let color = if log.starts_with("[ERROR]") {
                Color::Red
            } else if log.starts_with("[WARN]") {
                Color::Yellow
            } else {
                Color::Gray
            };
            Line::from(Span::styled(log, Style::default().fg(color)))
        })
        .collect();

    let logs = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Logs "),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(logs, area);
}

fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let tab = app.active();
    let mut status = vec![Span::styled(
        format!("{} rows", tab.len()),
        Style::default().fg(Color::Cyan),
    )];
    if let Some(sort) = tab.sort.describe(app.locale) {
        status.push(Span::raw(" | "));
        status.push(Span::raw(format!(
            "{} {}",
            app.locale.t("tokensets.sortedBy"),
            sort
        )));
    }
    if let Some(updated) = tab.last_updated {
        status.push(Span::raw(" | "));
        status.push(Span::raw(format!(
            "{} {}",
            app.locale.t("tokensets.updated"),
            updated.format("%H:%M:%S")
        )));
    }
    status.push(Span::raw(" | "));
    status.push(Span::styled(
        super::keys::help_text(),
        Style::default().fg(Color::DarkGray),
    ));

    let footer = Paragraph::new(Line::from(status)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(footer, area);
}
