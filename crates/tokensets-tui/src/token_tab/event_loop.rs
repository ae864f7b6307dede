//! Main event loop for the token-set TUI

use {
    super::{
        fetch::{begin_fetch_if_due, spawn_tab_fetch},
        keys::{KeyAction, handle_key},
        layout::{app_layout, card_row_at, is_wide, tab_at, table_row_at},
        logging::{log_debug, log_error, log_info},
        navigation::{open_url, row_url},
        render::render,
        state::AppState,
    },
    ratatui::{Terminal, backend::CrosstermBackend, layout::Rect},
    std::{io, sync::Arc},
    tokensets_api::TokenSetsSource,
    tokio::sync::Mutex as TokioMutex,
};

/// Open the selected row of the active tab, if any
fn open_selected(app: &AppState) {
    let tab = app.active();
    let Some(set) = tab.selected_set() else {
        return;
    };
    let url = row_url(tab.key, &set.id);
    match open_url(&url) {
        Ok(()) => log_info!("Opened {}", url),
        Err(_e) => log_error!("Failed to open {}: {}", url, _e),
    }
}

/// Handle a left click: tab bar switches tabs, a row selects and opens it
fn handle_click(app: &mut AppState, screen: Rect, column: u16, row: u16) {
    let layout = app_layout(screen, app.show_logs);

    if let Some(key) = tab_at(column, row, layout.header, app.locale) {
        log_debug!("Tab {} clicked", key.as_str());
        app.switch_tab(key);
        return;
    }

    let wide = is_wide(layout.content.width, app.breakpoint);
    let tab = app.active_mut();
    if tab.is_empty() || tab.is_loading() {
        return;
    }
    let clicked = if wide {
        table_row_at(column, row, layout.content, tab.table_state.offset())
    } else {
        card_row_at(column, row, layout.content, tab.card_offset)
    };
    if let Some(index) = clicked
        && index < tab.len()
    {
        tab.select(index);
        open_selected(app);
    }
}

pub async fn run_token_sets_tui(
    mut terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app_state: Arc<TokioMutex<AppState>>,
    source: Arc<dyn TokenSetsSource>,
) -> anyhow::Result<()> {
    use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

    log_info!("Starting token sets TUI");

    loop {
        {
            let mut app = app_state.lock().await;
            app.tick = app.tick.wrapping_add(1);

            if let Some((key, generation)) = begin_fetch_if_due(&mut app) {
                spawn_tab_fetch(Arc::clone(&app_state), Arc::clone(&source), key, generation);
            }

            terminal.draw(|f| {
                render(f, &mut app);
            })?;
        }

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let mut app = app_state.lock().await;
                    if handle_key(&mut app, key.code) == KeyAction::OpenSelected {
                        open_selected(&app);
                    }
                },
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    let size = terminal.size()?;
                    let screen = Rect::new(0, 0, size.width, size.height);
                    let mut app = app_state.lock().await;
                    handle_click(&mut app, screen, mouse.column, mouse.row);
                },
                _ => {},
            }
        }

        {
            let app = app_state.lock().await;
            if app.should_quit {
                break;
            }
        }
    }

    log_info!("Token sets TUI exiting");
    Ok(())
}
