use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ledger::Ledger;
use crate::ui::app::{App, FormField, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_up};

pub(crate) fn as_tui(ledger: &mut Ledger) -> Result<()> {
    let mut app = App::new();
    app.refresh_all(ledger);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Rows available for the record table: tab, status and
            // command bars plus table borders and header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger)?,
                InputMode::Insert => handle_insert_input(key, app, ledger)?,
                InputMode::Command => handle_command_input(key, app, ledger)?,
                InputMode::Confirm => handle_confirm_input(key, app, ledger)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('1') => switch_screen(app, ledger, Screen::Records),
        KeyCode::Char('2') => switch_screen(app, ledger, Screen::Summary),
        KeyCode::Char('3') => switch_screen(app, ledger, Screen::Calendar),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, ledger, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, ledger, screens[prev]);
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('h') | KeyCode::Left if app.screen == Screen::Calendar => {
            app.move_cal_day(-1);
        }
        KeyCode::Char('l') | KeyCode::Right if app.screen == Screen::Calendar => {
            app.move_cal_day(1);
        }
        KeyCode::Char('H') if app.screen == Screen::Calendar => {
            app.move_cal_month(-1);
            app.refresh_calendar(ledger);
        }
        KeyCode::Char('L') if app.screen == Screen::Calendar => {
            app.move_cal_month(1);
            app.refresh_calendar(ledger);
        }
        KeyCode::Char('+') | KeyCode::Char('=') if app.screen == Screen::Calendar => {
            app.move_cal_year(1);
            app.refresh_calendar(ledger);
        }
        KeyCode::Char('-') if app.screen == Screen::Calendar => {
            app.move_cal_year(-1);
            app.refresh_calendar(ledger);
        }
        KeyCode::Char('a') => app.open_form(),
        KeyCode::Char('D') if app.screen == Screen::Records => {
            commands::handle_command("delete", app, ledger)?;
        }
        KeyCode::Char('g') if app.screen == Screen::Records => {
            app.record_index = 0;
            app.record_scroll = 0;
        }
        KeyCode::Char('G') if app.screen == Screen::Records => {
            if !app.records.is_empty() {
                app.record_index = app.records.len() - 1;
                let page = app.visible_rows.max(1);
                app.record_scroll = app.record_index.saturating_sub(page - 1);
            }
        }
        KeyCode::Enter if app.screen == Screen::Calendar => {
            if !app.cal_grid.is_empty() {
                app.selected_day = Some(app.cursor_day_key());
            }
        }
        KeyCode::Esc => {
            if app.screen == Screen::Calendar && app.selected_day.is_some() {
                app.selected_day = None;
            } else {
                app.status_message.clear();
            }
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        _ => {}
    }
    Ok(())
}

fn handle_insert_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.form_field = match app.form_field {
                FormField::Amount => FormField::Remark,
                FormField::Remark => FormField::Amount,
            };
        }
        KeyCode::Enter => {
            let amount = app.form_amount.clone();
            let remark = app.form_remark.clone();
            match ledger.append(&amount, &remark) {
                Ok(_) => {
                    let line = ledger
                        .records()
                        .last()
                        .map(|r| r.entry_line())
                        .unwrap_or_default();
                    app.form_amount.clear();
                    app.form_remark.clear();
                    app.form_field = FormField::Amount;
                    app.input_mode = InputMode::Normal;
                    app.refresh_all(ledger);
                    app.set_status(format!("Recorded {line}"));
                }
                // Validation failure: stay in the form with input intact
                Err(e) => app.set_status(format!("{e}")),
            }
        }
        KeyCode::Esc => {
            app.form_amount.clear();
            app.form_remark.clear();
            app.input_mode = InputMode::Normal;
            app.set_status("Entry cancelled");
        }
        KeyCode::Backspace => {
            match app.form_field {
                FormField::Amount => app.form_amount.pop(),
                FormField::Remark => app.form_remark.pop(),
            };
        }
        KeyCode::Char(c) => match app.form_field {
            FormField::Amount => app.form_amount.push(c),
            FormField::Remark => app.form_remark.push(c),
        },
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, ledger)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteRecord { id, line } => {
                        ledger.delete(id)?;
                        app.refresh_all(ledger);
                        app.set_status(format!("Deleted: {line}"));
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, ledger: &mut Ledger, screen: Screen) {
    app.screen = screen;
    match screen {
        Screen::Records => app.refresh_records(ledger),
        Screen::Summary => app.refresh_summary(ledger),
        Screen::Calendar => app.refresh_calendar(ledger),
    }
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Records => {
            let page = app.visible_rows.max(1);
            scroll_down(
                &mut app.record_index,
                &mut app.record_scroll,
                app.records.len(),
                page,
            );
        }
        Screen::Calendar => app.move_cal_day(7),
        Screen::Summary => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Records => scroll_up(&mut app.record_index, &mut app.record_scroll),
        Screen::Calendar => app.move_cal_day(-7),
        Screen::Summary => {}
    }
}
