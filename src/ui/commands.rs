use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::ledger::Ledger;
use crate::report::calendar;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit CashLog", cmd_quit, r);
    register_command!("quit", "Quit CashLog", cmd_quit, r);
    register_command!("records", "Go to Records", cmd_records, r);
    register_command!("r", "Go to Records", cmd_records, r);
    register_command!("summary", "Go to Summary", cmd_summary, r);
    register_command!("s", "Go to Summary", cmd_summary, r);
    register_command!("calendar", "Go to Calendar", cmd_calendar, r);
    register_command!("c", "Go to Calendar", cmd_calendar, r);
    register_command!(
        "add",
        "Record income (e.g. :add 120.50 freelance)",
        cmd_add,
        r
    );
    register_command!("a", "Record income (e.g. :a 120.50 freelance)", cmd_add, r);
    register_command!("delete", "Delete selected record", cmd_delete, r);
    register_command!(
        "export",
        "Export records to CSV (e.g. :export ~/income.csv)",
        cmd_export,
        r
    );
    register_command!(
        "month",
        "Show calendar month (e.g. :month 2026-03 or :month 3)",
        cmd_month,
        r
    );
    register_command!("m", "Show calendar month (e.g. :m 3)", cmd_month, r);
    register_command!("year", "Show calendar year (e.g. :year 2024)", cmd_year, r);
    register_command!("next-month", "Go to next calendar month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous calendar month", cmd_prev_month, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| edit_distance(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, &ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(diagonal + 1).min(row[j] + 1);
        }
    }

    row[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_records(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Records;
    app.refresh_records(ledger);
    Ok(())
}

fn cmd_summary(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Summary;
    app.refresh_summary(ledger);
    Ok(())
}

fn cmd_calendar(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Calendar;
    app.refresh_calendar(ledger);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add <amount> [remark]");
        return Ok(());
    }

    let mut parts = args.splitn(2, ' ');
    let amount = parts.next().unwrap_or("");
    let remark = parts.next().unwrap_or("").trim();

    match ledger.append(amount, remark) {
        Ok(_) => {
            let line = ledger
                .records()
                .last()
                .map(|r| r.entry_line())
                .unwrap_or_default();
            app.refresh_all(ledger);
            app.set_status(format!("Recorded {line}"));
        }
        Err(e) => app.set_status(format!("{e}")),
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    if app.screen != Screen::Records || app.records.is_empty() {
        app.set_status("Navigate to Records and select one first");
        return Ok(());
    }

    if let Some(record) = app.selected_record() {
        let line = format!("{}  {}", record.timestamp, record.entry_line());
        let id = record.id;
        app.confirm_message = format!("Delete '{line}'?");
        app.pending_action = Some(PendingAction::DeleteRecord { id, line });
        app.input_mode = InputMode::Confirm;
    }

    Ok(())
}

fn cmd_export(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/cashlog-export.csv")
    } else {
        crate::run::shellexpand(args)
    };

    match ledger.export(std::path::Path::new(&path)) {
        Ok(0) => app.set_status(format!("No records yet — wrote header only to {path}")),
        Ok(count) => app.set_status(format!("Exported {count} records to {path}")),
        Err(e) => app.set_status(format!("Export failed: {e}")),
    }
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :month <1-12> or :month YYYY-MM");
        return Ok(());
    }

    let (year, month) = if let Some((y, m)) = args.split_once('-') {
        match (y.parse::<i32>(), m.parse::<u32>()) {
            (Ok(y), Ok(m)) => (y, m),
            _ => {
                app.set_status("Invalid month. Use YYYY-MM (e.g. 2026-03)");
                return Ok(());
            }
        }
    } else {
        match args.parse::<u32>() {
            Ok(m) => (app.cal_year, m),
            Err(_) => {
                app.set_status("Invalid month. Use YYYY-MM (e.g. 2026-03)");
                return Ok(());
            }
        }
    };

    if !(1..=12).contains(&month) {
        app.set_status("Month must be 1-12");
        return Ok(());
    }
    let range = calendar::year_range();
    if !range.contains(&year) {
        app.set_status(format!(
            "Year must be between {} and {}",
            range.start(),
            range.end()
        ));
        return Ok(());
    }

    app.cal_year = year;
    app.cal_month = month;
    app.selected_day = None;
    app.screen = Screen::Calendar;
    app.refresh_calendar(ledger);
    app.set_status(format!("Calendar: {year:04}-{month:02}"));
    Ok(())
}

fn cmd_year(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let range = calendar::year_range();
    match args.parse::<i32>() {
        Ok(year) if range.contains(&year) => {
            app.cal_year = year;
            app.selected_day = None;
            app.screen = Screen::Calendar;
            app.refresh_calendar(ledger);
            app.set_status(format!("Calendar: {year}"));
        }
        _ => {
            app.set_status(format!(
                "Usage: :year <{}-{}>",
                range.start(),
                range.end()
            ));
        }
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.move_cal_month(1);
    app.screen = Screen::Calendar;
    app.refresh_calendar(ledger);
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.move_cal_month(-1);
    app.screen = Screen::Calendar;
    app.refresh_calendar(ledger);
    Ok(())
}
