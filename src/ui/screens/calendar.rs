use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::report::calendar::day_key_for;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(8)])
        .split(area);

    render_grid(f, chunks[0], app);
    render_day_detail(f, chunks[1], app);
}

fn render_grid(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .cal_grid
        .iter()
        .map(|week| {
            let cells: Vec<Cell> = week
                .iter()
                .map(|&day| {
                    if day == 0 {
                        // Blank slot outside the month
                        return Cell::from("");
                    }

                    let key = day_key_for(app.cal_year, app.cal_month, day);
                    let total = app.buckets.get(&key).map(|b| b.total);

                    let mut lines = vec![Line::from(day.to_string())];
                    match total {
                        Some(t) if t > Decimal::ZERO => {
                            lines.push(Line::from(Span::styled(
                                format_amount(t),
                                theme::amount_style(),
                            )));
                        }
                        _ => lines.push(Line::from("")),
                    }

                    let cell = Cell::from(Text::from(lines));
                    if day == app.cal_day {
                        cell.style(theme::selected_style())
                    } else {
                        cell.style(theme::normal_style())
                    }
                })
                .collect();
            Row::new(cells).height(2)
        })
        .collect();

    let widths = [Constraint::Ratio(1, 7); 7];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" {:04}-{:02} ", app.cal_year, app.cal_month),
                theme::title_style(),
            )),
    );

    f.render_widget(table, area);
}

fn render_day_detail(f: &mut Frame, area: Rect, app: &App) {
    let (title, lines) = match &app.selected_day {
        Some(day) => match app.buckets.get(day) {
            Some(bucket) if !bucket.entries.is_empty() => {
                let count = bucket.entries.len();
                let mut lines = vec![Line::from(Span::styled(
                    format!("Total {}", format_amount(bucket.total)),
                    theme::amount_style(),
                ))];
                for entry in &bucket.entries {
                    lines.push(Line::from(Span::styled(
                        entry.clone(),
                        theme::normal_style(),
                    )));
                }
                (
                    format!(
                        " {day} ({count} record{}) ",
                        if count == 1 { "" } else { "s" }
                    ),
                    lines,
                )
            }
            _ => (
                format!(" {day} "),
                vec![Line::from(Span::styled(
                    "No records for this day",
                    theme::dim_style(),
                ))],
            ),
        },
        None => (
            " Day detail ".to_string(),
            vec![Line::from(Span::styled(
                "Move with h/l/j/k, press Enter to inspect a day",
                theme::dim_style(),
            ))],
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(title, theme::title_style()));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
