use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::{App, FormField, InputMode};
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.input_mode == InputMode::Insert {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(3)])
            .split(area);
        render_form(f, chunks[0], app);
        render_table(f, chunks[1], app);
    } else {
        render_table(f, area, app);
    }
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let field_style = |field: FormField| {
        if app.form_field == field {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        }
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" Amount: ", field_style(FormField::Amount)),
            Span::styled(&app.form_amount, theme::normal_style()),
        ]),
        Line::from(vec![
            Span::styled(" Remark: ", field_style(FormField::Remark)),
            Span::styled(&app.form_remark, theme::normal_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::GREEN))
        .title(Span::styled(" New record ", theme::title_style()));

    f.render_widget(Paragraph::new(lines).block(block), area);

    // Cursor at the end of the active input
    let (label, value, row) = match app.form_field {
        FormField::Amount => (" Amount: ", app.form_amount.chars().count(), 0u16),
        FormField::Remark => (" Remark: ", app.form_remark.chars().count(), 1u16),
    };
    let x = area.x + 1 + (label.len() + value) as u16;
    if x < area.x + area.width {
        f.set_cursor_position((x, area.y + 1 + row));
    }
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    if app.records.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No records yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to open the entry form, or use :add <amount> [remark]",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Records (0) ", theme::title_style()));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Recorded", "Amount", "Remark"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .records
        .iter()
        .enumerate()
        .skip(app.record_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, record)| {
            let style = if i == app.record_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(record.timestamp.clone()),
                Cell::from(Span::styled(
                    format_amount(record.amount),
                    theme::amount_style(),
                )),
                Cell::from(truncate(&record.remark, 40)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(20),
        Constraint::Length(14),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Records ({}) newest first ", app.records.len()),
                theme::title_style(),
            )),
    );

    f.render_widget(table, area);
}
