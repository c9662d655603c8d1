use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.summary.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No records yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Record some income first, then the per-remark totals show here",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Summary ", theme::title_style()));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Remark", "Total"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .summary
        .iter()
        .enumerate()
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, (remark, total))| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(truncate(remark, 40)),
                Cell::from(Span::styled(format_amount(*total), theme::amount_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [Constraint::Min(24), Constraint::Length(16)];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Summary ({} remarks) ", app.summary.len()),
                theme::title_style(),
            )),
    );

    f.render_widget(table, area);
}
