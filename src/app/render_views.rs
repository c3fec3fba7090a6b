use chrono::Local;
use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::{cli::format_congratulation, constants::WHEEL_STYLE};

use super::{App, Status, ui_helpers, view_style};

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(size);

        self.render_wheel(f, columns[0]);
        self.render_side_panel(f, columns[1]);
    }

    fn render_wheel(&mut self, f: &mut Frame, area: Rect) {
        let clock = Local::now().format("%H:%M:%S").to_string();
        let border_color = self
            .result
            .as_ref()
            .map(|result| result.category.color)
            .unwrap_or(Color::White);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(Span::styled(
                    "rankwheel",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Left),
            )
            .title(
                Line::from(Span::styled(
                    clock.as_str(),
                    Style::default().fg(Color::White),
                ))
                .alignment(Alignment::Center),
            )
            .title(
                Line::from(Span::styled(
                    view_style::status_label(&self.status).to_string(),
                    view_style::status_style(&self.status),
                ))
                .alignment(Alignment::Right),
            )
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(area);
        f.render_widget(block, area);

        let layout = ui_helpers::wheel_layout(inner);
        let (cell_w, cell_h) = self.canvas.cell_size();
        if cell_w != layout.canvas.width as usize || cell_h != layout.canvas.height as usize {
            self.canvas.resize(layout.canvas.width, layout.canvas.height);
        }

        let pointer = Paragraph::new(Line::from(Span::styled(
            WHEEL_STYLE.pointer_glyph,
            Style::default()
                .fg(WHEEL_STYLE.pointer_color)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        f.render_widget(pointer, layout.pointer);

        let distribution = self.controller.distribution();
        let wheel = self.canvas.render(distribution, self.controller.offset());
        f.render_widget(Paragraph::new(wheel), layout.canvas);

        if distribution.is_empty() {
            let mid = Rect::new(
                layout.canvas.x,
                layout.canvas.y + layout.canvas.height / 2,
                layout.canvas.width,
                1.min(layout.canvas.height),
            );
            let notice = Paragraph::new(Span::styled(
                "No wheel data",
                Style::default()
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center);
            f.render_widget(notice, mid);
        }
    }

    fn render_side_panel(&self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(6),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_name_input(f, rows[0]);
        self.render_legend(f, rows[1]);
        self.render_result(f, rows[2]);

        let help = Paragraph::new(Line::from(Span::styled(
            "enter spin · esc quit",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        f.render_widget(help, rows[3]);
    }

    fn render_name_input(&self, f: &mut Frame, area: Rect) {
        let border_color = if matches!(self.status, Status::Prompt(_)) {
            Color::LightYellow
        } else {
            Color::DarkGray
        };

        let input = Paragraph::new(Line::from(vec![
            Span::styled(self.username.as_str(), Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::Gray)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title("hunter name")
                .border_style(Style::default().fg(border_color)),
        );
        f.render_widget(input, area);
    }

    fn render_result(&self, f: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();

        if let Some(result) = &self.result {
            let text_color = view_style::text_color_for_bg(result.category.color);
            lines.push(Line::from(Span::styled(
                format_congratulation(&result.player, &result.category.name, result.percent),
                Style::default()
                    .fg(text_color)
                    .bg(result.category.color)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                result.at.format("%Y-%m-%d %H:%M:%S").to_string(),
                Style::default().fg(Color::Gray),
            )));
        }

        match &self.status {
            Status::Prompt(message) | Status::Error(message) => {
                lines.push(Line::from(Span::styled(
                    message.clone(),
                    view_style::status_style(&self.status),
                )));
            }
            Status::Ready | Status::Spinning => {}
        }

        if let Some(error) = &self.config_error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("result")
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(paragraph, area);
    }
}
