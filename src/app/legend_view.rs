use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
};

use super::{App, ui_helpers, view_style};

const LABEL_CHARS: usize = 16;

impl App {
    /// Lists every rank with its share; the one under the pointer is highlighted.
    pub(super) fn render_legend(&self, f: &mut Frame, area: Rect) {
        let distribution = self.controller.distribution();
        let under_pointer = self
            .controller
            .resolver()
            .segment_under_pointer(distribution, self.controller.offset());

        let items: Vec<ListItem> = distribution
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let category = &entry.category;
                let dot = if entry.effective_weight > 0.0 { "● " } else { "◯ " };
                let label = ui_helpers::truncate_label(&category.name, LABEL_CHARS);
                let percent = ui_helpers::format_percent(entry.percentage);

                if Some(i) == under_pointer {
                    let text_color = view_style::text_color_for_bg(category.color);
                    ListItem::new(Line::from(vec![
                        Span::raw(dot).fg(text_color),
                        Span::raw(format!("{:<width$}", label, width = LABEL_CHARS)),
                        Span::raw(format!(" {:>7}", percent)),
                    ]))
                    .style(Style::default().fg(text_color).bg(category.color))
                } else {
                    ListItem::new(Line::from(vec![
                        Span::raw(dot).fg(category.color),
                        Span::raw(format!("{:<width$}", label, width = LABEL_CHARS))
                            .fg(Color::White),
                        Span::raw(format!(" {:>7}", percent)).fg(Color::Gray),
                    ]))
                }
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(under_pointer);

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(Line::from(Span::styled(
                        "ranks",
                        Style::default().fg(Color::White),
                    )))
                    .title_alignment(Alignment::Center)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(Style::default());

        f.render_stateful_widget(list, area, &mut list_state);
    }
}
