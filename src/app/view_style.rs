use ratatui::style::{Color, Modifier, Style};

use super::Status;

pub(super) fn text_color_for_bg(bg_color: Color) -> Color {
    if let Color::Rgb(r, g, b) = bg_color {
        let brightness = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
        if brightness > 128 {
            Color::Black
        } else {
            Color::White
        }
    } else {
        Color::White
    }
}

pub(super) fn status_style(status: &Status) -> Style {
    match status {
        Status::Ready => Style::default().fg(Color::Gray),
        Status::Spinning => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Status::Prompt(_) => Style::default().fg(Color::LightYellow),
        Status::Error(_) => Style::default().fg(Color::Red),
    }
}

pub(super) fn status_label(status: &Status) -> &str {
    match status {
        Status::Ready => "Ready",
        Status::Spinning => "Spinning...",
        Status::Prompt(message) | Status::Error(message) => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_color_for_bg() {
        assert_eq!(text_color_for_bg(Color::Rgb(0xFF, 0xD7, 0x00)), Color::Black);
        assert_eq!(text_color_for_bg(Color::Rgb(0x40, 0x40, 0x40)), Color::White);
        assert_eq!(text_color_for_bg(Color::Blue), Color::White);
    }

    #[test]
    fn test_status_label_uses_message() {
        let status = Status::Prompt("Please enter your name, Hunter!".to_string());
        assert_eq!(status_label(&status), "Please enter your name, Hunter!");
        assert_eq!(status_label(&Status::Spinning), "Spinning...");
    }
}
