use ratatui::layout::Rect;

/// Where the pointer row and the wheel go inside the wheel panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelLayout {
    pub pointer: Rect,
    pub canvas: Rect,
}

/// Keeps the canvas about twice as wide as tall in cells, which is square
/// in braille dots, and puts the pointer row right above it.
pub fn wheel_layout(area: Rect) -> WheelLayout {
    let usable_height = area.height.saturating_sub(1);
    let canvas_height = usable_height.min(area.width / 2).max(1);
    let canvas_width = (canvas_height * 2).min(area.width);

    let x = area.x + (area.width.saturating_sub(canvas_width)) / 2;
    let block_height = canvas_height + 1;
    let y = area.y + (area.height.saturating_sub(block_height)) / 2;

    WheelLayout {
        pointer: Rect::new(x, y, canvas_width, 1.min(area.height)),
        canvas: Rect::new(x, y + 1, canvas_width, canvas_height.min(usable_height)),
    }
}

pub fn truncate_label(value: &str, max_chars: usize) -> String {
    let count = value.chars().count();
    if count <= max_chars {
        return value.to_string();
    }

    if max_chars <= 3 {
        return value.chars().take(max_chars).collect();
    }

    let prefix: String = value.chars().take(max_chars - 3).collect();
    format!("{}...", prefix)
}

pub fn format_percent(percent: f64) -> String {
    format!("{:.2}%", percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_layout_is_square_in_dots_and_centered() {
        let layout = wheel_layout(Rect::new(0, 0, 80, 21));
        assert_eq!(layout.canvas.height, 20);
        assert_eq!(layout.canvas.width, 40);
        assert_eq!(layout.canvas.x, 20);
        assert_eq!(layout.pointer.y + 1, layout.canvas.y);
        assert_eq!(layout.pointer.width, layout.canvas.width);
    }

    #[test]
    fn test_wheel_layout_narrow_area_is_width_bound() {
        let layout = wheel_layout(Rect::new(2, 3, 20, 40));
        assert_eq!(layout.canvas.width, 20);
        assert_eq!(layout.canvas.height, 10);
        assert_eq!(layout.canvas.x, 2);
    }

    #[test]
    fn test_wheel_layout_tiny_area_does_not_underflow() {
        let layout = wheel_layout(Rect::new(0, 0, 1, 1));
        assert!(layout.canvas.width <= 1);
        assert_eq!(layout.canvas.height, 0);
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("National Level", 20), "National Level");
        assert_eq!(truncate_label("National Level", 8), "Natio...");
        assert_eq!(truncate_label("National Level", 3), "Nat");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.5), "0.50%");
        assert_eq!(format_percent(35.0), "35.00%");
    }
}
