use std::collections::HashMap;

use ratatui::{
    prelude::{Line, Span},
    style::{Color, Stylize},
};

use crate::{
    constants::{BRAILLE, WHEEL_STYLE},
    wheel::Distribution,
};

/// Rasterizes the wheel into braille cells. Each cell is `dot_width` by
/// `dot_height` dots; with terminal cells about twice as tall as wide the
/// dots come out square, so the wheel stays round.
pub struct WheelCanvas {
    pub width: u16,
    pub height: u16,
}

impl WheelCanvas {
    pub fn new(width: u16, height: u16) -> Self {
        let mut canvas = Self {
            width: 0,
            height: 0,
        };
        canvas.resize(width, height);
        canvas
    }

    /// Sizes are in terminal cells; stored in dots.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width.saturating_mul(BRAILLE.dot_width as u16);
        self.height = height.saturating_mul(BRAILLE.dot_height as u16);
    }

    pub fn cell_size(&self) -> (usize, usize) {
        (
            self.width as usize / BRAILLE.dot_width,
            self.height as usize / BRAILLE.dot_height,
        )
    }

    fn geometry(&self) -> (f64, f64, f64) {
        let w = self.width as f64;
        let h = self.height as f64;
        let radius = (w.min(h) / 2.0 - 1.0).max(0.0);
        (w / 2.0, h / 2.0, radius)
    }

    /// Color of the dot at `(x, y)`, or `None` outside the wheel.
    pub fn dot_color(
        &self,
        x: usize,
        y: usize,
        distribution: &Distribution,
        offset: f64,
    ) -> Option<Color> {
        let (cx, cy, radius) = self.geometry();
        let dx = x as f64 + 0.5 - cx;
        let dy = y as f64 + 0.5 - cy;
        let distance = (dx * dx + dy * dy).sqrt();

        if radius <= 0.0 || distance > radius {
            return None;
        }
        if distance <= radius * WHEEL_STYLE.hub_ratio {
            return Some(WHEEL_STYLE.hub_color);
        }

        // screen y grows downward, so atan2 already runs clockwise from 3 o'clock
        let screen_angle = dy.atan2(dx).to_degrees();
        let Some(index) = distribution.segment_at(screen_angle + offset) else {
            return Some(WHEEL_STYLE.empty_color);
        };
        Some(distribution.entries()[index].category.color)
    }

    pub fn render(&self, distribution: &Distribution, offset: f64) -> Vec<Line<'static>> {
        let (cell_w, cell_h) = self.cell_size();
        let mut lines: Vec<Line<'static>> = Vec::with_capacity(cell_h);

        for cy in 0..cell_h {
            let mut spans: Vec<Span<'static>> = Vec::with_capacity(cell_w);

            for cx in 0..cell_w {
                let mut dots = 0u8;
                let mut counts: HashMap<(u8, u8, u8), usize> = HashMap::new();

                for dy in 0..BRAILLE.dot_height {
                    for dx in 0..BRAILLE.dot_width {
                        let gx = cx * BRAILLE.dot_width + dx;
                        let gy = cy * BRAILLE.dot_height + dy;

                        if let Some(color) = self.dot_color(gx, gy, distribution, offset) {
                            dots |= 1 << braille_dot_index(dx, dy);
                            *counts.entry(rgb(color)).or_insert(0) += 1;
                        }
                    }
                }

                let color = blend(&counts).unwrap_or(Color::White);
                let ch = char::from_u32(BRAILLE.base + dots as u32).unwrap_or(' ');
                spans.push(Span::raw(ch.to_string()).fg(color));
            }

            lines.push(Line::from(spans));
        }

        lines
    }
}

fn braille_dot_index(dx: usize, dy: usize) -> u8 {
    match (dx, dy) {
        (0, 0) => 0,
        (0, 1) => 1,
        (0, 2) => 2,
        (0, 3) => 6,
        (1, 0) => 3,
        (1, 1) => 4,
        (1, 2) => 5,
        (1, 3) => 7,
        _ => 0,
    }
}

fn rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Red => (255, 0, 0),
        Color::Green => (0, 255, 0),
        Color::Blue => (0, 0, 255),
        Color::Gray => (128, 128, 128),
        Color::Black => (0, 0, 0),
        _ => (255, 255, 255),
    }
}

fn blend(counts: &HashMap<(u8, u8, u8), usize>) -> Option<Color> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return None;
    }

    let mut blended_r = 0f32;
    let mut blended_g = 0f32;
    let mut blended_b = 0f32;
    for ((r, g, b), count) in counts {
        let weight = *count as f32 / total as f32;
        blended_r += *r as f32 * weight;
        blended_g += *g as f32 * weight;
        blended_b += *b as f32 * weight;
    }

    Some(Color::Rgb(
        blended_r.round() as u8,
        blended_g.round() as u8,
        blended_b.round() as u8,
    ))
}
