use std::{
    io,
    time::{Duration, Instant},
};

use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{
    canvas::WheelCanvas,
    cli::WheelOptions,
    constants::TIME_SETTINGS,
    domain::{Category, WeightConfig},
    error::SpinRejection,
    storage,
    wheel::{AngleResolver, WheelController},
};

mod event_handlers;
mod legend_view;
mod render_views;
mod spin_feed;
mod ui_helpers;
mod view_style;

use spin_feed::SpinFeed;

const MAX_NAME_CHARS: usize = 24;

#[derive(Clone, Debug, PartialEq)]
enum Status {
    Ready,
    Spinning,
    Prompt(String),
    Error(String),
}

#[derive(Clone, Debug)]
struct SpinResult {
    player: String,
    category: Category,
    percent: f64,
    at: DateTime<Local>,
}

struct App {
    controller: WheelController,
    canvas: WheelCanvas,
    feed: SpinFeed,
    username: String,
    pending_player: String,
    status: Status,
    result: Option<SpinResult>,
    config_error: Option<String>,
    render_needed: bool,
}

impl App {
    fn new(options: &WheelOptions, width: u16, height: u16) -> Self {
        let (config, config_error) = match storage::load_weight_config(&options.categories_path) {
            Ok(config) => (config, None),
            Err(e) => {
                log::error!("could not load categories: {}", e);
                (WeightConfig::default(), Some(e.to_string()))
            }
        };

        Self::with_config(&config, options, config_error, width, height)
    }

    fn with_config(
        config: &WeightConfig,
        options: &WheelOptions,
        config_error: Option<String>,
        width: u16,
        height: u16,
    ) -> Self {
        let controller =
            WheelController::new(config, AngleResolver::default(), options.animator());
        let status = if controller.can_spin() {
            Status::Ready
        } else {
            Status::Error("Wheel could not be initialized. Check the rank table.".to_string())
        };

        Self {
            controller,
            canvas: WheelCanvas::new(width, height),
            feed: SpinFeed::default(),
            username: String::new(),
            pending_player: String::new(),
            status,
            result: None,
            config_error,
            render_needed: true,
        }
    }

    fn start_spin(&mut self, now: Instant) {
        if self.controller.is_spinning() {
            return;
        }

        if !self.controller.can_spin() {
            self.status = Status::Error("Rank data is not loaded.".to_string());
            self.render_needed = true;
            return;
        }

        let player = self.username.trim().to_string();
        if player.is_empty() {
            self.status = Status::Prompt("Please enter your name, Hunter!".to_string());
            self.render_needed = true;
            return;
        }

        match self.controller.request_spin(&mut rand::thread_rng(), now) {
            Ok(_) => {
                self.pending_player = player;
                self.result = None;
                self.status = Status::Spinning;
            }
            Err(SpinRejection::AlreadySpinning) => {}
            Err(SpinRejection::NoCategories) => {
                self.status = Status::Error("Could not pick a rank.".to_string());
            }
        }
        self.render_needed = true;
    }

    fn update(&mut self, now: Instant) {
        self.controller.tick(now, &mut self.feed);
        if self.feed.take_dirty() {
            self.render_needed = true;
        }

        if let Some(category) = self.feed.take_completed() {
            let percent = self
                .controller
                .distribution()
                .percentage(&category.key)
                .unwrap_or_default();
            self.result = Some(SpinResult {
                player: std::mem::take(&mut self.pending_player),
                category,
                percent,
                at: Local::now(),
            });
            self.status = Status::Ready;
            self.render_needed = true;
        }
    }
}

pub fn run_ui(options: &WheelOptions) -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut app = App::new(options, size.width, size.height);

    let render_rate = Duration::from_millis(1000 / TIME_SETTINGS.target_fps);
    let clock_rate = Duration::from_secs(1);
    let mut last_render = Instant::now();
    let mut last_clock = Instant::now();

    loop {
        app.update(Instant::now());

        if last_clock.elapsed() >= clock_rate {
            app.render_needed = true;
            last_clock = Instant::now();
        }

        if last_render.elapsed() >= render_rate && app.render_needed {
            terminal.draw(|f| {
                app.draw_frame(f);
            })?;
            app.render_needed = false;
            last_render = Instant::now();
        }

        if event::poll(Duration::from_millis(TIME_SETTINGS.poll_ms))? {
            match event::read()? {
                Event::Key(key) if app.handle_key(key) => break,
                Event::Resize(_, _) => app.render_needed = true,
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ratatui::style::Color;

    use super::*;

    fn options() -> WheelOptions {
        WheelOptions {
            categories_path: PathBuf::from("/nonexistent/categories.csv"),
            duration: Duration::from_millis(500),
            rotations: 2,
        }
    }

    fn app_with(config: &WeightConfig) -> App {
        App::with_config(config, &options(), None, 40, 20)
    }

    #[test]
    fn test_spin_without_name_prompts_and_keeps_wheel_still() {
        let mut app = app_with(&WeightConfig::default_ranks());
        app.start_spin(Instant::now());

        assert!(matches!(app.status, Status::Prompt(_)));
        assert!(!app.controller.is_spinning());
        assert_eq!(app.controller.offset(), 0.0);
    }

    #[test]
    fn test_spin_runs_to_result() {
        let mut app = app_with(&WeightConfig::default_ranks());
        app.username = "  Jin ".to_string();
        let start = Instant::now();

        app.start_spin(start);
        assert_eq!(app.status, Status::Spinning);

        app.update(start + Duration::from_millis(250));
        assert!(app.result.is_none());

        app.update(start + Duration::from_millis(500));
        let result = app.result.as_ref().expect("spin should finish");
        assert_eq!(result.player, "Jin");
        assert_eq!(app.status, Status::Ready);
        assert_eq!(
            app.controller
                .distribution()
                .percentage(&result.category.key),
            Some(result.percent)
        );
    }

    #[test]
    fn test_second_enter_while_spinning_is_ignored() {
        let config = WeightConfig::new(vec![
            Category::new("a", "A", 1.0, Color::Red),
            Category::new("b", "B", 1.0, Color::Blue),
        ])
        .unwrap();
        let mut app = app_with(&config);
        app.username = "Jin".to_string();
        let start = Instant::now();

        app.start_spin(start);
        let phase = app.controller.state().phase;
        app.username = "Someone else".to_string();
        app.start_spin(start + Duration::from_millis(10));

        assert_eq!(app.controller.state().phase, phase);
        assert_eq!(app.pending_player, "Jin");
    }

    #[test]
    fn test_empty_table_cannot_spin() {
        let mut app = app_with(&WeightConfig::default());
        assert!(matches!(app.status, Status::Error(_)));

        app.username = "Jin".to_string();
        app.start_spin(Instant::now());
        assert!(matches!(app.status, Status::Error(_)));
        assert!(!app.controller.is_spinning());
    }
}
