use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, MAX_NAME_CHARS, Status};

impl App {
    /// Returns true when the app should exit.
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => true,
            KeyCode::Char('c') if ctrl => true,
            KeyCode::Char('q') if self.username.is_empty() => true,
            KeyCode::Enter => {
                self.start_spin(Instant::now());
                false
            }
            KeyCode::Backspace => {
                self.username.pop();
                self.clear_prompt();
                false
            }
            KeyCode::Char(c) => {
                if self.username.chars().count() < MAX_NAME_CHARS {
                    self.username.push(c);
                }
                self.clear_prompt();
                false
            }
            _ => false,
        }
    }

    fn clear_prompt(&mut self) {
        if matches!(self.status, Status::Prompt(_)) {
            self.status = Status::Ready;
        }
        self.render_needed = true;
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::{cli::WheelOptions, domain::WeightConfig};

    fn app() -> App {
        let options = WheelOptions {
            categories_path: PathBuf::from("/nonexistent/categories.csv"),
            duration: Duration::from_secs(5),
            rotations: 7,
        };
        App::with_config(&WeightConfig::default_ranks(), &options, None, 40, 20)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_typing_edits_name() {
        let mut app = app();
        for c in "Jinn".chars() {
            assert!(!press(&mut app, KeyCode::Char(c)));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.username, "Jin");
    }

    #[test]
    fn test_q_quits_only_with_empty_name() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.username, "aq");

        let mut empty = self::app();
        assert!(press(&mut empty, KeyCode::Char('q')));
        assert!(press(&mut empty, KeyCode::Esc));
    }

    #[test]
    fn test_name_is_capped() {
        let mut app = app();
        for _ in 0..MAX_NAME_CHARS + 5 {
            press(&mut app, KeyCode::Char('x'));
        }
        assert_eq!(app.username.chars().count(), MAX_NAME_CHARS);
    }

    #[test]
    fn test_typing_clears_name_prompt() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.status, Status::Prompt(_)));

        press(&mut app, KeyCode::Char('J'));
        assert_eq!(app.status, Status::Ready);
    }

    #[test]
    fn test_enter_starts_spin() {
        let mut app = app();
        press(&mut app, KeyCode::Char('J'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status, Status::Spinning);
        assert!(app.controller.is_spinning());
    }
}
