use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::RngCore;

use crate::clock::Clock;
use crate::controller::Controller;
use crate::runtime::AppEvent;
use crate::session::{AppState, TestDuration};
use crate::store::KeyValueStore;
use crate::view::{self, View};

/// What the event loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Binds terminal input to controller actions
pub struct App<S: KeyValueStore, C: Clock, R: RngCore> {
    pub controller: Controller<S, C, R>,
}

impl<S: KeyValueStore, C: Clock, R: RngCore> App<S, C, R> {
    pub fn new(controller: Controller<S, C, R>) -> Self {
        Self { controller }
    }

    pub fn view(&self) -> View {
        view::render(&self.controller.snapshot(), &self.controller.compute_metrics())
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Flow {
        // steady typing can keep the runner from ever timing out into a Tick,
        // so the countdown is polled on every event
        self.controller.poll_timer();
        match event {
            AppEvent::Tick | AppEvent::Resize => Flow::Continue,
            AppEvent::Paste(len) => {
                log::debug!("discarded paste of {len} chars");
                Flow::Continue
            }
            AppEvent::Key(key) => self.handle_key(key),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let ctl = &mut self.controller;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => return Flow::Quit,
            KeyCode::Char('t') if ctrl => {
                ctl.toggle_theme();
                return Flow::Continue;
            }
            KeyCode::Tab => {
                ctl.toggle_history();
                return Flow::Continue;
            }
            _ => {}
        }

        match ctl.state() {
            AppState::Home => match key.code {
                KeyCode::Char('1') => ctl.select_duration(TestDuration::Thirty),
                KeyCode::Char('2') => ctl.select_duration(TestDuration::Sixty),
                KeyCode::Char('3') => ctl.select_duration(TestDuration::OneTwenty),
                KeyCode::Left => ctl.cycle_duration(-1),
                KeyCode::Right => ctl.cycle_duration(1),
                KeyCode::Enter => ctl.start(),
                KeyCode::Char('t') => ctl.toggle_theme(),
                KeyCode::Char('h') => ctl.toggle_history(),
                KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
                _ => {}
            },
            AppState::Typing => match key.code {
                KeyCode::Esc => ctl.end_early(),
                KeyCode::Backspace => {
                    ctl.backspace();
                }
                KeyCode::Char(c)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    ctl.type_char(c);
                }
                _ => {}
            },
            AppState::Result => match key.code {
                KeyCode::Enter | KeyCode::Char('r') => ctl.start(),
                KeyCode::Esc | KeyCode::Char('b') => ctl.back_home(),
                KeyCode::Char('h') => ctl.toggle_history(),
                KeyCode::Char('t') => ctl.toggle_theme(),
                KeyCode::Char('q') => return Flow::Quit,
                _ => {}
            },
            AppState::History => match key.code {
                KeyCode::Esc | KeyCode::Char('h') => ctl.toggle_history(),
                _ => {}
            },
        }

        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FakeClock;
    use crate::sound::Muted;
    use crate::store::{MemoryStore, Persistence};
    use crate::theme::Theme;
    use crate::view::Body;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn app() -> (App<MemoryStore, FakeClock, StdRng>, FakeClock) {
        let clock = FakeClock::at_ms(0);
        let ctl = Controller::new(
            Persistence::new(MemoryStore::new()),
            clock.clone(),
            StdRng::seed_from_u64(9),
            Box::new(Muted),
        );
        (App::new(ctl), clock)
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> AppEvent {
        AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn home_keys_choose_duration_and_start() {
        let (mut app, _) = app();
        app.handle_event(key(KeyCode::Char('3')));
        assert_eq!(app.controller.selected_duration(), TestDuration::OneTwenty);
        app.handle_event(key(KeyCode::Right));
        assert_eq!(app.controller.selected_duration(), TestDuration::Thirty);
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(app.controller.state(), AppState::Typing);
        assert_eq!(app.controller.session().unwrap().duration, TestDuration::Thirty);
    }

    #[test]
    fn typing_keys_edit_input() {
        let (mut app, _) = app();
        app.handle_event(key(KeyCode::Enter));
        let first = app.controller.session().unwrap().reference.chars().next().unwrap();

        app.handle_event(key(KeyCode::Char(first)));
        app.handle_event(key(KeyCode::Char('~')));
        assert_eq!(app.controller.session().unwrap().typed_len(), 2);
        assert_eq!(app.controller.session().unwrap().errors, 1);

        app.handle_event(key(KeyCode::Backspace));
        assert_eq!(app.controller.session().unwrap().typed_len(), 1);

        // shortcuts are not typed
        app.handle_event(ctrl('t'));
        assert_eq!(app.controller.session().unwrap().typed_len(), 1);
        assert_eq!(app.controller.theme(), Theme::Light);
    }

    #[test]
    fn paste_is_discarded() {
        let (mut app, _) = app();
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(app.handle_event(AppEvent::Paste(40)), Flow::Continue);
        assert_eq!(app.controller.session().unwrap().typed_len(), 0);
    }

    #[test]
    fn escape_ends_early_then_returns_home() {
        let (mut app, _) = app();
        app.handle_event(key(KeyCode::Enter));
        app.handle_event(key(KeyCode::Esc));
        assert_eq!(app.controller.state(), AppState::Result);
        assert_eq!(app.controller.history().len(), 1);

        app.handle_event(key(KeyCode::Esc));
        assert_eq!(app.controller.state(), AppState::Home);
        assert_eq!(app.handle_event(key(KeyCode::Esc)), Flow::Quit);
    }

    #[test]
    fn retry_from_result() {
        let (mut app, _) = app();
        app.handle_event(key(KeyCode::Enter));
        app.handle_event(key(KeyCode::Esc));
        app.handle_event(key(KeyCode::Char('r')));
        assert_eq!(app.controller.state(), AppState::Typing);
    }

    #[test]
    fn tab_toggles_history_during_typing() {
        let (mut app, clock) = app();
        app.handle_event(key(KeyCode::Enter));
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.controller.state(), AppState::History);
        assert!(matches!(app.view().body, Body::History { .. }));

        // typing is not forwarded while history is shown
        app.handle_event(key(KeyCode::Char('x')));
        assert_eq!(app.controller.session().unwrap().typed_len(), 0);

        clock.advance_secs(3);
        app.handle_event(AppEvent::Tick);
        assert_eq!(app.controller.session().unwrap().time_left, 57);

        app.handle_event(key(KeyCode::Esc));
        assert_eq!(app.controller.state(), AppState::Typing);
    }

    #[test]
    fn countdown_advances_without_ticks() {
        let (mut app, clock) = app();
        app.handle_event(key(KeyCode::Enter));
        let first = app.controller.session().unwrap().reference.chars().next().unwrap();

        clock.advance_secs(2);
        app.handle_event(key(KeyCode::Char(first)));
        assert_eq!(app.controller.session().unwrap().time_left, 58);

        clock.advance_secs(1);
        app.handle_event(AppEvent::Resize);
        assert_eq!(app.controller.session().unwrap().time_left, 57);
    }

    #[test]
    fn ctrl_c_quits_anywhere() {
        let (mut app, _) = app();
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(app.handle_event(ctrl('c')), Flow::Quit);
    }

    #[test]
    fn q_types_during_a_test() {
        let (mut app, _) = app();
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(app.handle_event(key(KeyCode::Char('q'))), Flow::Continue);
        assert_eq!(app.controller.session().unwrap().typed_len(), 1);
    }
}
