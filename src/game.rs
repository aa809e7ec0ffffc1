//! Game loop glue
//!
//! `Game` owns the session state and the display-side objects built from it
//! (scoreboard, Play button). A front-end calls `update` then `render` once
//! per frame and acts on the returned `Flow`.

use std::time::Duration;

use crate::consts::{ALIEN_COLOR, LIFE_LOST_PAUSE, SHIP_COLOR};
use crate::platform::{Canvas, FixedAdvance, InputEvent, TextMetrics};
use crate::scoreboard::Scoreboard;
use crate::settings::Settings;
use crate::sim::{self, Applied, GamePhase, GameState, Rect, StepOutcome};
use crate::ui::Button;

/// What the front-end should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Present the frame, then hold for the duration before the next one
    Freeze(Duration),
    /// Quit requested
    Exit,
}

pub struct Game {
    state: GameState,
    scoreboard: Scoreboard,
    play_button: Button,
    metrics: Box<dyn TextMetrics>,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        Self::with_metrics(settings, Box::new(FixedAdvance::default()))
    }

    pub fn with_metrics(settings: Settings, metrics: Box<dyn TextMetrics>) -> Self {
        let state = GameState::new(settings);
        let screen = state.screen();
        let scoreboard = Scoreboard::new(
            screen,
            state.settings.bg_color,
            &state.stats,
            metrics.as_ref(),
        );
        let play_button = Button::new(screen, "Play", metrics.as_ref());

        log::info!(
            "Game ready: {}x{} screen, {} aliens per fleet",
            screen.w,
            screen.h,
            state.aliens.len()
        );

        Self {
            state,
            scoreboard,
            play_button,
            metrics,
        }
    }

    /// Apply this frame's input and advance the simulation one step
    pub fn update(&mut self, events: &[InputEvent]) -> Flow {
        for event in events {
            let Some(command) = sim::route(event) else {
                continue;
            };
            if sim::apply(&mut self.state, command, &self.play_button) == Applied::Exit {
                return Flow::Exit;
            }
        }

        let outcome = sim::tick(&mut self.state);

        let events = self.state.drain_events();
        if events.iter().any(|e| e.affects_score()) {
            let metrics = self.metrics.as_ref();
            self.scoreboard.prep_score(&self.state.stats, metrics);
            self.scoreboard.prep_high_score(&self.state.stats, metrics);
        }
        for event in &events {
            log::trace!("{:?}", event);
        }

        match outcome {
            StepOutcome::ShipLost => Flow::Freeze(LIFE_LOST_PAUSE),
            StepOutcome::Continue | StepOutcome::GameOver => Flow::Continue,
        }
    }

    /// Draw the whole frame: background, bullets, ship, fleet, scores and,
    /// outside a session, the Play button on top.
    pub fn render(&self, canvas: &mut impl Canvas) {
        let settings = &self.state.settings;
        canvas.fill(settings.bg_color);

        for bullet in &self.state.bullets {
            canvas.draw_rect(bullet.rect, settings.bullet_color);
        }
        canvas.draw_rect(self.state.ship.rect, SHIP_COLOR);
        for alien in &self.state.aliens {
            canvas.draw_rect(alien.rect, ALIEN_COLOR);
        }

        for label in self.scoreboard.labels() {
            canvas.draw_label(label);
        }

        if !self.state.is_active() {
            self.play_button.draw(canvas);
        }
    }

    /// Cursor is hidden during play
    pub fn cursor_visible(&self) -> bool {
        !self.state.is_active()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn play_button_rect(&self) -> Rect {
        self.play_button.rect
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.stats.score
    }

    pub fn high_score(&self) -> u64 {
        self.state.stats.high_score
    }

    pub fn ships_left(&self) -> u32 {
        self.state.stats.ships_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::DrawCall;
    use crate::platform::{HeadlessPlatform, Key, run, run_frame};
    use crate::sim::state::{Alien, Bullet};

    fn click_play(game: &Game) -> InputEvent {
        let rect = game.play_button_rect();
        InputEvent::MouseDown {
            x: rect.center_x(),
            y: rect.center_y(),
        }
    }

    #[test]
    fn test_quit_key_exits_before_render() {
        let mut game = Game::new(Settings::default());
        let mut platform = HeadlessPlatform::new();
        platform.push_frame(vec![InputEvent::KeyDown(Key::Q)]);

        assert_eq!(run_frame(&mut game, &mut platform), Flow::Exit);
        assert_eq!(platform.frames_presented, 0);
    }

    #[test]
    fn test_window_close_exits_run_loop() {
        let mut game = Game::new(Settings::default());
        let mut platform = HeadlessPlatform::new();
        platform.push_frame(vec![]);
        platform.push_frame(vec![InputEvent::Quit]);

        assert_eq!(run(&mut game, &mut platform, Some(100)), Flow::Exit);
        assert_eq!(platform.frames_presented, 1);
    }

    #[test]
    fn test_menu_frame_shows_button_and_cursor() {
        let mut game = Game::new(Settings::default());
        let mut platform = HeadlessPlatform::new();
        run_frame(&mut game, &mut platform);

        assert!(platform.cursor_visible);
        assert!(
            platform
                .presented
                .iter()
                .any(|c| matches!(c, DrawCall::Label(text, _) if text == "Play"))
        );
        assert_eq!(platform.presented[0], DrawCall::Fill(Settings::default().bg_color));
    }

    #[test]
    fn test_play_click_starts_session_and_hides_cursor() {
        let mut game = Game::new(Settings::default());
        let mut platform = HeadlessPlatform::new();
        platform.push_frame(vec![click_play(&game)]);
        run_frame(&mut game, &mut platform);

        assert_eq!(game.phase(), GamePhase::Active);
        assert!(!platform.cursor_visible);
        assert!(
            !platform
                .presented
                .iter()
                .any(|c| matches!(c, DrawCall::Label(text, _) if text == "Play"))
        );
    }

    #[test]
    fn test_active_ticks_count_only_session_frames() {
        let mut game = Game::new(Settings::default());
        game.update(&[]);
        game.update(&[]);
        assert_eq!(game.state().time_ticks, 0);

        let click = click_play(&game);
        game.update(&[click]);
        game.update(&[]);
        assert_eq!(game.state().time_ticks, 2);
    }

    #[test]
    fn test_click_outside_button_ignored() {
        let mut game = Game::new(Settings::default());
        game.update(&[InputEvent::MouseDown { x: 5, y: 5 }]);
        assert_eq!(game.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_scoreboard_rebuilt_only_on_score_change() {
        let mut game = Game::new(Settings::default());
        let start = game.scoreboard().preps;

        game.update(&[]);
        assert_eq!(game.scoreboard().preps, start);

        let click = click_play(&game);
        game.update(&[click]);
        let after_start = game.scoreboard().preps;
        assert!(after_start > start);

        game.update(&[]);
        assert_eq!(game.scoreboard().preps, after_start);
    }

    #[test]
    fn test_kill_updates_score_label() {
        let mut game = Game::new(Settings::default());
        let click = click_play(&game);
        game.update(&[click]);

        let screen = game.state.screen();
        let alien = Alien::new(500, 200, 60, 58, screen);
        let mut bullet = Bullet::new(&game.state.ship, 3, 15);
        bullet.rect.x = 520;
        bullet.rect.y = 230;
        bullet.y = 230.0;
        game.state.aliens = vec![alien, Alien::new(100, 60, 60, 58, screen)];
        game.state.bullets = vec![bullet];

        game.update(&[]);
        assert_eq!(game.score(), 50);
        assert_eq!(game.high_score(), 50);
        assert_eq!(game.scoreboard().score.text, "50");
        assert_eq!(game.scoreboard().high_score.text, "50");
    }

    #[test]
    fn test_ship_loss_freezes_frame() {
        let mut game = Game::new(Settings::default());
        let mut platform = HeadlessPlatform::new();
        platform.push_frame(vec![click_play(&game)]);
        run_frame(&mut game, &mut platform);

        // Park an alien on the ship
        let screen = game.state.screen();
        let ship = game.state.ship.rect;
        game.state.aliens = vec![Alien::new(ship.x, ship.y, 60, 58, screen)];

        let flow = run_frame(&mut game, &mut platform);
        assert_eq!(flow, Flow::Freeze(LIFE_LOST_PAUSE));
        assert_eq!(platform.sleeps, 1);
        assert_eq!(game.ships_left(), 2);
    }

    #[test]
    fn test_game_over_shows_button_and_new_session_resets() {
        let mut game = Game::new(Settings::default());
        let click = click_play(&game);
        game.update(&[click]);
        game.state.stats.score = 420;
        game.state.stats.check_high_score();
        game.state.stats.ships_left = 0;

        let screen = game.state.screen();
        let ship = game.state.ship.rect;
        game.state.aliens = vec![Alien::new(ship.x, ship.y, 60, 58, screen)];
        assert_eq!(game.update(&[]), Flow::Continue);
        assert_eq!(game.phase(), GamePhase::Over);
        assert!(game.cursor_visible());

        game.update(&[click]);
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), 420);
        assert_eq!(game.ships_left(), crate::consts::SHIP_LIMIT);
        assert_eq!(game.scoreboard().score.text, "0");
    }
}
