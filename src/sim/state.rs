//! Game state and entity types
//!
//! Entities know nothing about each other or the session; each receives the
//! speeds and bounds it needs when it is updated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::fleet::create_fleet;
use super::rect::{Bounded, Rect};
use crate::consts::*;
use crate::settings::Settings;
use crate::stats::GameStats;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first Play click
    Menu,
    /// Entities advance every frame
    Active,
    /// Out of ships; Play starts a fresh session
    Over,
}

/// Notable things that happened during a frame, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    AlienDestroyed { points: u64 },
    /// Fleet emptied; a new one was built and difficulty raised
    FleetCleared { alien_points: u64 },
    /// Fleet touched an edge, dropped and reversed
    FleetDropped { direction: i32 },
    ShipHit { ships_left: u32 },
    GameOver { score: u64 },
}

impl GameEvent {
    /// Whether this event changes what the scoreboard shows
    pub fn affects_score(&self) -> bool {
        matches!(
            self,
            GameEvent::SessionStarted | GameEvent::AlienDestroyed { .. }
        )
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub rect: Rect,
    /// Sub-pixel horizontal position (left edge)
    pub x: f32,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    pub fn new(screen: Rect) -> Self {
        let mut ship = Self {
            rect: Rect::new(0, 0, SHIP_WIDTH, SHIP_HEIGHT),
            x: 0.0,
            moving_left: false,
            moving_right: false,
        };
        ship.center_ship(screen);
        ship
    }

    /// Move by the held direction flags, staying on screen
    pub fn update(&mut self, speed: f32, screen: Rect) {
        if self.moving_right && self.rect.right() < screen.right() {
            self.x += speed;
        }
        if self.moving_left && self.rect.left() > screen.left() {
            self.x -= speed;
        }
        self.rect.x = self.x as i32;
    }

    /// Park the ship at the bottom centre of the screen
    pub fn center_ship(&mut self, screen: Rect) {
        self.rect.set_midbottom(screen.center_x(), screen.bottom());
        self.x = self.rect.x as f32;
    }
}

impl Bounded for Ship {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// A projectile fired upward from the ship
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Sub-pixel vertical position (top edge)
    pub y: f32,
}

impl Bullet {
    /// Spawn at the ship's top centre
    pub fn new(ship: &Ship, width: i32, height: i32) -> Self {
        let mut rect = Rect::new(0, 0, width, height);
        rect.set_midtop(ship.rect.center_x(), ship.rect.top());
        Self {
            y: rect.y as f32,
            rect,
        }
    }

    pub fn update(&mut self, speed: f32) {
        self.y -= speed;
        self.rect.y = self.y as i32;
    }

    /// Bottom edge has passed the top of the screen
    pub fn is_off_screen(&self) -> bool {
        self.rect.bottom() <= 0
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// One member of the fleet
#[derive(Debug, Clone, PartialEq)]
pub struct Alien {
    pub rect: Rect,
    /// Sub-pixel top-left position
    pub pos: Vec2,
    /// Screen bounds for edge detection
    screen: Rect,
}

impl Alien {
    pub fn new(x: i32, y: i32, width: i32, height: i32, screen: Rect) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            pos: Vec2::new(x as f32, y as f32),
            screen,
        }
    }

    /// Drift horizontally in the fleet direction
    pub fn update(&mut self, speed: f32, direction: i32) {
        self.pos.x += speed * direction as f32;
        self.rect.x = self.pos.x as i32;
    }

    /// Touching or past the left/right screen edge
    pub fn check_edges(&self) -> bool {
        self.rect.right() >= self.screen.right() || self.rect.left() <= self.screen.left()
    }

    pub fn drop_by(&mut self, dy: f32) {
        self.pos.y += dy;
        self.rect.y = self.pos.y as i32;
    }

    /// Bottom edge has reached the bottom of the screen
    pub fn reached_bottom(&self) -> bool {
        self.rect.bottom() >= self.screen.bottom()
    }
}

impl Bounded for Alien {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// Complete session state, owned by the game and passed into every step
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub stats: GameStats,
    pub phase: GamePhase,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    /// The fleet
    pub aliens: Vec<Alien>,
    /// Events raised since the caller last drained them
    pub events: Vec<GameEvent>,
    /// Frames simulated while Active
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh state in the Menu phase with a fleet already on screen
    pub fn new(settings: Settings) -> Self {
        let screen = settings.screen_rect();
        let aliens = create_fleet(screen, ALIEN_WIDTH, ALIEN_HEIGHT);
        Self {
            settings,
            stats: GameStats::new(),
            phase: GamePhase::Menu,
            ship: Ship::new(screen),
            bullets: Vec::new(),
            aliens,
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    pub fn screen(&self) -> Rect {
        self.settings.screen_rect()
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Spawn a bullet if under the cap. Returns whether one was fired.
    pub fn fire_bullet(&mut self) -> bool {
        if self.bullets.len() >= self.settings.bullets_allowed {
            return false;
        }
        let bullet = Bullet::new(
            &self.ship,
            self.settings.bullet_width,
            self.settings.bullet_height,
        );
        self.bullets.push(bullet);
        true
    }

    /// Replace the fleet with a freshly laid-out one
    pub fn regenerate_fleet(&mut self) {
        self.aliens = create_fleet(self.screen(), ALIEN_WIDTH, ALIEN_HEIGHT);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::new(0, 0, 1100, 600)
    }

    #[test]
    fn test_ship_starts_centered_at_bottom() {
        let ship = Ship::new(screen());
        assert_eq!(ship.rect.center_x(), 550);
        assert_eq!(ship.rect.bottom(), 600);
        assert_eq!(ship.x, ship.rect.x as f32);
    }

    #[test]
    fn test_ship_keeps_subpixel_position() {
        let mut ship = Ship::new(screen());
        let start = ship.x;
        ship.moving_right = true;
        ship.update(1.5, screen());
        ship.update(1.5, screen());
        assert_eq!(ship.x, start + 3.0);
        assert_eq!(ship.rect.x, (start + 3.0) as i32);
    }

    #[test]
    fn test_ship_opposing_flags_cancel() {
        let mut ship = Ship::new(screen());
        let start = ship.rect.x;
        ship.moving_left = true;
        ship.moving_right = true;
        ship.update(1.5, screen());
        assert_eq!(ship.rect.x, start);
    }

    #[test]
    fn test_ship_stops_at_screen_edges() {
        let mut ship = Ship::new(screen());
        ship.moving_left = true;
        for _ in 0..2000 {
            ship.update(1.5, screen());
        }
        assert!(ship.rect.left() <= 0 && ship.rect.left() > -2);

        ship.moving_left = false;
        ship.moving_right = true;
        for _ in 0..2000 {
            ship.update(1.5, screen());
        }
        assert!(ship.rect.right() >= 1100 && ship.rect.right() < 1102);
    }

    #[test]
    fn test_bullet_moves_up_and_culls() {
        let ship = Ship::new(screen());
        let mut bullet = Bullet::new(&ship, 3, 15);
        assert_eq!(bullet.rect.top(), ship.rect.top());
        assert_eq!(bullet.rect.center_x(), ship.rect.center_x());

        bullet.update(2.0);
        assert_eq!(bullet.rect.top(), ship.rect.top() - 2);
        assert!(!bullet.is_off_screen());

        bullet.y = -15.0;
        bullet.update(0.0);
        assert!(bullet.is_off_screen());
    }

    #[test]
    fn test_alien_edges() {
        let mut alien = Alien::new(60, 58, 60, 58, screen());
        assert!(!alien.check_edges());

        alien.update(980.0, 1);
        assert_eq!(alien.rect.right(), 1100);
        assert!(alien.check_edges());

        let left = Alien::new(0, 58, 60, 58, screen());
        assert!(left.check_edges());
    }

    #[test]
    fn test_fire_bullet_respects_cap() {
        let mut state = GameState::new(Settings::default());
        for _ in 0..3 {
            assert!(state.fire_bullet());
        }
        assert!(!state.fire_bullet());
        assert_eq!(state.bullets.len(), 3);
    }

    #[test]
    fn test_new_state_is_menu_with_fleet() {
        let state = GameState::new(Settings::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(!state.aliens.is_empty());
        assert!(state.bullets.is_empty());
    }
}
