//! Fixed timestep simulation tick
//!
//! Advances an Active session by one frame in a fixed order:
//! ship → bullets → collision pass → aliens → fleet edges → threat re-check.

use super::collision::{bullet_alien_pass, fleet_threatens_ship};
use super::state::{GameEvent, GamePhase, GameState};

/// What the frame's simulation step ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing that interrupts the frame loop
    Continue,
    /// A reserve ship was consumed; the caller should freeze briefly
    ShipLost,
    /// Out of ships; the session is Over
    GameOver,
}

/// Advance the game state by one frame. No-op unless Active.
pub fn tick(state: &mut GameState) -> StepOutcome {
    if !state.is_active() {
        return StepOutcome::Continue;
    }

    state.time_ticks += 1;
    let screen = state.screen();

    state.ship.update(state.settings.dynamic.ship_speed, screen);
    update_bullets(state);

    if let Some(outcome) = resolve_collisions(state) {
        return outcome;
    }

    update_aliens(state);
    check_fleet_edges(state);

    // Aliens moved; look for contact again
    if fleet_threatens_ship(state) {
        return ship_hit(state);
    }

    StepOutcome::Continue
}

/// Move bullets and drop the ones that left the screen
fn update_bullets(state: &mut GameState) {
    let speed = state.settings.dynamic.bullet_speed;
    for bullet in &mut state.bullets {
        bullet.update(speed);
    }
    state.bullets.retain(|b| !b.is_off_screen());
}

fn update_aliens(state: &mut GameState) {
    let speed = state.settings.dynamic.alien_speed;
    let direction = state.settings.dynamic.fleet_direction;
    for alien in &mut state.aliens {
        alien.update(speed, direction);
    }
}

/// Collision pass run after bullets move.
///
/// Returns an outcome when a ship hit ended the frame.
pub fn resolve_collisions(state: &mut GameState) -> Option<StepOutcome> {
    bullet_alien_pass(state);
    check_fleet_exhausted(state);

    if fleet_threatens_ship(state) {
        return Some(ship_hit(state));
    }
    None
}

/// Rebuild the fleet and raise difficulty once every alien is gone
pub fn check_fleet_exhausted(state: &mut GameState) -> bool {
    if !state.aliens.is_empty() {
        return false;
    }

    state.bullets.clear();
    state.regenerate_fleet();
    state.settings.increase_speed();

    let alien_points = state.settings.dynamic.alien_points;
    log::info!(
        "Fleet cleared at score {}; alien speed now {:.2}, {} points per alien",
        state.stats.score,
        state.settings.dynamic.alien_speed,
        alien_points
    );
    state.events.push(GameEvent::FleetCleared { alien_points });
    true
}

/// Drop and reverse the fleet if any alien touches a side edge
pub fn check_fleet_edges(state: &mut GameState) -> bool {
    if !state.aliens.iter().any(|a| a.check_edges()) {
        return false;
    }
    change_fleet_direction(state);
    true
}

fn change_fleet_direction(state: &mut GameState) {
    let drop = state.settings.dynamic.fleet_drop_speed;
    for alien in &mut state.aliens {
        alien.drop_by(drop);
    }
    state.settings.dynamic.fleet_direction *= -1;

    let direction = state.settings.dynamic.fleet_direction;
    log::debug!("Fleet dropped {:.1}px, now heading {}", drop, direction);
    state.events.push(GameEvent::FleetDropped { direction });
}

/// Consume a ship, or end the session when none are left
pub fn ship_hit(state: &mut GameState) -> StepOutcome {
    if state.stats.lose_ship() {
        state.bullets.clear();
        state.aliens.clear();
        state.regenerate_fleet();
        state.ship.center_ship(state.screen());

        let ships_left = state.stats.ships_left;
        log::debug!("Ship hit, {} left", ships_left);
        state.events.push(GameEvent::ShipHit { ships_left });
        StepOutcome::ShipLost
    } else {
        state.phase = GamePhase::Over;

        let score = state.stats.score;
        log::info!(
            "Game over: score {}, high score {}",
            score,
            state.stats.high_score
        );
        state.events.push(GameEvent::GameOver { score });
        StepOutcome::GameOver
    }
}

/// Menu/Over → Active: reset difficulty, stats and the playfield
pub fn start_session(state: &mut GameState) {
    state.settings.initialize_dynamic_settings();
    state.stats.reset_stats();
    state.phase = GamePhase::Active;

    state.bullets.clear();
    state.aliens.clear();
    state.regenerate_fleet();
    state.ship.center_ship(state.screen());

    log::info!("Session started with {} ships", state.stats.ships_left);
    state.events.push(GameEvent::SessionStarted);
}
