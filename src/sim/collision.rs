//! Collision detection and scoring
//!
//! Detection is generic over `Bounded`; removal is two-phase (collect
//! indices during the scan, drop them afterwards) so collections are never
//! mutated while being iterated.

use super::rect::Bounded;
use super::state::{GameEvent, GameState};

/// One-to-one overlap matching between two groups.
///
/// Each element of `a` claims the first unclaimed element of `b` it
/// overlaps, so no element appears in more than one pair. Pairs come back in
/// `a` order.
pub fn collide_pairs<A: Bounded, B: Bounded>(a: &[A], b: &[B]) -> Vec<(usize, usize)> {
    let mut claimed = vec![false; b.len()];
    let mut pairs = Vec::new();

    for (ai, item) in a.iter().enumerate() {
        let rect = item.bounds();
        let hit = b
            .iter()
            .enumerate()
            .find(|(bi, other)| !claimed[*bi] && rect.intersects(&other.bounds()));
        if let Some((bi, _)) = hit {
            claimed[bi] = true;
            pairs.push((ai, bi));
        }
    }
    pairs
}

/// Whether any member of `group` overlaps `target`
pub fn collides_any<T: Bounded, G: Bounded>(target: &T, group: &[G]) -> bool {
    let rect = target.bounds();
    group.iter().any(|g| rect.intersects(&g.bounds()))
}

/// Remove every element whose index is in `indices` (any order, duplicates ok)
pub fn remove_indices<T>(items: &mut Vec<T>, indices: impl IntoIterator<Item = usize>) {
    let mut doomed = vec![false; items.len()];
    for i in indices {
        if let Some(flag) = doomed.get_mut(i) {
            *flag = true;
        }
    }
    let mut index = 0;
    items.retain(|_| {
        let keep = !doomed[index];
        index += 1;
        keep
    });
}

/// Destroy matched bullet/alien pairs and score each alien.
/// Returns the number of aliens destroyed.
pub fn bullet_alien_pass(state: &mut GameState) -> usize {
    let pairs = collide_pairs(&state.bullets, &state.aliens);
    if pairs.is_empty() {
        return 0;
    }

    remove_indices(&mut state.bullets, pairs.iter().map(|&(b, _)| b));
    remove_indices(&mut state.aliens, pairs.iter().map(|&(_, a)| a));

    let points = state.settings.dynamic.alien_points;
    for _ in &pairs {
        state.stats.add_score(points);
        state.events.push(GameEvent::AlienDestroyed { points });
    }
    pairs.len()
}

/// Ship touched by an alien, or an alien reached the bottom edge
pub fn fleet_threatens_ship(state: &GameState) -> bool {
    collides_any(&state.ship, &state.aliens) || state.aliens.iter().any(|a| a.reached_bottom())
}
