//! Fleet layout
//!
//! Aliens sit on a grid starting one footprint in from the top-left corner,
//! spaced two footprints apart in both axes. A row ends once the next
//! alien's right edge would pass one alien-width from the right edge; rows
//! end once the next row's top would pass three alien-heights from the
//! bottom, leaving room for the ship. Landing exactly on a limit still fits.

use super::rect::Rect;
use super::state::Alien;

/// Grid origins (top-left corners) for a fleet on `screen`
pub fn fleet_positions(screen: Rect, alien_width: i32, alien_height: i32) -> Vec<(i32, i32)> {
    let mut positions = Vec::new();
    if alien_width <= 0 || alien_height <= 0 {
        return positions;
    }

    // Largest legal top-left corner
    let max_x = screen.right() - 2 * alien_width;
    let max_y = screen.bottom() - 3 * alien_height;

    let mut y = screen.top() + alien_height;
    while y <= max_y {
        let mut x = screen.left() + alien_width;
        while x <= max_x {
            positions.push((x, y));
            x += 2 * alien_width;
        }
        y += 2 * alien_height;
    }
    positions
}

/// Build a fresh fleet; deterministic for identical inputs
pub fn create_fleet(screen: Rect, alien_width: i32, alien_height: i32) -> Vec<Alien> {
    fleet_positions(screen, alien_width, alien_height)
        .into_iter()
        .map(|(x, y)| Alien::new(x, y, alien_width, alien_height, screen))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_valid_fleet(screen: Rect, fleet: &[Alien]) {
        for (i, a) in fleet.iter().enumerate() {
            assert!(screen.contains_rect(&a.rect), "alien {i} out of bounds");
            for b in &fleet[i + 1..] {
                assert!(!a.rect.intersects(&b.rect), "aliens overlap");
            }
        }
    }

    #[test]
    fn test_reference_layout() {
        let screen = Rect::new(0, 0, 1100, 600);
        let fleet = create_fleet(screen, 30, 30);

        // 17 columns (x = 30..=990) by 9 rows (y = 30..=510)
        assert_eq!(fleet.len(), 17 * 9);
        assert_eq!(fleet[0].rect, Rect::new(30, 30, 30, 30));
        assert_eq!(fleet[16].rect.x, 990);
        assert_eq!(fleet[17].rect, Rect::new(30, 90, 30, 30));
        assert_eq!(fleet.last().map(|a| a.rect.y), Some(510));
        assert_valid_fleet(screen, &fleet);
    }

    #[test]
    fn test_alien_landing_on_limit_is_placed() {
        // x = 90 puts the right edge at 120 == 150 - 30
        let row: Vec<i32> = fleet_positions(Rect::new(0, 0, 150, 600), 30, 30)
            .into_iter()
            .filter(|&(_, y)| y == 30)
            .map(|(x, _)| x)
            .collect();
        assert_eq!(row, vec![30, 90]);

        // y = 30 is exactly 120 - 3 * 30
        assert_eq!(fleet_positions(Rect::new(0, 0, 150, 120), 30, 30), vec![(30, 30), (90, 30)]);
        assert!(fleet_positions(Rect::new(0, 0, 150, 119), 30, 30).is_empty());
    }

    #[test]
    fn test_default_sprite_layout() {
        let screen = Rect::new(0, 0, 1100, 600);
        let fleet = create_fleet(screen, 60, 58);

        // 8 columns by 4 rows
        assert_eq!(fleet.len(), 32);
        assert_valid_fleet(screen, &fleet);
    }

    #[test]
    fn test_deterministic() {
        let screen = Rect::new(0, 0, 1100, 600);
        assert_eq!(create_fleet(screen, 30, 30), create_fleet(screen, 30, 30));
    }

    #[test]
    fn test_too_small_screen_yields_empty_fleet() {
        let screen = Rect::new(0, 0, 100, 100);
        assert!(create_fleet(screen, 60, 58).is_empty());
        assert!(create_fleet(screen, 0, 10).is_empty());
    }

    proptest! {
        #[test]
        fn prop_fleet_in_bounds_and_disjoint(
            width in 200i32..2000,
            height in 200i32..1200,
            aw in 5i32..80,
            ah in 5i32..80,
        ) {
            let screen = Rect::new(0, 0, width, height);
            let fleet = create_fleet(screen, aw, ah);
            assert_valid_fleet(screen, &fleet);
            prop_assert_eq!(fleet_positions(screen, aw, ah), fleet_positions(screen, aw, ah));
        }
    }
}
