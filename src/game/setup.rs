//! Game creation and random fleet placement

use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use super::board::{Coordinate, Orientation, Ship};
use super::state::{Game, GameRules};

/// Attempts per ship before giving up on a layout
const MAX_PLACEMENT_ATTEMPTS: usize = 1_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("a game needs at least one opponent")]
    NoOpponents,

    #[error("a game allows at most {max} players, got {requested}")]
    TooManyPlayers { max: usize, requested: usize },

    #[error("player {0} was listed more than once")]
    DuplicatePlayer(Uuid),

    #[error("could not place a ship of length {0} on the board")]
    PlacementFailed(usize),
}

/// Create a game for `creator` against `opponents`, each team receiving a
/// randomly placed fleet. The creator's team moves first.
pub fn create_game<R: Rng>(
    id: Uuid,
    rules: &GameRules,
    creator: Uuid,
    opponents: &[Uuid],
    rng: &mut R,
) -> Result<Game, SetupError> {
    if opponents.is_empty() {
        return Err(SetupError::NoOpponents);
    }
    let requested = opponents.len() + 1;
    if requested > rules.max_players {
        return Err(SetupError::TooManyPlayers {
            max: rules.max_players,
            requested,
        });
    }

    let mut seen = HashSet::new();
    for player in std::iter::once(&creator).chain(opponents) {
        if !seen.insert(*player) {
            return Err(SetupError::DuplicatePlayer(*player));
        }
    }

    let mut game = Game::new(id, rules.clone());
    for player in std::iter::once(creator).chain(opponents.iter().copied()) {
        let fleet = place_fleet(rules, rng)?;
        game.add_team(player, fleet);
    }
    Ok(game)
}

/// Place one ship of each configured length without overlaps
pub fn place_fleet<R: Rng>(rules: &GameRules, rng: &mut R) -> Result<Vec<Ship>, SetupError> {
    let size = rules.game_size;
    let mut taken: HashSet<Coordinate> = HashSet::new();
    let mut fleet = Vec::with_capacity(rules.ship_lengths.len());

    for &length in &rules.ship_lengths {
        let ship = (0..MAX_PLACEMENT_ATTEMPTS)
            .map(|_| random_ship(size, length, rng))
            .find(|ship| ship.fits(size) && ship.cells().all(|c| !taken.contains(&c)))
            .ok_or(SetupError::PlacementFailed(length))?;

        taken.extend(ship.cells());
        fleet.push(ship);
    }
    Ok(fleet)
}

fn random_ship<R: Rng>(size: i32, length: usize, rng: &mut R) -> Ship {
    let orientation = if rng.gen_bool(0.5) {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };
    let origin = Coordinate::new(rng.gen_range(0..size), rng.gen_range(0..size));
    Ship::new(origin, orientation, length)
}
