//! Turn policy: whoever has waited longest among living teams moves next

use super::state::{Game, Team};

/// The team allowed to act now, if any team is still alive.
/// Ties on `last_turn` go to the earlier-created team.
pub fn next_team(game: &Game) -> Option<&Team> {
    game.teams()
        .iter()
        .filter(|t| t.alive)
        .min_by_key(|t| (t.last_turn, t.id))
}

/// Whether `team` may act in `game` right now
pub fn is_team_next(team: &Team, game: &Game) -> bool {
    team.alive && next_team(game).map_or(false, |next| next.id == team.id)
}
