//! Attack resolution - the only state transition of a running game

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use super::board::{fleet_cells, Coordinate};
use super::state::{Game, Shot, TeamId};
use super::turn::is_team_next;
use super::win::{eliminate_if_sunk, update_win_state};

/// Reasons an attack is rejected. None of them mutate the game.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AttackError {
    #[error("target team is not an opponent in this game")]
    InvalidTarget,

    #[error("target team has already been eliminated")]
    DeadTarget,

    #[error("it is not this team's turn")]
    NotYourTurn,

    #[error("target cell is outside the board")]
    OutOfBounds,
}

/// Result of a committed attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttackOutcome {
    pub hit: bool,
    /// The attack sank the target's last ship
    pub sunk_target: bool,
    /// Set once the game has a winner
    pub winner: Option<TeamId>,
    /// Turn sequence number assigned to this attack
    pub turn: i64,
}

/// Resolve an attack by `attacker` on `target` at `cell`.
///
/// Validation happens before any mutation; on error `game` is untouched.
/// Firing again at an already-shot cell is allowed and recorded as another shot.
pub fn resolve_attack(
    game: &mut Game,
    attacker: TeamId,
    target: TeamId,
    cell: Coordinate,
) -> Result<AttackOutcome, AttackError> {
    if target == attacker {
        return Err(AttackError::InvalidTarget);
    }
    let defender = game.team(target).ok_or(AttackError::InvalidTarget)?;
    if !defender.alive {
        return Err(AttackError::DeadTarget);
    }
    let attacker_team = game.team(attacker).ok_or(AttackError::NotYourTurn)?;
    if !is_team_next(attacker_team, game) {
        return Err(AttackError::NotYourTurn);
    }
    if !cell.in_bounds(game.rules.game_size) {
        return Err(AttackError::OutOfBounds);
    }

    let hit = fleet_cells(&defender.ships).contains(&cell);

    let turn = game.advance_turn();
    let shot = Shot {
        game_id: game.id,
        attacking_team: attacker,
        defending_team: target,
        target: cell,
        turn,
        fired_at: Utc::now(),
    };
    game.record_shot(shot);

    if let Some(team) = game.team_mut(attacker) {
        team.last_turn = turn;
    }

    let sunk_target = hit && eliminate_if_sunk(game, target);
    let winner = update_win_state(game);

    Ok(AttackOutcome {
        hit,
        sunk_target,
        winner,
        turn,
    })
}
