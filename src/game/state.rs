//! Game, team and shot records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::board::{Coordinate, Ship};

/// Watermark given to the creating player's team so it moves first
pub const CREATOR_INITIAL_TURN: i64 = -2;
/// Watermark given to every other team at creation
pub const OPPONENT_INITIAL_TURN: i64 = -1;

/// Rule constants shared by every game on this server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRules {
    /// Side length of the square board
    pub game_size: i32,
    /// Maximum number of teams in one game
    pub max_players: usize,
    /// Lengths of the ships every team receives
    pub ship_lengths: Vec<usize>,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            game_size: 10,
            max_players: 4,
            ship_lengths: vec![5, 4, 3, 3, 2],
        }
    }
}

/// Game-scoped team identifier, assigned in creation order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TeamId(pub u32);

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One participant's side of a game
#[derive(Debug, Clone)]
pub struct Team {
    pub id: TeamId,
    /// Owning player (authenticated user id)
    pub player: Uuid,
    pub alive: bool,
    pub winner: bool,
    /// Turn sequence number of the last completed turn
    pub last_turn: i64,
    pub ships: Vec<Ship>,
}

/// A fired-upon cell. Whether it hit is always recomputed from the defender's ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shot {
    pub game_id: Uuid,
    pub attacking_team: TeamId,
    pub defending_team: TeamId,
    pub target: Coordinate,
    pub turn: i64,
    pub fired_at: DateTime<Utc>,
}

/// Authoritative state of one game
#[derive(Debug, Clone)]
pub struct Game {
    pub id: Uuid,
    pub rules: GameRules,
    pub created_at: DateTime<Utc>,
    teams: Vec<Team>,
    shots: Vec<Shot>,
    /// Next value of the game-wide turn sequence
    turn_counter: i64,
}

impl Game {
    pub fn new(id: Uuid, rules: GameRules) -> Self {
        Self {
            id,
            rules,
            created_at: Utc::now(),
            teams: Vec::new(),
            shots: Vec::new(),
            turn_counter: 0,
        }
    }

    /// Add a team owned by `player`. The first team added moves first.
    pub fn add_team(&mut self, player: Uuid, ships: Vec<Ship>) -> TeamId {
        let id = TeamId(self.teams.len() as u32);
        let last_turn = if self.teams.is_empty() {
            CREATOR_INITIAL_TURN
        } else {
            OPPONENT_INITIAL_TURN
        };
        self.teams.push(Team {
            id,
            player,
            alive: true,
            winner: false,
            last_turn,
            ships,
        });
        id
    }

    /// Teams in creation order
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub(super) fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    pub fn team_for_player(&self, player: Uuid) -> Option<&Team> {
        self.teams.iter().find(|t| t.player == player)
    }

    pub fn has_player(&self, player: Uuid) -> bool {
        self.team_for_player(player).is_some()
    }

    /// Full shot history of the game, oldest first
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    /// Shots fired at `team`, oldest first
    pub fn shots_against(&self, team: TeamId) -> impl Iterator<Item = &Shot> + '_ {
        self.shots.iter().filter(move |s| s.defending_team == team)
    }

    pub(super) fn record_shot(&mut self, shot: Shot) {
        self.shots.push(shot);
    }

    /// Take the next value of the turn sequence
    pub(super) fn advance_turn(&mut self) -> i64 {
        let turn = self.turn_counter;
        self.turn_counter += 1;
        turn
    }

    pub fn alive_count(&self) -> usize {
        self.teams.iter().filter(|t| t.alive).count()
    }

    pub fn winner(&self) -> Option<&Team> {
        self.teams.iter().find(|t| t.winner)
    }

    pub fn is_finished(&self) -> bool {
        self.winner().is_some()
    }
}
