//! Game service - entry point used by the request layer

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use uuid::Uuid;

use crate::store::{GameStore, StoreError};

use super::board::Coordinate;
use super::resolver::{resolve_attack, AttackError, AttackOutcome};
use super::setup::{create_game, SetupError};
use super::state::{GameRules, TeamId};
use super::view::GameView;

/// Errors surfaced to the request layer
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("game {0} does not exist")]
    NotFound(Uuid),

    #[error("player is not part of this game")]
    NotParticipant,

    #[error(transparent)]
    Attack(#[from] AttackError),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            other => ServiceError::Store(other),
        }
    }
}

/// Short listing of a game for its participants
#[derive(Debug, Clone, serde::Serialize)]
pub struct GameSummary {
    pub game_id: Uuid,
    pub team_id: TeamId,
    pub is_player_next: bool,
    pub finished: bool,
    /// Attacks resolved so far
    pub shots_fired: usize,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Creates games and routes player actions to the engine
#[derive(Clone)]
pub struct GameService {
    store: Arc<GameStore>,
    rules: GameRules,
}

impl GameService {
    pub fn new(store: Arc<GameStore>, rules: GameRules) -> Self {
        Self { store, rules }
    }

    pub fn active_games(&self) -> usize {
        self.store.len()
    }

    /// Create a game owned by `creator` against `opponents`
    pub fn create(&self, creator: Uuid, opponents: &[Uuid]) -> Result<Uuid, ServiceError> {
        let id = Uuid::new_v4();
        let seed = rand::random::<u64>();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let game = create_game(id, &self.rules, creator, opponents, &mut rng)?;
        let teams = game.teams().len();
        self.store.insert(game)?;

        info!(game_id = %id, creator = %creator, teams, seed, "Created new game");
        Ok(id)
    }

    /// Fire at `target` on behalf of `player`. The whole check-and-commit runs
    /// under the game's write lock, so a racing attacker sees `NotYourTurn`.
    pub fn attack(
        &self,
        game_id: Uuid,
        player: Uuid,
        target: TeamId,
        cell: Coordinate,
    ) -> Result<AttackOutcome, ServiceError> {
        let result: Result<(TeamId, AttackOutcome), ServiceError> =
            self.store.transact(&game_id, |game| {
                let attacker = game
                    .team_for_player(player)
                    .map(|t| t.id)
                    .ok_or(ServiceError::NotParticipant)?;
                let outcome = resolve_attack(game, attacker, target, cell)?;
                Ok((attacker, outcome))
            });

        match result {
            Ok((attacker, outcome)) => {
                info!(
                    game_id = %game_id,
                    team_id = %attacker,
                    target = %target,
                    x = cell.x,
                    y = cell.y,
                    hit = outcome.hit,
                    turn = outcome.turn,
                    "Attack resolved"
                );
                if outcome.sunk_target {
                    info!(game_id = %game_id, team_id = %target, "Team eliminated");
                }
                if let Some(winner) = outcome.winner.filter(|_| outcome.sunk_target) {
                    info!(game_id = %game_id, team_id = %winner, "Game won");
                }
                Ok(outcome)
            }
            Err(err) => {
                warn!(
                    game_id = %game_id,
                    player = %player,
                    target = %target,
                    x = cell.x,
                    y = cell.y,
                    error = %err,
                    "Attack rejected"
                );
                Err(err)
            }
        }
    }

    /// Current view of a game for one of its participants
    pub fn view(&self, game_id: Uuid, player: Uuid) -> Result<GameView, ServiceError> {
        self.store.read(&game_id, |game| {
            game.team_for_player(player)
                .map(|team| GameView::for_team(team, game))
                .ok_or(ServiceError::NotParticipant)
        })?
    }

    /// Games `player` takes part in
    pub fn list_for_player(&self, player: Uuid) -> Vec<GameSummary> {
        let mut summaries: Vec<GameSummary> = self
            .store
            .games_for_player(player)
            .into_iter()
            .filter_map(|id| {
                self.store
                    .read(&id, |game| {
                        game.team_for_player(player).map(|team| GameSummary {
                            game_id: game.id,
                            team_id: team.id,
                            is_player_next: super::turn::is_team_next(team, game),
                            finished: game.is_finished(),
                            shots_fired: game.shots().len(),
                            created_at: game.created_at,
                        })
                    })
                    .ok()
                    .flatten()
            })
            .collect();

        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries
    }
}
