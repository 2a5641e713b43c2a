//! Application state shared across routes

use std::sync::Arc;

use crate::config::Config;
use crate::game::GameService;
use crate::store::GameStore;
use crate::util::rate_limit::PlayerLimiters;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub games: GameService,
    pub attack_limiters: PlayerLimiters,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        // Initialize game store and the service on top of it
        let store = Arc::new(GameStore::new());
        let games = GameService::new(store, config.rules.clone());

        Self {
            config,
            games,
            attack_limiters: PlayerLimiters::new(),
        }
    }
}
