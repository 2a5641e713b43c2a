//! Game engine modules

pub mod board;
pub mod resolver;
pub mod service;
pub mod setup;
pub mod state;
pub mod turn;
pub mod view;
pub mod win;

pub use board::Coordinate;
pub use resolver::{AttackError, AttackOutcome};
pub use service::{GameService, GameSummary, ServiceError};
pub use state::{Game, GameRules, TeamId};
pub use view::GameView;
