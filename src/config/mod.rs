//! Configuration module - environment variable parsing

use std::env;
use std::net::SocketAddr;

use crate::game::GameRules;

/// Largest board side; columns are labelled `A` through `Z`
const MAX_GAME_SIZE: i32 = 26;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Server binding address
    pub server_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// HS256 secret used to verify bearer tokens
    pub jwt_secret: String,

    /// Allowed client origins for CORS (comma-separated)
    pub client_origin: String,

    /// Board size, player cap and fleet composition
    pub rules: GameRules,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Hosting platforms provide PORT, fall back to SERVER_ADDR or default
        let server_addr = if let Ok(port) = env::var("PORT") {
            format!("0.0.0.0:{}", port)
        } else {
            env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        };

        let rules = parse_rules(
            env::var("GAME_SIZE").ok().as_deref(),
            env::var("MAX_PLAYERS").ok().as_deref(),
            env::var("SHIP_LENGTHS").ok().as_deref(),
        )?;

        Ok(Self {
            server_addr: server_addr
                .parse()
                .map_err(|_| ConfigError::InvalidAddress)?,

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            jwt_secret: env::var("AUTH_JWT_SECRET")
                .map_err(|_| ConfigError::Missing("AUTH_JWT_SECRET"))?,

            client_origin: env::var("CLIENT_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            rules,
        })
    }
}

/// Build and validate game rules from optional raw values
pub fn parse_rules(
    game_size: Option<&str>,
    max_players: Option<&str>,
    ship_lengths: Option<&str>,
) -> Result<GameRules, ConfigError> {
    let defaults = GameRules::default();

    let game_size = match game_size {
        Some(raw) => raw
            .trim()
            .parse::<i32>()
            .map_err(|_| ConfigError::Invalid("GAME_SIZE", "not an integer"))?,
        None => defaults.game_size,
    };
    if !(1..=MAX_GAME_SIZE).contains(&game_size) {
        return Err(ConfigError::Invalid("GAME_SIZE", "must be between 1 and 26"));
    }

    let max_players = match max_players {
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::Invalid("MAX_PLAYERS", "not an integer"))?,
        None => defaults.max_players,
    };
    if max_players < 2 {
        return Err(ConfigError::Invalid("MAX_PLAYERS", "must be at least 2"));
    }

    let ship_lengths = match ship_lengths {
        Some(raw) => raw
            .split(',')
            .map(|part| part.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::Invalid("SHIP_LENGTHS", "expected comma-separated integers"))?,
        None => defaults.ship_lengths,
    };
    if ship_lengths.is_empty() {
        return Err(ConfigError::Invalid("SHIP_LENGTHS", "at least one ship is required"));
    }
    if ship_lengths
        .iter()
        .any(|&len| len == 0 || len > game_size as usize)
    {
        return Err(ConfigError::Invalid("SHIP_LENGTHS", "lengths must fit on the board"));
    }
    let cells: usize = ship_lengths.iter().sum();
    if cells > (game_size * game_size) as usize {
        return Err(ConfigError::Invalid("SHIP_LENGTHS", "fleet does not fit on the board"));
    }

    Ok(GameRules {
        game_size,
        max_players,
        ship_lengths,
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid server address format")]
    InvalidAddress,

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_classic_rules() {
        let rules = parse_rules(None, None, None).unwrap();
        assert_eq!(rules, GameRules::default());
        assert_eq!(rules.game_size, 10);
        assert_eq!(rules.ship_lengths, vec![5, 4, 3, 3, 2]);
    }

    #[test]
    fn parses_custom_rules() {
        let rules = parse_rules(Some("8"), Some("6"), Some("4, 3,2")).unwrap();
        assert_eq!(rules.game_size, 8);
        assert_eq!(rules.max_players, 6);
        assert_eq!(rules.ship_lengths, vec![4, 3, 2]);
    }

    #[test]
    fn rejects_invalid_rules() {
        assert!(matches!(
            parse_rules(Some("27"), None, None),
            Err(ConfigError::Invalid("GAME_SIZE", _))
        ));
        assert!(matches!(
            parse_rules(Some("ten"), None, None),
            Err(ConfigError::Invalid("GAME_SIZE", _))
        ));
        assert!(matches!(
            parse_rules(None, Some("1"), None),
            Err(ConfigError::Invalid("MAX_PLAYERS", _))
        ));
        assert!(matches!(
            parse_rules(Some("4"), None, Some("5")),
            Err(ConfigError::Invalid("SHIP_LENGTHS", _))
        ));
        assert!(matches!(
            parse_rules(Some("2"), None, Some("2,2,2")),
            Err(ConfigError::Invalid("SHIP_LENGTHS", _))
        ));
        assert!(matches!(
            parse_rules(None, None, Some("3,x")),
            Err(ConfigError::Invalid("SHIP_LENGTHS", _))
        ));
    }
}
