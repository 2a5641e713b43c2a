//! Elimination and win detection

use std::collections::HashSet;

use super::state::{Game, TeamId};

/// Mark `team` as no longer alive once every cell of every one of its ships
/// has been fired upon. Returns true if the team was eliminated by this call.
pub fn eliminate_if_sunk(game: &mut Game, team: TeamId) -> bool {
    let fired: HashSet<_> = game.shots_against(team).map(|s| s.target).collect();

    let sunk = match game.team(team) {
        Some(t) if t.alive => t
            .ships
            .iter()
            .all(|ship| ship.cells().all(|cell| fired.contains(&cell))),
        _ => return false,
    };

    if sunk {
        if let Some(t) = game.team_mut(team) {
            t.alive = false;
        }
    }
    sunk
}

/// Designate the last living team as winner. Returns the winner, if any.
pub fn update_win_state(game: &mut Game) -> Option<TeamId> {
    if let Some(winner) = game.winner() {
        return Some(winner.id);
    }

    let mut alive = game.teams().iter().filter(|t| t.alive);
    let last = match (alive.next(), alive.next()) {
        (Some(team), None) => team.id,
        _ => return None,
    };

    if let Some(team) = game.team_mut(last) {
        team.winner = true;
    }
    Some(last)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::game::board::{Coordinate, Orientation, Ship};
    use crate::game::state::{GameRules, Shot};

    fn two_team_game() -> Game {
        let mut game = Game::new(Uuid::new_v4(), GameRules::default());
        let ship = Ship::new(Coordinate::new(2, 3), Orientation::Vertical, 2);
        game.add_team(Uuid::new_v4(), vec![ship.clone()]);
        game.add_team(Uuid::new_v4(), vec![ship]);
        game
    }

    fn fire(game: &mut Game, at: TeamId, x: i32, y: i32) {
        let shot = Shot {
            game_id: game.id,
            attacking_team: TeamId(99),
            defending_team: at,
            target: Coordinate::new(x, y),
            turn: 0,
            fired_at: Utc::now(),
        };
        game.record_shot(shot);
    }

    #[test]
    fn partially_hit_fleet_survives() {
        let mut game = two_team_game();
        fire(&mut game, TeamId(0), 2, 3);
        assert!(!eliminate_if_sunk(&mut game, TeamId(0)));
        assert!(game.team(TeamId(0)).unwrap().alive);
    }

    #[test]
    fn fully_hit_fleet_is_eliminated_once() {
        let mut game = two_team_game();
        fire(&mut game, TeamId(0), 2, 3);
        fire(&mut game, TeamId(0), 2, 4);
        assert!(eliminate_if_sunk(&mut game, TeamId(0)));
        assert!(!game.team(TeamId(0)).unwrap().alive);
        assert!(!eliminate_if_sunk(&mut game, TeamId(0)));
    }

    #[test]
    fn shots_at_other_team_do_not_count() {
        let mut game = two_team_game();
        fire(&mut game, TeamId(1), 2, 3);
        fire(&mut game, TeamId(1), 2, 4);
        assert!(!eliminate_if_sunk(&mut game, TeamId(0)));
    }

    #[test]
    fn no_winner_while_two_alive() {
        let mut game = two_team_game();
        assert_eq!(update_win_state(&mut game), None);
        assert!(game.teams().iter().all(|t| !t.winner));
    }

    #[test]
    fn last_team_standing_wins_exclusively() {
        let mut game = two_team_game();
        game.team_mut(TeamId(0)).unwrap().alive = false;

        assert_eq!(update_win_state(&mut game), Some(TeamId(1)));
        assert_eq!(update_win_state(&mut game), Some(TeamId(1)));
        let winners = game.teams().iter().filter(|t| t.winner).count();
        assert_eq!(winners, 1);
        assert!(game.team(TeamId(1)).unwrap().alive);
    }
}
