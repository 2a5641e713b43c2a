//! Read-side projections of a game for presentation

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use super::board::{cell_label, fleet_cells, Coordinate};
use super::state::{Game, Team, TeamId};
use super::turn::is_team_next;

/// How much of a board's ship layout an observer may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Every ship cell is revealed
    Full,
    /// Ship cells are revealed only where they have been fired upon
    Concealed,
}

impl Visibility {
    /// Observers see their own board in full, and every board once the game is over
    pub fn for_observer(observer: &Team, target: &Team, game: &Game) -> Self {
        if observer.id == target.id || game.is_finished() {
            Visibility::Full
        } else {
            Visibility::Concealed
        }
    }
}

/// One cell of a projected board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub x: i32,
    pub y: i32,
    pub label: String,
    pub is_empty: bool,
    /// The cell has been fired upon, whether or not a ship was there
    pub is_hit: bool,
}

/// Project `target`'s board as rows of tiles, `y` major
pub fn project_board(target: &Team, game: &Game, visibility: Visibility) -> Vec<Vec<TileView>> {
    let occupied = fleet_cells(&target.ships);
    let fired: HashSet<Coordinate> = game.shots_against(target.id).map(|s| s.target).collect();
    let size = game.rules.game_size;

    (0..size)
        .map(|y| {
            (0..size)
                .map(|x| {
                    let cell = Coordinate::new(x, y);
                    let is_hit = fired.contains(&cell);
                    let revealed = visibility == Visibility::Full || is_hit;
                    TileView {
                        x,
                        y,
                        label: cell_label(x, y),
                        is_empty: !(revealed && occupied.contains(&cell)),
                        is_hit,
                    }
                })
                .collect()
        })
        .collect()
}

/// A team as presented to one observer
#[derive(Debug, Clone, Serialize)]
pub struct TeamView {
    pub team_id: TeamId,
    pub player: Uuid,
    pub is_next: bool,
    pub alive: bool,
    pub winner: bool,
    pub tiles: Vec<Vec<TileView>>,
}

impl TeamView {
    pub fn from_team(team: &Team, game: &Game, visibility: Visibility) -> Self {
        Self {
            team_id: team.id,
            player: team.player,
            is_next: is_team_next(team, game),
            alive: team.alive,
            winner: team.winner,
            tiles: project_board(team, game, visibility),
        }
    }
}

/// Everything a participant needs to render a game
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub game_id: Uuid,
    pub player_team: TeamView,
    pub teams: Vec<TeamView>,
    /// Teams the observer may currently attack
    pub targets: Vec<TeamId>,
    pub is_player_next: bool,
    pub finished: bool,
    pub winner: Option<TeamId>,
}

impl GameView {
    pub fn for_team(observer: &Team, game: &Game) -> Self {
        let teams = game
            .teams()
            .iter()
            .map(|team| {
                TeamView::from_team(team, game, Visibility::for_observer(observer, team, game))
            })
            .collect();

        let targets = if observer.alive && !game.is_finished() {
            game.teams()
                .iter()
                .filter(|t| t.id != observer.id && t.alive)
                .map(|t| t.id)
                .collect()
        } else {
            Vec::new()
        };

        Self {
            game_id: game.id,
            player_team: TeamView::from_team(observer, game, Visibility::Full),
            teams,
            targets,
            is_player_next: is_team_next(observer, game),
            finished: game.is_finished(),
            winner: game.winner().map(|t| t.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::{Orientation, Ship};
    use crate::game::resolver::resolve_attack;
    use crate::game::state::GameRules;

    fn small_game() -> Game {
        let rules = GameRules {
            game_size: 4,
            ..GameRules::default()
        };
        let mut game = Game::new(Uuid::new_v4(), rules);
        game.add_team(
            Uuid::new_v4(),
            vec![Ship::new(Coordinate::new(1, 1), Orientation::Horizontal, 2)],
        );
        game.add_team(
            Uuid::new_v4(),
            vec![Ship::new(Coordinate::new(0, 0), Orientation::Vertical, 2)],
        );
        game
    }

    fn tile(rows: &[Vec<TileView>], x: i32, y: i32) -> &TileView {
        &rows[y as usize][x as usize]
    }

    #[test]
    fn grid_covers_board_with_labels() {
        let game = small_game();
        let rows = project_board(&game.teams()[0], &game, Visibility::Full);
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.len() == 4));
        assert_eq!(tile(&rows, 3, 2).label, "D2");
        assert_eq!((tile(&rows, 3, 2).x, tile(&rows, 3, 2).y), (3, 2));
    }

    #[test]
    fn full_visibility_shows_ships() {
        let game = small_game();
        let rows = project_board(&game.teams()[0], &game, Visibility::Full);
        assert!(!tile(&rows, 1, 1).is_empty);
        assert!(!tile(&rows, 2, 1).is_empty);
        assert!(tile(&rows, 0, 0).is_empty);
    }

    #[test]
    fn concealed_board_reveals_only_fired_cells() {
        let mut game = small_game();
        let b = game.teams()[1].id;
        let a = game.teams()[0].id;
        resolve_attack(&mut game, a, b, Coordinate::new(0, 0)).unwrap();
        resolve_attack(&mut game, b, a, Coordinate::new(3, 3)).unwrap();
        resolve_attack(&mut game, a, b, Coordinate::new(2, 2)).unwrap();

        let rows = project_board(game.team(b).unwrap(), &game, Visibility::Concealed);
        let hit = tile(&rows, 0, 0);
        assert!(hit.is_hit && !hit.is_empty);
        let hidden = tile(&rows, 0, 1);
        assert!(!hidden.is_hit && hidden.is_empty);
        let miss = tile(&rows, 2, 2);
        assert!(miss.is_hit && miss.is_empty);
    }

    #[test]
    fn shots_mark_tiles_of_defender_only() {
        let mut game = small_game();
        let (a, b) = (game.teams()[0].id, game.teams()[1].id);
        resolve_attack(&mut game, a, b, Coordinate::new(3, 3)).unwrap();

        let own = project_board(game.team(a).unwrap(), &game, Visibility::Full);
        let theirs = project_board(game.team(b).unwrap(), &game, Visibility::Full);
        assert!(!tile(&own, 3, 3).is_hit);
        assert!(tile(&theirs, 3, 3).is_hit);
    }

    #[test]
    fn game_view_conceals_opponents_until_finished() {
        let game = small_game();
        let observer = &game.teams()[0];
        let view = GameView::for_team(observer, &game);

        assert!(view.is_player_next);
        assert_eq!(view.targets, vec![game.teams()[1].id]);
        assert!(!view.player_team.tiles[1][1].is_empty);
        assert!(view.teams[1].tiles[0][0].is_empty);
        assert!(!view.teams[0].tiles[1][1].is_empty);
        assert!(!view.finished);
    }

    #[test]
    fn finished_game_reveals_every_board() {
        let mut game = small_game();
        let (a, b) = (game.teams()[0].id, game.teams()[1].id);
        resolve_attack(&mut game, a, b, Coordinate::new(0, 0)).unwrap();
        resolve_attack(&mut game, b, a, Coordinate::new(3, 3)).unwrap();
        let outcome = resolve_attack(&mut game, a, b, Coordinate::new(0, 1)).unwrap();
        assert_eq!(outcome.winner, Some(a));

        let view = GameView::for_team(game.team(b).unwrap(), &game);
        assert!(view.finished);
        assert_eq!(view.winner, Some(a));
        assert!(view.targets.is_empty());
        assert!(!view.teams[0].tiles[1][2].is_empty);
    }
}
