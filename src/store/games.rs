//! In-memory game store with per-game serialization

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::game::Game;

/// Store errors
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("game {0} does not exist")]
    NotFound(Uuid),

    #[error("game {0} already exists")]
    AlreadyExists(Uuid),
}

/// Owns every game. Each game sits behind its own lock so that writers to
/// one game never block another.
#[derive(Default)]
pub struct GameStore {
    games: DashMap<Uuid, Arc<RwLock<Game>>>,
}

impl GameStore {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
        }
    }

    pub fn insert(&self, game: Game) -> Result<(), StoreError> {
        match self.games.entry(game.id) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(StoreError::AlreadyExists(game.id)),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(Arc::new(RwLock::new(game)));
                Ok(())
            }
        }
    }

    /// Clone the handle out so the map shard is released before locking the game
    fn handle(&self, id: &Uuid) -> Result<Arc<RwLock<Game>>, StoreError> {
        self.games
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound(*id))
    }

    /// Run `f` against the committed state of a game
    pub fn read<T>(&self, id: &Uuid, f: impl FnOnce(&Game) -> T) -> Result<T, StoreError> {
        let handle = self.handle(id)?;
        let game = handle.read();
        Ok(f(&game))
    }

    /// Run `f` on a working copy of a game under its write lock. The copy
    /// replaces the stored game only if `f` returns `Ok`.
    pub fn transact<T, E>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut Game) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let handle = self.handle(id)?;
        let mut guard = handle.write();
        let mut working = guard.clone();
        let out = f(&mut working)?;
        *guard = working;
        Ok(out)
    }

    /// Ids of the games `player` takes part in
    pub fn games_for_player(&self, player: Uuid) -> Vec<Uuid> {
        let handles: Vec<_> = self
            .games
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        handles
            .into_iter()
            .filter_map(|handle| {
                let game = handle.read();
                game.has_player(player).then_some(game.id)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }
}
