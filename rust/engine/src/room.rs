//! Thread-safe table hosting: one [`Engine`] per room, one action at a time.
//!
//! Rooms share no mutable state and can be driven from different threads. An
//! equity estimate runs on its own worker thread against copied cards; its
//! result is only handed back if the room has not moved on in the meantime.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::thread::{self, JoinHandle};

use thiserror::Error;

use crate::engine::{ActionResult, Engine};
use crate::equity::{EquityReport, EquitySimulator};
use crate::errors::{EquityError, GameError};
use crate::game::{GameSnapshot, TableConfig};
use crate::player::Action;

pub type RoomId = String;

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Room not found: {0}")]
    NotFound(RoomId),
    #[error("Game engine error: {0}")]
    Engine(#[from] GameError),
    #[error("Equity error: {0}")]
    Equity(#[from] EquityError),
    #[error("Player {0} holds no hole cards")]
    NoHoleCards(usize),
    #[error("Equity worker panicked")]
    WorkerPanicked,
    #[error("Room storage poisoned")]
    StoragePoisoned,
}

/// Pending equity estimate tagged with the room version it was taken at.
#[derive(Debug)]
pub struct EquityTask {
    pub player_id: usize,
    pub version: u64,
    handle: JoinHandle<Result<EquityReport, RoomError>>,
}

impl EquityTask {
    /// True once the worker has produced a result; resolving never blocks then.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[derive(Debug)]
pub struct Room {
    id: RoomId,
    engine: Mutex<Engine>,
    /// Bumped on every accepted state change
    version: AtomicU64,
    simulator: Arc<Mutex<EquitySimulator>>,
}

impl Room {
    pub fn new(id: RoomId, engine: Engine) -> Self {
        Self::with_simulator(id, engine, EquitySimulator::new())
    }

    pub fn with_simulator(id: RoomId, engine: Engine, simulator: EquitySimulator) -> Self {
        Self {
            id,
            engine: Mutex::new(engine),
            version: AtomicU64::new(0),
            simulator: Arc::new(Mutex::new(simulator)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Engine>, RoomError> {
        self.engine.lock().map_err(|_| RoomError::StoragePoisoned)
    }

    pub fn start_new_hand(&self) -> Result<ActionResult, RoomError> {
        let mut engine = self.lock()?;
        let result = engine.start_new_hand()?;
        self.version.fetch_add(1, Ordering::AcqRel);
        Ok(result)
    }

    /// Applies one action. Rejected actions do not change the room version.
    pub fn process_action(&self, action: Action) -> Result<ActionResult, RoomError> {
        let mut engine = self.lock()?;
        let result = engine.process_action(action)?;
        if result.success {
            self.version.fetch_add(1, Ordering::AcqRel);
        }
        Ok(result)
    }

    pub fn snapshot(&self) -> Result<GameSnapshot, RoomError> {
        Ok(self.lock()?.game_state())
    }

    /// Starts an equity estimate for `player_id` against every other
    /// contender, using the cards on the table right now.
    ///
    /// # Errors
    ///
    /// [`RoomError::NoHoleCards`] if the player has no hand, and
    /// [`RoomError::Equity`] if the board is not at least a flop.
    pub fn spawn_equity(&self, player_id: usize) -> Result<EquityTask, RoomError> {
        let (hole, board, opponents, version) = {
            let engine = self.lock()?;
            let state = engine.state();
            let player = state.player(player_id)?;
            if player.hand.len() != 2 {
                return Err(RoomError::NoHoleCards(player_id));
            }
            let board = state.community_cards.clone();
            if !(3..=5).contains(&board.len()) {
                return Err(EquityError::CommunityCards(board.len()).into());
            }
            let opponents = state
                .contenders()
                .filter(|p| p.id != player_id)
                .count();
            (player.hand.clone(), board, opponents, self.version())
        };

        let simulator = Arc::clone(&self.simulator);
        let room_id = self.id.clone();
        let handle = thread::spawn(move || {
            let mut sim = simulator.lock().map_err(|_| RoomError::StoragePoisoned)?;
            let report = sim.estimate(&hole, &board, opponents)?;
            tracing::debug!(room_id = %room_id, player_id, version, "equity estimate finished");
            Ok(report)
        });
        Ok(EquityTask {
            player_id,
            version,
            handle,
        })
    }

    /// Waits for the estimate. `Ok(None)` when the room changed after the task
    /// was spawned and the result no longer describes the table.
    pub fn resolve_equity(&self, task: EquityTask) -> Result<Option<EquityReport>, RoomError> {
        let report = task
            .handle
            .join()
            .map_err(|_| RoomError::WorkerPanicked)??;
        let current = self.version();
        if current != task.version {
            tracing::debug!(
                room_id = %self.id,
                player_id = task.player_id,
                spawned_at = task.version,
                current,
                "discarding stale equity estimate"
            );
            return Ok(None);
        }
        Ok(Some(report))
    }
}

/// Room-keyed map of live tables.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomId, Arc<Room>>>,
    next_id: AtomicU64,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a room with an unpredictable shuffle source and deals its first hand.
    pub fn create_room<S: AsRef<str>>(
        &self,
        names: &[S],
        config: TableConfig,
    ) -> Result<RoomId, RoomError> {
        let engine = Engine::new(names, config)?;
        self.insert(engine, EquitySimulator::new())
    }

    /// Same as [`RoomRegistry::create_room`] with reproducible shuffles.
    pub fn create_seeded_room<S: AsRef<str>>(
        &self,
        names: &[S],
        config: TableConfig,
        seed: u64,
    ) -> Result<RoomId, RoomError> {
        let engine = Engine::with_seed(names, config, seed)?;
        self.insert(engine, EquitySimulator::with_seed(seed))
    }

    fn insert(&self, engine: Engine, simulator: EquitySimulator) -> Result<RoomId, RoomError> {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let id = format!("room-{n}");
        let seats = engine.state().players.len();
        tracing::info!(room_id = %id, seats, "creating room");

        let room = Arc::new(Room::with_simulator(id.clone(), engine, simulator));
        let hand = room.start_new_hand()?;
        {
            let mut guard = self
                .rooms
                .write()
                .map_err(|_| RoomError::StoragePoisoned)?;
            guard.insert(id.clone(), room);
        }
        tracing::debug!(room_id = %id, message = %hand.message, "room created and first hand started");
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Result<Arc<Room>, RoomError> {
        let guard = self
            .rooms
            .read()
            .map_err(|_| RoomError::StoragePoisoned)?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| RoomError::NotFound(id.to_string()))
    }

    pub fn remove(&self, id: &str) -> Result<(), RoomError> {
        let removed = self
            .rooms
            .write()
            .map_err(|_| RoomError::StoragePoisoned)?
            .remove(id);
        match removed {
            Some(_) => {
                tracing::info!(room_id = %id, "room closed");
                Ok(())
            }
            None => Err(RoomError::NotFound(id.to_string())),
        }
    }

    pub fn process_action(&self, id: &str, action: Action) -> Result<ActionResult, RoomError> {
        self.get(id)?.process_action(action)
    }

    pub fn state(&self, id: &str) -> Result<GameSnapshot, RoomError> {
        self.get(id)?.snapshot()
    }

    pub fn len(&self) -> usize {
        self.rooms.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
