//! Core simulation engine for the SweepBots workspace.
//!
//! A fixed population of cleaner agents random-walks a bounded grid seeded
//! with stationary dirt agents. Each tick activates every live agent once in
//! a freshly shuffled order, then reaps the dirt that cleaners marked during
//! the pass, then derives statistics and evaluates the continuation
//! predicate. Removal is deferred to the reap stage so the live-agent
//! collection is never mutated while it is being iterated.

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom, seq::index};
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use thiserror::Error;

pub use sweepbots_grid::{CellPos, GridError, NeighborList, OccupancyGrid};

new_key_type! {
    /// Stable handle for agents backed by a generational slot map.
    pub struct AgentId;
}

/// High level simulation clock (activation passes completed since setup).
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Tick(pub u64);

impl Tick {
    /// Returns the next sequential tick.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Resets the tick counter back to zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }
}

/// Kind tag distinguishing the two agent variants.
///
/// Variant dispatch is a direct match on this tag; there is no runtime type
/// inspection anywhere in the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AgentKind {
    /// Active mover that marks co-located dirt and relocates every tick.
    Cleaner,
    /// Passive occupant; inert once marked, deleted by the reap stage.
    Dirt,
}

/// Scalar fields for a single agent used when inserting or snapshotting from
/// the SoA store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentData {
    pub kind: AgentKind,
    pub position: CellPos,
    /// Set by a visiting cleaner, never reset. Only ever true for dirt.
    pub marked_for_removal: bool,
}

impl AgentData {
    /// Cleaner payload at `position`.
    #[must_use]
    pub const fn cleaner(position: CellPos) -> Self {
        Self {
            kind: AgentKind::Cleaner,
            position,
            marked_for_removal: false,
        }
    }

    /// Dirt payload at `position`.
    #[must_use]
    pub const fn dirt(position: CellPos) -> Self {
        Self {
            kind: AgentKind::Dirt,
            position,
            marked_for_removal: false,
        }
    }
}

/// Collection of per-agent columns for hot-path iteration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AgentColumns {
    kinds: Vec<AgentKind>,
    positions: Vec<CellPos>,
    marked: Vec<bool>,
}

impl AgentColumns {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection with reserved capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            kinds: Vec::with_capacity(capacity),
            positions: Vec::with_capacity(capacity),
            marked: Vec::with_capacity(capacity),
        }
    }

    /// Number of active rows in the columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns true if there are no active rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Push a new row onto each column.
    pub fn push(&mut self, agent: AgentData) {
        self.kinds.push(agent.kind);
        self.positions.push(agent.position);
        self.marked.push(agent.marked_for_removal);
        self.debug_assert_coherent();
    }

    /// Swap-remove the row at `index` and return its scalar fields.
    pub fn swap_remove(&mut self, index: usize) -> AgentData {
        let removed = AgentData {
            kind: self.kinds.swap_remove(index),
            position: self.positions.swap_remove(index),
            marked_for_removal: self.marked.swap_remove(index),
        };
        self.debug_assert_coherent();
        removed
    }

    /// Copy the row at `from` into position `to` without altering length.
    pub fn move_row(&mut self, from: usize, to: usize) {
        debug_assert!(from < self.len(), "move_row from out of bounds");
        debug_assert!(to < self.len(), "move_row to out of bounds");
        if from == to {
            return;
        }
        self.kinds[to] = self.kinds[from];
        self.positions[to] = self.positions[from];
        self.marked[to] = self.marked[from];
    }

    /// Truncate all columns to the provided length.
    pub fn truncate(&mut self, len: usize) {
        self.kinds.truncate(len);
        self.positions.truncate(len);
        self.marked.truncate(len);
        self.debug_assert_coherent();
    }

    /// Return a copy of the scalar fields at `index`.
    #[must_use]
    pub fn snapshot(&self, index: usize) -> AgentData {
        AgentData {
            kind: self.kinds[index],
            position: self.positions[index],
            marked_for_removal: self.marked[index],
        }
    }

    /// Immutable access to the kind tags.
    #[must_use]
    pub fn kinds(&self) -> &[AgentKind] {
        &self.kinds
    }

    /// Immutable access to the positions slice.
    #[must_use]
    pub fn positions(&self) -> &[CellPos] {
        &self.positions
    }

    /// Mutable access to the positions slice.
    #[must_use]
    pub fn positions_mut(&mut self) -> &mut [CellPos] {
        &mut self.positions
    }

    /// Immutable access to the removal flags.
    #[must_use]
    pub fn marked(&self) -> &[bool] {
        &self.marked
    }

    /// Mutable access to the removal flags.
    #[must_use]
    pub fn marked_mut(&mut self) -> &mut [bool] {
        &mut self.marked
    }

    #[inline]
    fn debug_assert_coherent(&self) {
        debug_assert_eq!(self.kinds.len(), self.positions.len());
        debug_assert_eq!(self.kinds.len(), self.marked.len());
    }
}

/// Dense SoA storage with generational handles for agent access.
#[derive(Debug)]
pub struct AgentArena {
    slots: SlotMap<AgentId, usize>,
    handles: Vec<AgentId>,
    columns: AgentColumns,
}

impl Default for AgentArena {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            handles: Vec::new(),
            columns: AgentColumns::new(),
        }
    }

    /// Create an arena with reserved capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: SlotMap::with_capacity_and_key(capacity),
            handles: Vec::with_capacity(capacity),
            columns: AgentColumns::with_capacity(capacity),
        }
    }

    /// Number of active agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true when no agents are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over active agent handles in dense iteration order.
    pub fn iter_handles(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.handles.iter().copied()
    }

    /// Borrow the underlying column storage.
    #[must_use]
    pub fn columns(&self) -> &AgentColumns {
        &self.columns
    }

    /// Mutably borrow the underlying column storage.
    #[must_use]
    pub fn columns_mut(&mut self) -> &mut AgentColumns {
        &mut self.columns
    }

    /// Returns the dense index for `id`, if present.
    #[must_use]
    pub fn index_of(&self, id: AgentId) -> Option<usize> {
        self.slots.get(id).copied()
    }

    /// Returns true if `id` refers to a live agent.
    #[must_use]
    pub fn contains(&self, id: AgentId) -> bool {
        self.slots.contains_key(id)
    }

    /// Insert a new agent and return its handle.
    pub fn insert(&mut self, agent: AgentData) -> AgentId {
        let index = self.columns.len();
        self.columns.push(agent);
        let id = self.slots.insert(index);
        self.handles.push(id);
        id
    }

    /// Remove `id` returning its scalar data if it was present.
    pub fn remove(&mut self, id: AgentId) -> Option<AgentData> {
        let index = self.slots.remove(id)?;
        let removed = self.columns.swap_remove(index);
        let removed_handle = self.handles.swap_remove(index);
        debug_assert_eq!(removed_handle, id);
        if index < self.handles.len() {
            let moved = self.handles[index];
            if let Some(slot) = self.slots.get_mut(moved) {
                *slot = index;
            }
        }
        Some(removed)
    }

    /// Remove all agents whose ids are contained in `dead`, preserving the
    /// iteration order of the survivors.
    pub fn remove_many(&mut self, dead: &HashSet<AgentId>) -> usize {
        if dead.is_empty() {
            return 0;
        }
        let mut write = 0;
        for read in 0..self.handles.len() {
            let id = self.handles[read];
            if dead.contains(&id) {
                self.slots.remove(id);
                continue;
            }
            if write != read {
                self.handles[write] = id;
                self.columns.move_row(read, write);
            }
            if let Some(slot) = self.slots.get_mut(id) {
                *slot = write;
            }
            write += 1;
        }
        let removed = self.handles.len().saturating_sub(write);
        self.handles.truncate(write);
        self.columns.truncate(write);
        removed
    }

    /// Produce a copy of the scalar data for `id`.
    #[must_use]
    pub fn snapshot(&self, id: AgentId) -> Option<AgentData> {
        let index = self.index_of(id)?;
        Some(self.columns.snapshot(index))
    }
}

/// Errors raised during configuration validation or model setup.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// The requested dirt density does not fit on the grid.
    #[error(
        "dirty_percent {dirty_percent} yields {requested} dirt agents but the grid has only {cells} cells"
    )]
    InvalidDensity {
        dirty_percent: f64,
        requested: usize,
        cells: usize,
    },
    /// A grid operation failed while seeding the population.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Errors raised while advancing the simulation.
#[derive(Debug, Error)]
pub enum StepError {
    /// A cleaner has no reachable neighbor cell to move to. Only a 1x1 grid
    /// can produce this; the model assumes at least one dimension >= 2.
    #[error("no reachable neighbor from {position}")]
    NoMoveTarget { position: CellPos },
    /// Grid and scheduler disagreed on membership. Always a bug.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Static configuration for a cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Number of cleaner agents, all spawned on `start_cell`.
    pub num_cleaners: u32,
    /// Fraction of cells seeded with dirt.
    pub dirty_percent: f64,
    /// Maximum number of ticks before the run halts regardless of dirt left.
    pub step_budget: u32,
    /// Shared spawn cell for every cleaner. The clustered start is
    /// intentional; cleaners disperse on their own.
    pub start_cell: CellPos,
    /// Optional RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
    /// Maximum number of recent tick results retained in-memory.
    pub history_capacity: usize,
    /// Ticks between observer frames; 0 disables the observer.
    pub observer_interval: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        // Default run: a mid-size room with a dense cleaner crew.
        Self {
            width: 15,
            height: 15,
            num_cleaners: 700,
            dirty_percent: 0.40,
            step_budget: 30,
            start_cell: CellPos::new(1, 1),
            rng_seed: None,
            history_capacity: 256,
            observer_interval: 1,
        }
    }
}

impl SweepConfig {
    /// Validates the configuration, returning the number of dirt agents to
    /// seed.
    fn dirt_quota(&self) -> Result<usize, SetupError> {
        if self.width == 0 || self.height == 0 {
            return Err(SetupError::InvalidConfig(
                "grid dimensions must be non-zero",
            ));
        }
        if !self.dirty_percent.is_finite() || self.dirty_percent < 0.0 {
            return Err(SetupError::InvalidConfig(
                "dirty_percent must be a finite non-negative fraction",
            ));
        }
        if self.history_capacity == 0 {
            return Err(SetupError::InvalidConfig(
                "history_capacity must be non-zero",
            ));
        }
        if self.start_cell.x >= self.width || self.start_cell.y >= self.height {
            return Err(SetupError::InvalidConfig(
                "start_cell must lie inside the grid",
            ));
        }
        let cells = (self.width as usize) * (self.height as usize);
        let requested = (self.dirty_percent * cells as f64).floor() as usize;
        if requested > cells {
            return Err(SetupError::InvalidDensity {
                dirty_percent: self.dirty_percent,
                requested,
                cells,
            });
        }
        Ok(requested)
    }

    /// Returns the configured RNG, seeding from entropy if no seed is set.
    fn seeded_rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => {
                let seed: u64 = rand::random();
                SmallRng::seed_from_u64(seed)
            }
        }
    }
}

/// Authoritative collection of live agents plus the activation clock.
#[derive(Debug, Default)]
pub struct Scheduler {
    arena: AgentArena,
    tick: Tick,
}

impl Scheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler with room for `capacity` agents.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: AgentArena::with_capacity(capacity),
            tick: Tick::zero(),
        }
    }

    /// Register a new agent in the live set, returning its handle.
    ///
    /// The caller is responsible for placing the agent on the grid; the
    /// scheduler only tracks membership.
    pub fn add(&mut self, agent: AgentData) -> AgentId {
        self.arena.insert(agent)
    }

    /// Remove `id` from the live set. Must only be called between ticks;
    /// mid-activation removal is the reap stage's job.
    pub fn remove(&mut self, id: AgentId) -> Option<AgentData> {
        self.arena.remove(id)
    }

    /// Remove every agent in `dead`, preserving survivor order.
    pub fn remove_many(&mut self, dead: &HashSet<AgentId>) -> usize {
        self.arena.remove_many(dead)
    }

    /// Number of live agents.
    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.arena.len()
    }

    /// Activation passes completed so far.
    #[must_use]
    pub const fn tick_count(&self) -> Tick {
        self.tick
    }

    /// Read-only access to the agent arena.
    #[must_use]
    pub fn agents(&self) -> &AgentArena {
        &self.arena
    }

    /// Number of live dirt agents.
    #[must_use]
    pub fn dirt_remaining(&self) -> usize {
        self.arena
            .columns()
            .kinds()
            .iter()
            .filter(|kind| **kind == AgentKind::Dirt)
            .count()
    }

    /// Set the removal flag on a live dirt agent. Idempotent; returns true
    /// when `id` refers to live dirt (marked before or by this call).
    pub fn mark_for_removal(&mut self, id: AgentId) -> bool {
        match self.arena.index_of(id) {
            Some(index) if self.arena.columns().kinds()[index] == AgentKind::Dirt => {
                self.arena.columns_mut().marked_mut()[index] = true;
                true
            }
            _ => false,
        }
    }

    /// Run one activation pass over a uniformly random permutation of the
    /// live set, then advance the clock.
    ///
    /// Activation is strictly sequential: an agent observes every mark and
    /// move made by agents earlier in the permutation and none from later
    /// ones. Two cleaners sharing a cell may both mark the same dirt in one
    /// pass; marking is idempotent so this is safe.
    pub fn activate_all(
        &mut self,
        grid: &mut OccupancyGrid<AgentId>,
        rng: &mut SmallRng,
    ) -> Result<(), StepError> {
        let mut order: Vec<AgentId> = self.arena.iter_handles().collect();
        order.shuffle(rng);
        for id in order {
            let Some(index) = self.arena.index_of(id) else {
                continue;
            };
            let kind = self.arena.columns().kinds()[index];
            match kind {
                // Dirt is passive; it just sits there.
                AgentKind::Dirt => {}
                AgentKind::Cleaner => self.activate_cleaner(id, index, grid, rng)?,
            }
        }
        self.tick = self.tick.next();
        Ok(())
    }

    /// One cleaner turn: mark every co-located dirt, then step onto a
    /// uniformly random neighbor cell.
    fn activate_cleaner(
        &mut self,
        id: AgentId,
        index: usize,
        grid: &mut OccupancyGrid<AgentId>,
        rng: &mut SmallRng,
    ) -> Result<(), StepError> {
        let position = self.arena.columns().positions()[index];
        let resident: Vec<AgentId> = grid.contents_of(position).to_vec();
        for other in resident {
            self.mark_for_removal(other);
        }
        let neighbors = grid.neighbors_of(position, false);
        if neighbors.is_empty() {
            return Err(StepError::NoMoveTarget { position });
        }
        let target = neighbors[rng.random_range(0..neighbors.len())];
        grid.move_to(id, target)?;
        self.arena.columns_mut().positions_mut()[index] = target;
        Ok(())
    }
}

/// Post-tick statistics snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TickResult {
    /// Tick this result describes (1-based; tick 0 is the pre-run state).
    pub tick: Tick,
    /// Live dirt agents left after the reap stage.
    pub remaining_dirt: usize,
    /// Percentage of cells hosting no live agent at all.
    pub clean_percentage: f64,
    /// Cumulative cleaner movements: ticks elapsed times cleaner count.
    pub total_movements: u64,
    /// Whether the run has reached its terminal state.
    pub halted: bool,
}

/// Read-only view of agent positions for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelSnapshot {
    pub tick: Tick,
    pub halted: bool,
    pub cleaner_positions: Vec<CellPos>,
    pub dirt_positions: Vec<CellPos>,
}

/// Per-tick payload forwarded to observers.
#[derive(Debug, Clone)]
pub struct ObserverFrame {
    pub result: TickResult,
    pub snapshot: ModelSnapshot,
}

/// Render/telemetry sink invoked after each observed tick.
///
/// Observers read derived state only; they cannot influence the simulation.
pub trait ModelObserver: Send {
    fn on_tick(&mut self, frame: &ObserverFrame);
}

/// No-op observer.
#[derive(Debug, Default)]
pub struct NullObserver;

impl ModelObserver for NullObserver {
    fn on_tick(&mut self, _frame: &ObserverFrame) {}
}

/// Aggregate simulation state: grid, scheduler, clock, and statistics.
pub struct Model {
    config: SweepConfig,
    rng: SmallRng,
    grid: OccupancyGrid<AgentId>,
    scheduler: Scheduler,
    halted: bool,
    last_result: TickResult,
    observer: Box<dyn ModelObserver>,
    history: VecDeque<TickResult>,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("config", &self.config)
            .field("tick", &self.scheduler.tick_count())
            .field("halted", &self.halted)
            .field("agent_count", &self.scheduler.agent_count())
            .finish()
    }
}

impl Model {
    /// Instantiate and seed a new model from the supplied configuration.
    pub fn new(config: SweepConfig) -> Result<Self, SetupError> {
        Self::with_observer(config, Box::new(NullObserver))
    }

    /// Instantiate a new model with an observer attached.
    pub fn with_observer(
        config: SweepConfig,
        observer: Box<dyn ModelObserver>,
    ) -> Result<Self, SetupError> {
        let dirt_quota = config.dirt_quota()?;
        let mut rng = config.seeded_rng();
        let mut grid = OccupancyGrid::new(config.width, config.height)?;
        let mut scheduler = Scheduler::with_capacity(config.num_cleaners as usize + dirt_quota);

        // Cleaners first so they occupy the leading handle range, then dirt.
        for _ in 0..config.num_cleaners {
            let id = scheduler.add(AgentData::cleaner(config.start_cell));
            grid.place(id, config.start_cell)?;
        }

        // Distinct dirt cells sampled without replacement over the full
        // coordinate space; the start cell is a legal dirt location.
        let width = config.width as usize;
        for slot in index::sample(&mut rng, grid.cell_count(), dirt_quota).iter() {
            let pos = CellPos::new((slot % width) as u32, (slot / width) as u32);
            let id = scheduler.add(AgentData::dirt(pos));
            grid.place(id, pos)?;
        }

        let last_result = TickResult {
            tick: Tick::zero(),
            remaining_dirt: dirt_quota,
            clean_percentage: Self::clean_percentage_of(&grid),
            total_movements: 0,
            halted: false,
        };
        let history_capacity = config.history_capacity;
        Ok(Self {
            config,
            rng,
            grid,
            scheduler,
            halted: false,
            last_result,
            observer,
            history: VecDeque::with_capacity(history_capacity),
        })
    }

    /// Advance exactly one tick and return the post-tick statistics.
    ///
    /// Once halted this is a no-op that returns the final statistics with
    /// the halted flag set. Activation, reap, and statistics complete before
    /// this returns; no intermediate state is observable.
    pub fn tick(&mut self) -> Result<TickResult, StepError> {
        if self.halted {
            return Ok(self.last_result);
        }
        if self.scheduler.tick_count().0 >= u64::from(self.config.step_budget) {
            // A zero step budget halts before the first activation pass.
            self.halted = true;
            self.last_result.halted = true;
            return Ok(self.last_result);
        }

        self.stage_activation()?;
        self.stage_reap()?;
        let result = self.stage_statistics();

        self.last_result = result;
        self.push_history(result);
        self.emit_frame(result);
        Ok(result)
    }

    /// Drive the model until it halts, returning the final statistics.
    pub fn run(&mut self) -> Result<TickResult, StepError> {
        while !self.halted {
            self.tick()?;
        }
        Ok(self.last_result)
    }

    fn stage_activation(&mut self) -> Result<(), StepError> {
        self.scheduler.activate_all(&mut self.grid, &mut self.rng)
    }

    /// Delete every dirt agent marked during the activation pass.
    ///
    /// This is the only place agents are removed, and it always runs before
    /// statistics so the reported counts never expose a partially reaped
    /// state.
    fn stage_reap(&mut self) -> Result<usize, StepError> {
        let columns = self.scheduler.agents().columns();
        let mut dead: HashSet<AgentId> = HashSet::new();
        for (index, id) in self.scheduler.agents().iter_handles().enumerate() {
            if columns.kinds()[index] == AgentKind::Dirt && columns.marked()[index] {
                dead.insert(id);
            }
        }
        if dead.is_empty() {
            return Ok(0);
        }
        for &id in &dead {
            self.grid.remove(id)?;
        }
        Ok(self.scheduler.remove_many(&dead))
    }

    /// Derive post-tick statistics and evaluate the continuation predicate.
    fn stage_statistics(&mut self) -> TickResult {
        let tick = self.scheduler.tick_count();
        let remaining_dirt = self.scheduler.dirt_remaining();
        let halted =
            !(tick.0 < u64::from(self.config.step_budget) && remaining_dirt > 0);
        self.halted = halted;
        TickResult {
            tick,
            remaining_dirt,
            clean_percentage: Self::clean_percentage_of(&self.grid),
            total_movements: tick.0 * u64::from(self.config.num_cleaners),
            halted,
        }
    }

    fn clean_percentage_of(grid: &OccupancyGrid<AgentId>) -> f64 {
        let total = grid.cell_count();
        let free = total - grid.occupied_cells();
        (free as f64 / total as f64) * 100.0
    }

    fn push_history(&mut self, result: TickResult) {
        if self.history.len() >= self.config.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(result);
    }

    fn emit_frame(&mut self, result: TickResult) {
        let interval = self.config.observer_interval;
        if interval == 0 || !result.tick.0.is_multiple_of(u64::from(interval)) {
            return;
        }
        let frame = ObserverFrame {
            result,
            snapshot: self.snapshot(),
        };
        self.observer.on_tick(&frame);
    }

    /// Read-only view of the current agent positions.
    #[must_use]
    pub fn snapshot(&self) -> ModelSnapshot {
        let columns = self.scheduler.agents().columns();
        let mut cleaner_positions = Vec::new();
        let mut dirt_positions = Vec::new();
        for index in 0..columns.len() {
            match columns.kinds()[index] {
                AgentKind::Cleaner => cleaner_positions.push(columns.positions()[index]),
                AgentKind::Dirt => dirt_positions.push(columns.positions()[index]),
            }
        }
        ModelSnapshot {
            tick: self.scheduler.tick_count(),
            halted: self.halted,
            cleaner_positions,
            dirt_positions,
        }
    }

    /// Returns an immutable reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Activation passes completed so far.
    #[must_use]
    pub const fn tick_count(&self) -> Tick {
        self.scheduler.tick_count()
    }

    /// Whether the run has reached its terminal state.
    #[must_use]
    pub const fn halted(&self) -> bool {
        self.halted
    }

    /// Live dirt agents left on the grid.
    #[must_use]
    pub fn remaining_dirt(&self) -> usize {
        self.scheduler.dirt_remaining()
    }

    /// Statistics of the most recently completed tick (or the pre-run state).
    #[must_use]
    pub const fn last_result(&self) -> TickResult {
        self.last_result
    }

    /// Read-only access to the occupancy grid.
    #[must_use]
    pub fn grid(&self) -> &OccupancyGrid<AgentId> {
        &self.grid
    }

    /// Read-only access to the scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Replace the observer sink.
    pub fn set_observer(&mut self, observer: Box<dyn ModelObserver>) {
        self.observer = observer;
    }

    /// Iterate over retained tick results, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &TickResult> {
        self.history.iter()
    }
}
