//! Simulation state and the per-tick update contract
//!
//! `Simulation` owns the static terrain, the occupancy layer, the player, the
//! agent pool and the noise field. The presentation layer drives it through
//! `handle_input` and `tick(now)` and reads it back through `snapshot`.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::agents::{Agent, AgentPool, AgentWorld, Hunter, Pawn, PoolAdvance};
use crate::core::config::SimulationConfig;
use crate::core::constants::{MAZE_START, PAWN_PATROL_STEPS, SPAWN_SEED_OFFSET};
use crate::core::error::{MazeError, MoveError, Result};
use crate::core::types::{AgentId, Direction, Millis, Position};
use crate::maze::generation::generate_maze;
use crate::maze::grid::{Grid, Terrain};
use crate::maze::placement::{patrol_route, place_finish, spawn_points};
use crate::noise::field::NoiseField;
use crate::noise::propagation::overlay_cells;
use crate::simulation::events::{EventLog, SimEvent, SimEventKind};
use crate::simulation::occupancy::{Occupancy, Occupant};
use crate::simulation::snapshot::{AgentView, Snapshot};

/// Where a run stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Running,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Running)
    }
}

/// Result of a player movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveResult {
    Moved,
    Blocked(MoveError),
    ReachedFinish,
    CaughtByAgent,
    /// The run is already over; nothing changed
    Terminal,
}

/// Result of advancing the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TickResult {
    Continue,
    Win,
    Lose,
}

impl From<Outcome> for TickResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Running => TickResult::Continue,
            Outcome::Won => TickResult::Win,
            Outcome::Lost => TickResult::Lose,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    occupancy: Occupancy,
    player: Position,
    agents: AgentPool,
    noise: NoiseField,
    config: SimulationConfig,
    outcome: Outcome,
    /// Latest timestamp seen by `tick`; player moves are stamped with it
    clock: Millis,
    events: EventLog,
}

impl Simulation {
    /// Generate a maze and populate it
    ///
    /// The maze comes from `seed`; spawn cells and patrol routes come from a
    /// second stream derived from the same seed, so a run is fully
    /// reproducible.
    pub fn new(width: usize, height: usize, seed: u64, config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut grid = generate_maze(width, height, seed, config.extra_opening_fraction)?;
        let start = MAZE_START;
        let finish = place_finish(&mut grid, start)?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(SPAWN_SEED_OFFSET));
        let spawns = spawn_points(&grid, start, &[], config.agent_count(), &mut rng)?;
        let (pawn_spawns, hunter_spawns) = spawns.split_at(config.num_pawns);

        let mut agents: Vec<Agent> = Vec::with_capacity(spawns.len());
        for &spawn in pawn_spawns {
            let mut avoid: Vec<Position> = spawns.iter().copied().filter(|p| *p != spawn).collect();
            avoid.push(start);
            avoid.push(finish);

            let route = patrol_route(&grid, spawn, PAWN_PATROL_STEPS, &avoid, &mut rng);
            let pawn = Pawn::new(route).ok_or_else(|| {
                MazeError::Placement(format!("no patrol route from {:?}", spawn))
            })?;
            agents.push(pawn.into());
        }
        for &spawn in hunter_spawns {
            agents.push(Hunter::new(spawn, config.hunter_detection_range).into());
        }

        tracing::info!(
            "Populated {}x{} maze (seed {}): {} pawns, {} hunters, finish at {:?}",
            width,
            height,
            seed,
            pawn_spawns.len(),
            hunter_spawns.len(),
            finish
        );

        Self::with_layout(grid, start, agents, config)
    }

    /// Build a simulation from a hand-made grid and agent list
    ///
    /// The grid must have a solid wall border and exactly one finish. The
    /// player starts on an open cell; agents stand on distinct walkable cells
    /// away from the player, and pawn routes must be closed walks.
    pub fn with_layout(
        grid: Grid,
        player: Position,
        agents: Vec<Agent>,
        config: SimulationConfig,
    ) -> Result<Self> {
        config.validate()?;

        if grid.cells_of(Terrain::Finish).count() != 1 {
            return Err(MazeError::InvalidLayout(
                "grid must have exactly one finish cell".into(),
            ));
        }
        if let Some(pos) = grid
            .positions()
            .find(|p| grid.is_border(*p) && !grid.is_wall(*p))
        {
            return Err(MazeError::InvalidLayout(format!(
                "border cell {:?} is not a wall",
                pos
            )));
        }
        if grid.get(player) != Some(Terrain::Open) {
            return Err(MazeError::InvalidLayout(format!(
                "player must start on an open cell, got {:?}",
                player
            )));
        }

        let mut occupancy = Occupancy::new();
        occupancy.place(player, Occupant::Player);

        for (i, agent) in agents.iter().enumerate() {
            let id = AgentId(i as u32);
            let pos = agent.position();
            if !grid.is_walkable(pos) {
                return Err(MazeError::InvalidLayout(format!(
                    "agent {:?} placed on non-walkable cell {:?}",
                    id, pos
                )));
            }
            if let Some(pawn) = agent.as_pawn() {
                let route_walkable = pawn.route().iter().all(|p| grid.is_walkable(*p));
                if !route_walkable || !pawn.route_is_closed() {
                    return Err(MazeError::InvalidLayout(format!(
                        "pawn {:?} has a broken patrol route",
                        id
                    )));
                }
            }
            if !occupancy.place(pos, Occupant::Agent(id)) {
                return Err(MazeError::InvalidLayout(format!(
                    "agent {:?} shares cell {:?}",
                    id, pos
                )));
            }
        }

        Ok(Self {
            agents: AgentPool::new(agents, config.enemy_movement_interval_ms, 0),
            noise: NoiseField::new(config.noise_decay_interval_ms, 0),
            grid,
            occupancy,
            player,
            config,
            outcome: Outcome::Running,
            clock: 0,
            events: EventLog::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn agents(&self) -> &AgentPool {
        &self.agents
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn clock(&self) -> Millis {
        self.clock
    }

    /// Who, if anyone, stands on `pos`
    pub fn occupant_at(&self, pos: Position) -> Option<Occupant> {
        self.occupancy.at(pos)
    }

    /// Can nothing enter `pos`? True for walls, out-of-bounds cells and
    /// cells held by an agent.
    pub fn is_blocked(&self, pos: Position) -> bool {
        !self.grid.is_walkable(pos) || self.occupancy.agent_at(pos).is_some()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.events.drain()
    }

    /// Apply one directional intent from the player
    ///
    /// Movement is not time-gated. Every accepted move raises the noise
    /// level by one.
    pub fn handle_input(&mut self, direction: Direction) -> MoveResult {
        if self.is_terminal() {
            return MoveResult::Terminal;
        }

        let target = self.player.step(direction);
        let terrain = match self.grid.get(target) {
            None => return self.reject(MoveError::OutOfBoundsMove(target)),
            Some(Terrain::Wall) => return self.reject(MoveError::BlockedMove(target)),
            Some(terrain) => terrain,
        };

        if let Some(id) = self.occupancy.agent_at(target) {
            self.events
                .push(self.clock, SimEventKind::PlayerCaught { by: id, at: target });
            self.conclude(Outcome::Lost);
            return MoveResult::CaughtByAgent;
        }

        let from = self.player;
        self.occupancy.relocate(from, target);
        self.player = target;
        self.noise.on_player_move(self.clock);
        self.events.push(
            self.clock,
            SimEventKind::PlayerMoved {
                from,
                to: target,
                noise: self.noise.level(),
            },
        );

        if terrain == Terrain::Finish {
            self.events
                .push(self.clock, SimEventKind::FinishReached { at: target });
            self.conclude(Outcome::Won);
            return MoveResult::ReachedFinish;
        }

        MoveResult::Moved
    }

    /// Advance time to `now`
    ///
    /// Agents move if their interval has elapsed, then noise decays if its
    /// interval has elapsed. A `now` earlier than a previous tick is treated
    /// as no time passing.
    pub fn tick(&mut self, now: Millis) -> TickResult {
        if self.is_terminal() {
            return self.outcome.into();
        }
        self.clock = self.clock.max(now);
        let now = self.clock;

        let world = AgentWorld {
            grid: &self.grid,
            occupancy: &mut self.occupancy,
            player: self.player,
            noise_level: self.noise.level(),
            pawn_alert_range: self.config.pawn_alert_range,
        };
        if let PoolAdvance::CaughtPlayer { .. } = self.agents.advance(now, world, &mut self.events) {
            self.conclude(Outcome::Lost);
            return TickResult::Lose;
        }

        if self.noise.tick(now) {
            self.events.push(
                now,
                SimEventKind::NoiseDecayed {
                    level: self.noise.level(),
                },
            );
        }

        self.outcome.into()
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        let agents = self
            .agents
            .iter()
            .map(|(id, agent)| AgentView {
                id,
                kind: agent.kind(),
                position: agent.position(),
                hunter_state: agent.as_hunter().map(|h| h.state()),
            })
            .collect();

        Snapshot {
            at: self.clock,
            grid: self.grid.clone(),
            player: self.player,
            agents,
            noise_level: self.noise.level(),
            noise_overlay: overlay_cells(&self.grid, self.player, self.noise.propagation_radius()),
            outcome: self.outcome,
        }
    }

    fn reject(&mut self, reason: MoveError) -> MoveResult {
        self.events
            .push(self.clock, SimEventKind::PlayerBlocked { reason });
        MoveResult::Blocked(reason)
    }

    fn conclude(&mut self, outcome: Outcome) {
        tracing::debug!("Run ended at {}ms: {:?}", self.clock, outcome);
        self.outcome = outcome;
    }
}
