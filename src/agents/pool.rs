//! Agent pool and the global movement cadence
//!
//! All agents share one movement clock: at most one step each per elapsed
//! interval. Within a step, pawns move first so that an alert they raise
//! reaches the hunters before the hunters take their own step.

use serde::Serialize;

use crate::agents::agent::{Agent, AgentContext, AgentKind, StepOutcome};
use crate::core::types::{AgentId, Millis, Position};
use crate::maze::grid::Grid;
use crate::simulation::events::{EventLog, SimEventKind};
use crate::simulation::occupancy::Occupancy;

/// Mutable world slice the pool steps agents against
pub struct AgentWorld<'a> {
    pub grid: &'a Grid,
    pub occupancy: &'a mut Occupancy,
    pub player: Position,
    pub noise_level: u32,
    pub pawn_alert_range: u32,
}

/// Result of asking the pool to advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PoolAdvance {
    /// Movement interval has not elapsed; nothing moved
    Gated,
    Advanced,
    CaughtPlayer { by: AgentId },
}

#[derive(Debug, Clone)]
pub struct AgentPool {
    agents: Vec<Agent>,
    movement_interval_ms: Millis,
    last_move_at: Millis,
}

impl AgentPool {
    pub fn new(agents: Vec<Agent>, movement_interval_ms: Millis, now: Millis) -> Self {
        Self {
            agents,
            movement_interval_ms,
            last_move_at: now,
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// (id, agent) pairs in pool order
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &Agent)> {
        self.agents
            .iter()
            .enumerate()
            .map(|(i, a)| (AgentId(i as u32), a))
    }

    pub fn ids_of_kind(&self, kind: AgentKind) -> Vec<AgentId> {
        self.iter()
            .filter(|(_, a)| a.kind() == kind)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn last_move_at(&self) -> Millis {
        self.last_move_at
    }

    /// Has a full movement interval elapsed since the last step?
    pub fn is_due(&self, now: Millis) -> bool {
        now.saturating_sub(self.last_move_at) >= self.movement_interval_ms
    }

    /// Step every agent once, if the movement interval has elapsed
    ///
    /// Stops at the first agent that reaches the player.
    pub fn advance(
        &mut self,
        now: Millis,
        mut world: AgentWorld<'_>,
        events: &mut EventLog,
    ) -> PoolAdvance {
        if !self.is_due(now) {
            return PoolAdvance::Gated;
        }
        self.last_move_at = now;

        let mut order = self.ids_of_kind(AgentKind::Pawn);
        order.extend(self.ids_of_kind(AgentKind::Hunter));

        for id in order {
            let outcome = {
                let Some(agent) = self.agents.get_mut(id.index()) else {
                    continue;
                };
                let ctx = AgentContext {
                    id,
                    grid: world.grid,
                    occupancy: &*world.occupancy,
                    player: world.player,
                    noise_level: world.noise_level,
                    pawn_alert_range: world.pawn_alert_range,
                };
                agent.advance(&ctx)
            };

            match outcome {
                StepOutcome::Stayed => {}
                StepOutcome::Moved { from, to } => {
                    world.occupancy.relocate(from, to);
                    events.push(now, SimEventKind::AgentStepped { id, from, to });
                }
                StepOutcome::RaisedAlert { from, to } => {
                    if from != to {
                        world.occupancy.relocate(from, to);
                        events.push(now, SimEventKind::AgentStepped { id, from, to });
                    }
                    self.broadcast_alert(id, world.grid, world.player, now, events);
                }
                StepOutcome::Disengaged { at } => {
                    tracing::debug!("Hunter {:?} lost the trail at {:?}", id, at);
                    events.push(now, SimEventKind::HunterDisengaged { id, at });
                }
                StepOutcome::CaughtPlayer { at } => {
                    tracing::info!("Agent {:?} caught the player at {:?}", id, at);
                    events.push(now, SimEventKind::PlayerCaught { by: id, at });
                    return PoolAdvance::CaughtPlayer { by: id };
                }
            }
        }

        PoolAdvance::Advanced
    }

    /// Send every hunter after the player's current position
    fn broadcast_alert(
        &mut self,
        source: AgentId,
        grid: &Grid,
        target: Position,
        now: Millis,
        events: &mut EventLog,
    ) {
        let mut alerted = Vec::new();
        for (i, agent) in self.agents.iter_mut().enumerate() {
            if let Some(hunter) = agent.as_hunter_mut() {
                if hunter.alert(grid, target) {
                    alerted.push((AgentId(i as u32), hunter.path().len()));
                }
            }
        }

        tracing::debug!(
            "Pawn {:?} raised the alarm; {} hunter(s) converging on {:?}",
            source,
            alerted.len(),
            target
        );
        events.push(
            now,
            SimEventKind::AlertRaised {
                by: source,
                target,
                hunters_alerted: alerted.len(),
            },
        );
        for (id, path_len) in alerted {
            events.push(now, SimEventKind::HunterAlerted { id, path_len });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::hunter::{Hunter, HunterState};
    use crate::agents::pawn::Pawn;
    use crate::simulation::occupancy::Occupant;

    fn room() -> Grid {
        Grid::from_rows(&[
            "#######", //
            "#.....#", //
            "#.....#", //
            "#.....#", //
            "#######",
        ])
        .unwrap()
    }

    fn setup(agents: Vec<Agent>) -> (AgentPool, Occupancy) {
        let mut occ = Occupancy::new();
        for (i, a) in agents.iter().enumerate() {
            occ.place(a.position(), Occupant::Agent(AgentId(i as u32)));
        }
        (AgentPool::new(agents, 500, 0), occ)
    }

    fn world<'a>(grid: &'a Grid, occ: &'a mut Occupancy, player: Position, noise: u32) -> AgentWorld<'a> {
        AgentWorld {
            grid,
            occupancy: occ,
            player,
            noise_level: noise,
            pawn_alert_range: 3,
        }
    }

    #[test]
    fn test_gate_blocks_early_ticks() {
        let grid = room();
        let pawn = Pawn::new(vec![Position::new(1, 4), Position::new(1, 5)]).unwrap();
        let (mut pool, mut occ) = setup(vec![pawn.into()]);
        let mut events = EventLog::new();

        let result = pool.advance(499, world(&grid, &mut occ, Position::new(3, 1), 0), &mut events);
        assert_eq!(result, PoolAdvance::Gated);
        assert_eq!(pool.agents()[0].position(), Position::new(1, 4));
        assert!(events.is_empty());

        let result = pool.advance(500, world(&grid, &mut occ, Position::new(3, 1), 0), &mut events);
        assert_eq!(result, PoolAdvance::Advanced);
        assert_eq!(pool.agents()[0].position(), Position::new(1, 5));
        assert_eq!(pool.last_move_at(), 500);
    }

    #[test]
    fn test_occupancy_follows_agents() {
        let grid = room();
        let pawn = Pawn::new(vec![Position::new(1, 4), Position::new(1, 5)]).unwrap();
        let (mut pool, mut occ) = setup(vec![pawn.into()]);
        let mut events = EventLog::new();

        pool.advance(500, world(&grid, &mut occ, Position::new(3, 1), 0), &mut events);
        assert_eq!(occ.agent_at(Position::new(1, 5)), Some(AgentId(0)));
        assert!(!occ.is_occupied(Position::new(1, 4)));
    }

    #[test]
    fn test_pawn_alert_reaches_hunter_same_step() {
        let grid = room();
        // Hunter listed first; pawns still move first
        let hunter = Hunter::new(Position::new(3, 5), 1);
        let pawn = Pawn::new(vec![Position::new(1, 3), Position::new(1, 2)]).unwrap();
        let (mut pool, mut occ) = setup(vec![hunter.into(), pawn.into()]);
        let mut events = EventLog::new();

        let player = Position::new(2, 1);
        let result = pool.advance(500, world(&grid, &mut occ, player, 1), &mut events);
        assert_eq!(result, PoolAdvance::Advanced);

        let hunter = pool.agents()[0].as_hunter().unwrap();
        assert_eq!(hunter.state(), HunterState::Pursuing);
        // One step closer along a 5-step route
        assert_eq!(hunter.position().distance(&player), 4);
        assert_eq!(hunter.path().len(), 4);
        assert!(events
            .iter()
            .any(|e| matches!(e.kind, SimEventKind::AlertRaised { hunters_alerted: 1, .. })));
    }

    #[test]
    fn test_catch_stops_the_step() {
        let grid = room();
        let pawn = Pawn::new(vec![Position::new(1, 1), Position::new(1, 2)]).unwrap();
        let hunter = Hunter::new(Position::new(3, 5), 1);
        let (mut pool, mut occ) = setup(vec![pawn.into(), hunter.into()]);
        let mut events = EventLog::new();

        let result = pool.advance(500, world(&grid, &mut occ, Position::new(1, 2), 0), &mut events);
        assert_eq!(result, PoolAdvance::CaughtPlayer { by: AgentId(0) });
        assert!(events
            .iter()
            .any(|e| matches!(e.kind, SimEventKind::PlayerCaught { .. })));
    }

    #[test]
    fn test_ids_of_kind() {
        let hunter = Hunter::new(Position::new(3, 5), 1);
        let pawn = Pawn::new(vec![Position::new(1, 3)]).unwrap();
        let (pool, _) = setup(vec![hunter.into(), pawn.into()]);
        assert_eq!(pool.ids_of_kind(AgentKind::Pawn), vec![AgentId(1)]);
        assert_eq!(pool.ids_of_kind(AgentKind::Hunter), vec![AgentId(0)]);
        assert_eq!(pool.len(), 2);
        assert!(pool.get(AgentId(2)).is_none());
    }
}
