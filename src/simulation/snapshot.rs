//! Read-only views handed to the presentation layer

use serde::Serialize;

use crate::agents::{AgentKind, HunterState};
use crate::core::types::{AgentId, Millis, Position};
use crate::maze::grid::{Grid, Terrain};
use crate::simulation::state::Outcome;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentView {
    pub id: AgentId,
    pub kind: AgentKind,
    pub position: Position,
    /// None for pawns
    pub hunter_state: Option<HunterState>,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub at: Millis,
    pub grid: Grid,
    pub player: Position,
    pub agents: Vec<AgentView>,
    pub noise_level: u32,
    /// Cells the player's noise currently reaches, sorted
    pub noise_overlay: Vec<Position>,
    pub outcome: Outcome,
}

impl Snapshot {
    pub fn agent_at(&self, pos: Position) -> Option<&AgentView> {
        self.agents.iter().find(|a| a.position == pos)
    }

    /// Plain-text frame, one string per row
    ///
    /// `@` player, `p` pawn, `H` idle hunter, `!` pursuing hunter, `~` open
    /// cell inside the noise overlay; terrain glyphs elsewhere.
    pub fn render_rows(&self) -> Vec<String> {
        (0..self.grid.height() as i32)
            .map(|row| {
                (0..self.grid.width() as i32)
                    .map(|col| self.glyph_at(Position::new(row, col)))
                    .collect()
            })
            .collect()
    }

    fn glyph_at(&self, pos: Position) -> char {
        if pos == self.player {
            return '@';
        }
        if let Some(agent) = self.agent_at(pos) {
            return match agent.hunter_state {
                None => 'p',
                Some(HunterState::Patrolling) => 'H',
                Some(_) => '!',
            };
        }
        match self.grid.get(pos) {
            Some(Terrain::Open) if self.noise_overlay.binary_search(&pos).is_ok() => '~',
            Some(terrain) => terrain.glyph(),
            None => ' ',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            at: 0,
            grid: Grid::from_rows(&["#####", "#..F#", "#####"]).unwrap(),
            player: Position::new(1, 1),
            agents: vec![AgentView {
                id: AgentId(0),
                kind: AgentKind::Hunter,
                position: Position::new(1, 2),
                hunter_state: Some(HunterState::Pursuing),
            }],
            noise_level: 0,
            noise_overlay: vec![],
            outcome: Outcome::Running,
        }
    }

    #[test]
    fn test_render_rows() {
        let rows = snapshot().render_rows();
        assert_eq!(rows, vec!["#####", "#@!F#", "#####"]);
    }

    #[test]
    fn test_overlay_marks_open_cells() {
        let mut snap = snapshot();
        snap.agents.clear();
        snap.noise_overlay = vec![Position::new(1, 1), Position::new(1, 2)];
        assert_eq!(snap.render_rows()[1], "#@~F#");
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_string(&snapshot()).unwrap();
        assert!(json.contains("\"noise_level\":0"));
        assert!(json.contains("Pursuing"));
    }
}
