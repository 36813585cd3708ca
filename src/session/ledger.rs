//! Score ledger - total score and the set of targets already scored.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::config::ScoreTable;

/// Authoritative score for one session.
///
/// A target contributes at most once; the membership check always runs
/// before anything is added.
#[derive(Debug, Default, Clone)]
pub struct ScoreLedger {
    total: u32,
    scored: HashSet<Entity>,
}

impl ScoreLedger {
    /// Points for a target: its own declared value first, then the tag table.
    pub fn resolve_points(declared: Option<u32>, tag: &str, table: &ScoreTable) -> u32 {
        declared.or_else(|| table.get(tag)).unwrap_or(0)
    }

    pub fn is_scored(&self, target: Entity) -> bool {
        self.scored.contains(&target)
    }

    /// Add `points` for `target`. Returns false if nothing was added.
    pub fn record(&mut self, target: Entity, points: u32) -> bool {
        if points == 0 || self.is_scored(target) {
            return false;
        }
        self.total = self.total.saturating_add(points);
        self.scored.insert(target);
        true
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn scored_count(&self) -> usize {
        self.scored.len()
    }
}
