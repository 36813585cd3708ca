//! Session coordinator - one stage attempt from start to result.

use bevy::prelude::*;

use super::ledger::ScoreLedger;
use super::references::ResolvedReferences;
use super::timer::{SessionTimer, TimerTick};
use crate::combat::TargetTag;
use crate::config::{ScoreTable, StageCatalog};
use crate::persistence::StageProgress;

/// Result of one finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub stage_index: usize,
    /// Boss defeated and the stage threshold reached
    pub cleared: bool,
    pub boss_defeated: bool,
    pub final_score: u32,
    pub score_to_clear: u32,
    /// This clear raised the highest unlocked stage
    pub unlocked_next: bool,
    /// A following stage exists and is unlocked
    pub next_available: bool,
}

/// Sent once when a session ends, by boss knock-out or by the timer.
#[derive(Event, Debug, Clone, Copy)]
pub struct SessionEnded {
    pub outcome: SessionOutcome,
}

/// Why a score request was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotInitialized,
    Ended,
    AlreadyScored,
}

/// What a score request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOutcome {
    Ignored(IgnoreReason),
    /// Target resolved to zero points
    NoValue,
    Scored { points: u32, total: u32 },
    /// The boss was struck; the session must end as cleared
    BossDefeated { points: u32, total: u32 },
}

/// State of the running stage attempt.
///
/// Reset on every stage entry. Until `initialize` succeeds the session
/// rejects input and scoring.
#[derive(Resource, Debug, Default)]
pub struct GameSession {
    stage_index: usize,
    ledger: ScoreLedger,
    timer: SessionTimer,
    references: Option<ResolvedReferences>,
    ended: bool,
    outcome: Option<SessionOutcome>,
}

impl GameSession {
    /// Start a fresh session for `stage_index`.
    pub fn initialize(&mut self, stage_index: usize, time_limit: f32, references: ResolvedReferences) {
        *self = Self {
            stage_index,
            references: Some(references),
            ..default()
        };
        self.timer.start(time_limit);
    }

    /// Drop back to the uninitialized state.
    pub fn deactivate(&mut self) {
        *self = Self::default();
    }

    pub fn is_initialized(&self) -> bool {
        self.references.is_some()
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Initialized and still running.
    pub fn is_active(&self) -> bool {
        self.is_initialized() && !self.ended
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn total(&self) -> u32 {
        self.ledger.total()
    }

    pub fn remaining_time(&self) -> f32 {
        self.timer.remaining()
    }

    pub fn references(&self) -> Option<&ResolvedReferences> {
        self.references.as_ref()
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    /// Score a struck target.
    pub fn add_score(
        &mut self,
        target: Entity,
        tag: &str,
        declared: Option<u32>,
        table: &ScoreTable,
    ) -> ScoreOutcome {
        if !self.is_initialized() {
            return ScoreOutcome::Ignored(IgnoreReason::NotInitialized);
        }
        if self.ended {
            return ScoreOutcome::Ignored(IgnoreReason::Ended);
        }
        if self.ledger.is_scored(target) {
            return ScoreOutcome::Ignored(IgnoreReason::AlreadyScored);
        }

        let points = ScoreLedger::resolve_points(declared, tag, table);
        let recorded = self.ledger.record(target, points);
        let points = if recorded { points } else { 0 };
        let total = self.ledger.total();

        if TargetTag::is_enemy(tag) {
            ScoreOutcome::BossDefeated { points, total }
        } else if recorded {
            ScoreOutcome::Scored { points, total }
        } else {
            ScoreOutcome::NoValue
        }
    }

    /// Count the clock down. Idle once the session has ended.
    pub fn tick(&mut self, delta: f32) -> TimerTick {
        if !self.is_active() {
            return TimerTick::Idle;
        }
        self.timer.tick(delta)
    }

    /// End the session. Only the first call has any effect.
    pub fn end(
        &mut self,
        boss_defeated: bool,
        catalog: &StageCatalog,
        progress: &mut StageProgress,
    ) -> Option<SessionOutcome> {
        if !self.is_active() {
            return None;
        }
        self.ended = true;
        self.timer.stop();

        let final_score = self.ledger.total();
        let score_to_clear = catalog.score_to_clear(self.stage_index);
        let cleared = boss_defeated && final_score >= score_to_clear;

        let unlocked_next = if cleared {
            match progress.record_clear(self.stage_index) {
                Ok(unlocked) => unlocked,
                Err(e) => {
                    error!("Failed to save stage progress: {}", e);
                    false
                }
            }
        } else {
            false
        };

        let next_index = self.stage_index + 1;
        let outcome = SessionOutcome {
            stage_index: self.stage_index,
            cleared,
            boss_defeated,
            final_score,
            score_to_clear,
            unlocked_next,
            next_available: next_index < catalog.len() && progress.is_unlocked(next_index),
        };
        self.outcome = Some(outcome);
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{
        MemoryPreferenceStore, PersistenceError, PreferenceStore, CLEARED_STAGE_KEY,
    };

    /// Store that never manages to save.
    #[derive(Default)]
    struct ReadOnlyStore(MemoryPreferenceStore);

    impl PreferenceStore for ReadOnlyStore {
        fn get_int(&self, key: &str, default: i32) -> i32 {
            self.0.get_int(key, default)
        }

        fn set_int(&mut self, key: &str, value: i32) {
            self.0.set_int(key, value);
        }

        fn save(&mut self) -> Result<(), PersistenceError> {
            Err(PersistenceError::Write {
                path: "prefs.ron".to_string(),
                details: "read-only".to_string(),
            })
        }
    }

    fn refs() -> ResolvedReferences {
        let e = Entity::from_raw;
        ResolvedReferences {
            game_ui: e(1),
            score_text: e(2),
            timer_text: e(3),
            result_ui: e(4),
            result_score_text: e(5),
            result_message_text: e(6),
            next_stage_button: e(7),
            enemy: e(8),
        }
    }

    fn started(stage: usize) -> GameSession {
        let mut session = GameSession::default();
        session.initialize(stage, 30.0, refs());
        session
    }

    fn progress() -> StageProgress {
        StageProgress::new(Box::new(MemoryPreferenceStore::default()))
    }

    #[test]
    fn uninitialized_session_rejects_scoring() {
        let mut session = GameSession::default();
        let outcome = session.add_score(Entity::from_raw(20), "Crate", None, &ScoreTable::default());

        assert_eq!(outcome, ScoreOutcome::Ignored(IgnoreReason::NotInitialized));
        assert_eq!(session.tick(1.0), TimerTick::Idle);
    }

    #[test]
    fn each_target_scores_once() {
        let mut session = started(0);
        let table = ScoreTable::default();
        let target = Entity::from_raw(20);

        assert_eq!(
            session.add_score(target, "Crate", Some(50), &table),
            ScoreOutcome::Scored { points: 50, total: 50 }
        );
        assert_eq!(
            session.add_score(target, "Crate", Some(50), &table),
            ScoreOutcome::Ignored(IgnoreReason::AlreadyScored)
        );
        assert_eq!(session.total(), 50);
    }

    #[test]
    fn unknown_tag_scores_nothing() {
        let mut session = started(0);
        let outcome = session.add_score(Entity::from_raw(21), "Lamp", None, &ScoreTable::default());

        assert_eq!(outcome, ScoreOutcome::NoValue);
        assert_eq!(session.total(), 0);
    }

    #[test]
    fn boss_hit_reports_defeat_even_without_points() {
        let mut session = started(0);
        let table = ScoreTable(Default::default());

        let outcome = session.add_score(Entity::from_raw(8), TargetTag::ENEMY, None, &table);
        assert_eq!(outcome, ScoreOutcome::BossDefeated { points: 0, total: 0 });
    }

    #[test]
    fn clear_above_threshold_unlocks_next_stage() {
        let mut session = started(0);
        let mut progress = progress();
        let catalog = StageCatalog::default();
        let table = ScoreTable::default();

        session.add_score(Entity::from_raw(8), TargetTag::ENEMY, None, &table);
        let outcome = session
            .end(true, &catalog, &mut progress)
            .expect("first end produces an outcome");

        assert!(outcome.cleared);
        assert!(outcome.unlocked_next);
        assert!(outcome.next_available);
        assert_eq!(outcome.final_score, 100);
        assert_eq!(progress.highest_unlocked(), 1);
    }

    #[test]
    fn unsaved_unlock_offers_no_next_stage() {
        let mut session = started(0);
        let mut progress = StageProgress::new(Box::new(ReadOnlyStore::default()));
        let table = ScoreTable::default();

        session.add_score(Entity::from_raw(8), TargetTag::ENEMY, None, &table);
        let outcome = session
            .end(true, &StageCatalog::default(), &mut progress)
            .expect("first end produces an outcome");

        assert!(outcome.cleared);
        assert!(!outcome.unlocked_next);
        assert!(!outcome.next_available);
        assert_eq!(progress.highest_unlocked(), 0);
    }

    #[test]
    fn boss_defeat_below_threshold_is_not_a_clear() {
        let mut session = started(1);
        let mut progress = progress();

        let outcome = session
            .end(true, &StageCatalog::default(), &mut progress)
            .expect("first end produces an outcome");

        assert!(!outcome.cleared);
        assert!(outcome.boss_defeated);
        assert!(!outcome.next_available);
        assert_eq!(progress.highest_unlocked(), 0);
    }

    #[test]
    fn end_is_idempotent() {
        let mut session = started(0);
        let mut progress = progress();
        let catalog = StageCatalog::default();

        assert!(session.end(false, &catalog, &mut progress).is_some());
        assert!(session.end(true, &catalog, &mut progress).is_none());
        assert!(session.ended());
        assert_eq!(session.outcome().map(|o| o.boss_defeated), Some(false));
    }

    #[test]
    fn no_scoring_after_end() {
        let mut session = started(0);
        let mut progress = progress();
        session.end(false, &StageCatalog::default(), &mut progress);

        let outcome = session.add_score(Entity::from_raw(30), "Crate", None, &ScoreTable::default());
        assert_eq!(outcome, ScoreOutcome::Ignored(IgnoreReason::Ended));
        assert_eq!(session.tick(1.0), TimerTick::Idle);
    }

    #[test]
    fn timer_expiry_is_reported_once() {
        let mut session = started(0);

        assert_eq!(session.tick(29.0), TimerTick::Running);
        assert_eq!(session.tick(2.0), TimerTick::Expired);
        assert_eq!(session.remaining_time(), 0.0);
        assert_eq!(session.tick(1.0), TimerTick::Idle);
    }

    #[test]
    fn last_stage_never_offers_a_next_stage() {
        let mut session = started(2);
        let mut store = MemoryPreferenceStore::default();
        store.set_int(CLEARED_STAGE_KEY, 2);
        let mut progress = StageProgress::new(Box::new(store));
        let table = ScoreTable::default();

        session.add_score(Entity::from_raw(40), "Crate", Some(200), &table);
        let outcome = session
            .end(true, &StageCatalog::default(), &mut progress)
            .expect("first end produces an outcome");

        assert!(outcome.cleared);
        assert!(!outcome.next_available);
    }

    #[test]
    fn reinitialize_resets_score() {
        let mut session = started(0);
        session.add_score(Entity::from_raw(20), "Crate", None, &ScoreTable::default());
        session.initialize(0, 30.0, refs());

        assert_eq!(session.total(), 0);
        assert!(session.is_active());
    }
}
