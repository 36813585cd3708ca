//! Session systems - start, scoring, countdown, end and result timing.

use bevy::prelude::*;

use super::coordinator::{GameSession, ScoreOutcome, SessionEnded};
use super::presentation::{PresentationStep, ResultPresentation};
use super::references::SceneReferences;
use super::timer::TimerTick;
use super::PresentResult;
use crate::combat::CombatSet;
use crate::config::{GameConfig, StageCatalog};
use crate::core::{
    CurrentStage, GameState, RagdollForce, RagdollRequest, ScoreRequest, SlowMotion,
    StageSetupSet,
};
use crate::enemies::boss_push_force;
use crate::persistence::StageProgress;

/// Configure session systems.
pub fn setup_session_systems(app: &mut App) {
    app.init_resource::<GameSession>()
        .init_resource::<ResultPresentation>()
        .init_resource::<SceneReferences>()
        .add_event::<SessionEnded>()
        .add_event::<PresentResult>()
        .add_systems(
            OnEnter(GameState::InStage),
            initialize_session.in_set(StageSetupSet::Session),
        )
        .add_systems(
            Update,
            (apply_score_requests, tick_session_timer, advance_result_presentation)
                .chain()
                .after(CombatSet::Consequences)
                .run_if(in_state(GameState::InStage)),
        )
        .add_systems(OnExit(GameState::InStage), teardown_session);
}

/// Start the session once the stage scene is built.
fn initialize_session(
    config: Res<GameConfig>,
    current: Res<CurrentStage>,
    references: Res<SceneReferences>,
    mut session: ResMut<GameSession>,
    mut presentation: ResMut<ResultPresentation>,
    mut ragdolls: EventWriter<RagdollRequest>,
) {
    presentation.reset();

    let resolved = match references.resolve() {
        Ok(resolved) => resolved,
        Err(e) => {
            error!("{}. Session not started.", e);
            session.deactivate();
            return;
        }
    };

    session.initialize(current.index, config.session.time_limit, resolved);
    ragdolls.send(RagdollRequest {
        enemy: resolved.enemy,
        enable: false,
    });
    info!(
        "Stage {} started with {:.0}s on the clock",
        current.index + 1,
        config.session.time_limit
    );
}

/// Everything needed to close a session and schedule its result screen.
struct SessionEnd<'a> {
    catalog: &'a StageCatalog,
    config: &'a GameConfig,
    current_speed: f32,
}

fn finish_session(
    session: &mut GameSession,
    boss_defeated: bool,
    end: SessionEnd,
    progress: &mut StageProgress,
    slow_motion: &mut SlowMotion,
    presentation: &mut ResultPresentation,
    ended: &mut EventWriter<SessionEnded>,
) {
    let Some(outcome) = session.end(boss_defeated, end.catalog, progress) else {
        return;
    };

    info!(
        "Stage {} ended: score {} / {}, {}",
        outcome.stage_index + 1,
        outcome.final_score,
        outcome.score_to_clear,
        if outcome.cleared { "cleared" } else { "failed" }
    );

    // The result ramp owns the clock from here on
    slow_motion.cancel();
    presentation.start(
        outcome,
        end.current_speed,
        end.config.session.result_ramp_duration,
        end.config.session.result_delay,
    );
    ended.send(SessionEnded { outcome });
}

/// Score struck targets and end the session when the boss goes down.
#[allow(clippy::too_many_arguments)]
fn apply_score_requests(
    mut requests: EventReader<ScoreRequest>,
    config: Res<GameConfig>,
    catalog: Res<StageCatalog>,
    virtual_time: Res<Time<Virtual>>,
    transforms: Query<&GlobalTransform>,
    mut session: ResMut<GameSession>,
    mut progress: ResMut<StageProgress>,
    mut slow_motion: ResMut<SlowMotion>,
    mut presentation: ResMut<ResultPresentation>,
    mut ragdolls: EventWriter<RagdollRequest>,
    mut forces: EventWriter<RagdollForce>,
    mut ended: EventWriter<SessionEnded>,
) {
    for request in requests.read() {
        match session.add_score(
            request.target,
            &request.tag,
            request.declared_score,
            &config.scoring,
        ) {
            ScoreOutcome::Scored { points, total } => {
                debug!("{} +{} (total {})", request.tag, points, total);
            }
            ScoreOutcome::NoValue => {
                debug!("{} has no score value", request.tag);
            }
            ScoreOutcome::Ignored(reason) => {
                debug!("Score request for {:?} ignored: {:?}", request.target, reason);
            }
            ScoreOutcome::BossDefeated { points, total } => {
                info!("Boss defeated (+{}, total {})", points, total);

                let up = transforms
                    .get(request.target)
                    .map_or(Vec3::Y, |t| *t.up());
                let force = boss_push_force(
                    up,
                    config.session.boss_push_lateral,
                    config.session.boss_push_force,
                    &mut rand::thread_rng(),
                );
                ragdolls.send(RagdollRequest {
                    enemy: request.target,
                    enable: true,
                });
                forces.send(RagdollForce {
                    enemy: request.target,
                    force,
                    point: request.point,
                });

                finish_session(
                    &mut session,
                    true,
                    SessionEnd {
                        catalog: &catalog,
                        config: &config,
                        current_speed: virtual_time.relative_speed(),
                    },
                    &mut progress,
                    &mut slow_motion,
                    &mut presentation,
                    &mut ended,
                );
            }
        }
    }
}

/// Count down the stage clock. Expiry ends the session as not cleared.
#[allow(clippy::too_many_arguments)]
fn tick_session_timer(
    time: Res<Time>,
    config: Res<GameConfig>,
    catalog: Res<StageCatalog>,
    virtual_time: Res<Time<Virtual>>,
    mut session: ResMut<GameSession>,
    mut progress: ResMut<StageProgress>,
    mut slow_motion: ResMut<SlowMotion>,
    mut presentation: ResMut<ResultPresentation>,
    mut ended: EventWriter<SessionEnded>,
) {
    if session.tick(time.delta_secs()) != TimerTick::Expired {
        return;
    }

    info!("Time up");
    finish_session(
        &mut session,
        false,
        SessionEnd {
            catalog: &catalog,
            config: &config,
            current_speed: virtual_time.relative_speed(),
        },
        &mut progress,
        &mut slow_motion,
        &mut presentation,
        &mut ended,
    );
}

/// Ramp the clock back to normal, then release the result screen.
fn advance_result_presentation(
    real_time: Res<Time<Real>>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut presentation: ResMut<ResultPresentation>,
    mut present: EventWriter<PresentResult>,
) {
    match presentation.tick(real_time.delta_secs()) {
        PresentationStep::Ramping(speed) => virtual_time.set_relative_speed(speed),
        PresentationStep::Present(outcome) => {
            virtual_time.set_relative_speed(1.0);
            present.send(PresentResult { outcome });
        }
        PresentationStep::Idle | PresentationStep::Waiting => {}
    }
}

/// Forget the scene's session state when leaving the stage.
fn teardown_session(
    mut session: ResMut<GameSession>,
    mut presentation: ResMut<ResultPresentation>,
    mut references: ResMut<SceneReferences>,
) {
    session.deactivate();
    presentation.reset();
    *references = SceneReferences::default();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryPreferenceStore;
    use crate::session::ResolvedReferences;

    fn refs(enemy: Entity) -> ResolvedReferences {
        let e = Entity::from_raw;
        ResolvedReferences {
            game_ui: e(1),
            score_text: e(2),
            timer_text: e(3),
            result_ui: e(4),
            result_score_text: e(5),
            result_message_text: e(6),
            next_stage_button: e(7),
            enemy,
        }
    }

    /// App running only the scoring system, with a started stage 0 session.
    fn scoring_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(GameConfig::default())
            .insert_resource(StageCatalog::default())
            .insert_resource(StageProgress::new(Box::new(MemoryPreferenceStore::default())))
            .init_resource::<GameSession>()
            .init_resource::<SlowMotion>()
            .init_resource::<ResultPresentation>()
            .add_event::<ScoreRequest>()
            .add_event::<RagdollRequest>()
            .add_event::<RagdollForce>()
            .add_event::<SessionEnded>()
            .add_systems(Update, apply_score_requests);

        let boss = app.world_mut().spawn(GlobalTransform::default()).id();
        app.world_mut()
            .resource_mut::<GameSession>()
            .initialize(0, 30.0, refs(boss));
        (app, boss)
    }

    fn sent<E: Event + Clone>(app: &App) -> Vec<E> {
        let events = app.world().resource::<Events<E>>();
        events.get_cursor().read(events).cloned().collect()
    }

    #[test]
    fn boss_score_ragdolls_pushes_and_ends_session() {
        let (mut app, boss) = scoring_app();
        app.world_mut().resource_mut::<SlowMotion>().start(0.1, 0.2);

        let point = Vec3::new(0.2, 1.4, -7.0);
        app.world_mut().send_event(ScoreRequest {
            target: boss,
            tag: "Enemy".to_string(),
            declared_score: None,
            point,
        });
        app.update();

        let ragdolls = sent::<RagdollRequest>(&app);
        assert_eq!(ragdolls.len(), 1);
        assert_eq!(ragdolls[0].enemy, boss);
        assert!(ragdolls[0].enable);

        let forces = sent::<RagdollForce>(&app);
        assert_eq!(forces.len(), 1);
        assert_eq!(forces[0].enemy, boss);
        assert_eq!(forces[0].point, point);
        assert!(forces[0].force.y > 0.0);

        let ended = sent::<SessionEnded>(&app);
        assert_eq!(ended.len(), 1);
        assert!(ended[0].outcome.cleared);
        assert!(ended[0].outcome.unlocked_next);

        let world = app.world();
        assert!(world.resource::<GameSession>().ended());
        assert!(!world.resource::<SlowMotion>().is_active());
        assert_eq!(world.resource::<StageProgress>().highest_unlocked(), 1);
    }

    #[test]
    fn prop_score_keeps_session_running() {
        let (mut app, _) = scoring_app();
        let crate_entity = app.world_mut().spawn(GlobalTransform::default()).id();

        app.world_mut().send_event(ScoreRequest {
            target: crate_entity,
            tag: "Crate".to_string(),
            declared_score: Some(25),
            point: Vec3::ZERO,
        });
        app.update();

        assert!(sent::<RagdollRequest>(&app).is_empty());
        assert!(sent::<SessionEnded>(&app).is_empty());
        let session = app.world().resource::<GameSession>();
        assert!(session.is_active());
        assert_eq!(session.total(), 25);
    }
}
