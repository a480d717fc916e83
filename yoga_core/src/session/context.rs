use std::{mem, time::Duration};

use tracing::{debug, info, warn};
use yoga_data::{
    model::PoseClass,
    profile::BestScores,
    result::{EndReason, ScoreVector, SessionSummary},
};
use yoga_schema::Pose;

use super::state::{Effect, SessionEvent, SessionState, Transition};
use crate::config::{Config, SessionConfig};
use crate::error::PipelineError;
use crate::input::events::{Command, ControlEvent};
use crate::pipeline::queue::CompletionQueue;
use crate::pipeline::{PosePipeline, Sample};
use crate::storage::{load_best_scores, save_best_scores, KeyValueStore};
use crate::time::timer::IntervalTimer;

/// Issued when a sample is requested; a completion is only applied while the
/// session that issued it is still detecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleTicket {
    generation: u64,
}

impl SampleTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome {
    /// Prediction matched the selected pose.
    Scored { pose: PoseClass, score: u32 },
    /// Prediction did not match; not an error.
    Missed { predicted: usize },
    /// Arrived after its session stopped detecting.
    Discarded,
    /// The pipeline produced nothing this cycle.
    Skipped(PipelineError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// Models not loaded; nothing happened.
    NotReady,
    Started,
    /// Stopped during the pre-roll, before anything was judged.
    Aborted,
    Ended(SessionSummary),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateReport {
    pub ended: Option<SessionSummary>,
    pub sample: Option<SampleOutcome>,
}

/// Owns all session state and its timers.
///
/// Every exit from `CountingDown`/`Detecting` goes through
/// [`cancel_timers`](Self::cancel_timers); dropping the context tears the
/// session down.
pub struct SessionContext<S: KeyValueStore> {
    config: SessionConfig,
    storage_key: String,
    store: S,

    state: SessionState,
    pose: PoseClass,
    scores: ScoreVector,
    best: BestScores,
    generation: u64,
    last_pose: Option<Pose>,

    pre_roll: IntervalTimer,
    hold_clock: IntervalTimer,
    sampler: IntervalTimer,
}

impl<S: KeyValueStore> SessionContext<S> {
    pub fn new(config: SessionConfig, storage_key: impl Into<String>, store: S) -> Self {
        let storage_key = storage_key.into();
        let best = match load_best_scores(&store, &storage_key) {
            Ok(best) => best,
            Err(err) => {
                warn!(%err, "ignoring stored best scores");
                BestScores::default()
            }
        };
        info!(best = %best, "loaded best scores");

        Self {
            pre_roll: IntervalTimer::new(config.pre_roll_period()),
            hold_clock: IntervalTimer::new(config.hold_period()),
            sampler: IntervalTimer::new(config.sample_period()),
            config,
            storage_key,
            store,
            state: SessionState::Idle,
            pose: PoseClass::default(),
            scores: ScoreVector::default(),
            best,
            generation: 0,
            last_pose: None,
        }
    }

    pub fn from_config(config: &Config, store: S) -> Self {
        Self::new(config.session.clone(), config.storage.best_scores_key.clone(), store)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn pose(&self) -> PoseClass {
        self.pose
    }

    pub fn scores(&self) -> &ScoreVector {
        &self.scores
    }

    pub fn best_scores(&self) -> &BestScores {
        &self.best
    }

    /// Keypoints of the most recent judged frame, for the overlay.
    pub fn last_pose(&self) -> Option<&Pose> {
        self.last_pose.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn timers_armed(&self) -> bool {
        self.pre_roll.is_armed() || self.hold_clock.is_armed() || self.sampler.is_armed()
    }

    /// Chooses the pose to hold. Refused while detecting.
    pub fn select_pose(&mut self, pose: PoseClass) -> bool {
        if self.state.is_detecting() {
            debug!(%pose, "pose change ignored while detecting");
            return false;
        }
        self.pose = pose;
        true
    }

    pub fn toggle(&mut self, now: Duration, models_ready: bool) -> ToggleOutcome {
        let before = self.state;
        if let Some(summary) = self.dispatch(SessionEvent::Toggle, now, models_ready) {
            return ToggleOutcome::Ended(summary);
        }
        match (before, self.state) {
            (SessionState::Idle, SessionState::Idle) => {
                debug!("toggle ignored, models not ready");
                ToggleOutcome::NotReady
            }
            (SessionState::Idle, _) => ToggleOutcome::Started,
            _ => ToggleOutcome::Aborted,
        }
    }

    pub fn handle(&mut self, event: ControlEvent, models_ready: bool) -> Option<ToggleOutcome> {
        match event.command {
            Command::Toggle => Some(self.toggle(event.timestamp, models_ready)),
            Command::SelectPose(pose) => {
                self.select_pose(pose);
                None
            }
        }
    }

    /// One pre-roll countdown tick.
    pub fn tick_pre_roll(&mut self, now: Duration) {
        self.dispatch(SessionEvent::PreRollTick, now, true);
    }

    /// One in-session countdown tick. Returns the summary when it ends the session.
    pub fn tick_hold_clock(&mut self) -> Option<SessionSummary> {
        self.dispatch(SessionEvent::HoldTick, Duration::ZERO, true)
    }

    pub fn begin_sample(&self) -> Option<SampleTicket> {
        self.state.is_detecting().then_some(SampleTicket {
            generation: self.generation,
        })
    }

    pub fn apply_sample(&mut self, ticket: SampleTicket, predicted: usize) -> SampleOutcome {
        if !self.accepts(ticket) {
            debug!(generation = ticket.generation, "discarding late sample");
            return SampleOutcome::Discarded;
        }
        match PoseClass::new(predicted) {
            Some(pose) if pose == self.pose => {
                let score = self.scores.increment(pose);
                debug!(%pose, score, "correct frame");
                SampleOutcome::Scored { pose, score }
            }
            _ => SampleOutcome::Missed { predicted },
        }
    }

    /// Applies a finished pipeline request.
    pub fn complete_sample(
        &mut self,
        ticket: SampleTicket,
        result: Result<Sample, PipelineError>,
    ) -> SampleOutcome {
        if !self.accepts(ticket) {
            debug!(generation = ticket.generation, "discarding late sample");
            return SampleOutcome::Discarded;
        }
        match result {
            Ok(Sample { pose, predicted }) => {
                self.last_pose = Some(pose);
                self.apply_sample(ticket, predicted)
            }
            Err(err) => {
                debug!(%err, "skipping sample");
                SampleOutcome::Skipped(err)
            }
        }
    }

    /// Applies every completion waiting in `queue`.
    pub fn drain_completions(&mut self, queue: &CompletionQueue) -> Vec<SampleOutcome> {
        queue
            .drain()
            .map(|completion| self.complete_sample(completion.ticket, completion.result))
            .collect()
    }

    /// Fires whatever timers are due at `now`. Runs at most one sample per
    /// call, so a stalled caller does not burst-sample on resume.
    pub fn update<P: PosePipeline + ?Sized>(&mut self, now: Duration, pipeline: &mut P) -> UpdateReport {
        let mut report = UpdateReport::default();

        for _ in 0..self.pre_roll.poll(now) {
            if !self.pre_roll.is_armed() {
                break;
            }
            self.tick_pre_roll(now);
        }

        for _ in 0..self.hold_clock.poll(now) {
            if let Some(summary) = self.tick_hold_clock() {
                report.ended = Some(summary);
                break;
            }
        }

        if self.sampler.poll(now) > 0 {
            if let Some(ticket) = self.begin_sample() {
                let result = pipeline.sample();
                report.sample = Some(self.complete_sample(ticket, result));
            }
        }

        report
    }

    /// Stops everything. A session that was detecting is closed and its
    /// scores are merged and persisted. Safe to call repeatedly.
    pub fn teardown(&mut self) -> Option<SessionSummary> {
        match mem::take(&mut self.state) {
            SessionState::Detecting { .. } => Some(self.end_session(EndReason::TornDown)),
            _ => {
                self.cancel_timers();
                None
            }
        }
    }

    fn accepts(&self, ticket: SampleTicket) -> bool {
        self.state.is_detecting() && ticket.generation == self.generation
    }

    fn dispatch(&mut self, event: SessionEvent, now: Duration, models_ready: bool) -> Option<SessionSummary> {
        let Transition { state, effect } = self.state.on_event(event, models_ready, &self.config);
        let previous = mem::replace(&mut self.state, state);
        if mem::discriminant(&previous) != mem::discriminant(&state) {
            info!(?previous, ?state, "session state changed");
        }

        match effect? {
            Effect::StartPreRoll => {
                self.pre_roll.arm(now);
                None
            }
            Effect::StartDetecting => {
                self.pre_roll.cancel();
                self.hold_clock.arm(now);
                self.sampler.arm(now);
                None
            }
            Effect::AbortPreRoll => {
                self.cancel_timers();
                None
            }
            Effect::EndSession(reason) => Some(self.end_session(reason)),
        }
    }

    fn end_session(&mut self, reason: EndReason) -> SessionSummary {
        let best_before = self.best;
        self.best.merge(&self.scores);
        if let Err(err) = save_best_scores(&self.store, &self.storage_key, &self.best) {
            warn!(%err, "failed to persist best scores");
        }

        let summary = SessionSummary {
            pose: self.pose,
            reason,
            scores: self.scores,
            best_before,
            best_after: self.best,
        };
        info!(
            pose = %summary.pose,
            %reason,
            scores = %summary.scores,
            best = %summary.best_after,
            "session ended"
        );

        self.scores.reset();
        self.cancel_timers();
        self.generation += 1;
        self.last_pose = None;
        summary
    }

    /// Idempotent.
    pub fn cancel_timers(&mut self) {
        self.pre_roll.cancel();
        self.hold_clock.cancel();
        self.sampler.cancel();
    }
}

impl<S: KeyValueStore> Drop for SessionContext<S> {
    fn drop(&mut self) {
        let _ = self.teardown();
    }
}
