#[cfg(test)]
#[path = "session_state_test.rs"]
mod tests;

use crate::domain::models::Effect;
use crate::domain::models::ImageSlot;
use crate::domain::models::RunOutcome;
use crate::domain::models::RunPhase;
use crate::domain::models::SessionEvent;
use crate::domain::models::SlotRole;
use crate::domain::services::RequestAssembler;

/// Everything one interactive session knows. Driven only through `reduce`.
#[derive(Clone, Debug)]
pub struct SessionState {
    credential: String,
    model: String,
    slots: [ImageSlot; 3],
    phase: RunPhase,
    outcome: Option<RunOutcome>,
    trail: Vec<RunPhase>,
    run_id: u64,
}

impl SessionState {
    pub fn new(credential: &str, model: &str) -> SessionState {
        return SessionState {
            credential: credential.to_string(),
            model: model.to_string(),
            slots: Default::default(),
            phase: RunPhase::Idle,
            outcome: None,
            trail: vec![],
            run_id: 0,
        };
    }

    pub fn model(&self) -> &str {
        return &self.model;
    }

    pub fn slot(&self, role: SlotRole) -> &ImageSlot {
        return &self.slots[role.index()];
    }

    pub fn phase(&self) -> RunPhase {
        return self.phase;
    }

    pub fn is_in_flight(&self) -> bool {
        return self.phase == RunPhase::InFlight;
    }

    pub fn outcome(&self) -> Option<&RunOutcome> {
        return self.outcome.as_ref();
    }

    /// Phases the latest run went through, starting from `Idle`.
    pub fn trail(&self) -> &[RunPhase] {
        return &self.trail;
    }

    pub fn run_id(&self) -> u64 {
        return self.run_id;
    }

    /// Applies one event and returns the next state, plus the work the caller
    /// has to carry out for it.
    pub fn reduce(mut self, event: SessionEvent) -> (SessionState, Option<Effect>) {
        match event {
            SessionEvent::CredentialChanged(credential) => {
                self.credential = credential;
            }
            SessionEvent::ModelChanged(model) => {
                self.model = model;
            }
            SessionEvent::SlotAssigned(role, asset) => {
                self.slots[role.index()].assign(asset);
            }
            SessionEvent::SlotCleared(role) => {
                self.slots[role.index()].clear();
            }
            SessionEvent::RunTriggered() => {
                return self.trigger();
            }
            SessionEvent::RunSettled(run_id, outcome) => {
                self.settle(run_id, outcome);
            }
        }

        return (self, None);
    }

    fn trigger(mut self) -> (SessionState, Option<Effect>) {
        if self.is_in_flight() {
            tracing::debug!(run_id = self.run_id, "Run already in flight, ignoring trigger");
            return (self, None);
        }

        self.run_id += 1;
        self.outcome = None;
        self.trail = vec![RunPhase::Idle];
        self.enter(RunPhase::Validating);

        let request = RequestAssembler::assemble(
            &self.credential,
            &self.model,
            self.slot(SlotRole::Reference).payload(),
            self.slot(SlotRole::CandidateA).payload(),
            self.slot(SlotRole::CandidateB).payload(),
        );

        match request {
            Ok(request) => {
                self.enter(RunPhase::InFlight);
                let effect = Effect::Invoke(self.run_id, request);
                return (self, Some(effect));
            }
            Err(err) => {
                tracing::debug!(run_id = self.run_id, reason = err.to_string(), "Run failed validation");
                self.outcome = Some(RunOutcome::ValidationFailure(err.to_string()));
                self.enter(RunPhase::Settled);
                return (self, None);
            }
        }
    }

    fn settle(&mut self, run_id: u64, outcome: RunOutcome) {
        if !self.is_in_flight() || run_id != self.run_id {
            tracing::warn!(
                run_id = run_id,
                current_run_id = self.run_id,
                "Discarding outcome for a run that is not in flight"
            );
            return;
        }

        self.outcome = Some(outcome);
        self.enter(RunPhase::Settled);
    }

    fn enter(&mut self, phase: RunPhase) {
        tracing::debug!(
            run_id = self.run_id,
            from = self.phase.to_string(),
            to = phase.to_string(),
            "Session phase"
        );
        self.phase = phase;
        self.trail.push(phase);
    }
}
