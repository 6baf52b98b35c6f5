use super::EncodedAsset;
use super::RunOutcome;
use super::RunPhase;
use super::RunRequest;
use super::SlotRole;

/// Inputs to the session reducer, from the user or from a finished call.
pub enum SessionEvent {
    CredentialChanged(String),
    ModelChanged(String),
    SlotAssigned(SlotRole, EncodedAsset),
    // Nothing on the command line empties a slot.
    #[allow(dead_code)]
    SlotCleared(SlotRole),
    RunTriggered(),
    RunSettled(u64, RunOutcome),
}

/// Work the reducer asks its driver to perform.
#[derive(Debug)]
pub enum Effect {
    Invoke(u64, RunRequest),
}

/// Updates sent out to whatever renders the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    PhaseChanged(RunPhase),
    RunSettled(RunOutcome),
}
