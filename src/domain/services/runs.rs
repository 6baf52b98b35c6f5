#[cfg(test)]
#[path = "runs_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use super::InferenceInvoker;
use super::SessionState;
use crate::domain::models::BackendBox;
use crate::domain::models::Effect;
use crate::domain::models::Event;
use crate::domain::models::RunOutcome;
use crate::domain::models::RunPhase;
use crate::domain::models::SessionEvent;

/// Owns the session and applies events to it one at a time. Inference calls
/// run on their own task and report back through an internal channel, so the
/// session keeps taking edits while a call is in flight.
pub struct RunService {}

impl RunService {
    pub async fn start(
        backend: BackendBox,
        initial: SessionState,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<SessionEvent>,
    ) -> Result<SessionState> {
        let invoker = Arc::new(InferenceInvoker::new(backend));
        let (settle_tx, mut settle_rx) = mpsc::unbounded_channel::<(u64, RunOutcome)>();

        let mut state = initial;
        let mut inbound_open = true;

        loop {
            if !inbound_open && !state.is_in_flight() {
                break;
            }

            // Queued user events go first, then settlements.
            let event = tokio::select! {
                biased;
                event = rx.recv(), if inbound_open => {
                    match event {
                        Some(event) => event,
                        None => {
                            inbound_open = false;
                            continue;
                        }
                    }
                }
                settled = settle_rx.recv() => {
                    match settled {
                        Some((run_id, outcome)) => SessionEvent::RunSettled(run_id, outcome),
                        None => continue,
                    }
                }
            };

            let run_before = state.run_id();
            let trail_before = state.trail().len();
            let (next, effect) = state.reduce(event);
            state = next;

            let skip = if state.run_id() == run_before {
                trail_before
            } else {
                0
            };
            for phase in state.trail().iter().skip(skip) {
                tx.send(Event::PhaseChanged(*phase))?;
                if *phase == RunPhase::Settled {
                    if let Some(outcome) = state.outcome() {
                        tx.send(Event::RunSettled(outcome.clone()))?;
                    }
                }
            }

            if let Some(Effect::Invoke(run_id, request)) = effect {
                let worker_invoker = invoker.clone();
                let worker_tx = settle_tx.clone();
                tokio::spawn(async move {
                    let outcome = worker_invoker.invoke(request).await;
                    if worker_tx.send((run_id, outcome)).is_err() {
                        tracing::warn!(run_id = run_id, "Session closed before the run settled");
                    }
                });
            }
        }

        return Ok(state);
    }
}
