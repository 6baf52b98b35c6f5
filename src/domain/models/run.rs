#[cfg(test)]
#[path = "run_test.rs"]
mod tests;

use std::fmt;

use super::Payload;
use super::SlotRole;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestPart {
    Instruction(String),
    Image(SlotRole, Payload),
}

/// One fully assembled call to the inference service. Built fresh for every
/// run and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct RunRequest {
    model: String,
    credential: String,
    parts: Vec<RequestPart>,
}

impl RunRequest {
    pub fn new(model: &str, credential: &str, parts: Vec<RequestPart>) -> RunRequest {
        return RunRequest {
            model: model.to_string(),
            credential: credential.to_string(),
            parts,
        };
    }

    pub fn model(&self) -> &str {
        return &self.model;
    }

    pub fn credential(&self) -> &str {
        return &self.credential;
    }

    pub fn parts(&self) -> &[RequestPart] {
        return &self.parts;
    }

    pub fn image_roles(&self) -> Vec<SlotRole> {
        return self
            .parts
            .iter()
            .filter_map(|part| {
                if let RequestPart::Image(role, _) = part {
                    return Some(*role);
                }
                return None;
            })
            .collect();
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for RunRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_struct("RunRequest")
            .field("model", &self.model)
            .field("credential", &"<redacted>")
            .field("parts", &self.parts.len())
            .finish();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Success(String),
    ValidationFailure(String),
    RemoteFailure(String),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        return matches!(self, RunOutcome::Success(_));
    }

    /// HTTP status carried by a remote failure message, if any.
    pub fn remote_status(&self) -> Option<u16> {
        let RunOutcome::RemoteFailure(message) = self else {
            return None;
        };

        let (_, rest) = message.split_once("status ")?;
        let digits = rest
            .chars()
            .take_while(|c| return c.is_ascii_digit())
            .collect::<String>();

        return digits.parse::<u16>().ok();
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum RunPhase {
    #[default]
    Idle,
    Validating,
    InFlight,
    Settled,
}
