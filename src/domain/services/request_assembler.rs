#[cfg(test)]
#[path = "request_assembler_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::Payload;
use crate::domain::models::RequestPart;
use crate::domain::models::RunRequest;
use crate::domain::models::SlotRole;

pub fn instruction_text() -> String {
    let text = r#"
You are a senior radiologist and medical imaging forensics expert.
You are given three images, in this order:
1. REFERENCE: a known real medical image.
2. IMAGE A: a test image.
3. IMAGE B: a test image.

One of the test images is a REAL scan. The other is an AI-GENERATED (synthetic) version made to resemble the reference.

TASK:
- Compare Image A and Image B against the reference.
- Decide which one is real and which one is generated.
- Give a 'Verdict' stating exactly: "Image [X] is Real, Image [Y] is Generated."
- Give 'Expert Reasoning' grouped under:
    a) Pixel-level artifacts (GAN checkerboarding, over-smoothing).
    b) Anatomical accuracy (vessel branching logic, tissue density consistency).
    c) Sensor noise (real scans carry natural stochastic noise, generated ones are often artificial or too clean).
        "#;

    return text.trim().to_string();
}

pub struct RequestAssembler {}

impl RequestAssembler {
    /// Builds the ordered request: instruction first, then reference,
    /// candidate A and candidate B. Preconditions are checked before anything
    /// else so no I/O is attempted on a request that cannot be sent.
    pub fn assemble(
        credential: &str,
        model: &str,
        reference: Option<&Payload>,
        candidate_a: Option<&Payload>,
        candidate_b: Option<&Payload>,
    ) -> Result<RunRequest> {
        if credential.is_empty() {
            bail!("missing credential");
        }

        let slots = [
            (SlotRole::Reference, reference),
            (SlotRole::CandidateA, candidate_a),
            (SlotRole::CandidateB, candidate_b),
        ];

        let mut parts = vec![RequestPart::Instruction(instruction_text())];
        for (role, payload) in slots {
            match payload {
                Some(payload) => parts.push(RequestPart::Image(role, payload.clone())),
                None => {
                    tracing::debug!(role = role.to_string(), "Slot is empty");
                    bail!("missing image");
                }
            }
        }

        return Ok(RunRequest::new(model, credential, parts));
    }
}
