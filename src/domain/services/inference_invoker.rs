#[cfg(test)]
#[path = "inference_invoker_test.rs"]
mod tests;

use crate::domain::models::BackendBox;
use crate::domain::models::RunOutcome;
use crate::domain::models::RunRequest;

/// The boundary between the session and the remote service. Whatever goes
/// wrong past this point comes back as a `RemoteFailure`.
pub struct InferenceInvoker {
    backend: BackendBox,
}

impl InferenceInvoker {
    pub fn new(backend: BackendBox) -> InferenceInvoker {
        return InferenceInvoker { backend };
    }

    pub async fn invoke(&self, request: RunRequest) -> RunOutcome {
        let backend = self.backend.clone();
        let model = request.model().to_string();
        tracing::debug!(
            backend = backend.name(),
            model = model.as_str(),
            parts = request.parts().len(),
            images = ?request.image_roles(),
            "Invoking inference"
        );

        // Spawned so a panicking backend still settles the run.
        let res = tokio::spawn(async move {
            return backend.generate(&request).await;
        })
        .await;

        match res {
            Ok(Ok(text)) => {
                tracing::debug!(model = model.as_str(), chars = text.len(), "Inference succeeded");
                return RunOutcome::Success(text);
            }
            Ok(Err(err)) => {
                tracing::error!(model = model.as_str(), error = ?err, "Inference failed");
                return RunOutcome::RemoteFailure(err.to_string());
            }
            Err(join_err) => {
                tracing::error!(model = model.as_str(), error = ?join_err, "Inference task aborted");
                return RunOutcome::RemoteFailure(format!(
                    "The inference call stopped unexpectedly: {join_err}"
                ));
            }
        }
    }
}
