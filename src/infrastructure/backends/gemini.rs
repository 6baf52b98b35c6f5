#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::InferenceBackend;
use crate::domain::models::RequestPart;
use crate::domain::models::RunRequest;

// Keeps the credential out of request URLs, and so out of reqwest errors.
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Model {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelListResponse {
    #[serde(default)]
    models: Vec<Model>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next_page_token: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentPartsBlob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum ContentParts {
    Text(String),
    InlineData(ContentPartsBlob),
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<ContentParts>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    contents: Vec<Content>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

fn model_path(model: &str) -> String {
    if model.starts_with("models/") {
        return model.to_string();
    }

    return format!("models/{model}");
}

fn to_content(request: &RunRequest) -> Content {
    let parts = request
        .parts()
        .iter()
        .map(|part| match part {
            RequestPart::Instruction(text) => return ContentParts::Text(text.to_string()),
            RequestPart::Image(_, payload) => {
                return ContentParts::InlineData(ContentPartsBlob {
                    mime_type: payload.media_type.to_string(),
                    data: payload.data.to_string(),
                })
            }
        })
        .collect();

    return Content {
        role: "user".to_string(),
        parts,
    };
}

async fn failure_message(res: reqwest::Response) -> String {
    let status = res.status().as_u16();
    let body = res.text().await.unwrap_or_default();

    if let Ok(err_res) = serde_json::from_str::<ErrorResponse>(&body) {
        if !err_res.error.message.is_empty() {
            return format!(
                "Gemini request failed with status {status}: {}",
                err_res.error.message
            );
        }
        if !err_res.error.status.is_empty() {
            return format!(
                "Gemini request failed with status {status}: {}",
                err_res.error.status
            );
        }
    }

    return format!("Gemini request failed with status {status}");
}

pub struct Gemini {
    url: String,
}

impl Default for Gemini {
    fn default() -> Gemini {
        return Gemini {
            url: Config::get(ConfigKey::GeminiURL),
        };
    }
}

#[async_trait]
impl InferenceBackend for Gemini {
    fn name(&self) -> &'static str {
        return "gemini";
    }

    #[allow(clippy::implicit_return)]
    async fn list_models(&self, credential: &str) -> Result<Vec<String>> {
        if credential.is_empty() {
            bail!("missing credential");
        }

        let mut models: Vec<String> = vec![];
        let mut page_token: Option<String> = None;

        loop {
            let mut req = reqwest::Client::new()
                .get(format!("{url}/v1beta/models", url = self.url))
                .header(API_KEY_HEADER, credential);
            if let Some(token) = &page_token {
                req = req.query(&[("pageToken", token)]);
            }

            let res = match req.send().await {
                Ok(res) => res,
                Err(err) => {
                    let err = err.without_url();
                    tracing::error!(error = ?err, "Gemini is not reachable");
                    bail!("Gemini is not reachable: {err}");
                }
            };

            if !res.status().is_success() {
                tracing::error!(
                    status = res.status().as_u16(),
                    "Failed to list Gemini models"
                );
                bail!(failure_message(res).await);
            }

            let page = match res.json::<ModelListResponse>().await {
                Ok(page) => page,
                Err(err) => {
                    let err = err.without_url();
                    tracing::error!(error = ?err, "Malformed Gemini model list");
                    bail!("Gemini returned a malformed response: {err}");
                }
            };
            models.extend(
                page.models
                    .iter()
                    .filter(|model| {
                        return model
                            .supported_generation_methods
                            .contains(&"generateContent".to_string());
                    })
                    .map(|model| {
                        return model.name.trim_start_matches("models/").to_string();
                    }),
            );

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        models.sort();

        return Ok(models);
    }

    #[allow(clippy::implicit_return)]
    async fn generate(&self, request: &RunRequest) -> Result<String> {
        if self.url.is_empty() {
            bail!("Gemini URL is not defined");
        }

        let req = CompletionRequest {
            contents: vec![to_content(request)],
        };

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/{model}:generateContent",
                url = self.url,
                model = model_path(request.model()),
            ))
            .header(API_KEY_HEADER, request.credential())
            .json(&req)
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                let err = err.without_url();
                tracing::error!(error = ?err, "Gemini is not reachable");
                bail!("Gemini is not reachable: {err}");
            }
        };
        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                model = request.model(),
                "Failed to make generate request to Gemini"
            );
            bail!(failure_message(res).await);
        }

        let body = match res.text().await {
            Ok(body) => body,
            Err(err) => {
                let err = err.without_url();
                tracing::error!(error = ?err, "Failed to read Gemini response");
                bail!("Gemini returned a malformed response: {err}");
            }
        };
        let ores = match serde_json::from_str::<GenerateContentResponse>(&body) {
            Ok(ores) => ores,
            Err(err) => {
                tracing::error!(error = ?err, "Malformed Gemini response");
                bail!("Gemini returned a malformed response: {err}");
            }
        };

        let text = ores
            .candidates
            .first()
            .and_then(|candidate| return candidate.content.as_ref())
            .map(|content| {
                return content
                    .parts
                    .iter()
                    .filter_map(|part| return part.text.clone())
                    .collect::<Vec<String>>()
                    .join("");
            })
            .unwrap_or_default();

        if text.is_empty() {
            if let Some(reason) = ores
                .prompt_feedback
                .and_then(|feedback| return feedback.block_reason)
            {
                bail!("Gemini blocked the request: {reason}");
            }
            if let Some(reason) = ores
                .candidates
                .first()
                .and_then(|candidate| return candidate.finish_reason.clone())
            {
                bail!("Gemini returned no text, finish reason: {reason}");
            }
            bail!("Gemini returned no text");
        }

        return Ok(text);
    }
}
