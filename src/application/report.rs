#[cfg(test)]
#[path = "report_test.rs"]
mod tests;

use owo_colors::OwoColorize;
use owo_colors::Stream;

use crate::domain::models::ModelName;
use crate::domain::models::Preview;
use crate::domain::models::RunOutcome;
use crate::domain::models::RunPhase;
use crate::domain::models::SlotRole;

const PREVIEW_URI_WIDTH: usize = 48;

pub fn disclaimer() -> &'static str {
    return "Disclaimer: this is an AI-assisted forensic tool. For research purposes only.";
}

pub fn format_previews(previews: &[(SlotRole, &Preview)]) -> String {
    return previews
        .iter()
        .map(|(role, preview)| {
            return format!(
                "{}: {}, {} bytes\n  {}",
                role.caption(),
                preview.media_type,
                preview.byte_len,
                preview.short_uri(PREVIEW_URI_WIDTH)
            );
        })
        .collect::<Vec<String>>()
        .join("\n");
}

/// Turns a validation reason into what the user should do about it.
pub fn format_validation_failure(reason: &str) -> String {
    match reason {
        "missing credential" => {
            return "Please provide a Gemini API key with --gemini-token or VERDICT_GEMINI_TOKEN."
                .to_string()
        }
        "missing image" => {
            return "Please provide all three images (--reference, --candidate-a, --candidate-b) to proceed.".to_string()
        }
        _ => return reason.to_string(),
    }
}

pub fn format_remote_failure(message: &str) -> String {
    return format!("An error occurred: {message}");
}

pub fn format_quota_hint(model: &str) -> String {
    let on_flash = ModelName::parse(model)
        .map(|name| return name.is_flash())
        .unwrap_or(false);

    let tip = if on_flash {
        "Tip: wait a few seconds before retrying."
    } else {
        "Tip: switch to a flash model (e.g. --model gemini-2.5-flash), which often has higher rate limits, or wait a few seconds before retrying."
    };

    return format!("Quota exceeded. You have hit the rate limit for {model}.\n{tip}");
}

pub fn format_model_list(models: &[String]) -> String {
    if models.is_empty() {
        return "No models supporting generateContent are available to this token.".to_string();
    }

    return models
        .iter()
        .map(|model| return format!("- {model}"))
        .collect::<Vec<String>>()
        .join("\n");
}

pub fn print_previews(previews: &[(SlotRole, &Preview)]) {
    if previews.is_empty() {
        eprintln!("No images given.");
        return;
    }

    println!("{}", format_previews(previews));
}

pub fn print_phase(phase: RunPhase) {
    tracing::debug!(phase = phase.to_string(), "Phase changed");
    if phase == RunPhase::InFlight {
        eprintln!(
            "{}",
            "Analyzing anatomical patterns and pixel artifacts..."
                .if_supports_color(Stream::Stderr, |text| return text.dimmed())
        );
    }
}

/// Prints the outcome. Response text goes to stdout unmodified, failures to
/// stderr.
pub fn print_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Success(text) => {
            eprintln!(
                "{}",
                "Forensic Report".if_supports_color(Stream::Stderr, |text| return text.bold())
            );
            println!("{text}");
        }
        RunOutcome::ValidationFailure(reason) => {
            eprintln!(
                "{}",
                format_validation_failure(reason)
                    .if_supports_color(Stream::Stderr, |text| return text.yellow())
            );
        }
        RunOutcome::RemoteFailure(message) => {
            eprintln!(
                "{}",
                format_remote_failure(message)
                    .if_supports_color(Stream::Stderr, |text| return text.red())
            );
        }
    }
}

/// Notes shown once a run has settled, whatever its outcome. The disclaimer
/// always comes last.
pub fn format_closing(outcome: &RunOutcome, model: &str) -> Vec<String> {
    let mut notes = vec![];
    if outcome.remote_status() == Some(429) {
        notes.push(format_quota_hint(model));
    }
    notes.push(disclaimer().to_string());

    return notes;
}

pub fn print_closing(outcome: &RunOutcome, model: &str) {
    for note in format_closing(outcome, model) {
        eprintln!(
            "\n{}",
            note.if_supports_color(Stream::Stderr, |text| return text.dimmed())
        );
    }
}

pub fn print_listing_models() {
    eprintln!(
        "{}",
        "Model not found. Listing the models available to your token..."
            .if_supports_color(Stream::Stderr, |text| return text.yellow())
    );
}

pub fn print_model_list(models: &[String]) {
    println!("{}", format_model_list(models));
}

pub fn print_model_list_failed(err: &anyhow::Error) {
    eprintln!(
        "{}",
        format!("Could not list models: {err}")
            .if_supports_color(Stream::Stderr, |text| return text.red())
    );
}
