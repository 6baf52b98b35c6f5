use test_utils::png_fixture;

use super::disclaimer;
use super::format_closing;
use super::format_model_list;
use super::format_previews;
use super::format_quota_hint;
use super::format_remote_failure;
use super::format_validation_failure;
use crate::domain::models::MediaType;
use crate::domain::models::RunOutcome;
use crate::domain::models::SlotRole;
use crate::domain::services::AssetEncoder;

#[test]
fn it_formats_previews_with_captions() {
    let reference = AssetEncoder::preview(&png_fixture(), MediaType::Png);
    let candidate_a = AssetEncoder::preview(b"hello", MediaType::Jpeg);

    let res = format_previews(&[
        (SlotRole::Reference, &reference),
        (SlotRole::CandidateA, &candidate_a),
    ]);
    let lines = res.split('\n').collect::<Vec<&str>>();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Reference (Real): image/png, 67 bytes");
    assert!(lines[1].starts_with("  data:image/png;base64,iVBORw0KGgo"));
    assert!(lines[1].ends_with("..."));
    insta::assert_snapshot!(lines[2], @"Image A: image/jpeg, 5 bytes");
    assert_eq!(lines[3], "  data:image/jpeg;base64,aGVsbG8=");
}

#[test]
fn it_explains_validation_failures() {
    insta::assert_snapshot!(
        format_validation_failure("missing credential"),
        @"Please provide a Gemini API key with --gemini-token or VERDICT_GEMINI_TOKEN."
    );
    assert!(format_validation_failure("missing image").starts_with("Please provide all three images"));
    assert_eq!(format_validation_failure("something else"), "something else");
}

#[test]
fn it_passes_remote_messages_through() {
    assert_eq!(
        format_remote_failure("Gemini request failed with status 401: API key not valid."),
        "An error occurred: Gemini request failed with status 401: API key not valid."
    );
}

#[test]
fn it_suggests_flash_models_on_quota_errors() {
    let hint = format_quota_hint("gemini-2.5-pro");
    assert!(hint.starts_with("Quota exceeded. You have hit the rate limit for gemini-2.5-pro."));
    assert!(hint.contains("--model gemini-2.5-flash"));
}

#[test]
fn it_only_suggests_waiting_when_already_on_flash() {
    let hint = format_quota_hint("gemini-flash-latest");
    assert!(!hint.contains("--model"));
    insta::assert_snapshot!(hint.split('\n').last().unwrap(), @"Tip: wait a few seconds before retrying.");
}

#[test]
fn it_formats_model_lists() {
    let models = vec!["gemini-2.0-flash".to_string(), "gemini-2.5-pro".to_string()];
    assert_eq!(
        format_model_list(&models),
        "- gemini-2.0-flash\n- gemini-2.5-pro"
    );
    assert!(format_model_list(&[]).starts_with("No models"));
}

#[test]
fn it_closes_every_outcome_with_the_disclaimer() {
    let outcomes = vec![
        RunOutcome::Success("Image A is Real, Image B is Generated.".to_string()),
        RunOutcome::ValidationFailure("missing image".to_string()),
        RunOutcome::RemoteFailure("Gemini is not reachable: connection refused".to_string()),
    ];

    for outcome in outcomes {
        let notes = format_closing(&outcome, "gemini-2.5-pro");
        assert_eq!(notes, vec![disclaimer().to_string()]);
    }
}

#[test]
fn it_adds_the_quota_hint_before_the_disclaimer() {
    let outcome = RunOutcome::RemoteFailure(
        "Gemini request failed with status 429: Resource has been exhausted".to_string(),
    );

    let notes = format_closing(&outcome, "gemini-2.5-pro");
    assert_eq!(notes.len(), 2);
    assert!(notes[0].starts_with("Quota exceeded."));
    assert_eq!(notes[1], disclaimer());
}
