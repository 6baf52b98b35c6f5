use std::env;

use anyhow::Result;
use test_utils::jpeg_fixture;
use test_utils::png_fixture;
use tokio::fs;

use super::build;
use super::preview;
use super::read_slots;
use crate::domain::models::MediaType;
use crate::domain::models::SlotRole;

#[test]
fn it_builds_a_valid_command() {
    build().debug_assert();
}

#[test]
fn it_accepts_known_models() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "verdict",
        "analyze",
        "--model",
        "gemini-2.5-flash",
        "-r",
        "ref.png",
    ])?;
    let (_, analyze_matches) = matches.subcommand().unwrap();

    assert_eq!(
        analyze_matches.get_one::<String>("model").unwrap(),
        "gemini-2.5-flash"
    );
    assert_eq!(
        analyze_matches.get_one::<String>("reference").unwrap(),
        "ref.png"
    );

    return Ok(());
}

#[test]
fn it_rejects_unknown_models() {
    let res = build().try_get_matches_from(vec!["verdict", "analyze", "--model", "gpt-4o"]);
    assert!(res.is_err());
}

#[tokio::test]
async fn it_reads_only_the_slots_given() -> Result<()> {
    let dir = env::temp_dir().join(format!("verdict-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).await?;
    let reference = dir.join("reference.png");
    let candidate_b = dir.join("b.jpeg");
    fs::write(&reference, png_fixture()).await?;
    fs::write(&candidate_b, jpeg_fixture()).await?;

    let matches = build().try_get_matches_from(vec![
        "verdict".to_string(),
        "analyze".to_string(),
        "--reference".to_string(),
        reference.to_string_lossy().to_string(),
        "--candidate-b".to_string(),
        candidate_b.to_string_lossy().to_string(),
    ])?;
    let (_, analyze_matches) = matches.subcommand().unwrap();

    let slots = read_slots(analyze_matches).await?;
    fs::remove_dir_all(&dir).await?;

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].0, SlotRole::Reference);
    assert_eq!(slots[0].1.payload.media_type, MediaType::Png);
    assert_eq!(slots[1].0, SlotRole::CandidateB);
    assert_eq!(slots[1].1.bytes, jpeg_fixture());

    return Ok(());
}

#[tokio::test]
async fn it_previews_complete_only_when_every_slot_is_filled() -> Result<()> {
    let dir = env::temp_dir().join(format!("verdict-preview-{}", std::process::id()));
    fs::create_dir_all(&dir).await?;
    let reference = dir.join("reference.png");
    let candidate_a = dir.join("a.png");
    let candidate_b = dir.join("b.jpg");
    fs::write(&reference, png_fixture()).await?;
    fs::write(&candidate_a, png_fixture()).await?;
    fs::write(&candidate_b, jpeg_fixture()).await?;

    let partial = build().try_get_matches_from(vec![
        "verdict".to_string(),
        "preview".to_string(),
        "-r".to_string(),
        reference.to_string_lossy().to_string(),
        "-b".to_string(),
        candidate_b.to_string_lossy().to_string(),
    ])?;
    let full = build().try_get_matches_from(vec![
        "verdict".to_string(),
        "preview".to_string(),
        "-r".to_string(),
        reference.to_string_lossy().to_string(),
        "-a".to_string(),
        candidate_a.to_string_lossy().to_string(),
        "-b".to_string(),
        candidate_b.to_string_lossy().to_string(),
    ])?;

    let partial_res = preview(partial.subcommand().unwrap().1).await?;
    let full_res = preview(full.subcommand().unwrap().1).await?;
    fs::remove_dir_all(&dir).await?;

    assert!(!partial_res);
    assert!(full_res);

    return Ok(());
}
