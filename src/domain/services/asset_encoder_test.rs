use std::env;
use std::path;

use anyhow::Result;
use test_utils::jpeg_fixture;
use test_utils::png_fixture;
use tokio::fs;

use super::AssetEncoder;
use crate::domain::models::MediaType;

fn temp_path(name: &str) -> path::PathBuf {
    return env::temp_dir().join(format!("verdict-{}-{name}", std::process::id()));
}

#[test]
fn it_encodes_payload_as_base64() {
    let payload = AssetEncoder::payload(b"hello", MediaType::Png);
    assert_eq!(payload.data, "aGVsbG8=");
    assert_eq!(payload.media_type, MediaType::Png);
}

#[test]
fn it_encodes_deterministically() {
    let first = AssetEncoder::encode(png_fixture(), MediaType::Png);
    let second = AssetEncoder::encode(png_fixture(), MediaType::Png);

    assert_eq!(first, second);
}

#[test]
fn it_builds_preview_data_uri() {
    let preview = AssetEncoder::preview(b"hello", MediaType::Jpeg);

    insta::assert_snapshot!(preview.data_uri, @"data:image/jpeg;base64,aGVsbG8=");
    assert_eq!(preview.byte_len, 5);
}

#[test]
fn it_encodes_arbitrary_bytes() {
    let asset = AssetEncoder::encode(vec![0, 255, 1, 254], MediaType::Jpeg);
    assert_eq!(asset.payload.data, "AP8B/g==");
    assert_eq!(asset.bytes, vec![0, 255, 1, 254]);
}

#[test]
fn it_encodes_empty_bytes() {
    let asset = AssetEncoder::encode(vec![], MediaType::Png);
    assert_eq!(asset.payload.data, "");
    assert_eq!(asset.preview.data_uri, "data:image/png;base64,");
}

#[tokio::test]
async fn it_reads_image_files() -> Result<()> {
    let file_path = temp_path("scan.jpg");
    fs::write(&file_path, jpeg_fixture()).await?;

    let asset = AssetEncoder::read_file(&file_path).await?;
    fs::remove_file(&file_path).await?;

    assert_eq!(asset.payload.media_type, MediaType::Jpeg);
    assert_eq!(asset.bytes, jpeg_fixture());
    assert_eq!(asset, AssetEncoder::encode(jpeg_fixture(), MediaType::Jpeg));

    return Ok(());
}

#[tokio::test]
async fn it_refuses_unsupported_extensions() -> Result<()> {
    let file_path = temp_path("scan.gif");
    fs::write(&file_path, png_fixture()).await?;

    let res = AssetEncoder::read_file(&file_path).await;
    fs::remove_file(&file_path).await?;

    assert!(res.is_err());
    assert!(res
        .unwrap_err()
        .to_string()
        .contains("is not a supported image"));

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_missing_files() {
    let res = AssetEncoder::read_file(&temp_path("missing.png")).await;

    assert!(res.is_err());
    assert!(res.unwrap_err().to_string().contains("Failed to read image"));
}
