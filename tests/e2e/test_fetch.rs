use crate::e2e::helpers;

use docspeak::domain::conversion::{ConversionError, Language};
use helpers::{fixtures, TestContext};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn it_should_save_audio_into_the_output_directory() {
    let ctx = TestContext::new().await.unwrap();
    ctx.stub.mark_present("story_english.mp3");
    ctx.stub
        .set_download_body("story_english.mp3", fixtures::mock_audio_bytes());

    let path = ctx.service.fetch("story.txt", Language::English).await.unwrap();

    assert_eq!(path, ctx.output_dir.join("story_english.mp3"));
    assert_eq!(std::fs::read(&path).unwrap(), fixtures::mock_audio_bytes());
    assert_eq!(
        ctx.stub.download_hits(),
        vec!["story_english.mp3".to_string()]
    );
}

#[tokio::test]
#[serial]
async fn it_should_refuse_to_fetch_audio_that_is_not_ready() {
    let ctx = TestContext::new().await.unwrap();

    let err = ctx
        .service
        .fetch("story.txt", Language::Hindi)
        .await
        .unwrap_err();

    assert!(matches!(err, ConversionError::NotReady(_)));
    assert!(ctx.stub.download_hits().is_empty());
}

#[tokio::test]
#[serial]
async fn it_should_surface_missing_objects_as_errors() {
    let ctx = TestContext::new().await.unwrap();
    ctx.stub.mark_present("story_english.mp3");

    let err = ctx
        .service
        .fetch("story.txt", Language::English)
        .await
        .unwrap_err();

    assert!(matches!(err, ConversionError::Dependency(_)));
    assert!(err.to_string().contains("404"));
}
