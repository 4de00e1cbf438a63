use crate::e2e::helpers;

use docspeak::domain::conversion::{ConversionError, Language};
use docspeak::domain::session::SessionState;
use helpers::players::FailingPlayer;
use helpers::{build_service, fixtures, TestContext};
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
#[serial]
async fn it_should_stream_playback_from_the_bucket() {
    let ctx = TestContext::new().await.unwrap();
    ctx.stub.mark_present("story_english.mp3");
    ctx.stub
        .set_download_body("story_english.mp3", fixtures::mock_audio_bytes());

    let outcome = ctx
        .service
        .listen("story.txt", Language::English, true)
        .await
        .unwrap();

    assert!(!outcome.superseded);
    assert_eq!(outcome.audio_file, "story_english.mp3");
    assert_eq!(
        outcome.audio_url,
        "https://bucket.test//tmp/story_english.mp3"
    );
    assert_eq!(
        ctx.player.played(),
        vec!["https://bucket.test//tmp/story_english.mp3".to_string()]
    );

    let saved = outcome.saved_to.expect("audio saved");
    assert_eq!(saved, ctx.output_dir.join("story_english.mp3"));
    assert_eq!(std::fs::read(&saved).unwrap(), fixtures::mock_audio_bytes());
}

#[tokio::test]
#[serial]
async fn it_should_skip_the_download_when_disabled() {
    let ctx = TestContext::new().await.unwrap();
    ctx.stub.mark_present("story_english.mp3");

    let outcome = ctx
        .service
        .listen("story.txt", Language::English, false)
        .await
        .unwrap();

    assert!(outcome.saved_to.is_none());
    assert_eq!(ctx.player.played().len(), 1);
    assert!(ctx.stub.download_hits().is_empty());
}

#[tokio::test]
#[serial]
async fn it_should_retry_until_the_conversion_finishes() {
    let ctx = TestContext::new().await.unwrap();
    ctx.stub.mark_present_after("story_english.mp3", 2);
    ctx.stub
        .set_download_body("story_english.mp3", fixtures::mock_audio_bytes());

    let outcome = ctx
        .service
        .listen("story.txt", Language::English, true)
        .await
        .unwrap();

    assert!(!outcome.superseded);
    assert_eq!(ctx.stub.find_hits("story_english.mp3"), 3);
}

#[tokio::test]
#[serial]
async fn it_should_give_up_after_the_configured_attempts() {
    let ctx = TestContext::with_polling(3, Duration::from_millis(5), false)
        .await
        .unwrap();

    let err = ctx
        .service
        .listen("story.txt", Language::English, true)
        .await
        .unwrap_err();

    assert!(matches!(err, ConversionError::NotReady(_)));
    assert!(err.to_string().contains("story_english.mp3"));
    assert_eq!(ctx.stub.find_hits("story_english.mp3"), 3);
    assert!(ctx.player.played().is_empty());
}

#[tokio::test]
#[serial]
async fn it_should_keep_the_download_decision_made_when_the_play_started() {
    let ctx = TestContext::with_polling(5, Duration::from_millis(20), false)
        .await
        .unwrap();
    ctx.stub.mark_present_after("story_english.mp3", 2);
    ctx.stub
        .set_download_body("story_english.mp3", fixtures::mock_audio_bytes());

    // Drive the play the way the console does: snapshot the switch, hand the
    // listen to a task, then flip the switch while the listen is polling
    let mut session = SessionState::new();
    session.set_download(false);

    let download = session.download_enabled();
    let service = ctx.service.clone();
    let play = tokio::spawn(async move {
        service.listen("story.txt", Language::English, download).await
    });

    tokio::time::sleep(Duration::from_millis(25)).await;
    session.set_download(true);

    let outcome = play.await.unwrap().unwrap();

    assert!(session.download_enabled());
    assert!(!outcome.superseded);
    assert!(outcome.saved_to.is_none());
    assert!(ctx.stub.download_hits().is_empty());
    assert_eq!(ctx.player.played().len(), 1);
}

#[tokio::test]
#[serial]
async fn it_should_let_a_newer_listen_supersede_an_older_one() {
    let ctx = TestContext::with_polling(5, Duration::from_millis(20), false)
        .await
        .unwrap();
    ctx.stub.mark_present_after("story_english.mp3", 3);
    ctx.stub.mark_present("story_hindi.mp3");
    ctx.stub
        .set_download_body("story_english.mp3", fixtures::mock_audio_bytes());
    ctx.stub
        .set_download_body("story_hindi.mp3", fixtures::mock_audio_bytes());

    let service = ctx.service.clone();
    let first = tokio::spawn(async move {
        service.listen("story.txt", Language::English, true).await
    });

    // Let the first listen get into its polling loop before starting the next
    tokio::time::sleep(Duration::from_millis(25)).await;

    let second = ctx
        .service
        .listen("story.txt", Language::Hindi, true)
        .await
        .unwrap();
    assert!(!second.superseded);

    let first = first.await.unwrap().unwrap();
    assert!(first.superseded);
    assert!(first.saved_to.is_none());

    // Only the newest request reaches the player
    assert_eq!(
        ctx.player.played(),
        vec!["https://bucket.test//tmp/story_hindi.mp3".to_string()]
    );
}

#[tokio::test]
#[serial]
async fn it_should_decide_supersession_by_request_order() {
    let ctx = TestContext::new().await.unwrap();
    ctx.stub.mark_present("story_english.mp3");
    ctx.stub.mark_present("story_hindi.mp3");
    ctx.stub
        .set_download_body("story_hindi.mp3", fixtures::mock_audio_bytes());

    // Epochs are claimed at command time, before either listen runs
    let older = ctx.service.begin_listen();
    let newer = ctx.service.begin_listen();

    let stale = ctx
        .service
        .listen_with_epoch("story.txt", Language::English, true, older)
        .await
        .unwrap();
    assert!(stale.superseded);
    assert!(stale.saved_to.is_none());

    let fresh = ctx
        .service
        .listen_with_epoch("story.txt", Language::Hindi, true, newer)
        .await
        .unwrap();
    assert!(!fresh.superseded);

    assert_eq!(
        ctx.player.played(),
        vec!["https://bucket.test//tmp/story_hindi.mp3".to_string()]
    );
}

#[tokio::test]
#[serial]
async fn it_should_fail_when_the_player_cannot_start() {
    let ctx = TestContext::new().await.unwrap();
    ctx.stub.mark_present("story_english.mp3");

    let service = build_service(
        &ctx.stub,
        Arc::new(FailingPlayer),
        &ctx.output_dir,
        4,
        Duration::from_millis(10),
        false,
    )
    .unwrap();

    let err = service
        .listen("story.txt", Language::English, false)
        .await
        .unwrap_err();

    assert!(matches!(err, ConversionError::Playback(_)));
    assert!(err.to_string().contains("player crashed"));
}

#[tokio::test]
#[serial]
async fn it_should_keep_the_saved_audio_when_playback_fails() {
    let ctx = TestContext::new().await.unwrap();
    ctx.stub.mark_present("story_english.mp3");
    ctx.stub
        .set_download_body("story_english.mp3", fixtures::mock_audio_bytes());

    let service = build_service(
        &ctx.stub,
        Arc::new(FailingPlayer),
        &ctx.output_dir,
        4,
        Duration::from_millis(10),
        false,
    )
    .unwrap();

    let err = service
        .listen("story.txt", Language::English, true)
        .await
        .unwrap_err();

    assert!(matches!(err, ConversionError::Playback(_)));

    let saved = ctx.output_dir.join("story_english.mp3");
    assert_eq!(std::fs::read(&saved).unwrap(), fixtures::mock_audio_bytes());
}
