/// Orchestrator behavior tests
mod common;

use chorus_core::{Error, PlayMode};
use chorus_server::services::SearchKind;
use common::{many_tracks, orchestrator_with, test_catalog, test_orchestrator};

#[tokio::test]
async fn play_plain_text_starts_first_hit() {
    let (orchestrator, control) = test_orchestrator();

    let message = orchestrator.play("morning").await.unwrap();

    assert!(message.contains("Morning Song"));
    assert_eq!(control.started_ids(), vec!["t1"]);
    // Direct play in a non-loop mode does not enqueue.
    let status = orchestrator.playback_status(5).await;
    assert_eq!(status.queue_length, 0);
    assert_eq!(status.current.unwrap().id, "t1");
}

#[tokio::test]
async fn play_without_matches_is_not_found() {
    let (orchestrator, control) = test_orchestrator();

    let result = orchestrator.play("no such tune").await;

    assert!(matches!(result, Err(Error::NotFound(_))));
    assert!(control.started_ids().is_empty());
}

#[tokio::test]
async fn play_library_url_fetches_exact_track() {
    let (orchestrator, control) = test_orchestrator();

    orchestrator.play("library://track/t2").await.unwrap();

    assert_eq!(control.started_ids(), vec!["t2"]);
}

#[tokio::test]
async fn play_under_loop_mode_enqueues_the_track() {
    let (orchestrator, control) =
        orchestrator_with(test_catalog(), PlayMode::SequentialLoop);

    orchestrator.play("morning").await.unwrap();
    assert_eq!(orchestrator.playback_status(5).await.queue_length, 1);

    // The finished notification replays it from the queue.
    orchestrator.on_track_finished().await;
    assert_eq!(control.started_ids(), vec!["t1", "t1"]);
}

#[tokio::test]
async fn play_delegates_playlist_references() {
    let (orchestrator, control) = test_orchestrator();

    let message = orchestrator.play("library://playlist/p1").await.unwrap();

    assert!(message.contains("Favorites"));
    assert_eq!(control.started_ids(), vec!["t1"]);
    assert_eq!(orchestrator.playback_status(5).await.queue_length, 2);
}

#[tokio::test]
async fn add_enqueues_immediate_next_without_starting() {
    let (orchestrator, control) = test_orchestrator();
    orchestrator
        .play("library://playlist/p1")
        .await
        .unwrap();

    orchestrator.add("night").await.unwrap();
    // Only the playlist start so far.
    assert_eq!(control.started_ids(), vec!["t1"]);

    // The inserted track wins the very next advance.
    orchestrator.play_next().await.unwrap();
    assert_eq!(control.started_ids(), vec!["t1", "t3"]);
}

#[tokio::test]
async fn append_reports_queued_count_without_starting() {
    let (orchestrator, control) = test_orchestrator();

    let message = orchestrator
        .play_playlist("library://playlist/p1", true)
        .await
        .unwrap();

    assert!(message.contains("Queued 2 tracks"));
    assert!(control.started_ids().is_empty());
}

#[tokio::test]
async fn album_replace_starts_first_track() {
    let (orchestrator, control) = test_orchestrator();

    let message = orchestrator
        .play_album("library://album/a1", false)
        .await
        .unwrap();

    assert!(message.contains("First Album"));
    assert_eq!(control.started_ids(), vec!["t2"]);
}

#[tokio::test]
async fn album_search_takes_first_hit() {
    let (orchestrator, control) = test_orchestrator();

    orchestrator.play_album("first", false).await.unwrap();

    assert_eq!(control.started_ids(), vec!["t2"]);
}

#[tokio::test]
async fn set_mode_rejects_out_of_range_values() {
    let (orchestrator, _) = test_orchestrator();

    assert!(matches!(
        orchestrator.set_mode(4).await,
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(orchestrator.mode().await, PlayMode::Sequential);
}

#[tokio::test]
async fn stop_forgets_the_current_track() {
    let (orchestrator, control) = test_orchestrator();
    orchestrator.play("morning").await.unwrap();

    orchestrator.stop().await.unwrap();

    assert_eq!(control.stop_count(), 1);
    assert!(orchestrator.playback_status(5).await.current.is_none());
}

#[tokio::test]
async fn finished_notification_with_empty_queue_is_a_no_op() {
    let (orchestrator, control) = test_orchestrator();
    orchestrator.play("morning").await.unwrap();

    orchestrator.on_track_finished().await;

    assert_eq!(control.started_ids(), vec!["t1"]);
    assert!(orchestrator.playback_status(5).await.current.is_none());
}

#[tokio::test]
async fn clear_race_with_finished_notification_is_safe() {
    let (orchestrator, control) = test_orchestrator();
    orchestrator
        .play("library://playlist/p1")
        .await
        .unwrap();
    let starts_before = control.started_ids().len();

    let (_, stop_task) = tokio::join!(orchestrator.on_track_finished(), orchestrator.clear());
    stop_task.await.unwrap();

    // At most one extra start, never two, and the queue ends empty.
    let status = orchestrator.playback_status(5).await;
    assert!(control.started_ids().len() <= starts_before + 1);
    assert_eq!(status.queue_length, 0);
    assert!(!status.paused);
    assert!(control.stop_count() >= 1);
}

#[tokio::test]
async fn login_with_unknown_provider_fails() {
    let (orchestrator, _) = test_orchestrator();

    assert!(matches!(
        orchestrator.login("netease", &[]).await,
        Err(Error::ProviderNotFound(_))
    ));
}

#[tokio::test]
async fn provider_statuses_cover_enabled_providers() {
    let (orchestrator, _) = test_orchestrator();

    let statuses = orchestrator.provider_statuses().await;

    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].tag.as_str(), "library");
    assert!(statuses[0].user.is_none());
}

#[tokio::test]
async fn search_limit_is_clamped() {
    let (orchestrator, _) = orchestrator_with(many_tracks(60), PlayMode::Sequential);

    let capped = orchestrator
        .search(None, SearchKind::Song, "song", Some(500))
        .await
        .unwrap();
    assert_eq!(capped[0].tracks.len(), 50);

    let default = orchestrator
        .search(None, SearchKind::Song, "song", None)
        .await
        .unwrap();
    assert_eq!(default[0].tracks.len(), 10);
}

#[tokio::test]
async fn reload_swaps_the_provider_registry() {
    use chorus_resolver::ProviderRegistry;
    use chorus_server::providers::LibraryProvider;
    use std::sync::Arc;

    let (orchestrator, control) = test_orchestrator();
    orchestrator.play("morning").await.unwrap();

    let mut registry = ProviderRegistry::new("library".into());
    registry.register(
        Arc::new(LibraryProvider::from_catalog(many_tracks(3))),
        Vec::new(),
        true,
    );
    orchestrator.reload_providers(Arc::new(registry));

    // The old catalog is gone, the new one answers, playback is untouched.
    assert!(matches!(
        orchestrator.play("morning").await,
        Err(Error::NotFound(_))
    ));
    let hits = orchestrator
        .search(None, SearchKind::Song, "song", None)
        .await
        .unwrap();
    assert_eq!(hits[0].tracks.len(), 3);
    assert_eq!(control.started_ids(), vec!["t1"]);
}

#[tokio::test]
async fn search_rejects_empty_text() {
    let (orchestrator, _) = test_orchestrator();

    assert!(matches!(
        orchestrator.search(None, SearchKind::Song, "  ", None).await,
        Err(Error::InvalidArgument(_))
    ));
}
