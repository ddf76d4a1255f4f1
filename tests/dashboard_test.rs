mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio_test::assert_ok;

use common::{options_for, paris_options, TestApp};
use trip_planner_api::config::LatencyConfig;
use trip_planner_api::db::MemoryStore;
use trip_planner_api::error::{BoardError, ServiceError};
use trip_planner_api::services::fault_injection::{FaultPoint, NoFaults};
use trip_planner_api::services::itinerary_generation_service::ItineraryGenerator;
use trip_planner_api::services::trip_board::{BoardMode, MutationKind, MutationState, NoticeVariant};
use trip_planner_api::state::AppState;

async fn board_with_trips(destinations: &[&str]) -> TestApp {
    let app = TestApp::offline().signed_in().await;
    for destination in destinations {
        app.state
            .trips
            .create(options_for(destination, 2))
            .await
            .unwrap();
    }
    assert_ok!(app.state.dashboard.refresh().await);
    app
}

fn ids<'a>(trips: impl IntoIterator<Item = &'a trip_planner_api::models::trip::Trip>) -> HashSet<String> {
    trips.into_iter().map(|trip| trip.id.clone()).collect()
}

#[actix_rt::test]
async fn test_refresh_selects_newest_trip() {
    let app = board_with_trips(&["Athens", "Sparta"]).await;

    let view = app.state.dashboard.view().await;
    assert_eq!(view.trips.len(), 2);
    assert_eq!(view.trips[0].destination, "Sparta");
    assert_eq!(view.selected_trip_id.as_deref(), Some(view.trips[0].id.as_str()));
    assert_eq!(view.mode, BoardMode::Idle);
}

#[actix_rt::test]
async fn test_create_prepends_and_selects() {
    let app = board_with_trips(&["Athens"]).await;

    let view = app.state.dashboard.create_trip(paris_options()).await.unwrap();
    assert_eq!(view.trips.len(), 2);
    assert_eq!(view.trips[0].destination, "Paris");
    assert_eq!(view.selected_trip_id.as_deref(), Some(view.trips[0].id.as_str()));
    assert!(view.error.is_none());
    assert_eq!(view.notices.len(), 1);
    assert_eq!(view.notices[0].title, "Success!");

    let last = view.last_mutation.unwrap();
    assert_eq!(last.kind, MutationKind::Create);
    assert_eq!(last.state, MutationState::Committed);
}

#[actix_rt::test]
async fn test_failed_create_offers_retry() {
    let app = board_with_trips(&["Athens"]).await;
    app.faults.fail_creates(true);

    let view = app.state.dashboard.create_trip(paris_options()).await.unwrap();
    assert_eq!(view.trips.len(), 1);
    let failure = view.error.expect("generation error is shown");
    assert_eq!(failure.message, "The AI model is currently busy. Please try again.");
    assert_eq!(failure.retry_options, paris_options());
    assert_eq!(view.notices[0].variant, NoticeVariant::Destructive);
    assert_eq!(view.notices[0].retry, Some(paris_options()));
    assert_eq!(
        view.last_mutation.map(|m| m.state),
        Some(MutationState::Failed)
    );

    app.faults.fail_creates(false);
    let view = app.state.dashboard.retry().await.unwrap();
    assert_eq!(view.trips.len(), 2);
    assert_eq!(view.trips[0].planner_options(), paris_options());
    assert!(view.error.is_none());
}

#[actix_rt::test]
async fn test_retry_needs_a_failure() {
    let app = board_with_trips(&[]).await;
    assert!(matches!(
        app.state.dashboard.retry().await,
        Err(BoardError::NothingToRetry)
    ));
}

#[actix_rt::test]
async fn test_invalid_options_do_not_start_a_mutation() {
    let app = board_with_trips(&["Athens"]).await;
    let mut options = paris_options();
    options.duration = 0;

    let err = app.state.dashboard.create_trip(options).await.unwrap_err();
    assert!(matches!(err, BoardError::Service(ServiceError::Validation(_))));

    let view = app.state.dashboard.view().await;
    assert!(view.error.is_none());
    assert!(view.last_mutation.is_none());
}

#[actix_rt::test]
async fn test_delete_commits_and_repoints_selection() {
    let app = board_with_trips(&["Athens", "Sparta", "Delphi"]).await;
    let before = app.state.dashboard.view().await;
    let doomed = before.trips[0].id.clone();

    let view = app.state.dashboard.delete_trip(&doomed).await.unwrap();
    assert_eq!(view.trips.len(), 2);
    assert!(view.trips.iter().all(|trip| trip.id != doomed));
    assert_eq!(view.selected_trip_id.as_deref(), Some(before.trips[1].id.as_str()));
    assert_eq!(view.notices[0].title, "Trip deleted successfully.");

    let stored = app.state.trips.list().await.unwrap();
    assert_eq!(ids(&stored), ids(&view.trips));
}

#[actix_rt::test]
async fn test_failed_delete_restores_previous_list() {
    let app = board_with_trips(&["Athens", "Sparta", "Delphi"]).await;
    let before = app.state.dashboard.view().await;
    let target = before.trips[1].id.clone();
    app.state.dashboard.select(&target).await.unwrap();
    app.faults.fail_deletes(true);

    let view = app.state.dashboard.delete_trip(&target).await.unwrap();
    assert_eq!(ids(&view.trips), ids(&before.trips));
    assert_eq!(view.trips, before.trips);
    assert_eq!(view.selected_trip_id.as_deref(), Some(target.as_str()));
    assert_eq!(view.notices[0].title, "Deletion failed");
    assert_eq!(
        view.notices[0].description.as_deref(),
        Some("Could not delete trip. Restoring...")
    );
    assert_eq!(
        view.last_mutation.map(|m| m.state),
        Some(MutationState::RolledBack)
    );

    let stored = app.state.trips.list().await.unwrap();
    assert_eq!(ids(&stored), ids(&before.trips));
}

#[actix_rt::test]
async fn test_unknown_trip_is_rejected() {
    let app = board_with_trips(&["Athens"]).await;

    assert!(matches!(
        app.state.dashboard.delete_trip("trip_nope").await,
        Err(BoardError::UnknownTrip(_))
    ));
    assert!(matches!(
        app.state.dashboard.select("trip_nope").await,
        Err(BoardError::UnknownTrip(_))
    ));
}

#[actix_rt::test]
async fn test_reset_clears_the_board() {
    let app = board_with_trips(&["Athens", "Sparta"]).await;

    app.state.dashboard.reset().await;
    let view = app.state.dashboard.view().await;
    assert!(view.trips.is_empty());
    assert!(view.selected_trip_id.is_none());
    assert!(view.last_mutation.is_none());

    // the stored trips survive and come back on the next refresh
    let view = app.state.dashboard.refresh().await.unwrap();
    assert_eq!(view.trips.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_second_mutation_is_refused_while_one_is_pending() {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        ItineraryGenerator::offline(),
        Arc::new(NoFaults),
        LatencyConfig::default(),
    );
    state.sessions.login("test@example.com", "pw").await.unwrap();
    state.trips.create(options_for("Athens", 1)).await.unwrap();
    let view = state.dashboard.refresh().await.unwrap();
    let target = view.trips[0].id.clone();

    let dashboard = state.dashboard.clone();
    let delete = tokio::spawn(async move { dashboard.delete_trip(&target).await });
    tokio::task::yield_now().await;

    let pending = state.dashboard.view().await;
    assert_eq!(pending.mode, BoardMode::Deleting);
    assert!(pending.trips.is_empty());
    assert!(matches!(
        state.dashboard.create_trip(paris_options()).await,
        Err(BoardError::MutationPending)
    ));
    assert!(matches!(
        state.dashboard.refresh().await,
        Err(BoardError::MutationPending)
    ));

    let view = delete.await.unwrap().unwrap();
    assert_eq!(view.mode, BoardMode::Idle);
    assert_eq!(
        view.last_mutation.map(|m| m.state),
        Some(MutationState::Committed)
    );
}

async fn paused_state_with_trip() -> (AppState, String) {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        ItineraryGenerator::offline(),
        Arc::new(NoFaults),
        LatencyConfig::default(),
    );
    state.sessions.login("test@example.com", "pw").await.unwrap();
    let trip = state.trips.create(options_for("Athens", 1)).await.unwrap();
    state.dashboard.refresh().await.unwrap();
    (state, trip.id)
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_delete_still_completes() {
    let (state, target) = paused_state_with_trip().await;

    let abandoned = tokio::time::timeout(
        Duration::from_millis(100),
        state.dashboard.delete_trip(&target),
    )
    .await;
    assert!(abandoned.is_err());

    tokio::time::sleep(Duration::from_secs(5)).await;

    let view = state.dashboard.view().await;
    assert_eq!(view.mode, BoardMode::Idle);
    assert!(view.trips.is_empty());
    assert_eq!(
        view.last_mutation.map(|m| m.state),
        Some(MutationState::Committed)
    );
    assert_eq!(view.notices[0].title, "Trip deleted successfully.");
    assert!(state.trips.list().await.unwrap().is_empty());

    assert_ok!(state.dashboard.refresh().await);
    assert_ok!(state.dashboard.create_trip(paris_options()).await);
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_failed_delete_still_rolls_back() {
    let faults: Arc<dyn trip_planner_api::services::fault_injection::FaultInjector> =
        Arc::new(|point: FaultPoint| point == FaultPoint::DeleteTrip);
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        ItineraryGenerator::offline(),
        faults,
        LatencyConfig::default(),
    );
    state.sessions.login("test@example.com", "pw").await.unwrap();
    let trip = state.trips.create(options_for("Athens", 1)).await.unwrap();
    state.dashboard.refresh().await.unwrap();

    let abandoned = tokio::time::timeout(
        Duration::from_millis(100),
        state.dashboard.delete_trip(&trip.id),
    )
    .await;
    assert!(abandoned.is_err());
    assert!(state.dashboard.view().await.trips.is_empty());

    tokio::time::sleep(Duration::from_secs(5)).await;

    let view = state.dashboard.view().await;
    assert_eq!(view.mode, BoardMode::Idle);
    assert_eq!(view.trips, vec![trip.clone()]);
    assert_eq!(view.selected_trip_id.as_deref(), Some(trip.id.as_str()));
    assert_eq!(
        view.last_mutation.map(|m| m.state),
        Some(MutationState::RolledBack)
    );
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_create_still_lands() {
    let (state, existing) = paused_state_with_trip().await;

    // the session lookup inside create outlasts the timeout
    let abandoned = tokio::time::timeout(
        Duration::from_millis(100),
        state.dashboard.create_trip(paris_options()),
    )
    .await;
    assert!(abandoned.is_err());

    tokio::time::sleep(Duration::from_secs(5)).await;

    let view = state.dashboard.view().await;
    assert_eq!(view.mode, BoardMode::Idle);
    assert_eq!(view.trips.len(), 2);
    assert_eq!(view.trips[0].destination, "Paris");
    assert_eq!(view.trips[1].id, existing);
    assert_eq!(state.trips.list().await.unwrap().len(), 2);
}
