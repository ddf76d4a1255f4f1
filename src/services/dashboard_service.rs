use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{BoardError, ServiceError};
use crate::models::planner::PlannerOptions;
use crate::services::trip_board::{BoardView, CreateTicket, TripBoard};
use crate::services::trip_service::TripService;

/// Drives the [`TripBoard`] against the trip service.
///
/// The board lock is only held for state transitions, never while a store
/// call is in flight, so the view stays readable during generation.
///
/// The store call and the matching `finish_*` run on a spawned task. A caller
/// that goes away (client disconnect, timeout) leaves the mutation to finish
/// on its own, and its outcome shows up in the next view.
pub struct DashboardService {
    trips: Arc<TripService>,
    board: Arc<Mutex<TripBoard>>,
}

impl DashboardService {
    pub fn new(trips: Arc<TripService>) -> Self {
        Self {
            trips,
            board: Arc::new(Mutex::new(TripBoard::new())),
        }
    }

    pub async fn view(&self) -> BoardView {
        self.board.lock().await.view()
    }

    pub async fn refresh(&self) -> Result<BoardView, BoardError> {
        if self.board.lock().await.is_busy() {
            return Err(BoardError::MutationPending);
        }

        let trips = self.trips.list().await.map_err(|err| {
            log::error!("Failed to load trips: {}", err);
            err
        })?;

        let mut board = self.board.lock().await;
        board.load(trips)?;
        Ok(board.view())
    }

    pub async fn select(&self, trip_id: &str) -> Result<BoardView, BoardError> {
        let mut board = self.board.lock().await;
        board.select(trip_id)?;
        Ok(board.view())
    }

    /// Invalid options are rejected up front and never start a mutation.
    pub async fn create_trip(&self, options: PlannerOptions) -> Result<BoardView, BoardError> {
        options.validate().map_err(ServiceError::from)?;
        let ticket = self.board.lock().await.begin_create(options)?;
        self.run_create(ticket).await
    }

    pub async fn retry(&self) -> Result<BoardView, BoardError> {
        let ticket = self.board.lock().await.begin_retry()?;
        self.run_create(ticket).await
    }

    pub async fn delete_trip(&self, trip_id: &str) -> Result<BoardView, BoardError> {
        let ticket = self.board.lock().await.begin_delete(trip_id)?;
        let trips = self.trips.clone();
        let board = self.board.clone();

        let state = tokio::spawn(async move {
            let result = trips.remove(ticket.trip_id()).await;
            let state = board.lock().await.finish_delete(ticket, result);
            state
        })
        .await?;

        log::debug!("Delete of {} finished as {:?}", trip_id, state);
        Ok(self.view().await)
    }

    /// Drops all client state, e.g. after logout.
    pub async fn reset(&self) {
        self.board.lock().await.reset();
    }

    async fn run_create(&self, ticket: CreateTicket) -> Result<BoardView, BoardError> {
        let trips = self.trips.clone();
        let board = self.board.clone();

        let state = tokio::spawn(async move {
            let result = trips.create(ticket.options().clone()).await;
            let state = board.lock().await.finish_create(ticket, result);
            state
        })
        .await?;

        log::debug!("Create finished as {:?}", state);
        Ok(self.view().await)
    }
}
