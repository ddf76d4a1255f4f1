//! Client-visible trip list with optimistic deletes.
//!
//! [`TripBoard`] holds what the dashboard shows: the trips, the selected
//! trip, whether a plan is being generated, the last generation error and the
//! notices to toast. It never performs I/O. A mutation is started with a
//! `begin_*` call that hands out a ticket, the caller runs the store call,
//! and the ticket is handed back to the matching `finish_*` call together
//! with the result. Tickets are consumed, so a mutation finishes once.
//!
//! Only one mutation may be pending at a time.

use serde::Serialize;

use crate::error::{BoardError, ServiceError};
use crate::models::{planner::PlannerOptions, trip::Trip};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MutationKind {
    Create,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MutationState {
    Idle,
    Pending,
    Committed,
    /// Deletion failed and the previous list was restored.
    RolledBack,
    /// Creation failed. Nothing was applied, so there is nothing to restore.
    Failed,
    /// The result arrived after the board was reset and was ignored.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BoardMode {
    Idle,
    Generating,
    Deleting,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationRecord {
    pub id: u64,
    pub kind: MutationKind,
    pub trip_id: Option<String>,
    pub state: MutationState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub variant: NoticeVariant,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Options to replay when the user picks the retry action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<PlannerOptions>,
}

impl Notice {
    fn info(title: &str, description: Option<&str>) -> Self {
        Self {
            variant: NoticeVariant::Default,
            title: title.to_string(),
            description: description.map(str::to_string),
            retry: None,
        }
    }

    fn destructive(title: &str, description: String, retry: Option<PlannerOptions>) -> Self {
        Self {
            variant: NoticeVariant::Destructive,
            title: title.to_string(),
            description: Some(description),
            retry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationFailure {
    pub message: String,
    pub retry_options: PlannerOptions,
}

#[derive(Debug)]
#[must_use = "a started mutation must be finished with TripBoard::finish_create"]
pub struct CreateTicket {
    mutation_id: u64,
    epoch: u64,
    options: PlannerOptions,
}

impl CreateTicket {
    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }
}

#[derive(Debug)]
#[must_use = "a started mutation must be finished with TripBoard::finish_delete"]
pub struct DeleteTicket {
    mutation_id: u64,
    epoch: u64,
    trip_id: String,
    snapshot: Vec<Trip>,
    previous_selection: Option<String>,
    repointed_selection: Option<String>,
}

impl DeleteTicket {
    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }
}

/// Serializable snapshot of the board for the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub trips: Vec<Trip>,
    pub selected_trip_id: Option<String>,
    pub mode: BoardMode,
    pub error: Option<GenerationFailure>,
    pub notices: Vec<Notice>,
    pub last_mutation: Option<MutationRecord>,
}

#[derive(Debug, Default)]
pub struct TripBoard {
    trips: Vec<Trip>,
    selected: Option<String>,
    pending: Option<MutationRecord>,
    last: Option<MutationRecord>,
    error: Option<GenerationFailure>,
    notices: Vec<Notice>,
    next_mutation_id: u64,
    epoch: u64,
}

impl TripBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_trip(&self) -> Option<&Trip> {
        let id = self.selected.as_deref()?;
        self.trips.iter().find(|trip| trip.id == id)
    }

    pub fn error(&self) -> Option<&GenerationFailure> {
        self.error.as_ref()
    }

    pub fn last_mutation(&self) -> Option<&MutationRecord> {
        self.last.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn mode(&self) -> BoardMode {
        match self.pending.as_ref().map(|m| m.kind) {
            Some(MutationKind::Create) => BoardMode::Generating,
            Some(MutationKind::Delete) => BoardMode::Deleting,
            None => BoardMode::Idle,
        }
    }

    /// Replaces the list with freshly fetched trips. Keeps the selection if
    /// it still exists, otherwise selects the newest trip.
    pub fn load(&mut self, trips: Vec<Trip>) -> Result<(), BoardError> {
        if self.pending.is_some() {
            return Err(BoardError::MutationPending);
        }

        let keep = self
            .selected
            .as_deref()
            .is_some_and(|id| trips.iter().any(|trip| trip.id == id));
        if !keep {
            self.selected = trips.first().map(|trip| trip.id.clone());
        }
        self.trips = trips;
        Ok(())
    }

    pub fn select(&mut self, trip_id: &str) -> Result<(), BoardError> {
        if !self.trips.iter().any(|trip| trip.id == trip_id) {
            return Err(BoardError::UnknownTrip(trip_id.to_string()));
        }
        self.selected = Some(trip_id.to_string());
        self.error = None;
        Ok(())
    }

    pub fn retry_options(&self) -> Option<&PlannerOptions> {
        self.error.as_ref().map(|failure| &failure.retry_options)
    }

    pub fn begin_create(&mut self, options: PlannerOptions) -> Result<CreateTicket, BoardError> {
        let mutation_id = self.start(MutationKind::Create, None)?;
        self.error = None;
        Ok(CreateTicket {
            mutation_id,
            epoch: self.epoch,
            options,
        })
    }

    /// Starts a new creation with the options of the last failed one.
    pub fn begin_retry(&mut self) -> Result<CreateTicket, BoardError> {
        let options = self
            .retry_options()
            .cloned()
            .ok_or(BoardError::NothingToRetry)?;
        self.begin_create(options)
    }

    pub fn finish_create(
        &mut self,
        ticket: CreateTicket,
        result: Result<Trip, ServiceError>,
    ) -> MutationState {
        if ticket.epoch != self.epoch {
            log::debug!("Discarding result of stale create #{}", ticket.mutation_id);
            return MutationState::Discarded;
        }
        self.pending = None;

        let (state, trip_id) = match result {
            Ok(trip) => {
                let trip_id = trip.id.clone();
                self.trips.retain(|existing| existing.id != trip.id);
                self.trips.insert(0, trip);
                self.selected = Some(trip_id.clone());
                self.error = None;
                self.notices.push(Notice::info(
                    "Success!",
                    Some("Your new trip has been generated."),
                ));
                (MutationState::Committed, Some(trip_id))
            }
            Err(err) => {
                let message = err.to_string();
                log::warn!("Trip generation failed: {}", message);
                self.error = Some(GenerationFailure {
                    message: message.clone(),
                    retry_options: ticket.options.clone(),
                });
                self.notices.push(Notice::destructive(
                    "Oh no! Something went wrong.",
                    message,
                    Some(ticket.options),
                ));
                (MutationState::Failed, None)
            }
        };

        self.record(ticket.mutation_id, MutationKind::Create, trip_id, state);
        state
    }

    /// Removes the trip from the visible list right away.
    pub fn begin_delete(&mut self, trip_id: &str) -> Result<DeleteTicket, BoardError> {
        if self.pending.is_some() {
            return Err(BoardError::MutationPending);
        }
        if !self.trips.iter().any(|trip| trip.id == trip_id) {
            return Err(BoardError::UnknownTrip(trip_id.to_string()));
        }

        let mutation_id = self.start(MutationKind::Delete, Some(trip_id.to_string()))?;
        let snapshot = self.trips.clone();
        let previous_selection = self.selected.clone();

        self.trips.retain(|trip| trip.id != trip_id);
        if self.selected.as_deref() == Some(trip_id) {
            self.selected = self.trips.first().map(|trip| trip.id.clone());
        }

        Ok(DeleteTicket {
            mutation_id,
            epoch: self.epoch,
            trip_id: trip_id.to_string(),
            snapshot,
            previous_selection,
            repointed_selection: self.selected.clone(),
        })
    }

    pub fn finish_delete(
        &mut self,
        ticket: DeleteTicket,
        result: Result<(), ServiceError>,
    ) -> MutationState {
        if ticket.epoch != self.epoch {
            log::debug!("Discarding result of stale delete #{}", ticket.mutation_id);
            return MutationState::Discarded;
        }
        self.pending = None;

        let state = match result {
            Ok(()) => {
                self.notices
                    .push(Notice::info("Trip deleted successfully.", None));
                MutationState::Committed
            }
            Err(err) => {
                log::warn!("Rolling back delete of {}: {}", ticket.trip_id, err);
                self.trips = ticket.snapshot;
                // only undo the re-pointing if the user has not picked something else since
                if self.selected == ticket.repointed_selection {
                    self.selected = ticket.previous_selection;
                }
                self.notices.push(Notice::destructive(
                    "Deletion failed",
                    "Could not delete trip. Restoring...".to_string(),
                    None,
                ));
                MutationState::RolledBack
            }
        };

        self.record(
            ticket.mutation_id,
            MutationKind::Delete,
            Some(ticket.trip_id),
            state,
        );
        state
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Forgets everything, e.g. on logout. Results of mutations still in
    /// flight are discarded when they arrive.
    pub fn reset(&mut self) {
        let epoch = self.epoch + 1;
        let next_mutation_id = self.next_mutation_id;
        *self = Self {
            epoch,
            next_mutation_id,
            ..Self::default()
        };
    }

    /// Snapshot for rendering. Drains pending notices.
    pub fn view(&mut self) -> BoardView {
        BoardView {
            trips: self.trips.clone(),
            selected_trip_id: self.selected.clone(),
            mode: self.mode(),
            error: self.error.clone(),
            notices: self.take_notices(),
            last_mutation: self.pending.clone().or_else(|| self.last.clone()),
        }
    }

    fn start(&mut self, kind: MutationKind, trip_id: Option<String>) -> Result<u64, BoardError> {
        if self.pending.is_some() {
            return Err(BoardError::MutationPending);
        }
        self.next_mutation_id += 1;
        self.pending = Some(MutationRecord {
            id: self.next_mutation_id,
            kind,
            trip_id,
            state: MutationState::Pending,
        });
        Ok(self.next_mutation_id)
    }

    fn record(&mut self, id: u64, kind: MutationKind, trip_id: Option<String>, state: MutationState) {
        self.last = Some(MutationRecord {
            id,
            kind,
            trip_id,
            state,
        });
    }
}
