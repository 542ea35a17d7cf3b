//! services/api/src/web/dto.rs
//!
//! JSON payloads of the REST API. The core types stay serialization-free; these
//! structs are built from them at the edge.

use biblio_core::{
    stats::TrafficPoint, AttendanceStats, CalendarEvent, ChatMessage, Item, LibraryStore, Loan,
    Notice, NoticeKind, ProfileSummary, Reservation, ReservationStatus, Review, Sender,
    StoreOutcome,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Request Payloads
//=========================================================================================

/// Query string of the catalog listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// One of TOUT, LIVRES, DVD, VR, BD.
    pub filter: Option<String>,
    /// Free-text search over title, author and categories.
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddReviewRequest {
    pub comment: String,
    /// From 1 to 5.
    pub rating: u8,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub text: String,
}

//=========================================================================================
// Catalog Payloads
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: String,
    pub user: String,
    pub comment: String,
    pub rating: u8,
    pub date: NaiveDate,
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.clone(),
            user: review.user.clone(),
            comment: review.comment.clone(),
            rating: review.rating,
            date: review.date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub item_type: String,
    pub cover_url: String,
    pub is_new: bool,
    pub available: bool,
    pub description: Option<String>,
    pub location: Option<String>,
    pub rating: Option<f32>,
    pub reviews: Vec<ReviewResponse>,
    pub categories: Vec<String>,
    pub is_favorite: bool,
}

impl ItemResponse {
    pub fn new(item: &Item, is_favorite: bool) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            author: item.author.clone(),
            item_type: item.item_type.label().to_string(),
            cover_url: item.cover_url.clone(),
            is_new: item.is_new,
            available: item.available,
            description: item.description.clone(),
            location: item.location.clone(),
            rating: item.rating,
            reviews: item.reviews.iter().map(ReviewResponse::from).collect(),
            categories: item.categories.clone(),
            is_favorite,
        }
    }

    pub fn from_store(item: &Item, store: &LibraryStore) -> Self {
        Self::new(item, store.is_favorite(&item.id))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub kind: String,
    pub description: String,
    pub registered: bool,
}

impl EventResponse {
    pub fn new(event: &CalendarEvent, registered: bool) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            date: event.date.clone(),
            time: event.time.clone(),
            kind: event.kind.label().to_string(),
            description: event.description.clone(),
            registered,
        }
    }
}

//=========================================================================================
// Profile Payloads
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct LoanResponse {
    pub id: String,
    /// The item as it was when the loan was recorded.
    pub item: ItemResponse,
    pub due_date: NaiveDate,
    pub is_overdue: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationResponse {
    pub id: String,
    /// The item as it was when the reservation was made.
    pub item: ItemResponse,
    pub date: DateTime<Utc>,
    pub status: String,
}

impl LoanResponse {
    pub fn new(loan: &Loan, store: &LibraryStore) -> Self {
        Self {
            id: loan.id.clone(),
            item: ItemResponse::from_store(&loan.item, store),
            due_date: loan.due_date,
            is_overdue: loan.is_overdue,
        }
    }
}

impl ReservationResponse {
    pub fn new(reservation: &Reservation, store: &LibraryStore) -> Self {
        let status = match reservation.status {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Available => "Available",
        };
        Self {
            id: reservation.id.clone(),
            item: ItemResponse::from_store(&reservation.item, store),
            date: reservation.date,
            status: status.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user_id: String,
    pub name: String,
    pub student_id: String,
    pub loans: Vec<LoanResponse>,
    pub overdue_count: usize,
    pub reservations: Vec<ReservationResponse>,
    /// Raw favorite ids, including ids with no catalog entry.
    pub favorites: Vec<String>,
    pub favorite_items: Vec<ItemResponse>,
    pub registered_events: Vec<EventResponse>,
}

impl ProfileResponse {
    pub fn from_store(store: &LibraryStore) -> Self {
        let profile = ProfileSummary::from_store(store);
        Self {
            user_id: profile.user_id,
            name: profile.name,
            student_id: profile.student_id,
            loans: profile.loans.iter().map(|l| LoanResponse::new(l, store)).collect(),
            overdue_count: profile.overdue_loans.len(),
            reservations: profile
                .reservations
                .iter()
                .map(|r| ReservationResponse::new(r, store))
                .collect(),
            favorites: store.user().favorites.clone(),
            favorite_items: profile
                .favorite_items
                .iter()
                .map(|item| ItemResponse::new(item, true))
                .collect(),
            registered_events: profile
                .registered_events
                .iter()
                .map(|event| EventResponse::new(event, true))
                .collect(),
        }
    }
}

//=========================================================================================
// Mutation Payloads
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct NoticeResponse {
    pub kind: String,
    pub message: String,
    pub is_rejection: bool,
}

impl From<Notice> for NoticeResponse {
    fn from(notice: Notice) -> Self {
        let kind = match notice.kind {
            NoticeKind::ReservationConfirmed => "reservation_confirmed",
            NoticeKind::AlreadyReserved => "already_reserved",
            NoticeKind::RegistrationConfirmed => "registration_confirmed",
            NoticeKind::AlreadyRegistered => "already_registered",
            NoticeKind::InvalidRating => "invalid_rating",
        };
        Self {
            kind: kind.to_string(),
            is_rejection: notice.is_rejection(),
            message: notice.message,
        }
    }
}

/// The answer to every mutation: what happened, and what to tell the student.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    /// e.g. `reserved`, `already_reserved`, `ignored`.
    pub outcome: String,
    pub applied: bool,
    pub notice: Option<NoticeResponse>,
    /// Store revision after the operation.
    pub revision: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<ReservationResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewResponse>,
}

impl ActionResponse {
    pub fn new(outcome: &impl StoreOutcome, revision: u64) -> Self {
        Self {
            outcome: outcome.tag().to_string(),
            applied: outcome.is_applied(),
            notice: outcome.notice().map(NoticeResponse::from),
            revision,
            reservation: None,
            review: None,
        }
    }
}

//=========================================================================================
// Statistics and Chat Payloads
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct TrafficPointResponse {
    pub label: String,
    pub value: u32,
}

impl From<&TrafficPoint> for TrafficPointResponse {
    fn from(point: &TrafficPoint) -> Self {
        Self {
            label: point.label.clone(),
            value: point.value,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub annual_entries: u32,
    pub new_titles_per_year: u32,
    pub peak_time: String,
    pub hourly: Vec<TrafficPointResponse>,
    pub monthly: Vec<TrafficPointResponse>,
    pub peak_slot: Option<TrafficPointResponse>,
    /// Labels of the months highlighted as busy.
    pub busy_months: Vec<String>,
}

impl StatsResponse {
    pub fn new(stats: &AttendanceStats, busy_threshold: u32) -> Self {
        Self {
            annual_entries: stats.key_figures.annual_entries,
            new_titles_per_year: stats.key_figures.new_titles_per_year,
            peak_time: stats.key_figures.peak_time.clone(),
            hourly: stats.hourly.iter().map(TrafficPointResponse::from).collect(),
            monthly: stats.monthly.iter().map(TrafficPointResponse::from).collect(),
            peak_slot: stats.peak_slot().map(TrafficPointResponse::from),
            busy_months: stats
                .busy_months(busy_threshold)
                .into_iter()
                .map(|point| point.label.clone())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatMessageResponse {
    pub id: String,
    pub text: String,
    /// `user` or `bot`.
    pub sender: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&ChatMessage> for ChatMessageResponse {
    fn from(message: &ChatMessage) -> Self {
        let sender = match message.sender {
            Sender::User => "user",
            Sender::Bot => "bot",
        };
        Self {
            id: message.id.clone(),
            text: message.text.clone(),
            sender: sender.to_string(),
            timestamp: message.timestamp,
        }
    }
}
