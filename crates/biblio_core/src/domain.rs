//! crates/biblio_core/src/domain.rs
//!
//! Defines the pure, core data structures of the library services.
//! These structs are independent of any transport or serialization format.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Generates a fresh identifier for records created at runtime (reservations, reviews,
/// chat messages). Random v4 UUIDs stay unique under rapid sequential calls.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// The kind of material an item of the catalog is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Book,
    Dvd,
    Cd,
    Comic,
    Journal,
    Vr,
}

impl ItemType {
    /// The label shown to students.
    pub fn label(&self) -> &'static str {
        match self {
            ItemType::Book => "Livre",
            ItemType::Dvd => "DVD",
            ItemType::Cd => "CD",
            ItemType::Comic => "BD",
            ItemType::Journal => "Revue",
            ItemType::Vr => "Réalité Virtuelle",
        }
    }
}

/// A review left on an item. Reviews are only ever prepended, never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: String,
    /// Display name of the author.
    pub user: String,
    pub comment: String,
    pub rating: u8,
    pub date: NaiveDate,
}

/// A catalog entry that can be favorited, reserved or reviewed.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub author: String,
    pub item_type: ItemType,
    pub cover_url: String,
    pub is_new: bool,
    pub available: bool,
    pub description: Option<String>,
    /// Shelf location, e.g. "Informatique - Rayon A2".
    pub location: Option<String>,
    pub rating: Option<f32>,
    /// Newest first.
    pub reviews: Vec<Review>,
    pub categories: Vec<String>,
}

/// An item currently checked out by the user.
///
/// `is_overdue` is stored, not derived from `due_date`: it is set when the loan record
/// is created and stays authoritative.
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub id: String,
    /// Snapshot of the item at the time the loan was recorded.
    pub item: Item,
    pub due_date: NaiveDate,
    pub is_overdue: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    Pending,
    Available,
}

/// A request by the user to obtain an item, distinct from an active loan.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: String,
    /// Snapshot of the item at the time the reservation was created.
    pub item: Item,
    pub date: DateTime<Utc>,
    pub status: ReservationStatus,
}

// The single current user of a store.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub student_id: String,
    pub loans: Vec<Loan>,
    /// Item ids, unique. Dangling ids are tolerated.
    pub favorites: Vec<String>,
    pub reservations: Vec<Reservation>,
    /// Event ids the user registered for, unique.
    pub events: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Workshop,
    Meeting,
    Exhibition,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Workshop => "Atelier",
            EventKind::Meeting => "Rencontre",
            EventKind::Exhibition => "Exposition",
        }
    }
}

/// An event organised by the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    /// Display date, e.g. "15 Oct".
    pub date: String,
    /// Display time, e.g. "14:00".
    pub time: String,
    pub kind: EventKind,
    pub description: String,
}
