//! crates/biblio_core/src/outcome.rs
//!
//! Results of the store's mutation operations.
//!
//! Expected business conditions (an item already reserved, an event already joined,
//! an out-of-range rating) are not errors: each operation returns an outcome value
//! that says whether the state changed and, when the student has to be told something,
//! carries a `Notice`. Unknown ids produce an `Ignored` outcome with no notice.

use crate::domain::{Reservation, Review};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    ReservationConfirmed,
    AlreadyReserved,
    RegistrationConfirmed,
    AlreadyRegistered,
    InvalidRating,
}

/// A short user-facing message produced by a store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn reservation_confirmed(title: &str) -> Self {
        Self {
            kind: NoticeKind::ReservationConfirmed,
            message: format!("Réservation confirmée pour \"{}\".", title),
        }
    }

    pub fn already_reserved() -> Self {
        Self {
            kind: NoticeKind::AlreadyReserved,
            message: "Vous avez déjà réservé cet ouvrage.".to_string(),
        }
    }

    pub fn registration_confirmed() -> Self {
        Self {
            kind: NoticeKind::RegistrationConfirmed,
            message: "Inscription confirmée !".to_string(),
        }
    }

    pub fn already_registered() -> Self {
        Self {
            kind: NoticeKind::AlreadyRegistered,
            message: "Vous êtes déjà inscrit à cet événement.".to_string(),
        }
    }

    pub fn invalid_rating() -> Self {
        Self {
            kind: NoticeKind::InvalidRating,
            message: "La note doit être comprise entre 1 et 5.".to_string(),
        }
    }

    /// True for notices reporting a rejected operation.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self.kind,
            NoticeKind::AlreadyReserved | NoticeKind::AlreadyRegistered | NoticeKind::InvalidRating
        )
    }
}

/// Common view over every outcome type, used by the presentation boundary.
pub trait StoreOutcome {
    /// Whether the operation changed the store.
    fn is_applied(&self) -> bool;

    /// The message to show the student, if any.
    fn notice(&self) -> Option<Notice>;

    /// A stable snake_case tag naming the outcome.
    fn tag(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

impl StoreOutcome for FavoriteToggle {
    fn is_applied(&self) -> bool {
        true
    }

    fn notice(&self) -> Option<Notice> {
        None
    }

    fn tag(&self) -> &'static str {
        match self {
            FavoriteToggle::Added => "favorite_added",
            FavoriteToggle::Removed => "favorite_removed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReserveOutcome {
    Reserved(Reservation),
    AlreadyReserved,
    /// The item id did not resolve to a catalog entry.
    Ignored,
}

impl StoreOutcome for ReserveOutcome {
    fn is_applied(&self) -> bool {
        matches!(self, ReserveOutcome::Reserved(_))
    }

    fn notice(&self) -> Option<Notice> {
        match self {
            ReserveOutcome::Reserved(reservation) => {
                Some(Notice::reservation_confirmed(&reservation.item.title))
            }
            ReserveOutcome::AlreadyReserved => Some(Notice::already_reserved()),
            ReserveOutcome::Ignored => None,
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            ReserveOutcome::Reserved(_) => "reserved",
            ReserveOutcome::AlreadyReserved => "already_reserved",
            ReserveOutcome::Ignored => "ignored",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CancelOutcome {
    Cancelled(Reservation),
    Ignored,
}

impl StoreOutcome for CancelOutcome {
    fn is_applied(&self) -> bool {
        matches!(self, CancelOutcome::Cancelled(_))
    }

    fn notice(&self) -> Option<Notice> {
        None
    }

    fn tag(&self) -> &'static str {
        match self {
            CancelOutcome::Cancelled(_) => "cancelled",
            CancelOutcome::Ignored => "ignored",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered { event_id: String },
    AlreadyRegistered,
    /// The event id did not resolve to a known event.
    Ignored,
}

impl StoreOutcome for RegisterOutcome {
    fn is_applied(&self) -> bool {
        matches!(self, RegisterOutcome::Registered { .. })
    }

    fn notice(&self) -> Option<Notice> {
        match self {
            RegisterOutcome::Registered { .. } => Some(Notice::registration_confirmed()),
            RegisterOutcome::AlreadyRegistered => Some(Notice::already_registered()),
            RegisterOutcome::Ignored => None,
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            RegisterOutcome::Registered { .. } => "registered",
            RegisterOutcome::AlreadyRegistered => "already_registered",
            RegisterOutcome::Ignored => "ignored",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    Added(Review),
    InvalidRating(u8),
    Ignored,
}

impl StoreOutcome for ReviewOutcome {
    fn is_applied(&self) -> bool {
        matches!(self, ReviewOutcome::Added(_))
    }

    fn notice(&self) -> Option<Notice> {
        match self {
            ReviewOutcome::InvalidRating(_) => Some(Notice::invalid_rating()),
            _ => None,
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            ReviewOutcome::Added(_) => "review_added",
            ReviewOutcome::InvalidRating(_) => "invalid_rating",
            ReviewOutcome::Ignored => "ignored",
        }
    }
}
