//! crates/biblio_core/src/store.rs
//!
//! The domain store: sole owner and writer of the catalog, the current user and the
//! events calendar.
//!
//! Every mutation is applied in full before any listener runs, so observers (and
//! anything reading the store afterwards) only ever see settled state. Rejections and
//! unknown ids leave the store untouched and notify nobody.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{new_id, CalendarEvent, Item, Reservation, ReservationStatus, Review, User};
use crate::outcome::{CancelOutcome, FavoriteToggle, RegisterOutcome, ReserveOutcome, ReviewOutcome};
use crate::ports::{ChangeListener, Clock};
use crate::seed;

/// Ratings outside this range are rejected.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Raised when a store is built from inconsistent data.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Duplicate item id in catalog: {0}")]
    DuplicateItem(String),
    #[error("Duplicate event id: {0}")]
    DuplicateEvent(String),
    #[error("Duplicate favorite id: {0}")]
    DuplicateFavorite(String),
    #[error("Duplicate event registration: {0}")]
    DuplicateRegistration(String),
}

/// A committed mutation, as reported to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    FavoriteAdded { item_id: String },
    FavoriteRemoved { item_id: String },
    ReservationCreated { reservation_id: String, item_id: String },
    ReservationCancelled { reservation_id: String, item_id: String },
    EventRegistered { event_id: String },
    ReviewAdded { item_id: String, review_id: String },
}

/// A cloned, consistent view of the whole store.
#[derive(Debug, Clone, PartialEq)]
pub struct LibrarySnapshot {
    pub items: Vec<Item>,
    pub user: User,
    pub events: Vec<CalendarEvent>,
    pub revision: u64,
}

pub struct LibraryStore {
    items: Vec<Item>,
    user: User,
    events: Vec<CalendarEvent>,
    clock: Arc<dyn Clock>,
    listeners: Vec<Arc<dyn ChangeListener>>,
    revision: u64,
}

fn ensure_unique<'a, E>(
    ids: impl IntoIterator<Item = &'a str>,
    err: impl Fn(String) -> E,
) -> Result<(), E> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(err(id.to_string()));
        }
    }
    Ok(())
}

impl LibraryStore {
    /// Builds a store from explicit data, checking that every id collection is unique.
    pub fn new(
        items: Vec<Item>,
        user: User,
        events: Vec<CalendarEvent>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StoreError> {
        ensure_unique(items.iter().map(|i| i.id.as_str()), StoreError::DuplicateItem)?;
        ensure_unique(events.iter().map(|e| e.id.as_str()), StoreError::DuplicateEvent)?;
        ensure_unique(user.favorites.iter().map(String::as_str), StoreError::DuplicateFavorite)?;
        ensure_unique(user.events.iter().map(String::as_str), StoreError::DuplicateRegistration)?;

        Ok(Self {
            items,
            user,
            events,
            clock,
            listeners: Vec::new(),
            revision: 0,
        })
    }

    /// Builds a store from the static seed data.
    pub fn seeded(clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let items = seed::catalog();
        let user = seed::current_user(&items);
        Self::new(items, user, seed::events(), clock)
    }

    pub fn subscribe(&mut self, listener: Arc<dyn ChangeListener>) {
        self.listeners.push(listener);
    }

    // --- Read access ---

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn event(&self, event_id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|event| event.id == event_id)
    }

    pub fn is_favorite(&self, item_id: &str) -> bool {
        self.user.favorites.iter().any(|id| id == item_id)
    }

    pub fn is_registered(&self, event_id: &str) -> bool {
        self.user.events.iter().any(|id| id == event_id)
    }

    /// Number of committed mutations since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> LibrarySnapshot {
        LibrarySnapshot {
            items: self.items.clone(),
            user: self.user.clone(),
            events: self.events.clone(),
            revision: self.revision,
        }
    }

    // --- Mutations ---

    /// Adds the id to the favorites, or removes it if already there.
    /// Ids that match no catalog entry are accepted.
    pub fn toggle_favorite(&mut self, item_id: &str) -> FavoriteToggle {
        if let Some(pos) = self.user.favorites.iter().position(|id| id == item_id) {
            self.user.favorites.remove(pos);
            self.commit(StoreChange::FavoriteRemoved {
                item_id: item_id.to_string(),
            });
            FavoriteToggle::Removed
        } else {
            self.user.favorites.push(item_id.to_string());
            self.commit(StoreChange::FavoriteAdded {
                item_id: item_id.to_string(),
            });
            FavoriteToggle::Added
        }
    }

    pub fn reserve_item(&mut self, item_id: &str) -> ReserveOutcome {
        let Some(item) = self.item(item_id) else {
            debug!(item_id, "Reservation ignored: unknown item");
            return ReserveOutcome::Ignored;
        };

        if self.user.reservations.iter().any(|r| r.item.id == item_id) {
            debug!(item_id, "Reservation rejected: already reserved");
            return ReserveOutcome::AlreadyReserved;
        }

        let reservation = Reservation {
            id: new_id(),
            item: item.clone(),
            date: self.clock.now(),
            status: ReservationStatus::Pending,
        };
        self.user.reservations.push(reservation.clone());
        self.commit(StoreChange::ReservationCreated {
            reservation_id: reservation.id.clone(),
            item_id: item_id.to_string(),
        });
        ReserveOutcome::Reserved(reservation)
    }

    pub fn cancel_reservation(&mut self, reservation_id: &str) -> CancelOutcome {
        let Some(pos) = self
            .user
            .reservations
            .iter()
            .position(|r| r.id == reservation_id)
        else {
            return CancelOutcome::Ignored;
        };

        let removed = self.user.reservations.remove(pos);
        self.commit(StoreChange::ReservationCancelled {
            reservation_id: removed.id.clone(),
            item_id: removed.item.id.clone(),
        });
        CancelOutcome::Cancelled(removed)
    }

    pub fn register_event(&mut self, event_id: &str) -> RegisterOutcome {
        if self.is_registered(event_id) {
            debug!(event_id, "Registration rejected: already registered");
            return RegisterOutcome::AlreadyRegistered;
        }
        if self.event(event_id).is_none() {
            debug!(event_id, "Registration ignored: unknown event");
            return RegisterOutcome::Ignored;
        }

        self.user.events.push(event_id.to_string());
        self.commit(StoreChange::EventRegistered {
            event_id: event_id.to_string(),
        });
        RegisterOutcome::Registered {
            event_id: event_id.to_string(),
        }
    }

    /// Prepends a review signed with the current user's name and today's date.
    pub fn add_review(&mut self, item_id: &str, comment: &str, rating: u8) -> ReviewOutcome {
        let today = self.clock.now().date_naive();
        let author = self.user.name.clone();

        let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) else {
            debug!(item_id, "Review ignored: unknown item");
            return ReviewOutcome::Ignored;
        };
        if !RATING_RANGE.contains(&rating) {
            debug!(item_id, rating, "Review rejected: rating out of range");
            return ReviewOutcome::InvalidRating(rating);
        }

        let review = Review {
            id: new_id(),
            user: author,
            comment: comment.to_string(),
            rating,
            date: today,
        };
        item.reviews.insert(0, review.clone());
        self.commit(StoreChange::ReviewAdded {
            item_id: item_id.to_string(),
            review_id: review.id.clone(),
        });
        ReviewOutcome::Added(review)
    }

    fn commit(&mut self, change: StoreChange) {
        self.revision += 1;
        for listener in &self.listeners {
            listener.on_change(&change, self.revision);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemType, Loan};
    use crate::outcome::{NoticeKind, StoreOutcome};
    use crate::ports::{MockChangeListener, MockClock};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 15, 12, 30, 0).unwrap()
    }

    fn fixed_clock() -> Arc<MockClock> {
        let mut clock = MockClock::new();
        clock.expect_now().return_const(noon());
        Arc::new(clock)
    }

    fn store() -> LibraryStore {
        LibraryStore::seeded(fixed_clock()).unwrap()
    }

    fn empty_user() -> User {
        User {
            id: "u1".into(),
            name: "Alexandre Dupont".into(),
            student_id: "22304591".into(),
            loans: Vec::new(),
            favorites: Vec::new(),
            reservations: Vec::new(),
            events: Vec::new(),
        }
    }

    #[test]
    fn toggle_favorite_is_an_involution() {
        let mut store = store();
        let favorite_set = |store: &LibraryStore| -> HashSet<String> {
            store.user().favorites.iter().cloned().collect()
        };
        let before = favorite_set(&store);

        for id in ["1", "2", "does-not-exist"] {
            store.toggle_favorite(id);
            store.toggle_favorite(id);
            assert_eq!(favorite_set(&store), before, "favorites changed for {id}");
        }
    }

    #[test]
    fn re_adding_a_favorite_moves_it_to_the_end() {
        let mut store = store();
        assert_eq!(store.user().favorites, vec!["1", "4"]);

        assert_eq!(store.toggle_favorite("1"), FavoriteToggle::Removed);
        assert_eq!(store.toggle_favorite("1"), FavoriteToggle::Added);
        assert_eq!(store.user().favorites, vec!["4", "1"]);
    }

    #[test]
    fn toggle_favorite_adds_then_removes() {
        let mut store = store();
        assert!(!store.is_favorite("5"));

        assert_eq!(store.toggle_favorite("5"), FavoriteToggle::Added);
        assert!(store.is_favorite("5"));
        assert_eq!(store.user().favorites.last().map(String::as_str), Some("5"));

        assert_eq!(store.toggle_favorite("5"), FavoriteToggle::Removed);
        assert!(!store.is_favorite("5"));
    }

    #[test]
    fn reserving_creates_a_pending_reservation() {
        let mut store = store();
        assert!(store.user().reservations.is_empty());

        let outcome = store.reserve_item("2");

        let ReserveOutcome::Reserved(reservation) = &outcome else {
            panic!("expected a reservation, got {outcome:?}");
        };
        assert_eq!(store.user().reservations.len(), 1);
        assert_eq!(reservation.item.id, "2");
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.date, noon());
        assert!(!reservation.id.is_empty());
        assert_eq!(&store.user().reservations[0], reservation);

        let notice = outcome.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::ReservationConfirmed);
        assert!(notice.message.contains("Inception"));
    }

    #[test]
    fn an_item_can_only_be_reserved_once() {
        let mut store = store();
        assert!(store.reserve_item("3").is_applied());

        let second = store.reserve_item("3");

        assert_eq!(second, ReserveOutcome::AlreadyReserved);
        assert_eq!(store.user().reservations.len(), 1);
        let notice = second.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::AlreadyReserved);
        assert!(notice.is_rejection());
    }

    #[test]
    fn reserving_an_unknown_item_is_a_no_op() {
        let mut store = store();
        let before = store.snapshot();

        let outcome = store.reserve_item("does-not-exist");

        assert_eq!(outcome, ReserveOutcome::Ignored);
        assert!(outcome.notice().is_none());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn reservation_ids_are_unique_under_rapid_calls() {
        let mut store = store();
        let mut ids = HashSet::new();
        for item in ["1", "2", "3", "4", "5", "6"] {
            store.reserve_item(item);
        }
        for reservation in &store.user().reservations {
            assert!(ids.insert(reservation.id.clone()));
        }
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn cancel_reservation_removes_only_the_matching_entry() {
        let mut store = store();
        store.reserve_item("1");
        store.reserve_item("2");
        let target = store.user().reservations[0].id.clone();

        let outcome = store.cancel_reservation(&target);

        assert!(matches!(outcome, CancelOutcome::Cancelled(ref r) if r.id == target));
        assert_eq!(store.user().reservations.len(), 1);
        assert_eq!(store.user().reservations[0].item.id, "2");

        // Cancelling frees the item for a new reservation.
        assert!(store.reserve_item("1").is_applied());
    }

    #[test]
    fn cancelling_an_absent_reservation_is_a_no_op() {
        let mut store = store();
        store.reserve_item("1");
        let revision = store.revision();

        assert_eq!(store.cancel_reservation("nope"), CancelOutcome::Ignored);
        assert_eq!(store.user().reservations.len(), 1);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn register_event_once() {
        let mut store = store();

        let first = store.register_event("e2");
        assert!(first.is_applied());
        assert_eq!(first.notice().unwrap().kind, NoticeKind::RegistrationConfirmed);
        assert_eq!(store.user().events, vec!["e2".to_string()]);

        let second = store.register_event("e2");
        assert_eq!(second, RegisterOutcome::AlreadyRegistered);
        assert_eq!(second.notice().unwrap().kind, NoticeKind::AlreadyRegistered);
        assert_eq!(store.user().events.len(), 1);
    }

    #[test]
    fn registering_an_unknown_event_is_a_no_op() {
        let mut store = store();
        assert_eq!(store.register_event("e99"), RegisterOutcome::Ignored);
        assert!(store.user().events.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn reviews_are_prepended() {
        let mut store = store();

        store.add_review("1", "Great!", 5);
        store.add_review("1", "Also great", 4);

        let reviews = &store.item("1").unwrap().reviews;
        assert_eq!(reviews[0].comment, "Also great");
        assert_eq!(reviews[1].comment, "Great!");
        // The seeded review is now last.
        assert_eq!(reviews[2].comment, "Super clair !");
    }

    #[test]
    fn review_is_signed_and_dated() {
        let mut store = store();

        let ReviewOutcome::Added(review) = store.add_review("2", "Culte", 5) else {
            panic!("review should be added");
        };

        assert_eq!(review.user, "Alexandre Dupont");
        assert_eq!(review.date.format("%Y-%m-%d").to_string(), "2024-10-15");
        assert_eq!(store.item("2").unwrap().reviews, vec![review]);
    }

    #[test]
    fn review_rating_must_be_between_one_and_five() {
        let mut store = store();

        for rating in [0, 6, 255] {
            let outcome = store.add_review("2", "Hmm", rating);
            assert_eq!(outcome, ReviewOutcome::InvalidRating(rating));
            assert_eq!(outcome.notice().unwrap().kind, NoticeKind::InvalidRating);
        }
        assert!(store.item("2").unwrap().reviews.is_empty());
        assert!(store.add_review("2", "Bof", 1).is_applied());
    }

    #[test]
    fn reviewing_an_unknown_item_is_a_no_op() {
        let mut store = store();
        let before = store.snapshot();
        assert_eq!(store.add_review("nope", "Great!", 5), ReviewOutcome::Ignored);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn reservation_and_loan_items_are_snapshots() {
        let mut store = store();
        store.reserve_item("2");

        store.add_review("2", "Toujours aussi bon", 5);

        assert_eq!(store.item("2").unwrap().reviews.len(), 1);
        assert!(store.user().reservations[0].item.reviews.is_empty());
        let loan = store.user().loans.iter().find(|l| l.item.id == "2").unwrap();
        assert!(loan.item.reviews.is_empty());
    }

    #[test]
    fn overdue_flag_is_stored_not_derived() {
        let items = seed::catalog();
        let mut user = empty_user();
        // Due far in the future yet flagged overdue, and the reverse.
        user.loans = vec![
            Loan {
                id: "l1".into(),
                item: items[0].clone(),
                due_date: NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
                is_overdue: true,
            },
            Loan {
                id: "l2".into(),
                item: items[1].clone(),
                due_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                is_overdue: false,
            },
        ];
        let store = LibraryStore::new(items, user, seed::events(), fixed_clock()).unwrap();

        assert!(store.user().loans[0].is_overdue);
        assert!(!store.user().loans[1].is_overdue);
    }

    #[test]
    fn listeners_fire_once_per_committed_mutation() {
        let mut listener = MockChangeListener::new();
        listener
            .expect_on_change()
            .withf(|change, revision| {
                *revision == 1
                    && matches!(change, StoreChange::ReservationCreated { item_id, .. } if item_id == "4")
            })
            .times(1)
            .return_const(());
        listener
            .expect_on_change()
            .withf(|change, revision| {
                *revision == 2
                    && *change == StoreChange::FavoriteRemoved { item_id: "1".into() }
            })
            .times(1)
            .return_const(());

        let mut store = store();
        store.subscribe(Arc::new(listener));

        store.reserve_item("4");
        store.reserve_item("4");
        store.reserve_item("missing");
        store.register_event("missing");
        store.add_review("4", "x", 9);
        store.cancel_reservation("missing");
        store.toggle_favorite("1");

        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn listener_sees_settled_revision() {
        let mut listener = MockChangeListener::new();
        listener
            .expect_on_change()
            .withf(|change, revision| {
                *revision == 1 && *change == StoreChange::EventRegistered { event_id: "e1".into() }
            })
            .times(1)
            .return_const(());

        let mut store = store();
        store.subscribe(Arc::new(listener));
        store.register_event("e1");
        assert!(store.is_registered("e1"));
    }

    #[test]
    fn malformed_seed_data_is_rejected() {
        let mut items = seed::catalog();
        items.push(items[0].clone());
        let err = LibraryStore::new(items, empty_user(), seed::events(), fixed_clock())
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::DuplicateItem(id) if id == "1"));

        let mut user = empty_user();
        user.favorites = vec!["1".into(), "1".into()];
        let err = LibraryStore::new(seed::catalog(), user, seed::events(), fixed_clock())
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::DuplicateFavorite(_)));
    }

    #[test]
    fn independent_stores_do_not_share_state() {
        let mut first = store();
        let second = store();

        first.reserve_item("6");

        assert_eq!(first.user().reservations.len(), 1);
        assert!(second.user().reservations.is_empty());
        assert_eq!(first.item("6").unwrap().item_type, ItemType::Vr);
    }
}
