//! crates/biblio_core/src/profile.rs
//!
//! The "Mon Compte" view of the current student, derived from a store.

use crate::domain::{CalendarEvent, Item, Loan, Reservation};
use crate::store::LibraryStore;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    pub user_id: String,
    pub name: String,
    pub student_id: String,
    pub loans: Vec<Loan>,
    pub overdue_loans: Vec<Loan>,
    pub reservations: Vec<Reservation>,
    /// Favorites resolved against the catalog; ids without a matching item are skipped.
    pub favorite_items: Vec<Item>,
    pub registered_events: Vec<CalendarEvent>,
}

impl ProfileSummary {
    pub fn from_store(store: &LibraryStore) -> Self {
        let user = store.user();

        let favorite_items = store
            .items()
            .iter()
            .filter(|item| store.is_favorite(&item.id))
            .cloned()
            .collect();
        let registered_events = store
            .events()
            .iter()
            .filter(|event| store.is_registered(&event.id))
            .cloned()
            .collect();

        Self {
            user_id: user.id.clone(),
            name: user.name.clone(),
            student_id: user.student_id.clone(),
            loans: user.loans.clone(),
            overdue_loans: user.loans.iter().filter(|l| l.is_overdue).cloned().collect(),
            reservations: user.reservations.clone(),
            favorite_items,
            registered_events,
        }
    }

    pub fn has_overdue_loans(&self) -> bool {
        !self.overdue_loans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockClock;
    use chrono::Utc;
    use std::sync::Arc;

    fn store() -> LibraryStore {
        let mut clock = MockClock::new();
        clock.expect_now().returning(Utc::now);
        LibraryStore::seeded(Arc::new(clock)).unwrap()
    }

    #[test]
    fn seeded_profile() {
        let profile = ProfileSummary::from_store(&store());

        assert_eq!(profile.name, "Alexandre Dupont");
        assert_eq!(profile.loans.len(), 2);
        assert!(profile.has_overdue_loans());
        assert_eq!(profile.overdue_loans.len(), 1);
        assert_eq!(profile.overdue_loans[0].item.title, "Inception");
        let favorites: Vec<&str> = profile.favorite_items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(favorites, vec!["1", "4"]);
        assert!(profile.registered_events.is_empty());
    }

    #[test]
    fn dangling_favorites_are_skipped() {
        let mut store = store();
        store.toggle_favorite("ghost");
        store.register_event("e3");

        let profile = ProfileSummary::from_store(&store);

        assert_eq!(store.user().favorites.len(), 3);
        assert_eq!(profile.favorite_items.len(), 2);
        assert_eq!(profile.registered_events[0].title, "Démo Imprimante 3D");
    }
}
