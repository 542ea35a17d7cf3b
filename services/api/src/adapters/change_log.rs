//! services/api/src/adapters/change_log.rs
//!
//! A `ChangeListener` that records every committed store mutation in the logs.

use biblio_core::{ChangeListener, StoreChange};
use tracing::info;

#[derive(Clone, Default)]
pub struct TracingChangeListener;

impl ChangeListener for TracingChangeListener {
    fn on_change(&self, change: &StoreChange, revision: u64) {
        match change {
            StoreChange::FavoriteAdded { item_id } => {
                info!(revision, item_id = %item_id, "Favorite added");
            }
            StoreChange::FavoriteRemoved { item_id } => {
                info!(revision, item_id = %item_id, "Favorite removed");
            }
            StoreChange::ReservationCreated { reservation_id, item_id } => {
                info!(revision, reservation_id = %reservation_id, item_id = %item_id, "Reservation created");
            }
            StoreChange::ReservationCancelled { reservation_id, item_id } => {
                info!(revision, reservation_id = %reservation_id, item_id = %item_id, "Reservation cancelled");
            }
            StoreChange::EventRegistered { event_id } => {
                info!(revision, event_id = %event_id, "Event registration");
            }
            StoreChange::ReviewAdded { item_id, review_id } => {
                info!(revision, item_id = %item_id, review_id = %review_id, "Review added");
            }
        }
    }
}
