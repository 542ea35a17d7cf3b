//! crates/biblio_core/src/seed.rs
//!
//! Static initial data: the catalog, the current student, the events calendar and the
//! attendance figures. Every store starts from here and resets to it on restart.

use chrono::NaiveDate;

use crate::domain::{CalendarEvent, EventKind, Item, ItemType, Loan, Review, User};
use crate::stats::{AttendanceStats, KeyFigures, TrafficPoint};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn catalog() -> Vec<Item> {
    vec![
        Item {
            id: "1".to_string(),
            title: "L'IA pour les Nuls".to_string(),
            author: "John Paul Mueller".to_string(),
            item_type: ItemType::Book,
            cover_url: "https://m.media-amazon.com/images/I/71t4tC61cZL._SY466_.jpg".to_string(),
            is_new: true,
            available: true,
            description: Some("Tout ce que vous avez toujours voulu savoir sur l'intelligence artificielle sans jamais oser le demander. Un guide complet pour débutants.".to_string()),
            location: Some("Informatique - Rayon A2".to_string()),
            rating: Some(4.5),
            reviews: vec![Review {
                id: "r1".to_string(),
                user: "Thomas".to_string(),
                comment: "Super clair !".to_string(),
                rating: 5,
                date: date(2023, 10, 10),
            }],
            categories: strings(&["Informatique", "Sciences"]),
        },
        Item {
            id: "2".to_string(),
            title: "Inception".to_string(),
            author: "Christopher Nolan".to_string(),
            item_type: ItemType::Dvd,
            cover_url: "https://m.media-amazon.com/images/I/912AErFSBHL._AC_SL1500_.jpg".to_string(),
            is_new: false,
            available: true,
            description: Some("Dom Cobb est un voleur expérimenté dans l'art périlleux de l'extraction : sa spécialité consiste à s'approprier les secrets les plus précieux d'un individu.".to_string()),
            location: Some("Médiathèque - Zone DVD".to_string()),
            rating: Some(5.0),
            reviews: Vec::new(),
            categories: strings(&["Science-Fiction", "Thriller"]),
        },
        Item {
            id: "3".to_string(),
            title: "Design Patterns".to_string(),
            author: "Eric Freeman".to_string(),
            item_type: ItemType::Book,
            cover_url: "https://m.media-amazon.com/images/I/917iQZ8H1VL._SY466_.jpg".to_string(),
            is_new: false,
            available: false,
            description: Some("Les design patterns sont des solutions classiques à des problèmes fréquents de conception logicielle.".to_string()),
            location: Some("Informatique - Rayon B1".to_string()),
            rating: Some(4.8),
            reviews: Vec::new(),
            categories: strings(&["Informatique", "Design"]),
        },
        Item {
            id: "4".to_string(),
            title: "Astérix et le Griffon".to_string(),
            author: "Jean-Yves Ferri".to_string(),
            item_type: ItemType::Comic,
            cover_url: "https://m.media-amazon.com/images/I/81x2-tJ7tUL._SY466_.jpg".to_string(),
            is_new: true,
            available: true,
            description: Some("Astérix et Obélix partent à la recherche du Griffon, un animal fantastique.".to_string()),
            location: Some("BD - Bac 4".to_string()),
            rating: Some(4.2),
            reviews: Vec::new(),
            categories: strings(&["BD", "Humour"]),
        },
        Item {
            id: "5".to_string(),
            title: "Blade Runner 2049".to_string(),
            author: "Denis Villeneuve".to_string(),
            item_type: ItemType::Dvd,
            cover_url: "https://m.media-amazon.com/images/I/81p+B8oGzCL._AC_SL1500_.jpg".to_string(),
            is_new: false,
            available: true,
            description: Some("En 2049, la société est fragilisée par les nombreuses tensions entre les humains et leurs esclaves créés par bioingénierie.".to_string()),
            location: Some("Médiathèque - Zone DVD".to_string()),
            rating: Some(4.7),
            reviews: Vec::new(),
            categories: strings(&["Science-Fiction"]),
        },
        Item {
            id: "6".to_string(),
            title: "Casque VR Oculus".to_string(),
            author: "Meta".to_string(),
            item_type: ItemType::Vr,
            cover_url: "https://m.media-amazon.com/images/I/61M9a2+2wRL._AC_SL1500_.jpg".to_string(),
            is_new: false,
            available: true,
            description: Some("Casque de réalité virtuelle disponible pour test sur place ou emprunt court.".to_string()),
            location: Some("Zone Multimédia".to_string()),
            rating: Some(4.9),
            reviews: Vec::new(),
            categories: strings(&["Technologie", "VR"]),
        },
    ]
}

pub fn events() -> Vec<CalendarEvent> {
    vec![
        CalendarEvent {
            id: "e1".to_string(),
            title: "Atelier CV & LinkedIn".to_string(),
            date: "15 Oct".to_string(),
            time: "14:00".to_string(),
            kind: EventKind::Workshop,
            description: "Optimisez votre profil pour vos stages.".to_string(),
        },
        CalendarEvent {
            id: "e2".to_string(),
            title: "Rencontre Auteur".to_string(),
            date: "22 Oct".to_string(),
            time: "17:30".to_string(),
            kind: EventKind::Meeting,
            description: "Discussion avec l'auteur de polar local.".to_string(),
        },
        CalendarEvent {
            id: "e3".to_string(),
            title: "Démo Imprimante 3D".to_string(),
            date: "05 Nov".to_string(),
            time: "12:00".to_string(),
            kind: EventKind::Workshop,
            description: "Venez imprimer vos premiers objets.".to_string(),
        },
    ]
}

/// The current student. Loans hold snapshots of the matching catalog entries.
pub fn current_user(catalog: &[Item]) -> User {
    let snapshot = |id: &str| catalog.iter().find(|item| item.id == id).cloned();

    let loans = [
        ("l1", "2", date(2023, 11, 15), true),
        ("l2", "3", date(2023, 12, 20), false),
    ]
    .into_iter()
    .filter_map(|(loan_id, item_id, due_date, is_overdue)| {
        snapshot(item_id).map(|item| Loan {
            id: loan_id.to_string(),
            item,
            due_date,
            is_overdue,
        })
    })
    .collect();

    User {
        id: "u1".to_string(),
        name: "Alexandre Dupont".to_string(),
        student_id: "22304591".to_string(),
        loans,
        favorites: strings(&["1", "4"]),
        reservations: Vec::new(),
        events: Vec::new(),
    }
}

fn points(values: &[(&str, u32)]) -> Vec<TrafficPoint> {
    values
        .iter()
        .map(|(label, value)| TrafficPoint {
            label: label.to_string(),
            value: *value,
        })
        .collect()
}

pub fn attendance() -> AttendanceStats {
    AttendanceStats {
        hourly: points(&[
            ("08:00", 20),
            ("09:00", 45),
            ("10:00", 80),
            ("11:00", 60),
            ("12:00", 120),
            ("12:30", 180),
            ("13:00", 160),
            ("14:00", 140),
            ("15:00", 130),
            ("16:00", 110),
            ("17:00", 90),
            ("18:00", 30),
        ]),
        monthly: points(&[
            ("Sept", 450),
            ("Oct", 680),
            ("Nov", 720),
            ("Déc", 550),
            ("Jan", 480),
            ("Fév", 510),
        ]),
        key_figures: KeyFigures {
            annual_entries: 70_830,
            new_titles_per_year: 715,
            peak_time: "12h30".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "valid seed date")]
    fn malformed_seed_date_is_rejected() {
        date(2023, 2, 30);
    }

    #[test]
    fn loans_snapshot_catalog_entries() {
        let catalog = catalog();
        let user = current_user(&catalog);

        assert_eq!(user.loans.len(), 2);
        assert_eq!(user.loans[0].item.title, "Inception");
        assert!(user.loans[0].is_overdue);
        assert_eq!(user.loans[1].item.title, "Design Patterns");
        assert!(!user.loans[1].is_overdue);
    }

    #[test]
    fn seed_dates_are_valid() {
        let user = current_user(&catalog());
        assert_eq!(user.loans[0].due_date.to_string(), "2023-11-15");
        assert_eq!(catalog()[0].reviews[0].date.to_string(), "2023-10-10");
    }
}
