//! crates/biblio_core/src/catalog.rs
//!
//! Read-side queries over the catalog: the category pills of the catalog screen,
//! free-text search, and the "new arrivals" carousel.

use std::str::FromStr;

use crate::domain::{Item, ItemType};

/// The category pills offered by the catalog screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFilter {
    #[default]
    All,
    Books,
    Dvd,
    Vr,
    Comics,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown catalog filter: {0}")]
pub struct UnknownFilter(pub String);

impl FromStr for CatalogFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "" | "TOUT" | "ALL" => Ok(CatalogFilter::All),
            "LIVRES" | "BOOKS" => Ok(CatalogFilter::Books),
            "DVD" => Ok(CatalogFilter::Dvd),
            "VR" => Ok(CatalogFilter::Vr),
            "BD" | "COMICS" => Ok(CatalogFilter::Comics),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}

impl CatalogFilter {
    pub fn label(&self) -> &'static str {
        match self {
            CatalogFilter::All => "TOUT",
            CatalogFilter::Books => "LIVRES",
            CatalogFilter::Dvd => "DVD",
            CatalogFilter::Vr => "VR",
            CatalogFilter::Comics => "BD",
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        match self {
            CatalogFilter::All => true,
            CatalogFilter::Books => item.item_type == ItemType::Book,
            CatalogFilter::Dvd => item.item_type == ItemType::Dvd,
            CatalogFilter::Vr => item.item_type == ItemType::Vr,
            CatalogFilter::Comics => item.item_type == ItemType::Comic,
        }
    }
}

pub fn find_item<'a>(items: &'a [Item], id: &str) -> Option<&'a Item> {
    items.iter().find(|item| item.id == id)
}

pub fn new_arrivals(items: &[Item]) -> Vec<&Item> {
    items.iter().filter(|item| item.is_new).collect()
}

pub fn filter_items(items: &[Item], filter: CatalogFilter) -> Vec<&Item> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// Case-insensitive search over title, author and categories.
/// A blank query matches everything.
pub fn search_items<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| {
            item.title.to_lowercase().contains(&needle)
                || item.author.to_lowercase().contains(&needle)
                || item
                    .categories
                    .iter()
                    .any(|category| category.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn ids(items: &[&Item]) -> Vec<String> {
        items.iter().map(|item| item.id.clone()).collect()
    }

    #[test]
    fn parses_pill_labels() {
        assert_eq!("TOUT".parse::<CatalogFilter>().unwrap(), CatalogFilter::All);
        assert_eq!("livres".parse::<CatalogFilter>().unwrap(), CatalogFilter::Books);
        assert_eq!("BD".parse::<CatalogFilter>().unwrap(), CatalogFilter::Comics);
        assert_eq!("".parse::<CatalogFilter>().unwrap(), CatalogFilter::All);
        assert!("CD-ROM".parse::<CatalogFilter>().is_err());
    }

    #[test]
    fn filters_by_material() {
        let catalog = seed::catalog();
        assert_eq!(ids(&filter_items(&catalog, CatalogFilter::Books)), vec!["1", "3"]);
        assert_eq!(ids(&filter_items(&catalog, CatalogFilter::Dvd)), vec!["2", "5"]);
        assert_eq!(ids(&filter_items(&catalog, CatalogFilter::Vr)), vec!["6"]);
        assert_eq!(filter_items(&catalog, CatalogFilter::All).len(), catalog.len());
    }

    #[test]
    fn new_arrivals_keep_catalog_order() {
        let catalog = seed::catalog();
        assert_eq!(ids(&new_arrivals(&catalog)), vec!["1", "4"]);
    }

    #[test]
    fn search_matches_title_author_and_category() {
        let catalog = seed::catalog();
        assert_eq!(ids(&search_items(&catalog, "  inception ")), vec!["2"]);
        assert_eq!(ids(&search_items(&catalog, "villeneuve")), vec!["5"]);
        assert_eq!(ids(&search_items(&catalog, "science-fiction")), vec!["2", "5"]);
        assert!(search_items(&catalog, "zzz").is_empty());
        assert_eq!(search_items(&catalog, "   ").len(), catalog.len());
    }

    #[test]
    fn find_item_by_id() {
        let catalog = seed::catalog();
        assert_eq!(find_item(&catalog, "4").unwrap().title, "Astérix et le Griffon");
        assert!(find_item(&catalog, "does-not-exist").is_none());
    }
}
