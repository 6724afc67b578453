//! Statistics service

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::Utc;

use crate::{
    api::stats::{CatalogStats, CirculationStats, SearchComparison, StatEntry, StatsResponse},
    error::AppResult,
    models::item::ItemDetails,
    repository::Repository,
};

/// Read-only rollups over the current library snapshot
#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Compute catalog and circulation statistics over the full current
    /// snapshot. Pure read; ratios over an empty catalog are 0.0, never NaN.
    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        let state = self.repository.read().await;
        let now = Utc::now();

        let total_items = state.catalog.len();
        let mut available_count = 0usize;
        let mut category_counts: BTreeMap<&str, i64> = BTreeMap::new();
        let mut genre_counts: BTreeMap<&str, i64> = BTreeMap::new();
        let mut book_pages: i64 = 0;
        let mut book_count: i64 = 0;

        for item in state.catalog.iter() {
            if item.available {
                available_count += 1;
            }
            *category_counts.entry(item.category().as_str()).or_insert(0) += 1;
            match &item.details {
                ItemDetails::Book { pages, .. } => {
                    book_pages += i64::from(*pages);
                    book_count += 1;
                }
                ItemDetails::Dvd { genre, .. } => {
                    *genre_counts.entry(genre.as_str()).or_insert(0) += 1;
                }
                ItemDetails::Magazine { .. } => {}
            }
        }

        let mut items_by_category: Vec<StatEntry> = category_counts
            .into_iter()
            .map(|(label, value)| StatEntry {
                label: label.to_string(),
                value,
            })
            .collect();
        items_by_category.sort_by(|a, b| b.value.cmp(&a.value).then(a.label.cmp(&b.label)));

        let average_book_pages = if book_count > 0 {
            book_pages as f64 / book_count as f64
        } else {
            0.0
        };

        // Ties resolve to the lexicographically smallest genre: the map
        // iterates in ascending key order and only a strictly larger count
        // replaces the current best.
        let mut best: Option<(&str, i64)> = None;
        for (genre, count) in &genre_counts {
            if best.map_or(true, |(_, c)| *count > c) {
                best = Some((*genre, *count));
            }
        }
        let most_popular_dvd_genre = best.map(|(genre, _)| genre.to_string());

        let percentage_available = if total_items > 0 {
            (available_count as f64 / total_items as f64) * 100.0
        } else {
            0.0
        };

        Ok(StatsResponse {
            catalog: CatalogStats {
                total_items: total_items as i64,
                items_by_category,
                average_book_pages,
                most_popular_dvd_genre,
                percentage_available,
            },
            circulation: CirculationStats {
                total_members: state.members.len() as i64,
                active_loans: state.loans.active_count() as i64,
                overdue_loans: state.loans.overdue_count(now) as i64,
                recorded_transactions: state.loans.transactions().len() as i64,
            },
        })
    }

    /// Run the linear scan and the indexed lookup for one author, timing
    /// both paths and checking they return the same result set.
    pub async fn compare_author_search(&self, author: &str) -> AppResult<SearchComparison> {
        let state = self.repository.read().await;

        let linear_started = Instant::now();
        let linear = state.catalog.find_by_category_linear(|item| item.author() == Some(author));
        let linear_micros = linear_started.elapsed().as_micros() as u64;

        let indexed_started = Instant::now();
        let indexed = state.catalog.find_books_by_author_indexed(author);
        let indexed_micros = indexed_started.elapsed().as_micros() as u64;

        let mut linear_ids: Vec<&str> = linear.iter().map(|item| item.id.as_str()).collect();
        let mut indexed_ids: Vec<&str> = indexed.iter().map(|item| item.id.as_str()).collect();
        linear_ids.sort_unstable();
        indexed_ids.sort_unstable();

        Ok(SearchComparison {
            author: author.to_string(),
            matches: indexed.len() as i64,
            linear_micros,
            indexed_micros,
            results_match: linear_ids == indexed_ids,
        })
    }
}
