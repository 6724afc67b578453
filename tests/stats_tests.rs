//! Statistics rollups over catalog snapshots

use std::sync::Arc;

use biblion_server::{
    config::CirculationConfig,
    factory::IdGenerator,
    models::{
        item::{ItemDetails, LibraryItem},
        member::CreateMember,
    },
    repository::Repository,
    services::{notifier::EventNotifier, Services},
};

fn services() -> Services {
    let config = CirculationConfig::default();
    let repository = Repository::new(config.max_borrows);
    Services::new(
        repository,
        config,
        EventNotifier::new(),
        Arc::new(IdGenerator::seeded(99)),
    )
}

fn book(id: &str, author: &str, pages: u32) -> LibraryItem {
    LibraryItem::new(
        id,
        format!("Book {id}"),
        ItemDetails::Book {
            author: author.to_string(),
            isbn: "978-0000000000".to_string(),
            pages,
        },
    )
}

fn dvd(id: &str, genre: &str) -> LibraryItem {
    LibraryItem::new(
        id,
        format!("Film {id}"),
        ItemDetails::Dvd {
            director: "Someone".to_string(),
            duration_minutes: 90,
            genre: genre.to_string(),
        },
    )
}

fn magazine(id: &str) -> LibraryItem {
    LibraryItem::new(
        id,
        format!("Magazine {id}"),
        ItemDetails::Magazine {
            issue_number: 1,
            publisher: "Press".to_string(),
        },
    )
}

#[tokio::test]
async fn empty_catalog_yields_zero_ratios() {
    let services = services();
    let stats = services.stats.get_stats().await.unwrap();

    assert_eq!(stats.catalog.total_items, 0);
    assert_eq!(stats.catalog.average_book_pages, 0.0);
    assert_eq!(stats.catalog.percentage_available, 0.0);
    assert!(stats.catalog.most_popular_dvd_genre.is_none());
    assert!(stats.catalog.items_by_category.is_empty());
}

#[tokio::test]
async fn category_counts_and_page_average() {
    let services = services();
    services.catalog.add_item(book("B001", "A", 200)).await.unwrap();
    services.catalog.add_item(book("B002", "B", 300)).await.unwrap();
    services.catalog.add_item(dvd("D001", "Drama")).await.unwrap();
    services.catalog.add_item(magazine("G001")).await.unwrap();

    let stats = services.stats.get_stats().await.unwrap();
    assert_eq!(stats.catalog.total_items, 4);
    assert_eq!(stats.catalog.average_book_pages, 250.0);
    assert_eq!(stats.catalog.percentage_available, 100.0);

    let counts: Vec<(&str, i64)> = stats
        .catalog
        .items_by_category
        .iter()
        .map(|e| (e.label.as_str(), e.value))
        .collect();
    assert_eq!(counts, [("book", 2), ("dvd", 1), ("magazine", 1)]);
}

#[tokio::test]
async fn dvd_genre_ties_resolve_lexicographically() {
    let services = services();
    services.catalog.add_item(dvd("D001", "Drama")).await.unwrap();
    services.catalog.add_item(dvd("D002", "Comedy")).await.unwrap();

    let stats = services.stats.get_stats().await.unwrap();
    assert_eq!(stats.catalog.most_popular_dvd_genre.as_deref(), Some("Comedy"));

    services.catalog.add_item(dvd("D003", "Drama")).await.unwrap();
    let stats = services.stats.get_stats().await.unwrap();
    assert_eq!(stats.catalog.most_popular_dvd_genre.as_deref(), Some("Drama"));
}

#[tokio::test]
async fn availability_percentage_tracks_outstanding_loans() {
    let services = services();
    for i in 1..=4 {
        services
            .catalog
            .add_item(book(&format!("B{i:03}"), "A", 100))
            .await
            .unwrap();
    }
    services
        .members
        .register(CreateMember {
            member_id: Some("M001".to_string()),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await
        .unwrap();

    services.circulation.borrow("M001", "B001").await.unwrap();

    let stats = services.stats.get_stats().await.unwrap();
    assert_eq!(stats.catalog.percentage_available, 75.0);
    assert_eq!(stats.circulation.active_loans, 1);
    assert_eq!(stats.circulation.total_members, 1);
}

#[tokio::test]
async fn search_comparison_reports_matching_result_sets() {
    let services = services();
    for i in 0..50 {
        let author = if i % 5 == 0 { "Target Author" } else { "Other" };
        services
            .catalog
            .add_item(book(&format!("B{i:03}"), author, 100))
            .await
            .unwrap();
    }

    let comparison = services
        .stats
        .compare_author_search("Target Author")
        .await
        .unwrap();
    assert_eq!(comparison.matches, 10);
    assert!(comparison.results_match);

    let none = services.stats.compare_author_search("Nobody").await.unwrap();
    assert_eq!(none.matches, 0);
    assert!(none.results_match);
}
