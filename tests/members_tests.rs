//! Member registration and lookup

use std::sync::Arc;

use biblion_server::{
    config::CirculationConfig,
    error::AppError,
    factory::IdGenerator,
    models::member::CreateMember,
    repository::Repository,
    services::{notifier::EventNotifier, Services},
};

fn services_seeded(seed: u64) -> Services {
    let config = CirculationConfig::default();
    let repository = Repository::new(config.max_borrows);
    Services::new(
        repository,
        config,
        EventNotifier::new(),
        Arc::new(IdGenerator::seeded(seed)),
    )
}

fn request(member_id: Option<&str>, name: &str, email: &str) -> CreateMember {
    CreateMember {
        member_id: member_id.map(str::to_string),
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
async fn register_and_fetch_a_member() {
    let services = services_seeded(1);
    let member = services
        .members
        .register(request(Some("M001"), "Alice Johnson", "alice@email.com"))
        .await
        .unwrap();
    assert_eq!(member.member_id, "M001");
    assert!(member.borrowed.is_empty());

    let fetched = services.members.get_member("M001").await.unwrap();
    assert_eq!(fetched, member);
}

#[tokio::test]
async fn duplicate_member_id_is_rejected() {
    let services = services_seeded(1);
    services
        .members
        .register(request(Some("M001"), "Alice", "alice@email.com"))
        .await
        .unwrap();

    let err = services
        .members
        .register(request(Some("M001"), "Bob", "bob@email.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Duplicate(_)));
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let services = services_seeded(1);
    let err = services
        .members
        .register(request(None, "Alice", "not-an-email"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn generated_member_ids_are_deterministic_under_a_seed() {
    let first = services_seeded(42);
    let second = services_seeded(42);

    let a = first
        .members
        .register(request(None, "Alice", "alice@email.com"))
        .await
        .unwrap();
    let b = second
        .members
        .register(request(None, "Alice", "alice@email.com"))
        .await
        .unwrap();

    assert!(a.member_id.starts_with('M'));
    assert_eq!(a.member_id, b.member_id);
}

#[tokio::test]
async fn unknown_member_is_not_found() {
    let services = services_seeded(1);
    let err = services.members.get_member("M404").await.unwrap_err();
    assert!(matches!(err, AppError::MemberNotFound(_)));
}
