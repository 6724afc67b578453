//! Catalog service

use crate::{
    error::{AppError, AppResult},
    factory::ItemFactory,
    models::item::{Category, LibraryItem},
    repository::Repository,
};

use std::sync::Arc;

/// Attempts at allocating a fresh generated item id before giving up
const ID_ATTEMPTS: usize = 8;

/// Query filters for listing catalog items
#[derive(Debug, Default)]
pub struct ItemFilter {
    pub category: Option<Category>,
    pub available: Option<bool>,
    pub author: Option<String>,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    factory: Arc<ItemFactory>,
}

impl CatalogService {
    pub fn new(repository: Repository, factory: Arc<ItemFactory>) -> Self {
        Self {
            repository,
            factory,
        }
    }

    /// Build an item from a loosely-typed factory payload and add it to the
    /// catalog. Generated ids are retried on collision; payload errors are
    /// reported as validation failures.
    pub async fn create_item(
        &self,
        category: &str,
        args: &[serde_json::Value],
    ) -> AppResult<LibraryItem> {
        for _ in 0..ID_ATTEMPTS {
            let item = self.factory.create(category, args)?;
            let mut state = self.repository.write().await;
            match state.catalog.add(item.clone()) {
                Ok(()) => {
                    tracing::info!("item {} added to the catalog", item.id);
                    return Ok(item);
                }
                Err(AppError::Duplicate(_)) => continue,
                Err(err) => return Err(err),
            }
        }
        Err(AppError::Internal(
            "Could not allocate an unused item id".to_string(),
        ))
    }

    /// Add an already-built item under its fixed id
    pub async fn add_item(&self, item: LibraryItem) -> AppResult<LibraryItem> {
        let mut state = self.repository.write().await;
        state.catalog.add(item.clone())?;
        tracing::info!("item {} added to the catalog", item.id);
        Ok(item)
    }

    /// Get one item by id
    pub async fn get_item(&self, id: &str) -> AppResult<LibraryItem> {
        let state = self.repository.read().await;
        state.catalog.get(id).cloned()
    }

    /// List items through the linear scan path, applying optional filters
    pub async fn list_items(&self, filter: &ItemFilter) -> AppResult<(Vec<LibraryItem>, usize)> {
        let state = self.repository.read().await;
        let items: Vec<LibraryItem> = state
            .catalog
            .find_by_category_linear(|item| {
                filter.category.map_or(true, |c| item.category() == c)
                    && filter.available.map_or(true, |a| item.available == a)
                    && filter
                        .author
                        .as_deref()
                        .map_or(true, |a| item.author() == Some(a))
            })
            .into_iter()
            .cloned()
            .collect();
        let total = items.len();
        Ok((items, total))
    }

    /// Find all books by an author through the secondary index
    pub async fn search_books_by_author(&self, author: &str) -> Vec<LibraryItem> {
        let state = self.repository.read().await;
        state
            .catalog
            .find_books_by_author_indexed(author)
            .into_iter()
            .cloned()
            .collect()
    }
}
