//! Item catalog store with primary and secondary indices

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::item::{Category, LibraryItem},
};

/// Owns all item records. The primary index is keyed by item id; secondary
/// indices (by category, and by author for books) are maintained
/// synchronously inside `add` and always reflect the primary store.
#[derive(Debug, Default)]
pub struct ItemCatalog {
    items: IndexMap<String, LibraryItem>,
    by_category: HashMap<Category, Vec<String>>,
    by_author: HashMap<String, Vec<String>>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new item. Fails with `Duplicate` when the id is already
    /// present; on success the category index (and, for books, the author
    /// index) is updated in the same call.
    pub fn add(&mut self, item: LibraryItem) -> AppResult<()> {
        if self.items.contains_key(&item.id) {
            return Err(AppError::Duplicate(format!(
                "Item with id {} already exists",
                item.id
            )));
        }

        self.by_category
            .entry(item.category())
            .or_default()
            .push(item.id.clone());
        if let Some(author) = item.author() {
            self.by_author
                .entry(author.to_string())
                .or_default()
                .push(item.id.clone());
        }
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// Get an item by id
    pub fn get(&self, id: &str) -> AppResult<&LibraryItem> {
        self.items
            .get(id)
            .ok_or_else(|| AppError::ItemNotFound(format!("Item with id {} not found", id)))
    }

    /// Toggle an item's availability flag
    pub fn set_available(&mut self, id: &str, available: bool) -> AppResult<()> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| AppError::ItemNotFound(format!("Item with id {} not found", id)))?;
        item.available = available;
        Ok(())
    }

    /// Full scan over all items, filtered by a predicate. O(n) baseline
    /// search path.
    pub fn find_by_category_linear<P>(&self, predicate: P) -> Vec<&LibraryItem>
    where
        P: Fn(&LibraryItem) -> bool,
    {
        self.items.values().filter(|item| predicate(item)).collect()
    }

    /// Indexed lookup of all books by a given author. Returns the same set
    /// as a linear scan filtering on the author field, in index order.
    pub fn find_books_by_author_indexed(&self, author: &str) -> Vec<&LibraryItem> {
        self.by_author
            .get(author)
            .map(|ids| ids.iter().filter_map(|id| self.items.get(id)).collect())
            .unwrap_or_default()
    }

    /// Ids of all items in a category, in insertion order
    pub fn ids_in_category(&self, category: Category) -> &[String] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &LibraryItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
