//! Item factory adapter.
//!
//! Builds catalog items from a loosely-typed payload: a category tag plus an
//! ordered list of category-specific field values. The catalog itself never
//! validates these arguments; everything is checked here.

use std::sync::{Arc, Mutex};

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::item::{Category, ItemDetails, LibraryItem},
};

/// Sequence generator for human-readable ids such as "B4821". Seedable so
/// tests get deterministic ids.
pub struct IdGenerator {
    rng: Mutex<StdRng>,
}

impl IdGenerator {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Next id with the given prefix, e.g. 'B' for books
    pub fn next_id(&self, prefix: char) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        format!("{}{:04}", prefix, rng.gen_range(1000..10000))
    }
}

/// Builds `LibraryItem`s from (category tag, ordered argument list) payloads
pub struct ItemFactory {
    ids: Arc<IdGenerator>,
}

impl ItemFactory {
    pub fn new(ids: Arc<IdGenerator>) -> Self {
        Self { ids }
    }

    /// Create an item from a case-insensitive category tag and the ordered
    /// field values that category expects:
    ///
    /// - book: title, author, isbn, pages
    /// - dvd: title, director, duration_minutes, genre
    /// - magazine: title, issue_number, publisher
    ///
    /// Unknown tags and wrong argument shapes fail with `Validation`.
    pub fn create(&self, category: &str, args: &[Value]) -> AppResult<LibraryItem> {
        let category: Category = category
            .parse()
            .map_err(AppError::Validation)?;

        let item = match category {
            Category::Book => {
                expect_args(category, args, 4)?;
                LibraryItem::new(
                    self.ids.next_id(category.id_prefix()),
                    string_arg(args, 0, "title")?,
                    ItemDetails::Book {
                        author: string_arg(args, 1, "author")?,
                        isbn: string_arg(args, 2, "isbn")?,
                        pages: count_arg(args, 3, "pages")?,
                    },
                )
            }
            Category::Dvd => {
                expect_args(category, args, 4)?;
                LibraryItem::new(
                    self.ids.next_id(category.id_prefix()),
                    string_arg(args, 0, "title")?,
                    ItemDetails::Dvd {
                        director: string_arg(args, 1, "director")?,
                        duration_minutes: count_arg(args, 2, "duration_minutes")?,
                        genre: string_arg(args, 3, "genre")?,
                    },
                )
            }
            Category::Magazine => {
                expect_args(category, args, 3)?;
                LibraryItem::new(
                    self.ids.next_id(category.id_prefix()),
                    string_arg(args, 0, "title")?,
                    ItemDetails::Magazine {
                        issue_number: count_arg(args, 1, "issue_number")?,
                        publisher: string_arg(args, 2, "publisher")?,
                    },
                )
            }
        };
        Ok(item)
    }
}

fn expect_args(category: Category, args: &[Value], expected: usize) -> AppResult<()> {
    if args.len() != expected {
        return Err(AppError::Validation(format!(
            "Category {} expects {} arguments, got {}",
            category,
            expected,
            args.len()
        )));
    }
    Ok(())
}

fn string_arg(args: &[Value], index: usize, name: &str) -> AppResult<String> {
    args.get(index)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(format!("Argument {} ({}) must be a string", index, name)))
}

fn count_arg(args: &[Value], index: usize, name: &str) -> AppResult<u32> {
    args.get(index)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Argument {} ({}) must be a non-negative integer",
                index, name
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn factory() -> ItemFactory {
        ItemFactory::new(Arc::new(IdGenerator::seeded(7)))
    }

    #[test]
    fn builds_a_book_from_positional_args() {
        let item = factory()
            .create("Book", &[json!("The Guide"), json!("John Doe"), json!("978-1234567890"), json!(300)])
            .unwrap();
        assert!(item.id.starts_with('B'));
        assert!(item.available);
        assert_eq!(item.title, "The Guide");
        assert_eq!(item.author(), Some("John Doe"));
        assert_eq!(item.category(), Category::Book);
    }

    #[test]
    fn category_tag_is_case_insensitive() {
        let item = factory()
            .create("DVD", &[json!("Tutorial"), json!("Jane Smith"), json!(120), json!("Educational")])
            .unwrap();
        assert_eq!(item.category(), Category::Dvd);
        assert!(item.id.starts_with('D'));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = factory().create("vinyl", &[json!("X")]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn wrong_argument_shape_is_rejected() {
        let f = factory();
        // Too few arguments
        assert!(matches!(
            f.create("magazine", &[json!("Monthly")]),
            Err(AppError::Validation(_))
        ));
        // Wrong type in position 1
        assert!(matches!(
            f.create("magazine", &[json!("Monthly"), json!("not a number"), json!("Pub")]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn seeded_generator_is_deterministic() {
        let a = IdGenerator::seeded(42);
        let b = IdGenerator::seeded(42);
        assert_eq!(a.next_id('B'), b.next_id('B'));
        assert_eq!(a.next_id('M'), b.next_id('M'));
    }
}
