//! Synthetic book records for demos and load testing.

use crate::{Book, RecordId, Year};
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of records generated when the caller does not say.
pub const DEFAULT_SYNTHETIC_COUNT: usize = 10_000;

/// Generated years fall in `[MIN_YEAR, MAX_YEAR)`.
pub const MIN_YEAR: Year = 1800;
pub const MAX_YEAR: Year = 2024;

pub const GENRES: [&str; 10] = [
    "Fiction",
    "Non-Fiction",
    "Science Fiction",
    "Fantasy",
    "Mystery",
    "Romance",
    "Thriller",
    "Biography",
    "History",
    "Self-Help",
];

pub const AUTHORS: [&str; 20] = [
    "Jane Austen",
    "Mark Twain",
    "Charles Dickens",
    "Virginia Woolf",
    "Ernest Hemingway",
    "Maya Angelou",
    "Toni Morrison",
    "Stephen King",
    "Agatha Christie",
    "J.K. Rowling",
    "George Orwell",
    "Harper Lee",
    "F. Scott Fitzgerald",
    "William Shakespeare",
    "Leo Tolstoy",
    "Emily Dickinson",
    "Walt Whitman",
    "Edgar Allan Poe",
    "Oscar Wilde",
    "Charlotte Brontë",
];

pub const TITLE_WORDS: [&str; 10] = [
    "The",
    "A",
    "An",
    "Chronicles",
    "Tales",
    "Story",
    "Adventures",
    "Secrets",
    "Mystery",
    "Legend",
];

pub const TITLE_NOUNS: [&str; 10] = [
    "Garden", "House", "Road", "River", "Mountain", "Forest", "City", "Castle", "Bridge", "Journey",
];

fn pick<'a, R: Rng>(rng: &mut R, choices: &[&'a str]) -> &'a str {
    choices.choose(rng).copied().unwrap_or_default()
}

/// A pseudo-ISBN of the form `978-D-DDDDD-DDD-D`.
fn random_isbn<R: Rng>(rng: &mut R) -> String {
    format!(
        "978-{}-{}-{}-{}",
        rng.gen_range(1..=9),
        rng.gen_range(10_000..=99_999),
        rng.gen_range(100..=999),
        rng.gen_range(0..=8),
    )
}

/// Generate `count` records using `rng`; ids run from 1.
pub fn generate_with<R: Rng>(rng: &mut R, count: usize) -> Vec<Book> {
    (1..=count as RecordId)
        .map(|id| {
            let title = format!(
                "{} {} {}",
                pick(rng, &TITLE_WORDS),
                pick(rng, &TITLE_NOUNS),
                id
            );
            let author = pick(rng, &AUTHORS);
            let genre = pick(rng, &GENRES);
            let year = rng.gen_range(MIN_YEAR..MAX_YEAR);
            let isbn = random_isbn(rng);
            Book::new(id, &title, author, genre, year, &isbn)
        })
        .collect()
}

/// Generate `count` records from the thread-local random source.
pub fn generate_synthetic(count: usize) -> Vec<Book> {
    generate_with(&mut rand::thread_rng(), count)
}
