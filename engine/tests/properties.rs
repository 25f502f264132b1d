//! Property-based tests for the store and query invariants.

use proptest::prelude::*;
use shelf_engine::{import, query, Book, Field, FieldValue, RawRow, RecordStore, SortOrder};

fn arb_field() -> impl Strategy<Value = Field> {
    prop_oneof![
        Just(Field::Title),
        Just(Field::Author),
        Just(Field::Genre),
        Just(Field::PublishedYear),
        Just(Field::Isbn),
    ]
}

fn arb_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        (-3000i64..3000).prop_map(FieldValue::Int),
        "[a-zA-Z0-9 ]{0,12}".prop_map(FieldValue::Text),
    ]
}

/// Cells without surrounding whitespace, so trimming is the identity.
fn arb_cell() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9,\"]([a-zA-Z0-9 ,\"]{0,10}[a-zA-Z0-9,\"])?"
}

fn arb_rows() -> impl Strategy<Value = Vec<RawRow>> {
    prop::collection::vec(
        (arb_cell(), arb_cell(), arb_cell(), 0i32..3000, arb_cell()).prop_map(
            |(title, author, genre, year, isbn)| {
                RawRow::complete(&title, &author, &genre, &year.to_string(), &isbn)
            },
        ),
        1..40,
    )
}

/// Books with few distinct genres and years so sort keys collide often.
fn arb_books() -> impl Strategy<Value = Vec<Book>> {
    prop::collection::vec(
        (
            "[ab]{1,2}",
            prop_oneof![Just("Fiction"), Just("fiction"), Just("History")],
            1990i32..1994,
        ),
        0..60,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .zip(1..)
            .map(|((title, genre, year), id)| Book::new(id, &title, "anon", genre, year, "0"))
            .collect()
    })
}

fn store_from(books: Vec<Book>) -> RecordStore {
    let mut store = RecordStore::new();
    store.load(books).unwrap();
    store
}

proptest! {
    #[test]
    fn prop_edit_unknown_id_is_noop(
        books in arb_books().prop_filter("non-empty", |b| !b.is_empty()),
        field in arb_field(),
        value in arb_value(),
        offset in 1u64..1000,
    ) {
        let unknown = books.len() as u64 + offset;
        let mut store = store_from(books);
        let before = store.records().to_vec();

        prop_assert!(!store.edit(unknown, field, value));
        prop_assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn prop_reset_restores_pristine(
        books in arb_books().prop_filter("non-empty", |b| !b.is_empty()),
        edits in prop::collection::vec((1u64..70, arb_field(), arb_value()), 0..30),
    ) {
        let mut store = store_from(books.clone());
        for (id, field, value) in edits {
            store.edit(id, field, value);
        }

        store.reset();
        prop_assert_eq!(store.records(), books.as_slice());
        prop_assert!(!store.has_modifications());
    }

    #[test]
    fn prop_pages_cover_filtered_sorted(
        books in arb_books(),
        page_size in 1usize..25,
        desc in any::<bool>(),
    ) {
        let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
        let filtered = query::filter(&books, "a", "");
        let sorted = query::sort(&filtered, Some(Field::Title), order);

        let first = query::paginate(&sorted, 1, page_size);
        let mut seen = Vec::new();
        for page in 1..=first.total_pages {
            let slice = query::paginate(&sorted, page, page_size);
            prop_assert!(!slice.items.is_empty());
            seen.extend(slice.items);
        }

        prop_assert_eq!(seen.len(), sorted.len());
        prop_assert_eq!(seen, sorted);
    }

    #[test]
    fn prop_desc_sort_is_stable(books in arb_books()) {
        let all: Vec<&Book> = books.iter().collect();
        let ascending = query::sort(&all, Some(Field::Genre), SortOrder::Asc);
        let descending = query::sort(&ascending, Some(Field::Genre), SortOrder::Desc);

        // Within each equal key the order from the input must survive
        for pair in descending.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.genre.to_lowercase() == b.genre.to_lowercase() {
                let pos_a = ascending.iter().position(|x| x.id == a.id).unwrap();
                let pos_b = ascending.iter().position(|x| x.id == b.id).unwrap();
                prop_assert!(pos_a < pos_b);
            }
        }
    }

    #[test]
    fn prop_csv_roundtrip(rows in arb_rows()) {
        let books = import::import_rows(rows.clone()).unwrap();
        let written = import::to_csv_string(&import::export_rows(&books)).unwrap();
        let reparsed = import::parse_csv(written.as_bytes()).unwrap();

        prop_assert_eq!(reparsed, rows);
    }
}
