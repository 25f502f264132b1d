//! Query engine: pure functions deriving views from a collection.
//!
//! Nothing here mutates its input. Filtering and sorting borrow records and
//! return new sequences of references, so a view never copies record data.

use crate::{error::Result, Book, Error, Field};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// How many numbered pages to show either side of the current one.
pub const DEFAULT_PAGE_DELTA: usize = 2;

/// Direction of a sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(Error::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Whether `book` matches a lowercase search needle.
///
/// Scanned, in order: id, the five columns, and the modified flag
/// (as `true`/`false`).
fn matches_search(book: &Book, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);

    contains(&book.id.to_string())
        || Field::ALL
            .into_iter()
            .any(|field| contains(&book.text(field)))
        || contains(if book.modified { "true" } else { "false" })
}

/// Records matching a free-text search and an exact genre.
///
/// An empty `search` or `genre` does not restrict. Search is
/// case-insensitive substring matching; genre must match exactly.
pub fn filter<'a>(data: &'a [Book], search: &str, genre: &str) -> Vec<&'a Book> {
    let needle = search.to_lowercase();

    data.iter()
        .filter(|book| search.is_empty() || matches_search(book, &needle))
        .filter(|book| genre.is_empty() || book.genre == genre)
        .collect()
}

fn compare(a: &Book, b: &Book, field: Field) -> Ordering {
    match field {
        Field::PublishedYear => a.published_year.cmp(&b.published_year),
        _ => a
            .text(field)
            .to_lowercase()
            .cmp(&b.text(field).to_lowercase()),
    }
}

/// A stably sorted copy of `data`.
///
/// With no field the input order is kept. Years compare as integers, other
/// fields as lowercase text. Descending flips the comparison, so equal keys
/// stay in input order in both directions.
pub fn sort<'a>(data: &[&'a Book], field: Option<Field>, order: SortOrder) -> Vec<&'a Book> {
    let mut sorted = data.to_vec();
    let Some(field) = field else {
        return sorted;
    };

    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, field);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// Distinct values of `field`, ascending by their text form.
///
/// Years are ordered as text too, so `"999"` sorts after `"2001"`.
pub fn unique_values<'a, I>(data: I, field: Field) -> Vec<String>
where
    I: IntoIterator<Item = &'a Book>,
{
    data.into_iter()
        .map(|book| book.text(field).into_owned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One page of a sequence plus the numbers a pagination control needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Offset of the first item of this page
    pub start_index: usize,
    /// Offset one past the last item, clamped to `total_items`
    pub end_index: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// 1-based inclusive range of displayed items, `None` if the page is empty.
    pub fn showing(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            None
        } else {
            Some((self.start_index + 1, self.start_index + self.items.len()))
        }
    }

    /// Convert the items, keeping the page numbers.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_items: self.total_items,
            start_index: self.start_index,
            end_index: self.end_index,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

/// Slice out page `page` (1-based) of `data`.
///
/// A page outside `1..=total_pages` yields no items rather than an error.
/// A page size of 0 is treated as 1.
pub fn paginate<T: Clone>(data: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = data.len();
    let total_pages = total_items.div_ceil(page_size);

    let start_index = page.saturating_sub(1).saturating_mul(page_size);
    let end_index = start_index.saturating_add(page_size).min(total_items);
    let items = if page == 0 || start_index >= total_items {
        Vec::new()
    } else {
        data[start_index..end_index].to_vec()
    };
    let end_index = if page == 0 { 0 } else { end_index };

    Page {
        items,
        page,
        page_size,
        total_pages,
        total_items,
        start_index,
        end_index,
        has_next: page < total_pages,
        has_prev: page > 1,
    }
}

/// An entry in the numbered part of a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "page", rename_all = "lowercase")]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Numbered page buttons around `current`.
///
/// Always shows the first and last page, every page within `delta` of the
/// current one, and an ellipsis where a run of pages is skipped. Empty when
/// there is at most one page.
pub fn page_links(current: usize, total_pages: usize, delta: usize) -> Vec<PageLink> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let low = current.saturating_sub(delta).max(2);
    let high = current.saturating_add(delta).min(total_pages - 1);

    let mut links = vec![PageLink::Page(1)];
    if current.saturating_sub(delta) > 2 {
        links.push(PageLink::Ellipsis);
    }
    links.extend((low..=high).map(PageLink::Page));
    if current.saturating_add(delta) < total_pages - 1 {
        links.push(PageLink::Ellipsis);
    }
    links.push(PageLink::Page(total_pages));
    links
}

/// Aggregate counts over a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_records: usize,
    pub modified_records: usize,
    pub unique_genres: usize,
    pub unique_authors: usize,
}

/// Count records, modified records, and distinct genres and authors.
pub fn statistics(data: &[Book]) -> Statistics {
    let genres: BTreeSet<&str> = data.iter().map(|b| b.genre.as_str()).collect();
    let authors: BTreeSet<&str> = data.iter().map(|b| b.author.as_str()).collect();

    Statistics {
        total_records: data.len(),
        modified_records: data.iter().filter(|b| b.modified).count(),
        unique_genres: genres.len(),
        unique_authors: authors.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Vec<Book> {
        vec![
            Book::new(1, "Emma", "Jane Austen", "Fiction", 1815, "978-1"),
            Book::new(2, "dracula", "Bram Stoker", "Horror", 1897, "978-2"),
            Book::new(3, "Beloved", "Toni Morrison", "Fiction", 1987, "978-3"),
            Book::new(4, "Carrie", "Stephen King", "Horror", 1974, "978-4"),
            Book::new(5, "Amsterdam", "Ian McEwan", "fiction", 1998, "978-5"),
        ]
    }

    fn ids(books: &[&Book]) -> Vec<u64> {
        books.iter().map(|b| b.id).collect()
    }

    #[test]
    fn filter_by_genre_exact() {
        let data = library();
        let result = filter(&data, "", "Fiction");
        assert_eq!(ids(&result), vec![1, 3]);
    }

    #[test]
    fn filter_search_case_insensitive() {
        let data = library();
        assert_eq!(ids(&filter(&data, "AUSTEN", "")), vec![1]);
        assert_eq!(ids(&filter(&data, "DRAC", "")), vec![2]);
        assert_eq!(ids(&filter(&data, "ST", "Horror")), vec![2, 4]);
    }

    #[test]
    fn filter_search_scans_year_and_id() {
        let data = library();
        assert_eq!(ids(&filter(&data, "1987", "")), vec![3]);
        assert_eq!(ids(&filter(&data, "978-5", "")), vec![5]);
    }

    #[test]
    fn filter_search_scans_modified_flag() {
        let mut data = library();
        data[3].modified = true;
        assert_eq!(ids(&filter(&data, "true", "")), vec![4]);
    }

    #[test]
    fn filter_empty_passes_everything() {
        let data = library();
        assert_eq!(filter(&data, "", "").len(), 5);
    }

    #[test]
    fn sort_without_field_keeps_order() {
        let data = library();
        let all = filter(&data, "", "");
        assert_eq!(ids(&sort(&all, None, SortOrder::Desc)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn sort_text_case_insensitive() {
        let data = library();
        let all = filter(&data, "", "");
        let sorted = sort(&all, Some(Field::Title), SortOrder::Asc);
        // Amsterdam, Beloved, Carrie, dracula, Emma
        assert_eq!(ids(&sorted), vec![5, 3, 4, 2, 1]);
    }

    #[test]
    fn sort_year_numeric() {
        let mut data = library();
        data[0].published_year = 999;
        let all = filter(&data, "", "");
        let sorted = sort(&all, Some(Field::PublishedYear), SortOrder::Desc);
        assert_eq!(ids(&sorted), vec![5, 3, 4, 2, 1]);
    }

    #[test]
    fn sort_desc_is_stable() {
        let data = library();
        let all = filter(&data, "", "");
        let sorted = sort(&all, Some(Field::Genre), SortOrder::Desc);
        // horror ties keep 2 before 4, fiction ties keep 1, 3, 5
        assert_eq!(ids(&sorted), vec![2, 4, 1, 3, 5]);
    }

    #[test]
    fn sort_does_not_touch_input() {
        let data = library();
        let all = filter(&data, "", "");
        let _ = sort(&all, Some(Field::Title), SortOrder::Asc);
        assert_eq!(ids(&all), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn sort_order_parse() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!(matches!(
            "DESC".parse::<SortOrder>(),
            Err(Error::InvalidSortOrder(_))
        ));
    }

    #[test]
    fn unique_genres_sorted_case_sensitive() {
        let data = library();
        assert_eq!(
            unique_values(&data, Field::Genre),
            vec!["Fiction", "Horror", "fiction"]
        );
    }

    #[test]
    fn unique_years_sort_as_text() {
        let mut data = library();
        data[0].published_year = 999;
        data[1].published_year = 1987;
        assert_eq!(
            unique_values(&data, Field::PublishedYear),
            vec!["1974", "1987", "1998", "999"]
        );
    }

    #[test]
    fn paginate_last_partial_page() {
        let data: Vec<usize> = (0..120).collect();
        let page = paginate(&data, 3, 50);

        assert_eq!(page.items, (100..120).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 120);
        assert_eq!(page.start_index, 100);
        assert_eq!(page.end_index, 120);
        assert!(!page.has_next);
        assert!(page.has_prev);
        assert_eq!(page.showing(), Some((101, 120)));
    }

    #[test]
    fn paginate_first_page() {
        let data: Vec<usize> = (0..120).collect();
        let page = paginate(&data, 1, 50);

        assert_eq!(page.items.len(), 50);
        assert_eq!(page.end_index, 50);
        assert!(page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn paginate_empty() {
        let data: Vec<usize> = Vec::new();
        let page = paginate(&data, 1, 50);

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.end_index, 0);
        assert!(!page.has_next);
        assert_eq!(page.showing(), None);
    }

    #[test]
    fn paginate_out_of_range() {
        let data: Vec<usize> = (0..10).collect();

        let beyond = paginate(&data, 7, 5);
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.start_index, 30);
        assert_eq!(beyond.end_index, 10);
        assert!(beyond.has_prev);
        assert!(!beyond.has_next);

        let zero = paginate(&data, 0, 5);
        assert!(zero.items.is_empty());
        assert_eq!(zero.start_index, 0);
        assert_eq!(zero.end_index, 0);
        assert!(zero.has_next);
        assert!(!zero.has_prev);
    }

    #[test]
    fn paginate_zero_page_size() {
        let data: Vec<usize> = (0..3).collect();
        let page = paginate(&data, 2, 0);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.items, vec![1]);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn page_links_window() {
        use PageLink::{Ellipsis as E, Page as P};

        assert!(page_links(1, 1, 2).is_empty());
        assert_eq!(page_links(1, 3, 2), vec![P(1), P(2), P(3)]);
        assert_eq!(page_links(1, 10, 2), vec![P(1), P(2), P(3), E, P(10)]);
        assert_eq!(
            page_links(5, 10, 2),
            vec![P(1), E, P(3), P(4), P(5), P(6), P(7), E, P(10)]
        );
        assert_eq!(page_links(10, 10, 2), vec![P(1), E, P(8), P(9), P(10)]);
        assert_eq!(
            page_links(4, 7, 2),
            vec![P(1), P(2), P(3), P(4), P(5), P(6), P(7)]
        );
    }

    #[test]
    fn statistics_counts() {
        let mut data = library();
        data[1].modified = true;
        data[4].author = "Jane Austen".into();

        let stats = statistics(&data);
        assert_eq!(
            stats,
            Statistics {
                total_records: 5,
                modified_records: 1,
                unique_genres: 3,
                unique_authors: 4,
            }
        );
    }
}
