use crate::state::{BookSummary, SortMode};

/// What: Order a results page according to the selected sort mode.
///
/// Inputs:
/// - `items`: Page as returned by the catalog (left untouched)
/// - `mode`: Requested ordering
///
/// Output:
/// - New vector; `Relevance` keeps catalog order, year modes sort by first publish year.
///
/// Details:
/// - Missing years count as 0, so undated books lead ascending and trail descending.
/// - Both year orders are stable: equal years keep their catalog order.
#[must_use]
pub fn sort_books(items: &[BookSummary], mode: SortMode) -> Vec<BookSummary> {
    let mut sorted = items.to_vec();
    match mode {
        SortMode::Relevance => {}
        SortMode::YearAscending => {
            sorted.sort_by_key(publish_year_or_zero);
        }
        SortMode::YearDescending => {
            sorted.sort_by(|a, b| publish_year_or_zero(b).cmp(&publish_year_or_zero(a)));
        }
    }
    sorted
}

/// Sort key for year orders.
fn publish_year_or_zero(book: &BookSummary) -> i32 {
    book.first_publish_year.unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, year: Option<i32>) -> BookSummary {
        BookSummary {
            id: id.to_string(),
            title: format!("Title {id}"),
            first_publish_year: year,
            ..BookSummary::default()
        }
    }

    fn ids(items: &[BookSummary]) -> Vec<&str> {
        items.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    /// What: Relevance leaves the catalog order untouched.
    fn relevance_keeps_order() {
        let items = vec![item("c", Some(3)), item("a", Some(1)), item("b", None)];
        assert_eq!(ids(&sort_books(&items, SortMode::Relevance)), vec!["c", "a", "b"]);
    }

    #[test]
    /// What: Ascending year sort is stable and treats missing years as 0.
    ///
    /// Inputs:
    /// - Two books from 1990 (x before y), one undated, one from 1965.
    ///
    /// Output:
    /// - Undated first, then 1965, then x and y in their original order.
    fn year_ascending_is_stable() {
        let items = vec![
            item("x", Some(1990)),
            item("undated", None),
            item("y", Some(1990)),
            item("old", Some(1965)),
        ];
        assert_eq!(
            ids(&sort_books(&items, SortMode::YearAscending)),
            vec!["undated", "old", "x", "y"]
        );
    }

    #[test]
    /// What: Descending year sort is stable and puts undated books last.
    fn year_descending_is_stable() {
        let items = vec![
            item("x", Some(1990)),
            item("undated", None),
            item("y", Some(1990)),
            item("new", Some(2020)),
        ];
        assert_eq!(
            ids(&sort_books(&items, SortMode::YearDescending)),
            vec!["new", "x", "y", "undated"]
        );
    }

    #[test]
    /// What: Sorting never mutates the input slice.
    fn input_is_not_mutated() {
        let items = vec![item("b", Some(2000)), item("a", Some(1965))];
        let snapshot = items.clone();
        let _ = sort_books(&items, SortMode::YearAscending);
        let _ = sort_books(&items, SortMode::YearDescending);
        assert_eq!(items, snapshot);
    }
}
