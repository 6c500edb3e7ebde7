use serde::{Deserialize, Serialize};

/// One page of a cursor-paged listing.
///
/// `next` is the id of the last item in `items` when more items follow, and
/// `None` once the listing is exhausted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// The page returned for a cursor that is not in the index.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next: None,
        }
    }

    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }

    /// Transform items while keeping the cursor.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next: self.next,
        }
    }
}

/// Position of the first id after `cursor`.
///
/// `None` cursor starts at the beginning. A cursor that is not in `ids`
/// yields `None`: the caller returns an empty page instead of restarting.
pub(crate) fn start_after(ids: &[String], cursor: Option<&str>) -> Option<usize> {
    match cursor {
        None => Some(0),
        Some(cursor) => ids.iter().position(|id| id == cursor).map(|pos| pos + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn start_without_cursor_is_zero() {
        assert_eq!(start_after(&ids(&["a", "b"]), None), Some(0));
    }

    #[test]
    fn start_after_known_cursor() {
        assert_eq!(start_after(&ids(&["a", "b", "c"]), Some("b")), Some(2));
        assert_eq!(start_after(&ids(&["a", "b", "c"]), Some("c")), Some(3));
    }

    #[test]
    fn unknown_cursor_has_no_start() {
        assert_eq!(start_after(&ids(&["a"]), Some("zzz")), None);
        assert_eq!(start_after(&[], Some("a")), None);
    }

    #[test]
    fn map_keeps_cursor() {
        let page = Page {
            items: vec![1, 2],
            next: Some("2".into()),
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.next.as_deref(), Some("2"));
        assert!(!mapped.is_last());
    }
}
