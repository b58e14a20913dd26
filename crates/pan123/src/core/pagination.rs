//! Listing query and termination rules.

use crate::data::ListData;

/// Cursor value marking the last page.
pub const NEXT_SENTINEL: &str = "-1";

/// Query parameters for page `page` (1-based) of `parent_id`'s children.
pub fn list_query(parent_id: i64, page: u32, page_size: u32) -> Vec<(String, String)> {
    [
        ("driveId", "0".to_string()),
        ("limit", page_size.to_string()),
        ("next", "0".to_string()),
        ("orderBy", "file_id".to_string()),
        ("orderDirection", "desc".to_string()),
        ("parentFileId", parent_id.to_string()),
        ("trashed", "false".to_string()),
        ("Page", page.to_string()),
        ("OnlyLookAbnormalFile", "0".to_string()),
        ("event", "homeListFile".to_string()),
        ("operateType", "4".to_string()),
        ("inDirectSpace", "false".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// A page ends the listing when it is empty or carries the sentinel cursor.
pub fn is_last_page(page: &ListData) -> bool {
    page.entries.is_empty() || page.next == NEXT_SENTINEL
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    Match,
    Mismatch { listed: usize, reported: i64 },
}

/// Compare the accumulated entry count against the server's total.
pub fn reconcile(listed: usize, reported: i64) -> Reconciliation {
    if i64::try_from(listed).is_ok_and(|n| n == reported) {
        Reconciliation::Match
    } else {
        Reconciliation::Mismatch { listed, reported }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FileEntry;

    fn entry(id: i64) -> FileEntry {
        serde_json::from_value(serde_json::json!({ "FileId": id })).unwrap()
    }

    fn page(n: usize, next: &str) -> ListData {
        ListData { entries: (0..n as i64).map(entry).collect(), next: next.into(), total: 0 }
    }

    #[test]
    fn query_selects_parent_and_page() {
        let q = list_query(42, 3, 100);
        let get = |k: &str| q.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
        assert_eq!(get("parentFileId"), Some("42"));
        assert_eq!(get("Page"), Some("3"));
        assert_eq!(get("limit"), Some("100"));
        assert_eq!(get("trashed"), Some("false"));
        assert_eq!(get("orderBy"), Some("file_id"));
        assert_eq!(get("event"), Some("homeListFile"));
        assert_eq!(q.len(), 12);
    }

    #[test]
    fn termination_rules() {
        assert!(is_last_page(&page(0, "5")));
        assert!(is_last_page(&page(10, NEXT_SENTINEL)));
        assert!(!is_last_page(&page(10, "12345")));
        assert!(!is_last_page(&page(10, "")));
    }

    #[test]
    fn reconciliation() {
        assert_eq!(reconcile(250, 250), Reconciliation::Match);
        assert_eq!(
            reconcile(250, 300),
            Reconciliation::Mismatch { listed: 250, reported: 300 }
        );
        assert_eq!(reconcile(0, -1), Reconciliation::Mismatch { listed: 0, reported: -1 });
    }
}
