/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response envelope for paginated listings
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// One page of a cursor-paginated listing
///
/// A present cursor means more pages may follow (possibly empty ones); an
/// absent cursor means the listing is exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<u64>,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.cursor.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_cursor_is_optional() {
        let page: Page<String> =
            serde_json::from_value(json!({ "data": ["a"], "cursor": 99 })).expect("page");
        assert_eq!(page.cursor, Some(99));
        assert!(!page.is_last());

        let last: Page<String> = serde_json::from_value(json!({ "data": [] })).expect("page");
        assert!(last.is_last());
    }
}
