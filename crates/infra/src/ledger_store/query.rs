//! Query parameter types for store reads.

use serde::{Deserialize, Serialize};

/// Pagination parameters for list queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Page {
    /// Offset for pagination (0-based).
    pub offset: u32,
    /// Maximum number of records to return.
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50, // Safe default
        }
    }
}

impl Page {
    pub fn new(offset: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            offset: offset.unwrap_or(0),
            limit: limit.unwrap_or(50).min(1000), // Cap at 1000 for safety
        }
    }

    pub(crate) fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.offset as usize).min(items.len());
        let end = start.saturating_add(self.limit as usize).min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_clamps_to_bounds() {
        let items = [1, 2, 3, 4, 5];

        assert_eq!(Page { offset: 0, limit: 2 }.slice(&items), &[1, 2]);
        assert_eq!(Page { offset: 3, limit: 10 }.slice(&items), &[4, 5]);
        assert_eq!(Page { offset: 9, limit: 10 }.slice(&items), &[] as &[i32]);
    }

    #[test]
    fn new_caps_the_limit() {
        assert_eq!(Page::new(None, Some(5000)).limit, 1000);
        assert_eq!(Page::new(Some(7), None).offset, 7);
    }
}
