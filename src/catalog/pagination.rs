/// First characters requested page by page, in order.
pub const PAGE_KEYS: [char; 36] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// Position in [`PAGE_KEYS`]. Never moves past `PAGE_KEYS.len()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationCursor {
    index: usize,
}

impl PaginationCursor {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Key of the next page to request, `None` once exhausted.
    pub fn current(&self) -> Option<char> {
        PAGE_KEYS.get(self.index).copied()
    }

    pub fn advance(&mut self) {
        if self.index < PAGE_KEYS.len() {
            self.index += 1;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= PAGE_KEYS.len()
    }

    pub fn remaining(&self) -> usize {
        PAGE_KEYS.len() - self.index
    }
}
