/// A growable rendering window over an already-fetched collection. No
/// network I/O happens here; `load_more` only widens the visible prefix,
/// capped at the collection length, and is a no-op once the cap is hit.
#[derive(Debug, Clone)]
pub struct PageWindow {
    page_size: usize,
    revealed: usize,
}

impl PageWindow {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            revealed: page_size,
        }
    }

    pub fn load_more(&mut self, total: usize) {
        if self.revealed < total {
            self.revealed = (self.revealed + self.page_size).min(total);
        }
    }

    pub fn visible_count(&self, total: usize) -> usize {
        self.revealed.min(total)
    }

    pub fn is_exhausted(&self, total: usize) -> bool {
        self.revealed >= total
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible_count(items.len())]
    }
}
