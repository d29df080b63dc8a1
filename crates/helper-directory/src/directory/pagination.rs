use serde::Serialize;

/// Number of cards shown per page.
pub const PAGE_SIZE: usize = 6;

/// Maximum number of page buttons rendered at once.
pub const PAGE_WINDOW: usize = 5;

pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Records on the 1-based `page`; out-of-range pages yield an empty slice.
pub fn page_slice<T>(data: &[T], page: usize) -> &[T] {
    if page == 0 {
        return &[];
    }

    let start = (page - 1).saturating_mul(PAGE_SIZE).min(data.len());
    let end = start.saturating_add(PAGE_SIZE).min(data.len());
    &data[start..end]
}

/// Page numbers to render around `current`: up to five, pinned to the first
/// five near the start and the last five near the end.
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    let current = current as i64;
    let total = total as i64;
    let span = PAGE_WINDOW as i64;

    let mut start = (current - 2).max(1);
    let mut end = (current + 2).min(total);
    if current <= 3 {
        end = span.min(total);
    }
    if current >= total - 2 {
        start = (total - (span - 1)).max(1);
    }

    (start..=end).map(|page| page as usize).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub number: usize,
    pub active: bool,
}

/// Cursor over the pages of the current result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    total: usize,
}

impl Pager {
    /// Starts on page 1 of a result set with `count` records.
    pub fn new(count: usize) -> Self {
        Self {
            current: 1,
            total: total_pages(count),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    /// Advances one page; returns false and stays put on the last page.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Steps back one page; returns false and stays put on page 1.
    pub fn previous(&mut self) -> bool {
        if self.has_previous() {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps to `page`. Page 1 is always reachable, even with no results.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total.max(1) {
            self.current = page;
            true
        } else {
            false
        }
    }

    pub fn buttons(&self) -> Vec<PageButton> {
        page_window(self.current, self.total)
            .into_iter()
            .map(|number| PageButton {
                number,
                active: number == self.current,
            })
            .collect()
    }

    pub fn info(&self) -> String {
        format!("Page {} of {}", self.current, self.total)
    }
}
