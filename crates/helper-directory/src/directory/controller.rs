use super::filter::{browsable, filter_records, SearchCriteria};
use super::notification::Notification;
use super::pagination::{page_slice, PageButton, Pager, PAGE_SIZE};
use super::record::HelperRecord;
use super::sort::sort_records;
use super::source::SourceError;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Errors raised by directory queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("helper data is still loading")]
    NotLoaded,
    #[error("helper data failed to load: {message}")]
    LoadFailed { message: String },
    #[error("page {requested} is out of range (1..={total})")]
    PageOutOfRange { requested: usize, total: usize },
}

/// One rendered page plus everything the presentation layer needs around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub summary: String,
    pub page_info: String,
    pub has_previous: bool,
    pub has_next: bool,
    pub window: Vec<PageButton>,
    pub criteria: SearchCriteria,
    pub records: Vec<HelperRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

/// Error panel contents shown when a load attempt fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub message: String,
    pub summary: String,
    pub retryable: bool,
    pub notification: Notification,
}

impl LoadFailure {
    pub fn new(message: String) -> Self {
        Self {
            message,
            summary: "Error loading data".to_string(),
            retryable: true,
            notification: Notification::error("Failed to load helper data"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum LoadState {
    #[default]
    Pending,
    Ready,
    Failed(String),
}

/// Session state for one directory view: the loaded snapshot, the working
/// copy, the current result set and the page cursor.
#[derive(Debug, Clone)]
pub struct HelperDirectory {
    state: LoadState,
    original: Vec<HelperRecord>,
    working: Vec<HelperRecord>,
    filtered: Vec<HelperRecord>,
    criteria: SearchCriteria,
    pager: Pager,
}

impl Default for HelperDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl HelperDirectory {
    pub fn new() -> Self {
        Self {
            state: LoadState::Pending,
            original: Vec::new(),
            working: Vec::new(),
            filtered: Vec::new(),
            criteria: SearchCriteria::default(),
            pager: Pager::new(0),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Every loaded record, including rejected, withdrawn and selected ones.
    pub fn records(&self) -> &[HelperRecord] {
        &self.original
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    /// Installs a freshly fetched record set and shows its first page.
    pub fn load(&mut self, records: Vec<HelperRecord>) -> PageResult {
        self.original = records;
        self.working = self.original.clone();
        self.show_base_set();
        self.state = LoadState::Ready;

        info!(
            loaded = self.original.len(),
            browsable = self.filtered.len(),
            "helper directory loaded"
        );
        self.page_result(Some(Notification::success(
            "Helpers data loaded successfully!",
        )))
    }

    /// Records a failed load. Any previously loaded data is dropped so the
    /// error panel replaces the stale results.
    pub fn load_failed(&mut self, error: &SourceError) -> LoadFailure {
        let message = error.to_string();
        warn!(error = %message, "helper directory failed to load");

        self.original.clear();
        self.working.clear();
        self.filtered.clear();
        self.criteria = SearchCriteria::default();
        self.pager = Pager::new(0);
        self.state = LoadState::Failed(message.clone());

        LoadFailure::new(message)
    }

    /// The error panel for the last failed load, if that is the current state.
    pub fn failure(&self) -> Option<LoadFailure> {
        match &self.state {
            LoadState::Failed(message) => Some(LoadFailure::new(message.clone())),
            LoadState::Pending | LoadState::Ready => None,
        }
    }

    /// Filters the working copy, orders it and jumps back to page 1.
    pub fn apply_filters(&mut self, criteria: SearchCriteria) -> Result<PageResult, DirectoryError> {
        self.ensure_loaded()?;

        let mut results = filter_records(&self.working, &criteria);
        if let Some(order) = criteria.sort {
            sort_records(&mut results, order);
        }

        self.filtered = results;
        self.criteria = criteria;
        self.pager = Pager::new(self.filtered.len());
        debug!(
            matches = self.filtered.len(),
            pages = self.pager.total(),
            "filters applied"
        );

        let count = self.filtered.len();
        let notification = if count == 0 {
            Notification::info("No helpers found with current filters")
        } else {
            Notification::success(format!("Found {count} helpers"))
        };
        Ok(self.page_result(Some(notification)))
    }

    /// Clears every filter and restores the working copy from the snapshot.
    pub fn reset(&mut self) -> Result<PageResult, DirectoryError> {
        self.ensure_loaded()?;

        self.working = self.original.clone();
        self.show_base_set();
        Ok(self.page_result(Some(Notification::info("Filters have been reset"))))
    }

    pub fn current(&self) -> Result<PageResult, DirectoryError> {
        self.ensure_loaded()?;
        Ok(self.page_result(None))
    }

    /// No-op on the last page.
    pub fn next_page(&mut self) -> Result<PageResult, DirectoryError> {
        self.ensure_loaded()?;
        self.pager.next();
        Ok(self.page_result(None))
    }

    /// No-op on the first page.
    pub fn previous_page(&mut self) -> Result<PageResult, DirectoryError> {
        self.ensure_loaded()?;
        self.pager.previous();
        Ok(self.page_result(None))
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<PageResult, DirectoryError> {
        self.ensure_loaded()?;
        if !self.pager.go_to(page) {
            return Err(DirectoryError::PageOutOfRange {
                requested: page,
                total: self.pager.total().max(1),
            });
        }
        Ok(self.page_result(None))
    }

    fn ensure_loaded(&self) -> Result<(), DirectoryError> {
        match &self.state {
            LoadState::Ready => Ok(()),
            LoadState::Pending => Err(DirectoryError::NotLoaded),
            LoadState::Failed(message) => Err(DirectoryError::LoadFailed {
                message: message.clone(),
            }),
        }
    }

    fn show_base_set(&mut self) {
        self.filtered = browsable(&self.working);
        self.criteria = SearchCriteria::default();
        self.pager = Pager::new(self.filtered.len());
    }

    fn page_result(&self, notification: Option<Notification>) -> PageResult {
        let count = self.filtered.len();
        PageResult {
            page: self.pager.current(),
            total_pages: self.pager.total(),
            page_size: PAGE_SIZE,
            total_count: count,
            summary: result_summary(count),
            page_info: self.pager.info(),
            has_previous: self.pager.has_previous(),
            has_next: self.pager.has_next(),
            window: self.pager.buttons(),
            criteria: self.criteria.clone(),
            records: page_slice(&self.filtered, self.pager.current()).to_vec(),
            notification,
        }
    }
}

/// `"1 Helper Found"`, `"6 Helpers Found"`.
pub fn result_summary(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} Helper{plural} Found")
}
