use chrono::NaiveDate;
use helper_directory::directory::{
    load_records, HelperDirectory, HelperSource, LoadFailure, PageResult, RangeFilter, Skill,
    SortOrder,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) directory: Arc<Mutex<HelperDirectory>>,
    pub(crate) source: Arc<dyn HelperSource>,
}

impl AppState {
    pub(crate) fn new(metrics: PrometheusHandle, source: Arc<dyn HelperSource>) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            directory: Arc::new(Mutex::new(HelperDirectory::new())),
            source,
        }
    }
}

/// Fetches a fresh record set and installs it. The directory lock is only
/// taken once the fetch has finished, so reads keep being served meanwhile.
pub(crate) async fn reload_directory(
    state: &AppState,
    today: NaiveDate,
) -> Result<PageResult, LoadFailure> {
    info!(source = %state.source.describe(), "reloading helper directory");
    let fetched = load_records(state.source.as_ref(), today).await;

    let mut directory = state.directory.lock().await;
    match fetched {
        Ok(records) => Ok(directory.load(records)),
        Err(err) => Err(directory.load_failed(&err)),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_range(raw: &str) -> Result<RangeFilter, String> {
    raw.parse::<RangeFilter>().map_err(|err| err.to_string())
}

pub(crate) fn parse_sort(raw: &str) -> Result<SortOrder, String> {
    raw.parse::<SortOrder>().map_err(|err| err.to_string())
}

pub(crate) fn parse_skill(raw: &str) -> Result<Skill, String> {
    raw.parse::<Skill>().map_err(|err| err.to_string())
}
