use crate::infra::{parse_date, parse_range, parse_skill, parse_sort};
use crate::render::{FailureView, PageView};
use chrono::{Local, NaiveDate};
use clap::Args;
use helper_directory::config::AppConfig;
use helper_directory::directory::{
    file_source, load_records, HelperDirectory, HelperSource, HttpHelperSource, RangeFilter,
    SearchCriteria, Skill, SortOrder,
};
use helper_directory::error::AppError;
use helper_directory::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct SearchArgs {
    /// Read a saved sheet export (.csv or JSON) instead of the configured endpoint
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Free-text terms matched against name, comments, experience, rest day and salary
    #[arg(long)]
    pub(crate) query: Option<String>,
    #[arg(long)]
    pub(crate) nationality: Option<String>,
    #[arg(long)]
    pub(crate) experience: Option<String>,
    #[arg(long)]
    pub(crate) religion: Option<String>,
    /// Height range in cm, e.g. 150-160
    #[arg(long, value_parser = parse_range)]
    pub(crate) height: Option<RangeFilter>,
    /// Weight range in kg, e.g. 45-55
    #[arg(long, value_parser = parse_range)]
    pub(crate) weight: Option<RangeFilter>,
    /// Expected salary range, e.g. 600-800 or 1000-
    #[arg(long, value_parser = parse_range)]
    pub(crate) salary: Option<RangeFilter>,
    /// Required skill; repeat for several
    #[arg(long = "skill", value_parser = parse_skill)]
    pub(crate) skills: Vec<Skill>,
    /// One of name, height, weight or age, suffixed with -asc or -desc
    #[arg(long, value_parser = parse_sort)]
    pub(crate) sort: Option<SortOrder>,
    /// Page to print (1-based)
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    /// Reference date for ages (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the page as JSON instead of cards
    #[arg(long)]
    pub(crate) json: bool,
}

impl SearchArgs {
    fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            query: self.query.clone().unwrap_or_default(),
            nationality: self.nationality.clone(),
            experience: self.experience.clone(),
            religion: self.religion.clone(),
            height: self.height,
            weight: self.weight,
            salary: self.salary,
            skills: self.skills.iter().copied().collect(),
            sort: self.sort,
        }
    }
}

pub(crate) async fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;

    let source: Box<dyn HelperSource> = match &args.input {
        Some(path) => file_source(path),
        None => Box::new(HttpHelperSource::new(&config.source)?),
    };
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let mut directory = HelperDirectory::new();
    let loaded = match load_records(source.as_ref(), today).await {
        Ok(records) => directory.load(records),
        Err(err) => {
            let failure = directory.load_failed(&err);
            if args.json {
                print_json(&failure);
            } else {
                print!("{}", FailureView(&failure));
            }
            return Err(err.into());
        }
    };

    let criteria = args.criteria();
    let mut page = if criteria.is_empty() {
        loaded
    } else {
        directory.apply_filters(criteria)?
    };
    if args.page != page.page {
        let notification = page.notification.take();
        page = directory.go_to_page(args.page)?;
        page.notification = notification;
    }

    if args.json {
        print_json(&page);
    } else {
        print!("{}", PageView(&page));
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("JSON output unavailable: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flags_leave_criteria_empty() {
        assert!(SearchArgs::default().criteria().is_empty());
    }

    #[test]
    fn flags_map_onto_criteria() {
        let args = SearchArgs {
            query: Some("cook".to_string()),
            salary: Some(RangeFilter::between(600, 800)),
            skills: vec![Skill::Cooking, Skill::Cooking, Skill::PetCare],
            ..SearchArgs::default()
        };
        let criteria = args.criteria();
        assert_eq!(criteria.query, "cook");
        assert_eq!(criteria.salary, Some(RangeFilter::between(600, 800)));
        assert_eq!(criteria.skills.len(), 2);
        assert!(!criteria.is_empty());
    }
}
