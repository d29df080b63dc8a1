use helper_directory::directory::{HelperRecord, LoadFailure, Notification, PageResult, Skill};
use std::fmt;

/// Text view of one result page: summary, cards and the page window.
pub(crate) struct PageView<'a>(pub(crate) &'a PageResult);

impl fmt::Display for PageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.0;
        writeln!(f, "{}", page.summary)?;
        if let Some(notification) = &page.notification {
            writeln!(f, "{}", NotificationView(notification))?;
        }

        if page.records.is_empty() {
            writeln!(f, "\nNo Helpers Found")?;
            return writeln!(
                f,
                "Try adjusting your search criteria or using different keywords"
            );
        }

        for record in &page.records {
            write!(f, "\n{}", CardView(record))?;
        }

        write!(f, "\n{} ", page.page_info)?;
        for button in &page.window {
            if button.active {
                write!(f, " [{}]", button.number)?;
            } else {
                write!(f, " {}", button.number)?;
            }
        }
        writeln!(f)
    }
}

/// One helper card.
pub(crate) struct CardView<'a>(pub(crate) &'a HelperRecord);

impl fmt::Display for CardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        writeln!(f, "{} ({})", record.name, record.code)?;
        write!(
            f,
            "  Nationality: {} | Experience: {} | Age: ",
            record.nationality, record.experience
        )?;
        match record.age {
            Some(age) => writeln!(f, "{age} years")?,
            None => writeln!(f, "N/A years")?,
        }
        writeln!(
            f,
            "  Height & Weight: {} cm | {} kg",
            or_na(&record.height),
            or_na(&record.weight)
        )?;
        writeln!(
            f,
            "  Rest day & Salary: {} | {}",
            or_na(&record.rest_day),
            or_na(&record.salary)
        )?;
        writeln!(f, "  Religion: {}", or_na(&record.religion))?;

        write!(f, " ")?;
        for (skill, present) in record.skills.iter() {
            let mark = if present { 'x' } else { ' ' };
            write!(f, " [{mark}] {}", badge_caption(skill))?;
        }
        writeln!(f)?;
        writeln!(f, "  Comments: {}", record.comments)
    }
}

/// Error panel shown when the sheet could not be loaded.
pub(crate) struct FailureView<'a>(pub(crate) &'a LoadFailure);

impl fmt::Display for FailureView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failure = self.0;
        writeln!(f, "{}", failure.summary)?;
        writeln!(f, "{}", NotificationView(&failure.notification))?;
        writeln!(f, "\nError Loading Data")?;
        writeln!(f, "{}", failure.message)?;
        if failure.retryable {
            writeln!(f, "Run the command again to retry.")?;
        }
        Ok(())
    }
}

struct NotificationView<'a>(&'a Notification);

impl fmt::Display for NotificationView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.0.level.label(), self.0.message)
    }
}

fn badge_caption(skill: Skill) -> &'static str {
    match skill {
        Skill::Housekeeping => "Housekeep",
        other => other.label(),
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use helper_directory::directory::{normalize, HelperDirectory, RawHelperRow, SourceError};

    fn record(name: &str) -> HelperRecord {
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
        normalize(
            RawHelperRow {
                code: Some("MDW-2001".to_string()),
                status: Some("Available".to_string()),
                name: Some(name.to_string()),
                dob: Some("1 Jan 1990".to_string()),
                height: Some("155 cm".to_string()),
                child_care: Some("TRUE".to_string()),
                cooking: Some("False".to_string()),
                ..RawHelperRow::default()
            },
            today,
        )
    }

    #[test]
    fn card_lists_stats_and_skill_badges() {
        let card = CardView(&record("Maria Santos")).to_string();
        assert!(card.starts_with("Maria Santos (MDW-2001)\n"));
        assert!(card.contains("Age: 34 years"));
        assert!(card.contains("Height & Weight: 155 cm | N/A kg"));
        assert!(card.contains("[x] Housekeep  [ ] Cooking"));
        assert!(card.contains(
            "  [x] Housekeep  [ ] Cooking  [x] Child Care  [ ] Infant Care  [ ] Elder Care  [ ] Pet Care\n"
        ));
        assert!(card.contains("Comments: No comments available"));
    }

    #[test]
    fn page_shows_summary_cards_and_window() {
        let mut directory = HelperDirectory::new();
        let page = directory.load(vec![record("Maria Santos"), record("Siti Rahma")]);
        let text = PageView(&page).to_string();
        assert!(text.starts_with("2 Helpers Found\n[success] Helpers data loaded successfully!\n"));
        assert!(text.contains("Siti Rahma (MDW-2001)"));
        assert!(text.trim_end().ends_with("Page 1 of 1  [1]"));
    }

    #[test]
    fn empty_page_suggests_adjusting_filters() {
        let mut directory = HelperDirectory::new();
        let page = directory.load(Vec::new());
        let text = PageView(&page).to_string();
        assert!(text.contains("No Helpers Found"));
    }

    #[test]
    fn failure_panel_carries_message() {
        let mut directory = HelperDirectory::new();
        let failure = directory.load_failed(&SourceError::Empty);
        let text = FailureView(&failure).to_string();
        assert!(text.starts_with("Error loading data\n[error] Failed to load helper data\n"));
        assert!(text.contains("No data available in the response"));
    }
}
