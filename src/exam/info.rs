use chrono::NaiveDate;

use super::{CatalogError, SectionName};

pub struct PassingRequirements {
    pub description: &'static str,
    pub requirements: &'static [&'static str],
}

static PASSING_REQUIREMENTS: PassingRequirements = PassingRequirements {
    description: "Um das Goethe-Zertifikat B1 zu bestehen, brauchst du:",
    requirements: &[
        "Mindestens 60% insgesamt (180 Punkte)",
        "Mindestens 60% in jedem Modul (Lesen, Schreiben, Hören, Sprechen)",
    ],
};

pub fn passing_requirements() -> &'static PassingRequirements {
    &PASSING_REQUIREMENTS
}

pub struct ScoreRow {
    pub section: SectionName,
    pub points: u32,
    pub pass_mark: u32,
}

pub fn scoring_table() -> [ScoreRow; 4] {
    SectionName::ALL.map(|section| ScoreRow {
        section,
        points: 100,
        pass_mark: 60,
    })
}

pub struct StudyBlock {
    pub hours: f32,
    pub topic: &'static str,
}

pub struct StudyDay {
    pub title: &'static str,
    pub blocks: &'static [StudyBlock],
}

static STUDY_PLAN: [StudyDay; 2] = [
    StudyDay {
        title: "Tag 1: Grundlagen",
        blocks: &[
            StudyBlock {
                hours: 2.0,
                topic: "Wichtiger Wortschatz & Präpositionen",
            },
            StudyBlock {
                hours: 1.5,
                topic: "Leseverstehen Strategien",
            },
            StudyBlock {
                hours: 2.0,
                topic: "Schreiben Vorlagen (Emails, Briefe)",
            },
            StudyBlock {
                hours: 1.0,
                topic: "Hörverstehen Praxis",
            },
        ],
    },
    StudyDay {
        title: "Tag 2: Prüfungssimulation",
        blocks: &[
            StudyBlock {
                hours: 3.0,
                topic: "Komplette Übungsprüfung",
            },
            StudyBlock {
                hours: 1.0,
                topic: "Sprechen Rollenspiele",
            },
            StudyBlock {
                hours: 1.0,
                topic: "Schwachstellen wiederholen",
            },
            StudyBlock {
                hours: 1.0,
                topic: "Letzte Tipps und Strategien",
            },
        ],
    },
];

pub fn study_plan() -> &'static [StudyDay] {
    &STUDY_PLAN
}

pub const MAX_TASKS: u32 = 10;
pub const MAX_REVIEW_MINUTES: u32 = 30;

/// Minutes available per task once review time is set aside.
pub fn time_per_task(
    duration_minutes: u32,
    task_count: u32,
    review_minutes: u32,
) -> Result<f64, CatalogError> {
    if !(1..=MAX_TASKS).contains(&task_count) {
        return Err(CatalogError::InvalidTiming(format!(
            "task count must be between 1 and {MAX_TASKS}, got {task_count}"
        )));
    }
    if review_minutes > MAX_REVIEW_MINUTES || review_minutes >= duration_minutes {
        return Err(CatalogError::InvalidTiming(format!(
            "review time of {review_minutes} min does not fit into {duration_minutes} min"
        )));
    }

    Ok(f64::from(duration_minutes - review_minutes) / f64::from(task_count))
}

/// Days left until the exam; negative once it is over.
pub fn days_until(exam_date: NaiveDate, today: NaiveDate) -> i64 {
    (exam_date - today).num_days()
}

/// Accepts "TT.MM.JJJJ" or ISO dates. Dates in the past are rejected.
pub fn parse_exam_date(text: &str, today: NaiveDate) -> Result<NaiveDate, CatalogError> {
    let text = text.trim();
    let date = NaiveDate::parse_from_str(text, "%d.%m.%Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .map_err(|_| CatalogError::InvalidDate(text.to_string()))?;

    if date < today {
        return Err(CatalogError::InvalidDate(format!("{text} liegt in der Vergangenheit")));
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn time_per_task_splits_what_is_left_after_review() {
        assert_eq!(time_per_task(65, 4, 0).unwrap(), 16.25);
        assert_eq!(time_per_task(60, 2, 5).unwrap(), 27.5);
    }

    #[test]
    fn time_per_task_rejects_out_of_range_input() {
        assert!(time_per_task(65, 0, 0).is_err());
        assert!(time_per_task(65, 11, 0).is_err());
        assert!(time_per_task(60, 2, 31).is_err());
        assert!(time_per_task(15, 3, 15).is_err());
    }

    #[test]
    fn exam_dates_parse_in_both_formats() {
        let today = date(2026, 10, 19);
        assert_eq!(parse_exam_date("21.10.2026", today).unwrap(), date(2026, 10, 21));
        assert_eq!(parse_exam_date(" 2026-10-19 ", today).unwrap(), today);
        assert!(parse_exam_date("18.10.2026", today).is_err());
        assert!(parse_exam_date("morgen", today).is_err());
    }

    #[test]
    fn countdown_counts_whole_days() {
        assert_eq!(days_until(date(2026, 10, 21), date(2026, 10, 19)), 2);
        assert_eq!(days_until(date(2026, 10, 19), date(2026, 10, 19)), 0);
    }

    #[test]
    fn every_part_needs_sixty_of_a_hundred() {
        let table = scoring_table();
        assert_eq!(table.len(), 4);
        assert!(table.iter().all(|row| row.points == 100 && row.pass_mark == 60));
    }
}
