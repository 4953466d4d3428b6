//! Raw CSV row to `StudentRecord` conversion.
//!
//! Column names are the external contract of the roster export and are
//! matched literally.

use std::collections::HashMap;

use crate::models::StudentRecord;
use crate::skills::{Skill, SkillMap};

pub type RawRow = HashMap<String, String>;

/// The only cell value that marks a skill as held. Case-sensitive.
pub const AFFIRMATIVE: &str = "Yes";

pub mod columns {
    pub const ID: &str = "";
    pub const SUBMISSION_DATE: &str = "Submission.Date";
    pub const FIRST_NAME: &str = "First.Name";
    pub const LAST_NAME: &str = "Last.Name";
    pub const EMAIL: &str = "Email";
    pub const DATE: &str = "Date";
    pub const EDUCATION_LEVEL: &str = "Education.Level";
    pub const MAJOR: &str = "Major";
    pub const YEARS_OF_EXPERIENCE: &str = "Years.of.Experience";
    pub const JOB_LEVEL: &str = "What.level.are.you.looking.for.";
    pub const WORK_MODE_PREFERENCE: &str = "Work.Mode.Preference";
    pub const WILLING_TO_RELOCATE: &str = "Willing.to.relocate";
    pub const PREFERRED_LOCATION_1: &str = "Prefered.Location.1";
    pub const PREFERRED_LOCATION_2: &str = "Prefered.Location.2";
    pub const PREFERRED_LOCATION_3: &str = "Prefered.Location.3";
    pub const JOB_SEARCH_STATUS: &str = "Current.Job.Search.Status";
    pub const EXPECTED_SALARY: &str = "Expected.Salary";
    pub const SKILLS: &str = "Skills";
    pub const GENDER: &str = "Gender";
    pub const LANGUAGE: &str = "Language";
    pub const GPA: &str = "GPA";
    pub const SPONSORSHIP: &str = "Sponsorship";
    pub const DISABILITY: &str = "Disability";
    pub const OPEN_TO_MENTORSHIP: &str = "Are.you.open.to.mentorship.";
}

/// Builds a record from one raw row. `ordinal` is the 1-based data row
/// number and becomes the id when the row carries no explicit one.
pub fn normalize(row: &RawRow, ordinal: usize) -> StudentRecord {
    let id = match text(row, columns::ID) {
        explicit if !explicit.is_empty() => explicit,
        _ => ordinal.to_string(),
    };

    StudentRecord {
        id,
        submission_date: text(row, columns::SUBMISSION_DATE),
        first_name: text(row, columns::FIRST_NAME),
        last_name: text(row, columns::LAST_NAME),
        email: text(row, columns::EMAIL),
        date: text(row, columns::DATE),
        education_level: text(row, columns::EDUCATION_LEVEL),
        major: text(row, columns::MAJOR),
        years_of_experience: count(row, columns::YEARS_OF_EXPERIENCE),
        job_level: text(row, columns::JOB_LEVEL),
        work_mode_preference: text(row, columns::WORK_MODE_PREFERENCE),
        willing_to_relocate: text(row, columns::WILLING_TO_RELOCATE),
        preferred_location_1: text(row, columns::PREFERRED_LOCATION_1),
        preferred_location_2: text(row, columns::PREFERRED_LOCATION_2),
        preferred_location_3: text(row, columns::PREFERRED_LOCATION_3),
        job_search_status: text(row, columns::JOB_SEARCH_STATUS),
        expected_salary: count(row, columns::EXPECTED_SALARY),
        skills: text(row, columns::SKILLS),
        gender: text(row, columns::GENDER),
        language: text(row, columns::LANGUAGE),
        gpa: text(row, columns::GPA),
        sponsorship: text(row, columns::SPONSORSHIP),
        disability: text(row, columns::DISABILITY),
        open_to_mentorship: text(row, columns::OPEN_TO_MENTORSHIP),
        skills_map: skills_map(row),
    }
}

pub fn skills_map(row: &RawRow) -> SkillMap {
    Skill::ALL
        .iter()
        .copied()
        .filter(|skill| {
            row.get(skill.column())
                .is_some_and(|value| value == AFFIRMATIVE)
        })
        .collect()
}

fn text(row: &RawRow, column: &str) -> String {
    row.get(column).cloned().unwrap_or_default()
}

fn count(row: &RawRow, column: &str) -> u64 {
    row.get(column).map(|value| parse_count(value)).unwrap_or(0)
}

/// Reads a leading base-10 integer the way a lenient form export expects:
/// leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit. Anything without digits or negative is 0; values beyond
/// `u64` saturate.
pub fn parse_count(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];

    if digits.is_empty() || negative {
        return 0;
    }

    digits.parse::<u64>().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn empty_row_has_full_vocabulary_and_defaults() {
        let record = normalize(&RawRow::new(), 4);
        assert_eq!(record.skills_map.iter().count(), Skill::COUNT);
        assert_eq!(record.skills_map.count(), 0);
        assert_eq!(record.id, "4");
        assert_eq!(record.first_name, "");
        assert_eq!(record.preferred_location_3, "");
        assert_eq!(record.years_of_experience, 0);
        assert_eq!(record.expected_salary, 0);
    }

    #[test]
    fn maps_literal_columns() {
        let record = normalize(
            &row(&[
                ("", "17"),
                ("First.Name", "John"),
                ("Last.Name", "Doe"),
                ("Email", "jd@x.com"),
                ("Major", "Computer Science"),
                ("What.level.are.you.looking.for.", "Entry Level"),
                ("Prefered.Location.1", "Austin"),
                ("Current.Job.Search.Status", "Actively Looking"),
                ("Years.of.Experience", "3"),
                ("Expected.Salary", "85000"),
                ("Are.you.open.to.mentorship.", "Yes"),
            ]),
            1,
        );

        assert_eq!(record.id, "17");
        assert_eq!(record.full_name(), "John Doe");
        assert_eq!(record.email, "jd@x.com");
        assert_eq!(record.major, "Computer Science");
        assert_eq!(record.job_level, "Entry Level");
        assert_eq!(record.preferred_locations(), ["Austin", "", ""]);
        assert_eq!(record.job_search_status, "Actively Looking");
        assert_eq!(record.years_of_experience, 3);
        assert_eq!(record.expected_salary, 85_000);
        assert_eq!(record.open_to_mentorship, "Yes");
    }

    #[test]
    fn skill_flag_requires_exact_yes() {
        let record = normalize(
            &row(&[
                ("Python", "Yes"),
                ("Java", "yes"),
                ("GIT", "YES"),
                ("C++", "No"),
                ("Big_Data", ""),
                ("Data_Science", " Yes"),
            ]),
            1,
        );

        for skill in Skill::ALL {
            assert_eq!(record.has_skill(skill), skill == Skill::Python, "{skill}");
        }
    }

    #[test]
    fn scalar_values_are_not_trimmed() {
        let record = normalize(&row(&[("Major", "  Biology ")]), 1);
        assert_eq!(record.major, "  Biology ");
    }

    #[test]
    fn numeric_parse_falls_back_to_zero() {
        assert_eq!(parse_count("42"), 42);
        assert_eq!(parse_count("  7"), 7);
        assert_eq!(parse_count("+12"), 12);
        assert_eq!(parse_count("55000.00"), 55_000);
        assert_eq!(parse_count("3 years"), 3);
        assert_eq!(parse_count("-5"), 0);
        assert_eq!(parse_count("n/a"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("5000000000"), 5_000_000_000);
        assert_eq!(parse_count("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn unparseable_salary_is_zero() {
        let record = normalize(&row(&[("Expected.Salary", "negotiable")]), 1);
        assert_eq!(record.expected_salary, 0);
    }
}
