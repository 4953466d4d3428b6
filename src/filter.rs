use std::collections::HashSet;

use serde::Serialize;

use crate::models::StudentRecord;

/// A categorical filter: either any value, or exactly this one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum FieldFilter {
    #[default]
    Any,
    Equals(String),
}

impl FieldFilter {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            FieldFilter::Any => true,
            FieldFilter::Equals(expected) => expected == value,
        }
    }
}

impl From<Option<String>> for FieldFilter {
    fn from(value: Option<String>) -> Self {
        value.map_or(FieldFilter::Any, FieldFilter::Equals)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentQuery {
    pub text: String,
    pub major: FieldFilter,
    pub job_level: FieldFilter,
}

impl StudentQuery {
    pub fn is_unfiltered(&self) -> bool {
        self.text.is_empty() && self.major == FieldFilter::Any && self.job_level == FieldFilter::Any
    }
}

/// True when the student passes the text search and both categorical filters.
pub fn matches(student: &StudentRecord, query: &StudentQuery) -> bool {
    query.major.matches(&student.major)
        && query.job_level.matches(&student.job_level)
        && matches_text(student, &query.text)
}

/// Case-insensitive substring search over names, email, held skills (with
/// underscores read as spaces) and preferred locations.
pub fn matches_text(student: &StudentRecord, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let needle = text.to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    contains(&student.first_name)
        || contains(&student.last_name)
        || contains(&student.email)
        || student
            .skills_map
            .possessed()
            .any(|skill| contains(&skill.label()))
        || student
            .preferred_locations()
            .iter()
            .any(|location| !location.is_empty() && contains(location))
}

pub fn filter_students<'a>(students: &'a [StudentRecord], query: &StudentQuery) -> Vec<&'a StudentRecord> {
    students
        .iter()
        .filter(|student| matches(student, query))
        .collect()
}

/// Distinct non-empty values of a field, in first-seen order. Used to offer
/// filter choices.
pub fn distinct_values<F>(students: &[StudentRecord], field: F) -> Vec<String>
where
    F: Fn(&StudentRecord) -> &str,
{
    let mut seen = HashSet::new();
    students
        .iter()
        .map(field)
        .filter(|value| !value.is_empty() && seen.insert(*value))
        .map(str::to_string)
        .collect()
}

pub fn majors(students: &[StudentRecord]) -> Vec<String> {
    distinct_values(students, |student| student.major.as_str())
}

pub fn job_levels(students: &[StudentRecord]) -> Vec<String> {
    distinct_values(students, |student| student.job_level.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::Skill;

    fn john() -> StudentRecord {
        StudentRecord {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "jd@x.com".to_string(),
            major: "Computer Science".to_string(),
            job_level: "Entry Level".to_string(),
            preferred_location_1: "Austin".to_string(),
            skills_map: [Skill::Python, Skill::DataStructuresAlgorithms].into_iter().collect(),
            ..StudentRecord::default()
        }
    }

    fn text(value: &str) -> StudentQuery {
        StudentQuery {
            text: value.to_string(),
            ..StudentQuery::default()
        }
    }

    #[test]
    fn text_search_covers_skills_and_locations() {
        let record = john();
        assert!(matches(&record, &text("python")));
        assert!(matches(&record, &text("austin")));
        assert!(!matches(&record, &text("berlin")));
    }

    #[test]
    fn text_search_covers_names_and_email() {
        let record = john();
        assert!(matches(&record, &text("JOH")));
        assert!(matches(&record, &text("doe")));
        assert!(matches(&record, &text("x.com")));
    }

    #[test]
    fn skill_labels_use_spaces() {
        let record = john();
        assert!(matches(&record, &text("structures algo")));
        assert!(!matches(&record, &text("structures_algo")));
    }

    #[test]
    fn unheld_skills_do_not_match() {
        assert!(!matches(&john(), &text("java")));
    }

    #[test]
    fn empty_text_passes() {
        assert!(matches(&StudentRecord::default(), &StudentQuery::default()));
        assert!(StudentQuery::default().is_unfiltered());
    }

    #[test]
    fn categorical_filters_are_exact_and_anded() {
        let record = john();
        let query = StudentQuery {
            text: "python".to_string(),
            major: FieldFilter::Equals("Computer Science".to_string()),
            job_level: FieldFilter::Any,
        };
        assert!(matches(&record, &query));

        let wrong_case = StudentQuery {
            major: FieldFilter::Equals("computer science".to_string()),
            ..query.clone()
        };
        assert!(!matches(&record, &wrong_case));

        let wrong_level = StudentQuery {
            job_level: FieldFilter::Equals("Senior".to_string()),
            ..query
        };
        assert!(!matches(&record, &wrong_level));
    }

    #[test]
    fn filter_from_option() {
        assert_eq!(FieldFilter::from(None), FieldFilter::Any);
        assert_eq!(
            FieldFilter::from(Some("Biology".to_string())),
            FieldFilter::Equals("Biology".to_string())
        );
    }

    #[test]
    fn filter_students_keeps_roster_order() {
        let mut ana = john();
        ana.first_name = "Ana".to_string();
        let mut lee = john();
        lee.first_name = "Lee".to_string();
        lee.preferred_location_1 = "Berlin".to_string();
        let students = vec![ana, lee];

        let found = filter_students(&students, &text("berlin"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "Lee");
        assert_eq!(filter_students(&students, &StudentQuery::default()).len(), 2);
    }

    #[test]
    fn distinct_majors_skip_empty() {
        let mut other = john();
        other.major = "Biology".to_string();
        let mut blank = john();
        blank.major = String::new();
        let students = vec![john(), blank, other, john()];

        assert_eq!(majors(&students), vec!["Computer Science", "Biology"]);
        assert_eq!(job_levels(&students), vec!["Entry Level"]);
    }
}
