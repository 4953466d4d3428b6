use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::{category_scores, count_skills, top_skills};
use crate::distribution::{
    job_search_statuses, location_preferences, salary_bands, salary_distribution,
    work_mode_preferences, Histogram,
};
use crate::filter::{filter_students, job_levels, majors, StudentQuery};
use crate::matching::{suggest, MatchResult, RoleCatalogEntry};
use crate::models::{CategoryScore, DistributionBucket, SkillShare, StudentRecord};
use crate::skills::Skill;

const TOP_SKILLS: usize = 5;
const TOP_LOCATIONS: usize = 5;
const TOP_MATCHES: usize = 6;
const LISTED_STUDENTS: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRow {
    pub id: String,
    pub name: String,
    pub major: String,
    pub job_search_status: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub generated_on: NaiveDate,
    pub total_students: usize,
    pub filtered_students: usize,
    pub majors: Vec<String>,
    pub job_levels: Vec<String>,
    pub top_skills: Vec<SkillShare>,
    pub work_modes: Vec<DistributionBucket>,
    pub job_search_statuses: Vec<DistributionBucket>,
    pub top_locations: Vec<DistributionBucket>,
    pub salary_bands: Histogram,
    pub salary_distribution: Histogram,
    pub students: Vec<StudentRow>,
}

/// Career-services overview. Aggregates cover the whole roster; the student
/// list reflects `query`.
pub fn summarize_dashboard(
    students: &[StudentRecord],
    query: &StudentQuery,
    generated_on: NaiveDate,
) -> DashboardSummary {
    let filtered = filter_students(students, query);
    let counts = count_skills(students);

    let mut locations = location_preferences(students);
    locations.truncate(TOP_LOCATIONS);

    DashboardSummary {
        generated_on,
        total_students: students.len(),
        filtered_students: filtered.len(),
        majors: majors(students),
        job_levels: job_levels(students),
        top_skills: top_skills(&counts, students.len(), TOP_SKILLS),
        work_modes: work_mode_preferences(students),
        job_search_statuses: job_search_statuses(students),
        top_locations: locations,
        salary_bands: salary_bands(students),
        salary_distribution: salary_distribution(students),
        students: filtered
            .iter()
            .take(LISTED_STUDENTS)
            .map(|student| StudentRow {
                id: student.id.clone(),
                name: student.full_name(),
                major: student.major.clone(),
                job_search_status: student.job_search_status.clone(),
                skills: student.skills_map.possessed().collect(),
            })
            .collect(),
    }
}

pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Career Services Dashboard");
    let _ = writeln!(output, "Generated on {}", summary.generated_on);
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "{} students, {} matching current filters",
        summary.total_students, summary.filtered_students
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Skills");
    if summary.total_students == 0 {
        let _ = writeln!(output, "No student data available.");
    } else {
        for share in &summary.top_skills {
            let _ = writeln!(
                output,
                "- {}: {} students ({}%)",
                share.skill.label(),
                share.count,
                share.percentage
            );
        }
    }

    write_buckets(&mut output, "Work Mode Preferences", &summary.work_modes);
    write_buckets(&mut output, "Job Search Status", &summary.job_search_statuses);
    write_buckets(&mut output, "Top Preferred Locations", &summary.top_locations);
    write_histogram(&mut output, "Expected Salary Bands", &summary.salary_bands);
    write_histogram(&mut output, "Expected Salary Distribution", &summary.salary_distribution);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Students");
    if summary.students.is_empty() {
        let _ = writeln!(output, "No students match the current filters.");
    } else {
        for row in &summary.students {
            let shown: Vec<String> = row.skills.iter().take(3).map(|skill| skill.label()).collect();
            let extra = row.skills.len().saturating_sub(shown.len());
            let mut skills = shown.join(", ");
            if extra > 0 {
                let _ = write!(skills, " +{extra} more");
            }
            let _ = writeln!(
                output,
                "- [{}] {} ({}, {}): {}",
                row.id,
                row.name,
                or_dash(&row.major),
                or_dash(&row.job_search_status),
                or_dash(&skills)
            );
        }
        if summary.filtered_students > summary.students.len() {
            let _ = writeln!(
                output,
                "Showing {} of {} students",
                summary.students.len(),
                summary.filtered_students
            );
        }
    }

    output
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile<'a> {
    pub student: &'a StudentRecord,
    pub skill_count: usize,
    pub category_scores: Vec<CategoryScore>,
    pub job_matches: Vec<MatchResult<'a>>,
    pub certification_matches: Vec<MatchResult<'a>>,
    pub skills_to_develop: Vec<Skill>,
}

pub fn summarize_student<'a>(
    student: &'a StudentRecord,
    jobs: &'a [RoleCatalogEntry],
    certifications: &'a [RoleCatalogEntry],
) -> StudentProfile<'a> {
    let mut job_matches = suggest(student, jobs);
    job_matches.truncate(TOP_MATCHES);
    let mut certification_matches = suggest(student, certifications);
    certification_matches.truncate(TOP_MATCHES);

    let mut skills_to_develop: Vec<Skill> = Vec::new();
    for result in job_matches.iter().take(3) {
        for skill in result.missing_skills() {
            if !skills_to_develop.contains(&skill) {
                skills_to_develop.push(skill);
            }
        }
    }

    StudentProfile {
        student,
        skill_count: student.skills_map.count(),
        category_scores: category_scores(&student.skills_map),
        job_matches,
        certification_matches,
        skills_to_develop,
    }
}

pub fn render_student(profile: &StudentProfile<'_>) -> String {
    let student = profile.student;
    let mut output = String::new();

    let _ = writeln!(output, "# {}", student.full_name());
    let _ = writeln!(output, "{}", or_dash(&student.email));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Profile");
    let _ = writeln!(output, "- Education: {}", or_dash(&student.education_level));
    let _ = writeln!(output, "- Major: {}", or_dash(&student.major));
    let _ = writeln!(output, "- Experience: {} years", student.years_of_experience);
    let _ = writeln!(output, "- Looking for: {}", or_dash(&student.job_level));
    let _ = writeln!(output, "- Work mode: {}", or_dash(&student.work_mode_preference));
    let _ = writeln!(output, "- Job search: {}", or_dash(&student.job_search_status));
    let _ = writeln!(output, "- Expected salary: ${}", student.expected_salary);
    let locations: Vec<&str> = student
        .preferred_locations()
        .into_iter()
        .filter(|location| !location.is_empty())
        .collect();
    let _ = writeln!(output, "- Preferred locations: {}", or_dash(&locations.join(", ")));

    let _ = writeln!(output);
    let _ = writeln!(output, "## Skills ({})", profile.skill_count);
    for score in &profile.category_scores {
        let _ = writeln!(output, "- {}: {:.0}%", score.label, score.score);
    }

    write_matches(&mut output, "Job Matches", &profile.job_matches);
    write_matches(&mut output, "Certification Matches", &profile.certification_matches);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Skills to Develop");
    if profile.skills_to_develop.is_empty() {
        let _ = writeln!(output, "Every skill for the top roles is already covered.");
    } else {
        let labels: Vec<String> = profile.skills_to_develop.iter().map(|skill| skill.label()).collect();
        let _ = writeln!(output, "{}", labels.join(", "));
    }

    output
}

fn write_matches(output: &mut String, title: &str, matches: &[MatchResult<'_>]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {title}");
    if matches.is_empty() {
        let _ = writeln!(output, "No catalog entries to compare against.");
        return;
    }
    for result in matches {
        let code = result
            .entry
            .labor_code
            .as_deref()
            .map(|code| format!(" [{code}]"))
            .unwrap_or_default();
        let matched: Vec<String> = result.matching_skills.iter().map(|skill| skill.label()).collect();
        let _ = writeln!(
            output,
            "- {}{}: {}% match ({})",
            result.entry.title,
            code,
            result.percent(),
            or_dash(&matched.join(", "))
        );
    }
}

fn write_buckets(output: &mut String, title: &str, buckets: &[DistributionBucket]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {title}");
    if buckets.is_empty() {
        let _ = writeln!(output, "No data.");
        return;
    }
    for bucket in buckets {
        let _ = writeln!(output, "- {}: {}", bucket.label, bucket.count);
    }
}

fn write_histogram(output: &mut String, title: &str, histogram: &Histogram) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {title}");
    if histogram.included == 0 {
        let _ = writeln!(output, "No salary data.");
        return;
    }
    for bucket in &histogram.buckets {
        let _ = writeln!(
            output,
            "- {}: {} ({}%)",
            bucket.label,
            bucket.count,
            bucket.percentage.unwrap_or(0)
        );
    }
    if histogram.non_positive > 0 {
        let _ = writeln!(output, "{} students gave no salary", histogram.non_positive);
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FieldFilter;
    use crate::matching::{certification_catalog, job_catalog};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn roster() -> Vec<StudentRecord> {
        vec![
            StudentRecord {
                id: "1".to_string(),
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                major: "Computer Science".to_string(),
                work_mode_preference: "Remote".to_string(),
                preferred_location_1: "Austin".to_string(),
                expected_salary: 60_000,
                skills_map: [Skill::Java, Skill::Git, Skill::Python, Skill::JavaScript]
                    .into_iter()
                    .collect(),
                ..StudentRecord::default()
            },
            StudentRecord {
                id: "2".to_string(),
                first_name: "Ana".to_string(),
                last_name: "Ruiz".to_string(),
                major: "Biology".to_string(),
                preferred_location_1: "Austin".to_string(),
                preferred_location_2: "Denver".to_string(),
                ..StudentRecord::default()
            },
        ]
    }

    #[test]
    fn dashboard_aggregates_whole_roster_and_lists_filtered() {
        let students = roster();
        let query = StudentQuery {
            major: FieldFilter::Equals("Biology".to_string()),
            ..StudentQuery::default()
        };

        let summary = summarize_dashboard(&students, &query, day());
        assert_eq!(summary.total_students, 2);
        assert_eq!(summary.filtered_students, 1);
        assert_eq!(summary.students[0].name, "Ana Ruiz");
        assert_eq!(summary.majors, vec!["Computer Science", "Biology"]);
        assert_eq!(summary.top_locations[0].label, "Austin");
        assert_eq!(summary.top_locations[0].count, 2);
        assert_eq!(summary.top_skills[0].percentage, 50);
        assert_eq!(summary.salary_bands.included, 1);
        assert_eq!(summary.salary_bands.non_positive, 1);

        let rendered = render_dashboard(&summary);
        assert!(rendered.contains("# Career Services Dashboard"));
        assert!(rendered.contains("2 students, 1 matching current filters"));
        assert!(rendered.contains("- Remote: 1"));
        assert!(rendered.contains("- Not Specified: 1"));
        assert!(rendered.contains("- 50k-75k: 1 (100%)"));
    }

    #[test]
    fn empty_roster_renders_without_data() {
        let summary = summarize_dashboard(&[], &StudentQuery::default(), day());
        assert_eq!(summary.total_students, 0);
        assert!(summary.salary_distribution.buckets.is_empty());

        let rendered = render_dashboard(&summary);
        assert!(rendered.contains("No student data available."));
        assert!(rendered.contains("No salary data."));
        assert!(rendered.contains("No students match the current filters."));
    }

    #[test]
    fn student_list_shows_extra_skill_count() {
        let summary = summarize_dashboard(&roster(), &StudentQuery::default(), day());
        let rendered = render_dashboard(&summary);
        assert!(rendered.contains("+1 more"));
    }

    #[test]
    fn student_profile_ranks_matches() {
        let students = roster();
        let jobs = job_catalog();
        let certs = certification_catalog();

        let profile = summarize_student(&students[0], &jobs, &certs);
        assert_eq!(profile.skill_count, 4);
        assert_eq!(profile.job_matches.len(), 6);
        assert_eq!(profile.job_matches[0].entry.title, "Software Developer");
        assert_eq!(profile.job_matches[0].percent(), 80);
        assert_eq!(
            profile.certification_matches[0].entry.title,
            "Oracle Certified Professional, Java SE Programmer"
        );
        assert!(profile.skills_to_develop.contains(&Skill::DataStructuresAlgorithms));

        let rendered = render_student(&profile);
        assert!(rendered.contains("# John Doe"));
        assert!(rendered.contains("- Software Developer [15-1252]: 80% match"));
        assert!(rendered.contains("- Programming: 60%"));
    }

    #[test]
    fn profile_serializes_to_json() {
        let students = roster();
        let jobs = job_catalog();
        let certs = certification_catalog();
        let profile = summarize_student(&students[1], &jobs, &certs);

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["skillCount"], 0);
        assert_eq!(value["jobMatches"][0]["matchScore"], 0.0);
        assert_eq!(value["jobMatches"][0]["entry"]["requiredSkills"][0], "Java");
        assert_eq!(value["categoryScores"][0]["label"], "Programming");
        assert_eq!(value["student"]["firstName"], "Ana");
        assert!(value.get("job_matches").is_none());
    }

    #[test]
    fn dashboard_serializes_with_camel_case_keys() {
        let summary = summarize_dashboard(&roster(), &StudentQuery::default(), day());
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["totalStudents"], 2);
        assert_eq!(value["topSkills"][0]["skill"], "Java");
        assert_eq!(value["salaryBands"]["nonPositive"], 1);
        assert_eq!(value["students"][0]["jobSearchStatus"], "");
        assert!(value.get("total_students").is_none());
    }
}
