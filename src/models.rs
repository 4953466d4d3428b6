use serde::Serialize;

use crate::skills::{Skill, SkillCategory, SkillMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub submission_date: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date: String,
    pub education_level: String,
    pub major: String,
    pub years_of_experience: u64,
    pub job_level: String,
    pub work_mode_preference: String,
    pub willing_to_relocate: String,
    pub preferred_location_1: String,
    pub preferred_location_2: String,
    pub preferred_location_3: String,
    pub job_search_status: String,
    pub expected_salary: u64,
    pub skills: String,
    pub gender: String,
    pub language: String,
    pub gpa: String,
    pub sponsorship: String,
    pub disability: String,
    pub open_to_mentorship: String,
    pub skills_map: SkillMap,
}

impl StudentRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn preferred_locations(&self) -> [&str; 3] {
        [
            self.preferred_location_1.as_str(),
            self.preferred_location_2.as_str(),
            self.preferred_location_3.as_str(),
        ]
    }

    pub fn has_skill(&self, skill: Skill) -> bool {
        self.skills_map.has(skill)
    }
}

/// A labelled count produced by the distribution aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionBucket {
    pub label: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillShare {
    pub skill: Skill,
    pub count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: SkillCategory,
    pub label: &'static str,
    pub score: f64,
}
