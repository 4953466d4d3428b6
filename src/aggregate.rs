use std::collections::BTreeMap;

use crate::distribution::percentage;
use crate::models::{CategoryScore, SkillShare, StudentRecord};
use crate::skills::{Skill, SkillCategory, SkillMap};

/// Per-skill totals, keyed in vocabulary order.
pub type SkillCounts = BTreeMap<Skill, usize>;

/// Number of students holding each skill. Every vocabulary skill is present,
/// zero when nobody has it.
pub fn count_skills(students: &[StudentRecord]) -> SkillCounts {
    let mut counts: SkillCounts = Skill::ALL.iter().map(|skill| (*skill, 0)).collect();

    for student in students {
        for skill in student.skills_map.possessed() {
            *counts.entry(skill).or_insert(0) += 1;
        }
    }

    counts
}

/// Skills ranked by holder count, ties in vocabulary order, each with its
/// share of `total_students`.
pub fn top_skills(counts: &SkillCounts, total_students: usize, limit: usize) -> Vec<SkillShare> {
    let mut ranked: Vec<(Skill, usize)> = counts.iter().map(|(skill, count)| (*skill, *count)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(limit)
        .map(|(skill, count)| SkillShare {
            skill,
            count,
            percentage: percentage(count, total_students),
        })
        .collect()
}

/// Percentage of each category's skills held, 0 to 100.
pub fn category_scores(skills: &SkillMap) -> Vec<CategoryScore> {
    SkillCategory::ALL
        .iter()
        .map(|category| {
            let members = category.skills();
            let held = members.iter().filter(|skill| skills.has(**skill)).count();
            let score = if members.is_empty() {
                0.0
            } else {
                held as f64 / members.len() as f64 * 100.0
            };
            CategoryScore {
                category: *category,
                label: category.label(),
                score,
            }
        })
        .collect()
}
