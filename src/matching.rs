use std::cmp::Ordering;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::StudentRecord;
use crate::skills::Skill;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    Job,
    Certification,
}

/// A job role or certification and the skills it calls for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCatalogEntry {
    pub kind: RoleKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labor_code: Option<String>,
    pub required_skills: Vec<Skill>,
}

impl RoleCatalogEntry {
    /// Duplicate skills are dropped, first occurrence wins.
    pub fn new(kind: RoleKind, title: &str, description: &str, required_skills: &[Skill]) -> Self {
        let mut unique: Vec<Skill> = Vec::with_capacity(required_skills.len());
        for skill in required_skills {
            if !unique.contains(skill) {
                unique.push(*skill);
            }
        }

        Self {
            kind,
            title: title.to_string(),
            description: description.to_string(),
            labor_code: None,
            required_skills: unique,
        }
    }

    /// Builds an entry from skill column names, rejecting unknown names and
    /// an empty skill list.
    pub fn from_columns(
        kind: RoleKind,
        title: &str,
        description: &str,
        columns: &[&str],
    ) -> Result<Self> {
        let skills = columns
            .iter()
            .map(|column| column.parse::<Skill>())
            .collect::<Result<Vec<_>>>()?;
        if skills.is_empty() {
            return Err(Error::EmptyCatalogEntry(title.to_string()));
        }
        Ok(Self::new(kind, title, description, &skills))
    }

    pub fn with_labor_code(mut self, code: &str) -> Self {
        self.labor_code = Some(code.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult<'a> {
    pub entry: &'a RoleCatalogEntry,
    pub match_score: f64,
    pub matching_skills: Vec<Skill>,
}

impl MatchResult<'_> {
    /// Required skills the student does not yet have, in catalog order.
    pub fn missing_skills(&self) -> Vec<Skill> {
        self.entry
            .required_skills
            .iter()
            .copied()
            .filter(|skill| !self.matching_skills.contains(skill))
            .collect()
    }

    pub fn percent(&self) -> u32 {
        (self.match_score * 100.0).round() as u32
    }
}

/// Scores one student against every catalog entry, in catalog order.
pub fn score<'a>(student: &StudentRecord, catalog: &'a [RoleCatalogEntry]) -> Vec<MatchResult<'a>> {
    catalog
        .iter()
        .map(|entry| score_entry(student, entry))
        .collect()
}

pub fn score_entry<'a>(student: &StudentRecord, entry: &'a RoleCatalogEntry) -> MatchResult<'a> {
    let matching_skills: Vec<Skill> = entry
        .required_skills
        .iter()
        .copied()
        .filter(|skill| student.has_skill(*skill))
        .collect();

    let match_score = if entry.required_skills.is_empty() {
        0.0
    } else {
        matching_skills.len() as f64 / entry.required_skills.len() as f64
    };

    MatchResult {
        entry,
        match_score,
        matching_skills,
    }
}

fn by_score_desc(a: &MatchResult<'_>, b: &MatchResult<'_>) -> Ordering {
    b.match_score
        .partial_cmp(&a.match_score)
        .unwrap_or(Ordering::Equal)
}

/// Highest score first. The sort is stable, so equal scores keep catalog order.
pub fn rank(mut results: Vec<MatchResult<'_>>) -> Vec<MatchResult<'_>> {
    results.sort_by(by_score_desc);
    results
}

pub fn suggest<'a>(student: &StudentRecord, catalog: &'a [RoleCatalogEntry]) -> Vec<MatchResult<'a>> {
    rank(score(student, catalog))
}

/// A student scored against a single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate<'s, 'c> {
    pub student: &'s StudentRecord,
    pub result: MatchResult<'c>,
}

/// Students ordered by how well they fit `entry`, best first. Equal scores
/// keep roster order.
pub fn rank_candidates<'s, 'c>(
    students: &'s [StudentRecord],
    entry: &'c RoleCatalogEntry,
) -> Vec<Candidate<'s, 'c>> {
    let mut candidates: Vec<Candidate<'s, 'c>> = students
        .iter()
        .map(|student| Candidate {
            student,
            result: score_entry(student, entry),
        })
        .collect();
    candidates.sort_by(|a, b| by_score_desc(&a.result, &b.result));
    candidates
}

pub fn find_entry<'c>(catalog: &'c [RoleCatalogEntry], title: &str) -> Option<&'c RoleCatalogEntry> {
    catalog
        .iter()
        .find(|entry| entry.title.eq_ignore_ascii_case(title))
}

pub fn job_catalog() -> Vec<RoleCatalogEntry> {
    use Skill::*;

    vec![
        RoleCatalogEntry::new(
            RoleKind::Job,
            "Software Developer",
            "Develops applications using programming languages and software development practices.",
            &[Java, Python, JavaScript, Git, DataStructuresAlgorithms],
        )
        .with_labor_code("15-1252"),
        RoleCatalogEntry::new(
            RoleKind::Job,
            "Data Scientist",
            "Analyzes and interprets complex data to help organizations make better decisions.",
            &[Python, RLanguage, AiMachineLearning, DataScience, BigData],
        )
        .with_labor_code("15-2051"),
        RoleCatalogEntry::new(
            RoleKind::Job,
            "Cloud Engineer",
            "Designs, implements, and manages cloud-based systems and infrastructure.",
            &[CloudDevOps, NetworkingSecurity, OperatingSystems],
        )
        .with_labor_code("15-1241"),
        RoleCatalogEntry::new(
            RoleKind::Job,
            "Cybersecurity Analyst",
            "Protects computer systems and networks from information disclosure or theft.",
            &[Cybersecurity, NetworkingSecurity, ItSecurityCompliance],
        )
        .with_labor_code("15-1212"),
        RoleCatalogEntry::new(
            RoleKind::Job,
            "Web Developer",
            "Creates and maintains websites and web applications.",
            &[JavaScript, WebDevelopment, Git],
        )
        .with_labor_code("15-1254"),
        RoleCatalogEntry::new(
            RoleKind::Job,
            "Business Analyst",
            "Analyzes business needs and processes to recommend improvements.",
            &[
                BusinessAnalyst,
                DataAnalyticsVisualization,
                ProjectManagementCollaborationTools,
            ],
        )
        .with_labor_code("13-1111"),
        RoleCatalogEntry::new(
            RoleKind::Job,
            "Database Administrator",
            "Manages and secures an organization's databases.",
            &[DatabaseManagement, DataBackupRecovery, DataGovernanceQuality],
        )
        .with_labor_code("15-1242"),
        RoleCatalogEntry::new(
            RoleKind::Job,
            "IT Support Specialist",
            "Provides technical assistance and support for computer systems and software.",
            &[ItSupportHelpdesk, OperatingSystems, NetworkingSecurity],
        )
        .with_labor_code("15-1232"),
    ]
}

pub fn certification_catalog() -> Vec<RoleCatalogEntry> {
    use Skill::*;

    let cert = |title: &str, description: &str, skills: &[Skill]| {
        RoleCatalogEntry::new(RoleKind::Certification, title, description, skills)
    };

    vec![
        cert(
            "AWS Certified Solutions Architect",
            "Validates expertise in designing distributed systems on AWS.",
            &[CloudDevOps],
        ),
        cert(
            "CompTIA Security+",
            "Establishes the core knowledge required for cybersecurity roles.",
            &[Cybersecurity, ItSecurityCompliance, NetworkingSecurity],
        ),
        cert(
            "Certified Information Systems Security Professional (CISSP)",
            "Advanced certification for security professionals.",
            &[Cybersecurity, ItSecurityCompliance],
        ),
        cert(
            "Microsoft Certified: Azure Developer Associate",
            "Validates skills in developing solutions using Azure services.",
            &[CloudDevOps, WebDevelopment],
        ),
        cert(
            "Certified Data Professional (CDP)",
            "Validates expertise in data management and analytics.",
            &[DataScience, BigData, DataAnalyticsVisualization],
        ),
        cert(
            "Google Professional Data Engineer",
            "Validates expertise in designing data processing systems on Google Cloud.",
            &[DataScience, BigData, CloudDevOps],
        ),
        cert(
            "Project Management Professional (PMP)",
            "Validates expertise in project management principles and practices.",
            &[ProjectManagementCollaborationTools, BusinessAnalyst],
        ),
        cert(
            "Certified ScrumMaster (CSM)",
            "Validates knowledge of Scrum framework and agile practices.",
            &[ProjectManagementCollaborationTools],
        ),
        cert(
            "Oracle Certified Professional, Java SE Programmer",
            "Validates expertise in Java programming language.",
            &[Java],
        ),
        cert(
            "Microsoft Certified: Azure AI Engineer Associate",
            "Validates skills in building AI solutions using Azure services.",
            &[AiMachineLearning, CloudDevOps],
        ),
    ]
}
