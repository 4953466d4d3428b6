//! The closed skill vocabulary.
//!
//! Each variant's column name is both the CSV header it is read from and the
//! key it is reported under, so the two must never diverge.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Skill {
    #[serde(rename = "C++")]
    Cpp,
    Java,
    Python,
    JavaScript,
    #[serde(rename = "R_Language")]
    RLanguage,
    #[serde(rename = "AI_Machine_Learning")]
    AiMachineLearning,
    #[serde(rename = "Cloud_DevOps")]
    CloudDevOps,
    #[serde(rename = "Networking_Security")]
    NetworkingSecurity,
    #[serde(rename = "GIT")]
    Git,
    #[serde(rename = "Data_Structures_Algorithms")]
    DataStructuresAlgorithms,
    #[serde(rename = "Database_Management")]
    DatabaseManagement,
    #[serde(rename = "Data_Backup_Recovery")]
    DataBackupRecovery,
    #[serde(rename = "Big_Data")]
    BigData,
    #[serde(rename = "Operating_Systems")]
    OperatingSystems,
    #[serde(rename = "Data_Analytics_Visualization")]
    DataAnalyticsVisualization,
    #[serde(rename = "Data_Collaboration")]
    DataCollaboration,
    #[serde(rename = "Data_Governance_Quality")]
    DataGovernanceQuality,
    #[serde(rename = "Data_Science")]
    DataScience,
    Cybersecurity,
    #[serde(rename = "Web_Development")]
    WebDevelopment,
    #[serde(rename = "Business_Analyst")]
    BusinessAnalyst,
    #[serde(rename = "Project_Management_and_Collaboration_Tools")]
    ProjectManagementCollaborationTools,
    #[serde(rename = "Enterprise_Systems")]
    EnterpriseSystems,
    #[serde(rename = "IT_Support_Helpdesk")]
    ItSupportHelpdesk,
    #[serde(rename = "IT_Security_Compliance")]
    ItSecurityCompliance,
    #[serde(rename = "Testing_Quality_Assurance")]
    TestingQualityAssurance,
    #[serde(rename = "Development_Tools")]
    DevelopmentTools,
}

impl Skill {
    pub const COUNT: usize = 27;

    /// Every skill, in vocabulary order.
    pub const ALL: [Skill; Skill::COUNT] = [
        Skill::Cpp,
        Skill::Java,
        Skill::Python,
        Skill::JavaScript,
        Skill::RLanguage,
        Skill::AiMachineLearning,
        Skill::CloudDevOps,
        Skill::NetworkingSecurity,
        Skill::Git,
        Skill::DataStructuresAlgorithms,
        Skill::DatabaseManagement,
        Skill::DataBackupRecovery,
        Skill::BigData,
        Skill::OperatingSystems,
        Skill::DataAnalyticsVisualization,
        Skill::DataCollaboration,
        Skill::DataGovernanceQuality,
        Skill::DataScience,
        Skill::Cybersecurity,
        Skill::WebDevelopment,
        Skill::BusinessAnalyst,
        Skill::ProjectManagementCollaborationTools,
        Skill::EnterpriseSystems,
        Skill::ItSupportHelpdesk,
        Skill::ItSecurityCompliance,
        Skill::TestingQualityAssurance,
        Skill::DevelopmentTools,
    ];

    /// The CSV header (and report key) for this skill.
    pub fn column(self) -> &'static str {
        match self {
            Skill::Cpp => "C++",
            Skill::Java => "Java",
            Skill::Python => "Python",
            Skill::JavaScript => "JavaScript",
            Skill::RLanguage => "R_Language",
            Skill::AiMachineLearning => "AI_Machine_Learning",
            Skill::CloudDevOps => "Cloud_DevOps",
            Skill::NetworkingSecurity => "Networking_Security",
            Skill::Git => "GIT",
            Skill::DataStructuresAlgorithms => "Data_Structures_Algorithms",
            Skill::DatabaseManagement => "Database_Management",
            Skill::DataBackupRecovery => "Data_Backup_Recovery",
            Skill::BigData => "Big_Data",
            Skill::OperatingSystems => "Operating_Systems",
            Skill::DataAnalyticsVisualization => "Data_Analytics_Visualization",
            Skill::DataCollaboration => "Data_Collaboration",
            Skill::DataGovernanceQuality => "Data_Governance_Quality",
            Skill::DataScience => "Data_Science",
            Skill::Cybersecurity => "Cybersecurity",
            Skill::WebDevelopment => "Web_Development",
            Skill::BusinessAnalyst => "Business_Analyst",
            Skill::ProjectManagementCollaborationTools => {
                "Project_Management_and_Collaboration_Tools"
            }
            Skill::EnterpriseSystems => "Enterprise_Systems",
            Skill::ItSupportHelpdesk => "IT_Support_Helpdesk",
            Skill::ItSecurityCompliance => "IT_Security_Compliance",
            Skill::TestingQualityAssurance => "Testing_Quality_Assurance",
            Skill::DevelopmentTools => "Development_Tools",
        }
    }

    /// Human-readable name: the column with underscores shown as spaces.
    pub fn label(self) -> String {
        self.column().replace('_', " ")
    }

    pub fn from_column(column: &str) -> Option<Skill> {
        Skill::ALL.iter().copied().find(|skill| skill.column() == column)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Skill {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skill::from_column(s).ok_or_else(|| Error::UnknownSkill(s.to_string()))
    }
}

/// One flag per vocabulary skill. Always covers the full vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkillMap {
    flags: [bool; Skill::COUNT],
}

impl SkillMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, skill: Skill) -> bool {
        self.flags[skill.index()]
    }

    pub fn set(&mut self, skill: Skill, value: bool) {
        self.flags[skill.index()] = value;
    }

    pub fn with(mut self, skill: Skill) -> Self {
        self.set(skill, true);
        self
    }

    /// All (skill, flag) pairs in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (Skill, bool)> + '_ {
        Skill::ALL.iter().map(move |skill| (*skill, self.has(*skill)))
    }

    pub fn possessed(&self) -> impl Iterator<Item = Skill> + '_ {
        self.iter().filter(|(_, has)| *has).map(|(skill, _)| skill)
    }

    pub fn missing(&self) -> impl Iterator<Item = Skill> + '_ {
        self.iter().filter(|(_, has)| !*has).map(|(skill, _)| skill)
    }

    pub fn count(&self) -> usize {
        self.flags.iter().filter(|flag| **flag).count()
    }
}

impl FromIterator<Skill> for SkillMap {
    fn from_iter<I: IntoIterator<Item = Skill>>(iter: I) -> Self {
        iter.into_iter().fold(SkillMap::new(), SkillMap::with)
    }
}

impl Serialize for SkillMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Skill::COUNT))?;
        for (skill, has) in self.iter() {
            map.serialize_entry(skill.column(), &has)?;
        }
        map.end()
    }
}

/// Coarse skill groupings used for the per-student assessment view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SkillCategory {
    Programming,
    DataScience,
    CloudDevOps,
    Security,
    Business,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 5] = [
        SkillCategory::Programming,
        SkillCategory::DataScience,
        SkillCategory::CloudDevOps,
        SkillCategory::Security,
        SkillCategory::Business,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::Programming => "Programming",
            SkillCategory::DataScience => "Data Science",
            SkillCategory::CloudDevOps => "Cloud & DevOps",
            SkillCategory::Security => "Security",
            SkillCategory::Business => "Business",
        }
    }

    pub fn skills(self) -> &'static [Skill] {
        match self {
            SkillCategory::Programming => &[
                Skill::Cpp,
                Skill::Java,
                Skill::Python,
                Skill::JavaScript,
                Skill::RLanguage,
            ],
            SkillCategory::DataScience => &[
                Skill::DataScience,
                Skill::BigData,
                Skill::DataAnalyticsVisualization,
                Skill::DatabaseManagement,
            ],
            SkillCategory::CloudDevOps => &[Skill::CloudDevOps, Skill::Git],
            SkillCategory::Security => &[
                Skill::Cybersecurity,
                Skill::ItSecurityCompliance,
                Skill::NetworkingSecurity,
            ],
            SkillCategory::Business => &[
                Skill::BusinessAnalyst,
                Skill::ProjectManagementCollaborationTools,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_order_matches_indices() {
        for (position, skill) in Skill::ALL.iter().enumerate() {
            assert_eq!(skill.index(), position);
        }
    }

    #[test]
    fn columns_round_trip() {
        for skill in Skill::ALL {
            assert_eq!(Skill::from_column(skill.column()), Some(skill));
            assert_eq!(skill.column().parse::<Skill>().ok(), Some(skill));
        }
    }

    #[test]
    fn unknown_columns_are_rejected() {
        assert!(Skill::from_column("Rust").is_none());
        assert!(Skill::from_column("python").is_none());
        assert!(matches!(
            "Cobol".parse::<Skill>(),
            Err(Error::UnknownSkill(name)) if name == "Cobol"
        ));
    }

    #[test]
    fn labels_replace_underscores() {
        assert_eq!(Skill::DataStructuresAlgorithms.label(), "Data Structures Algorithms");
        assert_eq!(Skill::Cpp.label(), "C++");
    }

    #[test]
    fn skill_map_tracks_flags() {
        let map: SkillMap = [Skill::Java, Skill::Git].into_iter().collect();
        assert!(map.has(Skill::Java));
        assert!(!map.has(Skill::Python));
        assert_eq!(map.count(), 2);
        assert_eq!(map.iter().count(), Skill::COUNT);
        assert_eq!(map.possessed().collect::<Vec<_>>(), vec![Skill::Java, Skill::Git]);
        assert_eq!(map.missing().count(), Skill::COUNT - 2);
    }

    #[test]
    fn skill_map_serializes_every_column() {
        let map = SkillMap::new().with(Skill::Python);
        let value = serde_json::to_value(map).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), Skill::COUNT);
        assert_eq!(object["Python"], serde_json::Value::Bool(true));
        assert_eq!(object["C++"], serde_json::Value::Bool(false));
    }

    #[test]
    fn serde_names_match_columns() {
        for skill in Skill::ALL {
            let value = serde_json::to_value(skill).unwrap();
            assert_eq!(value.as_str(), Some(skill.column()));
        }
    }
}
