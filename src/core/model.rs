//! Entity types for the portal working set.
//!
//! Field names on the wire are camelCase to stay compatible with the JSON
//! blobs already sitting in client storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "CEO")]
    Ceo,
    Admin,
    #[serde(rename = "Project Manager")]
    ProjectManager,
    Developer,
    Designer,
    Analyst,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// 0-100.
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub email: String,
    pub password: String,
    pub avatar: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Project id references; not enforced as foreign keys.
    #[serde(default)]
    pub projects: Vec<String>,
}

/// Status labels as they appear in stored data. The English variants are
/// legacy labels that old records may still carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "En Curso")]
    EnCurso,
    Finalizado,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
    Planning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKind {
    Github,
    Drive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RepositoryKind,
    pub alias: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLog {
    pub id: String,
    pub date: NaiveDate,
    pub text: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client: String,
    pub status: ProjectStatus,
    /// 0-100.
    pub progress: u8,
    pub description: String,
    pub deadline: NaiveDate,
    pub start_date: NaiveDate,
    /// User id reference; not enforced as a foreign key.
    pub lead_id: String,
    #[serde(default)]
    pub team_ids: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Append-only.
    #[serde(default)]
    pub logs: Vec<ProjectLog>,
    /// `None` only on legacy records that predate the repository list;
    /// migration backfills it on load, so it is always `Some` in the
    /// working set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<Repository>>,
    /// Legacy single-link fields. Old records may carry these instead of
    /// `repositories`; they stay readable indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
}

impl Project {
    /// Repository list view; empty slice for a record that migration has
    /// not touched yet.
    pub fn repos(&self) -> &[Repository] {
        self.repositories.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub url: String,
    pub icon: String,
    pub color: String,
    pub is_local: bool,
}
