//! Startup reconciliation: legacy-project migration and the per-collection
//! merge of persisted records against the seed dataset.
//!
//! The four collections deliberately use different precedence rules, each
//! matching how its data is maintained:
//!
//! - Users/Projects: identity fields (name, role, client) come from the
//!   seed so they can be corrected centrally; accumulated fields (project
//!   assignments, logs, progress, local edits) come from the persisted
//!   copy.
//! - Gems: curated catalog, seed always wins on an id collision.
//! - Tools: administrator-customized, persisted always wins.
//!
//! Records that exist only on one side are always retained. These rules
//! must not be unified into one.

use std::collections::HashSet;

use crate::core::model::{Gem, Project, Repository, RepositoryKind, Tool, User};

const GITHUB_ALIAS: &str = "Repositorio Principal";
const DRIVE_ALIAS: &str = "Carpeta Principal";

/// Backfill `repositories` on a legacy project record from its standalone
/// `githubLink`/`driveLink` fields, github entry first.
///
/// A record that already carries a `repositories` field, even an empty one,
/// is left untouched; presence of the field is what marks a record as
/// migrated, which makes this pass idempotent. The legacy fields themselves
/// are kept readable forever, so old blobs keep loading no matter how many
/// deploys ago they were written.
pub fn migrate_project(project: &mut Project) {
    if project.repositories.is_some() {
        return;
    }
    let mut repositories = Vec::new();
    if let Some(url) = project.github_link.as_deref().filter(|u| !u.is_empty()) {
        repositories.push(Repository {
            id: format!("r_gh_{}", project.id),
            kind: RepositoryKind::Github,
            alias: GITHUB_ALIAS.to_string(),
            url: url.to_string(),
        });
    }
    if let Some(url) = project.drive_link.as_deref().filter(|u| !u.is_empty()) {
        repositories.push(Repository {
            id: format!("r_dr_{}", project.id),
            kind: RepositoryKind::Drive,
            alias: DRIVE_ALIAS.to_string(),
            url: url.to_string(),
        });
    }
    project.repositories = Some(repositories);
}

/// Union of `base` and `extra`, first occurrence wins, order preserved.
fn dedup_union(base: Vec<String>, extra: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(base.len() + extra.len());
    for id in base.into_iter().chain(extra.iter().cloned()) {
        if seen.insert(id.clone()) {
            out.push(id);
        }
    }
    out
}

/// Users: seed wins on `name`/`role`, `projects` is the deduplicated union,
/// everything else (email, avatar, skills, password) keeps local edits.
pub fn merge_users(seed: &[User], persisted: Vec<User>) -> Vec<User> {
    let persisted_ids: HashSet<String> = persisted.iter().map(|u| u.id.clone()).collect();
    let mut merged: Vec<User> = persisted
        .into_iter()
        .map(|mut local| {
            if let Some(base) = seed.iter().find(|u| u.id == local.id) {
                local.name = base.name.clone();
                local.role = base.role;
                local.projects = dedup_union(local.projects, &base.projects);
            }
            local
        })
        .collect();
    merged.extend(seed.iter().filter(|u| !persisted_ids.contains(&u.id)).cloned());
    merged
}

/// Projects: seed wins on `name`/`client`, `team_ids` is the deduplicated
/// union, `repositories` keeps the persisted list unless it is empty, the
/// rest (status, progress, logs, dates, description) keeps local edits.
pub fn merge_projects(seed: &[Project], persisted: Vec<Project>) -> Vec<Project> {
    let persisted_ids: HashSet<String> = persisted.iter().map(|p| p.id.clone()).collect();
    let mut merged: Vec<Project> = persisted
        .into_iter()
        .map(|mut local| {
            if let Some(base) = seed.iter().find(|p| p.id == local.id) {
                local.name = base.name.clone();
                local.client = base.client.clone();
                local.team_ids = dedup_union(local.team_ids, &base.team_ids);
                if local.repos().is_empty() {
                    local.repositories = base.repositories.clone();
                }
            }
            local
        })
        .collect();
    merged.extend(seed.iter().filter(|p| !persisted_ids.contains(&p.id)).cloned());
    merged
}

/// Gems: the seed catalog always overwrites a persisted gem with the same
/// id; gems the user created themselves are retained.
pub fn merge_gems(seed: &[Gem], persisted: Vec<Gem>) -> Vec<Gem> {
    let seed_ids: HashSet<&str> = seed.iter().map(|g| g.id.as_str()).collect();
    let mut merged = seed.to_vec();
    merged.extend(persisted.into_iter().filter(|g| !seed_ids.contains(g.id.as_str())));
    merged
}

/// Tools: the persisted copy always wins; seed entries only fill in ids the
/// user does not have yet.
pub fn merge_tools(seed: &[Tool], persisted: Vec<Tool>) -> Vec<Tool> {
    let persisted_ids: HashSet<String> = persisted.iter().map(|t| t.id.clone()).collect();
    let mut merged = persisted;
    merged.extend(seed.iter().filter(|t| !persisted_ids.contains(&t.id)).cloned());
    merged
}
