use async_trait::async_trait;

use crate::core::Result;

/// Versioned storage keys. Bumping a version suffix is the supported way to
/// force every client to discard its persisted copy and re-derive the
/// collection from seed + migration on next start.
pub const USERS_KEY: &str = "portal_users_v2";
pub const PROJECTS_KEY: &str = "portal_projects_v2";
pub const GEMS_KEY: &str = "portal_gems_v1";
pub const TOOLS_KEY: &str = "portal_tools_v1";

/// Durable key-value text store the portal persists its snapshots into.
///
/// `get` returns `None` for an absent key; `set` replaces the whole value
/// for the key (full-snapshot overwrite, last writer wins).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
