// ============================================================================
// PortalDB Library
// ============================================================================
//
// Persistence core for a corporate intranet portal. On every start the
// store loads the persisted collections from a key-value store, migrates
// legacy project records to the repository-list schema, merges them with
// the builtin seed dataset and persists the result; afterwards it serves
// async CRUD over the in-memory working set, flushing the affected
// collection after each mutation.

pub mod core;
pub mod facade;
pub mod reconcile;
pub mod storage;

// Re-export main types for convenience
pub use crate::core::{
    DEFAULT_PASSWORD, Gem, Project, ProjectLog, ProjectStatus, Repository, RepositoryKind, Result,
    Role, SeedData, Skill, StoreError, Tool, User,
};
pub use crate::facade::PortalStore;
pub use crate::storage::{
    FileStorage, GEMS_KEY, KeyValueStore, MemoryStorage, PROJECTS_KEY, TOOLS_KEY, USERS_KEY,
};
