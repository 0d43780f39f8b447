use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::{Gem, Project, ProjectLog, Result, SeedData, StoreError, Tool, User};
use crate::reconcile;
use crate::storage::{GEMS_KEY, KeyValueStore, PROJECTS_KEY, TOOLS_KEY, USERS_KEY};

/// The portal's working set: four merged collections plus the storage they
/// are flushed to after every mutation.
///
/// There is no uninitialized state to misuse: a value only exists once
/// [`PortalStore::open`] has loaded, migrated, merged and re-persisted the
/// data. Mutating methods take `&mut self`, so operations on one store are
/// naturally serialized; the only suspend points are at the storage
/// boundary.
///
/// # Examples
///
/// ```
/// use portaldb::{MemoryStorage, PortalStore, SeedData};
///
/// # tokio_test::block_on(async {
/// let mut store = PortalStore::open(MemoryStorage::new(), SeedData::builtin())
///     .await
///     .unwrap();
/// assert!(!store.users().is_empty());
///
/// let mut user = store.users()[0].clone();
/// user.email = "new@nexacorp.com".to_string();
/// store.update_user(user).await.unwrap();
/// # });
/// ```
#[derive(Debug)]
pub struct PortalStore<S: KeyValueStore> {
    storage: S,
    seed: SeedData,
    users: Vec<User>,
    projects: Vec<Project>,
    gems: Vec<Gem>,
    tools: Vec<Tool>,
}

async fn load_collection<T, S>(storage: &S, key: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore,
{
    match storage.get(key).await? {
        None => Ok(Vec::new()),
        Some(text) => serde_json::from_str(&text)
            .map_err(|e| StoreError::Corrupted(key.to_string(), e.to_string())),
    }
}

impl<S: KeyValueStore> PortalStore<S> {
    /// Load persisted collections, migrate legacy project records, merge
    /// with the seed dataset and persist the merged result, so that even a
    /// session that never writes upgrades the stored schema.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::Corrupted`] if a persisted blob does not
    /// parse; the blob is left in storage untouched. Falling back to an
    /// empty collection here would re-persist over the user's data on the
    /// next write. Storage failures surface as [`StoreError::Io`].
    pub async fn open(storage: S, seed: SeedData) -> Result<Self> {
        let persisted_users: Vec<User> = load_collection(&storage, USERS_KEY).await?;
        let mut persisted_projects: Vec<Project> = load_collection(&storage, PROJECTS_KEY).await?;
        let persisted_gems: Vec<Gem> = load_collection(&storage, GEMS_KEY).await?;
        let persisted_tools: Vec<Tool> = load_collection(&storage, TOOLS_KEY).await?;

        for project in &mut persisted_projects {
            reconcile::migrate_project(project);
        }

        let mut store = Self {
            users: reconcile::merge_users(&seed.users, persisted_users),
            projects: reconcile::merge_projects(&seed.projects, persisted_projects),
            gems: reconcile::merge_gems(&seed.gems, persisted_gems),
            tools: reconcile::merge_tools(&seed.tools, persisted_tools),
            storage,
            seed,
        };
        store.persist_all().await?;
        info!(
            "portal store ready: {} users, {} projects, {} gems, {} tools",
            store.users.len(),
            store.projects.len(),
            store.gems.len(),
            store.tools.len()
        );
        Ok(store)
    }

    /// The underlying storage, e.g. to inspect raw blobs.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    async fn persist<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let text =
            serde_json::to_string(items).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.storage.set(key, &text).await?;
        debug!("persisted {} records under '{key}'", items.len());
        Ok(())
    }

    /// No rollback across collections: a failure mid-way leaves the
    /// collections written so far in place.
    async fn persist_all(&mut self) -> Result<()> {
        self.persist(USERS_KEY, &self.users).await?;
        self.persist(PROJECTS_KEY, &self.projects).await?;
        self.persist(GEMS_KEY, &self.gems).await?;
        self.persist(TOOLS_KEY, &self.tools).await?;
        Ok(())
    }

    /// Discard every local customization and re-seed all four collections.
    /// Destructive; there is no undo.
    pub async fn reset_to_defaults(&mut self) -> Result<()> {
        self.users = self.seed.users.clone();
        self.projects = self.seed.projects.clone();
        self.gems = self.seed.gems.clone();
        self.tools = self.seed.tools.clone();
        self.persist_all().await?;
        info!("portal store reset to seed defaults");
        Ok(())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub async fn add_user(&mut self, user: User) -> Result<()> {
        self.users.push(user);
        self.persist(USERS_KEY, &self.users).await
    }

    /// Replace the user with the same id. Unknown ids are ignored.
    pub async fn update_user(&mut self, user: User) -> Result<()> {
        let Some(slot) = self.users.iter_mut().find(|u| u.id == user.id) else {
            warn!("update_user: id '{}' not found, ignoring", user.id);
            return Ok(());
        };
        *slot = user;
        self.persist(USERS_KEY, &self.users).await
    }

    /// Remove the user with this id. Unknown ids are ignored.
    pub async fn delete_user(&mut self, id: &str) -> Result<()> {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        if self.users.len() == before {
            warn!("delete_user: id '{id}' not found, ignoring");
            return Ok(());
        }
        self.persist(USERS_KEY, &self.users).await
    }

    // ========================================================================
    // Projects
    // ========================================================================

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub async fn add_project(&mut self, project: Project) -> Result<()> {
        self.projects.push(project);
        self.persist(PROJECTS_KEY, &self.projects).await
    }

    pub async fn update_project(&mut self, project: Project) -> Result<()> {
        let Some(slot) = self.projects.iter_mut().find(|p| p.id == project.id) else {
            warn!("update_project: id '{}' not found, ignoring", project.id);
            return Ok(());
        };
        *slot = project;
        self.persist(PROJECTS_KEY, &self.projects).await
    }

    pub async fn delete_project(&mut self, id: &str) -> Result<()> {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == before {
            warn!("delete_project: id '{id}' not found, ignoring");
            return Ok(());
        }
        self.persist(PROJECTS_KEY, &self.projects).await
    }

    /// Append an entry to a project's log. Unknown project ids are ignored.
    pub async fn append_project_log(&mut self, project_id: &str, entry: ProjectLog) -> Result<()> {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            warn!("append_project_log: project '{project_id}' not found, ignoring");
            return Ok(());
        };
        project.logs.push(entry);
        self.persist(PROJECTS_KEY, &self.projects).await
    }

    // ========================================================================
    // Gems
    // ========================================================================

    pub fn gems(&self) -> &[Gem] {
        &self.gems
    }

    pub async fn add_gem(&mut self, gem: Gem) -> Result<()> {
        self.gems.push(gem);
        self.persist(GEMS_KEY, &self.gems).await
    }

    pub async fn update_gem(&mut self, gem: Gem) -> Result<()> {
        let Some(slot) = self.gems.iter_mut().find(|g| g.id == gem.id) else {
            warn!("update_gem: id '{}' not found, ignoring", gem.id);
            return Ok(());
        };
        *slot = gem;
        self.persist(GEMS_KEY, &self.gems).await
    }

    pub async fn delete_gem(&mut self, id: &str) -> Result<()> {
        let before = self.gems.len();
        self.gems.retain(|g| g.id != id);
        if self.gems.len() == before {
            warn!("delete_gem: id '{id}' not found, ignoring");
            return Ok(());
        }
        self.persist(GEMS_KEY, &self.gems).await
    }

    // ========================================================================
    // Tools
    // ========================================================================

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub async fn add_tool(&mut self, tool: Tool) -> Result<()> {
        self.tools.push(tool);
        self.persist(TOOLS_KEY, &self.tools).await
    }

    pub async fn update_tool(&mut self, tool: Tool) -> Result<()> {
        let Some(slot) = self.tools.iter_mut().find(|t| t.id == tool.id) else {
            warn!("update_tool: id '{}' not found, ignoring", tool.id);
            return Ok(());
        };
        *slot = tool;
        self.persist(TOOLS_KEY, &self.tools).await
    }

    pub async fn delete_tool(&mut self, id: &str) -> Result<()> {
        let before = self.tools.len();
        self.tools.retain(|t| t.id != id);
        if self.tools.len() == before {
            warn!("delete_tool: id '{id}' not found, ignoring");
            return Ok(());
        }
        self.persist(TOOLS_KEY, &self.tools).await
    }
}
