/// Store lifecycle tests
///
/// Open/migrate/merge/persist over real storage backends.
/// Run with: cargo test --test store_lifecycle_tests
use async_trait::async_trait;
use chrono::NaiveDate;
use portaldb::{
    GEMS_KEY, Gem, KeyValueStore, MemoryStorage, PROJECTS_KEY, PortalStore, Project, ProjectLog,
    ProjectStatus, Role, SeedData, StoreError, TOOLS_KEY, Tool, USERS_KEY, User,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

fn custom_user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        role: Role::Developer,
        email: format!("{id}@nexacorp.com"),
        password: "pw".to_string(),
        avatar: String::new(),
        skills: Vec::new(),
        projects: Vec::new(),
    }
}

fn custom_project(id: &str) -> Project {
    Project {
        id: id.to_string(),
        name: format!("Project {id}"),
        client: "Acme".to_string(),
        status: ProjectStatus::Planning,
        progress: 0,
        description: String::new(),
        deadline: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        lead_id: "u1".to_string(),
        team_ids: Vec::new(),
        technologies: Vec::new(),
        logs: Vec::new(),
        repositories: Some(Vec::new()),
        drive_link: None,
        github_link: None,
    }
}

/// In-memory backend whose writes can be made to fail, to exercise the
/// error path of mutations and reset.
struct FlakyStorage {
    inner: MemoryStorage,
    fail_writes: AtomicBool,
}

impl FlakyStorage {
    fn new() -> Self {
        Self { inner: MemoryStorage::new(), fail_writes: AtomicBool::new(false) }
    }
}

#[async_trait]
impl KeyValueStore for FlakyStorage {
    async fn get(&self, key: &str) -> portaldb::Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> portaldb::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io(format!("write rejected for '{key}'")));
        }
        self.inner.set(key, value).await
    }
}

#[tokio::test]
async fn test_open_on_empty_storage_yields_seed() {
    let seed = SeedData::builtin();
    let store = PortalStore::open(MemoryStorage::new(), seed.clone()).await.unwrap();

    assert_eq!(store.users(), seed.users.as_slice());
    assert_eq!(store.projects(), seed.projects.as_slice());
    assert_eq!(store.gems(), seed.gems.as_slice());
    assert_eq!(store.tools(), seed.tools.as_slice());
}

#[tokio::test]
async fn test_open_persists_working_set_immediately() {
    let store = PortalStore::open(MemoryStorage::new(), SeedData::builtin()).await.unwrap();

    // A read-only session still writes the merged snapshot back.
    let raw = store.storage().raw(USERS_KEY).await.unwrap();
    assert!(raw.contains("Elena Vargas"));
}

#[tokio::test]
async fn test_mutations_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let storage = portaldb::FileStorage::new(dir.path());
        let mut store = PortalStore::open(storage, SeedData::builtin()).await.unwrap();
        let mut user = store.users()[0].clone();
        user.email = "edited@nexacorp.com".to_string();
        store.update_user(user).await.unwrap();
        store
            .add_tool(Tool {
                id: "t_custom".to_string(),
                name: "Custom".to_string(),
                url: String::new(),
                icon: String::new(),
                color: String::new(),
                is_local: true,
            })
            .await.unwrap();
    }

    let storage = portaldb::FileStorage::new(dir.path());
    let store = PortalStore::open(storage, SeedData::builtin()).await.unwrap();

    let u1 = store.users().iter().find(|u| u.id == "u1").unwrap();
    // Local edit kept, identity fields still governed by the seed.
    assert_eq!(u1.email, "edited@nexacorp.com");
    assert_eq!(u1.name, "Elena Vargas");
    assert!(store.tools().iter().any(|t| t.id == "t_custom"));
}

#[tokio::test]
async fn test_legacy_project_blob_migrates_and_upgrade_is_persisted() {
    let storage = MemoryStorage::new();
    storage
        .preload(
            PROJECTS_KEY,
            r#"[{
                "id": "P1",
                "name": "Legacy",
                "client": "Acme",
                "status": "In Progress",
                "progress": 40,
                "description": "old record",
                "deadline": "2024-06-30",
                "startDate": "2024-01-15",
                "leadId": "u1",
                "githubLink": "https://github.com/x/y",
                "driveLink": "https://drive.google.com/z"
            }]"#,
        )
        .await;

    let store = PortalStore::open(storage, SeedData::empty()).await.unwrap();

    let project = &store.projects()[0];
    let repos = project.repos();
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].id, "r_gh_P1");
    assert_eq!(repos[1].id, "r_dr_P1");
}

#[tokio::test]
async fn test_schema_upgrade_written_back_by_readonly_open() {
    let dir = TempDir::new().unwrap();
    let storage = portaldb::FileStorage::new(dir.path());
    storage_preload_file(dir.path(), PROJECTS_KEY).await;

    // Open and drop without mutating anything.
    PortalStore::open(storage, SeedData::empty()).await.unwrap();

    let raw = tokio::fs::read_to_string(dir.path().join(format!("{PROJECTS_KEY}.json")))
        .await
        .unwrap();
    assert!(raw.contains("\"repositories\""));
    assert!(raw.contains("r_gh_P1"));
}

async fn storage_preload_file(dir: &std::path::Path, key: &str) {
    let blob = r#"[{
        "id": "P1",
        "name": "Legacy",
        "client": "Acme",
        "status": "Planning",
        "progress": 0,
        "description": "old record",
        "deadline": "2024-06-30",
        "startDate": "2024-01-15",
        "leadId": "u1",
        "githubLink": "https://github.com/x/y"
    }]"#;
    tokio::fs::create_dir_all(dir).await.unwrap();
    tokio::fs::write(dir.join(format!("{key}.json")), blob).await.unwrap();
}

#[tokio::test]
async fn test_reset_wipes_customization() {
    let seed = SeedData::builtin();
    let mut store = PortalStore::open(MemoryStorage::new(), seed.clone()).await.unwrap();

    store.add_user(custom_user("u_extra", "Extra")).await.unwrap();
    assert!(store.users().iter().any(|u| u.id == "u_extra"));

    store.reset_to_defaults().await.unwrap();

    assert!(!store.users().iter().any(|u| u.id == "u_extra"));
    assert_eq!(store.users(), seed.users.as_slice());
}

#[tokio::test]
async fn test_update_and_delete_missing_id_are_noops() {
    let mut store = PortalStore::open(MemoryStorage::new(), SeedData::builtin()).await.unwrap();
    let users_before = store.users().to_vec();
    let projects_before = store.projects().to_vec();
    let gems_before = store.gems().to_vec();
    let tools_before = store.tools().to_vec();

    store.update_user(custom_user("nonexistent", "Ghost")).await.unwrap();
    store.update_project(custom_project("nonexistent")).await.unwrap();
    store
        .update_gem(Gem {
            id: "nonexistent".to_string(),
            name: "Ghost".to_string(),
            description: String::new(),
            url: String::new(),
            icon: String::new(),
        })
        .await.unwrap();
    store
        .update_tool(Tool {
            id: "nonexistent".to_string(),
            name: "Ghost".to_string(),
            url: String::new(),
            icon: String::new(),
            color: String::new(),
            is_local: false,
        })
        .await.unwrap();
    store.delete_user("nonexistent").await.unwrap();
    store.delete_project("nonexistent").await.unwrap();
    store.delete_gem("nonexistent").await.unwrap();
    store.delete_tool("nonexistent").await.unwrap();

    assert_eq!(store.users(), users_before.as_slice());
    assert_eq!(store.projects(), projects_before.as_slice());
    assert_eq!(store.gems(), gems_before.as_slice());
    assert_eq!(store.tools(), tools_before.as_slice());
}

#[tokio::test]
async fn test_write_failure_is_surfaced() {
    let mut store = PortalStore::open(FlakyStorage::new(), SeedData::builtin()).await.unwrap();
    store.storage().fail_writes.store(true, Ordering::SeqCst);

    assert!(matches!(
        store.add_user(custom_user("u_x", "X")).await,
        Err(StoreError::Io(_))
    ));
    assert!(matches!(
        store.append_project_log(
            "p1",
            ProjectLog {
                id: "l_x".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
                text: "x".to_string(),
                author: "x".to_string(),
                link: None,
            },
        )
        .await,
        Err(StoreError::Io(_))
    ));
    assert!(matches!(store.reset_to_defaults().await, Err(StoreError::Io(_))));

    // Writes work again once the backend recovers.
    store.storage().fail_writes.store(false, Ordering::SeqCst);
    store.reset_to_defaults().await.unwrap();
}

#[tokio::test]
async fn test_mutation_keeps_all_stored_collections_current() {
    let mut store = PortalStore::open(MemoryStorage::new(), SeedData::builtin()).await.unwrap();

    store
        .add_tool(Tool {
            id: "t_new".to_string(),
            name: "New".to_string(),
            url: String::new(),
            icon: String::new(),
            color: String::new(),
            is_local: true,
        })
        .await.unwrap();

    // Only the tools snapshot was rewritten, but every stored blob still
    // matches the working set.
    let users: Vec<User> =
        serde_json::from_str(&store.storage().raw(USERS_KEY).await.unwrap()).unwrap();
    let projects: Vec<Project> =
        serde_json::from_str(&store.storage().raw(PROJECTS_KEY).await.unwrap()).unwrap();
    let gems: Vec<Gem> =
        serde_json::from_str(&store.storage().raw(GEMS_KEY).await.unwrap()).unwrap();
    let tools: Vec<Tool> =
        serde_json::from_str(&store.storage().raw(TOOLS_KEY).await.unwrap()).unwrap();
    assert_eq!(users.as_slice(), store.users());
    assert_eq!(projects.as_slice(), store.projects());
    assert_eq!(gems.as_slice(), store.gems());
    assert_eq!(tools.as_slice(), store.tools());
}

#[tokio::test]
async fn test_append_project_log() {
    let mut store = PortalStore::open(MemoryStorage::new(), SeedData::builtin()).await.unwrap();
    let project_id = store.projects()[0].id.clone();
    let before = store.projects()[0].logs.len();

    let entry = ProjectLog {
        id: "l_new".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
        text: "Entrega parcial aprobada.".to_string(),
        author: "Sofía Reyes".to_string(),
        link: Some("https://drive.google.com/d/abc".to_string()),
    };
    store.append_project_log(&project_id, entry.clone()).await.unwrap();
    assert_eq!(store.projects()[0].logs.len(), before + 1);
    assert_eq!(*store.projects()[0].logs.last().unwrap(), entry);

    // Unknown project id: silently ignored.
    store.append_project_log("nonexistent", entry).await.unwrap();
}

#[tokio::test]
async fn test_corrupted_blob_aborts_open() {
    let storage = MemoryStorage::new();
    storage.preload(USERS_KEY, "not valid json {{").await;

    let err = PortalStore::open(storage, SeedData::builtin()).await.unwrap_err();
    match err {
        StoreError::Corrupted(key, _) => assert_eq!(key, USERS_KEY),
        other => panic!("expected Corrupted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_corrupted_blob_left_in_storage() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(format!("{USERS_KEY}.json"));
    tokio::fs::write(&path, "not valid json {{").await.unwrap();

    let storage = portaldb::FileStorage::new(dir.path());
    assert!(PortalStore::open(storage, SeedData::builtin()).await.is_err());

    // Failed open must not clobber the blob.
    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(raw, "not valid json {{");
}
