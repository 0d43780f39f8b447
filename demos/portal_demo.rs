//! End-to-end walkthrough: open a file-backed store, make a few edits and
//! show that they land on disk. Run with `cargo run --example portal_demo`;
//! a second run picks the edits back up through the merge pass.

use chrono::Local;
use portaldb::{FileStorage, PortalStore, ProjectLog, SeedData, Tool};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let storage = FileStorage::new("./portal_data");
    let mut store = PortalStore::open(storage, SeedData::builtin()).await?;

    println!(
        "working set: {} users, {} projects, {} gems, {} tools",
        store.users().len(),
        store.projects().len(),
        store.gems().len(),
        store.tools().len()
    );

    let project_id = store.projects()[0].id.clone();
    store
        .append_project_log(
            &project_id,
            ProjectLog {
                id: format!("l_demo_{}", store.projects()[0].logs.len() + 1),
                date: Local::now().date_naive(),
                text: "Entrada añadida desde el demo.".to_string(),
                author: "Demo".to_string(),
                link: None,
            },
        )
        .await?;

    store
        .add_tool(Tool {
            id: "t_demo".to_string(),
            name: "Status Page".to_string(),
            url: "https://status.nexacorp.com".to_string(),
            icon: "monitor_heart".to_string(),
            color: "#0ea5e9".to_string(),
            is_local: true,
        })
        .await?;

    let project = &store.projects()[0];
    println!("'{}' now has {} log entries", project.name, project.logs.len());
    for repo in project.repos() {
        println!("  repo {} [{:?}] -> {}", repo.alias, repo.kind, repo.url);
    }
    println!("data persisted under ./portal_data/");
    Ok(())
}
