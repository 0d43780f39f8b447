//! Builtin baseline dataset.
//!
//! Shipped with every build and re-supplied on each start; the reconcile
//! pass decides, per collection, how it combines with locally persisted
//! records. Identity fields edited here (user name/role, project
//! name/client) propagate to existing installs without wiping local data.

use chrono::NaiveDate;

use crate::core::model::{
    Gem, Project, ProjectLog, ProjectStatus, Repository, RepositoryKind, Role, Skill, Tool, User,
};

/// Fallback password for seed accounts that were never customized.
pub const DEFAULT_PASSWORD: &str = "1234";

#[derive(Debug, Clone)]
pub struct SeedData {
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub gems: Vec<Gem>,
    pub tools: Vec<Tool>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn user(id: &str, name: &str, role: Role, email: &str, skills: Vec<Skill>, projects: Vec<&str>) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        role,
        email: email.to_string(),
        password: DEFAULT_PASSWORD.to_string(),
        avatar: format!("https://i.pravatar.cc/150?u={id}"),
        skills,
        projects: projects.into_iter().map(str::to_string).collect(),
    }
}

fn skill(name: &str, level: u8) -> Skill {
    Skill { name: name.to_string(), level }
}

impl SeedData {
    /// The hardcoded baseline collections.
    pub fn builtin() -> Self {
        Self {
            users: vec![
                user("u1", "Elena Vargas", Role::Ceo, "elena@nexacorp.com", vec![skill("Estrategia", 95), skill("Finanzas", 85)], vec!["p1", "p2"]),
                user("u2", "Marcos Gil", Role::Admin, "marcos@nexacorp.com", vec![skill("Infraestructura", 90)], vec![]),
                user("u3", "Sofía Reyes", Role::ProjectManager, "sofia@nexacorp.com", vec![skill("Scrum", 88), skill("Jira", 92)], vec!["p1"]),
                user("u4", "David Luna", Role::Developer, "david@nexacorp.com", vec![skill("Rust", 80), skill("TypeScript", 75)], vec!["p1", "p2"]),
                user("u5", "Carla Mendoza", Role::Designer, "carla@nexacorp.com", vec![skill("Figma", 94)], vec!["p2"]),
                user("u6", "Javier Soto", Role::Analyst, "javier@nexacorp.com", vec![skill("SQL", 86), skill("Power BI", 78)], vec![]),
            ],
            projects: vec![
                Project {
                    id: "p1".to_string(),
                    name: "Portal Clientes 2.0".to_string(),
                    client: "Banco Andino".to_string(),
                    status: ProjectStatus::EnCurso,
                    progress: 65,
                    description: "Rediseño completo del portal de banca para clientes corporativos.".to_string(),
                    deadline: date(2025, 11, 30),
                    start_date: date(2025, 2, 10),
                    lead_id: "u3".to_string(),
                    team_ids: vec!["u3".to_string(), "u4".to_string()],
                    technologies: vec!["React".to_string(), "Rust".to_string(), "PostgreSQL".to_string()],
                    logs: vec![ProjectLog {
                        id: "l1".to_string(),
                        date: date(2025, 2, 10),
                        text: "Kickoff con el cliente.".to_string(),
                        author: "Sofía Reyes".to_string(),
                        link: None,
                    }],
                    repositories: Some(vec![Repository {
                        id: "r_gh_p1".to_string(),
                        kind: RepositoryKind::Github,
                        alias: "Repositorio Principal".to_string(),
                        url: "https://github.com/nexacorp/portal-clientes".to_string(),
                    }]),
                    drive_link: None,
                    github_link: None,
                },
                Project {
                    id: "p2".to_string(),
                    name: "App Logística".to_string(),
                    client: "TransAndes".to_string(),
                    status: ProjectStatus::Finalizado,
                    progress: 100,
                    description: "Aplicación móvil de seguimiento de flota.".to_string(),
                    deadline: date(2025, 6, 15),
                    start_date: date(2024, 9, 1),
                    lead_id: "u1".to_string(),
                    team_ids: vec!["u4".to_string(), "u5".to_string()],
                    technologies: vec!["Flutter".to_string(), "Firebase".to_string()],
                    logs: Vec::new(),
                    repositories: Some(Vec::new()),
                    drive_link: None,
                    github_link: None,
                },
            ],
            gems: vec![
                gem("g1", "Asistente de Actas", "Genera actas de reunión a partir de notas sueltas.", "https://gemini.google.com/gem/actas", "description"),
                gem("g2", "Revisor de Propuestas", "Revisa tono y estructura de propuestas comerciales.", "https://gemini.google.com/gem/propuestas", "rate_review"),
                gem("g3", "Traductor Técnico", "Traducción ES/EN con glosario interno.", "https://gemini.google.com/gem/traductor", "translate"),
            ],
            tools: vec![
                tool("t1", "Tablero Kanban", "https://kanban.nexacorp.com", "view_kanban", "#4f46e5", true),
                tool("t2", "Wiki Interna", "https://wiki.nexacorp.com", "menu_book", "#059669", true),
                tool("t3", "Figma", "https://figma.com", "design_services", "#f24e1e", false),
            ],
        }
    }

    /// Empty seed, mainly for tests that want full control of the dataset.
    pub fn empty() -> Self {
        Self { users: Vec::new(), projects: Vec::new(), gems: Vec::new(), tools: Vec::new() }
    }
}

fn gem(id: &str, name: &str, description: &str, url: &str, icon: &str) -> Gem {
    Gem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        url: url.to_string(),
        icon: icon.to_string(),
    }
}

fn tool(id: &str, name: &str, url: &str, icon: &str, color: &str, is_local: bool) -> Tool {
    Tool {
        id: id.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        is_local,
    }
}
