pub mod error;
pub mod model;
pub mod seed;

pub use error::{Result, StoreError};
pub use model::{
    Gem, Project, ProjectLog, ProjectStatus, Repository, RepositoryKind, Role, Skill, Tool, User,
};
pub use seed::{DEFAULT_PASSWORD, SeedData};
