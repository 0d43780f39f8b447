pub mod file;
pub mod keyvalue;
pub mod memory;

pub use file::FileStorage;
pub use keyvalue::{GEMS_KEY, KeyValueStore, PROJECTS_KEY, TOOLS_KEY, USERS_KEY};
pub use memory::MemoryStorage;
