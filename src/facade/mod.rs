pub mod store;

pub use store::PortalStore;
