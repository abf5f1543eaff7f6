pub mod models;
pub mod store;

pub use models::{LoadedProfile, PlayerProfile, ProfileRecord};
pub use store::ProfileStore;
