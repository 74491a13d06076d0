pub mod commands;
pub mod libs;

pub use libs::catalog::VideoCatalog;
pub use libs::error::{AnyResult, PetflixError};
pub use libs::favorites::FavoritesStore;
pub use libs::source::{BundledSource, JsonFileSource, MemorySource, VideoSource};
pub use libs::storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use libs::video::{Category, Video};
