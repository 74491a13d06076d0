// Catalog-related constants

/// Pseudo-category meaning "no category filter"
pub const CATEGORY_ALL: &str = "all";

/// Category whose delayed query simulates a slow backend
pub const DEFAULT_SLOW_CATEGORY: &str = "sloths";
pub const DEFAULT_SLOW_CATEGORY_DELAY_MS: u64 = 3500;

pub const DEFAULT_TRENDING_LIMIT: usize = 8;

// Storage keys, KEEP THAT IN SYNC with the web front end
pub const FAVORITES_STORAGE_KEY: &str = "petflix-favorites";

pub const APP_DIR_NAME: &str = "petflix";
pub const CONFIG_FILENAME: &str = "config.toml";
pub const STORAGE_FILENAME: &str = "storage.json";
