//! Grid configuration for the running app

use contracts::shared::grid::{load_config, GridConfig};
use leptos::prelude::*;

use crate::system::auth::storage::get_local_storage;

/// localStorage key holding an optional TOML override
const CONFIG_KEY: &str = "grid_config";

/// Embedded defaults, overridden by `localStorage["grid_config"]` when set
pub fn load_grid_config() -> GridConfig {
    let overrides = get_local_storage().and_then(|s| s.get_item(CONFIG_KEY).ok().flatten());
    load_config(overrides.as_deref())
}

/// Config provided by `App`; defaults outside of it
pub fn use_grid_config() -> GridConfig {
    use_context::<GridConfig>().unwrap_or_default()
}
