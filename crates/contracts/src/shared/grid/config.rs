use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GridConfig {
    pub grid: GridSection,
    pub api: ApiSection,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GridSection {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiSection {
    pub port: u16,
    pub controller_prefix: String,
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[grid]
default_page_size = 10
page_size_options = [5, 10, 20, 50]

[api]
port = 3000
controller_prefix = "/api"
"#;

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid: GridSection {
                default_page_size: 10,
                page_size_options: vec![5, 10, 20, 50],
            },
            api: ApiSection {
                port: 3000,
                controller_prefix: "/api".to_string(),
            },
        }
    }
}

impl GridConfig {
    /// Page size options with the default size guaranteed to be selectable
    pub fn page_size_options(&self) -> Vec<usize> {
        let mut options: Vec<usize> = self
            .grid
            .page_size_options
            .iter()
            .copied()
            .filter(|n| *n > 0)
            .collect();
        let default = self.default_page_size();
        if !options.contains(&default) {
            options.push(default);
        }
        options.sort_unstable();
        options.dedup();
        options
    }

    pub fn default_page_size(&self) -> usize {
        self.grid.default_page_size.max(1)
    }
}

/// Load grid configuration
///
/// Uses `overrides` (TOML text, e.g. from local storage) when present and
/// valid, falls back to the embedded defaults otherwise.
pub fn load_config(overrides: Option<&str>) -> GridConfig {
    if let Some(text) = overrides {
        match toml::from_str::<GridConfig>(text) {
            Ok(config) => {
                log::info!("Using grid config override");
                return config;
            }
            Err(e) => log::warn!("Invalid grid config override, using defaults: {}", e),
        }
    }

    match toml::from_str(DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Embedded grid config failed to parse: {}", e);
            GridConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<GridConfig, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config, GridConfig::default());
        assert_eq!(config.api.controller_prefix, "/api");
    }

    #[test]
    fn test_override_is_applied() {
        let config = load_config(Some(
            "[grid]\ndefault_page_size = 20\npage_size_options = [20, 40]\n\n[api]\nport = 8080\ncontroller_prefix = \"/svc\"\n",
        ));
        assert_eq!(config.default_page_size(), 20);
        assert_eq!(config.api.port, 8080);
    }

    #[test]
    fn test_malformed_override_falls_back() {
        assert_eq!(load_config(Some("[grid]\ndefault_page_size = \"ten\"")), GridConfig::default());
        assert_eq!(load_config(None), GridConfig::default());
    }

    #[test]
    fn test_page_size_options_include_default() {
        let mut config = GridConfig::default();
        config.grid.default_page_size = 15;
        config.grid.page_size_options = vec![50, 0, 5, 5];
        assert_eq!(config.page_size_options(), [5, 15, 50]);
    }
}
