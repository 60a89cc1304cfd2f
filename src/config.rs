//! Endpoint configuration.
//!
//! The web build has no process environment, so the addresses are baked in at
//! compile time from `STITCH_BACKEND_ADDRESS` / `STITCH_CATALOG_ADDRESS`.
//! Desktop builds may override them at runtime with the same variables.

const DEFAULT_BACKEND_ADDRESS: &str = "http://localhost:3000";
const DEFAULT_CATALOG_ADDRESS: &str = "https://api.spotify.com";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub backend_url: String,
    pub catalog_url: String,
}

impl AppConfig {
    pub fn new(backend_url: impl Into<String>, catalog_url: impl Into<String>) -> Self {
        Self {
            backend_url: normalize_base(backend_url.into()),
            catalog_url: normalize_base(catalog_url.into()),
        }
    }

    pub fn load() -> Self {
        let backend = option_env!("STITCH_BACKEND_ADDRESS").unwrap_or(DEFAULT_BACKEND_ADDRESS);
        let catalog = option_env!("STITCH_CATALOG_ADDRESS").unwrap_or(DEFAULT_CATALOG_ADDRESS);

        #[cfg(not(target_arch = "wasm32"))]
        {
            let backend = runtime_override("STITCH_BACKEND_ADDRESS").unwrap_or(backend.to_string());
            let catalog = runtime_override("STITCH_CATALOG_ADDRESS").unwrap_or(catalog.to_string());
            Self::new(backend, catalog)
        }

        #[cfg(target_arch = "wasm32")]
        {
            Self::new(backend, catalog)
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_ADDRESS, DEFAULT_CATALOG_ADDRESS)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_override(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn normalize_base(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}
