use super::Config;
use std::path::PathBuf;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply `R2G2_*` overrides read through `lookup`. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty("R2G2_TOKEN") {
            self.token = Some(token.trim().to_string());
        }

        if let Some(path) = non_empty("R2G2_CREDENTIALS") {
            self.credentials_path = Some(PathBuf::from(path));
        }

        if let Some(url) = non_empty("R2G2_API_URL") {
            self.api_url = url;
        }
    }
}
