//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use shelf_cache::{FavoriteCache, FileStore};
use shelf_commerce::Currency;
use shelf_data::RestCatalog;
use shelf_screens::FavoriteSync;

use crate::config::{ShelfConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration, environment overrides applied.
    pub config: ShelfConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, env: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (ShelfConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (ShelfConfig::default(), None),
            }
        };

        let config = match env {
            Some(env) => config.for_environment(env)?,
            None => config,
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(ShelfConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = ShelfConfig::load(&config_path) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Display currency.
    pub fn currency(&self) -> Currency {
        self.config.display.currency
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Device store file.
    pub fn cache_path(&self) -> PathBuf {
        self.resolve_path(&self.config.cache.path)
    }

    /// Open the remote catalog and the device store.
    pub async fn favorite_sync(&self) -> Result<FavoriteSync> {
        let catalog = RestCatalog::new(&self.config.api)
            .with_context(|| format!("Invalid API configuration: {}", self.config.api.base_url))?;

        let cache_path = self.cache_path();
        let store = FileStore::open(&cache_path)
            .await
            .with_context(|| format!("Failed to open favorites store: {}", cache_path.display()))?;

        self.output.debug(&format!("API: {}", self.config.api.base_url));
        self.output.debug(&format!("Favorites store: {}", cache_path.display()));

        Ok(FavoriteSync::new(
            Arc::new(catalog),
            FavoriteCache::new(Arc::new(store)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(".shelf.toml"),
            "[display]\ncurrency = \"GBP\"\n",
        )
        .unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.display.currency, Currency::GBP);
        assert_eq!(path, dir.path().join(".shelf.toml"));
    }

    #[test]
    fn test_relative_cache_path_resolves_against_cwd() {
        let ctx = Context {
            config: ShelfConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: PathBuf::from("/work"),
        };
        assert_eq!(ctx.cache_path(), PathBuf::from("/work/.shelf/favorites.json"));
        assert_eq!(ctx.resolve_path("/abs/x.json"), PathBuf::from("/abs/x.json"));
    }
}
