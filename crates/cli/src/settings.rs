use crate::command::CommandHandler;
use anyhow::{Context, Result};
use mixbook_catalog::RecipeStore;
use mixbook_pantry::{FileStorage, MemoryStorage, Pantry, PantryStorage, StorageBackend};
use mixbook_search::LogObserver;
use std::path::PathBuf;
use std::sync::Arc;

pub const STORAGE_DIR_NAME: &str = "mixbook";
pub const LOCAL_STORAGE_DIR_NAME: &str = ".mixbook";

/// Resolved runtime configuration: flags first, then `MIXBOOK_*` env vars
/// (via clap), then platform defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub storage_dir: PathBuf,
    pub storage: StorageBackend,
    pub catalog: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(
        storage_dir: Option<PathBuf>,
        storage: StorageBackend,
        catalog: Option<PathBuf>,
    ) -> Self {
        Self {
            storage_dir: storage_dir.unwrap_or_else(default_storage_dir),
            storage,
            catalog,
        }
    }

    pub fn load_catalog(&self) -> Result<RecipeStore> {
        match &self.catalog {
            Some(path) => RecipeStore::load(path)
                .with_context(|| format!("Failed to load catalog {}", path.display())),
            None => RecipeStore::bundled().context("Bundled catalog is invalid"),
        }
    }

    pub fn open_storage(&self) -> Box<dyn PantryStorage> {
        match self.storage {
            StorageBackend::File => Box::new(FileStorage::new(self.storage_dir.clone())),
            StorageBackend::Memory => Box::new(MemoryStorage::new()),
        }
    }

    pub fn build_handler(&self, trace_matching: bool) -> Result<CommandHandler> {
        let store = Arc::new(self.load_catalog()?);
        log::debug!(
            "catalog: {} recipes, storage: {:?} at {}",
            store.len(),
            self.storage,
            self.storage_dir.display()
        );
        let pantry = Pantry::open(self.open_storage());

        Ok(if trace_matching {
            CommandHandler::with_observer(store, pantry, Arc::new(LogObserver))
        } else {
            CommandHandler::new(store, pantry)
        })
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(STORAGE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(LOCAL_STORAGE_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_storage_dir_wins() {
        let settings = Settings::resolve(
            Some(PathBuf::from("/tmp/bar")),
            StorageBackend::Memory,
            None,
        );
        assert_eq!(settings.storage_dir, PathBuf::from("/tmp/bar"));
    }

    #[test]
    fn missing_catalog_file_mentions_catalog() {
        let settings = Settings::resolve(
            None,
            StorageBackend::Memory,
            Some(PathBuf::from("/definitely/not/here.json")),
        );
        let err = settings.load_catalog().unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load catalog"));
    }

    #[test]
    fn bundled_catalog_is_default() {
        let settings = Settings::resolve(None, StorageBackend::Memory, None);
        assert_eq!(settings.load_catalog().unwrap().len(), 6);
    }
}
