use crate::storage::PantryStorage;
use crate::{PantryError, Result, PANTRY_STORAGE_KEY};
use std::collections::BTreeSet;

/// What `Pantry::open` found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PantryLoad {
    /// Nothing stored yet.
    Fresh,
    Restored(usize),
    /// Stored data was unreadable; the pantry starts empty and the stored
    /// value is replaced on the next toggle.
    Recovered { reason: String },
}

/// Owned ingredient names. Serialized as a sorted JSON array.
pub struct Pantry {
    owned: BTreeSet<String>,
    storage: Box<dyn PantryStorage>,
    key: String,
    load: PantryLoad,
}

impl Pantry {
    pub fn open(storage: Box<dyn PantryStorage>) -> Self {
        Self::open_with_key(storage, PANTRY_STORAGE_KEY)
    }

    pub fn open_with_key(storage: Box<dyn PantryStorage>, key: &str) -> Self {
        let (owned, load) = match storage.read(key) {
            Ok(None) => (BTreeSet::new(), PantryLoad::Fresh),
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(names) => {
                    let mut owned = BTreeSet::new();
                    for name in names {
                        let name = name.trim();
                        if !name.is_empty() && find_name(&owned, name).is_none() {
                            owned.insert(name.to_string());
                        }
                    }
                    let count = owned.len();
                    (owned, PantryLoad::Restored(count))
                }
                Err(err) => {
                    log::warn!("Pantry data under '{key}' is corrupted, starting empty: {err}");
                    (
                        BTreeSet::new(),
                        PantryLoad::Recovered {
                            reason: err.to_string(),
                        },
                    )
                }
            },
            Err(err) => {
                log::warn!("Pantry data under '{key}' is unreadable, starting empty: {err}");
                (
                    BTreeSet::new(),
                    PantryLoad::Recovered {
                        reason: err.to_string(),
                    },
                )
            }
        };

        log::debug!("Pantry opened with {} ingredients ({load:?})", owned.len());
        Self {
            owned,
            storage,
            key: key.to_string(),
            load,
        }
    }

    pub fn load_status(&self) -> &PantryLoad {
        &self.load
    }

    /// Flips membership of `name` and flushes. Returns the new membership.
    /// Names are compared trimmed and case-insensitively, so toggling "gin"
    /// removes a stored "Gin".
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PantryError::EmptyName);
        }

        let stored = find_name(&self.owned, name).cloned();
        let now_owned = match &stored {
            Some(existing) => {
                self.owned.remove(existing);
                false
            }
            None => {
                self.owned.insert(name.to_string());
                true
            }
        };

        if let Err(err) = self.flush() {
            // Keep memory consistent with what is durably stored.
            match stored {
                Some(existing) => {
                    self.owned.insert(existing);
                }
                None => {
                    self.owned.remove(name);
                }
            }
            return Err(err);
        }

        log::debug!(
            "Pantry {} '{name}' ({} owned)",
            if now_owned { "added" } else { "removed" },
            self.owned.len()
        );
        Ok(now_owned)
    }

    pub fn contains(&self, name: &str) -> bool {
        find_name(&self.owned, name.trim()).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.owned.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.owned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }

    pub fn serialized(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.owned)?)
    }

    fn flush(&self) -> Result<()> {
        let encoded = self.serialized()?;
        self.storage.write(&self.key, &encoded)
    }
}

fn find_name<'a>(owned: &'a BTreeSet<String>, name: &str) -> Option<&'a String> {
    let folded = name.to_lowercase();
    owned.iter().find(|stored| stored.to_lowercase() == folded)
}

impl std::fmt::Debug for Pantry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pantry")
            .field("owned", &self.owned)
            .field("key", &self.key)
            .field("load", &self.load)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileStorage, MemoryStorage};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    struct FailingStorage;

    impl PantryStorage for FailingStorage {
        fn read(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<()> {
            Err(PantryError::Storage {
                path: PathBuf::from("/readonly"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }
    }

    #[test]
    fn starts_fresh_without_stored_state() {
        let pantry = Pantry::open(Box::new(MemoryStorage::new()));
        assert!(pantry.is_empty());
        assert_eq!(pantry.load_status(), &PantryLoad::Fresh);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut pantry = Pantry::open(Box::new(MemoryStorage::new()));
        assert!(pantry.toggle("Gin").unwrap());
        assert!(pantry.contains("Gin"));
        assert!(!pantry.toggle("Gin").unwrap());
        assert!(!pantry.contains("Gin"));
    }

    #[test]
    fn double_toggle_restores_serialized_form() {
        let storage = MemoryStorage::with_value(PANTRY_STORAGE_KEY, r#"["Campari","Gin"]"#);
        let mut pantry = Pantry::open(Box::new(storage));
        let before = pantry.serialized().unwrap();

        pantry.toggle("Campari").unwrap();
        pantry.toggle("Campari").unwrap();
        assert_eq!(pantry.serialized().unwrap(), before);

        pantry.toggle("Tequila").unwrap();
        pantry.toggle("Tequila").unwrap();
        assert_eq!(pantry.serialized().unwrap(), before);
    }

    #[test]
    fn toggles_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut pantry = Pantry::open(Box::new(FileStorage::new(dir.path())));
            pantry.toggle("White rum").unwrap();
            pantry.toggle("Lime juice").unwrap();
            pantry.toggle("Mint").unwrap();
            pantry.toggle("Mint").unwrap();
        }

        let pantry = Pantry::open(Box::new(FileStorage::new(dir.path())));
        assert_eq!(pantry.load_status(), &PantryLoad::Restored(2));
        assert_eq!(pantry.names().collect::<Vec<_>>(), vec!["Lime juice", "White rum"]);

        let raw = std::fs::read_to_string(dir.path().join("userIngredients.json")).unwrap();
        assert_eq!(raw, r#"["Lime juice","White rum"]"#);
    }

    #[test]
    fn corrupt_state_falls_back_to_empty() {
        let storage = MemoryStorage::with_value(PANTRY_STORAGE_KEY, "{not json");
        let mut pantry = Pantry::open(Box::new(storage));
        assert!(pantry.is_empty());
        assert!(matches!(pantry.load_status(), PantryLoad::Recovered { .. }));

        pantry.toggle("Gin").unwrap();
        assert_eq!(pantry.serialized().unwrap(), r#"["Gin"]"#);
    }

    #[test]
    fn wrong_shape_counts_as_corrupt() {
        let storage = MemoryStorage::with_value(PANTRY_STORAGE_KEY, r#"{"Gin":true}"#);
        let pantry = Pantry::open(Box::new(storage));
        assert!(matches!(pantry.load_status(), PantryLoad::Recovered { .. }));
    }

    #[test]
    fn duplicate_stored_names_collapse() {
        let storage = MemoryStorage::with_value(PANTRY_STORAGE_KEY, r#"["Gin","Gin","Salt"]"#);
        let pantry = Pantry::open(Box::new(storage));
        assert_eq!(pantry.len(), 2);
        assert_eq!(pantry.load_status(), &PantryLoad::Restored(2));
    }

    #[test]
    fn stored_names_are_trimmed_on_load() {
        let storage = MemoryStorage::with_value(PANTRY_STORAGE_KEY, r#"[" Gin","Salt ","  "]"#);
        let mut pantry = Pantry::open(Box::new(storage));
        assert_eq!(pantry.names().collect::<Vec<_>>(), vec!["Gin", "Salt"]);
        assert_eq!(pantry.load_status(), &PantryLoad::Restored(2));

        assert!(!pantry.toggle("Gin").unwrap());
        assert_eq!(pantry.serialized().unwrap(), r#"["Salt"]"#);
    }

    #[test]
    fn case_variants_share_one_entry() {
        let mut pantry = Pantry::open(Box::new(MemoryStorage::new()));
        assert!(pantry.toggle("Gin").unwrap());
        assert!(pantry.contains("GIN"));
        assert!(!pantry.toggle(" gin ").unwrap());
        assert!(pantry.is_empty());

        let storage = MemoryStorage::with_value(PANTRY_STORAGE_KEY, r#"["Gin","gin"]"#);
        assert_eq!(Pantry::open(Box::new(storage)).len(), 1);
    }

    #[test]
    fn failed_flush_restores_removed_entry() {
        let storage = MemoryStorage::with_value(PANTRY_STORAGE_KEY, r#"["Gin"]"#);
        let mut pantry = Pantry::open(Box::new(storage));
        pantry.storage = Box::new(FailingStorage);
        assert!(pantry.toggle("gin").is_err());
        assert_eq!(pantry.names().collect::<Vec<_>>(), vec!["Gin"]);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut pantry = Pantry::open(Box::new(MemoryStorage::new()));
        assert!(matches!(pantry.toggle("   "), Err(PantryError::EmptyName)));
        assert!(pantry.is_empty());
    }

    #[test]
    fn failed_flush_rolls_back_membership() {
        let mut pantry = Pantry::open(Box::new(FailingStorage));
        assert!(matches!(
            pantry.toggle("Gin"),
            Err(PantryError::Storage { .. })
        ));
        assert!(!pantry.contains("Gin"));
    }
}
