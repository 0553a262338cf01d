/// Transient ingredient selection for browsing. Never persisted.
///
/// Names are stored trimmed and compared case-insensitively; blank names are
/// ignored. Order is the order of first selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    names: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for name in names {
            let name = name.as_ref().trim();
            if !name.is_empty() && !selection.contains(name) {
                selection.names.push(name.to_string());
            }
        }
        selection
    }

    /// Appends `name` when absent, removes it when present. Returns the new
    /// membership; blank names are never selected.
    pub fn toggle(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        if let Some(pos) = self.position(name) {
            self.names.remove(pos);
            false
        } else {
            self.names.push(name.to_string());
            true
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name.trim()).is_some()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    fn position(&self, name: &str) -> Option<usize> {
        let folded = name.to_lowercase();
        self.names.iter().position(|n| n.to_lowercase() == folded)
    }
}
