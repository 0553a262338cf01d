use std::collections::HashSet;

/// Canonical comparison form of an ingredient name or query.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A set of ingredient names compared in normalized form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSet {
    names: HashSet<String>,
}

impl IngredientSet {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| normalize_name(name.as_ref()))
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_ignores_case_and_padding() {
        let set = IngredientSet::from_names(["  White Rum ", "lime juice"]);
        assert!(set.contains("white rum"));
        assert!(set.contains("Lime Juice"));
        assert!(!set.contains("Lime"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn variants_of_one_name_collapse() {
        let set = IngredientSet::from_names(["Gin", "GIN", " gin"]);
        assert_eq!(set.len(), 1);
    }
}
