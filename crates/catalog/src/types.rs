use serde::{Deserialize, Serialize};

/// A single line of a recipe. Only `name` takes part in matching; the
/// remaining fields are descriptive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            measure: None,
            flavor_profile: None,
            origin: None,
            role: None,
        }
    }

    #[must_use]
    pub fn measure(mut self, measure: impl Into<String>) -> Self {
        self.measure = Some(measure.into());
        self
    }

    #[must_use]
    pub fn flavor_profile(mut self, flavor_profile: impl Into<String>) -> Self {
        self.flavor_profile = Some(flavor_profile.into());
        self
    }

    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcoholic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glass: Option<String>,
    pub instructions: String,
    /// Authoring order, preserved for display.
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(|ing| ing.name.as_str())
    }
}
