//! Component catalog ingestion.
//!
//! The streaming runtime describes its installable components (inputs,
//! outputs, processors, ...) as a JSON catalog, discovered once per editing
//! session. Each entry carries the component's identity plus the field
//! specification tree its configuration form is built from.

use serde::Deserialize;

use crate::data::spec::FieldSpec;

/// One installable pipeline component and its configuration schema.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentSpec {
    /// Component name, unique within its category.
    pub name: String,
    /// Component category (`input`, `output`, `processor`, ...).
    #[serde(rename = "type")]
    pub category: String,
    /// Short human description.
    #[serde(default)]
    pub summary: Option<String>,
    /// Support status tag (`stable`, `beta`, ...), when the runtime
    /// reports one.
    #[serde(default)]
    pub status: Option<String>,
    /// Root of the configuration field tree.
    pub config: FieldSpec,
}

/// Catalog of components reported by the runtime.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentCatalog {
    /// Every component the runtime knows about.
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
}

impl ComponentCatalog {
    /// Parse a catalog from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is not valid catalog JSON.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let catalog = serde_json::from_str(raw)?;
        Ok(catalog)
    }

    /// Look up one component by category and name.
    pub fn component(&self, category: &str, name: &str) -> Option<&ComponentSpec> {
        self.components
            .iter()
            .find(|c| c.category == category && c.name == name)
    }

    /// All components of one category, in catalog order.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ComponentSpec> {
        self.components.iter().filter(move |c| c.category == category)
    }

    /// Number of components in the catalog.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
