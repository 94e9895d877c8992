//! Select Option Model
//!
//! The `{value, label}` pair every dropdown control consumes. Entities that
//! appear in a cascading selector convert into this shape once, so the
//! selector protocol never needs to know which entity it is driving.

use serde::{Deserialize, Serialize};

use super::{Area, Branch, Category, ServiceUnit, Subcategory};

/// One dropdown entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl From<&Branch> for SelectOption {
    fn from(branch: &Branch) -> Self {
        Self::new(&branch.id, &branch.name)
    }
}

impl From<&Area> for SelectOption {
    fn from(area: &Area) -> Self {
        Self::new(&area.id, &area.name)
    }
}

impl From<&ServiceUnit> for SelectOption {
    fn from(unit: &ServiceUnit) -> Self {
        Self::new(&unit.id, &unit.name)
    }
}

impl From<&Category> for SelectOption {
    fn from(category: &Category) -> Self {
        Self::new(&category.id, &category.name)
    }
}

impl From<&Subcategory> for SelectOption {
    fn from(subcategory: &Subcategory) -> Self {
        Self::new(&subcategory.id, &subcategory.name)
    }
}
