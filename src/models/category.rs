//! Discovered category data structure.

use serde::{Deserialize, Serialize};

/// One browsable catalog section discovered on the index page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDescriptor {
    /// Numeric catalog id (from the `/category/{id}.html` link)
    pub id: u32,

    /// Full URL of the category listing page
    pub url: String,

    /// Visible link text; first name seen for an id wins
    pub name: String,
}

impl CategoryDescriptor {
    /// Fallback table name when no record carries a usable category name.
    pub fn fallback_table_name(&self) -> String {
        format!("cat_{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_table_name() {
        let cat = CategoryDescriptor {
            id: 874,
            url: "https://www.lcsc.com/category/874.html".to_string(),
            name: "MOSFETs".to_string(),
        };
        assert_eq!(cat.fallback_table_name(), "cat_874");
    }
}
