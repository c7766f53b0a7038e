use chrono::Utc;

use crate::models::Category;

use super::Store;

pub enum AddCategoryOutcome {
    Added,
    DuplicateName,
    EmptyName,
}

impl Store {
    pub fn categories(&self) -> Vec<Category> {
        self.read().categories.clone()
    }

    /// Category names are unique case-insensitively. Ids are
    /// generation-time millisecond timestamps.
    pub fn add_category(&self, name: &str) -> AddCategoryOutcome {
        let name = name.trim();
        if name.is_empty() {
            return AddCategoryOutcome::EmptyName;
        }
        {
            let mut tables = self.write();
            if tables
                .categories
                .iter()
                .any(|c| c.name.eq_ignore_ascii_case(name))
            {
                return AddCategoryOutcome::DuplicateName;
            }
            tables.categories.push(Category {
                id: Utc::now().timestamp_millis(),
                name: name.to_owned(),
            });
        }
        self.persist_categories();
        tracing::info!("added category '{name}'");
        AddCategoryOutcome::Added
    }

    pub fn rename_category(&self, id: i64, new_name: &str) {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return;
        }
        {
            let mut tables = self.write();
            if let Some(category) = tables.categories.iter_mut().find(|c| c.id == id) {
                category.name = new_name.to_owned();
            }
        }
        self.persist_categories();
    }

    pub fn delete_category(&self, id: i64) {
        {
            let mut tables = self.write();
            tables.categories.retain(|c| c.id != id);
        }
        self.persist_categories();
        tracing::info!("deleted category {id}");
    }
}
