// Persistent record store: four named JSON slots in a data directory, each
// read once at startup with a default and rewritten in full on every
// mutation. Stands in for a real database behind typed collection methods.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use color_eyre::Result;
use serde::{de::DeserializeOwned, Serialize};

use crate::models::{Category, Role, TestResult, User};
use crate::names;

mod categories;
mod results;
mod users;

pub use categories::AddCategoryOutcome;
pub use users::AddUserOutcome;

const USERS_SLOT: &str = "users.json";
const CATEGORIES_SLOT: &str = "categories.json";
const RESULTS_SLOT: &str = "results.json";
const BACKGROUND_SLOT: &str = "background.json";

#[derive(Clone)]
pub struct Store {
    inner: Arc<RwLock<Tables>>,
    dir: PathBuf,
}

struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    results: Vec<TestResult>,
    background: String,
}

impl Store {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        let tables = Tables {
            users: read_slot(&dir, USERS_SLOT, default_users),
            categories: read_slot(&dir, CATEGORIES_SLOT, default_categories),
            results: read_slot(&dir, RESULTS_SLOT, Vec::new),
            background: read_slot(&dir, BACKGROUND_SLOT, String::new),
        };

        tracing::info!(
            "record store opened at {}: {} users, {} categories, {} results",
            dir.display(),
            tables.users.len(),
            tables.categories.len(),
            tables.results.len(),
        );

        Ok(Self {
            inner: Arc::new(RwLock::new(tables)),
            dir,
        })
    }

    pub fn background(&self) -> String {
        self.read().background.clone()
    }

    pub fn set_background(&self, url: &str) {
        {
            let mut tables = self.write();
            tables.background = url.to_owned();
        }
        self.persist_background();
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    // Full-slot rewrites. Writes are fire-and-forget: a failed write is
    // logged and the in-memory state stays authoritative for this process.
    fn persist_users(&self) {
        let users = self.read().users.clone();
        self.persist(USERS_SLOT, &users);
    }

    fn persist_categories(&self) {
        let categories = self.read().categories.clone();
        self.persist(CATEGORIES_SLOT, &categories);
    }

    fn persist_results(&self) {
        let results = self.read().results.clone();
        self.persist(RESULTS_SLOT, &results);
    }

    fn persist_background(&self) {
        let background = self.read().background.clone();
        self.persist(BACKGROUND_SLOT, &background);
    }

    fn persist<T: Serialize>(&self, slot: &str, value: &T) {
        let path = self.dir.join(slot);
        let json = match serde_json::to_vec_pretty(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("could not serialize slot {slot}: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&path, json) {
            tracing::error!("could not write slot {slot}: {e}");
        }
    }
}

/// Read one slot, substituting the default when the file is missing or its
/// contents do not parse. A malformed slot must never take the process down.
fn read_slot<T: DeserializeOwned>(dir: &Path, slot: &str, default: impl FnOnce() -> T) -> T {
    let path = dir.join(slot);
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return default(),
        Err(e) => {
            tracing::warn!("could not read slot {slot}, using default: {e}");
            return default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("malformed slot {slot}, using default: {e}");
            default()
        }
    }
}

fn default_users() -> Vec<User> {
    vec![User {
        username: names::DEFAULT_ADMIN_USERNAME.to_owned(),
        password: names::DEFAULT_ADMIN_PASSWORD.to_owned(),
        role: Role::Admin,
        full_name: None,
        study_program: None,
        reg_number: None,
    }]
}

fn default_categories() -> Vec<Category> {
    names::DEFAULT_CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, name)| Category {
            id: i as i64 + 1,
            name: (*name).to_owned(),
        })
        .collect()
}
