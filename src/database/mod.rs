mod db;
mod models;

pub use self::db::Database;
pub use self::models::{
    CareerGoal, Certification, ContactMessage, Education, Interest, NewContactMessage, Profile,
    ProjectImage, Skill, TaggedProject,
};
use crate::contact::MessageStore;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Return the path of the database, falling back to the platform's local data directory
pub fn resolve_path(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        return Ok(path.to_owned());
    }

    let project_dirs = directories::ProjectDirs::from("com", "portfolio", "portfolio")
        .context("Failed to determine application directories")?;
    let data_dir = project_dirs.data_local_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory {data_dir:?}"))?;
    Ok(data_dir.join("portfolio.sqlite"))
}

/// Lock a shared database, recovering it if another thread panicked while holding the lock
pub fn lock(db: &Mutex<Database>) -> MutexGuard<Database> {
    db.lock().unwrap_or_else(|err| {
        db.clear_poison();
        PoisonError::into_inner(err)
    })
}

impl MessageStore for Mutex<Database> {
    fn insert(&self, message: NewContactMessage) -> Result<ContactMessage> {
        lock(self).insert_contact_message(&message)
    }
}
