use super::frame::{read_frame, write_frame};
use super::Ledger;
use crate::character::Character;
use crate::error::{LedgerError, Result};
use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

const SNAPSHOT_EXTENSION: &str = "dat";

/// One checksummed binary snapshot per character, framed as described in
/// [`super::frame`].
#[derive(Debug)]
pub struct FileLedger {
    dir: PathBuf,
    locks: Mutex<HashMap<u64, Arc<Mutex<()>>>>,
}

impl FileLedger {
    /// Opens (creating if needed) a ledger rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Platform data directory for the game.
    pub fn default_dir() -> io::Result<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "dungeon-master").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine data directory")
        })?;
        Ok(project_dirs.data_dir().join("characters"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{id}.{SNAPSHOT_EXTENSION}"))
    }

    fn lock_for(&self, id: u64) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(id).or_default())
    }

    fn read_snapshot(&self, id: u64) -> Result<Option<Character>, LedgerError> {
        match read_frame::<Character>(&self.path_for(id))? {
            None => Ok(None),
            Some(Some(character)) if character.id == id => Ok(Some(character)),
            Some(_) => Err(LedgerError::Corrupt(id)),
        }
    }

    fn write_snapshot(&self, character: &Character) -> Result<(), LedgerError> {
        write_frame(&self.path_for(character.id), character)
    }

    /// Ids of every snapshot file in the directory.
    fn stored_ids(&self) -> Result<Vec<u64>, LedgerError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
            {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}

impl Ledger for FileLedger {
    fn get(&self, id: u64) -> Result<Option<Character>, LedgerError> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read_snapshot(id)
    }

    fn insert(&self, character: Character) -> Result<(), LedgerError> {
        let lock = self.lock_for(character.id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        if self.path_for(character.id).exists() {
            return Err(LedgerError::AlreadyExists(character.id));
        }
        self.write_snapshot(&character)
    }

    fn apply<R, F>(&self, id: u64, f: F) -> Result<R>
    where
        F: FnOnce(&mut Character) -> Result<R>,
    {
        let lock = self.lock_for(id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut working = self
            .read_snapshot(id)?
            .ok_or(LedgerError::UnknownCharacter(id))?;
        let result = f(&mut working)?;
        self.write_snapshot(&working)?;
        Ok(result)
    }

    fn all(&self) -> Result<Vec<Character>, LedgerError> {
        let mut characters = Vec::new();
        for id in self.stored_ids()? {
            match self.get(id) {
                Ok(Some(c)) => characters.push(c),
                Ok(None) => {}
                Err(e) => warn!(character = id, error = %e, "skipping unreadable snapshot"),
            }
        }
        Ok(characters)
    }
}
