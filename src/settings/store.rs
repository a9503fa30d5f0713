use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Delay between the last change and the write that saves it.
pub const DEFAULT_FLUSH_DELAY_MS: u64 = 500;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Somewhere a value can be loaded from and saved to.
pub trait Store<T> {
    fn load(&self) -> Result<T, StoreError>;
    fn save(&self, value: &T) -> Result<(), StoreError>;
}

/// A JSON file. A missing file loads as the default value, and so does a
/// file that does not parse (with a warning), so a bad edit never locks the
/// user out.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> Store<T> for JsonFileStore
where
    T: Serialize + DeserializeOwned + Default,
{
    fn load(&self) -> Result<T, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable store");
                Ok(T::default())
            }
        }
    }

    fn save(&self, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value)?;
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        fs::write(&self.path, format!("{json}\n")).map_err(write_err)?;
        tracing::debug!(path = %self.path.display(), "saved store");
        Ok(())
    }
}

/// An in-memory store that counts its saves.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    value: RefCell<Option<T>>,
    saves: Cell<usize>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            value: RefCell::new(None),
            saves: Cell::new(0),
        }
    }

    pub fn with_value(value: T) -> Self {
        Self {
            value: RefCell::new(Some(value)),
            saves: Cell::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl<T: Clone> MemoryStore<T> {
    /// The last saved value.
    pub fn saved(&self) -> Option<T> {
        self.value.borrow().clone()
    }
}

impl<T: Clone + Default> Store<T> for MemoryStore<T> {
    fn load(&self) -> Result<T, StoreError> {
        Ok(self.value.borrow().clone().unwrap_or_default())
    }

    fn save(&self, value: &T) -> Result<(), StoreError> {
        *self.value.borrow_mut() = Some(value.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// Trailing debounce: fires once `delay_ms` has passed since the last
/// [`FlushDebouncer::queue`].
#[derive(Debug, Clone, Copy)]
pub struct FlushDebouncer {
    delay_ms: u64,
    pending: Option<u64>,
}

impl FlushDebouncer {
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub const fn queue(&mut self, now_ms: u64) {
        self.pending = Some(now_ms);
    }

    pub fn take_ready(&mut self, now_ms: u64) -> bool {
        let Some(queued_at) = self.pending else {
            return false;
        };
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub const fn cancel(&mut self) {
        self.pending = None;
    }
}

/// A value paired with the store it is saved to.
///
/// Changes mark the value dirty; [`Persisted::tick`] writes it once the
/// debounce delay has passed, [`Persisted::flush`] writes it right away.
#[derive(Debug)]
pub struct Persisted<T, S> {
    value: T,
    store: S,
    debouncer: FlushDebouncer,
}

impl<T, S: Store<T>> Persisted<T, S> {
    pub fn load(store: S) -> Result<Self, StoreError> {
        let value = store.load()?;
        Ok(Self {
            value,
            store,
            debouncer: FlushDebouncer::new(DEFAULT_FLUSH_DELAY_MS),
        })
    }

    #[must_use]
    pub const fn with_delay(mut self, delay_ms: u64) -> Self {
        self.debouncer = FlushDebouncer::new(delay_ms);
        self
    }

    pub const fn get(&self) -> &T {
        &self.value
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn is_dirty(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn update(&mut self, now_ms: u64, change: impl FnOnce(&mut T)) {
        change(&mut self.value);
        self.debouncer.queue(now_ms);
    }

    pub fn set(&mut self, value: T, now_ms: u64) {
        self.update(now_ms, |current| *current = value);
    }

    /// Save if the debounce delay has passed. Returns whether it saved.
    pub fn tick(&mut self, now_ms: u64) -> Result<bool, StoreError> {
        if !self.debouncer.take_ready(now_ms) {
            return Ok(false);
        }
        if let Err(err) = self.store.save(&self.value) {
            self.debouncer.queue(now_ms);
            return Err(err);
        }
        Ok(true)
    }

    /// Save now if anything changed since the last save. A failed save
    /// stays pending.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        if self.debouncer.is_pending() {
            self.store.save(&self.value)?;
            self.debouncer.cancel();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use tempfile::tempdir;

    #[test]
    fn test_json_store_missing_file_loads_default() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("settings.json"));
        let settings: Settings = store.load().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_json_store_round_trip_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("settings.json"));
        let mut settings = Settings::default();
        settings.glyphs.mod_toggle = true;

        store.save(&settings).unwrap();
        let loaded: Settings = store.load().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_json_store_bad_json_loads_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let loaded: Settings = JsonFileStore::new(path).load().unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_debouncer_waits_for_quiet_period() {
        let mut debouncer = FlushDebouncer::new(500);
        debouncer.queue(0);
        debouncer.queue(300);
        assert!(!debouncer.take_ready(700));
        assert!(debouncer.take_ready(800));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_persisted_tick_saves_once_after_delay() {
        let mut persisted = Persisted::load(MemoryStore::<Settings>::new()).unwrap();
        persisted.update(1_000, |settings| settings.output.wrap = true);
        persisted.update(1_200, |settings| settings.output.persist = true);
        assert!(persisted.is_dirty());

        assert!(!persisted.tick(1_500).unwrap());
        assert!(persisted.tick(1_700).unwrap());
        assert!(!persisted.tick(5_000).unwrap());
        assert_eq!(persisted.store().save_count(), 1);

        let saved = persisted.store().saved().unwrap();
        assert!(saved.output.wrap && saved.output.persist);
    }

    #[test]
    fn test_persisted_flush_only_when_dirty() {
        let mut persisted = Persisted::load(MemoryStore::<Settings>::new())
            .unwrap()
            .with_delay(10_000);
        persisted.flush().unwrap();
        assert_eq!(persisted.store().save_count(), 0);

        persisted.set(Settings::default(), 0);
        persisted.flush().unwrap();
        assert_eq!(persisted.store().save_count(), 1);
        assert!(!persisted.is_dirty());
    }

    #[test]
    fn test_persisted_failed_flush_stays_dirty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut persisted: Persisted<Settings, _> =
            Persisted::load(JsonFileStore::new(&path)).unwrap();
        fs::create_dir(&path).unwrap();

        persisted.update(0, |settings| settings.glyphs.mod_toggle = true);
        assert!(matches!(persisted.flush(), Err(StoreError::Write { .. })));
        assert!(persisted.is_dirty());

        fs::remove_dir(&path).unwrap();
        persisted.flush().unwrap();
        assert!(!persisted.is_dirty());
        let loaded: Settings = JsonFileStore::new(&path).load().unwrap();
        assert!(loaded.glyphs.mod_toggle);
    }

    #[test]
    fn test_persisted_failed_tick_retries_after_delay() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut persisted: Persisted<Settings, _> =
            Persisted::load(JsonFileStore::new(&path)).unwrap();
        fs::create_dir(&path).unwrap();

        persisted.update(0, |settings| settings.output.wrap = true);
        assert!(persisted.tick(600).is_err());
        assert!(persisted.is_dirty());

        fs::remove_dir(&path).unwrap();
        assert!(!persisted.tick(1_000).unwrap());
        assert!(persisted.tick(1_100).unwrap());
        assert!(!persisted.is_dirty());
        let loaded: Settings = JsonFileStore::new(&path).load().unwrap();
        assert!(loaded.output.wrap);
    }

    #[test]
    fn test_persisted_loads_existing_value() {
        let mut saved = Settings::default();
        saved.editor.line_numbers = true;
        let persisted = Persisted::load(MemoryStore::with_value(saved.clone())).unwrap();
        assert_eq!(persisted.get(), &saved);
    }
}
