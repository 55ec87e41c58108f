//! Persistent key/value storage for settings
//!
//! The watch keeps its settings as small integers keyed by a stable
//! identifier. The backing medium (SPI flash, simulator file) belongs to
//! the host; this module only defines the interface and a RAM-backed
//! implementation.

use heapless::FnvIndexMap;

/// Storage slots available in [`MemoryStorage`]
pub const MEMORY_SLOTS: usize = 16;

/// Failure to persist a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No free slot left for a new key
    #[error("storage is full")]
    Full,
}

/// Integer key/value store that survives restarts
pub trait Storage {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: u32) -> Option<i32>;

    /// Write `value` under `key`, replacing any previous value.
    fn write(&mut self, key: u32, value: i32) -> Result<(), StorageError>;

    /// Whether a value is stored under `key`.
    fn contains(&self, key: u32) -> bool {
        self.read(key).is_some()
    }
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn read(&self, key: u32) -> Option<i32> {
        (**self).read(key)
    }

    fn write(&mut self, key: u32, value: i32) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// RAM-backed storage, lost on reset
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: FnvIndexMap<u32, i32, MEMORY_SLOTS>,
}

impl MemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: u32) -> Option<i32> {
        self.slots.get(&key).copied()
    }

    fn write(&mut self, key: u32, value: i32) -> Result<(), StorageError> {
        self.slots
            .insert(key, value)
            .map(|_| ())
            .map_err(|_| StorageError::Full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read(3), None);
        assert!(!storage.contains(3));
    }

    #[test]
    fn write_replaces_previous_value() {
        let mut storage = MemoryStorage::new();
        storage.write(1, 10).unwrap();
        storage.write(1, 20).unwrap();
        assert_eq!(storage.read(1), Some(20));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn full_storage_rejects_new_keys_but_accepts_overwrites() {
        let mut storage = MemoryStorage::new();
        for key in 0..MEMORY_SLOTS as u32 {
            storage.write(key, 1).unwrap();
        }
        assert_eq!(storage.write(100, 1), Err(StorageError::Full));
        assert_eq!(storage.write(0, 5), Ok(()));
        assert_eq!(storage.read(0), Some(5));
    }
}
