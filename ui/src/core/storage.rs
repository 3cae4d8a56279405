//! Append-only local case history. The log is one serialized sequence under a
//! single localStorage key, newest entry first, created lazily on first write
//! and never pruned.

use api::CaseRecord;

/// localStorage key holding the serialized case log.
pub const HISTORY_KEY: &str = "ruralcare_cases";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    /// The browser storage area could not be opened at all.
    #[error("local storage is unavailable")]
    Unavailable,
    /// The persisted log exists but cannot be decoded. Distinct from an empty
    /// log so callers can tell "no history" from "unreadable history".
    #[error("stored case history is unreadable: {0}")]
    Corrupt(String),
    #[error("failed to write case history: {0}")]
    Write(String),
}

/// Handle to the persisted case log. On wasm this reads and writes
/// `window.localStorage`; off-web an in-memory slot keeps the same
/// read-modify-write semantics for native builds and tests.
#[derive(Debug, Default)]
pub struct HistoryStore {
    #[cfg(not(target_arch = "wasm32"))]
    slot: std::cell::RefCell<Option<String>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full persisted sequence, newest first. An absent key is an empty log.
    pub fn load_all(&self) -> Result<Vec<CaseRecord>, StorageError> {
        match self.read_raw()? {
            None => Ok(Vec::new()),
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|err| StorageError::Corrupt(err.to_string()))
            }
        }
    }

    /// Prepend one entry and write the full sequence back. Single-writer
    /// read-modify-write; a corrupt log refuses the append rather than
    /// silently overwriting it.
    pub fn append(&self, record: &CaseRecord) -> Result<(), StorageError> {
        let mut records = self.load_all()?;
        records.insert(0, record.clone());

        let raw = serde_json::to_string(&records)
            .map_err(|err| StorageError::Write(err.to_string()))?;
        self.write_raw(&raw)
    }

    #[cfg(target_arch = "wasm32")]
    fn read_raw(&self) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(HISTORY_KEY)
            .map_err(|_| StorageError::Unavailable)
    }

    #[cfg(target_arch = "wasm32")]
    fn write_raw(&self, raw: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(HISTORY_KEY, raw)
            .map_err(|_| StorageError::Write("localStorage rejected the write".to_string()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn read_raw(&self) -> Result<Option<String>, StorageError> {
        Ok(self.slot.borrow().clone())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn write_raw(&self, raw: &str) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = Some(raw.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Explanation, RiskLevel};

    fn record(reasoning: &str) -> CaseRecord {
        CaseRecord {
            risk_level: RiskLevel::Moderate,
            risk_score: 12.0,
            explanation: Explanation {
                detected_symptoms: vec!["high fever".to_string()],
                severity_words: Vec::new(),
                duration: "2 days".to_string(),
                emergency_flag: false,
                risk_reasoning: reasoning.to_string(),
            },
            village: "Amli".to_string(),
            case_id: None,
            timestamp: None,
        }
    }

    #[test]
    fn absent_log_loads_empty() {
        let store = HistoryStore::new();
        assert_eq!(store.load_all().expect("load"), Vec::new());
    }

    #[test]
    fn appends_newest_first() {
        let store = HistoryStore::new();
        store.append(&record("first")).expect("append");
        store.append(&record("second")).expect("append");
        store.append(&record("third")).expect("append");

        let records = store.load_all().expect("load");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].explanation.risk_reasoning, "third");
        assert_eq!(records[1].explanation.risk_reasoning, "second");
        assert_eq!(records[2].explanation.risk_reasoning, "first");
    }

    #[test]
    fn corrupt_log_is_not_an_empty_log() {
        let store = HistoryStore::new();
        store.write_raw("not json at all").expect("seed");

        assert!(matches!(store.load_all(), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn append_refuses_to_clobber_corrupt_log() {
        let store = HistoryStore::new();
        store.write_raw("{broken").expect("seed");

        assert!(matches!(
            store.append(&record("fresh")),
            Err(StorageError::Corrupt(_))
        ));
        // The unreadable payload stays in place for inspection.
        assert_eq!(store.read_raw().expect("raw").as_deref(), Some("{broken"));
    }
}
