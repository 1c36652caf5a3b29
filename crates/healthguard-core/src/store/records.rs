//! Record vault store.

use std::collections::VecDeque;

use crate::models::{MedicalRecord, RecordType};

/// Ordered collection of medical records, newest first.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: VecDeque<MedicalRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records already ordered newest first.
    pub fn from_records(records: Vec<MedicalRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Insert a record at the front. Contents are not validated and
    /// duplicate ids are accepted.
    pub fn add(&mut self, record: MedicalRecord) {
        self.records.push_front(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &MedicalRecord> {
        self.records.iter()
    }

    /// Most recently added record.
    pub fn latest(&self) -> Option<&MedicalRecord> {
        self.records.front()
    }

    /// Get the first (newest) record with the given id.
    pub fn get(&self, id: &str) -> Option<&MedicalRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records of one category, newest first.
    pub fn by_type(&self, record_type: RecordType) -> Vec<&MedicalRecord> {
        self.records
            .iter()
            .filter(|r| r.record_type == record_type)
            .collect()
    }

    /// Owned copy of all records, newest first.
    pub fn to_vec(&self) -> Vec<MedicalRecord> {
        self.records.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, record_type: RecordType) -> MedicalRecord {
        let mut r = MedicalRecord::new("2024-01-15", record_type, "AIIMS Delhi", "Dr. Vikram Seth");
        r.id = id.to_string();
        r
    }

    #[test]
    fn test_add_prepends() {
        let mut store = RecordStore::new();
        store.add(record("1", RecordType::BloodTest));
        store.add(record("2", RecordType::Consultation));
        store.add(record("3", RecordType::XRay));

        let ids: Vec<_> = store.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
        assert_eq!(store.latest().unwrap().id, "3");
    }

    #[test]
    fn test_duplicate_ids_accepted() {
        let mut store = RecordStore::new();
        store.add(record("1", RecordType::BloodTest));
        store.add(record("1", RecordType::Mri));

        assert_eq!(store.len(), 2);
        // Lookup resolves to the newest
        assert_eq!(store.get("1").unwrap().record_type, RecordType::Mri);
    }

    #[test]
    fn test_by_type() {
        let mut store = RecordStore::new();
        store.add(record("1", RecordType::BloodTest));
        store.add(record("2", RecordType::Vaccination));
        store.add(record("3", RecordType::BloodTest));

        let blood: Vec<_> = store
            .by_type(RecordType::BloodTest)
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(blood, vec!["3", "1"]);
        assert!(store.by_type(RecordType::Mri).is_empty());
    }

    #[test]
    fn test_from_records_keeps_order() {
        let store = RecordStore::from_records(vec![
            record("b", RecordType::BloodTest),
            record("a", RecordType::Consultation),
        ]);
        assert_eq!(store.latest().unwrap().id, "b");
        assert_eq!(store.to_vec().len(), 2);
    }
}
