//! Property tests for store ordering, grant ids and audit growth.

use std::collections::HashSet;

use proptest::prelude::*;

use healthguard_core::models::{AccessMode, MedicalRecord, NewConsentGrant, PatientProfile, RecordType};
use healthguard_core::{Session, SessionConfig};

fn session() -> Session {
    Session::new(
        PatientProfile::new("P-12345", "Rahul Sharma", 32, "B+"),
        SessionConfig::default(),
    )
}

fn new_grant(doctor: &str) -> NewConsentGrant {
    NewConsentGrant::new(doctor, "GP", "Clinic", "2025-01-01", AccessMode::Standard)
}

/// A session operation.
#[derive(Debug, Clone)]
enum Op {
    AddRecord,
    Grant,
    /// Revoke the n-th live grant (mod len), or an unknown id when none exist
    Revoke(usize),
    RevokeUnknown,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::AddRecord),
        Just(Op::Grant),
        any::<usize>().prop_map(Op::Revoke),
        Just(Op::RevokeUnknown),
    ]
}

proptest! {
    #[test]
    fn records_are_newest_first(n in 0usize..40) {
        let mut s = session();
        for i in 0..n {
            let mut r = MedicalRecord::new("2024-01-01", RecordType::Consultation, "Clinic", "Dr. A");
            r.id = i.to_string();
            s.add_record(r);
        }

        prop_assert_eq!(s.records().len(), n);
        let ids: Vec<String> = s.records().iter().map(|r| r.id.clone()).collect();
        let expected: Vec<String> = (0..n).rev().map(|i| i.to_string()).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn live_grant_ids_are_unique(n in 1usize..40) {
        let mut s = session();
        for i in 0..n {
            s.grant_consent(new_grant(&format!("Doctor {}", i)));
        }

        let ids: HashSet<String> = s.consents().iter().map(|g| g.id.clone()).collect();
        prop_assert_eq!(ids.len(), n);
    }

    #[test]
    fn revoke_preserves_others(n in 1usize..20, pick in any::<usize>()) {
        let mut s = session();
        for i in 0..n {
            s.grant_consent(new_grant(&format!("Doctor {}", i)));
        }
        let before = s.consents().to_vec();
        let target = before[pick % n].id.clone();

        s.revoke_consent(&target);

        let expected: Vec<_> = before.into_iter().filter(|g| g.id != target).collect();
        prop_assert_eq!(s.consents().to_vec(), expected);
    }

    #[test]
    fn each_op_adds_one_audit_entry(ops in prop::collection::vec(op_strategy(), 0..50)) {
        let mut s = session();

        for op in ops {
            let before = s.audit_log().len();
            let head_before = s.audit_log().head_hash().map(str::to_string);

            match op {
                Op::AddRecord => {
                    s.add_record(MedicalRecord::new("2024-01-01", RecordType::Mri, "Imaging", "Dr. B"));
                }
                Op::Grant => {
                    s.grant_consent(new_grant("Doctor"));
                }
                Op::Revoke(n) => {
                    let id = s
                        .consents()
                        .iter()
                        .nth(n % s.consents().len().max(1))
                        .map(|g| g.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    s.revoke_consent(&id);
                }
                Op::RevokeUnknown => {
                    let before_grants = s.consents().to_vec();
                    s.revoke_consent("unknown");
                    prop_assert_eq!(s.consents().to_vec(), before_grants);
                }
            }

            prop_assert_eq!(s.audit_log().len(), before + 1);
            let latest = s.audit_log().latest().unwrap();
            prop_assert_eq!(Some(latest.prev_hash.clone()).filter(|h| !h.is_empty()), head_before);
        }

        prop_assert!(s.audit_log().verify().is_ok());
    }
}
