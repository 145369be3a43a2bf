//! Durable storage for the read model and sync cursor.
//!
//! Both documents are plain JSON files written wholesale after a successful
//! sync pass. Readers treat them as snapshots that can be replaced between
//! reads; there is no locking.

use std::{fs, path::Path};

use arena_round_types::{RoundReadModel, RoundSyncCursor};
use serde::Serialize;

use crate::errors::StoreError;

/// Reads the persisted read model, failing on a missing file or any
/// structural mismatch.
pub fn read_read_model(path: &Path) -> Result<RoundReadModel, StoreError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Reads the persisted read model, or `None` before the first sync.
pub fn read_read_model_if_exists(path: &Path) -> Result<Option<RoundReadModel>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    read_read_model(path).map(Some)
}

pub fn write_read_model(path: &Path, model: &RoundReadModel) -> Result<(), StoreError> {
    write_json(path, model)
}

/// Reads the sync cursor, or `None` when absent (first run, or a forced
/// full-history resync after the cursor file was deleted).
pub fn read_cursor(path: &Path) -> Result<Option<RoundSyncCursor>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&raw)?))
}

pub fn write_cursor(path: &Path, cursor: &RoundSyncCursor) -> Result<(), StoreError> {
    write_json(path, cursor)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut raw = serde_json::to_string_pretty(value)?;
    raw.push('\n');
    fs::write(path, raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use arena_round_types::{
        BlockRange, EventCounts, ModelVersion, RoundAccounting, RoundEvents, RoundLifecycle,
        TaggedU256,
    };

    use super::*;

    fn sample_model() -> RoundReadModel {
        RoundReadModel {
            version: ModelVersion::V1,
            chain_id: 11011,
            round_address: address!("1111111111111111111111111111111111111111"),
            synced_at: "2026-02-12T17:00:00Z".parse().expect("timestamp"),
            cursor: BlockRange {
                from_block: 0,
                to_block: 12,
            },
            phase: 1,
            gen: 0,
            max_gen: 256,
            max_batch: 16,
            lifecycle: RoundLifecycle::default(),
            events: RoundEvents::default(),
            event_counts: EventCounts::default(),
            accounting: RoundAccounting {
                total_funded: TaggedU256::from(10u64),
                ..Default::default()
            },
        }
    }

    fn sample_cursor() -> RoundSyncCursor {
        RoundSyncCursor {
            version: ModelVersion::V1,
            chain_id: 11011,
            round_address: address!("1111111111111111111111111111111111111111"),
            last_synced_block: 12,
            synced_at: "2026-02-12T17:00:00Z".parse().expect("timestamp"),
        }
    }

    #[test]
    fn model_round_trips_through_the_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/round-read-model.latest.json");

        let model = sample_model();
        write_read_model(&path, &model).expect("write creates parent dirs");
        let back = read_read_model(&path).expect("read");
        assert_eq!(back, model);
    }

    #[test]
    fn cursor_round_trips_and_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("round-read-model.cursor.json");

        assert!(read_cursor(&path).expect("missing is ok").is_none());

        let cursor = sample_cursor();
        write_cursor(&path, &cursor).expect("write");
        assert_eq!(read_cursor(&path).expect("read"), Some(cursor));
    }

    #[test]
    fn missing_model_file_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        assert!(read_read_model_if_exists(&path)
            .expect("missing is ok")
            .is_none());
        assert!(read_read_model(&path).is_err());
    }

    #[test]
    fn malformed_payload_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("model.json");
        fs::write(&path, r#"{"version":"v1","chainId":"not-a-number"}"#).expect("write");

        let err = read_read_model(&path).expect_err("malformed payload must fail");
        assert!(matches!(err, StoreError::Malformed(_)));
    }

    #[test]
    fn corrupted_bigint_tag_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("model.json");

        let model = sample_model();
        write_read_model(&path, &model).expect("write");
        let raw = fs::read_to_string(&path)
            .expect("read")
            .replace("__bigint__", "__number__");
        fs::write(&path, raw).expect("rewrite");

        assert!(read_read_model(&path).is_err());
    }
}
