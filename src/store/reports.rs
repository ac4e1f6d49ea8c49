//! Reading and report persistence, partitioned by user.
//!
//! Layout:
//! - `readings/{user_id}/{reading_id}` ← [`Reading`]
//! - `reports/{user_id}/{report_id}`   ← [`Report`]
//! - `report_owners/{report_id}`       ← owning `user_id`
//!
//! `report_owners` lets a report be resolved from its id alone. Reports
//! written without an owner entry are still found by scanning every
//! partition under `reports/`.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{join, TreeStore};
use crate::catalog::SensorType;
use crate::error::StoreError;
use crate::models::{Reading, Report};

// ---

const READINGS: &str = "readings";
const REPORTS: &str = "reports";
const REPORT_OWNERS: &str = "report_owners";

#[derive(Debug)]
pub struct ReportStore<S> {
    tree: S,
}

impl<S: TreeStore> ReportStore<S> {
    pub fn new(tree: S) -> Self {
        Self { tree }
    }

    /// Underlying tree, for adapters that need direct access.
    pub fn tree(&self) -> &S {
        &self.tree
    }

    /// Persist a reading. Safe to repeat with the same reading.
    pub async fn save_reading(&self, reading: &Reading) -> Result<(), StoreError> {
        // ---
        let id = reading.id.to_string();
        let path = join(&[READINGS, &reading.user_id, &id]);
        self.tree.set(&path, encode(&path, reading)?).await?;

        info!("Saved reading {} for user {}", reading.id, reading.user_id);
        Ok(())
    }

    /// Persist a report, then record its owner for id lookups.
    pub async fn save_report(&self, report: &Report) -> Result<(), StoreError> {
        // ---
        let id = report.id.to_string();
        let path = join(&[REPORTS, &report.user_id, &id]);
        self.tree.set(&path, encode(&path, report)?).await?;

        let owner_path = join(&[REPORT_OWNERS, &id]);
        self.tree
            .set(&owner_path, Value::String(report.user_id.clone()))
            .await?;

        info!(
            "Saved report {} ({:?}) for user {}",
            report.id, report.analysis.status, report.user_id
        );
        Ok(())
    }

    /// A user's reports, newest first, at most `limit` of them.
    pub async fn list_by_user(&self, user_id: &str, limit: usize) -> Result<Vec<Report>, StoreError> {
        // ---
        let path = join(&[REPORTS, user_id]);
        let mut reports: Vec<Report> = self.load_children(&path).await?;

        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports.truncate(limit);

        debug!("Found {} reports for user {}", reports.len(), user_id);
        Ok(reports)
    }

    /// A user's raw readings, newest first, optionally of one sensor type.
    pub async fn list_readings(
        &self,
        user_id: &str,
        sensor_type: Option<SensorType>,
    ) -> Result<Vec<Reading>, StoreError> {
        // ---
        let path = join(&[READINGS, user_id]);
        let mut readings: Vec<Reading> = self.load_children(&path).await?;

        if let Some(sensor_type) = sensor_type {
            readings.retain(|r| r.sensor_type == sensor_type);
        }
        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        debug!("Found {} readings for user {}", readings.len(), user_id);
        Ok(readings)
    }

    /// Resolve a report from its id alone.
    pub async fn find_report_by_id(&self, report_id: Uuid) -> Result<Option<Report>, StoreError> {
        // ---
        let id = report_id.to_string();

        let owner_path = join(&[REPORT_OWNERS, &id]);
        if let Some(Value::String(user_id)) = self.tree.get(&owner_path).await? {
            let path = join(&[REPORTS, &user_id, &id]);
            if let Some(value) = self.tree.get(&path).await? {
                return decode(&path, value).map(Some);
            }
            warn!("Owner entry for report {} points at missing report", id);
        }

        self.scan_for_report(&id).await
    }

    /// Check every user partition for `id`, stopping at the first hit.
    async fn scan_for_report(&self, id: &str) -> Result<Option<Report>, StoreError> {
        // ---
        let users = self.tree.child_keys(REPORTS).await?;
        debug!("Scanning {} report partitions for report {}", users.len(), id);

        for user_id in users {
            let path = join(&[REPORTS, &user_id, id]);
            if let Some(value) = self.tree.get(&path).await? {
                info!("Found report {} under user {} by scan", id, user_id);
                return decode(&path, value).map(Some);
            }
        }

        debug!("No report found with id {}", id);
        Ok(None)
    }

    async fn load_children<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, StoreError> {
        // ---
        self.tree
            .children(path)
            .await?
            .into_iter()
            .map(|(key, value)| decode(&format!("{path}/{key}"), value))
            .collect()
    }
}

fn encode<T: Serialize>(path: &str, record: &T) -> Result<Value, StoreError> {
    serde_json::to_value(record).map_err(|source| StoreError::Document {
        path: path.to_string(),
        source,
    })
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|source| StoreError::Document {
        path: path.to_string(),
        source,
    })
}
