//! Orchestration of reading ingestion and report generation.
//!
//! Ingestion is two independent writes: [`AnalysisService::record_reading`]
//! stores the raw reading, [`AnalysisService::generate_report`] analyzes it
//! and stores the report. If the second step fails the reading stays
//! stored without a report; calling `generate_report` again with the same
//! reading is safe and yields an equivalent report under a new id.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::SensorType;
use crate::classifier::{classify, Band, Status};
use crate::error::{AnalysisError, AnalysisResult};
use crate::interpreter::explain;
use crate::models::{Analysis, NewReading, Reading, Report};
use crate::store::{ReportStore, TreeStore};

// ---

/// Number of reports returned by [`AnalysisService::list_reports`] when the
/// caller does not ask for a specific amount.
pub const DEFAULT_REPORT_LIMIT: usize = 10;

/// Characters that cannot appear in a tree path segment.
const FORBIDDEN_ID_CHARS: &[char] = &['/', '.', '#', '$', '[', ']'];

#[derive(Debug)]
pub struct AnalysisService<S> {
    store: ReportStore<S>,
    default_limit: usize,
}

impl<S: TreeStore> AnalysisService<S> {
    pub fn new(tree: S) -> Self {
        Self {
            store: ReportStore::new(tree),
            default_limit: DEFAULT_REPORT_LIMIT,
        }
    }

    /// Override the default page size of [`Self::list_reports`].
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Validate and persist a raw reading.
    ///
    /// Nothing is returned unless the write succeeded.
    pub async fn record_reading(&self, input: NewReading) -> AnalysisResult<Reading> {
        // ---
        let sensor_type: SensorType = input.sensor_type.parse()?;
        validate_user_id(&input.user_id)?;
        validate_value(input.value)?;

        let reading = Reading {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            sensor_type,
            value: input.value,
            timestamp: Utc::now(),
            notes: input.notes,
            location: input.location,
        };

        info!(
            "Recording {} reading {} for user {}",
            reading.sensor_type, reading.value, reading.user_id
        );
        self.store.save_reading(&reading).await?;
        Ok(reading)
    }

    /// Analyze `reading` and persist the resulting report.
    ///
    /// Readings built outside [`Self::record_reading`] are validated again;
    /// a non-finite value would classify as good and could not be decoded
    /// once stored.
    pub async fn generate_report(&self, reading: &Reading) -> AnalysisResult<Report> {
        // ---
        validate_user_id(&reading.user_id)?;
        validate_value(reading.value)?;
        let analysis = self.analyze(reading);

        let report = Report {
            id: Uuid::new_v4(),
            user_id: reading.user_id.clone(),
            reading: reading.clone(),
            analysis,
            created_at: Utc::now(),
        };

        info!(
            "Generated report {} for reading {}: {:?}",
            report.id, reading.id, report.analysis.status
        );
        self.store.save_report(&report).await?;
        Ok(report)
    }

    /// Pure analysis of a reading against its catalog entry.
    pub fn analyze(&self, reading: &Reading) -> Analysis {
        // ---
        let info = reading.sensor_type.info();
        let classification = classify(reading.value, info.normal_range);
        let text = explain(info, reading.value, &classification);

        debug!(
            "{} = {} classified {:?} ({:.1}% deviation)",
            reading.sensor_type, reading.value, classification.status, classification.deviation_percent
        );

        let additional_info = match (classification.status, classification.band) {
            (Status::Good, _) | (_, Band::Within) => None,
            (_, band) => Some(format!(
                "Reading is {:.1}% {} the normal range of {} to {} {}.",
                classification.deviation_percent,
                if band == Band::Below { "below" } else { "above" },
                info.normal_range.min,
                info.normal_range.max,
                info.unit
            )),
        };

        Analysis {
            status: classification.status,
            value: reading.value,
            normal_range: info.normal_range,
            deviation_percent: classification.deviation_percent,
            interpretation: text.interpretation,
            possible_causes: text.possible_causes,
            recommendations: text.recommendations,
            additional_info,
        }
    }

    /// A user's most recent reports, newest first.
    pub async fn list_reports(&self, user_id: &str, limit: Option<usize>) -> AnalysisResult<Vec<Report>> {
        // ---
        validate_user_id(user_id)?;
        let limit = limit.unwrap_or(self.default_limit);
        Ok(self.store.list_by_user(user_id, limit).await?)
    }

    /// A report by id, `None` if no user has it.
    pub async fn get_report(&self, report_id: Uuid) -> AnalysisResult<Option<Report>> {
        // ---
        Ok(self.store.find_report_by_id(report_id).await?)
    }

    /// A user's raw readings, newest first.
    pub async fn list_readings(
        &self,
        user_id: &str,
        sensor_type: Option<SensorType>,
    ) -> AnalysisResult<Vec<Reading>> {
        // ---
        validate_user_id(user_id)?;
        Ok(self.store.list_readings(user_id, sensor_type).await?)
    }
}

fn validate_user_id(user_id: &str) -> AnalysisResult<()> {
    // ---
    if user_id.is_empty() || user_id.contains(FORBIDDEN_ID_CHARS) {
        return Err(AnalysisError::InvalidUserId(user_id.to_string()));
    }
    Ok(())
}

fn validate_value(value: f64) -> AnalysisResult<()> {
    // ---
    if !value.is_finite() {
        return Err(AnalysisError::InvalidValue(value));
    }
    Ok(())
}
