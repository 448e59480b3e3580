use google_cloud_bigquery::http::job::{Job, JobState};
use google_cloud_bigquery::http::table::{
    SourceFormat as BqSourceFormat, TableFieldSchema, TableFieldType, TableReference,
    TableSchema as BqTableSchema,
};

use crate::domain::entities::table_schema::{FieldType, SourceFormat, TableSchema};
use crate::domain::repositories::warehouse_repository::TableRef;

pub fn to_field_type(field_type: FieldType) -> TableFieldType {
    match field_type {
        FieldType::String => TableFieldType::String,
        FieldType::Integer => TableFieldType::Integer,
        FieldType::Float => TableFieldType::Float,
        FieldType::Timestamp => TableFieldType::Timestamp,
        FieldType::Date => TableFieldType::Date,
        FieldType::Json => TableFieldType::Json,
    }
}

pub fn to_bq_schema(schema: &TableSchema) -> BqTableSchema {
    BqTableSchema {
        fields: schema
            .fields()
            .iter()
            .map(|f| TableFieldSchema {
                name: f.name.to_string(),
                data_type: to_field_type(f.field_type),
                ..Default::default()
            })
            .collect(),
    }
}

pub fn to_source_format(format: SourceFormat) -> BqSourceFormat {
    match format {
        SourceFormat::Csv => BqSourceFormat::Csv,
        SourceFormat::NewlineDelimitedJson => BqSourceFormat::NewlineDelimitedJson,
    }
}

pub fn to_table_reference(project_id: &str, table: &TableRef) -> TableReference {
    TableReference {
        project_id: project_id.to_string(),
        dataset_id: table.dataset_id.clone(),
        table_id: table.table_id.clone(),
    }
}

/// Job progress as reported by the jobs API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobProgress {
    Pending,
    Running,
    Done,
}

/// Point-in-time view of an asynchronous job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub project_id: String,
    pub job_id: String,
    pub location: Option<String>,
    pub progress: JobProgress,
    /// Set when the job reached a failed terminal state
    pub error: Option<String>,
}

impl JobSnapshot {
    pub fn is_done(&self) -> bool {
        self.progress == JobProgress::Done
    }
}

impl From<&Job> for JobSnapshot {
    fn from(job: &Job) -> Self {
        let progress = match job.status.state {
            JobState::Pending => JobProgress::Pending,
            JobState::Running => JobProgress::Running,
            JobState::Done => JobProgress::Done,
        };

        // Only errorResult marks the job as failed; `errors` may hold warnings
        let error = job.status.error_result.as_ref().map(|e| {
            let reason = e.reason.clone().unwrap_or_default();
            let message = e.message.clone().unwrap_or_default();
            if reason.is_empty() {
                message
            } else {
                format!("{}: {}", reason, message)
            }
        });

        JobSnapshot {
            project_id: job.job_reference.project_id.clone(),
            job_id: job.job_reference.job_id.clone(),
            location: job.job_reference.location.clone(),
            progress,
            error,
        }
    }
}
