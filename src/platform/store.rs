use std::path::PathBuf;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Map, Number, Value};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::metadata::{DataType, FieldDefinition, MetadataGraph};
use crate::section::PanelError;

use super::provider::load_graph;

pub const UPDATE_FAILED: &str = "An error occurred while trying to update the record. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitRequest {
    pub record_id: String,
    pub object_api_name: String,
    /// `(field api name, new text)` pairs.
    pub values: Vec<(String, String)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Rejected save: a record-level message plus per-field messages.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct SubmissionError {
    pub message: String,
    pub field_errors: Vec<FieldError>,
}

impl SubmissionError {
    pub fn record(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: Vec::new(),
        }
    }
}

impl From<&SubmissionError> for PanelError {
    fn from(error: &SubmissionError) -> Self {
        PanelError {
            message: Some(error.message.clone()),
            details: error
                .field_errors
                .iter()
                .map(|field| field.message.clone())
                .collect(),
        }
    }
}

pub trait RecordSubmitter: Send + Sync {
    fn submit(&self, request: SubmitRequest) -> BoxFuture<'static, Result<(), SubmissionError>>;
}

/// Validates drafts against the object describe and writes them back into the
/// record-UI document.
#[derive(Clone, Debug)]
pub struct FileRecordStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

impl RecordSubmitter for FileRecordStore {
    fn submit(&self, request: SubmitRequest) -> BoxFuture<'static, Result<(), SubmissionError>> {
        let path = self.path.clone();
        let lock = self.write_lock.clone();
        async move {
            let _guard = lock.lock().await;
            let graph = load_graph(&path).await.map_err(|err| {
                warn!(error = %err, "metadata unavailable for save");
                SubmissionError::record(UPDATE_FAILED)
            })?;
            let updates = validate(&graph, &request)?;
            if updates.is_empty() {
                debug!(record = %request.record_id, "nothing to save");
                return Ok(());
            }

            let contents = fs::read_to_string(&path)
                .await
                .map_err(|err| save_failed(&err))?;
            let mut document: Value =
                serde_json::from_str(&contents).map_err(|err| save_failed(&err))?;
            let fields = record_fields(&mut document, &request.record_id)
                .ok_or_else(|| SubmissionError::record(UPDATE_FAILED))?;
            for (name, value) in updates {
                let mut entry = Map::new();
                entry.insert("value".to_string(), value);
                entry.insert("displayValue".to_string(), Value::Null);
                fields.insert(name, Value::Object(entry));
            }

            let rendered = serde_json::to_string_pretty(&document).map_err(|err| save_failed(&err))?;
            fs::write(&path, rendered)
                .await
                .map_err(|err| save_failed(&err))?;
            info!(
                record = %request.record_id,
                fields = request.values.len(),
                "record saved"
            );
            Ok(())
        }
        .boxed()
    }
}

fn save_failed(err: &dyn std::fmt::Display) -> SubmissionError {
    warn!(error = %err, "record save failed");
    SubmissionError::record(UPDATE_FAILED)
}

/// Checks every value and converts it to its JSON form. All field problems
/// are reported together.
pub fn validate(
    graph: &MetadataGraph,
    request: &SubmitRequest,
) -> Result<Vec<(String, Value)>, SubmissionError> {
    if graph.records.get(&request.record_id).is_none() {
        return Err(SubmissionError::record(format!(
            "The requested resource does not exist: record `{}`",
            request.record_id
        )));
    }
    let object = graph
        .object_info(&request.object_api_name)
        .map_err(|err| SubmissionError::record(err.to_string()))?;

    let mut updates = Vec::with_capacity(request.values.len());
    let mut field_errors = Vec::new();
    for (name, text) in &request.values {
        let outcome = object
            .field(name)
            .map_err(|err| err.to_string())
            .and_then(|definition| convert(definition, text));
        match outcome {
            Ok(value) => updates.push((name.clone(), value)),
            Err(message) => field_errors.push(FieldError {
                field: name.clone(),
                message,
            }),
        }
    }

    if field_errors.is_empty() {
        Ok(updates)
    } else {
        Err(SubmissionError {
            message: UPDATE_FAILED.to_string(),
            field_errors,
        })
    }
}

fn convert(definition: &FieldDefinition, text: &str) -> Result<Value, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        if definition.required {
            return Err(format!("{}: Complete this field.", definition.label));
        }
        return Ok(Value::Null);
    }
    match definition.data_type {
        DataType::Int | DataType::Long => trimmed
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("{}: Enter a whole number.", definition.label)),
        DataType::Currency | DataType::Double | DataType::Percent => trimmed
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| format!("{}: Enter a valid number.", definition.label)),
        DataType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "0" => Ok(Value::Bool(false)),
            _ => Err(format!("{}: Enter true or false.", definition.label)),
        },
        DataType::Email if !trimmed.contains('@') => Err(format!(
            "{}: Enter a valid email address.",
            definition.label
        )),
        _ => Ok(Value::String(text.to_string())),
    }
}

fn record_fields<'a>(document: &'a mut Value, record_id: &str) -> Option<&'a mut Map<String, Value>> {
    let record = document.get_mut("records")?.get_mut(record_id)?.as_object_mut()?;
    record
        .entry("fields")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
}
