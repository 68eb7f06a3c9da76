//! Wire types of the line protocol.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::Value;

use crate::activation::Activation;
use crate::constants::{EMPTY_INVENTORY_NOTE, PROMPT_ECHO_CHARS, SCORE_DECIMALS};
use crate::inventory::InventoryItem;
use crate::labels::{LabelFlags, LabelScores};
use crate::selection::SelectedMemory;

use super::error::WorkerError;

pub const TASK_CLASSIFY: &str = "phase_a";
pub const TASK_RETRIEVE: &str = "phase_b";

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Output-type classification of a prompt.
    Classify { prompt: String },
    /// Relevance ranking of an inventory against a prompt.
    Retrieve {
        prompt: String,
        inventory: Vec<InventoryItem>,
    },
}

impl Request {
    /// Parses one input line.
    pub fn parse(line: &str) -> Result<Self, WorkerError> {
        let value: Value =
            serde_json::from_str(line).map_err(|e| WorkerError::InvalidJson(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, WorkerError> {
        let Value::Object(mut fields) = value else {
            return Err(WorkerError::InvalidJson("expected a JSON object".to_string()));
        };

        let task = fields.remove("task").unwrap_or(Value::Null);
        match task.as_str() {
            Some(TASK_CLASSIFY) => Ok(Request::Classify {
                prompt: take_prompt(&mut fields)?,
            }),
            Some(TASK_RETRIEVE) => Ok(Request::Retrieve {
                prompt: take_prompt(&mut fields)?,
                inventory: take_inventory(&mut fields)?,
            }),
            Some(other) => Err(WorkerError::UnknownTask(other.to_string())),
            None => Err(WorkerError::UnknownTask(render_tag(&task))),
        }
    }

    pub fn task(&self) -> &'static str {
        match self {
            Request::Classify { .. } => TASK_CLASSIFY,
            Request::Retrieve { .. } => TASK_RETRIEVE,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Request::Classify { prompt } | Request::Retrieve { prompt, .. } => prompt,
        }
    }
}

/// Renders a non-string task tag for the unknown-task message.
fn render_tag(task: &Value) -> String {
    match task {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

fn take_prompt(fields: &mut serde_json::Map<String, Value>) -> Result<String, WorkerError> {
    match fields.remove("prompt") {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(prompt)) => Ok(prompt),
        Some(other) => Err(WorkerError::InvalidRequest(format!(
            "prompt must be a string, got {}",
            other
        ))),
    }
}

fn take_inventory(
    fields: &mut serde_json::Map<String, Value>,
) -> Result<Vec<InventoryItem>, WorkerError> {
    match fields.remove("inventory") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| WorkerError::InvalidRequest(format!("invalid inventory: {}", e))),
    }
}

/// Rounds to the echoed precision.
pub fn round_score(score: f32) -> f64 {
    let scale = 10f64.powi(SCORE_DECIMALS);
    (f64::from(score) * scale).round() / scale
}

/// Label scores rounded for output, serialized as a map in declared label order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedScores(pub LabelScores);

impl Serialize for RoundedScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(crate::labels::LABEL_COUNT))?;
        for (label, score) in self.0.iter() {
            map.serialize_entry(label.as_str(), &round_score(score))?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub structure: &'static str,
    pub delivery_method: &'static str,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            kind: "inline_text",
            structure: "direct answer",
            delivery_method: "inline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResponse {
    pub task_description: String,
    pub output_type: &'static str,
    pub output_labels: LabelFlags,
    /// Absent in bypass mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_scores: Option<RoundedScores>,
    pub output_format: OutputFormat,
    pub required_domains: Vec<String>,
    pub complexity: &'static str,
    pub estimated_steps: u32,
}

impl ClassificationResponse {
    pub fn new(prompt: &str, activation: &Activation, scores: Option<LabelScores>) -> Self {
        Self {
            task_description: prompt.chars().take(PROMPT_ECHO_CHARS).collect(),
            output_type: activation.primary.as_str(),
            output_labels: activation.labels,
            output_scores: scores.map(RoundedScores),
            output_format: OutputFormat::default(),
            required_domains: Vec::new(),
            complexity: "simple",
            estimated_steps: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalResponse {
    pub selected_memories: Vec<SelectedMemory>,
    pub missing_memories: Vec<String>,
    pub tools_needed: Vec<String>,
    pub notes: String,
}

impl RetrievalResponse {
    pub fn new(selected_memories: Vec<SelectedMemory>, notes: String) -> Self {
        Self {
            selected_memories,
            missing_memories: Vec::new(),
            tools_needed: Vec::new(),
            notes,
        }
    }

    pub fn empty_inventory() -> Self {
        Self::new(Vec::new(), EMPTY_INVENTORY_NOTE.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&WorkerError> for ErrorResponse {
    fn from(err: &WorkerError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Classification(ClassificationResponse),
    Retrieval(RetrievalResponse),
    Error(ErrorResponse),
}

impl Response {
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }

    /// One JSON document, without the trailing newline.
    pub fn to_line(&self) -> String {
        match serde_json::to_string(self) {
            Ok(line) => line,
            Err(e) => {
                let fallback = ErrorResponse::from(&WorkerError::Serialization(e.to_string()));
                serde_json::to_string(&fallback)
                    .unwrap_or_else(|_| r#"{"error":"serialization failed"}"#.to_string())
            }
        }
    }
}

impl From<WorkerError> for Response {
    fn from(err: WorkerError) -> Self {
        Response::Error(ErrorResponse::from(&err))
    }
}
