//! Typed document kinds produced by the pipeline stages.
//!
//! Each structured-output kind carries a machine-readable JSON schema
//! descriptor that is handed to the text-generation capability alongside the
//! prompt, and validated on receipt by deserializing into the typed record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A document kind the text-generation capability can produce as schema JSON.
pub trait StructuredDocument: DeserializeOwned {
    /// The shape descriptor sent with the generation request.
    fn json_schema() -> Value;
}

fn string_array(description: &str) -> Value {
    json!({ "type": "array", "items": { "type": "string" }, "description": description })
}

/// Project charter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Charter {
    /// The official title of the project.
    pub project_title: String,
    /// A brief summary of the project.
    pub project_description: String,
    /// 3-5 key project objectives.
    #[serde(default)]
    pub objectives: Vec<String>,
    /// High-level project requirements.
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Key stakeholders.
    #[serde(default)]
    pub stakeholders: Vec<String>,
    /// Estimated project budget.
    pub budget: f64,
    /// Estimated project timeline in weeks.
    pub timeline_weeks: u32,
}

impl StructuredDocument for Charter {
    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "project_title": { "type": "string", "description": "The official title of the project." },
                "project_description": { "type": "string", "description": "A brief summary of the project." },
                "objectives": string_array("A list of 3-5 key project objectives."),
                "requirements": string_array("A list of high-level project requirements."),
                "stakeholders": string_array("A list of key stakeholders."),
                "budget": { "type": "number", "description": "The estimated project budget." },
                "timeline_weeks": { "type": "integer", "description": "The estimated project timeline in weeks." }
            },
            "required": ["project_title", "project_description", "objectives", "requirements", "stakeholders", "budget", "timeline_weeks"]
        })
    }
}

/// Project scope statement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scope {
    /// Detailed description of the project's scope.
    #[serde(default)]
    pub description: String,
    /// Key project deliverables. The WBS loop iterates over these in order.
    #[serde(default)]
    pub deliverables: Vec<String>,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    /// What is explicitly out of scope.
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub assumptions: Vec<String>,
}

impl StructuredDocument for Scope {
    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "description": { "type": "string", "description": "A detailed description of the project's scope." },
                "deliverables": string_array("A list of key project deliverables."),
                "acceptance_criteria": string_array("Criteria for accepting the project deliverables."),
                "exclusions": string_array("What is explicitly out of scope for the project."),
                "constraints": string_array("Project constraints (e.g., budget, time, resources)."),
                "assumptions": string_array("Project assumptions made during planning.")
            },
            "required": ["description", "deliverables", "acceptance_criteria", "exclusions", "constraints", "assumptions"]
        })
    }
}

/// One work package. Recursive: owns an ordered list of child items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WbsItem {
    /// The name of the work package or task.
    pub task_name: String,
    /// Sub-tasks for this item, in execution order.
    #[serde(default)]
    pub sub_tasks: Vec<WbsItem>,
}

impl WbsItem {
    pub fn leaf(task_name: impl Into<String>) -> Self {
        Self { task_name: task_name.into(), sub_tasks: vec![] }
    }
}

/// The work breakdown structure document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wbs {
    /// The root items of the work breakdown structure.
    #[serde(default)]
    pub wbs_items: Vec<WbsItem>,
}

impl StructuredDocument for Wbs {
    fn json_schema() -> Value {
        // Self-referencing node type, expressed with a local $defs reference.
        json!({
            "type": "object",
            "properties": {
                "wbs_items": {
                    "type": "array",
                    "items": { "$ref": "#/$defs/wbs_item" },
                    "description": "The root items of the Work Breakdown Structure."
                }
            },
            "required": ["wbs_items"],
            "$defs": {
                "wbs_item": {
                    "type": "object",
                    "properties": {
                        "task_name": { "type": "string", "description": "The name of the work package or task." },
                        "sub_tasks": {
                            "type": "array",
                            "items": { "$ref": "#/$defs/wbs_item" },
                            "description": "A list of sub-tasks for this item."
                        }
                    },
                    "required": ["task_name"]
                }
            }
        })
    }
}

fn default_owner() -> String {
    "Project Manager".to_string()
}

/// One entry in the risk register. Produced by free-text parsing, not schema
/// JSON, so every field except the description may be absent in raw output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskItem {
    pub risk_description: String,
    #[serde(default)]
    pub probability: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub response_strategy: String,
    #[serde(default = "default_owner")]
    pub owner: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskRegister {
    pub risks: Vec<RiskItem>,
}

/// A scheduled task with computed dates, for timeline visualization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttTask {
    /// Dotted hierarchical identifier, e.g. "2.1".
    pub id: String,
    pub name: String,
    /// Start date in YYYY-MM-DD format.
    pub start: String,
    /// End date in YYYY-MM-DD format.
    pub end: String,
    pub duration_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub tasks: Vec<GanttTask>,
    /// Calculated start date of the entire project.
    pub project_start_date: String,
    /// Calculated end date of the entire project.
    pub project_end_date: String,
}

/// One duration estimate from the scheduling model call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDuration {
    pub task_name: String,
    /// Estimated business days for this task.
    pub estimated_duration_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationEstimation {
    pub durations: Vec<TaskDuration>,
}

impl StructuredDocument for DurationEstimation {
    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "durations": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "task_name": { "type": "string", "description": "The name of the task." },
                            "estimated_duration_days": { "type": "integer", "description": "The expert estimation of how many business days this task will take." }
                        },
                        "required": ["task_name", "estimated_duration_days"]
                    }
                }
            },
            "required": ["durations"]
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeholderItem {
    /// The stakeholder or stakeholder group.
    pub name: String,
    /// Their role in the project (e.g., Project Sponsor, End User).
    pub role: String,
    /// Their primary interest or concern in the project.
    pub interest: String,
    /// Their level of influence (e.g., High, Medium, Low).
    pub influence: String,
    /// Strategy for engaging them (e.g., Manage Closely, Keep Informed).
    pub engagement_strategy: String,
}

/// The complete stakeholder analysis document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StakeholderAnalysis {
    pub stakeholders: Vec<StakeholderItem>,
}

impl StructuredDocument for StakeholderAnalysis {
    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "stakeholders": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string", "description": "The name of the stakeholder or stakeholder group." },
                            "role": { "type": "string", "description": "Their role in the project (e.g., Project Sponsor, End User)." },
                            "interest": { "type": "string", "description": "A brief description of their primary interest or concern in the project." },
                            "influence": { "type": "string", "description": "Their level of influence on the project (e.g., High, Medium, Low)." },
                            "engagement_strategy": { "type": "string", "description": "The strategy for engaging with this stakeholder (e.g., Manage Closely, Keep Informed)." }
                        },
                        "required": ["name", "role", "interest", "influence", "engagement_strategy"]
                    }
                }
            },
            "required": ["stakeholders"]
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunicationItem {
    /// The stakeholder or group to be communicated with.
    pub stakeholder: String,
    /// What is communicated (e.g., Project Status Update, Risk Alerts).
    pub information: String,
    /// Method of communication (e.g., Email, Weekly Meeting, Dashboard).
    pub method: String,
    /// How often (e.g., Weekly, Monthly, As Needed).
    pub frequency: String,
    /// The person responsible for the communication.
    pub owner: String,
}

/// The complete project communication plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunicationPlan {
    pub communications: Vec<CommunicationItem>,
}

impl StructuredDocument for CommunicationPlan {
    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "communications": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "stakeholder": { "type": "string", "description": "The stakeholder or group to be communicated with." },
                            "information": { "type": "string", "description": "The type of information to be communicated (e.g., Project Status Update, Risk Alerts)." },
                            "method": { "type": "string", "description": "The method of communication (e.g., Email, Weekly Meeting, Dashboard)." },
                            "frequency": { "type": "string", "description": "How often the communication will occur (e.g., Weekly, Monthly, As Needed)." },
                            "owner": { "type": "string", "description": "The person responsible for the communication (e.g., Project Manager, Tech Lead)." }
                        },
                        "required": ["stakeholder", "information", "method", "frequency", "owner"]
                    }
                }
            },
            "required": ["communications"]
        })
    }
}
