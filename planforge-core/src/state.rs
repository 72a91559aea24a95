//! The mutable project record threaded through the pipeline.

use crate::documents::{
    Charter, CommunicationPlan, RiskRegister, Schedule, Scope, StakeholderAnalysis, Wbs, WbsItem,
};
use crate::input::ProjectInput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The document kinds the pipeline produces, keyed by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Charter,
    Scope,
    Wbs,
    RiskRegister,
    Schedule,
    StakeholderAnalysis,
    CommunicationPlan,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 7] = [
        DocumentKind::Charter,
        DocumentKind::Scope,
        DocumentKind::Wbs,
        DocumentKind::RiskRegister,
        DocumentKind::Schedule,
        DocumentKind::StakeholderAnalysis,
        DocumentKind::CommunicationPlan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Charter => "charter",
            DocumentKind::Scope => "scope",
            DocumentKind::Wbs => "wbs",
            DocumentKind::RiskRegister => "risk-register",
            DocumentKind::Schedule => "schedule",
            DocumentKind::StakeholderAnalysis => "stakeholder-analysis",
            DocumentKind::CommunicationPlan => "communication-plan",
        }
    }

    pub fn parse(s: &str) -> Option<DocumentKind> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The accumulated document set. One slot per kind; slots are written at
/// most once by the stage that owns them and never removed mid-pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Documents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charter: Option<Charter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wbs: Option<Wbs>,
    #[serde(
        rename = "risk-register",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub risk_register: Option<RiskRegister>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(
        rename = "stakeholder-analysis",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stakeholder_analysis: Option<StakeholderAnalysis>,
    #[serde(
        rename = "communication-plan",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub communication_plan: Option<CommunicationPlan>,
}

impl Documents {
    /// Whether the slot for the given kind has been written.
    pub fn contains(&self, kind: DocumentKind) -> bool {
        match kind {
            DocumentKind::Charter => self.charter.is_some(),
            DocumentKind::Scope => self.scope.is_some(),
            DocumentKind::Wbs => self.wbs.is_some(),
            DocumentKind::RiskRegister => self.risk_register.is_some(),
            DocumentKind::Schedule => self.schedule.is_some(),
            DocumentKind::StakeholderAnalysis => self.stakeholder_analysis.is_some(),
            DocumentKind::CommunicationPlan => self.communication_plan.is_some(),
        }
    }

    /// Kinds that have been produced so far, in canonical order.
    pub fn kinds(&self) -> Vec<DocumentKind> {
        DocumentKind::ALL.iter().copied().filter(|k| self.contains(*k)).collect()
    }
}

/// The unit threaded through the pipeline: one record per project run.
///
/// Created at project submission with an empty document set; each stage
/// exclusively owns the document slots it is responsible for. Persisted by
/// the host's store at lifecycle boundaries, never by the pipeline itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectState {
    /// Opaque identifier, assigned once at submission.
    pub project_id: String,
    pub project_input: ProjectInput,
    #[serde(default)]
    pub documents: Documents,
    /// Deliverables still pending in the WBS loop, consumed front-first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deliverables_to_process: Vec<String>,
    /// The deliverable being processed this iteration. Undefined outside
    /// the loop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_deliverable: Option<String>,
    /// Root WBS items accumulated across loop iterations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wbs_accumulator: Vec<WbsItem>,
}

impl ProjectState {
    pub fn new(project_id: impl Into<String>, project_input: ProjectInput) -> Self {
        Self {
            project_id: project_id.into(),
            project_input,
            documents: Documents::default(),
            deliverables_to_process: vec![],
            current_deliverable: None,
            wbs_accumulator: vec![],
        }
    }
}
