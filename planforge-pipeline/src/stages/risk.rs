//! Risk register generation from free text.
//!
//! This stage is best-effort end to end: search failures degrade to a stub
//! research context, and generation failures fall back to a canned register.
//! It never aborts the pipeline.

use planforge_core::{ProjectState, Result, RiskItem, TextGenerator, WebSearch};

const DEFAULT_OWNER: &str = "Project Manager";

/// Parse the labeled free-text risk format into structured items.
///
/// Records are delimited by the literal `"RISK "` marker. Within a record,
/// each line is split on its first colon and the key matched by substring
/// containment, so `"1. Description"` and `"Response Strategy (primary)"`
/// both land in the right field. A record without a description is dropped.
/// An empty result yields a single generic fallback risk.
pub fn parse_risk_text(risk_text: &str) -> Vec<RiskItem> {
    let mut risks = Vec::new();

    for chunk in risk_text.trim().split("RISK ") {
        if chunk.trim().is_empty() {
            continue;
        }

        let mut description = String::new();
        let mut probability = String::new();
        let mut impact = String::new();
        let mut response_strategy = String::new();
        let mut owner = String::new();

        for line in chunk.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            if key.contains("description") {
                description = value.to_string();
            } else if key.contains("probability") {
                probability = value.to_string();
            } else if key.contains("impact") {
                impact = value.to_string();
            } else if key.contains("response strategy") {
                response_strategy = value.to_string();
            } else if key.contains("owner") {
                owner = value.to_string();
            }
        }

        if description.is_empty() {
            continue;
        }
        if owner.is_empty() {
            owner = DEFAULT_OWNER.to_string();
        }
        risks.push(RiskItem {
            risk_description: description,
            probability,
            impact,
            response_strategy,
            owner,
        });
    }

    if risks.is_empty() {
        risks.push(RiskItem {
            risk_description: "Project scope may expand beyond initial requirements.".to_string(),
            probability: "Medium".to_string(),
            impact: "High".to_string(),
            response_strategy: "Mitigate: Implement strict change control process.".to_string(),
            owner: DEFAULT_OWNER.to_string(),
        });
    }

    risks
}

fn fallback_register() -> Vec<RiskItem> {
    vec![
        RiskItem {
            risk_description: "Project scope may expand beyond initial requirements, leading to schedule delays.".to_string(),
            probability: "Medium".to_string(),
            impact: "High".to_string(),
            response_strategy: "Mitigate: Implement strict change control process.".to_string(),
            owner: DEFAULT_OWNER.to_string(),
        },
        RiskItem {
            risk_description: "Technical challenges in implementation may arise.".to_string(),
            probability: "High".to_string(),
            impact: "Medium".to_string(),
            response_strategy: "Mitigate: Conduct early prototyping and testing.".to_string(),
            owner: "Technical Lead".to_string(),
        },
    ]
}

async fn research_context(search: &dyn WebSearch, project_name: &str) -> String {
    let query =
        format!("common project risks and mitigation strategies for {project_name}");
    match search.search(&query, 3).await {
        Ok(snippets) if !snippets.is_empty() => snippets.join("\n\n"),
        Ok(_) => "Research unavailable.".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "risk research failed, continuing without it");
            "Research unavailable.".to_string()
        }
    }
}

async fn generate_risks(
    generator: &dyn TextGenerator,
    state: &ProjectState,
    research: &str,
) -> planforge_core::Result<Vec<RiskItem>> {
    let deliverables = state
        .documents
        .wbs
        .as_ref()
        .map(|w| {
            w.wbs_items
                .iter()
                .map(|item| item.task_name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    let prompt = format!(
        "You are a world-class PMP-certified risk manager. \
Identify at least 5 project risks covering technical, schedule, resource, scope, \
stakeholder and external categories. Use EXACTLY this format for each risk:\n\n\
RISK N:\nDescription: <one sentence>\nProbability: <Low|Medium|High>\n\
Impact: <Low|Medium|High>\nResponse Strategy: <Avoid|Mitigate|Transfer|Accept>: <action>\n\
Owner: <role>\n\n\
Project Name: {}\nProject Description: {}\nMajor Deliverables: {deliverables}\n\n\
Research Context:\n{research}",
        state.project_input.project_title, state.project_input.project_description
    );

    let text = generator.generate_text(&prompt).await?;
    Ok(parse_risk_text(&text))
}

pub(crate) async fn generate_risk_register(
    generator: &dyn TextGenerator,
    search: &dyn WebSearch,
    mut state: ProjectState,
) -> Result<ProjectState> {
    tracing::info!(project_id = %state.project_id, "generating risk register");

    let research = research_context(search, &state.project_input.project_title).await;
    let risks = match generate_risks(generator, &state, &research).await {
        Ok(risks) => risks,
        Err(e) => {
            tracing::warn!(error = %e, "risk generation failed, using fallback register");
            fallback_register()
        }
    };

    state.documents.risk_register = Some(planforge_core::RiskRegister { risks });
    Ok(state)
}
