//! Markdown rendering for generated documents.
//!
//! Each document kind renders to a standalone markdown file with the same
//! section layout the API's consumers expect: headed sections with bullet
//! lists for the narrative documents, tables for the register-style ones,
//! and a nested list for the WBS.

use planforge_core::{
    Charter, CommunicationPlan, DocumentKind, Documents, RiskRegister, Schedule, Scope,
    StakeholderAnalysis, WbsItem,
};

/// Render one document kind from the document map. `None` when the slot
/// is empty.
pub fn render(kind: DocumentKind, project_name: &str, documents: &Documents) -> Option<String> {
    match kind {
        DocumentKind::Charter => documents.charter.as_ref().map(|d| render_charter(project_name, d)),
        DocumentKind::Scope => documents.scope.as_ref().map(|d| render_scope(project_name, d)),
        DocumentKind::Wbs => documents
            .wbs
            .as_ref()
            .map(|d| render_wbs(project_name, &d.wbs_items)),
        DocumentKind::RiskRegister => documents
            .risk_register
            .as_ref()
            .map(|d| render_risk_register(project_name, d)),
        DocumentKind::Schedule => documents
            .schedule
            .as_ref()
            .map(|d| render_schedule(project_name, d)),
        DocumentKind::StakeholderAnalysis => documents
            .stakeholder_analysis
            .as_ref()
            .map(|d| render_stakeholder_analysis(project_name, d)),
        DocumentKind::CommunicationPlan => documents
            .communication_plan
            .as_ref()
            .map(|d| render_communication_plan(project_name, d)),
    }
}

fn push_section(out: &mut String, title: &str, body: &str) {
    out.push_str(&format!("## {title}\n\n{body}\n\n"));
}

fn push_list_section(out: &mut String, title: &str, items: &[String]) {
    let body = if items.is_empty() {
        "N/A".to_string()
    } else {
        items.iter().map(|i| format!("- {i}")).collect::<Vec<_>>().join("\n")
    };
    push_section(out, title, &body);
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn render_charter(project_name: &str, charter: &Charter) -> String {
    let mut out = format!("# Project Charter: {project_name}\n\n");
    push_section(&mut out, "Project Description", &charter.project_description);
    push_list_section(&mut out, "Key Objectives", &charter.objectives);
    push_list_section(&mut out, "High-Level Requirements", &charter.requirements);
    push_list_section(&mut out, "Key Stakeholders", &charter.stakeholders);
    push_section(&mut out, "Budget", &format!("${:.2}", charter.budget));
    push_section(&mut out, "Timeline", &format!("{} weeks", charter.timeline_weeks));
    out
}

fn render_scope(project_name: &str, scope: &Scope) -> String {
    let mut out = format!("# Scope Statement: {project_name}\n\n");
    push_section(&mut out, "Project Scope Description", &scope.description);
    push_list_section(&mut out, "Key Deliverables", &scope.deliverables);
    push_list_section(&mut out, "Acceptance Criteria", &scope.acceptance_criteria);
    push_list_section(&mut out, "Exclusions", &scope.exclusions);
    push_list_section(&mut out, "Constraints", &scope.constraints);
    push_list_section(&mut out, "Assumptions", &scope.assumptions);
    out
}

fn push_wbs_items(out: &mut String, items: &[WbsItem], level: usize) {
    for item in items {
        out.push_str(&format!("{}- {}\n", "  ".repeat(level), item.task_name));
        push_wbs_items(out, &item.sub_tasks, level + 1);
    }
}

fn render_wbs(project_name: &str, items: &[WbsItem]) -> String {
    let mut out = format!(
        "# Work Breakdown Structure: {project_name}\n\n\
This document breaks down the project deliverables into smaller, more manageable components.\n\n"
    );
    push_wbs_items(&mut out, items, 0);
    out
}

fn render_risk_register(project_name: &str, register: &RiskRegister) -> String {
    let mut out = format!(
        "# Risk Register: {project_name}\n\n\
This document identifies potential risks, their assessment, and planned response strategies.\n\n\
| Risk Description | Probability | Impact | Response Strategy | Owner |\n\
|---|---|---|---|---|\n"
    );
    for risk in &register.risks {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            cell(&risk.risk_description),
            cell(&risk.probability),
            cell(&risk.impact),
            cell(&risk.response_strategy),
            cell(&risk.owner)
        ));
    }
    out
}

fn render_schedule(project_name: &str, schedule: &Schedule) -> String {
    let mut out = format!(
        "# Project Schedule: {project_name}\n\n\
Project Window: {} to {}\n\n\
| ID | Task | Start | End | Duration (days) |\n\
|---|---|---|---|---|\n",
        schedule.project_start_date, schedule.project_end_date
    );
    for task in &schedule.tasks {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            task.id,
            cell(&task.name),
            task.start,
            task.end,
            task.duration_days
        ));
    }
    out
}

fn render_stakeholder_analysis(project_name: &str, analysis: &StakeholderAnalysis) -> String {
    let mut out = format!(
        "# Stakeholder Analysis: {project_name}\n\n\
| Name | Role | Interest | Influence | Engagement Strategy |\n\
|---|---|---|---|---|\n"
    );
    for s in &analysis.stakeholders {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            cell(&s.name),
            cell(&s.role),
            cell(&s.interest),
            cell(&s.influence),
            cell(&s.engagement_strategy)
        ));
    }
    out
}

fn render_communication_plan(project_name: &str, plan: &CommunicationPlan) -> String {
    let mut out = format!(
        "# Communication Plan: {project_name}\n\n\
| Stakeholder | Information | Method | Frequency | Owner |\n\
|---|---|---|---|---|\n"
    );
    for c in &plan.communications {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            cell(&c.stakeholder),
            cell(&c.information),
            cell(&c.method),
            cell(&c.frequency),
            cell(&c.owner)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use planforge_core::RiskItem;

    #[test]
    fn test_empty_slot_renders_none() {
        let documents = Documents::default();
        assert!(render(DocumentKind::Charter, "P", &documents).is_none());
    }

    #[test]
    fn test_charter_sections() {
        let mut documents = Documents::default();
        documents.charter = Some(Charter {
            project_title: "P".to_string(),
            project_description: "Desc".to_string(),
            objectives: vec!["O1".to_string()],
            requirements: vec![],
            stakeholders: vec!["S1".to_string()],
            budget: 1000.0,
            timeline_weeks: 8,
        });

        let md = render(DocumentKind::Charter, "P", &documents).unwrap();
        assert!(md.starts_with("# Project Charter: P"));
        assert!(md.contains("## Key Objectives\n\n- O1"));
        assert!(md.contains("## High-Level Requirements\n\nN/A"));
        assert!(md.contains("$1000.00"));
        assert!(md.contains("8 weeks"));
    }

    #[test]
    fn test_wbs_nested_indentation() {
        let md = render_wbs(
            "P",
            &[WbsItem {
                task_name: "Root".to_string(),
                sub_tasks: vec![WbsItem::leaf("Child")],
            }],
        );
        assert!(md.contains("- Root\n  - Child\n"));
    }

    #[test]
    fn test_risk_table_escapes_pipes() {
        let register = RiskRegister {
            risks: vec![RiskItem {
                risk_description: "A | B".to_string(),
                probability: "Low".to_string(),
                impact: "Low".to_string(),
                response_strategy: "Accept".to_string(),
                owner: "PM".to_string(),
            }],
        };
        let md = render_risk_register("P", &register);
        assert!(md.contains("| A \\| B | Low | Low | Accept | PM |"));
    }
}
