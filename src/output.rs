//! Plain-text and JSON rendering of a session

use serde_json::{json, Map, Value};
use std::fmt::Write as _;

use crate::state::{FieldId, FormRecord, FormSession, StepValidation, WizardStep};
use crate::storage::SessionId;

fn validation_label(validation: Option<StepValidation>) -> &'static str {
    match validation {
        None => "not checked",
        Some(v) if v.passes() => "complete, valid",
        Some(v) if v.is_complete => "complete, invalid",
        Some(v) if v.is_valid => "incomplete",
        Some(_) => "incomplete, invalid",
    }
}

/// One line per step with its validation state and how much is filled in
pub fn render_progress(session_id: SessionId, session: &FormSession) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Session {session_id}");

    for step in WizardStep::ALL {
        let index = step.index();
        let marker = if index == session.current_step() { '>' } else { ' ' };
        let filled = session.form_data().filled_count(step);
        let total = FieldId::in_step(step).count();
        let _ = writeln!(
            out,
            "{marker} {index}. {:<30} {:<20} {filled}/{total} filled",
            step.title(),
            validation_label(session.step_validation(index)),
        );
    }
    out
}

/// Field values of one step
pub fn render_step_fields(record: &FormRecord, step: WizardStep) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}. {}", step.index(), step.title());
    for id in FieldId::in_step(step) {
        let value = record.value(id);
        let shown = if value.is_blank() {
            "-".to_string()
        } else {
            value.display_value()
        };
        let _ = writeln!(out, "  {:<28} {:<32} {shown}", id.name(), id.label());
    }
    out
}

/// Field catalogue: wire name, kind and label
pub fn render_field_list(step: Option<WizardStep>) -> String {
    let mut out = String::new();
    for id in FieldId::ALL
        .iter()
        .copied()
        .filter(|id| step.map_or(true, |s| id.step() == s))
    {
        let _ = writeln!(
            out,
            "{:<28} {:<8} {:<2} {}",
            id.name(),
            id.kind().label(),
            id.step().index(),
            id.label()
        );
    }
    out
}

pub fn progress_json(session_id: SessionId, session: &FormSession) -> Value {
    json!({
        "sessionId": session_id,
        "currentStep": session.current_step(),
        "maxSteps": session.max_steps(),
        "stepValidations": session.step_validations(),
        "formData": session.form_data(),
    })
}

/// The record's wire-named values restricted to one step
pub fn step_fields_json(record: &FormRecord, step: WizardStep) -> Value {
    let all = serde_json::to_value(record).unwrap_or(Value::Null);
    let fields: Map<String, Value> = FieldId::in_step(step)
        .map(|id| {
            let value = all.get(id.name()).cloned().unwrap_or(Value::Null);
            (id.name().to_string(), value)
        })
        .collect();
    Value::Object(fields)
}

pub fn field_list_json(step: Option<WizardStep>) -> Value {
    let fields: Vec<Value> = FieldId::ALL
        .iter()
        .copied()
        .filter(|id| step.map_or(true, |s| id.step() == s))
        .map(|id| {
            json!({
                "name": id.name(),
                "label": id.label(),
                "kind": id.kind(),
                "step": id.step().index(),
            })
        })
        .collect();
    Value::Array(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Answer, FieldUpdate};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_progress_marks_current_step_and_validations() {
        let id = SessionId::new();
        let mut session = FormSession::new();
        session.update_field(FieldUpdate::PropertyAddress("123 Main St".to_string()));
        session.update_step_validation(0, true, true);
        session.update_step_validation(1, true, false);
        session.set_current_step(1);

        let text = render_progress(id, &session);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], format!("Session {id}"));
        assert!(lines[1].starts_with("  0. Subject Property"));
        assert!(lines[1].contains("complete, valid"));
        assert!(lines[1].ends_with("1/7 filled"));
        assert!(lines[2].starts_with("> 1. Zoning District"));
        assert!(lines[2].contains("complete, invalid"));
        assert!(lines[3].contains("not checked"));
    }

    #[test]
    fn test_step_fields_show_blanks_as_dash() {
        let mut record = FormRecord::new();
        record.apply(FieldUpdate::IsPermittedUse(Answer::No));

        let text = render_step_fields(&record, WizardStep::ZoningDistrict);

        assert!(text.starts_with("1. Zoning District\n"));
        let permitted = text
            .lines()
            .find(|line| line.contains("isPermittedUse"))
            .unwrap();
        assert!(permitted.ends_with(" no"));
        let why = text.lines().find(|line| line.contains("whyPermitted")).unwrap();
        assert!(why.ends_with(" -"));
    }

    #[test]
    fn test_field_list_filtered_by_step() {
        let text = render_field_list(Some(WizardStep::HeightRestrictions));
        assert_eq!(text.lines().count(), 10);
        assert!(text.contains("heightRestrictionCompliant"));
        assert!(!text.contains("propertyAddress"));
    }

    #[test]
    fn test_progress_json() {
        let id = SessionId::new();
        let mut session = FormSession::new();
        session.update_step_validation(1, false, false);

        let value = progress_json(id, &session);

        assert_eq!(value["sessionId"], id.to_string());
        assert_eq!(value["currentStep"], 0);
        assert_eq!(value["maxSteps"], 5);
        assert_eq!(
            value["stepValidations"],
            json!([null, {"isComplete": false, "isValid": false}])
        );
        assert_eq!(value["formData"]["county"], "");
    }

    #[test]
    fn test_step_fields_json_only_contains_step_fields() {
        let mut record = FormRecord::new();
        record.apply(FieldUpdate::EastZoning("C-1".to_string()));

        let value = step_fields_json(&record, WizardStep::AdjacentZoning);
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 10);
        assert_eq!(object["eastZoning"], "C-1");
        assert!(!object.contains_key("county"));
    }

    #[test]
    fn test_field_list_json_kinds() {
        let value = field_list_json(None);
        let fields = value.as_array().unwrap();
        assert_eq!(fields.len(), FieldId::ALL.len());
        assert_eq!(fields[5]["name"], "yearBuilt");
        assert_eq!(fields[5]["kind"], "numeric");
        assert_eq!(fields[5]["step"], 0);
    }
}
