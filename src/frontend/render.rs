use serde::Serialize;

use super::{Field, Form};
use crate::{
    backend::Report,
    topology::{current_label, Output, Resolution, Snapshot},
};

#[derive(Serialize)]
struct TomlView<'s> {
    outputs: &'s [Output],
}

/// One block per output: name, current resolution and the offered ones with
/// the selected one marked by `*`.
pub fn form(form: &Form) -> String {
    let mut text = String::new();
    for field in form.fields() {
        push_field(&mut text, field);
    }

    if text.is_empty() {
        text.push_str("No connected outputs.\n");
    }

    text
}

fn push_field(text: &mut String, field: &Field) {
    text.push_str(&format!(
        "{}: {}\n",
        field.output,
        current_label(field.current.as_ref())
    ));

    let choices = field.choices.as_slice();
    if choices.is_empty() {
        for label in field.choices.labels() {
            text.push_str(&format!("    {}\n", label));
        }
        return;
    }

    for choice in choices {
        let marker = if field.selected == Some(*choice) { '*' } else { ' ' };
        text.push_str(&format!("  {} {}\n", marker, choice));
    }
}

pub fn snapshot_toml(snapshot: &Snapshot) -> Result<String, toml::ser::Error> {
    toml::to_string(&TomlView {
        outputs: snapshot.outputs(),
    })
}

pub fn resolutions(list: &[Resolution]) -> String {
    if list.is_empty() {
        return "No common resolution found.\n".to_string();
    }

    list.iter().map(|res| format!("{}\n", res)).collect()
}

/// One line per step, skipped action and note.
pub fn report(report: &Report) -> String {
    let steps = report.steps.iter().map(|step| match &step.result {
        Ok(()) => format!("ok      {}\n", step.action),
        Err(err) => format!("failed  {}: {}\n", step.action, err),
    });
    let skipped = report
        .skipped
        .iter()
        .map(|action| format!("skipped {}\n", action));
    let notes = report.notes.iter().map(|note| format!("{}\n", note));

    steps.chain(skipped).chain(notes).collect()
}
