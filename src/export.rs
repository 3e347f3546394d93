//! Flattening a notes collection into the table the shell renders and the
//! CSV it offers for download.

use anyhow::Result;
use chrono::DateTime;
use serde::Serialize;

use crate::notes::{NoteValue, NotesCollection};

/// One row of the notes overview table.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct NoteRow {
    pub company: String,
    pub tag: String,
    pub note: String,
    pub updated: String,
    #[serde(rename = "URL")]
    pub url: String,
}

fn flatten(key: &str, value: &NoteValue) -> NoteRow {
    match value {
        NoteValue::Legacy(text) => NoteRow {
            company: key.to_string(),
            tag: String::new(),
            note: text.clone(),
            updated: String::new(),
            url: String::new(),
        },
        NoteValue::Structured(record) => NoteRow {
            company: key.to_string(),
            tag: record.tag.clone().unwrap_or_default(),
            note: record.note.clone().unwrap_or_default(),
            updated: record.updated_at.clone().unwrap_or_default(),
            url: record.url.clone().unwrap_or_default(),
        },
    }
}

/// Flatten a collection into display rows, newest update first. Rows whose
/// timestamp does not parse as RFC 3339 sort after the ones that do, keeping
/// their relative order.
pub fn notes_to_rows(notes: &NotesCollection) -> Vec<NoteRow> {
    let mut rows: Vec<_> = notes
        .iter()
        .map(|(key, value)| {
            let row = flatten(key, value);
            let parsed = DateTime::parse_from_rfc3339(&row.updated).ok();
            (parsed, row)
        })
        .collect();

    rows.sort_by(|a, b| match (&a.0, &b.0) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    rows.into_iter().map(|(_, row)| row).collect()
}

/// Render the collection as CSV with the header the shell's download button
/// expects.
pub fn notes_to_csv(notes: &NotesCollection) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Company", "Tag", "Note", "Updated", "URL"])?;
    for row in notes_to_rows(notes) {
        writer.write_record([&row.company, &row.tag, &row.note, &row.updated, &row.url])?;
    }
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}
