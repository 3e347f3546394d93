//! Notes management per profile and company.

use std::collections::BTreeMap;

use chrono::Utc;
use futures::TryStreamExt;
use opendal::{EntryMode, Operator};
use serde::{Deserialize, Serialize};

use crate::profile::is_valid_profile_slug;

const NOTES_ROOT: &str = "notes";

/// A persisted note value. Untagged so both historical JSON shapes keep
/// deserializing: bare strings predate the structured records.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum NoteValue {
    Legacy(String),
    Structured(StructuredNote),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct StructuredNote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// All notes of one profile, keyed by company key.
pub type NotesCollection = BTreeMap<String, NoteValue>;

#[derive(thiserror::Error, Debug)]
pub enum NotesError {
    #[error("invalid profile slug: {0:?}")]
    InvalidProfile(String),

    #[error("malformed notes file for profile '{profile}': {source}")]
    Parse {
        profile: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode notes for profile '{profile}': {source}")]
    Encode {
        profile: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Storage(#[from] opendal::Error),
}

fn profile_path(profile: &str) -> Result<String, NotesError> {
    if !is_valid_profile_slug(profile) {
        return Err(NotesError::InvalidProfile(profile.to_string()));
    }
    Ok(format!("{}/{}.json", NOTES_ROOT, profile))
}

/// Create the notes directory. Called once when the shell opens the store.
pub async fn ensure_notes_root(op: &Operator) -> Result<(), NotesError> {
    op.create_dir(&format!("{}/", NOTES_ROOT)).await?;
    Ok(())
}

/// Load notes for a given user profile. A missing file is an empty
/// collection, not an error.
pub async fn load_notes(op: &Operator, profile: &str) -> Result<NotesCollection, NotesError> {
    let path = profile_path(profile)?;
    if !op.exists(&path).await? {
        return Ok(NotesCollection::new());
    }

    let bytes = op.read(&path).await?;
    serde_json::from_slice(&bytes.to_vec()).map_err(|source| NotesError::Parse {
        profile: profile.to_string(),
        source,
    })
}

/// Save notes for a given user profile, overwriting the previous file.
pub async fn save_notes(
    op: &Operator,
    profile: &str,
    notes: &NotesCollection,
) -> Result<(), NotesError> {
    let path = profile_path(profile)?;
    let json = serde_json::to_vec_pretty(notes).map_err(|source| NotesError::Encode {
        profile: profile.to_string(),
        source,
    })?;
    op.write(&path, json).await?;
    tracing::debug!(profile, entries = notes.len(), "saved notes");
    Ok(())
}

/// Delete all notes for a profile. No-op if the profile never had notes.
pub async fn reset_notes(op: &Operator, profile: &str) -> Result<(), NotesError> {
    let path = profile_path(profile)?;
    if op.exists(&path).await? {
        op.delete(&path).await?;
        tracing::debug!(profile, "reset notes");
    }
    Ok(())
}

/// Create a stable key for a company. Case-insensitive on both parts.
pub fn company_key(name: &str, country: &str) -> String {
    format!("{}__{}", name, country).to_lowercase()
}

/// Add or update the note for a company.
///
/// Read-modify-write with no locking: last write wins when two callers hit
/// the same profile, so a single interactive writer per profile is a hard
/// precondition.
pub async fn upsert_note(
    op: &Operator,
    profile: &str,
    company_name: &str,
    country: &str,
    note: NoteValue,
) -> Result<(), NotesError> {
    let mut notes = load_notes(op, profile).await?;
    let key = company_key(company_name, country);
    notes.insert(key, stamp_updated_at(note));
    save_notes(op, profile, &notes).await
}

// Structured notes missing `updated_at` get stamped at upsert time; a
// caller-supplied timestamp wins. Legacy strings have no field to carry one.
fn stamp_updated_at(note: NoteValue) -> NoteValue {
    match note {
        NoteValue::Structured(mut record) => {
            if record.updated_at.is_none() {
                record.updated_at = Some(Utc::now().to_rfc3339());
            }
            NoteValue::Structured(record)
        }
        legacy => legacy,
    }
}

/// Profiles that currently have a persisted notes file.
pub async fn list_profiles(op: &Operator) -> Result<Vec<String>, NotesError> {
    let root = format!("{}/", NOTES_ROOT);
    if !op.exists(&root).await? {
        return Ok(vec![]);
    }

    let mut lister = op.lister(&root).await?;
    let mut profiles = Vec::new();

    while let Some(entry) = lister.try_next().await? {
        if entry.metadata().mode() != EntryMode::FILE {
            continue;
        }
        let name = entry.name().split('/').next_back().unwrap_or("");
        if let Some(slug) = name.strip_suffix(".json") {
            if !slug.is_empty() {
                profiles.push(slug.to_string());
            }
        }
    }

    profiles.sort();
    Ok(profiles)
}
