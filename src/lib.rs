#![warn(warnings)]
#![deny(clippy::all)]

use opendal::Operator;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use pyo3::IntoPyObjectExt;
use serde_json::Value;

pub mod export;
pub mod labels;
pub mod notes;
pub mod profile;
pub mod storage;

use notes::{NoteValue, NotesCollection, NotesError, StructuredNote};

// --- Helpers ---

fn get_operator(_py: Python<'_>, config: &Bound<'_, PyDict>) -> PyResult<Operator> {
    let uri = config
        .get_item("uri")?
        .ok_or_else(|| PyValueError::new_err("Missing 'uri' in storage config"))?
        .extract::<String>()?;

    storage::create_operator_from_uri(&uri).map_err(|e| PyValueError::new_err(e.to_string()))
}

fn json_to_py(py: Python<'_>, value: Value) -> PyResult<PyObject> {
    match value {
        Value::Null => Ok(py.None()),
        Value::Bool(b) => b.into_py_any(py),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.into_py_any(py)
            } else if let Some(f) = n.as_f64() {
                f.into_py_any(py)
            } else {
                n.to_string().into_py_any(py)
            }
        }
        Value::String(s) => s.into_py_any(py),
        Value::Array(arr) => {
            let list = PyList::empty(py);
            for item in arr {
                list.append(json_to_py(py, item)?)?;
            }
            Ok(list.into())
        }
        Value::Object(map) => {
            let dict = PyDict::new(py);
            for (k, v) in map {
                dict.set_item(k, json_to_py(py, v)?)?;
            }
            Ok(dict.into())
        }
    }
}

// Malformed data and bad slugs become ValueError, storage trouble RuntimeError.
fn notes_err(err: NotesError) -> PyErr {
    match &err {
        NotesError::Parse { .. } | NotesError::InvalidProfile(_) => {
            PyValueError::new_err(err.to_string())
        }
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

fn note_from_py(note: &Bound<'_, PyAny>) -> PyResult<NoteValue> {
    if let Ok(text) = note.extract::<String>() {
        return Ok(NoteValue::Legacy(text));
    }

    let dict = note
        .downcast::<PyDict>()
        .map_err(|_| PyValueError::new_err("note must be a string or a dict"))?;
    let field = |name: &str| -> PyResult<Option<String>> {
        match dict.get_item(name)? {
            Some(v) if !v.is_none() => Ok(Some(v.extract::<String>()?)),
            _ => Ok(None),
        }
    };

    Ok(NoteValue::Structured(StructuredNote {
        tag: field("tag")?,
        note: field("note")?,
        updated_at: field("updated_at")?,
        url: field("url")?,
    }))
}

fn notes_from_py(notes: &Bound<'_, PyDict>) -> PyResult<NotesCollection> {
    let mut collection = NotesCollection::new();
    for (key, value) in notes.iter() {
        let key = key.extract::<String>()?;
        collection.insert(key, note_from_py(&value)?);
    }
    Ok(collection)
}

// --- Bindings ---

// Storage

#[pyfunction]
#[pyo3(name = "test_storage_connection")]
fn test_storage_connection_py<'a>(
    py: Python<'a>,
    storage_config: Bound<'a, PyDict>,
) -> PyResult<Bound<'a, PyAny>> {
    let _ = get_operator(py, &storage_config)?;
    pyo3_async_runtimes::tokio::future_into_py(py, async move { Ok(true) })
}

#[pyfunction]
fn init_notes_store<'a>(
    py: Python<'a>,
    storage_config: Bound<'a, PyDict>,
) -> PyResult<Bound<'a, PyAny>> {
    let op = get_operator(py, &storage_config)?;
    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        notes::ensure_notes_root(&op).await.map_err(notes_err)?;
        Ok(())
    })
}

// Notes

#[pyfunction]
fn load_notes<'a>(
    py: Python<'a>,
    storage_config: Bound<'a, PyDict>,
    profile: String,
) -> PyResult<Bound<'a, PyAny>> {
    let op = get_operator(py, &storage_config)?;
    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        let collection = notes::load_notes(&op, &profile).await.map_err(notes_err)?;
        let val = serde_json::to_value(collection)
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Python::with_gil(|py| json_to_py(py, val))
    })
}

#[pyfunction]
fn save_notes<'a>(
    py: Python<'a>,
    storage_config: Bound<'a, PyDict>,
    profile: String,
    notes: Bound<'a, PyDict>,
) -> PyResult<Bound<'a, PyAny>> {
    let op = get_operator(py, &storage_config)?;
    let collection = notes_from_py(&notes)?;
    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        notes::save_notes(&op, &profile, &collection)
            .await
            .map_err(notes_err)?;
        Ok(())
    })
}

#[pyfunction]
fn reset_notes<'a>(
    py: Python<'a>,
    storage_config: Bound<'a, PyDict>,
    profile: String,
) -> PyResult<Bound<'a, PyAny>> {
    let op = get_operator(py, &storage_config)?;
    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        notes::reset_notes(&op, &profile).await.map_err(notes_err)?;
        Ok(())
    })
}

#[pyfunction]
fn upsert_note<'a>(
    py: Python<'a>,
    storage_config: Bound<'a, PyDict>,
    profile: String,
    company_name: String,
    country: String,
    note: Bound<'a, PyAny>,
) -> PyResult<Bound<'a, PyAny>> {
    let op = get_operator(py, &storage_config)?;
    let note = note_from_py(&note)?;
    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        notes::upsert_note(&op, &profile, &company_name, &country, note)
            .await
            .map_err(notes_err)?;
        Ok(())
    })
}

#[pyfunction]
fn list_profiles<'a>(
    py: Python<'a>,
    storage_config: Bound<'a, PyDict>,
) -> PyResult<Bound<'a, PyAny>> {
    let op = get_operator(py, &storage_config)?;
    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        let profiles = notes::list_profiles(&op).await.map_err(notes_err)?;
        Ok(profiles)
    })
}

#[pyfunction]
fn company_key(name: String, country: String) -> String {
    notes::company_key(&name, &country)
}

#[pyfunction]
fn profile_slug(display_name: String) -> String {
    profile::profile_slug(&display_name)
}

// Export

#[pyfunction]
fn load_notes_table<'a>(
    py: Python<'a>,
    storage_config: Bound<'a, PyDict>,
    profile: String,
) -> PyResult<Bound<'a, PyAny>> {
    let op = get_operator(py, &storage_config)?;
    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        let collection = notes::load_notes(&op, &profile).await.map_err(notes_err)?;
        let rows = export::notes_to_rows(&collection);
        let val = serde_json::to_value(rows).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Python::with_gil(|py| json_to_py(py, val))
    })
}

#[pyfunction]
fn export_notes_csv<'a>(
    py: Python<'a>,
    storage_config: Bound<'a, PyDict>,
    profile: String,
) -> PyResult<Bound<'a, PyAny>> {
    let op = get_operator(py, &storage_config)?;
    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        let collection = notes::load_notes(&op, &profile).await.map_err(notes_err)?;
        let csv = export::notes_to_csv(&collection)
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Ok(csv)
    })
}

// Labels

#[pyfunction]
#[pyo3(signature = (value=None))]
fn titleize(value: Option<String>) -> String {
    labels::titleize(value.as_deref())
}

#[pyfunction]
#[pyo3(signature = (market=None))]
fn market_label(market: Option<String>) -> String {
    labels::market_label(market.as_deref())
}

#[pyfunction]
#[pyo3(signature = (zone=None))]
fn zone_label(zone: Option<String>) -> String {
    labels::zone_label(zone.as_deref())
}

#[pyfunction]
#[pyo3(signature = (zones=None))]
fn zone_label_for_display(zones: Option<Bound<'_, PyAny>>) -> PyResult<String> {
    let zones = match zones {
        Some(any) if !any.is_none() => {
            // Strings first: a Python str must never be read as a sequence
            if let Ok(single) = any.extract::<String>() {
                if single.is_empty() {
                    Vec::new()
                } else {
                    vec![single]
                }
            } else {
                any.extract::<Vec<String>>()?
            }
        }
        _ => Vec::new(),
    };
    Ok(labels::zone_label_for_display(&zones))
}

#[pyfunction]
#[pyo3(signature = (selection=None))]
fn parse_zone_selection(selection: Option<Bound<'_, PyAny>>) -> PyResult<Vec<String>> {
    match selection {
        Some(any) if !any.is_none() => {
            if let Ok(text) = any.extract::<String>() {
                Ok(labels::parse_zone_selection(Some(&text)))
            } else if let Ok(items) = any.extract::<Vec<String>>() {
                Ok(labels::parse_zone_selection_list(&items))
            } else {
                Err(PyValueError::new_err(
                    "selection must be a string or a list of strings",
                ))
            }
        }
        _ => Ok(Vec::new()),
    }
}

/// A Python module implemented in Rust.
#[pymodule]
fn _market_explorer_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(test_storage_connection_py, m)?)?;
    m.add_function(wrap_pyfunction!(init_notes_store, m)?)?;

    m.add_function(wrap_pyfunction!(load_notes, m)?)?;
    m.add_function(wrap_pyfunction!(save_notes, m)?)?;
    m.add_function(wrap_pyfunction!(reset_notes, m)?)?;
    m.add_function(wrap_pyfunction!(upsert_note, m)?)?;
    m.add_function(wrap_pyfunction!(list_profiles, m)?)?;
    m.add_function(wrap_pyfunction!(company_key, m)?)?;
    m.add_function(wrap_pyfunction!(profile_slug, m)?)?;

    m.add_function(wrap_pyfunction!(load_notes_table, m)?)?;
    m.add_function(wrap_pyfunction!(export_notes_csv, m)?)?;

    m.add_function(wrap_pyfunction!(titleize, m)?)?;
    m.add_function(wrap_pyfunction!(market_label, m)?)?;
    m.add_function(wrap_pyfunction!(zone_label, m)?)?;
    m.add_function(wrap_pyfunction!(zone_label_for_display, m)?)?;
    m.add_function(wrap_pyfunction!(parse_zone_selection, m)?)?;

    Ok(())
}
