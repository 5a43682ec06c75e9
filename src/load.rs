//! Dataset loaders.
//!
//! Two sources, one contract: produce [`Record`]s whose signals are already
//! z-scored and resampled to the target rate, labeled 0/1, and tagged with a
//! group id unique per physical recording.
//!
//! * [`load_record_dir`] — a directory holding a header-less `REFERENCE.csv`
//!   (`record-id,code`) and one safetensors payload per record.
//! * [`load_bundle`] — a single safetensors file bundling a `[rows, T]`
//!   signal matrix with a parallel array of diagnosis strings. The sampling
//!   rate is documented for the bundle as a whole, not stored per row.
use crate::config::PipelineConfig;
use crate::dataset::Record;
use crate::error::{Error, Result};
use crate::label::{BundleLabel, RhythmCode};
use crate::{normalize, resample};
use safetensors::{Dtype, SafeTensors};
use std::path::Path;

/// Name of the reference table inside a record directory.
pub const REFERENCE_TABLE: &str = "REFERENCE.csv";

/// Load the reference-table source: one labeled record per payload file.
///
/// Group id = record id (one group per file). Unknown class codes, missing
/// payloads, and malformed tensors abort the load.
pub fn load_record_dir(dir: &Path, cfg: &PipelineConfig) -> Result<Vec<Record>> {
    let table = dir.join(REFERENCE_TABLE);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(&table)
        .map_err(|e| Error::load(&table, format!("reference table: {e}")))?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(|e| Error::load(&table, format!("reference table: {e}")))?;
        let id = row
            .get(0)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::load(&table, "row missing record id"))?
            .to_string();
        let code_field = row
            .get(1)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::load(&table, format!("record {id}: row missing class code")))?;

        let mut chars = code_field.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => RhythmCode::from_char(c),
            _ => None,
        }
        .ok_or_else(|| Error::Label { record: id.clone(), code: code_field.to_string() })?;

        let payload = dir.join(format!("{id}.safetensors"));
        let (signal, fs) = read_signal_payload(&payload)?;
        records.push(prepare(signal, fs, code.binary(), id, cfg)?);
    }

    if records.is_empty() {
        return Err(Error::load(&table, "reference table lists no records"));
    }
    log::info!("loaded {} records from {}", records.len(), dir.display());
    Ok(records)
}

/// Load the bundled source: a signal matrix with parallel string labels.
///
/// `fs` is the documented sampling rate of every row; `tag` prefixes the
/// synthetic per-row group ids (`"<tag>_<row>"`). Rows labeled outside the
/// three classes of interest are dropped.
pub fn load_bundle(path: &Path, fs: f32, tag: &str, cfg: &PipelineConfig) -> Result<Vec<Record>> {
    let bytes = std::fs::read(path).map_err(|e| Error::load(path, e.to_string()))?;
    let st = SafeTensors::deserialize(&bytes)
        .map_err(|e| Error::load(path, format!("safetensors: {e}")))?;

    let (shape, values) = f32_tensor(&st, "signals", path)?;
    if shape.len() != 2 {
        return Err(Error::Shape(format!(
            "{}: 'signals' must be a 2-D matrix, got shape {shape:?}",
            path.display()
        )));
    }
    let (rows, width) = (shape[0], shape[1]);
    let labels = str_tensor(&st, "labels", path)?;
    if labels.len() != rows {
        return Err(Error::load(
            path,
            format!("{rows} signal rows but {} labels", labels.len()),
        ));
    }

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for (r, label) in labels.iter().enumerate() {
        let Some(class) = BundleLabel::from_str_opt(label) else {
            dropped += 1;
            continue;
        };
        let signal = values[r * width..(r + 1) * width].to_vec();
        records.push(prepare(signal, fs, class.binary(), format!("{tag}_{r}"), cfg)?);
    }

    log::info!(
        "loaded {} rows from {} ({dropped} rows outside the label set dropped)",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Normalize, resample, and wrap one raw signal into a [`Record`].
fn prepare(
    mut signal: Vec<f32>,
    fs: f32,
    label: u8,
    group: String,
    cfg: &PipelineConfig,
) -> Result<Record> {
    if signal.is_empty() {
        return Err(Error::Shape(format!("record {group}: empty signal")));
    }
    normalize::zscore_inplace(&mut signal);
    let signal = resample::resample(signal, fs, cfg.target_fs);
    Ok(Record { signal, fs: cfg.target_fs, label, group })
}

// ── safetensors helpers ──────────────────────────────────────────────────────

/// Read the per-record payload: `signal` ([T] or [1, T] F32) + `fs` ([1] F32).
fn read_signal_payload(path: &Path) -> Result<(Vec<f32>, f32)> {
    let bytes = std::fs::read(path).map_err(|e| Error::load(path, e.to_string()))?;
    let st = SafeTensors::deserialize(&bytes)
        .map_err(|e| Error::load(path, format!("safetensors: {e}")))?;

    let (shape, signal) = f32_tensor(&st, "signal", path)?;
    match shape[..] {
        [_] => {}
        [1, _] => {}
        _ => {
            return Err(Error::Shape(format!(
                "{}: 'signal' must be single-lead ([T] or [1, T]), got shape {shape:?}",
                path.display()
            )))
        }
    }

    let (fs_shape, fs) = f32_tensor(&st, "fs", path)?;
    if fs.len() != 1 {
        return Err(Error::load(path, format!("'fs' must be a scalar, got shape {fs_shape:?}")));
    }
    Ok((signal, fs[0]))
}

fn f32_tensor(st: &SafeTensors, name: &str, path: &Path) -> Result<(Vec<usize>, Vec<f32>)> {
    let view = st
        .tensor(name)
        .map_err(|e| Error::load(path, format!("missing tensor {name:?}: {e}")))?;
    if view.dtype() != Dtype::F32 {
        return Err(Error::load(path, format!("tensor {name:?} is not F32")));
    }
    let values = view
        .data()
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    Ok((view.shape().to_vec(), values))
}

/// Decode a UTF-8 tensor of newline-separated strings.
fn str_tensor(st: &SafeTensors, name: &str, path: &Path) -> Result<Vec<String>> {
    let view = st
        .tensor(name)
        .map_err(|e| Error::load(path, format!("missing tensor {name:?}: {e}")))?;
    if view.dtype() != Dtype::U8 {
        return Err(Error::load(path, format!("tensor {name:?} is not U8 text")));
    }
    let text = std::str::from_utf8(view.data())
        .map_err(|e| Error::load(path, format!("tensor {name:?} is not UTF-8: {e}")))?;
    Ok(text.split('\n').filter(|s| !s.is_empty()).map(String::from).collect())
}
