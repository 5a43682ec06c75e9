//! Safetensors output for prepared datasets.
//!
//! [`StWriter`] is a minimal safetensors file builder (F32, I32, and UTF-8
//! text tensors); [`write_dataset`] stores a built [`Dataset`] so the
//! prepared examples can be inspected or consumed outside this crate.
//! Reading goes through the `safetensors` crate in the loaders — this
//! module only writes.
use crate::dataset::Dataset;
use anyhow::Result;
use std::path::Path;

/// Simple safetensors file writer.
///
/// Usage:
/// ```rust,no_run
/// use ecgtrain::io::StWriter;
/// use std::path::Path;
/// let mut w = StWriter::new();
/// w.add_f32("signal", &[1.0f32, 2.0, 3.0], &[1, 3]);
/// w.write(Path::new("/tmp/out.safetensors")).unwrap();
/// ```
#[derive(Default)]
pub struct StWriter {
    entries: Vec<(String, Vec<u8>, &'static str, Vec<usize>)>,
}

impl StWriter {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn add_f32(&mut self, name: &str, data: &[f32], shape: &[usize]) {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.entries.push((name.to_string(), bytes, "F32", shape.to_vec()));
    }

    pub fn add_f32_arr2(&mut self, name: &str, arr: &ndarray::Array2<f32>) {
        let data: Vec<f32> = arr.iter().copied().collect();
        self.add_f32(name, &data, &[arr.nrows(), arr.ncols()]);
    }

    pub fn add_i32(&mut self, name: &str, data: &[i32], shape: &[usize]) {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.entries.push((name.to_string(), bytes, "I32", shape.to_vec()));
    }

    /// Store `items` as one newline-joined UTF-8 tensor.
    pub fn add_str(&mut self, name: &str, items: &[String]) {
        let bytes = items.join("\n").into_bytes();
        let len = bytes.len();
        self.entries.push((name.to_string(), bytes, "U8", vec![len]));
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        use std::io::Write;
        let mut header_map = serde_json::Map::new();
        let mut offset: usize = 0;
        for (name, data, dtype, shape) in &self.entries {
            header_map.insert(name.clone(), serde_json::json!({
                "dtype": dtype,
                "shape": shape,
                "data_offsets": [offset, offset + data.len()],
            }));
            offset += data.len();
        }
        let hdr_bytes = serde_json::to_vec(&header_map)?;
        let pad = (8 - hdr_bytes.len() % 8) % 8;
        let padded: Vec<u8> = hdr_bytes.into_iter()
            .chain(std::iter::repeat(b' ').take(pad))
            .collect();
        let mut f = std::fs::File::create(path)?;
        f.write_all(&(padded.len() as u64).to_le_bytes())?;
        f.write_all(&padded)?;
        for (_, data, _, _) in &self.entries {
            f.write_all(data)?;
        }
        Ok(())
    }
}

/// Write a built dataset: `examples` `[N, W]` F32, `labels` `[N]` I32,
/// `groups` as one newline-joined text tensor.
pub fn write_dataset(ds: &Dataset, path: &Path) -> Result<()> {
    let mut w = StWriter::new();
    w.add_f32_arr2("examples", &ds.examples);
    let labels: Vec<i32> = ds.labels.iter().map(|&l| l as i32).collect();
    w.add_i32("labels", &labels, &[labels.len()]);
    w.add_str("groups", &ds.groups);
    w.write(path)
}
