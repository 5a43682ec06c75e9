/// Shared helpers: synthetic records and on-disk loader fixtures.
use ecgtrain::io::StWriter;
use ecgtrain::Record;
use std::path::Path;

#[allow(unused)]
/// A record already at the pipeline target rate, so builder tests exercise
/// windowing geometry without resampling.
pub fn synth_record(len: usize, label: u8, group: &str) -> Record {
    Record {
        signal: (0..len).map(|i| (i as f32 * 0.013).sin()).collect(),
        fs: 300.0,
        label,
        group: group.to_string(),
    }
}

#[allow(unused)]
/// Write one per-record payload (`signal` + `fs`) into `dir`.
pub fn write_payload(dir: &Path, id: &str, signal: &[f32], fs: f32) {
    let mut w = StWriter::new();
    w.add_f32("signal", signal, &[signal.len()]);
    w.add_f32("fs", &[fs], &[1]);
    w.write(&dir.join(format!("{id}.safetensors"))).unwrap();
}

#[allow(unused)]
/// Write a header-less reference table of `(record-id, class-code)` rows.
pub fn write_reference(dir: &Path, rows: &[(&str, &str)]) {
    let body: String = rows
        .iter()
        .map(|(id, code)| format!("{id},{code}\n"))
        .collect();
    std::fs::write(dir.join("REFERENCE.csv"), body).unwrap();
}

#[allow(unused)]
/// Write a bundle file: `signals` matrix + newline-joined `labels`.
pub fn write_bundle(path: &Path, signals: &[Vec<f32>], labels: &[&str]) {
    let rows = signals.len();
    let width = signals.first().map_or(0, |s| s.len());
    let flat: Vec<f32> = signals.iter().flat_map(|s| s.iter().copied()).collect();
    let mut w = StWriter::new();
    w.add_f32("signals", &flat, &[rows, width]);
    let labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
    w.add_str("labels", &labels);
    w.write(path).unwrap();
}
