//! Error taxonomy for the dataset pipeline.
//!
//! Every failure names its stage (load / label / shape / split) and the
//! offending path or record id. Loader failures abort the whole run — the
//! metrics are only reproducible over the complete dataset, so there is no
//! partial-dataset recovery and no retry.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A source file or reference table is missing or malformed.
    #[error("load: {}: {detail}", .path.display())]
    Load { path: PathBuf, detail: String },

    /// A class code outside the fixed binarization mapping.
    #[error("label: record {record}: unrecognized class code {code:?}")]
    Label { record: String, code: String },

    /// Signal or matrix dimensions inconsistent with the pipeline contract.
    #[error("shape: {0}")]
    Shape(String),

    /// A requested split cannot be formed from the available groups.
    #[error("split: {0}")]
    Split(String),
}

impl Error {
    pub(crate) fn load(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Error::Load { path: path.into(), detail: detail.into() }
    }
}
