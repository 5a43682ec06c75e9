//! Label encodings of the two sources and their collapse to binary.
//!
//! Both mappings are fixed enumerations. The reference-table source uses
//! single-character rhythm codes; the bundled source uses three-letter
//! diagnosis strings. Binarization: normal sinus rhythm → 0, everything
//! else → 1.

/// The four rhythm classes of the reference-table source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RhythmCode {
    /// `N` — normal sinus rhythm.
    Normal,
    /// `A` — atrial fibrillation.
    AtrialFib,
    /// `O` — other rhythm.
    Other,
    /// `~` — too noisy to classify.
    Noisy,
}

impl RhythmCode {
    /// Parse a single-character class code. Returns `None` for characters
    /// outside the fixed four-class alphabet.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(RhythmCode::Normal),
            'A' => Some(RhythmCode::AtrialFib),
            'O' => Some(RhythmCode::Other),
            '~' => Some(RhythmCode::Noisy),
            _ => None,
        }
    }

    /// Collapse to the binary target: normal → 0, any abnormality → 1.
    pub fn binary(self) -> u8 {
        match self {
            RhythmCode::Normal => 0,
            RhythmCode::AtrialFib | RhythmCode::Other | RhythmCode::Noisy => 1,
        }
    }
}

/// The three diagnosis classes of interest in the bundled source.
/// Rows carrying any other label are dropped by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleLabel {
    /// `NSR` — normal sinus rhythm.
    NormalSinus,
    /// `ARR` — arrhythmia.
    Arrhythmia,
    /// `CHF` — congestive heart failure.
    HeartFailure,
}

impl BundleLabel {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "NSR" => Some(BundleLabel::NormalSinus),
            "ARR" => Some(BundleLabel::Arrhythmia),
            "CHF" => Some(BundleLabel::HeartFailure),
            _ => None,
        }
    }

    /// Collapse to the binary target: normal sinus → 0, either disease → 1.
    pub fn binary(self) -> u8 {
        match self {
            BundleLabel::NormalSinus => 0,
            BundleLabel::Arrhythmia | BundleLabel::HeartFailure => 1,
        }
    }
}
