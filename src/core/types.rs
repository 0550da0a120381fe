use serde::{Deserialize, Serialize};

use crate::utils::validation::{validate_sequence_name, ValidationError};

/// Unique name of a sequence in the catalog, also its directory name under the root
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SequenceName(String);

impl SequenceName {
    /// Validate and wrap a sequence name.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the name is empty, too long, or is not
    /// a single safe path component.
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        validate_sequence_name(&s)?;
        Ok(Self(s))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SequenceName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SequenceName> for String {
    fn from(name: SequenceName) -> Self {
        name.0
    }
}

impl AsRef<str> for SequenceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SequenceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed file roles stored under a sequence directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    /// Scan video
    Scan,
    /// Calibration video recorded alongside the IMU log
    ImuVideo,
    /// Raw IMU samples
    ImuLog,
    /// Scale QR code image
    Qr,
    /// Portrait photo
    Portrait,
    /// Thumbnail derived from the portrait
    Thumbnail,
}

impl AssetKind {
    pub const ALL: [AssetKind; 6] = [
        Self::Scan,
        Self::ImuVideo,
        Self::ImuLog,
        Self::Qr,
        Self::Portrait,
        Self::Thumbnail,
    ];

    /// File name of this asset inside a sequence directory
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Scan => "scan.mp4",
            Self::ImuVideo => "imu.mp4",
            Self::ImuLog => "imu.txt",
            Self::Qr => "qr.jpg",
            Self::Portrait => "portrait.jpg",
            Self::Thumbnail => "thumbnail.jpg",
        }
    }

    /// Whether the asset is placed by moving a captured file into the sequence.
    ///
    /// The portrait is re-written (and drives the thumbnail); the thumbnail is
    /// only ever derived.
    #[must_use]
    pub fn is_moved(self) -> bool {
        matches!(self, Self::Scan | Self::ImuVideo | Self::ImuLog | Self::Qr)
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scan => write!(f, "scan"),
            Self::ImuVideo => write!(f, "imu-video"),
            Self::ImuLog => write!(f, "imu-log"),
            Self::Qr => write!(f, "qr"),
            Self::Portrait => write!(f, "portrait"),
            Self::Thumbnail => write!(f, "thumbnail"),
        }
    }
}

impl std::str::FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s.to_ascii_lowercase())
            .ok_or_else(|| format!("Unknown asset kind: {s}"))
    }
}
