//! Decoded driver's-license document.

use serde::{Deserialize, Serialize};

/// Fields decoded from a driver's-license barcode.
///
/// The SDK produces this atomically: a decode either yields every field or
/// fails as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedDocument {
    /// Given names.
    pub first_names: String,
    /// Family name.
    pub surname: String,
    /// National identity number.
    pub id_number: String,
    /// Gender marker as printed.
    pub gender: String,
    /// Date of birth (`YYYY-MM-DD`).
    pub birth_date: String,
    /// Licence number.
    pub license_number: String,
    /// Licence card issue number.
    pub license_issue_number: String,
    /// Start of the validity window.
    pub valid_from: String,
    /// End of the validity window.
    pub valid_to: String,
    /// Vehicle class codes.
    pub vehicle_codes: Vec<String>,
    /// Driver restriction codes.
    pub driver_restrictions: String,
    /// Professional driving permit category.
    pub prdp_code: String,
    /// Professional driving permit expiry.
    pub prdp_expiry: String,
    /// Embedded portrait, when requested and present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_jpeg: Option<Vec<u8>>,
}

impl DecodedDocument {
    /// Returns the portrait bytes if present and non-empty.
    #[must_use]
    pub fn photo(&self) -> Option<&[u8]> {
        self.photo_jpeg.as_deref().filter(|p| !p.is_empty())
    }

    /// Returns the holder's full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.surname)
            .trim()
            .to_string()
    }
}
