use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Column order of the backing sheet, left to right. This is a fixed
/// positional contract with the backend: the sheet carries no schema, so
/// the header row is checked against this list once per fetch and any
/// drift fails fast instead of silently shifting fields.
pub const EXPECTED_COLUMNS: [&str; 47] = [
    "status",
    "comment",
    "caller_username",
    "calling_date_time",
    "call_recording_url",
    "query_niche",
    "query_country",
    "query_state",
    "query_city",
    "query_area",
    "query_landmark",
    "query_pincode",
    "added_date_time",
    "title",
    "name",
    "email",
    "phone",
    "clean_url",
    "facebook",
    "instagram",
    "youtube",
    "tiktok",
    "twitter",
    "linkedin",
    "pinterest",
    "reddit",
    "rating",
    "rating_count",
    "reviews",
    "type",
    "types",
    "address",
    "latitude",
    "longitude",
    "place_id",
    "google_maps_url",
    "reviews_link",
    "photos_link",
    "gps_coordinates",
    "description",
    "hours",
    "operating_hours",
    "thumbnail",
    "book_online",
    "website_status",
    "website_fetch_status",
    "enrichment_status",
];

/// One spreadsheet row. All values are untyped strings; cells missing
/// from a short row come through as `""`, never as an absent field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// 1-based position in the backing sheet (first data row is 2).
    /// Immutable once fetched; the sole key used for write-back.
    pub row_index: usize,

    // Call workflow
    pub status: String,
    pub comment: String,
    pub caller_username: String,
    pub calling_date_time: String,
    pub call_recording_url: String,

    // Query details
    pub query_niche: String,
    pub query_country: String,
    pub query_state: String,
    pub query_city: String,
    pub query_area: String,
    pub query_landmark: String,
    pub query_pincode: String,
    pub added_date_time: String,

    // Identity
    pub title: String,
    pub name: String,
    pub email: String,
    pub phone: String,

    // Web presence
    pub clean_url: String,
    pub facebook: String,
    pub instagram: String,
    pub youtube: String,
    pub tiktok: String,
    pub twitter: String,
    pub linkedin: String,
    pub pinterest: String,
    pub reddit: String,

    // Business metadata
    pub rating: String,
    pub rating_count: String,
    pub reviews: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub types: String,
    pub address: String,
    pub latitude: String,
    pub longitude: String,

    // Google data
    pub place_id: String,
    pub google_maps_url: String,
    pub reviews_link: String,
    pub photos_link: String,
    pub gps_coordinates: String,
    pub description: String,
    pub hours: String,
    pub operating_hours: String,
    pub thumbnail: String,
    pub book_online: String,

    // Status flags
    pub website_status: String,
    pub website_fetch_status: String,
    pub enrichment_status: String,
}

impl Lead {
    /// Map one positional data row into named fields.
    pub fn from_row(row_index: usize, cells: &[String]) -> Self {
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();

        Self {
            row_index,

            status: cell(0),
            comment: cell(1),
            caller_username: cell(2),
            calling_date_time: cell(3),
            call_recording_url: cell(4),

            query_niche: cell(5),
            query_country: cell(6),
            query_state: cell(7),
            query_city: cell(8),
            query_area: cell(9),
            query_landmark: cell(10),
            query_pincode: cell(11),
            added_date_time: cell(12),

            title: cell(13),
            name: cell(14),
            email: cell(15),
            phone: cell(16),

            clean_url: cell(17),
            facebook: cell(18),
            instagram: cell(19),
            youtube: cell(20),
            tiktok: cell(21),
            twitter: cell(22),
            linkedin: cell(23),
            pinterest: cell(24),
            reddit: cell(25),

            rating: cell(26),
            rating_count: cell(27),
            reviews: cell(28),
            kind: cell(29),
            types: cell(30),
            address: cell(31),
            latitude: cell(32),
            longitude: cell(33),

            place_id: cell(34),
            google_maps_url: cell(35),
            reviews_link: cell(36),
            photos_link: cell(37),
            gps_coordinates: cell(38),
            description: cell(39),
            hours: cell(40),
            operating_hours: cell(41),
            thumbnail: cell(42),
            book_online: cell(43),

            website_status: cell(44),
            website_fetch_status: cell(45),
            enrichment_status: cell(46),
        }
    }

    /// A lead is available (unprocessed) iff its status is blank. This is
    /// the single queue-membership predicate.
    pub fn is_available(&self) -> bool {
        self.status.trim().is_empty()
    }
}

/// Check the sheet's header row against the expected positional layout.
pub fn validate_header(header: &[String]) -> AppResult<()> {
    if header.len() < EXPECTED_COLUMNS.len() {
        return Err(AppError::config(format!(
            "Sheet header has {} columns, expected at least {}. The sheet layout does not match this app.",
            header.len(),
            EXPECTED_COLUMNS.len()
        )));
    }

    for (i, expected) in EXPECTED_COLUMNS.iter().enumerate() {
        let actual = header[i].trim();
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(AppError::config(format!(
                "Sheet column {i} is '{actual}', expected '{expected}'. The sheet layout does not match this app."
            )));
        }
    }

    Ok(())
}

/// First-match scan in row order for a blank status. Stable as long as
/// the backend returns rows in a stable order.
pub fn next_available(leads: &[Lead]) -> Option<&Lead> {
    leads.iter().find(|lead| lead.is_available())
}

pub fn remaining(leads: &[Lead]) -> usize {
    leads.iter().filter(|lead| lead.is_available()).count()
}

#[cfg(test)]
pub(crate) fn test_lead(row_index: usize, status: &str) -> Lead {
    let mut cells = vec![String::new(); EXPECTED_COLUMNS.len()];
    cells[0] = status.to_string();
    cells[16] = "+1 (555) 010-0199".to_string();
    Lead::from_row(row_index, &cells)
}
