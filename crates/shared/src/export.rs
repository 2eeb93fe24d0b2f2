//! Warband export/import format.
//!
//! An export is the warband's own fields plus `exportVersion` and
//! `exportedAt`. Import accepts either an export or a bare warband.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warband_domain::Warband;

/// Current export format version.
pub const EXPORT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarbandExport {
    pub export_version: String,
    pub exported_at: DateTime<Utc>,
    #[serde(flatten)]
    pub warband: Warband,
}

impl WarbandExport {
    pub fn new(warband: Warband, exported_at: DateTime<Utc>) -> Self {
        Self {
            export_version: EXPORT_VERSION.to_string(),
            exported_at,
            warband,
        }
    }
}

/// Body of `POST /api/warbands/import` and `/validate-import`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub warband: Warband,
}

impl ImportPayload {
    /// Bare warbands carry no version and are always accepted.
    pub fn is_supported_version(&self) -> bool {
        !matches!(self.export_version.as_deref(), Some(version) if version != EXPORT_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid timestamp")
    }

    #[test]
    fn export_flattens_warband_fields() {
        let warband = Warband::new("Exported", 75, None, now());
        let json = serde_json::to_value(WarbandExport::new(warband, now())).expect("serialize");
        assert_eq!(json["exportVersion"], EXPORT_VERSION);
        assert_eq!(json["name"], "Exported");
        assert_eq!(json["pointLimit"], 75);
        assert!(json.get("warband").is_none());
    }

    #[test]
    fn import_accepts_export_and_bare_warband() {
        let warband = Warband::new("Round Trip", 125, None, now());
        let export =
            serde_json::to_string(&WarbandExport::new(warband.clone(), now())).expect("serialize");
        let payload: ImportPayload = serde_json::from_str(&export).expect("deserialize");
        assert_eq!(payload.warband, warband);
        assert!(payload.is_supported_version());

        let bare = serde_json::to_string(&warband).expect("serialize");
        let payload: ImportPayload = serde_json::from_str(&bare).expect("deserialize");
        assert_eq!(payload.export_version, None);
        assert!(payload.is_supported_version());
    }

    #[test]
    fn unknown_version_is_flagged() {
        let json =
            serde_json::json!({ "exportVersion": "9.9", "name": "Future", "pointLimit": 75 });
        let payload: ImportPayload = serde_json::from_value(json).expect("deserialize");
        assert!(!payload.is_supported_version());
    }
}
