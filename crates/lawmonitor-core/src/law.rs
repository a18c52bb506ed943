//! Tracked statutes and the registry's view of them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A statute under (or formerly under) monitoring.
///
/// `law_id` is the registry's serial number (MST) and is the primary key.
/// Laws are never deleted; a repealed law is kept with `is_active = false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Law {
    pub law_id: String,
    pub law_name: String,
    pub law_type: Option<String>,
    pub ministry: Option<String>,
    /// Enforcement date (`시행일자`) of the stored version.
    pub enforced_date: Option<NaiveDate>,
    pub content: String,
    pub is_active: bool,
    pub last_updated: DateTime<Utc>,
}

impl Law {
    /// Build the active record written when a registry law is promoted into monitoring.
    pub fn from_detail(detail: &LawDetail, now: DateTime<Utc>) -> Self {
        Self {
            law_id: detail.law_id.clone(),
            law_name: detail.law_name.clone(),
            law_type: detail.law_type.clone(),
            ministry: detail.ministry.clone(),
            enforced_date: detail.enforced_date,
            content: detail.content.clone(),
            is_active: true,
            last_updated: now,
        }
    }

    /// Overwrite the mutable snapshot fields from a newer registry version.
    pub fn refresh_from(&mut self, detail: &LawDetail, now: DateTime<Utc>) {
        self.law_name = detail.law_name.clone();
        self.law_type = detail.law_type.clone();
        self.ministry = detail.ministry.clone();
        self.enforced_date = detail.enforced_date;
        self.content = detail.content.clone();
        self.last_updated = now;
    }
}

/// One row of a registry search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawSummary {
    pub law_id: String,
    pub law_name: String,
    pub law_type: Option<String>,
    pub ministry: Option<String>,
    pub promulgated_date: Option<NaiveDate>,
    pub enforced_date: Option<NaiveDate>,
    /// Revision kind as reported by the registry (e.g. "일부개정", "제정").
    pub revision_kind: Option<String>,
}

/// The registry's current authoritative version of a single law.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawDetail {
    pub law_id: String,
    pub law_name: String,
    pub law_type: Option<String>,
    pub ministry: Option<String>,
    pub enforced_date: Option<NaiveDate>,
    /// Date of the most recent promulgation, used as the change date of an amendment.
    pub promulgated_date: Option<NaiveDate>,
    pub content: String,
    pub repealed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> LawDetail {
        LawDetail {
            law_id: "L1".into(),
            law_name: "Act A".into(),
            law_type: Some("법률".into()),
            ministry: Some("법무부".into()),
            enforced_date: NaiveDate::from_ymd_opt(2020, 1, 1),
            promulgated_date: NaiveDate::from_ymd_opt(2024, 3, 5),
            content: "제1조(목적) 이 법은 ...".into(),
            repealed: false,
        }
    }

    #[test]
    fn from_detail_is_active() {
        let now = Utc::now();
        let law = Law::from_detail(&detail(), now);
        assert!(law.is_active);
        assert_eq!(law.law_id, "L1");
        assert_eq!(law.last_updated, now);
    }

    #[test]
    fn refresh_keeps_id_and_activity() {
        let now = Utc::now();
        let mut law = Law::from_detail(&detail(), now);
        law.is_active = false;

        let mut newer = detail();
        newer.law_name = "Act A (renamed)".into();
        newer.content = "제1조(목적) 개정된 내용".into();
        law.refresh_from(&newer, now);

        assert_eq!(law.law_id, "L1");
        assert_eq!(law.law_name, "Act A (renamed)");
        assert_eq!(law.content, "제1조(목적) 개정된 내용");
        assert!(!law.is_active);
    }
}
