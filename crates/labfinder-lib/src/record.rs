//! Laboratory accreditation records as they appear in the source dataset.

use serde::{Deserialize, Deserializer, Serialize};

use crate::discipline::normalize_disciplines;

/// Numeric identifier for a laboratory record.
pub type LabId = i64;

/// One accredited laboratory.
///
/// Field names follow the source JSON, which mixes `camelCase` with a
/// capitalised `Discipline` key. Text fields are kept exactly as extracted;
/// use [`LabRecord::normalized`] before comparing or displaying them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabRecord {
    pub id: LabId,

    #[serde(rename = "labName", alias = "name", default)]
    pub name: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub state: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub certificate_no: String,

    #[serde(rename = "Discipline", alias = "discipline", default)]
    pub discipline: String,

    #[serde(default)]
    pub issue_date: String,

    #[serde(default)]
    pub expiry_date: String,

    #[serde(default)]
    pub contact_person: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub contact_no: String,

    #[serde(default)]
    pub email: String,
}

impl LabRecord {
    /// State with embedded line breaks collapsed.
    pub fn normalized_state(&self) -> String {
        normalize_text(&self.state)
    }

    /// City with embedded line breaks collapsed.
    pub fn normalized_city(&self) -> String {
        normalize_text(&self.city)
    }

    /// Canonical discipline labels, in order of appearance.
    pub fn disciplines(&self) -> Vec<String> {
        normalize_disciplines(&self.discipline)
    }

    /// Text searched by the free-text query.
    pub fn search_haystack(&self) -> String {
        [
            self.name.as_str(),
            self.address.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.contact_person.as_str(),
            self.email.as_str(),
        ]
        .join(" ")
    }

    /// Copy of the record with every text field normalized for display.
    pub fn normalized(&self) -> Self {
        Self {
            id: self.id,
            name: normalize_text(&self.name),
            address: normalize_text(&self.address),
            city: normalize_text(&self.city),
            state: normalize_text(&self.state),
            certificate_no: normalize_text(&self.certificate_no),
            discipline: normalize_text(&self.discipline),
            issue_date: normalize_text(&self.issue_date),
            expiry_date: normalize_text(&self.expiry_date),
            contact_person: normalize_text(&self.contact_person),
            contact_no: normalize_text(&self.contact_no),
            email: normalize_text(&self.email),
        }
    }
}

/// Collapse line breaks and runs of whitespace into single spaces, then trim.
pub fn normalize_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Source extraction occasionally emits phone and certificate numbers as JSON numbers.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
        Missing(()),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(text) => text,
        Loose::Number(number) => number.to_string(),
        Loose::Missing(()) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_text_collapses_line_breaks() {
        assert_eq!(normalize_text("Gujarat\n"), "Gujarat");
        assert_eq!(normalize_text("Navi\r\nMumbai"), "Navi Mumbai");
        assert_eq!(normalize_text("  Plot 4,\n  GIDC  "), "Plot 4, GIDC");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn deserializes_source_keys() {
        let value = json!({
            "id": 7,
            "labName": "Alpha Labs",
            "state": "Gujarat\n",
            "city": "Surat",
            "Discipline": "Chemical, Mechanical\n",
            "certificateNo": 1234,
            "contactNo": "98250 00000",
            "expiryDate": "31-12-2099"
        });
        let record: LabRecord = serde_json::from_value(value).expect("record parses");

        assert_eq!(record.id, 7);
        assert_eq!(record.name, "Alpha Labs");
        assert_eq!(record.certificate_no, "1234");
        assert_eq!(record.contact_no, "98250 00000");
        assert_eq!(record.address, "");
        assert_eq!(record.normalized_state(), "Gujarat");
    }

    #[test]
    fn serializes_with_source_keys() {
        let record: LabRecord =
            serde_json::from_value(json!({"id": 1, "name": "Beta", "discipline": "Electrical"}))
                .expect("aliases accepted");
        let value = serde_json::to_value(&record).expect("serializes");

        assert_eq!(value["labName"], "Beta");
        assert_eq!(value["Discipline"], "Electrical");
        assert!(value.get("contactPerson").is_some());
    }

    #[test]
    fn null_numbers_become_empty_text() {
        let record: LabRecord =
            serde_json::from_value(json!({"id": 2, "contactNo": null})).expect("null accepted");
        assert_eq!(record.contact_no, "");
    }

    #[test]
    fn normalized_copy_cleans_every_text_field() {
        let record: LabRecord = serde_json::from_value(json!({
            "id": 3,
            "labName": "Gamma\nTesting",
            "address": "Line 1\nLine 2",
            "contactPerson": " Dr.\nRao "
        }))
        .expect("record parses");
        let clean = record.normalized();

        assert_eq!(clean.name, "Gamma Testing");
        assert_eq!(clean.address, "Line 1 Line 2");
        assert_eq!(clean.contact_person, "Dr. Rao");
        assert_eq!(clean.id, 3);
    }
}
