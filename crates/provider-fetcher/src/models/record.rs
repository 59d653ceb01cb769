use serde::{Deserialize, Serialize};

/// One provider parsed out of a directory listing block. No field is
/// guaranteed present; absence means the page did not carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "NPI", skip_serializing_if = "Option::is_none")]
    pub npi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepting_patients: Option<String>,
}

impl ProviderRecord {
    pub fn is_empty(&self) -> bool {
        self.href.is_none()
            && self.name.is_none()
            && self.clinic.is_none()
            && self.address.is_none()
            && self.npi.is_none()
            && self.phone.is_none()
            && self.accepting_patients.is_none()
    }
}

/// Text and outbound links of a rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub content: String,
    pub links: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let record = ProviderRecord {
            name: Some("Dr. Jane Doe".to_string()),
            npi: Some("1234567890".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["name"], "Dr. Jane Doe");
        assert_eq!(object["NPI"], "1234567890");
    }

    #[test]
    fn empty_record_serializes_to_empty_object() {
        let record = ProviderRecord::default();
        assert!(record.is_empty());
        assert_eq!(serde_json::to_string(&record).unwrap(), "{}");
    }
}
