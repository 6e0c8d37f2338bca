use serde::{Deserialize, Serialize};

/// Raw creation form exactly as posted; every field is a string so the
/// validator owns all interpretation.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct CreateForm {
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub network_id: String,
    #[serde(default)]
    pub image_id: String,
    #[serde(default)]
    pub flavor_id: String,
    #[serde(default)]
    pub quota_id: String,
    #[serde(default)]
    pub azone_id: String,
    #[serde(default)]
    pub pay_type: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub network_tag: String,
}

impl CreateForm {
    /// Query pairs to rebuild the form URL after a redirect, keeping the
    /// user's selections. Empty fields are left out.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let fields = [
            ("service_id", &self.service_id),
            ("azone_id", &self.azone_id),
            ("flavor_id", &self.flavor_id),
            ("image_id", &self.image_id),
            ("network_id", &self.network_id),
            ("network_tag", &self.network_tag),
            ("quota_id", &self.quota_id),
            ("pay_type", &self.pay_type),
            ("period", &self.period),
        ];
        for (name, value) in fields {
            if !value.trim().is_empty() {
                pairs.push((name.to_string(), value.trim().to_string()));
            }
        }
        pairs
    }
}

/// Validated creation payload. Optional fields serialize only when present,
/// so an unset quota/zone/period never reaches the wire as an empty value.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateRequest {
    pub service_id: i64,
    pub network_id: String,
    pub image_id: String,
    pub flavor_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azone_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<i64>,
}
