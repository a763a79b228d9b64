//! KYC attribute matching shapes.
//!
//! Every attribute is optional on the way out; every match result is
//! present on the way in, defaulting to `"not_available"`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::KYC_NOT_AVAILABLE;

/// Attributes to compare against the operator's records.
///
/// Empty strings and `None` are omitted from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KycMatchProps {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id_document: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub given_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub family_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name_kana_hankaku: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name_kana_zenkaku: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub middle_names: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub family_name_at_birth: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub street_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<u32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub locality: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub house_number_extension: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub birthdate: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub gender: String,
}

/// Per-attribute match outcome (`"true"`, `"false"`, `"not_available"`...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycMatchResponse {
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub id_document_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub name_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub given_name_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub family_name_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub name_kana_hankaku_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub name_kana_zenkaku_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub middle_names_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub family_name_at_birth_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub address_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub street_name_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub street_number_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub postal_code_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub region_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub locality_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub country_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub house_number_extension_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub birthdate_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub email_match: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub gender_match: String,
}

fn not_available() -> String {
    KYC_NOT_AVAILABLE.to_string()
}

fn or_not_available<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(not_available))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_and_null_results_default_to_not_available() {
        let response: KycMatchResponse =
            serde_json::from_value(json!({"nameMatch": "true", "emailMatch": null})).unwrap();
        assert_eq!(response.name_match, "true");
        assert_eq!(response.email_match, "not_available");
        assert_eq!(response.gender_match, "not_available");
        assert_eq!(response.id_document_match, "not_available");
    }

    #[test]
    fn empty_props_are_omitted() {
        let props = KycMatchProps {
            phone_number: "+34600000000".into(),
            given_name: "Ana".into(),
            postal_code: Some(28001),
            ..KycMatchProps::default()
        };
        let value = serde_json::to_value(&props).unwrap();
        assert_eq!(
            value,
            json!({"phoneNumber": "+34600000000", "givenName": "Ana", "postalCode": 28001})
        );
    }
}
