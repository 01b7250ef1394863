//! Response payloads returned by the address validation service.

use serde::{Deserialize, Deserializer, Serialize};

/// Verdict for a single address, as returned by `GET /validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the address passed syntax, DNS and ESP checks.
    pub is_valid: bool,
    /// The address that was checked, echoed back by the service.
    pub address: String,
    /// Local part and domain, when the service could split the address.
    #[serde(default)]
    pub parts: Option<AddressParts>,
    /// Suggested correction for a likely mistyped domain.
    #[serde(default)]
    pub did_you_mean: Option<String>,
}

/// The two halves of an address split at `@`.
///
/// Both fields are `None` (not empty) when the address could not be split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressParts {
    #[serde(default)]
    pub local_part: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

/// Outcome of `GET /parse`: the batch split into accepted and rejected items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Addresses the service accepted, in service order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parsed: Vec<String>,
    /// Character sequences the service could not understand.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub unparseable: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_result_fills_missing_and_null_lists() {
        let result: ParseResult = serde_json::from_str(r#"{"parsed": null}"#).unwrap();
        assert!(result.parsed.is_empty());
        assert!(result.unparseable.is_empty());
    }

    #[test]
    fn unsplittable_address_keeps_parts_absent() {
        let body = r#"{
            "is_valid": false,
            "address": "john@gmail.com",
            "parts": {"local_part": null, "domain": null, "display_name": null},
            "did_you_mean": null
        }"#;
        let result: ValidationResult = serde_json::from_str(body).unwrap();
        let parts = result.parts.expect("parts object present");
        assert_eq!(parts.local_part, None);
        assert_eq!(parts.domain, None);
        assert_eq!(result.did_you_mean, None);
    }

    #[test]
    fn missing_is_valid_is_a_decode_failure() {
        let err = serde_json::from_str::<ValidationResult>(r#"{"address": "a@b.c"}"#);
        assert!(err.is_err());
    }
}
