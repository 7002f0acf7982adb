use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::errors::BrokerError;
use crate::types::internal::Principal;

/// Header carrying the identity of the platform user behind a broker request
pub const ORIGINATING_IDENTITY_HEADER: &str = "X-Broker-API-Originating-Identity";

/// Only platform whose identities the broker understands
const KUBERNETES_PLATFORM: &str = "kubernetes";

/// Decode `X-Broker-API-Originating-Identity`
///
/// The header value is `<platform> <base64 JSON>`; the JSON carries
/// `username`, and optionally `uid` and `groups`.
pub fn parse_originating_identity(header: &str) -> Result<Principal, BrokerError> {
    let (platform, encoded) = header
        .trim()
        .split_once(' ')
        .ok_or_else(|| BrokerError::bad_request("Malformed originating identity header"))?;

    if platform != KUBERNETES_PLATFORM {
        return Err(BrokerError::bad_request(format!(
            "Unsupported originating identity platform '{}'",
            platform
        )));
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| BrokerError::bad_request("Originating identity is not valid base64"))?;

    let principal: Principal = serde_json::from_slice(&decoded)
        .map_err(|_| BrokerError::bad_request("Originating identity is not a valid user object"))?;

    if principal.username.trim().is_empty() {
        return Err(BrokerError::bad_request("Originating identity has no username"));
    }

    Ok(principal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(json: &str) -> String {
        format!("kubernetes {}", STANDARD.encode(json))
    }

    #[test]
    fn test_parse_identity_with_groups() {
        let header = encode(r#"{"username":"alice","uid":"u-1","groups":["dev","ops"]}"#);

        let principal = parse_originating_identity(&header).unwrap();

        assert_eq!(principal.username, "alice");
        assert_eq!(principal.uid.as_deref(), Some("u-1"));
        assert_eq!(principal.groups, vec!["dev".to_string(), "ops".to_string()]);
    }

    #[test]
    fn test_parse_identity_username_only() {
        let principal = parse_originating_identity(&encode(r#"{"username":"bob"}"#)).unwrap();

        assert_eq!(principal.username, "bob");
        assert!(principal.uid.is_none());
        assert!(principal.groups.is_empty());
    }

    #[test]
    fn test_missing_separator_rejected() {
        let err = parse_originating_identity("kubernetes").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_other_platform_rejected() {
        let header = format!("cloudfoundry {}", STANDARD.encode(r#"{"username":"alice"}"#));
        let err = parse_originating_identity(&header).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains("cloudfoundry"));
    }

    #[test]
    fn test_bad_base64_rejected() {
        let err = parse_originating_identity("kubernetes !!!not-base64!!!").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_bad_json_rejected() {
        let err = parse_originating_identity(&encode("not json")).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_blank_username_rejected() {
        let err = parse_originating_identity(&encode(r#"{"username":"  "}"#)).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
