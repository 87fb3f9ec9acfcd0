use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unverified JWT payload fields, read for display only. The server is the
/// sole judge of token validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(payload: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn decodes_payload_claims() {
        let token = encode(r#"{"exp":1700000000,"user_id":4,"token_type":"access"}"#);
        let claims = decode_claims(&token).expect("claims");
        assert_eq!(claims.user_id, Some(4));
        assert_eq!(
            claims.expires_at().map(|at| at.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn opaque_tokens_have_no_claims() {
        assert!(decode_claims("mock_access_token_admin").is_none());
        assert!(decode_claims("a.!!!.c").is_none());
    }
}
