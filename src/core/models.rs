use std::fmt;

use chrono::{DateTime, Duration, Utc};

use super::types::*;

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ClientCredentials {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
}

/// Everything needed to call the API on behalf of one user and to refresh
/// the access token later.
///
/// Serialized in the authorized-user layout the Google client libraries
/// read, so stored files can be loaded directly by other tooling.
#[derive(Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CredentialBundle {
    #[serde(rename = "token")]
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_uri: String,
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub scopes: Scope,
    #[serde(default, with = "expiry_format")]
    pub expiry: Option<DateTime<Utc>>,
}

/// `2024-01-31T12:00:00.123456Z`, microsecond precision. Reads also accept
/// RFC 3339 offsets and zone-less timestamps, taken as UTC.
mod expiry_format {
    use chrono::{DateTime, NaiveDateTime, ParseResult, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

    pub fn serialize<S>(expiry: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match expiry {
            Some(expiry) => serializer.serialize_str(&expiry.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }

    fn parse(raw: &str) -> ParseResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(raw.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|naive| Utc.from_utc_datetime(&naive))
            })
    }
}

impl CredentialBundle {
    /// Absolute expiry for a token that is valid for `expires_in` seconds from `now`.
    pub fn expiry_from(now: DateTime<Utc>, expires_in: Option<i64>) -> Option<DateTime<Utc>> {
        expires_in.map(|secs| now + Duration::seconds(secs))
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expiry, Some(expiry) if expiry <= now)
    }
}

impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("token_uri", &self.token_uri)
            .field("client_id", &self.client_id)
            .field("scopes", &self.scopes)
            .field("expiry", &self.expiry)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish()
    }
}
