//! Guestbook quotes and session info as served by the site API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// MySQL `DATETIME` text format used by `created_at`.
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A community quote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub text: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub created_at: String,
}

impl Quote {
    /// `created_at` as a short date (`Mar 1, 2025`), or the raw value when it
    /// is not a timestamp.
    pub fn posted_on(&self) -> String {
        NaiveDateTime::parse_from_str(self.created_at.trim(), CREATED_AT_FORMAT)
            .map(|at| at.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|_| self.created_at.clone())
    }
}

/// Body of `GET /api/get-quotes`.
///
/// The documented shape wraps the list; older deployments return the bare
/// array, so both are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QuotesPayload {
    Wrapped {
        #[serde(default)]
        quotes: Vec<Quote>,
    },
    Bare(Vec<Quote>),
}

impl QuotesPayload {
    pub fn into_quotes(self) -> Vec<Quote> {
        match self {
            Self::Wrapped { quotes } | Self::Bare(quotes) => quotes,
        }
    }
}

/// What the guestbook list shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteFeed {
    /// Nothing posted yet; the widget shows an explanation instead of a list.
    Empty,
    Quotes(Vec<Quote>),
}

impl From<Vec<Quote>> for QuoteFeed {
    fn from(quotes: Vec<Quote>) -> Self {
        if quotes.is_empty() {
            Self::Empty
        } else {
            Self::Quotes(quotes)
        }
    }
}

/// `{ "status": "success" }` / `{ "status": "error", "message": ... }`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error {
        #[serde(default)]
        message: String,
    },
}

/// Body of `GET /api/user`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub logged_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_payload() {
        let payload: QuotesPayload = serde_json::from_str(
            r#"{"quotes":[{"text":"Stay hungry","author":"Jobs","created_at":"2025-03-01 10:00:00"}]}"#,
        )
        .unwrap();
        let quotes = payload.into_quotes();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].author, "Jobs");
        assert_eq!(quotes[0].id, None);
    }

    #[test]
    fn test_bare_payload() {
        let payload: QuotesPayload =
            serde_json::from_str(r#"[{"text":"a","author":"b","created_at":""}]"#).unwrap();
        assert_eq!(payload.into_quotes().len(), 1);
    }

    #[test]
    fn test_empty_list_is_empty_feed() {
        let payload: QuotesPayload = serde_json::from_str(r#"{"quotes":[]}"#).unwrap();
        assert_eq!(QuoteFeed::from(payload.into_quotes()), QuoteFeed::Empty);
    }

    #[test]
    fn test_api_status() {
        let ok: ApiStatus = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert_eq!(ok, ApiStatus::Success);

        let err: ApiStatus =
            serde_json::from_str(r#"{"status":"error","message":"Sign in first"}"#).unwrap();
        assert_eq!(
            err,
            ApiStatus::Error {
                message: "Sign in first".to_string()
            }
        );
    }

    #[test]
    fn test_user_info_without_email() {
        let user: UserInfo = serde_json::from_str(r#"{"logged_in":false}"#).unwrap();
        assert_eq!(user, UserInfo::default());
    }

    #[test]
    fn test_posted_on() {
        let mut quote = Quote {
            id: None,
            text: "t".to_string(),
            author: "a".to_string(),
            user_id: None,
            created_at: "2025-03-01 18:30:00".to_string(),
        };
        assert_eq!(quote.posted_on(), "Mar 1, 2025");

        quote.created_at = "yesterday".to_string();
        assert_eq!(quote.posted_on(), "yesterday");
    }
}
