//! Contracts of the site's JSON endpoints.
//!
//! Request bodies, client-side validation and response interpretation. The
//! browser layer only moves bytes; everything that decides what a response
//! means lives here.

use crate::config::{ANONYMOUS_AUTHOR, EMPTY_QUOTES_MESSAGE, MIN_PASSWORD_LEN};
use crate::error::ApiError;
use crate::models::{ApiStatus, QuoteFeed, QuotesPayload, UserInfo};

// =============================================================================
// Endpoints
// =============================================================================

pub const GET_QUOTES: &str = "/api/get-quotes";
pub const SUBMIT_QUOTE: &str = "/api/submit-quote";
pub const USER: &str = "/api/user";
pub const LOGIN: &str = "/api/login";
pub const REGISTER: &str = "/api/register";

/// Content type of every POST body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// =============================================================================
// Requests
// =============================================================================

/// Encode `application/x-www-form-urlencoded` pairs.
pub fn form_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// A quote ready to submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteDraft {
    pub text: String,
    pub author: String,
}

impl QuoteDraft {
    pub fn to_form(&self) -> String {
        form_body(&[("text", self.text.as_str()), ("author", self.author.as_str())])
    }
}

/// Check a quote form. Blank text is rejected; a blank author is anonymous.
pub fn validate_quote(text: &str, author: &str) -> Result<QuoteDraft, ApiError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::Validation("Please enter a quote".to_string()));
    }
    let author = match author.trim() {
        "" => ANONYMOUS_AUTHOR,
        author => author,
    };
    Ok(QuoteDraft {
        text: text.to_string(),
        author: author.to_string(),
    })
}

/// Email and password for login or registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Result<Self, ApiError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::Validation("All fields are required".to_string()));
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    pub fn to_form(&self) -> String {
        form_body(&[("email", self.email.as_str()), ("password", self.password.as_str())])
    }
}

/// Credentials for a new account, with the server's password rule applied.
pub fn validate_registration(email: &str, password: &str) -> Result<Credentials, ApiError> {
    let credentials = Credentials::new(email, password)?;
    let strong = password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit());
    if !strong {
        return Err(ApiError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters and contain letters and digits"
        )));
    }
    Ok(credentials)
}

// =============================================================================
// Responses
// =============================================================================

/// Interpret a `{status, message?}` response.
///
/// Error statuses map to [`ApiError`] variants carrying the server message
/// when there is one.
pub fn interpret(status: u16, body: &str) -> Result<(), ApiError> {
    let parsed = serde_json::from_str::<ApiStatus>(body).ok();
    let message = match &parsed {
        Some(ApiStatus::Error { message }) if !message.is_empty() => message.clone(),
        _ => default_message(status).to_string(),
    };

    match status {
        200..=299 => match parsed {
            Some(ApiStatus::Success) => Ok(()),
            Some(ApiStatus::Error { .. }) => Err(ApiError::Server(message)),
            None => Err(ApiError::Malformed(snippet(body))),
        },
        400 => Err(ApiError::Validation(message)),
        401 => Err(ApiError::Unauthorized(message)),
        403 => Err(ApiError::Forbidden(message)),
        409 => Err(ApiError::Conflict(message)),
        500..=599 => Err(ApiError::Server(message)),
        other => Err(ApiError::UnexpectedStatus(other)),
    }
}

fn default_message(status: u16) -> &'static str {
    match status {
        400 => "All fields are required",
        401 => "Invalid email or password",
        403 => "Please log in first",
        409 => "Email already registered",
        _ => "Something went wrong",
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(80).collect()
}

/// Parse the quote list. `{quotes: []}` and `[]` both mean an empty feed.
pub fn parse_quotes(status: u16, body: &str) -> Result<QuoteFeed, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::UnexpectedStatus(status));
    }
    serde_json::from_str::<QuotesPayload>(body)
        .map(|payload| QuoteFeed::from(payload.into_quotes()))
        .map_err(|e| ApiError::Malformed(e.to_string()))
}

pub fn parse_user(body: &str) -> Result<UserInfo, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))
}

/// Text the guestbook shows when there are no quotes.
pub fn empty_state_message(feed: &QuoteFeed) -> Option<&'static str> {
    match feed {
        QuoteFeed::Empty => Some(EMPTY_QUOTES_MESSAGE),
        QuoteFeed::Quotes(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_body_encodes() {
        assert_eq!(
            form_body(&[("text", "to be & not"), ("author", "Ann Lee")]),
            "text=to%20be%20%26%20not&author=Ann%20Lee"
        );
    }

    #[test]
    fn test_quote_author_defaults() {
        let draft = validate_quote("  Know thyself ", "   ").unwrap();
        assert_eq!(draft.text, "Know thyself");
        assert_eq!(draft.author, "Anonymous");
    }

    #[test]
    fn test_blank_quote_rejected() {
        assert!(matches!(validate_quote(" \n", "Me"), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_registration_rules() {
        assert!(validate_registration("a@b.c", "abc123").is_ok());
        for (email, password) in [("", "abc123"), ("a@b.c", ""), ("a@b.c", "abc12"), ("a@b.c", "abcdef"), ("a@b.c", "123456")] {
            assert!(
                matches!(validate_registration(email, password), Err(ApiError::Validation(_))),
                "{email:?} {password:?}"
            );
        }
    }

    #[test]
    fn test_interpret_success() {
        assert_eq!(interpret(200, r#"{"status":"success"}"#), Ok(()));
    }

    #[test]
    fn test_interpret_status_mapping() {
        let body = r#"{"status":"error","message":"nope"}"#;
        assert_eq!(interpret(400, body), Err(ApiError::Validation("nope".to_string())));
        assert_eq!(interpret(401, body), Err(ApiError::Unauthorized("nope".to_string())));
        assert_eq!(interpret(403, body), Err(ApiError::Forbidden("nope".to_string())));
        assert_eq!(interpret(409, body), Err(ApiError::Conflict("nope".to_string())));
        assert_eq!(interpret(500, body), Err(ApiError::Server("nope".to_string())));
        assert_eq!(interpret(418, body), Err(ApiError::UnexpectedStatus(418)));
    }

    #[test]
    fn test_interpret_without_message() {
        assert_eq!(
            interpret(409, "not json"),
            Err(ApiError::Conflict("Email already registered".to_string()))
        );
        assert!(matches!(interpret(200, "<html>"), Err(ApiError::Malformed(_))));
    }

    #[test]
    fn test_empty_quotes_show_message() {
        let feed = parse_quotes(200, r#"{"quotes":[]}"#).unwrap();
        assert_eq!(feed, QuoteFeed::Empty);
        assert_eq!(
            empty_state_message(&feed),
            Some("No quotes yet. Add the first one above!")
        );
        assert_eq!(parse_quotes(200, "[]").unwrap(), QuoteFeed::Empty);
    }

    #[test]
    fn test_quotes_feed() {
        let feed = parse_quotes(
            200,
            r#"{"quotes":[{"text":"Less is more","author":"Mies","created_at":"2025-01-02 03:04:05"}]}"#,
        )
        .unwrap();
        let QuoteFeed::Quotes(quotes) = &feed else {
            panic!("expected quotes");
        };
        assert_eq!(quotes[0].author, "Mies");
        assert_eq!(empty_state_message(&feed), None);
    }

    #[test]
    fn test_quotes_bad_status() {
        assert_eq!(parse_quotes(500, ""), Err(ApiError::UnexpectedStatus(500)));
    }

    #[test]
    fn test_parse_user() {
        let user = parse_user(r#"{"logged_in":true,"email":"me@darlingx.example"}"#).unwrap();
        assert!(user.logged_in);
        assert_eq!(parse_user(r#"{"logged_in":false}"#).unwrap().email, None);
    }
}
