//! HTTP client for the quotes and auth endpoints.
//!
//! Request shapes and response interpretation live in [`darlingx_core::api`];
//! this module only performs the requests.

use darlingx_core::api::{self, Credentials, QuoteDraft};
use darlingx_core::models::{QuoteFeed, UserInfo};
use darlingx_core::ApiError;
use gloo_net::http::{Request, Response};

use crate::config::cache::QUOTES_KEY;
use crate::utils::cache;

fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

async fn body(response: Response) -> Result<(u16, String), ApiError> {
    let status = response.status();
    let text = response.text().await.map_err(network)?;
    Ok((status, text))
}

async fn post_form(url: &str, form: String) -> Result<Response, ApiError> {
    Request::post(url)
        .header("Content-Type", api::FORM_CONTENT_TYPE)
        .body(form)
        .map_err(network)?
        .send()
        .await
        .map_err(network)
}

/// Community quotes, served from the session cache when possible.
pub async fn fetch_quotes() -> Result<QuoteFeed, ApiError> {
    if let Some(feed) = cache::load::<QuoteFeed>(QUOTES_KEY) {
        return Ok(feed);
    }

    let response = Request::get(api::GET_QUOTES).send().await.map_err(network)?;
    let (status, text) = body(response).await?;
    let feed = api::parse_quotes(status, &text)?;

    if let Err(e) = cache::save(QUOTES_KEY, &feed) {
        log::debug!("quotes not cached: {e}");
    }
    Ok(feed)
}

/// Post a quote. The cached list is dropped on success.
pub async fn submit_quote(draft: &QuoteDraft) -> Result<(), ApiError> {
    let response = post_form(api::SUBMIT_QUOTE, draft.to_form()).await?;
    let (status, text) = body(response).await?;
    api::interpret(status, &text)?;
    cache::forget(QUOTES_KEY);
    Ok(())
}

pub async fn current_user() -> Result<UserInfo, ApiError> {
    let response = Request::get(api::USER).send().await.map_err(network)?;
    let (status, text) = body(response).await?;
    if !(200..300).contains(&status) {
        return Err(ApiError::UnexpectedStatus(status));
    }
    api::parse_user(&text)
}

pub async fn login(credentials: &Credentials) -> Result<(), ApiError> {
    let response = post_form(api::LOGIN, credentials.to_form()).await?;
    let (status, text) = body(response).await?;
    api::interpret(status, &text)
}

/// Create an account. A redirect after registering counts as success.
pub async fn register(credentials: &Credentials) -> Result<(), ApiError> {
    let response = post_form(api::REGISTER, credentials.to_form()).await?;
    if response.redirected() && response.ok() {
        return Ok(());
    }
    let (status, text) = body(response).await?;
    api::interpret(status, &text)
}
