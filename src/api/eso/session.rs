use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;

use crate::{core::RefreshError, prelude::*};

const USER_AGENT: &str = concat!("eso-energy/", env!("CARGO_PKG_VERSION"));

/// Cookie-bearing portal session, good for exactly one refresh.
pub struct Session(Client);

impl Session {
    pub fn try_new() -> Result<Self, RefreshError> {
        Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()
            .map(Self)
            .map_err(RefreshError::Client)
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(url = %url))]
    pub async fn get(&self, url: &Url) -> Result<String, RefreshError> {
        self.execute("GET", url, self.0.get(url.clone())).await
    }

    /// Submit the fields as a URL-encoded form.
    #[instrument(skip_all, level = Level::DEBUG, fields(url = %url))]
    pub async fn post<F: Serialize + ?Sized>(
        &self,
        url: &Url,
        fields: &F,
    ) -> Result<String, RefreshError> {
        self.execute("POST", url, self.0.post(url.clone()).form(fields)).await
    }

    async fn execute(
        &self,
        method: &'static str,
        url: &Url,
        request: RequestBuilder,
    ) -> Result<String, RefreshError> {
        let transport =
            |source: reqwest::Error| RefreshError::Transport { method, url: url.to_string(), source };
        let body = request
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?
            .text()
            .await
            .map_err(transport)?;
        debug!(n_bytes = body.len(), "received");
        Ok(body)
    }
}
