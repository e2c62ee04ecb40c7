//! [ESO](https://mano.eso.lt) customer portal client.
//!
//! There is no API, so the client walks through the pages like a browser would: log in,
//! open the consumption history and ask the history form for the hourly chart data.

mod form;
mod report;
mod session;
mod tokens;

use async_trait::async_trait;
use reqwest::Url;

pub use self::session::Session;
use self::{
    form::Form,
    report::aggregate,
    tokens::{FormTokens, HISTORY_FORM, LOGIN_FORM},
};
use crate::{
    core::{Credentials, DateWindow, RefreshError, UsageSource, UsageTotals},
    prelude::*,
};

pub const DEFAULT_BASE_URL: &str = "https://mano.eso.lt";

pub struct Api {
    login_url: Url,
    history_url: Url,
    report_url: Url,
}

impl Api {
    pub fn try_new(base_url: &Url) -> Result<Self> {
        let login_url = base_url.join("/").context("invalid login URL")?;
        let history_url = base_url.join("/consumption").context("invalid history URL")?;
        let mut report_url = history_url.clone();
        report_url
            .query_pairs_mut()
            .append_pair("ajax_form", "1")
            .append_pair("_wrapper_format", "drupal_ajax");
        Ok(Self { login_url, history_url, report_url })
    }

    /// Log in and fetch the hourly history of the day in a fresh session.
    #[instrument(skip_all, fields(object_id = %credentials.object_id, today = %window.today))]
    pub async fn fetch_daily_report_json(
        &self,
        credentials: &Credentials,
        window: &DateWindow,
    ) -> Result<String, RefreshError> {
        let session = Session::try_new()?;
        self.log_in(&session, credentials).await?;
        let report = self.request_report(&session, &credentials.object_id, window).await?;
        info!(n_bytes = report.len(), "fetched the report");
        Ok(report)
    }

    /// Tokens of the login form as the portal currently serves them.
    pub async fn get_login_tokens(&self, session: &Session) -> Result<FormTokens, RefreshError> {
        let page = session.get(&self.login_url).await?;
        LOGIN_FORM.extract(&page)
    }

    /// Submit the login form.
    ///
    /// The portal does not tell whether the credentials are wrong: a failed login only shows up
    /// later as a broken report.
    #[instrument(skip_all)]
    pub async fn log_in(
        &self,
        session: &Session,
        credentials: &Credentials,
    ) -> Result<(), RefreshError> {
        let tokens = self.get_login_tokens(session).await?;
        let form = Form::login(credentials).with_tokens(tokens);
        session.post(&self.login_url, &form).await?;
        debug!("submitted the login form");
        Ok(())
    }

    #[instrument(skip_all)]
    async fn request_report(
        &self,
        session: &Session,
        object_id: &str,
        window: &DateWindow,
    ) -> Result<String, RefreshError> {
        let page = session.get(&self.history_url).await?;
        let tokens = HISTORY_FORM.extract(&page)?;
        let form = Form::report(object_id, window).with_tokens(tokens);
        session.post(&self.report_url, &form).await
    }
}

#[async_trait]
impl UsageSource for Api {
    async fn fetch_daily_report(
        &self,
        credentials: &Credentials,
        window: DateWindow,
    ) -> Result<String, RefreshError> {
        self.fetch_daily_report_json(credentials, &window).await
    }

    fn aggregate(&self, report: &str) -> Result<UsageTotals, RefreshError> {
        aggregate(report)
    }
}
