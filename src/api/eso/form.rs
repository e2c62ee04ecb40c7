use serde::Serialize;

use crate::{
    api::eso::tokens::{FORM_BUILD_ID, FORM_ID, FORM_TOKEN, FormTokens},
    core::{Credentials, DateWindow},
    prelude::*,
};

/// Ordered URL-encoded form body.
///
/// Not `Debug`: the login form holds the password.
#[must_use]
#[derive(Clone, Serialize)]
#[serde(transparent)]
pub struct Form(Vec<(&'static str, String)>);

impl Form {
    pub fn login(credentials: &Credentials) -> Self {
        Self(vec![
            ("name", credentials.username.clone()),
            ("pass", credentials.password.clone()),
            ("login_type", "1".to_owned()),
            (FORM_ID, String::new()),
            (FORM_BUILD_ID, String::new()),
            ("op", "Prisijungti".to_owned()),
        ])
    }

    /// Hourly report of a single day for the meter.
    pub fn report(object_id: &str, window: &DateWindow) -> Self {
        Self(vec![
            ("objects[]", object_id.to_owned()),
            ("objects_mock", String::new()),
            ("scales", "total".to_owned()),
            ("display_type", "hourly".to_owned()),
            ("period", "day".to_owned()),
            ("energy_type", "general".to_owned()),
            ("made_energy_status", "1".to_owned()),
            ("visible_scales_field", "0".to_owned()),
            ("day_period", window.day_period()),
            ("active_date_value", window.active_date_value()),
            ("back_button_value", window.back_button_value()),
            ("next_button_value", window.next_button_value()),
            (FORM_BUILD_ID, String::new()),
            (FORM_TOKEN, String::new()),
            (FORM_ID, String::new()),
            ("_triggering_element_name", "display_type".to_owned()),
            ("_drupal_ajax", "1".to_owned()),
        ])
    }

    /// Fill the template in with the scraped tokens.
    ///
    /// Only the fields the template already has are overwritten.
    pub fn with_tokens(mut self, tokens: FormTokens) -> Self {
        for (name, value) in tokens {
            match self.0.iter_mut().find(|(field, _)| *field == name) {
                Some((_, slot)) => *slot = value,
                None => warn!(field = name, "the form has no such field, skipped"),
            }
        }
        self
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(field, _)| *field == name).map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_login_with_tokens() {
        let credentials =
            Credentials::builder().username("jonas").password("p@ss").object_id("1").build();
        let form = Form::login(&credentials).with_tokens(FormTokens::from([
            (FORM_ID, "user_login_form".to_owned()),
            (FORM_BUILD_ID, "form-123".to_owned()),
        ]));
        assert_eq!(form.get("name"), Some("jonas"));
        assert_eq!(form.get("pass"), Some("p@ss"));
        assert_eq!(form.get(FORM_ID), Some("user_login_form"));
        assert_eq!(form.get(FORM_BUILD_ID), Some("form-123"));
        assert_eq!(form.get("op"), Some("Prisijungti"));
    }

    #[test]
    fn test_missing_tokens_keep_defaults() {
        let window = DateWindow::around(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let form = Form::report("9001", &window)
            .with_tokens(FormTokens::from([(FORM_TOKEN, "t0k3n".to_owned())]));
        assert_eq!(form.get(FORM_TOKEN), Some("t0k3n"));
        assert_eq!(form.get(FORM_ID), Some(""));
        assert_eq!(form.get("objects[]"), Some("9001"));
        assert_eq!(form.get("back_button_value"), Some("2023-12-31 00:00"));
    }

    #[test]
    fn test_unknown_token_ignored() {
        let window = DateWindow::around(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let form = Form::report("9001", &window)
            .with_tokens(FormTokens::from([("honeypot", "x".to_owned())]));
        assert_eq!(form.get("honeypot"), None);
    }

    #[test]
    fn test_url_encoding() -> Result {
        let window = DateWindow::around(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let body = encode(&Form::report("9001", &window))?;
        assert!(body.starts_with("objects%5B%5D=9001&objects_mock=&scales=total"));
        assert!(body.contains("active_date_value=2024-01-01+00%3A00"));
        Ok(())
    }

    /// Encode the same way `reqwest` does for `.form(…)`.
    fn encode(form: &Form) -> Result<String> {
        let request = reqwest::Client::new().post("http://localhost/").form(form).build()?;
        let body = request.body().and_then(reqwest::Body::as_bytes).context("no body")?;
        Ok(String::from_utf8(body.to_vec())?)
    }
}
