//! Hidden form fields scraped from the portal pages.
//!
//! The portal is a Drupal site: every form carries `form_id`, `form_build_id` and, for
//! authenticated users, `form_token`. They must be read fresh from the very page that is
//! about to be submitted.

use std::collections::HashMap;

use scraper::{Html, Selector};

use crate::{core::RefreshError, prelude::*};

pub type FormTokens = HashMap<&'static str, String>;

pub const FORM_ID: &str = "form_id";
pub const FORM_BUILD_ID: &str = "form_build_id";
pub const FORM_TOKEN: &str = "form_token";

/// Which form to look into and which of its inputs are wanted.
#[derive(Copy, Clone, Debug)]
pub struct FormScope {
    pub selector: &'static str,
    pub fields: &'static [&'static str],
}

pub const LOGIN_FORM: FormScope =
    FormScope { selector: "form.user-login-form", fields: &[FORM_ID, FORM_BUILD_ID] };

pub const HISTORY_FORM: FormScope = FormScope {
    selector: "form.eso-consumption-history-form",
    fields: &[FORM_ID, FORM_BUILD_ID, FORM_TOKEN],
};

impl FormScope {
    #[instrument(skip_all, level = Level::DEBUG, fields(scope = self.selector))]
    pub fn extract(&self, markup: &str) -> Result<FormTokens, RefreshError> {
        let tokens = extract(markup, self.selector, self.fields)?;
        if tokens.len() < self.fields.len() {
            let missing = self.fields.iter().filter(|field| !tokens.contains_key(*field));
            warn!(missing = ?missing.collect::<Vec<_>>(), "some tokens are missing");
        } else {
            debug!(n_tokens = tokens.len(), "extracted");
        }
        Ok(tokens)
    }
}

/// Collect the values of the named `input`s inside the scope.
///
/// Absent form or fields are not an error: the mapping simply lacks them. The first input
/// with a given name wins, a missing `value` reads as an empty string.
pub fn extract<'n>(
    markup: &str,
    scope: &str,
    field_names: &[&'n str],
) -> Result<HashMap<&'n str, String>, RefreshError> {
    let selector = Selector::parse(&format!("{scope} input")).map_err(|error| {
        RefreshError::Markup { scope: scope.to_owned(), reason: error.to_string() }
    })?;
    let document = Html::parse_document(markup);
    let mut tokens = HashMap::with_capacity(field_names.len());
    for input in document.select(&selector) {
        let element = input.value();
        let Some(name) = element.attr("name") else {
            continue;
        };
        let Some(field_name) = field_names.iter().find(|field_name| **field_name == name) else {
            continue;
        };
        tokens
            .entry(*field_name)
            .or_insert_with(|| element.attr("value").unwrap_or_default().to_owned());
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    // language=html
    const LOGIN_PAGE: &str = r#"
        <html>
            <body>
                <form class="search-form"><input name="form_id" value="search_form" /></form>
                <form class="user-login-form" action="/" method="post">
                    <input type="text" name="name" />
                    <input type="password" name="pass" />
                    <input type="hidden" name="form_build_id" value="form-Vy3bA9" />
                    <input type="hidden" name="form_id" value="user_login_form" />
                    <input type="hidden" name="form_id" value="duplicate" />
                    <input type="hidden" name="other_field" value="ignored" />
                    <input type="submit" value="Prisijungti" />
                </form>
            </body>
        </html>
    "#;

    #[test]
    fn test_extract_login_form() -> Result {
        let tokens = LOGIN_FORM.extract(LOGIN_PAGE)?;
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[FORM_ID], "user_login_form");
        assert_eq!(tokens[FORM_BUILD_ID], "form-Vy3bA9");
        Ok(())
    }

    #[test]
    fn test_extract_only_requested() -> Result {
        let tokens = extract(LOGIN_PAGE, "form.user-login-form", &["form_id", "form_token"])?;
        assert_eq!(tokens, HashMap::from([("form_id", "user_login_form".to_owned())]));
        Ok(())
    }

    #[test]
    fn test_missing_value_is_empty() -> Result {
        let markup = r#"<form class="f"><input name="form_token"></form>"#;
        let tokens = extract(markup, "form.f", &["form_token"])?;
        assert_eq!(tokens["form_token"], "");
        Ok(())
    }

    #[test]
    fn test_no_form() -> Result {
        assert!(HISTORY_FORM.extract("<p>Maintenance</p>")?.is_empty());
        assert!(HISTORY_FORM.extract("")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_scope() {
        let error = extract(LOGIN_PAGE, "form)", &["form_id"]).unwrap_err();
        assert_eq!(error.kind(), "markup");
    }
}
