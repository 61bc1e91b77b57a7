//! Classification of TBO search responses.
//!
//! TBO answers an expired session with either a redirect to its login page
//! or a login/expiry page served as a normal document. Both are detected
//! with plain substring checks.

use axum::http::StatusCode;

use crate::providers::RelayError;

/// Pages shorter than this (in UTF-16 code units) that mention `login` are
/// treated as login pages.
pub const LOGIN_PAGE_MAX_LEN: usize = 10_000;

const LOGIN_LOCATION_MARKERS: &[&str] = &["login", "Login"];
const EXPIRY_MARKERS: &[&str] = &["Session has expired", "Please login"];
const LOGIN_MARKER: &str = "login";
const RESULT_MARKERS: &[&str] = &["flightresult", "result_p", "flight-result", "FlightResult"];
const NO_RESULTS_NOTICES: &[&str] = &["No flights", "no results"];

/// Outcome of inspecting an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A results page with at least one result container.
    Success,
    /// The session cookie is no longer accepted.
    AuthExpired(AuthExpiry),
    /// A 200 page without result containers. Relayed like `Success`.
    Unknown(ResultsHint),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthExpiry {
    LoginRedirect { location: String },
    Invalid { html_length: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultsHint {
    /// A large page carried a "no flights" notice.
    pub no_flights_notice: bool,
}

impl From<AuthExpiry> for RelayError {
    fn from(expiry: AuthExpiry) -> Self {
        match expiry {
            AuthExpiry::LoginRedirect { location } => RelayError::LoginRedirect { location },
            AuthExpiry::Invalid { html_length } => RelayError::SessionInvalid { html_length },
        }
    }
}

/// Classify an upstream response by status, `Location` and decoded body.
///
/// `html_length` is measured in UTF-16 code units, the unit the browser
/// client uses for string length.
pub fn classify(status: StatusCode, location: Option<&str>, html: &str) -> SessionOutcome {
    if matches!(status, StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND) {
        if let Some(location) = location {
            if contains_any(location, LOGIN_LOCATION_MARKERS) {
                return SessionOutcome::AuthExpired(AuthExpiry::LoginRedirect {
                    location: location.to_string(),
                });
            }
        }
    }

    let html_length = html_length(html);
    let short_login_page = html.contains(LOGIN_MARKER) && html_length < LOGIN_PAGE_MAX_LEN;
    if status != StatusCode::OK || contains_any(html, EXPIRY_MARKERS) || short_login_page {
        return SessionOutcome::AuthExpired(AuthExpiry::Invalid { html_length });
    }

    if contains_any(html, RESULT_MARKERS) {
        SessionOutcome::Success
    } else {
        SessionOutcome::Unknown(ResultsHint {
            no_flights_notice: html_length > LOGIN_PAGE_MAX_LEN
                && contains_any(html, NO_RESULTS_NOTICES),
        })
    }
}

/// Length of `html` in UTF-16 code units.
pub fn html_length(html: &str) -> usize {
    html.encode_utf16().count()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
