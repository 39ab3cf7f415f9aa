//! The age-check gate guarding `POST /agecheck`.
//!
//! Only ages strictly above [`AGE_LIMIT`] pass. Anything else, including a missing,
//! empty or non-numeric `age`, is sent back to `/home`.
//!
//! `age` is taken from a urlencoded body first and the query string second. When a
//! source repeats the key, its last value counts.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::response::found;

pub const AGE_LIMIT: i64 = 200;

pub const REDIRECT_TO: &str = "/home";

const MAX_FORM_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect,
}

/// The `age` a request was admitted with, available to the guarded handler.
#[derive(Debug, Clone)]
pub struct CheckedAge(pub Option<String>);

/// Decides on the raw `age` input.
pub fn check_age(age: Option<&str>) -> GateDecision {
    let Some(raw) = age.map(str::trim).filter(|s| !s.is_empty()) else {
        return GateDecision::Redirect;
    };

    let above = match raw.parse::<i64>() {
        Ok(n) => n > AGE_LIMIT,
        Err(_) => match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => f > AGE_LIMIT as f64,
            _ => false,
        },
    };

    if above {
        GateDecision::Allow
    } else {
        GateDecision::Redirect
    }
}

fn last_age(encoded: &[u8]) -> Result<Option<String>, serde_urlencoded::de::Error> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(encoded)?;

    Ok(pairs
        .into_iter()
        .rev()
        .find_map(|(key, value)| (key == "age").then_some(value)))
}

/// Reads `age` from the form body, falling back to the query string.
fn read_age(
    query: Option<&str>,
    form: Option<&[u8]>,
) -> Result<Option<String>, serde_urlencoded::de::Error> {
    if let Some(age) = form.map(last_age).transpose()?.flatten() {
        return Ok(Some(age));
    }

    Ok(query.map(|q| last_age(q.as_bytes())).transpose()?.flatten())
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|essence| {
            essence
                .trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

pub fn redirect_home() -> Response {
    found(REDIRECT_TO)
}

#[axum::debug_middleware]
pub async fn age_gate(req: Request, nxt: Next) -> Response {
    let form = is_form(&req);
    let (parts, body) = req.into_parts();

    let bytes = match to_bytes(body, MAX_FORM_BYTES).await {
        Ok(b) => b,
        Err(e) => {
            debug!("age gate could not read body: {e}");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    let age = match read_age(parts.uri.query(), form.then_some(&bytes[..])) {
        Ok(age) => age,
        Err(e) => {
            warn!("age gate could not decode input: {e}");
            return (StatusCode::BAD_REQUEST, "Malformed form input").into_response();
        }
    };
    let decision = check_age(age.as_deref());
    debug!(?age, ?decision, "age gate");

    match decision {
        GateDecision::Allow => {
            let mut req = Request::from_parts(parts, Body::from(bytes));
            req.extensions_mut().insert(CheckedAge(age));
            nxt.run(req).await
        }
        GateDecision::Redirect => redirect_home(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("201"), GateDecision::Allow)]
    #[case(Some("9000"), GateDecision::Allow)]
    #[case(Some(" 250 "), GateDecision::Allow)]
    #[case(Some("200.5"), GateDecision::Allow)]
    #[case(Some("200"), GateDecision::Redirect)]
    #[case(Some("150"), GateDecision::Redirect)]
    #[case(Some("-5"), GateDecision::Redirect)]
    #[case(Some(""), GateDecision::Redirect)]
    #[case(Some("old"), GateDecision::Redirect)]
    #[case(Some("NaN"), GateDecision::Redirect)]
    #[case(Some("inf"), GateDecision::Redirect)]
    #[case(None, GateDecision::Redirect)]
    fn decides_on_age(#[case] age: Option<&str>, #[case] expected: GateDecision) {
        assert_eq!(check_age(age), expected);
    }

    #[test]
    fn form_value_wins_over_query() {
        let age = read_age(Some("age=10"), Some(b"age=300&name=joey".as_slice())).unwrap();
        assert_eq!(age.as_deref(), Some("300"));
    }

    #[test]
    fn query_is_used_without_form_age() {
        let age = read_age(Some("age=201"), Some(b"name=joey".as_slice())).unwrap();
        assert_eq!(age.as_deref(), Some("201"));
        assert_eq!(read_age(Some("age=201"), None).unwrap().as_deref(), Some("201"));
        assert_eq!(read_age(None, None).unwrap(), None);
    }

    #[rstest]
    #[case(b"age=150&age=300".as_slice(), Some("300"))]
    #[case(b"age=300&age=150".as_slice(), Some("150"))]
    #[case(b"age=1&name=joey&age=250".as_slice(), Some("250"))]
    #[case(b"name=joey".as_slice(), None)]
    fn repeated_age_takes_last_value(#[case] form: &[u8], #[case] expected: Option<&str>) {
        assert_eq!(read_age(None, Some(form)).unwrap().as_deref(), expected);
    }

    #[test]
    fn repeated_query_age_takes_last_value() {
        let age = read_age(Some("age=1&age=201"), None).unwrap();
        assert_eq!(age.as_deref(), Some("201"));
    }

    #[rstest]
    #[case("application/x-www-form-urlencoded")]
    #[case("Application/X-WWW-Form-Urlencoded")]
    #[case("application/x-www-form-urlencoded; charset=UTF-8")]
    #[case(" APPLICATION/X-WWW-FORM-URLENCODED ;charset=utf-8")]
    fn form_content_type_is_case_insensitive(#[case] content_type: &str) {
        let req = axum::http::Request::builder()
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::empty())
            .unwrap();
        assert!(is_form(&req));
    }

    #[rstest]
    #[case(Some("application/json"))]
    #[case(Some("multipart/form-data; boundary=x"))]
    #[case(None)]
    fn other_bodies_are_not_forms(#[case] content_type: Option<&str>) {
        let mut builder = axum::http::Request::builder();
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        assert!(!is_form(&builder.body(Body::empty()).unwrap()));
    }

    #[test]
    fn redirect_points_home() {
        let response = redirect_home();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], REDIRECT_TO);
    }
}
