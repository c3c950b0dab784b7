pub mod invalid;
pub mod logins;
pub mod report;
pub mod users;

mod json;

use axum::{
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Every endpoint answers `200` with an indented, ASCII-only JSON document.
pub(crate) fn json_response<T: Serialize>(body: &T) -> Response {
    match json::to_ascii_pretty_string(body) {
        Ok(json) => (
            StatusCode::OK,
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            json,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("unable to serialize response body :: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Splits on every universal line boundary, treating `\r\n` as one.
/// A trailing boundary does not produce an empty last element.
pub(crate) fn split_lines(output: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = output;

    while !rest.is_empty() {
        let Some(at) = rest.find(is_line_boundary) else {
            lines.push(rest.to_owned());
            break;
        };
        lines.push(rest[..at].to_owned());

        let tail = &rest[at..];
        let width = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        rest = &tail[width..];
    }

    lines
}
