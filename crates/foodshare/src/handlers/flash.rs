//! Flash message utilities for server-to-client communication.
//!
//! Flash messages are short-lived messages stored in a cookie, shown once on
//! the page a mutation redirects to, and then cleared. Used for reporting
//! the outcome of a form submission across the redirect.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

const COOKIE_NAME: &str = "flash_message";

/// Flash message structure stored in cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashMessage {
    /// Message type ("error" or "success")
    #[serde(rename = "type")]
    pub message_type: String,
    /// The message content to display
    pub message: String,
}

impl FlashMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message_type: "error".to_string(),
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message_type: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.message_type == "error"
    }

    /// Serialize to JSON for cookie storage.
    pub fn to_cookie_value(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Build the flash cookie. The jar percent-encodes the JSON value.
    ///
    /// Cookie properties:
    /// - Path: / (accessible from any page)
    /// - SameSite: Lax (sent on navigation, not cross-site requests)
    /// - Max-Age: 60 (expires after 60 seconds as a safety net)
    /// - HttpOnly (only the server reads it)
    pub fn to_cookie(&self) -> Cookie<'static> {
        Cookie::build((COOKIE_NAME, self.to_cookie_value()))
            .path("/")
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(60))
            .http_only(true)
            .build()
    }

    /// Reads the flash message from the request cookies, if any.
    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        jar.get(COOKIE_NAME)
            .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
    }
}

/// Create a redirect response with a flash message cookie.
///
/// Uses 303 See Other so the browser follows a form POST with a GET.
pub fn redirect_with_flash(url: &str, flash: FlashMessage) -> Response {
    let jar = CookieJar::new().add(flash.to_cookie());

    (jar, Redirect::to(url)).into_response()
}

/// Extractor for the flash message left by the previous request.
///
/// Keeps the request's cookie jar so the cookie can be removed once shown.
#[derive(Debug, Clone, Default)]
pub struct Flash(pub Option<FlashMessage>, CookieJar);

impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Flash(FlashMessage::from_jar(&jar), jar))
    }
}

impl Flash {
    /// Wraps a page response, clearing the cookie once the message is shown.
    pub fn consume(&self, response: impl IntoResponse) -> Response {
        if self.0.is_none() {
            return response.into_response();
        }
        let jar = self.1.clone().remove(Cookie::build(COOKIE_NAME).path("/"));
        (jar, response).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{COOKIE, SET_COOKIE};
    use axum::http::{HeaderMap, HeaderValue, StatusCode};

    /// Request headers carrying `value` as the raw flash cookie.
    fn cookie_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {COOKIE_NAME}={value}")).unwrap(),
        );
        headers
    }

    fn flash_from(headers: HeaderMap) -> Flash {
        let jar = CookieJar::from_headers(&headers);
        Flash(FlashMessage::from_jar(&jar), jar)
    }

    #[test]
    fn test_error_flash_message() {
        let flash = FlashMessage::error("Cannot delete Provider 1");
        assert_eq!(flash.message_type, "error");
        assert!(flash.is_error());
    }

    #[test]
    fn test_success_flash_message() {
        let flash = FlashMessage::success("Provider added successfully!");
        assert_eq!(flash.message_type, "success");
        assert!(!flash.is_error());
    }

    #[test]
    fn test_to_cookie_value() {
        let flash = FlashMessage::error("Test message");
        let json = flash.to_cookie_value();
        assert!(json.contains("\"type\":\"error\""));
        assert!(json.contains("\"message\":\"Test message\""));
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = FlashMessage::error("Test").to_cookie();
        assert_eq!(cookie.name(), "flash_message");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(60)));
        assert_eq!(cookie.http_only(), Some(true));
    }

    #[test]
    fn test_cookie_round_trips_through_request_headers() {
        let flash = FlashMessage::success("Food updated successfully!");
        let encoded = urlencoding::encode(&flash.to_cookie_value()).into_owned();

        assert_eq!(flash_from(cookie_headers(&encoded)).0, Some(flash));
    }

    #[test]
    fn test_missing_or_garbled_cookie_is_ignored() {
        assert_eq!(flash_from(HeaderMap::new()).0, None);
        assert_eq!(flash_from(cookie_headers("%7Bnot-json")).0, None);
    }

    #[test]
    fn test_redirect_with_flash_is_see_other() {
        let response = redirect_with_flash("/crud", FlashMessage::success("ok"));
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("flash_message="));
        assert!(cookie.contains("Max-Age=60"));
    }

    #[test]
    fn test_consume_clears_the_cookie() {
        let value = FlashMessage::success("ok").to_cookie_value();
        let encoded = urlencoding::encode(&value).into_owned();
        let flash = flash_from(cookie_headers(&encoded));
        let response = flash.consume(StatusCode::OK);
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("flash_message=;"));
        assert!(cookie.contains("Max-Age=0"));

        let response = flash_from(HeaderMap::new()).consume(StatusCode::OK);
        assert!(!response.headers().contains_key(SET_COOKIE));
    }
}
