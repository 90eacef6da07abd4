//! Browser session id carried in the `atlas_session` cookie.
//! Scopes the landing page's in-flight guard to one browser.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderValue};
use axum::response::Response;
use axum_extra::headers::{Cookie, HeaderMapExt};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "atlas_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    /// No valid cookie arrived with the request.
    pub is_new: bool,
}

impl Session {
    pub fn fresh() -> Self {
        Self { id: Uuid::new_v4(), is_new: true }
    }

    /// Add `Set-Cookie` to the response when the session was just issued.
    pub fn attach(&self, response: &mut Response) {
        if !self.is_new {
            return;
        }
        let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let existing = parts
            .headers
            .typed_get::<Cookie>()
            .and_then(|cookie| cookie.get(SESSION_COOKIE).map(str::to_owned))
            .and_then(|raw| Uuid::parse_str(&raw).ok());

        Ok(match existing {
            Some(id) => Session { id, is_new: false },
            None => Session::fresh(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use axum::response::IntoResponse;

    async fn extract(cookie: Option<&str>) -> Session {
        let mut builder = Request::builder().uri("/");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        Session::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_existing_cookie_is_reused() {
        let id = Uuid::new_v4();
        let session = extract(Some(&format!("theme=dark; atlas_session={id}"))).await;
        assert_eq!(session, Session { id, is_new: false });
    }

    #[tokio::test]
    async fn test_missing_or_garbled_cookie_issues_new_session() {
        assert!(extract(None).await.is_new);
        assert!(extract(Some("atlas_session=not-a-uuid")).await.is_new);
    }

    #[test]
    fn test_attach_only_for_new_sessions() {
        let mut response = "ok".into_response();
        Session { id: Uuid::nil(), is_new: false }.attach(&mut response);
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        let session = Session::fresh();
        session.attach(&mut response);
        let set = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set.starts_with(&format!("atlas_session={}", session.id)));
    }
}
