//! Workspace route segments: `/workspace/{idOrQuery}`.
//!
//! A segment is either an opaque backend id (`ws_…`) or a percent-encoded
//! free-text query.

use crate::error::{AtlasError, Result};

/// Prefix of ids minted by the backend.
pub const WORKSPACE_ID_PREFIX: &str = "ws_";

/// What a workspace route points at, after percent-decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    WorkspaceId(String),
    Query(String),
}

impl RouteTarget {
    /// Decode a raw (still percent-encoded) path segment.
    pub fn from_segment(raw: &str) -> Result<Self> {
        let decoded = urlencoding::decode(raw)
            .map_err(|e| AtlasError::Route(format!("{raw}: {e}")))?
            .into_owned();
        Ok(Self::classify(decoded))
    }

    pub fn classify(decoded: String) -> Self {
        if decoded.starts_with(WORKSPACE_ID_PREFIX) {
            RouteTarget::WorkspaceId(decoded)
        } else {
            RouteTarget::Query(decoded)
        }
    }

    /// The decoded segment. Used as the creation query on either branch.
    pub fn as_str(&self) -> &str {
        match self {
            RouteTarget::WorkspaceId(s) | RouteTarget::Query(s) => s,
        }
    }
}

/// Percent-encode one path segment.
pub fn encode_segment(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

pub fn workspace_path(id_or_query: &str) -> String {
    format!("/workspace/{}", encode_segment(id_or_query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_query_segment() {
        let target = RouteTarget::from_segment("plan%20a%20trip").unwrap();
        assert_eq!(target, RouteTarget::Query("plan a trip".to_string()));
        assert_eq!(target.as_str(), "plan a trip");
    }

    #[test]
    fn test_id_segment_is_classified() {
        let target = RouteTarget::from_segment("ws_123").unwrap();
        assert_eq!(target, RouteTarget::WorkspaceId("ws_123".to_string()));
    }

    #[test]
    fn test_plus_is_not_a_space() {
        let target = RouteTarget::from_segment("c%2B%2B+rust").unwrap();
        assert_eq!(target.as_str(), "c+++rust");
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        assert!(matches!(RouteTarget::from_segment("%FF%FE"), Err(AtlasError::Route(_))));
    }

    #[test]
    fn test_workspace_path_encoding() {
        assert_eq!(workspace_path("ws_123"), "/workspace/ws_123");
        assert_eq!(
            workspace_path("Choose a laptop for CS student under $900"),
            "/workspace/Choose%20a%20laptop%20for%20CS%20student%20under%20%24900"
        );
        assert_eq!(workspace_path("food & drink/japan?"), "/workspace/food%20%26%20drink%2Fjapan%3F");
    }

    #[test]
    fn test_encoded_path_round_trips_through_decoder() {
        let query = "  Plan a Japan trip, 東京  ";
        let path = workspace_path(query);
        let segment = path.trim_start_matches("/workspace/");
        assert_eq!(RouteTarget::from_segment(segment).unwrap().as_str(), query);
    }
}
