use reqwest::{Client, StatusCode};
use tidalcord_detect::TrackIdentity;

use super::error::TidalError;
use super::types::{SearchResponse, TrackResponse};
use crate::traits::{MusicCatalog, TrackMetadata};

pub const BASE_URL: &str = "https://openapi.tidal.com";

/// Upper bound the search endpoint accepts for `query`, in characters.
pub const MAX_QUERY_CHARS: usize = 100;

const MEDIA_TYPE: &str = "application/vnd.tidal.v1+json";

/// TIDAL open API catalog client.
pub struct TidalClient {
    base_url: String,
    country_code: String,
    popularity: String,
    http: Client,
}

impl TidalClient {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self::with_base_url(BASE_URL, country_code, "WORLDWIDE")
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        country_code: impl Into<String>,
        popularity: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            country_code: country_code.into(),
            popularity: popularity.into(),
            http: Client::new(),
        }
    }

    fn get(&self, url: String, token: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .bearer_auth(token)
            .header("accept", MEDIA_TYPE)
            .header("Content-Type", MEDIA_TYPE)
    }

    fn search_params(&self, query: String) -> [(&'static str, String); 6] {
        [
            ("query", query),
            ("type", "TRACKS".into()),
            ("offset", "0".into()),
            ("limit", "1".into()),
            ("countryCode", self.country_code.clone()),
            ("popularity", self.popularity.clone()),
        ]
    }

    async fn request_search(
        &self,
        identity: &TrackIdentity,
        token: &str,
    ) -> Result<(StatusCode, String), TidalError> {
        let query = build_query(identity);
        tracing::debug!(%query, "Searching track");

        let resp = self
            .get(format!("{}/search", self.base_url), token)
            .query(&self.search_params(query))
            .send()
            .await?;

        let status = resp.status();
        Ok((status, resp.text().await?))
    }

    async fn request_track(
        &self,
        track_id: &str,
        token: &str,
    ) -> Result<(StatusCode, String), TidalError> {
        tracing::debug!(track_id, "Requesting track details");

        let resp = self
            .get(format!("{}/tracks/{track_id}", self.base_url), token)
            .query(&[("countryCode", self.country_code.as_str())])
            .send()
            .await?;

        let status = resp.status();
        Ok((status, resp.text().await?))
    }
}

impl MusicCatalog for TidalClient {
    async fn search(&self, identity: &TrackIdentity, token: &str) -> Option<String> {
        match self.request_search(identity, token).await {
            Ok((status, body)) => decode_search(status, &body),
            Err(e) => {
                tracing::error!(error = %e, "Error searching track");
                None
            }
        }
    }

    async fn fetch_metadata(&self, track_id: &str, token: &str) -> TrackMetadata {
        match self.request_track(track_id, token).await {
            Ok((status, body)) => decode_track(track_id, status, &body),
            Err(e) => {
                tracing::error!(track_id, error = %e, "Error fetching track details");
                TrackMetadata::empty(track_id)
            }
        }
    }
}

/// `"<title> <artist>"`, cut to [`MAX_QUERY_CHARS`] characters.
pub fn build_query(identity: &TrackIdentity) -> String {
    format!("{} {}", identity.title, identity.artist)
        .chars()
        .take(MAX_QUERY_CHARS)
        .collect()
}

fn check_status(status: StatusCode, accepted: &[StatusCode], body: &str) -> Result<(), TidalError> {
    if accepted.contains(&status) {
        Ok(())
    } else {
        Err(TidalError::Api {
            status: status.as_u16(),
            message: body.to_string(),
        })
    }
}

/// Track id from a search response; 200 and 207 count as success.
pub fn decode_search(status: StatusCode, body: &str) -> Option<String> {
    let result = check_status(status, &[StatusCode::OK, StatusCode::MULTI_STATUS], body)
        .and_then(|()| {
            serde_json::from_str::<SearchResponse>(body)
                .map_err(|e| TidalError::Parse(e.to_string()))
        });

    match result {
        Ok(resp) => {
            let id = resp.first_track_id();
            match &id {
                Some(id) => tracing::debug!(track_id = %id, "Found track"),
                None => tracing::warn!("No tracks found in search response"),
            }
            id
        }
        Err(e) => {
            tracing::error!(error = %e, "Error searching track");
            None
        }
    }
}

/// Duration and cover from a track response; anything but 200 yields empty metadata.
pub fn decode_track(track_id: &str, status: StatusCode, body: &str) -> TrackMetadata {
    let result = check_status(status, &[StatusCode::OK], body).and_then(|()| {
        serde_json::from_str::<TrackResponse>(body).map_err(|e| TidalError::Parse(e.to_string()))
    });

    match result {
        Ok(resp) => {
            let metadata = TrackMetadata {
                track_id: track_id.to_string(),
                duration_secs: resp.duration_secs(),
                image_url: resp.cover_url().map(str::to_string),
            };
            tracing::debug!(
                track_id,
                duration = metadata.duration_secs,
                image_url = ?metadata.image_url,
                "Track details"
            );
            metadata
        }
        Err(e) => {
            tracing::error!(track_id, error = %e, "Error fetching track details");
            TrackMetadata::empty(track_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_joins_title_and_artist() {
        let id = TrackIdentity::new("Song A", "Artist A");
        assert_eq!(build_query(&id), "Song A Artist A");
    }

    #[test]
    fn test_query_sentinel() {
        assert_eq!(
            build_query(&TrackIdentity::unknown()),
            "Unknown Title Unknown Artist"
        );
    }

    #[test]
    fn test_long_query_truncated_to_limit() {
        let id = TrackIdentity::new("x".repeat(80), "y".repeat(80));
        let query = build_query(&id);
        assert_eq!(query.chars().count(), MAX_QUERY_CHARS);
        assert!(query.starts_with(&"x".repeat(80)));
        assert!(query.ends_with(&format!(" {}", "y".repeat(19))));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let id = TrackIdentity::new("ü".repeat(150), "Artist");
        let query = build_query(&id);
        assert_eq!(query.chars().count(), 100);
        assert_eq!(query, "ü".repeat(100));
    }

    #[test]
    fn test_short_query_untouched() {
        let title = "t".repeat(50);
        let artist = "a".repeat(49);
        let query = build_query(&TrackIdentity::new(title.as_str(), artist.as_str()));
        assert_eq!(query.len(), 100);
        assert_eq!(query, format!("{title} {artist}"));
    }

    #[test]
    fn test_search_params() {
        let client = TidalClient::new("US");
        let params = client.search_params("Song A Artist A".into());
        let get = |k: &str| {
            params
                .iter()
                .find(|(name, _)| *name == k)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("query"), Some("Song A Artist A"));
        assert_eq!(get("type"), Some("TRACKS"));
        assert_eq!(get("offset"), Some("0"));
        assert_eq!(get("limit"), Some("1"));
        assert_eq!(get("countryCode"), Some("US"));
        assert_eq!(get("popularity"), Some("WORLDWIDE"));
    }

    #[test]
    fn test_decode_search_ok_and_multi_status() {
        let body = r#"{"tracks": [{"resource": {"id": "t1"}}]}"#;
        assert_eq!(decode_search(StatusCode::OK, body).as_deref(), Some("t1"));
        assert_eq!(
            decode_search(StatusCode::MULTI_STATUS, body).as_deref(),
            Some("t1")
        );
    }

    #[test]
    fn test_decode_search_error_status() {
        let body = r#"{"tracks": [{"resource": {"id": "t1"}}]}"#;
        assert_eq!(decode_search(StatusCode::INTERNAL_SERVER_ERROR, body), None);
        assert_eq!(decode_search(StatusCode::CREATED, body), None);
        assert_eq!(decode_search(StatusCode::UNAUTHORIZED, "denied"), None);
    }

    #[test]
    fn test_decode_search_bad_body() {
        assert_eq!(decode_search(StatusCode::OK, "not json"), None);
        assert_eq!(decode_search(StatusCode::OK, r#"{"tracks": []}"#), None);
    }

    #[test]
    fn test_decode_track_error_status_is_empty() {
        let body = r#"{"resource": {"duration": 200}}"#;
        for status in [
            StatusCode::NOT_FOUND,
            StatusCode::MULTI_STATUS,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let metadata = decode_track("t1", status, body);
            assert_eq!(metadata.track_id, "t1");
            assert_eq!(metadata.duration_secs, 0);
            assert_eq!(metadata.image_url, None);
        }
    }

    #[test]
    fn test_decode_track_ok() {
        let body = r#"{"resource": {"duration": 200, "album": {"imageCover": [{"url": "https://img/1.jpg"}]}}}"#;
        let metadata = decode_track("t1", StatusCode::OK, body);
        assert_eq!(
            metadata,
            TrackMetadata {
                track_id: "t1".into(),
                duration_secs: 200,
                image_url: Some("https://img/1.jpg".into()),
            }
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = TidalClient::with_base_url("http://localhost:8080/", "US", "WORLDWIDE");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_unreachable_catalog_degrades() {
        // Reserve a free port, then release it so connections are refused.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client =
            TidalClient::with_base_url(format!("http://127.0.0.1:{port}"), "US", "WORLDWIDE");
        let id = TrackIdentity::new("Song A", "Artist A");

        assert_eq!(client.search(&id, "token").await, None);
        assert_eq!(
            client.fetch_metadata("t1", "token").await,
            TrackMetadata::empty("t1")
        );
    }
}
