use serde::Deserialize;

/// `GET /search` response. Only the fields used for matching are kept.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub resource: Option<SearchResource>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResource {
    pub id: Option<ResourceId>,
}

/// Resource ids are strings in the v1 API, but tolerate bare numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Text(String),
    Number(u64),
}

impl ResourceId {
    pub fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

impl SearchResponse {
    /// Id of the first track hit.
    pub fn first_track_id(self) -> Option<String> {
        self.tracks
            .into_iter()
            .next()
            .and_then(|hit| hit.resource)
            .and_then(|r| r.id)
            .map(ResourceId::into_string)
    }
}

/// `GET /tracks/{id}` response.
#[derive(Debug, Default, Deserialize)]
pub struct TrackResponse {
    #[serde(default)]
    pub resource: TrackResource,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrackResource {
    #[serde(default)]
    pub duration: u64,
    pub album: Option<TrackAlbum>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackAlbum {
    #[serde(default)]
    pub image_cover: Vec<ImageLink>,
}

#[derive(Debug, Deserialize)]
pub struct ImageLink {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl TrackResponse {
    pub fn duration_secs(&self) -> u64 {
        self.resource.duration
    }

    /// URL of the first listed cover image.
    pub fn cover_url(&self) -> Option<&str> {
        self.resource
            .album
            .as_ref()
            .and_then(|a| a.image_cover.first())
            .map(|img| img.url.as_str())
    }
}
