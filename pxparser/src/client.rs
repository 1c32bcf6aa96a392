use crate::endpoint::WebEndpoint;
use crate::error::Result;
use crate::extract::preload_data;
use crate::model::{Artwork, decode};
use crate::session::{Session, Transport};
use log::{info, warn};
use url::Url;

/// Artwork metadata of one id, plus the session it was fetched with.
#[derive(Debug, Clone)]
pub struct Client<T: Transport = Session> {
    session: T,
    endpoint: WebEndpoint,
    pub artwork: Artwork,
}

/// Fetches the page of artwork `id` and returns its HTML.
pub async fn fetch_page<T: Transport>(session: &T, endpoint: &WebEndpoint, id: &str) -> Result<String> {
    session.get_text(&endpoint.artwork(id)).await
}

impl Client {
    pub async fn connect(id: &str) -> Result<Self> {
        Self::connect_with(Session::new(), WebEndpoint::new(), id).await
    }
}

impl<T: Transport> Client<T> {
    pub async fn connect_with(session: T, endpoint: WebEndpoint, id: &str) -> Result<Self> {
        let page = fetch_page(&session, &endpoint, id).await?;
        let json = preload_data(&page, id, &endpoint.artwork(id))?;
        let artwork = decode(&json)?;
        info!(
            "{id}: {} illusts, {} users",
            artwork.illust.len(),
            artwork.user.len()
        );
        for dangling in artwork.dangling_authors() {
            warn!("{id}: author of illust {dangling} missing from payload");
        }
        Ok(Self {
            session,
            endpoint,
            artwork,
        })
    }

    /// Downloads an asset (usually an image) with the site as referrer.
    pub async fn fetch_asset_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(url)?;
        self.session
            .get_bytes(url.as_str(), self.endpoint.root().as_str())
            .await
    }

    pub fn session(&self) -> &T {
        &self.session
    }

    pub fn endpoint(&self) -> &WebEndpoint {
        &self.endpoint
    }

    pub fn into_artwork(self) -> Artwork {
        self.artwork
    }
}
