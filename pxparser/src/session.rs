use crate::error::{Error, Result};
use log::{debug, error};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client as Http, Proxy, RequestBuilder, Response};
use std::future::Future;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/105.0.0.0 Safari/537.36";

/// The network side of the client: one GET for pages, one for assets.
pub trait Transport {
    fn get_text(&self, url: &str) -> impl Future<Output = Result<String>> + Send;

    fn get_bytes(&self, url: &str, referer: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub proxy: Option<String>,
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

/// A cookie-keeping HTTP session.
///
/// Cloning is cheap and clones share the connection pool and cookie jar.
/// Requests may be issued concurrently.
#[derive(Debug, Clone)]
pub struct Session {
    http: Http,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

async fn finalize(req: RequestBuilder) -> Result<Response> {
    let r = req.send().await?;
    let st = r.status();
    // Redirects are already followed, so a 3xx here is final.
    if st.is_success() {
        debug!("{} from {}", st, r.url());
        Ok(r)
    } else {
        error!("{} from {}", st, r.url());
        let url = r.url().to_string();
        Err(Error::Status {
            url,
            status: st,
            body: r.text().await.unwrap_or_default(),
        })
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_options(&SessionOptions::default()).unwrap()
    }

    pub fn with_options(opts: &SessionOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("ja,en-US;q=0.9,en;q=0.8"),
        );
        let mut b = Http::builder()
            .cookie_store(true)
            .default_headers(headers)
            .user_agent(opts.user_agent.as_deref().unwrap_or(USER_AGENT));
        if let Some(proxy) = &opts.proxy {
            b = b.proxy(Proxy::all(proxy)?);
        }
        if let Some(t) = opts.connect_timeout {
            b = b.connect_timeout(t);
        }
        if let Some(t) = opts.timeout {
            b = b.timeout(t);
        }
        Ok(Self { http: b.build()? })
    }

    pub fn from_client(http: Http) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &Http {
        &self.http
    }
}

impl Transport for Session {
    async fn get_text(&self, url: &str) -> Result<String> {
        let r = finalize(self.http.get(url)).await?;
        Ok(r.text().await?)
    }

    // Asset hosts often answer with a generic content type, so it is never
    // looked at.
    async fn get_bytes(&self, url: &str, referer: &str) -> Result<Vec<u8>> {
        let req = self
            .http
            .get(url)
            .header(header::REFERER, referer)
            .header(header::ACCEPT, "*/*");
        let r = finalize(req).await?;
        Ok(r.bytes().await?.to_vec())
    }
}
