use url::Url;

type Result<T> = std::result::Result<T, url::ParseError>;

pub const DEFAULT_HOST: &str = "https://www.pixiv.net";

/// URLs of the public web site that the client scrapes.
#[derive(Debug, Clone)]
pub struct WebEndpoint {
    root: Url,
}

impl WebEndpoint {
    pub fn with_host(host: Option<&str>) -> Result<Self> {
        let host = host.unwrap_or(DEFAULT_HOST);
        let mut root = Url::parse(host)?;
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        Ok(Self { root })
    }

    pub fn new() -> Self {
        Self::with_host(None).unwrap()
    }

    /// Site root, sent as the referrer of asset requests.
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Page of a single artwork. The id is taken as-is.
    pub fn artwork(&self, id: &str) -> String {
        format!("{}artworks/{id}", self.root)
    }
}

impl Default for WebEndpoint {
    fn default() -> Self {
        Self::new()
    }
}
