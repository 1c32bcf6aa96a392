use crate::error::{Error, Result};
use log::{debug, error};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

pub const PRELOAD_ID: &str = "meta-preload-data";

static PRELOAD: Lazy<Selector> = Lazy::new(|| Selector::parse(&format!("#{PRELOAD_ID}")).unwrap());

/// Returns the `content` attribute of the preload element of an artwork page,
/// which holds the artwork JSON. `id` and `url` only feed the error.
pub fn preload_data(page: &str, id: &str, url: &str) -> Result<String> {
    let doc = Html::parse_document(page);
    match doc.select(&PRELOAD).next() {
        Some(meta) => {
            let json = meta.value().attr("content").unwrap_or_default();
            debug!("preload data of {id}: {} bytes", json.len());
            Ok(json.to_owned())
        }
        None => {
            error!("no #{PRELOAD_ID} in {url}");
            Err(Error::Extract {
                id: id.to_owned(),
                url: url.to_owned(),
                content: doc.html(),
            })
        }
    }
}
