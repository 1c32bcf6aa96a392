use anyhow::{Context, Result};
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use pxparser::Client;
use pxparser::model::UserIllust;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Semaphore;
use tokio::time::Instant;

static DOWNLOAD_SEMA: Semaphore = Semaphore::const_new(8);

/// File name of a thumbnail: the last path segment of its URL, or the illust
/// id when the URL has none.
pub fn thumb_name(work: &UserIllust) -> String {
    work.url
        .split(['?', '#'])
        .next()
        .and_then(|u| u.rsplit('/').next())
        .filter(|s| !s.is_empty() && !s.contains(':'))
        .map_or_else(|| format!("{}.jpg", work.id), str::to_owned)
}

fn part_path(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".part");
    s.into()
}

async fn save(client: &Client, url: &str, path: &Path) -> Result<u64> {
    let _perm = DOWNLOAD_SEMA.acquire().await?;
    let t = Instant::now();
    let bytes = client.fetch_asset_bytes(url).await?;
    let tmp = part_path(path);
    if let Err(e) = fs::write(&tmp, &bytes).await {
        if let Err(e) = fs::remove_file(&tmp).await {
            warn!("{:?}: cleanup failed: {}", tmp, e);
        }
        return Err(e).with_context(|| format!("writing {}", tmp.display()));
    }
    fs::rename(&tmp, path).await?;
    debug!("{:?}: {} bytes in {} ms", path, bytes.len(), t.elapsed().as_millis());
    Ok(bytes.len() as u64)
}

async fn saver(client: &Client, url: String, path: PathBuf) -> (PathBuf, Result<u64>) {
    let r = save(client, &url, &path).await;
    (path, r)
}

/// Saves the thumbnails of the author's other works of `id` into `dir`,
/// skipping files already present. Returns the number of failures.
pub async fn save_all(client: &Client, id: &str, dir: &Path) -> Result<usize> {
    let Some(illust) = client.artwork.illust(id) else {
        return Ok(0);
    };
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating {}", dir.display()))?;

    let mut q = vec![];
    for w in illust.other_works() {
        let path = dir.join(thumb_name(w));
        if fs::try_exists(&path).await.unwrap_or(false) {
            continue;
        }
        q.push((w.url.clone(), path));
    }
    let n = q.len();
    info!("{id}: {n} thumbnails to save");

    let mut futs = q
        .into_iter()
        .map(|(url, path)| saver(client, url, path))
        .collect::<FuturesUnordered<_>>();
    let mut cnt = 0;
    let mut cnt_fail = 0;
    while let Some((path, res)) = futs.next().await {
        cnt += 1;
        match res {
            Ok(size) => info!("{cnt}/{n}: saved {:?} ({} KiB)", path, size >> 10),
            Err(e) => {
                cnt_fail += 1;
                match e.downcast_ref::<pxparser::Error>() {
                    Some(e) if e.is_not_found() => warn!("{:?}: 404!", path),
                    _ => error!("{cnt}/{n}: {:?} failed: {:#}", path, e),
                }
            }
        }
    }
    Ok(cnt_fail)
}

/// [`save_all`] for one input of a batch: a failure to even start is logged
/// and counted as one failure so the batch can go on.
pub async fn save_logged(client: &Client, id: &str, dir: &Path) -> usize {
    match save_all(client, id, dir).await {
        Ok(n) => n,
        Err(e) => {
            error!("{id}: saving thumbnails: {e:#}");
            1
        }
    }
}
