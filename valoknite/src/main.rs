mod config;
mod inspect;
mod media;
mod thumbs;

use crate::config::read_config;
use crate::media::Target;
use anyhow::{Result, bail};
use clap::Parser;
use futures::{StreamExt, stream};
use pxparser::{Client, Session};
use std::path::PathBuf;
use tokio::time::Instant;

#[macro_use]
extern crate log;

/// Show pixiv metadata of artworks, by id or by saved `<id>_p<page>.<ext>` files.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Artwork ids or page file names
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Print the decoded artwork as JSON
    #[arg(long)]
    json: bool,

    /// Save thumbnails of the author's other works into this directory
    #[arg(long)]
    thumbs: Option<PathBuf>,

    /// Config file (default: ./config.json, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Artworks fetched at once
    #[arg(long, default_value_t = 4)]
    jobs: usize,
}

fn init_log() {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&filters)
        .init();
}

async fn fetch(session: Session, conf: &config::Config, target: &Target) -> Result<Client> {
    let t = Instant::now();
    let client = Client::connect_with(session, conf.endpoint.clone(), &target.id).await?;
    debug!("{}: fetched in {} ms", target.id, t.elapsed().as_millis());
    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_log();
    let args = Args::parse();
    let conf = read_config(args.config.as_deref())?;
    debug!("config: {:?}", conf);
    let thumbs_dir = args.thumbs.or_else(|| conf.thumbs_dir.clone());
    let session = Session::with_options(&conf.session)?;

    let targets: Vec<_> = args
        .inputs
        .iter()
        .filter_map(|s| {
            let t = Target::parse(s);
            if t.is_none() {
                warn!("{s}: not an artwork id or page file, skipped");
            }
            t
        })
        .collect();

    let mut results = stream::iter(&targets)
        .map(|t| {
            let session = session.clone();
            let conf = &conf;
            async move { (t, fetch(session, conf, t).await) }
        })
        .buffered(args.jobs.max(1));

    let mut failed = 0;
    while let Some((target, res)) = results.next().await {
        let client = match res {
            Ok(c) => c,
            Err(e) => {
                failed += 1;
                match e.downcast_ref::<pxparser::Error>() {
                    Some(e) if e.is_not_found() => {
                        error!("{}: artwork {} not found", target.name, target.id)
                    }
                    _ => error!("{}: {:#}", target.name, e),
                }
                continue;
            }
        };

        if args.json {
            println!("{}", serde_json::to_string_pretty(&client.artwork)?);
        } else {
            match inspect::describe(&client.artwork, target) {
                Some(s) => println!("{s}"),
                None => warn!("{}: illust or author missing from page data", target.name),
            }
        }

        if let Some(dir) = &thumbs_dir {
            failed += thumbs::save_logged(&client, &target.id, dir).await.min(1);
        }
    }

    if failed > 0 {
        bail!("{failed} of {} inputs failed", args.inputs.len());
    }
    Ok(())
}
