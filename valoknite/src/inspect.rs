use crate::media::Target;
use pxparser::Artwork;
use pxparser::date;
use pxparser::model::{Illust, User};
use std::fmt::{self, Write};

/// Property listing of the target illust, or `None` when the payload lacks
/// the illust or its author.
pub fn describe(artwork: &Artwork, target: &Target) -> Option<String> {
    let (illust, user) = artwork.lookup(&target.id)?;
    let mut s = String::new();
    write_listing(&mut s, target, illust, user).ok()?;
    Some(s)
}

fn write_listing(s: &mut String, target: &Target, illust: &Illust, user: &User) -> fmt::Result {
    writeln!(s, "[{}]", target.name)?;
    writeln!(s, "author:   {} (@{}, id {})", user.name, illust.user_account, user.user_id)?;
    writeln!(s, "title:    {}", illust.title)?;
    if let Some(page) = target.page {
        writeln!(s, "page:     {}", page + 1)?;
    }
    for (k, t) in [("created", &illust.create_date), ("uploaded", &illust.upload_date)] {
        if let Ok(t) = date::format(t) {
            writeln!(s, "{k:<9} {t}")?;
        }
    }
    writeln!(
        s,
        "counts:   {} bookmarks, {} likes, {} views",
        illust.bookmark_count, illust.like_count, illust.view_count
    )?;
    if !illust.tags.tags.is_empty() {
        let tags: Vec<_> = illust
            .tags
            .tags
            .iter()
            .map(|t| {
                if t.locked {
                    format!("#{}*", t.tag)
                } else {
                    format!("#{}", t.tag)
                }
            })
            .collect();
        writeln!(s, "tags:     {}", tags.join(" "))?;
    }
    let desc = illust.description_text().trim();
    if !desc.is_empty() {
        writeln!(s, "description:")?;
        for line in desc.lines() {
            writeln!(s, "  {line}")?;
        }
    }
    let works = illust.other_works();
    if !works.is_empty() {
        writeln!(s, "other works:")?;
        for w in works {
            writeln!(s, "  {} {} ({}p)", w.id, w.title, w.page_count)?;
        }
    }
    Ok(())
}
