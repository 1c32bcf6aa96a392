use once_cell::sync::Lazy;
use pxparser::{IllustId, PageNum};
use regex::Regex;
use std::path::Path;

static PAGE_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)_p(\d+)\.(.*)$").unwrap());

/// An artwork to inspect, named either by its id or by a saved page file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: IllustId,
    pub page: Option<PageNum>,
    pub name: String,
}

impl Target {
    pub fn parse(input: &str) -> Option<Self> {
        if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
            return Some(Self {
                id: input.to_owned(),
                page: None,
                name: input.to_owned(),
            });
        }
        let name = Path::new(input).file_name()?.to_str()?;
        let caps = PAGE_FILE.captures(name)?;
        Some(Self {
            id: caps[1].to_owned(),
            page: caps[2].parse().ok(),
            name: name.to_owned(),
        })
    }
}
