use scraper::{Html, Node};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use time::PrimitiveDateTime;

pub type IllustId = String;
pub type UserId = String;
pub type PageNum = u32;

/// Everything embedded in the preload data of one artwork page.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Artwork {
    #[serde(with = "crate::date")]
    pub timestamp: PrimitiveDateTime,
    pub illust: HashMap<IllustId, Illust>,
    pub user: HashMap<UserId, User>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub image: String,
    pub premium: bool,
    pub accept_request: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Illust {
    pub id: IllustId,
    pub title: String,
    pub description: String,
    #[serde(with = "crate::date")]
    pub create_date: PrimitiveDateTime,
    #[serde(with = "crate::date")]
    pub upload_date: PrimitiveDateTime,
    pub tags: Tags,
    pub user_id: UserId,
    pub user_name: String,
    pub user_account: String,
    // Entries may be null; the key is kept either way.
    pub user_illusts: HashMap<IllustId, Option<UserIllust>>,
    pub bookmark_count: i64,
    pub like_count: i64,
    pub view_count: i64,
    #[serde(skip)]
    description_text: OnceLock<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserIllust {
    pub id: IllustId,
    pub title: String,
    pub url: String,
    pub tags: Vec<String>,
    pub user_id: UserId,
    pub user_name: String,
    pub page_count: i64,
    #[serde(with = "crate::date")]
    pub create_date: PrimitiveDateTime,
    #[serde(with = "crate::date")]
    pub update_date: PrimitiveDateTime,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tags {
    pub author_id: UserId,
    pub is_locked: bool,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Tag {
    pub tag: String,
    pub locked: bool,
    pub deletable: bool,
}

pub fn decode(json: &str) -> Result<Artwork, serde_json::Error> {
    serde_json::from_str(json)
}

impl Artwork {
    pub fn illust(&self, id: &str) -> Option<&Illust> {
        self.illust.get(id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.user.get(id)
    }

    pub fn author(&self, illust: &Illust) -> Option<&User> {
        self.user(&illust.user_id)
    }

    /// The illust and its author, if the payload contains both.
    pub fn lookup(&self, id: &str) -> Option<(&Illust, &User)> {
        let illust = self.illust(id)?;
        Some((illust, self.author(illust)?))
    }

    /// Illust ids whose author is missing from the user map.
    pub fn dangling_authors(&self) -> impl Iterator<Item = &IllustId> {
        self.illust
            .values()
            .filter(|i| !self.user.contains_key(&i.user_id))
            .map(|i| &i.id)
    }
}

impl Illust {
    /// The description with markup stripped. Computed on first use.
    pub fn description_text(&self) -> &str {
        self.description_text
            .get_or_init(|| html_to_text(&self.description))
    }

    /// Other works by the same author that the page filled in, newest first.
    pub fn other_works(&self) -> Vec<&UserIllust> {
        let mut r: Vec<_> = self.user_illusts.values().flatten().collect();
        r.sort_by(|a, b| {
            b.id.len()
                .cmp(&a.id.len())
                .then_with(|| b.id.cmp(&a.id))
        });
        r
    }
}

fn html_to_text(fragment: &str) -> String {
    let doc = Html::parse_fragment(fragment);
    let mut s = String::new();
    for node in doc.root_element().descendants() {
        match node.value() {
            Node::Text(t) => s.push_str(t),
            Node::Element(e) if e.name() == "br" => s.push('\n'),
            _ => {}
        }
    }
    s
}
