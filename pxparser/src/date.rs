//! `yyyy-MM-ddTHH:mm:ss` timestamps, as embedded in artwork pages.
//!
//! Use with `#[serde(with = "crate::date")]` on a [`PrimitiveDateTime`] field.

use serde::{Deserialize, Deserializer, Serializer, de};
use time::PrimitiveDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

pub const FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

const LEN: usize = "2000-01-01T00:00:00".len();

/// Parses the leading timestamp and ignores whatever follows it, so a
/// trailing zone offset like `+00:00` is accepted and dropped.
pub fn parse(s: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    let head = s.get(..LEN).unwrap_or(s);
    PrimitiveDateTime::parse(head, FORMAT)
}

pub fn format(t: &PrimitiveDateTime) -> Result<String, time::error::Format> {
    t.format(FORMAT)
}

pub fn serialize<S: Serializer>(t: &PrimitiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    let text = format(t).map_err(serde::ser::Error::custom)?;
    s.serialize_str(&text)
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<PrimitiveDateTime, D::Error> {
    let text = String::deserialize(d)?;
    parse(&text).map_err(|e| de::Error::custom(format!("bad date {text:?}: {e}")))
}
