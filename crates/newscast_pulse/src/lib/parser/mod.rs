//! # Feed Parsers
//!
//! Turns fetched feed documents into [`Episode`](crate::types::Episode)s.
//!
//! Podcast feeds (RSS 2.0 with the iTunes extension) always yield an episode
//! or an error. Video-platform feeds (Atom with the YouTube and Media RSS
//! extensions) carry several shows per channel and yield an episode only when
//! an entry title matches the show's filter.
//!
//! Which entry counts as "newest" is decided by [`EntryPolicy`]. Feeds are
//! trusted to list entries newest-first by default.

pub mod podcast;
pub mod video;

use chrono::{DateTime, Utc};
use roxmltree::{Document, ExpandedName, Node, ParsingOptions};

use crate::error::Error;

pub use podcast::parse_podcast_feed;
pub use video::parse_video_feed;

pub(crate) const ITUNES_NS: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";
pub(crate) const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
pub(crate) const YT_NS: &str = "http://www.youtube.com/xml/schemas/2015";
pub(crate) const MEDIA_NS: &str = "http://search.yahoo.com/mrss/";

/// Strategy for choosing the newest entry among the candidates of a feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryPolicy {
    /// Take the first candidate in document order, without reading dates
    #[default]
    First,
    /// Take the candidate with the latest publication date. Undated entries
    /// rank below dated ones and ties keep document order.
    NewestByDate,
}

impl EntryPolicy {
    pub(crate) fn select<T>(
        self,
        candidates: impl IntoIterator<Item = T>,
        published: impl Fn(&T) -> Option<DateTime<Utc>>,
    ) -> Option<T> {
        let mut candidates = candidates.into_iter();
        match self {
            EntryPolicy::First => candidates.next(),
            EntryPolicy::NewestByDate => candidates
                .fold(None, |newest: Option<(T, Option<DateTime<Utc>>)>, candidate| {
                    let date = published(&candidate);
                    match newest {
                        Some((_, newest_date)) if date > newest_date => Some((candidate, date)),
                        None => Some((candidate, date)),
                        keep => keep,
                    }
                })
                .map(|(candidate, _)| candidate),
        }
    }
}

/// Parses a feed document. Feeds may open with a `<!DOCTYPE>` (RSS 0.91 does),
/// so DTDs are accepted; external entities are never fetched.
pub(crate) fn parse_document(doc: &str) -> Result<Document<'_>, Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(doc, options)?)
}

pub(crate) fn child<'a, 'input: 'a, 'n, 'm>(
    node: Node<'a, 'input>,
    name: impl Into<ExpandedName<'n, 'm>> + Copy,
) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// Trimmed text of the first child element called `name`.
///
/// A present but empty element yields `Some("")`. Text split by comments or
/// processing instructions is joined.
pub(crate) fn child_text<'n, 'm>(
    node: Node<'_, '_>,
    name: impl Into<ExpandedName<'n, 'm>> + Copy,
) -> Option<String> {
    child(node, name).map(|n| {
        n.children()
            .filter(|t| t.is_text())
            .filter_map(|t| t.text())
            .collect::<String>()
            .trim()
            .to_string()
    })
}

pub(crate) fn child_attribute<'n, 'm>(
    node: Node<'_, '_>,
    name: impl Into<ExpandedName<'n, 'm>> + Copy,
    attribute: &str,
) -> Option<String> {
    child(node, name)
        .and_then(|n| n.attribute(attribute))
        .map(|value| value.trim().to_string())
}

pub(crate) fn parse_rfc2822(value: String) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(&value)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

pub(crate) fn parse_rfc3339(value: String) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> Option<DateTime<Utc>> {
        Utc.with_ymd_and_hms(2024, 5, d, 20, 0, 0).single()
    }

    #[test]
    fn test_first_policy_ignores_dates() {
        let candidates = vec![("a", day(1)), ("b", day(3))];
        let selected = EntryPolicy::First.select(candidates, |c| c.1);
        assert_eq!(selected.map(|c| c.0), Some("a"));
    }

    #[test]
    fn test_newest_policy_prefers_latest_date() {
        let candidates = vec![("a", day(1)), ("b", day(3)), ("c", None), ("d", day(2))];
        let selected = EntryPolicy::NewestByDate.select(candidates, |c| c.1);
        assert_eq!(selected.map(|c| c.0), Some("b"));
    }

    #[test]
    fn test_newest_policy_keeps_document_order_on_ties() {
        let candidates = vec![("a", None), ("b", None), ("c", day(4)), ("d", day(4))];
        let selected = EntryPolicy::NewestByDate.select(candidates, |c| c.1);
        assert_eq!(selected.map(|c| c.0), Some("c"));

        let undated = vec![("a", None), ("b", None)];
        let selected = EntryPolicy::NewestByDate.select(undated, |c| c.1);
        assert_eq!(selected.map(|c| c.0), Some("a"));
    }

    #[test]
    fn test_empty_candidates_select_nothing() {
        let candidates: Vec<(&str, Option<DateTime<Utc>>)> = Vec::new();
        assert!(EntryPolicy::First.select(candidates.clone(), |c| c.1).is_none());
        assert!(EntryPolicy::NewestByDate.select(candidates, |c| c.1).is_none());
    }

    #[test]
    fn test_child_text_treats_empty_elements_alike() {
        let doc = parse_document(
            "<item><a></a><b>  </b><c/><d> x <!-- cut --> y </d></item>",
        )
        .unwrap();
        let item = doc.root_element();

        assert_eq!(child_text(item, "a").as_deref(), Some(""));
        assert_eq!(child_text(item, "b").as_deref(), Some(""));
        assert_eq!(child_text(item, "c").as_deref(), Some(""));
        assert_eq!(child_text(item, "d").as_deref(), Some("x  y"));
        assert_eq!(child_text(item, "missing"), None);
    }

    #[test]
    fn test_documents_with_doctype_parse() {
        let doc = parse_document(
            r#"<?xml version="1.0"?><!DOCTYPE rss PUBLIC "-//Netscape Communications//DTD RSS 0.91//EN" "http://my.netscape.com/publish/formats/rss-0.91.dtd"><rss version="0.91"/>"#,
        )
        .expect("doctype is accepted");
        assert!(doc.root_element().has_tag_name("rss"));
    }

    #[test]
    fn test_date_parsing() {
        assert_eq!(
            parse_rfc2822("Sun, 05 May 2024 22:00:00 +0200".into()),
            day(5)
        );
        assert_eq!(parse_rfc3339("2024-05-05T20:00:00+00:00".into()), day(5));
        assert_eq!(parse_rfc2822("yesterday".into()), None);
    }
}
