use roxmltree::Node;

use crate::{
    error::Error,
    parser::{
        child, child_attribute, child_text, parse_document, parse_rfc3339, EntryPolicy, ATOM_NS,
        MEDIA_NS, YT_NS,
    },
    types::Episode,
};

/// Parses a video-platform Atom channel feed and returns the newest entry
/// whose title contains `title_filter` (case-insensitive).
///
/// The episode links to the video page, so it is always marked link-only and
/// typed as `text/html`.
///
/// # Returns
/// * `Ok(Some(Episode))` for the selected entry.
/// * `Ok(None)` if no entry title matches; this is not an error.
/// * `Err(Error::MalformedFeed)` if the document is not an Atom feed or the
///   matched entry lacks its video id or link.
#[tracing::instrument(skip(doc))]
pub fn parse_video_feed(
    doc: &str,
    title_filter: &str,
    policy: EntryPolicy,
) -> Result<Option<Episode>, Error> {
    let document = parse_document(doc)?;

    let feed = document.root_element();
    if !feed.has_tag_name((ATOM_NS, "feed")) {
        return Err(Error::malformed("root element is not an Atom <feed>"));
    }

    let title_filter = title_filter.to_lowercase();
    let matching = feed
        .children()
        .filter(|n| n.has_tag_name((ATOM_NS, "entry")))
        .filter(|entry| {
            child_text(*entry, (ATOM_NS, "title"))
                .is_some_and(|title| title.to_lowercase().contains(&title_filter))
        });

    let Some(entry) = policy.select(matching, |entry| {
        child_text(*entry, (ATOM_NS, "published")).and_then(parse_rfc3339)
    }) else {
        tracing::debug!(%title_filter, "No entry matches title filter");
        return Ok(None);
    };

    episode_from_entry(entry).map(Some)
}

fn episode_from_entry(entry: Node<'_, '_>) -> Result<Episode, Error> {
    let id = child_text(entry, (YT_NS, "videoId"))
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::malformed("entry has no <yt:videoId>"))?;
    let media_url = child_attribute(entry, (ATOM_NS, "link"), "href")
        .ok_or_else(|| Error::malformed("entry has no <link href>"))?;

    let media_group = child(entry, (MEDIA_NS, "group"));
    let thumbnail_url =
        media_group.and_then(|group| child_attribute(group, (MEDIA_NS, "thumbnail"), "url"));
    let description = media_group
        .and_then(|group| child_text(group, (MEDIA_NS, "description")))
        .unwrap_or_default();

    Ok(Episode {
        id,
        title: child_text(entry, (ATOM_NS, "title")).unwrap_or_default(),
        description,
        media_url,
        mime_type: Episode::HTML_MIME_TYPE.to_string(),
        thumbnail_url,
        published_at: child_text(entry, (ATOM_NS, "published")).and_then(parse_rfc3339),
        render_as_link_only: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHANNEL_FEED: &str = include_str!("../../../tests/fixtures/youtube.xml");

    #[test]
    fn test_filter_selects_matching_entry_only() {
        let episode = parse_video_feed(CHANNEL_FEED, "tagesthemen", EntryPolicy::First)
            .expect("valid feed")
            .expect("an entry matches");

        assert_eq!(episode.id, "tt2000video");
        assert_eq!(episode.title, "Tagesthemen 20:00");
        assert_eq!(episode.media_url, "https://www.youtube.com/watch?v=tt2000video");
        assert_eq!(episode.mime_type, "text/html");
        assert_eq!(
            episode.thumbnail_url.as_deref(),
            Some("https://i.ytimg.example/vi/tt2000video/hqdefault.jpg")
        );
        assert_eq!(episode.description, "Die Tagesthemen vom Sonntag");
        assert!(episode.render_as_link_only);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let episode = parse_video_feed(CHANNEL_FEED, "TAGESTHEMEN", EntryPolicy::First)
            .unwrap()
            .unwrap();
        assert_eq!(episode.id, "tt2000video");

        let episode = parse_video_feed(CHANNEL_FEED, "sportschau", EntryPolicy::First)
            .unwrap()
            .unwrap();
        assert_eq!(episode.id, "sportvideo");
    }

    #[test]
    fn test_no_matching_entry_is_absent() {
        let result = parse_video_feed(CHANNEL_FEED, "nachtmagazin", EntryPolicy::First);
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_newest_by_date_among_matches() {
        let feed = include_str!("../../../tests/fixtures/youtube_unordered.xml");

        let first = parse_video_feed(feed, "tagesthemen", EntryPolicy::First)
            .unwrap()
            .unwrap();
        assert_eq!(first.id, "olderTT");

        let newest = parse_video_feed(feed, "tagesthemen", EntryPolicy::NewestByDate)
            .unwrap()
            .unwrap();
        assert_eq!(newest.id, "newerTT");
    }

    #[test]
    fn test_missing_media_group_leaves_optional_fields_empty() {
        let feed = r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:yt="http://www.youtube.com/xml/schemas/2015">
            <entry>
                <yt:videoId>bare</yt:videoId>
                <title>tagesthemen extra</title>
                <link rel="alternate" href="https://www.youtube.com/watch?v=bare"/>
            </entry>
        </feed>"#;

        let episode = parse_video_feed(feed, "tagesthemen", EntryPolicy::First)
            .unwrap()
            .unwrap();
        assert_eq!(episode.thumbnail_url, None);
        assert_eq!(episode.description, "");
    }

    #[test]
    fn test_malformed_feeds_are_rejected() {
        let cases = [
            "<feed",
            r#"<rss version="2.0"><channel/></rss>"#,
            r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry><title>tagesthemen</title><link href="u"/></entry></feed>"#,
            r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:yt="http://www.youtube.com/xml/schemas/2015"><entry><yt:videoId>x</yt:videoId><title>tagesthemen</title></entry></feed>"#,
        ];

        for feed in cases {
            let result = parse_video_feed(feed, "tagesthemen", EntryPolicy::First);
            assert!(
                matches!(result, Err(Error::MalformedFeed(_))),
                "expected malformed for {feed}, got {result:?}"
            );
        }
    }
}
