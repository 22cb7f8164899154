use roxmltree::Node;

use crate::{
    error::Error,
    parser::{
        child, child_attribute, child_text, parse_document, parse_rfc2822, EntryPolicy, ITUNES_NS,
    },
    types::Episode,
};

/// Parses an RSS podcast feed and projects its newest `<item>` into an
/// [`Episode`].
///
/// With [`EntryPolicy::First`] only the first item is inspected.
///
/// # Returns
/// * `Ok(Episode)` with `render_as_link_only` unset; the caller decides the
///   render mode.
/// * `Err(Error::MalformedFeed)` if the document is not XML or lacks the
///   `channel`, `item`, `title` or `enclosure` elements.
#[tracing::instrument(skip(doc))]
pub fn parse_podcast_feed(doc: &str, policy: EntryPolicy) -> Result<Episode, Error> {
    let document = parse_document(doc)?;

    let channel = child(document.root_element(), "channel")
        .ok_or_else(|| Error::malformed("missing <channel> element"))?;

    let items = channel.children().filter(|n| n.has_tag_name("item"));
    let item = policy
        .select(items, |item| child_text(*item, "pubDate").and_then(parse_rfc2822))
        .ok_or_else(|| Error::malformed("channel contains no <item>"))?;

    episode_from_item(channel, item)
}

fn episode_from_item(channel: Node<'_, '_>, item: Node<'_, '_>) -> Result<Episode, Error> {
    let title = child_text(item, "title").ok_or_else(|| Error::malformed("item has no <title>"))?;

    let enclosure =
        child(item, "enclosure").ok_or_else(|| Error::malformed("item has no <enclosure>"))?;
    let media_url = enclosure
        .attribute("url")
        .ok_or_else(|| Error::malformed("enclosure has no url attribute"))?
        .trim()
        .to_string();
    let mime_type = enclosure
        .attribute("type")
        .ok_or_else(|| Error::malformed("enclosure has no type attribute"))?
        .trim()
        .to_string();

    // guid is optional in RSS; the enclosure url is just as stable
    let id = child_text(item, "guid")
        .filter(|guid| !guid.is_empty())
        .unwrap_or_else(|| media_url.clone());

    let thumbnail_url = child_attribute(item, (ITUNES_NS, "image"), "href")
        .or_else(|| child_attribute(channel, (ITUNES_NS, "image"), "href"));

    Ok(Episode {
        id,
        title,
        description: child_text(item, "description").unwrap_or_default(),
        media_url,
        mime_type,
        thumbnail_url,
        published_at: child_text(item, "pubDate").and_then(parse_rfc2822),
        render_as_link_only: false,
    })
}
