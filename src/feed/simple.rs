use chrono::{DateTime, FixedOffset};
use sha2::{Digest, Sha256};

use super::{Feed, FeedFormat};
use crate::model::{atom, json, rdf, rss};
use crate::util::{collapse_whitespace, strip_control_chars};

/// Format-independent summary of a feed for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleFeed {
    pub format: FeedFormat,
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub updated: Option<DateTime<FixedOffset>>,
    pub items: Vec<SimpleItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleItem {
    /// The item's own id, or a SHA-256 of link, title and date when it has none.
    pub id: String,
    pub title: String,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub published: Option<DateTime<FixedOffset>>,
    pub author: Option<String>,
}

impl From<&Feed> for SimpleFeed {
    fn from(feed: &Feed) -> Self {
        match feed {
            Feed::Rss(feed) => from_rss(feed),
            Feed::Atom(feed) => from_atom(feed),
            Feed::Rdf(feed) => from_rdf(feed),
            Feed::Json(feed) => from_json(feed),
        }
    }
}

fn from_rss(feed: &rss::RssFeed) -> SimpleFeed {
    let Some(channel) = &feed.channel else {
        return empty(FeedFormat::Rss);
    };
    let channel_dc = channel.dublin_core.as_ref();
    SimpleFeed {
        format: FeedFormat::Rss,
        title: channel.title.as_deref().map(clean_title),
        description: channel.description.clone(),
        link: channel.link.clone(),
        updated: channel
            .last_build_date
            .or(channel.pub_date)
            .or_else(|| channel_dc.and_then(|dc| dc.date).map(|date| date.0)),
        items: channel
            .items
            .iter()
            .map(|item| {
                let dc = item.dublin_core.as_ref();
                let link = item.link.clone().or_else(|| {
                    item.guid
                        .as_ref()
                        .filter(|guid| guid.is_perma_link())
                        .and_then(|guid| guid.value.clone())
                });
                simple_item(
                    item.guid.as_ref().and_then(|guid| guid.value.as_deref()),
                    item.title.as_deref().or_else(|| dc.and_then(|dc| dc.title.as_deref())),
                    link,
                    item.description.clone().or_else(|| {
                        item.content.as_ref().and_then(|content| content.encoded.clone())
                    }),
                    item.date(),
                    item.author
                        .clone()
                        .or_else(|| dc.and_then(|dc| dc.creator.clone()))
                        .or_else(|| item.itunes.as_ref().and_then(|it| it.author.clone())),
                )
            })
            .collect(),
    }
}

fn from_atom(feed: &atom::AtomFeed) -> SimpleFeed {
    SimpleFeed {
        format: FeedFormat::Atom,
        title: feed.title.as_ref().and_then(atom::Text::as_str).map(clean_title),
        description: feed.subtitle.as_ref().and_then(|t| t.value.clone()),
        link: atom::primary_link(&feed.links).map(str::to_string),
        updated: feed.updated,
        items: feed
            .entries
            .iter()
            .map(|entry| {
                simple_item(
                    entry.id.as_deref(),
                    entry.title.as_ref().and_then(atom::Text::as_str),
                    atom::primary_link(&entry.links).map(str::to_string),
                    entry
                        .summary
                        .as_ref()
                        .and_then(|t| t.value.clone())
                        .or_else(|| entry.content.as_ref().and_then(|c| c.value.clone())),
                    entry.published.or(entry.updated),
                    entry.authors.first().and_then(|person| person.name.clone()),
                )
            })
            .collect(),
    }
}

fn from_rdf(feed: &rdf::RdfFeed) -> SimpleFeed {
    let channel = feed.channel.as_ref();
    SimpleFeed {
        format: FeedFormat::Rdf,
        title: channel.and_then(|c| c.title.as_deref()).map(clean_title),
        description: channel.and_then(|c| c.description.clone()),
        link: channel.and_then(|c| c.link.clone()),
        updated: channel
            .and_then(|c| c.dublin_core.as_ref())
            .and_then(|dc| dc.date)
            .map(|date| date.0),
        items: feed
            .items
            .iter()
            .map(|item| {
                let dc = item.dublin_core.as_ref();
                simple_item(
                    item.about(),
                    item.title.as_deref(),
                    item.link.clone(),
                    item.description.clone().or_else(|| {
                        item.content.as_ref().and_then(|content| content.encoded.clone())
                    }),
                    dc.and_then(|dc| dc.date).map(|date| date.0),
                    dc.and_then(|dc| dc.creator.clone()),
                )
            })
            .collect(),
    }
}

fn from_json(feed: &json::JsonFeed) -> SimpleFeed {
    SimpleFeed {
        format: FeedFormat::Json,
        title: feed.title.as_deref().map(clean_title),
        description: feed.description.clone(),
        link: feed.home_page_url.clone(),
        updated: feed
            .items
            .iter()
            .filter_map(|item| item.date_modified.or(item.date_published))
            .max(),
        items: feed
            .items
            .iter()
            .map(|item| {
                simple_item(
                    Some(item.id.as_str()),
                    item.title.as_deref(),
                    item.url.clone().or_else(|| item.external_url.clone()),
                    item.summary
                        .clone()
                        .or_else(|| item.content_text.clone())
                        .or_else(|| item.content_html.clone()),
                    item.date_published.or(item.date_modified),
                    item.first_author().and_then(|author| author.name.clone()),
                )
            })
            .collect(),
    }
}

fn empty(format: FeedFormat) -> SimpleFeed {
    SimpleFeed {
        format,
        title: None,
        description: None,
        link: None,
        updated: None,
        items: Vec::new(),
    }
}

fn simple_item(
    id: Option<&str>,
    title: Option<&str>,
    link: Option<String>,
    summary: Option<String>,
    published: Option<DateTime<FixedOffset>>,
    author: Option<String>,
) -> SimpleItem {
    let title = title
        .map(clean_title)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| "Untitled".to_string());
    let id = generate_id(id, link.as_deref(), &title, published);
    SimpleItem {
        id,
        title,
        link,
        summary,
        published,
        author,
    }
}

fn clean_title(title: &str) -> String {
    collapse_whitespace(&strip_control_chars(title)).into_owned()
}

/// The trimmed existing id, or a stable hash of what identifies the item.
pub(crate) fn generate_id(
    existing: Option<&str>,
    link: Option<&str>,
    title: &str,
    published: Option<DateTime<FixedOffset>>,
) -> String {
    if let Some(id) = existing {
        let trimmed = id.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let input = format!(
        "{}|{}|{}",
        link.unwrap_or(""),
        title,
        published.map(|p| p.timestamp().to_string()).unwrap_or_default()
    );
    let hash = Sha256::digest(input.as_bytes());
    format!("{:x}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_id_is_trimmed() {
        assert_eq!(generate_id(Some("  abc "), None, "t", None), "abc");
    }

    #[test]
    fn test_blank_id_is_replaced_by_hash() {
        let id = generate_id(Some("   "), Some("https://x"), "t", None);
        assert_eq!(id.len(), 64);
        assert_eq!(id, generate_id(None, Some("https://x"), "t", None));
    }

    #[test]
    fn test_hash_depends_on_link() {
        assert_ne!(
            generate_id(None, Some("https://a"), "t", None),
            generate_id(None, Some("https://b"), "t", None)
        );
    }

    #[test]
    fn test_title_is_cleaned() {
        let item = simple_item(Some("1"), Some(" Breaking\u{1b}[1m\n news "), None, None, None, None);
        assert_eq!(item.title, "Breaking news");
    }

    #[test]
    fn test_missing_title_is_untitled() {
        let item = simple_item(Some("1"), Some("  "), None, None, None, None);
        assert_eq!(item.title, "Untitled");
    }
}
