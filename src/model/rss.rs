//! RSS 2.0.

use chrono::{DateTime, FixedOffset};

use super::ext::{AtomNamespace, Content, DublinCore, GeoRss, ITunesChannel, ITunesItem, Podcast, Syndication};
use super::XmlFeed;
use crate::dates::DateFormat;

crate::xml_record! {
    pub struct RssAttributes {
        pub version: Option<String> => optional "version",
    }
}

crate::xml_record! {
    pub struct CategoryAttributes {
        pub domain: Option<String> => optional "domain",
    }
}

crate::xml_record! {
    pub struct Category {
        pub value: Option<String> => optional "@text",
        pub attributes: Option<CategoryAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct CloudAttributes {
        pub domain: Option<String> => optional "domain",
        pub port: Option<u16> => optional "port",
        pub path: Option<String> => optional "path",
        pub register_procedure: Option<String> => optional "registerProcedure",
        pub protocol: Option<String> => optional "protocol",
    }
}

crate::xml_record! {
    pub struct Cloud {
        pub attributes: Option<CloudAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct Image {
        pub url: Option<String> => optional "url",
        pub title: Option<String> => optional "title",
        pub link: Option<String> => optional "link",
        pub width: Option<u32> => optional "width",
        pub height: Option<u32> => optional "height",
        pub description: Option<String> => optional "description",
    }
}

crate::xml_record! {
    pub struct TextInput {
        pub title: Option<String> => optional "title",
        pub description: Option<String> => optional "description",
        pub name: Option<String> => optional "name",
        pub link: Option<String> => optional "link",
    }
}

crate::xml_record! {
    pub struct SkipHours {
        pub hours: Vec<u8> => many "hour",
    }
}

crate::xml_record! {
    pub struct SkipDays {
        pub days: Vec<String> => many "day",
    }
}

crate::xml_record! {
    pub struct EnclosureAttributes {
        pub url: Option<String> => optional "url",
        pub length: Option<u64> => optional "length",
        pub kind: Option<String> => optional "type",
    }
}

crate::xml_record! {
    pub struct Enclosure {
        pub attributes: Option<EnclosureAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct GuidAttributes {
        pub is_perma_link: Option<bool> => optional "isPermaLink",
    }
}

crate::xml_record! {
    pub struct Guid {
        pub value: Option<String> => optional "@text",
        pub attributes: Option<GuidAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct SourceAttributes {
        pub url: Option<String> => optional "url",
    }
}

crate::xml_record! {
    /// The channel an item was republished from.
    pub struct Source {
        pub value: Option<String> => optional "@text",
        pub attributes: Option<SourceAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct Item {
        pub title: Option<String> => optional "title",
        pub link: Option<String> => optional "link",
        pub description: Option<String> => optional "description",
        pub author: Option<String> => optional "author",
        pub categories: Vec<Category> => many "category",
        pub comments: Option<String> => optional "comments",
        pub enclosure: Option<Enclosure> => optional "enclosure",
        pub guid: Option<Guid> => optional "guid",
        pub pub_date: Option<DateTime<FixedOffset>> => optional "pubDate",
        pub source: Option<Source> => optional "source",
        pub atom: Option<AtomNamespace> => optional "atom",
        pub dublin_core: Option<DublinCore> => optional "dublinCore",
        pub content: Option<Content> => optional "content",
        pub itunes: Option<ITunesItem> => optional "iTunes",
        pub georss: Option<GeoRss> => optional "geoRSS",
        pub podcast: Option<Podcast> => optional "podcast",
    }
}

crate::xml_record! {
    pub struct Channel {
        pub title: Option<String> => optional "title",
        pub link: Option<String> => optional "link",
        pub description: Option<String> => optional "description",
        pub language: Option<String> => optional "language",
        pub copyright: Option<String> => optional "copyright",
        pub managing_editor: Option<String> => optional "managingEditor",
        pub web_master: Option<String> => optional "webMaster",
        pub pub_date: Option<DateTime<FixedOffset>> => optional "pubDate",
        pub last_build_date: Option<DateTime<FixedOffset>> => optional "lastBuildDate",
        pub categories: Vec<Category> => many "category",
        pub generator: Option<String> => optional "generator",
        pub docs: Option<String> => optional "docs",
        pub cloud: Option<Cloud> => optional "cloud",
        pub rating: Option<String> => optional "rating",
        pub ttl: Option<u32> => optional "ttl",
        pub image: Option<Image> => optional "image",
        pub text_input: Option<TextInput> => optional "textInput",
        pub skip_hours: Option<SkipHours> => optional "skipHours",
        pub skip_days: Option<SkipDays> => optional "skipDays",
        pub atom: Option<AtomNamespace> => optional "atom",
        pub dublin_core: Option<DublinCore> => optional "dublinCore",
        pub syndication: Option<Syndication> => optional "syndication",
        pub itunes: Option<ITunesChannel> => optional "iTunes",
        pub podcast: Option<Podcast> => optional "podcast",
        pub items: Vec<Item> => many "item",
    }
}

crate::xml_record! {
    /// The `<rss>` document element.
    pub struct RssFeed {
        pub attributes: Option<RssAttributes> => optional "@attributes",
        pub channel: Option<Channel> => optional "channel",
    }
}

impl XmlFeed for RssFeed {
    const ROOT: &'static str = "rss";
    const DATE_FORMAT: DateFormat = DateFormat::Rfc822;
}

impl RssFeed {
    pub fn new(channel: Channel) -> Self {
        Self {
            attributes: Some(RssAttributes {
                version: Some("2.0".to_string()),
            }),
            channel: Some(channel),
        }
    }

    pub fn version(&self) -> Option<&str> {
        self.attributes.as_ref().and_then(|a| a.version.as_deref())
    }
}

impl Channel {
    /// The channel's own feed URL, from `<atom:link rel="self">`.
    pub fn self_link(&self) -> Option<&str> {
        self.atom.as_ref().and_then(AtomNamespace::self_link)
    }
}

impl Item {
    /// The item's date: `pubDate`, then `dc:date`.
    pub fn date(&self) -> Option<DateTime<FixedOffset>> {
        self.pub_date.or_else(|| {
            self.dublin_core
                .as_ref()
                .and_then(|dc| dc.date)
                .map(|date| date.0)
        })
    }
}

impl Guid {
    /// Per RSS 2.0, a guid is a permalink unless `isPermaLink="false"`.
    pub fn is_perma_link(&self) -> bool {
        self.attributes
            .as_ref()
            .and_then(|a| a.is_perma_link)
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guid_defaults_to_permalink() {
        assert!(Guid::default().is_perma_link());
        let guid = Guid {
            value: Some("x".into()),
            attributes: Some(GuidAttributes {
                is_perma_link: Some(false),
            }),
        };
        assert!(!guid.is_perma_link());
    }

    #[test]
    fn test_new_sets_version() {
        assert_eq!(RssFeed::new(Channel::default()).version(), Some("2.0"));
    }
}
