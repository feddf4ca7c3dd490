//! Apple Podcasts tags (`itunes:`).

crate::xml_record! {
    pub struct ITunesImageAttributes {
        pub href: Option<String> => optional "href",
    }
}

crate::xml_record! {
    pub struct ITunesImage {
        pub attributes: Option<ITunesImageAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct ITunesCategoryAttributes {
        pub text: Option<String> => optional "text",
    }
}

crate::xml_record! {
    /// A category, optionally refined by nested subcategories.
    pub struct ITunesCategory {
        pub attributes: Option<ITunesCategoryAttributes> => optional "@attributes",
        pub subcategories: Vec<ITunesCategory> => many "category",
    }
}

crate::xml_record! {
    pub struct ITunesOwner {
        pub name: Option<String> => optional "name",
        pub email: Option<String> => optional "email",
    }
}

crate::xml_record! {
    /// Show-level tags on an RSS channel.
    pub struct ITunesChannel in "itunes" {
        pub author: Option<String> => optional "author",
        pub block: Option<String> => optional "block",
        pub categories: Vec<ITunesCategory> => many "category",
        pub image: Option<ITunesImage> => optional "image",
        pub explicit: Option<String> => optional "explicit",
        pub complete: Option<String> => optional "complete",
        pub new_feed_url: Option<String> => optional "new-feed-url",
        pub owner: Option<ITunesOwner> => optional "owner",
        pub subtitle: Option<String> => optional "subtitle",
        pub summary: Option<String> => optional "summary",
        pub kind: Option<String> => optional "type",
        pub keywords: Option<String> => optional "keywords",
    }
}

crate::xml_record! {
    /// Episode-level tags on an RSS item.
    pub struct ITunesItem in "itunes" {
        pub author: Option<String> => optional "author",
        pub block: Option<String> => optional "block",
        pub duration: Option<String> => optional "duration",
        pub image: Option<ITunesImage> => optional "image",
        pub explicit: Option<String> => optional "explicit",
        pub is_closed_captioned: Option<String> => optional "isClosedCaptioned",
        pub order: Option<u32> => optional "order",
        pub title: Option<String> => optional "title",
        pub subtitle: Option<String> => optional "subtitle",
        pub summary: Option<String> => optional "summary",
        pub episode: Option<u32> => optional "episode",
        pub season: Option<u32> => optional "season",
        pub episode_type: Option<String> => optional "episodeType",
        pub keywords: Option<String> => optional "keywords",
    }
}

impl ITunesCategory {
    pub fn text(&self) -> Option<&str> {
        self.attributes.as_ref().and_then(|a| a.text.as_deref())
    }
}

impl ITunesItem {
    /// `itunes:duration` in seconds. Accepts `SS`, `MM:SS` and `HH:MM:SS`.
    pub fn duration_secs(&self) -> Option<u64> {
        let text = self.duration.as_deref()?.trim();
        text.split(':').try_fold(0u64, |total, part| {
            let value = part.parse::<u64>().ok()?;
            total.checked_mul(60)?.checked_add(value)
        })
    }
}
