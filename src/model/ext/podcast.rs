//! Podcasting 2.0 namespace (`podcast:`).

crate::xml_record! {
    pub struct PodcastLockedAttributes {
        pub owner: Option<String> => optional "owner",
    }
}

crate::xml_record! {
    /// `yes` or `no`.
    pub struct PodcastLocked {
        pub value: Option<String> => optional "@text",
        pub attributes: Option<PodcastLockedAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct PodcastFundingAttributes {
        pub url: Option<String> => optional "url",
    }
}

crate::xml_record! {
    pub struct PodcastFunding {
        pub value: Option<String> => optional "@text",
        pub attributes: Option<PodcastFundingAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct PodcastTranscriptAttributes {
        pub url: Option<String> => optional "url",
        pub kind: Option<String> => optional "type",
        pub language: Option<String> => optional "language",
        pub rel: Option<String> => optional "rel",
    }
}

crate::xml_record! {
    pub struct PodcastTranscript {
        pub attributes: Option<PodcastTranscriptAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct PodcastChaptersAttributes {
        pub url: Option<String> => optional "url",
        pub kind: Option<String> => optional "type",
    }
}

crate::xml_record! {
    pub struct PodcastChapters {
        pub attributes: Option<PodcastChaptersAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct PodcastSoundbiteAttributes {
        pub start_time: Option<f64> => optional "startTime",
        pub duration: Option<f64> => optional "duration",
    }
}

crate::xml_record! {
    pub struct PodcastSoundbite {
        pub title: Option<String> => optional "@text",
        pub attributes: Option<PodcastSoundbiteAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct PodcastPersonAttributes {
        pub role: Option<String> => optional "role",
        pub group: Option<String> => optional "group",
        pub img: Option<String> => optional "img",
        pub href: Option<String> => optional "href",
    }
}

crate::xml_record! {
    pub struct PodcastPerson {
        pub name: Option<String> => optional "@text",
        pub attributes: Option<PodcastPersonAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    /// Shared shape of `podcast:season` and `podcast:episode`.
    pub struct PodcastValueAttributes {
        pub name: Option<String> => optional "name",
        pub display: Option<String> => optional "display",
    }
}

crate::xml_record! {
    pub struct PodcastValue {
        pub value: Option<f64> => optional "@text",
        pub attributes: Option<PodcastValueAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    /// Tags are accepted on both channels and items; feeds put each where it
    /// applies.
    pub struct Podcast in "podcast" {
        pub locked: Option<PodcastLocked> => optional "locked",
        pub funding: Vec<PodcastFunding> => many "funding",
        pub guid: Option<String> => optional "guid",
        pub medium: Option<String> => optional "medium",
        pub transcripts: Vec<PodcastTranscript> => many "transcript",
        pub chapters: Option<PodcastChapters> => optional "chapters",
        pub soundbites: Vec<PodcastSoundbite> => many "soundbite",
        pub season: Option<PodcastValue> => optional "season",
        pub episode: Option<PodcastValue> => optional "episode",
        pub people: Vec<PodcastPerson> => many "person",
    }
}
