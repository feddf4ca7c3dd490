//! Extension namespaces shared by the XML dialects.
//!
//! Every type here is a namespace wrapper: it has no element of its own and
//! collects the prefixed children of the element it is attached to.

mod atom;
mod content;
mod dublin_core;
mod georss;
mod itunes;
mod podcast;
mod syndication;
mod youtube;

pub use atom::AtomNamespace;
pub use content::Content;
pub use dublin_core::DublinCore;
pub use georss::{GeoRss, GeoWhere, GmlPoint};
pub use itunes::{
    ITunesCategory, ITunesCategoryAttributes, ITunesChannel, ITunesImage, ITunesImageAttributes,
    ITunesItem, ITunesOwner,
};
pub use podcast::{
    Podcast, PodcastChapters, PodcastChaptersAttributes, PodcastFunding,
    PodcastFundingAttributes, PodcastLocked, PodcastLockedAttributes, PodcastPerson,
    PodcastPersonAttributes, PodcastSoundbite, PodcastSoundbiteAttributes, PodcastTranscript,
    PodcastTranscriptAttributes, PodcastValue, PodcastValueAttributes,
};
pub use syndication::{Syndication, UpdatePeriod};
pub use youtube::YouTube;
