//! Well-known feed namespace prefixes and their URIs.

pub const ATOM: &str = "http://www.w3.org/2005/Atom";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RSS1: &str = "http://purl.org/rss/1.0/";
pub const DUBLIN_CORE: &str = "http://purl.org/dc/elements/1.1/";
pub const CONTENT: &str = "http://purl.org/rss/1.0/modules/content/";
pub const SYNDICATION: &str = "http://purl.org/rss/1.0/modules/syndication/";
pub const GEORSS: &str = "http://www.georss.org/georss";
pub const GML: &str = "http://www.opengis.net/gml";
pub const ITUNES: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";
pub const YOUTUBE: &str = "http://www.youtube.com/xml/schemas/2015";
pub const PODCAST: &str = "https://podcastindex.org/namespace/1.0";

const KNOWN: &[(&str, &str)] = &[
    ("atom", ATOM),
    ("rdf", RDF),
    ("dc", DUBLIN_CORE),
    ("content", CONTENT),
    ("sy", SYNDICATION),
    ("georss", GEORSS),
    ("gml", GML),
    ("itunes", ITUNES),
    ("yt", YOUTUBE),
    ("podcast", PODCAST),
];

/// URI conventionally bound to `prefix`, if it is one this crate models.
pub fn uri_for(prefix: &str) -> Option<&'static str> {
    KNOWN
        .iter()
        .find(|(known, _)| *known == prefix)
        .map(|(_, uri)| *uri)
}
