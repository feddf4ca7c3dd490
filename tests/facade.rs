//! Format detection, simplification and re-encoding through [`Feed`].

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use syndkit::feed::{detect_format, parse_file, read_feed_file, FetchError};
use syndkit::xml::WriteOptions;
use syndkit::{Error, Feed, FeedFormat};

const ATOM: &str = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Title</title>
  <subtitle>About</subtitle>
  <link href="https://a.example/"/>
  <updated>2024-01-01T00:00:00Z</updated>
  <entry>
    <id>urn:a:1</id>
    <title>  Spaced
       out  </title>
    <link rel="alternate" href="https://a.example/1"/>
    <author><name>Ann</name></author>
    <summary>First</summary>
    <updated>2024-01-01T00:00:00Z</updated>
  </entry>
</feed>"#;

const RDF: &str = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
  xmlns="http://purl.org/rss/1.0/" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel rdf:about="https://r.example/">
    <title>RDF Title</title>
    <link>https://r.example/</link>
  </channel>
  <item rdf:about="https://r.example/1">
    <title>R1</title>
    <link>https://r.example/1</link>
    <dc:creator>Rita</dc:creator>
  </item>
</rdf:RDF>"#;

const JSON: &str = r#"{"version":"https://jsonfeed.org/version/1.1","title":"JSON Title",
  "home_page_url":"https://j.example/","items":[
    {"id":"j1","content_text":"Text","date_modified":"2024-02-02T00:00:00Z"},
    {"id":"j2","title":"Second","date_published":"2024-03-03T00:00:00Z"}]}"#;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_detects_every_format() {
    let rss = std::fs::read(fixture("podcast.rss")).unwrap();
    assert_eq!(detect_format(&rss).unwrap(), FeedFormat::Rss);
    assert_eq!(detect_format(ATOM.as_bytes()).unwrap(), FeedFormat::Atom);
    assert_eq!(detect_format(RDF.as_bytes()).unwrap(), FeedFormat::Rdf);
    assert_eq!(detect_format(JSON.as_bytes()).unwrap(), FeedFormat::Json);
}

#[test]
fn test_simplify_rss() {
    let feed = parse_file(fixture("podcast.rss")).unwrap();
    let simple = feed.simplify();
    assert_eq!(simple.format, FeedFormat::Rss);
    assert_eq!(simple.title.as_deref(), Some("Night Shift Radio"));
    assert_eq!(simple.items.len(), 2);

    let first = &simple.items[0];
    assert_eq!(first.id, "nightshift-2");
    // Not a permalink, so the guid is no substitute for <link>.
    assert_eq!(first.link.as_deref(), Some("https://radio.example.com/2"));
    assert_eq!(first.author.as_deref(), Some("sam@example.com (Sam Host)"));

    let second = &simple.items[1];
    assert_eq!(second.link.as_deref(), Some("https://radio.example.com/1"));
    assert_eq!(second.author, None);
    assert!(second.published.is_some());
}

#[test]
fn test_simplify_atom() {
    let simple = Feed::parse(ATOM.as_bytes()).unwrap().simplify();
    assert_eq!(simple.format, FeedFormat::Atom);
    assert_eq!(simple.title.as_deref(), Some("Atom Title"));
    assert_eq!(simple.description.as_deref(), Some("About"));
    assert_eq!(simple.link.as_deref(), Some("https://a.example/"));

    let entry = &simple.items[0];
    assert_eq!(entry.id, "urn:a:1");
    assert_eq!(entry.title, "Spaced out");
    assert_eq!(entry.summary.as_deref(), Some("First"));
    assert_eq!(entry.author.as_deref(), Some("Ann"));
}

#[test]
fn test_simplify_rdf() {
    let simple = Feed::parse(RDF.as_bytes()).unwrap().simplify();
    assert_eq!(simple.format, FeedFormat::Rdf);
    assert_eq!(simple.title.as_deref(), Some("RDF Title"));
    assert_eq!(simple.items[0].id, "https://r.example/1");
    assert_eq!(simple.items[0].author.as_deref(), Some("Rita"));
}

#[test]
fn test_simplify_json() {
    let simple = Feed::parse(JSON.as_bytes()).unwrap().simplify();
    assert_eq!(simple.format, FeedFormat::Json);
    assert_eq!(simple.link.as_deref(), Some("https://j.example/"));
    assert_eq!(
        simple.updated.map(|d| d.to_rfc3339()),
        Some("2024-03-03T00:00:00+00:00".to_string())
    );
    assert_eq!(simple.items[0].title, "Untitled");
    assert_eq!(simple.items[0].summary.as_deref(), Some("Text"));
    assert_eq!(simple.items[1].title, "Second");
}

#[test]
fn test_items_without_ids_get_stable_hashes() {
    let xml = r#"<rss><channel>
        <item><title>A</title><link>https://x/a</link></item>
        <item><title>B</title><link>https://x/b</link></item>
    </channel></rss>"#;
    let first = Feed::parse(xml.as_bytes()).unwrap().simplify();
    let second = Feed::parse(xml.as_bytes()).unwrap().simplify();
    assert_eq!(first.items[0].id.len(), 64);
    assert_ne!(first.items[0].id, first.items[1].id);
    assert_eq!(first, second);
}

#[test]
fn test_to_string_reparses_to_same_feed() {
    let rss = std::fs::read(fixture("podcast.rss")).unwrap();
    for bytes in [&rss[..], ATOM.as_bytes(), RDF.as_bytes(), JSON.as_bytes()] {
        let feed = Feed::parse(bytes).unwrap();
        for options in [WriteOptions::compact(), WriteOptions::pretty()] {
            let encoded = feed.to_string(&options).unwrap();
            assert_eq!(Feed::parse(encoded.as_bytes()).unwrap(), feed);
        }
    }
}

#[test]
fn test_unsupported_root() {
    let err = Feed::parse(b"<opml version=\"2.0\"><body/></opml>").unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
    assert!(err.to_string().contains("opml"));
}

#[test]
fn test_decode_error_surfaces_through_facade() {
    let err = Feed::parse(b"<rss><channel><ttl>-1</ttl></channel></rss>").unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn test_read_feed_file() {
    let feed = read_feed_file(fixture("podcast.rss")).await.unwrap();
    assert_eq!(feed.format(), FeedFormat::Rss);

    let missing = read_feed_file(fixture("missing.rss")).await;
    assert!(matches!(missing, Err(FetchError::Io(_))));
}
