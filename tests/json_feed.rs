use chrono::DateTime;
use pretty_assertions::assert_eq;
use syndkit::model::json::{JsonFeed, VERSION_1_1};

const MICROBLOG: &str = r#"{
    "version": "https://jsonfeed.org/version/1.1",
    "title": "Notes",
    "home_page_url": "https://notes.example.net/",
    "feed_url": "https://notes.example.net/feed.json",
    "authors": [{ "name": "Lee", "url": "https://notes.example.net/about" }],
    "language": "en",
    "items": [
        {
            "id": 1001,
            "url": "https://notes.example.net/1001",
            "content_text": "Short note.",
            "date_published": "2024-04-02T07:15:00-04:00",
            "tags": ["misc"],
            "attachments": [
                {
                    "url": "https://notes.example.net/1001.m4a",
                    "mime_type": "audio/x-m4a",
                    "size_in_bytes": 89970236,
                    "duration_in_seconds": 6629
                }
            ]
        },
        {
            "id": "post-1000",
            "title": "Longer post",
            "content_html": "<p>Body</p>",
            "author": { "name": "Guest" }
        }
    ]
}"#;

#[test]
fn test_decodes_items() {
    let feed = JsonFeed::from_json(MICROBLOG.as_bytes()).unwrap();
    assert_eq!(feed.version, VERSION_1_1);
    assert_eq!(feed.title.as_deref(), Some("Notes"));
    assert_eq!(feed.items.len(), 2);

    let note = &feed.items[0];
    assert_eq!(note.id, "1001");
    assert_eq!(
        note.date_published,
        Some(DateTime::parse_from_rfc3339("2024-04-02T11:15:00Z").unwrap())
    );
    assert_eq!(note.attachments[0].size_in_bytes, Some(89_970_236));
    assert_eq!(note.attachments[0].duration_in_seconds, Some(6629.0));
    assert_eq!(note.first_author(), None);

    let post = &feed.items[1];
    assert_eq!(post.id, "post-1000");
    assert_eq!(
        post.first_author().and_then(|a| a.name.as_deref()),
        Some("Guest")
    );
}

#[test]
fn test_feed_authors_prefer_list() {
    let feed = JsonFeed::from_json(MICROBLOG.as_bytes()).unwrap();
    let names: Vec<_> = feed.all_authors().filter_map(|a| a.name.as_deref()).collect();
    assert_eq!(names, vec!["Lee"]);
}

#[test]
fn test_round_trip() {
    let feed = JsonFeed::from_json(MICROBLOG.as_bytes()).unwrap();
    for pretty in [false, true] {
        let json = feed.to_json(pretty).unwrap();
        assert_eq!(JsonFeed::from_json(json.as_bytes()).unwrap(), feed);
    }
}

#[test]
fn test_absent_fields_are_omitted() {
    let feed = JsonFeed {
        version: VERSION_1_1.to_string(),
        title: Some("Empty".into()),
        ..JsonFeed::default()
    };
    assert_eq!(
        feed.to_json(false).unwrap(),
        r#"{"version":"https://jsonfeed.org/version/1.1","title":"Empty","items":[]}"#
    );
}
