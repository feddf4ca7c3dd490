use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use proptest::collection::{btree_map, vec};
use proptest::option;
use proptest::prelude::*;
use syndkit::model::rss::{Category, Channel, Guid, GuidAttributes, Item, RssFeed};
use syndkit::model::XmlFeed;
use syndkit::xml::{parse_str, to_document_string, to_xml_string, Node, WriteOptions};

// Text that survives trimming: printable ASCII, no leading or trailing space.
fn text_strategy() -> impl Strategy<Value = String> {
    "[!-~]([ -~]{0,10}[!-~])?"
}

fn name_strategy() -> impl Strategy<Value = (Option<String>, String)> {
    (option::of("[a-z]{1,3}"), "[a-z][a-z0-9]{0,6}")
}

fn attributes_strategy() -> impl Strategy<Value = Option<IndexMap<String, String>>> {
    option::of(btree_map("[a-z]{1,5}", "[ -~]{0,10}", 1..3))
        .prop_map(|attrs| attrs.map(|attrs| attrs.into_iter().collect()))
}

fn leaf_strategy() -> impl Strategy<Value = Node> {
    (name_strategy(), option::of(text_strategy()), attributes_strategy()).prop_map(
        |((prefix, name), text, attributes)| Node {
            name,
            namespace_prefix: prefix,
            text,
            attributes,
            children: Vec::new(),
        },
    )
}

fn node_strategy() -> impl Strategy<Value = Node> {
    leaf_strategy().prop_recursive(4, 32, 4, |inner| {
        (name_strategy(), attributes_strategy(), vec(inner, 1..4)).prop_map(
            |((prefix, name), attributes, children)| Node {
                name,
                namespace_prefix: prefix,
                text: None,
                attributes,
                children,
            },
        )
    })
}

fn date_strategy() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (0i64..4_000_000_000).prop_map(|secs| {
        DateTime::from_timestamp(secs, 0)
            .unwrap_or_default()
            .fixed_offset()
    })
}

fn item_strategy() -> impl Strategy<Value = Item> {
    (
        option::of(text_strategy()),
        option::of(text_strategy()),
        option::of(date_strategy()),
        vec(text_strategy(), 0..3),
        option::of((text_strategy(), option::of(any::<bool>()))),
    )
        .prop_map(|(title, description, pub_date, categories, guid)| Item {
            title,
            description,
            pub_date,
            categories: categories
                .into_iter()
                .map(|value| Category {
                    value: Some(value),
                    attributes: None,
                })
                .collect(),
            guid: guid.map(|(value, is_perma_link)| Guid {
                value: Some(value),
                attributes: is_perma_link.map(|is_perma_link| GuidAttributes {
                    is_perma_link: Some(is_perma_link),
                }),
            }),
            ..Item::default()
        })
}

proptest! {
    #[test]
    fn test_node_tree_round_trip(node in node_strategy()) {
        for options in [WriteOptions::compact(), WriteOptions::pretty()] {
            let xml = to_xml_string(&node, &options);
            let parsed = parse_str(&xml).unwrap();
            prop_assert_eq!(&parsed, &node, "{}", xml);
        }
    }

    #[test]
    fn test_document_round_trip(node in node_strategy()) {
        let xml = to_document_string(&node, &WriteOptions::pretty());
        prop_assert_eq!(parse_str(&xml).unwrap(), node);
    }

    #[test]
    fn test_rss_model_round_trip(
        title in option::of(text_strategy()),
        ttl in option::of(any::<u32>()),
        items in vec(item_strategy(), 0..4),
    ) {
        let feed = RssFeed::new(Channel {
            title,
            ttl,
            items,
            ..Channel::default()
        });
        let xml = feed.to_xml(&WriteOptions::pretty()).unwrap();
        prop_assert_eq!(RssFeed::from_xml(xml.as_bytes()).unwrap(), feed);
    }
}
