//! RDF Site Summary 1.0.
//!
//! Channel, image, items and text input are siblings under `rdf:RDF`; the
//! channel refers to them by `rdf:resource`.

use super::ext::{Content, DublinCore, Syndication};
use super::XmlFeed;
use crate::dates::DateFormat;
use crate::xml::namespace;

crate::xml_record! {
    pub struct AboutAttributes {
        pub about: Option<String> => optional "rdf:about",
    }
}

crate::xml_record! {
    pub struct ResourceAttributes {
        pub resource: Option<String> => optional "rdf:resource",
    }
}

crate::xml_record! {
    /// A reference such as `<image rdf:resource="..."/>`.
    pub struct Resource {
        pub attributes: Option<ResourceAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct Sequence {
        pub items: Vec<Resource> => many "rdf:li",
    }
}

crate::xml_record! {
    pub struct Items {
        pub sequence: Option<Sequence> => optional "rdf:Seq",
    }
}

crate::xml_record! {
    pub struct Channel {
        pub attributes: Option<AboutAttributes> => optional "@attributes",
        pub title: Option<String> => optional "title",
        pub link: Option<String> => optional "link",
        pub description: Option<String> => optional "description",
        pub image: Option<Resource> => optional "image",
        pub items: Option<Items> => optional "items",
        pub text_input: Option<Resource> => optional "textinput",
        pub dublin_core: Option<DublinCore> => optional "dublinCore",
        pub syndication: Option<Syndication> => optional "syndication",
    }
}

crate::xml_record! {
    pub struct Image {
        pub attributes: Option<AboutAttributes> => optional "@attributes",
        pub title: Option<String> => optional "title",
        pub url: Option<String> => optional "url",
        pub link: Option<String> => optional "link",
    }
}

crate::xml_record! {
    pub struct Item {
        pub attributes: Option<AboutAttributes> => optional "@attributes",
        pub title: Option<String> => optional "title",
        pub link: Option<String> => optional "link",
        pub description: Option<String> => optional "description",
        pub dublin_core: Option<DublinCore> => optional "dublinCore",
        pub content: Option<Content> => optional "content",
    }
}

crate::xml_record! {
    pub struct TextInput {
        pub attributes: Option<AboutAttributes> => optional "@attributes",
        pub title: Option<String> => optional "title",
        pub description: Option<String> => optional "description",
        pub name: Option<String> => optional "name",
        pub link: Option<String> => optional "link",
    }
}

crate::xml_record! {
    /// The `<rdf:RDF>` document element.
    pub struct RdfFeed {
        pub channel: Option<Channel> => optional "channel",
        pub image: Option<Image> => optional "image",
        pub items: Vec<Item> => many "item",
        pub text_input: Option<TextInput> => optional "textinput",
    }
}

impl XmlFeed for RdfFeed {
    const ROOT: &'static str = "rdf:RDF";
    const DATE_FORMAT: DateFormat = DateFormat::Iso8601;
    const DEFAULT_NAMESPACE: Option<&'static str> = Some(namespace::RSS1);
}

impl Resource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            attributes: Some(ResourceAttributes {
                resource: Some(uri.into()),
            }),
        }
    }

    pub fn uri(&self) -> Option<&str> {
        self.attributes.as_ref().and_then(|a| a.resource.as_deref())
    }
}

impl Channel {
    /// Item URIs listed in the channel's `rdf:Seq`, in order.
    pub fn item_uris(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|items| items.sequence.as_ref())
            .flat_map(|seq| seq.items.iter().filter_map(Resource::uri))
            .collect()
    }
}

impl Item {
    pub fn about(&self) -> Option<&str> {
        self.attributes.as_ref().and_then(|a| a.about.as_deref())
    }
}
