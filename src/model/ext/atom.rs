use crate::model::atom::Link;

crate::xml_record! {
    /// `atom:` elements embedded in another dialect, typically the
    /// `<atom:link rel="self">` of an RSS channel.
    pub struct AtomNamespace in "atom" {
        pub links: Vec<Link> => many "link",
    }
}

impl AtomNamespace {
    /// The `href` of the first link with `rel="self"`.
    pub fn self_link(&self) -> Option<&str> {
        self.links
            .iter()
            .filter_map(|link| link.attributes.as_ref())
            .find(|attrs| attrs.rel.as_deref() == Some("self"))
            .and_then(|attrs| attrs.href.as_deref())
    }
}
