use crate::dates::W3cDate;

crate::xml_record! {
    /// The fifteen Dublin Core Metadata Element Set elements (`dc:`).
    pub struct DublinCore in "dc" {
        pub title: Option<String> => optional "title",
        pub creator: Option<String> => optional "creator",
        pub subject: Option<String> => optional "subject",
        pub description: Option<String> => optional "description",
        pub publisher: Option<String> => optional "publisher",
        pub contributor: Option<String> => optional "contributor",
        pub date: Option<W3cDate> => optional "date",
        pub kind: Option<String> => optional "type",
        pub format: Option<String> => optional "format",
        pub identifier: Option<String> => optional "identifier",
        pub source: Option<String> => optional "source",
        pub language: Option<String> => optional "language",
        pub relation: Option<String> => optional "relation",
        pub coverage: Option<String> => optional "coverage",
        pub rights: Option<String> => optional "rights",
    }
}
