crate::xml_record! {
    /// RDF Site Summary Content Module (`content:encoded`).
    pub struct Content in "content" {
        pub encoded: Option<String> => optional "encoded",
    }
}
