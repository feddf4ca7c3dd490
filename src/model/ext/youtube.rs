crate::xml_record! {
    /// Identifiers YouTube adds to its Atom entries (`yt:`).
    pub struct YouTube in "yt" {
        pub video_id: Option<String> => optional "videoId",
        pub channel_id: Option<String> => optional "channelId",
    }
}
