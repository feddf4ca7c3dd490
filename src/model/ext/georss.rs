crate::xml_record! {
    /// GeoRSS Simple, plus the GML point form under `georss:where`.
    pub struct GeoRss in "georss" {
        pub point: Option<String> => optional "point",
        pub line: Option<String> => optional "line",
        pub polygon: Option<String> => optional "polygon",
        pub bounding_box: Option<String> => optional "box",
        pub feature_type_tag: Option<String> => optional "featureTypeTag",
        pub relationship_tag: Option<String> => optional "relationshipTag",
        pub feature_name: Option<String> => optional "featureName",
        pub elevation: Option<f64> => optional "elev",
        pub floor: Option<i32> => optional "floor",
        pub radius: Option<f64> => optional "radius",
        pub location: Option<GeoWhere> => optional "where",
    }
}

crate::xml_record! {
    pub struct GeoWhere {
        pub point: Option<GmlPoint> => optional "gml:Point",
    }
}

crate::xml_record! {
    pub struct GmlPoint {
        /// Space separated `latitude longitude`.
        pub position: Option<String> => optional "gml:pos",
    }
}

impl GeoRss {
    /// Latitude and longitude from `georss:point`, falling back to the GML form.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let text = self.point.as_deref().or_else(|| {
            self.location
                .as_ref()
                .and_then(|location| location.point.as_ref())
                .and_then(|point| point.position.as_deref())
        })?;
        let mut parts = text.split_whitespace().map(str::parse::<f64>);
        match (parts.next(), parts.next()) {
            (Some(Ok(lat)), Some(Ok(lon))) => Some((lat, lon)),
            _ => None,
        }
    }
}
