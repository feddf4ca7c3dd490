use std::fmt;
use std::str::FromStr;

use crate::codec::{codable_scalar, XmlScalar};
use crate::dates::W3cDate;

/// Publishing schedule unit of `sy:updatePeriod`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdatePeriod {
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl UpdatePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl FromStr for UpdatePeriod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(()),
        }
    }
}

impl fmt::Display for UpdatePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl XmlScalar for UpdatePeriod {
    const TYPE_NAME: &'static str = "update period";

    fn from_xml_text(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    fn to_xml_text(&self) -> Option<String> {
        Some(self.as_str().to_string())
    }
}

codable_scalar!(UpdatePeriod);

crate::xml_record! {
    /// RDF Site Summary Syndication Module (`sy:`).
    pub struct Syndication in "sy" {
        pub update_period: Option<UpdatePeriod> => optional "updatePeriod",
        pub update_frequency: Option<u32> => optional "updateFrequency",
        pub update_base: Option<W3cDate> => optional "updateBase",
    }
}
