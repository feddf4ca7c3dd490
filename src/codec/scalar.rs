//! Leaf values that convert losslessly to and from element text.

use chrono::{DateTime, FixedOffset};

use crate::dates::W3cDate;

use super::{Decoder, DecodeError, EncodeError, Encoder, XmlDecodable, XmlEncodable};

/// A value with a textual form, stored as element text or an attribute value.
pub trait XmlScalar: Sized {
    /// Name used in error messages.
    const TYPE_NAME: &'static str;

    fn from_xml_text(text: &str) -> Option<Self>;

    /// `None` when the value has no textual form.
    fn to_xml_text(&self) -> Option<String>;
}

impl XmlScalar for String {
    const TYPE_NAME: &'static str = "string";

    fn from_xml_text(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn to_xml_text(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl XmlScalar for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_xml_text(text: &str) -> Option<Self> {
        match text.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    fn to_xml_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

macro_rules! integer_scalar {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl XmlScalar for $ty {
                const TYPE_NAME: &'static str = $name;

                fn from_xml_text(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }

                fn to_xml_text(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

integer_scalar! {
    i8 => "i8", i16 => "i16", i32 => "i32", i64 => "i64",
    u8 => "u8", u16 => "u16", u32 => "u32", u64 => "u64", usize => "usize",
}

macro_rules! float_scalar {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl XmlScalar for $ty {
                const TYPE_NAME: &'static str = $name;

                fn from_xml_text(text: &str) -> Option<Self> {
                    text.trim().parse::<$ty>().ok().filter(|v| v.is_finite())
                }

                fn to_xml_text(&self) -> Option<String> {
                    self.is_finite().then(|| self.to_string())
                }
            }
        )*
    };
}

float_scalar! { f32 => "f32", f64 => "f64" }

impl XmlScalar for W3cDate {
    const TYPE_NAME: &'static str = "ISO 8601 date";

    fn from_xml_text(text: &str) -> Option<Self> {
        W3cDate::parse(text)
    }

    fn to_xml_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// Implements [`XmlDecodable`] and [`XmlEncodable`] for [`XmlScalar`] types.
macro_rules! codable_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::codec::XmlDecodable for $ty {
                fn decode(
                    decoder: &mut $crate::codec::Decoder<'_>,
                ) -> Result<Self, $crate::codec::DecodeError> {
                    decoder.single_value().decode()
                }

                fn decode_optional(
                    decoder: &mut $crate::codec::Decoder<'_>,
                ) -> Result<Option<Self>, $crate::codec::DecodeError> {
                    let value = decoder.single_value();
                    if value.is_nil() {
                        return Ok(None);
                    }
                    value.decode().map(Some)
                }
            }

            impl $crate::codec::XmlEncodable for $ty {
                fn encode(
                    &self,
                    encoder: &mut $crate::codec::Encoder,
                ) -> Result<(), $crate::codec::EncodeError> {
                    encoder.single_value().encode(self)
                }
            }
        )*
    };
}

pub(crate) use codable_scalar;

codable_scalar!(String, bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, W3cDate);

impl XmlDecodable for DateTime<FixedOffset> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.decode_date()
    }

    fn decode_optional(decoder: &mut Decoder<'_>) -> Result<Option<Self>, DecodeError> {
        if decoder.single_value().is_nil() {
            return Ok(None);
        }
        decoder.decode_date().map(Some)
    }
}

impl XmlEncodable for DateTime<FixedOffset> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.single_value().encode_date(self)
    }
}
