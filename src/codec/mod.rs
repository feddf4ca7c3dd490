//! Typed mapping between [`Node`](crate::xml::Node) trees and Rust values.
//!
//! A type opts in by implementing [`XmlDecodable`] and [`XmlEncodable`], usually
//! through [`xml_record!`](crate::xml_record), which derives both from a table of
//! field-to-key mappings. Keys name child elements, with two pseudo-keys:
//! [`TEXT_KEY`] for the element's own text and [`ATTRIBUTES_KEY`] for its
//! attributes read as a record.
//!
//! # Namespace wrappers
//!
//! Extension namespaces (`dc:`, `itunes:`, ...) are modeled as records whose
//! element boundary never appears in markup. Such a type implements
//! [`NamespaceCodable`]; the decoder reads its fields from the prefixed children
//! of the current element and the encoder lifts them back, so
//!
//! ```xml
//! <item><dc:creator>Jane</dc:creator></item>
//! ```
//!
//! decodes to `item.dublin_core.creator == Some("Jane")` and encodes back to the
//! same markup.

mod decoder;
mod encoder;
mod error;
mod key;
mod scalar;

pub use decoder::{Decoder, KeyedContainer, SingleValue, UnkeyedContainer};
pub use encoder::{Encoder, KeyedEncoder, SingleValueEncoder, UnkeyedEncoder};
pub use error::{DecodeError, EncodeError};
pub use key::{CodingKey, CodingPath, ATTRIBUTES_KEY, TEXT_KEY};
pub(crate) use scalar::codable_scalar;
pub use scalar::XmlScalar;

/// A type that can be rebuilt from the current frame of a [`Decoder`].
pub trait XmlDecodable: Sized {
    /// Set for namespace wrappers; see [`NamespaceCodable`].
    const NAMESPACE: Option<&'static str> = None;

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError>;

    /// Decodes a value whose key is present. Scalars override this to read an
    /// empty element as `None`.
    fn decode_optional(decoder: &mut Decoder<'_>) -> Result<Option<Self>, DecodeError> {
        Self::decode(decoder).map(Some)
    }
}

/// A type that can write itself into the current frame of an [`Encoder`].
pub trait XmlEncodable {
    /// Set for namespace wrappers; see [`NamespaceCodable`].
    const NAMESPACE: Option<&'static str> = None;

    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError>;
}

/// Marks a record as a namespace wrapper for `PREFIX`.
///
/// Implementors must also set `NAMESPACE` to `Some(PREFIX)` on both codable
/// traits; [`xml_record!`](crate::xml_record) does this for `struct X in "prefix"`.
pub trait NamespaceCodable: XmlDecodable + XmlEncodable {
    const PREFIX: &'static str;
}

/// Declares a record together with its [`XmlDecodable`] and [`XmlEncodable`]
/// implementations.
///
/// Each field names its key and how it maps:
/// - `optional` - `Option<T>`, absent when the key is missing
/// - `many` - `Vec<T>`, every child named by the key
/// - `required` - `T`, missing key is an error
///
/// `struct Name in "prefix"` declares a namespace wrapper.
///
/// ```
/// syndkit::xml_record! {
///     pub struct Enclosure {
///         pub url: Option<String> => optional "url",
///         pub length: Option<u64> => optional "length",
///     }
/// }
/// ```
#[macro_export]
macro_rules! xml_record {
    (@decode $container:ident, optional, $key:literal) => {
        $container.decode_if_present($key)?
    };
    (@decode $container:ident, many, $key:literal) => {
        $container.decode_vec($key)?
    };
    (@decode $container:ident, required, $key:literal) => {
        $container.decode($key)?
    };

    (@encode $container:ident, optional, $key:literal, $value:expr) => {
        $container.encode_if_present($key, $value)?
    };
    (@encode $container:ident, many, $key:literal, $value:expr) => {
        $container.encode_vec($key, $value)?
    };
    (@encode $container:ident, required, $key:literal, $value:expr) => {
        $container.encode($key, $value)?
    };

    (@namespace) => {};
    (@namespace $prefix:literal) => {
        const NAMESPACE: ::std::option::Option<&'static str> =
            ::std::option::Option::Some(<Self as $crate::codec::NamespaceCodable>::PREFIX);
    };

    (@marker $name:ident) => {};
    (@marker $name:ident $prefix:literal) => {
        impl $crate::codec::NamespaceCodable for $name {
            const PREFIX: &'static str = $prefix;
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(in $prefix:literal)? {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty => $kind:ident $key:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::codec::XmlDecodable for $name {
            $crate::xml_record!(@namespace $($prefix)?);

            #[allow(unused_mut, unused_variables)]
            fn decode(
                decoder: &mut $crate::codec::Decoder<'_>,
            ) -> ::std::result::Result<Self, $crate::codec::DecodeError> {
                let mut container = decoder.keyed()?;
                ::std::result::Result::Ok(Self {
                    $( $field: $crate::xml_record!(@decode container, $kind, $key), )*
                })
            }
        }

        impl $crate::codec::XmlEncodable for $name {
            $crate::xml_record!(@namespace $($prefix)?);

            #[allow(unused_mut, unused_variables)]
            fn encode(
                &self,
                encoder: &mut $crate::codec::Encoder,
            ) -> ::std::result::Result<(), $crate::codec::EncodeError> {
                let mut container = encoder.keyed();
                $( $crate::xml_record!(@encode container, $kind, $key, &self.$field); )*
                ::std::result::Result::Ok(())
            }
        }

        $crate::xml_record!(@marker $name $($prefix)?);
    };
}
