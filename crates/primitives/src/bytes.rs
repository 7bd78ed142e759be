use core::{
    borrow::Borrow,
    fmt::{Debug, Display, Formatter, LowerHex, Result as FmtResult},
    ops::Deref,
    str::FromStr,
};

/// Wrapper around [`bytes::Bytes`] that prints as a "0x"-prefixed hex string.
#[derive(Clone, Default, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "with-codec", derive(parity_scale_codec::Encode, parity_scale_codec::Decode))]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bytes(
    #[cfg_attr(
        feature = "with-serde",
        serde(serialize_with = "serialize_bytes", deserialize_with = "deserialize_bytes")
    )]
    pub bytes::Bytes,
);

#[cfg(feature = "with-serde")]
fn serialize_bytes<S: serde::Serializer>(b: &bytes::Bytes, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("0x{}", const_hex::encode(b.as_ref())))
}

#[cfg(feature = "with-serde")]
fn deserialize_bytes<'de, D: serde::Deserializer<'de>>(d: D) -> Result<bytes::Bytes, D::Error> {
    let s = <std::string::String as serde::Deserialize>::deserialize(d)?;
    const_hex::decode(s.as_str()).map(Into::into).map_err(serde::de::Error::custom)
}

#[cfg(feature = "with-codec")]
impl scale_info::TypeInfo for Bytes {
    type Identity = Self;

    fn type_info() -> scale_info::Type {
        scale_info::Type::builder()
            .path(scale_info::Path::new("Bytes", module_path!()))
            .composite(
                scale_info::build::FieldsBuilder::<_, scale_info::build::UnnamedFields>::default()
                    .field(|f| f.ty::<[u8]>().type_name("Vec<u8>")),
            )
    }
}

#[cfg(feature = "with-rlp")]
impl rlp::Encodable for Bytes {
    fn rlp_append(&self, s: &mut rlp::RlpStream) {
        s.encoder().encode_value(self.0.as_ref());
    }
}

#[cfg(feature = "with-rlp")]
impl rlp::Decodable for Bytes {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        rlp.decoder().decode_value(|bytes| Ok(Self(bytes.to_vec().into())))
    }
}

impl Bytes {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(bytes::Bytes::new())
    }

    #[inline]
    #[must_use]
    pub const fn from_static(bytes: &'static [u8]) -> Self {
        Self(bytes::Bytes::from_static(bytes))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn hex_encode(&self) -> std::string::String {
        const_hex::encode(self.0.as_ref())
    }
}

impl Debug for Bytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Bytes(0x{})", self.hex_encode())
    }
}

impl Display for Bytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "0x{}", self.hex_encode())
    }
}

impl LowerHex for Bytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "0x{}", self.hex_encode())
    }
}

impl Deref for Bytes {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_ref()
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Borrow<[u8]> for Bytes {
    fn borrow(&self) -> &[u8] {
        self.as_ref()
    }
}

impl From<bytes::Bytes> for Bytes {
    fn from(src: bytes::Bytes) -> Self {
        Self(src)
    }
}

impl From<std::vec::Vec<u8>> for Bytes {
    fn from(src: std::vec::Vec<u8>) -> Self {
        Self(src.into())
    }
}

impl<const N: usize> From<[u8; N]> for Bytes {
    fn from(src: [u8; N]) -> Self {
        Self(bytes::Bytes::copy_from_slice(src.as_slice()))
    }
}

impl PartialEq<[u8]> for Bytes {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_ref() == other
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[cfg_attr(feature = "std", error("failed to parse bytes: {0}"))]
pub struct ParseBytesError(const_hex::FromHexError);

impl FromStr for Bytes {
    type Err = ParseBytesError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        const_hex::decode(value.trim_start_matches("0x"))
            .map(|v| Self(v.into()))
            .map_err(ParseBytesError)
    }
}

#[cfg(test)]
mod tests {
    use super::Bytes;

    #[test]
    fn display_round_trips_hex() {
        let b = Bytes::from(*b"\x01\x02\xff");
        assert_eq!(b.to_string(), "0x0102ff");
    }

    #[test]
    fn empty_is_empty() {
        assert!(Bytes::new().is_empty());
    }
}
