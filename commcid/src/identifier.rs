//! The seam between the commitment codecs and the generic CID / multihash
//! containers.

use crate::constants::DAG_PB;
use crate::error::CommCidError;
use cid::multihash::Multihash;
use cid::{Cid, Version};
use multibase::Base;
use std::borrow::Cow;
use std::fmt::{self, Display};
use std::str::FromStr;
use unsigned_varint as varint;

/// Largest digest a [`Cid`] multihash can hold.
pub const MAX_DIGEST_SIZE: usize = 64;

pub type Multihash64 = Multihash<MAX_DIGEST_SIZE>;

/// Anything the codecs can read a CID codec and a multihash from.
pub trait Identifier {
    fn codec(&self) -> u64;

    /// The encoded multihash, exactly as carried by the identifier.
    fn multihash_bytes(&self) -> Cow<'_, [u8]>;
}

impl Identifier for Cid {
    fn codec(&self) -> u64 {
        Cid::codec(self)
    }

    fn multihash_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Owned(self.hash().to_bytes())
    }
}

/// A decoded multihash borrowed from its encoding. Unlike [`Multihash64`]
/// the digest length is not capped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DigestView<'a> {
    pub code: u64,
    pub digest: &'a [u8],
}

/// Strictly decodes a multihash: the declared length must match the bytes
/// that follow it, with nothing left over.
pub fn decode_digest(bytes: &[u8]) -> Result<DigestView<'_>, CommCidError> {
    let (code, rest) = varint::decode::u64(bytes)
        .map_err(|e| CommCidError::malformed_digest(format!("multihash code: {}", e)))?;
    let (len, digest) = varint::decode::u64(rest)
        .map_err(|e| CommCidError::malformed_digest(format!("multihash length: {}", e)))?;

    if digest.len() as u64 != len {
        return Err(CommCidError::malformed_digest(format!(
            "multihash declares {} digest bytes, got {}",
            len,
            digest.len()
        )));
    }

    Ok(DigestView { code, digest })
}

/// Decodes a multihash small enough to be held by a [`Cid`].
pub fn decode_multihash(bytes: &[u8]) -> Result<Multihash64, CommCidError> {
    Multihash64::from_bytes(bytes).map_err(CommCidError::malformed_digest)
}

/// A CID whose multihash has not been validated yet.
///
/// Parsing a [`Cid`] already rejects broken multihashes, so a CID read off
/// the wire is held in this form when the caller wants those failures to be
/// reported by the commitment codecs instead (as [`CommCidError::MalformedDigest`],
/// after the codec has been checked).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawCid {
    version: Version,
    codec: u64,
    multihash: Vec<u8>,
}

impl RawCid {
    pub fn new_v1(codec: u64, multihash: impl Into<Vec<u8>>) -> Self {
        RawCid {
            version: Version::V1,
            codec,
            multihash: multihash.into(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CommCidError> {
        // A CIDv0 is a bare sha2-256 multihash.
        if bytes.len() == 34 && bytes[0] == 0x12 && bytes[1] == 0x20 {
            return Ok(RawCid {
                version: Version::V0,
                codec: DAG_PB,
                multihash: bytes.to_vec(),
            });
        }

        let (version, rest) = varint::decode::u64(bytes)
            .map_err(|e| CommCidError::malformed_cid(format!("cid version: {}", e)))?;
        if version != 1 {
            return Err(CommCidError::malformed_cid(format!(
                "unsupported cid version {}",
                version
            )));
        }
        let (codec, multihash) = varint::decode::u64(rest)
            .map_err(|e| CommCidError::malformed_cid(format!("cid codec: {}", e)))?;

        Ok(RawCid::new_v1(codec, multihash))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self.version {
            Version::V0 => self.multihash.clone(),
            Version::V1 => {
                let mut version_buf = varint::encode::u64_buffer();
                let mut codec_buf = varint::encode::u64_buffer();
                [
                    varint::encode::u64(1, &mut version_buf),
                    varint::encode::u64(self.codec, &mut codec_buf),
                    self.multihash.as_slice(),
                ]
                .concat()
            }
        }
    }

    /// Validates the multihash and builds a regular [`Cid`].
    pub fn to_cid(&self) -> Result<Cid, CommCidError> {
        let hash = decode_multihash(&self.multihash)?;
        match self.version {
            Version::V0 => Cid::new_v0(hash).map_err(|e| CommCidError::malformed_cid(e.to_string())),
            Version::V1 => Ok(Cid::new_v1(self.codec, hash)),
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn multihash(&self) -> &[u8] {
        &self.multihash
    }

    pub fn to_string_of_base(&self, base: Base) -> Result<String, CommCidError> {
        match self.version {
            Version::V0 if !matches!(base, Base::Base58Btc) => Err(CommCidError::malformed_cid(
                "a CIDv0 can only be encoded as base58btc",
            )),
            Version::V0 => Ok(Base::Base58Btc.encode(&self.multihash)),
            Version::V1 => Ok(multibase::encode(base, self.to_bytes())),
        }
    }
}

impl Identifier for RawCid {
    fn codec(&self) -> u64 {
        self.codec
    }

    fn multihash_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&self.multihash)
    }
}

impl From<&Cid> for RawCid {
    fn from(cid: &Cid) -> Self {
        RawCid {
            version: cid.version(),
            codec: cid.codec(),
            multihash: cid.hash().to_bytes(),
        }
    }
}

impl From<Cid> for RawCid {
    fn from(cid: Cid) -> Self {
        RawCid::from(&cid)
    }
}

impl Display for RawCid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Version::V0 => f.write_str(&Base::Base58Btc.encode(&self.multihash)),
            Version::V1 => f.write_str(&multibase::encode(Base::Base32Lower, self.to_bytes())),
        }
    }
}

impl FromStr for RawCid {
    type Err = CommCidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // CIDv0 strings are base58btc without a multibase prefix.
        let bytes = if s.len() == 46 && s.starts_with("Qm") {
            Base::Base58Btc.decode(s).map_err(CommCidError::malformed_cid)?
        } else {
            multibase::decode(s).map_err(CommCidError::malformed_cid)?.1
        };
        RawCid::from_bytes(&bytes)
    }
}
