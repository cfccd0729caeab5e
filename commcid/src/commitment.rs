use crate::constants::{hash_for_codec, CommitmentKind};
use crate::error::CommCidError;
use crate::identifier::{decode_digest, Identifier, Multihash64};
use cid::Cid;
use common::prelude::*;
use std::fmt::{self, Display};

/// Every Filecoin commitment is a 32 byte merkle root.
pub const COMMITMENT_SIZE: usize = 32;

bytes_wrapper!(pub Commitment, COMMITMENT_SIZE);
impl_slog_value!(Commitment);

impl Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl From<Bytes32> for Commitment {
    fn from(bytes: Bytes32) -> Self {
        Commitment(bytes)
    }
}

impl TryFrom<&[u8]> for Commitment {
    type Error = CommCidError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Bytes32::try_from(bytes)
            .map(Commitment)
            .map_err(|_| CommCidError::InvalidLength(bytes.len()))
    }
}

impl AsRef<[u8]> for Commitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl CommitmentKind {
    /// Wraps a raw commitment in a v1 CID carrying this kind's codec and
    /// multihash code.
    pub fn to_cid(self, commitment: &[u8]) -> Result<Cid, CommCidError> {
        let commitment = Commitment::try_from(commitment)?;
        wrap(self.codec(), self.hash(), &commitment)
    }

    /// Extracts the raw commitment from a CID of this kind.
    ///
    /// The codec is checked before the multihash is even decoded. The digest
    /// is returned as declared by the multihash; its length is not checked.
    pub fn from_cid<I: Identifier + ?Sized>(self, cid: &I) -> Result<Vec<u8>, CommCidError> {
        if cid.codec() != self.codec() {
            return Err(CommCidError::IncorrectCodec(cid.codec()));
        }

        let bytes = cid.multihash_bytes();
        let hash = decode_digest(&bytes)?;
        if hash.code != self.hash() {
            return Err(CommCidError::IncorrectHash(hash.code));
        }

        Ok(hash.digest.to_vec())
    }
}

fn wrap(codec: u64, hash: u64, commitment: &Commitment) -> Result<Cid, CommCidError> {
    let hash = Multihash64::wrap(hash, &commitment.0).map_err(CommCidError::malformed_digest)?;
    Ok(Cid::new_v1(codec, hash))
}

fn validate_segments(codec: u64, hash: u64) -> Result<(), CommCidError> {
    match hash_for_codec(codec) {
        None => Err(CommCidError::IncorrectCodec(codec)),
        Some(expected) if expected != hash => Err(CommCidError::IncorrectHash(hash)),
        Some(_) => Ok(()),
    }
}

/// Builds a CID from any valid Filecoin codec / multihash pairing.
pub fn commitment_to_cid(codec: u64, hash: u64, commitment: &[u8]) -> Result<Cid, CommCidError> {
    validate_segments(codec, hash)?;
    let commitment = Commitment::try_from(commitment)?;
    wrap(codec, hash, &commitment)
}

/// The parts of a Filecoin commitment CID of either codec.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodedCommitment {
    pub codec: u64,
    pub hash: u64,
    pub digest: Vec<u8>,
}

/// Decodes a CID of either Filecoin commitment codec.
pub fn cid_to_commitment<I: Identifier + ?Sized>(cid: &I) -> Result<DecodedCommitment, CommCidError> {
    let codec = cid.codec();
    if hash_for_codec(codec).is_none() {
        return Err(CommCidError::IncorrectCodec(codec));
    }

    let bytes = cid.multihash_bytes();
    let hash = decode_digest(&bytes)?;
    validate_segments(codec, hash.code)?;

    Ok(DecodedCommitment {
        codec,
        hash: hash.code,
        digest: hash.digest.to_vec(),
    })
}

/// CommD to CID.
pub fn data_commitment_v1_to_cid(commitment: &[u8]) -> Result<Cid, CommCidError> {
    CommitmentKind::Data.to_cid(commitment)
}

/// CID to CommD.
pub fn cid_to_data_commitment_v1<I: Identifier + ?Sized>(cid: &I) -> Result<Vec<u8>, CommCidError> {
    CommitmentKind::Data.from_cid(cid)
}

/// CommP to CID.
pub fn piece_commitment_v1_to_cid(commitment: &[u8]) -> Result<Cid, CommCidError> {
    CommitmentKind::Piece.to_cid(commitment)
}

/// CID to CommP.
pub fn cid_to_piece_commitment_v1<I: Identifier + ?Sized>(cid: &I) -> Result<Vec<u8>, CommCidError> {
    CommitmentKind::Piece.from_cid(cid)
}

/// CommR to CID.
pub fn replica_commitment_v1_to_cid(commitment: &[u8]) -> Result<Cid, CommCidError> {
    CommitmentKind::Replica.to_cid(commitment)
}

/// CID to CommR.
pub fn cid_to_replica_commitment_v1<I: Identifier + ?Sized>(
    cid: &I,
) -> Result<Vec<u8>, CommCidError> {
    CommitmentKind::Replica.from_cid(cid)
}
