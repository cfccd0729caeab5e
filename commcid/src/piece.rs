//! Piece multihash CIDs: a [`RAW`] CID whose multihash digest packs the
//! tree padding and height in front of the piece commitment, so that the
//! unpadded piece size travels with the commitment.
//!
//! ```text
//! uvarint(padding) | height (1 byte) | root (32 bytes)
//! ```

use crate::commitment::{Commitment, COMMITMENT_SIZE};
use crate::constants::{FR32_SHA256_TRUNC254_PADDED_BINARY_TREE, RAW};
use crate::error::CommCidError;
use crate::identifier::{decode_digest, Identifier, Multihash64};
use crate::tree::{
    unpadded_size_to_v1_tree_height_and_padding, v1_tree_height_to_unpadded_capacity,
    TreeSizeInfo, MAX_UNPADDED_SIZE, MIN_UNPADDED_SIZE,
};
use cid::Cid;
use common::prelude::*;
use unsigned_varint as varint;

/// A one byte padding varint, the height and the root.
pub const PIECE_PAYLOAD_MIN_SIZE: usize = 1 + 1 + COMMITMENT_SIZE;

/// Padding never reaches 2^63, so its varint is at most 9 bytes.
pub const PIECE_PAYLOAD_MAX_SIZE: usize = 9 + 1 + COMMITMENT_SIZE;

/// The digest of a [`FR32_SHA256_TRUNC254_PADDED_BINARY_TREE`] multihash.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PiecePayload {
    pub padding: u64,
    pub height: u8,
    pub digest: Commitment,
}

impl PiecePayload {
    pub fn new(digest: Commitment, unpadded_size: u64) -> Result<Self, CommCidError> {
        let TreeSizeInfo { height, padding } =
            unpadded_size_to_v1_tree_height_and_padding(unpadded_size)?;
        Ok(PiecePayload {
            padding,
            height,
            digest,
        })
    }

    /// The unpadded size, recomputed as the capacity of a tree of `height`
    /// minus `padding`. Sizes that [`PiecePayload::new`] would refuse are
    /// malformed here too.
    pub fn unpadded_size(&self) -> Result<u64, CommCidError> {
        let capacity = v1_tree_height_to_unpadded_capacity(self.height).ok_or_else(|| {
            CommCidError::malformed_digest(format!("invalid tree height {}", self.height))
        })?;

        let size = capacity.checked_sub(self.padding).ok_or_else(|| {
            CommCidError::malformed_digest(format!(
                "padding {} exceeds the {} bytes held by a tree of height {}",
                self.padding, capacity, self.height
            ))
        })?;

        if !(MIN_UNPADDED_SIZE..=MAX_UNPADDED_SIZE).contains(&size) {
            return Err(CommCidError::malformed_digest(format!(
                "unpadded size {} is outside {}..={}",
                size, MIN_UNPADDED_SIZE, MAX_UNPADDED_SIZE
            )));
        }
        Ok(size)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = varint::encode::u64_buffer();
        let padding = varint::encode::u64(self.padding, &mut buf);

        let mut bytes = Vec::with_capacity(padding.len() + 1 + COMMITMENT_SIZE);
        bytes.extend_from_slice(padding);
        bytes.push(self.height);
        bytes.extend_from_slice(&self.digest.0);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CommCidError> {
        let (padding, rest) = varint::decode::u64(bytes)
            .map_err(|e| CommCidError::malformed_digest(format!("tree padding: {}", e)))?;

        if rest.len() != 1 + COMMITMENT_SIZE {
            return Err(CommCidError::malformed_digest(format!(
                "expected {} bytes of tree height and root after the padding, got {}",
                1 + COMMITMENT_SIZE,
                rest.len()
            )));
        }

        Ok(PiecePayload {
            padding,
            height: rest[0],
            digest: Commitment::try_from(&rest[1..])?,
        })
    }
}

/// Builds a piece multihash CID from a piece commitment and the unpadded
/// size of the piece.
pub fn data_commitment_v1_to_piece_mh_cid(
    commitment: &[u8],
    unpadded_size: u64,
) -> Result<Cid, CommCidError> {
    let digest = Commitment::try_from(commitment)?;
    let payload = PiecePayload::new(digest, unpadded_size)?;

    let hash = Multihash64::wrap(FR32_SHA256_TRUNC254_PADDED_BINARY_TREE, &payload.to_bytes())
        .map_err(CommCidError::malformed_digest)?;
    Ok(Cid::new_v1(RAW, hash))
}

/// Extracts the piece commitment and unpadded size from a piece multihash
/// CID. Any CID codec is accepted; only the multihash is inspected.
pub fn piece_mh_cid_to_data_commitment_v1<I: Identifier + ?Sized>(
    cid: &I,
) -> Result<(Commitment, u64), CommCidError> {
    let bytes = cid.multihash_bytes();
    let hash = decode_digest(&bytes)?;
    if hash.code != FR32_SHA256_TRUNC254_PADDED_BINARY_TREE {
        return Err(CommCidError::IncorrectHash(hash.code));
    }

    let payload = PiecePayload::from_bytes(hash.digest)?;
    Ok((payload.digest, payload.unpadded_size()?))
}
