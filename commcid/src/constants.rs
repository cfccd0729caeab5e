//! Multicodec table entries used by Filecoin commitment CIDs.
//!
//! See <https://github.com/multiformats/multicodec/blob/master/table.csv>.

use common::prelude::impl_slog_value;
use std::fmt::{self, Display};
use std::str::FromStr;

/// CID codec for Filecoin piece or sector data commitment merkle roots (CommP & CommD).
pub const FIL_COMMITMENT_UNSEALED: u64 = 0xf101;

/// CID codec for Filecoin sealed and replicated sector commitments (CommR).
pub const FIL_COMMITMENT_SEALED: u64 = 0xf102;

/// CID codec for raw binary, used by piece multihash CIDs.
pub const RAW: u64 = 0x55;

/// The codec every CIDv0 implicitly carries.
pub const DAG_PB: u64 = 0x70;

/// SHA2-256 with the two most significant bits of the last byte zeroed
/// (a mask of 0b00111111), as used by Filecoin proving trees.
pub const SHA2_256_TRUNC254_PADDED: u64 = 0x1012;

/// Poseidon over BLS12-381 with arity 2 and Filecoin parameters.
pub const POSEIDON_BLS12_381_A1_FC1: u64 = 0xb401;

/// A SHA2-256-trunc254-padded binary tree over fr32 padded data. The digest
/// of this multihash embeds the tree padding and height in front of the root.
pub const FR32_SHA256_TRUNC254_PADDED_BINARY_TREE: u64 = 0x1011;

/// The three commitment flavours that have a v1 CID representation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CommitmentKind {
    /// CommD, the root of a sector's unsealed data tree.
    Data,
    /// CommP, the root of a single piece's data tree.
    Piece,
    /// CommR, the root of a sealed replica.
    Replica,
}

impl CommitmentKind {
    pub const ALL: [CommitmentKind; 3] = [
        CommitmentKind::Data,
        CommitmentKind::Piece,
        CommitmentKind::Replica,
    ];

    /// The CID codec this kind is wrapped with.
    pub const fn codec(self) -> u64 {
        match self {
            CommitmentKind::Data | CommitmentKind::Piece => FIL_COMMITMENT_UNSEALED,
            CommitmentKind::Replica => FIL_COMMITMENT_SEALED,
        }
    }

    /// The multihash code this kind's digest is tagged with.
    pub const fn hash(self) -> u64 {
        match self {
            CommitmentKind::Data | CommitmentKind::Piece => SHA2_256_TRUNC254_PADDED,
            CommitmentKind::Replica => POSEIDON_BLS12_381_A1_FC1,
        }
    }
}

impl Display for CommitmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommitmentKind::Data => "data",
            CommitmentKind::Piece => "piece",
            CommitmentKind::Replica => "replica",
        })
    }
}

impl_slog_value!(CommitmentKind);

impl FromStr for CommitmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data" | "commd" => Ok(CommitmentKind::Data),
            "piece" | "commp" => Ok(CommitmentKind::Piece),
            "replica" | "commr" => Ok(CommitmentKind::Replica),
            _ => Err(format!(
                "unknown commitment kind `{}`, expecting one of: data, piece, replica",
                s
            )),
        }
    }
}

/// Whether `hash` is the multihash that belongs with the Filecoin CID `codec`.
/// `None` when `codec` is not a Filecoin commitment codec at all.
pub(crate) fn hash_for_codec(codec: u64) -> Option<u64> {
    match codec {
        FIL_COMMITMENT_UNSEALED => Some(SHA2_256_TRUNC254_PADDED),
        FIL_COMMITMENT_SEALED => Some(POSEIDON_BLS12_381_A1_FC1),
        _ => None,
    }
}
