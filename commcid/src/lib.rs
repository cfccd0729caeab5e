//! Conversion between Filecoin commitments (32 byte merkle roots) and CIDs.
//!
//! Three v1 flavours wrap a commitment directly: [`CommitmentKind::Data`],
//! [`CommitmentKind::Piece`] and [`CommitmentKind::Replica`]. Piece
//! commitments additionally have a piece multihash CID (see [`piece`]) that
//! embeds the size of the piece, and [`convert`] moves between the two.
//!
//! Decoding functions take any [`Identifier`]: a [`cid::Cid`], or a
//! [`RawCid`] when broken multihashes should be reported as
//! [`CommCidError::MalformedDigest`] rather than rejected while parsing.

pub mod commitment;
pub mod constants;
pub mod convert;
pub mod error;
pub mod identifier;
pub mod piece;
pub mod tree;


pub use cid;
pub use commitment::*;
pub use constants::CommitmentKind;
pub use convert::*;
pub use error::CommCidError;
pub use identifier::{Identifier, RawCid};
pub use piece::*;
pub use tree::*;
