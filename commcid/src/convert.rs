use crate::commitment::{cid_to_data_commitment_v1, data_commitment_v1_to_cid};
use crate::error::CommCidError;
use crate::identifier::Identifier;
use crate::piece::{data_commitment_v1_to_piece_mh_cid, piece_mh_cid_to_data_commitment_v1};
use cid::Cid;

/// v1 piece commitment CID + unpadded size -> piece multihash CID.
pub fn convert_v1_cid_to_piece_mh_cid<I: Identifier + ?Sized>(
    cid: &I,
    unpadded_size: u64,
) -> Result<Cid, CommCidError> {
    let commitment = cid_to_data_commitment_v1(cid)?;
    data_commitment_v1_to_piece_mh_cid(&commitment, unpadded_size)
}

/// Piece multihash CID -> v1 piece commitment CID + unpadded size.
pub fn convert_piece_mh_cid_to_v1_cid<I: Identifier + ?Sized>(
    cid: &I,
) -> Result<(Cid, u64), CommCidError> {
    let (commitment, unpadded_size) = piece_mh_cid_to_data_commitment_v1(cid)?;
    let cid = data_commitment_v1_to_cid(&commitment.0)?;
    Ok((cid, unpadded_size))
}
