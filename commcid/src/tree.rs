//! Height and padding of the binary merkle trees behind v1 commitments.
//!
//! Leaves are 32 byte nodes of fr32 padded data: every 127 bytes of user
//! data expand to 128 bytes (254 bits out of every 256). A tree of height
//! `h` therefore holds `32 * 2^h` padded bytes, or `127 * 2^(h - 2)`
//! unpadded bytes.

use crate::error::CommCidError;

/// Size of a merkle tree leaf.
pub const NODE_SIZE: u64 = 32;

/// Smallest unpadded size a tree height and padding are derived for.
pub const MIN_UNPADDED_SIZE: u64 = 127;

/// Largest unpadded size whose fr32 padded size still fits in 64 bits.
pub const MAX_UNPADDED_SIZE: u64 = u64::MAX / 128;

/// Height and trailing padding of the tree an unpadded size is stored in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TreeSizeInfo {
    pub height: u8,
    /// Unpadded bytes between the end of the data and the tree capacity.
    pub padding: u64,
}

/// Smallest height whose tree holds `padded_size` bytes. Sizes up to a
/// single leaf have height 0.
fn height_of_padded(padded_size: u128) -> u8 {
    if padded_size <= u128::from(NODE_SIZE) {
        return 0;
    }
    let leaves_minus_one = (padded_size - 1) / u128::from(NODE_SIZE);
    (128 - leaves_minus_one.leading_zeros()) as u8
}

/// Tree height for data that is already fr32 padded.
pub fn fr32_padded_size_to_v1_tree_height(size: u64) -> u8 {
    height_of_padded(u128::from(size))
}

/// Tree height for unpadded data, accounting for the 128/127 fr32 expansion.
pub fn unpadded_size_to_v1_tree_height(size: u64) -> u8 {
    let padded = (u128::from(size) * 128 + 126) / 127;
    height_of_padded(padded)
}

/// Unpadded bytes that fit in a tree of `height`. Only defined from height 2,
/// the first height that holds a whole 127 byte unit, and `None` once the
/// capacity no longer fits in 64 bits.
pub fn v1_tree_height_to_unpadded_capacity(height: u8) -> Option<u64> {
    let units = 1u64.checked_shl(u32::from(height.checked_sub(2)?))?;
    units.checked_mul(MIN_UNPADDED_SIZE)
}

/// Tree height and trailing padding for `size` unpadded bytes.
pub fn unpadded_size_to_v1_tree_height_and_padding(
    size: u64,
) -> Result<TreeSizeInfo, CommCidError> {
    if size < MIN_UNPADDED_SIZE {
        return Err(CommCidError::InvalidSize {
            size,
            reason: "a data size less than 127 bytes is not supported",
        });
    }
    if size > MAX_UNPADDED_SIZE {
        return Err(CommCidError::InvalidSize {
            size,
            reason: "too big",
        });
    }

    let height = unpadded_size_to_v1_tree_height(size);
    let capacity =
        v1_tree_height_to_unpadded_capacity(height).ok_or(CommCidError::InvalidSize {
            size,
            reason: "tree capacity does not fit in 64 bits",
        })?;

    Ok(TreeSizeInfo {
        height,
        padding: capacity - size,
    })
}
