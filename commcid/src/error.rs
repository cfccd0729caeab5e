use std::error::Error as StdError;
use std::fmt::{self, Display};

pub type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// Every way a commitment or CID can be rejected. All of them are permanent
/// input validation failures.
#[derive(Debug)]
pub enum CommCidError {
    /// A commitment was not exactly 32 bytes.
    InvalidLength(usize),
    /// The CID codec does not match the commitment kind.
    IncorrectCodec(u64),
    /// The multihash code does not match the commitment kind.
    IncorrectHash(u64),
    /// The multihash (or the piece payload inside it) is structurally broken.
    MalformedDigest(Cause),
    /// An unpadded size outside of what a v1 tree can describe.
    InvalidSize { size: u64, reason: &'static str },
    /// The CID container itself could not be read.
    MalformedCid(Cause),
}

impl CommCidError {
    pub(crate) fn malformed_digest(cause: impl Into<Cause>) -> Self {
        CommCidError::MalformedDigest(cause.into())
    }

    pub(crate) fn malformed_cid(cause: impl Into<Cause>) -> Self {
        CommCidError::MalformedCid(cause.into())
    }
}

impl Display for CommCidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CommCidError::*;

        match self {
            InvalidLength(len) => write!(f, "commitments must be 32 bytes long, got {}", len),
            IncorrectCodec(codec) => write!(f, "unexpected commitment codec 0x{:x}", codec),
            IncorrectHash(code) => write!(f, "incorrect hashing function for commitment 0x{:x}", code),
            MalformedDigest(e) => write!(f, "Error decoding data commitment hash: {}", e),
            InvalidSize { size, reason } => write!(f, "unsupported unpadded size {}: {}", size, reason),
            MalformedCid(e) => write!(f, "error decoding cid: {}", e),
        }
    }
}

impl StdError for CommCidError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CommCidError::MalformedDigest(e) | CommCidError::MalformedCid(e) => Some(&**e),
            _ => None,
        }
    }
}
