pub use anyhow::{anyhow, bail, ensure, Context as _, Error, Result};
pub use slog::{debug, error, info, trace, warn, Logger};
pub use std::convert::{TryFrom, TryInto};
pub type Bytes32 = [u8; 32];

pub use crate::impl_slog_value;

#[macro_export]
macro_rules! _bytes_wrapper {
    ($vis:vis $id:ident, $len:expr) => {
        #[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
        $vis struct $id(pub [u8; $len]);

        impl ::std::ops::Deref for $id {
            type Target = [u8; $len];
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::std::fmt::Debug for $id {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "0x{}", $crate::hex::encode(self.0))
            }
        }
    };
}

pub use crate::_bytes_wrapper as bytes_wrapper;
