use crate::prelude::*;
use slog::{o, Drain, Level};
use slog_async::Async;
use slog_term::{FullFormat, TermDecorator};

/// Configuration that knows which log records should be kept.
pub trait LogConfig {
    fn log_level(&self) -> Level {
        Level::Info
    }
}

pub fn create_logger() -> Logger {
    create_logger_with_level(Level::Info)
}

/// Logs go to stderr so that stdout stays reserved for command output.
pub fn create_logger_with_level(level: Level) -> Logger {
    let decorator = TermDecorator::new().stderr().build();
    let drain = FullFormat::new(decorator).build().fuse();
    let drain = Async::new(drain).build().filter_level(level).fuse();

    slog::Logger::root(drain, o!())
}

pub fn parse_level(s: &str) -> Result<Level> {
    s.parse::<Level>()
        .map_err(|()| anyhow!("unknown log level `{}`", s))
}

#[macro_export]
macro_rules! impl_slog_value {
    ($T:ty) => {
        $crate::impl_slog_value!($T, "{}");
    };
    ($T:ty, $fmt:expr) => {
        impl ::slog::Value for $T {
            fn serialize(
                &self,
                record: &::slog::Record,
                key: ::slog::Key,
                serializer: &mut dyn ::slog::Serializer,
            ) -> ::slog::Result {
                ::slog::Value::serialize(&format!($fmt, self), record, key, serializer)
            }
        }
    };
}
