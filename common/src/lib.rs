pub mod logging;
pub mod prelude;

pub use hex;

use logging::LogConfig;
use prelude::*;
use structopt::StructOpt;

/// Handles common needs for command-line processes. Namely:
///   * Command-line parsing
///   * Initialization of loggers at the configured level
///   * Logging startup / the error that ends the process
///
/// The process exit status follows the returned result: any error is
/// logged here and handed back to `main` so that the exit code is non-zero.
pub fn main<Args>(run: impl FnOnce(Logger, Args) -> Result<()>) -> Result<()>
where
    Args: StructOpt + LogConfig,
{
    let args = Args::from_args();
    let logger = logging::create_logger_with_level(args.log_level());
    debug!(logger, "Starting");
    let result = run(logger.clone(), args);

    if let Err(e) = &result {
        error!(
            logger,
            "Process exiting";
            "error" => format!("{:#}", e),
        );
    }
    result
}
