//! Logger installation for the `wayfarer` binary.

use std::io::Write;

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

use crate::CliError;

/// Install a stderr logger at `level`. `RUST_LOG` directives, when set,
/// refine the filter per module.
pub(crate) fn init_logger(level: LevelFilter) -> Result<(), CliError> {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .write_style(WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        });
    builder.try_init().map_err(CliError::InitLogging)
}
