use crate::args::LogArgs;
use dbx_logger::{Logger, LoggerError};

/// Installs the global subscriber described by `args`.
///
/// # Errors
/// Fails when a subscriber is already installed, the log directory cannot be created,
/// or every sink is disabled.
pub fn init(name: &str, args: &LogArgs) -> Result<Logger, LoggerError> {
    let builder = Logger::builder().name(name).level(args.log_level).console(args.log_format.into()).ansi(false);

    match &args.log_dir {
        Some(dir) => {
            let builder = builder.path(dir.clone()).max_files(args.log_max_files);
            if args.log_file_json { builder.json().init() } else { builder.init() }
        },
        None => builder.init(),
    }
}
