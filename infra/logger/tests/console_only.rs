use dbx_logger::{ConsoleFormat, LevelFilter, Logger, LoggerError};

#[test]
fn console_logger_installs_once() {
    let logger = Logger::builder()
        .name("dbx-console")
        .console(ConsoleFormat::Compact)
        .ansi(false)
        .level(LevelFilter::INFO)
        .init()
        .expect("logger should initialize");

    assert!(logger.guard().is_none(), "console-only logger should not create a file guard");

    let err = Logger::builder()
        .name("dbx-console-second")
        .init()
        .expect_err("second init should fail");
    assert!(matches!(err, LoggerError::Subscriber { .. }), "unexpected error: {err}");
}
