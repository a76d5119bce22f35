use log::LevelFilter;

/// Install the plain stderr logger at `level`.
pub fn init_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    gesture_core::init_with_level(level)
}

/// Route `log` records at or above `level` into `tracing` and install the
/// fmt subscriber.
#[cfg(feature = "tracing")]
pub fn init_tracing_logging(level: LevelFilter, json: bool) -> Result<(), log::SetLoggerError> {
    tracing_log::LogTracer::init_with_filter(level)?;
    gesture_core::init_tracing(json);
    Ok(())
}
