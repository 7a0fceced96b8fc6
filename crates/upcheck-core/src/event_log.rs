use std::fmt;
use std::sync::Arc;

use log::{Level, Log, Metadata, Record};

const TARGET: &str = "upcheck_core::checker";

/// Logging capability handed to the checker instead of reaching for the
/// process-wide logger directly.
#[derive(Clone)]
pub struct EventLog {
    sink: Arc<dyn Log>,
}

impl EventLog {
    #[must_use]
    pub fn new(sink: Arc<dyn Log>) -> Self {
        Self { sink }
    }

    /// Forward to whatever logger the `log` facade has installed.
    #[must_use]
    pub fn global() -> Self {
        Self::new(Arc::new(GlobalLogger))
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let metadata = Metadata::builder().level(level).target(TARGET).build();
        if !self.sink.enabled(&metadata) {
            return;
        }
        self.sink
            .log(&Record::builder().metadata(metadata).args(args).build());
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog").finish_non_exhaustive()
    }
}

struct GlobalLogger;

impl Log for GlobalLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level() && log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        log::logger().log(record);
    }

    fn flush(&self) {
        log::logger().flush();
    }
}
