/*!
Diagnostics: log target names used throughout the crate (§7.1). There is no bundled log
implementation — callers wire up `env_logger` or any other `log`-compatible subscriber.
*/

pub mod targets;
