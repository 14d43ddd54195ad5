//! Merge rules: defaults, override order.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("console.delimiter", "")?
        .set_default("console.output", "yaml")?
        .set_default("console.table_format", "default")?
        .set_default("console.graphics", true)?
        .set_default("console.column_width_max", 0)?
        .set_default("console.max_commands", 10_000)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
