//! Output formatting for CLI.

mod json;
mod text;

pub use json::{CheckOutput, JsonFormatter, PublishOutput, SiteOutput, StatsOutput};
pub use text::TextFormatter;
#[cfg(test)]
mod tests;
