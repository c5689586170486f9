//! CLI command implementations
//!
//! Each submodule implements a specific `desk` subcommand.

pub mod greeks;
pub mod hedge;
pub mod price;
pub mod stress;

use crate::{CliError, Result};

/// Output formats accepted by the reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Box-drawn table on stdout
    Table,
    /// Pretty-printed JSON on stdout
    Json,
}

impl OutputFormat {
    /// Parse a `--format` argument.
    pub fn parse(format: &str) -> Result<Self> {
        match format {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, table",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("table").unwrap(), OutputFormat::Table);

        let err = OutputFormat::parse("xml").unwrap_err();
        assert!(err.to_string().contains("Unknown format: xml"));
    }
}
