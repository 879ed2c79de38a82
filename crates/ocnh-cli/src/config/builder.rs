use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::SettingsArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use ocnh::engine::config::{ExtractionConfig, ExtractionConfigBuilder};

/// Resolves the extraction settings for one invocation.
///
/// Precedence, lowest first: built-in defaults, the TOML file given with
/// `--config`, `--set KEY=VALUE` overrides, then dedicated flags.
pub fn build_config(args: &SettingsArgs) -> Result<ExtractionConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let segmentation_file = file_config.segmentation.take().unwrap_or_default();
    let bond_threshold = args
        .bond_threshold
        .or(segmentation_file.bond_threshold)
        .unwrap_or(defaults.bond_threshold);

    let output_file = file_config.output.take().unwrap_or_default();
    let precision = args
        .precision
        .or(output_file.precision)
        .unwrap_or(defaults.precision);
    let delimiter = match (args.delimiter, output_file.delimiter.as_deref()) {
        (Some(c), _) => c,
        (None, Some(raw)) => parse_delimiter(raw)?,
        (None, None) => defaults.delimiter,
    };
    let include_chain_column = args.chain_column
        || output_file
            .include_chain_column
            .unwrap_or(defaults.include_chain_column);

    ExtractionConfigBuilder::new()
        .bond_threshold(bond_threshold)
        .precision(precision)
        .delimiter(delimiter)
        .include_chain_column(include_chain_column)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Accepts a literal single character, or `tab` / `\t` for a tab.
fn parse_delimiter(raw: &str) -> Result<char> {
    match raw {
        "tab" | "\\t" | "\t" => return Ok('\t'),
        _ => {}
    }
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CliError::Config(format!(
            "Invalid delimiter '{}'. Expected a single character or 'tab'.",
            raw
        ))),
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let (key, value_str) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "segmentation.bond-threshold" => {
                config
                    .segmentation
                    .get_or_insert_with(Default::default)
                    .bond_threshold = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?);
            }
            "output.precision" => {
                config.output.get_or_insert_with(Default::default).precision =
                    Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
            }
            "output.delimiter" => {
                config.output.get_or_insert_with(Default::default).delimiter =
                    Some(value_str.to_string());
            }
            "output.include-chain-column" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .include_chain_column = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str))
                })?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn build_config_uses_defaults_without_file_or_flags() {
        let cfg = build_config(&SettingsArgs::default()).expect("build ok");
        let defaults = DefaultsConfig::default();

        assert_eq!(cfg.segmentation.bond_threshold, defaults.bond_threshold);
        assert_eq!(cfg.output.precision, defaults.precision);
        assert_eq!(cfg.output.delimiter, b',');
        assert!(!cfg.output.include_chain_column);
    }

    #[test]
    fn build_config_reads_file_values() {
        let (_dir, path) = write_config(
            r#"
            [segmentation]
            bond-threshold = 2.1

            [output]
            precision = 2
            delimiter = "tab"
            include-chain-column = true
            "#,
        );
        let args = SettingsArgs {
            config: Some(path),
            ..Default::default()
        };

        let cfg = build_config(&args).expect("build ok");
        assert_eq!(cfg.segmentation.bond_threshold, 2.1);
        assert_eq!(cfg.output.precision, 2);
        assert_eq!(cfg.output.delimiter, b'\t');
        assert!(cfg.output.include_chain_column);
    }

    #[test]
    fn set_values_override_file_and_flags_override_both() {
        let (_dir, path) = write_config(
            r#"
            [segmentation]
            bond-threshold = 2.1
            [output]
            precision = 2
            "#,
        );
        let args = SettingsArgs {
            config: Some(path),
            precision: Some(6),
            set_values: vec![
                "segmentation.bond-threshold=1.9".to_string(),
                "output.precision=4".to_string(),
                "output.delimiter=;".to_string(),
            ],
            ..Default::default()
        };

        let cfg = build_config(&args).expect("build ok");
        assert!((cfg.segmentation.bond_threshold - 1.9).abs() < 1e-12);
        assert_eq!(cfg.output.precision, 6);
        assert_eq!(cfg.output.delimiter, b';');
    }

    #[test]
    fn chain_column_flag_wins_over_file() {
        let (_dir, path) = write_config("[output]\ninclude-chain-column = false\n");
        let args = SettingsArgs {
            config: Some(path),
            chain_column: true,
            ..Default::default()
        };
        assert!(build_config(&args).unwrap().output.include_chain_column);
    }

    #[test]
    fn unsupported_set_key_is_rejected() {
        let args = SettingsArgs {
            set_values: vec!["output.colour=red".to_string()],
            ..Default::default()
        };
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn malformed_set_value_is_rejected() {
        let args = SettingsArgs {
            set_values: vec!["output.precision=many".to_string()],
            ..Default::default()
        };
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn invalid_values_surface_core_validation() {
        let args = SettingsArgs {
            bond_threshold: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        let args = SettingsArgs {
            set_values: vec!["output.delimiter=ab".to_string()],
            ..Default::default()
        };
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }
}
