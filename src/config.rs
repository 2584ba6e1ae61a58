//! Filter configuration.
//!
//! Controls which files the organizer touches at all. The sorting scheme
//! itself (month folder, extension folder) is fixed; configuration only
//! carves files out of it. Rules are loaded from a TOML file:
//!
//! ```toml
//! [filters]
//! include_hidden = false
//!
//! [filters.exclude]
//! filenames = [".DS_Store", "Thumbs.db"]
//! patterns = ["*.part"]
//! extensions = ["tmp", "crdownload"]
//! regex = []
//!
//! [filters.include]
//! patterns = []
//! ```
//!
//! Lookup order: an explicitly passed path, then `.datetidyrc.toml` in the
//! current directory, then `~/.config/datetidy/config.toml`, then built-in
//! defaults (hidden files skipped, everything else organized).

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading or compiling filter rules.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// A glob pattern failed to compile.
    InvalidGlobPattern(String),
    /// A regex pattern failed to compile, with the compiler's reason.
    InvalidRegexPattern { pattern: String, reason: String },
    /// IO error while reading the configuration file.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration as deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub filters: FilterRules,
}

/// The filter rule set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRules {
    /// Whether dot-files are organized. Defaults to false (left in place).
    #[serde(default)]
    pub include_hidden: bool,

    /// Rules that exclude files from organization.
    #[serde(default)]
    pub exclude: ExcludeRules,

    /// Whitelist rules; a match here overrides every exclude rule.
    #[serde(default)]
    pub include: IncludeRules,
}

/// Rules excluding files from organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact file names (e.g. ".DS_Store").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns matched against the whole path.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Extensions, compared case-insensitively without the dot.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Regex patterns matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

/// Whitelist rules overriding the exclude rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncludeRules {
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl FilterConfig {
    /// Loads configuration, falling back through the lookup order to defaults.
    ///
    /// An explicitly provided path that cannot be read is an error; a missing
    /// implicit config file is not.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".datetidyrc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("datetidy")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compiles the rules into matcher structures, validating every pattern.
    pub fn compile(self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(self.filters)
    }
}

/// Pre-compiled filter rules ready for per-file matching.
pub struct CompiledFilters {
    include_hidden: bool,
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
    include_patterns: Vec<Pattern>,
}

impl CompiledFilters {
    fn new(rules: FilterRules) -> Result<Self, ConfigError> {
        let compile_globs = |patterns: &[String]| {
            patterns
                .iter()
                .map(|p| Pattern::new(p).map_err(|_| ConfigError::InvalidGlobPattern(p.clone())))
                .collect::<Result<Vec<_>, _>>()
        };

        let exclude_patterns = compile_globs(&rules.exclude.patterns)?;
        let include_patterns = compile_globs(&rules.include.patterns)?;

        let exclude_regexes = rules
            .exclude
            .regex
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: p.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            include_hidden: rules.include_hidden,
            exclude_filenames: rules.exclude.filenames.into_iter().collect(),
            exclude_extensions: rules
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            exclude_patterns,
            exclude_regexes,
            include_patterns,
        })
    }

    /// Decides whether a file is subject to organization.
    ///
    /// Whitelist patterns win over everything; then hidden-file, exact name,
    /// extension, glob, and regex excludes are applied in that order; the
    /// default is to include.
    pub fn should_include(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self
            .include_patterns
            .iter()
            .any(|pattern| pattern.matches_path(file_path))
        {
            return true;
        }

        if !self.include_hidden && file_name.starts_with('.') {
            return false;
        }

        if self.exclude_filenames.contains(file_name.as_ref()) {
            return false;
        }

        if let Some(ext) = file_path.extension() {
            let ext = ext.to_string_lossy().to_lowercase();
            if self.exclude_extensions.contains(&ext) {
                return false;
            }
        }

        if self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path(file_path))
        {
            return false;
        }

        if self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(&file_name))
        {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(rules: FilterRules) -> CompiledFilters {
        FilterConfig { filters: rules }
            .compile()
            .expect("rules compile")
    }

    #[test]
    fn test_default_config_skips_hidden_files() {
        let compiled = rules(FilterRules::default());
        assert!(!compiled.should_include(Path::new(".DS_Store")));
        assert!(compiled.should_include(Path::new("photo.jpg")));
    }

    #[test]
    fn test_hidden_files_included_when_enabled() {
        let compiled = rules(FilterRules {
            include_hidden: true,
            ..Default::default()
        });
        assert!(compiled.should_include(Path::new(".DS_Store")));
    }

    #[test]
    fn test_exclude_exact_filename() {
        let compiled = rules(FilterRules {
            exclude: ExcludeRules {
                filenames: vec!["Thumbs.db".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(!compiled.should_include(Path::new("Thumbs.db")));
        assert!(compiled.should_include(Path::new("image.jpg")));
    }

    #[test]
    fn test_exclude_extension_is_case_insensitive() {
        let compiled = rules(FilterRules {
            exclude: ExcludeRules {
                extensions: vec!["tmp".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(!compiled.should_include(Path::new("download.tmp")));
        assert!(!compiled.should_include(Path::new("download.TMP")));
        assert!(compiled.should_include(Path::new("download.txt")));
    }

    #[test]
    fn test_exclude_glob_pattern() {
        let compiled = rules(FilterRules {
            exclude: ExcludeRules {
                patterns: vec!["*.part".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(!compiled.should_include(Path::new("movie.part")));
        assert!(compiled.should_include(Path::new("movie.mkv")));
    }

    #[test]
    fn test_exclude_regex_matches_file_name() {
        let compiled = rules(FilterRules {
            exclude: ExcludeRules {
                regex: vec![r"^~\$".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(!compiled.should_include(Path::new("~$report.docx")));
        assert!(compiled.should_include(Path::new("report.docx")));
    }

    #[test]
    fn test_include_pattern_overrides_exclude() {
        let compiled = rules(FilterRules {
            include_hidden: false,
            include: IncludeRules {
                patterns: vec![".keepme".to_string()],
            },
            ..Default::default()
        });
        assert!(compiled.should_include(Path::new(".keepme")));
        assert!(!compiled.should_include(Path::new(".other")));
    }

    #[test]
    fn test_invalid_regex_is_a_compile_error() {
        let config = FilterConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    regex: vec!["[unclosed".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
        };
        assert!(config.compile().is_err());
    }

    #[test]
    fn test_invalid_glob_is_a_compile_error() {
        let config = FilterConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    patterns: vec!["[unclosed".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
        };
        assert!(config.compile().is_err());
    }

    #[test]
    fn test_parse_config_from_toml() {
        let config: FilterConfig = toml::from_str(
            r#"
            [filters]
            include_hidden = true

            [filters.exclude]
            extensions = ["tmp"]
            "#,
        )
        .expect("valid TOML parses");

        assert!(config.filters.include_hidden);
        assert_eq!(config.filters.exclude.extensions, vec!["tmp"]);
    }
}
