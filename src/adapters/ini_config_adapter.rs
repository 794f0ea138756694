//! In-memory configuration adapter over a parsed INI document.
//!
//! Wraps a `configparser` [`Ini`] and forwards each lookup to it. Section and
//! option names are case-sensitive and keep their declaration order. Options
//! of the default section are only reachable through the default section
//! itself and [`ConfigSource::defaults`]; they are not inherited by others.

use crate::domain::envelope::Defaults;
use crate::domain::error::RestConfigError;
use crate::ports::config_source::ConfigSource;
use configparser::ini::{Ini, IniDefault};
use std::path::Path;

pub const DEFAULT_SECTION: &str = "DEFAULT";

pub struct IniConfigAdapter {
    config: Ini,
    default_section: String,
}

impl IniConfigAdapter {
    /// Empty configuration with a `DEFAULT` default section.
    ///
    /// Values are kept verbatim: `#` and `;` only start a comment at the
    /// beginning of a line, and indented lines continue the previous value.
    pub fn new() -> Self {
        let mut defaults = IniDefault::default();
        defaults.case_sensitive = true;
        defaults.enable_inline_comments = false;
        defaults.multiline = true;
        defaults.default_section = DEFAULT_SECTION.to_string();
        Self::from_ini(Ini::new_from_defaults(defaults))
    }

    /// Adopt an existing parser. Its own default section name is kept.
    pub fn from_ini(config: Ini) -> Self {
        let default_section = config.defaults().default_section;
        Self {
            config,
            default_section,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RestConfigError> {
        let path = path.as_ref();
        let mut adapter = Self::new();
        adapter
            .config
            .load(path)
            .map_err(|reason| RestConfigError::ConfigLoad {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(adapter)
    }

    pub fn from_string(content: &str) -> Result<Self, RestConfigError> {
        let mut adapter = Self::new();
        adapter
            .config
            .read(content.to_string())
            .map_err(|reason| RestConfigError::ConfigLoad {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(adapter)
    }

    /// Declare a section with no options. Existing sections are left untouched.
    pub fn add_section(&mut self, name: &str) {
        self.config
            .get_mut_map()
            .entry(name.to_string())
            .or_default();
    }

    pub fn set(&mut self, section: &str, option: &str, value: &str) {
        self.config.set(section, option, Some(value.to_string()));
    }

    /// Entries of a section as `(option, value)`. Options declared without a
    /// value read as an empty string.
    fn entries(&self, section: &str) -> Option<Vec<(&str, &str)>> {
        match self.config.get_map_ref().get(section) {
            Some(options) => Some(
                options
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_deref().unwrap_or("")))
                    .collect(),
            ),
            None if section == self.default_section => Some(Vec::new()),
            None => None,
        }
    }
}

impl Default for IniConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for IniConfigAdapter {
    fn sections(&self) -> Result<Vec<String>, RestConfigError> {
        Ok(self
            .config
            .get_map_ref()
            .keys()
            .filter(|name| **name != self.default_section)
            .cloned()
            .collect())
    }

    fn default_section(&self) -> Result<String, RestConfigError> {
        Ok(self.default_section.clone())
    }

    fn has_section(&self, name: &str) -> Result<bool, RestConfigError> {
        Ok(name == self.default_section || self.config.get_map_ref().contains_key(name))
    }

    fn get_section(&self, name: &str) -> Result<Vec<String>, RestConfigError> {
        let entries = self.entries(name).ok_or_else(|| RestConfigError::NoSuchSection {
            section: name.to_string(),
        })?;
        Ok(entries.into_iter().map(|(k, _)| k.to_string()).collect())
    }

    fn has_option(&self, section: &str, option: &str) -> Result<bool, RestConfigError> {
        Ok(self
            .entries(section)
            .is_some_and(|entries| entries.iter().any(|(k, _)| *k == option)))
    }

    fn get_option(&self, section: &str, option: &str) -> Result<String, RestConfigError> {
        let entries = self
            .entries(section)
            .ok_or_else(|| RestConfigError::NoSuchSection {
                section: section.to_string(),
            })?;
        entries
            .into_iter()
            .find(|(k, _)| *k == option)
            .map(|(_, v)| v.to_string())
            .ok_or_else(|| RestConfigError::NoSuchOption {
                section: section.to_string(),
                option: option.to_string(),
            })
    }

    fn defaults(&self) -> Result<Defaults, RestConfigError> {
        Ok(self
            .entries(&self.default_section)
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const SAMPLE: &str = r#"
[DEFAULT]
timeout = 30

[database]
conninfo = host=localhost dbname=test

[Strategy]
name = Test Strategy
max_positions = 5
"#;

    fn test_section_adapter() -> IniConfigAdapter {
        let mut adapter = IniConfigAdapter::new();
        adapter.add_section("TEST");
        adapter.set("TEST", "val1", "42");
        adapter
    }

    #[test]
    fn from_string_parses_config() {
        let adapter = IniConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_option("database", "conninfo").unwrap(),
            "host=localhost dbname=test"
        );
        assert_eq!(adapter.get_option("Strategy", "name").unwrap(), "Test Strategy");
    }

    #[test]
    fn comment_symbols_inside_values_are_kept() {
        let adapter = IniConfigAdapter::from_string(
            "[TEST]\n# full-line comment\ncolor = #fff\nurl = http://host/#frag\nsql = a;b\n",
        )
        .unwrap();
        assert_eq!(adapter.get_option("TEST", "color").unwrap(), "#fff");
        assert_eq!(adapter.get_option("TEST", "url").unwrap(), "http://host/#frag");
        assert_eq!(adapter.get_option("TEST", "sql").unwrap(), "a;b");
        assert_eq!(adapter.get_section("TEST").unwrap(), vec!["color", "url", "sql"]);
    }

    #[test]
    fn indented_lines_continue_the_value() {
        let adapter =
            IniConfigAdapter::from_string("[TEST]\nmulti = line1\n    line2\nnext = 1\n").unwrap();
        assert_eq!(adapter.get_option("TEST", "multi").unwrap(), "line1\nline2");
        assert_eq!(adapter.get_section("TEST").unwrap(), vec!["multi", "next"]);
    }

    #[test]
    fn defaults_keep_declaration_order() {
        let adapter =
            IniConfigAdapter::from_string("[DEFAULT]\nzeta = 1\nalpha = 2\nmid = 3\n").unwrap();
        let keys: Vec<String> = adapter.defaults().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn sections_keep_order_and_exclude_default() {
        let adapter = IniConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.sections().unwrap(), vec!["database", "Strategy"]);
        assert_eq!(adapter.default_section().unwrap(), "DEFAULT");
    }

    #[test]
    fn names_are_case_sensitive() {
        let adapter = IniConfigAdapter::from_string(SAMPLE).unwrap();
        assert!(adapter.has_section("Strategy").unwrap());
        assert!(!adapter.has_section("strategy").unwrap());
        assert!(adapter.has_option("Strategy", "max_positions").unwrap());
        assert!(!adapter.has_option("Strategy", "MAX_POSITIONS").unwrap());
    }

    #[test]
    fn default_section_always_exists() {
        let adapter = test_section_adapter();
        assert!(adapter.has_section("DEFAULT").unwrap());
        assert!(adapter.get_section("DEFAULT").unwrap().is_empty());
        assert!(adapter.defaults().unwrap().is_empty());
        assert!(matches!(
            adapter.get_option("DEFAULT", "timeout"),
            Err(RestConfigError::NoSuchOption { .. })
        ));
    }

    #[test]
    fn defaults_are_not_merged_into_sections() {
        let adapter = IniConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.defaults().unwrap().get("timeout").unwrap(), "30");
        assert_eq!(adapter.get_option("DEFAULT", "timeout").unwrap(), "30");
        assert!(!adapter.has_option("database", "timeout").unwrap());
        assert!(matches!(
            adapter.get_option("database", "timeout"),
            Err(RestConfigError::NoSuchOption { .. })
        ));
        assert_eq!(adapter.get_section("database").unwrap(), vec!["conninfo"]);
    }

    #[test]
    fn test_section_scenario() {
        let adapter = test_section_adapter();
        assert_eq!(adapter.get_option("TEST", "val1").unwrap(), "42");
        assert_eq!(adapter.get_int("TEST", "val1", None).unwrap(), 42);
        assert_eq!(adapter.get("TEST", "missing", Some("x")).unwrap(), "x");
        assert!(matches!(
            adapter.get_option("NOPE", "val1"),
            Err(RestConfigError::NoSuchSection { .. })
        ));
        assert!(matches!(
            adapter.get_section("NOPE"),
            Err(RestConfigError::NoSuchSection { .. })
        ));
    }

    #[test]
    fn add_section_keeps_existing_options() {
        let mut adapter = test_section_adapter();
        adapter.add_section("TEST");
        adapter.add_section("EMPTY");
        assert_eq!(adapter.get_section("TEST").unwrap(), vec!["val1"]);
        assert!(adapter.get_section("EMPTY").unwrap().is_empty());
        assert_eq!(adapter.sections().unwrap(), vec!["TEST", "EMPTY"]);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[report]\ntemplate_path = /path/to/template.typ\n");
        let adapter = IniConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_option("report", "template_path").unwrap(),
            "/path/to/template.typ"
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = IniConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(matches!(result, Err(RestConfigError::ConfigLoad { .. })));
    }

    proptest! {
        #[test]
        fn has_section_matches_sections_or_default(
            names in proptest::collection::vec("[A-Za-z]{1,8}", 0..6),
            candidate in "[A-Za-z]{1,8}",
        ) {
            let mut adapter = IniConfigAdapter::new();
            for name in &names {
                adapter.add_section(name);
            }
            let listed = adapter.sections().unwrap();
            let expected =
                listed.contains(&candidate) || candidate == adapter.default_section().unwrap();
            prop_assert_eq!(adapter.has_section(&candidate).unwrap(), expected);
        }

        #[test]
        fn values_round_trip_verbatim(value in "[ -~]{0,40}") {
            let mut adapter = IniConfigAdapter::new();
            adapter.set("S", "opt", &value);
            prop_assert_eq!(adapter.get_option("S", "opt").unwrap(), value);
        }
    }
}
