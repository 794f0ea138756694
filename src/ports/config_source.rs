//! Read-only configuration access port.
//!
//! A configuration is an ordered set of named sections plus one distinguished
//! default section. Every backend (local INI data or a remote config API)
//! implements the required capabilities; the typed accessors and fallback
//! handling are provided on top so both backends behave identically.

use crate::domain::envelope::Defaults;
use crate::domain::error::RestConfigError;
use crate::domain::value;

pub trait ConfigSource {
    /// Section names in declaration order, excluding the default section.
    fn sections(&self) -> Result<Vec<String>, RestConfigError>;

    fn default_section(&self) -> Result<String, RestConfigError>;

    /// True for the default section or any entry of [`ConfigSource::sections`].
    fn has_section(&self, name: &str) -> Result<bool, RestConfigError>;

    /// Option names of a section. Fails with `NoSuchSection` when absent.
    fn get_section(&self, name: &str) -> Result<Vec<String>, RestConfigError>;

    fn has_option(&self, section: &str, option: &str) -> Result<bool, RestConfigError>;

    /// Raw string value. Fails with `NoSuchSection` or `NoSuchOption` when absent.
    fn get_option(&self, section: &str, option: &str) -> Result<String, RestConfigError>;

    /// Options of the default section. Not merged into other sections.
    fn defaults(&self) -> Result<Defaults, RestConfigError>;

    /// Like [`ConfigSource::get_option`], but a missing section or option yields
    /// `fallback` when one is given. Other errors are never replaced.
    fn get(
        &self,
        section: &str,
        option: &str,
        fallback: Option<&str>,
    ) -> Result<String, RestConfigError> {
        with_fallback(self.get_option(section, option), fallback.map(str::to_string))
    }

    /// The fallback only applies when the option is absent. A present value
    /// that does not parse is a `Parse` error even if a fallback was given.
    fn get_int(
        &self,
        section: &str,
        option: &str,
        fallback: Option<i64>,
    ) -> Result<i64, RestConfigError> {
        match self.get_option(section, option) {
            Ok(raw) => value::parse_int(section, option, &raw),
            Err(e) => with_fallback(Err(e), fallback),
        }
    }

    fn get_float(
        &self,
        section: &str,
        option: &str,
        fallback: Option<f64>,
    ) -> Result<f64, RestConfigError> {
        match self.get_option(section, option) {
            Ok(raw) => value::parse_float(section, option, &raw),
            Err(e) => with_fallback(Err(e), fallback),
        }
    }

    fn get_bool(
        &self,
        section: &str,
        option: &str,
        fallback: Option<bool>,
    ) -> Result<bool, RestConfigError> {
        match self.get_option(section, option) {
            Ok(raw) => value::parse_bool(section, option, &raw),
            Err(e) => with_fallback(Err(e), fallback),
        }
    }

    /// Number of non-default sections.
    fn section_count(&self) -> Result<usize, RestConfigError> {
        Ok(self.sections()?.len())
    }

    /// Every non-default section paired with its option names.
    fn section_options(&self) -> Result<Vec<(String, Vec<String>)>, RestConfigError> {
        self.sections()?
            .into_iter()
            .map(|name| {
                let options = self.get_section(&name)?;
                Ok((name, options))
            })
            .collect()
    }
}

fn with_fallback<T>(
    result: Result<T, RestConfigError>,
    fallback: Option<T>,
) -> Result<T, RestConfigError> {
    match (result, fallback) {
        (Err(e), Some(fallback)) if e.is_not_found() => Ok(fallback),
        (result, _) => result,
    }
}
