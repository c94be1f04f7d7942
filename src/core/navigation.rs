use crate::utils::error::{Result, SofiaError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    CvPointConverter,
    StarFramework,
    JdCompatibility,
}

impl Tab {
    pub fn name(&self) -> &'static str {
        match self {
            Tab::CvPointConverter => "CV Point Converter",
            Tab::StarFramework => "STAR Framework",
            Tab::JdCompatibility => "JD Compatibility",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tab::CvPointConverter => {
                "Transform your sustainability experience for different domains"
            }
            Tab::StarFramework => "Transform your CV points into the STAR format automatically",
            Tab::JdCompatibility => {
                "Find out how relevant your CV is for a given job description"
            }
        }
    }

    /// JD Compatibility has no backend yet.
    pub fn is_available(&self) -> bool {
        !matches!(self, Tab::JdCompatibility)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sub-tabs of the CV Point Converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConverterMode {
    #[default]
    Single,
    Bulk,
}

impl ConverterMode {
    pub const ALL: [ConverterMode; 2] = [ConverterMode::Single, ConverterMode::Bulk];

    pub fn name(&self) -> &'static str {
        match self {
            ConverterMode::Single => "Single Translation",
            ConverterMode::Bulk => "Bulk Translation",
        }
    }
}

/// Ordered tab list plus the active tab, handed to whatever renders the
/// sidebar and the tab content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    tabs: Vec<Tab>,
    active: Tab,
    converter_mode: ConverterMode,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            tabs: vec![Tab::CvPointConverter, Tab::StarFramework, Tab::JdCompatibility],
            active: Tab::CvPointConverter,
            converter_mode: ConverterMode::default(),
        }
    }
}

impl Navigation {
    pub fn new(tabs: Vec<Tab>) -> Result<Self> {
        let active = *tabs.first().ok_or_else(|| SofiaError::ConfigError {
            message: "navigation needs at least one tab".to_string(),
        })?;
        Ok(Self {
            tabs,
            active,
            converter_mode: ConverterMode::default(),
        })
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn select(&mut self, tab: Tab) -> Result<()> {
        if !self.tabs.contains(&tab) {
            return Err(SofiaError::TabUnavailable {
                tab: tab.name().to_string(),
            });
        }
        self.active = tab;
        Ok(())
    }

    pub fn converter_mode(&self) -> ConverterMode {
        self.converter_mode
    }

    /// Switching modes keeps the active tab; each mode keeps its own form.
    pub fn select_converter_mode(&mut self, mode: ConverterMode) {
        self.converter_mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_navigation_order() {
        let nav = Navigation::default();
        let names: Vec<&str> = nav.tabs().iter().map(Tab::name).collect();

        assert_eq!(
            names,
            vec!["CV Point Converter", "STAR Framework", "JD Compatibility"]
        );
        assert_eq!(nav.active(), Tab::CvPointConverter);
        assert_eq!(ConverterMode::default(), ConverterMode::Single);
    }

    #[test]
    fn test_select_only_configured_tabs() {
        let mut nav = Navigation::new(vec![Tab::StarFramework]).unwrap();
        assert_eq!(nav.active(), Tab::StarFramework);
        assert!(nav.select(Tab::CvPointConverter).is_err());

        let mut nav = Navigation::default();
        nav.select(Tab::JdCompatibility).unwrap();
        assert!(!nav.active().is_available());
        assert!(Navigation::new(vec![]).is_err());
    }

    #[test]
    fn test_converter_mode_switch() {
        let mut nav = Navigation::default();
        assert_eq!(nav.converter_mode(), ConverterMode::Single);

        nav.select_converter_mode(ConverterMode::Bulk);
        assert_eq!(nav.converter_mode(), ConverterMode::Bulk);
        assert_eq!(nav.active(), Tab::CvPointConverter);
        assert_eq!(ConverterMode::Bulk.name(), "Bulk Translation");
    }
}
