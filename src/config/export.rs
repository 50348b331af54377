//! Export configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Paper sizes offered for PDF export.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in millimetres.
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub page_size: PageSize,

    /// Margin on every side, in millimetres
    #[serde(default = "default_margin")]
    pub margin_mm: f32,
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let (width, height) = self.page_size.dimensions_mm();
        let max_margin = width.min(height) / 2.0;
        if !self.margin_mm.is_finite() || self.margin_mm <= 0.0 || self.margin_mm >= max_margin {
            return Err(ValidationError::InvalidMargin);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margin_mm: default_margin(),
        }
    }
}

fn default_margin() -> f32 {
    20.0
}
