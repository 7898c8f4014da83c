use serde::Deserialize;

use crate::{
    error::{Result, RingError},
    ring::{DEFAULT_BASE, SCALE_BASE},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    pub base: u8,
    pub scale_base: u8,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            scale_base: SCALE_BASE,
        }
    }
}

impl RingConfig {
    pub fn base(self, base: u8) -> Self {
        Self { base, ..self }
    }

    pub fn scale_base(self, scale_base: u8) -> Self {
        Self { scale_base, ..self }
    }

    /// Missing keys fall back to the defaults.
    pub fn from_toml(str: &str) -> Result<Self> {
        let config: Self = toml::from_str(str)?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self> {
        for base in [self.base, self.scale_base] {
            if base < 2 {
                return Err(RingError::InvalidBase(base));
            }
        }
        Ok(self)
    }
}
