//! Saturation and brightness classification of a target color

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{saturation, Rgb};
use crate::config::{RecipeConfig, SaturationThresholds};

/// Which solver branch produced a weight vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaturationClass {
    Grayscale,
    LowSaturation,
    MediumSaturation,
    HighSaturation,
}

impl SaturationClass {
    /// Classify a raw `(max - min) / max` saturation
    pub fn from_saturation(value: f64, thresholds: &SaturationThresholds) -> Self {
        if value < thresholds.grayscale {
            SaturationClass::Grayscale
        } else if value < thresholds.low {
            SaturationClass::LowSaturation
        } else if value < thresholds.medium {
            SaturationClass::MediumSaturation
        } else {
            SaturationClass::HighSaturation
        }
    }

    pub fn classify(rgb: Rgb, thresholds: &SaturationThresholds) -> Self {
        Self::from_saturation(saturation(rgb), thresholds)
    }

    pub fn tag(self) -> &'static str {
        match self {
            SaturationClass::Grayscale => "grayscale",
            SaturationClass::LowSaturation => "low-saturation",
            SaturationClass::MediumSaturation => "medium-saturation",
            SaturationClass::HighSaturation => "high-saturation",
        }
    }

    /// Whether this branch runs gradient descent
    pub fn is_optimized(self) -> bool {
        matches!(
            self,
            SaturationClass::MediumSaturation | SaturationClass::HighSaturation
        )
    }
}

impl fmt::Display for SaturationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Brightness band that decides how a recipe is narrated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrightnessRegime {
    HighBrightness,
    MidBrightness,
    LowBrightness,
}

impl BrightnessRegime {
    /// Regime of an HSB brightness in percent
    pub fn from_brightness(brightness: f64, config: &RecipeConfig) -> Self {
        if brightness > config.high_brightness {
            BrightnessRegime::HighBrightness
        } else if brightness > config.low_brightness {
            BrightnessRegime::MidBrightness
        } else {
            BrightnessRegime::LowBrightness
        }
    }

    /// Regime of a grayscale target: only high or low
    pub fn for_grayscale(brightness: f64, config: &RecipeConfig) -> Self {
        if brightness > config.grayscale_split {
            BrightnessRegime::HighBrightness
        } else {
            BrightnessRegime::LowBrightness
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            BrightnessRegime::HighBrightness => "high-brightness",
            BrightnessRegime::MidBrightness => "mid-brightness",
            BrightnessRegime::LowBrightness => "low-brightness",
        }
    }
}

impl fmt::Display for BrightnessRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Solver branch and narration regime of one solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolveStrategy {
    pub saturation: SaturationClass,
    pub brightness: BrightnessRegime,
}

impl SolveStrategy {
    pub fn new(saturation: SaturationClass, brightness: BrightnessRegime) -> Self {
        Self {
            saturation,
            brightness,
        }
    }
}

impl fmt::Display for SolveStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.saturation, self.brightness)
    }
}
