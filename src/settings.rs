//! User preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::tuning::Tuning;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles per simulation
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Birds in the background flock
    pub fn flock_population(&self) -> usize {
        match self {
            QualityPreset::Low => 60,
            QualityPreset::Medium => 150,
            QualityPreset::High => 300,
        }
    }

    /// Whether the lander draws its starfield
    pub fn starfield_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Site preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Exhaust, debris and word bursts
    pub particles: bool,
    /// Animated flock behind the page
    pub show_flock: bool,
    /// Freeze the background flock and skip bursts
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            show_flock: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    const STORAGE_KEY: &'static str = "portfolio_sims_settings";

    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles || self.reduced_motion {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Whether the flock loop should run at all
    pub fn flock_enabled(&self) -> bool {
        self.show_flock && !self.reduced_motion
    }

    /// Push quality-dependent limits into simulation tuning
    pub fn apply(&self, tuning: &mut Tuning) {
        let cap = self.max_particles();
        tuning.lander.max_particles = cap;
        tuning.siege.max_particles = cap;
        tuning.flock.population = self.quality.flock_population();
        if !self.quality.starfield_enabled() {
            tuning.lander.star_count = 0;
        }
    }

    pub fn load() -> Self {
        match persistence::load_json::<Settings>(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings ({} quality)", settings.quality.as_str());
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if persistence::save_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(QualityPreset::from_str("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::from_str("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_particle_cap_respects_toggles() {
        let mut settings = Settings::from_preset(QualityPreset::High);
        assert_eq!(settings.max_particles(), 2000);
        settings.reduced_motion = true;
        assert_eq!(settings.max_particles(), 0);
        assert!(!settings.flock_enabled());
        settings.reduced_motion = false;
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_apply_to_tuning() {
        let mut tuning = Tuning::default();
        Settings::from_preset(QualityPreset::Low).apply(&mut tuning);
        assert_eq!(tuning.flock.population, 60);
        assert_eq!(tuning.siege.max_particles, 100);
        assert_eq!(tuning.lander.max_particles, 100);
        assert_eq!(tuning.lander.star_count, 0);
    }

    #[test]
    fn test_save_load_round_trip() {
        let settings = Settings {
            quality: QualityPreset::High,
            show_flock: false,
            ..Default::default()
        };
        settings.save();
        assert_eq!(Settings::load(), settings);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"quality":"Low"}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.particles);
    }
}
