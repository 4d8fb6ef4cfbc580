//! Comfort and accessibility toggles. Session-scoped, never persisted.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub high_contrast: bool,
    pub show_visual_cues: bool,
    pub muted: bool,
    pub manual_pacing: bool,
    pub colorblind_mode: bool,
}

impl Settings {
    /// Startup settings: visual cues on, everything else off.
    pub fn initial() -> Self {
        Self {
            show_visual_cues: true,
            ..Self::default()
        }
    }

    pub fn get(&self, toggle: SettingToggle) -> bool {
        match toggle {
            SettingToggle::HighContrast => self.high_contrast,
            SettingToggle::VisualCues => self.show_visual_cues,
            SettingToggle::Mute => self.muted,
            SettingToggle::ManualPacing => self.manual_pacing,
            SettingToggle::ColorblindMode => self.colorblind_mode,
        }
    }

    /// Flip one toggle and return its new value.
    pub fn toggle(&mut self, toggle: SettingToggle) -> bool {
        let slot = match toggle {
            SettingToggle::HighContrast => &mut self.high_contrast,
            SettingToggle::VisualCues => &mut self.show_visual_cues,
            SettingToggle::Mute => &mut self.muted,
            SettingToggle::ManualPacing => &mut self.manual_pacing,
            SettingToggle::ColorblindMode => &mut self.colorblind_mode,
        };
        *slot = !*slot;
        *slot
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingToggle {
    HighContrast,
    VisualCues,
    Mute,
    ManualPacing,
    ColorblindMode,
}

impl SettingToggle {
    pub const ALL: [SettingToggle; 5] = [
        SettingToggle::Mute,
        SettingToggle::ManualPacing,
        SettingToggle::VisualCues,
        SettingToggle::HighContrast,
        SettingToggle::ColorblindMode,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SettingToggle::HighContrast => "high_contrast",
            SettingToggle::VisualCues => "visual_cues",
            SettingToggle::Mute => "mute",
            SettingToggle::ManualPacing => "manual_pacing",
            SettingToggle::ColorblindMode => "colorblind_mode",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }
}
