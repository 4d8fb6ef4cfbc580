//! Accessibility presenter.
//!
//! A pure mapping from settings and game state to presentation directives. Identical
//! inputs always yield identical output, so directives can be snapshot-tested and the
//! host page can diff them freely.

use serde::Serialize;

use crate::catalog::{Category, Item};
use crate::game::{Feedback, Phase};
use crate::round::Round;
use crate::settings::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn for_settings(settings: &Settings) -> Self {
        if settings.high_contrast {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn page(self) -> &'static str {
        match self {
            Theme::Light => "bg-gray-100 text-gray-800",
            Theme::Dark => "bg-black text-white",
        }
    }

    pub fn panel(self) -> &'static str {
        match self {
            Theme::Light => "bg-white",
            Theme::Dark => "bg-gray-800",
        }
    }

    /// Tile background; the dark theme drops per-item pastels.
    pub fn choice_background(self, item: &Item) -> &'static str {
        match self {
            Theme::Light => item.background_token,
            Theme::Dark => "bg-gray-700",
        }
    }

    pub fn focus_ring(self) -> &'static str {
        match self {
            Theme::Light => "focus:ring-current",
            Theme::Dark => "focus:ring-yellow-400",
        }
    }
}

/// Border coding that does not rely on color perception.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderPattern {
    Solid,
    Dashed,
    Dotted,
    Double,
}

pub const BORDER_PATTERNS: [BorderPattern; 4] = [
    BorderPattern::Solid,
    BorderPattern::Dashed,
    BorderPattern::Dotted,
    BorderPattern::Double,
];

impl BorderPattern {
    /// Pattern for a catalog index; cycles when a category outgrows the pattern set.
    pub fn for_index(index: usize) -> Self {
        BORDER_PATTERNS[index % BORDER_PATTERNS.len()]
    }

    pub fn class(self) -> &'static str {
        match self {
            BorderPattern::Solid => "border-solid border-4",
            BorderPattern::Dashed => "border-dashed border-4",
            BorderPattern::Dotted => "border-dotted border-4",
            BorderPattern::Double => "border-double border-4",
        }
    }
}

/// Border for `item_id` in colorblind mode, keyed by its stable index in `category`.
pub fn border_style_for(
    settings: &Settings,
    category: &Category,
    item_id: &str,
) -> Option<BorderPattern> {
    if !settings.colorblind_mode {
        return None;
    }
    category.index_of(item_id).map(BorderPattern::for_index)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VisualCue {
    pub render_key: &'static str,
    pub color_token: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChoiceDirective {
    pub item_id: &'static str,
    pub label: &'static str,
    pub render_key: &'static str,
    pub color_token: &'static str,
    pub background_token: &'static str,
    pub border: Option<BorderPattern>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PresentationDirectives {
    pub theme: Theme,
    pub page_class: &'static str,
    pub panel_class: &'static str,
    pub focus_ring: &'static str,
    pub visual_cue: Option<VisualCue>,
    pub choices: Vec<ChoiceDirective>,
    pub cue_button_enabled: bool,
    pub choices_enabled: bool,
    pub show_next_round: bool,
    pub feedback: Option<Feedback>,
}

pub fn present(
    settings: &Settings,
    category: &Category,
    round: Option<&Round>,
    phase: Phase,
    cue_active: bool,
    feedback: Option<&Feedback>,
) -> PresentationDirectives {
    let theme = Theme::for_settings(settings);
    let playing = phase == Phase::Playing;

    let visual_cue = round
        .filter(|_| settings.show_visual_cues && playing && cue_active)
        .map(|round| VisualCue {
            render_key: round.target().render_key,
            color_token: round.target().color_token,
        });

    let choices = round
        .map(|round| {
            round
                .choices()
                .iter()
                .map(|item| ChoiceDirective {
                    item_id: item.id,
                    label: item.display_name,
                    render_key: item.render_key,
                    color_token: item.color_token,
                    background_token: theme.choice_background(item),
                    border: border_style_for(settings, category, item.id),
                })
                .collect()
        })
        .unwrap_or_default();

    PresentationDirectives {
        theme,
        page_class: theme.page(),
        panel_class: theme.panel(),
        focus_ring: theme.focus_ring(),
        visual_cue,
        choices,
        cue_button_enabled: playing && round.is_some() && !cue_active,
        choices_enabled: playing,
        show_next_round: phase == Phase::Feedback && settings.manual_pacing,
        feedback: feedback.filter(|_| phase == Phase::Feedback).cloned(),
    }
}
