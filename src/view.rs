//! Serializable snapshot of everything the host page needs to render a frame.

use serde::Serialize;

use crate::catalog;
use crate::difficulty;
use crate::game::{GameSession, Phase};
use crate::present::PresentationDirectives;
use crate::settings::Settings;
use crate::store::UserId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub key: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub user_id: Option<String>,
    pub categories: Vec<OptionView>,
    pub difficulties: Vec<OptionView>,
    /// Selection is only offered before play starts.
    pub selection_open: bool,
    pub settings: Settings,
    pub directives: PresentationDirectives,
}

pub fn view_model(session: &GameSession, user: Option<&UserId>) -> ViewModel {
    let categories = catalog::categories()
        .iter()
        .map(|category| OptionView {
            key: category.key,
            label: category.display_name,
            selected: category.key == session.category().key,
        })
        .collect();
    let difficulties = difficulty::difficulties()
        .iter()
        .map(|d| OptionView {
            key: d.key,
            label: d.display_name,
            selected: d.key == session.difficulty().key,
        })
        .collect();
    ViewModel {
        phase: session.phase(),
        score: session.score(),
        high_score: session.high_score(),
        user_id: user.map(|user| user.as_str().to_string()),
        categories,
        difficulties,
        selection_open: matches!(session.phase(), Phase::Start | Phase::Setup),
        settings: *session.settings(),
        directives: session.directives(),
    }
}
