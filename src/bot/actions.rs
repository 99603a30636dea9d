use crate::api::api_structs::{InlineKeyboardButton, InlineKeyboardMarkup};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Menu buttons. The lowercase variant name is the callback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Play,
    Top,
    Profile
}

impl Action {
    pub fn button_label(&self) -> &'static str {
        match self {
            Action::Play => "🎮 Играть",
            Action::Top => "🏆 Топ",
            Action::Profile => "👤 Профиль"
        }
    }

    pub fn callback_data(&self) -> &str {
        self.as_ref()
    }

    pub fn from_callback_data(data: &str) -> Option<Action> {
        data.parse().ok()
    }
}

/// One button per row, in menu order.
pub fn menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: Action::iter()
            .map(|action| {
                vec![InlineKeyboardButton {
                    text: action.button_label().to_string(),
                    callback_data: action.callback_data().to_string()
                }]
            })
            .collect()
    }
}
