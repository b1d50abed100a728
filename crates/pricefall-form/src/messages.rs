//! Message catalogs: one string per outcome and error a panel can show.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snapshot::Panel;

/// User-facing wording for every panel state.
pub trait MessageCatalog: Send + Sync {
    /// A required field is blank or not a number.
    fn missing_fields(&self, panel: Panel) -> &'static str;
    /// A date field could not be read.
    fn invalid_instant(&self, panel: Panel) -> &'static str;
    fn inverted_prices(&self) -> &'static str;
    /// The gap between start and end price overflows.
    fn price_span_too_large(&self) -> &'static str;
    fn invalid_current_price(&self) -> &'static str;
    fn query_before_start(&self) -> &'static str;
    /// Shown next to the end price when the query is past the window.
    fn query_after_end(&self) -> &'static str;
    fn already_reached(&self) -> &'static str;
    /// Shown with `already_reached` when the current price is under the target.
    fn current_below_target(&self) -> &'static str;
    fn already_at_target(&self) -> &'static str;
    fn never_reached(&self) -> &'static str;
    fn never_reached_within_window(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Japanese;

impl MessageCatalog for Japanese {
    fn missing_fields(&self, panel: Panel) -> &'static str {
        match panel {
            Panel::Time => "「価格から時間を予測」の全ての項目を正しく入力してください。",
            Panel::Price => {
                "「時間を指定して価格を予測」の全ての項目（取引開始日時、開始価格、終了価格、予測したい日時）を正しく入力してください。"
            }
        }
    }

    fn invalid_instant(&self, panel: Panel) -> &'static str {
        match panel {
            Panel::Time => "有効な取引開始日時を入力してください。",
            Panel::Price => "有効な日時を入力してください。",
        }
    }

    fn inverted_prices(&self) -> &'static str {
        "開始価格は終了価格以上である必要があります。"
    }

    fn price_span_too_large(&self) -> &'static str {
        "開始価格と終了価格の差が大きすぎます。"
    }

    fn invalid_current_price(&self) -> &'static str {
        "現在の価格が開始価格より高い値になっています。入力をご確認ください。"
    }

    fn query_before_start(&self) -> &'static str {
        "予測したい日時は取引開始日時以降にしてください。"
    }

    fn query_after_end(&self) -> &'static str {
        "予測したい日時は取引終了日時を超えています。取引終了時の価格を予測します。"
    }

    fn already_reached(&self) -> &'static str {
        "既に到達済み"
    }

    fn current_below_target(&self) -> &'static str {
        "現在の価格が目標価格より低い場合、既に目標価格に到達しています。"
    }

    fn already_at_target(&self) -> &'static str {
        "現在と同じ価格です"
    }

    fn never_reached(&self) -> &'static str {
        "価格は変動しません。目標価格には到達しません。"
    }

    fn never_reached_within_window(&self) -> &'static str {
        "取引終了までに目標価格には到達しません。"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl MessageCatalog for English {
    fn missing_fields(&self, panel: Panel) -> &'static str {
        match panel {
            Panel::Time => {
                "Fill in start time, start price, end price, current price and target price."
            }
            Panel::Price => "Fill in start time, start price, end price and the time to predict.",
        }
    }

    fn invalid_instant(&self, panel: Panel) -> &'static str {
        match panel {
            Panel::Time => "Enter a valid start time.",
            Panel::Price => "Enter valid dates and times.",
        }
    }

    fn inverted_prices(&self) -> &'static str {
        "The start price must be at least the end price."
    }

    fn price_span_too_large(&self) -> &'static str {
        "The difference between start and end price is too large."
    }

    fn invalid_current_price(&self) -> &'static str {
        "The current price is above the start price. Check your input."
    }

    fn query_before_start(&self) -> &'static str {
        "The time to predict must not be before the start time."
    }

    fn query_after_end(&self) -> &'static str {
        "The time to predict is after the auction ends. Showing the final price."
    }

    fn already_reached(&self) -> &'static str {
        "Already reached"
    }

    fn current_below_target(&self) -> &'static str {
        "The current price is below the target, so the target has already been reached."
    }

    fn already_at_target(&self) -> &'static str {
        "Same as the current price"
    }

    fn never_reached(&self) -> &'static str {
        "The price does not change. The target price will never be reached."
    }

    fn never_reached_within_window(&self) -> &'static str {
        "The target price is not reached before the auction ends."
    }
}

/// Selects a built-in catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl Locale {
    pub fn catalog(&self) -> &'static dyn MessageCatalog {
        match self {
            Self::Ja => &Japanese,
            Self::En => &English,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported locale: {0} (expected ja or en)")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" | "japanese" => Ok(Self::Ja),
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::En),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ja => f.write_str("ja"),
            Self::En => f.write_str("en"),
        }
    }
}
