use crate::utils::error::{OrganizerError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// 可接受的最長行程天數
pub const MAX_TRIP_DAYS: u32 = 60;

static DAYS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*-?\s*(?:days?|d)(?:[^a-z]|$)").expect("days pattern is valid")
});

static NIGHTS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*-?\s*(?:nights?|n)(?:[^a-z]|$)").expect("nights pattern is valid")
});

/// 表單上的預設行程長度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DurationPreset {
    TwoNightsThreeDays,
    #[default]
    ThreeNightsFourDays,
    FourNightsFiveDays,
    FiveNightsSixDays,
    SixNightsSevenDays,
    SevenNightsEightDays,
}

impl DurationPreset {
    pub const ALL: [DurationPreset; 6] = [
        DurationPreset::TwoNightsThreeDays,
        DurationPreset::ThreeNightsFourDays,
        DurationPreset::FourNightsFiveDays,
        DurationPreset::FiveNightsSixDays,
        DurationPreset::SixNightsSevenDays,
        DurationPreset::SevenNightsEightDays,
    ];

    pub fn days(&self) -> u32 {
        match self {
            Self::TwoNightsThreeDays => 3,
            Self::ThreeNightsFourDays => 4,
            Self::FourNightsFiveDays => 5,
            Self::FiveNightsSixDays => 6,
            Self::SixNightsSevenDays => 7,
            Self::SevenNightsEightDays => 8,
        }
    }

    pub fn nights(&self) -> u32 {
        self.days() - 1
    }

    /// 表單顯示與提交用的標籤，例如 "3N 4D"
    pub fn label(&self) -> &'static str {
        match self {
            Self::TwoNightsThreeDays => "2N 3D",
            Self::ThreeNightsFourDays => "3N 4D",
            Self::FourNightsFiveDays => "4N 5D",
            Self::FiveNightsSixDays => "5N 6D",
            Self::SixNightsSevenDays => "6N 7D",
            Self::SevenNightsEightDays => "7N 8D",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|preset| preset.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for DurationPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 行程長度：預設選項或自訂天數/夜數
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripDuration {
    Preset(DurationPreset),
    Custom { days: u32, nights: u32 },
}

impl TripDuration {
    /// 建立自訂行程長度，未提供夜數時預設為 days - 1
    pub fn custom(days: u32, nights: Option<u32>) -> Result<Self> {
        if days < 1 {
            return Err(OrganizerError::validation("A trip must last at least 1 day."));
        }
        if days > MAX_TRIP_DAYS {
            return Err(OrganizerError::validation(format!(
                "A trip can last at most {} days.",
                MAX_TRIP_DAYS
            )));
        }

        let nights = nights.unwrap_or(days - 1);
        if nights > days {
            return Err(OrganizerError::validation(format!(
                "{} nights do not fit into a {}-day trip.",
                nights, days
            )));
        }

        Ok(Self::Custom { days, nights })
    }

    /// 解析自由輸入的行程長度，例如 "10N 11D"、"5 days"、"3 days, 2 nights"
    pub fn parse_custom(text: &str) -> Result<Self> {
        let days = Self::capture_count(&DAYS_PATTERN, text)?;
        let nights = Self::capture_count(&NIGHTS_PATTERN, text)?;

        match (days, nights) {
            (Some(days), nights) => Self::custom(days, nights),
            (None, Some(nights)) => Self::custom(nights.saturating_add(1), Some(nights)),
            (None, None) => match text.trim().parse::<u32>() {
                Ok(days) => Self::custom(days, None),
                Err(_) => Err(OrganizerError::validation(format!(
                    "Could not understand the trip duration '{}'. Try something like '4N 5D' or '5 days'.",
                    text.trim()
                ))),
            },
        }
    }

    fn capture_count(pattern: &Regex, text: &str) -> Result<Option<u32>> {
        match pattern.captures(text) {
            Some(caps) => caps[1]
                .parse::<u32>()
                .map(Some)
                .map_err(|_| OrganizerError::validation(format!("'{}' is not a valid number.", &caps[1]))),
            None => Ok(None),
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            Self::Preset(preset) => preset.days(),
            Self::Custom { days, .. } => *days,
        }
    }

    pub fn nights(&self) -> u32 {
        match self {
            Self::Preset(preset) => preset.nights(),
            Self::Custom { nights, .. } => *nights,
        }
    }

    /// 提示詞中使用的描述，例如 "3-day, 2-night"
    pub fn describe(&self) -> String {
        format!("{}-day, {}-night", self.days(), self.nights())
    }
}

impl Default for TripDuration {
    fn default() -> Self {
        Self::Preset(DurationPreset::default())
    }
}

impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}N {}D", self.nights(), self.days())
    }
}

/// 使用者貼上的原始行程內容，保留原文不做修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItineraryInput {
    text: String,
}

impl RawItineraryInput {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(OrganizerError::validation(
                "Please enter some raw itinerary details to get started!",
            ));
        }
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// 單次提交時送往 LLM 的請求內容
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub duration: TripDuration,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryResult {
    pub text: String,
    pub model: String,
}
