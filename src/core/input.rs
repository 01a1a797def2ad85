use crate::domain::model::{DurationPreset, RawItineraryInput, TripDuration};
use crate::utils::error::{OrganizerError, Result};
use serde::{Deserialize, Serialize};

/// 表單上「自訂」選項的值
pub const CUSTOM_DURATION: &str = "custom";

/// 表單預先填入的範例行程
pub const SAMPLE_ITINERARY: &str = "Tours:
- City Tour (3hrs) ** SIC Basis ** (Singapore Flyer and Merlion [2 Photostops], Drive Past: Raffles Hotel, War Memorial Park, Suntec City, Supreme Court, Gift Shop and Chinatown, ending at Little India.)
- Singapore River Cruise ** PVT Basis **
- Gardens by the Bay: Flower Dome + Cloud Forest ** SIC Basis **
- Night Safari (Admission + Tram) ** SIC Basis **

Transfers:
- (1) Arrival / (1) Departure Transfers (Private basis)
- (3) Tour Transfers - City Tour, Gardens by the Bay, Night Safari (Seat in Coach basis)
- (2) Tour Transfers - Singapore River Cruise (Private basis)
";

/// 網頁表單提交的原始欄位
///
/// 數字欄位以字串接收，空白欄位不會在反序列化時失敗，
/// 而是在 [`ItineraryForm::resolve_duration`] 中回報為驗證錯誤。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItineraryForm {
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub custom_days: String,
    #[serde(default)]
    pub custom_nights: String,
    #[serde(default)]
    pub custom_duration: String,
    #[serde(default)]
    pub raw_itinerary: String,
}

impl Default for ItineraryForm {
    fn default() -> Self {
        Self {
            duration: DurationPreset::default().label().to_string(),
            custom_days: String::new(),
            custom_nights: String::new(),
            custom_duration: String::new(),
            raw_itinerary: SAMPLE_ITINERARY.to_string(),
        }
    }
}

impl ItineraryForm {
    pub fn is_custom(&self) -> bool {
        self.duration.trim().eq_ignore_ascii_case(CUSTOM_DURATION)
    }

    /// 將預設或自訂選項解析成具體的行程長度
    pub fn resolve_duration(&self) -> Result<TripDuration> {
        if !self.is_custom() {
            return DurationPreset::from_label(&self.duration)
                .map(TripDuration::Preset)
                .ok_or_else(|| {
                    OrganizerError::validation(format!(
                        "Unknown trip duration '{}'. Pick one of the presets or 'Custom'.",
                        self.duration.trim()
                    ))
                });
        }

        // 數字欄位優先，其次才是自由輸入的描述
        if !self.custom_days.trim().is_empty() {
            let days = parse_count("days", &self.custom_days)?;
            let nights = if self.custom_nights.trim().is_empty() {
                None
            } else {
                Some(parse_count("nights", &self.custom_nights)?)
            };
            return TripDuration::custom(days, nights);
        }

        if !self.custom_duration.trim().is_empty() {
            return TripDuration::parse_custom(&self.custom_duration);
        }

        Err(OrganizerError::validation(
            "Enter the number of days for a custom trip duration.",
        ))
    }

    /// 驗證整份表單，任何錯誤都在送出請求之前回報
    pub fn validate(&self) -> Result<(TripDuration, RawItineraryInput)> {
        let duration = self.resolve_duration()?;
        let input = RawItineraryInput::new(self.raw_itinerary.clone())?;
        Ok((duration, input))
    }
}

fn parse_count(field: &str, value: &str) -> Result<u32> {
    value.trim().parse::<u32>().map_err(|_| {
        OrganizerError::validation(format!(
            "The number of {} must be a whole number, got '{}'.",
            field,
            value.trim()
        ))
    })
}
