use crate::domain::model::{PromptRequest, RawItineraryInput, TripDuration};
use regex::Regex;
use std::sync::LazyLock;

/// 每日標題前綴 (🗓️)
pub const DAY_HEADER_MARKER: &str = "\u{1F5D3}\u{FE0F}";

/// 活動項目前綴
pub const ACTIVITY_MARKER: &str = "\u{2192}";

pub const SYSTEM_INSTRUCTION: &str = "You are an expert travel agent assistant. \
You turn raw itinerary components into clear, engaging day-by-day travel plans. \
You only ever output the formatted itinerary itself.";

static FIRST_DAY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x{1F5D3}\x{FE0F}?\s*Day\s*1\s*:").expect("day header pattern is valid")
});

/// 組合送往 LLM 的提示詞，原始內容原封不動嵌入
pub fn build_prompt(duration: &TripDuration, input: &RawItineraryInput, model: &str) -> PromptRequest {
    let days = duration.days();
    let nights = duration.nights();

    let prompt = format!(
        "Please create a {describe} itinerary from the raw itinerary components below.\n\
The trip duration is {display}: {days} days and {nights} nights. The plan must cover exactly {days} days.\n\
\n\
Raw itinerary components:\n\
{raw}\n\
\n\
Format the output exactly as follows:\n\
- Start each day with: {header}Day n : <one-line summary of the day>\n\
- Start each activity point with the arrow symbol {arrow} (never use bullet points).\n\
- Give each day 4 to 5 clearly detailed and catchy points.\n\
- Days that are mainly departure days with nothing besides a transfer get at most 2 short points.\n\
- Place every tour and transfer listed above logically within the {days} days.\n\
- Do not add any introduction or closing remarks. Output only the itinerary.\n\
\n\
Example of one formatted day:\n\
{header}Day 1 : Arrival & First Impressions of the City\n\
{arrow} Arrive at the airport and enjoy a private transfer to your hotel.\n\
{arrow} Set out on a guided city tour through the historic centre.\n\
{arrow} Stop for photos at the most famous landmarks along the waterfront.\n\
{arrow} Wind down the evening with a stroll through the local night market.\n",
        describe = duration.describe(),
        display = duration,
        days = days,
        nights = nights,
        raw = input.as_str(),
        header = DAY_HEADER_MARKER,
        arrow = ACTIVITY_MARKER,
    );

    PromptRequest {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        prompt,
        duration: *duration,
        model: model.to_string(),
    }
}

/// 去除第一個每日標題前的多餘開場白；找不到標題時原樣回傳
pub fn clean_completion(text: &str) -> String {
    match FIRST_DAY_HEADER.find(text) {
        Some(header) if header.start() > 0 => {
            tracing::debug!(
                "Dropping {} bytes of preamble before the first day header",
                header.start()
            );
            text[header.start()..].to_string()
        }
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::DurationPreset;

    fn sample_input() -> RawItineraryInput {
        RawItineraryInput::new("Day trip to museum, city tour, airport transfer").unwrap()
    }

    #[test]
    fn test_prompt_contains_duration_and_raw_text() {
        let duration = TripDuration::custom(3, Some(2)).unwrap();
        let request = build_prompt(&duration, &sample_input(), "gemini-pro");

        assert!(request.prompt.contains("create a 3-day, 2-night itinerary"));
        assert!(request.prompt.contains("Day trip to museum, city tour, airport transfer"));
        assert!(request.prompt.contains("cover exactly 3 days"));
        assert_eq!(request.model, "gemini-pro");
        assert_eq!(request.system_instruction, SYSTEM_INSTRUCTION);
    }

    #[test]
    fn test_prompt_uses_preset_counts() {
        let duration = TripDuration::Preset(DurationPreset::FiveNightsSixDays);
        let request = build_prompt(&duration, &sample_input(), "gemini-pro");

        assert!(request.prompt.contains("create a 6-day, 5-night itinerary"));
        assert!(request.prompt.contains("5N 6D"));
    }

    #[test]
    fn test_prompt_keeps_multiline_text_untouched() {
        let raw = "Tours:\n- City Tour (3hrs) ** SIC Basis **\n\nTransfers:\n - (1) Arrival  \n";
        let input = RawItineraryInput::new(raw).unwrap();
        let request = build_prompt(&TripDuration::default(), &input, "gemini-pro");

        assert!(request.prompt.contains(raw));
    }

    #[test]
    fn test_prompt_describes_format_markers() {
        let request = build_prompt(&TripDuration::default(), &sample_input(), "gemini-pro");
        assert!(request.prompt.contains(&format!("{}Day n :", DAY_HEADER_MARKER)));
        assert!(request.prompt.contains(ACTIVITY_MARKER));
    }

    #[test]
    fn test_clean_completion_drops_preamble() {
        let text = format!(
            "Sure! Here is your plan:\n\n{}Day 1 : Arrival\n{} Transfer to hotel",
            DAY_HEADER_MARKER, ACTIVITY_MARKER
        );
        let cleaned = clean_completion(&text);
        assert!(cleaned.starts_with(&format!("{}Day 1 : Arrival", DAY_HEADER_MARKER)));
    }

    #[test]
    fn test_clean_completion_without_header_is_unchanged() {
        let text = "Day 1: Museum\n- City tour\nDay 2: Departure";
        assert_eq!(clean_completion(text), text);
    }

    #[test]
    fn test_clean_completion_header_first_is_unchanged() {
        let text = format!("{}Day 1 : Arrival\n{} Hotel", DAY_HEADER_MARKER, ACTIVITY_MARKER);
        assert_eq!(clean_completion(&text), text);
    }
}
