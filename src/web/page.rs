use crate::core::input::{ItineraryForm, CUSTOM_DURATION};
use crate::core::DurationPreset;
use crate::utils::error::{ErrorCategory, OrganizerError, Result};
use handlebars::Handlebars;
use serde::Serialize;

const INDEX_TEMPLATE: &str = "index";

#[derive(Debug, Clone, Serialize)]
pub struct PresetOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// 頁面渲染所需的全部資料
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub presets: Vec<PresetOption>,
    pub form: ItineraryForm,
    /// 選了 Custom 時才展開自訂天數欄位
    pub custom_selected: bool,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub itinerary: Option<String>,
    pub model: String,
}

impl PageView {
    pub fn new(form: ItineraryForm, model: &str) -> Self {
        let mut presets: Vec<PresetOption> = DurationPreset::ALL
            .iter()
            .map(|preset| PresetOption {
                value: preset.label().to_string(),
                label: preset.label().to_string(),
                selected: !form.is_custom() && form.duration.trim() == preset.label(),
            })
            .collect();
        presets.push(PresetOption {
            value: CUSTOM_DURATION.to_string(),
            label: "Custom".to_string(),
            selected: form.is_custom(),
        });

        Self {
            presets,
            custom_selected: form.is_custom(),
            form,
            warning: None,
            error: None,
            itinerary: None,
            model: model.to_string(),
        }
    }

    pub fn with_itinerary(mut self, text: String) -> Self {
        self.itinerary = Some(text);
        self
    }

    /// 驗證錯誤顯示為提示，其餘顯示為錯誤
    pub fn with_error(mut self, error: &OrganizerError) -> Self {
        let message = error.user_friendly_message();
        match error.category() {
            ErrorCategory::Validation => self.warning = Some(message),
            _ => self.error = Some(message),
        }
        self
    }
}

pub struct PageRenderer {
    hbs: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(false);
        hbs.register_template_string(INDEX_TEMPLATE, include_str!("../../templates/index.hbs"))
            .map_err(|e| OrganizerError::TemplateError {
                message: e.to_string(),
            })?;
        Ok(Self { hbs })
    }

    pub fn render(&self, view: &PageView) -> Result<String> {
        self.hbs
            .render(INDEX_TEMPLATE, view)
            .map_err(|e| OrganizerError::TemplateError {
                message: e.to_string(),
            })
    }
}
