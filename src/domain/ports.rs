use crate::domain::model::PromptRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// LLM 服務的設定來源
pub trait ConfigProvider: Send + Sync {
    /// 未設定時回傳 None，由呼叫端轉成設定錯誤
    fn api_key(&self) -> Option<&str>;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn temperature(&self) -> f32;
    fn max_output_tokens(&self) -> u32;
    fn timeout_seconds(&self) -> u64;
}

/// 對外部 LLM 的單次補全請求
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn submit_completion(&self, request: &PromptRequest) -> Result<String>;
}
