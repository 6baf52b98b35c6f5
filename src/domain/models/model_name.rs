use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Models offered for selection. The chosen name is passed to the service
/// untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
pub enum ModelName {
    #[default]
    #[strum(to_string = "gemini-2.5-pro")]
    Gemini25Pro,
    #[strum(to_string = "gemini-2.5-flash")]
    Gemini25Flash,
    #[strum(to_string = "gemini-2.0-flash")]
    Gemini20Flash,
    #[strum(to_string = "gemini-pro-latest")]
    GeminiProLatest,
    #[strum(to_string = "gemini-flash-latest")]
    GeminiFlashLatest,
}

impl ModelName {
    pub fn parse(text: &str) -> Option<ModelName> {
        return ModelName::iter().find(|e| return e.to_string() == text);
    }

    /// Flash variants tend to carry higher rate limits.
    pub fn is_flash(&self) -> bool {
        return self.to_string().contains("flash");
    }
}
