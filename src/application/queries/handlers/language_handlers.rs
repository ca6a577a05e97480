//! Language Query Handlers

use crate::application::queries::session_queries::ListLanguagesQuery;
use crate::domain::conversation::Language;

/// 语言信息视图（用于 UI 语言选择控件）
#[derive(Debug, Clone)]
pub struct LanguageInfo {
    pub id: Language,
    pub display_name: &'static str,
    pub language_code: &'static str,
}

/// ListLanguages Handler - 列出固定支持的语言
///
/// 语言集固定不变，无需依赖任何端口。
pub struct ListLanguagesHandler;

impl ListLanguagesHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, _query: ListLanguagesQuery) -> Vec<LanguageInfo> {
        Language::ALL
            .iter()
            .map(|language| LanguageInfo {
                id: *language,
                display_name: language.display_name(),
                language_code: language.language_code(),
            })
            .collect()
    }
}

impl Default for ListLanguagesHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_all_languages_in_order() {
        let handler = ListLanguagesHandler::new();
        let languages = handler.handle(ListLanguagesQuery);
        assert_eq!(languages.len(), 5);
        assert_eq!(languages[0].id, Language::English);
        assert_eq!(languages[1].display_name, "Hindi (हिंदी)");
        assert_eq!(languages[4].language_code, "bn-IN");
    }
}
