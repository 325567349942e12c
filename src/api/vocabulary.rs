//! 练习词表分类

use flutter_rust_bridge::frb;

use crate::api::error::IslApiError;
use crate::core::vocabulary::{classify_tokens, ClassifiedTokens, PRACTICE_VOCABULARY};

/// 把自由文本拆成字母、数字、单词三组
///
/// ```dart
/// final groups = classifyVocabulary(text: '1 2 A B HELLO');
/// print(groups.words); // [HELLO]
/// ```
#[frb(sync)]
pub fn classify_vocabulary(text: String) -> Result<ClassifiedTokens, IslApiError> {
    Ok(classify_tokens(&text)?)
}

/// 内置练习词表
#[frb(sync)]
pub fn practice_vocabulary() -> Result<ClassifiedTokens, IslApiError> {
    classify_vocabulary(PRACTICE_VOCABULARY.to_string())
}
