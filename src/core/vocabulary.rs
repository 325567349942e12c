use once_cell::sync::OnceCell;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// 练习词表，逗号/空白混排，按原样保留
pub const PRACTICE_VOCABULARY: &str = "1
 2
 3
 4
 5
 6
 8
9
 A
 B
C
D
 E
F
G
H
HELLO
,I,
 J,K,L,,M,N
,NAMASTE,O,P,Q,R,S,T,,U,V,X,Y,Z";

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Invalid token pattern: {0}")]
    Regex(#[from] regex::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Alphabet,
    Number,
    Word,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Alphabet => "Alphabets",
            Category::Number => "Numbers",
            Category::Word => "Words",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedTokens {
    pub alphabets: Vec<String>,
    pub numbers: Vec<String>,
    pub words: Vec<String>,
}

impl ClassifiedTokens {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Alphabet => &self.alphabets,
            Category::Number => &self.numbers,
            Category::Word => &self.words,
        }
    }

    pub fn len(&self) -> usize {
        self.alphabets.len() + self.numbers.len() + self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct Patterns {
    separators: Regex,
    number: Regex,
    letter: Regex,
}

static PATTERNS: OnceCell<Patterns> = OnceCell::new();

fn patterns() -> Result<&'static Patterns, VocabularyError> {
    PATTERNS.get_or_try_init(|| {
        Ok(Patterns {
            separators: Regex::new(r"[.,/]+")?,
            number: Regex::new(r"^[0-9]+$")?,
            letter: Regex::new(r"^[A-Za-z]$")?,
        })
    })
}

pub fn categorize(token: &str) -> Result<Category, VocabularyError> {
    let p = patterns()?;
    Ok(if p.number.is_match(token) {
        Category::Number
    } else if p.letter.is_match(token) {
        Category::Alphabet
    } else {
        Category::Word
    })
}

/// Splits free text into numbers, single letters and words, keeping input order.
/// Letters and words come back uppercased.
pub fn classify_tokens(text: &str) -> Result<ClassifiedTokens, VocabularyError> {
    let cleaned = patterns()?.separators.replace_all(text, " ");
    let mut out = ClassifiedTokens::default();

    for token in cleaned.split_whitespace() {
        match categorize(token)? {
            Category::Number => out.numbers.push(token.to_string()),
            Category::Alphabet => out.alphabets.push(token.to_uppercase()),
            Category::Word => out.words.push(token.to_uppercase()),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_tokens() {
        let tokens = classify_tokens("1 2 A B HELLO").unwrap();
        assert_eq!(tokens.numbers, vec!["1", "2"]);
        assert_eq!(tokens.alphabets, vec!["A", "B"]);
        assert_eq!(tokens.words, vec!["HELLO"]);
    }

    #[test]
    fn test_separators_are_whitespace() {
        let tokens = classify_tokens(",I,").unwrap();
        assert_eq!(tokens.alphabets, vec!["I"]);
        assert!(tokens.numbers.is_empty());
        assert!(tokens.words.is_empty());

        let tokens = classify_tokens("a.b/c,,namaste 12/34").unwrap();
        assert_eq!(tokens.alphabets, vec!["A", "B", "C"]);
        assert_eq!(tokens.words, vec!["NAMASTE"]);
        assert_eq!(tokens.numbers, vec!["12", "34"]);
    }

    #[test]
    fn test_mixed_alnum_is_word() {
        assert_eq!(categorize("A1").unwrap(), Category::Word);
        assert_eq!(categorize("-3").unwrap(), Category::Word);
        assert_eq!(categorize("007").unwrap(), Category::Number);
        assert!(classify_tokens("  \n ,,, ").unwrap().is_empty());
    }

    #[test]
    fn test_non_ascii_digits_are_words() {
        let tokens = classify_tokens("١٢ ５ 42").unwrap();
        assert_eq!(tokens.numbers, vec!["42"]);
        assert_eq!(tokens.words, vec!["١٢", "５"]);
        assert!(tokens.alphabets.is_empty());
    }

    #[test]
    fn test_practice_vocabulary() {
        let tokens = classify_tokens(PRACTICE_VOCABULARY).unwrap();
        assert_eq!(tokens.numbers, vec!["1", "2", "3", "4", "5", "6", "8", "9"]);
        assert_eq!(tokens.words, vec!["HELLO", "NAMASTE"]);
        assert_eq!(tokens.alphabets.len(), 25);
        assert!(!tokens.alphabets.contains(&"W".to_string()));
        assert_eq!(tokens.get(Category::Word), tokens.words.as_slice());
        assert_eq!(Category::Number.label(), "Numbers");
    }
}
