//! Practice-sentence bank: built-in sentences plus optional JSON bank files.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Sentences shipped with the tool.
const BUILTIN: &[&str] = &[
    "나는 집 내부 공사를 끝냈다.",
    "아침에 아무것도 먹지 않는 사람들이 많습니다.",
    "너는 클래식 음악 듣는 걸 좋아하지, 그렇지?",
    "생선을 먹던 고양이가 강아지한테 쫓겼다.",
    "오늘 날씨가 정말 좋습니다.",
    "저는 매일 아침 커피를 마셔요.",
];

/// An immutable collection of practice sentences.
#[derive(Debug, Clone)]
pub struct SentenceBank {
    sentences: Vec<String>,
}

impl SentenceBank {
    pub fn builtin() -> Self {
        Self {
            sentences: BUILTIN.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Load a bank from a JSON array of strings.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read sentence bank {:?}", path))?;
        let sentences: Vec<String> =
            serde_json::from_str(&data).context("sentence bank must be a JSON array of strings")?;
        Self::from_sentences(sentences)
    }

    pub fn from_sentences(sentences: Vec<String>) -> Result<Self> {
        ensure!(
            sentences.iter().any(|s| !s.trim().is_empty()),
            "sentence bank contains no usable sentences"
        );
        let sentences = sentences
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();
        Ok(Self { sentences })
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn first(&self) -> &str {
        &self.sentences[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sentences.iter().map(String::as_str)
    }

    /// Pick a random sentence.
    pub fn random<R: Rng>(&self, rng: &mut R) -> &str {
        self.sentences
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Pick a random sentence, avoiding `current` when the bank has another
    /// option.
    pub fn random_excluding<R: Rng>(&self, current: Option<&str>, rng: &mut R) -> &str {
        let candidates: Vec<&str> = self
            .sentences
            .iter()
            .map(String::as_str)
            .filter(|s| Some(*s) != current)
            .collect();
        match candidates.choose(rng).copied() {
            Some(sentence) => sentence,
            None => self.random(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SentenceBank;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn builtin_bank_is_populated() {
        let bank = SentenceBank::builtin();
        assert!(bank.len() >= 4);
        assert!(bank.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn random_excluding_rotates_away_from_current() {
        let bank = SentenceBank::builtin();
        let mut rng = SmallRng::seed_from_u64(7);
        let current = bank.first();
        for _ in 0..20 {
            assert_ne!(bank.random_excluding(Some(current), &mut rng), current);
        }
    }

    #[test]
    fn random_excluding_falls_back_on_single_sentence_bank() {
        let bank = SentenceBank::from_sentences(vec!["하나".to_string()]).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(bank.random_excluding(Some("하나"), &mut rng), "하나");
    }

    #[test]
    fn rejects_empty_bank() {
        assert!(SentenceBank::from_sentences(Vec::new()).is_err());
        assert!(SentenceBank::from_sentences(vec!["  ".to_string()]).is_err());
    }

    #[test]
    fn loads_json_bank_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["첫 문장", "둘째 문장"]"#).unwrap();
        let bank = SentenceBank::from_file(file.path()).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.first(), "첫 문장");
    }

    #[test]
    fn rejects_malformed_bank_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"not": "an array"}}"#).unwrap();
        assert!(SentenceBank::from_file(file.path()).is_err());
    }
}
