//! Localized user-facing labels.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Locale {
    Ko,
    En,
}

impl Locale {
    /// BCP 47-ish language code used when asking a generator for a sentence.
    pub fn code(self) -> &'static str {
        match self {
            Locale::Ko => "ko",
            Locale::En => "en",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Label table for one locale.
#[derive(Debug, Clone, Copy)]
pub struct UiText {
    pub title: &'static str,
    pub header: &'static str,
    pub result_header: &'static str,
    pub accuracy: &'static str,
    pub compare_header: &'static str,
    pub compare_standard: &'static str,
    pub compare_predicted: &'static str,
    pub new_sentence: &'static str,
    pub my_audio: &'static str,
    pub controls: &'static str,
    pub recording: &'static str,
    pub transcribing: &'static str,
    pub synthesizing: &'static str,
    pub empty_transcript: &'static str,
}

const KO: UiText = UiText {
    title: "AI 한국어 발음 분석기",
    header: "발음 연습",
    result_header: "음성 분석 결과",
    accuracy: "발음 정확도",
    compare_header: "상세 비교 분석",
    compare_standard: "목표 발음",
    compare_predicted: "내 발음 인식 결과 (AI)",
    new_sentence: "새로운 랜덤 문장",
    my_audio: "내 녹음 다시 듣기",
    controls: "[Enter] 녹음 / r 다시 듣기 / n 새 문장 / q 종료",
    recording: "녹음 중...",
    transcribing: "AI가 당신의 발음을 분석 중입니다...",
    synthesizing: "가이드 음성을 생성 중입니다...",
    empty_transcript: "인식된 음성이 없습니다.",
};

const EN: UiText = UiText {
    title: "AI Korean Pronunciation Analyzer",
    header: "Pronunciation Practice",
    result_header: "Voice Analysis Result",
    accuracy: "Pronunciation Accuracy",
    compare_header: "Detailed Comparison",
    compare_standard: "Target Pronunciation",
    compare_predicted: "My Pronunciation (AI Recognized)",
    new_sentence: "New Random Sentence",
    my_audio: "Listen to My Recording",
    controls: "[Enter] record / r replay / n new sentence / q quit",
    recording: "Recording...",
    transcribing: "AI is analyzing your pronunciation...",
    synthesizing: "Generating guide audio...",
    empty_transcript: "No speech recognized.",
};

pub fn ui_text(locale: Locale) -> &'static UiText {
    match locale {
        Locale::Ko => &KO,
        Locale::En => &EN,
    }
}
