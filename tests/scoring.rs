use approx::assert_relative_eq;
use pronko::scoring::{normalize, score};

#[test]
fn normalize_is_idempotent() {
    let samples = [
        "",
        "ABC def!",
        "나는 집 내부 공사를 끝냈다.",
        "Hello, 세계 123!",
        "  spaced   out  ",
        "?!@#$%",
    ];
    for text in samples {
        let once = normalize(text);
        assert_eq!(normalize(&once), once, "normalize must be idempotent for {text:?}");
    }
}

#[test]
fn normalize_strips_case_spacing_and_punctuation() {
    assert_eq!(normalize("ABC def!"), "abcdef");
    assert_eq!(normalize("나는 집 내부 공사를 끝냈다."), "나는집내부공사를끝냈다");
}

#[test]
fn empty_standard_scores_zero_error_rate() {
    let result = score("anything", "");
    assert_eq!(result.error_rate, 0.0);
    assert_eq!(result.accuracy, 100.0);
}

#[test]
fn exact_match_scores_perfectly() {
    for text in ["가나다", "hello world", "아침에 아무것도 먹지 않는 사람들이 많습니다."] {
        let result = score(text, text);
        assert_eq!(result.distance, 0);
        assert_eq!(result.error_rate, 0.0);
        assert_eq!(result.accuracy, 100.0);
    }
}

#[test]
fn single_substitution_of_three_chars() {
    let result = score("가나라", "가나다");
    assert_eq!(result.distance, 1);
    assert_relative_eq!(result.error_rate, 0.3333, epsilon = 1e-9);
    assert_relative_eq!(result.accuracy, 66.67, epsilon = 1e-9);
}

#[test]
fn dropped_trailing_period_is_not_an_error() {
    // Transcription engines routinely drop final punctuation; normalization
    // removes it from both sides before scoring.
    let standard = "나는 집 내부 공사를 끝냈다.";
    let predicted = "나는 집 내부 공사를 끝냈다";
    let result = score(predicted, standard);
    assert_eq!(result.distance, 0);
    assert_eq!(result.error_rate, 0.0);
    assert_eq!(result.accuracy, 100.0);
}

#[test]
fn accuracy_never_goes_negative() {
    let result = score("완전히 다른 아주 긴 대답입니다", "짧다");
    assert!(result.error_rate > 1.0);
    assert_eq!(result.accuracy, 0.0);
}

#[test]
fn error_rate_is_rounded_to_four_decimals() {
    // 2 edits over 3 reference chars: 0.6666... rounds up.
    let result = score("가", "가나다");
    assert_relative_eq!(result.error_rate, 0.6667, epsilon = 1e-9);
}

#[test]
fn scoring_ignores_spacing_differences() {
    let result = score("아침에아무것도", "아침에 아무것도");
    assert_eq!(result.error_rate, 0.0);
}
