//! # analysis: rule-based survey prompt quality assessment
//!
//! [`analyze`] is a pure function from prompt text to an [`AnalysisResult`].
//! It never fails and keeps no state: every rule below is evaluated against
//! the unmodified input, and every rule that matches contributes its score
//! deduction and issue, in the order the rules are listed.
//!
//! | rule                      | score   | issue | suggestion |
//! |---------------------------|---------|-------|------------|
//! | missing question mark     | clarity −3 | yes | yes |
//! | more than 25 words        | clarity −2 | yes | yes |
//! | double-barreled           | clarity −3 | yes | yes |
//! | excessive capitalization  | clarity −1 | yes | no  |
//! | absolute/biased terms     | bias −4    | yes | yes |
//! | leading phrasing          | bias −5    | yes | yes |
//!
//! Both scores start at 10 and are clamped to a floor of 1.
//!
//! Word counting splits on whitespace runs exactly as written, so an empty
//! string counts as one (empty) word and surrounding whitespace adds empty
//! tokens. That boundary behaviour is kept as-is and pinned by tests.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::contract::{AnalysisResult, Complexity};

/// Terms that push respondents towards an absolute answer.
pub const BIAS_KEYWORDS: [&str; 7] = [
    "always",
    "never",
    "obviously",
    "clearly",
    "everyone knows",
    "should",
    "must",
];

/// Phrases that presuppose the desired answer.
pub const LOADED_PHRASES: [&str; 4] = ["don't you", "wouldn't you", "agree that", "isn't it true"];

const MAX_SIMPLE_WORDS: usize = 15;
const MAX_MODERATE_WORDS: usize = 25;

const BASELINE_SCORE: i32 = 10;
const MIN_SCORE: i32 = 1;

pub const ISSUE_MISSING_QUESTION_MARK: &str =
    "⚠️ Missing question mark - Add \"?\" to make it clear this is a question";
pub const ISSUE_TOO_LONG: &str = "⚠️ Question is too long - May confuse respondents";
pub const ISSUE_DOUBLE_BARRELED: &str =
    "⚠️ Double-barreled question - Asking multiple things at once";
pub const ISSUE_EXCESSIVE_CAPITALIZATION: &str = "ℹ️ Excessive capitalization detected";
pub const ISSUE_BIASED_LANGUAGE: &str = "⚠️ Biased language detected - May influence responses";
pub const ISSUE_LEADING_QUESTION: &str = "⚠️ Leading question detected - Suggests desired answer";

pub const SUGGEST_ADD_QUESTION_MARK: &str = "Add a question mark (?) at the end";
pub const SUGGEST_SHORTEN: &str = "Break into shorter questions or simplify language";
pub const SUGGEST_SPLIT: &str = "Split into separate questions for each topic";
pub const SUGGEST_REMOVE_ABSOLUTES: &str =
    "Remove absolute terms like \"always\", \"never\", or \"obviously\"";
pub const SUGGEST_NEUTRAL_REPHRASE: &str =
    "Rephrase to neutral language without suggesting an answer";
pub const SUGGEST_KEEP_NEUTRAL: &str = "✓ Keep the neutral, clear language";
pub const SUGGEST_SMALL_GROUP: &str = "✓ Consider testing with a small group first";
pub const SUGGEST_REVIEW_ISSUES: &str = "✓ Review the issues above and revise accordingly";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static UPPERCASE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("valid regex"));
static TERMINAL_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Raw structural and lexical signals read from a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptSignals {
    pub word_count: usize,
    pub has_question_mark: bool,
    pub uppercase_word_count: usize,
    pub sentence_count: usize,
    pub has_bias: bool,
    pub has_loaded_language: bool,
    pub is_double_barreled: bool,
}

impl PromptSignals {
    pub fn read(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let has_question_mark = text.contains('?');

        Self {
            word_count: word_count(text),
            has_question_mark,
            uppercase_word_count: UPPERCASE_WORD.find_iter(text).count(),
            sentence_count: sentence_count(text, has_question_mark),
            has_bias: BIAS_KEYWORDS.iter().any(|k| lowered.contains(k)),
            has_loaded_language: LOADED_PHRASES.iter().any(|p| lowered.contains(p)),
            is_double_barreled: has_question_mark
                && (lowered.contains(" and ") || lowered.contains(" or ")),
        }
    }
}

/// Number of tokens produced by splitting on whitespace runs. `""` yields 1.
pub fn word_count(text: &str) -> usize {
    WHITESPACE_RUN.split(text).count()
}

/// Runs of `.`, `!` or `?`, plus one for a trailing sentence with no
/// terminator when the prompt has no question mark at all.
fn sentence_count(text: &str, has_question_mark: bool) -> usize {
    let terminated = TERMINAL_PUNCTUATION.find_iter(text).count();
    let ends_terminated = text.trim_end().ends_with(&['.', '!', '?'][..]);
    if has_question_mark || ends_terminated {
        terminated
    } else {
        terminated + 1
    }
}

pub fn complexity_for(word_count: usize) -> Complexity {
    if word_count > MAX_MODERATE_WORDS {
        Complexity::Complex
    } else if word_count > MAX_SIMPLE_WORDS {
        Complexity::Moderate
    } else {
        Complexity::Simple
    }
}

/// Scores a survey prompt. Total: any input, including `""`, yields a result.
pub fn analyze(text: &str) -> AnalysisResult {
    let signals = PromptSignals::read(text);

    let mut clarity = BASELINE_SCORE;
    let mut bias = BASELINE_SCORE;
    let mut issues: Vec<String> = Vec::new();
    let mut suggestions: Vec<String> = Vec::new();

    if !signals.has_question_mark && signals.sentence_count == 1 {
        clarity -= 3;
        issues.push(ISSUE_MISSING_QUESTION_MARK.to_string());
        suggestions.push(SUGGEST_ADD_QUESTION_MARK.to_string());
    }

    if signals.word_count > MAX_MODERATE_WORDS {
        clarity -= 2;
        issues.push(ISSUE_TOO_LONG.to_string());
        suggestions.push(SUGGEST_SHORTEN.to_string());
    }

    if signals.is_double_barreled {
        clarity -= 3;
        issues.push(ISSUE_DOUBLE_BARRELED.to_string());
        suggestions.push(SUGGEST_SPLIT.to_string());
    }

    // Informational only.
    if signals.uppercase_word_count > 1 {
        clarity -= 1;
        issues.push(ISSUE_EXCESSIVE_CAPITALIZATION.to_string());
    }

    if signals.has_bias {
        bias -= 4;
        issues.push(ISSUE_BIASED_LANGUAGE.to_string());
        suggestions.push(SUGGEST_REMOVE_ABSOLUTES.to_string());
    }

    if signals.has_loaded_language {
        bias -= 5;
        issues.push(ISSUE_LEADING_QUESTION.to_string());
        suggestions.push(SUGGEST_NEUTRAL_REPHRASE.to_string());
    }

    if issues.is_empty() {
        suggestions.push(SUGGEST_KEEP_NEUTRAL.to_string());
        suggestions.push(SUGGEST_SMALL_GROUP.to_string());
    } else {
        suggestions.push(SUGGEST_REVIEW_ISSUES.to_string());
    }

    AnalysisResult {
        clarity: clamp_score(clarity),
        bias: clamp_score(bias),
        word_count: signals.word_count,
        complexity: complexity_for(signals.word_count),
        issues,
        suggestions,
    }
}

fn clamp_score(score: i32) -> u8 {
    score.clamp(MIN_SCORE, BASELINE_SCORE) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ") + "?"
    }

    #[test]
    fn word_count_splits_on_whitespace_runs() {
        assert_eq!(word_count("Do you  like\tice\ncream?"), 5);
        assert_eq!(word_count("single"), 1);
    }

    #[test]
    fn word_count_of_empty_string_is_one() {
        assert_eq!(word_count(""), 1);
    }

    #[test]
    fn word_count_counts_empty_edge_tokens() {
        assert_eq!(word_count(" padded "), 3);
    }

    #[test]
    fn complexity_thresholds_are_exclusive() {
        assert_eq!(complexity_for(15), Complexity::Simple);
        assert_eq!(complexity_for(16), Complexity::Moderate);
        assert_eq!(complexity_for(25), Complexity::Moderate);
        assert_eq!(complexity_for(26), Complexity::Complex);
    }

    #[test]
    fn sentence_count_adds_implicit_unterminated_sentence() {
        assert_eq!(PromptSignals::read("Explain").sentence_count, 1);
        assert_eq!(PromptSignals::read("Explain.").sentence_count, 1);
        assert_eq!(PromptSignals::read("Stop. Explain").sentence_count, 2);
        assert_eq!(PromptSignals::read("Stop... Explain!!").sentence_count, 2);
        assert_eq!(PromptSignals::read("Why? Explain").sentence_count, 1);
    }

    #[test]
    fn uppercase_words_need_two_letters_and_word_boundaries() {
        assert_eq!(PromptSignals::read("I like NASA and the USA.").uppercase_word_count, 2);
        assert_eq!(PromptSignals::read("A B C").uppercase_word_count, 0);
        assert_eq!(PromptSignals::read("ABC123 FAQs").uppercase_word_count, 0);
    }

    #[test]
    fn keyword_matching_ignores_case() {
        let signals = PromptSignals::read("OBVIOUSLY this works, Isn't It True?");
        assert!(signals.has_bias);
        assert!(signals.has_loaded_language);
    }

    #[test]
    fn conjunction_without_question_mark_is_not_double_barreled() {
        assert!(!PromptSignals::read("Rate price and quality.").is_double_barreled);
        assert!(PromptSignals::read("Rate price OR quality?").is_double_barreled);
    }

    #[test]
    fn double_barreled_fires_once_for_and_plus_or() {
        let result = analyze("Do you like tea and cake or coffee?");
        assert_eq!(result.clarity, 7);
        assert_eq!(result.issues, vec![ISSUE_DOUBLE_BARRELED.to_string()]);
    }

    #[test]
    fn long_double_barreled_prompt_stacks_deductions() {
        let prompt = format!("{} and more", words(28));
        let result = analyze(&prompt);
        assert_eq!(result.complexity, Complexity::Complex);
        assert_eq!(result.clarity, 5);
        assert_eq!(
            result.issues,
            vec![ISSUE_TOO_LONG.to_string(), ISSUE_DOUBLE_BARRELED.to_string()]
        );
        assert_eq!(
            result.suggestions,
            vec![
                SUGGEST_SHORTEN.to_string(),
                SUGGEST_SPLIT.to_string(),
                SUGGEST_REVIEW_ISSUES.to_string()
            ]
        );
    }

    #[test]
    fn capitalization_emits_issue_without_suggestion() {
        let result = analyze("Do you LIKE OUR app?");
        assert_eq!(result.clarity, 9);
        assert_eq!(result.issues, vec![ISSUE_EXCESSIVE_CAPITALIZATION.to_string()]);
        assert_eq!(result.suggestions, vec![SUGGEST_REVIEW_ISSUES.to_string()]);
    }

    #[test]
    fn clarity_deductions_are_additive() {
        let prompt = format!("{} and THIS IS LOUD", vec!["word"; 30].join(" "));
        // no '?', so not double-barreled: −3 −2 −1
        let result = analyze(&prompt);
        assert_eq!(result.clarity, 4);

        let prompt = format!("{} AND THIS OR THAT?", vec!["word"; 30].join(" "));
        let result = analyze(&prompt);
        assert_eq!(result.clarity, 4);
    }

    #[test]
    fn empty_prompt_is_scored() {
        let result = analyze("");
        assert_eq!(result.word_count, 1);
        assert_eq!(result.clarity, 7);
        assert_eq!(result.bias, 10);
        assert_eq!(result.complexity, Complexity::Simple);
        assert_eq!(result.issues, vec![ISSUE_MISSING_QUESTION_MARK.to_string()]);
    }

    #[test]
    fn analysis_emits_no_tracing_events() {
        use std::sync::{Arc, Mutex};
        use tracing_subscriber::{layer::Context, prelude::*, Layer, Registry};

        struct EventCollector {
            events: Arc<Mutex<Vec<String>>>,
        }

        impl<S: tracing::Subscriber> Layer<S> for EventCollector {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                self.events.lock().unwrap().push(format!("{:?}", event));
            }
        }

        let events = Arc::new(Mutex::new(Vec::new()));
        let subscriber = Registry::default().with(EventCollector {
            events: events.clone(),
        });
        let _guard = tracing::subscriber::set_default(subscriber);

        analyze("Don't you agree that everyone always loves this product and service?");
        analyze("");

        let recorded = events.lock().unwrap();
        assert!(recorded.is_empty(), "{:?}", recorded);
    }
}
