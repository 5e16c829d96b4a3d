//! Lightweight grammar rules. Each hit counts as one error.
//!
//! - the same word twice in a row ("the the")
//! - a sentence starting with a lowercase letter
//! - the pronoun "i" written in lowercase

const ABBREVIATIONS: &[&str] = &[
    "e.g.", "i.e.", "etc.", "vs.", "approx.", "incl.", "no.", "dept.", "jr.", "sr.", "inc.",
    "ltd.", "co.", "mr.", "mrs.", "ms.", "dr.",
];

pub fn count_grammar_issues(text: &str) -> u32 {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut issues = 0;

    for (i, token) in tokens.iter().enumerate() {
        if is_list_marker(token) {
            continue;
        }
        let word = bare(token);

        if word == "i" {
            issues += 1;
        }

        if let Some(prev) = i.checked_sub(1).map(|p| tokens[p]) {
            let prev_word = bare(prev);
            let prev_joined = prev.ends_with(|c: char| c.is_alphanumeric());
            if prev_joined
                && !prev_word.is_empty()
                && prev_word.chars().all(char::is_alphabetic)
                && prev_word.eq_ignore_ascii_case(word)
            {
                issues += 1;
            }

            if ends_sentence(prev) && word.chars().next().is_some_and(char::is_lowercase) {
                issues += 1;
            }
        }
    }
    issues
}

/// Enumerators such as "(i)", "(iv)", "b)" or "(2)".
fn is_list_marker(token: &str) -> bool {
    if !token.trim_end_matches([',', '.', ';', ':']).ends_with(')') {
        return false;
    }
    let core = bare(token);
    core.chars().count() == 1
        || core.chars().all(|c| c.is_ascii_digit())
        || (core.len() <= 5 && core.chars().all(|c| "ivxlIVXL".contains(c)))
}

/// Token with surrounding punctuation removed.
fn bare(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

fn ends_sentence(token: &str) -> bool {
    if !token.ends_with(['.', '!', '?']) {
        return false;
    }
    let lower = token.to_lowercase();
    if ABBREVIATIONS.contains(&lower.as_str()) {
        return false;
    }
    // Initials such as "J." and dotted versions such as "v2." are not sentence ends.
    let core = bare(token);
    !(core.chars().count() == 1 || core.chars().any(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_has_no_issues() {
        let text = "Led a team of five engineers. Shipped the billing service on time!";
        assert_eq!(count_grammar_issues(text), 0);
    }

    #[test]
    fn test_repeated_word() {
        assert_eq!(count_grammar_issues("Managed the the release."), 1);
        assert_eq!(count_grammar_issues("Managed The the release."), 1);
    }

    #[test]
    fn test_repeat_across_sentence_boundary_is_fine() {
        assert_eq!(count_grammar_issues("I know Python. Python is great."), 0);
    }

    #[test]
    fn test_lowercase_sentence_start() {
        assert_eq!(count_grammar_issues("Built APIs. deployed them to AWS."), 1);
    }

    #[test]
    fn test_abbreviations_do_not_end_sentences() {
        assert_eq!(count_grammar_issues("Cloud tools, e.g. terraform and ansible."), 0);
        assert_eq!(count_grammar_issues("Supervised by J. smith"), 0);
    }

    #[test]
    fn test_lowercase_pronoun() {
        assert_eq!(count_grammar_issues("Then i built it"), 1);
    }

    #[test]
    fn test_parenthesised_list_markers_are_ignored() {
        assert_eq!(count_grammar_issues("Duties: (i) hiring (ii) payroll (iii) training"), 0);
        assert_eq!(count_grammar_issues("Scope. (i) budgets and i) forecasts"), 0);
        assert_eq!(count_grammar_issues("Duties: (i) hiring, then i approved it"), 1);
        // a bracketed word is still checked
        assert_eq!(count_grammar_issues("Cloud work. (aws) migrations"), 1);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(count_grammar_issues(""), 0);
    }
}
