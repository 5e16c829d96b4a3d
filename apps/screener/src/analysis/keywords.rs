use super::text::clean_text;

/// Skills recognised in resumes and job descriptions, in reporting order.
pub const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "c++",
    "sql",
    "aws",
    "docker",
    "flask",
    "django",
    "react",
    "javascript",
    "html",
    "css",
];

/// Degree keywords, in reporting order.
pub const EDUCATION_KEYWORDS: &[&str] = &["bachelor", "master", "phd", "mba", "btech", "mtech"];

/// Skills from the fixed vocabulary that occur anywhere in the text.
///
/// Plain substring containment on the cleaned text, so "javascript" also
/// yields "java".
pub fn extract_skills(text: &str) -> Vec<String> {
    find_vocabulary(text, SKILL_VOCABULARY)
}

/// Degree keywords that occur anywhere in the text.
pub fn extract_education(text: &str) -> Vec<String> {
    find_vocabulary(text, EDUCATION_KEYWORDS)
}

fn find_vocabulary(text: &str, vocabulary: &[&str]) -> Vec<String> {
    let cleaned = clean_text(text);
    vocabulary
        .iter()
        .filter(|term| cleaned.contains(*term))
        .map(|term| term.to_string())
        .collect()
}
