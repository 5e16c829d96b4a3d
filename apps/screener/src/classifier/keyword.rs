use super::RoleClassifier;

/// Additive smoothing so every role keeps a little probability mass.
const SMOOTHING: f64 = 0.5;

/// Built-in role profiles. Each keyword found in the text is one hit.
const PROFILES: &[(&str, &[&str])] = &[
    (
        "Data Science",
        &[
            "machine learning", "deep learning", "data science", "pandas", "numpy",
            "scikit", "tensorflow", "pytorch", "statistics", "regression", "nlp",
            "data analysis",
        ],
    ),
    (
        "Python Developer",
        &["python", "django", "flask", "fastapi", "pytest", "celery", "sqlalchemy"],
    ),
    (
        "Java Developer",
        &["java ", "spring", "hibernate", "maven", "jvm", "j2ee", "junit"],
    ),
    (
        "Web Designing",
        &["html", "css", "javascript", "react", "angular", "bootstrap", "figma", "ui/ux", "frontend"],
    ),
    (
        "DevOps Engineer",
        &["docker", "kubernetes", "jenkins", "terraform", "ansible", "ci/cd", "aws", "devops", "linux"],
    ),
    (
        "Database",
        &["sql", "mysql", "postgresql", "oracle", "database", "dba", "pl/sql", "mongodb"],
    ),
    (
        "Testing",
        &["selenium", "test cases", "manual testing", "automation testing", "qa", "regression testing", "jira"],
    ),
    (
        "Network Security Engineer",
        &["firewall", "network security", "vpn", "penetration", "cisco", "siem", "vulnerability"],
    ),
    (
        "Business Analyst",
        &["business analysis", "requirements gathering", "stakeholder", "brd", "use cases", "power bi", "tableau"],
    ),
    (
        "HR",
        &["recruitment", "recruiting", "onboarding", "payroll", "talent acquisition", "employee relations", "hr "],
    ),
    (
        "Sales",
        &["sales", "business development", "crm", "lead generation", "client acquisition", "revenue"],
    ),
    (
        "Mechanical Engineer",
        &["autocad", "solidworks", "mechanical", "catia", "manufacturing", "thermodynamics"],
    ),
];

/// Keyword-profile role classifier. Fast, deterministic, needs no artifact.
///
/// p(role) = (hits(role) + 0.5) / Σ(hits + 0.5)
pub struct KeywordRoleClassifier {
    labels: Vec<String>,
    profiles: Vec<Vec<&'static str>>,
}

impl Default for KeywordRoleClassifier {
    fn default() -> Self {
        Self {
            labels: PROFILES.iter().map(|(label, _)| label.to_string()).collect(),
            profiles: PROFILES.iter().map(|(_, kws)| kws.to_vec()).collect(),
        }
    }
}

impl RoleClassifier for KeywordRoleClassifier {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn predict_proba(&self, cleaned_text: &str) -> Vec<f64> {
        // Pad so trailing-space keywords ("java ", "hr ") match at the end.
        let padded = format!("{cleaned_text} ");
        let weights: Vec<f64> = self
            .profiles
            .iter()
            .map(|keywords| {
                keywords.iter().filter(|kw| padded.contains(*kw)).count() as f64 + SMOOTHING
            })
            .collect();
        let total: f64 = weights.iter().sum();
        weights.into_iter().map(|w| w / total).collect()
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}
