//! Local SEO analysis
//!
//! Deterministic scoring of a markdown document against on-page SEO
//! heuristics: keyword density, title and meta-description length,
//! and header structure. Complements (does not replace) the SEO
//! collaborator's own judgment.

use regex::Regex;
use serde::Serialize;

const OPTIMAL_DENSITY: (f64, f64) = (1.0, 2.5);
const OPTIMAL_TITLE_LEN: (usize, usize) = (50, 60);
const OPTIMAL_META_LEN: (usize, usize) = (150, 160);

/// Keyword usage analysis
#[derive(Debug, Clone, Serialize)]
pub struct KeywordAnalysis {
    pub keyword: String,
    pub occurrences: usize,
    pub density_percentage: f64,
    pub is_optimal: bool,
    pub recommendation: &'static str,
}

/// Title or meta-description analysis (both score length + keyword)
#[derive(Debug, Clone, Serialize)]
pub struct FieldAnalysis {
    pub length: usize,
    pub length_ok: bool,
    pub has_keyword: bool,
    pub score: u32,
    pub recommendation: &'static str,
}

/// Markdown header structure analysis
#[derive(Debug, Clone, Serialize)]
pub struct HeaderAnalysis {
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
    pub h1_has_keyword: bool,
    pub h2_with_keyword: usize,
    pub score: u32,
    pub recommendation: &'static str,
}

/// Weighted overall SEO report
#[derive(Debug, Clone, Serialize)]
pub struct SeoReport {
    pub overall_score: f64,
    pub grade: char,
    pub keyword: KeywordAnalysis,
    pub title: FieldAnalysis,
    pub meta: FieldAnalysis,
    pub headers: HeaderAnalysis,
    pub recommendations: Vec<String>,
}

/// Keyword density over the whole text, case-insensitive.
pub fn analyze_keyword_density(text: &str, keyword: &str) -> KeywordAnalysis {
    let total_words = text.split_whitespace().count();
    let occurrences = if keyword.is_empty() {
        0
    } else {
        text.to_lowercase().matches(&keyword.to_lowercase()).count()
    };

    let density = if total_words > 0 {
        let raw = occurrences as f64 / total_words as f64 * 100.0;
        (raw * 100.0).round() / 100.0
    } else {
        0.0
    };
    let is_optimal = (OPTIMAL_DENSITY.0..=OPTIMAL_DENSITY.1).contains(&density);

    KeywordAnalysis {
        keyword: keyword.to_string(),
        occurrences,
        density_percentage: density,
        is_optimal,
        recommendation: if is_optimal {
            "Good"
        } else if density < OPTIMAL_DENSITY.0 {
            "Increase usage"
        } else {
            "Reduce usage"
        },
    }
}

/// Title length and keyword presence.
pub fn analyze_title(title: &str, keyword: &str) -> FieldAnalysis {
    analyze_field(title, keyword, OPTIMAL_TITLE_LEN, "Optimize title", "Good title")
}

/// Meta-description length and keyword presence.
pub fn analyze_meta_description(meta: &str, keyword: &str) -> FieldAnalysis {
    analyze_field(
        meta,
        keyword,
        OPTIMAL_META_LEN,
        "Optimize meta",
        "Good meta description",
    )
}

fn analyze_field(
    value: &str,
    keyword: &str,
    optimal: (usize, usize),
    bad: &'static str,
    good: &'static str,
) -> FieldAnalysis {
    let length = value.chars().count();
    let length_ok = (optimal.0..=optimal.1).contains(&length);
    let has_keyword = !keyword.is_empty() && value.to_lowercase().contains(&keyword.to_lowercase());

    let mut score = 0;
    if length_ok {
        score += 50;
    }
    if has_keyword {
        score += 50;
    }

    FieldAnalysis {
        length,
        length_ok,
        has_keyword,
        score,
        recommendation: if score < 80 { bad } else { good },
    }
}

/// Markdown header structure: exactly one H1, keyword in H1, at least
/// three H2s, keyword in at least one H2.
pub fn analyze_headers(text: &str, keyword: &str) -> HeaderAnalysis {
    // Static patterns, cannot fail to compile.
    let h1_re = Regex::new(r"(?m)^#\s+(.+)$").unwrap();
    let h2_re = Regex::new(r"(?m)^##\s+(.+)$").unwrap();
    let h3_re = Regex::new(r"(?m)^###\s+(.+)$").unwrap();

    let keyword_lower = keyword.to_lowercase();
    let headers = |re: &Regex| -> Vec<String> {
        re.captures_iter(text)
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_lowercase()))
            .collect()
    };

    let h1s = headers(&h1_re);
    let h2s = headers(&h2_re);
    let h3s = headers(&h3_re);

    let h1_has_keyword =
        !keyword_lower.is_empty() && h1s.iter().any(|h| h.contains(&keyword_lower));
    let h2_with_keyword = if keyword_lower.is_empty() {
        0
    } else {
        h2s.iter().filter(|h| h.contains(&keyword_lower)).count()
    };

    let mut score = 0;
    if h1s.len() == 1 {
        score += 20;
    }
    if h1_has_keyword {
        score += 30;
    }
    if h2s.len() >= 3 {
        score += 25;
    }
    if h2_with_keyword >= 1 {
        score += 25;
    }

    HeaderAnalysis {
        h1_count: h1s.len(),
        h2_count: h2s.len(),
        h3_count: h3s.len(),
        h1_has_keyword,
        h2_with_keyword,
        score,
        recommendation: if score < 70 {
            "Improve headers"
        } else {
            "Good header structure"
        },
    }
}

/// Weighted overall score: keyword 30%, title 25%, meta 20%, headers 25%.
pub fn overall_seo_score(text: &str, title: &str, meta: &str, keyword: &str) -> SeoReport {
    let keyword_analysis = analyze_keyword_density(text, keyword);
    let title_analysis = analyze_title(title, keyword);
    let meta_analysis = analyze_meta_description(meta, keyword);
    let header_analysis = analyze_headers(text, keyword);

    let keyword_score: f64 = if keyword_analysis.is_optimal { 100.0 } else { 50.0 };
    let overall = keyword_score * 0.30
        + title_analysis.score as f64 * 0.25
        + meta_analysis.score as f64 * 0.20
        + header_analysis.score as f64 * 0.25;
    let overall_score = (overall * 100.0).round() / 100.0;

    let mut recommendations = Vec::new();
    if !keyword_analysis.is_optimal {
        recommendations.push(keyword_analysis.recommendation.to_string());
    }
    if title_analysis.score < 80 {
        recommendations.push(format!("Title: {}", title_analysis.recommendation));
    }
    if meta_analysis.score < 80 {
        recommendations.push(format!("Meta: {}", meta_analysis.recommendation));
    }
    if header_analysis.score < 70 {
        recommendations.push(format!("Headers: {}", header_analysis.recommendation));
    }
    if recommendations.is_empty() {
        recommendations.push("SEO is well optimized".to_string());
    }

    SeoReport {
        overall_score,
        grade: seo_grade(overall_score),
        keyword: keyword_analysis,
        title: title_analysis,
        meta: meta_analysis,
        headers: header_analysis,
        recommendations,
    }
}

fn seo_grade(score: f64) -> char {
    if score >= 90.0 {
        'A'
    } else if score >= 80.0 {
        'B'
    } else if score >= 70.0 {
        'C'
    } else if score >= 60.0 {
        'D'
    } else {
        'F'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_density_optimal() {
        // 2 occurrences in 100 words = 2%
        let filler = "word ".repeat(98);
        let text = format!("rust {} rust", filler);
        let analysis = analyze_keyword_density(&text, "rust");
        assert_eq!(analysis.occurrences, 2);
        assert!(analysis.is_optimal);
        assert_eq!(analysis.recommendation, "Good");
    }

    #[test]
    fn test_keyword_density_too_low() {
        let text = "rust ".to_string() + &"word ".repeat(500);
        let analysis = analyze_keyword_density(&text, "rust");
        assert!(!analysis.is_optimal);
        assert_eq!(analysis.recommendation, "Increase usage");
    }

    #[test]
    fn test_title_scoring() {
        let good = "The Complete Guide to Rust Async Programming Today"; // 50 chars
        let analysis = analyze_title(good, "rust");
        assert!(analysis.length_ok);
        assert!(analysis.has_keyword);
        assert_eq!(analysis.score, 100);

        let bad = analyze_title("Short", "rust");
        assert_eq!(bad.score, 0);
        assert_eq!(bad.recommendation, "Optimize title");
    }

    #[test]
    fn test_header_analysis() {
        let text = "# Rust in Production\n\n\
                    ## Why Rust\ntext\n\
                    ## Rust Tooling\ntext\n\
                    ## Adoption\ntext\n\
                    ### Details\ntext\n";
        let analysis = analyze_headers(text, "rust");
        assert_eq!(analysis.h1_count, 1);
        assert_eq!(analysis.h2_count, 3);
        assert_eq!(analysis.h3_count, 1);
        assert!(analysis.h1_has_keyword);
        assert_eq!(analysis.h2_with_keyword, 2);
        assert_eq!(analysis.score, 100);
    }

    #[test]
    fn test_overall_grade_bands() {
        assert_eq!(seo_grade(95.0), 'A');
        assert_eq!(seo_grade(85.0), 'B');
        assert_eq!(seo_grade(72.0), 'C');
        assert_eq!(seo_grade(61.0), 'D');
        assert_eq!(seo_grade(40.0), 'F');
    }

    #[test]
    fn test_overall_report_recommendations() {
        let report = overall_seo_score("short text.", "t", "m", "rust");
        assert!(report.overall_score < 60.0);
        assert!(!report.recommendations.is_empty());
        assert_eq!(report.grade, 'F');
    }
}
