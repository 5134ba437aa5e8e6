//! Pattern set - the ordered removal rules applied to every target
//!
//! Rules are applied in declaration order, each one replacing every match in
//! the content. Order matters: line endings are normalized to `\n` first so
//! the remaining patterns see one newline form, and tag removal runs before
//! blank-line collapsing so the gaps left behind by removed lines are folded
//! away in the same pass.

use regex::Regex;
use std::sync::OnceLock;

/// A single find/remove rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalRule {
    /// Short identifier used in reports
    pub name: &'static str,
    /// Regular expression matched against the whole file content
    pub pattern: &'static str,
    /// Text substituted for every match
    pub replacement: &'static str,
}

pub const RULES: &[RemovalRule] = &[
    RemovalRule {
        name: "line-endings",
        pattern: r"\r\n?",
        replacement: "\n",
    },
    RemovalRule {
        name: "navbar-import",
        pattern: r"import Navbar from '@/components/Navbar';?\n?",
        replacement: "",
    },
    RemovalRule {
        name: "footer-import",
        pattern: r"import Footer from '@/components/Footer';?\n?",
        replacement: "",
    },
    RemovalRule {
        name: "navbar-tag",
        pattern: r"<Navbar />\n?",
        replacement: "",
    },
    RemovalRule {
        name: "footer-tag",
        pattern: r"<Footer />\n?",
        replacement: "",
    },
    RemovalRule {
        name: "blank-lines",
        pattern: r"\n\n+",
        replacement: "\n\n",
    },
];

/// Number of matches a rule changed in one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleHit {
    pub rule: &'static str,
    pub count: usize,
}

/// Output of running the full pattern set over one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedContent {
    pub content: String,
    /// Rules that matched at least once, in application order
    pub hits: Vec<RuleHit>,
}

fn compiled() -> &'static [(RemovalRule, Regex)] {
    static COMPILED: OnceLock<Vec<(RemovalRule, Regex)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        RULES
            .iter()
            .map(|rule| {
                let regex = Regex::new(rule.pattern)
                    .unwrap_or_else(|e| panic!("invalid pattern for rule {}: {e}", rule.name));
                (*rule, regex)
            })
            .collect()
    })
}

/// Apply every rule in order to `content`.
pub fn clean_content(content: &str) -> CleanedContent {
    let mut current = content.to_string();
    let mut hits = Vec::new();

    for (rule, regex) in compiled() {
        // A lone `\n\n` matches the blank-line rule but is left as is
        let count = regex
            .find_iter(&current)
            .filter(|m| m.as_str() != rule.replacement)
            .count();
        if count == 0 {
            continue;
        }

        current = regex.replace_all(&current, rule.replacement).into_owned();
        hits.push(RuleHit {
            rule: rule.name,
            count,
        });
    }

    CleanedContent {
        content: current,
        hits,
    }
}

/// Whether `content` still carries anything the pattern set would change.
pub fn needs_cleaning(content: &str) -> bool {
    clean_content(content).content != content
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PAGE: &str = r#"'use client';

import { useState } from 'react';
import Navbar from '@/components/Navbar';
import Footer from '@/components/Footer';
import { Input } from '@/components/ui/input';

export default function Page() {
  return (
    <>
<Navbar />
      <main>Body</main>
<Footer />
    </>
  );
}
"#;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(compiled().len(), RULES.len());
    }

    #[test]
    fn test_removes_imports_and_tags() {
        let cleaned = clean_content(PAGE);

        assert!(!cleaned.content.contains("import Navbar from '@/components/Navbar'"));
        assert!(!cleaned.content.contains("import Footer from '@/components/Footer'"));
        assert!(!cleaned.content.contains("<Navbar />"));
        assert!(!cleaned.content.contains("<Footer />"));
        assert!(cleaned
            .content
            .contains("import { Input } from '@/components/ui/input';"));

        let names: Vec<_> = cleaned.hits.iter().map(|h| h.rule).collect();
        assert_eq!(
            names,
            vec!["navbar-import", "footer-import", "navbar-tag", "footer-tag"]
        );
    }

    #[test]
    fn test_import_without_semicolon() {
        let cleaned = clean_content("import Navbar from '@/components/Navbar'\nconst x = 1;\n");
        assert_eq!(cleaned.content, "const x = 1;\n");
    }

    #[test]
    fn test_indented_tag_keeps_leading_whitespace() {
        let cleaned = clean_content("<div>\n  <Navbar />\n  <p/>\n</div>\n");
        assert_eq!(cleaned.content, "<div>\n    <p/>\n</div>\n");
    }

    #[test]
    fn test_every_occurrence_is_removed() {
        let cleaned = clean_content("<Footer />\na\n<Footer />\nb\n");
        assert_eq!(cleaned.content, "a\nb\n");
        assert_eq!(
            cleaned.hits,
            vec![RuleHit {
                rule: "footer-tag",
                count: 2
            }]
        );
    }

    #[test]
    fn test_unrelated_file_only_collapses_blank_lines() {
        let input = "const a = 1;\n\n\n\nconst b = 2;\n";
        let cleaned = clean_content(input);
        assert_eq!(cleaned.content, "const a = 1;\n\nconst b = 2;\n");
        assert_eq!(
            cleaned.hits,
            vec![RuleHit {
                rule: "blank-lines",
                count: 1
            }]
        );
    }

    #[test]
    fn test_single_blank_line_is_untouched() {
        let input = "a\n\nb\nc\n";
        let cleaned = clean_content(input);
        assert_eq!(cleaned.content, input);
        assert!(cleaned.hits.is_empty());
        assert!(!needs_cleaning(input));
    }

    #[test]
    fn test_example_page() {
        let input = "import Navbar from '@/components/Navbar';\n<Navbar />\n\n\n\nBody text\n";
        let cleaned = clean_content(input);
        assert_eq!(cleaned.content, "\n\nBody text\n");
    }

    #[test]
    fn test_crlf_page_is_normalized_and_collapsed() {
        let input = "import Navbar from '@/components/Navbar';\r\n<Navbar />\r\n\r\n\r\n\r\nBody text\r\n";
        let cleaned = clean_content(input);
        assert_eq!(cleaned.content, "\n\nBody text\n");
        assert_eq!(cleaned.hits[0].rule, "line-endings");
        assert_eq!(cleaned.hits[0].count, 6);
    }

    #[test]
    fn test_lone_carriage_return_becomes_newline() {
        let cleaned = clean_content("a\rb\r\n");
        assert_eq!(cleaned.content, "a\nb\n");
    }

    #[test]
    fn test_blank_line_count_skips_single_gaps() {
        let cleaned = clean_content("a\n\nb\n\n\nc\n");
        assert_eq!(cleaned.content, "a\n\nb\n\nc\n");
        assert_eq!(
            cleaned.hits,
            vec![RuleHit {
                rule: "blank-lines",
                count: 1
            }]
        );
    }

    #[test]
    fn test_other_components_are_kept() {
        let input = "import FinanceSidebar from '@/components/FinanceSidebar';\n<FinanceSidebar />\n";
        assert!(!needs_cleaning(input));
    }

    proptest! {
        #[test]
        fn prop_cleaning_is_idempotent(
            lines in prop::collection::vec(
                prop::sample::select(vec![
                    "import Navbar from '@/components/Navbar';",
                    "import Footer from '@/components/Footer'",
                    "<Navbar />",
                    "  <Footer />",
                    "",
                    "",
                    "const x = 1;\r",
                    "<main>{children}</main>",
                ]),
                0..40,
            )
        ) {
            let input = lines.join("\n");
            let once = clean_content(&input).content;
            let twice = clean_content(&once).content;
            prop_assert_eq!(&once, &twice);
            prop_assert!(!needs_cleaning(&once));
        }
    }
}
