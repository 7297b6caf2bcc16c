use crate::build_planning::domain::RecipeRecord;
use crate::shared::Result;
use std::cell::Cell;
use std::collections::BTreeSet;

/// Maximum number of exclude patterns to prevent DoS attacks
const MAX_EXCLUDE_PATTERNS: usize = 64;

/// Maximum length of a single exclude pattern to prevent DoS attacks
const MAX_PATTERN_LENGTH: usize = 255;

/// RecipeFilter - Narrows the recipe collection before graph construction
///
/// Two independent selections are applied:
/// - an optional include list (typically from a manifest): only recipes
///   named there take part
/// - exclusion patterns, where '*' matches zero or more characters
///
/// Patterns are case-sensitive and validated against a character whitelist.
#[derive(Debug, Default)]
pub struct RecipeFilter {
    include: Option<BTreeSet<String>>,
    patterns: Vec<ExcludePattern>,
}

impl RecipeFilter {
    /// Creates a new RecipeFilter
    ///
    /// # Errors
    /// - Too many patterns (> MAX_EXCLUDE_PATTERNS)
    /// - Invalid pattern format (length, characters, wildcard-only)
    pub fn new(include: Option<BTreeSet<String>>, patterns: Vec<String>) -> Result<Self> {
        if patterns.len() > MAX_EXCLUDE_PATTERNS {
            anyhow::bail!(
                "Too many exclusion patterns: {} (maximum: {})",
                patterns.len(),
                MAX_EXCLUDE_PATTERNS
            );
        }

        let patterns = patterns
            .into_iter()
            .map(ExcludePattern::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { include, patterns })
    }

    /// True when the filter would keep every recipe
    pub fn is_passthrough(&self) -> bool {
        self.include.is_none() && self.patterns.is_empty()
    }

    /// Keeps the records that are included and not excluded
    pub fn filter_records(&self, records: Vec<RecipeRecord>) -> Vec<RecipeRecord> {
        records
            .into_iter()
            .filter(|r| self.is_included(r.name()))
            .filter(|r| !self.is_excluded(r.name()))
            .collect()
    }

    fn is_included(&self, name: &str) -> bool {
        self.include
            .as_ref()
            .map_or(true, |names| names.contains(name))
    }

    fn is_excluded(&self, name: &str) -> bool {
        // Evaluate every pattern so each one records whether it matched
        self.patterns
            .iter()
            .fold(false, |hit, p| p.matches(name) || hit)
    }

    /// Patterns that did not match any recipe seen by `filter_records`
    pub fn unmatched_patterns(&self) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|p| !p.matched.get())
            .map(|p| p.original.clone())
            .collect()
    }

    /// Include-list names that no loaded recipe carries
    pub fn unmatched_includes<'a>(&self, available: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let Some(include) = &self.include else {
            return Vec::new();
        };
        let available: BTreeSet<&str> = available.into_iter().collect();
        include
            .iter()
            .filter(|name| !available.contains(name.as_str()))
            .cloned()
            .collect()
    }
}

/// Represents a single exclusion pattern with its compiled matcher
#[derive(Debug)]
struct ExcludePattern {
    original: String,
    matcher: PatternMatcher,
    matched: Cell<bool>,
}

impl ExcludePattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;
        let matcher = PatternMatcher::compile(&pattern);

        Ok(Self {
            original: pattern,
            matcher,
            matched: Cell::new(false),
        })
    }

    fn matches(&self, name: &str) -> bool {
        let is_match = self.matcher.matches(name);
        if is_match {
            self.matched.set(true);
        }
        is_match
    }
}

#[derive(Debug)]
enum PatternMatcher {
    /// No wildcard: "numpy"
    Exact(String),
    /// At least one wildcard: "py*-dev*" splits into head, middle pieces, tail
    Glob {
        head: String,
        middle: Vec<String>,
        tail: String,
    },
}

impl PatternMatcher {
    fn compile(pattern: &str) -> Self {
        let parts: Vec<&str> = pattern.split('*').collect();
        if parts.len() == 1 {
            return PatternMatcher::Exact(pattern.to_string());
        }

        let head = parts[0].to_string();
        let tail = parts[parts.len() - 1].to_string();
        let middle = parts[1..parts.len() - 1]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        PatternMatcher::Glob { head, middle, tail }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => name == s,
            PatternMatcher::Glob { head, middle, tail } => {
                let Some(rest) = name.strip_prefix(head.as_str()) else {
                    return false;
                };
                let Some(mut rest) = rest.strip_suffix(tail.as_str()) else {
                    return false;
                };
                for piece in middle {
                    match rest.find(piece.as_str()) {
                        Some(pos) => rest = &rest[pos + piece.len()..],
                        None => return false,
                    }
                }
                true
            }
        }
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("Exclusion pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Exclusion pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if let Some(ch) = pattern.chars().find(|c| !is_valid_pattern_char(*c)) {
        anyhow::bail!(
            "Exclusion pattern contains invalid character '{}' in pattern '{}'. \
             Only alphanumeric, hyphens, underscores, dots, and asterisks (*) are allowed.",
            ch,
            pattern
        );
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!(
            "Exclusion pattern cannot contain only wildcards: '{}'",
            pattern
        );
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '*'
}
