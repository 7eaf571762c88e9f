//! Boolean tag queries in disjunctive normal form.

use super::Tag;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// An OR of AND-clauses over tags.
///
/// Clauses keep the order they were written in, and tags within a clause keep
/// their first-appearance order with repeats removed. Both orders matter: they
/// decide which tag drives each clause (see [`TagQuery::primary_tags`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagQuery {
    clauses: Vec<Vec<Tag>>,
}

impl TagQuery {
    /// Builds a query from explicit clauses. Empty clauses are dropped.
    pub fn new(clauses: impl IntoIterator<Item = Vec<Tag>>) -> Self {
        let clauses = clauses
            .into_iter()
            .map(|clause| {
                let mut unique: Vec<Tag> = Vec::with_capacity(clause.len());
                for tag in clause {
                    if !unique.contains(&tag) {
                        unique.push(tag);
                    }
                }
                unique
            })
            .filter(|clause| !clause.is_empty())
            .collect();
        Self { clauses }
    }

    /// Parses the `a & b | c` query surface.
    ///
    /// `|` separates clauses and `&` separates terms. Whitespace is stripped
    /// from each term, and empty terms or clauses are dropped, so parsing
    /// never fails.
    pub fn parse(s: &str) -> Self {
        Self::new(
            s.split('|')
                .map(|group| group.split('&').filter_map(|term| Tag::new(term).ok()).collect()),
        )
    }

    pub fn clauses(&self) -> &[Vec<Tag>] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Every distinct tag in the query, in first-appearance order.
    pub fn tags(&self) -> Vec<&Tag> {
        let mut seen = Vec::new();
        for tag in self.clauses.iter().flatten() {
            if !seen.contains(&tag) {
                seen.push(tag);
            }
        }
        seen
    }

    /// Number of clauses that reference each tag.
    pub fn tag_frequencies(&self) -> HashMap<&Tag, usize> {
        let mut freq = HashMap::new();
        for tag in self.clauses.iter().flatten() {
            *freq.entry(tag).or_insert(0) += 1;
        }
        freq
    }

    /// Picks the cursor-driving tag of every clause, deduplicated.
    ///
    /// Each clause contributes its most frequently referenced tag across the
    /// whole query. Ties go to the tag written first within the clause. The
    /// result is ordered by the first clause that selected each tag, so the
    /// same query always yields the same primaries.
    pub fn primary_tags(&self) -> Vec<&Tag> {
        let freq = self.tag_frequencies();
        let mut primaries: Vec<&Tag> = Vec::new();

        for clause in &self.clauses {
            let mut best: Option<(&Tag, usize)> = None;
            for tag in clause {
                let count = freq.get(tag).copied().unwrap_or(0);
                if best.is_none_or(|(_, max)| count > max) {
                    best = Some((tag, count));
                }
            }
            if let Some((tag, _)) = best
                && !primaries.contains(&tag)
            {
                primaries.push(tag);
            }
        }

        primaries
    }
}

impl FromStr for TagQuery {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for TagQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            for (j, tag) in clause.iter().enumerate() {
                if j > 0 {
                    write!(f, " & ")?;
                }
                write!(f, "{}", tag)?;
            }
        }
        Ok(())
    }
}
