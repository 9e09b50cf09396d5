//! Budget matcher
//!
//! Decides which budget, if any, an expense counts against. Three tiers are
//! tried in strict order and each tier scans every budget before the next tier
//! starts:
//!
//! 1. exact category match (case-insensitive)
//! 2. keyword match via the dictionary, or the description naming the budget
//! 3. related categories, i.e. one keyword group covers both categories
//!
//! Budgets are scanned in slice order, so when two budgets qualify within the
//! same tier the one configured first wins.

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

use super::keywords::KeywordDictionary;
use crate::models::{Budget, Transaction};

/// Which rule produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Exact,
    Keyword,
    Related,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Keyword => write!(f, "keyword"),
            Self::Related => write!(f, "related"),
        }
    }
}

/// A budget an expense was matched to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetMatch<'a> {
    pub budget: &'a Budget,
    pub tier: MatchTier,
}

/// Matches expenses to budgets using a keyword dictionary
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetMatcher {
    dictionary: KeywordDictionary,
}

impl BudgetMatcher {
    /// Matcher over the built-in dictionary
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dictionary(dictionary: KeywordDictionary) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &KeywordDictionary {
        &self.dictionary
    }

    /// Find the budget an expense counts against
    ///
    /// Returns `None` for income and when no active budget qualifies.
    pub fn match_expense<'a, B>(&self, expense: &Transaction, budgets: &'a [B]) -> Option<BudgetMatch<'a>>
    where
        B: Borrow<Budget>,
    {
        if !expense.is_expense() {
            return None;
        }

        let category = normalize(&expense.category);
        let description = normalize(&expense.description);
        let active = || {
            budgets
                .iter()
                .map(|b| Borrow::<Budget>::borrow(b))
                .filter(|b| b.is_active)
        };

        if !category.is_empty() {
            if let Some(budget) = active().find(|b| normalize(&b.category) == category) {
                return Some(BudgetMatch {
                    budget,
                    tier: MatchTier::Exact,
                });
            }
        }

        if let Some(budget) = active().find(|b| self.keyword_match(b, &category, &description)) {
            return Some(BudgetMatch {
                budget,
                tier: MatchTier::Keyword,
            });
        }

        active()
            .find(|b| self.categories_related(&expense.category, &b.category))
            .map(|budget| BudgetMatch {
                budget,
                tier: MatchTier::Related,
            })
    }

    /// Whether some keyword group covers both categories
    pub fn categories_related(&self, a: &str, b: &str) -> bool {
        self.dictionary
            .groups()
            .iter()
            .any(|group| group.relates_to(a) && group.relates_to(b))
    }

    fn keyword_match(&self, budget: &Budget, category: &str, description: &str) -> bool {
        let name = normalize(&budget.name);
        let budget_category = normalize(&budget.category);

        let keyword_hit = [name.as_str(), budget_category.as_str()]
            .into_iter()
            .flat_map(|key| self.dictionary.keywords_for(key).iter())
            .any(|keyword| description.contains(keyword) || category.contains(keyword));
        if keyword_hit {
            return true;
        }

        [name, budget_category]
            .iter()
            .any(|s| !s.is_empty() && description.contains(s.as_str()))
    }
}

/// Match one expense against budgets using the built-in dictionary
pub fn match_budget<'a, B>(expense: &Transaction, budgets: &'a [B]) -> Option<BudgetMatch<'a>>
where
    B: Borrow<Budget>,
{
    BudgetMatcher::new().match_expense(expense, budgets)
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
