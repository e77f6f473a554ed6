//! Construction phase classification.
//!
//! Work items carry a work-type label (`category1`) and a trade label
//! (`category2`). A [`PhaseTable`] maps them onto an ordered set of
//! construction phases:
//!
//! 1. strip a leading code tag such as `A01_` from the trade label,
//! 2. the first rule (in table order) with a keyword contained in the trade
//!    label wins,
//! 3. otherwise the category fallbacks are checked against the work-type
//!    label, in order,
//! 4. otherwise the catch-all rule applies.
//!
//! Matching is plain substring containment; no case folding or Unicode
//! normalization is performed.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Order assigned to the catch-all phase; sorts after every real phase.
pub const CATCH_ALL_ORDER: u32 = 99;

/// Default label for items no rule recognises.
pub const CATCH_ALL_PHASE: &str = "기타공사";

static CODE_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]\d+_").unwrap());

/// One row of the phase table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRule {
    /// Substrings searched for in the (prefix-stripped) trade label.
    pub keywords: Vec<String>,
    /// Phase name; also the roll-up key.
    pub phase: String,
    /// Position in the construction sequence.
    pub order: u32,
    /// Display hint, passed through untouched.
    #[serde(default)]
    pub icon: String,
}

impl PhaseRule {
    pub fn new(keywords: &[&str], phase: &str, order: u32, icon: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            phase: phase.to_string(),
            order,
            icon: icon.to_string(),
        }
    }

    /// The synthetic rule for unclassifiable items.
    pub fn catch_all(phase: &str) -> Self {
        Self {
            keywords: Vec::new(),
            phase: phase.to_string(),
            order: CATCH_ALL_ORDER,
            icon: String::new(),
        }
    }

    fn matches(&self, label: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| !k.is_empty() && label.contains(k.as_str()))
    }
}

/// Work-type fallback: when no trade keyword matches, any of `keywords`
/// found in `category1` routes the item to the rule named `phase`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFallback {
    pub keywords: Vec<String>,
    pub phase: String,
}

impl CategoryFallback {
    pub fn new(keywords: &[&str], phase: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            phase: phase.to_string(),
        }
    }
}

/// Ordered classification table.
#[derive(Debug, Clone)]
pub struct PhaseTable {
    rules: Vec<PhaseRule>,
    fallbacks: Vec<(Vec<String>, usize)>,
    catch_all: PhaseRule,
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self::new(
            default_rules(),
            &default_fallbacks(),
            PhaseRule::catch_all(CATCH_ALL_PHASE),
        )
    }
}

impl PhaseTable {
    /// Build a table. Fallbacks naming a phase that has no rule are dropped.
    pub fn new(rules: Vec<PhaseRule>, fallbacks: &[CategoryFallback], catch_all: PhaseRule) -> Self {
        let fallbacks = fallbacks
            .iter()
            .filter_map(|fb| {
                let idx = rules.iter().position(|r| r.phase == fb.phase);
                if idx.is_none() {
                    warn!(phase = %fb.phase, "Category fallback targets unknown phase; ignored");
                }
                idx.map(|i| (fb.keywords.clone(), i))
            })
            .collect();

        Self {
            rules,
            fallbacks,
            catch_all,
        }
    }

    pub fn rules(&self) -> &[PhaseRule] {
        &self.rules
    }

    pub fn catch_all(&self) -> &PhaseRule {
        &self.catch_all
    }

    /// Resolve the phase for a work item. Always returns a rule.
    pub fn classify(&self, category1: &str, category2: &str) -> &PhaseRule {
        let trade = strip_code_prefix(category2);
        if let Some(rule) = self.rules.iter().find(|r| r.matches(trade)) {
            return rule;
        }

        for (keywords, idx) in &self.fallbacks {
            if keywords
                .iter()
                .any(|k| !k.is_empty() && category1.contains(k.as_str()))
            {
                let rule = &self.rules[*idx];
                trace!(category1, phase = %rule.phase, "Classified by work-type fallback");
                return rule;
            }
        }

        trace!(category1, category2, "Unclassified; using catch-all");
        &self.catch_all
    }
}

/// Remove a leading code tag (`A01_`, `B2_`) from a trade label.
pub fn strip_code_prefix(label: &str) -> &str {
    CODE_PREFIX_REGEX
        .find(label)
        .map_or(label, |m| &label[m.end()..])
}

/// The standard ten-phase building sequence.
pub fn default_rules() -> Vec<PhaseRule> {
    vec![
        PhaseRule::new(&["공통가설", "가설"], "가설공사", 1, "🔧"),
        PhaseRule::new(&["토공", "흙막이", "파일"], "토공/기초공사", 2, "⛏️"),
        PhaseRule::new(&["철근콘크리트", "철골"], "구조체공사 (RC/S)", 3, "🏗️"),
        PhaseRule::new(&["방수", "지붕", "홈통"], "방수/지붕공사", 4, "🛡️"),
        PhaseRule::new(
            &[
                "조적", "미장", "타일", "목공", "수장", "금속", "창호", "유리", "칠", "도장", "돌공",
                "골재", "운반",
            ],
            "마감공사",
            5,
            "🎨",
        ),
        PhaseRule::new(
            &[
                "배관", "덕트", "장비설치", "위생기구", "냉난방", "환기", "수영장", "바닥난방",
                "가스", "메탈히터", "열교환", "히트펌프", "항온항습", "기계실", "자동제어", "여과",
                "축열", "지중열",
            ],
            "기계설비공사",
            6,
            "⚙️",
        ),
        PhaseRule::new(&["전기"], "전기공사", 7, "⚡"),
        PhaseRule::new(
            &["토목", "우수", "오수", "급수", "포장", "구조물"],
            "토목/외구공사",
            8,
            "🛤️",
        ),
        PhaseRule::new(&["식재", "시설물", "조경", "부대"], "조경공사", 9, "🌿"),
        PhaseRule::new(&["소방"], "소방공사", 10, "🚒"),
    ]
}

/// Work-type fallbacks, checked in this order.
pub fn default_fallbacks() -> Vec<CategoryFallback> {
    vec![
        CategoryFallback::new(&["토목"], "토목/외구공사"),
        CategoryFallback::new(&["조경"], "조경공사"),
        CategoryFallback::new(&["기계", "설비"], "기계설비공사"),
        CategoryFallback::new(&["전기"], "전기공사"),
    ]
}
