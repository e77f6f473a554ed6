//! hammock classify - Show which phase a trade label maps to

use clap::Args;
use itertools::Itertools;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{self, HumanLayout};
use crate::core::phase::{strip_code_prefix, PhaseRule};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Trade label (category2), e.g. "A04_철근콘크리트공사"
    pub category2: String,

    /// Work-type label (category1), consulted when no trade keyword matches
    #[arg(long, default_value = "")]
    pub category1: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "by", rename_all = "snake_case")]
enum MatchedBy {
    Keyword { keyword: String },
    WorkType,
    CatchAll,
}

#[derive(Serialize)]
struct Classification<'a> {
    category1: &'a str,
    category2: &'a str,
    trade: &'a str,
    phase: &'a str,
    order: u32,
    icon: &'a str,
    matched: MatchedBy,
}

pub fn run(ctx: &AppContext, args: &ClassifyArgs) -> Result<()> {
    let table = ctx.config.phase_table();
    let trade = strip_code_prefix(&args.category2);
    let rule = table.classify(&args.category1, &args.category2);
    let matched = matched_by(rule, trade, rule == table.catch_all());

    let result = Classification {
        category1: &args.category1,
        category2: &args.category2,
        trade,
        phase: &rule.phase,
        order: rule.order,
        icon: &rule.icon,
        matched,
    };

    if ctx.robot_mode() {
        return output::emit_robot(&output::robot_ok(&result));
    }

    let how = match &result.matched {
        MatchedBy::Keyword { keyword } => format!("keyword \"{keyword}\""),
        MatchedBy::WorkType => format!("work type \"{}\"", result.category1),
        MatchedBy::CatchAll => "no rule (catch-all)".to_string(),
    };
    let keywords = if rule.keywords.is_empty() {
        "-".to_string()
    } else {
        rule.keywords.iter().join(", ")
    };

    let mut layout = HumanLayout::new();
    layout
        .title("Classification")
        .kv("Trade", result.trade)
        .kv("Phase", result.phase)
        .kv("Order", &result.order.to_string())
        .kv("Matched by", &how)
        .kv("Keywords", &keywords);
    output::emit_human(layout);
    Ok(())
}

fn matched_by(rule: &PhaseRule, trade: &str, catch_all: bool) -> MatchedBy {
    if catch_all {
        return MatchedBy::CatchAll;
    }
    rule.keywords
        .iter()
        .find(|k| !k.is_empty() && trade.contains(k.as_str()))
        .map_or(MatchedBy::WorkType, |k| MatchedBy::Keyword {
            keyword: k.clone(),
        })
}
