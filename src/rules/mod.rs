//! Ordered text-substitution engine for taxonomy normalization.
//!
//! The source spreadsheets carry free-text taxonomy fields (sectors,
//! statuses, roles, countries) with inconsistent legacy terminology.
//! These converge onto the target vocabulary through ordered lists of
//! substitution rules rather than value-by-value mapping tables.
//!
//! Rules are data, not code: each list is a static slice of
//! [`Rule`] values applied strictly in sequence, so tests can enumerate
//! and verify ordering independently. A rule replaces every occurrence
//! of its matcher within the cell text (substring semantics, not
//! whole-cell equality); it is non-recursive, but later rules in the
//! list do act on text produced by earlier rules. Several pipelines
//! exploit that deliberately, protecting compound terms behind `@@…@@`
//! placeholder tokens before a broader rule fires and restoring them
//! afterwards. Preserve the order, not just the rule set.
//!
//! Null and non-text cells pass through unchanged.

pub mod tables;

use serde_json::Value;

/// How a rule finds its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Exact substring match anywhere in the cell.
    Literal(&'static str),
    /// Word-boundary match, for short tokens that also occur inside
    /// longer words (`UK` in `Ukraine`, `Power` in compound sector names).
    WholeWord(&'static str),
}

/// One ordered substitution: replace every match with the replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub matcher: Matcher,
    pub replacement: &'static str,
}

/// Shorthand for a literal-substring rule.
pub const fn lit(find: &'static str, replacement: &'static str) -> Rule {
    Rule {
        matcher: Matcher::Literal(find),
        replacement,
    }
}

/// Shorthand for a word-boundary rule.
pub const fn word(find: &'static str, replacement: &'static str) -> Rule {
    Rule {
        matcher: Matcher::WholeWord(find),
        replacement,
    }
}

/// Apply an ordered rule list to a string.
pub fn apply_rules(text: &str, rules: &[Rule]) -> String {
    let mut out = text.to_string();
    for rule in rules {
        out = match rule.matcher {
            Matcher::Literal(find) => out.replace(find, rule.replacement),
            Matcher::WholeWord(find) => {
                let pattern = format!(r"\b{}\b", regex::escape(find));
                match regex::Regex::new(&pattern) {
                    Ok(re) => re.replace_all(&out, rule.replacement).into_owned(),
                    Err(_) => out,
                }
            }
        };
    }
    out
}

/// Apply a rule list to a cell. Only text cells are rewritten.
pub fn apply_rules_cell(value: &Value, rules: &[Rule]) -> Value {
    match value {
        Value::String(s) => Value::String(apply_rules(s, rules)),
        other => other.clone(),
    }
}

/// Collapse runs of whitespace to single spaces and trim the ends.
/// Runs as a separate pass before the name substitution rules so phrase
/// matchers see canonical spacing.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse whitespace in a text cell.
pub fn collapse_whitespace_cell(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(collapse_whitespace(s)),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_substring_replace() {
        let rules = [lit("and", "&")];
        assert_eq!(apply_rules("A and B and C", &rules), "A & B & C");
    }

    #[test]
    fn test_whole_word_does_not_match_inside_words() {
        let rules = [word("UK", "United Kingdom")];
        assert_eq!(apply_rules("UK", &rules), "United Kingdom");
        assert_eq!(apply_rules("Ukraine", &rules), "Ukraine");
        assert_eq!(apply_rules("Europe - UK", &rules), "Europe - United Kingdom");
    }

    #[test]
    fn test_later_rules_act_on_earlier_output() {
        let rules = [lit("alpha", "beta"), lit("beta", "gamma")];
        assert_eq!(apply_rules("alpha", &rules), "gamma");
    }

    #[test]
    fn test_non_text_cells_pass_through() {
        let rules = [lit("1", "one")];
        assert_eq!(apply_rules_cell(&json!(100), &rules), json!(100));
        assert_eq!(apply_rules_cell(&Value::Null, &rules), Value::Null);
        assert_eq!(apply_rules_cell(&json!("v1"), &rules), json!("vone"));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  A   B \t C  "), "A B C");
        assert_eq!(collapse_whitespace(""), "");
    }

    // Known troublesome sector inputs, against the full ordered pipeline.
    #[test]
    fn test_sector_pipeline_vectors() {
        let r = tables::SECTOR_RULES;
        assert_eq!(apply_rules("Coal-fired", r), "Coal-Fired Power");
        assert_eq!(apply_rules("Biomass", r), "Biofuels/Biomass");
        assert_eq!(apply_rules("Biofuels", r), "Biofuels/Biomass");
        assert_eq!(
            apply_rules("Coal-fired, Biomass", r),
            "Coal-Fired Power, Biofuels/Biomass"
        );
    }

    #[test]
    fn test_sector_pipeline_idempotent() {
        let r = tables::SECTOR_RULES;
        for input in [
            "Coal-fired",
            "Coal",
            "Power",
            "Other Power",
            "Biofuels",
            "Biomass",
            "Biofuels/Biomass",
            "Coal-fired, Biomass",
            "Non-core",
            "Data Centres",
            "Hospitals",
        ] {
            let once = apply_rules(input, r);
            let twice = apply_rules(&once, r);
            assert_eq!(once, twice, "not idempotent for input {input:?}");
        }
    }

    #[test]
    fn test_bare_coal_is_not_coal_fired() {
        assert_eq!(apply_rules("Coal", tables::SECTOR_RULES), "Mineral Mining");
    }

    #[test]
    fn test_bare_power_becomes_other_power() {
        assert_eq!(apply_rules("Power", tables::SECTOR_RULES), "Other Power");
        // Already-normalized compound must survive the generic Power rule.
        assert_eq!(
            apply_rules("Coal-Fired Power", tables::SECTOR_RULES),
            "Coal-Fired Power"
        );
    }

    #[test]
    fn test_biofuels_guard_prevents_double_substitution() {
        assert_eq!(
            apply_rules("Biofuels/Biomass", tables::SECTOR_RULES),
            "Biofuels/Biomass"
        );
    }

    #[test]
    fn test_beyond_infrastructure_entry_survives_full_table() {
        // The remap table's first entry: its replacement must not be
        // touched by any later rule in the list.
        let out = apply_rules("Non-core", tables::SECTOR_RULES);
        assert_eq!(out, "Other Beyond Infrastructure");
        assert_eq!(apply_rules(&out, tables::SECTOR_RULES), out);
    }

    #[test]
    fn test_no_placeholder_leaks() {
        for input in ["Coal-fired", "Other Power", "Biofuels", "Coal, Power, Biomass"] {
            let out = apply_rules(input, tables::SECTOR_RULES);
            assert!(!out.contains("@@"), "placeholder leaked in {out:?}");
        }
    }

    #[test]
    fn test_plural_remap_ordered_before_singular() {
        // "Data Centres" must not leave a trailing "s" behind.
        assert_eq!(apply_rules("Data Centres", tables::SECTOR_RULES), "Telecoms");
        assert_eq!(apply_rules("Data Centre", tables::SECTOR_RULES), "Telecoms");
    }

    #[test]
    fn test_country_rules() {
        let r = tables::COUNTRY_RULES;
        assert_eq!(apply_rules("UK", r), "United Kingdom");
        assert_eq!(apply_rules("Ukraine", r), "Ukraine");
        assert_eq!(apply_rules("Europe - USA", r), "Europe - United States");
        assert_eq!(apply_rules("Viet Nam", r), "Vietnam");
    }

    #[test]
    fn test_contract_rules_longest_abbreviation_first() {
        let r = tables::CONTRACT_RULES;
        assert_eq!(apply_rules("DBFOM", r), "Design-Build-Finance-Operate-Maintain");
        assert_eq!(apply_rules("DBFO", r), "Design-Build-Finance-Operate");
        assert_eq!(apply_rules("BOT", r), "Build-Operate-Transfer");
    }

    #[test]
    fn test_name_rules_strip_boilerplate() {
        let r = tables::NAME_RULES;
        let cleaned = apply_rules(
            &collapse_whitespace("Acquisition of  Thames Water and Affinity"),
            r,
        );
        assert_eq!(cleaned, "Thames Water & Affinity");
    }
}
