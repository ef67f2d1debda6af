//! Turn parsed descriptors into output names.

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;

use crate::naming::FontDescriptor;

/// How the weight appears in output names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightLabel {
    /// `Roboto-Black`
    #[default]
    Text,
    /// `Roboto-900`
    Numeric,
}

impl WeightLabel {
    pub fn from_numeric(numeric: bool) -> Self {
        if numeric { WeightLabel::Numeric } else { WeightLabel::Text }
    }
}

/// A family whose files all share a single suffix, so dropping it cannot
/// make two outputs collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixCandidate {
    pub family: String,
    pub suffix: String,
}

/// Per-family answers to "drop the shared suffix?". Families without an
/// answer drop it.
#[derive(Debug, Clone, Default)]
pub struct SuffixDecisions {
    drop: HashMap<String, bool>,
}

impl SuffixDecisions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the suffix for every family in `families`, drop it elsewhere.
    pub fn keep_for<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut decisions = Self::new();
        for family in families {
            decisions.set(family, false);
        }
        decisions
    }

    pub fn set(&mut self, family: impl Into<String>, drop: bool) {
        self.drop.insert(family.into(), drop);
    }

    pub fn drops(&self, family: &str) -> bool {
        self.drop.get(family).copied().unwrap_or(true)
    }
}

/// One file to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPlan {
    pub source_name: String,
    pub family: String,
    /// Target stem without extension.
    pub output_name: String,
}

/// Distinct non-empty suffixes per family, families in first-seen order.
pub fn family_suffixes(fonts: &[FontDescriptor]) -> IndexMap<String, BTreeSet<String>> {
    let mut suffixes: IndexMap<String, BTreeSet<String>> = IndexMap::new();
    for font in fonts {
        let set = suffixes.entry(font.family.clone()).or_default();
        if let Some(suffix) = &font.suffix {
            set.insert(suffix.clone());
        }
    }
    suffixes
}

/// Families eligible for suffix dropping, sorted by family like [`families`].
pub fn suffix_candidates(fonts: &[FontDescriptor]) -> Vec<SuffixCandidate> {
    let mut candidates: Vec<_> = family_suffixes(fonts)
        .into_iter()
        .filter(|(_, set)| set.len() == 1)
        .filter_map(|(family, set)| {
            set.into_iter().next().map(|suffix| SuffixCandidate { family, suffix })
        })
        .collect();
    candidates.sort_by(|a, b| a.family.cmp(&b.family));
    candidates
}

/// Distinct family names, sorted.
pub fn families(fonts: &[FontDescriptor]) -> Vec<String> {
    fonts
        .iter()
        .map(|f| f.family.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Output stem for one font. `drop_suffix` is only honoured by the caller
/// for uniform-suffix families; here it is applied as given.
pub fn output_name(font: &FontDescriptor, label: WeightLabel, drop_suffix: bool) -> String {
    let mut weight = match label {
        WeightLabel::Numeric => font.weight.value.to_string(),
        WeightLabel::Text => font.weight.name.to_string(),
    };
    if font.italic {
        weight.push_str("Italic");
    }

    let mut name = format!("{}-{weight}", font.family);
    if let Some(suffix) = &font.suffix
        && !drop_suffix
    {
        name.push('_');
        name.push_str(suffix);
    }
    name
}

/// One plan per descriptor, in input order.
///
/// Suffixes are dropped only for uniform-suffix families the decisions do
/// not keep; mixed-suffix families always keep theirs.
pub fn build_plans(
    fonts: &[FontDescriptor],
    label: WeightLabel,
    decisions: &SuffixDecisions,
) -> Vec<ConversionPlan> {
    let suffixes = family_suffixes(fonts);

    fonts
        .iter()
        .map(|font| {
            let uniform = suffixes.get(&font.family).is_some_and(|set| set.len() == 1);
            let drop = uniform && decisions.drops(&font.family);
            ConversionPlan {
                source_name: font.filename.clone(),
                family: font.family.clone(),
                output_name: output_name(font, label, drop),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::parse_all;
    use pretty_assertions::assert_eq;

    fn names(plans: &[ConversionPlan]) -> Vec<&str> {
        plans.iter().map(|p| p.output_name.as_str()).collect()
    }

    #[test]
    fn test_text_and_numeric_labels() {
        let fonts = parse_all(["Roboto-Black.ttf", "Roboto-BoldItalic.ttf"]);

        let text = build_plans(&fonts, WeightLabel::Text, &SuffixDecisions::new());
        assert_eq!(names(&text), ["Roboto-Black", "Roboto-BoldItalic"]);

        let numeric = build_plans(&fonts, WeightLabel::Numeric, &SuffixDecisions::new());
        assert_eq!(names(&numeric), ["Roboto-900", "Roboto-700Italic"]);
    }

    #[test]
    fn test_numeric_label_keeps_raw_value() {
        let fonts = parse_all(["Inter-550.ttf"]);
        let text = build_plans(&fonts, WeightLabel::Text, &SuffixDecisions::new());
        assert_eq!(names(&text), ["Inter-SemiBold"]);
        let numeric = build_plans(&fonts, WeightLabel::Numeric, &SuffixDecisions::new());
        assert_eq!(names(&numeric), ["Inter-550"]);
    }

    #[test]
    fn test_uniform_suffix_is_candidate() {
        let fonts = parse_all(["Roboto_Flex-Bold.ttf", "Roboto_Flex-Regular.ttf", "Inter-Bold.ttf"]);
        assert_eq!(
            suffix_candidates(&fonts),
            vec![SuffixCandidate { family: "Roboto".into(), suffix: "Flex".into() }]
        );
    }

    #[test]
    fn test_suffix_candidates_follow_family_order() {
        // Sorted file names put "AB_y" before "A_x"; prompts still go A, AB.
        let fonts = parse_all(["AB_y-Bold.ttf", "A_x-Bold.ttf"]);
        let order: Vec<_> = suffix_candidates(&fonts).into_iter().map(|c| c.family).collect();
        assert_eq!(order, families(&fonts));
        assert_eq!(order, ["A", "AB"]);
    }

    #[test]
    fn test_uniform_suffix_dropped_by_default() {
        let fonts = parse_all(["Roboto_Flex-Bold.ttf", "Roboto_Flex-Regular.ttf"]);
        let plans = build_plans(&fonts, WeightLabel::Text, &SuffixDecisions::new());
        assert_eq!(names(&plans), ["Roboto-Bold", "Roboto-Regular"]);
    }

    #[test]
    fn test_uniform_suffix_kept_on_request() {
        let fonts = parse_all(["Roboto_Flex-Bold.ttf", "Roboto_Flex-Regular.ttf"]);
        let decisions = SuffixDecisions::keep_for(["Roboto"]);
        let plans = build_plans(&fonts, WeightLabel::Text, &decisions);
        assert_eq!(names(&plans), ["Roboto-Bold_Flex", "Roboto-Regular_Flex"]);
    }

    #[test]
    fn test_mixed_suffixes_always_kept() {
        let fonts = parse_all(["Roboto_Condensed-Bold.ttf", "Roboto_Serif-Bold.ttf"]);
        assert!(suffix_candidates(&fonts).is_empty());

        let mut decisions = SuffixDecisions::new();
        decisions.set("Roboto", true);
        let plans = build_plans(&fonts, WeightLabel::Text, &decisions);
        assert_eq!(names(&plans), ["Roboto-Bold_Condensed", "Roboto-Bold_Serif"]);
    }

    #[test]
    fn test_partial_suffix_family_is_candidate() {
        // Only one distinct suffix, even though not every file carries it.
        let fonts = parse_all(["Inter_Display-Bold.ttf", "Inter-Bold.ttf"]);
        assert_eq!(suffix_candidates(&fonts).len(), 1);
        let plans = build_plans(&fonts, WeightLabel::Text, &SuffixDecisions::new());
        assert_eq!(names(&plans), ["Inter-Bold", "Inter-Bold"]);
    }

    #[test]
    fn test_plans_preserve_order_and_sources() {
        let fonts = parse_all(["B-Bold.ttf", "A-Thin.ttf", "B-Thin.ttf"]);
        let plans = build_plans(&fonts, WeightLabel::Text, &SuffixDecisions::new());
        assert_eq!(
            plans,
            vec![
                ConversionPlan {
                    source_name: "B-Bold.ttf".into(),
                    family: "B".into(),
                    output_name: "B-Bold".into(),
                },
                ConversionPlan {
                    source_name: "A-Thin.ttf".into(),
                    family: "A".into(),
                    output_name: "A-Thin".into(),
                },
                ConversionPlan {
                    source_name: "B-Thin.ttf".into(),
                    family: "B".into(),
                    output_name: "B-Thin".into(),
                },
            ]
        );
        assert_eq!(families(&fonts), ["A", "B"]);
    }

    #[test]
    fn test_family_suffixes_first_seen_order() {
        let fonts = parse_all(["Z_a-Bold.ttf", "A-Bold.ttf", "Z_b-Bold.ttf"]);
        let suffixes = family_suffixes(&fonts);
        let keys: Vec<_> = suffixes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Z", "A"]);
        assert_eq!(suffixes["Z"].len(), 2);
        assert!(suffixes["A"].is_empty());
    }
}
