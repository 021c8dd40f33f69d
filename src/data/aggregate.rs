//! The nine chart projections. Each is a pure function of a [`FilteredView`]
//! and returns an empty projection, never an error, for an empty view.

use std::collections::BTreeMap;

use super::filter::FilteredView;
use super::model::{generation_order, Record, Stat, ALL_STATS, BASE_STATS};
use super::stats::{self, BoxSummary};

/// Rows kept by the height and weight rankings.
pub const TOP_N: usize = 10;

/// Special groups compared side by side, in legend order.
pub const COMPARED_GROUPS: [&str; 2] = ["Ordinary", "Legendary"];

// ---------------------------------------------------------------------------
// Projection shapes
// ---------------------------------------------------------------------------

/// Record counts per category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCounts {
    pub rows: Vec<(String, usize)>,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.rows.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Raw values of one box: a category, optionally split by series.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionGroup {
    pub category: String,
    pub series: Option<String>,
    pub values: Vec<f64>,
}

impl DistributionGroup {
    pub fn summary(&self) -> Option<BoxSummary> {
        BoxSummary::from_values(&self.values)
    }
}

/// Un-aggregated values per category for box plots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    /// Axis order of the categories, including ones with no values.
    pub category_order: Vec<String>,
    /// Non-empty groups only.
    pub groups: Vec<DistributionGroup>,
}

impl Distribution {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Series names in first-seen order.
    pub fn series(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for group in &self.groups {
            if let Some(s) = &group.series {
                if !names.contains(s) {
                    names.push(s.clone());
                }
            }
        }
        names
    }
}

/// Square, symmetric matrix of pairwise Pearson coefficients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationMatrix {
    pub stats: Vec<Stat>,
    /// Row-major; `values[i][j]` pairs `stats[i]` with `stats[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: Stat, b: Stat) -> Option<f64> {
        let i = self.stats.iter().position(|&s| s == a)?;
        let j = self.stats.iter().position(|&s| s == b)?;
        Some(self.values[i][j])
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

/// One ranked row.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub name: String,
    pub value: f64,
}

/// Names ranked by a metric, descending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    pub rows: Vec<RankedEntry>,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One long-form row: the mean of `stat` within group `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatMean {
    pub key: String,
    pub stat: Stat,
    pub value: f64,
}

/// Per-group stat means, melted to one row per (group, stat).
/// Rows are ordered by stat, then by group key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongStats {
    pub rows: Vec<StatMean>,
}

impl LongStats {
    /// Group keys in row order, deduplicated.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for row in &self.rows {
            if !keys.contains(&row.key) {
                keys.push(row.key.clone());
            }
        }
        keys
    }

    pub fn get(&self, key: &str, stat: Stat) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.key == key && r.stat == stat)
            .map(|r| r.value)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

/// Count of records per primary type, in the table's type order.
pub fn type_histogram(view: &FilteredView<'_>) -> CategoryCounts {
    let rows = view
        .table()
        .types()
        .iter()
        .filter_map(|ty| {
            let n = view.records().filter(|r| &r.type1 == ty).count();
            (n > 0).then(|| (ty.clone(), n))
        })
        .collect();
    CategoryCounts { rows }
}

/// Attack values per generation.
pub fn attack_by_generation(view: &FilteredView<'_>) -> Distribution {
    let order = view.table().generations().to_vec();
    let groups = order
        .iter()
        .filter_map(|generation| {
            let values: Vec<f64> = view
                .records()
                .filter(|r| &r.generation == generation)
                .map(|r| r.attack)
                .collect();
            (!values.is_empty()).then(|| DistributionGroup {
                category: generation.clone(),
                series: None,
                values,
            })
        })
        .collect();
    Distribution {
        category_order: order,
        groups,
    }
}

/// Base stats of ordinary versus legendary creatures, one box per
/// (stat, group). Other special groups are left out.
pub fn special_group_comparison(view: &FilteredView<'_>) -> Distribution {
    let mut groups = Vec::new();
    for stat in BASE_STATS {
        for group in COMPARED_GROUPS {
            let values: Vec<f64> = view
                .records()
                .filter(|r| r.special_group == group)
                .map(|r| r.stat(stat))
                .collect();
            if !values.is_empty() {
                groups.push(DistributionGroup {
                    category: stat.label().to_string(),
                    series: Some(group.to_string()),
                    values,
                });
            }
        }
    }
    Distribution {
        category_order: BASE_STATS.iter().map(|s| s.label().to_string()).collect(),
        groups,
    }
}

/// Pairwise Pearson correlation over all six stats.
///
/// Cells involving a constant column are NaN; diagonal cells of a varying
/// column are exactly 1. An empty view yields an empty matrix.
pub fn stat_correlation(view: &FilteredView<'_>) -> CorrelationMatrix {
    if view.is_empty() {
        return CorrelationMatrix::default();
    }

    let columns: Vec<Vec<f64>> = ALL_STATS
        .iter()
        .map(|&stat| view.records().map(|r| r.stat(stat)).collect())
        .collect();

    let n = ALL_STATS.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        values[i][i] = if stats::has_variance(&columns[i]) {
            1.0
        } else {
            f64::NAN
        };
        for j in (i + 1)..n {
            let r = stats::pearson(&columns[i], &columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        stats: ALL_STATS.to_vec(),
        values,
    }
}

/// The [`TOP_N`] tallest names, by each name's maximum height.
pub fn top_by_height(view: &FilteredView<'_>) -> Ranking {
    top_by(view, |r| r.height, TOP_N)
}

/// The [`TOP_N`] heaviest names, by each name's maximum weight.
pub fn top_by_weight(view: &FilteredView<'_>) -> Ranking {
    top_by(view, |r| r.weight, TOP_N)
}

fn top_by(view: &FilteredView<'_>, metric: impl Fn(&Record) -> f64, limit: usize) -> Ranking {
    let mut best: BTreeMap<&str, f64> = BTreeMap::new();
    for rec in view.records() {
        let value = metric(rec);
        if value.is_nan() {
            continue;
        }
        best.entry(rec.name.as_str())
            .and_modify(|v| *v = v.max(value))
            .or_insert(value);
    }

    let mut rows: Vec<RankedEntry> = best
        .into_iter()
        .map(|(name, value)| RankedEntry {
            name: name.to_string(),
            value,
        })
        .collect();
    // Stable sort over name-ordered input: ties stay alphabetical.
    rows.sort_by(|a, b| b.value.total_cmp(&a.value));
    rows.truncate(limit);
    Ranking { rows }
}

/// Mean of the four base stats per generation, ordered by
/// [`generation_order`].
pub fn mean_stats_by_generation(view: &FilteredView<'_>) -> LongStats {
    let mut groups: Vec<(String, Vec<&Record>)> = Vec::new();
    for rec in view.records() {
        match groups.iter_mut().find(|(g, _)| g == &rec.generation) {
            Some((_, recs)) => recs.push(rec),
            None => groups.push((rec.generation.clone(), vec![rec])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| generation_order(a, b));
    melt_means(&groups, &BASE_STATS)
}

/// Speed values per primary type.
pub fn speed_by_type(view: &FilteredView<'_>) -> Distribution {
    let order = view.table().types().to_vec();
    let groups = order
        .iter()
        .filter_map(|ty| {
            let values: Vec<f64> = view
                .records()
                .filter(|r| &r.type1 == ty)
                .map(|r| r.speed)
                .collect();
            (!values.is_empty()).then(|| DistributionGroup {
                category: ty.clone(),
                series: None,
                values,
            })
        })
        .collect();
    Distribution {
        category_order: order,
        groups,
    }
}

/// Mean of all six stats per primary type, types in alphabetical order.
pub fn mean_stats_by_type(view: &FilteredView<'_>) -> LongStats {
    let mut by_type: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();
    for rec in view.records() {
        by_type.entry(rec.type1.as_str()).or_default().push(rec);
    }
    let groups = by_type
        .into_iter()
        .map(|(ty, recs)| (ty.to_string(), recs))
        .collect::<Vec<_>>();
    melt_means(&groups, &ALL_STATS)
}

fn melt_means(groups: &[(String, Vec<&Record>)], stats: &[Stat]) -> LongStats {
    let mut rows = Vec::with_capacity(groups.len() * stats.len());
    for &stat in stats {
        for (key, recs) in groups {
            let values: Vec<f64> = recs.iter().map(|r| r.stat(stat)).collect();
            rows.push(StatMean {
                key: key.clone(),
                stat,
                value: stats::mean(&values),
            });
        }
    }
    LongStats { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply_filters, Choice, Selection};
    use crate::data::model::Table;
    use crate::data::testutil::{record, scenario_table};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn gen1() -> Selection {
        Selection {
            generation: Choice::Only("1".to_string()),
            type1: Choice::All,
        }
    }

    fn nothing() -> Selection {
        Selection {
            generation: Choice::Only("2".to_string()),
            type1: Choice::Only("Fire".to_string()),
        }
    }

    #[test]
    fn scenario_histogram_and_generation_mean() {
        let table = scenario_table();
        let view = apply_filters(&table, &gen1());

        let hist = type_histogram(&view);
        assert_eq!(hist.rows, vec![("Fire".to_string(), 2)]);

        let means = mean_stats_by_generation(&view);
        assert_eq!(means.get("1", Stat::Hp), Some(15.0));
        assert_eq!(means.keys(), vec!["1"]);
        assert_eq!(means.rows.len(), BASE_STATS.len());
    }

    #[test]
    fn histogram_counts_sum_to_view_size() {
        let table = scenario_table();
        for selection in [Selection::default(), gen1(), nothing()] {
            let view = apply_filters(&table, &selection);
            assert_eq!(type_histogram(&view).total(), view.len());
        }
    }

    #[test]
    fn histogram_follows_table_type_order() {
        let table = Table::from_records(vec![
            record(1, "A", "Water", 1, "Ordinary", 10.0),
            record(2, "B", "Fire", 2, "Ordinary", 10.0),
            record(3, "C", "Fire", 1, "Ordinary", 10.0),
        ])
        .unwrap();
        let view = apply_filters(&table, &gen1());
        let hist = type_histogram(&view);
        let labels: Vec<&str> = hist.rows.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(labels, vec!["Water", "Fire"]);
    }

    #[test]
    fn empty_view_gives_empty_projections() {
        let table = scenario_table();
        let view = apply_filters(&table, &nothing());
        assert!(view.is_empty());

        assert!(type_histogram(&view).rows.is_empty());
        assert!(attack_by_generation(&view).is_empty());
        assert!(special_group_comparison(&view).is_empty());
        assert!(stat_correlation(&view).is_empty());
        assert!(top_by_height(&view).rows.is_empty());
        assert!(top_by_weight(&view).rows.is_empty());
        assert!(mean_stats_by_generation(&view).rows.is_empty());
        assert!(speed_by_type(&view).is_empty());
        assert!(mean_stats_by_type(&view).rows.is_empty());
    }

    #[test]
    fn attack_distribution_groups_by_generation() {
        let table = scenario_table();
        let view = apply_filters(&table, &Selection::default());
        let dist = attack_by_generation(&view);

        assert_eq!(dist.category_order, vec!["1", "2"]);
        assert_eq!(dist.groups.len(), 2);
        assert_eq!(dist.groups[0].values, vec![20.0, 40.0]);
        assert_eq!(dist.groups[1].values, vec![60.0]);
    }

    #[test]
    fn comparison_is_ordered_by_stat_then_group() {
        let table = Table::from_records(vec![
            record(1, "A", "Fire", 1, "Legendary", 10.0),
            record(2, "B", "Fire", 1, "Ordinary", 20.0),
            record(3, "C", "Fire", 1, "Mythical", 30.0),
        ])
        .unwrap();
        let view = apply_filters(&table, &Selection::default());
        let dist = special_group_comparison(&view);

        let keys: Vec<(String, String)> = dist
            .groups
            .iter()
            .map(|g| (g.category.clone(), g.series.clone().unwrap()))
            .collect();
        assert_eq!(keys.len(), 8);
        assert_eq!(keys[0], ("hp".to_string(), "Ordinary".to_string()));
        assert_eq!(keys[1], ("hp".to_string(), "Legendary".to_string()));
        assert_eq!(keys[7], ("speed".to_string(), "Legendary".to_string()));
        assert_eq!(dist.series(), vec!["Ordinary", "Legendary"]);
        // Mythical rows are not part of either box.
        assert!(dist.groups.iter().all(|g| g.values.len() == 1));
    }

    #[test]
    fn correlation_is_symmetric_with_unit_diagonal() {
        let table = Table::from_records(vec![
            Record {
                speed: 50.0,
                ..record(1, "A", "Fire", 1, "Ordinary", 10.0)
            },
            Record {
                speed: 10.0,
                ..record(2, "B", "Fire", 1, "Ordinary", 40.0)
            },
            Record {
                speed: 90.0,
                ..record(3, "C", "Fire", 1, "Ordinary", 25.0)
            },
        ])
        .unwrap();
        let view = apply_filters(&table, &Selection::default());
        let corr = stat_correlation(&view);

        assert_eq!(corr.stats, ALL_STATS.to_vec());
        for &a in &ALL_STATS {
            assert_eq!(corr.get(a, a), Some(1.0));
            for &b in &ALL_STATS {
                let ab = corr.get(a, b).unwrap();
                let ba = corr.get(b, a).unwrap();
                assert_eq!(ab.to_bits(), ba.to_bits());
                assert!((-1.0..=1.0).contains(&ab));
            }
        }
        assert!((corr.get(Stat::Hp, Stat::Attack).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_with_constant_column_is_nan() {
        let table = Table::from_records(vec![
            Record {
                speed: 50.0,
                ..record(1, "A", "Fire", 1, "Ordinary", 10.0)
            },
            Record {
                speed: 50.0,
                ..record(2, "B", "Fire", 1, "Ordinary", 20.0)
            },
        ])
        .unwrap();
        let view = apply_filters(&table, &Selection::default());
        let corr = stat_correlation(&view);

        assert!(corr.get(Stat::Speed, Stat::Speed).unwrap().is_nan());
        assert!(corr.get(Stat::Speed, Stat::Hp).unwrap().is_nan());
        assert!(corr.get(Stat::Hp, Stat::Speed).unwrap().is_nan());
        assert_eq!(corr.get(Stat::Hp, Stat::Hp), Some(1.0));
    }

    #[test]
    fn missing_stat_is_left_out_pairwise() {
        let table = Table::from_records(vec![
            record(1, "A", "Fire", 1, "Ordinary", 10.0),
            Record {
                hp: f64::NAN,
                ..record(2, "B", "Fire", 1, "Ordinary", 20.0)
            },
            record(3, "C", "Fire", 1, "Ordinary", 30.0),
        ])
        .unwrap();
        let view = apply_filters(&table, &Selection::default());

        let corr = stat_correlation(&view);
        assert_eq!(corr.get(Stat::Hp, Stat::Hp), Some(1.0));
        let hp_attack = corr.get(Stat::Hp, Stat::Attack).unwrap();
        assert!(hp_attack.is_finite());
        assert!((hp_attack - 1.0).abs() < 1e-12);
        assert_eq!(corr.get(Stat::Attack, Stat::Hp), Some(hp_attack));

        let means = mean_stats_by_generation(&view);
        assert_eq!(means.get("1", Stat::Hp), Some(20.0));
        assert_eq!(means.get("1", Stat::Attack), Some(40.0));
    }

    #[test]
    fn generation_means_sort_numerically() {
        let table = Table::from_records(vec![
            record(1, "A", "Fire", 10, "Ordinary", 10.0),
            record(2, "B", "Fire", 2, "Ordinary", 20.0),
            record(3, "C", "Fire", 1, "Ordinary", 30.0),
        ])
        .unwrap();
        let view = apply_filters(&table, &Selection::default());

        assert_eq!(mean_stats_by_generation(&view).keys(), vec!["1", "2", "10"]);
        assert_eq!(
            attack_by_generation(&view).category_order,
            vec!["10", "2", "1"]
        );
    }

    #[test]
    fn single_row_correlation_is_all_nan() {
        let table = Table::from_records(vec![record(1, "A", "Fire", 1, "Ordinary", 10.0)]).unwrap();
        let view = apply_filters(&table, &Selection::default());
        let corr = stat_correlation(&view);

        assert_eq!(corr.values.len(), ALL_STATS.len());
        assert!(corr.values.iter().flatten().all(|v| v.is_nan()));
    }

    #[test]
    fn top_ten_is_bounded_sorted_and_uses_max_per_name() {
        let mut records = Vec::new();
        for i in 0..15u32 {
            records.push(record(i + 1, &format!("N{i:02}"), "Fire", 1, "Ordinary", i as f64 + 1.0));
        }
        // A second form of N00 that outgrows everything else.
        records.push(Record {
            height: 99.0,
            ..record(100, "N00", "Fire", 1, "Ordinary", 1.0)
        });
        let table = Table::from_records(records).unwrap();
        let view = apply_filters(&table, &Selection::default());

        let top = top_by_height(&view);
        assert_eq!(top.rows.len(), TOP_N);
        assert_eq!(top.rows[0].name, "N00");
        assert_eq!(top.rows[0].value, 99.0);
        assert!(top.rows.windows(2).all(|w| w[0].value >= w[1].value));
        let n00 = top.rows.iter().filter(|r| r.name == "N00").count();
        assert_eq!(n00, 1);
    }

    #[test]
    fn top_ten_never_exceeds_distinct_names() {
        let table = scenario_table();
        let view = apply_filters(&table, &gen1());

        let top = top_by_weight(&view);
        assert_eq!(top.rows.len(), 2);
        assert_eq!(top.rows[0].name, "B");
        assert_eq!(top.rows[0].value, 80.0);
    }

    #[test]
    fn speed_distribution_keeps_table_type_order() {
        let table = scenario_table();
        let view = apply_filters(&table, &Selection::default());
        let dist = speed_by_type(&view);

        assert_eq!(dist.category_order, vec!["Fire", "Water"]);
        assert_eq!(dist.groups[0].values, vec![90.0, 80.0]);
        assert_eq!(dist.groups[1].category, "Water");
    }

    #[test]
    fn type_means_are_melted_stat_major() {
        let table = Table::from_records(vec![
            record(1, "A", "Water", 1, "Ordinary", 10.0),
            record(2, "B", "Fire", 1, "Ordinary", 20.0),
            record(3, "C", "Fire", 1, "Ordinary", 40.0),
        ])
        .unwrap();
        let view = apply_filters(&table, &Selection::default());
        let means = mean_stats_by_type(&view);

        assert_eq!(means.rows.len(), 2 * ALL_STATS.len());
        assert_eq!(means.keys(), vec!["Fire", "Water"]);
        assert_eq!(means.rows[0].stat, Stat::Hp);
        assert_eq!(means.rows[1].stat, Stat::Hp);
        assert_eq!(means.get("Fire", Stat::Hp), Some(30.0));
        assert_eq!(means.get("Fire", Stat::SpAtk), Some(90.0));
        assert_eq!(means.get("Water", Stat::SpDef), Some(5.0));
    }

    // -----------------------------------------------------------------------
    // Properties over random catalogs and selections
    // -----------------------------------------------------------------------

    const TYPES: [&str; 3] = ["Fire", "Water", "Grass"];
    const GROUPS: [&str; 3] = ["Ordinary", "Legendary", "Mythical"];

    fn arb_table() -> impl Strategy<Value = Table> {
        let row = (
            0..TYPES.len(),
            1u32..4,
            0..GROUPS.len(),
            0u32..12,
            prop::array::uniform6(1.0f64..200.0),
            0.1f64..20.0,
            1.0f64..500.0,
        );
        prop::collection::vec(row, 0..40).prop_map(|rows| {
            let records = rows
                .into_iter()
                .enumerate()
                .map(|(i, (ty, generation, group, name, s, height, weight))| Record {
                    dexnum: i as u32 + 1,
                    name: format!("N{name}"),
                    type1: TYPES[ty].to_string(),
                    generation: generation.to_string(),
                    special_group: GROUPS[group].to_string(),
                    hp: s[0],
                    attack: s[1],
                    defense: s[2],
                    speed: s[3],
                    sp_atk: s[4],
                    sp_def: s[5],
                    height,
                    weight,
                })
                .collect();
            Table::from_records(records).expect("dexnums are unique")
        })
    }

    /// Generation 4 and type index 3 ("Dragon") never occur in [`arb_table`].
    fn arb_selection() -> impl Strategy<Value = Selection> {
        (
            prop::option::of(1u32..5),
            prop::option::of(0..TYPES.len() + 1),
        )
            .prop_map(|(generation, ty)| Selection {
                generation: generation.map_or(Choice::All, |g| Choice::Only(g.to_string())),
                type1: ty.map_or(Choice::All, |t| {
                    Choice::Only(TYPES.get(t).copied().unwrap_or("Dragon").to_string())
                }),
            })
    }

    proptest! {
        #[test]
        fn view_is_the_matching_subset_in_table_order(
            table in arb_table(),
            selection in arb_selection()
        ) {
            let view = apply_filters(&table, &selection);
            let expected: Vec<u32> = table
                .records()
                .iter()
                .filter(|r| selection.matches(r))
                .map(|r| r.dexnum)
                .collect();
            let got: Vec<u32> = view.records().map(|r| r.dexnum).collect();
            prop_assert_eq!(got, expected);
            prop_assert!(view.indices().windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn all_all_keeps_every_row(table in arb_table()) {
            let view = apply_filters(&table, &Selection::default());
            prop_assert_eq!(view.len(), table.len());
        }

        #[test]
        fn histogram_counts_cover_the_view(
            table in arb_table(),
            selection in arb_selection()
        ) {
            let view = apply_filters(&table, &selection);
            let hist = type_histogram(&view);
            prop_assert_eq!(hist.total(), view.len());
            prop_assert!(hist.rows.iter().all(|(_, n)| *n > 0));
        }

        #[test]
        fn correlation_is_symmetric_and_bounded(
            table in arb_table(),
            selection in arb_selection()
        ) {
            let view = apply_filters(&table, &selection);
            let corr = stat_correlation(&view);
            if view.is_empty() {
                prop_assert!(corr.is_empty());
            } else {
                for &a in &ALL_STATS {
                    let column: Vec<f64> = view.records().map(|r| r.stat(a)).collect();
                    let diagonal = corr.get(a, a).unwrap();
                    if stats::has_variance(&column) {
                        prop_assert_eq!(diagonal, 1.0);
                    } else {
                        prop_assert!(diagonal.is_nan());
                    }
                    for &b in &ALL_STATS {
                        let ab = corr.get(a, b).unwrap();
                        let ba = corr.get(b, a).unwrap();
                        prop_assert_eq!(ab.to_bits(), ba.to_bits());
                        prop_assert!(ab.is_nan() || (-1.0..=1.0).contains(&ab));
                    }
                }
            }
        }

        #[test]
        fn rankings_are_bounded_descending_and_distinct(
            table in arb_table(),
            selection in arb_selection()
        ) {
            let view = apply_filters(&table, &selection);
            let names: BTreeSet<&str> = view.records().map(|r| r.name.as_str()).collect();

            for top in [top_by_height(&view), top_by_weight(&view)] {
                prop_assert_eq!(top.rows.len(), names.len().min(TOP_N));
                prop_assert!(top.rows.windows(2).all(|w| w[0].value >= w[1].value));
                let ranked: BTreeSet<&str> = top.rows.iter().map(|r| r.name.as_str()).collect();
                prop_assert_eq!(ranked.len(), top.rows.len());
            }
        }
    }
}
