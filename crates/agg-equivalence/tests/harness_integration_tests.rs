#![cfg(feature = "test")]
use agg_equivalence::{
    base::database::{batch_utility::*, Batch, Value},
    harness::{
        assert_aggregation, check_aggregation, split_batch, AggregationHarness, EqualityRule,
        HarnessConfig, Strategy, StrategyRunner,
    },
    testing::{Average, Count, CountAll, CountDistinct, MaxVarChar, Sum, WeightedSum},
};
use proptest::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn runner(
    function: &dyn agg_equivalence::aggregation::AggregationFunction,
    channel_count: usize,
) -> StrategyRunner<'_> {
    StrategyRunner::new(
        function,
        EqualityRule::Exact,
        HarnessConfig::default(),
        channel_count,
    )
}

/// Cuts `values` into consecutive batches at the given (unsorted, possibly repeated) positions.
fn cut(values: &[i64], cuts: &[usize]) -> Vec<Batch> {
    let mut bounds = cuts
        .iter()
        .map(|cut| cut % (values.len() + 1))
        .collect::<Vec<_>>();
    bounds.push(0);
    bounds.push(values.len());
    bounds.sort_unstable();
    bounds
        .windows(2)
        .map(|window| batch([bigint(values[window[0]..window[1]].iter().copied())]))
        .collect()
}

#[test]
fn we_can_assert_a_sum_of_small_integers_under_every_strategy() {
    init_tracing();
    let input = batch([bigint([1, 2, 3, 4])]);
    let batches = split_batch(&input).unwrap();
    assert_eq!(batches.len(), 2);
    let function = Sum::new();
    for strategy in Strategy::ALL {
        assert_eq!(
            runner(&function, 1).run(strategy, &batches),
            Ok(Value::BigInt(10))
        );
    }
    assert_aggregation(&function, 10_i64, vec![bigint([1, 2, 3, 4])]);
}

#[test]
fn we_can_assert_a_count_over_zero_rows_under_every_strategy() {
    init_tracing();
    assert_aggregation(&Count::new(), 0_i64, vec![bigint([0; 0])]);
    assert_aggregation(&CountAll::new(), 0_i64, vec![bigint([0; 0])]);
}

#[test]
fn we_can_mask_off_a_duplicate_row() {
    init_tracing();
    let function = Count::new();
    let masked = runner(&function, 1)
        .aggregation_with(
            &[0],
            Some(1),
            &[batch([bigint([5, 5]), boolean([true, false])])],
        )
        .unwrap();
    let deduplicated = runner(&function, 1)
        .aggregation_with(&[0], None, &[batch([bigint([5])])])
        .unwrap();
    assert_eq!(masked, deduplicated);
    assert_eq!(masked, Value::BigInt(1));
}

#[test]
fn we_can_assert_aggregations_of_every_shape() {
    init_tracing();
    assert_aggregation(&Average::new(), 2.5, vec![double_range(1, 4)]);
    assert_aggregation(
        &WeightedSum::new(),
        Value::Null,
        vec![nullable_double([None]), bigint([3])],
    );
    assert_aggregation(&CountDistinct::new(), 3_i64, vec![bigint([3, 1, 3, 2, 1])]);
    AggregationHarness::new(&MaxVarChar::new())
        .with_description("max of strings")
        .assert(
            "pear",
            vec![nullable_varchar([Some("apple"), None, Some("pear"), Some("fig")])],
        );
}

proptest! {
    #[test]
    fn we_can_merge_any_split_of_a_sum(
        values in prop::collection::vec(-1000_i64..1000, 0..40),
        cuts in prop::collection::vec(any::<usize>(), 0..5),
    ) {
        let function = Sum::new();
        let whole = batch([bigint(values.iter().copied())]);
        let direct = runner(&function, 1).aggregation_with(&[0], None, &[whole]).unwrap();
        let merged = runner(&function, 1).partial_aggregation_with(&[0], &cut(&values, &cuts)).unwrap();
        prop_assert_eq!(&merged, &direct);
        let expected = if values.is_empty() { Value::Null } else { Value::BigInt(values.iter().sum()) };
        prop_assert_eq!(direct, expected.clone());
        prop_assert!(check_aggregation(&function, expected, vec![bigint(values)]).is_ok());
    }

    #[test]
    fn we_can_aggregate_under_any_group_id(
        values in prop::collection::vec(-1000_i64..1000, 1..20),
        large_group_id in 1_u64..100_000,
    ) {
        let function = Count::new();
        let config = HarnessConfig { large_group_id, ..HarnessConfig::default() };
        let runner = StrategyRunner::new(&function, EqualityRule::Exact, config, 1);
        let batches = split_batch(&batch([bigint(values.iter().copied())])).unwrap();
        let count = i64::try_from(values.len()).unwrap();
        prop_assert_eq!(runner.grouped_aggregation(&batches), Ok(Value::BigInt(count)));
    }

    #[test]
    fn we_can_mask_off_any_duplicated_input(
        values in prop::collection::vec(0_i64..10, 0..20),
    ) {
        let function = CountDistinct::new();
        let batches = split_batch(&batch([bigint(values.iter().copied())])).unwrap();
        let runner = runner(&function, 1);
        let distinct = runner.distinct_aggregation(&batches).unwrap();
        prop_assert_eq!(runner.aggregation(&batches), Ok(distinct));
    }
}
