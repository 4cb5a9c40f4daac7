use curve_blend::curve::{self, Curve, Lut};
use curve_blend::scoring::{
    axis_labels, build_heatmap, composite_score, resolve_weights, try_composite_score,
    validate_inputs, BlendPipeline, InputPolicy, InputRange, OutputPolicy, ScoreSettings, TableKind, WeightSide,
    GRID_SIZE,
};
use curve_blend::{evaluate, BlendError};

fn identity() -> Curve {
    curve::preset("manual").unwrap()
}

// Straight line from (0, 0) to (2, 2): weights run up to ~2.
fn steep() -> Curve {
    Curve::from_pairs(&[(0.0, 0.0), (2.0, 2.0)]).unwrap()
}

#[test]
fn weight_side_selects_lut_axis() {
    let lut = Lut::sample(&Curve::from_pairs(&[(0.0, 1.0), (1.0, 0.0)]).unwrap());
    let point = lut.at(30);

    let views_primary = resolve_weights(30, &lut, WeightSide::ViewsPrimary);
    assert_eq!(views_primary.views, point.x);
    assert_eq!(views_primary.earnings, point.y);

    let earnings_primary = resolve_weights(30, &lut, WeightSide::EarningsPrimary);
    assert_eq!(earnings_primary.views, point.y);
    assert_eq!(earnings_primary.earnings, point.x);
}

#[test]
fn identity_curve_weights_are_symmetric() {
    let lut = Lut::sample(&identity());

    for index in 0..100 {
        for side in [WeightSide::ViewsPrimary, WeightSide::EarningsPrimary] {
            let weights = resolve_weights(index, &lut, side);
            assert!((weights.views - weights.earnings).abs() < 1e-12);
        }
    }
}

#[test]
fn weight_lookup_clamps_index_but_not_values() {
    let lut = Lut::sample(&steep());

    let top = resolve_weights(100, &lut, WeightSide::ViewsPrimary);
    assert!((top.views - 2.0).abs() < 1e-9);
    assert!((top.earnings - 2.0).abs() < 1e-9);

    let bottom = resolve_weights(-20, &lut, WeightSide::ViewsPrimary);
    assert_eq!(bottom.views, 0.0);
}

#[test]
fn end_to_end_identity_examples() {
    let lut = Lut::sample(&identity());
    let settings = ScoreSettings::new(WeightSide::EarningsPrimary, true);

    // Both metrics at the maximum: nothing to weight, full score after inversion.
    assert_eq!(composite_score(100, 100, &lut, &settings), 100);

    // Lookup index 1 samples (1/99, 1/99): raw = round(99/99 + 99/99) = 2.
    assert_eq!(composite_score(1, 1, &lut, &settings), 98);

    // Weights at index 99 are exactly 1: raw = 50 + 1.
    assert_eq!(composite_score(50, 99, &lut, &settings), 49);
}

#[test]
fn lookup_uses_raw_earnings_and_weights_inverted_distance() {
    let lut = Lut::sample(&Curve::from_pairs(&[(0.0, 0.0), (1.0, 0.0)]).unwrap());
    let settings = ScoreSettings::new(WeightSide::ViewsPrimary, false);

    // Views weight = x = 99/99 at earnings 99; earnings weight = y = 0.
    assert_eq!(composite_score(20, 99, &lut, &settings), 80);
    // Views weight at earnings 0 is 0.
    assert_eq!(composite_score(20, 0, &lut, &settings), 0);
}

#[test]
fn composite_score_is_deterministic() {
    let lut = Lut::sample(&curve::preset("rand1").unwrap());
    let settings = ScoreSettings::new(WeightSide::EarningsPrimary, true);

    let first = composite_score(37, 64, &lut, &settings);
    for _ in 0..10 {
        assert_eq!(composite_score(37, 64, &lut, &settings), first);
    }
}

#[test]
fn inputs_are_clamped_to_the_configured_range() {
    let lut = Lut::sample(&curve::preset("rand1").unwrap());
    let settings = ScoreSettings::new(WeightSide::EarningsPrimary, true);

    assert_eq!(
        composite_score(140, -3, &lut, &settings),
        composite_score(100, 0, &lut, &settings)
    );

    let narrow = settings.with_range(InputRange { min: 1, max: 100 });
    assert_eq!(
        composite_score(0, 0, &lut, &narrow),
        composite_score(1, 1, &lut, &narrow)
    );
}

#[test]
fn strict_inputs_are_rejected() {
    let lut = Lut::sample(&identity());
    let strict = ScoreSettings::new(WeightSide::EarningsPrimary, true).with_input(InputPolicy::Reject);

    assert_eq!(
        try_composite_score(101, 50, &lut, &strict).unwrap_err(),
        BlendError::OutOfRangeInput {
            name: "views",
            value: 101,
            min: 0,
            max: 100
        }
    );
    assert!(matches!(
        try_composite_score(50, -1, &lut, &strict),
        Err(BlendError::OutOfRangeInput { name: "earnings", .. })
    ));
    assert_eq!(
        try_composite_score(50, 50, &lut, &strict).unwrap(),
        composite_score(50, 50, &lut, &strict)
    );

    let lenient = strict.with_input(InputPolicy::Clamp);
    assert_eq!(
        try_composite_score(101, 50, &lut, &lenient).unwrap(),
        composite_score(100, 50, &lut, &lenient)
    );
}

#[test]
fn pass_through_output_leaves_the_score_range() {
    let lut = Lut::sample(&steep());
    let settings = ScoreSettings::new(WeightSide::ViewsPrimary, false);

    // Weights 100/99 each: round(150 * 100 / 99) = 152.
    assert_eq!(composite_score(0, 50, &lut, &settings), 152);

    let inverted = ScoreSettings::new(WeightSide::ViewsPrimary, true);
    assert_eq!(composite_score(0, 50, &lut, &inverted), -52);
}

#[test]
fn clamp_output_keeps_scores_in_range() {
    let lut = Lut::sample(&steep());
    let settings =
        ScoreSettings::new(WeightSide::ViewsPrimary, false).with_output(OutputPolicy::Clamp);
    assert_eq!(composite_score(0, 50, &lut, &settings), 100);

    let inverted = ScoreSettings { invert: true, ..settings };
    assert_eq!(composite_score(0, 50, &lut, &inverted), 0);

    let matrix = build_heatmap(&lut, &settings);
    assert!(matrix.min() >= 0);
    assert!(matrix.max() <= 100);
}

#[test]
fn extreme_weights_saturate_instead_of_overflowing() {
    let sinking = Lut::sample(&Curve::from_pairs(&[(0.0, 0.0), (-1e10, -1e10)]).unwrap());
    let soaring = Lut::sample(&Curve::from_pairs(&[(0.0, 0.0), (1e10, 1e10)]).unwrap());

    // (lut, invert, pass-through result, clamped result) at views 0, earnings 99.
    let cases = [
        (&sinking, true, i32::MAX, 100),
        (&sinking, false, i32::MIN, 0),
        (&soaring, true, i32::MIN, 0),
        (&soaring, false, i32::MAX, 100),
    ];
    for (lut, invert, pass_through, clamped) in cases {
        let settings = ScoreSettings::new(WeightSide::EarningsPrimary, invert);
        assert_eq!(composite_score(0, 99, lut, &settings), pass_through);

        let settings = settings.with_output(OutputPolicy::Clamp);
        assert_eq!(composite_score(0, 99, lut, &settings), clamped);
    }

    let matrix = build_heatmap(
        &sinking,
        &ScoreSettings::new(WeightSide::ViewsPrimary, true).with_output(OutputPolicy::Clamp),
    );
    assert!(matrix.min() >= 0);
    assert!(matrix.max() <= 100);
}

#[test]
fn full_i32_input_range_does_not_overflow() {
    let lut = Lut::sample(&identity());
    let wide = InputRange {
        min: i32::MIN,
        max: i32::MAX,
    };

    for invert in [false, true] {
        let settings = ScoreSettings::new(WeightSide::EarningsPrimary, invert).with_range(wide);
        let flip = |score: i32| if invert { 100 - score } else { score };

        // Earnings index clamps to 0 where the identity weights are 0.
        assert_eq!(composite_score(i32::MIN, i32::MIN, &lut, &settings), flip(0));
        // Unit weights: (100 - MIN) + (100 - MAX) = 201.
        assert_eq!(composite_score(i32::MIN, i32::MAX, &lut, &settings), flip(201));
        // Midway weight on a huge distance stays inside i32.
        let mid = composite_score(i32::MIN, 50, &lut, &settings);
        assert!((i64::from(flip(mid)) - 1_084_587_777).abs() <= 1);

        let both_max = composite_score(i32::MAX, i32::MAX, &lut, &settings);
        assert_eq!(both_max, if invert { i32::MAX } else { i32::MIN });

        let clamped = settings.with_output(OutputPolicy::Clamp);
        assert_eq!(
            composite_score(i32::MAX, i32::MAX, &lut, &clamped),
            if invert { 100 } else { 0 }
        );
        assert_eq!(
            composite_score(i32::MIN, i32::MAX, &lut, &clamped),
            if invert { 0 } else { 100 }
        );
    }
}

#[test]
fn validate_inputs_checks_only_given_values_under_reject() {
    let lenient = ScoreSettings::default();
    assert!(validate_inputs(Some(-50), Some(500), &lenient).is_ok());

    let strict = lenient.with_input(InputPolicy::Reject);
    assert!(validate_inputs(None, None, &strict).is_ok());
    assert!(validate_inputs(Some(0), Some(100), &strict).is_ok());
    assert!(validate_inputs(None, Some(55), &strict).is_ok());
    assert_eq!(
        validate_inputs(None, Some(101), &strict).unwrap_err(),
        BlendError::OutOfRangeInput {
            name: "earnings",
            value: 101,
            min: 0,
            max: 100
        }
    );
    assert!(matches!(
        validate_inputs(Some(-1), None, &strict),
        Err(BlendError::OutOfRangeInput { name: "views", .. })
    ));
}

#[test]
fn heatmap_is_a_full_grid() {
    let lut = Lut::sample(&curve::preset("drawed1").unwrap());
    let settings = ScoreSettings::new(WeightSide::EarningsPrimary, true);
    let matrix = build_heatmap(&lut, &settings);

    assert_eq!(matrix.size(), GRID_SIZE);
    assert!(matrix.rows().iter().all(|row| row.len() == GRID_SIZE));
    assert_eq!(matrix.get(12, 87), composite_score(12, 87, &lut, &settings));
    assert_eq!(matrix.get(87, 12), composite_score(87, 12, &lut, &settings));
}

#[test]
fn heatmap_rebuild_is_stable() {
    let lut = Lut::sample(&curve::preset("rand1").unwrap());
    let settings = ScoreSettings::new(WeightSide::EarningsPrimary, true);

    assert_eq!(build_heatmap(&lut, &settings), build_heatmap(&lut, &settings));
}

#[test]
fn invert_flag_mirrors_every_cell() {
    let lut = Lut::sample(&curve::preset("drawed1").unwrap());
    let plain = ScoreSettings::new(WeightSide::EarningsPrimary, false);
    let inverted = ScoreSettings::new(WeightSide::EarningsPrimary, true);

    let a = build_heatmap(&lut, &plain);
    let b = build_heatmap(&lut, &inverted);
    for views in 0..GRID_SIZE {
        for earnings in 0..GRID_SIZE {
            assert_eq!(b.get(views, earnings), 100 - a.get(views, earnings));
        }
    }

    let twice = ScoreSettings { invert: !inverted.invert, ..inverted };
    assert_eq!(build_heatmap(&lut, &twice), a);
}

#[test]
fn axis_labels_are_one_based() {
    let labels = axis_labels();

    assert_eq!(labels.views.len(), 100);
    assert_eq!(labels.earnings.len(), 100);
    assert_eq!(labels.views[0], "VS 1");
    assert_eq!(labels.earnings[99], "ES 100");
}

#[test]
fn csv_export_has_header_and_rows() {
    let pipeline = BlendPipeline::new(&identity(), ScoreSettings::default());
    let csv = pipeline.heatmap().to_csv();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 101);
    assert!(lines[0].starts_with("views,0,1,2"));
    assert_eq!(lines[1].split(',').count(), 101);
}

#[test]
fn diagonal_table_walks_down_from_the_maximum() {
    let pipeline = BlendPipeline::new(
        &identity(),
        ScoreSettings::new(WeightSide::EarningsPrimary, true),
    );
    let rows = pipeline.table(TableKind::Diagonal);

    assert_eq!(rows.len(), 100);
    assert_eq!((rows[0].earnings, rows[0].views), (100, 100));
    assert_eq!(rows[0].score, 100);
    assert_eq!((rows[99].earnings, rows[99].views), (1, 1));
    assert_eq!(rows[99].score, pipeline.score(1, 1));
    assert_eq!(rows[0].weight, pipeline.lut().at(99));
}

#[test]
fn cross_table_trades_views_for_earnings() {
    let pipeline = BlendPipeline::new(
        &curve::preset("rand1").unwrap(),
        ScoreSettings::new(WeightSide::EarningsPrimary, true),
    );
    let rows = pipeline.table(TableKind::Cross);

    for (step, row) in rows.iter().enumerate() {
        assert_eq!(row.earnings, step as i32);
        assert_eq!(row.views, 100 - step as i32);
        assert_eq!(row.score, pipeline.score(row.views, row.earnings));
        assert_eq!(row.weight, pipeline.lut().at(row.earnings));
    }
}

#[test]
fn evaluate_bundles_score_weights_and_grid() {
    let curve = identity();
    let settings = ScoreSettings::new(WeightSide::EarningsPrimary, true);
    let evaluation = evaluate(&curve, settings, 100, 100).unwrap();

    assert_eq!(evaluation.score, 100);
    assert!((evaluation.weights.views - 1.0).abs() < 1e-9);
    assert_eq!(evaluation.heatmap.size(), 100);
    assert_eq!(evaluation.labels.views.len(), 100);
    assert_eq!(evaluation.curve_id, curve.fingerprint());

    let strict = settings.with_input(InputPolicy::Reject);
    assert!(evaluate(&curve, strict, 120, 100).is_err());
}
