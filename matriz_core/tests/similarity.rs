use matriz_core::{
    ColorCatalog, ColorRecord, ColorSchema, MatrizError, SimilarityOutcome, SimilarityState,
    SimilarityTable,
};

const CATALOG: &str = "color,r,g,b\n\
Red,255,0,0\n\
Blue,0,0,255\n\
Teal,0,128,128\n\
Ghost,10,,10\n\
Static,noise,3,4\n";

fn sample_catalog() -> ColorCatalog {
    ColorCatalog::from_csv_str(CATALOG, &ColorSchema::channels_only()).expect("catalog parses")
}

#[test]
fn red_blue_round_trip() {
    let catalog = ColorCatalog::from_records(vec![
        ColorRecord::rgb("red", 255.0, 0.0, 0.0),
        ColorRecord::rgb("blue", 0.0, 0.0, 255.0),
    ]);
    let table = SimilarityTable::precompute(&catalog);

    assert_eq!(table.dot_product("blue", "red"), Some(0.0));
    assert_eq!(table.max_dot_product(), 65025.0);

    let score = table.lookup("Red", " BLUE ").expect("pair resolves");
    assert_eq!(score.dot_product, 0.0);
    assert_eq!(score.similarity_percentile, 0.0);
}

#[test]
fn max_dot_product_covers_every_pair() {
    let catalog = sample_catalog();
    let table = SimilarityTable::precompute(&catalog);

    let expected = table
        .iter()
        .map(|(_, value)| *value)
        .fold(0.0f64, f64::max);
    assert_eq!(table.max_dot_product(), expected);
    assert!(table.iter().all(|(_, value)| *value <= table.max_dot_product()));
}

#[test]
fn rows_with_uncoercible_channels_are_excluded() {
    let catalog = sample_catalog();
    assert_eq!(catalog.issues().len(), 1);

    let table = SimilarityTable::precompute(&catalog);
    // red, blue, teal survive: 3 * 4 / 2 pairs
    assert_eq!(table.len(), 6);
    assert!(table.lookup("ghost", "red").is_err());
    assert!(table.lookup("static", "red").is_err());
}

#[test]
fn lookup_symmetry_over_catalog() {
    let table = SimilarityTable::precompute(&sample_catalog());
    let names = ["red", "blue", "teal"];
    for a in names {
        for b in names {
            assert_eq!(table.lookup(a, b), table.lookup(b, a), "{a} vs {b}");
        }
    }
}

#[test]
fn unknown_pair_yields_structured_failure() {
    let table = SimilarityTable::precompute(&sample_catalog());
    let outcome = SimilarityOutcome::from(table.lookup("red", "chartreuse"));
    assert_eq!(
        outcome,
        SimilarityOutcome::Failure {
            error: "Color pair not found.".to_string()
        }
    );
}

#[test]
fn state_requires_initialization() {
    let state = SimilarityState::new();
    assert!(matches!(
        state.lookup("red", "blue"),
        Err(MatrizError::UninitializedState { .. })
    ));

    state.initialize(&sample_catalog());
    let score = state.lookup("teal", "TEAL").expect("initialized");
    assert_eq!(score.dot_product, 2.0 * 128.0 * 128.0);
    assert_eq!(
        score.similarity_percentile,
        ((2.0 * 128.0 * 128.0) / 65025.0 * 100.0 * 100.0f64).round() / 100.0
    );
}
