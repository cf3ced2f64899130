use matriz_core::config::ConfigError;
use matriz_core::{
    AnalysisConfig, ColorCatalog, ColorSchema, Journal, SemanticCatalog, SequenceAnalyzer,
    SequenceCatalog, SimilarityTable,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    println!(
        "Loaded config: k={} seed={} restarts={} vocabulary={}",
        config.default_k, config.seed, config.restarts, config.vocabulary_size
    );

    let schema = ColorSchema::with_words(config.word_column.clone());
    let colors = ColorCatalog::from_path("data/colors.csv", &schema)?;
    let sequences = SequenceCatalog::from_reader(std::fs::File::open("data/sequences.csv")?)?;
    let semantic = SemanticCatalog::from_reader(std::fs::File::open("data/semantic.csv")?)?;

    let table = SimilarityTable::precompute(&colors);
    for (a, b) in [("red", "crimson"), ("Red", " BLUE "), ("white", "white")] {
        let score = table.lookup(a, b)?;
        println!(
            "{a:>8} · {b:<8} dot={:>9.1} percentile={:>6.2}",
            score.dot_product, score.similarity_percentile
        );
    }

    let analyzer = SequenceAnalyzer::new(config.clone());
    let analysis = analyzer.analyze(&colors, &sequences, Some(&semantic), config.default_k)?;

    println!("Vocabulary ({} terms)", analysis.vocabulary.len());
    for (id, cluster) in &analysis.clusters {
        println!(
            "cluster {id}: {} colors, top {:?}",
            cluster.count, cluster.top_colors
        );
    }
    for scored in &analysis.top_sequences {
        println!("{:<28} momentum {:.3}", scored.sequence, scored.momentum);
    }

    let journal = Journal::default();
    journal.log_similarity(&table)?;
    journal.log_analysis(&analysis)?;

    println!("{}", serde_json::to_string_pretty(&analysis.report())?);
    Ok(())
}

fn load_config() -> Result<AnalysisConfig, ConfigError> {
    AnalysisConfig::load_from_file("config/matriz.toml").or_else(|err| {
        eprintln!("Falling back to default config: {err}");
        Ok(AnalysisConfig::default())
    })
}
