//! privscore - Privacy-Need Scoring CLI
//!
//! Command-line interface for assessing how much privacy protection a
//! tabular dataset needs.

use clap::{Parser, Subcommand};
use privscore::anonymity::delta_presence;
use privscore::assess::{assess, classify_names_or_fallback, metric_bag, AssessOptions};
use privscore::classify::{classify_columns, RiskBands, SubsetSearchConfig};
use privscore::compliance::{gdpr_score, hipaa_score, interpret_score};
use privscore::data::Table;
use privscore::detect::{GeminiClassifier, KeywordClassifier, NameClassification, NameClassifier};
use privscore::error::{PrivacyError, Result};
use privscore::score::{
    aggregate, keys, DataDistribution, EncryptionScheme, Localisation, MetricBag, Regulation,
    ScoringConfig,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Privacy-Need Scoring for tabular datasets
#[derive(Parser)]
#[command(name = "privscore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a CSV dataset: classify columns, compute the metric
    /// suite, and score the privacy need
    Assess {
        /// Path to the dataset CSV
        #[arg(short, long)]
        csv: PathBuf,

        /// Reference population CSV for delta-presence
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// Scoring context YAML (regulation, localisation, distribution, encryption)
        #[arg(long)]
        config: Option<PathBuf>,

        /// GDPR per-principle scores YAML (principle -> 0-100)
        #[arg(long)]
        gdpr_scores: Option<PathBuf>,

        /// HIPAA per-safeguard scores YAML (safeguard -> 0-100)
        #[arg(long)]
        hipaa_scores: Option<PathBuf>,

        /// Also classify column names (Gemini when GEMINI_PRO_API_KEY
        /// is set, keyword matching otherwise)
        #[arg(long)]
        names: bool,

        /// Skip the quasi-identifier subset search
        #[arg(long)]
        no_optimize: bool,

        /// Smallest equivalence class a refined subset may produce
        #[arg(long, default_value = "3")]
        min_k: usize,

        /// Output format: yaml or json
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// Classify columns by value distinctness
    Classify {
        /// Path to the dataset CSV
        #[arg(short, long)]
        csv: PathBuf,

        /// Quasi-identifier risk band as "lo,hi"
        #[arg(long, default_value = "0.3,0.8")]
        quasi_band: String,

        /// Sensitive-attribute risk band as "lo,hi"
        #[arg(long, default_value = "0.8,1.0")]
        sensitive_band: String,

        /// Output format: text, json, or yaml
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Score a pre-computed metric bag
    Score {
        /// Metrics YAML (metric key -> value)
        #[arg(short, long)]
        metrics: PathBuf,

        /// Scoring context YAML
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: yaml or json
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// Score a compliance checklist
    Compliance {
        /// Framework: gdpr or hipaa
        #[arg(short, long)]
        framework: String,

        /// Per-principle scores YAML (principle -> 0-100)
        #[arg(short, long)]
        scores: PathBuf,
    },

    /// Write an example scoring config
    Example {
        /// Output path for the YAML config
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assess {
            csv,
            reference,
            config,
            gdpr_scores,
            hipaa_scores,
            names,
            no_optimize,
            min_k,
            format,
        } => cmd_assess(
            &csv,
            reference.as_ref(),
            config.as_ref(),
            gdpr_scores.as_ref(),
            hipaa_scores.as_ref(),
            names,
            no_optimize,
            min_k,
            &format,
        ),

        Commands::Classify {
            csv,
            quasi_band,
            sensitive_band,
            format,
        } => cmd_classify(&csv, &quasi_band, &sensitive_band, &format),

        Commands::Score {
            metrics,
            config,
            format,
        } => cmd_score(&metrics, config.as_ref(), &format),

        Commands::Compliance { framework, scores } => cmd_compliance(&framework, &scores),

        Commands::Example { output } => cmd_example(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Run the full assessment
#[allow(clippy::too_many_arguments)]
fn cmd_assess(
    csv_path: &PathBuf,
    reference_path: Option<&PathBuf>,
    config_path: Option<&PathBuf>,
    gdpr_path: Option<&PathBuf>,
    hipaa_path: Option<&PathBuf>,
    names: bool,
    no_optimize: bool,
    min_k: usize,
    format: &str,
) -> Result<()> {
    eprintln!("Loading dataset from {:?}...", csv_path);
    let table = Table::from_csv_path(csv_path)?;
    eprintln!("Loaded {} rows x {} columns", table.n_rows(), table.n_cols());

    let options = AssessOptions {
        optimize_qids: !no_optimize,
        subset: SubsetSearchConfig {
            min_k,
            ..SubsetSearchConfig::default()
        },
        ..AssessOptions::default()
    };

    eprintln!("Running metric suite...");
    let mut report = assess(&table, &options)?;

    if let Some(path) = reference_path {
        eprintln!("Loading reference from {:?}...", path);
        let reference = Table::from_csv_path(path)?;
        report.delta_presence = Some(delta_presence(&table, &reference)?);
    }

    let name_classes = if names {
        Some(classify_column_names(table.column_names()))
    } else {
        None
    };

    let scoring = load_scoring_config(config_path)?;
    let mut bag = metric_bag(&report, name_classes.as_ref());
    if let Some(path) = gdpr_path {
        bag.set(keys::GDPR_COMPLIANCE, gdpr_score(&read_scores(path)?)?);
    }
    if let Some(path) = hipaa_path {
        bag.set(keys::HIPAA_COMPLIANCE, hipaa_score(&read_scores(path)?)?);
    }
    report.privacy_score = Some(aggregate(&bag, &scoring)?);

    match format {
        "json" => println!("{}", report.to_json()?),
        _ => println!("{}", report.to_yaml()?),
    }

    if let Some(score) = &report.privacy_score {
        eprintln!(
            "Privacy need: {:.1}/100 ({})",
            score.value,
            score.need_level.name()
        );
    }
    if let Some(message) = &report.insufficient {
        eprintln!("Note: {}", message);
    }

    Ok(())
}

/// Classify columns by value distinctness
fn cmd_classify(
    csv_path: &PathBuf,
    quasi_band: &str,
    sensitive_band: &str,
    format: &str,
) -> Result<()> {
    eprintln!("Loading dataset from {:?}...", csv_path);
    let table = Table::from_csv_path(csv_path)?;
    let bands = RiskBands {
        quasi: parse_band(quasi_band)?,
        sensitive: parse_band(sensitive_band)?,
    };

    let classification = classify_columns(&table, &bands)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&classification)?),
        "yaml" => println!("{}", serde_yaml::to_string(&classification)?),
        _ => println!("{}", classification),
    }

    Ok(())
}

/// Score a metric bag loaded from YAML
fn cmd_score(metrics_path: &PathBuf, config_path: Option<&PathBuf>, format: &str) -> Result<()> {
    let bag: MetricBag = serde_yaml::from_str(&std::fs::read_to_string(metrics_path)?)?;
    let config = load_scoring_config(config_path)?;

    let score = aggregate(&bag, &config)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&score)?),
        _ => println!("{}", serde_yaml::to_string(&score)?),
    }
    eprintln!(
        "Privacy need: {:.1}/100 ({})",
        score.value,
        score.need_level.name()
    );

    Ok(())
}

/// Score a compliance checklist
fn cmd_compliance(framework: &str, scores_path: &PathBuf) -> Result<()> {
    let scores = read_scores(scores_path)?;

    let score = match framework.to_lowercase().as_str() {
        "gdpr" => gdpr_score(&scores)?,
        "hipaa" => hipaa_score(&scores)?,
        other => {
            return Err(PrivacyError::InvalidParameter(format!(
                "unknown framework '{}' (expected gdpr or hipaa)",
                other
            )))
        }
    };

    println!("{} compliance: {:.1}/100", framework.to_lowercase(), score);
    println!("{}", interpret_score(score));

    Ok(())
}

/// Write an example scoring config
fn cmd_example(output_path: &PathBuf) -> Result<()> {
    let config = ScoringConfig {
        regulation: Regulation::Gdpr,
        localisation: Localisation::Eu,
        distribution: DataDistribution::Centralized,
        encryption: EncryptionScheme::Symmetric,
    };
    let yaml = config.to_yaml()?;

    std::fs::write(output_path, &yaml)?;
    eprintln!("Wrote example scoring config to {:?}", output_path);
    eprintln!();
    eprintln!("Contents:");
    println!("{}", yaml);

    Ok(())
}

fn classify_column_names(names: &[String]) -> NameClassification {
    match GeminiClassifier::from_env() {
        Ok(gemini) => classify_names_or_fallback(&gemini, names),
        Err(e) => {
            eprintln!("Gemini unavailable ({}); using keyword matching", e);
            KeywordClassifier::new()
                .classify_names(names)
                .unwrap_or_default()
        }
    }
}

fn load_scoring_config(path: Option<&PathBuf>) -> Result<ScoringConfig> {
    match path {
        Some(p) => ScoringConfig::from_yaml(&std::fs::read_to_string(p)?),
        None => Ok(ScoringConfig::default()),
    }
}

fn read_scores(path: &PathBuf) -> Result<BTreeMap<String, f64>> {
    Ok(serde_yaml::from_str(&std::fs::read_to_string(path)?)?)
}

fn parse_band(spec: &str) -> Result<(f64, f64)> {
    let pieces: Vec<&str> = spec.split(',').collect();
    let bounds: Vec<f64> = pieces
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    // Equal lengths means every piece parsed.
    if pieces.len() != 2 || bounds.len() != 2 {
        return Err(PrivacyError::InvalidParameter(format!(
            "band '{}' must be two numbers 'lo,hi'",
            spec
        )));
    }
    Ok((bounds[0], bounds[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_band() {
        assert_eq!(parse_band("0.3,0.8").unwrap(), (0.3, 0.8));
        assert_eq!(parse_band(" 0.8 , 1.0 ").unwrap(), (0.8, 1.0));
    }

    #[test]
    fn test_parse_band_rejects_malformed_specs() {
        assert!(parse_band("0.3").is_err());
        assert!(parse_band("0.3,x").is_err());
        assert!(parse_band("0.3,x,0.8").is_err());
        assert!(parse_band("0.3,0.5,0.8").is_err());
        assert!(parse_band("").is_err());
    }
}
