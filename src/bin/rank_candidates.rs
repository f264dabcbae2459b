//! Ranks candidate companies against a target from a JSON file.
//!
//! Usage: `rank_candidates <input.json> [min_score]`
//!
//! The input holds `{ "target": {...}, "candidates": [...], "options": {...} }`
//! in the same shape the HTTP API accepts.

use anyhow::Context;
use company_similarity_api::handlers::{validate_options, validate_profile, BatchRequest};
use company_similarity_api::similarity::compare_similarities;
use std::env;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let path = args
        .next()
        .context("usage: rank_candidates <input.json> [min_score]")?;
    let min_score: Option<u8> = args
        .next()
        .map(|raw| raw.parse().context("min_score must be an integer 0-100"))
        .transpose()?;

    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let mut request: BatchRequest =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path))?;
    if min_score.is_some() {
        request.options.min_score = min_score;
    }

    validate_profile(&request.target).map_err(|e| anyhow::anyhow!("target: {}", e))?;
    validate_options(&request.options).map_err(|e| anyhow::anyhow!("{}", e))?;
    for candidate in &request.candidates {
        validate_profile(candidate).map_err(|e| anyhow::anyhow!("candidate: {}", e))?;
    }

    println!("=== Similar companies for {} ===\n", request.target.name);

    let report = compare_similarities(&request.target, &request.candidates, &request.options);

    for comparison in &report.comparisons {
        let score = &comparison.similarity;
        println!(
            "{:>3}. {:<40} {:>3}  {:<9} {:<6}",
            comparison.rank,
            comparison.candidate.name,
            score.overall_score,
            format!("{:?}", score.tier).to_lowercase(),
            format!("{:?}", score.confidence).to_lowercase(),
        );
        for reason in &score.reasons {
            println!("       - {}", reason);
        }
    }

    let stats = &report.statistics;
    println!("\n=== Summary ===");
    println!("Ranked:    {}", report.comparisons.len());
    println!(
        "Scores:    avg {} / max {} / min {}",
        stats.avg_score, stats.max_score, stats.min_score
    );
    println!(
        "Tiers:     {} excellent, {} premium, {} qualified",
        stats.excellent_count, stats.premium_count, stats.qualified_count
    );

    Ok(())
}
