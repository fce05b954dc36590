//! # Submission Analyzer
//!
//! Command-line tool to check a submission file for cheating.

use candlecast_security::scoring::{breakdown, recompute};
use candlecast_security::{SubmissionVerifier, VerifierConfig};
use candlecast_shared::Submission;
use std::fs::File;
use std::io::BufReader;

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         CANDLECAST SUBMISSION ANALYZER                           ║");
    println!("║         THE SCORE REFEREE                                        ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        println!("Usage: submission_analyzer <submission.json>");
        println!();
        println!("Options:");
        println!("  --verbose          Show per-round breakdown");
        println!("  --config <path>    Verifier thresholds (TOML)");
        return;
    }

    let submission_path = &args[1];
    let verbose = args.iter().any(|a| a == "--verbose");
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1));

    let config = match config_path {
        Some(path) => match VerifierConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                println!("Error: {e}");
                return;
            }
        },
        None => VerifierConfig::default(),
    };

    println!("Loading submission: {submission_path}");

    let file = match File::open(submission_path) {
        Ok(f) => f,
        Err(e) => {
            println!("Error: Could not open file: {e}");
            return;
        }
    };

    let submission: Submission = match serde_json::from_reader(BufReader::new(file)) {
        Ok(s) => s,
        Err(e) => {
            println!("Error: Malformed submission: {e}");
            return;
        }
    };

    println!();
    println!("┌─ SUBMISSION INFO ──────────────────────────────────────────────┐");
    println!("│ Player:             {}", submission.player_name);
    println!("│ Rounds:             {}", submission.rounds.len());
    println!("│ Claimed Score:      {:.2}", submission.claimed_score);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    let rows = breakdown(&submission.rounds);

    if verbose {
        println!("┌─ ROUNDS ───────────────────────────────────────────────────────┐");
        for row in &rows {
            println!(
                "│ #{:<5} {:<6} error {:>8.3}  trusted {:>7.2}  claimed {:>8.2}  drift {:>8.2}",
                row.index,
                if row.direction_correct { "HIT" } else { "MISS" },
                row.accuracy_error,
                row.trusted_points,
                row.claimed_points,
                row.drift(),
            );
        }
        println!("└──────────────────────────────────────────────────────────────────┘");
        println!();
    }

    let verifier = SubmissionVerifier::new(&config);
    let plausibility = verifier
        .validator()
        .check(submission.claimed_score, &submission.rounds);
    let recomputed = recompute(&submission.rounds);
    let verdict = verifier.verify(&submission);

    println!("┌─ ANALYSIS RESULTS ────────────────────────────────────────────┐");
    match &plausibility {
        Ok(()) => println!("│ Plausibility:       pass"),
        Err(e) => println!("│ Plausibility:       FAIL ({e})"),
    }
    println!("│ Recomputed Score:   {recomputed:.2}");
    println!(
        "│ Drift:              {:.2} (tolerance {:.2})",
        submission.claimed_score - recomputed,
        verifier.tolerance().value()
    );
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    match verdict.reason {
        None => println!("✓ Accepted - leaderboard score {:.2}", verdict.recomputed_score),
        Some(reason) => println!("⚠ Rejected: {reason:?} (\"{}\")", reason.public_message()),
    }
}
