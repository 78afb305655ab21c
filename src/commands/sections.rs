use crate::*;

pub fn handle_section_commands(
    cli: &Cli,
    config: &DashboardConfig,
    cache: &mut ArtifactCache,
) -> anyhow::Result<bool> {
    let thresholds = &config.thresholds;
    match &cli.command {
        Commands::Classify { prob } => {
            let result = Classification {
                prob_default: *prob,
                policy_decision: classify_with(*prob, thresholds),
                auto_approve_max: thresholds.auto_approve_max,
                auto_reject_min: thresholds.auto_reject_min,
            };
            print_one(cli.json, result, |c| c.policy_decision.to_string())?;
        }
        Commands::Outcomes => {
            let artifacts = cache.load(&config.artifacts)?;
            if let Some(w) = inversion_warning(thresholds) {
                tracing::warn!("{}", w);
            }
            let report = outcomes_report(&artifacts.decision, thresholds);
            print_one(cli.json, report, render_outcomes)?;
        }
        Commands::Decisions { limit } => {
            let artifacts = cache.load(&config.artifacts)?;
            let rows = decision_rows(&artifacts.decision, thresholds, *limit);
            print_one(cli.json, rows, |r| render_decisions(r))?;
        }
        Commands::Distribution => {
            let artifacts = cache.load(&config.artifacts)?;
            let h = histogram(artifacts.decision.prob_default(), HISTOGRAM_BINS);
            print_one(cli.json, h, render_histogram)?;
        }
        Commands::Explain { row } => {
            let artifacts = cache.load(&config.artifacts)?;
            let e = explain(&artifacts.decision, thresholds, *row)?;
            print_one(cli.json, e, render_explanation)?;
        }
        Commands::Fairness { attribute } => {
            let artifacts = cache.load(&config.artifacts)?;
            let report = evaluate_fairness(&artifacts.fairness, attribute.or(config.attribute))?;
            print_one(cli.json, report, render_fairness)?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}
