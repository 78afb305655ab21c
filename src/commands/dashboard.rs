use crate::*;

pub fn handle_dashboard_commands(
    cli: &Cli,
    config: &DashboardConfig,
    cache: &mut ArtifactCache,
) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Report { row, attribute } => {
            let artifacts = cache.load(&config.artifacts)?;
            let report = build_dashboard_report(
                &artifacts,
                &config.thresholds,
                *row,
                attribute.or(config.attribute),
            )?;
            print_one(cli.json, report, render_dashboard)?;
        }
        Commands::Schema => {
            let artifacts = cache.load(&config.artifacts)?;
            let schema = schema_report(&artifacts, &config.artifacts);
            print_one(cli.json, schema, render_schema)?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}
