use crate::services::fairness::unknown_attribute;
use crate::*;
use std::io::{BufRead, Write};

const SESSION_HELP: &str = "controls:
  set threshold <v>     decision threshold (0.05-0.95 step 0.01, not used by the policy)
  set approve <v>       Auto-Approve threshold (0.05-0.95 step 0.01)
  set reject <v>        Auto-Reject threshold (0.05-0.95 step 0.01)
  row <n>               customer row for reason codes (clamped to the dataset)
  attribute <NAME>      protected attribute: SEX, AGE_GROUP or EDUCATION
  show                  re-render the dashboard
  help                  this text
  quit                  end the session";

/// Controls held by one session; nothing here outlives it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub thresholds: PolicyThresholds,
    pub row: usize,
    pub attribute: Option<ProtectedAttribute>,
}

impl SessionState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            thresholds: config.thresholds,
            row: 0,
            attribute: config.attribute,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Knob {
    Threshold,
    AutoApproveMax,
    AutoRejectMin,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Set(Knob, f64),
    Row(usize),
    Attribute(ProtectedAttribute),
    Show,
    Help,
    Quit,
}

pub fn parse_control(line: &str) -> Result<Control, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["set", knob, value] => {
            let knob = match *knob {
                "threshold" => Knob::Threshold,
                "approve" | "auto_approve_max" => Knob::AutoApproveMax,
                "reject" | "auto_reject_min" => Knob::AutoRejectMin,
                other => return Err(format!("unknown control: {}", other)),
            };
            Ok(Control::Set(knob, parse_threshold(value)?))
        }
        ["row", n] => n
            .parse::<usize>()
            .map(Control::Row)
            .map_err(|_| format!("row must be a non-negative integer, got `{}`", n)),
        ["attribute", name] => ProtectedAttribute::from_column(name)
            .map(Control::Attribute)
            .ok_or_else(|| format!("unknown protected attribute: {}", name)),
        ["show"] => Ok(Control::Show),
        ["help"] => Ok(Control::Help),
        ["quit"] | ["exit"] => Ok(Control::Quit),
        _ => Err(format!("unrecognized input: {} (try `help`)", line)),
    }
}

pub fn handle_session_command(
    cli: &Cli,
    config: &DashboardConfig,
    cache: &mut ArtifactCache,
) -> anyhow::Result<bool> {
    let Commands::Session = &cli.command else {
        return Ok(false);
    };
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_session(stdin.lock(), &mut stdout.lock(), cli.json, config, cache)?;
    Ok(true)
}

/// Re-render the dashboard after every control change.
///
/// Artifacts go through the cache on each render, so edited files are picked
/// up while unchanged ones are not re-parsed. Fatal load errors end the session.
pub fn run_session<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    json: bool,
    config: &DashboardConfig,
    cache: &mut ArtifactCache,
) -> anyhow::Result<()> {
    let mut state = SessionState::new(config);
    render(out, json, &mut state, config, cache)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let control = match parse_control(line) {
            Ok(c) => c,
            Err(msg) => {
                reply_error(out, json, "INVALID_INPUT", &msg)?;
                continue;
            }
        };
        tracing::debug!(?control, "session control");
        match control {
            Control::Quit => break,
            Control::Help => writeln!(out, "{}", SESSION_HELP)?,
            Control::Show => render(out, json, &mut state, config, cache)?,
            Control::Set(knob, value) => {
                match knob {
                    Knob::Threshold => state.thresholds.threshold = value,
                    Knob::AutoApproveMax => state.thresholds.auto_approve_max = value,
                    Knob::AutoRejectMin => state.thresholds.auto_reject_min = value,
                }
                render(out, json, &mut state, config, cache)?;
            }
            Control::Row(n) => {
                state.row = n;
                render(out, json, &mut state, config, cache)?;
            }
            Control::Attribute(attribute) => {
                let artifacts = cache.load(&config.artifacts)?;
                if !artifacts.fairness.protected_attributes().contains(&attribute) {
                    let err = unknown_attribute(&artifacts.fairness, attribute);
                    reply_error(out, json, err.code(), &err.to_string())?;
                    continue;
                }
                state.attribute = Some(attribute);
                render(out, json, &mut state, config, cache)?;
            }
        }
    }
    Ok(())
}

fn render<W: Write>(
    out: &mut W,
    json: bool,
    state: &mut SessionState,
    config: &DashboardConfig,
    cache: &mut ArtifactCache,
) -> anyhow::Result<()> {
    let artifacts = cache.load(&config.artifacts)?;
    tracing::debug!(parses = cache.parses(), "session render");
    state.row = clamp_row(&artifacts.decision, state.row);
    let report = build_dashboard_report(&artifacts, &state.thresholds, state.row, state.attribute)?;
    if json {
        writeln!(
            out,
            "{}",
            serde_json::to_string(&JsonOut {
                ok: true,
                data: report
            })?
        )?;
    } else {
        writeln!(out, "{}\n", render_dashboard(&report))?;
    }
    out.flush()?;
    Ok(())
}

fn reply_error<W: Write>(out: &mut W, json: bool, code: &'static str, message: &str) -> anyhow::Result<()> {
    if json {
        let body = JsonErr {
            ok: false,
            error: ErrorBody {
                code,
                message: message.to_string(),
            },
        };
        writeln!(out, "{}", serde_json::to_string(&body)?)?;
    } else {
        writeln!(out, "error: {}", message)?;
    }
    Ok(())
}
