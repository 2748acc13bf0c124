//! Command dispatch: one invocation opens the session, applies one command
//! and mirrors the result.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Write;
use tracing::{debug, info};

use crate::app::{ActionOutcome, App, SessionAction};
use crate::cli::{Cli, Commands, OutputFormat, SessionCommands};
use crate::config::WizardConfig;
use crate::output;
use crate::state::{FieldUpdate, FormRecord, WizardStep, MAX_STEPS};
use crate::storage::{FileSessionStorage, SessionId, SessionStorage};

/// Pick the session to operate on: explicit id, then the active one
///
/// Returns `None` when a new session has to be started.
fn pick_session(explicit: Option<SessionId>, config: &WizardConfig) -> Option<SessionId> {
    explicit.or_else(|| config.active_session_id())
}

fn step_arg(step: usize) -> Result<WizardStep> {
    WizardStep::from_index(step)
        .with_context(|| format!("step {step} does not exist (steps are 0..{MAX_STEPS})"))
}

pub fn dispatch(cli: Cli, mut config: WizardConfig, out: &mut impl Write) -> Result<()> {
    let storage = FileSessionStorage::new(config.snapshot_dir()?);

    if let Commands::Session { action } = &cli.command {
        return match action {
            SessionCommands::Start => {
                let session_id = SessionId::new();
                config.set_active_session(Some(session_id));
                config.save()?;
                App::open(session_id, storage).persist();
                info!(%session_id, "started new session");
                writeln!(out, "{session_id}")?;
                Ok(())
            }
            SessionCommands::End => {
                let Some(session_id) = pick_session(cli.session, &config) else {
                    bail!("no active session to end");
                };
                App::open(session_id, storage).end()?;
                if config.active_session_id() == Some(session_id) {
                    config.set_active_session(None);
                    config.save()?;
                }
                writeln!(out, "ended session {session_id}")?;
                Ok(())
            }
            SessionCommands::Id => {
                match pick_session(cli.session, &config) {
                    Some(session_id) => writeln!(out, "{session_id}")?,
                    None => writeln!(out, "no active session")?,
                }
                Ok(())
            }
        };
    }

    let session_id = match pick_session(cli.session, &config) {
        Some(session_id) => session_id,
        None => {
            let session_id = SessionId::new();
            config.set_active_session(Some(session_id));
            config.save()?;
            info!(%session_id, "started new session");
            session_id
        }
    };

    debug!(dir = %storage.dir().display(), "using snapshot directory");
    let mut app = App::open(session_id, storage);
    debug!(%session_id, restored = app.was_restored(), "session opened");
    run_command(&mut app, cli.command, cli.format, out)
}

/// Run a session command against an opened app
pub fn run_command<S: SessionStorage>(
    app: &mut App<S>,
    command: Commands,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Session { .. } => bail!("session lifecycle commands need the host dispatcher"),
        Commands::Show { step } => {
            let step = step.map(step_arg).transpose()?;
            let session = app.session();
            match (format, step) {
                (OutputFormat::Json, None) => {
                    let value = output::progress_json(app.session_id(), session);
                    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
                }
                (OutputFormat::Json, Some(step)) => {
                    let value = output::step_fields_json(session.form_data(), step);
                    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
                }
                (OutputFormat::Text, None) => {
                    write!(out, "{}", output::render_progress(app.session_id(), session))?;
                    writeln!(out)?;
                    let current = step_arg(session.current_step())?;
                    write!(out, "{}", output::render_step_fields(session.form_data(), current))?;
                }
                (OutputFormat::Text, Some(step)) => {
                    write!(out, "{}", output::render_step_fields(session.form_data(), step))?;
                }
            }
        }
        Commands::Fields { step } => {
            let step = step.map(step_arg).transpose()?;
            match format {
                OutputFormat::Json => writeln!(
                    out,
                    "{}",
                    serde_json::to_string_pretty(&output::field_list_json(step))?
                )?,
                OutputFormat::Text => write!(out, "{}", output::render_field_list(step))?,
            }
        }
        Commands::Set { field, value } => {
            let update = FieldUpdate::parse(field, &value)?;
            app.apply(SessionAction::UpdateField(update));
            report(out, format, app, ActionOutcome::Applied, &format!("{field} updated"))?;
        }
        Commands::Validate {
            step,
            complete,
            valid,
        } => {
            step_arg(step)?;
            app.apply(SessionAction::UpdateStepValidation {
                step,
                is_complete: complete,
                is_valid: valid,
            });
            let message = format!("step {step} recorded as complete={complete} valid={valid}");
            report(out, format, app, ActionOutcome::Applied, &message)?;
        }
        Commands::Goto { step } => {
            let outcome = app.apply(SessionAction::SetCurrentStep(step));
            let message = match outcome {
                ActionOutcome::Applied => format!("moved to step {step}"),
                ActionOutcome::Ignored => format!(
                    "step {step} is not reachable yet; staying on step {}",
                    app.session().current_step()
                ),
            };
            report(out, format, app, outcome, &message)?;
        }
        Commands::CanGoto { step } => {
            let allowed = app.session().can_navigate_to_step(step);
            match format {
                OutputFormat::Json => writeln!(
                    out,
                    "{}",
                    serde_json::json!({ "step": step, "canNavigate": allowed })
                )?,
                OutputFormat::Text => writeln!(out, "{allowed}")?,
            }
        }
        Commands::Next => {
            let outcome = app.apply(SessionAction::NextStep);
            let message = match outcome {
                ActionOutcome::Applied => format!("moved to step {}", app.session().current_step()),
                ActionOutcome::Ignored => "already on the last step".to_string(),
            };
            report(out, format, app, outcome, &message)?;
        }
        Commands::Prev => {
            let outcome = app.apply(SessionAction::PrevStep);
            let message = match outcome {
                ActionOutcome::Applied => format!("moved to step {}", app.session().current_step()),
                ActionOutcome::Ignored => "already on the first step".to_string(),
            };
            report(out, format, app, outcome, &message)?;
        }
        Commands::Reset => {
            let outcome = app.apply(SessionAction::ResetForm);
            report(out, format, app, outcome, "form reset")?;
        }
        Commands::Load { file } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("failed to read draft {}", file.display()))?;
            let record: FormRecord = serde_json::from_str(&content)
                .with_context(|| format!("{} is not a valid draft", file.display()))?;
            let outcome = app.apply(SessionAction::UpdateFormData(record));
            report(out, format, app, outcome, &format!("loaded {}", file.display()))?;
        }
        Commands::Export { file } => {
            let draft = serde_json::to_string_pretty(app.session().form_data())?;
            match file {
                Some(path) => {
                    fs::write(&path, draft)
                        .with_context(|| format!("failed to write draft {}", path.display()))?;
                    report(
                        out,
                        format,
                        app,
                        ActionOutcome::Applied,
                        &format!("exported to {}", path.display()),
                    )?;
                }
                None => writeln!(out, "{draft}")?,
            }
        }
    }
    Ok(())
}

fn report<S: SessionStorage>(
    out: &mut impl Write,
    format: OutputFormat,
    app: &App<S>,
    outcome: ActionOutcome,
    message: &str,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{message}")?,
        OutputFormat::Json => writeln!(
            out,
            "{}",
            serde_json::json!({
                "applied": outcome == ActionOutcome::Applied,
                "currentStep": app.session().current_step(),
                "message": message,
            })
        )?,
    }
    Ok(())
}
