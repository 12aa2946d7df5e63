use crate::cli::{Cli, Commands, PolicyArgs, PolicyCommands};
use crate::domain::models::{CreationRequest, DecisionQueryRequest, DecisionRequest, UpdateRequest};
use crate::services::dates::parse_datetime;
use crate::services::decision_logs;
use crate::services::output::write_pretty;
use crate::services::policy::{PolicyApi, PolicyClient};
use crate::services::progress::Spinner;
use crate::services::settings::Settings;
use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn handle_policy_commands(cli: &Cli, settings: &Settings) -> anyhow::Result<bool> {
    let Commands::Policy(args) = &cli.command else {
        return Ok(false);
    };

    let owner_id = require_owner_id(args)?;
    let client = PolicyClient::new(&args.policy_base_url, settings.token.as_deref())?;
    let stdout = std::io::stdout();
    run_policy_command(&client, owner_id, &args.command, &mut stdout.lock())?;

    Ok(true)
}

fn require_owner_id(args: &PolicyArgs) -> anyhow::Result<&str> {
    args.owner_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .context("required flag --owner-id not set")
}

fn read_file(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {} file {}", what, path.display()))
}

pub fn run_policy_command(
    client: &dyn PolicyApi,
    owner_id: &str,
    command: &PolicyCommands,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        PolicyCommands::List { active } => {
            let policies = client
                .list_policies(owner_id, *active)
                .context("failed to list policies")?;
            write_pretty(out, &policies).context("failed to output policies in json format")?;
        }
        PolicyCommands::Create {
            name,
            context,
            policy_path,
        } => {
            let content = read_file(policy_path, "policy")?;
            let request = CreationRequest {
                name: name.clone(),
                context: context.clone(),
                content,
            };
            let policy = client
                .create_policy(owner_id, request)
                .context("failed to create policy")?;
            write_pretty(out, &policy).context("failed to encode result to stdout")?;
        }
        PolicyCommands::Get { policy_id } => {
            let policy = client
                .get_policy(owner_id, policy_id)
                .context("failed to get policy")?;
            write_pretty(out, &policy).context("failed to output policy in json format")?;
        }
        PolicyCommands::Delete { policy_id } => {
            client
                .delete_policy(owner_id, policy_id)
                .context("failed to delete policy")?;
            writeln!(out, "Deleted Successfully")?;
        }
        PolicyCommands::Update {
            policy_id,
            name,
            context,
            active,
            policy_path,
        } => {
            if policy_path.is_none() && active.is_none() && context.is_none() && name.is_none() {
                anyhow::bail!("one of policy, active, context, or name must be set");
            }
            let content = match policy_path {
                Some(path) => Some(read_file(path, "policy")?),
                None => None,
            };
            let request = UpdateRequest {
                content,
                active: *active,
                context: context.clone(),
                name: name.clone(),
            };
            let policy = client
                .update_policy(owner_id, policy_id, request)
                .context("failed to update policy")?;
            write_pretty(out, &policy).context("failed to encode result to stdout")?;
        }
        PolicyCommands::Logs {
            after,
            before,
            branch,
            project_id,
            out: out_path,
        } => {
            let request = DecisionQueryRequest {
                after: after
                    .as_deref()
                    .map(parse_datetime)
                    .transpose()
                    .context("error in parsing --after value")?,
                before: before
                    .as_deref()
                    .map(parse_datetime)
                    .transpose()
                    .context("error in parsing --before value")?,
                branch: branch.clone(),
                project_id: project_id.clone(),
                offset: 0,
            };

            let mut file_sink;
            let dst: &mut dyn Write = match out_path {
                Some(path) => {
                    let file = File::create(path).with_context(|| {
                        format!("failed to create output file {}", path.display())
                    })?;
                    file_sink = BufWriter::new(file);
                    &mut file_sink
                }
                None => out,
            };

            let logs = {
                let mut spinner = Spinner::stderr("Fetching Policy Decision Logs");
                spinner.start();
                let fetched = decision_logs::fetch_all(client, owner_id, request, |n| {
                    spinner.update(n)
                });
                spinner.stop();
                fetched.context("failed to get policy decision logs")?
            };
            tracing::debug!(count = logs.len(), "fetched decision logs");

            write_pretty(dst, &logs)
                .context("failed to output policy decision logs in json format")?;
            dst.flush().context("failed to write policy decision logs")?;
        }
        PolicyCommands::Decide {
            context,
            input_path,
        } => {
            let input = read_file(input_path, "input")?;
            let request = DecisionRequest {
                context: context.clone(),
                input,
            };
            let decision = client
                .make_decision(owner_id, request)
                .context("failed to make decision")?;
            write_pretty(out, &decision).context("failed to encode decision")?;
        }
    }

    Ok(())
}
