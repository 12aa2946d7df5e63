use crate::cli::{Cli, Commands, NamespaceCommands};
use crate::services::graphql::GraphqlClient;
use crate::services::namespace::{CreateMode, NamespaceApi, RegistryClient};
use crate::services::prompt::{Confirm, FixedConfirm, InteractiveConfirm};
use crate::services::settings::{validate_token, Settings};
use anyhow::Context;
use clap::CommandFactory;
use std::io::Write;
use uuid::Uuid;

const OPEN_ORBS_NOTICE: &str =
    "Please note that any orbs you publish in this namespace are open orbs and are world-readable.";

pub fn handle_namespace_commands(cli: &Cli, settings: &Settings) -> anyhow::Result<bool> {
    let Commands::Namespace { command } = &cli.command else {
        return Ok(false);
    };

    validate_token(settings)?;
    let gql = GraphqlClient::new(settings.graphql_url(), settings.token.as_deref())?;
    let api = RegistryClient::new(gql);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let prompt = match command {
        NamespaceCommands::Create { prompt, .. }
        | NamespaceCommands::Rename { prompt, .. }
        | NamespaceCommands::DeleteAlias { prompt, .. } => prompt,
    };
    let confirm: Box<dyn Confirm> = if prompt.integration_testing {
        Box::new(FixedConfirm { answer: true })
    } else {
        Box::new(InteractiveConfirm)
    };
    let mut flow = NamespaceFlow {
        api: &api,
        confirm: &*confirm,
        no_prompt: prompt.no_prompt,
        out: &mut out,
    };

    match command {
        NamespaceCommands::Create {
            name,
            vcs_type,
            org_name,
            org_id,
            ..
        } => {
            let mode = CreateMode::resolve(org_id.as_deref(), vcs_type.as_deref(), org_name.as_deref());
            if !flow.create(name, &mode)? {
                print_create_help(flow.out)?;
            }
        }
        NamespaceCommands::Rename {
            old_name, new_name, ..
        } => flow.rename(old_name, new_name)?,
        NamespaceCommands::DeleteAlias { name, .. } => flow.delete_alias(name)?,
    }

    Ok(true)
}

fn print_create_help(out: &mut dyn Write) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    let create = cmd
        .find_subcommand_mut("namespace")
        .and_then(|ns| ns.find_subcommand_mut("create"))
        .ok_or_else(|| anyhow::anyhow!("namespace create command is not registered"))?;
    let help = create
        .clone()
        .bin_name("regent namespace create")
        .render_help();
    write!(out, "{}", help)?;
    Ok(())
}

/// Confirm-then-call flows shared by the namespace subcommands.
pub struct NamespaceFlow<'a> {
    pub api: &'a dyn NamespaceApi,
    pub confirm: &'a dyn Confirm,
    pub no_prompt: bool,
    pub out: &'a mut dyn Write,
}

impl NamespaceFlow<'_> {
    fn confirmed(&self, question: &str) -> bool {
        if self.no_prompt {
            return true;
        }
        let yes = self.confirm.ask(question);
        if !yes {
            tracing::info!(%question, "declined");
        }
        yes
    }

    /// Returns `false` when the mode cannot create anything and help should be shown.
    pub fn create(&mut self, name: &str, mode: &CreateMode) -> anyhow::Result<bool> {
        match mode {
            CreateMode::ByOrgId { org_id } => self.create_with_org_id(name, org_id)?,
            CreateMode::ByVcsOrgName { vcs_type, org_name } => {
                self.create_with_vcs_type_and_org_name(name, vcs_type, org_name)?
            }
            CreateMode::ShowHelp => return Ok(false),
        }
        Ok(true)
    }

    fn create_with_org_id(&mut self, name: &str, org_id: &Uuid) -> anyhow::Result<()> {
        if !self.no_prompt {
            write!(
                self.out,
                "You are creating a namespace called \"{}\".\n\n\
                 This is the only namespace permitted for your organization with id {}.\n\n\
                 To change the namespace, you will have to contact support.\n\n",
                name, org_id
            )?;
            self.out.flush()?;
        }

        if self.confirmed(&format!("Are you sure you wish to create the namespace: `{}`", name)) {
            self.api
                .create_namespace_with_owner_id(name, org_id)
                .context("failed to create namespace")?;
            self.created(name)?;
        }
        Ok(())
    }

    fn create_with_vcs_type_and_org_name(
        &mut self,
        name: &str,
        vcs_type: &str,
        org_name: &str,
    ) -> anyhow::Result<()> {
        if !self.no_prompt {
            write!(
                self.out,
                "You are creating a namespace called \"{}\".\n\n\
                 This is the only namespace permitted for your {} organization, {}.\n\n\
                 To change the namespace, you will have to contact support.\n\n",
                name,
                vcs_type.to_ascii_lowercase(),
                org_name
            )?;
            self.out.flush()?;
        }

        if self.confirmed(&format!("Are you sure you wish to create the namespace: `{}`", name)) {
            self.api
                .create_namespace(name, org_name, &vcs_type.to_ascii_uppercase())
                .context("failed to create namespace")?;
            self.created(name)?;
        }
        Ok(())
    }

    fn created(&mut self, name: &str) -> anyhow::Result<()> {
        writeln!(self.out, "Namespace `{}` created.", name)?;
        writeln!(self.out, "{}", OPEN_ORBS_NOTICE)?;
        Ok(())
    }

    pub fn rename(&mut self, old_name: &str, new_name: &str) -> anyhow::Result<()> {
        let question = format!(
            "Are you sure you wish to rename the namespace `{}` to `{}`?",
            old_name, new_name
        );
        if self.confirmed(&question) {
            self.api
                .rename_namespace(old_name, new_name)
                .context("failed to rename namespace")?;
            writeln!(
                self.out,
                "Namespace `{old}` renamed to `{new}`. `{old}` is an alias for `{new}` so existing \
                 usages will continue to work, unless you delete the `{old}` alias with \
                 `regent namespace delete-alias {old}`",
                old = old_name,
                new = new_name
            )?;
        }
        Ok(())
    }

    pub fn delete_alias(&mut self, name: &str) -> anyhow::Result<()> {
        let question = format!(
            "Are you sure you wish to delete the namespace alias {}? You should make sure that \
             all configs and orbs that refer to it this way are updated to the new name first.",
            name
        );
        if self.confirmed(&question) {
            self.api
                .delete_namespace_alias(name)
                .context("failed to delete namespace alias")?;
            writeln!(self.out, "Namespace alias `{}` deleted.", name)?;
        }
        Ok(())
    }
}
