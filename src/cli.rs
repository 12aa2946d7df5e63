use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::constants::{DEFAULT_CONTEXT, DEFAULT_POLICY_BASE_URL};

#[derive(Parser, Debug)]
#[command(
    name = "regent",
    version,
    about = "Administer policies and registry namespaces"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "REGENT_HOST",
        help = "Base URL of the registry service"
    )]
    pub host: Option<String>,
    #[arg(
        long,
        global = true,
        env = "REGENT_ENDPOINT",
        help = "GraphQL endpoint path, relative to --host"
    )]
    pub endpoint: Option<String>,
    #[arg(
        long,
        global = true,
        env = "REGENT_TOKEN",
        hide_env_values = true,
        help = "API token used for authentication"
    )]
    pub token: Option<String>,
    #[arg(long, global = true, help = "Log requests and responses to stderr")]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage security policies applied to build configs
    Policy(PolicyArgs),
    /// Operate on namespaces
    Namespace {
        #[command(subcommand)]
        command: NamespaceCommands,
    },
}

#[derive(Args, Debug)]
pub struct PolicyArgs {
    #[arg(long, global = true, help = "The id of the owner of a policy")]
    pub owner_id: Option<String>,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_POLICY_BASE_URL,
        help = "Base url for the policy api"
    )]
    pub policy_base_url: String,
    #[command(subcommand)]
    pub command: PolicyCommands,
}

#[derive(Subcommand, Debug)]
pub enum PolicyCommands {
    /// List all policies
    List {
        #[arg(
            long,
            num_args = 0..=1,
            require_equals = true,
            default_missing_value = "true",
            help = "Filter policies based on active status (true or false)"
        )]
        active: Option<bool>,
    },
    /// Create a policy
    Create {
        #[arg(long, help = "Name of policy to create")]
        name: String,
        #[arg(long, default_value = DEFAULT_CONTEXT, help = "Policy context")]
        context: String,
        #[arg(long = "policy", help = "Path to rego policy file")]
        policy_path: PathBuf,
    },
    /// Get a policy
    Get { policy_id: String },
    /// Delete a policy
    Delete { policy_id: String },
    /// Update a policy
    Update {
        policy_id: String,
        #[arg(long, help = "Set name of the given policy-id")]
        name: Option<String>,
        #[arg(long, help = "Policy context (if set, must be config)")]
        context: Option<String>,
        #[arg(
            long,
            num_args = 0..=1,
            require_equals = true,
            default_missing_value = "true",
            help = "Set policy active state (to deactivate, use --active=false)"
        )]
        active: Option<bool>,
        #[arg(
            long = "policy",
            help = "Path to rego file containing the updated policy"
        )]
        policy_path: Option<PathBuf>,
    },
    /// Get policy (decision) logs
    Logs {
        #[arg(long, help = "Filter decision logs triggered AFTER this datetime")]
        after: Option<String>,
        #[arg(long, help = "Filter decision logs triggered BEFORE this datetime")]
        before: Option<String>,
        #[arg(long, help = "Filter decision logs based on branch name")]
        branch: Option<String>,
        #[arg(long, help = "Filter decision logs based on project-id")]
        project_id: Option<String>,
        #[arg(long = "out", help = "Write the logs to this file instead of stdout")]
        out: Option<PathBuf>,
    },
    /// Make a decision against the active policies without persisting it
    Decide {
        #[arg(long, default_value = DEFAULT_CONTEXT, help = "Policy context for decision")]
        context: String,
        #[arg(long = "input", help = "Path to input file")]
        input_path: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PromptArgs {
    #[arg(long, help = "Disable prompt to bypass interactive UI")]
    pub no_prompt: bool,
    #[arg(
        long,
        hide = true,
        help = "Enable test mode to bypass interactive UI"
    )]
    pub integration_testing: bool,
}

#[derive(Subcommand, Debug)]
pub enum NamespaceCommands {
    /// Create a namespace
    ///
    /// Please note that at this time all namespaces created in the registry are world-readable.
    #[command(after_help = "Examples:\n  regent namespace create NamespaceName github OrgName\n  regent namespace create NamespaceName --org-id \"your-org-id-here\"")]
    Create {
        #[arg(help = "The name to give your new namespace")]
        name: String,
        #[arg(help = "Your VCS provider, can be either \"github\" or \"bitbucket\". Optional when passing org-id flag")]
        vcs_type: Option<String>,
        #[arg(help = "The name used for your organization. Optional when passing org-id flag")]
        org_name: Option<String>,
        #[arg(long, help = "The id of your organization")]
        org_id: Option<String>,
        #[command(flatten)]
        prompt: PromptArgs,
    },
    /// Rename a namespace, keeping the old name as an alias
    Rename {
        old_name: String,
        new_name: String,
        #[command(flatten)]
        prompt: PromptArgs,
    },
    /// Delete a namespace alias left behind by a rename
    DeleteAlias {
        name: String,
        #[command(flatten)]
        prompt: PromptArgs,
    },
}
