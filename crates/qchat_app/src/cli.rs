use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "qchat_admin", version, about = "Administer QChat chatbot-provisioning requests")]
pub struct Cli {
    /// RON configuration file.
    #[arg(long, default_value = "qchat.ron")]
    pub config: PathBuf,

    /// Session id token sent as the Authorization header; overrides the config file.
    #[arg(long, env = "QCHAT_ID_TOKEN", hide_env_values = true)]
    pub id_token: Option<String>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List submitted requests with the indexing consumption header.
    List {
        /// Administrators only: show just the requests you submitted.
        #[arg(long)]
        mine: bool,
    },
    /// Refresh the indexed-page count of every listed request, one at a time.
    Refresh {
        /// Administrators only: refresh just the requests you submitted.
        #[arg(long)]
        mine: bool,
    },
    /// Generate the browser userscript that embeds a request's chatbot.
    Script {
        /// Id of the request whose chatbot should be embedded.
        request_id: String,
    },
}
