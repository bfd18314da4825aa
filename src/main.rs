use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "tokenverse")]
#[command(about = "Loyalty campaign marketplace with streak ranks and a token shop")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.tokenverse/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Account role: "user" or "brand"
        #[arg(long)]
        role: String,
        /// Display name (brands: the campaign owner name)
        #[arg(long)]
        name: String,
    },

    /// Sign in and start a session
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// End the current session
    Signout,

    /// Show the acting user's points, tokens, streak and rank
    Status,

    /// List campaigns
    Campaigns {
        /// Only campaigns owned by the acting brand
        #[arg(long)]
        mine: bool,
    },

    /// Launch a campaign (brands only)
    CampaignCreate {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Point reward for an approved entry
        #[arg(long)]
        points: i64,
        /// Requested content kind: photo, video or text
        #[arg(long, default_value = "photo")]
        kind: String,
        /// Last day entries are accepted (YYYY-MM-DD)
        #[arg(long)]
        end_date: String,
    },

    /// Enter a campaign
    Submit {
        /// Campaign id to enter
        #[arg(long)]
        campaign: String,
        /// Description of the entry
        #[arg(long)]
        content: String,
        #[arg(long)]
        instagram: Option<String>,
        #[arg(long)]
        facebook: Option<String>,
        #[arg(long)]
        youtube: Option<String>,
        #[arg(long)]
        x: Option<String>,
        #[arg(long)]
        linkedin: Option<String>,
        /// File to attach to the entry
        #[arg(long)]
        attachment: Option<PathBuf>,
    },

    /// List submissions: your review queue (brands) or your entries (users)
    Submissions {
        /// Brands: include reviewed entries, not just pending ones
        #[arg(long)]
        all: bool,
    },

    /// Approve or reject a pending submission (brands only)
    Review {
        /// Submission id to decide on
        submission_id: String,
        #[arg(long, conflicts_with = "reject")]
        approve: bool,
        #[arg(long)]
        reject: bool,
    },

    /// List the token packages on sale
    Shop,

    /// Buy a token package, settling on chain
    Buy {
        /// Package size in tokens (e.g. 50, 100, 250)
        tokens: i64,
    },

    /// Show your notifications
    Notifications {
        /// Mark everything read after listing
        #[arg(long)]
        mark_read: bool,
    },

    /// Stream change events until interrupted
    Watch {
        /// Only events for one table (users, campaigns, submissions,
        /// notifications)
        #[arg(long)]
        table: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Init { force } => {
            cli::init::init_command(config, force).await?;
        }
        Commands::Signup {
            email,
            password,
            role,
            name,
        } => {
            cli::account::signup_command(config, &email, &password, &role, &name).await?;
        }
        Commands::Signin { email, password } => {
            cli::account::signin_command(config, &email, &password).await?;
        }
        Commands::Signout => {
            cli::account::signout_command(config).await?;
        }
        Commands::Status => {
            cli::status::status_command(config).await?;
        }
        Commands::Campaigns { mine } => {
            cli::campaigns::campaigns_command(config, mine).await?;
        }
        Commands::CampaignCreate {
            title,
            description,
            points,
            kind,
            end_date,
        } => {
            cli::campaigns::create_command(config, &title, &description, points, &kind, &end_date)
                .await?;
        }
        Commands::Submit {
            campaign,
            content,
            instagram,
            facebook,
            youtube,
            x,
            linkedin,
            attachment,
        } => {
            let links = tokenverse::SocialLinks {
                instagram,
                facebook,
                youtube,
                x,
                linkedin,
            };
            cli::submit::submit_command(config, &campaign, &content, links, attachment.as_deref())
                .await?;
        }
        Commands::Submissions { all } => {
            cli::review::submissions_command(config, all).await?;
        }
        Commands::Review {
            submission_id,
            approve,
            reject,
        } => {
            cli::review::review_command(config, &submission_id, approve, reject).await?;
        }
        Commands::Shop => {
            cli::shop::shop_command().await?;
        }
        Commands::Buy { tokens } => {
            cli::shop::buy_command(config, tokens).await?;
        }
        Commands::Notifications { mark_read } => {
            cli::notifications::notifications_command(config, mark_read).await?;
        }
        Commands::Watch { table } => {
            cli::watch::watch_command(config, table.as_deref()).await?;
        }
    }

    Ok(())
}
