use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "conecta")]
#[command(about = "Search the ConectaServiços local-services directory")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search providers by term and/or category
    #[command(visible_alias = "s")]
    Search {
        /// Free-text search term
        term: Option<String>,

        /// Category tag (see `conecta categories`)
        #[arg(short, long)]
        tag: Option<String>,

        /// State code (UF); without --city the state's first city is used
        #[arg(long)]
        state: Option<String>,

        /// City within the state
        #[arg(long)]
        city: Option<String>,

        /// Page to show
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Include address, phone and e-mail for each provider
        #[arg(short, long)]
        details: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the category tags
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the states and cities available for searching
    Regions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one provider
    Provider {
        /// Provider CNPJ root (cnpj_basico)
        cnpj: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Like or unlike a provider
    Like {
        /// Provider CNPJ root (cnpj_basico)
        cnpj: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List comments on a provider
    Comments {
        /// Provider CNPJ root (cnpj_basico)
        cnpj: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Comment on a provider
    Comment {
        /// Provider CNPJ root (cnpj_basico)
        cnpj: String,

        /// Comment text
        #[arg(trailing_var_arg = true, required = true)]
        text: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List providers you liked
    Liked {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List providers you claimed
    Claimed {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        email: String,

        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Request a password reset code by e-mail
    ForgotPassword {
        #[arg(short, long)]
        email: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forget the stored session token
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the logged-in account
    Me {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Account management
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum AccountAction {
    /// Update profile fields (others keep their current values)
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        city: Option<String>,
        /// Two-letter state code
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        new_password: Option<String>,

        /// Current password (read from stdin when omitted)
        #[arg(long)]
        current_password: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Cancel the premium plan
    CancelPremium {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete the account permanently
    Delete {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (api.base_url, region.default, timeout)
        key: String,
        /// Value to set
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            AccountChanges, SearchOptions, cmd_cancel_premium, cmd_categories, cmd_claimed,
            cmd_comment, cmd_comments, cmd_config_get, cmd_config_set, cmd_config_show,
            cmd_delete_account, cmd_forgot_password, cmd_like, cmd_liked, cmd_login, cmd_logout,
            cmd_me, cmd_provider, cmd_regions, cmd_search, cmd_update_account,
        };

        match self {
            Commands::Search {
                term,
                tag,
                state,
                city,
                page,
                details,
                json,
            } => {
                cmd_search(SearchOptions {
                    term,
                    tag,
                    state,
                    city,
                    page,
                    details,
                    output_json: json,
                })
                .await
            }
            Commands::Categories { json } => cmd_categories(json),
            Commands::Regions { json } => cmd_regions(json),

            Commands::Provider { cnpj, json } => cmd_provider(&cnpj, json).await,
            Commands::Like { cnpj, json } => cmd_like(&cnpj, json).await,
            Commands::Comments { cnpj, json } => cmd_comments(&cnpj, json).await,
            Commands::Comment { cnpj, text, json } => cmd_comment(&cnpj, &text, json).await,
            Commands::Liked { json } => cmd_liked(json).await,
            Commands::Claimed { json } => cmd_claimed(json).await,

            Commands::Login {
                email,
                password,
                json,
            } => cmd_login(&email, password, json).await,
            Commands::ForgotPassword { email, json } => cmd_forgot_password(&email, json).await,
            Commands::Logout { json } => cmd_logout(json),
            Commands::Me { json } => cmd_me(json).await,
            Commands::Account { action } => match action {
                AccountAction::Update {
                    first_name,
                    last_name,
                    city,
                    state,
                    email,
                    new_password,
                    current_password,
                    json,
                } => {
                    let changes = AccountChanges {
                        first_name,
                        last_name,
                        city,
                        state,
                        email,
                        new_password,
                    };
                    cmd_update_account(changes, current_password, json).await
                }
                AccountAction::CancelPremium { json } => cmd_cancel_premium(json).await,
                AccountAction::Delete { yes, json } => cmd_delete_account(yes, json).await,
            },

            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(json),
                ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
                ConfigAction::Get { key, json } => cmd_config_get(&key, json),
            },
        }
    }
}
