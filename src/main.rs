#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use volunteer_hub::api::ApiClient;
use volunteer_hub::config::{ApiConfig, Config};
use volunteer_hub::controllers::{
    self, AuthController, DashboardConfig, FormPhase, HistoryNavigator, ListFailurePolicy, LoginForm, Navigator,
    NgoDashboard, SignupForm, auth::AuthForm,
};
use volunteer_hub::domain::{ApplicationStatus, NewApplication, Role};
use volunteer_hub::storage::{FileStore, SessionContext};
use volunteer_hub::telemetry;

#[derive(Debug, Parser)]
#[command(version, about = "Command-line client for the volunteer matching platform", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account and store its session
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "VOLUNTEER_HUB_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, value_enum, default_value_t = AccountType::Volunteer)]
        role: AccountType,
        /// CNPJ, required for NGO accounts
        #[arg(long, required_if_eq("role", "ngo"))]
        tax_id: Option<String>,
    },
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "VOLUNTEER_HUB_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored session
    Whoami,
    #[command(subcommand)]
    Opportunities(OpportunityCommand),
    #[command(subcommand)]
    Volunteers(VolunteerCommand),
    #[command(subcommand)]
    Applications(ApplicationCommand),
    #[command(subcommand)]
    Ngos(NgoCommand),
    /// Load the NGO dashboard
    Dashboard {
        /// Treat a failed opportunity fetch as an error instead of an empty list
        #[arg(long)]
        strict_opportunities: bool,
    },
}

#[derive(Debug, Subcommand)]
enum OpportunityCommand {
    List,
    Get { id: i64 },
    /// Post a new opportunity through the dashboard dialog
    Create {
        #[arg(long)]
        ngo_name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
}

#[derive(Debug, Subcommand)]
enum VolunteerCommand {
    List,
    Get { id: i64 },
    /// Applications made by one volunteer
    Applications { id: i64 },
}

#[derive(Debug, Subcommand)]
enum ApplicationCommand {
    List,
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        birth_date: String,
        /// CPF
        #[arg(long)]
        tax_id: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        opportunity_id: i64,
    },
    Update {
        id: i64,
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Applications to every opportunity of one NGO
    ByNgo { ngo_id: i64 },
}

#[derive(Debug, Subcommand)]
enum NgoCommand {
    List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AccountType {
    Volunteer,
    Ngo,
}

impl From<AccountType> for Role {
    fn from(kind: AccountType) -> Self {
        match kind {
            AccountType::Volunteer => Self::Volunteer,
            AccountType::Ngo => Self::Ngo,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    Pendente,
    Aprovado,
    Rejeitado,
}

impl From<StatusArg> for ApplicationStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pendente => Self::Pending,
            StatusArg::Aprovado => Self::Approved,
            StatusArg::Rejeitado => Self::Rejected,
        }
    }
}

#[allow(clippy::print_stdout)]
fn emit<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn authenticate<F: AuthForm>(api: ApiClient, form: F) -> anyhow::Result<()> {
    let session = api.session().clone();
    let navigator = Arc::new(HistoryNavigator::new());
    let controller = AuthController::<F>::new(api, Arc::clone(&navigator) as Arc<dyn Navigator>);
    controller.edit(|f| *f = form);

    if controller.submit().await.is_err() {
        return match controller.state().phase {
            FormPhase::Failed { message } => Err(anyhow!(message)),
            phase => Err(anyhow!("authentication did not complete: {phase:?}")),
        };
    }

    let session = session.load().await?;
    emit(&json!({
        "route": navigator.current(),
        "name": session.as_ref().map(|s| s.display_name.clone()),
        "role": session.as_ref().map(|s| s.role.clone()),
    }))
}

async fn run(command: Command, api: ApiClient) -> anyhow::Result<()> {
    match command {
        Command::Signup { name, email, password, role, tax_id } => {
            let form = SignupForm { name, email, password, tax_id: tax_id.unwrap_or_default(), role: role.into() };
            authenticate(api, form).await
        }
        Command::Login { email, password } => authenticate(api, LoginForm { email, password }).await,
        Command::Logout => {
            let navigator = HistoryNavigator::new();
            controllers::auth::logout(api.session(), &navigator).await?;
            emit(&json!({ "route": navigator.current() }))
        }
        Command::Whoami => {
            let session = api.session().load().await?;
            emit(&session.map(|s| json!({ "name": s.display_name, "role": s.role })))
        }
        Command::Opportunities(cmd) => match cmd {
            OpportunityCommand::List => emit(&api.list_opportunities().await?),
            OpportunityCommand::Get { id } => emit(&api.get_opportunity(id).await?),
            OpportunityCommand::Create { ngo_name, address, title, description } => {
                let dashboard = NgoDashboard::new(api, DashboardConfig::default());
                dashboard.open_dialog();
                dashboard.edit_form(|f| {
                    f.ngo_name = ngo_name;
                    f.address = address;
                    f.title = title;
                    f.description = description;
                });
                let outcome = dashboard.submit().await;
                let state = dashboard.state();
                emit(&json!({
                    "notification": state.notification,
                    "opportunities": state.opportunities.items,
                }))?;
                outcome.context("creating opportunity")
            }
        },
        Command::Volunteers(cmd) => match cmd {
            VolunteerCommand::List => emit(&api.list_volunteers().await?),
            VolunteerCommand::Get { id } => emit(&api.get_volunteer(id).await?),
            VolunteerCommand::Applications { id } => emit(&api.list_volunteer_applications(id).await?),
        },
        Command::Applications(cmd) => match cmd {
            ApplicationCommand::List => emit(&api.list_applications().await?),
            ApplicationCommand::Submit { name, birth_date, tax_id, message, opportunity_id } => {
                let application = NewApplication { name, birth_date, tax_id, message, opportunity_id };
                emit(&api.submit_application(application).await?)
            }
            ApplicationCommand::Update { id, status } => emit(&api.update_application_status(id, status.into()).await?),
            ApplicationCommand::ByNgo { ngo_id } => emit(&api.list_ngo_applications(ngo_id).await?),
        },
        Command::Ngos(NgoCommand::List) => emit(&api.list_ngos().await?),
        Command::Dashboard { strict_opportunities } => {
            let mut config = DashboardConfig::default();
            if strict_opportunities {
                config.opportunities = ListFailurePolicy::Fail;
            }
            let dashboard = NgoDashboard::new(api, config);
            dashboard.mount().await;
            emit(&dashboard.view())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_telemetry(&cli.config.telemetry)?;

    let store = FileStore::new(&cli.config.session.session_file);
    let session = SessionContext::new(Arc::new(store));
    let api_config = ApiConfig::resolve(Some(cli.config.api.base_url));
    let api = ApiClient::new(&api_config, session)?;

    run(cli.command, api).await
}
