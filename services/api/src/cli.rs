use crate::server;
use clap::{Args, Parser, Subcommand};
use scar_leads::error::AppError;
use scar_leads::leads::{
    FormError, FormField, FormState, HttpLeadEndpoint, LeadForm, FAILURE_MESSAGE, SUCCESS_MESSAGE,
};

#[derive(Parser, Debug)]
#[command(
    name = "SCAR Lead Capture",
    about = "Serve the landing page lead endpoint or submit a lead from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Send an early-access request to a running lead endpoint
    Submit(SubmitArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Lead endpoint URL
    #[arg(long, default_value = "http://127.0.0.1:3000/api/lead")]
    pub(crate) endpoint: String,
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) organization: Option<String>,
    #[arg(long)]
    pub(crate) message: Option<String>,
}

impl SubmitArgs {
    fn into_form(self) -> (String, LeadForm) {
        let mut form = LeadForm::new();
        form.edit(FormField::Name, self.name);
        form.edit(FormField::Email, self.email);
        if let Some(organization) = self.organization {
            form.edit(FormField::Organization, organization);
        }
        if let Some(message) = self.message {
            form.edit(FormField::Message, message);
        }
        (self.endpoint, form)
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Submit(args) => run_submit(args).await,
    }
}

async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let (url, mut form) = args.into_form();
    let endpoint = HttpLeadEndpoint::new(reqwest::Client::builder().build()?, url);

    let result = form.submit(&endpoint).await;
    let message = submit_outcome(result)?;
    println!("{message}");
    Ok(())
}

/// Anything short of an accepted lead becomes an error so the process exits non-zero.
fn submit_outcome(result: Result<FormState, FormError>) -> Result<&'static str, AppError> {
    match result {
        Ok(FormState::Succeeded) => Ok(SUCCESS_MESSAGE),
        Ok(FormState::Failed) => Err(AppError::Submission(FAILURE_MESSAGE.to_string())),
        Ok(state) => Err(AppError::Submission(format!("form left in {state:?} state"))),
        Err(err) => Err(AppError::Submission(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_defaults_to_local_endpoint() {
        let cli = Cli::try_parse_from([
            "scar-leads-api",
            "submit",
            "--name",
            "Jo Smith",
            "--email",
            "jo@example.com",
        ])
        .expect("arguments parse");

        let Some(Command::Submit(args)) = cli.command else {
            panic!("expected submit command");
        };
        let (url, form) = args.into_form();
        assert_eq!(url, "http://127.0.0.1:3000/api/lead");
        assert_eq!(form.fields().name, "Jo Smith");
        assert_eq!(form.fields().organization, "");
        assert_eq!(form.state(), FormState::Idle);
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["scar-leads-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn only_an_accepted_lead_counts_as_success() {
        assert_eq!(
            submit_outcome(Ok(FormState::Succeeded)).expect("accepted"),
            SUCCESS_MESSAGE
        );
        assert!(matches!(
            submit_outcome(Ok(FormState::Failed)),
            Err(AppError::Submission(message)) if message == FAILURE_MESSAGE
        ));
        assert!(matches!(
            submit_outcome(Err(FormError::MissingField(FormField::Name))),
            Err(AppError::Submission(message)) if message == "name is required"
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_fails_the_command() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let result = run_submit(SubmitArgs {
            endpoint: format!("http://{addr}/api/lead"),
            name: "Jo Smith".to_string(),
            email: "jo@example.com".to_string(),
            organization: None,
            message: None,
        })
        .await;

        assert!(matches!(result, Err(AppError::Submission(_))));
    }
}
