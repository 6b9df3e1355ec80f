use clap::{Parser, Subcommand};
use serde::Serialize;

use user_gateway_sdk::{ConfirmRequest, GatewayClient, LoginRequest, RegisterRequest, SdkError};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command line client for the user gateway", long_about = None)]
struct Cli {
    #[arg(short, long, env = "GATEWAY_URL", default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// Confirm a registration with the received code
    Confirm { username: String, code: String },
    /// Send a new confirmation code
    ResendConfirmation { username: String },
    /// Check whether a username is already taken
    CheckUsername { username: String },
    /// Log in and print the issued token
    Login { username: String, password: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = GatewayClient::new(&cli.url);

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
        } => {
            let req = RegisterRequest {
                username,
                email,
                password,
            };
            print_result(client.register(&req).await)?;
        }
        Commands::Confirm { username, code } => {
            let req = ConfirmRequest { username, code };
            print_result(client.confirm(&req).await)?;
        }
        Commands::ResendConfirmation { username } => {
            print_result(client.resend_confirmation(&username).await)?;
        }
        Commands::CheckUsername { username } => {
            print_result(client.check_username_taken(&username).await)?;
        }
        Commands::Login { username, password } => {
            let req = LoginRequest { username, password };
            print_result(client.login(&req).await)?;
        }
    }

    Ok(())
}

fn print_result<T: Serialize>(result: Result<T, SdkError>) -> Result<(), Box<dyn std::error::Error>> {
    match result {
        Ok(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Err(SdkError::Status { status, message }) => {
            eprintln!("Error: gateway returned status {}", status);
            eprintln!("Response: {}", message);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
