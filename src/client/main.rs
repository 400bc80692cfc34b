// src/client/main.rs

use std::io::{self, Write};
use std::process::ExitCode;

use autholas::client::AuthSession;
use autholas::config::init_config;
use autholas::hardware::get_hardware_id;
use autholas::logging::{init_logging, redact_token};

/// Interactive login demo.
///
/// Reads `AUTHOLAS_*` configuration, prompts for a username and password,
/// performs one login and holds the session until Enter is pressed.
#[tokio::main]
async fn main() -> ExitCode {
    let config = match init_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.logging);

    println!("========================");
    println!("Autholas Login");
    println!("========================");

    let mut auth = AuthSession::from_config(config);
    auth.set_hardware_id(get_hardware_id());

    let (username, password) = match read_credentials() {
        Ok(creds) => creds,
        Err(e) => {
            eprintln!("Failed to read credentials: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("\nAttempting login...");
    let result = auth.login(&username, &password).await;

    if !result.success {
        println!("\nAuthentication failed: {}", result.describe());
        if !result.error_code.is_empty() {
            println!("Error code: {}", result.error_code);
        }
        if let Some(hint) = result.hint() {
            println!("{hint}");
        }
        return ExitCode::FAILURE;
    }

    println!("\nAuthentication successful!");
    if auth.is_session_valid() {
        println!("Session token: {}", redact_token(auth.session_token()));
        println!("Session expires: {}", auth.session_expires_at());
    }
    println!("User '{username}' is authenticated.");

    println!("\nPress Enter to exit...");
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);

    auth.logout();
    println!("Logged out.");
    ExitCode::SUCCESS
}

fn read_credentials() -> io::Result<(String, String)> {
    let username = prompt("Username: ")?;
    let password = prompt("Password: ")?;
    Ok((username, password))
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim_end_matches(['\r', '\n']).to_string())
}
