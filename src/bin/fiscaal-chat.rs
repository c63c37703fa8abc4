//! Terminal front-end for the chat widget.
//!
//! Every line typed is a submit. `/login <email>` asks for a login link,
//! `/verify <email> <token>` consumes it, `/logout` drops the session and
//! starts a new transcript; `/quit` exits.

use fiscaal::client::{ApiClient, ChatWidget, INPUT_PLACEHOLDER, LOGIN_HINT};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "fiscaal=warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let base_url = std::env::var("FISCAAL_URL").unwrap_or_else(|_| "http://localhost:8080".into());
    let mut client = ApiClient::new(&base_url);
    if let Ok(token) = std::env::var("FISCAAL_SESSION") {
        client = client.with_session(token);
    }

    let mut widget = ChatWidget::new();
    if let Some(line) = widget.status_line() {
        println!("{line}");
    }
    println!("({INPUT_PLACEHOLDER})");
    if !client.is_authenticated() {
        println!("{LOGIN_HINT}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("/quit") => break,
            Some("/logout") => {
                client.sign_out();
                widget.clear();
                println!("Uitgelogd");
                println!("{LOGIN_HINT}");
            }
            Some("/login") => {
                let Some(email) = words.next() else {
                    println!("gebruik: /login <email>");
                    continue;
                };
                match client.request_login_link(email).await {
                    Ok(()) => println!("We hebben een login link gestuurd naar {email}"),
                    Err(e) => println!("Inloggen mislukt: {e}"),
                }
            }
            Some("/verify") => {
                let (Some(email), Some(token)) = (words.next(), words.next()) else {
                    println!("gebruik: /verify <email> <token>");
                    continue;
                };
                match client.complete_login(token, email).await {
                    Ok(user) => println!("Ingelogd als {}", user.email),
                    Err(e) => println!("Inloggen mislukt: {e}"),
                }
            }
            _ => {
                widget.set_input(line.as_str());
                if widget.submit(&client).await {
                    if let Some(reply) = widget.messages().last() {
                        println!("{}", reply.content);
                    }
                }
            }
        }
    }

    Ok(())
}
