use std::env;
use std::error::Error;
use std::sync::Arc;

use bank_core::{Account, AccountDetailsSynchronizer, AccountSynchronizer, Config, RemoteAccountApi, SyncState};

const USAGE: &str = "usage: accounts <command>
  list
  show <id>
  add <name> <balance> <currency>
  delete <id>
  update <id> <name> <balance> <currency> <true|false>
  status <id> <true|false>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    tracing::info!(base_url = %config.base_url, "using accounts service");
    let api = Arc::new(RemoteAccountApi::from_config(&config));

    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    if let ["show", id] = args.as_slice() {
        let details = AccountDetailsSynchronizer::new(api);
        details.load(id).await?;
        let state = details.state();
        print_messages(&state.last_success, &state.last_error);
        if let Some(account) = state.account {
            print_account(&account);
        }
        return Ok(());
    }

    let sync = AccountSynchronizer::new(api);
    match args.as_slice() {
        ["list"] => sync.load().await,
        ["add", name, balance, currency] => sync.add(name, balance, currency).await,
        ["delete", id] => sync.remove(id).await?,
        ["update", id, name, balance, currency, active] => {
            let account = Account {
                id: Some(id.to_string()),
                name: name.to_string(),
                balance: balance.to_string(),
                currency: currency.to_string(),
                is_active: parse_flag(active)?,
            };
            sync.replace_fully(id, &account).await?
        }
        ["status", id, active] => sync.patch_status(id, parse_flag(active)?).await?,
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    print_state(&sync.state());
    Ok(())
}

fn parse_flag(value: &str) -> Result<bool, Box<dyn Error>> {
    value
        .parse::<bool>()
        .map_err(|_| format!("expected true or false, got {value:?}").into())
}

fn print_messages(success: &str, error: &str) {
    if !success.is_empty() {
        println!("ok: {success}");
    }
    if !error.is_empty() {
        println!("error: {error}");
    }
}

fn print_state(state: &SyncState) {
    print_messages(&state.last_success, &state.last_error);
    for account in &state.accounts {
        print_account(account);
    }
}

fn print_account(account: &Account) {
    let status = if account.is_active { "active" } else { "inactive" };
    println!(
        "{:>6}  {:<24} {:>14} {:<4} {status}",
        account.id.as_deref().unwrap_or("-"),
        account.name,
        account.balance,
        account.currency,
    );
}
