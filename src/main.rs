use clap::Parser;
use registrar_adapter::config::Command;
use registrar_adapter::utils::{logger, validation::Validate};
use registrar_adapter::{
    CliConfig, ContactLookup, HolderHandle, Registrar, RegistrarAdapter, Reply, TomlConfig,
};
use serde::Serialize;
use std::collections::BTreeSet;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the reply's messages and tells whether the call failed.
fn report<T>(reply: &Reply<T>) -> bool {
    for warning in &reply.warnings {
        tracing::warn!("{}", warning);
        eprintln!("⚠️  {}", warning);
    }
    for success in &reply.successes {
        tracing::info!("{}", success);
    }
    for error in &reply.errors {
        tracing::error!("{}", error);
        eprintln!("❌ {}", error);
    }
    !reply.is_ok()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let file_logging = config
        .config
        .as_ref()
        .and_then(|path| TomlConfig::from_file(path).ok());
    let json_logs = config.json_logs || file_logging.as_ref().is_some_and(|f| f.json_logging());

    if json_logs {
        let level = match (&file_logging, config.verbose) {
            (_, true) => "debug",
            (Some(file), false) => file.log_level(),
            (None, false) => "info",
        };
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting registrar-cli");
    if config.verbose {
        tracing::debug!("CLI command: {:?}", config.command);
    }

    // Version needs no credentials.
    if matches!(config.command, Command::Version) {
        return print_json(&RegistrarAdapter::version_information());
    }

    let settings = match config.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let adapter = RegistrarAdapter::from_settings(&settings)?;

    let failed = match config.command {
        Command::Check { domain } => {
            let reply = adapter.check_availability(&domain).await;
            println!("{}: {}", domain, if reply.value { "available" } else { "not available" });
            report(&reply)
        }
        Command::Domains => {
            let reply = adapter.list_domains().await;
            print_json(&reply.value.items())?;
            report(&reply)
        }
        Command::Sync { domains } => {
            let requested: BTreeSet<String> = domains.into_iter().collect();
            let reply = adapter.sync_domain_status(&requested).await;
            print_json(&reply.value)?;
            report(&reply)
        }
        Command::Delete { domain } => {
            let reply = adapter.delete_domain(&domain).await;
            if !reply.value {
                eprintln!("❌ {} was not cancelled", domain);
            }
            report(&reply) || !reply.value
        }
        Command::Contacts { email } => {
            let reply = adapter.list_contacts(email.as_deref()).await;
            print_json(&reply.value)?;
            report(&reply)
        }
        Command::Contact { handle } => {
            let reply = adapter.contact(&HolderHandle::new(handle)).await;
            if let ContactLookup::Found(details) = &reply.value {
                print_json(details)?;
            }
            report(&reply)
        }
        Command::Nameservers {
            domain,
            nameservers,
        } => {
            let reply = adapter.update_nameservers(&domain, &nameservers).await;
            report(&reply)
        }
        Command::Capabilities => {
            print_json(&adapter.capabilities())?;
            false
        }
        Command::Version => {
            print_json(&RegistrarAdapter::version_information())?;
            false
        }
    };

    if failed {
        std::process::exit(2);
    }

    Ok(())
}
