// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitSync command-line client.
//!
//! Thin front end over the gateway library: signs in, shows daily stats,
//! the activity log, and community events. Exists mainly to exercise the
//! session and sync stack end to end.

use fitsync_client::workout::format_elapsed;
use fitsync_client::{ApiClient, ApiError, Config, CredentialStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    init_logging();

    let config = Config::from_env().expect("Failed to load configuration");
    let store = CredentialStore::new(config.state_dir.clone());
    let client = ApiClient::new(&config, store).expect("Failed to build API client");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("help");

    let result = match command {
        "login" => login(&client, &args[1..]).await,
        "logout" => {
            client.logout();
            println!("Signed out.");
            Ok(())
        }
        "stats" => stats(&client).await,
        "activities" => activities(&client).await,
        "events" => events(&client).await,
        _ => {
            print_usage();
            Ok(())
        }
    };

    if let Err(e) = result {
        if e.is_auth_expired() {
            eprintln!("{} Run `fitsync login <email> <password>`.", e.user_message());
        } else {
            eprintln!("{}", e.user_message());
        }
        std::process::exit(1);
    }
}

async fn login(client: &ApiClient, args: &[String]) -> fitsync_client::Result<()> {
    let (email, password) = match args {
        [email, password] => (email.as_str(), password.as_str()),
        _ => {
            return Err(ApiError::Validation(
                "Usage: fitsync login <email> <password>".to_string(),
            ))
        }
    };

    let session = client.login(email, password).await?;
    println!("Welcome back, {}!", session.user.first_name());
    Ok(())
}

async fn stats(client: &ApiClient) -> fitsync_client::Result<()> {
    let stats = client.daily_stats().await?;

    println!("Today ({})", stats.date);
    println!(
        "  Steps    {:>8}  ({:.0}% of goal)",
        stats.steps,
        stats.steps_progress()
    );
    println!(
        "  Sleep    {:>7}h  ({:.0}% of goal)",
        stats.sleep_hours,
        stats.sleep_progress()
    );
    println!(
        "  Calories {:>8}  ({:.0}% of goal)",
        stats.active_calories,
        stats.calories_progress()
    );
    if stats.bmi > 0.0 {
        println!("  BMI      {:>8.1}  ({})", stats.bmi, stats.bmi_category.category);
    }
    Ok(())
}

async fn activities(client: &ApiClient) -> fitsync_client::Result<()> {
    let page = client.activities().await?;

    for activity in &page.activities {
        println!(
            "{:<20} {:>8}  {:>6.0} kcal",
            activity.activity_name,
            format_elapsed(i64::from(activity.duration) * 60),
            activity.calories_burnt,
        );
    }
    println!(
        "{} activities, {:.0} kcal total",
        page.summary.total_activities, page.summary.total_calories_burnt
    );
    Ok(())
}

async fn events(client: &ApiClient) -> fitsync_client::Result<()> {
    let events = client.events().await?;

    for event in &events {
        println!(
            "{:<30} {:<12} {:>3} going  ({})",
            event.name, event.event_date, event.participant_count, event.location
        );
    }
    Ok(())
}

fn print_usage() {
    println!("FitSync CLI");
    println!();
    println!("Commands:");
    println!("  login <email> <password>   Sign in and persist the session");
    println!("  logout                     Drop the local session");
    println!("  stats                      Show today's daily stats");
    println!("  activities                 Show the activity log");
    println!("  events                     Show community events");
}

/// Initialize structured logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitsync_client=info".parse().unwrap()),
        )
        .with(format)
        .init();
}
