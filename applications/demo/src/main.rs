//! Ballchasing demo - fetches a few replays and prints their stats

mod config;

use anyhow::Context;
use ballchasing_client::{
    BallchasingClient, BallchasingError, ClientConfig, Group, QueryParams, ReplayDetails,
    TeamColor,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::DemoConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ballchasing_demo=info,ballchasing_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DemoConfig::load()?;
    config.validate()?;

    let client = BallchasingClient::new(ClientConfig::new(config.api_key.clone()))
        .context("Failed to create ballchasing client")?;

    recent_replays(&client).await?;
    player_replays(&client, "riainoo").await;

    match config.group_id.as_deref() {
        Some(id) => replay_or_group(&client, id).await,
        None => println!(
            "\nSet BALLCHASING_GROUP_ID environment variable to fetch specific replay details"
        ),
    }

    Ok(())
}

async fn recent_replays(client: &BallchasingClient) -> anyhow::Result<()> {
    tracing::info!("Fetching recent replays");

    let filters = QueryParams::new().with("count", "10");
    let replays = client
        .replays()
        .list_replays(&filters)
        .await
        .context("Error fetching replays")?;

    println!("Found {} replays:", replays.list.len());
    for (i, replay) in replays.list.iter().enumerate() {
        println!(
            "{}. {} (ID: {}, Duration: {}s)",
            i + 1,
            replay.title,
            replay.id,
            replay.duration
        );
    }

    Ok(())
}

async fn player_replays(client: &BallchasingClient, player_name: &str) {
    tracing::info!(player = %player_name, "Fetching player replays");

    match client
        .replays()
        .list_replays_by_player(player_name, 5)
        .await
    {
        Ok(replays) => {
            println!("\nFound {} replays for {}:", replays.list.len(), player_name);
            for (i, replay) in replays.list.iter().enumerate() {
                println!(
                    "{}. {} ({})",
                    i + 1,
                    replay.title,
                    replay.date.format("%Y-%m-%d")
                );
            }
        }
        Err(e) => tracing::error!(error = %e, "Error fetching player replays"),
    }
}

/// The id may name a replay or a group; try the replay first.
async fn replay_or_group(client: &BallchasingClient, id: &str) {
    println!("\nFetching details for replay/group: {}", id);

    match client.replays().get_replay_details(id).await {
        Ok(details) => print_replay(&details),
        Err(BallchasingError::UnexpectedStatus { status: 404 }) => {
            tracing::info!(id = %id, "No replay with this id, trying groups");
            match client.groups().get_group(id).await {
                Ok(group) => print_group(&group),
                Err(e) => tracing::error!(error = %e, "Error fetching group"),
            }
        }
        Err(e) => tracing::error!(error = %e, "Error fetching replay details"),
    }
}

fn print_replay(details: &ReplayDetails) {
    println!("Replay: {}", details.title);
    println!("Duration: {} seconds", details.duration);
    println!("Blue team players: {}", details.blue.players.len());
    println!("Orange team players: {}", details.orange.players.len());

    for color in [TeamColor::Blue, TeamColor::Orange] {
        println!("\n{} team:", capitalize(color.as_str()));
        for player in &details.team(color).players {
            println!(
                "  - {}: {} goals, {} saves, {} assists",
                player.name, player.goals, player.saves, player.assists
            );
        }
    }

    match details.winner() {
        Some(color) => println!("\nWinner: {}", color),
        None => println!("\nNo winner recorded"),
    }
}

fn print_group(group: &Group) {
    println!("Group: {}", group.name);
    println!("Players: {}", group.players.len());

    for player in &group.players {
        let totals = &player.cumulative;
        println!(
            "  - {} ({}): {} games, {} wins, {} goals, {} saves",
            player.name,
            player.team,
            totals.games,
            totals.wins,
            totals.core.goals,
            totals.core.saves
        );
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
