use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use giro_route::adapters::inbound::{InMemoryEventStore, ReplayLocationSource, SimulatedTrack};
use giro_route::adapters::outbound::{init_logger, FilesystemContainerSource};
use giro_route::application::{NavigationOutput, NavigationService, RoutePlanningService};
use giro_route::domains::geo::format_distance;
use giro_route::domains::navigation::{
    NavigationEvent, NavigationEventActor, NavigationSession, WatchOptions,
};
use giro_route::domains::routing::{directions, summary, to_feature_collection};
use giro_route::Config;

struct Args {
    config: Option<PathBuf>,
    track: Option<PathBuf>,
    geojson: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        track: None,
        geojson: None,
    };
    let mut it = env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--track" => args.track = Some(it.next().context("--track needs a path")?.into()),
            "--geojson" => args.geojson = Some(it.next().context("--geojson needs a path")?.into()),
            other => args.config = Some(other.into()),
        }
    }
    Ok(args)
}

fn describe(event: &NavigationEvent) -> String {
    match event {
        NavigationEvent::SessionStarted { plan, .. } => {
            format!("Navigation started: {} stops", plan.len())
        }
        NavigationEvent::Approaching {
            container,
            distance_meters,
            ..
        } => format!(
            "Approaching container {} ({})",
            container.id(),
            format_distance(*distance_meters)
        ),
        NavigationEvent::Arrived { container, .. } => {
            format!("Arrived at container {} ({}% full)", container.id(), container.fill_level())
        }
        NavigationEvent::AdvancedTo {
            step_index,
            container,
            ..
        } => format!("Next: container {} (step {})", container.id(), step_index + 1),
        NavigationEvent::RouteCompleted { completed_count, .. } => {
            format!("Route completed, {} containers collected", completed_count)
        }
        NavigationEvent::SessionCancelled { .. } => "Navigation cancelled".to_string(),
        NavigationEvent::SessionReset { .. } => "Navigation reset".to_string(),
        NavigationEvent::PlanReplaced { plan, .. } => format!("Plan replaced: {} stops", plan.len()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt().with_env_filter(filter).finish(),
    )?;

    let args = parse_args()?;
    let config = Config::load_layered(args.config.as_ref())?;
    info!("Configuration loaded");

    let logger = init_logger(config.logging.file.as_deref(), &config.logging.level);

    let source = FilesystemContainerSource::new(
        config.data.data_dir.as_ref().map(PathBuf::from),
        config.data.snapshot_file.clone(),
    );
    info!("Reading containers from {}", source.path().display());
    let planner = RoutePlanningService::from_config(&config, Arc::new(source), logger.clone());

    let stats = planner.statistics()?;
    println!(
        "Containers: {} total, {} critical, {} medium, {} low",
        stats.total, stats.critical, stats.medium, stats.low
    );

    let device = match &args.track {
        Some(path) => ReplayLocationSource::from_json_file(path, Duration::from_millis(200)).await?,
        None => ReplayLocationSource::new(Vec::new(), Duration::ZERO),
    };
    let plan = planner
        .plan_route_from_device(&device, WatchOptions::route_calculation(), config.fallback_location())
        .await?;

    let route = summary(&plan);
    println!(
        "Route {}: {} stops ({} critical), {:.2} km, ~{} min",
        plan.id(),
        route.total_stops,
        route.critical_stops,
        route.total_distance_km,
        route.estimated_minutes
    );
    for step in directions(&plan)? {
        println!("  {}. [{}] {}", step.step_number, step.urgency, step.instruction);
    }

    if let Some(path) = &args.geojson {
        let json = serde_json::to_string_pretty(&to_feature_collection(&plan))?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Route exported to {}", path.display());
    }

    let capacity = config.navigation.event_channel_capacity;
    let (journal_tx, journal_rx) = mpsc::channel(capacity);
    let mut actor = NavigationEventActor::new(Arc::new(InMemoryEventStore::new()), journal_rx);
    let journal = actor.journal();
    let actor_task = tokio::spawn(async move { actor.run().await });

    let (output_tx, mut output_rx) = mpsc::channel(capacity);
    let consumer = tokio::spawn(async move {
        while let Some(output) = output_rx.recv().await {
            match output {
                NavigationOutput::Event(event) => println!("> {}", describe(&event)),
                NavigationOutput::LocationFailed(e) => warn!("Location unavailable: {}", e),
            }
        }
    });

    let session_id = Uuid::new_v4().to_string();
    let session = NavigationSession::new(session_id.clone(), config.navigation_settings());
    let navigator = NavigationService::new(session, output_tx, logger.clone()).with_journal(journal_tx);
    navigator.start(plan.clone()).await?;

    let feed = match args.track {
        Some(_) => device,
        None => {
            let fixes = SimulatedTrack::default().generate(&plan)?;
            ReplayLocationSource::from_fixes(fixes, Duration::from_millis(50))
        }
    };
    let status = navigator.follow(&feed, config.watch_options()).await?;
    info!("Navigation finished: {}", status);

    drop(navigator);
    if let Err(e) = consumer.await {
        error!("Output consumer failed: {}", e);
    }
    if let Err(e) = actor_task.await {
        error!("Journal actor failed: {}", e);
    }

    if let Some(history) = journal.read().await.get(&session_id) {
        println!(
            "Collected {}/{} containers, {} approach notices",
            history.collected.len(),
            history.planned_stops,
            history.approach_notices
        );
    }

    Ok(())
}
