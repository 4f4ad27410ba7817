use crate::common::{ApplicationResult, LocationError};
use crate::domains::logger::DynLogger;
use crate::domains::navigation::{
    LocationFix, LocationSource, LocationUpdate, NavigationEvent, NavigationOverview,
    NavigationProgress, NavigationSession, NavigationStatus, WatchOptions,
};
use crate::domains::routing::RoutePlan;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// What a navigation consumer (map, audio cues) receives.
#[derive(Debug, Clone)]
pub enum NavigationOutput {
    Event(NavigationEvent),
    LocationFailed(LocationError),
}

/// Drives one [`NavigationSession`]. Every fix and control call goes through
/// the same lock, so the session sees them strictly one at a time.
pub struct NavigationService {
    session: Arc<Mutex<NavigationSession>>,
    outputs: mpsc::Sender<NavigationOutput>,
    journal: Option<mpsc::Sender<NavigationEvent>>,
    logger: DynLogger,
}

impl NavigationService {
    pub fn new(session: NavigationSession, outputs: mpsc::Sender<NavigationOutput>, logger: DynLogger) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            outputs,
            journal: None,
            logger,
        }
    }

    /// Also forward every event to a journaling actor.
    pub fn with_journal(mut self, journal: mpsc::Sender<NavigationEvent>) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn session(&self) -> Arc<Mutex<NavigationSession>> {
        self.session.clone()
    }

    pub async fn start(&self, plan: RoutePlan) -> ApplicationResult<()> {
        let mut session = self.session.lock().await;
        session.start(plan)?;
        self.logger.info(&format!(
            "Navigation {} started with {} stops",
            session.id,
            session.progress().total_steps
        ));
        self.publish(&mut session).await;
        Ok(())
    }

    pub async fn handle_fix(&self, fix: LocationFix) -> ApplicationResult<Vec<NavigationEvent>> {
        let mut session = self.session.lock().await;
        session.on_location_fix(fix)?;
        Ok(self.publish(&mut session).await)
    }

    /// Feed one item of a watch stream. Failures are passed on to the
    /// consumer unchanged and leave the session untouched.
    pub async fn handle_update(&self, update: LocationUpdate) -> ApplicationResult<Vec<NavigationEvent>> {
        match update {
            Ok(fix) => self.handle_fix(fix).await,
            Err(e) => {
                self.logger.warn(&format!("Location update failed: {}", e));
                if self.outputs.send(NavigationOutput::LocationFailed(e)).await.is_err() {
                    self.logger.warn("Navigation consumer dropped; location failure not delivered");
                }
                Ok(Vec::new())
            }
        }
    }

    pub async fn cancel(&self) -> ApplicationResult<()> {
        let mut session = self.session.lock().await;
        session.cancel()?;
        self.logger.info(&format!("Navigation {} cancelled", session.id));
        self.publish(&mut session).await;
        Ok(())
    }

    pub async fn replace_plan(&self, plan: RoutePlan) -> ApplicationResult<()> {
        let mut session = self.session.lock().await;
        session.replace_plan(plan)?;
        self.publish(&mut session).await;
        Ok(())
    }

    pub async fn reset(&self) -> ApplicationResult<()> {
        let mut session = self.session.lock().await;
        session.reset()?;
        self.publish(&mut session).await;
        Ok(())
    }

    pub async fn status(&self) -> NavigationStatus {
        self.session.lock().await.status()
    }

    pub async fn progress(&self) -> NavigationProgress {
        self.session.lock().await.progress()
    }

    pub async fn overview(&self) -> Option<NavigationOverview> {
        self.session.lock().await.overview()
    }

    /// Watch `source` and feed every update to the session until the stream
    /// ends or the session finishes. The watch is stopped either way.
    pub async fn follow(&self, source: &dyn LocationSource, options: WatchOptions) -> ApplicationResult<NavigationStatus> {
        let mut subscription = source.watch(options)?;
        self.logger
            .info(&format!("Following location watch {}", subscription.handle));

        while let Some(update) = subscription.updates.recv().await {
            if let Err(e) = self.handle_update(update).await {
                self.logger.error(&format!("Rejected location update: {}", e));
            }
            if self.status().await.is_terminal() {
                break;
            }
        }

        source.stop(subscription.handle);
        let status = self.status().await;
        self.logger.info(&format!(
            "Stopped location watch {} with session {}",
            subscription.handle, status
        ));
        Ok(status)
    }

    async fn publish(&self, session: &mut NavigationSession) -> Vec<NavigationEvent> {
        let events = session.uncommitted_events().to_vec();
        session.mark_events_as_committed();

        for event in &events {
            if let Some(journal) = &self.journal {
                if journal.send(event.clone()).await.is_err() {
                    self.logger.warn("Navigation journal closed; event not recorded");
                }
            }
            if self.outputs.send(NavigationOutput::Event(event.clone())).await.is_err() {
                self.logger.warn("Navigation consumer dropped; event not delivered");
            }
        }
        events
    }
}
