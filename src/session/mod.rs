use std::sync::Arc;

use log::{error, info, warn};
use tokio::sync::Mutex;

use crate::config::EngineConfig;
use crate::content::{EducationContent, GameDefinition};
use crate::error::EngineError;
use crate::models::{
    ArAnimation, ArSession, CameraDescriptor, OverlayElement, OverlayKind, OverlayStyle,
    ScreenPosition, SessionMode,
};
use crate::overlay::OverlayStore;
use crate::pipeline::{DetectionPipeline, PipelineContext};
use crate::resource::{
    CameraFacing, CameraStream, DetectorChannel, FrameConstraints, ResourceAdapter,
};

const WELCOME_TTL_MS: u64 = 5_000;

struct ActiveSession {
    session: Arc<Mutex<ArSession>>,
    store: OverlayStore,
    pipeline: DetectionPipeline,
    camera: Arc<CameraStream>,
    detector: DetectorChannel,
}

/// Owns the AR session and, transitively, the overlay store and tracking
/// snapshot for its lifetime. At most one live session per manager; a new
/// session always starts from an empty store.
pub struct SessionManager {
    adapter: Arc<dyn ResourceAdapter>,
    config: EngineConfig,
    active: Mutex<Option<ActiveSession>>,
}

impl SessionManager {
    pub fn new(adapter: Arc<dyn ResourceAdapter>, config: EngineConfig) -> Self {
        Self {
            adapter,
            config,
            active: Mutex::new(None),
        }
    }

    /// Start a session in the given mode. Capability problems surface as
    /// `Unsupported` before any resource is touched; acquisition is
    /// all-or-nothing, so a failed start leaves nothing held.
    pub async fn start(&self, mode: SessionMode) -> Result<ArSession, EngineError> {
        let mut active = self.active.lock().await;
        if active.is_some() {
            return Err(EngineError::SessionActive);
        }

        if let Some(missing) = self.adapter.capabilities().missing() {
            return Err(EngineError::Unsupported(missing));
        }

        let constraints = FrameConstraints {
            ideal_width: self.config.frame_width,
            ideal_height: self.config.frame_height,
        };
        let camera = self
            .adapter
            .acquire_camera(CameraFacing::Environment, constraints)
            .await?;

        let detector = match self.adapter.spawn_detector().await {
            Ok(detector) => detector,
            Err(err) => {
                self.adapter.release_camera(&camera).await;
                return Err(err);
            }
        };

        let Some(replies) = detector.take_replies().await else {
            self.adapter.terminate_detector(&detector).await;
            self.adapter.release_camera(&camera).await;
            return Err(EngineError::DetectorUnavailable(
                "reply channel already taken".into(),
            ));
        };

        let descriptor = CameraDescriptor {
            stream_id: camera.id.clone(),
            width: camera.width,
            height: camera.height,
        };
        let session = Arc::new(Mutex::new(ArSession::new(mode, descriptor)));
        let store = OverlayStore::new();
        let camera = Arc::new(camera);

        store.insert(welcome_overlay()).await;

        let mut pipeline = DetectionPipeline::new();
        let ctx = PipelineContext {
            config: self.config.clone(),
            adapter: Arc::clone(&self.adapter),
            camera: Arc::clone(&camera),
            session: Arc::clone(&session),
            store: store.clone(),
            requests: detector.requests.clone(),
            replies,
        };
        if let Err(err) = pipeline.start(ctx) {
            self.adapter.terminate_detector(&detector).await;
            self.adapter.release_camera(&camera).await;
            return Err(EngineError::DetectorUnavailable(err.to_string()));
        }

        let snapshot = session.lock().await.clone();
        info!(
            "AR session {} started in {} mode on stream {}",
            snapshot.id,
            mode.as_str(),
            snapshot.camera.stream_id
        );

        *active = Some(ActiveSession {
            session,
            store,
            pipeline,
            camera,
            detector,
        });

        Ok(snapshot)
    }

    /// Education mode: start a session and seed the first catalog step.
    pub async fn start_education(
        &self,
        content: &EducationContent,
    ) -> Result<ArSession, EngineError> {
        let session = self.start(SessionMode::Education).await?;

        if let Some(step) = content.steps.first() {
            self.seed_overlay(tutorial_overlay(
                format!("edu-{}-step-1", content.id),
                step.instruction.clone(),
                step.hints.clone(),
            ))
            .await;
        }

        Ok(session)
    }

    /// Game mode: start a session and seed the rules card.
    pub async fn start_game(&self, game: &GameDefinition) -> Result<ArSession, EngineError> {
        let session = self.start(SessionMode::Game).await?;

        self.seed_overlay(tutorial_overlay(
            format!("game-{}-rules", game.id),
            game.name.clone(),
            game.rules.clone(),
        ))
        .await;

        Ok(session)
    }

    /// Stop the live session: cancel the pipeline, clear the store, then hand
    /// every resource back. Idempotent; stopping with no session is a no-op.
    pub async fn stop(&self) {
        let Some(mut live) = self.active.lock().await.take() else {
            return;
        };

        if let Err(err) = live.pipeline.stop().await {
            error!("detection pipeline teardown failed: {err:?}");
        }

        live.store.clear().await;

        self.adapter.terminate_detector(&live.detector).await;
        self.adapter.release_camera(&live.camera).await;

        let mut session = live.session.lock().await;
        session.active = false;
        info!("AR session {} stopped", session.id);
    }

    pub async fn is_active(&self) -> bool {
        self.active.lock().await.is_some()
    }

    /// Current session with its latest tracking snapshot, if one is live.
    pub async fn session(&self) -> Option<ArSession> {
        let active = self.active.lock().await;
        match active.as_ref() {
            Some(live) => Some(live.session.lock().await.clone()),
            None => None,
        }
    }

    /// Overlay elements in insertion order for the external renderer. Empty
    /// when no session is live.
    pub async fn overlay_snapshot(&self) -> Vec<OverlayElement> {
        let active = self.active.lock().await;
        match active.as_ref() {
            Some(live) => live.store.snapshot().await,
            None => Vec::new(),
        }
    }

    /// Animation descriptors for the external renderer.
    pub async fn animations(&self) -> Vec<ArAnimation> {
        let active = self.active.lock().await;
        match active.as_ref() {
            Some(live) => live.store.animations().await,
            None => Vec::new(),
        }
    }

    /// Register an animation payload against the live session's store.
    pub async fn register_animation(&self, animation: ArAnimation) {
        let active = self.active.lock().await;
        if let Some(live) = active.as_ref() {
            live.store.insert_animation(animation).await;
        } else {
            warn!("animation {} dropped: no live session", animation.id);
        }
    }

    async fn seed_overlay(&self, element: OverlayElement) {
        let active = self.active.lock().await;
        if let Some(live) = active.as_ref() {
            live.store.insert(element).await;
        }
    }
}

fn welcome_overlay() -> OverlayElement {
    OverlayElement {
        id: "welcome".into(),
        kind: OverlayKind::Tutorial,
        position: ScreenPosition { x: 0.5, y: 0.15 },
        content: "Point your camera at a waste item to get sorting guidance".into(),
        style: OverlayStyle {
            animation: Some("fade-in".into()),
            ..OverlayStyle::default()
        },
        ttl_ms: Some(WELCOME_TTL_MS),
        target: None,
    }
}

fn tutorial_overlay(id: String, headline: String, lines: Vec<String>) -> OverlayElement {
    let content = if lines.is_empty() {
        headline
    } else {
        format!("{headline}\n{}", lines.join("\n"))
    };

    OverlayElement {
        id,
        kind: OverlayKind::Tutorial,
        position: ScreenPosition { x: 0.5, y: 0.2 },
        content,
        style: OverlayStyle::default(),
        ttl_ms: None,
        target: None,
    }
}
