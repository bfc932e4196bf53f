use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tokio::runtime::Runtime;

use crate::assets::prefab::{Prefab, SharedPrefab};
use crate::errors::{Error, Result};

fn get_asset_runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create asset loader runtime"))
}

/// Loading state of a model request, as seen from the frame thread.
#[derive(Debug, Clone)]
pub enum ModelState {
    /// Still being read or parsed.
    Pending,
    /// Parsed and ready to instantiate.
    Ready(SharedPrefab),
    /// Reading or parsing failed. The message is kept for display and logs.
    Failed(String),
}

impl ModelState {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Handle to an in-flight model load.
///
/// Poll it once per frame; the first non-pending result is cached so later
/// polls return the same state without touching the channel.
pub struct ModelRequest {
    source: PathBuf,
    receiver: flume::Receiver<Result<Prefab>>,
    state: ModelState,
}

impl ModelRequest {
    /// Creates a request that is already resolved. Useful for prefabs built
    /// in memory.
    #[must_use]
    pub fn ready(source: impl Into<PathBuf>, prefab: Prefab) -> Self {
        let (_tx, receiver) = flume::bounded(1);
        Self {
            source: source.into(),
            receiver,
            state: ModelState::Ready(Arc::new(prefab)),
        }
    }

    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Last observed state, without touching the channel.
    #[must_use]
    pub fn state(&self) -> &ModelState {
        &self.state
    }

    /// Checks the loader channel without blocking.
    pub fn poll(&mut self) -> &ModelState {
        if self.state.is_pending() {
            match self.receiver.try_recv() {
                Ok(Ok(prefab)) => {
                    log::info!("Model ready: {}", self.source.display());
                    self.state = ModelState::Ready(Arc::new(prefab));
                }
                Ok(Err(e)) => {
                    log::error!("Failed to load model {}: {e}", self.source.display());
                    self.state = ModelState::Failed(e.to_string());
                }
                Err(flume::TryRecvError::Empty) => {}
                Err(flume::TryRecvError::Disconnected) => {
                    log::error!("Model loader for {} exited without a result", self.source.display());
                    self.state = ModelState::Failed("loader exited".into());
                }
            }
        }
        &self.state
    }

    /// Blocks until the load resolves.
    pub fn wait(self) -> Result<SharedPrefab> {
        match self.state {
            ModelState::Pending => {
                let prefab = self.receiver.recv()??;
                Ok(Arc::new(prefab))
            }
            ModelState::Ready(prefab) => Ok(prefab),
            ModelState::Failed(msg) => Err(Error::LoadFailed(msg)),
        }
    }
}

/// Central entry point for loading model files.
///
/// Loads run on a process-wide background runtime; results cross back to
/// the frame thread over a channel, so the scene is only ever mutated by the
/// thread that owns it.
#[derive(Clone, Default)]
pub struct AssetServer {
    root: Option<PathBuf>,
}

impl AssetServer {
    #[must_use]
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Resolves relative model paths against `root`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Starts loading a model in the background and returns immediately.
    pub fn load_prefab_async(&self, path: impl AsRef<Path>) -> ModelRequest {
        let source = self.resolve(path.as_ref());
        let (tx, receiver) = flume::bounded(1);

        log::info!("Loading model: {}", source.display());

        let task_path = source.clone();
        get_asset_runtime().spawn(async move {
            let result = read_and_parse(&task_path).await;
            // The request may have been dropped (viewer unmounted); nothing to do then.
            let _ = tx.send(result);
        });

        ModelRequest {
            source,
            receiver,
            state: ModelState::Pending,
        }
    }

    /// Loads a model, blocking the caller until it is parsed.
    pub fn load_prefab(&self, path: impl AsRef<Path>) -> Result<SharedPrefab> {
        let source = self.resolve(path.as_ref());
        let prefab = get_asset_runtime().block_on(read_and_parse(&source))?;
        Ok(Arc::new(prefab))
    }
}

async fn read_and_parse(path: &Path) -> Result<Prefab> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::AssetNotFound(path.display().to_string())
        } else {
            Error::Io(e)
        }
    })?;
    parse_model(&bytes)
}

#[cfg(feature = "gltf")]
fn parse_model(bytes: &[u8]) -> Result<Prefab> {
    crate::assets::loaders::GltfLoader::parse(bytes)
}

#[cfg(not(feature = "gltf"))]
fn parse_model(_bytes: &[u8]) -> Result<Prefab> {
    Err(Error::FeatureNotEnabled(
        "gltf (enable it with `features = [\"gltf\"]`)".into(),
    ))
}
