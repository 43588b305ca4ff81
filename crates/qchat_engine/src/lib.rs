//! QChat engine: IO collaborators and effect execution.
mod client;
mod engine;
mod filename;
mod persist;
mod redirect;
mod refresh;
mod script;
mod session;
mod store;
mod types;

pub use client::{ClientSettings, CommandClient, ReqwestCommandClient};
pub use engine::{Engine, EngineConfig};
pub use filename::download_filename;
pub use persist::{ensure_target_dir, AtomicFileWriter, PersistError};
pub use redirect::{RedirectResolver, ReqwestRedirectResolver};
pub use refresh::RefreshCoordinator;
pub use script::{DirectorySink, ScriptDownload, ScriptGenerator, ScriptSink};
pub use session::{SessionProvider, StaticSession};
pub use store::{JsonFileStore, RequestStore, StoreError};
pub use types::{Command, CommandError, FailureKind};
