pub mod display;
pub mod notifier;
pub mod sampler;
pub mod transport;

pub use display::{CycleView, DisplaySurface};
pub use notifier::{Notifier, NotifyError};
pub use sampler::{ProcessLookupError, ProcessSource, Sampler, list_processes};
pub use transport::{MessageTransport, TransportError};
