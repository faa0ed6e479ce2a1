//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `firmkit-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateStore`: Module template retrieval
//!   - `Confirm`: Overwrite/create confirmation
//!   - `Clock`: Date for `DATE`/`YEAR` tags
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Clock, Confirm, ConfirmKind, ConfirmPrompt, Filesystem, TemplateStore};

#[cfg(test)]
pub use output::{MockClock, MockConfirm, MockFilesystem, MockTemplateStore};
