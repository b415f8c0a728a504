//! hmdscan Discovery
//!
//! Finds head-mounted displays among the display adapters attached to a
//! host and resolves each one into an [`HmdDescriptor`]:
//! - **Enumeration:** adapters and their monitor sub-records, lazily
//! - **Geometry:** bounded monitor rectangle collection and correlation
//! - **Identification:** ordered hardware-id pattern table to [`HmdVariant`]
//! - **Parameters:** fixed optical constants per variant
//! - **Reconciliation:** keeping a device registry in step with each pass

pub mod correlate;
pub mod discovery;
pub mod enumerate;
pub mod identify;
pub mod monitors;
pub mod params;
pub mod registry;
pub mod variant;

pub use correlate::*;
pub use discovery::*;
pub use enumerate::*;
pub use identify::*;
pub use monitors::*;
pub use params::*;
pub use registry::*;
pub use variant::*;
