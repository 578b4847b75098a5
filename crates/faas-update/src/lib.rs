//! Function update reconciliation
//!
//! Turns a [`FunctionDeployment`](faas_common::FunctionDeployment) update and
//! the Deployment currently stored in the cluster into the Deployment to write
//! back. No I/O happens here; fetching and submitting belong to the caller.
//!
//! # Usage
//!
//! ```rust,ignore
//! let current = client.get_deployment(&request.service).await?;
//! let updated = UpdateReconciler::new().reconcile(&request, current)?;
//! client.replace_deployment(&updated).await?;
//! ```

#![deny(missing_docs)]

pub mod deployment;
pub mod env;
pub mod labels;
pub mod quantity;
pub mod reconciler;
pub mod resources;
pub mod selector;
pub mod tag;

pub use deployment::PrimaryContainer;
pub use labels::MergedLabels;
pub use reconciler::UpdateReconciler;
pub use tag::{ClockTagGenerator, TagGenerator};
