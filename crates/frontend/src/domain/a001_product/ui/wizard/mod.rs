//! Product creation wizard
//!
//! MVVM split:
//! - state.rs: pure state machine (steps, draft, generation tickets)
//! - view_model.rs: commands that drive the state machine against the service
//! - view.rs: Leptos components (pure UI)

mod state;
mod view;
mod view_model;

pub use state::{Applied, ProductWizard, WizardDraft, WizardError, WizardStep};
pub use view::CreateProductWizard;
pub use view_model::ProductWizardViewModel;
