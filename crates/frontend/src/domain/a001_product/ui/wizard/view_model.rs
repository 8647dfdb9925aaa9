use super::state::{Applied, ProductWizard, WizardDraft, WizardError};
use crate::shared::api_client::SharedStorefront;
use contracts::domain::a001_product::ProductId;
use leptos::prelude::*;

pub const ACTIVATED_NOTICE: &str = "Product activated! Event emitted asynchronously.";

/// ViewModel for the product creation wizard
///
/// - State lives in a single `ProductWizard` signal
/// - Commands start a transition, call the service, then apply the result
/// - `on_created` fires once per successful activation
#[derive(Clone)]
pub struct ProductWizardViewModel {
    pub wizard: RwSignal<ProductWizard>,
    api: SharedStorefront,
    on_created: Callback<ProductId>,
}

impl ProductWizardViewModel {
    pub fn new(api: SharedStorefront, on_created: Callback<ProductId>) -> Self {
        Self {
            wizard: RwSignal::new(ProductWizard::new()),
            api,
            on_created,
        }
    }

    pub fn is_busy(&self) -> Signal<bool> {
        let wizard = self.wizard;
        Signal::derive(move || wizard.with(ProductWizard::is_busy))
    }

    /// Edit the draft in place
    pub fn update_draft(&self, change: impl FnOnce(&mut WizardDraft)) {
        self.wizard.update(|w| change(w.draft_mut()));
    }

    fn start<P>(&self, begin: impl FnOnce(&mut ProductWizard) -> Result<P, WizardError>) -> Option<P> {
        match self.wizard.try_update(begin)? {
            Ok(pending) => Some(pending),
            Err(e) => {
                log::debug!("Wizard transition rejected: {}", e);
                None
            }
        }
    }

    fn settle(wizard: RwSignal<ProductWizard>, apply: impl FnOnce(&mut ProductWizard) -> Applied) -> Option<Applied> {
        let applied = wizard.try_update(apply);
        if applied == Some(Applied::Stale) {
            log::debug!("Ignoring response of a cancelled wizard run");
        }
        applied
    }

    /// Step 1: create an empty product in the chosen category
    pub fn create_command(&self) {
        let Some(pending) = self.start(ProductWizard::begin_create) else {
            return;
        };
        let api = self.api.clone();
        let wizard = self.wizard;
        wasm_bindgen_futures::spawn_local(async move {
            let result = api.create_product(pending.category).await;
            if let Ok(id) = &result {
                log::info!("Product {} created in {}", id, pending.category);
            }
            Self::settle(wizard, |w| w.complete_create(pending.ticket, result));
        });
    }

    /// Step 2: attach details to the created product
    pub fn submit_details_command(&self) {
        let Some(pending) = self.start(ProductWizard::begin_details) else {
            return;
        };
        let api = self.api.clone();
        let wizard = self.wizard;
        wasm_bindgen_futures::spawn_local(async move {
            let result = api
                .add_product_details(pending.product_id, &pending.request)
                .await;
            if let Err(e) = &result {
                log::warn!("Details for product {} rejected: {}", pending.product_id, e);
            }
            Self::settle(wizard, |w| w.complete_details(pending.ticket, result));
        });
    }

    /// Step 3: activate and hand the product id to the parent
    pub fn activate_command(&self) {
        let Some(pending) = self.start(ProductWizard::begin_activate) else {
            return;
        };
        let api = self.api.clone();
        let wizard = self.wizard;
        let on_created = self.on_created;
        wasm_bindgen_futures::spawn_local(async move {
            let result = api.activate_product(pending.product_id).await;
            if let Some(Applied::Activated(id)) =
                Self::settle(wizard, |w| w.complete_activate(pending.ticket, result))
            {
                log::info!("Product {} activated", id);
                on_created.run(id);
                if let Some(win) = web_sys::window() {
                    let _ = win.alert_with_message(ACTIVATED_NOTICE);
                }
            }
        });
    }

    pub fn revise_command(&self) {
        self.start(ProductWizard::revise_details);
    }

    pub fn cancel_command(&self) {
        if self.wizard.try_update(ProductWizard::cancel) == Some(true) {
            log::info!("Product wizard cancelled");
        }
    }
}
