//! Product creation wizard as a plain state machine.
//!
//! Every transition is split into `begin_*` (validate input, claim the single
//! in-flight slot, hand out a [`Ticket`]) and `complete_*` (apply the remote
//! result). Cancelling bumps the generation, so results carrying an older
//! ticket are ignored and cannot resurrect a discarded draft.

use contracts::domain::a001_product::{AddDetailsRequest, Product, ProductAttributes, ProductId};
use contracts::enums::capacity::{CapacityType, CapacityUnit};
use contracts::enums::category::Category;
use contracts::shared::api_error::ApiError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectingCategory,
    EnteringDetails { product_id: ProductId },
    ReadyToActivate { product_id: ProductId },
}

impl WizardStep {
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            WizardStep::SelectingCategory => None,
            WizardStep::EnteringDetails { product_id }
            | WizardStep::ReadyToActivate { product_id } => Some(*product_id),
        }
    }
}

/// Form data of one wizard run, kept as typed-in text until submission
#[derive(Debug, Clone, PartialEq)]
pub struct WizardDraft {
    pub category: String,
    pub title: String,
    pub code: String,
    pub description: String,
    pub brand: String,
    pub series: String,
    pub capacity: String,
    pub capacity_unit: CapacityUnit,
    pub capacity_type: CapacityType,
}

impl Default for WizardDraft {
    fn default() -> Self {
        Self {
            category: Category::Computers.id().to_string(),
            title: String::new(),
            code: String::new(),
            description: String::new(),
            brand: String::new(),
            series: String::new(),
            capacity: String::new(),
            capacity_unit: CapacityUnit::default(),
            capacity_type: CapacityType::default(),
        }
    }
}

impl WizardDraft {
    /// Build the details payload, rejecting input the service would refuse
    pub fn to_details_request(&self) -> Result<AddDetailsRequest, WizardError> {
        let category = Category::from_code(&self.category)
            .ok_or_else(|| WizardError::UnknownCategory(self.category.clone()))?;
        let title = required("Title", &self.title)?;
        let code = required("Code", &self.code)?;
        let description = required("Description", &self.description)?;
        let brand = required("Brand", &self.brand)?;
        let series = required("Series", &self.series)?;
        let capacity = self
            .capacity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|c| *c > 0)
            .ok_or_else(|| WizardError::InvalidCapacity(self.capacity.clone()))?;

        Ok(AddDetailsRequest {
            title,
            code,
            variation_type: AddDetailsRequest::VARIATION_NONE.to_string(),
            description,
            about: AddDetailsRequest::default_about(),
            details: ProductAttributes {
                category: category.display_name().to_string(),
                brand,
                series,
                capacity,
                capacity_unit: self.capacity_unit,
                capacity_type: self.capacity_type,
            },
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, WizardError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(WizardError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Capacity must be a positive whole number")]
    InvalidCapacity(String),
    #[error("Please wait for the current request to finish")]
    Busy,
    #[error("This action is not available at the current step")]
    WrongStep,
}

/// Proof that a request was started by the current generation of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingCreate {
    pub ticket: Ticket,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingDetails {
    pub ticket: Ticket,
    pub product_id: ProductId,
    pub request: AddDetailsRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingActivate {
    pub ticket: Ticket,
    pub product_id: ProductId,
}

/// What a `complete_*` call did with the result it was given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Advanced,
    Failed,
    /// Result belonged to a cancelled run and was dropped
    Stale,
    /// Product activated, wizard reset to the first step
    Activated(ProductId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductWizard {
    step: WizardStep,
    draft: WizardDraft,
    error: Option<String>,
    in_flight: bool,
    generation: u64,
    /// Product as last echoed back by the details call
    saved: Option<Product>,
}

impl Default for ProductWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::SelectingCategory,
            draft: WizardDraft::default(),
            error: None,
            in_flight: false,
            generation: 0,
            saved: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &WizardDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut WizardDraft {
        &mut self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn saved_product(&self) -> Option<&Product> {
        self.saved.as_ref()
    }

    pub fn can_cancel(&self) -> bool {
        !matches!(self.step, WizardStep::SelectingCategory)
    }

    fn claim(&mut self) -> Result<Ticket, WizardError> {
        if self.in_flight {
            return Err(WizardError::Busy);
        }
        self.in_flight = true;
        self.error = None;
        Ok(Ticket {
            generation: self.generation,
        })
    }

    fn reject<T>(&mut self, error: WizardError) -> Result<T, WizardError> {
        if error != WizardError::Busy {
            self.error = Some(error.to_string());
        }
        Err(error)
    }

    /// Settle the in-flight slot; `false` when the ticket is outdated
    fn release(&mut self, ticket: Ticket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.in_flight = false;
        true
    }

    // ------------------------------------------------------------------------
    // Step 1: category -> create product
    // ------------------------------------------------------------------------

    pub fn begin_create(&mut self) -> Result<PendingCreate, WizardError> {
        if self.in_flight {
            return Err(WizardError::Busy);
        }
        if self.step != WizardStep::SelectingCategory {
            return self.reject(WizardError::WrongStep);
        }
        let category = match Category::from_code(&self.draft.category) {
            Some(category) => category,
            None => return self.reject(WizardError::UnknownCategory(self.draft.category.clone())),
        };
        let ticket = self.claim()?;
        Ok(PendingCreate { ticket, category })
    }

    pub fn complete_create(&mut self, ticket: Ticket, result: Result<ProductId, ApiError>) -> Applied {
        if !self.release(ticket) {
            return Applied::Stale;
        }
        match result {
            Ok(product_id) => {
                self.step = WizardStep::EnteringDetails { product_id };
                Applied::Advanced
            }
            Err(e) => {
                self.error = Some(
                    e.server_message()
                        .unwrap_or("Failed to create product")
                        .to_string(),
                );
                Applied::Failed
            }
        }
    }

    // ------------------------------------------------------------------------
    // Step 2: details
    // ------------------------------------------------------------------------

    pub fn begin_details(&mut self) -> Result<PendingDetails, WizardError> {
        if self.in_flight {
            return Err(WizardError::Busy);
        }
        let product_id = match self.step {
            WizardStep::EnteringDetails { product_id } => product_id,
            _ => return self.reject(WizardError::WrongStep),
        };
        let request = match self.draft.to_details_request() {
            Ok(request) => request,
            Err(e) => return self.reject(e),
        };
        let ticket = self.claim()?;
        Ok(PendingDetails {
            ticket,
            product_id,
            request,
        })
    }

    pub fn complete_details(
        &mut self,
        ticket: Ticket,
        result: Result<Option<Product>, ApiError>,
    ) -> Applied {
        if !self.release(ticket) {
            return Applied::Stale;
        }
        let product_id = match self.step {
            WizardStep::EnteringDetails { product_id } => product_id,
            _ => return Applied::Stale,
        };
        match result {
            Ok(product) => {
                self.saved = product;
                self.step = WizardStep::ReadyToActivate { product_id };
                Applied::Advanced
            }
            Err(e) => {
                self.error = Some(
                    e.validation_message()
                        .unwrap_or("Failed to add details")
                        .to_string(),
                );
                Applied::Failed
            }
        }
    }

    /// Go back from activation to the details form, keeping the draft
    pub fn revise_details(&mut self) -> Result<(), WizardError> {
        if self.in_flight {
            return Err(WizardError::Busy);
        }
        match self.step {
            WizardStep::ReadyToActivate { product_id } => {
                self.step = WizardStep::EnteringDetails { product_id };
                self.error = None;
                Ok(())
            }
            _ => self.reject(WizardError::WrongStep),
        }
    }

    // ------------------------------------------------------------------------
    // Step 3: activation
    // ------------------------------------------------------------------------

    pub fn begin_activate(&mut self) -> Result<PendingActivate, WizardError> {
        if self.in_flight {
            return Err(WizardError::Busy);
        }
        let product_id = match self.step {
            WizardStep::ReadyToActivate { product_id } => product_id,
            _ => return self.reject(WizardError::WrongStep),
        };
        let ticket = self.claim()?;
        Ok(PendingActivate { ticket, product_id })
    }

    pub fn complete_activate(
        &mut self,
        ticket: Ticket,
        result: Result<Option<Product>, ApiError>,
    ) -> Applied {
        if !self.release(ticket) {
            return Applied::Stale;
        }
        let product_id = match self.step {
            WizardStep::ReadyToActivate { product_id } => product_id,
            _ => return Applied::Stale,
        };
        match result {
            Ok(_) => {
                self.reset();
                Applied::Activated(product_id)
            }
            Err(e) => {
                self.error = Some(
                    e.server_message()
                        .unwrap_or("Failed to activate product")
                        .to_string(),
                );
                Applied::Failed
            }
        }
    }

    // ------------------------------------------------------------------------
    // Cancellation
    // ------------------------------------------------------------------------

    /// Abandon the current run from the details or activation step.
    /// Requests still in flight are not aborted; their results become stale.
    pub fn cancel(&mut self) -> bool {
        if !self.can_cancel() {
            return false;
        }
        self.reset();
        true
    }

    /// Return to the first step with an empty draft
    pub fn reset(&mut self) {
        self.generation += 1;
        self.step = WizardStep::SelectingCategory;
        self.draft = WizardDraft::default();
        self.error = None;
        self.in_flight = false;
        self.saved = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_client::StorefrontApi;
    use crate::shared::fake_storefront::FakeStorefront;
    use futures::executor::block_on;

    fn fill_details(wizard: &mut ProductWizard) {
        let draft = wizard.draft_mut();
        draft.title = "Portable SSD".into();
        draft.code = "PSSD-1".into();
        draft.description = "USB-C drive".into();
        draft.brand = "Acme".into();
        draft.series = "Swift".into();
        draft.capacity = "512".into();
        draft.capacity_unit = CapacityUnit::GB;
        draft.capacity_type = CapacityType::SSD;
    }

    /// Run step 1 the way the view model does: begin, await, complete
    fn create(api: &FakeStorefront, wizard: &mut ProductWizard) -> Result<Applied, WizardError> {
        let pending = wizard.begin_create()?;
        let result = block_on(api.create_product(pending.category));
        Ok(wizard.complete_create(pending.ticket, result))
    }

    fn submit_details(api: &FakeStorefront, wizard: &mut ProductWizard) -> Result<Applied, WizardError> {
        let pending = wizard.begin_details()?;
        let result = block_on(api.add_product_details(pending.product_id, &pending.request));
        Ok(wizard.complete_details(pending.ticket, result))
    }

    fn activate(api: &FakeStorefront, wizard: &mut ProductWizard) -> Result<Applied, WizardError> {
        let pending = wizard.begin_activate()?;
        let result = block_on(api.activate_product(pending.product_id));
        Ok(wizard.complete_activate(pending.ticket, result))
    }

    #[test]
    fn test_full_run_activates_and_resets() {
        let api = FakeStorefront::new();
        let mut wizard = ProductWizard::new();

        assert_eq!(create(&api, &mut wizard), Ok(Applied::Advanced));
        let product_id = wizard.step().product_id().unwrap();
        assert_eq!(wizard.step(), WizardStep::EnteringDetails { product_id });

        fill_details(&mut wizard);
        assert_eq!(submit_details(&api, &mut wizard), Ok(Applied::Advanced));
        assert_eq!(wizard.step(), WizardStep::ReadyToActivate { product_id });

        assert_eq!(activate(&api, &mut wizard), Ok(Applied::Activated(product_id)));
        assert_eq!(wizard.step(), WizardStep::SelectingCategory);
        assert_eq!(wizard.draft(), &WizardDraft::default());
        assert!(!wizard.is_busy());

        let stored = block_on(api.get_product(product_id)).unwrap();
        assert!(stored.is_active);
        assert_eq!(stored.title.as_deref(), Some("Portable SSD"));
    }

    #[test]
    fn test_unknown_category_never_reaches_the_network() {
        let api = FakeStorefront::new();
        for raw in ["0", "3", "-1", "fashion", ""] {
            let mut wizard = ProductWizard::new();
            wizard.draft_mut().category = raw.to_string();
            assert!(matches!(create(&api, &mut wizard), Err(WizardError::UnknownCategory(_))));
            assert_eq!(wizard.step(), WizardStep::SelectingCategory);
            assert!(!wizard.is_busy());
            assert!(wizard.error().is_some());
        }
        assert_eq!(api.calls_to("create_product"), 0);
    }

    #[test]
    fn test_create_failure_keeps_first_step() {
        let api = FakeStorefront::new();
        api.fail_next(
            "create_product",
            ApiError::Network {
                status: Some(500),
                message: None,
            },
        );
        let mut wizard = ProductWizard::new();

        assert_eq!(create(&api, &mut wizard), Ok(Applied::Failed));
        assert_eq!(wizard.step(), WizardStep::SelectingCategory);
        assert_eq!(wizard.error(), Some("Failed to create product"));

        // the user may simply retry
        assert_eq!(create(&api, &mut wizard), Ok(Applied::Advanced));
        assert_eq!(wizard.error(), None);
    }

    #[test]
    fn test_details_validation_is_local() {
        let api = FakeStorefront::new();
        let mut wizard = ProductWizard::new();
        create(&api, &mut wizard).unwrap();

        fill_details(&mut wizard);
        wizard.draft_mut().series = "   ".into();
        assert_eq!(submit_details(&api, &mut wizard), Err(WizardError::MissingField("Series")));

        fill_details(&mut wizard);
        wizard.draft_mut().capacity = "0".into();
        assert!(matches!(
            submit_details(&api, &mut wizard),
            Err(WizardError::InvalidCapacity(_))
        ));

        fill_details(&mut wizard);
        wizard.draft_mut().capacity = "2.5".into();
        assert!(matches!(
            submit_details(&api, &mut wizard),
            Err(WizardError::InvalidCapacity(_))
        ));

        assert_eq!(api.calls_to("add_product_details"), 0);
        assert!(matches!(wizard.step(), WizardStep::EnteringDetails { .. }));
    }

    #[test]
    fn test_details_rejection_shows_first_server_error() {
        let api = FakeStorefront::new();
        let mut wizard = ProductWizard::new();
        create(&api, &mut wizard).unwrap();
        fill_details(&mut wizard);

        api.fail_next(
            "add_product_details",
            ApiError::Validation("code already exists".into()),
        );
        assert_eq!(submit_details(&api, &mut wizard), Ok(Applied::Failed));
        assert_eq!(wizard.error(), Some("code already exists"));
        assert!(matches!(wizard.step(), WizardStep::EnteringDetails { .. }));

        api.fail_next("add_product_details", ApiError::transport());
        assert_eq!(submit_details(&api, &mut wizard), Ok(Applied::Failed));
        assert_eq!(wizard.error(), Some("Failed to add details"));
    }

    #[test]
    fn test_attaching_details_twice_is_idempotent() {
        let api = FakeStorefront::new();
        let mut wizard = ProductWizard::new();
        create(&api, &mut wizard).unwrap();
        fill_details(&mut wizard);

        let first_request = wizard.draft().to_details_request().unwrap();
        submit_details(&api, &mut wizard).unwrap();
        let first_step = wizard.step();
        let first_saved = wizard.saved_product().cloned();

        wizard.revise_details().unwrap();
        assert_eq!(wizard.draft().to_details_request().unwrap(), first_request);
        submit_details(&api, &mut wizard).unwrap();

        assert_eq!(wizard.step(), first_step);
        assert_eq!(wizard.saved_product().cloned(), first_saved);
        assert_eq!(api.calls_to("add_product_details"), 2);
    }

    #[test]
    fn test_only_one_request_in_flight() {
        let mut wizard = ProductWizard::new();
        let pending = wizard.begin_create().unwrap();
        assert!(wizard.is_busy());
        assert_eq!(wizard.begin_create(), Err(WizardError::Busy));

        wizard.complete_create(pending.ticket, Ok(ProductId(1)));
        assert!(!wizard.is_busy());
        assert!(matches!(wizard.begin_activate(), Err(WizardError::WrongStep)));
    }

    #[test]
    fn test_cancel_discards_draft_and_ignores_late_responses() {
        let mut wizard = ProductWizard::new();
        let started = wizard.begin_create().unwrap();
        wizard.complete_create(started.ticket, Ok(ProductId(9)));
        fill_details(&mut wizard);

        // details request goes out, then the user cancels before it returns
        let details = wizard.begin_details().unwrap();
        assert!(wizard.cancel());
        assert_eq!(wizard.step(), WizardStep::SelectingCategory);
        assert_eq!(wizard.draft(), &WizardDraft::default());
        assert!(!wizard.is_busy());

        // a new run starts; the abandoned response must not touch it
        let fresh = wizard.begin_create().unwrap();
        assert_eq!(
            wizard.complete_details(details.ticket, Ok(None)),
            Applied::Stale
        );
        assert_eq!(wizard.step(), WizardStep::SelectingCategory);
        assert!(wizard.is_busy());

        wizard.complete_create(fresh.ticket, Ok(ProductId(10)));
        assert_eq!(
            wizard.step(),
            WizardStep::EnteringDetails {
                product_id: ProductId(10)
            }
        );
        assert_eq!(wizard.draft().title, "");
    }

    #[test]
    fn test_late_create_response_after_reset_is_stale() {
        let mut wizard = ProductWizard::new();
        let pending = wizard.begin_create().unwrap();
        wizard.reset();

        assert_eq!(
            wizard.complete_create(pending.ticket, Ok(ProductId(4))),
            Applied::Stale
        );
        assert_eq!(wizard.step(), WizardStep::SelectingCategory);
        assert_eq!(wizard.draft(), &WizardDraft::default());
    }

    #[test]
    fn test_cancel_not_offered_on_first_step() {
        let mut wizard = ProductWizard::new();
        wizard.draft_mut().category = "2".into();
        assert!(!wizard.can_cancel());
        assert!(!wizard.cancel());
        assert_eq!(wizard.draft().category, "2");
    }

    #[test]
    fn test_activation_failure_stays_ready() {
        let api = FakeStorefront::new();
        let mut wizard = ProductWizard::new();
        create(&api, &mut wizard).unwrap();
        fill_details(&mut wizard);
        submit_details(&api, &mut wizard).unwrap();

        api.fail_next(
            "activate_product",
            ApiError::Network {
                status: Some(409),
                message: Some("Product already active".into()),
            },
        );
        assert_eq!(activate(&api, &mut wizard), Ok(Applied::Failed));
        assert_eq!(wizard.error(), Some("Product already active"));
        assert!(matches!(wizard.step(), WizardStep::ReadyToActivate { .. }));
    }
}
