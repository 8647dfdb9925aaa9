use super::state::{WizardDraft, WizardStep};
use super::view_model::ProductWizardViewModel;
use crate::shared::api_client::use_storefront;
use crate::shared::components::ui::{Button, Input, Select, Textarea};
use contracts::domain::a001_product::ProductId;
use contracts::enums::capacity::{CapacityType, CapacityUnit};
use contracts::enums::category::Category;
use leptos::prelude::*;

/// Which of the three steps is on screen; lets the view re-render
/// only when the step itself changes, not on every keystroke
#[derive(Clone, Copy, PartialEq, Eq)]
enum Screen {
    Category,
    Details,
    Activate,
}

impl From<WizardStep> for Screen {
    fn from(step: WizardStep) -> Self {
        match step {
            WizardStep::SelectingCategory => Screen::Category,
            WizardStep::EnteringDetails { .. } => Screen::Details,
            WizardStep::ReadyToActivate { .. } => Screen::Activate,
        }
    }
}

#[component]
pub fn CreateProductWizard(on_created: Callback<ProductId>) -> impl IntoView {
    let vm = ProductWizardViewModel::new(use_storefront(), on_created);
    let wizard = vm.wizard;
    let screen = Memo::new(move |_| wizard.with(|w| Screen::from(w.step())));

    let step_class = move |target: Screen| {
        move || {
            if screen.get() == target {
                "wizard-step active"
            } else {
                "wizard-step"
            }
        }
    };

    view! {
        <div class="product-wizard">
            <h2>"Create Product"</h2>
            <div class="wizard-steps">
                <span class=step_class(Screen::Category)>"1. Category"</span>
                <span class=step_class(Screen::Details)>"2. Details"</span>
                <span class=step_class(Screen::Activate)>"3. Activate"</span>
            </div>

            {move || wizard.with(|w| w.error().map(str::to_string)).map(|e| view! {
                <div class="warning-box text-error">{e}</div>
            })}

            {move || {
                let vm = vm.clone();
                match screen.get() {
                    Screen::Category => view! { <CategoryStep vm=vm /> }.into_any(),
                    Screen::Details => view! { <DetailsStep vm=vm /> }.into_any(),
                    Screen::Activate => view! { <ActivateStep vm=vm /> }.into_any(),
                }
            }}
        </div>
    }
}

#[component]
fn CategoryStep(vm: ProductWizardViewModel) -> impl IntoView {
    let wizard = vm.wizard;
    let options = Category::all()
        .into_iter()
        .map(|c| (c.id().to_string(), c.display_name().to_string()))
        .collect::<Vec<_>>();
    let vm_select = vm.clone();
    let vm_create = vm.clone();

    view! {
        <div class="wizard-form">
            <Select
                label="Category"
                id="wizard-category"
                value=Signal::derive(move || wizard.with(|w| w.draft().category.clone()))
                options=options
                on_change=Callback::new(move |v: String| vm_select.update_draft(|d| d.category = v))
                disabled=vm.is_busy()
            />
            <Button
                disabled=vm.is_busy()
                on_click=Callback::new(move |_| vm_create.create_command())
            >
                {move || if wizard.with(|w| w.is_busy()) { "Creating..." } else { "Create Product" }}
            </Button>
        </div>
    }
}

fn draft_input(
    vm: &ProductWizardViewModel,
    label: &'static str,
    input_type: &'static str,
    read: fn(&WizardDraft) -> &String,
    write: fn(&mut WizardDraft, String),
) -> impl IntoView {
    let wizard = vm.wizard;
    let editor = vm.clone();
    view! {
        <Input
            label=label
            input_type=input_type
            value=Signal::derive(move || wizard.with(|w| read(w.draft()).clone()))
            on_input=Callback::new(move |v: String| editor.update_draft(|d| write(d, v)))
            disabled=vm.is_busy()
            required=true
        />
    }
}

#[component]
fn DetailsStep(vm: ProductWizardViewModel) -> impl IntoView {
    let wizard = vm.wizard;
    let product_label = move || {
        wizard
            .with(|w| w.step().product_id())
            .map(|id| format!("Product #{}", id))
            .unwrap_or_default()
    };

    let unit_options = CapacityUnit::all()
        .into_iter()
        .map(|u| (u.code().to_string(), u.code().to_string()))
        .collect::<Vec<_>>();
    let type_options = CapacityType::all()
        .into_iter()
        .map(|t| (t.code().to_string(), t.code().to_string()))
        .collect::<Vec<_>>();

    let vm_description = vm.clone();
    let vm_unit = vm.clone();
    let vm_type = vm.clone();
    let vm_submit = vm.clone();
    let vm_cancel = vm.clone();

    view! {
        <div class="wizard-form">
            <p class="wizard-product">{product_label}</p>
            {draft_input(&vm, "Title", "text", |d| &d.title, |d, v| d.title = v)}
            {draft_input(&vm, "Code", "text", |d| &d.code, |d, v| d.code = v)}
            <Textarea
                label="Description"
                value=Signal::derive(move || wizard.with(|w| w.draft().description.clone()))
                on_input=Callback::new(move |v: String| vm_description.update_draft(|d| d.description = v))
                disabled=vm.is_busy()
                required=true
            />
            {draft_input(&vm, "Brand", "text", |d| &d.brand, |d, v| d.brand = v)}
            {draft_input(&vm, "Series", "text", |d| &d.series, |d, v| d.series = v)}
            <div class="form__row">
                {draft_input(&vm, "Capacity", "number", |d| &d.capacity, |d, v| d.capacity = v)}
                <Select
                    label="Unit"
                    value=Signal::derive(move || wizard.with(|w| w.draft().capacity_unit.code().to_string()))
                    options=unit_options
                    on_change=Callback::new(move |v: String| {
                        if let Some(unit) = CapacityUnit::from_code(&v) {
                            vm_unit.update_draft(|d| d.capacity_unit = unit);
                        }
                    })
                    disabled=vm.is_busy()
                />
                <Select
                    label="Type"
                    value=Signal::derive(move || wizard.with(|w| w.draft().capacity_type.code().to_string()))
                    options=type_options
                    on_change=Callback::new(move |v: String| {
                        if let Some(kind) = CapacityType::from_code(&v) {
                            vm_type.update_draft(|d| d.capacity_type = kind);
                        }
                    })
                    disabled=vm.is_busy()
                />
            </div>
            <div class="wizard-actions">
                <Button
                    disabled=vm.is_busy()
                    on_click=Callback::new(move |_| vm_submit.submit_details_command())
                >
                    {move || if wizard.with(|w| w.is_busy()) { "Saving..." } else { "Save Details" }}
                </Button>
                <Button
                    variant="ghost"
                    on_click=Callback::new(move |_| vm_cancel.cancel_command())
                >
                    "Cancel"
                </Button>
            </div>
        </div>
    }
}

#[component]
fn ActivateStep(vm: ProductWizardViewModel) -> impl IntoView {
    let wizard = vm.wizard;
    let summary = move || {
        wizard.with(|w| {
            let draft = w.draft();
            let title = w
                .saved_product()
                .map(|p| p.display_title())
                .unwrap_or_else(|| draft.title.clone());
            format!(
                "{} ({}), {} {} {}{} {}",
                title,
                draft.code,
                draft.brand,
                draft.series,
                draft.capacity,
                draft.capacity_unit.code(),
                draft.capacity_type.code()
            )
        })
    };

    let vm_activate = vm.clone();
    let vm_revise = vm.clone();
    let vm_cancel = vm.clone();

    view! {
        <div class="wizard-form">
            <p>"Review the product and activate it to make it available."</p>
            <p class="wizard-summary">{summary}</p>
            <div class="wizard-actions">
                <Button
                    disabled=vm.is_busy()
                    on_click=Callback::new(move |_| vm_activate.activate_command())
                >
                    {move || if wizard.with(|w| w.is_busy()) { "Activating..." } else { "Confirm & Activate" }}
                </Button>
                <Button
                    variant="secondary"
                    disabled=vm.is_busy()
                    on_click=Callback::new(move |_| vm_revise.revise_command())
                >
                    "Revise details"
                </Button>
                <Button
                    variant="ghost"
                    on_click=Callback::new(move |_| vm_cancel.cancel_command())
                >
                    "Cancel"
                </Button>
            </div>
        </div>
    }
}
