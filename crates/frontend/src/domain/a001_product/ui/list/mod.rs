mod state;

pub use state::{fetch_window, CatalogState, CatalogView, CatalogWindow};

use crate::domain::a002_inventory::ui::badge::InventoryBadge;
use crate::shared::api_client::use_storefront;
use crate::shared::components::ui::Button;
use crate::shared::config::use_config;
use contracts::domain::a001_product::{Product, ProductId};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Debug, PartialEq)]
pub struct ProductRow {
    pub id: ProductId,
    pub title: String,
    pub code: String,
    pub description: String,
    pub is_active: bool,
    pub category: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            title: p.display_title(),
            code: non_empty(p.code.as_deref()).unwrap_or_else(|| "No code".to_string()),
            description: non_empty(p.description.as_deref())
                .unwrap_or_else(|| "No description".to_string()),
            is_active: p.is_active,
            category: p.category_name().unwrap_or_default().to_string(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Product catalog: re-fetches the id window whenever `refresh` changes
#[component]
#[allow(non_snake_case)]
pub fn ProductList(
    #[prop(into)] refresh: Signal<u32>,
    /// Overrides the configured window size
    #[prop(optional)]
    window_size: Option<u32>,
) -> impl IntoView {
    let api = use_storefront();
    let window = CatalogWindow::new(window_size.unwrap_or_else(|| use_config().catalog_window));
    let state = RwSignal::new(CatalogState::default());

    let fetch = {
        let api = api.clone();
        move || {
            let Some(request) = state.try_update(|s| s.begin_refresh()) else {
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                let products = fetch_window(api.as_ref(), window).await;
                log::debug!("Catalog refresh #{}: {} products", request, products.len());
                // the list may be gone by now
                let _ = state.try_update(|s| {
                    if !s.finish_refresh(request, products) {
                        log::debug!("Catalog refresh #{} superseded", request);
                    }
                });
            });
        }
    };

    {
        let fetch = fetch.clone();
        Effect::new(move |_| {
            let trigger = refresh.get();
            log::info!("Loading products (refresh {})", trigger);
            fetch();
        });
    }

    let delete_product = move |id: ProductId| {
        // Simple confirm dialog via browser
        let confirmed = web_sys::window()
            .and_then(|win| {
                win.confirm_with_message(&format!("Delete product #{}?", id))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let api = api.clone();
        let fetch = fetch.clone();
        spawn_local(async move {
            match api.delete_product(id).await {
                Ok(()) => {
                    log::info!("Product {} deleted", id);
                    fetch();
                }
                Err(e) => {
                    log::warn!("Failed to delete product {}: {}", id, e);
                    let _ = state.try_update(|s| {
                        s.set_error(format!("Failed to delete product #{}: {}", id, e))
                    });
                }
            }
        });
    };

    // rebuild the grid only when the display mode flips, not on every refresh
    let mode = Memo::new(move |_| state.with(CatalogState::view));

    view! {
        <div class="product-list">
            {move || state.with(|s| s.error().map(|e| e.to_string())).map(|e| view! {
                <div class="error">{e}</div>
            })}

            {move || match mode.get() {
                CatalogView::Loading => view! {
                    <div class="loading">"Loading products..."</div>
                }.into_any(),
                CatalogView::Empty => view! {
                    <div class="empty-state">
                        <p>"No products found. Create your first product!"</p>
                    </div>
                }.into_any(),
                CatalogView::Items => {
                    let delete_product = delete_product.clone();
                    view! {
                        <h2>"Products"</h2>
                        <div class="products-grid">
                            <For
                                each=move || state.with(|s| s.products().iter().map(ProductRow::from).collect::<Vec<_>>())
                                key=|row| (row.id, row.title.clone(), row.is_active)
                                children=move |row: ProductRow| {
                                    let id = row.id;
                                    let delete_product = delete_product.clone();
                                    view! {
                                        <div class="product-card">
                                            <div class="product-header">
                                                <h3>{row.title}</h3>
                                                <InventoryBadge product_id=id />
                                            </div>
                                            <p class="product-code">{row.code}</p>
                                            <p class="product-description">{row.description}</p>
                                            <div class="product-meta">
                                                <span class={if row.is_active { "status active" } else { "status inactive" }}>
                                                    {if row.is_active { "✓ Active" } else { "○ Inactive" }}
                                                </span>
                                                <span class="category">{row.category}</span>
                                            </div>
                                            <Button
                                                variant="secondary"
                                                size="sm"
                                                on_click=Callback::new(move |_| delete_product(id))
                                            >
                                                "Delete"
                                            </Button>
                                        </div>
                                    }
                                }
                            />
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}
