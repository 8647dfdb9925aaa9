use contracts::domain::a001_product::ProductId;
use contracts::domain::a002_inventory::{InventoryRecord, StockLevel};
use contracts::shared::api_error::ApiError;
use leptos::prelude::*;

use crate::shared::api_client::{use_storefront, StorefrontApi};
use crate::shared::components::ui::Badge;
use crate::shared::config::use_config;
use crate::shared::polling::{spawn_poll, PollHandle};

/// What the badge currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeState {
    Loading,
    Resolved {
        level: StockLevel,
        quantity: Option<u32>,
    },
}

impl BadgeState {
    pub fn from_result(result: &Result<InventoryRecord, ApiError>) -> Self {
        let record = result.as_ref().ok();
        BadgeState::Resolved {
            level: StockLevel::classify(record),
            quantity: record.map(|r| r.quantity),
        }
    }

    pub fn label(&self) -> String {
        match self {
            BadgeState::Loading => "Loading...".to_string(),
            BadgeState::Resolved {
                quantity: Some(quantity),
                ..
            } => format!("Stock: {}", quantity),
            BadgeState::Resolved { quantity: None, .. } => "No inventory".to_string(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeState::Loading => "loading",
            BadgeState::Resolved { level, .. } => level.css_class(),
        }
    }
}

/// One poll of the inventory endpoint
pub async fn fetch_badge_state<A>(api: &A, id: ProductId) -> BadgeState
where
    A: StorefrontApi + ?Sized,
{
    let result = api.get_inventory(id).await;
    match &result {
        Err(ApiError::NotFound) => log::debug!("Inventory for product {} not created yet", id),
        Err(e) => log::error!("Error loading inventory for {}: {}", id, e),
        Ok(_) => {}
    }
    BadgeState::from_result(&result)
}

/// Stock badge that polls the inventory of one product until removed
#[component]
pub fn InventoryBadge(#[prop(into)] product_id: Signal<ProductId>) -> impl IntoView {
    let api = use_storefront();
    let period = use_config().inventory_poll;
    let state = RwSignal::new(BadgeState::Loading);
    let current = StoredValue::new(None::<PollHandle>);

    Effect::new(move |_| {
        let id = product_id.get();
        state.set(BadgeState::Loading);

        let api = api.clone();
        let handle = spawn_poll(period, move |handle: PollHandle| {
            let api = api.clone();
            async move {
                let next = fetch_badge_state(api.as_ref(), id).await;
                if handle.is_cancelled() {
                    return false;
                }
                // a disposed signal means the badge is gone
                state.try_set(next).is_none()
            }
        });

        current.update_value(|slot| {
            if let Some(previous) = slot.replace(handle) {
                previous.cancel();
            }
        });
    });

    on_cleanup(move || {
        current.try_update_value(|slot| {
            if let Some(handle) = slot.take() {
                handle.cancel();
            }
        });
    });

    view! {
        <Badge
            variant=Signal::derive(move || state.get().css_class().to_string())
            class="inventory-badge"
        >
            {move || state.get().label()}
        </Badge>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::fake_storefront::FakeStorefront;
    use crate::shared::polling::poll_until_cancelled;
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn resolved(quantity: u32) -> BadgeState {
        BadgeState::from_result(&Ok(InventoryRecord {
            product_id: ProductId(1),
            quantity,
        }))
    }

    #[test]
    fn test_labels_and_classes() {
        assert_eq!(BadgeState::Loading.label(), "Loading...");
        assert_eq!(resolved(0).css_class(), "out-of-stock");
        assert_eq!(resolved(9).css_class(), "low-stock");
        assert_eq!(resolved(10).css_class(), "in-stock");
        assert_eq!(resolved(10).label(), "Stock: 10");
    }

    #[test]
    fn test_missing_or_failed_record_is_unknown() {
        for error in [ApiError::NotFound, ApiError::transport()] {
            let state = BadgeState::from_result(&Err(error));
            assert_eq!(
                state,
                BadgeState::Resolved {
                    level: StockLevel::Unknown,
                    quantity: None
                }
            );
            assert_eq!(state.label(), "No inventory");
            assert_eq!(state.css_class(), "error");
        }
    }

    #[test]
    fn test_ticks_follow_inventory_as_it_appears() {
        let api = FakeStorefront::new();
        let id = ProductId(1);

        let first = block_on(fetch_badge_state(&api, id));
        assert_eq!(first.label(), "No inventory");
        assert_eq!(first.css_class(), "error");

        api.set_inventory(1, 3);
        let second = block_on(fetch_badge_state(&api, id));
        assert_eq!(
            second,
            BadgeState::Resolved {
                level: StockLevel::Low,
                quantity: Some(3)
            }
        );
        assert_eq!(second.label(), "Stock: 3");

        api.fail_next("get_inventory", ApiError::transport());
        assert_eq!(block_on(fetch_badge_state(&api, id)).label(), "No inventory");
        assert_eq!(api.calls_to("get_inventory"), 3);
    }

    #[test]
    fn test_poll_loop_tracks_stock_between_ticks() {
        let fake = FakeStorefront::new();
        let log = RefCell::new(Vec::new());
        let handle = PollHandle::new();
        let (api, seen) = (&fake, &log);

        block_on(poll_until_cancelled(
            handle.clone(),
            move |_| async move {
                let state = fetch_badge_state(api, ProductId(7)).await;
                seen.borrow_mut().push(state.css_class());
                seen.borrow().len() < 3
            },
            move || {
                // stock arrives and is replenished while the badge waits
                match seen.borrow().len() {
                    1 => api.set_inventory(7, 0),
                    _ => api.set_inventory(7, 12),
                }
                async {}
            },
        ));

        assert_eq!(*log.borrow(), vec!["error", "out-of-stock", "in-stock"]);
        assert!(handle.is_cancelled());
    }
}
