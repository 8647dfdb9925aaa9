//! Application Shell - корневые компоненты приложения
//!
//! Содержит:
//! - `AppShell` - auth gate (показывает LoginPage или MainLayout)
//! - `MainLayout` - мастер создания товара и каталог

use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a001_product::ui::wizard::CreateProductWizard;
use crate::shared::components::ui::Button;
use crate::system::auth::context::use_session;
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::login::LoginPage;
use contracts::domain::a001_product::ProductId;
use leptos::prelude::*;

/// Main application layout: header, wizard, catalog, footer.
///
/// Каждая успешная активация увеличивает счётчик, каталог перечитывается.
#[component]
fn MainLayout() -> impl IntoView {
    let session = use_session();
    let (refresh, set_refresh) = signal(0u32);

    let on_created = Callback::new(move |id: ProductId| {
        log::info!("Product {} created, refreshing catalog", id);
        set_refresh.update(|n| *n = n.wrapping_add(1));
    });

    view! {
        <div class="app">
            <header class="app-header">
                <div class="app-header__row">
                    <div>
                        <h1>"🛍️ E-Commerce Event-Driven Architecture Demo"</h1>
                        <p>"Product service with asynchronous inventory events"</p>
                    </div>
                    <Button
                        variant="secondary"
                        on_click=Callback::new(move |_| session.logout())
                    >
                        "Logout"
                    </Button>
                </div>
            </header>

            <main class="app-main">
                <section class="section">
                    <CreateProductWizard on_created=on_created />
                </section>

                <section class="section">
                    <ProductList refresh=refresh />
                </section>
            </main>

            <footer class="app-footer">
                <p>
                    "💡 " <strong>"Event-Driven Flow:"</strong>
                    " When you create a product, the backend emits a "
                    <code>"product.created"</code>
                    " event. The inventory listener reacts asynchronously and creates initial inventory. "
                    "The stock badge polls every few seconds to show the update."
                </p>
            </footer>
        </div>
    }
}

/// Application shell - auth gate component.
///
/// Показывает:
/// - `LoginPage` если пользователь не авторизован
/// - `MainLayout` если авторизован
#[component]
pub fn AppShell() -> impl IntoView {
    view! {
        <RequireAuth fallback=|| view! { <LoginPage /> }>
            <MainLayout />
        </RequireAuth>
    }
}
