use leptos::prelude::*;

use super::context::use_session;

/// Component that requires authentication
/// Renders `fallback` until a usable credential is held
#[component]
pub fn RequireAuth(
    #[prop(into)] fallback: ViewFn,
    children: ChildrenFn,
) -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=fallback
        >
            {children()}
        </Show>
    }
}
