use leptos::prelude::*;

/// Badge component; renders as `badge badge--{variant}`
#[component]
pub fn Badge(
    /// Badge variant, e.g. "in-stock", "low-stock", "out-of-stock", "error", "loading"
    #[prop(into)]
    variant: Signal<String>,
    /// Badge content
    children: Children,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <span class=move || format!("badge badge--{} {}", variant.get(), additional_class())>
            {children()}
        </span>
    }
}
