use leptos::prelude::*;

/// CSS classes for a variant ("primary", "secondary", "ghost") and size ("sm", "md")
fn button_class(variant: Option<&str>, size: Option<&str>) -> String {
    let variant = match variant {
        Some("secondary") => "button--secondary",
        Some("ghost") => "button--ghost",
        _ => "button--primary",
    };
    match size {
        Some("sm") => format!("button {} button--sm", variant),
        _ => format!("button {}", variant),
    }
}

/// Button with variants and sizes; `disabled` follows the busy state of the caller
#[component]
pub fn Button(
    /// "primary" (default), "secondary" or "ghost"
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// "md" (default) or "sm"
    #[prop(optional, into)]
    size: MaybeProp<String>,
    /// `type` attribute, "button" unless set
    #[prop(optional, into)]
    button_type: MaybeProp<String>,
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
    #[prop(optional)]
    on_click: Option<Callback<leptos::ev::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let class = move || button_class(variant.get().as_deref(), size.get().as_deref());
    let btn_type = move || button_type.get().unwrap_or_else(|| "button".to_string());

    view! {
        <button
            type=btn_type
            class=class
            disabled=move || disabled.get().unwrap_or(false)
            on:click=move |ev| {
                if let Some(handler) = on_click {
                    handler.run(ev);
                }
            }
        >
            {children()}
        </button>
    }
}
