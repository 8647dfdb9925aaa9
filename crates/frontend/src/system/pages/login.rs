use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_client::use_storefront;
use crate::shared::components::ui::{Button, Input};
use crate::shared::config::use_config;
use crate::system::auth::context::use_session;

const LOGIN_FAILED_NOTICE: &str = "Login failed. Make sure the backend is running.";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Action {
    Login,
    Register,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = use_config();
    let session = use_session();
    let api = use_storefront();

    let (email, set_email) = signal(config.demo_email.clone());
    let (password, set_password) = signal(config.demo_password.clone());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (pending, set_pending) = signal(Option::<Action>::None);
    let is_loading = Signal::derive(move || pending.get().is_some());

    let run = move |action: Action| {
        if pending.get_untracked().is_some() {
            return;
        }
        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        set_pending.set(Some(action));
        set_error_message.set(None);

        let session = session.clone();
        let api = api.clone();
        spawn_local(async move {
            let result = match action {
                Action::Login => session.login(api.as_ref(), email_val, password_val).await,
                Action::Register => session.register(api.as_ref(), email_val, password_val).await,
            };
            // on success the auth gate swaps this page out
            if let Err(e) = result {
                log::warn!("Sign-in failed: {}", e);
                let _ = set_error_message.try_set(Some(e.to_string()));
                if action == Action::Login {
                    if let Some(win) = web_sys::window() {
                        let _ = win.alert_with_message(LOGIN_FAILED_NOTICE);
                    }
                }
            }
            let _ = set_pending.try_set(None);
        });
    };

    let on_submit = {
        let run = run.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            run(Action::Login);
        }
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"E-Commerce Event-Driven Demo"</h1>
                <p>"Login with admin account to continue"</p>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <Input
                        label="Email"
                        id="email"
                        input_type="email"
                        autocomplete="username"
                        value=email
                        on_input=Callback::new(move |v: String| set_email.set(v))
                        required=true
                        disabled=is_loading
                    />
                    <Input
                        label="Password"
                        id="password"
                        input_type="password"
                        autocomplete="current-password"
                        value=password
                        on_input=Callback::new(move |v: String| set_password.set(v))
                        required=true
                        disabled=is_loading
                    />

                    <div class="login-actions">
                        <Button button_type="submit" disabled=is_loading>
                            {move || if pending.get() == Some(Action::Login) { "Logging in..." } else { "Login" }}
                        </Button>
                        <Button
                            variant="secondary"
                            disabled=is_loading
                            on_click=Callback::new(move |_| run(Action::Register))
                        >
                            {move || if pending.get() == Some(Action::Register) { "Registering..." } else { "Register" }}
                        </Button>
                    </div>
                </form>

                <p class="help-text">
                    "Email: " <strong>{config.demo_email.clone()}</strong>
                    <br />
                    "Password: " <strong>{config.demo_password.clone()}</strong>
                </p>
            </div>
        </div>
    }
}
