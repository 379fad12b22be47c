//! Account creation and password recovery.
//!
//! Both flows are two steps around an emailed one-time code: registration
//! then verification, or a reset request then the new password. The second
//! step signs the visitor in, after which the page moves on to `/`.

#[cfg(test)]
#[path = "account_test.rs"]
mod account_test;

use std::future::Future;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::spinner::LoadingOverlay;
use crate::net::types::{AccountNotice, Registration};
use crate::pages::login::is_valid_email;
use crate::state::AppAuth;
use crate::state::auth::AuthError;

pub const OTP_LENGTH: usize = 6;
pub const MIN_PASSWORD_LENGTH: usize = 6;
const MIN_USERNAME_LENGTH: usize = 3;
const MIN_PHONE_LENGTH: usize = 10;

/// Check the registration form; returns it with text fields trimmed.
pub fn validate_registration(form: &Registration) -> Result<Registration, &'static str> {
    let username = form.username.trim();
    let email = form.email.trim();
    let phone_number = form.phone_number.trim();
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err("Username must be at least 3 characters.");
    }
    if !is_valid_email(email) {
        return Err("Please enter a valid email address.");
    }
    if phone_number.chars().filter(char::is_ascii_digit).count() < MIN_PHONE_LENGTH {
        return Err("Please enter a valid phone number.");
    }
    validate_new_password(&form.password)?;
    if form.password != form.confirm_password {
        return Err("Passwords do not match.");
    }
    Ok(Registration {
        username: username.to_owned(),
        email: email.to_owned(),
        phone_number: phone_number.to_owned(),
        ..form.clone()
    })
}

pub fn validate_new_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 6 characters.");
    }
    Ok(())
}

/// A one-time code is exactly six digits; surrounding spaces are ignored.
pub fn validate_otp(code: &str) -> Result<String, &'static str> {
    let code = code.trim();
    if code.len() != OTP_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err("Please enter the 6-digit code from your email.");
    }
    Ok(code.to_owned())
}

/// Message to show for an acknowledged request.
pub fn notice_text(notice: AccountNotice, fallback: &str) -> String {
    notice.message.unwrap_or_else(|| fallback.to_owned())
}

/// Run one account call with the shared busy flag and error banner.
fn submit<T, Fut>(busy: RwSignal<bool>, error: RwSignal<Option<String>>, call: Fut, on_ok: impl FnOnce(T) + 'static)
where
    T: 'static,
    Fut: Future<Output = Result<T, AuthError>> + 'static,
{
    if busy.get_untracked() {
        return;
    }
    error.set(None);
    busy.set(true);
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match call.await {
            Ok(value) => on_ok(value),
            Err(e) => {
                error.try_set(Some(e.to_string()));
            }
        }
        busy.try_set(false);
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (call, on_ok);
}

/// Flag that, once set, replaces the page with `/`.
fn leave_when_done(navigate: impl Fn(&str, NavigateOptions) + 'static) -> RwSignal<bool> {
    let done = RwSignal::new(false);
    Effect::new(move || {
        if done.get() {
            navigate("/", NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
    done
}

#[component]
fn FormMessages(error: RwSignal<Option<String>>, notice: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        {move || error.get().map(|e| view! { <p class="login-message login-message--error" role="alert">{e}</p> })}
        {move || notice.get().map(|n| view! { <p class="login-message">{n}</p> })}
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<AppAuth>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    // Email awaiting verification, once the account exists.
    let pending = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let done = leave_when_done(navigate);

    let register_auth = auth.clone();
    let on_register = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = Registration {
            username: username.get_untracked(),
            email: email.get_untracked(),
            phone_number: phone.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm.get_untracked(),
        };
        let form = match validate_registration(&form) {
            Ok(form) => form,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        let auth = register_auth.clone();
        let address = form.email.clone();
        submit(busy, error, async move { auth.register(&form).await }, move |ack| {
            notice.set(Some(notice_text(ack, "We sent a verification code to your email.")));
            pending.set(Some(address));
        });
    };

    let verify_auth = auth.clone();
    let on_verify = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(address) = pending.get_untracked() else { return };
        let otp = match validate_otp(&code.get_untracked()) {
            Ok(otp) => otp,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        let auth = verify_auth.clone();
        submit(busy, error, async move { auth.verify_otp(&address, &otp).await }, move |_session| done.set(true));
    };

    let on_resend = move |_: leptos::ev::MouseEvent| {
        let Some(address) = pending.get_untracked() else { return };
        let auth = auth.clone();
        submit(busy, error, async move { auth.resend_otp(&address).await }, move |ack| {
            notice.set(Some(notice_text(ack, "A new code is on its way.")));
        });
    };

    view! {
        <LoadingOverlay visible=busy message="Please wait…"/>
        <div class="login-page">
            <div class="login-card">
                <Show
                    when=move || pending.get().is_some()
                    fallback=move || {
                        view! {
                            <h1>"Create your account"</h1>
                            <form class="login-form" on:submit=on_register.clone() novalidate>
                                <input class="login-input" type="text" autocomplete="username" placeholder="Username"
                                    prop:value=move || username.get()
                                    on:input=move |ev| username.set(event_target_value(&ev))/>
                                <input class="login-input" type="email" autocomplete="email" placeholder="you@example.com"
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))/>
                                <input class="login-input" type="tel" autocomplete="tel" placeholder="Phone number"
                                    prop:value=move || phone.get()
                                    on:input=move |ev| phone.set(event_target_value(&ev))/>
                                <input class="login-input" type="password" autocomplete="new-password" placeholder="Password"
                                    prop:value=move || password.get()
                                    on:input=move |ev| password.set(event_target_value(&ev))/>
                                <input class="login-input" type="password" autocomplete="new-password" placeholder="Confirm password"
                                    prop:value=move || confirm.get()
                                    on:input=move |ev| confirm.set(event_target_value(&ev))/>
                                <button class="login-button" type="submit" disabled=move || busy.get()>
                                    "Create account"
                                </button>
                            </form>
                            <p class="login-links">
                                <a href="/login">"Already have an account? Sign in"</a>
                            </p>
                        }
                    }
                >
                    <h1>"Verify your email"</h1>
                    <p class="login-card__subtitle">
                        "Enter the code sent to " {move || pending.get().unwrap_or_default()}
                    </p>
                    <form class="login-form" on:submit=on_verify.clone() novalidate>
                        <input class="login-input" type="text" inputmode="numeric" autocomplete="one-time-code"
                            maxlength=OTP_LENGTH.to_string() placeholder="123456"
                            prop:value=move || code.get()
                            on:input=move |ev| code.set(event_target_value(&ev))/>
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            "Verify"
                        </button>
                    </form>
                    <button class="login-link-button" type="button" on:click=on_resend.clone() disabled=move || busy.get()>
                        "Resend code"
                    </button>
                </Show>
                <FormMessages error=error notice=notice/>
            </div>
        </div>
    }
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let auth = expect_context::<AppAuth>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let code_sent = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let done = leave_when_done(navigate);

    let request_auth = auth.clone();
    let on_request = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let address = email.get_untracked().trim().to_owned();
        if !is_valid_email(&address) {
            error.set(Some("Please enter a valid email address.".to_owned()));
            return;
        }
        let auth = request_auth.clone();
        submit(busy, error, async move { auth.request_password_reset(&address).await }, move |ack| {
            notice.set(Some(notice_text(ack, "We sent a reset code to your email.")));
            code_sent.set(true);
        });
    };

    let on_reset = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let checked = validate_otp(&code.get_untracked())
            .and_then(|otp| validate_new_password(&new_password.get_untracked()).map(|()| otp));
        let otp = match checked {
            Ok(otp) => otp,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        let auth = auth.clone();
        let address = email.get_untracked();
        let password = new_password.get_untracked();
        submit(busy, error, async move { auth.reset_password(&address, &otp, &password).await }, move |_session| done.set(true));
    };

    view! {
        <LoadingOverlay visible=busy message="Please wait…"/>
        <div class="login-page">
            <div class="login-card">
                <h1>"Reset your password"</h1>
                <Show
                    when=move || code_sent.get()
                    fallback=move || {
                        view! {
                            <form class="login-form" on:submit=on_request.clone() novalidate>
                                <input class="login-input" type="email" autocomplete="email" placeholder="you@example.com"
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))/>
                                <button class="login-button" type="submit" disabled=move || busy.get()>
                                    "Send reset code"
                                </button>
                            </form>
                        }
                    }
                >
                    <form class="login-form" on:submit=on_reset.clone() novalidate>
                        <input class="login-input" type="text" inputmode="numeric" autocomplete="one-time-code"
                            maxlength=OTP_LENGTH.to_string() placeholder="123456"
                            prop:value=move || code.get()
                            on:input=move |ev| code.set(event_target_value(&ev))/>
                        <input class="login-input" type="password" autocomplete="new-password" placeholder="New password"
                            prop:value=move || new_password.get()
                            on:input=move |ev| new_password.set(event_target_value(&ev))/>
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            "Set new password"
                        </button>
                    </form>
                </Show>
                <FormMessages error=error notice=notice/>
                <p class="login-links">
                    <a href="/login">"Back to sign in"</a>
                </p>
            </div>
        </div>
    }
}
