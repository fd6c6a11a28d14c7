use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::CoffeeIcon;
use crate::session::handle::use_session;

/// 登录 / 注册页
///
/// 成功后的跳转由路由服务完成：会话变为已认证时，
/// 自动返回守卫记下的原始目标（默认首页）。
#[component]
pub fn AuthPage() -> impl IntoView {
    let session = use_session();

    let (register_mode, set_register_mode) = signal(false);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = {
        let session = session.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            if email.get().is_empty() || password.get().is_empty() {
                set_error_msg.set(Some("Please fill in all fields".to_string()));
                return;
            }
            if register_mode.get() && name.get().is_empty() {
                set_error_msg.set(Some("Please tell us your name".to_string()));
                return;
            }

            set_is_submitting.set(true);
            set_error_msg.set(None);

            let session = session.clone();
            spawn_local(async move {
                let result = if register_mode.get_untracked() {
                    session
                        .register(
                            &name.get_untracked(),
                            &email.get_untracked(),
                            &password.get_untracked(),
                        )
                        .await
                } else {
                    session
                        .login(&email.get_untracked(), &password.get_untracked())
                        .await
                };
                if let Err(err) = result {
                    set_error_msg.set(Some(err.message));
                }
                set_is_submitting.set(false);
            });
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <CoffeeIcon class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Welcome to BrewHaven"</h1>
                        <p class="text-base-content/70">
                            {move || if register_mode.get() {
                                "Create an account to order and reserve"
                            } else {
                                "Sign in to continue"
                            }}
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div role="tablist" class="tabs tabs-boxed mb-2">
                            <button
                                type="button"
                                role="tab"
                                class=move || if register_mode.get() { "tab" } else { "tab tab-active" }
                                on:click=move |_| set_register_mode.set(false)
                            >
                                "Sign in"
                            </button>
                            <button
                                type="button"
                                role="tab"
                                class=move || if register_mode.get() { "tab tab-active" } else { "tab" }
                                on:click=move |_| set_register_mode.set(true)
                            >
                                "Register"
                            </button>
                        </div>

                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <Show when=move || register_mode.get()>
                            <div class="form-control">
                                <label class="label" for="name">
                                    <span class="label-text">"Name"</span>
                                </label>
                                <input
                                    id="name"
                                    type="text"
                                    placeholder="Ada Lovelace"
                                    on:input=move |ev| set_name.set(event_target_value(&ev))
                                    prop:value=name
                                    class="input input-bordered"
                                />
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "One moment..." }.into_any()
                                } else if register_mode.get() {
                                    "Create account".into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
