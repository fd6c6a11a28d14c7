use leptos::prelude::*;

use crate::components::icons::TrophyIcon;

const GAMES: &[&str] = &[
    "League of Legends",
    "Valorant",
    "Counter-Strike 2",
    "FIFA",
    "Tekken 8",
    "Super Smash Bros",
    "Board game",
    "Other",
];

const PLATFORMS: &[&str] = &["PC", "PlayStation 5", "Xbox Series X/S", "Nintendo Switch", "Tabletop"];

const FORMATS: &[&str] = &["Single elimination", "Best of 3", "Groups + final"];

/// 赛事申请表单
///
/// 纯客户端表单：填写、预览、提交确认，不经过后端
/// （申请由店员线下跟进，与原版行为一致）。
#[component]
pub fn TournamentPage() -> impl IntoView {
    let (event_name, set_event_name) = signal(String::new());
    let (game, set_game) = signal(String::from(GAMES[0]));
    let (platform, set_platform) = signal(String::from(PLATFORMS[0]));
    let (format, set_format) = signal(String::from(FORMATS[0]));
    let (players, set_players) = signal(8u32);
    let (date_time, set_date_time) = signal(String::new());
    let (contact, set_contact) = signal(String::new());
    let (preview_open, set_preview_open) = signal(false);
    let (submitted, set_submitted) = signal(false);

    let on_preview = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if event_name.get().is_empty() || contact.get().is_empty() {
            return;
        }
        set_preview_open.set(true);
    };

    let on_confirm = move |_| {
        set_preview_open.set(false);
        set_submitted.set(true);
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-2xl mx-auto space-y-6">
                <h1 class="text-3xl font-bold flex items-center gap-2">
                    <TrophyIcon class="h-7 w-7 text-primary" />
                    "Request a tournament"
                </h1>

                <Show when=move || submitted.get()>
                    <div role="alert" class="alert alert-success">
                        <span>
                            "Request received! Our crew will reach out at "
                            {move || contact.get()}
                            " to lock in the details."
                        </span>
                    </div>
                </Show>

                <div class="card bg-base-100 shadow-md">
                    <form class="card-body space-y-2" on:submit=on_preview>
                        <div class="form-control">
                            <label class="label" for="event-name">
                                <span class="label-text">"Event name"</span>
                            </label>
                            <input
                                id="event-name"
                                type="text"
                                placeholder="Friday Night Clash"
                                class="input input-bordered"
                                on:input=move |ev| set_event_name.set(event_target_value(&ev))
                                prop:value=event_name
                                required
                            />
                        </div>

                        <div class="grid md:grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="game">
                                    <span class="label-text">"Game"</span>
                                </label>
                                <select
                                    id="game"
                                    class="select select-bordered"
                                    on:change=move |ev| set_game.set(event_target_value(&ev))
                                >
                                    {GAMES.iter().map(|name| view! {
                                        <option value=*name>{*name}</option>
                                    }).collect_view()}
                                </select>
                            </div>
                            <div class="form-control">
                                <label class="label" for="platform">
                                    <span class="label-text">"Platform"</span>
                                </label>
                                <select
                                    id="platform"
                                    class="select select-bordered"
                                    on:change=move |ev| set_platform.set(event_target_value(&ev))
                                >
                                    {PLATFORMS.iter().map(|name| view! {
                                        <option value=*name>{*name}</option>
                                    }).collect_view()}
                                </select>
                            </div>
                        </div>

                        <div class="grid md:grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="format">
                                    <span class="label-text">"Format"</span>
                                </label>
                                <select
                                    id="format"
                                    class="select select-bordered"
                                    on:change=move |ev| set_format.set(event_target_value(&ev))
                                >
                                    {FORMATS.iter().map(|name| view! {
                                        <option value=*name>{*name}</option>
                                    }).collect_view()}
                                </select>
                            </div>
                            <div class="form-control">
                                <label class="label" for="players">
                                    <span class="label-text">"Players"</span>
                                </label>
                                <input
                                    id="players"
                                    type="number"
                                    min="4"
                                    max="64"
                                    class="input input-bordered"
                                    on:input=move |ev| {
                                        if let Ok(count) = event_target_value(&ev).parse() {
                                            set_players.set(count);
                                        }
                                    }
                                    prop:value=move || players.get().to_string()
                                />
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label" for="when">
                                <span class="label-text">"Preferred date & time"</span>
                            </label>
                            <input
                                id="when"
                                type="datetime-local"
                                class="input input-bordered"
                                on:input=move |ev| set_date_time.set(event_target_value(&ev))
                                prop:value=date_time
                            />
                        </div>

                        <div class="form-control">
                            <label class="label" for="contact">
                                <span class="label-text">"Contact (phone or email)"</span>
                            </label>
                            <input
                                id="contact"
                                type="text"
                                placeholder="you@example.com"
                                class="input input-bordered"
                                on:input=move |ev| set_contact.set(event_target_value(&ev))
                                prop:value=contact
                                required
                            />
                        </div>

                        <div class="form-control mt-4">
                            <button class="btn btn-primary">"Preview request"</button>
                        </div>
                    </form>
                </div>

                <Show when=move || preview_open.get()>
                    <div class="modal modal-open">
                        <div class="modal-box space-y-2">
                            <h3 class="font-bold text-lg">{move || event_name.get()}</h3>
                            <p>{move || format!("{} on {}", game.get(), platform.get())}</p>
                            <p>{move || format!("{} · {} players", format.get(), players.get())}</p>
                            <p class="text-sm text-base-content/70">
                                {move || {
                                    let when = date_time.get();
                                    if when.is_empty() { "Date to be agreed".to_string() } else { when }
                                }}
                            </p>
                            <div class="modal-action">
                                <button class="btn btn-ghost" on:click=move |_| set_preview_open.set(false)>
                                    "Back"
                                </button>
                                <button class="btn btn-primary" on:click=on_confirm>
                                    "Send request"
                                </button>
                            </div>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
