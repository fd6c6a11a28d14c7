use brewhaven_shared::models::Reservation;
use brewhaven_shared::protocol::{NewReservation, ReservationUpdate};
use chrono::{NaiveDate, NaiveTime};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::CalendarIcon;
use crate::session::handle::use_session;

/// 可预约的场地（静态目录，预约记录本身在服务端）
const SPACES: &[(&str, u32, &str)] = &[
    ("Console lounge", 6, "Two couches, one big screen, every controller we own."),
    ("Tabletop corner", 8, "A long table for board games and card nights."),
    ("PC battle row", 10, "Ten rigs side by side for squads and scrims."),
];

/// 营业时段（整点开桌）
const TIME_SLOTS: &[&str] = &["16:00", "17:00", "18:00", "19:00", "20:00", "21:00"];

#[component]
pub fn ReservationsPage() -> impl IntoView {
    let session = use_session();

    let (reservations, set_reservations) = signal(Vec::<Reservation>::new());
    let (date, set_date) = signal(String::new());
    let (time, set_time) = signal(String::from("18:00"));
    let (people, set_people) = signal(2u32);
    let (submitting, set_submitting) = signal(false);
    let (editing, set_editing) = signal(Option::<Reservation>::None);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    let user_id = session.current_user().map(|user| user.id).unwrap_or(0);
    let api = session.api();

    let reload = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn_local(async move {
                match api.user_reservations(user_id).await {
                    Ok(list) => set_reservations.set(list),
                    Err(err) => set_notification.set(Some((err.message, true))),
                }
            });
        }
    };
    reload();

    let parse_inputs = move || -> Result<(NaiveDate, NaiveTime), String> {
        let date = NaiveDate::parse_from_str(&date.get_untracked(), "%Y-%m-%d")
            .map_err(|_| "Pick a date first".to_string())?;
        let time = NaiveTime::parse_from_str(&time.get_untracked(), "%H:%M")
            .map_err(|_| "Pick a time slot".to_string())?;
        Ok((date, time))
    };

    let on_create = {
        let api = api.clone();
        let reload = reload.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let (date, time) = match parse_inputs() {
                Ok(parsed) => parsed,
                Err(msg) => {
                    set_notification.set(Some((msg, true)));
                    return;
                }
            };
            set_submitting.set(true);
            let request = NewReservation {
                date,
                time,
                people_count: people.get_untracked(),
            };
            let api = api.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api.create_reservation(&request).await {
                    Ok(_) => {
                        set_notification.set(Some(("Reservation requested!".to_string(), false)));
                        reload();
                    }
                    Err(err) => set_notification.set(Some((err.message, true))),
                }
                set_submitting.set(false);
            });
        }
    };

    let on_cancel = {
        let api = api.clone();
        let reload = reload.clone();
        move |id: i64| {
            let api = api.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api.cancel_reservation(id).await {
                    Ok(reply) => {
                        set_notification.set(Some((reply.message, false)));
                        reload();
                    }
                    Err(err) => set_notification.set(Some((err.message, true))),
                }
            });
        }
    };

    let on_save_edit = {
        let api = api.clone();
        let reload = reload.clone();
        move |id: i64, people_count: u32| {
            let update = ReservationUpdate {
                people_count: Some(people_count),
                ..Default::default()
            };
            let api = api.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api.update_reservation(id, &update).await {
                    Ok(_) => {
                        set_notification.set(Some(("Reservation updated".to_string(), false)));
                        set_editing.set(None);
                        reload();
                    }
                    Err(err) => set_notification.set(Some((err.message, true))),
                }
            });
        }
    };

    // StoredValue 是 Copy 句柄，行级闭包可重复取用而不移动处理函数
    let on_cancel = StoredValue::new(on_cancel);
    let on_save_edit = StoredValue::new(on_save_edit);

    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let status_badge = |status: &str| match status {
        "confirmed" => "badge badge-success",
        "cancelled" => "badge badge-error",
        _ => "badge badge-warning",
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-8">
                <Show when=move || notification.get().is_some()>
                    <div class="toast toast-top toast-end z-50">
                        <div class=move || {
                            if notification.get().map(|(_, is_err)| is_err).unwrap_or(false) {
                                "alert alert-error shadow-lg"
                            } else {
                                "alert alert-success shadow-lg"
                            }
                        }>
                            <span>{move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                        </div>
                    </div>
                </Show>

                <h1 class="text-3xl font-bold flex items-center gap-2">
                    <CalendarIcon class="h-7 w-7" />
                    "Reserve a space"
                </h1>

                <div class="grid md:grid-cols-3 gap-4">
                    {SPACES.iter().map(|(name, capacity, blurb)| view! {
                        <div class="card bg-base-100 shadow-md">
                            <div class="card-body">
                                <h2 class="card-title">{*name}</h2>
                                <p class="text-sm text-base-content/70">{*blurb}</p>
                                <span class="badge badge-ghost">{format!("Up to {capacity} people")}</span>
                            </div>
                        </div>
                    }).collect_view()}
                </div>

                <div class="card bg-base-100 shadow-md">
                    <form class="card-body md:flex-row items-end gap-4" on:submit=on_create>
                        <div class="form-control">
                            <label class="label" for="res-date">
                                <span class="label-text">"Date"</span>
                            </label>
                            <input
                                id="res-date"
                                type="date"
                                class="input input-bordered"
                                on:input=move |ev| set_date.set(event_target_value(&ev))
                                prop:value=date
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="res-time">
                                <span class="label-text">"Time"</span>
                            </label>
                            <select
                                id="res-time"
                                class="select select-bordered"
                                on:change=move |ev| set_time.set(event_target_value(&ev))
                            >
                                {TIME_SLOTS.iter().map(|slot| view! {
                                    <option value=*slot selected=*slot == "18:00">{*slot}</option>
                                }).collect_view()}
                            </select>
                        </div>
                        <div class="form-control">
                            <label class="label" for="res-people">
                                <span class="label-text">"People"</span>
                            </label>
                            <input
                                id="res-people"
                                type="number"
                                min="1"
                                max="10"
                                class="input input-bordered w-24"
                                on:input=move |ev| {
                                    if let Ok(count) = event_target_value(&ev).parse() {
                                        set_people.set(count);
                                    }
                                }
                                prop:value=move || people.get().to_string()
                            />
                        </div>
                        <button class="btn btn-primary" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Booking..." } else { "Book it" }}
                        </button>
                    </form>
                </div>

                <div class="space-y-3">
                    <h2 class="text-2xl font-bold">"Your reservations"</h2>
                    <Show
                        when=move || !reservations.get().is_empty()
                        fallback=|| view! {
                            <p class="text-base-content/60">"No reservations yet."</p>
                        }
                    >
                        <div class="overflow-x-auto">
                            <table class="table bg-base-100 shadow-md">
                                <thead>
                                    <tr>
                                        <th>"Date"</th>
                                        <th>"Time"</th>
                                        <th>"People"</th>
                                        <th>"Status"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || reservations.get()
                                        key=|reservation| (reservation.id, reservation.status.clone(), reservation.people_count)
                                        let:reservation
                                    >
                                        {
                                            let on_cancel = on_cancel.get_value();
                                            let id = reservation.id;
                                            let cancellable = reservation.status != "cancelled";
                                            let for_edit = reservation.clone();
                                            view! {
                                                <tr>
                                                    <td>{reservation.date.to_string()}</td>
                                                    <td>{reservation.time.format("%H:%M").to_string()}</td>
                                                    <td>{reservation.people_count}</td>
                                                    <td>
                                                        <span class=status_badge(&reservation.status)>
                                                            {reservation.status.clone()}
                                                        </span>
                                                    </td>
                                                    <td class="flex gap-2">
                                                        <button
                                                            class="btn btn-xs btn-outline"
                                                            disabled=!cancellable
                                                            on:click=move |_| set_editing.set(Some(for_edit.clone()))
                                                        >
                                                            "Edit"
                                                        </button>
                                                        <button
                                                            class="btn btn-xs btn-error btn-outline"
                                                            disabled=!cancellable
                                                            on:click=move |_| on_cancel(id)
                                                        >
                                                            "Cancel"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    </For>
                                </tbody>
                            </table>
                        </div>
                    </Show>
                </div>

                // 简单的编辑对话框：只改人数，其余字段重订即可
                <Show when=move || editing.get().is_some()>
                    {move || editing.get().map(|reservation| {
                        let on_save_edit = on_save_edit.get_value();
                        let id = reservation.id;
                        let (count, set_count) = signal(reservation.people_count);
                        view! {
                            <div class="modal modal-open">
                                <div class="modal-box space-y-4">
                                    <h3 class="font-bold text-lg">"Edit reservation"</h3>
                                    <div class="form-control">
                                        <label class="label">
                                            <span class="label-text">"People"</span>
                                        </label>
                                        <input
                                            type="number"
                                            min="1"
                                            max="10"
                                            class="input input-bordered w-24"
                                            on:input=move |ev| {
                                                if let Ok(value) = event_target_value(&ev).parse() {
                                                    set_count.set(value);
                                                }
                                            }
                                            prop:value=move || count.get().to_string()
                                        />
                                    </div>
                                    <div class="modal-action">
                                        <button class="btn btn-ghost" on:click=move |_| set_editing.set(None)>
                                            "Close"
                                        </button>
                                        <button
                                            class="btn btn-primary"
                                            on:click=move |_| on_save_edit(id, count.get_untracked())
                                        >
                                            "Save"
                                        </button>
                                    </div>
                                </div>
                            </div>
                        }
                    })}
                </Show>
            </div>
        </div>
    }
}
