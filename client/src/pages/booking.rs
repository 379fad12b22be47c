//! Booking confirmation page (`/booking/:reference`, signed-in only).

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::booking_confirmation::BookingConfirmation;
use crate::components::fetch_status::fetch_view;
use crate::components::modal::Modal;
use crate::hooks::use_booking;

#[component]
pub fn BookingPage() -> impl IntoView {
    let params = use_params_map();
    let booking = use_booking(move || params.with(|p| p.get("reference").unwrap_or_default()));
    let show_next_steps = RwSignal::new(false);

    view! {
        <section class="booking-page">
            {move || fetch_view(booking.get(), |detail| view! { <BookingConfirmation booking=detail/> }.into_any())}
            <button class="booking-page__help" on:click=move |_| show_next_steps.set(true)>
                "What happens next?"
            </button>
            <Modal open=show_next_steps on_close=Callback::new(move |()| show_next_steps.set(false)) title="What happens next">
                <ol class="booking-page__steps">
                    <li>"We email your confirmation and invoice within a few minutes."</li>
                    <li>"Your trek leader contacts you two weeks before departure."</li>
                    <li>"Bring your passport and two photos for permits."</li>
                </ol>
            </Modal>
        </section>
    }
}
