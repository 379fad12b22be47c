//! Booking summary shown after checkout and on the booking page.

use leptos::prelude::*;

use crate::net::types::BookingDetail;

#[component]
pub fn BookingConfirmation(booking: BookingDetail) -> impl IntoView {
    let lead = booking.lead_name();
    let total = booking.formatted_total();
    let dates = match (booking.start_date.clone(), booking.end_date.clone()) {
        (Some(start), Some(end)) => Some(format!("{start} to {end}")),
        (Some(start), None) => Some(start),
        _ => None,
    };
    let trek_link = booking.trek_slug.clone().map(|slug| format!("/trek/{slug}"));
    let trek_title = booking.trek_title.clone().unwrap_or_else(|| "Your trek".to_owned());
    let travellers = match booking.party_size {
        1 => "1 traveller".to_owned(),
        n => format!("{n} travellers"),
    };

    view! {
        <section class="booking-confirmation">
            <header class="booking-confirmation__header">
                <h1>"Booking confirmed"</h1>
                <p class="booking-confirmation__ref">
                    "Reference " <strong>{booking.booking_ref.clone()}</strong>
                </p>
                <span class="booking-confirmation__status">{booking.status.clone()}</span>
            </header>
            <dl class="booking-confirmation__details">
                <dt>"Trek"</dt>
                <dd>
                    {match trek_link {
                        Some(href) => view! { <a href=href>{trek_title}</a> }.into_any(),
                        None => view! { <span>{trek_title}</span> }.into_any(),
                    }}
                </dd>
                {dates.map(|d| view! { <dt>"Dates"</dt> <dd>{d}</dd> })}
                <dt>"Party"</dt>
                <dd>{travellers}</dd>
                {lead.map(|name| view! { <dt>"Lead traveller"</dt> <dd>{name}</dd> })}
                {booking.lead_email.clone().map(|email| view! { <dt>"Email"</dt> <dd>{email}</dd> })}
                {total.map(|t| view! { <dt>"Total"</dt> <dd class="booking-confirmation__total">{t}</dd> })}
            </dl>
        </section>
    }
}
