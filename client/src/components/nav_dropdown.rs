//! Dropdown menus for the top bar.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

pub const REGION_MENU: &[NavItem] = &[
    NavItem { label: "Everest", href: "/region/everest" },
    NavItem { label: "Annapurna", href: "/region/annapurna" },
    NavItem { label: "Langtang", href: "/region/langtang" },
    NavItem { label: "Manaslu", href: "/region/manaslu" },
    NavItem { label: "Mustang", href: "/region/mustang" },
];

pub const TRAVEL_INFO_MENU: &[NavItem] = &[
    NavItem { label: "Travel Blog", href: "/blog" },
    NavItem { label: "Find a Trek", href: "/search" },
];

/// Button that toggles a list of links. Picking a link closes the menu.
#[component]
pub fn NavDropdown(#[prop(into)] label: String, items: &'static [NavItem]) -> impl IntoView {
    let open = RwSignal::new(false);

    view! {
        <div class="nav-dropdown" class=("nav-dropdown--open", move || open.get()) on:mouseleave=move |_| open.set(false)>
            <button
                class="nav-dropdown__toggle"
                aria-haspopup="true"
                aria-expanded=move || open.get().to_string()
                on:click=move |_| open.update(|o| *o = !*o)
            >
                {label}
            </button>
            <Show when=move || open.get()>
                <ul class="nav-dropdown__menu">
                    {items
                        .iter()
                        .map(|item| {
                            view! {
                                <li>
                                    <a href=item.href on:click=move |_| open.set(false)>
                                        {item.label}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </Show>
        </div>
    }
}
