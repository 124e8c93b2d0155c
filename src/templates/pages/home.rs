// templates/pages/home.rs

use crate::auth::Principal;
use crate::pricing::{Catalog, CatalogVariant, Category};
use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub fn home_page(principal: Option<&Principal>) -> Markup {
    let catalog = Catalog::get(CatalogVariant::Standalone);

    desktop_layout(
        "Home",
        principal,
        html! {
            main class="container" {
                h1 { "What we build" }
                p class="lead" {
                    "Pick a service and get an instant estimate, then send us a request."
                }

                @for category in Category::ALL {
                    (card(Some(category.slug()), category.title(), html! {
                        ul {
                            @for option in catalog.options_in(category) {
                                li {
                                    strong { (option.title) }
                                    " from $" (option.base_price)
                                    br;
                                    span class="text-sm" { (option.description) }
                                }
                            }
                        }
                    }))
                }
            }
        },
    )
}
