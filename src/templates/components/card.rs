use maud::{html, Markup};

/// Titled panel. `anchor` becomes the element id so redirects can land on it,
/// e.g. `/admin#contact-messages`.
pub fn card(anchor: Option<&str>, title: &str, body: Markup) -> Markup {
    html! {
        section class="card" id=[anchor] {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}
