use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn login_page(error: Option<&str>) -> Markup {
    desktop_layout(
        "Sign in",
        None,
        html! {
            main class="container narrow" {
                h1 { "Sign in" }

                @if let Some(msg) = error {
                    p class="error" role="alert" { (msg) }
                }

                form method="post" action="/login" class="login-form" {
                    label for="username" { "Username" }
                    input type="text" id="username" name="username" autocomplete="username" required;

                    label for="password" { "Password" }
                    input type="password" id="password" name="password" autocomplete="current-password" required;

                    button type="submit" class="primary" { "Sign in" }
                }
            }
        },
    )
}
