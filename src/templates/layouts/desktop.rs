use crate::auth::Principal;
use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, principal: Option<&Principal>, content: Markup) -> Markup {
    let is_admin = principal.is_some_and(|p| p.is_admin);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Agency" }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
              header class="flex items-center justify-between px-6 py-3 shadow" {
                  h3 { a href="/" { "Agency" } }
                  nav {
                      ul {
                          li { a href="/" { "Home" } }
                          @if is_admin {
                              li { a href="/admin" { "Admin" } }
                          }
                      }
                  }

                  @match principal {
                      Some(p) => {
                          form action="/logout" method="post" class="inline" {
                              span class="text-sm" { (p.username) " " }
                              button type="submit" class="link" { "Log out" }
                          }
                      }
                      None => {
                          a href="/login" class="text-base font-medium hover:text-blue-600" { "Login" }
                      }
                  }
              }
                (content)
            }
        }
    }
}
