use crate::domain::LeadRecord;
use maud::{html, Markup};

/// Per-row status picker on the admin dashboard.
///
/// Offers the kind's conventional statuses; a status set through the API that
/// is not in that list stays selected as an extra option.
pub fn status_form(record: &LeadRecord) -> Markup {
    let kind = record.kind();
    let current = record.status();
    let conventional = kind.conventional_statuses();

    html! {
        form action=(format!("/admin/{}/{}/status", kind.slug(), record.id())) method="post" style="display: flex; gap: 8px; align-items: center; margin: 0;" {
            select name="status" style="padding: 4px; border: 1px solid #ccc; border-radius: 4px;" {
                @if !conventional.contains(&current) {
                    option value=(current) selected { (current) }
                }
                @for status in conventional {
                    option value=(status) selected[*status == current] { (status) }
                }
            }
            button type="submit" style="padding: 4px 8px; background: #3b82f6; color: white; border: none; border-radius: 4px; cursor: pointer;" { "Set" }
        }
    }
}
