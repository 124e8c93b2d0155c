use crate::auth::Principal;
use crate::domain::{LeadKind, LeadRecord};
use crate::templates::components::status_form;
use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub struct AdminVm<'a> {
    pub principal: &'a Principal,
    /// One entry per lead kind, records oldest first.
    pub sections: Vec<(LeadKind, Vec<LeadRecord>)>,
}

pub fn admin_page(vm: &AdminVm) -> Markup {
    desktop_layout(
        "Admin Dashboard",
        Some(vm.principal),
        html! {
            main class="container" {
                h1 { "Admin Dashboard" }

                @for (kind, records) in &vm.sections {
                    @let title = format!("{} ({})", kind.title(), records.len());
                    (card(Some(kind.slug()), &title, html! {
                        @if records.is_empty() {
                            p style="color: #6b7280; font-style: italic;" { "Nothing yet." }
                        } @else {
                            div style="overflow-x: auto;" {
                                table style="width: 100%; border-collapse: collapse; margin-top: 1rem;" {
                                    thead {
                                        tr {
                                            th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "ID" }
                                            th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "Received" }
                                            th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "From" }
                                            th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "Summary" }
                                            th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "Status" }
                                        }
                                    }
                                    tbody {
                                        @for record in records {
                                            @let (name, email) = record.contact();
                                            tr {
                                                td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" { (record.id()) }
                                                td style="padding: 8px; border-bottom: 1px solid #f3f4f6; color: #6b7280; font-size: 0.9em;" {
                                                    (record.created_at().format("%Y-%m-%d %H:%M"))
                                                }
                                                td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" {
                                                    (name) br;
                                                    a href=(format!("mailto:{email}")) style="font-size: 0.85em;" { (email) }
                                                }
                                                td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" { (record.summary()) }
                                                td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" { (status_form(record)) }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }))
                }
            }
        },
    )
}
