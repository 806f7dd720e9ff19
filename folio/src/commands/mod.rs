use folio_models::form::FormView;

pub mod export;
pub mod messages;
pub mod status;
pub mod submit;

/// Renders a form view to the terminal.
pub fn print_view(view: &FormView) {
    if view.loading {
        println!("Sending...");
    }

    if let Some(notice) = &view.notice {
        println!("[{}] {}", notice.kind, notice.text);
    }

    let fields = &view.fields;
    let retained = [
        ("Name", &fields.name),
        ("Email", &fields.email),
        ("Subject", &fields.subject),
        ("Message", &fields.message),
    ];
    if retained.iter().any(|(_, value)| !value.is_empty()) {
        println!("Form:");
        for (label, value) in retained {
            println!("  {label}: {value}");
        }
    }

    if let Some(control) = &view.export_control {
        println!("{} (folio export)", control.label);
    }
}
