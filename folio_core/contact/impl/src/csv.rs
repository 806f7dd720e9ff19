use folio_models::contact::ContactMessage;

const HEADER: [&str; 5] = ["Timestamp", "Name", "Email", "Subject", "Message"];

/// Renders the archive as CSV: an unquoted header row followed by one row per
/// message in which every field is quoted and inner quotes are doubled.
///
/// Rows are separated by `\n` without a trailing newline.
pub fn render_archive(messages: &[ContactMessage]) -> String {
    let mut lines = Vec::with_capacity(messages.len() + 1);
    lines.push(HEADER.join(","));
    lines.extend(messages.iter().map(render_row));
    lines.join("\n")
}

fn render_row(message: &ContactMessage) -> String {
    [
        message.timestamp.as_str(),
        message.author.name.as_str(),
        message.author.email.as_str(),
        message.subject.as_str(),
        message.content.as_str(),
    ]
    .map(quote)
    .join(",")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use folio_models::contact::ContactSubmission;
    use pretty_assertions::assert_eq;

    use super::*;

    fn message(name: &str, body: &str) -> ContactMessage {
        ContactSubmission {
            name: name.into(),
            email: "ada@example.com".into(),
            subject: "Hi".into(),
            message: body.into(),
        }
        .validate()
        .unwrap()
        .into_message("10/16/2026, 3:04:05 PM".try_into().unwrap())
    }

    #[test]
    fn header_only() {
        assert_eq!(render_archive(&[]), "Timestamp,Name,Email,Subject,Message");
    }

    #[test]
    fn quotes_every_field() {
        let csv = render_archive(&[message("Ada", "Hello, world")]);

        assert_eq!(
            csv,
            "Timestamp,Name,Email,Subject,Message\n\
             \"10/16/2026, 3:04:05 PM\",\"Ada\",\"ada@example.com\",\"Hi\",\"Hello, world\""
        );
    }

    #[test]
    fn doubles_inner_quotes() {
        let csv = render_archive(&[message("Ada \"Countess\" Lovelace", "He said \"hi\"")]);

        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"Ada \"\"Countess\"\" Lovelace\""));
        assert!(row.ends_with(",\"He said \"\"hi\"\"\""));
    }

    #[test]
    fn one_line_per_message() {
        for n in [1, 2, 7] {
            let messages = (0..n)
                .map(|i| message(&format!("Sender {i}"), "Hello"))
                .collect::<Vec<_>>();

            let csv = render_archive(&messages);

            assert_eq!(csv.lines().count(), n + 1);
            assert!(!csv.ends_with('\n'));
        }
    }
}
