use super::{Record, RecipientField};
use regex::Regex;
use std::io::BufRead;
use std::sync::OnceLock;

/// Returns the regular expression matching an address.
fn address_regex() -> &'static Regex {
    static ADDRESS: OnceLock<Regex> = OnceLock::new();
    ADDRESS.get_or_init(|| {
        Regex::new(r"[\w][\w.-]*@[\w.-]+")
            .expect("the address pattern is valid")
    })
}

/// Returns the addresses in `text`, lowercased, in order of appearance.
pub fn extract_addresses(text: &str) -> impl Iterator<Item = String> + '_ {
    address_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
}

/// Parses the headers of a raw message.
///
/// Headers end at the first blank line. The sender is the first address of
/// the `From:` header; recipients are all the addresses of the headers
/// listed in `fields`, including folded continuation lines. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn parse_headers(
    mut reader: impl BufRead,
    fields: &[RecipientField],
) -> std::io::Result<Record> {
    let mut record = Record::default();
    let mut buf = Vec::new();
    // Whether the last header seen lists recipients
    let mut in_recipients = false;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            break;
        }

        if line.starts_with([' ', '\t']) {
            if in_recipients {
                record.recipients.extend(extract_addresses(line));
            }
            continue;
        }

        in_recipients = false;
        if let Some(rest) = line.strip_prefix("From:") {
            if record.sender.is_none() {
                record.sender = extract_addresses(rest).next();
            }
        } else if let Some(field) = fields.iter().find(|f| line.starts_with(f.header())) {
            in_recipients = true;
            record
                .recipients
                .extend(extract_addresses(&line[field.header().len()..]));
        }
    }

    Ok(record)
}
