//! Line parser for the transaction listing.
//!
//! Extracted statement text interleaves each record across several physical
//! lines:
//!
//!   Apr. 4  Apr. 7
//!   AMAZON.CA
//!   TORONTO ON                                    54.23
//!
//! A small state machine recovers the records: a date-pair line opens one,
//! merchant fragments accumulate, and a trailing amount closes it. A `CR`
//! suffix marks a credit (payment/refund) and flips the sign.

use anyhow::Result;
use regex::Regex;

use tally_core::Transaction;

/// Non-transaction lines discarded while scanning: column headers and the
/// card-number line. Account-holder name lines vary per statement and come
/// in through `extra_skip_markers`.
pub const DEFAULT_SKIP_MARKERS: [&str; 5] =
    ["TRANS", "DATE", "DESCRIPTION", "AMOUNT", "Card number:"];

enum State {
    /// Looking for the next date-pair line.
    Scanning,
    /// Inside a record: accumulating merchant fragments until the amount.
    Collecting {
        trans_date: String,
        post_date: String,
        fragments: Vec<String>,
    },
}

fn is_skipped(line: &str, extra_skip_markers: &[String]) -> bool {
    DEFAULT_SKIP_MARKERS.iter().any(|m| line.contains(m))
        || extra_skip_markers.iter().any(|m| line.contains(m.as_str()))
}

/// Parse the transaction section into transactions, in statement order.
///
/// A record still open when the section ends (truncated statement) is
/// dropped rather than emitted without an amount.
pub fn parse_section(section: &str, extra_skip_markers: &[String]) -> Result<Vec<Transaction>> {
    let date_pair_re = Regex::new(
        r"^(?P<trans>[A-Z][a-z]{2}\. \d{1,2})\s+(?P<post>[A-Z][a-z]{2}\. \d{1,2})$",
    )?;
    let amount_re = Regex::new(r"(?P<amt>\d+\.\d{2})(?P<cr>\s+CR)?$")?;

    let mut out = Vec::new();
    let mut state = State::Scanning;

    for raw in section.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        state = match state {
            State::Scanning => {
                if is_skipped(line, extra_skip_markers) {
                    State::Scanning
                } else if let Some(caps) = date_pair_re.captures(line) {
                    State::Collecting {
                        trans_date: caps["trans"].to_string(),
                        post_date: caps["post"].to_string(),
                        fragments: Vec::new(),
                    }
                } else {
                    State::Scanning
                }
            }

            State::Collecting {
                trans_date,
                post_date,
                mut fragments,
            } => {
                if let Some(caps) = amount_re.captures(line) {
                    let value: f64 = caps["amt"].parse().unwrap_or(0.0);
                    let amount = if caps.name("cr").is_some() { -value } else { value };

                    // Whatever precedes the amount on this line is the last
                    // merchant fragment.
                    let matched_at = caps.get(0).map_or(line.len(), |m| m.start());
                    let prefix = line[..matched_at].trim();
                    if !prefix.is_empty() {
                        fragments.push(prefix.to_string());
                    }

                    out.push(Transaction::new(
                        trans_date,
                        post_date,
                        fragments.join(" "),
                        amount,
                    ));
                    State::Scanning
                } else {
                    fragments.push(line.to_string());
                    State::Collecting {
                        trans_date,
                        post_date,
                        fragments,
                    }
                }
            }
        };
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(section: &str) -> Vec<Transaction> {
        parse_section(section, &[]).unwrap()
    }

    #[test]
    fn test_parses_records_in_statement_order() {
        let section = "
TRANS   DATE    DESCRIPTION     AMOUNT
Apr. 4  Apr. 7
TIM HORTONS #3667 WATERLOO ON   4.50
Apr. 9  Apr. 10
UBER TRIP
TORONTO ON    12.34
Apr. 12  Apr. 14
PAYMENT RECEIVED - THANK YOU    250.00 CR
";
        let txns = parse(section);
        assert_eq!(txns.len(), 3);
        assert_eq!(txns[0].trans_date, "Apr. 4");
        assert_eq!(txns[0].post_date, "Apr. 7");
        assert_eq!(txns[1].description, "UBER TRIP TORONTO ON");
        assert_eq!(txns[2].trans_date, "Apr. 12");
    }

    #[test]
    fn test_credit_marker_flips_sign() {
        let txns = parse("Apr. 4  Apr. 7\nPAYMENT RECEIVED  12.99 CR\nApr. 5  Apr. 8\nSTORE  4.50\n");
        assert_eq!(txns[0].amount, -12.99);
        assert_eq!(txns[1].amount, 4.50);
    }

    #[test]
    fn test_multi_line_merchant_description() {
        let txns = parse("Apr. 4  Apr. 7\nAMAZON.CA\nTORONTO ON 54.23\n");
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "AMAZON.CA TORONTO ON");
        assert_eq!(txns[0].amount, 54.23);
    }

    #[test]
    fn test_truncated_record_is_dropped() {
        let txns = parse("Apr. 4  Apr. 7\nAMAZON.CA\nTORONTO ON\n");
        assert!(txns.is_empty(), "record without an amount line must not be emitted");
    }

    #[test]
    fn test_skip_markers_drop_headers_and_card_lines() {
        let section = "
TRANS DATE          POSTING DATE
Card number: XXXX XXXX XXXX 1234
J DOE
Apr. 4  Apr. 7
STORE  9.99
";
        let txns = parse_section(section, &["J DOE".to_string()]).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "STORE");
    }

    #[test]
    fn test_amount_only_line_has_empty_description() {
        let txns = parse("Apr. 4  Apr. 7\n18.00\n");
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "");
        assert_eq!(txns[0].amount, 18.00);
    }

    #[test]
    fn test_date_pair_must_be_alone_on_line() {
        // Trailing text after the date pair means this is not a record opener.
        let txns = parse("Apr. 4  Apr. 7  STORE 9.99\n");
        assert!(txns.is_empty());
    }
}
