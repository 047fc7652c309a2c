use lazy_static::lazy_static;
use regex::Regex;

use crate::sheet::Cell;

/// Heuristic verdict on a particulars label: a staff member or a ledger
/// account. This is a shape-based guess, not a dictionary lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameClass {
    Staff,
    Account,
}

lazy_static! {
    // A parenthesised short capitalized token anywhere in the text, e.g. "(Chd)".
    static ref BRANCH_TAG: Regex = Regex::new(r"\([A-Z][a-z]*\)").unwrap();
    // Exactly two title-case words, e.g. "Rahul Sharma".
    static ref TITLE_CASE_PAIR: Regex = Regex::new(r"^[A-Z][a-z]+ [A-Z][a-z]+$").unwrap();
    // An all-caps word followed by an opening parenthesis, e.g. "SHUBHAM (".
    static ref UPPER_WITH_PAREN: Regex = Regex::new(r"^[A-Z]+ \(").unwrap();
}

/// Ledger-account keywords, matched as case-insensitive substrings.
const ACCOUNT_KEYWORDS: &[&str] = &[
    "SALE", "OUTPUT", "INPUT", "GST", "CGST", "SGST", "IGST", "R.OFF", "ROUND",
];

/// Classifies a particulars label as staff or account.
///
/// The name-shape rules are checked before the account-keyword override, so a
/// party whose name both looks like a person and contains a keyword (say
/// "Gst Traders") classifies as staff. That precedence is intentional and must
/// not be reordered without product sign-off.
pub fn classify_name(text: &str) -> NameClass {
    let text = text.trim();
    if BRANCH_TAG.is_match(text)
        || TITLE_CASE_PAIR.is_match(text)
        || UPPER_WITH_PAREN.is_match(text)
    {
        return NameClass::Staff;
    }
    // Explicit keyword override, checked only after the shape rules. It is
    // redundant with the default today but keeps the precedence visible.
    let upper = text.to_uppercase();
    if ACCOUNT_KEYWORDS
        .iter()
        .any(|keyword| upper.contains(keyword))
    {
        return NameClass::Account;
    }
    NameClass::Account
}

/// Non-text cells never denote a person.
pub fn classify_cell(cell: &Cell) -> NameClass {
    match cell.as_text() {
        Some(text) => classify_name(text),
        None => NameClass::Account,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Rahul Sharma")]
    #[case("Suresh Kumar (Chd)")]
    #[case("SHUBHAM (CHD)")]
    #[case("AMIT (DEL)")]
    fn staff_names(#[case] text: &str) {
        assert_eq!(NameClass::Staff, classify_name(text));
    }

    #[rstest]
    #[case("Local Sales A/c")]
    #[case("CGST Output")]
    #[case("IGST Input 18%")]
    #[case("R.Off")]
    #[case("Round Off")]
    #[case("Freight Charges")]
    fn account_names(#[case] text: &str) {
        assert_eq!(NameClass::Account, classify_name(text));
    }

    #[test]
    fn name_shape_wins_over_account_keyword() {
        // Rule order: shape rules run before the keyword override.
        assert_eq!(NameClass::Staff, classify_name("Gst Traders"));
        assert_eq!(NameClass::Staff, classify_name("Sales Agent (Ho)"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(NameClass::Staff, classify_name("  Rahul Sharma  "));
    }

    #[test]
    fn three_word_labels_are_not_title_case_pairs() {
        assert_eq!(NameClass::Account, classify_name("Packing And Forwarding"));
    }

    #[test]
    fn non_text_cells_are_never_staff() {
        assert_eq!(NameClass::Account, classify_cell(&Cell::Number(42.0)));
        assert_eq!(NameClass::Account, classify_cell(&Cell::Empty));
        assert_eq!(
            NameClass::Staff,
            classify_cell(&Cell::Text("Rahul Sharma".to_string()))
        );
    }
}
