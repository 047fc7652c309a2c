use serde::Serialize;

/// A reconstructed sales voucher with its allocation lines.
///
/// Field names match the export convention of the downstream consumers, so
/// serializing a `Vec<Voucher>` directly yields the final output document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Voucher {
    #[serde(rename = "Voucher_Number")]
    pub voucher_number: String,
    #[serde(rename = "Date_iso", skip_serializing_if = "Option::is_none")]
    pub date_iso: Option<String>,
    #[serde(rename = "Date_serial", skip_serializing_if = "Option::is_none")]
    pub date_serial: Option<i64>,
    #[serde(rename = "Party")]
    pub party: String,
    #[serde(rename = "Voucher_Type")]
    pub voucher_type: String,
    #[serde(rename = "Debit_Amount", skip_serializing_if = "Option::is_none")]
    pub debit_amount: Option<f64>,
    #[serde(rename = "Credit_Amount", skip_serializing_if = "Option::is_none")]
    pub credit_amount: Option<f64>,
    #[serde(rename = "Details")]
    pub details: Vec<Detail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditNote {
    #[serde(rename = "Credit_Note_Number")]
    pub credit_note_number: String,
    /// Left unset by the parser; a later enrichment step links the credit note
    /// back to the sales voucher it reverses.
    #[serde(rename = "Original_Sales_Voucher_Number")]
    pub original_sales_voucher_number: Option<String>,
    #[serde(rename = "Date_iso", skip_serializing_if = "Option::is_none")]
    pub date_iso: Option<String>,
    #[serde(rename = "Date_serial", skip_serializing_if = "Option::is_none")]
    pub date_serial: Option<i64>,
    /// `None` when the credit note is cancelled.
    #[serde(rename = "Party")]
    pub party: Option<String>,
    #[serde(rename = "Voucher_Type")]
    pub voucher_type: String,
    #[serde(rename = "Is_Cancelled")]
    pub is_cancelled: bool,
    #[serde(rename = "Credit_Amount")]
    pub credit_amount: f64,
    #[serde(rename = "Details")]
    pub details: Vec<Detail>,
    #[serde(rename = "Metadata")]
    pub metadata: CreditNoteMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditNoteMeta {
    #[serde(rename = "Entered_By")]
    pub entered_by: Option<String>,
    #[serde(rename = "GRN_Number")]
    pub grn_number: Option<String>,
    #[serde(rename = "Source")]
    pub source: String,
}

/// One allocation line under a voucher or credit note. At most one of `staff`
/// and `account` is set; a line with an amount but neither name is a rounding
/// adjustment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Detail {
    #[serde(rename = "Staff", skip_serializing_if = "Option::is_none")]
    pub staff: Option<String>,
    #[serde(rename = "Account", skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,
    #[serde(rename = "Amount", skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl Detail {
    pub fn is_empty(&self) -> bool {
        self.staff.is_none()
            && self.account.is_none()
            && self.entry_type.is_none()
            && self.amount.is_none()
    }
}
