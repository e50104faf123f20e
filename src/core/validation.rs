use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::builder::DEFAULT_RECIPIENT_CODE;
use super::error::{IssueCode, ValidationIssue};
use super::types::*;

/// Rounding tolerance applied when cross-checking VAT summaries.
pub const TOTALS_TOLERANCE: Decimal = dec!(0.01);

/// Toggles for the optional validation passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Cross-check VAT summaries against line totals and computed tax.
    pub check_totals: bool,
    /// Check the shape of Italian tax codes (codice fiscale).
    pub check_tax_code: bool,
    /// Check that Italian VAT numbers (partita IVA) have 11 digits.
    pub check_vat_id: bool,
    /// Check date shape and calendar validity.
    pub check_dates: bool,
    /// Report every warning as an error.
    pub strict: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_totals: true,
            check_tax_code: true,
            check_vat_id: true,
            check_dates: true,
            strict: false,
        }
    }
}

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// `true` when `errors` is empty.
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Whether any error or warning carries `code`.
    pub fn has_code(&self, code: IssueCode) -> bool {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .any(|issue| issue.code == code)
    }
}

/// Validate a document with the default options.
pub fn validate_document(document: &Document) -> ValidationReport {
    Validator::default().validate(document)
}

/// FatturaPA business-rule validator.
///
/// Walks the whole document and reports every finding, not just the first.
/// Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn validate(&self, document: &Document) -> ValidationReport {
        let mut run = Run {
            options: &self.options,
            errors: Vec::new(),
            warnings: Vec::new(),
        };

        run.transmission(&document.header.transmission);
        run.sender(&document.header.sender);
        if let Some(rep) = &document.header.fiscal_representative {
            run.fiscal_representative(rep);
        }
        run.recipient(&document.header.recipient);
        if let Some(third_party) = &document.header.third_party {
            run.party_identity(&third_party.identity, "header.third_party.identity");
        }

        if document.bodies.is_empty() {
            run.error("bodies", "at least one body is required", IssueCode::EmptyArray);
        }
        for (i, body) in document.bodies.iter().enumerate() {
            run.body(body, &format!("bodies[{i}]"));
        }

        let Run {
            mut errors,
            mut warnings,
            ..
        } = run;
        if self.options.strict {
            errors.append(&mut warnings);
        }

        tracing::debug!(
            errors = errors.len(),
            warnings = warnings.len(),
            strict = self.options.strict,
            "validated FatturaPA document"
        );

        ValidationReport {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Accumulators for a single `validate` call.
struct Run<'a> {
    options: &'a ValidationOptions,
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Run<'_> {
    fn error(&mut self, path: impl Into<String>, message: impl Into<String>, code: IssueCode) {
        self.errors.push(ValidationIssue::new(path, message, code));
    }

    fn warning(&mut self, path: impl Into<String>, message: impl Into<String>, code: IssueCode) {
        self.warnings.push(ValidationIssue::new(path, message, code));
    }

    /// Report REQUIRED when `value` is empty. Returns whether it was present.
    fn required(&mut self, value: &str, path: &str) -> bool {
        if value.is_empty() {
            self.error(path, "field is required", IssueCode::Required);
            false
        } else {
            true
        }
    }

    fn max_length(&mut self, value: &str, max: usize, path: &str, label: &str) {
        if value.chars().count() > max {
            self.error(
                path,
                format!("{label} cannot exceed {max} characters"),
                IssueCode::MaxLength,
            );
        }
    }

    // -----------------------------------------------------------------------
    // Header
    // -----------------------------------------------------------------------

    fn transmission(&mut self, data: &TransmissionData) {
        let path = "header.transmission";

        if self.required(
            &data.transmitter_id.country,
            &format!("{path}.transmitter_id.country"),
        ) {
            self.country_code(
                &data.transmitter_id.country,
                &format!("{path}.transmitter_id.country"),
            );
        }
        self.required(&data.transmitter_id.code, &format!("{path}.transmitter_id.code"));

        if self.required(&data.sequence_id, &format!("{path}.sequence_id")) {
            self.max_length(
                &data.sequence_id,
                10,
                &format!("{path}.sequence_id"),
                "sequence id (ProgressivoInvio)",
            );
        }

        // Transmission format: closed enum, always valid once typed.

        if self.required(&data.recipient_code, &format!("{path}.recipient_code")) {
            if let Some(expected) = data.format.recipient_code_len() {
                let actual = data.recipient_code.chars().count();
                if actual != expected {
                    self.error(
                        format!("{path}.recipient_code"),
                        format!(
                            "recipient code for {} must be {expected} characters, got {actual}",
                            data.format
                        ),
                        IssueCode::InvalidLength,
                    );
                }
            }
        }

        let has_pec = data
            .recipient_pec
            .as_deref()
            .is_some_and(|pec| !pec.is_empty());
        if data.recipient_code == DEFAULT_RECIPIENT_CODE && !has_pec {
            self.warning(
                format!("{path}.recipient_pec"),
                "recipient PEC is recommended when the recipient code is 0000000",
                IssueCode::MissingPec,
            );
        }
    }

    fn sender(&mut self, sender: &Sender) {
        let path = "header.sender.identity";
        let identity = &sender.identity;

        if identity.vat_id.is_none() && blank(identity.tax_code.as_deref()) {
            self.error(
                path,
                "sender must have a VAT id (IdFiscaleIVA) or a tax code (CodiceFiscale)",
                IssueCode::MissingFiscalId,
            );
        }
        if let Some(vat_id) = &identity.vat_id {
            self.vat_id(vat_id, &format!("{path}.vat_id"));
        }
        if let Some(tax_code) = &identity.tax_code {
            self.tax_code(tax_code, &format!("{path}.tax_code"));
        }
        self.name(&identity.name, &format!("{path}.name"));
        if let Some(date) = &identity.register_date {
            self.date(date, &format!("{path}.register_date"));
        }

        self.address(&sender.address, "header.sender.address");
        if let Some(address) = &sender.permanent_establishment {
            self.address(address, "header.sender.permanent_establishment");
        }
        if let Some(registry) = &sender.registry {
            self.required(&registry.office, "header.sender.registry.office");
            self.required(&registry.number, "header.sender.registry.number");
        }
    }

    fn fiscal_representative(&mut self, rep: &FiscalRepresentative) {
        let path = "header.fiscal_representative";
        self.vat_id(&rep.vat_id, &format!("{path}.vat_id"));
        if let Some(tax_code) = &rep.tax_code {
            self.tax_code(tax_code, &format!("{path}.tax_code"));
        }
        self.name(&rep.name, &format!("{path}.name"));
    }

    fn recipient(&mut self, recipient: &Recipient) {
        self.party_identity(&recipient.identity, "header.recipient.identity");
        self.address(&recipient.address, "header.recipient.address");
        if let Some(address) = &recipient.permanent_establishment {
            self.address(address, "header.recipient.permanent_establishment");
        }
        if let Some(rep) = &recipient.fiscal_representative {
            let path = "header.recipient.fiscal_representative";
            self.vat_id(&rep.vat_id, &format!("{path}.vat_id"));
            let name = Name {
                denomination: rep.denomination.clone(),
                first_name: rep.first_name.clone(),
                last_name: rep.last_name.clone(),
                ..Name::default()
            };
            self.name(&name, path);
        }
    }

    fn party_identity(&mut self, identity: &PartyIdentity, path: &str) {
        if let Some(vat_id) = &identity.vat_id {
            self.vat_id(vat_id, &format!("{path}.vat_id"));
        }
        if let Some(tax_code) = &identity.tax_code {
            self.tax_code(tax_code, &format!("{path}.tax_code"));
        }
        self.name(&identity.name, &format!("{path}.name"));
    }

    fn vat_id(&mut self, vat_id: &FiscalId, path: &str) {
        let country_path = format!("{path}.country");
        let code_path = format!("{path}.code");
        let has_country = self.required(&vat_id.country, &country_path);
        let has_code = self.required(&vat_id.code, &code_path);
        if has_country {
            self.country_code(&vat_id.country, &country_path);
        }
        if has_code
            && self.options.check_vat_id
            && vat_id.country == "IT"
            && !is_digits(&vat_id.code, 11)
        {
            self.error(
                code_path,
                "Italian VAT number (partita IVA) must be 11 digits",
                IssueCode::InvalidPiva,
            );
        }
    }

    fn tax_code(&mut self, code: &str, path: &str) {
        if self.options.check_tax_code && !is_personal_tax_code(code) && !is_digits(code, 11) {
            self.error(
                path,
                format!("invalid Italian tax code (codice fiscale) '{code}'"),
                IssueCode::InvalidCf,
            );
        }
    }

    fn name(&mut self, name: &Name, path: &str) {
        let has_denomination = !blank(name.denomination.as_deref());
        let has_first = !blank(name.first_name.as_deref());
        let has_last = !blank(name.last_name.as_deref());

        if !has_denomination && !(has_first && has_last) {
            self.error(
                path,
                "either denomination or first and last name is required",
                IssueCode::MissingAnagraficData,
            );
        }
        if has_denomination && (has_first || has_last) {
            self.warning(
                path,
                "denomination should not be combined with first/last name",
                IssueCode::ConflictingAnagraficData,
            );
        }
    }

    fn address(&mut self, address: &Address, path: &str) {
        self.required(&address.street, &format!("{path}.street"));
        let has_cap = self.required(&address.postal_code, &format!("{path}.postal_code"));
        self.required(&address.city, &format!("{path}.city"));
        let has_country = self.required(&address.country, &format!("{path}.country"));

        if has_cap && address.country == "IT" && !is_digits(&address.postal_code, 5) {
            self.error(
                format!("{path}.postal_code"),
                "Italian postal code (CAP) must be 5 digits",
                IssueCode::InvalidCap,
            );
        }
        if has_country {
            self.country_code(&address.country, &format!("{path}.country"));
        }
    }

    fn country_code(&mut self, code: &str, path: &str) {
        let valid = code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase());
        if !valid {
            self.error(
                path,
                format!("country code '{code}' must be ISO 3166-1 alpha-2 (2 uppercase letters)"),
                IssueCode::InvalidCountryCode,
            );
        }
    }

    fn date(&mut self, date: &str, path: &str) {
        if !self.options.check_dates {
            return;
        }
        if !is_date_shape(date) {
            self.error(
                path,
                format!("date '{date}' must be in YYYY-MM-DD format"),
                IssueCode::InvalidDateFormat,
            );
        } else if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            self.error(
                path,
                format!("'{date}' is not a valid calendar date"),
                IssueCode::InvalidDate,
            );
        }
    }

    // -----------------------------------------------------------------------
    // Body
    // -----------------------------------------------------------------------

    fn body(&mut self, body: &Body, path: &str) {
        self.general(&body.general, &format!("{path}.general"));
        self.goods_services(&body.goods_services, &format!("{path}.goods_services"));

        if let Some(vehicle) = &body.vehicle {
            if self.required(&vehicle.date, &format!("{path}.vehicle.date")) {
                self.date(&vehicle.date, &format!("{path}.vehicle.date"));
            }
            self.required(
                &vehicle.total_distance,
                &format!("{path}.vehicle.total_distance"),
            );
        }

        for (i, payment) in body.payments.iter().enumerate() {
            let payment_path = format!("{path}.payments[{i}]");
            if payment.details.is_empty() {
                self.error(
                    format!("{payment_path}.details"),
                    "at least one payment detail is required",
                    IssueCode::EmptyArray,
                );
            }
            for (j, detail) in payment.details.iter().enumerate() {
                let detail_path = format!("{payment_path}.details[{j}]");
                for (value, field) in [
                    (&detail.terms_reference_date, "terms_reference_date"),
                    (&detail.due_date, "due_date"),
                    (&detail.early_payment_deadline, "early_payment_deadline"),
                    (&detail.penalty_start_date, "penalty_start_date"),
                ] {
                    if let Some(date) = value {
                        self.date(date, &format!("{detail_path}.{field}"));
                    }
                }
            }
        }

        for (i, attachment) in body.attachments.iter().enumerate() {
            self.required(&attachment.name, &format!("{path}.attachments[{i}].name"));
            self.required(&attachment.data, &format!("{path}.attachments[{i}].data"));
        }
    }

    fn general(&mut self, general: &GeneralData, path: &str) {
        let doc = &general.document;
        let doc_path = format!("{path}.document");

        // Document type: closed enum.

        let currency_path = format!("{doc_path}.currency");
        if self.required(&doc.currency, &currency_path) {
            if doc.currency.len() != 3 || !doc.currency.bytes().all(|b| b.is_ascii_uppercase()) {
                self.error(
                    currency_path,
                    format!("currency '{}' must be a 3-letter ISO 4217 code", doc.currency),
                    IssueCode::InvalidCurrency,
                );
            } else if !is_known_currency_code(&doc.currency) {
                self.error(
                    currency_path,
                    format!("currency '{}' is not a known ISO 4217 code", doc.currency),
                    IssueCode::InvalidEnum,
                );
            }
        }

        if self.required(&doc.date, &format!("{doc_path}.date")) {
            self.date(&doc.date, &format!("{doc_path}.date"));
        }

        if self.required(&doc.number, &format!("{doc_path}.number")) {
            self.max_length(&doc.number, 20, &format!("{doc_path}.number"), "document number");
        }

        for (i, reason) in doc.reasons.iter().enumerate() {
            self.max_length(reason, 200, &format!("{doc_path}.reasons[{i}]"), "reason (Causale)");
        }

        for (i, fund) in doc.welfare_funds.iter().enumerate() {
            if fund.vat_rate.is_zero() && fund.nature.is_none() {
                self.zero_vat_without_nature(&format!("{doc_path}.welfare_funds[{i}].nature"));
            }
        }

        for (list, field) in [
            (&general.purchase_orders, "purchase_orders"),
            (&general.contracts, "contracts"),
            (&general.agreements, "agreements"),
            (&general.receipts, "receipts"),
            (&general.linked_invoices, "linked_invoices"),
        ] {
            for (i, related) in list.iter().enumerate() {
                let related_path = format!("{path}.{field}[{i}]");
                self.required(&related.document_id, &format!("{related_path}.document_id"));
                if let Some(date) = &related.date {
                    self.date(date, &format!("{related_path}.date"));
                }
            }
        }

        for (i, note) in general.delivery_notes.iter().enumerate() {
            let note_path = format!("{path}.delivery_notes[{i}]");
            self.required(&note.number, &format!("{note_path}.number"));
            if self.required(&note.date, &format!("{note_path}.date")) {
                self.date(&note.date, &format!("{note_path}.date"));
            }
        }

        if let Some(transport) = &general.transport {
            let transport_path = format!("{path}.transport");
            if let Some(carrier) = &transport.carrier {
                self.party_identity(&carrier.identity, &format!("{transport_path}.carrier.identity"));
            }
            if let Some(date) = &transport.start_date {
                self.date(date, &format!("{transport_path}.start_date"));
            }
            if let Some(address) = &transport.delivery_address {
                self.address(address, &format!("{transport_path}.delivery_address"));
            }
        }

        if let Some(main) = &general.main_invoice {
            let main_path = format!("{path}.main_invoice");
            self.required(&main.number, &format!("{main_path}.number"));
            if self.required(&main.date, &format!("{main_path}.date")) {
                self.date(&main.date, &format!("{main_path}.date"));
            }
        }
    }

    fn goods_services(&mut self, data: &GoodsServices, path: &str) {
        if data.lines.is_empty() {
            self.error(
                format!("{path}.lines"),
                "at least one line item is required",
                IssueCode::EmptyArray,
            );
        }

        let mut seen = HashSet::new();
        for (i, line) in data.lines.iter().enumerate() {
            let line_path = format!("{path}.lines[{i}]");
            self.line(line, &line_path);
            if !seen.insert(line.number) {
                self.error(
                    format!("{line_path}.number"),
                    format!("duplicate line number {}", line.number),
                    IssueCode::DuplicateLineNumber,
                );
            }
        }

        if data.vat_summary.is_empty() {
            self.error(
                format!("{path}.vat_summary"),
                "at least one VAT summary is required",
                IssueCode::EmptyArray,
            );
        }
        for (i, summary) in data.vat_summary.iter().enumerate() {
            self.summary(summary, &format!("{path}.vat_summary[{i}]"));
        }

        if self.options.check_totals && !data.lines.is_empty() && !data.vat_summary.is_empty() {
            self.totals(data, path);
        }
    }

    fn line(&mut self, line: &LineItem, path: &str) {
        if line.number == 0 {
            self.error(
                format!("{path}.number"),
                "line number must be greater than 0",
                IssueCode::InvalidValue,
            );
        }

        if self.required(&line.description, &format!("{path}.description")) {
            self.max_length(
                &line.description,
                1000,
                &format!("{path}.description"),
                "line description",
            );
        }

        if line.vat_rate.is_zero() && line.nature.is_none() {
            self.zero_vat_without_nature(&format!("{path}.nature"));
        }

        if let Some(start) = &line.period_start {
            self.date(start, &format!("{path}.period_start"));
        }
        if let Some(end) = &line.period_end {
            self.date(end, &format!("{path}.period_end"));
        }
        if let (Some(start), Some(end)) = (&line.period_start, &line.period_end) {
            if self.options.check_dates && start > end {
                self.error(
                    format!("{path}.period_end"),
                    format!("period end {end} is before period start {start}"),
                    IssueCode::InvalidDateRange,
                );
            }
        }
    }

    fn summary(&mut self, summary: &VatSummary, path: &str) {
        if summary.vat_rate.is_zero() && summary.nature.is_none() {
            self.zero_vat_without_nature(&format!("{path}.nature"));
        }
        if summary.nature.is_some() && blank(summary.legal_reference.as_deref()) {
            self.warning(
                format!("{path}.legal_reference"),
                "legal reference (RiferimentoNormativo) is recommended when a nature code is set",
                IssueCode::MissingReference,
            );
        }
    }

    fn zero_vat_without_nature(&mut self, path: &str) {
        self.error(
            path,
            "nature code is required when the VAT rate is 0",
            IssueCode::RequiredWhenZeroVat,
        );
    }

    fn totals(&mut self, data: &GoodsServices, path: &str) {
        // `None` marks a rate whose line totals overflowed.
        let mut line_totals: BTreeMap<Decimal, Option<Decimal>> = BTreeMap::new();
        for line in &data.lines {
            let sum = line_totals
                .entry(line.vat_rate.normalize())
                .or_insert(Some(Decimal::ZERO));
            *sum = sum.and_then(|s| s.checked_add(line.total_price));
        }

        for (i, summary) in data.vat_summary.iter().enumerate() {
            let summary_path = format!("{path}.vat_summary[{i}]");
            let rate = summary.vat_rate.normalize();

            match line_totals.get(&rate).copied().unwrap_or(Some(Decimal::ZERO)) {
                Some(expected) if exceeds_tolerance(expected, summary.taxable_amount) => {
                    self.warning(
                        format!("{summary_path}.taxable_amount"),
                        format!(
                            "taxable amount for rate {rate}% does not match the line totals (expected {}, found {})",
                            expected.round_dp(2),
                            summary.taxable_amount.round_dp(2)
                        ),
                        IssueCode::TotalMismatch,
                    );
                }
                Some(_) => {}
                None => self.warning(
                    format!("{summary_path}.taxable_amount"),
                    format!("line totals for rate {rate}% are out of range"),
                    IssueCode::TotalMismatch,
                ),
            }

            let expected_tax = summary
                .taxable_amount
                .checked_mul(summary.vat_rate)
                .and_then(|product| product.checked_div(dec!(100)));
            match expected_tax {
                Some(expected) if exceeds_tolerance(expected, summary.tax) => {
                    self.warning(
                        format!("{summary_path}.tax"),
                        format!(
                            "tax for rate {rate}% does not match (expected {}, found {})",
                            expected.round_dp(2),
                            summary.tax.round_dp(2)
                        ),
                        IssueCode::TaxMismatch,
                    );
                }
                Some(_) => {}
                None => self.warning(
                    format!("{summary_path}.tax"),
                    format!("tax for rate {rate}% cannot be computed: amount out of range"),
                    IssueCode::TaxMismatch,
                ),
            }
        }
    }
}

/// Absent or empty.
fn blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

/// Whether `a` and `b` differ by more than the tolerance. A difference too
/// large to represent counts as a mismatch.
fn exceeds_tolerance(a: Decimal, b: Decimal) -> bool {
    a.checked_sub(b)
        .is_none_or(|diff| diff.abs() > TOTALS_TOLERANCE)
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// `YYYY-MM-DD` shape, without checking the calendar.
fn is_date_shape(value: &str) -> bool {
    let b = value.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

/// 16-character personal codice fiscale: 6 letters, 2 digits, letter,
/// 2 digits, letter, 3 digits, letter. Case-insensitive.
fn is_personal_tax_code(value: &str) -> bool {
    const PATTERN: &[u8; 16] = b"AAAAAA00A00A000A";
    let b = value.as_bytes();
    b.len() == 16
        && b.iter().zip(PATTERN).all(|(c, p)| match p {
            b'A' => c.is_ascii_alphabetic(),
            _ => c.is_ascii_digit(),
        })
}

/// Check whether `code` is a known ISO 4217 currency code.
pub fn is_known_currency_code(code: &str) -> bool {
    CURRENCY_CODES.binary_search(&code).is_ok()
}

/// ISO 4217 codes accepted in Divisa. Sorted for binary search.
static CURRENCY_CODES: &[&str] = &[
    "AED", "AUD", "BAM", "BGN", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "EGP", "EUR", "GBP",
    "HKD", "HUF", "ILS", "INR", "ISK", "JPY", "KRW", "MAD", "MXN", "NOK", "NZD", "PLN", "QAR",
    "RON", "RSD", "RUB", "SAR", "SEK", "SGD", "THB", "TND", "TRY", "UAH", "USD", "ZAR",
];
