use rust_decimal::{Decimal, RoundingStrategy};

use super::codes::*;
use super::error::FatturaError;
use super::types::*;

/// Recipient code used in B2B transmissions when the recipient is reached
/// through PEC or its own channel registered with SdI.
pub const DEFAULT_RECIPIENT_CODE: &str = "0000000";

/// Body under construction. Committed once both general data and
/// goods/services data are present.
#[derive(Debug, Clone, Default)]
struct PendingBody {
    general: Option<GeneralData>,
    goods_services: Option<GoodsServices>,
    vehicle: Option<VehicleData>,
    payments: Vec<PaymentData>,
    attachments: Vec<Attachment>,
}

impl PendingBody {
    fn is_complete(&self) -> bool {
        self.general.is_some() && self.goods_services.is_some()
    }

    fn is_empty(&self) -> bool {
        self.general.is_none()
            && self.goods_services.is_none()
            && self.vehicle.is_none()
            && self.payments.is_empty()
            && self.attachments.is_empty()
    }

    fn into_body(self) -> Option<Body> {
        Some(Body {
            general: self.general?,
            goods_services: self.goods_services?,
            vehicle: self.vehicle,
            payments: self.payments,
            attachments: self.attachments,
        })
    }
}

/// Builder for FatturaPA documents.
///
/// Header parts are set once; body parts accumulate into a pending body
/// that is committed by [`new_body`](Self::new_body) or by `build()`.
///
/// ```
/// use fattura::core::*;
/// use rust_decimal_macros::dec;
///
/// let document = FatturaBuilder::new()
///     .transmission_b2b(FiscalId::new("IT", "01234567890"), "00001", None, None)
///     .sender(
///         SenderBuilder::new(
///             Name::company("ACME S.r.l."),
///             AddressBuilder::new("Via Roma 1", "00100", "Roma", "IT").build(),
///         )
///         .vat_id("IT", "01234567890")
///         .build(),
///     )
///     .recipient(
///         RecipientBuilder::new(
///             Name::company("Cliente S.p.A."),
///             AddressBuilder::new("Via Milano 2", "20100", "Milano", "IT").build(),
///         )
///         .vat_id("IT", "09876543210")
///         .build(),
///     )
///     .general_data(GeneralData {
///         document: DocumentData {
///             currency: "EUR".into(),
///             date: "2025-01-15".into(),
///             number: "1".into(),
///             ..Default::default()
///         },
///         ..Default::default()
///     })
///     .goods_services(GoodsServices {
///         lines: vec![LineItemBuilder::new(1, "Consulenza", dec!(100.00))
///             .quantity(dec!(10))
///             .build()],
///         vat_summary: vec![VatSummary::new(dec!(22), dec!(1000.00), dec!(220.00))],
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(document.bodies.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FatturaBuilder {
    version: SchemaVersion,
    transmission: Option<TransmissionData>,
    sender: Option<Sender>,
    fiscal_representative: Option<FiscalRepresentative>,
    recipient: Option<Recipient>,
    third_party: Option<ThirdPartyIntermediary>,
    emitter_role: Option<EmitterRole>,
    bodies: Vec<Body>,
    pending: PendingBody,
}

impl FatturaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: SchemaVersion) -> Self {
        self.version = version;
        self
    }

    pub fn transmission(mut self, data: TransmissionData) -> Self {
        self.transmission = Some(data);
        self
    }

    /// B2B transmission (FPR12). Without an explicit recipient code the
    /// generic code "0000000" is used.
    pub fn transmission_b2b(
        mut self,
        transmitter: FiscalId,
        sequence_id: impl Into<String>,
        recipient_code: Option<String>,
        recipient_pec: Option<String>,
    ) -> Self {
        self.transmission = Some(TransmissionData {
            transmitter_id: transmitter,
            sequence_id: sequence_id.into(),
            format: TransmissionFormat::Private,
            recipient_code: recipient_code.unwrap_or_else(|| DEFAULT_RECIPIENT_CODE.to_string()),
            transmitter_contact: None,
            recipient_pec,
        });
        self
    }

    /// Public administration transmission (FPA12) to a 6-character office code.
    pub fn transmission_pa(
        mut self,
        transmitter: FiscalId,
        sequence_id: impl Into<String>,
        recipient_code: impl Into<String>,
    ) -> Self {
        self.transmission = Some(TransmissionData {
            transmitter_id: transmitter,
            sequence_id: sequence_id.into(),
            format: TransmissionFormat::PublicAdministration,
            recipient_code: recipient_code.into(),
            transmitter_contact: None,
            recipient_pec: None,
        });
        self
    }

    pub fn sender(mut self, sender: Sender) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn fiscal_representative(mut self, representative: FiscalRepresentative) -> Self {
        self.fiscal_representative = Some(representative);
        self
    }

    pub fn recipient(mut self, recipient: Recipient) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn third_party(mut self, third_party: ThirdPartyIntermediary) -> Self {
        self.third_party = Some(third_party);
        self
    }

    pub fn emitter_role(mut self, role: EmitterRole) -> Self {
        self.emitter_role = Some(role);
        self
    }

    pub fn general_data(mut self, general: GeneralData) -> Self {
        self.pending.general = Some(general);
        self
    }

    pub fn goods_services(mut self, goods_services: GoodsServices) -> Self {
        self.pending.goods_services = Some(goods_services);
        self
    }

    pub fn vehicle(mut self, vehicle: VehicleData) -> Self {
        self.pending.vehicle = Some(vehicle);
        self
    }

    /// Replace the payment blocks of the pending body.
    pub fn payments(mut self, payments: Vec<PaymentData>) -> Self {
        self.pending.payments = payments;
        self
    }

    pub fn add_payment(mut self, payment: PaymentData) -> Self {
        self.pending.payments.push(payment);
        self
    }

    /// Replace the attachments of the pending body.
    pub fn attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.pending.attachments = attachments;
        self
    }

    pub fn add_attachment(mut self, attachment: Attachment) -> Self {
        self.pending.attachments.push(attachment);
        self
    }

    /// Commit the pending body if it has both general and goods/services
    /// data. An incomplete pending body is left untouched.
    pub fn finalize_body(mut self) -> Self {
        if self.pending.is_complete() {
            let pending = std::mem::take(&mut self.pending);
            if let Some(body) = pending.into_body() {
                self.bodies.push(body);
                tracing::debug!(bodies = self.bodies.len(), "committed invoice body");
            }
        } else {
            tracing::debug!("pending invoice body incomplete, not committed");
        }
        self
    }

    /// Commit the pending body (see [`finalize_body`](Self::finalize_body))
    /// and start the next one.
    pub fn new_body(self) -> Self {
        self.finalize_body()
    }

    /// Number of bodies committed so far.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Build the document.
    ///
    /// Preconditions are checked in a fixed order: transmission data,
    /// sender, recipient, at least one body.
    pub fn build(self) -> Result<Document, FatturaError> {
        let mut builder = self.finalize_body();
        if !builder.pending.is_empty() {
            tracing::warn!(
                has_general = builder.pending.general.is_some(),
                has_goods_services = builder.pending.goods_services.is_some(),
                "discarding incomplete pending invoice body"
            );
        }

        let transmission = builder
            .transmission
            .take()
            .ok_or(FatturaError::MissingTransmission)?;
        let sender = builder.sender.take().ok_or(FatturaError::MissingSender)?;
        let recipient = builder
            .recipient
            .take()
            .ok_or(FatturaError::MissingRecipient)?;
        if builder.bodies.is_empty() {
            return Err(FatturaError::MissingBody);
        }

        let document = Document {
            version: builder.version,
            header: Header {
                transmission,
                sender,
                fiscal_representative: builder.fiscal_representative,
                recipient,
                third_party: builder.third_party,
                emitter_role: builder.emitter_role,
            },
            bodies: builder.bodies,
        };
        tracing::debug!(
            version = %document.version,
            bodies = document.bodies.len(),
            "built FatturaPA document"
        );
        Ok(document)
    }

    /// Clear everything back to a freshly created builder.
    pub fn reset(self) -> Self {
        Self::default()
    }
}

/// Builder for the sender (CedentePrestatore).
pub struct SenderBuilder {
    identity: SenderIdentity,
    address: Address,
    permanent_establishment: Option<Address>,
    registry: Option<RegistryEntry>,
    contact: Option<Contact>,
    administrative_reference: Option<String>,
}

impl SenderBuilder {
    pub fn new(name: Name, address: Address) -> Self {
        Self {
            identity: SenderIdentity {
                name,
                ..SenderIdentity::default()
            },
            address,
            permanent_establishment: None,
            registry: None,
            contact: None,
            administrative_reference: None,
        }
    }

    pub fn vat_id(mut self, country: impl Into<String>, code: impl Into<String>) -> Self {
        self.identity.vat_id = Some(FiscalId::new(country, code));
        self
    }

    pub fn tax_code(mut self, code: impl Into<String>) -> Self {
        self.identity.tax_code = Some(code.into());
        self
    }

    pub fn tax_regime(mut self, regime: TaxRegime) -> Self {
        self.identity.tax_regime = regime;
        self
    }

    /// Professional register membership (albo, province, number, date).
    pub fn professional_register(
        mut self,
        register: impl Into<String>,
        province: Option<String>,
        number: Option<String>,
        date: Option<String>,
    ) -> Self {
        self.identity.professional_register = Some(register.into());
        self.identity.register_province = province;
        self.identity.register_number = number;
        self.identity.register_date = date;
        self
    }

    pub fn permanent_establishment(mut self, address: Address) -> Self {
        self.permanent_establishment = Some(address);
        self
    }

    pub fn registry(mut self, registry: RegistryEntry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn contact(
        mut self,
        phone: Option<String>,
        fax: Option<String>,
        email: Option<String>,
    ) -> Self {
        self.contact = Some(Contact { phone, fax, email });
        self
    }

    pub fn administrative_reference(mut self, reference: impl Into<String>) -> Self {
        self.administrative_reference = Some(reference.into());
        self
    }

    pub fn build(self) -> Sender {
        Sender {
            identity: self.identity,
            address: self.address,
            permanent_establishment: self.permanent_establishment,
            registry: self.registry,
            contact: self.contact,
            administrative_reference: self.administrative_reference,
        }
    }
}

/// Builder for the recipient (CessionarioCommittente).
pub struct RecipientBuilder {
    identity: PartyIdentity,
    address: Address,
    permanent_establishment: Option<Address>,
    fiscal_representative: Option<RecipientRepresentative>,
}

impl RecipientBuilder {
    pub fn new(name: Name, address: Address) -> Self {
        Self {
            identity: PartyIdentity {
                vat_id: None,
                tax_code: None,
                name,
            },
            address,
            permanent_establishment: None,
            fiscal_representative: None,
        }
    }

    pub fn vat_id(mut self, country: impl Into<String>, code: impl Into<String>) -> Self {
        self.identity.vat_id = Some(FiscalId::new(country, code));
        self
    }

    pub fn tax_code(mut self, code: impl Into<String>) -> Self {
        self.identity.tax_code = Some(code.into());
        self
    }

    pub fn permanent_establishment(mut self, address: Address) -> Self {
        self.permanent_establishment = Some(address);
        self
    }

    pub fn fiscal_representative(mut self, representative: RecipientRepresentative) -> Self {
        self.fiscal_representative = Some(representative);
        self
    }

    pub fn build(self) -> Recipient {
        Recipient {
            identity: self.identity,
            address: self.address,
            permanent_establishment: self.permanent_establishment,
            fiscal_representative: self.fiscal_representative,
        }
    }
}

/// Builder for Address.
pub struct AddressBuilder {
    street: String,
    street_number: Option<String>,
    postal_code: String,
    city: String,
    province: Option<String>,
    country: String,
}

impl AddressBuilder {
    pub fn new(
        street: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            street_number: None,
            postal_code: postal_code.into(),
            city: city.into(),
            province: None,
            country: country.into(),
        }
    }

    pub fn street_number(mut self, number: impl Into<String>) -> Self {
        self.street_number = Some(number.into());
        self
    }

    pub fn province(mut self, province: impl Into<String>) -> Self {
        self.province = Some(province.into());
        self
    }

    pub fn build(self) -> Address {
        Address {
            street: self.street,
            street_number: self.street_number,
            postal_code: self.postal_code,
            city: self.city,
            province: self.province,
            country: self.country,
        }
    }
}

/// Builder for LineItem (DettaglioLinee).
///
/// Defaults to the 22% ordinary rate. Unless set explicitly, the line
/// total is `quantity × unit_price` (quantity 1 when absent), rounded to
/// cents half away from zero.
pub struct LineItemBuilder {
    number: u32,
    description: String,
    unit_price: Decimal,
    quantity: Option<Decimal>,
    unit: Option<String>,
    kind: Option<SupplyKind>,
    article_codes: Vec<ArticleCode>,
    period: Option<(String, String)>,
    adjustments: Vec<Adjustment>,
    total_price: Option<Decimal>,
    vat_rate: Decimal,
    withholding: bool,
    nature: Option<Nature>,
    administrative_reference: Option<String>,
    other_data: Vec<ManagementData>,
}

impl LineItemBuilder {
    pub fn new(number: u32, description: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            number,
            description: description.into(),
            unit_price,
            quantity: None,
            unit: None,
            kind: None,
            article_codes: Vec::new(),
            period: None,
            adjustments: Vec::new(),
            total_price: None,
            vat_rate: Decimal::new(22, 0),
            withholding: false,
            nature: None,
            administrative_reference: None,
            other_data: Vec::new(),
        }
    }

    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn kind(mut self, kind: SupplyKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn article_code(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.article_codes.push(ArticleCode {
            kind: kind.into(),
            value: value.into(),
        });
        self
    }

    pub fn period(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.period = Some((start.into(), end.into()));
        self
    }

    pub fn add_adjustment(mut self, adjustment: Adjustment) -> Self {
        self.adjustments.push(adjustment);
        self
    }

    pub fn total_price(mut self, total: Decimal) -> Self {
        self.total_price = Some(total);
        self
    }

    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = rate;
        self
    }

    /// Zero-rated line with its nature code.
    pub fn exempt(mut self, nature: Nature) -> Self {
        self.vat_rate = Decimal::ZERO;
        self.nature = Some(nature);
        self
    }

    pub fn withholding(mut self, subject: bool) -> Self {
        self.withholding = subject;
        self
    }

    pub fn administrative_reference(mut self, reference: impl Into<String>) -> Self {
        self.administrative_reference = Some(reference.into());
        self
    }

    pub fn other_data(mut self, data: ManagementData) -> Self {
        self.other_data.push(data);
        self
    }

    pub fn build(self) -> LineItem {
        let total_price = self.total_price.unwrap_or_else(|| {
            self.quantity
                .unwrap_or(Decimal::ONE)
                .saturating_mul(self.unit_price)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        });
        let (period_start, period_end) = match self.period {
            Some((start, end)) => (Some(start), Some(end)),
            None => (None, None),
        };
        LineItem {
            number: self.number,
            kind: self.kind,
            article_codes: self.article_codes,
            description: self.description,
            quantity: self.quantity,
            unit: self.unit,
            period_start,
            period_end,
            unit_price: self.unit_price,
            adjustments: self.adjustments,
            total_price,
            vat_rate: self.vat_rate,
            withholding: self.withholding,
            nature: self.nature,
            administrative_reference: self.administrative_reference,
            other_data: self.other_data,
        }
    }
}
