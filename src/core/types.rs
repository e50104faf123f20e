use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::codes::*;

/// FatturaElettronica: the root document.
///
/// One header shared by one or more bodies (a "lotto" when more than one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Schema version the document targets.
    pub version: SchemaVersion,
    /// 1 FatturaElettronicaHeader.
    pub header: Header,
    /// 2 FatturaElettronicaBody, in submission order.
    pub bodies: Vec<Body>,
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// 1 FatturaElettronicaHeader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// 1.1 DatiTrasmissione.
    pub transmission: TransmissionData,
    /// 1.2 CedentePrestatore.
    pub sender: Sender,
    /// 1.3 RappresentanteFiscale.
    pub fiscal_representative: Option<FiscalRepresentative>,
    /// 1.4 CessionarioCommittente.
    pub recipient: Recipient,
    /// 1.5 TerzoIntermediarioOSoggettoEmittente.
    pub third_party: Option<ThirdPartyIntermediary>,
    /// 1.6 SoggettoEmittente.
    pub emitter_role: Option<EmitterRole>,
}

/// 1.1 DatiTrasmissione.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransmissionData {
    /// 1.1.1 IdTrasmittente.
    pub transmitter_id: FiscalId,
    /// 1.1.2 ProgressivoInvio (max 10 characters).
    pub sequence_id: String,
    /// 1.1.3 FormatoTrasmissione.
    pub format: TransmissionFormat,
    /// 1.1.4 CodiceDestinatario (6 chars for PA, 7 for B2B).
    pub recipient_code: String,
    /// 1.1.5 ContattiTrasmittente.
    pub transmitter_contact: Option<Contact>,
    /// 1.1.6 PECDestinatario.
    pub recipient_pec: Option<String>,
}

/// Country + identifier pair (IdFiscaleIVA, IdTrasmittente).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalId {
    /// IdPaese (ISO 3166-1 alpha-2).
    pub country: String,
    /// IdCodice.
    pub code: String,
}

impl FiscalId {
    pub fn new(country: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            code: code.into(),
        }
    }
}

/// Anagrafica: a company denomination or a person's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    /// Denominazione.
    pub denomination: Option<String>,
    /// Nome.
    pub first_name: Option<String>,
    /// Cognome.
    pub last_name: Option<String>,
    /// Titolo.
    pub title: Option<String>,
    /// CodEORI.
    pub eori_code: Option<String>,
}

impl Name {
    /// Name of a legal entity.
    pub fn company(denomination: impl Into<String>) -> Self {
        Self {
            denomination: Some(denomination.into()),
            ..Self::default()
        }
    }

    /// Name of a natural person.
    pub fn person(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            ..Self::default()
        }
    }
}

/// Indirizzo (Sede, StabileOrganizzazione, IndirizzoResa).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Indirizzo.
    pub street: String,
    /// NumeroCivico.
    pub street_number: Option<String>,
    /// CAP (5 digits for Italy).
    pub postal_code: String,
    /// Comune.
    pub city: String,
    /// Provincia (2-letter abbreviation).
    pub province: Option<String>,
    /// Nazione (ISO 3166-1 alpha-2).
    pub country: String,
}

/// Contatti.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Telefono.
    pub phone: Option<String>,
    /// Fax (not part of ContattiTrasmittente).
    pub fax: Option<String>,
    /// Email.
    pub email: Option<String>,
}

/// 1.2.1 DatiAnagrafici of the sender.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SenderIdentity {
    /// 1.2.1.1 IdFiscaleIVA.
    pub vat_id: Option<FiscalId>,
    /// 1.2.1.2 CodiceFiscale.
    pub tax_code: Option<String>,
    /// 1.2.1.3 Anagrafica.
    pub name: Name,
    /// 1.2.1.4 AlboProfessionale.
    pub professional_register: Option<String>,
    /// 1.2.1.5 ProvinciaAlbo.
    pub register_province: Option<String>,
    /// 1.2.1.6 NumeroIscrizioneAlbo.
    pub register_number: Option<String>,
    /// 1.2.1.7 DataIscrizioneAlbo.
    pub register_date: Option<String>,
    /// 1.2.1.8 RegimeFiscale.
    pub tax_regime: TaxRegime,
}

/// 1.2.4 IscrizioneREA.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Ufficio (province of the chamber of commerce).
    pub office: String,
    /// NumeroREA.
    pub number: String,
    /// CapitaleSociale.
    pub share_capital: Option<Decimal>,
    /// SocioUnico.
    pub shareholding: Option<Shareholding>,
    /// StatoLiquidazione.
    pub liquidation: LiquidationStatus,
}

/// 1.2 CedentePrestatore: the seller / service provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sender {
    pub identity: SenderIdentity,
    /// 1.2.2 Sede.
    pub address: Address,
    /// 1.2.3 StabileOrganizzazione.
    pub permanent_establishment: Option<Address>,
    /// 1.2.4 IscrizioneREA.
    pub registry: Option<RegistryEntry>,
    /// 1.2.5 Contatti.
    pub contact: Option<Contact>,
    /// 1.2.6 RiferimentoAmministrazione.
    pub administrative_reference: Option<String>,
}

/// DatiAnagrafici shared by recipient, third party and carrier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyIdentity {
    pub vat_id: Option<FiscalId>,
    pub tax_code: Option<String>,
    pub name: Name,
}

/// 1.3 RappresentanteFiscale of the sender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalRepresentative {
    pub vat_id: FiscalId,
    pub tax_code: Option<String>,
    pub name: Name,
}

/// 1.4.4 RappresentanteFiscale of the recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientRepresentative {
    pub vat_id: FiscalId,
    pub denomination: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// 1.4 CessionarioCommittente: the buyer / client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    /// 1.4.1 DatiAnagrafici.
    pub identity: PartyIdentity,
    /// 1.4.2 Sede.
    pub address: Address,
    /// 1.4.3 StabileOrganizzazione.
    pub permanent_establishment: Option<Address>,
    /// 1.4.4 RappresentanteFiscale.
    pub fiscal_representative: Option<RecipientRepresentative>,
}

/// 1.5 TerzoIntermediarioOSoggettoEmittente.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPartyIntermediary {
    pub identity: PartyIdentity,
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

/// 2 FatturaElettronicaBody.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// 2.1 DatiGenerali.
    pub general: GeneralData,
    /// 2.2 DatiBeniServizi.
    pub goods_services: GoodsServices,
    /// 2.3 DatiVeicoli.
    pub vehicle: Option<VehicleData>,
    /// 2.4 DatiPagamento.
    #[serde(default)]
    pub payments: Vec<PaymentData>,
    /// 2.5 Allegati.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// 2.1 DatiGenerali.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralData {
    /// 2.1.1 DatiGeneraliDocumento.
    pub document: DocumentData,
    /// 2.1.2 DatiOrdineAcquisto.
    #[serde(default)]
    pub purchase_orders: Vec<RelatedDocument>,
    /// 2.1.3 DatiContratto.
    #[serde(default)]
    pub contracts: Vec<RelatedDocument>,
    /// 2.1.4 DatiConvenzione.
    #[serde(default)]
    pub agreements: Vec<RelatedDocument>,
    /// 2.1.5 DatiRicezione.
    #[serde(default)]
    pub receipts: Vec<RelatedDocument>,
    /// 2.1.6 DatiFattureCollegate.
    #[serde(default)]
    pub linked_invoices: Vec<RelatedDocument>,
    /// 2.1.7 DatiSAL.
    #[serde(default)]
    pub progress_reports: Vec<ProgressReport>,
    /// 2.1.8 DatiDDT.
    #[serde(default)]
    pub delivery_notes: Vec<DeliveryNote>,
    /// 2.1.9 DatiTrasporto.
    pub transport: Option<TransportData>,
    /// 2.1.10 FatturaPrincipale.
    pub main_invoice: Option<MainInvoice>,
}

/// 2.1.1 DatiGeneraliDocumento.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentData {
    /// 2.1.1.1 TipoDocumento.
    pub document_type: DocumentType,
    /// 2.1.1.2 Divisa (ISO 4217).
    pub currency: String,
    /// 2.1.1.3 Data (YYYY-MM-DD).
    pub date: String,
    /// 2.1.1.4 Numero.
    pub number: String,
    /// 2.1.1.5 DatiRitenuta.
    #[serde(default)]
    pub withholdings: Vec<Withholding>,
    /// 2.1.1.6 DatiBollo.
    pub stamp_duty: Option<StampDuty>,
    /// 2.1.1.7 DatiCassaPrevidenziale.
    #[serde(default)]
    pub welfare_funds: Vec<WelfareFund>,
    /// 2.1.1.8 ScontoMaggiorazione.
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
    /// 2.1.1.9 ImportoTotaleDocumento.
    pub total_amount: Option<Decimal>,
    /// 2.1.1.10 Arrotondamento.
    pub rounding: Option<Decimal>,
    /// 2.1.1.11 Causale (max 200 characters each).
    #[serde(default)]
    pub reasons: Vec<String>,
    /// 2.1.1.12 Art73.
    #[serde(default)]
    pub art73: bool,
}

/// 2.1.1.5 DatiRitenuta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withholding {
    pub kind: WithholdingType,
    pub amount: Decimal,
    pub rate: Decimal,
    pub payment_reason: PaymentReason,
}

/// 2.1.1.6 DatiBollo. BolloVirtuale is always "SI".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampDuty {
    pub amount: Decimal,
}

/// 2.1.1.7 DatiCassaPrevidenziale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WelfareFund {
    pub kind: FundType,
    /// AlCassa: contribution rate.
    pub rate: Decimal,
    /// ImportoContributoCassa.
    pub contribution: Decimal,
    /// ImponibileCassa.
    pub taxable: Option<Decimal>,
    /// AliquotaIVA applied to the contribution.
    pub vat_rate: Decimal,
    /// Ritenuta: contribution subject to withholding.
    #[serde(default)]
    pub withholding: bool,
    pub nature: Option<Nature>,
    pub administrative_reference: Option<String>,
}

/// ScontoMaggiorazione.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub kind: AdjustmentType,
    pub percentage: Option<Decimal>,
    pub amount: Option<Decimal>,
}

/// 2.1.2 – 2.1.6 reference to an order, contract, agreement, receipt or
/// linked invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedDocument {
    /// RiferimentoNumeroLinea.
    #[serde(default)]
    pub line_refs: Vec<u32>,
    /// IdDocumento.
    pub document_id: String,
    pub date: Option<String>,
    /// NumItem.
    pub item_number: Option<String>,
    /// CodiceCommessaConvenzione.
    pub order_code: Option<String>,
    /// CodiceCUP.
    pub cup_code: Option<String>,
    /// CodiceCIG.
    pub cig_code: Option<String>,
}

/// 2.1.7 DatiSAL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub phase: u32,
}

/// 2.1.8 DatiDDT.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryNote {
    pub number: String,
    pub date: String,
    #[serde(default)]
    pub line_refs: Vec<u32>,
}

/// 2.1.9 DatiTrasporto.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportData {
    /// DatiAnagraficiVettore.
    pub carrier: Option<Carrier>,
    pub means: Option<String>,
    pub reason: Option<String>,
    /// NumeroColli.
    pub packages: Option<u32>,
    pub description: Option<String>,
    pub weight_unit: Option<String>,
    pub gross_weight: Option<Decimal>,
    pub net_weight: Option<Decimal>,
    /// DataOraRitiro.
    pub pickup_at: Option<String>,
    pub start_date: Option<String>,
    /// TipoResa (Incoterms code).
    pub delivery_terms: Option<String>,
    pub delivery_address: Option<Address>,
    /// DataOraConsegna.
    pub delivered_at: Option<String>,
}

/// 2.1.9.1 DatiAnagraficiVettore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    pub identity: PartyIdentity,
    pub license_number: Option<String>,
}

/// 2.1.10 FatturaPrincipale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainInvoice {
    pub number: String,
    pub date: String,
}

/// 2.2 DatiBeniServizi.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoodsServices {
    /// 2.2.1 DettaglioLinee.
    pub lines: Vec<LineItem>,
    /// 2.2.2 DatiRiepilogo.
    pub vat_summary: Vec<VatSummary>,
}

/// 2.2.1 DettaglioLinee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// 2.2.1.1 NumeroLinea (unique within the body, starting at 1).
    pub number: u32,
    /// 2.2.1.2 TipoCessionePrestazione.
    pub kind: Option<SupplyKind>,
    /// 2.2.1.3 CodiceArticolo.
    #[serde(default)]
    pub article_codes: Vec<ArticleCode>,
    /// 2.2.1.4 Descrizione.
    pub description: String,
    /// 2.2.1.5 Quantita.
    pub quantity: Option<Decimal>,
    /// 2.2.1.6 UnitaMisura.
    pub unit: Option<String>,
    /// 2.2.1.7 DataInizioPeriodo.
    pub period_start: Option<String>,
    /// 2.2.1.8 DataFinePeriodo.
    pub period_end: Option<String>,
    /// 2.2.1.9 PrezzoUnitario.
    pub unit_price: Decimal,
    /// 2.2.1.10 ScontoMaggiorazione.
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
    /// 2.2.1.11 PrezzoTotale.
    pub total_price: Decimal,
    /// 2.2.1.12 AliquotaIVA (percentage).
    pub vat_rate: Decimal,
    /// 2.2.1.13 Ritenuta.
    #[serde(default)]
    pub withholding: bool,
    /// 2.2.1.14 Natura (required when the rate is zero).
    pub nature: Option<Nature>,
    /// 2.2.1.15 RiferimentoAmministrazione.
    pub administrative_reference: Option<String>,
    /// 2.2.1.16 AltriDatiGestionali.
    #[serde(default)]
    pub other_data: Vec<ManagementData>,
}

/// 2.2.1.3 CodiceArticolo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleCode {
    /// CodiceTipo (e.g. "EAN", "SKU").
    pub kind: String,
    pub value: String,
}

/// 2.2.1.16 AltriDatiGestionali.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagementData {
    /// TipoDato.
    pub data_type: String,
    pub text: Option<String>,
    pub number: Option<Decimal>,
    pub date: Option<String>,
}

/// 2.2.2 DatiRiepilogo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VatSummary {
    /// 2.2.2.1 AliquotaIVA.
    pub vat_rate: Decimal,
    /// 2.2.2.2 Natura.
    pub nature: Option<Nature>,
    /// 2.2.2.3 SpeseAccessorie.
    pub ancillary_costs: Option<Decimal>,
    /// 2.2.2.4 Arrotondamento.
    pub rounding: Option<Decimal>,
    /// 2.2.2.5 ImponibileImporto.
    pub taxable_amount: Decimal,
    /// 2.2.2.6 Imposta.
    pub tax: Decimal,
    /// 2.2.2.7 EsigibilitaIVA.
    pub chargeability: Option<VatChargeability>,
    /// 2.2.2.8 RiferimentoNormativo.
    pub legal_reference: Option<String>,
}

impl VatSummary {
    pub fn new(vat_rate: Decimal, taxable_amount: Decimal, tax: Decimal) -> Self {
        Self {
            vat_rate,
            taxable_amount,
            tax,
            ..Self::default()
        }
    }

    /// Zero-rated summary with its nature and legal reference.
    pub fn exempt(
        nature: Nature,
        taxable_amount: Decimal,
        legal_reference: impl Into<String>,
    ) -> Self {
        Self {
            nature: Some(nature),
            taxable_amount,
            legal_reference: Some(legal_reference.into()),
            ..Self::default()
        }
    }
}

/// 2.3 DatiVeicoli.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleData {
    /// Data of first registration.
    pub date: String,
    /// TotalePercorso.
    pub total_distance: String,
}

/// 2.4 DatiPagamento.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentData {
    /// 2.4.1 CondizioniPagamento.
    pub terms: PaymentTerms,
    /// 2.4.2 DettaglioPagamento.
    pub details: Vec<PaymentDetail>,
}

/// 2.4.2 DettaglioPagamento.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetail {
    pub beneficiary: Option<String>,
    pub method: PaymentMethod,
    /// DataRiferimentoTerminiPagamento.
    pub terms_reference_date: Option<String>,
    /// GiorniTerminiPagamento.
    pub terms_days: Option<u32>,
    /// DataScadenzaPagamento.
    pub due_date: Option<String>,
    /// ImportoPagamento.
    pub amount: Decimal,
    pub post_office_code: Option<String>,
    /// CognomeQuietanzante.
    pub payee_last_name: Option<String>,
    /// NomeQuietanzante.
    pub payee_first_name: Option<String>,
    /// CFQuietanzante.
    pub payee_tax_code: Option<String>,
    /// TitoloQuietanzante.
    pub payee_title: Option<String>,
    /// IstitutoFinanziario.
    pub bank_name: Option<String>,
    pub iban: Option<String>,
    pub abi: Option<String>,
    pub cab: Option<String>,
    pub bic: Option<String>,
    /// ScontoPagamentoAnticipato.
    pub early_payment_discount: Option<Decimal>,
    /// DataLimitePagamentoAnticipato.
    pub early_payment_deadline: Option<String>,
    /// PenalitaPagamentiRitardati.
    pub late_payment_penalty: Option<Decimal>,
    /// DataDecorrenzaPenale.
    pub penalty_start_date: Option<String>,
    pub payment_code: Option<String>,
}

/// 2.5 Allegati.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// NomeAttachment.
    pub name: String,
    /// AlgoritmoCompressione (e.g. "ZIP").
    pub compression: Option<String>,
    /// FormatoAttachment (e.g. "PDF").
    pub format: Option<String>,
    pub description: Option<String>,
    /// Base64-encoded content.
    pub data: String,
}
