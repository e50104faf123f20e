use serde::{Deserialize, Serialize};

use super::xml_utils::{XmlResult, XmlWriter};
use super::{FATTURAPA_NAMESPACE, ROOT_ELEMENT, SCHEMA_LOCATION, XSI_NAMESPACE};
use crate::core::*;

/// Output options for [`to_xml_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializeOptions {
    /// Emit `xsi:schemaLocation` on the root element.
    pub include_schema_location: bool,
    /// Indent nested elements on separate lines.
    pub pretty: bool,
    /// Spaces per nesting level when `pretty`.
    pub indent: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            include_schema_location: true,
            pretty: true,
            indent: 2,
        }
    }
}

/// Serialize a document to FatturaPA XML with default options.
pub fn to_xml(document: &Document) -> XmlResult {
    to_xml_with(document, &SerializeOptions::default())
}

/// Serialize a document to FatturaPA XML.
///
/// Elements are written in schema order; absent optional fields produce
/// no element. The document is not re-validated.
pub fn to_xml_with(document: &Document, options: &SerializeOptions) -> XmlResult {
    let header = &document.header;
    let mut w = XmlWriter::new(options.pretty, options.indent);
    w.declaration()?;

    let format = header.transmission.format.code();
    let mut attrs = vec![
        ("xmlns:p", FATTURAPA_NAMESPACE),
        ("xmlns:xsi", XSI_NAMESPACE),
        ("versione", format),
    ];
    if options.include_schema_location {
        attrs.push(("xsi:schemaLocation", SCHEMA_LOCATION));
    }
    w.start_element_with_attrs(ROOT_ELEMENT, &attrs)?;

    write_header(&mut w, header)?;
    for body in &document.bodies {
        write_body(&mut w, body)?;
    }

    w.end_element(ROOT_ELEMENT)?;
    let xml = w.into_string()?;
    tracing::debug!(
        format,
        bodies = document.bodies.len(),
        bytes = xml.len(),
        "serialized FatturaPA document"
    );
    Ok(xml)
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

fn write_header(w: &mut XmlWriter, header: &Header) -> Result<(), FatturaError> {
    w.start_element("FatturaElettronicaHeader")?;

    write_transmission(w, &header.transmission)?;
    write_sender(w, &header.sender)?;

    if let Some(rep) = &header.fiscal_representative {
        w.start_element("RappresentanteFiscale")?;
        w.start_element("DatiAnagrafici")?;
        write_fiscal_id(w, "IdFiscaleIVA", &rep.vat_id)?;
        w.opt_text("CodiceFiscale", rep.tax_code.as_deref())?;
        write_name(w, &rep.name)?;
        w.end_element("DatiAnagrafici")?;
        w.end_element("RappresentanteFiscale")?;
    }

    write_recipient(w, &header.recipient)?;

    if let Some(third_party) = &header.third_party {
        w.start_element("TerzoIntermediarioOSoggettoEmittente")?;
        write_party_identity(w, &third_party.identity)?;
        w.end_element("TerzoIntermediarioOSoggettoEmittente")?;
    }

    if let Some(role) = header.emitter_role {
        w.text_element("SoggettoEmittente", role.code())?;
    }

    w.end_element("FatturaElettronicaHeader")?;
    Ok(())
}

fn write_transmission(w: &mut XmlWriter, data: &TransmissionData) -> Result<(), FatturaError> {
    w.start_element("DatiTrasmissione")?;
    write_fiscal_id(w, "IdTrasmittente", &data.transmitter_id)?;
    w.text_element("ProgressivoInvio", &data.sequence_id)?;
    w.text_element("FormatoTrasmissione", data.format.code())?;
    w.text_element("CodiceDestinatario", &data.recipient_code)?;
    if let Some(contact) = &data.transmitter_contact {
        w.start_element("ContattiTrasmittente")?;
        w.opt_text("Telefono", contact.phone.as_deref())?;
        w.opt_text("Email", contact.email.as_deref())?;
        w.end_element("ContattiTrasmittente")?;
    }
    w.opt_text("PECDestinatario", data.recipient_pec.as_deref())?;
    w.end_element("DatiTrasmissione")?;
    Ok(())
}

fn write_sender(w: &mut XmlWriter, sender: &Sender) -> Result<(), FatturaError> {
    let identity = &sender.identity;
    w.start_element("CedentePrestatore")?;

    w.start_element("DatiAnagrafici")?;
    if let Some(vat_id) = &identity.vat_id {
        write_fiscal_id(w, "IdFiscaleIVA", vat_id)?;
    }
    w.opt_text("CodiceFiscale", identity.tax_code.as_deref())?;
    write_name(w, &identity.name)?;
    w.opt_text("AlboProfessionale", identity.professional_register.as_deref())?;
    w.opt_text("ProvinciaAlbo", identity.register_province.as_deref())?;
    w.opt_text("NumeroIscrizioneAlbo", identity.register_number.as_deref())?;
    w.opt_text("DataIscrizioneAlbo", identity.register_date.as_deref())?;
    w.text_element("RegimeFiscale", identity.tax_regime.code())?;
    w.end_element("DatiAnagrafici")?;

    write_address(w, "Sede", &sender.address)?;
    if let Some(address) = &sender.permanent_establishment {
        write_address(w, "StabileOrganizzazione", address)?;
    }

    if let Some(registry) = &sender.registry {
        w.start_element("IscrizioneREA")?;
        w.text_element("Ufficio", &registry.office)?;
        w.text_element("NumeroREA", &registry.number)?;
        w.opt_amount("CapitaleSociale", registry.share_capital)?;
        if let Some(shareholding) = registry.shareholding {
            w.text_element("SocioUnico", shareholding.code())?;
        }
        w.text_element("StatoLiquidazione", registry.liquidation.code())?;
        w.end_element("IscrizioneREA")?;
    }

    if let Some(contact) = &sender.contact {
        w.start_element("Contatti")?;
        w.opt_text("Telefono", contact.phone.as_deref())?;
        w.opt_text("Fax", contact.fax.as_deref())?;
        w.opt_text("Email", contact.email.as_deref())?;
        w.end_element("Contatti")?;
    }

    w.opt_text(
        "RiferimentoAmministrazione",
        sender.administrative_reference.as_deref(),
    )?;
    w.end_element("CedentePrestatore")?;
    Ok(())
}

fn write_recipient(w: &mut XmlWriter, recipient: &Recipient) -> Result<(), FatturaError> {
    w.start_element("CessionarioCommittente")?;
    write_party_identity(w, &recipient.identity)?;
    write_address(w, "Sede", &recipient.address)?;
    if let Some(address) = &recipient.permanent_establishment {
        write_address(w, "StabileOrganizzazione", address)?;
    }
    if let Some(rep) = &recipient.fiscal_representative {
        w.start_element("RappresentanteFiscale")?;
        write_fiscal_id(w, "IdFiscaleIVA", &rep.vat_id)?;
        w.opt_text("Denominazione", rep.denomination.as_deref())?;
        w.opt_text("Nome", rep.first_name.as_deref())?;
        w.opt_text("Cognome", rep.last_name.as_deref())?;
        w.end_element("RappresentanteFiscale")?;
    }
    w.end_element("CessionarioCommittente")?;
    Ok(())
}

/// `DatiAnagrafici` with optional VAT id and tax code.
fn write_party_identity(w: &mut XmlWriter, identity: &PartyIdentity) -> Result<(), FatturaError> {
    w.start_element("DatiAnagrafici")?;
    if let Some(vat_id) = &identity.vat_id {
        write_fiscal_id(w, "IdFiscaleIVA", vat_id)?;
    }
    w.opt_text("CodiceFiscale", identity.tax_code.as_deref())?;
    write_name(w, &identity.name)?;
    w.end_element("DatiAnagrafici")?;
    Ok(())
}

fn write_fiscal_id(w: &mut XmlWriter, name: &str, id: &FiscalId) -> Result<(), FatturaError> {
    w.start_element(name)?;
    w.text_element("IdPaese", &id.country)?;
    w.text_element("IdCodice", &id.code)?;
    w.end_element(name)?;
    Ok(())
}

fn write_name(w: &mut XmlWriter, name: &Name) -> Result<(), FatturaError> {
    w.start_element("Anagrafica")?;
    w.opt_text("Denominazione", name.denomination.as_deref())?;
    w.opt_text("Nome", name.first_name.as_deref())?;
    w.opt_text("Cognome", name.last_name.as_deref())?;
    w.opt_text("Titolo", name.title.as_deref())?;
    w.opt_text("CodEORI", name.eori_code.as_deref())?;
    w.end_element("Anagrafica")?;
    Ok(())
}

fn write_address(w: &mut XmlWriter, name: &str, address: &Address) -> Result<(), FatturaError> {
    w.start_element(name)?;
    w.text_element("Indirizzo", &address.street)?;
    w.opt_text("NumeroCivico", address.street_number.as_deref())?;
    w.text_element("CAP", &address.postal_code)?;
    w.text_element("Comune", &address.city)?;
    w.opt_text("Provincia", address.province.as_deref())?;
    w.text_element("Nazione", &address.country)?;
    w.end_element(name)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

fn write_body(w: &mut XmlWriter, body: &Body) -> Result<(), FatturaError> {
    w.start_element("FatturaElettronicaBody")?;

    write_general(w, &body.general)?;
    write_goods_services(w, &body.goods_services)?;

    if let Some(vehicle) = &body.vehicle {
        w.start_element("DatiVeicoli")?;
        w.text_element("Data", &vehicle.date)?;
        w.text_element("TotalePercorso", &vehicle.total_distance)?;
        w.end_element("DatiVeicoli")?;
    }

    for payment in &body.payments {
        write_payment(w, payment)?;
    }

    for attachment in &body.attachments {
        w.start_element("Allegati")?;
        w.text_element("NomeAttachment", &attachment.name)?;
        w.opt_text("AlgoritmoCompressione", attachment.compression.as_deref())?;
        w.opt_text("FormatoAttachment", attachment.format.as_deref())?;
        w.opt_text("DescrizioneAttachment", attachment.description.as_deref())?;
        w.text_element("Attachment", &attachment.data)?;
        w.end_element("Allegati")?;
    }

    w.end_element("FatturaElettronicaBody")?;
    Ok(())
}

fn write_general(w: &mut XmlWriter, general: &GeneralData) -> Result<(), FatturaError> {
    let doc = &general.document;
    w.start_element("DatiGenerali")?;

    w.start_element("DatiGeneraliDocumento")?;
    w.text_element("TipoDocumento", doc.document_type.code())?;
    w.text_element("Divisa", &doc.currency)?;
    w.text_element("Data", &doc.date)?;
    w.text_element("Numero", &doc.number)?;

    for withholding in &doc.withholdings {
        w.start_element("DatiRitenuta")?;
        w.text_element("TipoRitenuta", withholding.kind.code())?;
        w.amount("ImportoRitenuta", withholding.amount)?;
        w.amount("AliquotaRitenuta", withholding.rate)?;
        w.text_element("CausalePagamento", withholding.payment_reason.code())?;
        w.end_element("DatiRitenuta")?;
    }

    if let Some(stamp) = &doc.stamp_duty {
        w.start_element("DatiBollo")?;
        w.text_element("BolloVirtuale", "SI")?;
        w.amount("ImportoBollo", stamp.amount)?;
        w.end_element("DatiBollo")?;
    }

    for fund in &doc.welfare_funds {
        w.start_element("DatiCassaPrevidenziale")?;
        w.text_element("TipoCassa", fund.kind.code())?;
        w.amount("AlCassa", fund.rate)?;
        w.amount("ImportoContributoCassa", fund.contribution)?;
        w.opt_amount("ImponibileCassa", fund.taxable)?;
        w.amount("AliquotaIVA", fund.vat_rate)?;
        w.flag("Ritenuta", fund.withholding)?;
        if let Some(nature) = fund.nature {
            w.text_element("Natura", nature.code())?;
        }
        w.opt_text(
            "RiferimentoAmministrazione",
            fund.administrative_reference.as_deref(),
        )?;
        w.end_element("DatiCassaPrevidenziale")?;
    }

    for adjustment in &doc.adjustments {
        write_adjustment(w, adjustment)?;
    }
    w.opt_amount("ImportoTotaleDocumento", doc.total_amount)?;
    w.opt_amount("Arrotondamento", doc.rounding)?;
    for reason in &doc.reasons {
        w.text_element("Causale", reason)?;
    }
    w.flag("Art73", doc.art73)?;
    w.end_element("DatiGeneraliDocumento")?;

    for (name, list) in [
        ("DatiOrdineAcquisto", &general.purchase_orders),
        ("DatiContratto", &general.contracts),
        ("DatiConvenzione", &general.agreements),
        ("DatiRicezione", &general.receipts),
        ("DatiFattureCollegate", &general.linked_invoices),
    ] {
        for related in list {
            write_related(w, name, related)?;
        }
    }

    for report in &general.progress_reports {
        w.start_element("DatiSAL")?;
        w.text_element("RiferimentoFase", &report.phase.to_string())?;
        w.end_element("DatiSAL")?;
    }

    for note in &general.delivery_notes {
        w.start_element("DatiDDT")?;
        w.text_element("NumeroDDT", &note.number)?;
        w.text_element("DataDDT", &note.date)?;
        for line in &note.line_refs {
            w.text_element("RiferimentoNumeroLinea", &line.to_string())?;
        }
        w.end_element("DatiDDT")?;
    }

    if let Some(transport) = &general.transport {
        write_transport(w, transport)?;
    }

    if let Some(main) = &general.main_invoice {
        w.start_element("FatturaPrincipale")?;
        w.text_element("NumeroFatturaPrincipale", &main.number)?;
        w.text_element("DataFatturaPrincipale", &main.date)?;
        w.end_element("FatturaPrincipale")?;
    }

    w.end_element("DatiGenerali")?;
    Ok(())
}

fn write_adjustment(w: &mut XmlWriter, adjustment: &Adjustment) -> Result<(), FatturaError> {
    w.start_element("ScontoMaggiorazione")?;
    w.text_element("Tipo", adjustment.kind.code())?;
    w.opt_amount("Percentuale", adjustment.percentage)?;
    w.opt_amount("Importo", adjustment.amount)?;
    w.end_element("ScontoMaggiorazione")?;
    Ok(())
}

fn write_related(
    w: &mut XmlWriter,
    name: &str,
    related: &RelatedDocument,
) -> Result<(), FatturaError> {
    w.start_element(name)?;
    for line in &related.line_refs {
        w.text_element("RiferimentoNumeroLinea", &line.to_string())?;
    }
    w.text_element("IdDocumento", &related.document_id)?;
    w.opt_text("Data", related.date.as_deref())?;
    w.opt_text("NumItem", related.item_number.as_deref())?;
    w.opt_text("CodiceCommessaConvenzione", related.order_code.as_deref())?;
    w.opt_text("CodiceCUP", related.cup_code.as_deref())?;
    w.opt_text("CodiceCIG", related.cig_code.as_deref())?;
    w.end_element(name)?;
    Ok(())
}

fn write_transport(w: &mut XmlWriter, transport: &TransportData) -> Result<(), FatturaError> {
    w.start_element("DatiTrasporto")?;
    if let Some(carrier) = &transport.carrier {
        w.start_element("DatiAnagraficiVettore")?;
        if let Some(vat_id) = &carrier.identity.vat_id {
            write_fiscal_id(w, "IdFiscaleIVA", vat_id)?;
        }
        w.opt_text("CodiceFiscale", carrier.identity.tax_code.as_deref())?;
        write_name(w, &carrier.identity.name)?;
        w.opt_text("NumeroLicenzaGuida", carrier.license_number.as_deref())?;
        w.end_element("DatiAnagraficiVettore")?;
    }
    w.opt_text("MezzoTrasporto", transport.means.as_deref())?;
    w.opt_text("CausaleTrasporto", transport.reason.as_deref())?;
    if let Some(packages) = transport.packages {
        w.text_element("NumeroColli", &packages.to_string())?;
    }
    w.opt_text("Descrizione", transport.description.as_deref())?;
    w.opt_text("UnitaMisuraPeso", transport.weight_unit.as_deref())?;
    w.opt_amount("PesoLordo", transport.gross_weight)?;
    w.opt_amount("PesoNetto", transport.net_weight)?;
    w.opt_text("DataOraRitiro", transport.pickup_at.as_deref())?;
    w.opt_text("DataInizioTrasporto", transport.start_date.as_deref())?;
    w.opt_text("TipoResa", transport.delivery_terms.as_deref())?;
    if let Some(address) = &transport.delivery_address {
        write_address(w, "IndirizzoResa", address)?;
    }
    w.opt_text("DataOraConsegna", transport.delivered_at.as_deref())?;
    w.end_element("DatiTrasporto")?;
    Ok(())
}

fn write_goods_services(w: &mut XmlWriter, data: &GoodsServices) -> Result<(), FatturaError> {
    w.start_element("DatiBeniServizi")?;

    for line in &data.lines {
        w.start_element("DettaglioLinee")?;
        w.text_element("NumeroLinea", &line.number.to_string())?;
        if let Some(kind) = line.kind {
            w.text_element("TipoCessionePrestazione", kind.code())?;
        }
        for code in &line.article_codes {
            w.start_element("CodiceArticolo")?;
            w.text_element("CodiceTipo", &code.kind)?;
            w.text_element("CodiceValore", &code.value)?;
            w.end_element("CodiceArticolo")?;
        }
        w.text_element("Descrizione", &line.description)?;
        w.opt_amount("Quantita", line.quantity)?;
        w.opt_text("UnitaMisura", line.unit.as_deref())?;
        w.opt_text("DataInizioPeriodo", line.period_start.as_deref())?;
        w.opt_text("DataFinePeriodo", line.period_end.as_deref())?;
        w.amount("PrezzoUnitario", line.unit_price)?;
        for adjustment in &line.adjustments {
            write_adjustment(w, adjustment)?;
        }
        w.amount("PrezzoTotale", line.total_price)?;
        w.amount("AliquotaIVA", line.vat_rate)?;
        w.flag("Ritenuta", line.withholding)?;
        if let Some(nature) = line.nature {
            w.text_element("Natura", nature.code())?;
        }
        w.opt_text(
            "RiferimentoAmministrazione",
            line.administrative_reference.as_deref(),
        )?;
        for other in &line.other_data {
            w.start_element("AltriDatiGestionali")?;
            w.text_element("TipoDato", &other.data_type)?;
            w.opt_text("RiferimentoTesto", other.text.as_deref())?;
            w.opt_amount("RiferimentoNumero", other.number)?;
            w.opt_text("RiferimentoData", other.date.as_deref())?;
            w.end_element("AltriDatiGestionali")?;
        }
        w.end_element("DettaglioLinee")?;
    }

    for summary in &data.vat_summary {
        w.start_element("DatiRiepilogo")?;
        w.amount("AliquotaIVA", summary.vat_rate)?;
        if let Some(nature) = summary.nature {
            w.text_element("Natura", nature.code())?;
        }
        w.opt_amount("SpeseAccessorie", summary.ancillary_costs)?;
        w.opt_amount("Arrotondamento", summary.rounding)?;
        w.amount("ImponibileImporto", summary.taxable_amount)?;
        w.amount("Imposta", summary.tax)?;
        if let Some(chargeability) = summary.chargeability {
            w.text_element("EsigibilitaIVA", chargeability.code())?;
        }
        w.opt_text("RiferimentoNormativo", summary.legal_reference.as_deref())?;
        w.end_element("DatiRiepilogo")?;
    }

    w.end_element("DatiBeniServizi")?;
    Ok(())
}

fn write_payment(w: &mut XmlWriter, payment: &PaymentData) -> Result<(), FatturaError> {
    w.start_element("DatiPagamento")?;
    w.text_element("CondizioniPagamento", payment.terms.code())?;
    for detail in &payment.details {
        w.start_element("DettaglioPagamento")?;
        w.opt_text("Beneficiario", detail.beneficiary.as_deref())?;
        w.text_element("ModalitaPagamento", detail.method.code())?;
        w.opt_text(
            "DataRiferimentoTerminiPagamento",
            detail.terms_reference_date.as_deref(),
        )?;
        if let Some(days) = detail.terms_days {
            w.text_element("GiorniTerminiPagamento", &days.to_string())?;
        }
        w.opt_text("DataScadenzaPagamento", detail.due_date.as_deref())?;
        w.amount("ImportoPagamento", detail.amount)?;
        w.opt_text("CodUfficioPostale", detail.post_office_code.as_deref())?;
        w.opt_text("CognomeQuietanzante", detail.payee_last_name.as_deref())?;
        w.opt_text("NomeQuietanzante", detail.payee_first_name.as_deref())?;
        w.opt_text("CFQuietanzante", detail.payee_tax_code.as_deref())?;
        w.opt_text("TitoloQuietanzante", detail.payee_title.as_deref())?;
        w.opt_text("IstitutoFinanziario", detail.bank_name.as_deref())?;
        w.opt_text("IBAN", detail.iban.as_deref())?;
        w.opt_text("ABI", detail.abi.as_deref())?;
        w.opt_text("CAB", detail.cab.as_deref())?;
        w.opt_text("BIC", detail.bic.as_deref())?;
        w.opt_amount("ScontoPagamentoAnticipato", detail.early_payment_discount)?;
        w.opt_text(
            "DataLimitePagamentoAnticipato",
            detail.early_payment_deadline.as_deref(),
        )?;
        w.opt_amount("PenalitaPagamentiRitardati", detail.late_payment_penalty)?;
        w.opt_text("DataDecorrenzaPenale", detail.penalty_start_date.as_deref())?;
        w.opt_text("CodicePagamento", detail.payment_code.as_deref())?;
        w.end_element("DettaglioPagamento")?;
    }
    w.end_element("DatiPagamento")?;
    Ok(())
}
