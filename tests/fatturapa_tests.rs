#![cfg(feature = "fatturapa")]

use fattura::core::*;
use fattura::fatturapa::{self, FragmentOptions, SerializeOptions};
use rust_decimal_macros::dec;
use serde::Serialize;

fn sender() -> Sender {
    SenderBuilder::new(
        Name::company("ACME S.r.l."),
        AddressBuilder::new("Via Roma", "00100", "Roma", "IT")
            .street_number("1")
            .province("RM")
            .build(),
    )
    .vat_id("IT", "01234567890")
    .build()
}

fn recipient() -> Recipient {
    RecipientBuilder::new(
        Name::company("Cliente S.p.A."),
        AddressBuilder::new("Via Milano 2", "20100", "Milano", "IT").build(),
    )
    .vat_id("IT", "09876543210")
    .build()
}

fn general(number: &str) -> GeneralData {
    GeneralData {
        document: DocumentData {
            currency: "EUR".into(),
            date: "2025-01-15".into(),
            number: number.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn goods() -> GoodsServices {
    GoodsServices {
        lines: vec![
            LineItemBuilder::new(1, "Consulenza", dec!(100.00))
                .quantity(dec!(10))
                .build(),
        ],
        vat_summary: vec![VatSummary::new(dec!(22), dec!(1000.00), dec!(220.00))],
    }
}

fn b2b_document() -> Document {
    FatturaBuilder::new()
        .transmission_b2b(FiscalId::new("IT", "01234567890"), "00001", None, None)
        .sender(sender())
        .recipient(recipient())
        .general_data(general("1"))
        .goods_services(goods())
        .build()
        .expect("valid document")
}

/// Byte offset of `needle`, failing the test when absent.
fn pos(xml: &str, needle: &str) -> usize {
    xml.find(needle)
        .unwrap_or_else(|| panic!("'{needle}' not found in:\n{xml}"))
}

// ---------------------------------------------------------------------------
// Root and header
// ---------------------------------------------------------------------------

#[test]
fn minimal_b2b_serialization() {
    let doc = b2b_document();
    assert!(validate_document(&doc).valid);

    let xml = fatturapa::to_xml(&doc).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<FormatoTrasmissione>FPR12</FormatoTrasmissione>"));
    assert!(xml.contains("<AliquotaIVA>22.00</AliquotaIVA>"));
    assert!(xml.contains("<CodiceDestinatario>0000000</CodiceDestinatario>"));
    assert!(xml.contains("<Quantita>10.00</Quantita>"));
    assert!(xml.contains("<PrezzoUnitario>100.00</PrezzoUnitario>"));
    assert!(xml.contains("<PrezzoTotale>1000.00</PrezzoTotale>"));
    assert!(xml.contains("<ImponibileImporto>1000.00</ImponibileImporto>"));
    assert!(xml.contains("<Imposta>220.00</Imposta>"));
    assert!(xml.contains("<RegimeFiscale>RF01</RegimeFiscale>"));
    assert!(xml.contains("<TipoDocumento>TD01</TipoDocumento>"));
    assert!(!xml.contains("PECDestinatario"));
    assert!(xml.trim_end().ends_with("</p:FatturaElettronica>"));
}

#[test]
fn root_attributes() {
    let xml = fatturapa::to_xml(&b2b_document()).unwrap();
    assert!(xml.contains(
        "<p:FatturaElettronica xmlns:p=\"http://ivaservizi.agenziaentrate.gov.it/docs/xsd/fatture/v1.2\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" versione=\"FPR12\" \
         xsi:schemaLocation=\""
    ));
    assert!(xml.contains(fatturapa::SCHEMA_LOCATION));
}

#[test]
fn schema_location_can_be_omitted() {
    let xml = fatturapa::to_xml_with(
        &b2b_document(),
        &SerializeOptions {
            include_schema_location: false,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(!xml.contains("schemaLocation"));
    assert!(xml.contains("versione=\"FPR12\">"));
}

#[test]
fn pa_version_attribute() {
    let mut doc = b2b_document();
    doc.header.transmission.format = TransmissionFormat::PublicAdministration;
    doc.header.transmission.recipient_code = "UFY9MH".into();
    let xml = fatturapa::to_xml(&doc).unwrap();
    assert!(xml.contains("versione=\"FPA12\""));
    assert!(xml.contains("<FormatoTrasmissione>FPA12</FormatoTrasmissione>"));
}

#[test]
fn header_element_order() {
    let mut doc = b2b_document();
    doc.header.transmission.recipient_pec = Some("cliente@pec.it".into());
    doc.header.transmission.transmitter_contact = Some(Contact {
        phone: Some("06 123456".into()),
        fax: Some("ignored".into()),
        email: Some("tx@acme.it".into()),
    });
    doc.header.fiscal_representative = Some(FiscalRepresentative {
        vat_id: FiscalId::new("IT", "11111111111"),
        tax_code: None,
        name: Name::company("Rappresentante S.r.l."),
    });
    doc.header.third_party = Some(ThirdPartyIntermediary {
        identity: PartyIdentity {
            vat_id: Some(FiscalId::new("IT", "22222222222")),
            tax_code: None,
            name: Name::company("Intermediario S.r.l."),
        },
    });
    doc.header.emitter_role = Some(EmitterRole::ThirdParty);

    let xml = fatturapa::to_xml(&doc).unwrap();
    let order = [
        "<DatiTrasmissione>",
        "<IdTrasmittente>",
        "<ProgressivoInvio>",
        "<FormatoTrasmissione>",
        "<CodiceDestinatario>",
        "<ContattiTrasmittente>",
        "<PECDestinatario>",
        "<CedentePrestatore>",
        "<RappresentanteFiscale>",
        "<CessionarioCommittente>",
        "<TerzoIntermediarioOSoggettoEmittente>",
        "<SoggettoEmittente>TZ</SoggettoEmittente>",
        "<FatturaElettronicaBody>",
    ];
    for pair in order.windows(2) {
        assert!(pos(&xml, pair[0]) < pos(&xml, pair[1]), "{} before {}", pair[0], pair[1]);
    }
    assert!(!xml.contains("<Fax>ignored</Fax>"));
    assert!(xml.contains("<Denominazione>Rappresentante S.r.l.</Denominazione>"));
}

#[test]
fn sender_details() {
    let mut doc = b2b_document();
    doc.header.sender.registry = Some(RegistryEntry {
        office: "RM".into(),
        number: "123456".into(),
        share_capital: Some(dec!(10000)),
        shareholding: Some(Shareholding::Multiple),
        liquidation: LiquidationStatus::NotInLiquidation,
    });
    doc.header.sender.contact = Some(Contact {
        phone: Some("06 123456".into()),
        fax: Some("06 654321".into()),
        email: None,
    });
    let xml = fatturapa::to_xml(&doc).unwrap();
    assert!(xml.contains("<NumeroCivico>1</NumeroCivico>"));
    assert!(xml.contains("<Provincia>RM</Provincia>"));
    assert!(xml.contains("<CapitaleSociale>10000.00</CapitaleSociale>"));
    assert!(xml.contains("<SocioUnico>SM</SocioUnico>"));
    assert!(xml.contains("<StatoLiquidazione>LN</StatoLiquidazione>"));
    assert!(xml.contains("<Fax>06 654321</Fax>"));
    assert!(pos(&xml, "<Sede>") < pos(&xml, "<IscrizioneREA>"));
    assert!(pos(&xml, "<IscrizioneREA>") < pos(&xml, "<Contatti>"));
    assert!(!xml.contains("<Email>"));
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

#[test]
fn absent_optionals_produce_no_elements() {
    let xml = fatturapa::to_xml(&b2b_document()).unwrap();
    for absent in [
        "DatiRitenuta",
        "DatiBollo",
        "DatiCassaPrevidenziale",
        "ImportoTotaleDocumento",
        "Causale",
        "Art73",
        "DatiOrdineAcquisto",
        "DatiTrasporto",
        "DatiVeicoli",
        "DatiPagamento",
        "Allegati",
        "Natura",
        "Ritenuta",
        "UnitaMisura",
        "EsigibilitaIVA",
    ] {
        assert!(!xml.contains(&format!("<{absent}>")), "unexpected <{absent}>");
    }
}

#[test]
fn document_data_blocks() {
    let mut doc = b2b_document();
    let data = &mut doc.bodies[0].general.document;
    data.withholdings.push(Withholding {
        kind: WithholdingType::Rt01,
        amount: dec!(200),
        rate: dec!(20),
        payment_reason: PaymentReason::A,
    });
    data.stamp_duty = Some(StampDuty { amount: dec!(2) });
    data.welfare_funds.push(WelfareFund {
        kind: FundType::Tc22,
        rate: dec!(4),
        contribution: dec!(40),
        taxable: Some(dec!(1000)),
        vat_rate: dec!(22),
        withholding: true,
        nature: None,
        administrative_reference: None,
    });
    data.adjustments.push(Adjustment {
        kind: AdjustmentType::Discount,
        percentage: Some(dec!(5)),
        amount: None,
    });
    data.total_amount = Some(dec!(1220));
    data.reasons = vec!["Prima causale".into(), "Seconda causale".into()];
    data.art73 = true;

    let xml = fatturapa::to_xml(&doc).unwrap();
    let order = [
        "<Numero>1</Numero>",
        "<TipoRitenuta>RT01</TipoRitenuta>",
        "<ImportoRitenuta>200.00</ImportoRitenuta>",
        "<AliquotaRitenuta>20.00</AliquotaRitenuta>",
        "<CausalePagamento>A</CausalePagamento>",
        "<BolloVirtuale>SI</BolloVirtuale>",
        "<ImportoBollo>2.00</ImportoBollo>",
        "<TipoCassa>TC22</TipoCassa>",
        "<AlCassa>4.00</AlCassa>",
        "<ImportoContributoCassa>40.00</ImportoContributoCassa>",
        "<ImponibileCassa>1000.00</ImponibileCassa>",
        "<Ritenuta>SI</Ritenuta>",
        "<Tipo>SC</Tipo>",
        "<Percentuale>5.00</Percentuale>",
        "<ImportoTotaleDocumento>1220.00</ImportoTotaleDocumento>",
        "<Causale>Prima causale</Causale>",
        "<Causale>Seconda causale</Causale>",
        "<Art73>SI</Art73>",
        "</DatiGeneraliDocumento>",
    ];
    for pair in order.windows(2) {
        assert!(pos(&xml, pair[0]) < pos(&xml, pair[1]), "{} before {}", pair[0], pair[1]);
    }
}

#[test]
fn related_documents_and_transport() {
    let mut doc = b2b_document();
    let general = &mut doc.bodies[0].general;
    general.purchase_orders.push(RelatedDocument {
        line_refs: vec![1],
        document_id: "PO-42".into(),
        date: Some("2025-01-02".into()),
        cig_code: Some("1234567890".into()),
        ..Default::default()
    });
    general.linked_invoices.push(RelatedDocument {
        document_id: "FT-0".into(),
        ..Default::default()
    });
    general.progress_reports.push(ProgressReport { phase: 3 });
    general.delivery_notes.push(DeliveryNote {
        number: "DDT-7".into(),
        date: "2025-01-10".into(),
        line_refs: vec![1, 2],
    });
    general.transport = Some(TransportData {
        carrier: Some(Carrier {
            identity: PartyIdentity {
                vat_id: Some(FiscalId::new("IT", "33333333333")),
                tax_code: None,
                name: Name::company("Trasporti S.r.l."),
            },
            license_number: None,
        }),
        packages: Some(4),
        gross_weight: Some(dec!(12.5)),
        ..Default::default()
    });
    general.main_invoice = Some(MainInvoice {
        number: "FT-100".into(),
        date: "2024-12-31".into(),
    });

    let xml = fatturapa::to_xml(&doc).unwrap();
    let order = [
        "</DatiGeneraliDocumento>",
        "<DatiOrdineAcquisto>",
        "<IdDocumento>PO-42</IdDocumento>",
        "<CodiceCIG>1234567890</CodiceCIG>",
        "<DatiFattureCollegate>",
        "<RiferimentoFase>3</RiferimentoFase>",
        "<NumeroDDT>DDT-7</NumeroDDT>",
        "<DatiAnagraficiVettore>",
        "<NumeroColli>4</NumeroColli>",
        "<PesoLordo>12.50</PesoLordo>",
        "<NumeroFatturaPrincipale>FT-100</NumeroFatturaPrincipale>",
        "</DatiGenerali>",
    ];
    for pair in order.windows(2) {
        assert!(pos(&xml, pair[0]) < pos(&xml, pair[1]), "{} before {}", pair[0], pair[1]);
    }
    assert_eq!(xml.matches("<RiferimentoNumeroLinea>").count(), 3);
}

#[test]
fn line_and_summary_order() {
    let mut doc = b2b_document();
    let goods = &mut doc.bodies[0].goods_services;
    goods.lines.push(
        LineItemBuilder::new(2, "Esente", dec!(50))
            .kind(SupplyKind::Ancillary)
            .article_code("SKU", "X-1")
            .unit("PZ")
            .exempt(Nature::N2_2)
            .withholding(true)
            .other_data(ManagementData {
                data_type: "INTENTO".into(),
                text: Some("Lettera 1".into()),
                number: Some(dec!(1)),
                date: None,
            })
            .build(),
    );
    goods.vat_summary.push(VatSummary {
        chargeability: Some(VatChargeability::Immediate),
        ..VatSummary::exempt(Nature::N2_2, dec!(50), "Art. 1 L. 190/2014")
    });

    let xml = fatturapa::to_xml(&doc).unwrap();
    let order = [
        "<NumeroLinea>2</NumeroLinea>",
        "<TipoCessionePrestazione>AC</TipoCessionePrestazione>",
        "<CodiceTipo>SKU</CodiceTipo>",
        "<Descrizione>Esente</Descrizione>",
        "<UnitaMisura>PZ</UnitaMisura>",
        "<PrezzoUnitario>50.00</PrezzoUnitario>",
        "<PrezzoTotale>50.00</PrezzoTotale>",
        "<AliquotaIVA>0.00</AliquotaIVA>",
        "<Ritenuta>SI</Ritenuta>",
        "<Natura>N2.2</Natura>",
        "<TipoDato>INTENTO</TipoDato>",
        "<RiferimentoNumero>1.00</RiferimentoNumero>",
        "<DatiRiepilogo>",
    ];
    for pair in order.windows(2) {
        assert!(pos(&xml, pair[0]) < pos(&xml, pair[1]), "{} before {}", pair[0], pair[1]);
    }
    assert_eq!(xml.matches("<DettaglioLinee>").count(), 2);
    assert_eq!(xml.matches("<DatiRiepilogo>").count(), 2);
    assert!(xml.contains("<EsigibilitaIVA>I</EsigibilitaIVA>"));
    assert!(xml.contains("<RiferimentoNormativo>Art. 1 L. 190/2014</RiferimentoNormativo>"));
}

#[test]
fn vehicle_payments_attachments_order() {
    let mut doc = b2b_document();
    let body = &mut doc.bodies[0];
    body.vehicle = Some(VehicleData {
        date: "2024-06-01".into(),
        total_distance: "12000".into(),
    });
    body.payments.push(PaymentData {
        terms: PaymentTerms::Tp02,
        details: vec![PaymentDetail {
            method: PaymentMethod::Mp05,
            due_date: Some("2025-02-15".into()),
            amount: dec!(1220),
            iban: Some("IT60X0542811101000000123456".into()),
            terms_days: Some(30),
            ..Default::default()
        }],
    });
    body.payments.push(PaymentData {
        terms: PaymentTerms::Tp03,
        details: vec![PaymentDetail {
            method: PaymentMethod::Mp01,
            amount: dec!(0),
            ..Default::default()
        }],
    });
    body.attachments.push(Attachment {
        name: "ordine.pdf".into(),
        format: Some("PDF".into()),
        data: "JVBERi0xLjQ=".into(),
        ..Default::default()
    });

    let xml = fatturapa::to_xml(&doc).unwrap();
    let order = [
        "</DatiBeniServizi>",
        "<DatiVeicoli>",
        "<TotalePercorso>12000</TotalePercorso>",
        "<CondizioniPagamento>TP02</CondizioniPagamento>",
        "<ModalitaPagamento>MP05</ModalitaPagamento>",
        "<GiorniTerminiPagamento>30</GiorniTerminiPagamento>",
        "<DataScadenzaPagamento>2025-02-15</DataScadenzaPagamento>",
        "<ImportoPagamento>1220.00</ImportoPagamento>",
        "<IBAN>IT60X0542811101000000123456</IBAN>",
        "<CondizioniPagamento>TP03</CondizioniPagamento>",
        "<ImportoPagamento>0.00</ImportoPagamento>",
        "<NomeAttachment>ordine.pdf</NomeAttachment>",
        "<FormatoAttachment>PDF</FormatoAttachment>",
        "<Attachment>JVBERi0xLjQ=</Attachment>",
        "</FatturaElettronicaBody>",
    ];
    for pair in order.windows(2) {
        assert!(pos(&xml, pair[0]) < pos(&xml, pair[1]), "{} before {}", pair[0], pair[1]);
    }
}

#[test]
fn multi_body_batch() {
    let doc = FatturaBuilder::new()
        .transmission_b2b(FiscalId::new("IT", "01234567890"), "00001", None, None)
        .sender(sender())
        .recipient(recipient())
        .general_data(general("A-1"))
        .goods_services(goods())
        .new_body()
        .general_data(general("A-2"))
        .goods_services(goods())
        .build()
        .unwrap();
    assert_eq!(doc.bodies.len(), 2);

    let xml = fatturapa::to_xml(&doc).unwrap();
    assert_eq!(xml.matches("<FatturaElettronicaBody>").count(), 2);
    assert_eq!(xml.matches("<FatturaElettronicaHeader>").count(), 1);
    assert!(pos(&xml, "<Numero>A-1</Numero>") < pos(&xml, "<Numero>A-2</Numero>"));
}

// ---------------------------------------------------------------------------
// Escaping, decimals, determinism
// ---------------------------------------------------------------------------

#[test]
fn special_characters_escaped_once() {
    let mut doc = b2b_document();
    doc.header.recipient.identity.name = Name::company("Rossi & Figli <S.n.c.> \"Il 'Grande'\"");
    doc.bodies[0].goods_services.lines[0].description = "a&amp;b".into();
    let xml = fatturapa::to_xml(&doc).unwrap();
    assert!(xml.contains(
        "<Denominazione>Rossi &amp; Figli &lt;S.n.c.&gt; &quot;Il &apos;Grande&apos;&quot;</Denominazione>"
    ));
    assert!(xml.contains("<Descrizione>a&amp;amp;b</Descrizione>"));
}

#[test]
fn decimals_rounded_half_away_from_zero() {
    let mut doc = b2b_document();
    let line = &mut doc.bodies[0].goods_services.lines[0];
    line.unit_price = dec!(10.005);
    line.quantity = Some(dec!(1.5));
    doc.bodies[0].goods_services.vat_summary[0].vat_rate = dec!(22.0);
    let xml = fatturapa::to_xml(&doc).unwrap();
    assert!(xml.contains("<PrezzoUnitario>10.01</PrezzoUnitario>"));
    assert!(xml.contains("<Quantita>1.50</Quantita>"));
    assert!(xml.contains("<AliquotaIVA>22.00</AliquotaIVA>"));
}

#[test]
fn serialization_is_deterministic() {
    let doc = b2b_document();
    let a = fatturapa::to_xml(&doc).unwrap();
    let b = fatturapa::to_xml(&doc.clone()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn compact_output() {
    let xml = fatturapa::to_xml_with(
        &b2b_document(),
        &SerializeOptions {
            pretty: false,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(!xml.contains('\n'));
    assert!(xml.contains("<DatiTrasmissione><IdTrasmittente><IdPaese>IT</IdPaese>"));
}

#[test]
fn pretty_output_is_indented() {
    let xml = fatturapa::to_xml(&b2b_document()).unwrap();
    assert!(xml.contains("\n  <FatturaElettronicaHeader>"));
    assert!(xml.contains("\n    <DatiTrasmissione>"));

    let four = fatturapa::to_xml_with(
        &b2b_document(),
        &SerializeOptions {
            indent: 4,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(four.contains("\n        <DatiTrasmissione>"));
}

// ---------------------------------------------------------------------------
// Generic renderer
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Extension {
    codice: String,
    importo: Option<String>,
    note: Vec<String>,
    dettaglio: Detail,
    vuoto: Empty,
    attivo: bool,
}

#[derive(Serialize)]
struct Detail {
    valore: u32,
}

#[derive(Serialize)]
struct Empty {
    campo: Option<String>,
}

fn extension() -> Extension {
    Extension {
        codice: "A&B".into(),
        importo: None,
        note: vec!["uno".into(), "due".into()],
        dettaglio: Detail { valore: 7 },
        vuoto: Empty { campo: None },
        attivo: true,
    }
}

#[test]
fn generic_renderer_rules() {
    let xml = fatturapa::to_xml_fragment(
        "Estensione",
        &extension(),
        &FragmentOptions {
            declaration: false,
            pretty: false,
            indent: 0,
        },
    )
    .unwrap();
    assert_eq!(
        xml,
        "<Estensione><Codice>A&amp;B</Codice><Note>uno</Note><Note>due</Note>\
         <Dettaglio><Valore>7</Valore></Dettaglio><Attivo>true</Attivo></Estensione>"
    );
}

#[test]
fn generic_renderer_declaration_and_attrs() {
    let xml = fatturapa::to_xml_fragment_with_attrs(
        "Estensione",
        &extension(),
        &[("versione", "1.0")],
        &FragmentOptions::default(),
    )
    .unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<Estensione versione=\"1.0\">"));
    assert!(xml.contains("\n  <Codice>A&amp;B</Codice>"));
}

#[test]
fn generic_renderer_skips_null_root() {
    let xml = fatturapa::to_xml_fragment(
        "Vuoto",
        &Empty { campo: None },
        &FragmentOptions {
            declaration: false,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(xml.is_empty());
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

#[cfg(feature = "payload")]
mod payload_tests {
    use super::*;
    use fattura::fatturapa::payload;

    #[test]
    fn document_payload_decodes_to_xml() {
        let doc = b2b_document();
        let encoded = payload::encode_document(&doc).unwrap();
        assert!(!encoded.contains('<'));
        let decoded = payload::decode_xml(&encoded).unwrap();
        assert_eq!(decoded, fatturapa::to_xml(&doc).unwrap());
    }

    #[test]
    fn encode_known_value() {
        assert_eq!(payload::encode_xml("<a/>"), "PGEvPg==");
    }

    #[test]
    fn invalid_payload_is_an_error() {
        let err = payload::decode_xml("not base64!").unwrap_err();
        assert!(matches!(err, FatturaError::Payload(_)));
    }

    #[test]
    fn attachment_content_is_base64() {
        let attachment = payload::attachment_from_bytes("nota.txt", Some("TXT".into()), b"ciao");
        assert_eq!(attachment.data, "Y2lhbw==");
        assert_eq!(attachment.format.as_deref(), Some("TXT"));
    }
}
