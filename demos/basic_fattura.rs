use fattura::core::*;
use fattura::fatturapa;
use rust_decimal_macros::dec;

fn main() {
    // B2B invoice delivered through a recipient code, paid by bank transfer
    let document = FatturaBuilder::new()
        .transmission_b2b(
            FiscalId::new("IT", "01234567890"),
            "00001",
            Some("ABC1234".into()),
            None,
        )
        .sender(
            SenderBuilder::new(
                Name::company("ACME S.r.l."),
                AddressBuilder::new("Via Roma", "00100", "Roma", "IT")
                    .street_number("1")
                    .province("RM")
                    .build(),
            )
            .vat_id("IT", "01234567890")
            .contact(Some("06 1234567".into()), None, Some("fatture@acme.it".into()))
            .build(),
        )
        .recipient(
            RecipientBuilder::new(
                Name::company("Cliente S.p.A."),
                AddressBuilder::new("Via Milano 2", "20100", "Milano", "IT")
                    .province("MI")
                    .build(),
            )
            .vat_id("IT", "09876543210")
            .build(),
        )
        .general_data(GeneralData {
            document: DocumentData {
                document_type: DocumentType::Td01,
                currency: "EUR".into(),
                date: "2025-01-15".into(),
                number: "FT-2025-001".into(),
                total_amount: Some(dec!(1282.00)),
                reasons: vec!["Consulenza e hosting gennaio 2025".into()],
                ..Default::default()
            },
            ..Default::default()
        })
        .goods_services(GoodsServices {
            lines: vec![
                LineItemBuilder::new(1, "Consulenza sviluppo software", dec!(100))
                    .quantity(dec!(10))
                    .unit("ore")
                    .build(),
                LineItemBuilder::new(2, "Hosting (mensile)", dec!(50.82)).build(),
            ],
            vat_summary: vec![VatSummary {
                chargeability: Some(VatChargeability::Immediate),
                ..VatSummary::new(dec!(22), dec!(1050.82), dec!(231.18))
            }],
        })
        .add_payment(PaymentData {
            terms: PaymentTerms::Tp02,
            details: vec![PaymentDetail {
                method: PaymentMethod::Mp05,
                due_date: Some("2025-02-14".into()),
                amount: dec!(1282.00),
                iban: Some("IT60X0542811101000000123456".into()),
                ..Default::default()
            }],
        })
        .build()
        .expect("document should be complete");

    let report = validate_document(&document);
    println!("Valid:    {}", report.valid);
    for issue in report.errors.iter().chain(&report.warnings) {
        println!("  {issue}");
    }

    let xml = fatturapa::to_xml(&document).expect("serialization should succeed");
    println!("{xml}");
}
