use fattura::core::*;
use fattura::fatturapa;
use rust_decimal_macros::dec;

fn body(number: &str, date: &str, description: &str) -> (GeneralData, GoodsServices) {
    let general = GeneralData {
        document: DocumentData {
            currency: "EUR".into(),
            date: date.into(),
            number: number.into(),
            ..Default::default()
        },
        ..Default::default()
    };
    let goods = GoodsServices {
        lines: vec![LineItemBuilder::new(1, description, dec!(250)).build()],
        vat_summary: vec![VatSummary::new(dec!(22), dec!(250), dec!(55))],
    };
    (general, goods)
}

fn main() {
    let mut builder = FatturaBuilder::new()
        .transmission_b2b(
            FiscalId::new("IT", "01234567890"),
            "00042",
            None,
            Some("amministrazione@pec.cliente.it".into()),
        )
        .sender(
            SenderBuilder::new(
                Name::company("ACME S.r.l."),
                AddressBuilder::new("Via Roma 1", "00100", "Roma", "IT").build(),
            )
            .vat_id("IT", "01234567890")
            .build(),
        )
        .recipient(
            RecipientBuilder::new(
                Name::company("Cliente S.p.A."),
                AddressBuilder::new("Via Milano 2", "20100", "Milano", "IT").build(),
            )
            .vat_id("IT", "09876543210")
            .build(),
        );

    // One body per invoice; the third one carries a bad date on purpose
    for (number, date, description) in [
        ("FT-1", "2025-01-10", "Canone gennaio"),
        ("FT-2", "2025-02-10", "Canone febbraio"),
        ("FT-3", "2025-02-30", "Canone marzo"),
    ] {
        let (general, goods) = body(number, date, description);
        builder = builder.general_data(general).goods_services(goods).new_body();
    }

    let document = builder.build().expect("batch should be complete");
    println!("Bodies: {}", document.bodies.len());

    // Default validation
    let report = validate_document(&document);
    println!("Default validation: valid={}", report.valid);
    for issue in &report.errors {
        println!("  error   {issue}");
    }
    for issue in &report.warnings {
        println!("  warning {issue}");
    }

    // Dates off, strict on
    let validator = Validator::new(ValidationOptions {
        check_dates: false,
        strict: true,
        ..Default::default()
    });
    let report = validator.validate(&document);
    println!("Strict, no date checks: valid={}", report.valid);

    if report.valid {
        let xml = fatturapa::to_xml_with(
            &document,
            &fatturapa::SerializeOptions {
                include_schema_location: false,
                ..Default::default()
            },
        )
        .expect("serialization should succeed");
        println!("{} bytes of XML", xml.len());
    }
}
