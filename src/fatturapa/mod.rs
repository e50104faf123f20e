//! FatturaPA XML serialization.
//!
//! Renders a [`Document`](crate::core::Document) into the SdI wire format
//! (`p:FatturaElettronica`, schema 1.2.x) with explicit schema element
//! order, plus a generic renderer for free-form content.
//!
//! # Example
//!
//! ```
//! use fattura::core::*;
//! use fattura::fatturapa;
//! use rust_decimal_macros::dec;
//!
//! let document = FatturaBuilder::new()
//!     .transmission_pa(FiscalId::new("IT", "01234567890"), "00001", "UFY9MH")
//!     .sender(SenderBuilder::new(Name::company("ACME S.r.l."),
//!         AddressBuilder::new("Via Roma 1", "00100", "Roma", "IT").build())
//!         .vat_id("IT", "01234567890").build())
//!     .recipient(RecipientBuilder::new(Name::company("Comune di Roma"),
//!         AddressBuilder::new("Via del Campidoglio 1", "00186", "Roma", "IT").build())
//!         .tax_code("02438750586").build())
//!     .general_data(GeneralData {
//!         document: DocumentData {
//!             currency: "EUR".into(),
//!             date: "2025-01-15".into(),
//!             number: "PA-1".into(),
//!             ..Default::default()
//!         },
//!         ..Default::default()
//!     })
//!     .goods_services(GoodsServices {
//!         lines: vec![LineItemBuilder::new(1, "Manutenzione", dec!(10.005)).build()],
//!         vat_summary: vec![VatSummary::new(dec!(22), dec!(10.01), dec!(2.20))],
//!     })
//!     .build()
//!     .unwrap();
//!
//! let xml = fatturapa::to_xml(&document).unwrap();
//! assert!(xml.contains("versione=\"FPA12\""));
//! assert!(xml.contains("<PrezzoUnitario>10.01</PrezzoUnitario>"));
//!
//! let compact = fatturapa::to_xml_with(&document, &fatturapa::SerializeOptions {
//!     pretty: false,
//!     include_schema_location: false,
//!     ..Default::default()
//! }).unwrap();
//! assert!(!compact.contains('\n'));
//! ```

mod generic;
#[cfg(feature = "payload")]
pub mod payload;
mod serialize;
pub(crate) mod xml_utils;

pub use generic::{FragmentOptions, to_xml_fragment, to_xml_fragment_with_attrs};
pub use serialize::{SerializeOptions, to_xml, to_xml_with};
pub use xml_utils::format_decimal;

/// Root element name, prefixed with the FatturaPA namespace.
pub const ROOT_ELEMENT: &str = "p:FatturaElettronica";

/// FatturaPA 1.2 namespace URI.
pub const FATTURAPA_NAMESPACE: &str =
    "http://ivaservizi.agenziaentrate.gov.it/docs/xsd/fatture/v1.2";

/// XML Schema instance namespace URI.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Value of `xsi:schemaLocation` on the root element.
pub const SCHEMA_LOCATION: &str = "http://ivaservizi.agenziaentrate.gov.it/docs/xsd/fatture/v1.2 http://www.fatturapa.gov.it/export/fatturazione/sdi/fatturapa/v1.2.2/Schema_del_file_xml_FatturaPA_v1.2.2.xsd";
