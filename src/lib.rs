//! # fattura
//!
//! Italian electronic invoicing (FatturaPA) for the SdI exchange system:
//! a document builder, business-rule validation and XML serialization.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! The model follows the FatturaElettronica schema, version 1.2.x.
//!
//! ## Quick Start
//!
//! ```rust
//! use fattura::core::*;
//! use rust_decimal_macros::dec;
//!
//! let document = FatturaBuilder::new()
//!     .transmission_b2b(FiscalId::new("IT", "01234567890"), "00001", Some("ABC1234".into()), None)
//!     .sender(SenderBuilder::new(Name::company("ACME S.r.l."),
//!         AddressBuilder::new("Via Roma 1", "00100", "Roma", "IT").build())
//!         .vat_id("IT", "01234567890").build())
//!     .recipient(RecipientBuilder::new(Name::company("Cliente S.p.A."),
//!         AddressBuilder::new("Via Milano 2", "20100", "Milano", "IT").build())
//!         .vat_id("IT", "09876543210").build())
//!     .general_data(GeneralData {
//!         document: DocumentData {
//!             currency: "EUR".into(),
//!             date: "2025-01-15".into(),
//!             number: "FT-1".into(),
//!             ..Default::default()
//!         },
//!         ..Default::default()
//!     })
//!     .goods_services(GoodsServices {
//!         lines: vec![LineItemBuilder::new(1, "Consulenza", dec!(100)).quantity(dec!(10)).build()],
//!         vat_summary: vec![VatSummary::new(dec!(22), dec!(1000), dec!(220))],
//!     })
//!     .build()
//!     .unwrap();
//!
//! let report = validate_document(&document);
//! assert!(report.valid, "{:?}", report.errors);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Document model, builder, code catalogs, validation |
//! | `fatturapa` | FatturaPA XML serialization and generic XML rendering |
//! | `payload` | Base64 upload payloads |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "fatturapa")]
pub mod fatturapa;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
