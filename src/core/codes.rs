//! Closed FatturaPA code catalogs.
//!
//! Every catalog is an enum that (de)serializes as its schema code and
//! carries the official Italian description.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::FatturaError;

macro_rules! code_catalog {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $( $variant:ident => $code:literal, $desc:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[doc = $desc]
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Every code in the catalog, in schema order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Schema code (e.g. "TD01").
            pub fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Official description of the code.
            pub fn description(&self) -> &'static str {
                match self {
                    $(Self::$variant => $desc,)+
                }
            }

            /// Parse from the schema code string.
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl FromStr for $name {
            type Err = FatturaError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_code(s).ok_or_else(|| FatturaError::UnknownCode {
                    catalog: $label,
                    code: s.to_string(),
                })
            }
        }
    };
}

code_catalog! {
    /// 1.1.3 FormatoTrasmissione.
    TransmissionFormat, "FormatoTrasmissione" {
        PublicAdministration => "FPA12", "Fattura verso Pubblica Amministrazione";
        Private => "FPR12", "Fattura verso privati";
        Simplified => "FSM10", "Fattura semplificata";
    }
}

impl TransmissionFormat {
    /// Exact recipient-code length required by the format, if any.
    pub fn recipient_code_len(&self) -> Option<usize> {
        match self {
            Self::PublicAdministration => Some(6),
            Self::Private => Some(7),
            Self::Simplified => None,
        }
    }
}

impl Default for TransmissionFormat {
    fn default() -> Self {
        Self::Private
    }
}

code_catalog! {
    /// Schema version of the document.
    SchemaVersion, "versione" {
        V1_2 => "1.2", "FatturaPA 1.2";
        V1_2_1 => "1.2.1", "FatturaPA 1.2.1";
        V1_2_2 => "1.2.2", "FatturaPA 1.2.2";
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::V1_2_2
    }
}

code_catalog! {
    /// 2.1.1.1 TipoDocumento.
    DocumentType, "TipoDocumento" {
        Td01 => "TD01", "Fattura";
        Td02 => "TD02", "Acconto/Anticipo su fattura";
        Td03 => "TD03", "Acconto/Anticipo su parcella";
        Td04 => "TD04", "Nota di credito";
        Td05 => "TD05", "Nota di debito";
        Td06 => "TD06", "Parcella";
        Td07 => "TD07", "Fattura semplificata";
        Td08 => "TD08", "Nota di credito semplificata";
        Td09 => "TD09", "Nota di debito semplificata";
        Td10 => "TD10", "Fattura per acquisto intracomunitario beni";
        Td11 => "TD11", "Fattura per acquisto intracomunitario servizi";
        Td12 => "TD12", "Documento riepilogativo (art. 6 DPR 695/1996)";
        Td16 => "TD16", "Integrazione fattura reverse charge interno";
        Td17 => "TD17", "Integrazione/autofattura per acquisto servizi dall'estero";
        Td18 => "TD18", "Integrazione per acquisto di beni intracomunitari";
        Td19 => "TD19", "Integrazione/autofattura per acquisto di beni ex art.17 c.2 DPR 633/72";
        Td20 => "TD20", "Autofattura per regolarizzazione e integrazione delle fatture";
        Td21 => "TD21", "Autofattura per splafonamento";
        Td22 => "TD22", "Estrazione beni da Deposito IVA";
        Td23 => "TD23", "Estrazione beni da Deposito IVA con versamento dell'IVA";
        Td24 => "TD24", "Fattura differita di cui all'art. 21, comma 4, lett. a)";
        Td25 => "TD25", "Fattura differita di cui all'art. 21, comma 4, terzo periodo lett. b)";
        Td26 => "TD26", "Cessione di beni ammortizzabili e per passaggi interni";
        Td27 => "TD27", "Fattura per autoconsumo o per cessioni gratuite senza rivalsa";
        Td28 => "TD28", "Acquisti da San Marino con IVA (fattura cartacea)";
    }
}

impl Default for DocumentType {
    fn default() -> Self {
        Self::Td01
    }
}

code_catalog! {
    /// Natura: reason a line or summary carries no VAT.
    ///
    /// The generic N2, N3 and N6 codes were retired in 2021 and are not
    /// accepted.
    Nature, "Natura" {
        N1 => "N1", "Escluse ex art. 15";
        N2_1 => "N2.1", "Non soggette ad IVA ai sensi degli artt. da 7 a 7-septies del DPR 633/72";
        N2_2 => "N2.2", "Non soggette - altri casi";
        N3_1 => "N3.1", "Non imponibili - esportazioni";
        N3_2 => "N3.2", "Non imponibili - cessioni intracomunitarie";
        N3_3 => "N3.3", "Non imponibili - cessioni verso San Marino";
        N3_4 => "N3.4", "Non imponibili - operazioni assimilate alle cessioni all'esportazione";
        N3_5 => "N3.5", "Non imponibili - a seguito di dichiarazioni d'intento";
        N3_6 => "N3.6", "Non imponibili - altre operazioni che non concorrono alla formazione del plafond";
        N4 => "N4", "Esenti";
        N5 => "N5", "Regime del margine / IVA non esposta in fattura";
        N6_1 => "N6.1", "Inversione contabile - cessione di rottami e altri materiali di recupero";
        N6_2 => "N6.2", "Inversione contabile - cessione di oro e argento puro";
        N6_3 => "N6.3", "Inversione contabile - subappalto nel settore edile";
        N6_4 => "N6.4", "Inversione contabile - cessione di fabbricati";
        N6_5 => "N6.5", "Inversione contabile - cessione di telefoni cellulari";
        N6_6 => "N6.6", "Inversione contabile - cessione di prodotti elettronici";
        N6_7 => "N6.7", "Inversione contabile - prestazioni comparto edile e settori connessi";
        N6_8 => "N6.8", "Inversione contabile - operazioni settore energetico";
        N6_9 => "N6.9", "Inversione contabile - altri casi";
        N7 => "N7", "IVA assolta in altro stato UE";
    }
}

code_catalog! {
    /// 1.2.1.8 RegimeFiscale.
    TaxRegime, "RegimeFiscale" {
        Rf01 => "RF01", "Ordinario";
        Rf02 => "RF02", "Contribuenti minimi (art.1, c.96-117, L. 244/07)";
        Rf04 => "RF04", "Agricoltura e attività connesse e pesca (artt.34 e 34-bis, DPR 633/72)";
        Rf05 => "RF05", "Vendita sali e tabacchi (art.74, c.1, DPR 633/72)";
        Rf06 => "RF06", "Commercio fiammiferi (art.74, c.1, DPR 633/72)";
        Rf07 => "RF07", "Editoria (art.74, c.1, DPR 633/72)";
        Rf08 => "RF08", "Gestione servizi telefonia pubblica (art.74, c.1, DPR 633/72)";
        Rf09 => "RF09", "Rivendita documenti di trasporto pubblico e di sosta (art.74, c.1, DPR 633/72)";
        Rf10 => "RF10", "Intrattenimenti, giochi e altre attività di cui alla tariffa allegata al DPR 640/72";
        Rf11 => "RF11", "Agenzie viaggi e turismo (art.74-ter, DPR 633/72)";
        Rf12 => "RF12", "Agriturismo (art.5, c.2, L. 413/91)";
        Rf13 => "RF13", "Vendite a domicilio (art.25-bis, c.6, DPR 600/73)";
        Rf14 => "RF14", "Rivendita beni usati, oggetti d'arte, d'antiquariato o da collezione (art.36, DL 41/95)";
        Rf15 => "RF15", "Agenzie di vendite all'asta di oggetti d'arte, antiquariato o da collezione (art.40-bis, DL 41/95)";
        Rf16 => "RF16", "IVA per cassa P.A. (art.6, c.5, DPR 633/72)";
        Rf17 => "RF17", "IVA per cassa (art. 32-bis, DL 83/2012)";
        Rf18 => "RF18", "Altro";
        Rf19 => "RF19", "Regime forfettario (art.1, c.54-89, L. 190/2014)";
    }
}

impl Default for TaxRegime {
    fn default() -> Self {
        Self::Rf01
    }
}

code_catalog! {
    /// 2.4.2.2 ModalitaPagamento.
    PaymentMethod, "ModalitaPagamento" {
        Mp01 => "MP01", "Contanti";
        Mp02 => "MP02", "Assegno";
        Mp03 => "MP03", "Assegno circolare";
        Mp04 => "MP04", "Contanti presso Tesoreria";
        Mp05 => "MP05", "Bonifico";
        Mp06 => "MP06", "Vaglia cambiario";
        Mp07 => "MP07", "Bollettino bancario";
        Mp08 => "MP08", "Carta di pagamento";
        Mp09 => "MP09", "RID";
        Mp10 => "MP10", "RID utenze";
        Mp11 => "MP11", "RID veloce";
        Mp12 => "MP12", "RIBA";
        Mp13 => "MP13", "MAV";
        Mp14 => "MP14", "Quietanza erario";
        Mp15 => "MP15", "Giroconto su conti di contabilità speciale";
        Mp16 => "MP16", "Domiciliazione bancaria";
        Mp17 => "MP17", "Domiciliazione postale";
        Mp18 => "MP18", "Bollettino di c/c postale";
        Mp19 => "MP19", "SEPA Direct Debit";
        Mp20 => "MP20", "SEPA Direct Debit CORE";
        Mp21 => "MP21", "SEPA Direct Debit B2B";
        Mp22 => "MP22", "Trattenuta su somme già riscosse";
        Mp23 => "MP23", "PagoPA";
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::Mp05
    }
}

code_catalog! {
    /// 2.4.1 CondizioniPagamento.
    PaymentTerms, "CondizioniPagamento" {
        Tp01 => "TP01", "Pagamento a rate";
        Tp02 => "TP02", "Pagamento completo";
        Tp03 => "TP03", "Anticipo";
    }
}

impl Default for PaymentTerms {
    fn default() -> Self {
        Self::Tp02
    }
}

code_catalog! {
    /// 2.1.1.5.1 TipoRitenuta.
    WithholdingType, "TipoRitenuta" {
        Rt01 => "RT01", "Ritenuta persone fisiche";
        Rt02 => "RT02", "Ritenuta persone giuridiche";
        Rt03 => "RT03", "Contributo INPS";
        Rt04 => "RT04", "Contributo ENASARCO";
        Rt05 => "RT05", "Contributo ENPAM";
        Rt06 => "RT06", "Altro contributo previdenziale";
    }
}

code_catalog! {
    /// 2.1.1.7.1 TipoCassa.
    FundType, "TipoCassa" {
        Tc01 => "TC01", "Cassa nazionale previdenza e assistenza avvocati e procuratori legali";
        Tc02 => "TC02", "Cassa previdenza dottori commercialisti";
        Tc03 => "TC03", "Cassa previdenza e assistenza geometri";
        Tc04 => "TC04", "Cassa nazionale previdenza e assistenza ingegneri e architetti liberi professionisti";
        Tc05 => "TC05", "Cassa nazionale del notariato";
        Tc06 => "TC06", "Cassa nazionale previdenza e assistenza ragionieri e periti commerciali";
        Tc07 => "TC07", "Ente nazionale assistenza agenti e rappresentanti di commercio (ENASARCO)";
        Tc08 => "TC08", "Ente nazionale previdenza e assistenza consulenti del lavoro (ENPACL)";
        Tc09 => "TC09", "Ente nazionale previdenza e assistenza medici (ENPAM)";
        Tc10 => "TC10", "Ente nazionale previdenza e assistenza farmacisti (ENPAF)";
        Tc11 => "TC11", "Ente nazionale previdenza e assistenza veterinari (ENPAV)";
        Tc12 => "TC12", "Ente nazionale previdenza e assistenza impiegati dell'agricoltura (ENPAIA)";
        Tc13 => "TC13", "Fondo previdenza impiegati imprese di spedizione e agenzie marittime";
        Tc14 => "TC14", "Istituto nazionale previdenza giornalisti italiani (INPGI)";
        Tc15 => "TC15", "Opera nazionale assistenza orfani sanitari italiani (ONAOSI)";
        Tc16 => "TC16", "Cassa autonoma assistenza integrativa giornalisti italiani (CASAGIT)";
        Tc17 => "TC17", "Ente previdenza periti industriali e periti industriali laureati (EPPI)";
        Tc18 => "TC18", "Ente previdenza e assistenza pluricategoriale (EPAP)";
        Tc19 => "TC19", "Ente nazionale previdenza e assistenza biologi (ENPAB)";
        Tc20 => "TC20", "Ente nazionale previdenza e assistenza professione infermieristica (ENPAPI)";
        Tc21 => "TC21", "Ente nazionale previdenza e assistenza psicologi (ENPAP)";
        Tc22 => "TC22", "INPS";
    }
}

code_catalog! {
    /// 2.1.1.5.4 CausalePagamento (withholding reason, CU model codes).
    PaymentReason, "CausalePagamento" {
        A => "A", "Prestazioni di lavoro autonomo rientranti nell'esercizio di arte o professione abituale";
        B => "B", "Utilizzazione economica, da parte dell'autore o inventore, di opere dell'ingegno, brevetti industriali e simili";
        C => "C", "Utili derivanti da contratti di associazione in partecipazione e da contratti di cointeressenza";
        D => "D", "Utili spettanti ai soci promotori e ai soci fondatori delle società di capitali";
        E => "E", "Levata di protesti cambiari da parte dei segretari comunali";
        G => "G", "Indennità corrisposte per la cessazione di attività sportiva professionale";
        H => "H", "Indennità corrisposte per la cessazione dei rapporti di agenzia delle persone fisiche";
        I => "I", "Indennità corrisposte per la cessazione da funzioni notarili";
        L => "L", "Utilizzazione economica, da parte di soggetto diverso dall'autore o inventore, di opere dell'ingegno, brevetti industriali e simili";
        L1 => "L1", "Redditi derivanti dall'utilizzazione economica di opere dell'ingegno";
        M => "M", "Prestazioni di lavoro autonomo non esercitate abitualmente";
        M1 => "M1", "Redditi derivanti da attività di lavoro autonomo occasionale";
        M2 => "M2", "Redditi derivanti dall'assunzione di obblighi di fare, non fare o permettere";
        N => "N", "Indennità di trasferta, rimborso forfetario di spese, premi e compensi erogati ai lavoratori autonomi occasionali";
        O => "O", "Prestazioni di lavoro autonomo non esercitate abitualmente, senza obbligo di iscrizione alla gestione separata";
        O1 => "O1", "Redditi derivanti da attività commerciali non esercitate abitualmente";
        P => "P", "Compensi corrisposti a soggetti non residenti privi di stabile organizzazione";
        Q => "Q", "Provvigioni corrisposte ad agente o rappresentante di commercio monomandatario";
        R => "R", "Provvigioni corrisposte ad agente o rappresentante di commercio plurimandatario";
        S => "S", "Provvigioni corrisposte a commissionario";
        T => "T", "Provvigioni corrisposte a mediatore";
        U => "U", "Provvigioni corrisposte a procacciatore di affari";
        V => "V", "Provvigioni corrisposte a incaricato per le vendite a domicilio";
        V1 => "V1", "Redditi derivanti da attività di lavoro autonomo occasionale o da obblighi di fare, non fare, permettere";
        W => "W", "Corrispettivi erogati per prestazioni relative a contratti d'appalto";
        X => "X", "Canoni corrisposti nel 2004 da società o enti residenti";
        Y => "Y", "Canoni corrisposti a decorrere dal 2005 da società o enti residenti";
        Z => "Z", "Titolo diverso dai precedenti";
        Zo => "ZO", "Titolo diverso dai precedenti (altri redditi)";
    }
}

code_catalog! {
    /// 2.2.1.2 TipoCessionePrestazione.
    SupplyKind, "TipoCessionePrestazione" {
        Discount => "SC", "Sconto";
        Premium => "PR", "Premio";
        Rebate => "AB", "Abbuono";
        Ancillary => "AC", "Spesa accessoria";
    }
}

code_catalog! {
    /// ScontoMaggiorazione/Tipo.
    AdjustmentType, "TipoScontoMaggiorazione" {
        Discount => "SC", "Sconto";
        Surcharge => "MG", "Maggiorazione";
    }
}

code_catalog! {
    /// 2.2.2.7 EsigibilitaIVA.
    VatChargeability, "EsigibilitaIVA" {
        Immediate => "I", "IVA ad esigibilità immediata";
        Deferred => "D", "IVA ad esigibilità differita";
        SplitPayment => "S", "Scissione dei pagamenti";
    }
}

code_catalog! {
    /// 1.6 SoggettoEmittente.
    EmitterRole, "SoggettoEmittente" {
        Recipient => "CC", "Cessionario/Committente";
        ThirdParty => "TZ", "Terzo";
    }
}

code_catalog! {
    /// 1.2.4.5 StatoLiquidazione.
    LiquidationStatus, "StatoLiquidazione" {
        InLiquidation => "LS", "In liquidazione";
        NotInLiquidation => "LN", "Non in liquidazione";
    }
}

impl Default for LiquidationStatus {
    fn default() -> Self {
        Self::NotInLiquidation
    }
}

code_catalog! {
    /// 1.2.4.4 SocioUnico.
    Shareholding, "SocioUnico" {
        Sole => "SU", "Socio unico";
        Multiple => "SM", "Più soci";
    }
}
