//! Client-name cleanup applied after the client rule's capture.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HONORIFIC: Regex = Regex::new(
        r"(?i)^\s*(?:(?:SE[ÑN]OR\s*\(\s*ES\s*\)|SE[ÑN]ORES|SE[ÑN]OR(?:A|ITA)?|SR\s*\(\s*ES\s*\)|SRES\.?|SRAS?\.?|SR\.?)(?:\s*:|\s+|$)|CLIENTE\s*:)"
    )
    .unwrap();
    static ref REGISTRATION_ID: Regex =
        Regex::new(r"(?is)\s*\bR\.?\s?U\.?\s?T\b.*$").unwrap();
}

/// Strip honorific labels, a trailing `R.U.T.` field, stray colons and
/// surplus whitespace from a captured client name.
///
/// The pass runs until the name stops changing, so the result is a fixed
/// point: cleaning it again returns it unchanged.
pub fn clean_client_name(raw: &str) -> String {
    let mut current = clean_once(raw);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(name: &str) -> String {
    let name = HONORIFIC.replace(name, "");
    let name = REGISTRATION_ID.replace(&name, "");
    let name = name.replace(':', " ");
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strip_honorifics() {
        assert_eq!(clean_client_name("SEÑOR(ES): ACME S.A."), "ACME S.A.");
        assert_eq!(clean_client_name("Señores: Acme Ltda"), "Acme Ltda");
        assert_eq!(clean_client_name("SR. JUAN PEREZ"), "JUAN PEREZ");
        assert_eq!(clean_client_name("SENOR(ES) : ACME"), "ACME");
    }

    #[test]
    fn test_strip_registration_id() {
        assert_eq!(
            clean_client_name("ENLASA GENERACION CHILE S.A. R.U.T.: 76.555.400-4 GIRO: ENERGIA"),
            "ENLASA GENERACION CHILE S.A."
        );
        assert_eq!(clean_client_name("ACME RUT 11.111.111-1"), "ACME");
    }

    #[test]
    fn test_keeps_words_containing_rut() {
        assert_eq!(clean_client_name("TRANSPORTES RUTA NORTE"), "TRANSPORTES RUTA NORTE");
        assert_eq!(clean_client_name("SRL INGENIERIA"), "SRL INGENIERIA");
    }

    #[test]
    fn test_cliente_is_stripped_only_as_label() {
        assert_eq!(clean_client_name("CLIENTE FELIZ SPA"), "CLIENTE FELIZ SPA");
        assert_eq!(clean_client_name("SEÑOR(ES): CLIENTE FELIZ SPA R.U.T.: 1-9"), "CLIENTE FELIZ SPA");
        assert_eq!(clean_client_name("CLIENTE: FELIZ SPA"), "FELIZ SPA");
        assert_eq!(clean_client_name("Cliente : Feliz"), "Feliz");
    }

    #[test]
    fn test_strip_colons_and_whitespace() {
        assert_eq!(clean_client_name("  : ACME :  SPA  "), "ACME SPA");
    }

    #[test]
    fn test_nested_labels() {
        assert_eq!(clean_client_name("SEÑOR(ES): SEÑORES: ACME"), "ACME");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "SEÑOR(ES): ACME S.A. R.U.T.: 1-9",
            "Sr.: Sra. Maria",
            "CLIENTE: : SEÑOR ACME",
            "::",
            "",
            "ACME",
            "SR",
            "sres.ACME",
        ];
        for input in inputs {
            let once = clean_client_name(input);
            assert_eq!(clean_client_name(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_only_label_is_empty() {
        assert_eq!(clean_client_name("SEÑOR(ES):"), "");
        assert_eq!(clean_client_name("R.U.T.: 1-9"), "");
    }

    proptest! {
        #[test]
        fn prop_idempotent_on_any_text(raw in "\\PC{0,120}") {
            let once = clean_client_name(&raw);
            prop_assert_eq!(clean_client_name(&once), once);
        }

        #[test]
        fn prop_idempotent_on_label_soup(
            parts in prop::collection::vec(
                "SEÑOR\\(ES\\)|SEÑORES|SR\\.|Sra|CLIENTE|R\\.U\\.T\\.|RUT|:| |\\n|[A-Za-z0-9.\\-]{1,6}",
                0..16,
            )
        ) {
            let raw = parts.concat();
            let once = clean_client_name(&raw);
            prop_assert!(!once.contains(':'));
            prop_assert_eq!(once.trim(), once.as_str());
            prop_assert_eq!(clean_client_name(&once), once);
        }
    }
}
