//! Static text tables for the two supported locales.
//!
//! Every label the widget renders comes from a [`TextTable`]; components pick
//! the table through the active [`Locale`] and never hard-code copy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Es];

    /// Upper-case code used in storage and on the JS side.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "EN",
            Locale::Es => "ES",
        }
    }

    /// Value for the `lang` attribute.
    pub fn html_lang(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// The other locale; the switch only ever flips between the two.
    pub fn toggled(self) -> Locale {
        match self {
            Locale::En => Locale::Es,
            Locale::Es => Locale::En,
        }
    }

    pub fn text(self) -> &'static TextTable {
        match self {
            Locale::En => &EN,
            Locale::Es => &ES,
        }
    }

    /// Name of the locale written in that locale ("English", "Español").
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::En => SWITCH_LANGUAGE_ENGLISH,
            Locale::Es => SWITCH_LANGUAGE_SPANISH,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    /// Accepts `EN`, `es`, and region-tagged forms such as `es-MX` or `en_US`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase();
        match primary.as_str() {
            "EN" => Ok(Locale::En),
            "ES" => Ok(Locale::Es),
            _ => Err(ConfigError::UnsupportedLocale(s.to_string())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.code().to_string()
    }
}

pub const SWITCH_LANGUAGE_ENGLISH: &str = "English";
pub const SWITCH_LANGUAGE_SPANISH: &str = "Español";

/// All static copy for one locale.
#[derive(Debug)]
pub struct TextTable {
    pub app_name: &'static str,
    pub assistant_name: &'static str,
    pub about_us_title: &'static str,
    pub about_us: &'static str,
    pub faq_title: &'static str,
    pub faqs: &'static [&'static str],
    pub simplify_mode_title: &'static str,
    pub simplify_mode_body: &'static str,
    pub chat_header_title: &'static str,
    pub thinking: &'static str,
    pub sources_label: &'static str,
    pub thumbs_up: &'static str,
    pub thumbs_down: &'static str,
    pub open_panel: &'static str,
    pub close_panel: &'static str,
    pub language_tooltip: &'static str,
    pub no_response: &'static str,
    pub error_message: &'static str,
}

pub static EN: TextTable = TextTable {
    app_name: "Chatbot Template App",
    assistant_name: "GenAI Bot",
    about_us_title: "About us",
    about_us: "Welcome to the DRTx Knowledge chat bot! We're here to assist to quickly access relevant information.",
    faq_title: "Frequently Asked Questions",
    faqs: &[
        "What is Disability Rights Texas?",
        "Can you help me apply for Social Security?",
        "What is Disability Rights vision?",
        "What are 10 self-advocacy tips?",
        "What are my rights under the Americans with Disabilities Act?",
    ],
    simplify_mode_title: "Simplify Mode",
    simplify_mode_body: "When turned on, the assistant gives clearer, easier-to-follow answers for users who want simple, straightforward explanations.",
    chat_header_title: "DRTx Knowledge Bot",
    thinking: "Thinking",
    sources_label: "Sources:",
    thumbs_up: "Thumbs up",
    thumbs_down: "Thumbs down",
    open_panel: "Open Panel",
    close_panel: "Close Panel",
    language_tooltip: "Language",
    no_response: "No response received",
    error_message: "Sorry, I encountered an error. Please try again later.",
};

pub static ES: TextTable = TextTable {
    app_name: "Aplicación de Plantilla de Chatbot",
    assistant_name: "Bot GenAI",
    about_us_title: "Acerca de nosotros",
    about_us: "¡Bienvenido al chatbot GenAI! Estamos aquí para ayudarte a acceder rápidamente a la información relevante.",
    faq_title: "Preguntas frecuentes",
    faqs: &[
        "¿Qué es Disability Rights Texas?",
        "¿Puedes ayudarme a solicitar el Seguro Social?",
        "¿Cuál es la visión de los Derechos de las Personas con Discapacidad?",
        "¿Cuáles son 10 consejos de autodefensa?",
        "¿Cuáles son mis derechos bajo la Ley de Estadounidenses con Discapacidades?",
    ],
    simplify_mode_title: "Modo Simplificado",
    simplify_mode_body: "Cuando está activado, el asistente proporciona respuestas más claras y fáciles de seguir para usuarios que desean explicaciones simples y directas.",
    chat_header_title: "Bot de conocimiento DRTx",
    thinking: "Pensando",
    sources_label: "Fuentes:",
    thumbs_up: "Me gusta",
    thumbs_down: "No me gusta",
    open_panel: "Abrir panel",
    close_panel: "Cerrar panel",
    language_tooltip: "Idioma",
    no_response: "No se recibió respuesta",
    error_message: "Lo siento, encontré un error. Por favor, inténtalo de nuevo más tarde.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("es".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!("es-MX".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!(" en_US ".parse::<Locale>().unwrap(), Locale::En);
    }

    #[test]
    fn rejects_unknown_codes() {
        let err = "fr".parse::<Locale>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedLocale(code) if code == "fr"));
        assert!("".parse::<Locale>().is_err());
    }

    #[test]
    fn toggling_flips_between_the_two_locales() {
        assert_eq!(Locale::En.toggled(), Locale::Es);
        assert_eq!(Locale::Es.toggled().toggled(), Locale::Es);
    }

    #[test]
    fn every_locale_fills_every_label() {
        for locale in Locale::ALL {
            let t = locale.text();
            let labels = [
                t.app_name,
                t.assistant_name,
                t.about_us_title,
                t.about_us,
                t.faq_title,
                t.simplify_mode_title,
                t.simplify_mode_body,
                t.chat_header_title,
                t.thinking,
                t.sources_label,
                t.thumbs_up,
                t.thumbs_down,
                t.open_panel,
                t.close_panel,
                t.language_tooltip,
                t.no_response,
                t.error_message,
            ];
            assert!(labels.iter().all(|l| !l.is_empty()), "{locale} has an empty label");
            assert_eq!(t.faqs.len(), EN.faqs.len(), "{locale} FAQ count differs");
        }
    }

    #[test]
    fn serde_uses_upper_case_codes() {
        assert_eq!(serde_json::to_string(&Locale::Es).unwrap(), "\"ES\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::En);
    }
}
