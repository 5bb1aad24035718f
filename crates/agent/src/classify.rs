use mostrador_core::config::LexiconConfig;

/// Curated crisis-indicator terms. Deliberately conservative: a false
/// positive costs one canned reply, a false negative costs much more.
const DEFAULT_RISK_KEYWORDS: &[&str] = &[
    "matarme",
    "suicid",
    "quitarme la vida",
    "no quiero vivir",
    "me quiero morir",
    "hacerme daño",
    "hacerme dano",
    "autolesion",
    "autolesión",
    "depresion severa",
    "depresión severa",
    "estoy en peligro",
    "me maltratan",
    "me pegan",
    "abuso",
    "violencia",
    "no tengo para comer",
    "no tengo dinero para comer",
];

/// Purchase/catalog vocabulary covering price, purchase, product, store,
/// availability and link phrasings commonly seen in store chats.
const DEFAULT_CATALOG_KEYWORDS: &[&str] = &[
    "precio",
    "comprar",
    "producto",
    "llavero",
    "tienda",
    "disponible",
    "venta",
    "link",
    "enlace",
    "cuesta",
    "cuanto vale",
    "cuánto vale",
    "catalogo",
    "catálogo",
];

const DEFAULT_CUSTOM_ORDER_KEYWORDS: &[&str] = &[
    "personalizado",
    "personalizada",
    "personalizar",
    "a medida",
    "diseño propio",
    "diseno propio",
    "con mi nombre",
    "con mi logo",
    "encargo especial",
];

fn normalize_text(text: &str) -> String {
    text.to_lowercase()
}

fn resolve_keywords(override_list: Option<&[String]>, defaults: &[&str]) -> Vec<String> {
    match override_list {
        Some(list) if !list.is_empty() => list.iter().map(|term| normalize_text(term)).collect(),
        _ => defaults.iter().map(|term| term.to_string()).collect(),
    }
}

/// Stateless predicate over raw message text. Flags messages indicating
/// self-harm, crisis, or other situations requiring human handoff.
#[derive(Clone, Debug)]
pub struct RiskClassifier {
    keywords: Vec<String>,
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::from_config(&LexiconConfig::default())
    }
}

impl RiskClassifier {
    pub fn from_config(lexicon: &LexiconConfig) -> Self {
        Self { keywords: resolve_keywords(lexicon.risk_keywords.as_deref(), DEFAULT_RISK_KEYWORDS) }
    }

    pub fn is_high_risk(&self, message: &str) -> bool {
        let normalized = normalize_text(message);
        self.keywords.iter().any(|keyword| normalized.contains(keyword))
    }
}

/// What the intent pass decided for one message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntentSignals {
    /// Any purchase/price/product/store/availability/link keyword matched;
    /// triggers a fresh catalog fetch.
    pub wants_catalog: bool,
    /// Personalization vocabulary matched; the prompt redirects the user to
    /// the human WhatsApp channel instead of processing the order inline.
    pub wants_custom_order: bool,
    /// Two or more distinct purchase signals matched (threshold tunable):
    /// genuine purchase intent rather than a casual mention.
    pub guided_purchase: bool,
}

#[derive(Clone, Debug)]
pub struct IntentClassifier {
    catalog_keywords: Vec<String>,
    custom_order_keywords: Vec<String>,
    guided_purchase_threshold: usize,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::from_config(&LexiconConfig::default(), 2)
    }
}

impl IntentClassifier {
    pub fn from_config(lexicon: &LexiconConfig, guided_purchase_threshold: usize) -> Self {
        Self {
            catalog_keywords: resolve_keywords(
                lexicon.catalog_keywords.as_deref(),
                DEFAULT_CATALOG_KEYWORDS,
            ),
            custom_order_keywords: resolve_keywords(
                lexicon.custom_order_keywords.as_deref(),
                DEFAULT_CUSTOM_ORDER_KEYWORDS,
            ),
            guided_purchase_threshold,
        }
    }

    pub fn classify(&self, message: &str) -> IntentSignals {
        let normalized = normalize_text(message);

        let matched_catalog_terms = self
            .catalog_keywords
            .iter()
            .filter(|keyword| normalized.contains(keyword.as_str()))
            .count();

        let wants_custom_order = self
            .custom_order_keywords
            .iter()
            .any(|keyword| normalized.contains(keyword.as_str()));

        IntentSignals {
            wants_catalog: matched_catalog_terms > 0,
            wants_custom_order,
            guided_purchase: matched_catalog_terms >= self.guided_purchase_threshold,
        }
    }
}
