use mostrador_core::domain::{CatalogOutcome, ChatMessage, ProductRecord};

use crate::classify::IntentSignals;

/// Assembles the ordered, role-tagged message list for one completion call.
///
/// Pure and side-effect-free: identical inputs produce byte-identical
/// output. The situational context (catalog block, directives) is never
/// persisted anywhere - it is recomputed from scratch every turn so catalog
/// data is always current.
#[derive(Clone, Debug)]
pub struct PromptAssembler {
    policy: String,
}

impl PromptAssembler {
    pub fn new(whatsapp_url: &str) -> Self {
        Self { policy: render_policy(whatsapp_url) }
    }

    /// Policy block first, then situational directives, then the trimmed
    /// transcript, then the current user message last.
    pub fn assemble(
        &self,
        signals: IntentSignals,
        catalog: &CatalogOutcome,
        transcript: &[ChatMessage],
        message: &str,
    ) -> Vec<ChatMessage> {
        let mut system = self.policy.clone();

        match catalog {
            CatalogOutcome::Listed(products) => {
                system.push_str("\n\nCatálogo real y actual de la tienda (llaveros disponibles):\n");
                system.push_str(&render_listing(products));
            }
            CatalogOutcome::Empty | CatalogOutcome::Failed => {
                system.push_str(
                    "\n\nNota interna: el catálogo se está ampliando. Indica que por el momento \
                     no puedes mostrar los productos, sin inventar opciones.",
                );
            }
            CatalogOutcome::NotRequested => {}
        }

        if signals.wants_custom_order {
            system.push_str(
                "\n\nNota interna: el cliente pide algo personalizado. No proceses el pedido \
                 aquí; dirígelo al WhatsApp oficial indicado arriba.",
            );
        }

        if signals.guided_purchase {
            system.push_str(
                "\n\nNota interna: el cliente muestra intención clara de compra. Guíalo hacia \
                 el producto concreto y comparte su enlace directo del catálogo.",
            );
        }

        let mut messages = Vec::with_capacity(transcript.len() + 2);
        messages.push(ChatMessage::system(system));
        messages.extend(transcript.iter().cloned());
        messages.push(ChatMessage::user(message));
        messages
    }
}

fn render_listing(products: &[ProductRecord]) -> String {
    products
        .iter()
        .map(|product| {
            let availability = match product.available {
                Some(true) => " | disponible",
                Some(false) => " | bajo demanda",
                None => "",
            };
            format!("- {} | {}{} | {}", product.title, product.price, availability, product.url)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_policy(whatsapp_url: &str) -> String {
    format!(
        "Eres el asistente oficial de la tienda Kanopy.\n\
         \n\
         FORMATO DE RESPUESTA (OBLIGATORIO):\n\
         - NO uses Markdown (ni asteriscos, ni negritas).\n\
         - NO uses [texto](link) ni etiquetas HTML.\n\
         - Los links deben ser URLs planas completas (https://...).\n\
         \n\
         REGLA CRÍTICA DE PRODUCTOS Y MATERIALES:\n\
         - Todos nuestros productos son EXCLUSIVAMENTE impresos en 3D.\n\
         - NO vendemos nada de acrílico. Si el cliente pregunta por acrílico, aclara \
         amablemente que solo trabajamos con impresión 3D.\n\
         - SOLO puedes mencionar productos listados explícitamente en el catálogo que se \
         te proporciona en este mensaje.\n\
         - Si un producto no está en el catálogo, responde: \"Actualmente no tenemos ese \
         llavero disponible en la tienda.\"\n\
         - NO inventes nombres, materiales, estilos ni categorías.\n\
         \n\
         CONTACTO OFICIAL DE WHATSAPP (ÚNICO Y OBLIGATORIO):\n\
         - WhatsApp: {whatsapp_url}\n\
         - SOLO ofrécelo cuando el cliente lo solicite explícitamente, para pedidos \
         personalizados o para asistencia directa.\n\
         \n\
         Contexto del negocio:\n\
         - La tienda SOLO vende llaveros.\n\
         - Nunca digas que no hay stock (se fabrican bajo demanda).\n\
         - Idioma: siempre en español."
    )
}
