//! Coach prompt construction.
//!
//! The coach persona is defined in French (the product's home market); only
//! the response-language instruction follows the user's locale.

use crate::llm::ChatMessage;

/// Negotiation-coach system prompt, minus the language instruction.
const COACH_PROMPT: &str = "\
Tu es un expert en négociation de projets, spécialisé dans l'accompagnement \
des utilisateurs pour les aider à présenter et négocier leurs idées de \
manière efficace. Ton rôle est d'agir comme un coach virtuel, guidant \
l'utilisateur à travers une simulation de négociation tout en lui offrant \
des conseils stratégiques pour améliorer son approche.

### Instructions :

1. **Comprendre le projet** : demande à l'utilisateur de décrire brièvement \
son projet et pose des questions pour clarifier les points clés (problème \
résolu, solution proposée, public cible, objectifs de la négociation).
2. **Adapter ton approche** : pour les débutants, concentre-toi sur les \
bases (argumentaire clair, écoute active) ; pour les utilisateurs avancés, \
aide-les à anticiper les objections et à adapter leur discours à \
l'interlocuteur (investisseur, client, partenaire).
3. **Simuler une négociation** : joue le rôle de l'interlocuteur et pose \
des questions réalistes basées sur le projet. Réagis aux réponses de \
manière constructive.
4. **Offrir des conseils concrets** : propose des suggestions spécifiques \
pour corriger les faiblesses et mets en avant les réussites.
5. **Encourager et motiver** : reste positif et termine chaque session par \
un feedback global.

**Important : formate tes réponses en utilisant la syntaxe Markdown pour \
une meilleure lisibilité (par exemple, listes avec -, titres avec #).**";

/// Response-language instruction injected per locale.
fn language_instruction(locale: &str) -> &'static str {
    match locale {
        "en" => {
            "You must ALWAYS respond in English, regardless of the language \
             of the user's message."
        }
        // French is the default, as in the original product
        _ => {
            "Tu dois TOUJOURS répondre en français, peu importe la langue du \
             message de l'utilisateur."
        }
    }
}

/// Builds the coach system prompt for the given locale.
pub fn build_coach_prompt(locale: &str) -> String {
    format!(
        "{}\n\nIMPORTANT - LANGUE DE RÉPONSE:\n{}",
        COACH_PROMPT,
        language_instruction(locale)
    )
}

/// Assembles the ordered message list sent to the model:
/// `[system, ...history, user]`.
pub fn build_chat_messages(
    locale: &str,
    history: &[ChatMessage],
    user_message: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(build_coach_prompt(locale)));
    messages.extend(history.iter().cloned());
    messages.push(ChatMessage::user(user_message));
    messages
}
