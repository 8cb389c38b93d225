use super::{GenerationOptions, TextGenerator};

/// Used when the generator fails.
pub const ADVICE_ERROR_FALLBACK: &str =
    "Divida o conteúdo em pequenos blocos e faça revisões constantes.";

/// Used when the generator answers with nothing.
pub const ADVICE_EMPTY_FALLBACK: &str = "A consistência é a chave para o aprendizado.";

const ADVICE_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.7,
    max_output_tokens: 100,
};

/// Asks for a short study tip for `subject`. Never cached.
pub async fn study_advice(generator: Option<&dyn TextGenerator>, subject: &str) -> String {
    let Some(generator) = generator else {
        return ADVICE_ERROR_FALLBACK.to_string();
    };

    let prompt = format!(
        "Dê uma dica rápida de estudo em português para a matéria: {}. Seja conciso.",
        subject
    );
    match generator.generate(&prompt, ADVICE_OPTIONS).await {
        Ok(text) if text.trim().is_empty() => ADVICE_EMPTY_FALLBACK.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::warn!("Study advice generation failed: {}", e);
            ADVICE_ERROR_FALLBACK.to_string()
        }
    }
}
