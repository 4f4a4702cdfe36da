use std::borrow::Cow;

use promptpipe_core::model::Model;

/// Wire name for `model`, or `None` when it belongs to another provider.
///
/// A `models/` prefix on custom names is dropped since the client adds it.
pub(crate) fn map_model(model: &Model) -> Option<Cow<'static, str>> {
    match model {
        Model::Gemini(gemini_model) => Some(Cow::Borrowed(gemini_model.as_str())),
        Model::Custom(custom) => match custom.strip_prefix("models/") {
            Some(stripped) => Some(Cow::Owned(stripped.to_owned())),
            None => Some(custom.clone()),
        },
        Model::OpenAi(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use promptpipe_core::model::{GeminiModel, OpenAiModel};

    use super::*;

    #[test]
    fn maps_gemini_and_custom_models() {
        assert_eq!(
            map_model(&GeminiModel::Gemini15Pro.into()).as_deref(),
            Some("gemini-1.5-pro")
        );
        assert_eq!(
            map_model(&Model::Custom("models/gemini-exp".into())).as_deref(),
            Some("gemini-exp")
        );
        assert_eq!(map_model(&OpenAiModel::Gpt4o.into()), None);
    }
}
