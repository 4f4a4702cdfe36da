use std::borrow::Cow;

use promptpipe_core::model::Model;

/// Wire name for `model`, or `None` when it belongs to another provider.
pub(crate) fn map_model(model: &Model) -> Option<Cow<'static, str>> {
    match model {
        Model::OpenAi(openai_model) => Some(Cow::Borrowed(openai_model.as_str())),
        Model::Custom(custom) => Some(custom.clone()),
        Model::Gemini(_) => None,
    }
}
