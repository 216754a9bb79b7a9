use serde_json::{json, Value};

use crate::domain::common::{
    audit_timestamp, day_utc, hidden_id, language, language_options, number_field, owner,
    text_field,
};
use crate::shared::grid::{
    ColumnDescriptor, EntityRoutes, GridSchema, Mode, ModeRule, SchemaError, SortHint, WidgetSpec,
};

pub const CONTROLLER: &str = "TranslationWithSoundRecordControllerImpl";
pub const ENTITY: &str = "translation-with-sound-record";

/// Categories a sound record can be filed under
pub fn categories() -> Vec<Value> {
    vec![json!({
        "Id": "20b011ed-40c4-16c9-0e37-a56ece3cbcda",
        "Name": "UNIVERSAL ENGLISH",
    })]
}

fn category() -> ColumnDescriptor {
    ColumnDescriptor::new("categoriesId", "Category")
        .sort(SortHint::String)
        .mode(Mode::Retrieve, ModeRule::display())
        .form(ModeRule::editable(WidgetSpec::dropdown(categories(), "Name", "Id")).required())
}

pub fn schema(user_id: &str) -> Result<GridSchema, SchemaError> {
    let languages = language_options("tw");
    GridSchema::new(vec![
        hidden_id(),
        category(),
        text_field("originalText", "Original Text"),
        language("fromLanguage", "From Language", &languages),
        text_field("translatedText", "Translated Text"),
        language("toLanguage", "To Language", &languages),
        number_field("priority", "Priority"),
        number_field("repeatOriginal", "Repeat Original"),
        number_field("repeatTranslated", "Repeat Translated"),
        number_field("delay", "Delay"),
        number_field("duration", "Duration"),
        text_field("soundFileName", "Sound File"),
        day_utc("Day (UTC)"),
        audit_timestamp(),
        owner(user_id),
    ])
}

pub fn routes(base: &str) -> EntityRoutes {
    EntityRoutes::new(base, CONTROLLER, ENTITY)
}
