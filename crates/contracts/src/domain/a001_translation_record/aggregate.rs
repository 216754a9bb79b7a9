use crate::domain::common::{
    audit_timestamp, day_utc, hidden_id, language, language_options, owner, text_field,
};
use crate::shared::grid::{EntityRoutes, GridSchema, SchemaError};

pub const CONTROLLER: &str = "TranslationRecordControllerImpl";
pub const ENTITY: &str = "translation-record";

/// Column schema of the translation record screen for `user_id`
pub fn schema(user_id: &str) -> Result<GridSchema, SchemaError> {
    let languages = language_options("zh");
    GridSchema::new(vec![
        hidden_id(),
        text_field("originalText", "Original Text"),
        language("fromLanguage", "From Language", &languages),
        text_field("translatedText", "Translated Text"),
        language("toLanguage", "To Language", &languages),
        day_utc("Date (UTC)"),
        audit_timestamp(),
        owner(user_id),
    ])
}

pub fn routes(base: &str) -> EntityRoutes {
    EntityRoutes::new(base, CONTROLLER, ENTITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use crate::shared::grid::{resolve, DynamicForm, Mode, RecordEntity};
    use std::sync::Arc;

    /// Row shape returned by the translation record controller
    #[allow(dead_code)]
    #[derive(Debug, Clone, PartialEq, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct TranslationRecord {
        #[serde(default)]
        id: String,
        original_text: String,
        from_language: String,
        translated_text: String,
        to_language: String,
        day_utc: String,
        #[serde(default)]
        created_at_utc: Option<String>,
        created_by_user_id: String,
    }

    #[test]
    fn test_schema_loads() {
        let s = schema("u-1").unwrap();
        let table: Vec<_> = resolve(&s, Mode::Retrieve).into_iter().map(|c| c.field).collect();
        assert_eq!(
            table,
            ["originalText", "fromLanguage", "translatedText", "toLanguage", "dayUtc"]
        );
    }

    #[test]
    fn test_blank_draft_is_stamped_with_owner() {
        let s = Arc::new(schema("u-1").unwrap());
        let draft = s.blank_entity();
        assert!(draft.is_draft());
        assert_eq!(draft.text("createdByUserId"), "u-1");

        let mut form = DynamicForm::open_create(s, &draft);
        let err = form.save().unwrap_err();
        assert_eq!(
            err.missing,
            ["Original Text", "From Language", "Translated Text", "To Language", "Date (UTC)"]
        );
    }

    #[test]
    fn test_rows_match_dto() {
        let row = RecordEntity::from_json(serde_json::json!({
            "id": "r-1",
            "originalText": "hello",
            "fromLanguage": "en",
            "translatedText": "你好",
            "toLanguage": "zh",
            "dayUtc": "2024-03-15T00:00:00Z",
            "createdByUserId": "u-1"
        }))
        .unwrap();
        let dto: TranslationRecord = serde_json::from_value(serde_json::to_value(&row).unwrap()).unwrap();
        assert_eq!(dto.to_language, "zh");
        assert_eq!(dto.created_at_utc, None);
    }

    #[test]
    fn test_routes() {
        assert_eq!(
            routes("/api").select_page(),
            "/api/TranslationRecordControllerImpl/get-page-translation-records"
        );
    }
}
