//! Column building blocks shared by the translation screens

pub mod columns;

pub use columns::{
    audit_timestamp, day_utc, hidden_id, language, language_options, number_field, owner,
    text_field, LANGUAGE_TEXT_FIELD, LANGUAGE_VALUE_FIELD,
};
